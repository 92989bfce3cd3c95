use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use vacation_planner::components::submission::{ErrorBody, SubmissionResponse, VacationRecord};

use crate::model::{Employee, VacationQuery};
use crate::validation::validate_request;
use crate::AppState;

/// Error response carrying `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Query parameters of `GET /vacation-requests`
#[derive(Debug, Deserialize)]
pub struct ListParams {
    employee_id: Option<String>,
}

// Handler for API health check
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for the employee list
pub async fn list_employees_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    state.store.list_employees().await.map(Json).map_err(|e| {
        error!("Failed to list employees: {}", e);
        ApiError::internal(e)
    })
}

/// Handler for listing stored vacation days
pub async fn list_vacations_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<VacationRecord>>, ApiError> {
    // A filter that is not a number is ignored
    let query = VacationQuery {
        employee_id: params.employee_id.and_then(|id| id.trim().parse().ok()),
        dates: None,
    };

    state.store.list_vacations(&query).await.map(Json).map_err(|e| {
        error!("Failed to list vacation requests: {}", e);
        ApiError::internal(e)
    })
}

/// Handler for vacation request submission
pub async fn create_vacation_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    let payload: Value = serde_json::from_str(&body).map_err(|e| {
        warn!("Rejected request with unreadable body: {}", e);
        ApiError::bad_request("Invalid JSON body")
    })?;

    let request = validate_request(&payload).map_err(|message| {
        warn!("Rejected vacation request: {}", message);
        ApiError::bad_request(message)
    })?;

    let employee = state
        .store
        .employee(request.employee_id)
        .await
        .map_err(ApiError::internal)?;
    if employee.is_none() {
        return Err(ApiError::not_found(format!(
            "Employee {} not found",
            request.employee_id
        )));
    }

    state
        .store
        .upsert(request.employee_id, &request.entries)
        .await
        .map_err(|e| {
            error!("Failed to store vacation request: {}", e);
            ApiError::internal(e)
        })?;

    let query = VacationQuery {
        employee_id: Some(request.employee_id),
        dates: Some(request.entries.iter().map(|entry| entry.date).collect()),
    };
    let requests = state
        .store
        .list_vacations(&query)
        .await
        .map_err(ApiError::internal)?;

    info!(
        "Stored {} vacation day(s) for employee {}",
        requests.len(),
        request.employee_id
    );
    Ok((StatusCode::CREATED, Json(SubmissionResponse { requests })))
}
