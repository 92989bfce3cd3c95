pub mod client;
pub mod confirmation;
pub mod models;

pub use client::HttpSubmissionService;
pub use confirmation::format_confirmation;
pub use models::{EmployeeId, ErrorBody, SubmissionResponse, VacationEntry, VacationRecord};

use async_trait::async_trait;
use rust_i18n::t;
use thiserror::Error;

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("employee identifier is missing or not a number")]
    MissingEmployeeId,

    #[error("no dates selected")]
    EmptySelection,

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl SubmitError {
    /// Status text shown to the user; service failures without a message
    /// fall back to a generic text
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::MissingEmployeeId => t!("missing_employee_id").to_string(),
            SubmitError::EmptySelection => t!("empty_selection").to_string(),
            SubmitError::AlreadySubmitting => t!("submission_in_flight").to_string(),
            SubmitError::Service { message, .. } => or_generic(message),
            SubmitError::Transport(err) => or_generic(&err.to_string()),
        }
    }
}

fn or_generic(message: &str) -> String {
    if message.trim().is_empty() {
        t!("submit_unknown_error").to_string()
    } else {
        message.to_string()
    }
}

/// Persists a vacation request and echoes the stored days
#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(
        &self,
        employee_id: EmployeeId,
        entries: &[VacationEntry],
    ) -> Result<SubmissionResponse, SubmitError>;
}
