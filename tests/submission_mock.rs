use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use std::sync::Mutex;
use vacation_planner::components::calendar::CalendarSettings;
use vacation_planner::components::planner::{TimeCatalog, TimeField, VacationSession};
use vacation_planner::components::submission::{
    EmployeeId, SubmissionResponse, SubmissionService, SubmitError, VacationEntry, VacationRecord,
};
use vacation_planner::utils::time::parse_iso_date;

/// Mock implementation of the submission service that records every call
#[derive(Debug, Default)]
pub struct MockSubmissionService {
    calls: Mutex<Vec<(EmployeeId, Vec<VacationEntry>)>>,
    failure: Option<String>,
}

impl MockSubmissionService {
    /// A service that rejects every request with the given message
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(EmployeeId, Vec<VacationEntry>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionService for MockSubmissionService {
    async fn submit(
        &self,
        employee_id: EmployeeId,
        entries: &[VacationEntry],
    ) -> Result<SubmissionResponse, SubmitError> {
        self.calls
            .lock()
            .unwrap()
            .push((employee_id, entries.to_vec()));

        if let Some(message) = &self.failure {
            return Err(SubmitError::Service {
                status: Some(400),
                message: message.clone(),
            });
        }

        // Echo the entries back the way the service stores them
        Ok(SubmissionResponse {
            requests: entries
                .iter()
                .map(|entry| VacationRecord {
                    employee_id: Some(employee_id.get()),
                    employee_name: None,
                    vacation_date: entry.date.clone(),
                    start_time: entry.start_time.clone(),
                    end_time: entry.end_time.clone(),
                    submitted_at: None,
                })
                .collect(),
        })
    }
}

fn monday() -> DateTime<Utc> {
    // 09:00 on Monday 2024-06-10 at UTC+8
    Utc.with_ymd_and_hms(2024, 6, 10, 1, 0, 0).unwrap()
}

fn session(employee_id: &str) -> VacationSession {
    let settings = CalendarSettings {
        tz_offset_ms: 8 * 60 * 60 * 1000,
        window_days: 30,
        weekday_labels: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from),
    };
    VacationSession::new(
        Some(employee_id.to_string()),
        monday(),
        settings,
        TimeCatalog::default(),
    )
}

fn select(session: &mut VacationSession, iso: &str) {
    let day = session
        .find_day(parse_iso_date(iso).unwrap())
        .cloned()
        .unwrap();
    session.toggle_date(&day).unwrap();
}

fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

#[tokio::test]
async fn test_full_session_submits_sorted_entries() {
    let service = MockSubmissionService::default();
    let mut session = session("3");

    select(&mut session, "2024-06-19");
    select(&mut session, "2024-06-18");

    // Moving the start past the end pushes the end forward
    session
        .set_time(parse_iso_date("2024-06-18").unwrap(), TimeField::Start, time(19))
        .unwrap();

    session.open_picker(parse_iso_date("2024-06-19").unwrap(), TimeField::End);
    assert_eq!(session.picker_options().len(), 14);
    session.choose_time(time(12)).unwrap();
    assert!(session.active_picker().is_none());

    let message = session.submit(&service).await.unwrap();
    assert_eq!(
        message,
        "Leave request sent for 6/18 (19:00 - 20:00), 6/19 (09:00 - 12:00)"
    );
    assert_eq!(session.status(), Some(message.as_str()));
    assert!(session.selection().is_empty());
    assert!(!session.is_submitting());

    let calls = service.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, EmployeeId::new(3));
    let dates: Vec<&str> = calls[0].1.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-06-18", "2024-06-19"]);
}

#[tokio::test]
async fn test_failure_keeps_selection() {
    let service = MockSubmissionService::failing("Employee 3 not found");
    let mut session = session("3");
    select(&mut session, "2024-06-18");

    let err = session.submit(&service).await.unwrap_err();
    assert!(matches!(err, SubmitError::Service { .. }));
    assert_eq!(session.status(), Some("Employee 3 not found"));
    assert_eq!(session.selection().len(), 1);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_empty_failure_message_uses_generic_text() {
    let service = MockSubmissionService::failing("");
    let mut session = session("3");
    select(&mut session, "2024-06-18");

    session.submit(&service).await.unwrap_err();
    assert_eq!(
        session.status(),
        Some("An unknown error occurred while sending the leave request. Please try again later.")
    );
}

#[tokio::test]
async fn test_blocked_submissions_never_reach_service() {
    let service = MockSubmissionService::default();

    let mut empty = session("3");
    assert!(matches!(
        empty.submit(&service).await,
        Err(SubmitError::EmptySelection)
    ));

    let mut anonymous = session("abc");
    select(&mut anonymous, "2024-06-18");
    assert!(matches!(
        anonymous.submit(&service).await,
        Err(SubmitError::MissingEmployeeId)
    ));

    let mut busy = session("3");
    select(&mut busy, "2024-06-18");
    busy.begin_submission().unwrap();
    assert!(matches!(
        busy.submit(&service).await,
        Err(SubmitError::AlreadySubmitting)
    ));

    assert!(service.calls().is_empty());
}

#[test]
fn test_locked_week_rejected() {
    let mut session = session("3");
    let day = session
        .find_day(parse_iso_date("2024-06-12").unwrap())
        .cloned()
        .unwrap();

    assert!(session.toggle_date(&day).is_err());
    assert_eq!(
        session.status(),
        Some("Next week's leave must be set before this Saturday. Please choose another date.")
    );
    assert!(session.selection().is_empty());
}
