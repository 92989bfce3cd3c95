use super::catalog::TimeCatalog;
use super::models::{PickerToken, TimeField, TimeSlot};
use super::selection::{SelectionError, SelectionState, Toggle};
use crate::components::calendar::{generate, CalendarSettings, DayNumber, DayOption};
use crate::components::submission::{
    format_confirmation, EmployeeId, SubmissionResponse, SubmissionService, SubmitError,
    VacationEntry,
};
use crate::utils::time::{format_iso_date, format_time_of_day};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};

/// A selected date as shown in the summary list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDay {
    pub date: NaiveDate,
    pub iso_date: String,
    pub label: String,
    pub slot: TimeSlot,
}

/// Everything needed to send one request, captured when the submission starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub employee_id: EmployeeId,
    pub entries: Vec<VacationEntry>,
}

/// One visit of the vacation screen
#[derive(Debug)]
pub struct VacationSession {
    employee_id: Option<String>,
    settings: CalendarSettings,
    selection: SelectionState,
    status: Option<String>,
    submitting: bool,
}

impl VacationSession {
    /// Start a visit with an empty selection, anchored at `reference`
    pub fn new(
        employee_id: Option<String>,
        reference: DateTime<Utc>,
        settings: CalendarSettings,
        catalog: TimeCatalog,
    ) -> Self {
        let window = generate(reference, &settings);
        Self {
            employee_id,
            settings,
            selection: SelectionState::new(window, catalog),
            status: None,
            submitting: false,
        }
    }

    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current status line, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn today_label(&self) -> String {
        self.settings.label_for(self.selection.window().today)
    }

    /// Candidate days in display order
    pub fn days(&self) -> &[DayOption] {
        &self.selection.window().days
    }

    pub fn find_day(&self, date: NaiveDate) -> Option<&DayOption> {
        self.selection.window().find(date)
    }

    pub fn toggle_date(&mut self, day: &DayOption) -> Result<Toggle, SelectionError> {
        match self.selection.toggle_date(day) {
            Ok(toggle) => {
                self.status = None;
                Ok(toggle)
            }
            Err(err) => {
                info!("Rejected selection of {}: {}", day.iso_date, err);
                self.status = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn open_picker(&mut self, date: NaiveDate, field: TimeField) {
        self.selection.open_picker(date, field);
    }

    pub fn close_picker(&mut self) {
        self.selection.close_picker();
    }

    pub fn active_picker(&self) -> Option<PickerToken> {
        self.selection.active_picker()
    }

    pub fn picker_options(&self) -> Vec<NaiveTime> {
        self.selection.picker_options()
    }

    pub fn choose_time(&mut self, value: NaiveTime) -> Option<TimeSlot> {
        self.selection.choose_time(value)
    }

    pub fn set_time(
        &mut self,
        date: NaiveDate,
        field: TimeField,
        value: NaiveTime,
    ) -> Option<TimeSlot> {
        self.selection.set_time(date, field, value)
    }

    /// Selected dates sorted by date, with display labels
    pub fn sorted_selections(&self) -> Vec<SelectedDay> {
        self.selection
            .selections()
            .iter()
            .map(|(date, slot)| SelectedDay {
                date: *date,
                iso_date: format_iso_date(*date),
                label: self.settings.label_for(DayNumber::from_date(*date)),
                slot: *slot,
            })
            .collect()
    }

    /// Request entries built from the current selection
    pub fn entries(&self) -> Vec<VacationEntry> {
        self.selection
            .selections()
            .iter()
            .map(|(date, slot)| VacationEntry {
                date: format_iso_date(*date),
                start_time: format_time_of_day(slot.start),
                end_time: format_time_of_day(slot.end),
            })
            .collect()
    }

    /// Check the inputs and mark a submission as in flight
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.submitting {
            return Err(SubmitError::AlreadySubmitting);
        }

        let employee_id = match self.employee_id.as_deref().and_then(EmployeeId::parse) {
            Some(id) => id,
            None => return Err(self.reject(SubmitError::MissingEmployeeId)),
        };

        if self.selection.is_empty() {
            return Err(self.reject(SubmitError::EmptySelection));
        }

        self.submitting = true;
        self.status = None;

        Ok(PendingSubmission {
            employee_id,
            entries: self.entries(),
        })
    }

    /// Apply the outcome of an in-flight submission. On success the
    /// selection is cleared; on failure it is kept for a retry.
    pub fn finish_submission(
        &mut self,
        result: Result<SubmissionResponse, SubmitError>,
    ) -> Result<String, SubmitError> {
        self.submitting = false;

        match result {
            Ok(response) => {
                let message = format_confirmation(&response.requests);
                info!(
                    "Vacation request submitted: {} days confirmed",
                    response.requests.len()
                );
                self.selection.clear();
                self.status = Some(message.clone());
                Ok(message)
            }
            Err(err) => {
                warn!("Vacation request failed: {}", err);
                self.status = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Validate, send and apply one submission
    pub async fn submit(&mut self, service: &dyn SubmissionService) -> Result<String, SubmitError> {
        let pending = self.begin_submission()?;
        let result = service
            .submit(pending.employee_id, &pending.entries)
            .await;
        self.finish_submission(result)
    }

    fn reject(&mut self, err: SubmitError) -> SubmitError {
        info!("Submission blocked: {}", err);
        self.status = Some(err.user_message());
        err
    }
}
