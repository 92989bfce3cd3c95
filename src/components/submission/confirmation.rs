use super::models::VacationRecord;
use crate::utils::time::format_iso_month_day;
use rust_i18n::t;

/// User-facing confirmation built from the days echoed by the service
pub fn format_confirmation(requests: &[VacationRecord]) -> String {
    if requests.is_empty() {
        return t!("submit_success_generic").to_string();
    }

    let separator = t!("confirmation_separator");
    let items = requests
        .iter()
        .map(|request| {
            format!(
                "{} ({} - {})",
                format_iso_month_day(&request.vacation_date),
                request.start_time,
                request.end_time
            )
        })
        .collect::<Vec<_>>()
        .join(&*separator);

    t!("submit_success", items = items).to_string()
}
