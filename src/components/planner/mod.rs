pub mod catalog;
pub mod eligibility;
pub mod models;
pub mod selection;
pub mod session;

pub use catalog::TimeCatalog;
pub use eligibility::is_selectable;
pub use models::{PickerToken, TimeField, TimeSlot};
pub use selection::{SelectionError, SelectionState, Toggle};
pub use session::{PendingSubmission, SelectedDay, VacationSession};
