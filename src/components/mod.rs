// Export components
pub mod calendar;
pub mod credentials;
pub mod planner;
pub mod submission;

// Re-export the screen session
pub use planner::VacationSession;
