#[macro_use]
extern crate rust_i18n;

mod console;

use console::Console;
use tracing::info;
use vacation_planner::components::submission::HttpSubmissionService;
use vacation_planner::startup;

// Initialize i18n
i18n!("locales", fallback = "en");

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging("info,reqwest=warn")?;

    info!("Starting vacation planner");

    // Load configuration
    let config = startup::load_config()?;

    let service = HttpSubmissionService::new(&config.api_base_url()?, config.request_timeout())?;
    info!("Submitting to {}", service.endpoint());

    let console = Console::new(config.calendar_settings()?, config.time_catalog()?, service);
    console.run().await
}
