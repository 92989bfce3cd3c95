use chrono::{DateTime, Utc};
use rust_i18n::t;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use vacation_planner::components::calendar::CalendarSettings;
use vacation_planner::components::credentials;
use vacation_planner::components::planner::{TimeCatalog, TimeField, VacationSession};
use vacation_planner::components::submission::SubmissionService;
use vacation_planner::error::Error;
use vacation_planner::utils::time::{format_time_of_day, parse_iso_date, parse_time_of_day};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { employee_id: String, password: String },
    Days,
    Toggle(String),
    Pick { date: String, field: String },
    Choose(String),
    Close,
    List,
    Submit,
    Logout,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Command::Empty;
        };
        let args: Vec<&str> = words.collect();

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("login", [id, password]) => Command::Login {
                employee_id: id.to_string(),
                password: password.to_string(),
            },
            // A missing password still reaches the credential check
            ("login", [id]) => Command::Login {
                employee_id: id.to_string(),
                password: String::new(),
            },
            ("login", []) => Command::Login {
                employee_id: String::new(),
                password: String::new(),
            },
            ("days", []) => Command::Days,
            ("toggle", [date]) => Command::Toggle(date.to_string()),
            ("pick", [date, field]) => Command::Pick {
                date: date.to_string(),
                field: field.to_string(),
            },
            ("choose", [time]) => Command::Choose(time.to_string()),
            ("close", []) => Command::Close,
            ("list", []) => Command::List,
            ("submit", []) => Command::Submit,
            ("logout", []) => Command::Logout,
            ("help", []) => Command::Help,
            ("quit", []) | ("exit", []) => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

enum Screen {
    Login,
    Vacation(VacationSession),
}

/// Text front end driving the login and vacation screens
pub struct Console<S: SubmissionService> {
    settings: CalendarSettings,
    catalog: TimeCatalog,
    service: S,
    screen: Screen,
    reference_time: Option<DateTime<Utc>>,
}

impl<S: SubmissionService> Console<S> {
    pub fn new(settings: CalendarSettings, catalog: TimeCatalog, service: S) -> Self {
        Self {
            settings,
            catalog,
            service,
            screen: Screen::Login,
            reference_time: None,
        }
    }

    /// Anchor new sessions at a fixed instant instead of the clock
    #[cfg(test)]
    pub fn with_reference_time(mut self, reference: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference);
        self
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(mut self) -> miette::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        print_lines(&self.greeting());

        while let Some(line) = lines.next_line().await.map_err(Error::from)? {
            let command = Command::parse(&line);
            if command == Command::Quit {
                break;
            }
            let output = self.handle(command).await;
            print_lines(&output);
        }

        info!("Console closed");
        Ok(())
    }

    fn greeting(&self) -> Vec<String> {
        vec![
            t!("console_login_title").to_string(),
            t!("console_login_prompt").to_string(),
        ]
    }

    /// Apply one command and return the lines to show
    pub async fn handle(&mut self, command: Command) -> Vec<String> {
        debug!("Handling command {:?}", command);

        match command {
            Command::Empty | Command::Quit => Vec::new(),
            Command::Help => vec![t!("console_help").to_string()],
            Command::Unknown(_) => vec![t!("console_unknown_command").to_string()],
            Command::Login {
                employee_id,
                password,
            } => self.login(&employee_id, &password),
            Command::Logout => {
                self.screen = Screen::Login;
                self.greeting()
            }
            command => match &mut self.screen {
                Screen::Login => vec![t!("console_login_prompt").to_string()],
                Screen::Vacation(session) => handle_vacation(session, &self.service, command).await,
            },
        }
    }

    fn login(&mut self, employee_id: &str, password: &str) -> Vec<String> {
        match credentials::verify(employee_id, password) {
            Ok(id) => {
                info!("Employee {} logged in", id);
                let reference = self.reference_time.unwrap_or_else(Utc::now);
                let session = VacationSession::new(
                    Some(id.clone()),
                    reference,
                    self.settings.clone(),
                    self.catalog.clone(),
                );
                let lines = vec![
                    t!("console_logged_in", id = id).to_string(),
                    t!("console_today", label = session.today_label()).to_string(),
                    t!("console_help").to_string(),
                ];
                self.screen = Screen::Vacation(session);
                lines
            }
            Err(err) => vec![err.user_message()],
        }
    }
}

async fn handle_vacation<S: SubmissionService>(
    session: &mut VacationSession,
    service: &S,
    command: Command,
) -> Vec<String> {
    match command {
        Command::Days => day_rows(session),
        Command::Toggle(raw) => {
            let Some(day) = parse_iso_date(&raw).and_then(|date| session.find_day(date).cloned())
            else {
                return vec![t!("console_bad_date", value = raw).to_string()];
            };
            match session.toggle_date(&day) {
                Ok(toggle) => {
                    debug!("{} -> {:?}", day.iso_date, toggle);
                    selection_rows(session)
                }
                Err(_) => session.status().map(String::from).into_iter().collect(),
            }
        }
        Command::Pick { date, field } => {
            let Some(date) = parse_iso_date(&date) else {
                return vec![t!("console_bad_date", value = date).to_string()];
            };
            let Some(field) = TimeField::parse(&field) else {
                return vec![t!("console_bad_field").to_string()];
            };
            if !session.selection().is_selected(date) {
                return vec![t!("console_not_selected", date = date).to_string()];
            }
            session.open_picker(date, field);
            let options = offered_times(session);
            vec![t!(
                "console_picker_options",
                date = date,
                field = field,
                options = options
            )
            .to_string()]
        }
        Command::Choose(raw) => {
            let Some(time) = parse_time_of_day(&raw) else {
                return vec![t!("console_bad_time", value = raw).to_string()];
            };
            if session.active_picker().is_none() {
                return vec![t!("console_no_picker").to_string()];
            }
            if session.choose_time(time).is_none() {
                let options = offered_times(session);
                return vec![
                    t!("console_time_not_offered", value = raw, options = options).to_string(),
                ];
            }
            selection_rows(session)
        }
        Command::Close => {
            session.close_picker();
            Vec::new()
        }
        Command::List => selection_rows(session),
        Command::Submit => {
            // Success and failure both end in a status line
            let _ = session.submit(service).await;
            session.status().map(String::from).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

fn offered_times(session: &VacationSession) -> String {
    session
        .picker_options()
        .into_iter()
        .map(format_time_of_day)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Candidate days, two per row in window order
fn day_rows(session: &VacationSession) -> Vec<String> {
    let cells: Vec<String> = session
        .days()
        .iter()
        .map(|day| {
            let mark = if session.selection().is_selected(day.date()) {
                format!("[{}]", t!("console_selected"))
            } else if !session.selection().is_selectable(day.day_number) {
                format!("({})", t!("console_locked"))
            } else {
                String::new()
            };
            format!("{:<12} {:<10} {}", day.label, day.iso_date, mark)
        })
        .collect();

    cells
        .chunks(2)
        .map(|pair| pair.join("   ").trim_end().to_string())
        .collect()
}

fn selection_rows(session: &VacationSession) -> Vec<String> {
    let selected = session.sorted_selections();
    if selected.is_empty() {
        return vec![t!("console_no_selection").to_string()];
    }
    selected
        .iter()
        .map(|day| format!("{:<12} {}", day.label, day.slot))
        .collect()
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
