use lazy_static::lazy_static;
use rust_i18n::t;
use std::collections::HashMap;
use thiserror::Error;

/// Number of employees in the login table
pub const EMPLOYEE_COUNT: u32 = 10;

lazy_static! {
    /// Employee id -> password. The password is the id repeated four times,
    /// except for employee 10.
    static ref EMPLOYEE_PASSWORDS: HashMap<String, String> = (1..=EMPLOYEE_COUNT)
        .map(|id| {
            let id = id.to_string();
            let password = if id == "10" {
                "1010".to_string()
            } else {
                id.repeat(4)
            };
            (id, password)
        })
        .collect();
}

/// Login failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("employee id and password are required")]
    MissingFields,

    #[error("unknown employee id")]
    UnknownEmployee,

    #[error("wrong password")]
    WrongPassword,
}

impl LoginError {
    /// Status text shown on the login screen
    pub fn user_message(&self) -> String {
        match self {
            LoginError::MissingFields => t!("login_missing_fields").to_string(),
            LoginError::UnknownEmployee => t!("login_unknown_employee").to_string(),
            LoginError::WrongPassword => t!("login_wrong_password").to_string(),
        }
    }
}

/// Check an id/password pair and return the trimmed employee id
pub fn verify(employee_id: &str, password: &str) -> Result<String, LoginError> {
    let employee_id = employee_id.trim();
    let password = password.trim();

    if employee_id.is_empty() || password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    match EMPLOYEE_PASSWORDS.get(employee_id) {
        None => Err(LoginError::UnknownEmployee),
        Some(expected) if expected == password => Ok(employee_id.to_string()),
        Some(_) => Err(LoginError::WrongPassword),
    }
}
