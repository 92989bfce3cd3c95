use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vacation_planner::components::submission::VacationRecord;
use vacation_planner::utils::time::{format_iso_date, format_time_of_day};

/// Employees known to the service
pub const EMPLOYEE_FIXTURES: [(i64, &str); 10] = [
    (1, "Alice"),
    (2, "Bob"),
    (3, "Charlie"),
    (4, "Diana"),
    (5, "Ethan"),
    (6, "Fiona"),
    (7, "George"),
    (8, "Hannah"),
    (9, "Ivan"),
    (10, "Judy"),
];

/// An employee row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
}

/// A validated day of a vacation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A stored vacation day, unique per employee and date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVacation {
    pub employee_id: i64,
    pub vacation_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub submitted_at: DateTime<Utc>,
}

impl StoredVacation {
    fn to_record(&self, employee_name: Option<String>) -> VacationRecord {
        VacationRecord {
            employee_id: Some(self.employee_id),
            employee_name,
            vacation_date: format_iso_date(self.vacation_date),
            start_time: format_time_of_day(self.start_time),
            end_time: format_time_of_day(self.end_time),
            submitted_at: Some(self.submitted_at.to_rfc3339()),
        }
    }
}

/// Filter for listing stored vacation days
#[derive(Debug, Clone, Default)]
pub struct VacationQuery {
    pub employee_id: Option<i64>,
    pub dates: Option<Vec<NaiveDate>>,
}

/// Storage for employees and their vacation days
#[async_trait::async_trait]
pub trait VacationStore: Send + Sync + 'static {
    /// Get an employee by id
    async fn employee(&self, id: i64) -> Result<Option<Employee>, String>;

    /// List all employees ordered by id
    async fn list_employees(&self) -> Result<Vec<Employee>, String>;

    /// Insert or replace the given days for an employee
    async fn upsert(&self, employee_id: i64, entries: &[NormalizedEntry]) -> Result<(), String>;

    /// Stored days matching the query, ordered by date then start time
    async fn list_vacations(&self, query: &VacationQuery) -> Result<Vec<VacationRecord>, String>;
}

/// In-memory implementation of the store
#[derive(Debug)]
pub struct InMemoryStore {
    employees: Vec<Employee>,
    vacations: tokio::sync::RwLock<HashMap<(i64, NaiveDate), StoredVacation>>,
}

impl InMemoryStore {
    /// Store seeded with the employee fixtures
    pub fn seeded() -> Self {
        Self {
            employees: EMPLOYEE_FIXTURES
                .iter()
                .map(|(id, name)| Employee {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
            vacations: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    fn employee_name(&self, id: i64) -> Option<String> {
        self.employees
            .iter()
            .find(|employee| employee.id == id)
            .map(|employee| employee.name.clone())
    }
}

#[async_trait::async_trait]
impl VacationStore for InMemoryStore {
    async fn employee(&self, id: i64) -> Result<Option<Employee>, String> {
        Ok(self.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, String> {
        let mut employees = self.employees.clone();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }

    async fn upsert(&self, employee_id: i64, entries: &[NormalizedEntry]) -> Result<(), String> {
        let mut vacations = self.vacations.write().await;
        let now = Utc::now();

        for entry in entries {
            vacations
                .entry((employee_id, entry.date))
                .and_modify(|stored| {
                    stored.start_time = entry.start_time;
                    stored.end_time = entry.end_time;
                })
                .or_insert(StoredVacation {
                    employee_id,
                    vacation_date: entry.date,
                    start_time: entry.start_time,
                    end_time: entry.end_time,
                    submitted_at: now,
                });
        }
        Ok(())
    }

    async fn list_vacations(&self, query: &VacationQuery) -> Result<Vec<VacationRecord>, String> {
        let vacations = self.vacations.read().await;

        let mut rows: Vec<&StoredVacation> = vacations
            .values()
            .filter(|v| query.employee_id.map_or(true, |id| v.employee_id == id))
            .filter(|v| {
                query
                    .dates
                    .as_ref()
                    .map_or(true, |dates| dates.contains(&v.vacation_date))
            })
            .collect();
        rows.sort_by_key(|v| (v.vacation_date, v.start_time, v.employee_id));

        Ok(rows
            .into_iter()
            .map(|v| v.to_record(self.employee_name(v.employee_id)))
            .collect())
    }
}
