use crate::error::{config_error, PlannerResult};
use chrono::NaiveTime;

/// First entry of the default catalog
pub const DEFAULT_FIRST_HOUR: u32 = 6;
/// Last entry of the default catalog
pub const DEFAULT_LAST_HOUR: u32 = 23;

/// Ordered, hour-aligned times of day offered by the time pickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeCatalog {
    entries: Vec<NaiveTime>,
}

impl TimeCatalog {
    /// One entry per hour from `first_hour` to `last_hour`, both inclusive
    pub fn hourly(first_hour: u32, last_hour: u32) -> PlannerResult<Self> {
        if last_hour > 23 {
            return Err(config_error(&format!(
                "Catalog last hour must be at most 23, got {}",
                last_hour
            )));
        }
        if first_hour >= last_hour {
            return Err(config_error(&format!(
                "Catalog first hour ({}) must be before last hour ({})",
                first_hour, last_hour
            )));
        }
        Ok(Self::build(first_hour, last_hour))
    }

    fn build(first_hour: u32, last_hour: u32) -> Self {
        Self {
            entries: (first_hour..=last_hour)
                .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[NaiveTime] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, time: NaiveTime) -> Option<usize> {
        self.entries.iter().position(|entry| *entry == time)
    }

    /// The entry immediately after `time`; `None` for the last entry or a
    /// time that is not in the catalog
    pub fn next_after(&self, time: NaiveTime) -> Option<NaiveTime> {
        let index = self.position(time)?;
        self.entries.get(index + 1).copied()
    }

    /// The entry immediately before `time`; `None` for the first entry or a
    /// time that is not in the catalog
    pub fn previous_before(&self, time: NaiveTime) -> Option<NaiveTime> {
        let index = self.position(time)?;
        index.checked_sub(1).map(|prev| self.entries[prev])
    }

    /// All entries strictly earlier than `bound`
    pub fn earlier_than(&self, bound: NaiveTime) -> Vec<NaiveTime> {
        self.entries.iter().copied().filter(|t| *t < bound).collect()
    }

    /// All entries strictly later than `bound`
    pub fn later_than(&self, bound: NaiveTime) -> Vec<NaiveTime> {
        self.entries.iter().copied().filter(|t| *t > bound).collect()
    }
}

impl Default for TimeCatalog {
    fn default() -> Self {
        Self::build(DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR)
    }
}
