use super::catalog::TimeCatalog;
use super::eligibility::is_selectable;
use super::models::{PickerToken, TimeField, TimeSlot};
use crate::components::calendar::{CalendarWindow, DayNumber, DayOption};
use chrono::{NaiveDate, NaiveTime};
use rust_i18n::t;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Rejections raised while editing the selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{date} cannot be selected")]
    NotSelectable { date: String },
}

impl SelectionError {
    /// Status text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            SelectionError::NotSelectable { .. } => t!("next_week_cutoff").to_string(),
        }
    }
}

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
}

/// Selected dates and their time windows for one screen visit
#[derive(Debug, Clone)]
pub struct SelectionState {
    window: CalendarWindow,
    catalog: TimeCatalog,
    selections: BTreeMap<NaiveDate, TimeSlot>,
    active_picker: Option<PickerToken>,
}

impl SelectionState {
    pub fn new(window: CalendarWindow, catalog: TimeCatalog) -> Self {
        Self {
            window,
            catalog,
            selections: BTreeMap::new(),
            active_picker: None,
        }
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    pub fn catalog(&self) -> &TimeCatalog {
        &self.catalog
    }

    pub fn is_selectable(&self, day: DayNumber) -> bool {
        is_selectable(day, self.window.today, &self.window.week)
    }

    /// Select an eligible date with the default slot, or deselect it
    pub fn toggle_date(&mut self, day: &DayOption) -> Result<Toggle, SelectionError> {
        if !self.is_selectable(day.day_number) {
            return Err(SelectionError::NotSelectable {
                date: day.iso_date.clone(),
            });
        }

        let date = day.date();
        if self.selections.remove(&date).is_some() {
            debug!("Deselected {}", day.iso_date);
            Ok(Toggle::Deselected)
        } else {
            self.selections.insert(date, TimeSlot::default());
            debug!("Selected {}", day.iso_date);
            Ok(Toggle::Selected)
        }
    }

    /// Replace one end of a selected date's slot, moving the other end when
    /// needed to keep start before end. Unselected dates are left alone.
    /// Always closes the active picker.
    pub fn set_time(
        &mut self,
        date: NaiveDate,
        field: TimeField,
        value: NaiveTime,
    ) -> Option<TimeSlot> {
        self.active_picker = None;

        let slot = self.selections.get(&date).copied()?;
        let updated = match field {
            TimeField::Start => {
                let end = if slot.end <= value {
                    self.catalog.next_after(value).unwrap_or(slot.end)
                } else {
                    slot.end
                };
                TimeSlot::new(value, end)
            }
            TimeField::End => {
                let start = if slot.start >= value {
                    self.catalog.previous_before(value).unwrap_or(slot.start)
                } else {
                    slot.start
                };
                TimeSlot::new(start, value)
            }
        };

        self.selections.insert(date, updated);
        debug!("Set {} {} -> {}", date, field, updated);
        Some(updated)
    }

    /// Catalog entries the picker may offer for one end of a slot
    pub fn available_time_options(&self, date: NaiveDate, field: TimeField) -> Vec<NaiveTime> {
        match self.selections.get(&date) {
            Some(slot) => match field {
                TimeField::Start => self.catalog.earlier_than(slot.end),
                TimeField::End => self.catalog.later_than(slot.start),
            },
            None => Vec::new(),
        }
    }

    /// Open a picker, replacing any picker that is already open
    pub fn open_picker(&mut self, date: NaiveDate, field: TimeField) {
        self.active_picker = Some(PickerToken { date, field });
    }

    pub fn close_picker(&mut self) {
        self.active_picker = None;
    }

    pub fn active_picker(&self) -> Option<PickerToken> {
        self.active_picker
    }

    /// Options of the open picker, empty when none is open
    pub fn picker_options(&self) -> Vec<NaiveTime> {
        self.active_picker
            .map(|token| self.available_time_options(token.date, token.field))
            .unwrap_or_default()
    }

    /// Apply a value chosen in the open picker. Values the picker does not
    /// offer are ignored and the picker stays open.
    pub fn choose_time(&mut self, value: NaiveTime) -> Option<TimeSlot> {
        let token = self.active_picker?;
        if !self.picker_options().contains(&value) {
            debug!("{} is not offered for {} {}", value, token.date, token.field);
            return None;
        }
        self.set_time(token.date, token.field, value)
    }

    pub fn selections(&self) -> &BTreeMap<NaiveDate, TimeSlot> {
        &self.selections
    }

    pub fn slot(&self, date: NaiveDate) -> Option<TimeSlot> {
        self.selections.get(&date).copied()
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selections.contains_key(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Drop all selections and close the picker
    pub fn clear(&mut self) {
        self.selections.clear();
        self.active_picker = None;
    }
}
