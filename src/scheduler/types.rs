use crate::model::{ShiftSlot, StaffCode};
use chrono::{NaiveDate, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Plafond du nombre de jours générés en un appel.
    pub max_days: u32,
    /// Au-delà de ce nombre de nuits cumulées, plus aucune nuit n'est attribuée.
    pub night_cap: u32,
    /// Nombre de jours d'historique consultés par les règles de consécutivité.
    pub lookback_days: usize,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            max_days: 30,
            night_cap: 6,
            lookback_days: 1,
        }
    }
}

impl ScheduleOptions {
    /// `days < 1` donne 0 ; au-delà de `max_days`, plafonné.
    pub fn clamp_days(&self, days: i64) -> usize {
        if days < 1 {
            return 0;
        }
        days.min(i64::from(self.max_days)) as usize
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error("date overflow: {start} + {offset} day(s)")]
    DateOverflow { start: NaiveDate, offset: usize },
}

/// Règle ayant écarté un candidat pour un créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingRule {
    NightCap,
    RepeatSlot,
    RestAfterNight,
}

/// Personne retenue sur un créneau (code + nom).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignee {
    pub code: StaffCode,
    pub name: String,
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// Étiquette indicative de spécialité requise ; jamais appliquée comme contrainte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RequiredSpecialty {
    #[cfg_attr(feature = "serde", serde(rename = "Cirugía"))]
    Surgery,
    General,
}

impl RequiredSpecialty {
    pub fn for_day(day_index: usize) -> Self {
        if day_index % 3 == 0 {
            RequiredSpecialty::Surgery
        } else {
            RequiredSpecialty::General
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequiredSpecialty::Surgery => "Cirugía",
            RequiredSpecialty::General => "General",
        }
    }
}

/// Affectations d'une journée.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayAssignment {
    #[cfg_attr(feature = "serde", serde(with = "crate::model::date_format"))]
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub holiday: Option<String>,
    pub required_specialty: RequiredSpecialty,
    pub morning: Option<Assignee>,
    pub afternoon: Option<Assignee>,
    pub night: Option<Assignee>,
}

impl DayAssignment {
    pub fn new(date: NaiveDate, weekday: Weekday, required_specialty: RequiredSpecialty) -> Self {
        Self {
            date,
            weekday,
            holiday: None,
            required_specialty,
            morning: None,
            afternoon: None,
            night: None,
        }
    }

    pub fn slot(&self, slot: ShiftSlot) -> Option<&Assignee> {
        match slot {
            ShiftSlot::Morning => self.morning.as_ref(),
            ShiftSlot::Afternoon => self.afternoon.as_ref(),
            ShiftSlot::Night => self.night.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: ShiftSlot) -> &mut Option<Assignee> {
        match slot {
            ShiftSlot::Morning => &mut self.morning,
            ShiftSlot::Afternoon => &mut self.afternoon,
            ShiftSlot::Night => &mut self.night,
        }
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

/// Résultat d'une génération, dans l'ordre chronologique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleResult {
    pub days: Vec<DayAssignment>,
    pub requested_days: i64,
    /// Vrai si la demande dépassait `max_days`.
    pub capped: bool,
}

impl ScheduleResult {
    pub fn len(&self) -> usize {
        self.days.len()
    }
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, DayAssignment> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a ScheduleResult {
    type Item = &'a DayAssignment;
    type IntoIter = std::slice::Iter<'a, DayAssignment>;
    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
