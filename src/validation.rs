//! Validation des éditions du roster, avant qu'elles n'atteignent le planificateur.
//!
//! Toutes les erreurs sont collectées (pas seulement la première) pour qu'un
//! éditeur puisse les afficher d'un coup.

use crate::model::{parse_date, HolidayCalendar, Roster, StaffMember};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("duplicate staff code {code} (records {first} and {second})")]
    DuplicateCode {
        code: String,
        first: usize,
        second: usize,
    },
    #[error("record {record}: missing field `{field}`")]
    MissingField { record: usize, field: &'static str },
    #[error("record {record}: field `{field}` must not be empty")]
    EmptyField { record: usize, field: &'static str },
    #[error("record {record}: `{field}` must be a non-negative integer, got `{raw}`")]
    InvalidNumber {
        record: usize,
        field: &'static str,
        raw: String,
    },
    #[error("record {record}: unknown specialty `{raw}`")]
    UnknownSpecialty { record: usize, raw: String },
    #[error("record {record}: invalid date `{raw}`, expected DD/MM/YYYY")]
    InvalidDate { record: usize, raw: String },
    #[error("holiday {date}: name must not be empty")]
    EmptyHolidayName { date: String },
}

/// Ensemble d'erreurs de validation, toujours non vide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn finish(errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Codes uniques, champs texte non vides. Les compteurs sont typés `u32`,
/// donc déjà non négatifs une fois chargés.
pub fn validate_staff(staff: &[StaffMember]) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (idx, member) in staff.iter().enumerate() {
        let record = idx + 1;
        let code = member.code.as_str().trim();
        if code.is_empty() {
            errors.push(ValidationError::EmptyField { record, field: "code" });
        } else if let Some(first) = seen.insert(code, record) {
            errors.push(ValidationError::DuplicateCode {
                code: code.to_string(),
                first,
                second: record,
            });
        }
        if member.name.trim().is_empty() {
            errors.push(ValidationError::EmptyField { record, field: "name" });
        }
        if member.hospital.trim().is_empty() {
            errors.push(ValidationError::EmptyField { record, field: "hospital" });
        }
    }

    finish(errors)
}

pub fn validate_holidays(holidays: &HolidayCalendar) -> Result<(), ValidationErrors> {
    let errors = holidays
        .iter()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(date, _)| ValidationError::EmptyHolidayName {
            date: crate::model::format_date(*date),
        })
        .collect();
    finish(errors)
}

pub fn validate_roster(roster: &Roster) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if let Err(ValidationErrors(e)) = validate_staff(&roster.staff) {
        errors.extend(e);
    }
    if let Err(ValidationErrors(e)) = validate_holidays(&roster.holidays) {
        errors.extend(e);
    }
    finish(errors)
}

/// Construit un calendrier depuis des lignes brutes `(date, nom)` telles qu'un
/// éditeur les fournit. Les noms sont normalisés (`trim`).
pub fn parse_holiday_rows<I, D, N>(rows: I) -> Result<HolidayCalendar, ValidationErrors>
where
    I: IntoIterator<Item = (D, N)>,
    D: AsRef<str>,
    N: AsRef<str>,
{
    let mut errors = Vec::new();
    let mut calendar = HolidayCalendar::new();

    for (idx, (raw_date, raw_name)) in rows.into_iter().enumerate() {
        let record = idx + 1;
        let raw_date = raw_date.as_ref();
        let Ok(date) = parse_date(raw_date) else {
            errors.push(ValidationError::InvalidDate {
                record,
                raw: raw_date.to_string(),
            });
            continue;
        };
        let name = raw_name.as_ref().trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyHolidayName {
                date: raw_date.trim().to_string(),
            });
            continue;
        }
        calendar.insert(date, name);
    }

    finish(errors).map(|()| calendar)
}

/// Entier non négatif (ancienneté, compteurs) lu depuis du texte.
pub fn parse_count(raw: &str, record: usize, field: &'static str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumber {
            record,
            field,
            raw: raw.to_string(),
        })
}
