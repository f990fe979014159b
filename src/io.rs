use crate::model::{format_date, HolidayCalendar, ShiftSlot, Specialty, StaffMember};
use crate::scheduler::ScheduleResult;
use crate::validation::{self, parse_count, ValidationError, ValidationErrors};
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use std::fs;
use std::path::Path;

pub const STAFF_HEADER: [&str; 7] = [
    "code",
    "name",
    "seniority",
    "specialty",
    "hospital",
    "night_shift_count",
    "holiday_shift_count",
];

pub const SCHEDULE_HEADER: [&str; 7] = [
    "date",
    "weekday",
    "holiday",
    "required_specialty",
    "morning",
    "afternoon",
    "night",
];

/// Import du personnel depuis CSV : header
/// `code,name,seniority,specialty,hospital[,night_shift_count][,holiday_shift_count]`.
///
/// Toutes les lignes fautives sont rapportées ensemble ; les codes doivent être uniques.
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = Vec::new();
    let mut errors = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading {}", path.display()))?;
        match parse_staff_record(&rec, idx + 1) {
            Ok(member) => out.push(member),
            Err(mut errs) => errors.append(&mut errs),
        }
    }
    if !errors.is_empty() {
        return Err(ValidationErrors(errors).into());
    }
    validation::validate_staff(&out)?;
    Ok(out)
}

fn parse_staff_record(rec: &StringRecord, record: usize) -> Result<StaffMember, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut text = |pos: usize, field: &'static str| -> Option<String> {
        match rec.get(pos).map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            Some(_) => {
                errors.push(ValidationError::EmptyField { record, field });
                None
            }
            None => {
                errors.push(ValidationError::MissingField { record, field });
                None
            }
        }
    };
    let code = text(0, "code");
    let name = text(1, "name");
    let seniority = text(2, "seniority");
    let specialty = text(3, "specialty");
    let hospital = text(4, "hospital");

    let seniority = seniority.and_then(|raw| {
        parse_count(&raw, record, "seniority")
            .map_err(|e| errors.push(e))
            .ok()
    });
    let specialty = specialty.and_then(|raw| {
        raw.parse::<Specialty>()
            .map_err(|_| errors.push(ValidationError::UnknownSpecialty { record, raw }))
            .ok()
    });
    let mut optional_count = |pos: usize, field: &'static str| -> u32 {
        match rec.get(pos).map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_count(raw, record, field)
                .map_err(|e| errors.push(e))
                .unwrap_or(0),
            _ => 0,
        }
    };
    let night = optional_count(5, "night_shift_count");
    let holiday = optional_count(6, "holiday_shift_count");

    match (code, name, seniority, specialty, hospital) {
        (Some(code), Some(name), Some(seniority), Some(specialty), Some(hospital))
            if errors.is_empty() =>
        {
            Ok(StaffMember::new(code, name, seniority, specialty, hospital)
                .with_counters(night, holiday))
        }
        _ => Err(errors),
    }
}

/// Import des fériés : header `date,name` (`DD/MM/YYYY`).
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<HolidayCalendar> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.with_context(|| format!("reading {}", path.display()))?;
        let date = rec.get(0).unwrap_or_default().to_string();
        let name = rec.get(1).unwrap_or_default().to_string();
        rows.push((date, name));
    }
    Ok(validation::parse_holiday_rows(rows)?)
}

/// Export CSV du planning : une ligne par jour, `CODE - Nom` ou vide.
pub fn write_schedule_csv<W: std::io::Write>(w: W, result: &ScheduleResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(w);
    w.write_record(SCHEDULE_HEADER)?;
    for day in result {
        let date = format_date(day.date);
        let [morning, afternoon, night] = ShiftSlot::ALL.map(|slot| {
            day.slot(slot)
                .map(ToString::to_string)
                .unwrap_or_default()
        });
        w.write_record([
            date.as_str(),
            day.weekday_name(),
            day.holiday.as_deref().unwrap_or(""),
            day.required_specialty.label(),
            morning.as_str(),
            afternoon.as_str(),
            night.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv<P: AsRef<Path>>(path: P, result: &ScheduleResult) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_schedule_csv(file, result)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, result: &ScheduleResult) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(result)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du personnel avec ses compteurs, même header que l'import.
pub fn export_staff_csv<P: AsRef<Path>>(path: P, staff: &[StaffMember]) -> anyhow::Result<()> {
    let mut w: Writer<fs::File> = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(STAFF_HEADER)?;
    let mut seniority = itoa::Buffer::new();
    let mut night = itoa::Buffer::new();
    let mut holiday = itoa::Buffer::new();
    for m in staff {
        w.write_record([
            m.code.as_str(),
            m.name.as_str(),
            seniority.format(m.seniority),
            m.specialty.label(),
            m.hospital.as_str(),
            night.format(m.night_shift_count),
            holiday.format(m.holiday_shift_count),
        ])?;
    }
    w.flush()?;
    Ok(())
}
