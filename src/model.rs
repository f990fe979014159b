use crate::validation::{self, ValidationErrors};
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Format des dates dans les fichiers (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Identifiant fort d'un membre du personnel (code unique, ex. `ROS-101`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct StaffCode(String);

impl StaffCode {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown specialty: {0}")]
pub struct UnknownSpecialty(pub String);

/// Services hospitaliers. Les libellés sérialisés sont ceux des fichiers existants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Specialty {
    #[cfg_attr(feature = "serde", serde(rename = "Emergencias"))]
    Emergencies,
    #[cfg_attr(feature = "serde", serde(rename = "Pediatría"))]
    Pediatrics,
    #[cfg_attr(feature = "serde", serde(rename = "Cirugía"))]
    Surgery,
    #[cfg_attr(feature = "serde", serde(rename = "Medicina Interna"))]
    InternalMedicine,
    #[cfg_attr(feature = "serde", serde(rename = "Enfermería"))]
    Nursing,
    #[cfg_attr(feature = "serde", serde(rename = "UCI"))]
    IntensiveCare,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::Emergencies,
        Specialty::Pediatrics,
        Specialty::Surgery,
        Specialty::InternalMedicine,
        Specialty::Nursing,
        Specialty::IntensiveCare,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Specialty::Emergencies => "Emergencias",
            Specialty::Pediatrics => "Pediatría",
            Specialty::Surgery => "Cirugía",
            Specialty::InternalMedicine => "Medicina Interna",
            Specialty::Nursing => "Enfermería",
            Specialty::IntensiveCare => "UCI",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = UnknownSpecialty;

    /// Accepte le libellé (insensible à la casse) ou le nom de variante.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Specialty::ALL
            .into_iter()
            .find(|sp| {
                sp.label().to_lowercase() == raw.to_lowercase()
                    || format!("{sp:?}").eq_ignore_ascii_case(raw)
            })
            .ok_or_else(|| UnknownSpecialty(raw.to_string()))
    }
}

/// Membre du personnel soignant.
///
/// Les deux compteurs sont modifiés en place par le planificateur à chaque
/// affectation retenue. Les anciens noms de champs (espagnols) sont acceptés
/// en lecture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StaffMember {
    #[cfg_attr(feature = "serde", serde(alias = "Código"))]
    pub code: StaffCode,
    #[cfg_attr(feature = "serde", serde(alias = "Nombre"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(alias = "Antigüedad"))]
    pub seniority: u32,
    #[cfg_attr(feature = "serde", serde(alias = "Especialidad"))]
    pub specialty: Specialty,
    #[cfg_attr(feature = "serde", serde(alias = "Turnos_nocturnos_mes"))]
    pub night_shift_count: u32,
    #[cfg_attr(feature = "serde", serde(alias = "Festivos_mes"))]
    pub holiday_shift_count: u32,
    #[cfg_attr(feature = "serde", serde(alias = "Hospital"))]
    pub hospital: String,
}

impl StaffMember {
    pub fn new<C, N, H>(code: C, name: N, seniority: u32, specialty: Specialty, hospital: H) -> Self
    where
        C: AsRef<str>,
        N: Into<String>,
        H: Into<String>,
    {
        Self {
            code: StaffCode::new(code),
            name: name.into(),
            seniority,
            specialty,
            night_shift_count: 0,
            holiday_shift_count: 0,
            hospital: hospital.into(),
        }
    }

    pub fn with_counters(mut self, night_shift_count: u32, holiday_shift_count: u32) -> Self {
        self.night_shift_count = night_shift_count;
        self.holiday_shift_count = holiday_shift_count;
        self
    }

    pub fn reset_counters(&mut self) {
        self.night_shift_count = 0;
        self.holiday_shift_count = 0;
    }
}

/// Créneau de garde. Les horaires sont descriptifs, jamais contrôlés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShiftSlot {
    Morning,
    Afternoon,
    Night,
}

impl ShiftSlot {
    /// Ordre d'affichage.
    pub const ALL: [ShiftSlot; 3] = [ShiftSlot::Morning, ShiftSlot::Afternoon, ShiftSlot::Night];

    /// Ordre de résolution : la nuit d'abord, c'est le créneau le plus contraint.
    pub const RESOLUTION_ORDER: [ShiftSlot; 3] =
        [ShiftSlot::Night, ShiftSlot::Afternoon, ShiftSlot::Morning];

    pub fn index(self) -> usize {
        match self {
            ShiftSlot::Morning => 0,
            ShiftSlot::Afternoon => 1,
            ShiftSlot::Night => 2,
        }
    }

    /// Heures de début et de fin (la nuit déborde sur le lendemain).
    pub fn hours(self) -> (u32, u32) {
        match self {
            ShiftSlot::Morning => (7, 15),
            ShiftSlot::Afternoon => (15, 23),
            ShiftSlot::Night => (23, 7),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShiftSlot::Morning => "Morning",
            ShiftSlot::Afternoon => "Afternoon",
            ShiftSlot::Night => "Night",
        }
    }

    pub fn label(self) -> String {
        let (start, end) = self.hours();
        format!("{} ({start:02}:00-{end:02}:00)", self.name())
    }
}

impl fmt::Display for ShiftSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendrier des jours fériés : date -> nom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    days: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, date: NaiveDate, name: S) -> Option<String> {
        self.days.insert(date, name.into())
    }

    /// Nom du férié ; `None` signifie simplement « jour ouvré ».
    pub fn get(&self, date: &NaiveDate) -> Option<&str> {
        self.days.get(date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &str)> {
        self.days.iter().map(|(d, n)| (d, n.as_str()))
    }

    pub fn extend<I: IntoIterator<Item = (NaiveDate, String)>>(&mut self, iter: I) {
        self.days.extend(iter);
    }
}

impl FromIterator<(NaiveDate, String)> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

#[cfg(feature = "serde")]
impl Serialize for HolidayCalendar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, name) in &self.days {
            map.serialize_entry(&format_date(*date), name)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for HolidayCalendar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, String> = BTreeMap::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, name)| {
                parse_date(&key)
                    .map(|date| (date, name))
                    .map_err(|_| {
                        <D::Error as serde::de::Error>::custom(format!(
                            "invalid holiday date `{key}`, expected DD/MM/YYYY"
                        ))
                    })
            })
            .collect()
    }
}

/// (Dé)sérialisation d'une `NaiveDate` au format `DD/MM/YYYY`.
#[cfg(feature = "serde")]
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Roster complet : personnel + fériés.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    pub staff: Vec<StaffMember>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub holidays: HolidayCalendar,
}

impl Roster {
    pub fn find_by_code<'a>(&'a self, code: &str) -> Option<&'a StaffMember> {
        self.staff.iter().find(|m| m.code.as_str() == code)
    }

    /// Personnel d'un hôpital, ou tout le monde sans filtre.
    pub fn staff_in_hospital<'a>(
        &'a self,
        hospital: Option<&'a str>,
    ) -> impl Iterator<Item = &'a StaffMember> + 'a {
        self.staff
            .iter()
            .filter(move |m| hospital.map_or(true, |h| m.hospital == h))
    }

    /// Hôpitaux distincts, triés.
    pub fn hospitals(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.staff.iter().map(|m| m.hospital.as_str()).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn reset_counters(&mut self) {
        self.staff.iter_mut().for_each(StaffMember::reset_counters);
    }

    /// Remet à zéro les compteurs d'un seul hôpital ; renvoie le nombre de fiches touchées.
    pub fn reset_counters_in(&mut self, hospital: &str) -> usize {
        let mut touched = 0;
        for member in self.staff.iter_mut().filter(|m| m.hospital == hospital) {
            member.reset_counters();
            touched += 1;
        }
        touched
    }

    /// Remplace le personnel après validation complète ; le roster est inchangé en cas d'erreur.
    pub fn replace_staff(&mut self, staff: Vec<StaffMember>) -> Result<(), ValidationErrors> {
        validation::validate_staff(&staff)?;
        self.staff = staff;
        Ok(())
    }

    pub fn replace_holidays(&mut self, holidays: HolidayCalendar) -> Result<(), ValidationErrors> {
        validation::validate_holidays(&holidays)?;
        self.holidays = holidays;
        Ok(())
    }
}
