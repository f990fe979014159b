#![forbid(unsafe_code)]
//! Gardes : répartition des gardes hospitalières (matin, après-midi, nuit), sans BD.
//!
//! - Planificateur glouton jour par jour, priorité à l'ancienneté.
//! - Plafond de nuits, repos après une nuit, pas deux fois le même créneau d'affilée.
//! - Stockage fichiers (JSON/CSV) ; dates au format `DD/MM/YYYY`.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod seed;
#[cfg(feature = "serde")]
pub mod storage;
pub mod validation;

pub use model::{HolidayCalendar, Roster, ShiftSlot, Specialty, StaffCode, StaffMember};
pub use report::{NightLoad, ScheduleSummary};
pub use scheduler::{
    Assignee, DayAssignment, RequiredSpecialty, SchedError, ScheduleOptions, ScheduleResult,
    Scheduler,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
pub use validation::{ValidationError, ValidationErrors};
