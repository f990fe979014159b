mod assignment;
mod ledger;
mod types;
mod util;
mod window;

pub use types::{
    Assignee, BlockingRule, DayAssignment, RequiredSpecialty, SchedError, ScheduleOptions,
    ScheduleResult,
};

use crate::model::{HolidayCalendar, Roster, ShiftSlot, StaffMember};
use chrono::{Datelike, NaiveDate};
use ledger::CounterLedger;
use tracing::{debug, info, warn};
use window::LookbackWindow;

/// Planificateur de gardes : glouton, jour par jour, sans retour arrière.
///
/// Un appel emprunte les fiches en `&mut` : deux générations concurrentes sur
/// le même personnel sont impossibles sans sérialisation par l'appelant.
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    opts: ScheduleOptions,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            opts: ScheduleOptions::default(),
        }
    }

    pub fn with_options(opts: ScheduleOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.opts
    }

    /// Génère à partir d'aujourd'hui (date locale).
    pub fn generate(
        &self,
        staff: &mut [StaffMember],
        holidays: &HolidayCalendar,
        days: i64,
        hospital: Option<&str>,
    ) -> Result<ScheduleResult, SchedError> {
        self.generate_from(util::today(), staff, holidays, days, hospital)
    }

    /// Génère `days` jours à partir de `start`.
    ///
    /// Les compteurs de nuits et de fériés des fiches retenues sont incrémentés ;
    /// deux appels successifs sans remise à zéro ne donnent donc pas forcément
    /// le même planning.
    pub fn generate_from(
        &self,
        start: NaiveDate,
        staff: &mut [StaffMember],
        holidays: &HolidayCalendar,
        days: i64,
        hospital: Option<&str>,
    ) -> Result<ScheduleResult, SchedError> {
        let count = self.opts.clamp_days(days);
        let capped = days > i64::from(self.opts.max_days);
        if capped {
            warn!(
                requested = days,
                max = self.opts.max_days,
                "day count capped"
            );
        }

        let mut ledger = CounterLedger::from_staff(staff, hospital);
        if ledger.is_empty() && count > 0 {
            warn!(?hospital, "no staff selected, every slot stays unassigned");
        }
        let mut window = LookbackWindow::new(self.opts.lookback_days);
        let mut out = Vec::with_capacity(count);

        for day_index in 0..count {
            let date = util::day_at(start, day_index)?;
            let holiday = holidays.get(&date);
            let plan = assignment::resolve_day(&ledger, &window, &self.opts, date, holiday);

            let mut day = DayAssignment::new(
                plan.date,
                plan.date.weekday(),
                RequiredSpecialty::for_day(day_index),
            );
            day.holiday = plan.holiday.clone();
            for slot in ShiftSlot::ALL {
                *day.slot_mut(slot) = plan.slots[slot.index()].map(|pos| ledger.assignee(pos));
            }

            ledger.commit(&plan);
            window.push(ledger.codes_for(&plan));
            debug!(%date, version = ledger.version(), "day committed");
            out.push(day);
        }

        ledger.write_back(staff);
        info!(days = out.len(), staff = ledger.len(), "schedule generated");

        Ok(ScheduleResult {
            days: out,
            requested_days: days,
            capped,
        })
    }

    /// Raccourci sur un roster complet (personnel + fériés).
    pub fn generate_for_roster(
        &self,
        roster: &mut Roster,
        start: NaiveDate,
        days: i64,
        hospital: Option<&str>,
    ) -> Result<ScheduleResult, SchedError> {
        let Roster { staff, holidays } = roster;
        self.generate_from(start, staff, holidays, days, hospital)
    }
}
