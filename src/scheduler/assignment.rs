use super::ledger::{CounterLedger, LedgerEntry};
use super::types::{BlockingRule, ScheduleOptions};
use super::window::LookbackWindow;
use crate::model::ShiftSlot;
use chrono::NaiveDate;
use tracing::{debug, trace};

/// Décision d'une journée, avant validation dans le registre.
#[derive(Debug, Clone)]
pub(super) struct DayPlan {
    pub date: NaiveDate,
    pub holiday: Option<String>,
    /// Position dans le registre, indexée par `ShiftSlot::index`.
    pub slots: [Option<usize>; 3],
}

/// Résout les trois créneaux d'une journée, de façon gloutonne et sans retour
/// arrière. Fonction pure de l'instantané du registre et de la fenêtre.
pub(super) fn resolve_day(
    ledger: &CounterLedger,
    window: &LookbackWindow,
    opts: &ScheduleOptions,
    date: NaiveDate,
    holiday: Option<&str>,
) -> DayPlan {
    let order = ledger.priority_order();
    let mut taken = vec![false; ledger.len()];
    let mut slots = [None; 3];

    for slot in ShiftSlot::RESOLUTION_ORDER {
        let chosen = order.iter().copied().filter(|&pos| !taken[pos]).find(|&pos| {
            let entry = ledger.entry(pos);
            match blocking_rule(entry, slot, window, opts) {
                Some(rule) => {
                    trace!(%date, %slot, code = %entry.code, ?rule, "candidate skipped");
                    false
                }
                None => true,
            }
        });

        match chosen {
            Some(pos) => {
                taken[pos] = true;
                slots[slot.index()] = Some(pos);
            }
            None => debug!(%date, %slot, "no eligible staff, slot left unassigned"),
        }
    }

    DayPlan {
        date,
        holiday: holiday.map(str::to_owned),
        slots,
    }
}

pub(super) fn blocking_rule(
    entry: &LedgerEntry,
    slot: ShiftSlot,
    window: &LookbackWindow,
    opts: &ScheduleOptions,
) -> Option<BlockingRule> {
    if slot == ShiftSlot::Night && entry.night_shift_count >= opts.night_cap {
        return Some(BlockingRule::NightCap);
    }
    if window.held(&entry.code, slot) {
        return Some(BlockingRule::RepeatSlot);
    }
    if slot == ShiftSlot::Morning && window.held(&entry.code, ShiftSlot::Night) {
        return Some(BlockingRule::RestAfterNight);
    }
    None
}
