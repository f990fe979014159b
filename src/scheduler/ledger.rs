use super::assignment::DayPlan;
use super::types::Assignee;
use crate::model::{ShiftSlot, StaffCode, StaffMember};

/// Copie de travail d'une fiche : ce que le planificateur lit et incrémente.
#[derive(Debug, Clone)]
pub(super) struct LedgerEntry {
    /// Position de la fiche dans la tranche fournie par l'appelant.
    pub source: usize,
    pub code: StaffCode,
    pub name: String,
    pub seniority: u32,
    pub night_shift_count: u32,
    pub holiday_shift_count: u32,
}

/// Contexte de planification versionné.
///
/// Chaque journée est résolue à partir d'un instantané du registre, puis
/// validée par `commit`. Les fiches de l'appelant ne sont réécrites qu'en fin
/// de génération (`write_back`).
#[derive(Debug, Clone)]
pub(super) struct CounterLedger {
    entries: Vec<LedgerEntry>,
    version: u64,
}

impl CounterLedger {
    pub(super) fn from_staff(staff: &[StaffMember], hospital: Option<&str>) -> Self {
        let entries = staff
            .iter()
            .enumerate()
            .filter(|(_, m)| hospital.map_or(true, |h| m.hospital == h))
            .map(|(source, m)| LedgerEntry {
                source,
                code: m.code.clone(),
                name: m.name.clone(),
                seniority: m.seniority,
                night_shift_count: m.night_shift_count,
                holiday_shift_count: m.holiday_shift_count,
            })
            .collect();
        Self {
            entries,
            version: 0,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(super) fn version(&self) -> u64 {
        self.version
    }

    pub(super) fn entry(&self, pos: usize) -> &LedgerEntry {
        &self.entries[pos]
    }

    pub(super) fn assignee(&self, pos: usize) -> Assignee {
        let e = &self.entries[pos];
        Assignee {
            code: e.code.clone(),
            name: e.name.clone(),
        }
    }

    /// Ordre de priorité : ancienneté décroissante, puis nuits et fériés croissants.
    /// Tri stable : à égalité, l'ordre du roster est conservé.
    pub(super) fn priority_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            let (ea, eb) = (&self.entries[a], &self.entries[b]);
            eb.seniority
                .cmp(&ea.seniority)
                .then(ea.night_shift_count.cmp(&eb.night_shift_count))
                .then(ea.holiday_shift_count.cmp(&eb.holiday_shift_count))
        });
        order
    }

    /// Applique les compteurs d'une journée résolue.
    pub(super) fn commit(&mut self, plan: &DayPlan) {
        for slot in ShiftSlot::ALL {
            let Some(pos) = plan.slots[slot.index()] else {
                continue;
            };
            let entry = &mut self.entries[pos];
            if slot == ShiftSlot::Night {
                entry.night_shift_count += 1;
            }
            if plan.holiday.is_some() {
                entry.holiday_shift_count += 1;
            }
        }
        self.version += 1;
    }

    /// Codes par créneau pour la fenêtre d'historique.
    pub(super) fn codes_for(&self, plan: &DayPlan) -> [Option<StaffCode>; 3] {
        plan.slots.map(|pos| pos.map(|p| self.entries[p].code.clone()))
    }

    /// Réécrit les compteurs dans les fiches d'origine.
    pub(super) fn write_back(&self, staff: &mut [StaffMember]) {
        for entry in &self.entries {
            if let Some(member) = staff.get_mut(entry.source) {
                member.night_shift_count = entry.night_shift_count;
                member.holiday_shift_count = entry.holiday_shift_count;
            }
        }
    }
}
