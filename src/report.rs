use crate::model::{ShiftSlot, Specialty, StaffCode, StaffMember};
use crate::scheduler::{DayAssignment, ScheduleResult};
use std::collections::{BTreeMap, HashSet};

/// Résumé d'un planning généré.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleSummary {
    pub days: usize,
    pub filled_slots: usize,
    pub unassigned_slots: usize,
    pub night_shifts: usize,
    pub holiday_days: usize,
    /// Personnes distinctes (par code) ayant au moins un créneau.
    pub staff_involved: usize,
}

impl ScheduleSummary {
    pub fn from_result(result: &ScheduleResult) -> Self {
        let mut involved: HashSet<&StaffCode> = HashSet::new();
        let mut summary = Self {
            days: result.len(),
            ..Self::default()
        };
        for day in result {
            if day.is_holiday() {
                summary.holiday_days += 1;
            }
            for slot in ShiftSlot::ALL {
                match day.slot(slot) {
                    Some(a) => {
                        summary.filled_slots += 1;
                        involved.insert(&a.code);
                        if slot == ShiftSlot::Night {
                            summary.night_shifts += 1;
                        }
                    }
                    None => summary.unassigned_slots += 1,
                }
            }
        }
        summary.staff_involved = involved.len();
        summary
    }
}

/// Charge de nuits d'une personne face au plafond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightLoad {
    pub code: StaffCode,
    pub name: String,
    pub night_shift_count: u32,
    pub limit: u32,
}

impl NightLoad {
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.night_shift_count)
    }
    pub fn at_cap(&self) -> bool {
        self.night_shift_count >= self.limit
    }
}

pub fn night_load(staff: &[StaffMember], limit: u32) -> Vec<NightLoad> {
    staff
        .iter()
        .map(|m| NightLoad {
            code: m.code.clone(),
            name: m.name.clone(),
            night_shift_count: m.night_shift_count,
            limit,
        })
        .collect()
}

pub fn specialty_headcount(staff: &[StaffMember]) -> BTreeMap<Specialty, usize> {
    let mut out = BTreeMap::new();
    for m in staff {
        *out.entry(m.specialty).or_insert(0) += 1;
    }
    out
}

/// Moyenne des nuits cumulées ; `None` sans personnel.
pub fn average_night_shifts(staff: &[StaffMember]) -> Option<f64> {
    if staff.is_empty() {
        return None;
    }
    let total: u64 = staff.iter().map(|m| u64::from(m.night_shift_count)).sum();
    Some(total as f64 / staff.len() as f64)
}

impl ScheduleResult {
    /// Jours dont au moins un créneau est tenu par quelqu'un de `specialty`.
    pub fn filter_by_specialty<'a>(
        &'a self,
        staff: &[StaffMember],
        specialty: Specialty,
    ) -> Vec<&'a DayAssignment> {
        let codes: HashSet<&StaffCode> = staff
            .iter()
            .filter(|m| m.specialty == specialty)
            .map(|m| &m.code)
            .collect();
        self.days
            .iter()
            .filter(|day| {
                ShiftSlot::ALL
                    .into_iter()
                    .any(|s| day.slot(s).is_some_and(|a| codes.contains(&a.code)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HolidayCalendar;
    use crate::scheduler::Scheduler;
    use chrono::NaiveDate;

    fn staff() -> Vec<StaffMember> {
        vec![
            StaffMember::new("A", "Ana", 5, Specialty::Surgery, "H1"),
            StaffMember::new("B", "Beto", 3, Specialty::Nursing, "H1").with_counters(6, 0),
        ]
    }

    #[test]
    fn summary_counts_slots_and_people() {
        let mut staff = staff();
        let start = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let holidays: HolidayCalendar = [(start, "Navidad".to_string())].into_iter().collect();
        let result = Scheduler::new()
            .generate_from(start, &mut staff, &holidays, 2, None)
            .unwrap();

        // jour 0 : A nuit, B après-midi ; jour 1 : A bloquée la nuit et le matin, B plafonnée
        // la nuit et déjà d'après-midi la veille -> A après-midi, B matin
        let s = ScheduleSummary::from_result(&result);
        assert_eq!(s.days, 2);
        assert_eq!(s.night_shifts, 1);
        assert_eq!(s.filled_slots, 4);
        assert_eq!(s.unassigned_slots, 2);
        assert_eq!(s.holiday_days, 1);
        assert_eq!(s.staff_involved, 2);

        let surgery = result.filter_by_specialty(&staff, Specialty::Surgery);
        assert_eq!(surgery.len(), 2);
        let icu = result.filter_by_specialty(&staff, Specialty::IntensiveCare);
        assert!(icu.is_empty());
    }

    #[test]
    fn load_and_headcount() {
        let staff = staff();
        let load = night_load(&staff, 6);
        assert_eq!(load[0].remaining(), 6);
        assert!(load[1].at_cap());
        assert_eq!(specialty_headcount(&staff)[&Specialty::Nursing], 1);
        assert_eq!(average_night_shifts(&staff), Some(3.0));
        assert_eq!(average_night_shifts(&[]), None);
    }
}
