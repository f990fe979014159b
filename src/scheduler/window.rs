use crate::model::{ShiftSlot, StaffCode};
use std::collections::VecDeque;

/// Fenêtre glissante sur l'historique des affectations (par code, jamais par nom).
#[derive(Debug, Clone)]
pub(super) struct LookbackWindow {
    capacity: usize,
    days: VecDeque<[Option<StaffCode>; 3]>,
}

impl LookbackWindow {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            days: VecDeque::with_capacity(capacity),
        }
    }

    /// Ajoute la journée la plus récente ; la plus ancienne sort si la fenêtre est pleine.
    pub(super) fn push(&mut self, day: [Option<StaffCode>; 3]) {
        if self.capacity == 0 {
            return;
        }
        if self.days.len() == self.capacity {
            self.days.pop_front();
        }
        self.days.push_back(day);
    }

    /// `code` a-t-il tenu `slot` sur l'un des jours de la fenêtre ?
    pub(super) fn held(&self, code: &StaffCode, slot: ShiftSlot) -> bool {
        self.days
            .iter()
            .any(|day| day[slot.index()].as_ref() == Some(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: Option<&str>, a: Option<&str>, n: Option<&str>) -> [Option<StaffCode>; 3] {
        [m.map(StaffCode::new), a.map(StaffCode::new), n.map(StaffCode::new)]
    }

    #[test]
    fn single_day_window_forgets_older_days() {
        let mut w = LookbackWindow::new(1);
        let ana = StaffCode::new("A");
        w.push(day(None, None, Some("A")));
        assert!(w.held(&ana, ShiftSlot::Night));
        assert!(!w.held(&ana, ShiftSlot::Morning));
        w.push(day(Some("B"), None, None));
        assert!(!w.held(&ana, ShiftSlot::Night));
    }

    #[test]
    fn wider_window_remembers_two_days() {
        let mut w = LookbackWindow::new(2);
        let ana = StaffCode::new("A");
        w.push(day(None, None, Some("A")));
        w.push(day(None, None, Some("B")));
        assert!(w.held(&ana, ShiftSlot::Night));
        w.push(day(None, None, Some("C")));
        assert!(!w.held(&ana, ShiftSlot::Night));
    }

    #[test]
    fn empty_window_never_blocks() {
        let mut w = LookbackWindow::new(0);
        w.push(day(Some("A"), Some("A"), Some("A")));
        assert!(!w.held(&StaffCode::new("A"), ShiftSlot::Morning));
    }
}
