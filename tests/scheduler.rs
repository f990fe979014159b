#![forbid(unsafe_code)]
use chrono::NaiveDate;
use gardes::{
    model::{HolidayCalendar, ShiftSlot, Specialty, StaffMember},
    scheduler::{ScheduleOptions, ScheduleResult, Scheduler},
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn member(code: &str, name: &str, seniority: u32) -> StaffMember {
    StaffMember::new(code, name, seniority, Specialty::Nursing, "Hospital Bloom")
}

fn code_at(result: &ScheduleResult, day: usize, slot: ShiftSlot) -> Option<&str> {
    result.days[day].slot(slot).map(|a| a.code.as_str())
}

fn assert_rules_hold(result: &ScheduleResult) {
    for day in result {
        let mut codes: Vec<_> = ShiftSlot::ALL
            .into_iter()
            .filter_map(|s| day.slot(s).map(|a| a.code.clone()))
            .collect();
        let before = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), before, "someone holds two slots on {}", day.date);
    }
    for pair in result.days.windows(2) {
        let [prev, next] = pair else { unreachable!() };
        for slot in ShiftSlot::ALL {
            if let (Some(a), Some(b)) = (prev.slot(slot), next.slot(slot)) {
                assert_ne!(a.code, b.code, "{slot} repeated on {}", next.date);
            }
        }
        if let (Some(night), Some(morning)) = (prev.night.as_ref(), next.morning.as_ref()) {
            assert_ne!(night.code, morning.code, "no rest after night on {}", next.date);
        }
    }
}

#[test]
fn two_staff_one_day() {
    let mut staff = vec![member("A", "Ana", 5), member("B", "Beto", 3)];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 1, None)
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(code_at(&result, 0, ShiftSlot::Night), Some("A"));
    assert_eq!(code_at(&result, 0, ShiftSlot::Afternoon), Some("B"));
    assert_eq!(code_at(&result, 0, ShiftSlot::Morning), None);
    assert_eq!(staff[0].night_shift_count, 1);
    assert_eq!(staff[1].night_shift_count, 0);
    assert_eq!(staff[0].holiday_shift_count, 0);
}

#[test]
fn length_is_clamped() {
    let scheduler = Scheduler::new();
    for (requested, expected) in [(-5, 0), (0, 0), (1, 1), (7, 7), (30, 30), (31, 30), (100, 30)] {
        let mut staff = vec![member("A", "Ana", 5)];
        let result = scheduler
            .generate_from(start(), &mut staff, &HolidayCalendar::new(), requested, None)
            .unwrap();
        assert_eq!(result.len(), expected, "requested {requested}");
        assert_eq!(result.capped, requested > 30);
        assert_eq!(result.requested_days, requested);
    }
}

#[test]
fn generate_starts_today() {
    let mut staff = vec![member("A", "Ana", 5), member("B", "Beto", 3)];
    let today = chrono::Local::now().date_naive();
    let result = Scheduler::new()
        .generate(&mut staff, &HolidayCalendar::new(), 45, None)
        .unwrap();
    // minuit a pu passer entre les deux lectures de l'horloge
    let first = result.days[0].date;
    assert!(first == today || first == today.succ_opt().unwrap());
    assert_eq!(result.len(), 30);
    assert!(result.capped);
    for (i, day) in result.iter().enumerate() {
        assert_eq!(day.date, first + chrono::Days::new(i as u64));
    }
}

#[test]
fn days_are_chronological_with_cycling_tag() {
    let mut staff = vec![member("A", "Ana", 5)];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 4, None)
        .unwrap();
    let dates: Vec<_> = result.iter().map(|d| d.date.format("%d/%m").to_string()).collect();
    assert_eq!(dates, vec!["10/03", "11/03", "12/03", "13/03"]);
    assert_eq!(result.days[0].weekday_name(), "Monday");
    let tags: Vec<_> = result.iter().map(|d| d.required_specialty.label()).collect();
    assert_eq!(tags, vec!["Cirugía", "General", "General", "Cirugía"]);
}

#[test]
fn capped_staff_never_gets_night() {
    let mut staff = vec![
        member("S", "Senior", 10).with_counters(6, 0),
        member("J", "Junior", 1),
    ];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 1, None)
        .unwrap();
    assert_eq!(code_at(&result, 0, ShiftSlot::Night), Some("J"));
    assert_eq!(code_at(&result, 0, ShiftSlot::Afternoon), Some("S"));
    assert_eq!(staff[0].night_shift_count, 6);
}

#[test]
fn night_cap_holds_over_a_long_run() {
    let mut staff = vec![
        member("A", "Ana", 9).with_counters(4, 0),
        member("B", "Beto", 7),
        member("C", "Cris", 5).with_counters(6, 0),
        member("D", "Dani", 3),
        member("E", "Eva", 1),
    ];
    let scheduler = Scheduler::new();
    for _ in 0..3 {
        let result = scheduler
            .generate_from(start(), &mut staff, &HolidayCalendar::new(), 30, None)
            .unwrap();
        assert_rules_hold(&result);
        assert!(result.iter().all(|d| d.night.as_ref().map(|a| a.code.as_str()) != Some("C")));
    }
    assert!(staff.iter().all(|m| m.night_shift_count <= 6));
}

#[test]
fn consecutive_day_rules_hold() {
    let mut staff: Vec<_> = (0..4)
        .map(|i| member(&format!("P{i}"), &format!("Person {i}"), 4 - i))
        .collect();
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 20, None)
        .unwrap();
    assert_rules_hold(&result);
}

#[test]
fn night_worker_rests_next_morning() {
    // A seule : nuit le jour 0, puis ni nuit (répétition) ni matin (repos) le jour 1
    let mut staff = vec![member("A", "Ana", 5)];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 2, None)
        .unwrap();
    assert_eq!(code_at(&result, 0, ShiftSlot::Night), Some("A"));
    assert_eq!(code_at(&result, 1, ShiftSlot::Night), None);
    assert_eq!(code_at(&result, 1, ShiftSlot::Afternoon), Some("A"));
    assert_eq!(code_at(&result, 1, ShiftSlot::Morning), None);
}

#[test]
fn holiday_counts_every_slot() {
    let mut staff = vec![member("A", "Ana", 5), member("B", "Beto", 3), member("C", "Cris", 1)];
    let mut holidays = HolidayCalendar::new();
    holidays.insert(start(), "Fiesta");
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &holidays, 2, None)
        .unwrap();

    assert_eq!(result.days[0].holiday.as_deref(), Some("Fiesta"));
    assert!(!result.days[1].is_holiday());
    assert!(staff.iter().all(|m| m.holiday_shift_count == 1));
}

#[test]
fn unknown_hospital_leaves_everything_unassigned() {
    let mut staff = vec![member("A", "Ana", 5), member("B", "Beto", 3)];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 5, Some("H1"))
        .unwrap();
    assert_eq!(result.len(), 5);
    assert!(result
        .iter()
        .all(|d| ShiftSlot::ALL.into_iter().all(|s| d.slot(s).is_none())));
    assert_eq!(staff[0].night_shift_count, 0);
}

#[test]
fn empty_staff_does_not_fail() {
    let result = Scheduler::new()
        .generate_from(start(), &mut [], &HolidayCalendar::new(), 3, None)
        .unwrap();
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|d| d.night.is_none()));
}

#[test]
fn hospital_filter_only_touches_that_hospital() {
    let mut staff = vec![
        member("A", "Ana", 5),
        StaffMember::new("Z", "Zoe", 9, Specialty::Surgery, "Hospital Zacamil"),
    ];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 1, Some("Hospital Bloom"))
        .unwrap();
    assert_eq!(code_at(&result, 0, ShiftSlot::Night), Some("A"));
    assert_eq!(staff[1].night_shift_count, 0);
}

#[test]
fn identity_is_the_code_not_the_name() {
    let mut staff = vec![member("P1", "Ana", 5), member("P2", "Ana", 4), member("P3", "Luis", 1)];
    let result = Scheduler::new()
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 2, None)
        .unwrap();
    assert_eq!(code_at(&result, 0, ShiftSlot::Night), Some("P1"));
    assert_eq!(code_at(&result, 0, ShiftSlot::Afternoon), Some("P2"));
    // P2 porte le même nom que P1 mais n'a pas fait la nuit
    assert_eq!(code_at(&result, 1, ShiftSlot::Night), Some("P2"));
}

#[test]
fn counters_carry_over_between_runs() {
    let mut staff = vec![member("A", "Ana", 3), member("B", "Beto", 3), member("C", "Cris", 3)];
    let scheduler = Scheduler::new();
    let first = scheduler
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 2, None)
        .unwrap();
    let second = scheduler
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 2, None)
        .unwrap();

    assert_eq!(code_at(&first, 0, ShiftSlot::Night), Some("A"));
    assert_eq!(code_at(&first, 1, ShiftSlot::Night), Some("B"));
    assert_eq!(code_at(&second, 0, ShiftSlot::Night), Some("C"));
    assert_ne!(first, second);
}

#[test]
fn reset_makes_runs_identical() {
    let mut staff = vec![
        member("A", "Ana", 3).with_counters(2, 1),
        member("B", "Beto", 3),
        member("C", "Cris", 2).with_counters(5, 0),
    ];
    let scheduler = Scheduler::new();

    staff.iter_mut().for_each(StaffMember::reset_counters);
    let first = scheduler
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 7, None)
        .unwrap();
    let after_first = staff.clone();

    staff.iter_mut().for_each(StaffMember::reset_counters);
    let second = scheduler
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 7, None)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(after_first, staff);
}

#[test]
fn wider_lookback_blocks_older_repeats() {
    let opts = ScheduleOptions {
        lookback_days: 2,
        ..ScheduleOptions::default()
    };
    let mut staff = vec![member("A", "Ana", 5), member("B", "Beto", 3), member("C", "Cris", 1)];
    let result = Scheduler::with_options(opts)
        .generate_from(start(), &mut staff, &HolidayCalendar::new(), 3, None)
        .unwrap();
    let nights: Vec<_> = (0..3).map(|d| code_at(&result, d, ShiftSlot::Night)).collect();
    assert_eq!(nights, vec![Some("A"), Some("B"), Some("C")]);
}
