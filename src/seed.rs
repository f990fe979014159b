//! Jeu de données initial, écrit à la première ouverture d'un répertoire vide.

use crate::model::{HolidayCalendar, Roster, Specialty, StaffMember};
use chrono::NaiveDate;

pub const HOSPITALS: [&str; 4] = [
    "Hospital Rosales",
    "Hospital Bloom",
    "Hospital Zacamil",
    "Hospital Nacional de Niños",
];

type SeedRow = (&'static str, &'static str, u32, Specialty, u32, u32);

const ROSALES: [SeedRow; 6] = [
    ("ROS-101", "Carlos Martínez", 3, Specialty::Surgery, 2, 1),
    ("ROS-102", "Roberto Sánchez", 3, Specialty::Surgery, 0, 0),
    ("ROS-103", "Laura González", 4, Specialty::InternalMedicine, 1, 1),
    ("ROS-104", "Miguel Ángel Ramírez", 2, Specialty::Emergencies, 3, 2),
    ("ROS-105", "Sofía Hernández", 5, Specialty::Nursing, 2, 0),
    ("ROS-106", "Jorge Luis Campos", 1, Specialty::IntensiveCare, 4, 1),
];

const BLOOM: [SeedRow; 6] = [
    ("BLM-201", "María López", 5, Specialty::Pediatrics, 0, 0),
    ("BLM-202", "Luisa Vásquez", 2, Specialty::Pediatrics, 1, 1),
    ("BLM-203", "Juan Carlos Molina", 4, Specialty::Surgery, 2, 0),
    ("BLM-204", "Patricia Salazar", 3, Specialty::InternalMedicine, 1, 1),
    ("BLM-205", "Francisco Méndez", 6, Specialty::Nursing, 0, 0),
    ("BLM-206", "Gabriela Rivas", 2, Specialty::IntensiveCare, 3, 2),
];

const ZACAMIL: [SeedRow; 6] = [
    ("ZAC-301", "Ana Rivera", 1, Specialty::Nursing, 4, 0),
    ("ZAC-302", "José Antonio García", 3, Specialty::Emergencies, 2, 1),
    ("ZAC-303", "Marta Elizabeth Contreras", 4, Specialty::Pediatrics, 1, 0),
    ("ZAC-304", "Luis Fernando Orellana", 5, Specialty::InternalMedicine, 0, 1),
    ("ZAC-305", "Silvia Regina Flores", 2, Specialty::Surgery, 3, 2),
    ("ZAC-306", "Ricardo Ernesto Castro", 3, Specialty::IntensiveCare, 2, 1),
];

const NINOS: [SeedRow; 6] = [
    ("HNN-401", "Jorge Ramírez", 4, Specialty::Emergencies, 3, 2),
    ("HNN-402", "María Fernanda Solís", 2, Specialty::Pediatrics, 1, 0),
    ("HNN-403", "Carlos Alfredo Portillo", 5, Specialty::InternalMedicine, 0, 1),
    ("HNN-404", "Ana Isabel Gutiérrez", 3, Specialty::Nursing, 2, 1),
    ("HNN-405", "Oscar Armando Peña", 4, Specialty::Surgery, 1, 0),
    ("HNN-406", "Karla Patricia Bonilla", 1, Specialty::IntensiveCare, 4, 2),
];

const HOLIDAYS: [(u32, u32, &str); 6] = [
    (1, 1, "Año Nuevo"),
    (5, 1, "Día del Trabajo"),
    (8, 6, "Fiesta de San Salvador"),
    (9, 15, "Día de la Independencia"),
    (11, 2, "Día de los Difuntos"),
    (12, 25, "Navidad"),
];

pub fn default_staff() -> Vec<StaffMember> {
    [ROSALES, BLOOM, ZACAMIL, NINOS]
        .iter()
        .zip(HOSPITALS)
        .flat_map(|(rows, hospital)| {
            rows.iter()
                .map(move |&(code, name, seniority, specialty, night, holiday)| {
                    StaffMember::new(code, name, seniority, specialty, hospital)
                        .with_counters(night, holiday)
                })
        })
        .collect()
}

/// Fériés fixes pour chacune des années données.
pub fn default_holidays<I: IntoIterator<Item = i32>>(years: I) -> HolidayCalendar {
    years
        .into_iter()
        .flat_map(|year| {
            HOLIDAYS.iter().filter_map(move |&(month, day, name)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, name.to_string()))
            })
        })
        .collect()
}

pub fn default_roster() -> Roster {
    Roster {
        staff: default_staff(),
        holidays: default_holidays([2024, 2025]),
    }
}
