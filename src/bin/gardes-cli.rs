#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use gardes::{
    io,
    model::{parse_date, Roster, ShiftSlot, Specialty},
    report::{self, ScheduleSummary},
    scheduler::{ScheduleOptions, ScheduleResult, Scheduler},
    storage::{JsonStorage, Storage},
    validation,
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de gardes hospitalières (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des fichiers `staff.json` / `holidays.json`
    #[arg(long, global = true, default_value = "data")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Écrire le jeu de données initial si le répertoire est vide
    Init,

    /// Importer du personnel depuis un CSV (fusion par code)
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des fériés depuis un CSV `date,name`
    ImportHolidays {
        #[arg(long)]
        csv: String,
    },

    /// Générer le planning et mettre à jour les compteurs
    Generate {
        #[arg(long, default_value_t = 14)]
        days: i64,
        /// Premier jour (DD/MM/YYYY), aujourd'hui par défaut
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        hospital: Option<String>,
        /// N'affiche que les jours où cette spécialité est présente
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long, default_value_t = 6)]
        night_cap: u32,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        /// Ne pas enregistrer les compteurs mis à jour
        #[arg(long)]
        dry_run: bool,
    },

    /// Remettre à zéro les compteurs de nuits et de fériés
    ResetCounters {
        #[arg(long)]
        hospital: Option<String>,
    },

    /// Statistiques rapides sur le personnel
    Stats {
        #[arg(long)]
        hospital: Option<String>,
        #[arg(long, default_value_t = 6)]
        night_cap: u32,
    },

    /// Vérifier l'intégrité des données
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data_dir)?;

    let code = match cli.cmd {
        Commands::Init => {
            if storage.exists() {
                println!("data already present in {}", cli.data_dir);
            } else {
                let roster = storage.load_or_seed()?;
                println!(
                    "seeded {} staff and {} holidays in {}",
                    roster.staff.len(),
                    roster.holidays.len(),
                    cli.data_dir
                );
            }
            0
        }
        Commands::ImportStaff { csv } => {
            let mut roster = storage.load_or_seed()?;
            let imported = io::import_staff_csv(&csv)?;
            let count = imported.len();
            let mut merged = roster.staff.clone();
            for member in imported {
                match merged.iter_mut().find(|m| m.code == member.code) {
                    Some(existing) => *existing = member,
                    None => merged.push(member),
                }
            }
            roster.replace_staff(merged)?;
            storage.save(&roster)?;
            println!("imported {count} staff record(s)");
            0
        }
        Commands::ImportHolidays { csv } => {
            let mut roster = storage.load_or_seed()?;
            let imported = io::import_holidays_csv(&csv)?;
            let count = imported.len();
            let mut merged = roster.holidays.clone();
            merged.extend(imported.iter().map(|(d, n)| (*d, n.to_string())));
            roster.replace_holidays(merged)?;
            storage.save(&roster)?;
            println!("imported {count} holiday(s)");
            0
        }
        Commands::Generate {
            days,
            start,
            hospital,
            specialty,
            night_cap,
            out_csv,
            out_json,
            dry_run,
        } => {
            let mut roster = storage.load_or_seed()?;
            validation::validate_roster(&roster)?;
            let start = match start {
                Some(raw) => parse_start(&raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let specialty = specialty
                .map(|s| s.parse::<Specialty>())
                .transpose()?;
            let scheduler = Scheduler::with_options(ScheduleOptions {
                night_cap,
                ..ScheduleOptions::default()
            });
            let result = scheduler.generate_for_roster(&mut roster, start, days, hospital.as_deref())?;
            if result.capped {
                eprintln!(
                    "warning: only {} day(s) can be generated at once",
                    scheduler.options().max_days
                );
            }

            print_schedule(&result, &roster, specialty);

            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &result)?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, &result)?;
            }
            if !dry_run {
                storage.save(&roster)?;
            }
            0
        }
        Commands::ResetCounters { hospital } => {
            let mut roster = storage.load_or_seed()?;
            let touched = match hospital.as_deref() {
                Some(h) => roster.reset_counters_in(h),
                None => {
                    roster.reset_counters();
                    roster.staff.len()
                }
            };
            storage.save(&roster)?;
            println!("counters reset for {touched} staff record(s)");
            0
        }
        Commands::Stats { hospital, night_cap } => {
            let roster = storage.load_or_seed()?;
            let staff: Vec<_> = roster.staff_in_hospital(hospital.as_deref()).cloned().collect();
            if staff.is_empty() {
                bail!("no staff for this selection");
            }
            println!("staff: {}", staff.len());
            if let Some(avg) = report::average_night_shifts(&staff) {
                println!("average night shifts: {avg:.1}");
            }
            println!("-- night shifts (limit {night_cap})");
            for load in report::night_load(&staff, night_cap) {
                let flag = if load.at_cap() { " (at cap)" } else { "" };
                println!(
                    "{} | {} | {}/{}{}",
                    load.code, load.name, load.night_shift_count, load.limit, flag
                );
            }
            println!("-- staff per specialty");
            for (specialty, count) in report::specialty_headcount(&staff) {
                println!("{specialty}: {count}");
            }
            0
        }
        Commands::Validate => {
            let roster = storage.load()?;
            match validation::validate_roster(&roster) {
                Ok(()) => {
                    println!("OK: {} staff, {} holidays", roster.staff.len(), roster.holidays.len());
                    0
                }
                Err(errors) => {
                    eprintln!("{errors}");
                    // Code 2 = WARNING/INCOMPLETE
                    2
                }
            }
        }
    };

    std::process::exit(code);
}

fn print_schedule(result: &ScheduleResult, roster: &Roster, specialty: Option<Specialty>) {
    let days = match specialty {
        Some(sp) => result.filter_by_specialty(&roster.staff, sp),
        None => result.iter().collect(),
    };
    for day in days {
        let cells: Vec<String> = ShiftSlot::ALL
            .into_iter()
            .map(|slot| {
                let who = day.slot(slot).map_or_else(|| "-".to_string(), ToString::to_string);
                format!("{}: {who}", slot.name())
            })
            .collect();
        let holiday = day
            .holiday
            .as_deref()
            .map(|h| format!(" [{h}]"))
            .unwrap_or_default();
        println!(
            "{} {:<9} {:<7} | {}{}",
            gardes::model::format_date(day.date),
            day.weekday_name(),
            day.required_specialty.label(),
            cells.join(" | "),
            holiday
        );
    }
    let summary = ScheduleSummary::from_result(result);
    println!(
        "-- {} day(s), {} night shift(s), {} unassigned slot(s), {} staff involved",
        summary.days, summary.night_shifts, summary.unassigned_slots, summary.staff_involved
    );
}

fn parse_start(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).with_context(|| format!("invalid start date {raw}"))
}
