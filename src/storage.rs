use crate::model::{HolidayCalendar, Roster, StaffMember};
use crate::seed;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const STAFF_FILE: &str = "staff.json";
pub const HOLIDAYS_FILE: &str = "holidays.json";

pub trait Storage {
    /// Charge un roster depuis un support.
    fn load(&self) -> anyhow::Result<Roster>;
    /// Sauvegarde de manière atomique.
    fn save(&self, roster: &Roster) -> anyhow::Result<()>;
}

/// Répertoire de données : `staff.json` + `holidays.json`.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn staff_path(&self) -> PathBuf {
        self.dir.join(STAFF_FILE)
    }

    pub fn holidays_path(&self) -> PathBuf {
        self.dir.join(HOLIDAYS_FILE)
    }

    /// Le fichier du personnel fait foi ; les fériés seuls ne suffisent pas.
    pub fn exists(&self) -> bool {
        self.staff_path().exists()
    }

    /// Charge le roster, ou écrit le jeu de données initial si le répertoire est vierge.
    pub fn load_or_seed(&self) -> anyhow::Result<Roster> {
        if self.exists() {
            return self.load();
        }
        let roster = seed::default_roster();
        self.save(&roster)?;
        info!(dir = %self.dir.display(), "seeded default roster");
        Ok(roster)
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Roster> {
        let staff_path = self.staff_path();
        let data = fs::read(&staff_path)
            .with_context(|| format!("reading {}", staff_path.display()))?;
        let staff: Vec<StaffMember> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", staff_path.display()))?;

        let holidays_path = self.holidays_path();
        let holidays: HolidayCalendar = if holidays_path.exists() {
            let data = fs::read(&holidays_path)
                .with_context(|| format!("reading {}", holidays_path.display()))?;
            serde_json::from_slice(&data)
                .with_context(|| format!("parsing {}", holidays_path.display()))?
        } else {
            HolidayCalendar::new()
        };

        Ok(Roster { staff, holidays })
    }

    fn save(&self, roster: &Roster) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating data directory {}", self.dir.display()))?;
        write_atomic(&self.staff_path(), &serde_json::to_vec_pretty(&roster.staff)?)?;
        write_atomic(&self.holidays_path(), &serde_json::to_vec_pretty(&roster.holidays)?)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
        .with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
