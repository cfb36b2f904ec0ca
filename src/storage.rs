use crate::io::AssignmentRecord;
use crate::model::Person;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Sauvegarde le résultat de manière atomique.
    fn save(&self, people: &[Person]) -> anyhow::Result<()>;
}

/// Persistance JSON du résultat (écriture via fichier temporaire + rename).
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn save(&self, people: &[Person]) -> anyhow::Result<()> {
        let records: Vec<AssignmentRecord> =
            people.iter().map(AssignmentRecord::from_person).collect();
        let json = serde_json::to_vec_pretty(&records)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
