use crate::model::{Dataset, LeavePeriod, Person, RotationConfig};
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le jeu de données depuis un support.
    fn load(&self) -> anyhow::Result<Dataset>;
    /// Sauvegarde de manière atomique.
    fn save(&self, dataset: &Dataset) -> anyhow::Result<()>;
}

/// Source d'instantanés consommée par le cœur.
///
/// Les trois lectures doivent décrire le même état. Un support persistant se
/// charge une seule fois (`Storage::load`) et c'est le `Dataset` obtenu qui
/// sert de source.
pub trait SnapshotSource {
    fn fetch_config(&self) -> anyhow::Result<RotationConfig>;
    fn fetch_active_roster(&self) -> anyhow::Result<Vec<Person>>;
    fn fetch_leave_periods(&self) -> anyhow::Result<Vec<LeavePeriod>>;
}

impl SnapshotSource for Dataset {
    fn fetch_config(&self) -> anyhow::Result<RotationConfig> {
        Ok(self.config.clone())
    }
    fn fetch_active_roster(&self) -> anyhow::Result<Vec<Person>> {
        Ok(self.active_people())
    }
    fn fetch_leave_periods(&self) -> anyhow::Result<Vec<LeavePeriod>> {
        Ok(self.leaves.clone())
    }
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Dataset> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let dataset: Dataset = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(dataset)
    }

    fn save(&self, dataset: &Dataset) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(dataset)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PersonId, RotationGroup};
    use tempfile::tempdir;

    #[test]
    fn save_then_load_keeps_dataset() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("rotation.json")).unwrap();
        let mut ds = Dataset::default();
        ds.add_person(Person::new("Ana", "Infra", RotationGroup::A).with_id("p1"));
        let mut off = Person::new("Bo", "Infra", RotationGroup::B).with_id("p2");
        off.active = false;
        ds.add_person(off);
        storage.save(&ds).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.people.len(), 2);
        let roster = loaded.fetch_active_roster().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, PersonId::new("p1"));
    }

    #[test]
    fn one_load_feeds_a_whole_snapshot() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("rotation.json")).unwrap();
        let mut ds = Dataset::default();
        ds.add_person(Person::new("Ana", "Infra", RotationGroup::A).with_id("p1"));
        storage.save(&ds).unwrap();

        let snapshot = storage.load().unwrap();
        // une écriture postérieure ne touche pas l'instantané déjà chargé
        ds.add_person(Person::new("Bo", "Infra", RotationGroup::B).with_id("p2"));
        storage.save(&ds).unwrap();

        let s = crate::scheduler::Scheduler::from_source(&snapshot).unwrap();
        assert_eq!(s.roster().len(), 1);
        assert_eq!(storage.load().unwrap().people.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
        assert!(storage.load().is_err());
    }
}
