//! Directory-per-experiment storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use abkit_core::{Experiment, ExperimentId};

use crate::error::{Error, Result};
use crate::tables::write_records;

const METADATA_FILE: &str = "experiments.csv";
const BLOB_FILE: &str = "experiment.json";
const LIST_A_FILE: &str = "a.csv";
const LIST_B_FILE: &str = "b.csv";
const SOURCES_FILE: &str = "client_sources.csv";

/// One row of the metadata table.
///
/// Round-tripped unchanged; the core treats this as an opaque bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRow {
    pub id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl MetadataRow {
    fn from_experiment(experiment: &Experiment) -> Self {
        Self {
            id: experiment.id().0,
            description: experiment.description().to_string(),
            start_date: experiment.start_date(),
            end_date: experiment.end_date(),
            is_active: experiment.is_active(),
        }
    }
}

/// Flat-file catalog of experiments under one root directory.
///
/// Enforces identifier uniqueness at registration. Assumes a single
/// writer; there is no cross-process locking.
pub struct Catalog {
    root: PathBuf,
    rows: BTreeMap<i64, MetadataRow>,
}

impl Catalog {
    /// Open the catalog at `root`, creating it if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let metadata_path = root.join(METADATA_FILE);
        let mut rows = BTreeMap::new();
        if metadata_path.exists() {
            let mut reader = csv::Reader::from_path(&metadata_path)?;
            for row in reader.deserialize() {
                let row: MetadataRow = row?;
                rows.insert(row.id, row);
            }
        }

        tracing::debug!(root = %root.display(), experiments = rows.len(), "opened catalog");
        Ok(Self { root, rows })
    }

    /// The catalog root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn experiment_dir(&self, id: ExperimentId) -> PathBuf {
        self.root.join(format!("abtest_id_{id}"))
    }

    /// Register a new experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] when the identifier is already
    /// registered or its directory is already on disk.
    pub fn add(&mut self, experiment: &Experiment) -> Result<()> {
        let id = experiment.id();
        let dir = self.experiment_dir(id);
        if self.rows.contains_key(&id.0) || dir.exists() {
            return Err(Error::AlreadyExists(id));
        }

        fs::create_dir_all(&dir)?;
        self.write_record(experiment, &dir)?;
        self.rows.insert(id.0, MetadataRow::from_experiment(experiment));
        self.save_metadata()?;

        tracing::info!(%id, "registered experiment");
        Ok(())
    }

    /// Retrieve an experiment by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the identifier is unknown.
    pub fn get(&self, id: ExperimentId) -> Result<Experiment> {
        if !self.rows.contains_key(&id.0) {
            return Err(Error::NotFound(id));
        }
        let blob = fs::read_to_string(self.experiment_dir(id).join(BLOB_FILE))?;
        Ok(serde_json::from_str(&blob)?)
    }

    /// Persist changes to an already-registered experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the experiment was never added.
    pub fn update(&mut self, experiment: &Experiment) -> Result<()> {
        let id = experiment.id();
        if !self.rows.contains_key(&id.0) {
            return Err(Error::NotFound(id));
        }

        let dir = self.experiment_dir(id);
        fs::create_dir_all(&dir)?;
        self.write_record(experiment, &dir)?;
        self.rows.insert(id.0, MetadataRow::from_experiment(experiment));
        self.save_metadata()?;

        tracing::info!(%id, "updated experiment");
        Ok(())
    }

    /// Remove an experiment and its directory. No-op for unknown ids.
    pub fn remove(&mut self, id: ExperimentId) -> Result<()> {
        if self.rows.remove(&id.0).is_none() {
            return Ok(());
        }

        let dir = self.experiment_dir(id);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        self.save_metadata()?;

        tracing::info!(%id, "removed experiment");
        Ok(())
    }

    /// Metadata rows, optionally restricted to active experiments.
    #[must_use]
    pub fn list(&self, only_active: bool) -> Vec<MetadataRow> {
        self.rows
            .values()
            .filter(|row| !only_active || row.is_active)
            .cloned()
            .collect()
    }

    /// Change an experiment's description.
    pub fn set_description(&mut self, id: ExperimentId, description: &str) -> Result<()> {
        let mut experiment = self.get(id)?;
        experiment.set_description(description);
        self.update(&experiment)
    }

    /// Change an experiment's start and end dates.
    pub fn set_dates(&mut self, id: ExperimentId, start: NaiveDate, end: NaiveDate) -> Result<()> {
        let mut experiment = self.get(id)?;
        experiment.set_dates(start, end);
        self.update(&experiment)
    }

    /// Flip an experiment's active flag.
    pub fn set_active(&mut self, id: ExperimentId, is_active: bool) -> Result<()> {
        let mut experiment = self.get(id)?;
        experiment.set_active(is_active);
        self.update(&experiment)
    }

    /// Write the assignment-list CSVs for an experiment into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the core's `NotReady` error when the lists are not built.
    pub fn export_lists(&self, id: ExperimentId, dir: &Path) -> Result<()> {
        let experiment = self.get(id)?;
        let lists = experiment.lists()?;

        fs::create_dir_all(dir)?;
        write_records(&dir.join(LIST_A_FILE), lists.a())?;
        write_records(&dir.join(LIST_B_FILE), lists.b())?;
        write_records(&dir.join(SOURCES_FILE), lists.provenance())?;
        Ok(())
    }

    fn write_record(&self, experiment: &Experiment, dir: &Path) -> Result<()> {
        let blob = serde_json::to_string_pretty(experiment)?;
        fs::write(dir.join(BLOB_FILE), blob)?;

        if experiment.lists_created() {
            let lists = experiment.lists()?;
            write_records(&dir.join(LIST_A_FILE), lists.a())?;
            write_records(&dir.join(LIST_B_FILE), lists.b())?;
            write_records(&dir.join(SOURCES_FILE), lists.provenance())?;
        }
        Ok(())
    }

    fn save_metadata(&self) -> Result<()> {
        let mut writer = csv::Writer::from_path(self.root.join(METADATA_FILE))?;
        for row in self.rows.values() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
