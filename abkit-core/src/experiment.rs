//! Experiment records.
//!
//! An [`Experiment`] owns its assignment lists and the provenance of how
//! they were sourced. Construction happens exactly once; rebuilding is an
//! explicit, separate operation.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::builder::build_lists;
use crate::error::{Error, Result};
use crate::evaluate::evaluate;
use crate::types::{ClientRecord, Contract, Evaluation, ExperimentId, Group, SourceList, Strategy};

/// The computed assignment lists of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentLists {
    a: Vec<ClientRecord>,
    b: Vec<ClientRecord>,
    provenance: Vec<ClientRecord>,
}

impl AssignmentLists {
    /// Assignment list A, sorted by descending proba.
    #[must_use]
    pub fn a(&self) -> &[ClientRecord] {
        &self.a
    }

    /// Assignment list B, sorted by descending proba.
    #[must_use]
    pub fn b(&self) -> &[ClientRecord] {
        &self.b
    }

    /// Every raw record consumed during construction, duplicates included.
    #[must_use]
    pub fn provenance(&self) -> &[ClientRecord] {
        &self.provenance
    }

    /// The list selected by `group`.
    #[must_use]
    pub fn group(&self, group: Group) -> &[ClientRecord] {
        match group {
            Group::A => &self.a,
            Group::B => &self.b,
        }
    }
}

/// An A/B test experiment: identity, metadata, and (once built) the two
/// assignment lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    id: ExperimentId,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
    lists: Option<AssignmentLists>,
}

impl Experiment {
    /// Create a new experiment with no assignment lists yet.
    #[must_use]
    pub fn new(
        id: ExperimentId,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            start_date,
            end_date,
            is_active,
            lists: None,
        }
    }

    /// Identifier; immutable for the lifetime of the record.
    #[must_use]
    pub fn id(&self) -> ExperimentId {
        self.id
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Whether assignment lists have been built for this experiment.
    #[must_use]
    pub fn lists_created(&self) -> bool {
        self.lists.is_some()
    }

    /// Build the assignment lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateConflict`] when lists already exist (use
    /// [`Experiment::rebuild_lists`] instead), or whatever the builder
    /// rejects. A failed build leaves the record unchanged, so retrying
    /// with corrected inputs is safe.
    pub fn create_lists<R: Rng + ?Sized>(
        &mut self,
        sources: &[SourceList],
        list_size: usize,
        rng: &mut R,
    ) -> Result<()> {
        if self.lists_created() {
            return Err(Error::StateConflict(format!(
                "lists already created for experiment {}; rebuild to replace them",
                self.id
            )));
        }

        let built = build_lists(sources, list_size, rng)?;
        self.lists = Some(AssignmentLists {
            a: built.a,
            b: built.b,
            provenance: built.provenance,
        });
        tracing::info!(id = %self.id, list_size, "created assignment lists");
        Ok(())
    }

    /// Discard any existing lists and build fresh ones.
    ///
    /// Succeeds whenever a first [`Experiment::create_lists`] on the same
    /// inputs would.
    pub fn rebuild_lists<R: Rng + ?Sized>(
        &mut self,
        sources: &[SourceList],
        list_size: usize,
        rng: &mut R,
    ) -> Result<()> {
        self.lists = None;
        self.create_lists(sources, list_size, rng)
    }

    /// The assignment lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before the lists are built.
    pub fn lists(&self) -> Result<&AssignmentLists> {
        self.lists.as_ref().ok_or_else(|| {
            Error::NotReady(format!(
                "lists not created for experiment {}",
                self.id
            ))
        })
    }

    /// The assignment list selected by `group`.
    pub fn group(&self, group: Group) -> Result<&[ClientRecord]> {
        Ok(self.lists()?.group(group))
    }

    /// Evaluate contract-conversion rates for one assignment list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before the lists are built.
    pub fn evaluate(
        &self,
        group: Group,
        contracts: &[Contract],
        strategy: Strategy,
    ) -> Result<Evaluation> {
        let records = self.group(group)?;
        Ok(evaluate(records, contracts, strategy))
    }

    /// Human-readable dump of the record.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::from("Information about AB Test:\n");
        out.push_str(&format!("ID:\t{}\n", self.id));
        out.push_str(&format!("DESCRIPTION:\t{}\n", self.description));
        out.push_str(&format!("START_DATE:\t{}\n", self.start_date));
        out.push_str(&format!("END_DATE:\t{}\n", self.end_date));
        out.push_str(&format!("IS_ACTIVE:\t{}\n", self.is_active));
        out.push_str(&format!("LISTS_ARE_CREATED:\t{}\n", self.lists_created()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_experiment() -> Experiment {
        Experiment::new(
            ExperimentId(1),
            "spring mailing test",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            true,
        )
    }

    fn sample_sources() -> Vec<SourceList> {
        let make = |tag: &str, ids: &[(&str, f64)]| {
            SourceList::new(
                ids.iter()
                    .map(|(id, proba)| ClientRecord {
                        client_id: id.to_string(),
                        proba: *proba,
                        source: tag.to_string(),
                        extra: std::collections::BTreeMap::new(),
                    })
                    .collect(),
            )
        };
        vec![
            make("mail", &[("c1", 0.9), ("c2", 0.8), ("c3", 0.7)]),
            make("web", &[("c4", 0.6), ("c5", 0.5), ("c6", 0.4)]),
        ]
    }

    fn contract(client_id: &str) -> Contract {
        Contract {
            client_id: client_id.to_string(),
            signed_at: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        }
    }

    #[test]
    fn new_experiment_has_no_lists() {
        let experiment = sample_experiment();

        assert!(!experiment.lists_created());
        assert!(matches!(experiment.lists(), Err(Error::NotReady(_))));
    }

    #[test]
    fn create_lists_sets_created_flag() {
        let mut experiment = sample_experiment();
        let mut rng = StdRng::seed_from_u64(5);

        experiment
            .create_lists(&sample_sources(), 2, &mut rng)
            .unwrap();

        assert!(experiment.lists_created());
        let lists = experiment.lists().unwrap();
        assert_eq!(lists.a().len(), 2);
        assert_eq!(lists.b().len(), 2);
    }

    #[test]
    fn second_create_fails_with_state_conflict() {
        let mut experiment = sample_experiment();
        let mut rng = StdRng::seed_from_u64(5);
        experiment
            .create_lists(&sample_sources(), 2, &mut rng)
            .unwrap();

        let err = experiment
            .create_lists(&sample_sources(), 2, &mut rng)
            .unwrap_err();

        assert!(matches!(err, Error::StateConflict(_)));
    }

    #[test]
    fn failed_create_leaves_flag_untouched_and_retry_succeeds() {
        let mut experiment = sample_experiment();
        let mut rng = StdRng::seed_from_u64(5);

        // Too few unique clients for lists of 10.
        let err = experiment
            .create_lists(&sample_sources(), 10, &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!experiment.lists_created());

        experiment
            .create_lists(&sample_sources(), 2, &mut rng)
            .unwrap();
        assert!(experiment.lists_created());
    }

    #[test]
    fn rebuild_replaces_existing_lists() {
        let mut experiment = sample_experiment();
        experiment
            .create_lists(&sample_sources(), 2, &mut StdRng::seed_from_u64(5))
            .unwrap();

        experiment
            .rebuild_lists(&sample_sources(), 3, &mut StdRng::seed_from_u64(5))
            .unwrap();

        assert_eq!(experiment.lists().unwrap().a().len(), 3);
    }

    #[test]
    fn rebuild_works_without_prior_lists() {
        let mut experiment = sample_experiment();

        experiment
            .rebuild_lists(&sample_sources(), 2, &mut StdRng::seed_from_u64(5))
            .unwrap();

        assert!(experiment.lists_created());
    }

    #[test]
    fn evaluate_before_create_is_not_ready() {
        let experiment = sample_experiment();

        let err = experiment
            .evaluate(Group::A, &[contract("c1")], Strategy::General)
            .unwrap_err();

        assert!(matches!(err, Error::NotReady(_)));
    }

    #[test]
    fn evaluate_returns_100_when_whole_list_converted() {
        let mut experiment = sample_experiment();
        experiment
            .create_lists(&sample_sources(), 2, &mut StdRng::seed_from_u64(5))
            .unwrap();

        let contracts: Vec<Contract> = ["c1", "c2", "c3", "c4", "c5", "c6"]
            .iter()
            .map(|id| contract(id))
            .collect();
        let result = experiment
            .evaluate(Group::A, &contracts, Strategy::General)
            .unwrap();

        assert_eq!(result, Evaluation::General(100.0));
    }

    #[test]
    fn group_accessor_selects_the_right_list() {
        let mut experiment = sample_experiment();
        experiment
            .create_lists(&sample_sources(), 2, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let lists = experiment.lists().unwrap();

        assert_eq!(experiment.group(Group::A).unwrap(), lists.a());
        assert_eq!(experiment.group(Group::B).unwrap(), lists.b());
    }

    #[test]
    fn metadata_setters_update_fields() {
        let mut experiment = sample_experiment();

        experiment.set_description("renamed");
        experiment.set_active(false);
        experiment.set_dates(
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );

        assert_eq!(experiment.description(), "renamed");
        assert!(!experiment.is_active());
        assert_eq!(
            experiment.start_date(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
    }

    #[test]
    fn summary_mentions_identity_and_created_flag() {
        let experiment = sample_experiment();
        let summary = experiment.summary();

        assert!(summary.contains("ID:\t1"));
        assert!(summary.contains("LISTS_ARE_CREATED:\tfalse"));
    }

    #[test]
    fn experiment_serialization_roundtrip_keeps_lists() {
        let mut experiment = sample_experiment();
        experiment
            .create_lists(&sample_sources(), 2, &mut StdRng::seed_from_u64(5))
            .unwrap();

        let json = serde_json::to_string(&experiment).unwrap();
        let parsed: Experiment = serde_json::from_str(&json).unwrap();

        assert_eq!(experiment, parsed);
        assert!(parsed.lists_created());
    }
}
