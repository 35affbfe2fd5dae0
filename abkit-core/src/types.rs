//! Core type definitions for abkit.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Unique identifier for an experiment.
///
/// Caller-chosen integer; the catalog enforces uniqueness at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExperimentId(pub i64);

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One client row from a candidate source list.
///
/// `client_id` is unique within the deduplicated universe but may repeat
/// across input sources. `extra` carries whatever additional columns the
/// input tables share; it is preserved verbatim through build and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Client identifier
    pub client_id: String,

    /// Ranking score, higher is better
    pub proba: f64,

    /// Tag of the acquisition source this row came from
    pub source: String,

    /// Additional shared columns, keyed by header name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// An ordered candidate source list.
///
/// Order is priority: earlier rows are consumed first when filling the
/// client universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceList {
    pub records: Vec<ClientRecord>,
}

impl SourceList {
    #[must_use]
    pub fn new(records: Vec<ClientRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One signed contract, used as the conversion signal during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Client identifier
    pub client_id: String,

    /// Date the contract began
    pub signed_at: NaiveDate,
}

/// Which assignment list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    /// Convert to the list's display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Parse from a list name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            _ => None,
        }
    }
}

impl FromStr for Group {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| Error::InvalidArgument(format!("group must be 'A' or 'B', got '{s}'")))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How conversion rates are aggregated during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One percentage over the whole assignment list
    General,
    /// One percentage per acquisition source
    BySource,
}

impl Strategy {
    /// Convert to the wire/CLI string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::BySource => "by_source",
        }
    }

    /// Parse from the wire/CLI string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Self::General),
            "by_source" => Some(Self::BySource),
            _ => None,
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "strategy must be 'general' or 'by_source', got '{s}'"
            ))
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating an assignment list.
///
/// Percentages are in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Conversion percentage over the whole list
    General(f64),
    /// Conversion percentage per source tag
    BySource(BTreeMap<String, f64>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_as_str_returns_list_names() {
        assert_eq!(Group::A.as_str(), "A");
        assert_eq!(Group::B.as_str(), "B");
    }

    #[test]
    fn group_parse_accepts_both_cases() {
        assert_eq!(Group::parse("A"), Some(Group::A));
        assert_eq!(Group::parse("b"), Some(Group::B));
        assert_eq!(Group::parse("C"), None);
    }

    #[test]
    fn group_from_str_rejects_unknown_name() {
        let err = "C".parse::<Group>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn strategy_as_str_returns_correct_values() {
        assert_eq!(Strategy::General.as_str(), "general");
        assert_eq!(Strategy::BySource.as_str(), "by_source");
    }

    #[test]
    fn strategy_parse_returns_correct_variants() {
        assert_eq!(Strategy::parse("general"), Some(Strategy::General));
        assert_eq!(Strategy::parse("by_source"), Some(Strategy::BySource));
        assert_eq!(Strategy::parse("median"), None);
    }

    #[test]
    fn strategy_from_str_rejects_unknown_value() {
        let err = "median".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("median"));
    }

    #[test]
    fn client_record_serialization_roundtrip() {
        let mut extra = BTreeMap::new();
        extra.insert("REGION".to_string(), "north".to_string());

        let record = ClientRecord {
            client_id: "c-17".to_string(),
            proba: 0.83,
            source: "mailing".to_string(),
            extra,
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: ClientRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, parsed);
    }

    #[test]
    fn client_record_empty_extra_not_serialized() {
        let record = ClientRecord {
            client_id: "c-1".to_string(),
            proba: 0.5,
            source: "web".to_string(),
            extra: BTreeMap::new(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("extra"));
    }

    #[test]
    fn experiment_id_displays_inner_integer() {
        assert_eq!(ExperimentId(42).to_string(), "42");
    }
}
