//! Conversion-rate evaluation for assignment lists.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::types::{ClientRecord, Contract, Evaluation, Strategy};

/// Compute contract-conversion percentages for one assignment list.
///
/// A client converts when it appears at least once in `contracts` (a left
/// join with fill-zero on missing matches). `General` averages the flag
/// over the whole list; `BySource` averages it per source tag. Percentages
/// are in `[0, 100]`.
///
/// Pure computation over snapshots; nothing is mutated.
#[must_use]
pub fn evaluate(records: &[ClientRecord], contracts: &[Contract], strategy: Strategy) -> Evaluation {
    let converted: HashSet<&str> = contracts.iter().map(|c| c.client_id.as_str()).collect();

    match strategy {
        Strategy::General => {
            Evaluation::General(percentage(records, &converted))
        }
        Strategy::BySource => {
            let mut by_source: BTreeMap<&str, Vec<&ClientRecord>> = BTreeMap::new();
            for record in records {
                by_source.entry(record.source.as_str()).or_default().push(record);
            }

            let rates = by_source
                .into_iter()
                .map(|(source, group)| {
                    let hits = group
                        .iter()
                        .filter(|r| converted.contains(r.client_id.as_str()))
                        .count();
                    (
                        source.to_string(),
                        100.0 * hits as f64 / group.len() as f64,
                    )
                })
                .collect();
            Evaluation::BySource(rates)
        }
    }
}

fn percentage(records: &[ClientRecord], converted: &HashSet<&str>) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let hits = records
        .iter()
        .filter(|r| converted.contains(r.client_id.as_str()))
        .count();
    100.0 * hits as f64 / records.len() as f64
}
