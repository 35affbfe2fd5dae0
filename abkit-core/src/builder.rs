//! A/B list construction.
//!
//! Candidate source lists are merged round-robin into a deduplicated
//! client universe of exactly `2 * list_size` unique clients, then split
//! uniformly at random into two disjoint lists of `list_size` each.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{Error, Result};
use crate::types::{ClientRecord, SourceList};

/// Output of one list construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltLists {
    /// Assignment list A, sorted by descending proba
    pub a: Vec<ClientRecord>,

    /// Assignment list B, sorted by descending proba
    pub b: Vec<ClientRecord>,

    /// Every raw record consumed during construction, duplicates included,
    /// in consumption order
    pub provenance: Vec<ClientRecord>,
}

/// Build assignment lists A and B from ranked candidate source lists.
///
/// Sources are consumed with a rotating cursor: one record per source per
/// round, in source order. Every consumed record lands in the provenance
/// table; the universe keeps the first occurrence per `client_id`.
/// Consumption stops as soon as the universe holds `2 * list_size` unique
/// clients, so both lists end up with exactly `list_size` members.
///
/// The A/B split draws from the caller's `rng`; seed it for reproducible
/// partitions.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `list_size` is zero or when the
/// sources together hold fewer than `2 * list_size` unique clients.
pub fn build_lists<R: Rng + ?Sized>(
    sources: &[SourceList],
    list_size: usize,
    rng: &mut R,
) -> Result<BuiltLists> {
    if list_size == 0 {
        return Err(Error::InvalidArgument(
            "list_size must be positive".to_string(),
        ));
    }

    let target = list_size * 2;
    let mut provenance = Vec::new();
    let mut universe: Vec<ClientRecord> = Vec::with_capacity(target);
    let mut seen: HashSet<String> = HashSet::with_capacity(target);
    let mut cursors = vec![0usize; sources.len()];

    'merge: loop {
        let mut consumed_any = false;

        for (list_num, source) in sources.iter().enumerate() {
            let Some(record) = source.records.get(cursors[list_num]) else {
                continue;
            };
            cursors[list_num] += 1;
            consumed_any = true;

            provenance.push(record.clone());
            if seen.insert(record.client_id.clone()) {
                universe.push(record.clone());
                if universe.len() == target {
                    break 'merge;
                }
            }
        }

        if !consumed_any {
            // All cursors exhausted; the naive loop in the original design
            // would spin forever here.
            return Err(Error::InvalidArgument(format!(
                "sources hold only {} unique clients, need {} for two lists of {}",
                universe.len(),
                target,
                list_size
            )));
        }
    }

    let picked = rand::seq::index::sample(rng, universe.len(), list_size);
    let mut in_a = vec![false; universe.len()];
    for index in picked.iter() {
        in_a[index] = true;
    }

    let mut a = Vec::with_capacity(list_size);
    let mut b = Vec::with_capacity(target - list_size);
    for (index, record) in universe.into_iter().enumerate() {
        if in_a[index] {
            a.push(record);
        } else {
            b.push(record);
        }
    }

    sort_by_proba_desc(&mut a);
    sort_by_proba_desc(&mut b);

    tracing::debug!(
        list_size,
        consumed = provenance.len(),
        "built assignment lists"
    );

    Ok(BuiltLists { a, b, provenance })
}

/// Stable descending sort on proba; ties keep their insertion order.
fn sort_by_proba_desc(records: &mut [ClientRecord]) {
    records.sort_by(|x, y| y.proba.total_cmp(&x.proba));
}
