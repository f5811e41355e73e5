//! Group-by-field with count.

use super::value::Document;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One group of a [`group_count`] result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub count: usize,
}

/// Counts, for each distinct string under `field`, how many documents carry it.
///
/// A document contributes at most once per key even if a list field repeats
/// it. Numeric and absent fields contribute nothing. Buckets come back by
/// count descending, ties by key ascending.
pub fn group_count<'a, D, I>(docs: I, field: &str) -> Vec<Bucket>
where
    D: Document + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for doc in docs {
        let Some(value) = doc.field(field) else {
            continue;
        };
        let distinct: BTreeSet<&str> = value.strings().collect();
        for key in distinct {
            *counts.entry(key.to_string()).or_default() += 1;
        }
    }

    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(key, count)| Bucket { key, count })
        .collect();
    // BTreeMap yields keys ascending; the stable sort keeps that for ties.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}
