use std::collections::{BTreeSet, HashMap};

use super::similarity::name_similarity;
use super::types::PropertyDiff;
use crate::schema::PropertyDef;

/// Schema entries keyed by canonical name.
///
/// Entries keep the position of the first occurrence of their name; a later
/// entry with the same name replaces the earlier one in place.
pub(super) struct NameIndex<'a, T> {
    entries: Vec<(&'a str, &'a T)>,
}

impl<'a, T> NameIndex<'a, T> {
    pub(super) fn build(items: &'a [T], name_of: impl Fn(&'a T) -> &'a str) -> Self {
        let mut entries: Vec<(&'a str, &'a T)> = Vec::with_capacity(items.len());
        let mut slots: HashMap<&'a str, usize> = HashMap::new();
        for item in items {
            let name = name_of(item);
            match slots.get(name) {
                Some(&slot) => entries[slot] = (name, item),
                None => {
                    slots.insert(name, entries.len());
                    entries.push((name, item));
                }
            }
        }
        Self { entries }
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = (&'a str, &'a T)> + '_ {
        self.entries.iter().copied()
    }

    pub(super) fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub(super) fn get(&self, name: &str) -> Option<&'a T> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, item)| *item)
    }
}

/// Returns the candidate name most similar to `name`, provided its score is
/// strictly above `threshold`. The first candidate wins ties.
pub(super) fn best_match<'c>(
    name: &str,
    candidates: impl Iterator<Item = &'c str>,
    threshold: f64,
) -> Option<&'c str> {
    let mut best: Option<(&'c str, f64)> = None;
    for candidate in candidates {
        let score = name_similarity(name, candidate);
        if score <= threshold {
            continue;
        }
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Partitions two property lists by name. Unnamed properties are ignored.
pub(super) fn diff_properties(reference: &[PropertyDef], candidate: &[PropertyDef]) -> PropertyDiff {
    let ref_names: BTreeSet<&str> = reference.iter().filter_map(PropertyDef::named).collect();
    let cand_names: BTreeSet<&str> = candidate.iter().filter_map(PropertyDef::named).collect();

    PropertyDiff {
        correct: owned(ref_names.intersection(&cand_names)),
        missing: owned(ref_names.difference(&cand_names)),
        extra: owned(cand_names.difference(&ref_names)),
    }
}

fn owned<'s, 'n: 's>(names: impl Iterator<Item = &'s &'n str>) -> Vec<String> {
    names.map(|s| (*s).to_owned()).collect()
}
