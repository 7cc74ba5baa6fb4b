/// Ratcliff/Obershelp string similarity.
///
/// The ratio is `2 * M / T`, where `T` is the combined length of both strings
/// and `M` the number of characters covered by the recursively found longest
/// common blocks. Names are compared case-insensitively with all whitespace
/// removed.
use std::collections::HashMap;

/// Returns the similarity of two type names in `[0.0, 1.0]`.
///
/// Either name being empty (after whitespace removal) yields `0.0`.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let matched = matching_chars(&a, &b);
    (2 * matched) as f64 / (a.len() + b.len()) as f64
}

fn normalize(s: &str) -> Vec<char> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b_index.entry(c).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    total
}

/// Longest common block in `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Ties go to the block starting earliest in `a`,
/// then earliest in `b`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run length of the match ending at (i - 1, j), keyed by j
    let mut runs: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_runs = HashMap::new();
        if let Some(positions) = b_index.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| runs.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        runs = next_runs;
    }
    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_names_score_one() {
        assert!(approx(name_similarity("Neuron", "Neuron"), 1.0));
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert!(approx(name_similarity("Connects To", "connectsto"), 1.0));
        assert!(approx(name_similarity("NEURON", "neuron"), 1.0));
    }

    #[test]
    fn empty_names_score_zero() {
        assert!(approx(name_similarity("", "Neuron"), 0.0));
        assert!(approx(name_similarity("   ", "   "), 0.0));
    }

    #[test]
    fn disjoint_names_score_zero() {
        assert!(approx(name_similarity("abc", "xyz"), 0.0));
    }

    #[test]
    fn known_ratios() {
        // M = 4, T = 10
        assert!(approx(name_similarity("abcde", "abcdf"), 0.8));
        // M = 6, T = 13
        assert!(approx(name_similarity("Neuron", "Neurons"), 12.0 / 13.0));
        // "synapse" inside "synapseset": M = 7, T = 17
        assert!(approx(name_similarity("Synapse", "SynapseSet"), 14.0 / 17.0));
        // first block "a", then "c" to its right: M = 2, T = 6
        assert!(approx(name_similarity("abc", "bac"), 2.0 * 2.0 / 6.0));
    }

    #[test]
    fn recursion_collects_blocks_on_both_sides() {
        // longest block "cde", then "a" on the left and "g" on the right
        assert!(approx(
            name_similarity("axcdeyg", "acdezg"),
            2.0 * 5.0 / 13.0
        ));
    }
}
