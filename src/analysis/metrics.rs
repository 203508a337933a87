//! The five similarity metrics and their aggregation.
//!
//! Every metric consumes the *filtered* method lists of both code bases, is independent of the
//! others and of method order, and yields a value in `[0, 1]`:
//!
//! 1. [`signature_similarity`] - overlap of method-signature sets
//! 2. [`feature_similarity`] - mean best-match Jaccard similarity of feature sets (directional)
//! 3. [`class_similarity`] - overlap of class-name sets
//! 4. [`length_similarity`] - ratio of mean method lengths
//! 5. [`block_similarity`] - ratio of mean basic-block counts
//!
//! Metrics 1, 3, 4 and 5 are symmetric under swapping the two packages. Metric 2 is directional
//! by design — it averages over package 1's methods against their best matches in package 2 — and
//! that asymmetry is part of the contract, not an accident to symmetrize away.
//!
//! The two set-overlap metrics report [`Similarity::NotApplicable`] instead of a number when both
//! input sets are empty; [`aggregate`] excludes such components from the overall mean.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::analysis::MethodFeatures;
use crate::model::Method;

/// Outcome of one similarity metric.
///
/// Renders as a 4-decimal score, or `n/a` for the degenerate doubly-empty case of the set-overlap
/// metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Similarity {
    /// A computed score in `[0, 1]`
    Score(f64),
    /// The metric is undefined for the given inputs (both sets empty)
    NotApplicable,
}

impl Similarity {
    /// The numeric score, if the metric was applicable.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Similarity::Score(score) => Some(*score),
            Similarity::NotApplicable => None,
        }
    }

    /// Whether the metric produced a number.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        matches!(self, Similarity::Score(_))
    }
}

impl std::fmt::Display for Similarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Similarity::Score(score) => write!(f, "{score:.4}"),
            Similarity::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Overlap similarity of the method-signature sets: `|S1 ∩ S2| / max(|S1|, |S2|)`.
///
/// [`Similarity::NotApplicable`] when both lists are empty; a plain 0 when only one is.
#[must_use]
pub fn signature_similarity(list1: &[&Method], list2: &[&Method]) -> Similarity {
    let signatures1: HashSet<&str> = list1.iter().map(|method| method.full_name()).collect();
    let signatures2: HashSet<&str> = list2.iter().map(|method| method.full_name()).collect();
    overlap_similarity(&signatures1, &signatures2)
}

/// Overlap similarity of the distinct class-name sets: `|C1 ∩ C2| / max(|C1|, |C2|)`.
///
/// Same conventions as [`signature_similarity`].
#[must_use]
pub fn class_similarity(list1: &[&Method], list2: &[&Method]) -> Similarity {
    let classes1: HashSet<&str> = list1.iter().map(|method| method.class_name()).collect();
    let classes2: HashSet<&str> = list2.iter().map(|method| method.class_name()).collect();
    overlap_similarity(&classes1, &classes2)
}

fn overlap_similarity(set1: &HashSet<&str>, set2: &HashSet<&str>) -> Similarity {
    let largest = set1.len().max(set2.len());
    if largest == 0 {
        return Similarity::NotApplicable;
    }
    let common = set1.intersection(set2).count();
    Similarity::Score(common as f64 / largest as f64)
}

/// Mean best-match feature similarity of package 1's methods against package 2's.
///
/// For every feature set in `features1`, the maximum Jaccard similarity against all of
/// `features2` (0 when `features2` is empty), averaged over `features1` (0 when `features1` is
/// empty — no features were matched).
///
/// Directional: swapping the arguments changes which side is averaged over and generally changes
/// the result. The pairwise scan is the engine's dominant cost and is sharded by `features1`
/// entry across the rayon pool, each shard accumulating its own maximum.
#[must_use]
pub fn feature_similarity(features1: &[MethodFeatures], features2: &[MethodFeatures]) -> f64 {
    if features1.is_empty() {
        return 0.0;
    }

    let total: f64 = features1
        .par_iter()
        .map(|own| {
            features2
                .iter()
                .map(|candidate| own.jaccard(candidate))
                .fold(0.0, f64::max)
        })
        .sum();

    total / features1.len() as f64
}

/// Ratio of the mean method lengths: `min(avg1, avg2) / max(avg1, avg2)`.
///
/// Two empty lists both average 0 and score 1 — equally trivial inputs are perfectly similar.
#[must_use]
pub fn length_similarity(list1: &[&Method], list2: &[&Method]) -> f64 {
    min_max_ratio(
        mean(list1.iter().map(|method| method.length())),
        mean(list2.iter().map(|method| method.length())),
    )
}

/// Ratio of the mean basic-block counts per method, with the same 0/0 → 1 convention as
/// [`length_similarity`].
#[must_use]
pub fn block_similarity(list1: &[&Method], list2: &[&Method]) -> f64 {
    min_max_ratio(
        mean(list1.iter().map(|method| method.basic_blocks().len())),
        mean(list2.iter().map(|method| method.basic_blocks().len())),
    )
}

fn mean(values: impl ExactSizeIterator<Item = usize>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<usize>() as f64 / count as f64
}

fn min_max_ratio(a: f64, b: f64) -> f64 {
    let largest = a.max(b);
    if largest <= 0.0 {
        return 1.0;
    }
    a.min(b) / largest
}

/// Combine metric outcomes into the overall score: the unweighted arithmetic mean of the
/// applicable components.
///
/// [`Similarity::NotApplicable`] entries contribute to neither numerator nor denominator. The
/// weighting is a design choice, not a statistically fitted one — callers needing weighted trust
/// in specific signals should recompose the five raw scores themselves.
#[must_use]
pub fn aggregate(components: &[Similarity]) -> f64 {
    let mut total = 0.0;
    let mut applicable = 0usize;
    for component in components {
        if let Similarity::Score(score) = component {
            total += score;
            applicable += 1;
        }
    }
    if applicable == 0 {
        return 0.0;
    }
    total / applicable as f64
}
