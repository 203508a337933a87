//! The comparison pipeline: filter, fingerprint, score, aggregate.
//!
//! [`compare`] is the engine's entry point for two already-loaded code bases;
//! [`compare_paths`] additionally drives a [`CodeAnalyzer`] to load both packages first and
//! aborts on the first load failure. Both code bases are fully loaded before any metric runs;
//! per-method feature sets are extracted once per side (in parallel) and read-only afterwards,
//! so the five metrics can execute in any order without shared mutable state.

use std::collections::HashSet;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::{
    analysis::{
        extract_features, metrics, MethodFeatures, MethodFilter, Similarity,
    },
    model::{CodeAnalyzer, CodeBase, Method},
    Result,
};

/// Intermediate counts of one comparison, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonCounts {
    /// Filtered method count of package 1
    pub method_count1: usize,
    /// Filtered method count of package 2
    pub method_count2: usize,
    /// Number of method signatures present in both filtered lists
    pub common_signatures: usize,
    /// Number of distinct class names present in both filtered lists
    pub common_classes: usize,
}

/// The outcome of comparing two code bases: five component scores, their aggregate, and the
/// intermediate counts.
///
/// The component scores stay individually inspectable; the overall score is their unweighted
/// mean, with [`Similarity::NotApplicable`] components excluded from the denominator.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Overlap of the method-signature sets (`n/a` when both filtered lists are empty)
    pub signature_similarity: Similarity,
    /// Mean best-match feature similarity of package 1's methods against package 2's
    pub feature_similarity: f64,
    /// Overlap of the distinct class-name sets (`n/a` when both filtered lists are empty)
    pub class_similarity: Similarity,
    /// Ratio of the mean method lengths
    pub length_similarity: f64,
    /// Ratio of the mean basic-block counts per method
    pub block_similarity: f64,
    /// Unweighted mean of the applicable component scores
    pub overall_similarity: f64,
    /// Intermediate counts, for reporting
    pub counts: ComparisonCounts,
}

/// Compare two loaded code bases under a method filter.
///
/// Pure and infallible: degenerate inputs (empty filtered lists, feature-less methods, damaged
/// string-pool entries) are absorbed by the metric conventions and never surface as errors.
///
/// # Examples
///
/// ```rust
/// use clonescope::model::{CodeBaseBuilder, MethodBuilder};
/// use clonescope::{compare, MethodFilter};
///
/// let mut a = CodeBaseBuilder::new("a.apk");
/// a.method(MethodBuilder::new("Lapp/M;", "f", "()V").finish());
/// let a = a.finish();
///
/// let result = compare(&a, &a, &MethodFilter::all());
/// assert_eq!(result.overall_similarity, 1.0);
/// ```
#[must_use]
pub fn compare(
    codebase1: &CodeBase,
    codebase2: &CodeBase,
    filter: &MethodFilter,
) -> ComparisonResult {
    let _span = debug_span!(
        "compare",
        package1 = codebase1.name(),
        package2 = codebase2.name()
    )
    .entered();

    let list1 = filter.apply(codebase1);
    let list2 = filter.apply(codebase2);
    debug!(
        methods1 = list1.len(),
        methods2 = list2.len(),
        "filtered internal methods"
    );

    let signature_similarity = metrics::signature_similarity(&list1, &list2);
    let class_similarity = metrics::class_similarity(&list1, &list2);

    // Memoized once per side; the best-match scan below only reads them.
    let features1 = extract_all(codebase1, &list1);
    let features2 = extract_all(codebase2, &list2);
    let feature_similarity = metrics::feature_similarity(&features1, &features2);

    let length_similarity = metrics::length_similarity(&list1, &list2);
    let block_similarity = metrics::block_similarity(&list1, &list2);

    let overall_similarity = metrics::aggregate(&[
        signature_similarity,
        Similarity::Score(feature_similarity),
        class_similarity,
        Similarity::Score(length_similarity),
        Similarity::Score(block_similarity),
    ]);

    debug!(
        %signature_similarity,
        feature_similarity,
        %class_similarity,
        length_similarity,
        block_similarity,
        overall_similarity,
        "similarity scores"
    );

    ComparisonResult {
        signature_similarity,
        feature_similarity,
        class_similarity,
        length_similarity,
        block_similarity,
        overall_similarity,
        counts: count_overlaps(&list1, &list2),
    }
}

/// Load both packages through the provider, then compare them.
///
/// # Errors
/// Propagates the provider's [`Error::LoadFailed`](crate::Error::LoadFailed) for the first
/// package that fails to load; no partial result is produced.
pub fn compare_paths<A: CodeAnalyzer + ?Sized>(
    analyzer: &A,
    path1: &Path,
    path2: &Path,
    filter: &MethodFilter,
) -> Result<ComparisonResult> {
    let codebase1 = analyzer.analyze(path1)?;
    let codebase2 = analyzer.analyze(path2)?;
    Ok(compare(&codebase1, &codebase2, filter))
}

fn extract_all(codebase: &CodeBase, list: &[&Method]) -> Vec<MethodFeatures> {
    list.par_iter()
        .map(|method| extract_features(codebase, method))
        .collect()
}

fn count_overlaps(list1: &[&Method], list2: &[&Method]) -> ComparisonCounts {
    let signatures1: HashSet<&str> = list1.iter().map(|method| method.full_name()).collect();
    let signatures2: HashSet<&str> = list2.iter().map(|method| method.full_name()).collect();
    let classes1: HashSet<&str> = list1.iter().map(|method| method.class_name()).collect();
    let classes2: HashSet<&str> = list2.iter().map(|method| method.class_name()).collect();

    ComparisonCounts {
        method_count1: list1.len(),
        method_count2: list2.len(),
        common_signatures: signatures1.intersection(&signatures2).count(),
        common_classes: classes1.intersection(&classes2).count(),
    }
}
