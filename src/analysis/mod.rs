//! The similarity engine: method filtering, fingerprinting, metrics and aggregation.
//!
//! Given two loaded [`CodeBase`](crate::CodeBase)s, the engine selects the methods to compare
//! (namespace and modifier filter), reduces each method to a set of hashed structural facts, and
//! scores the pair with five independent signals — signature overlap, best-match feature
//! similarity, class overlap, mean-length ratio and mean-block-count ratio — combined into one
//! overall score by unweighted mean.
//!
//! # Key Types
//! - [`MethodFilter`] - Which methods participate in comparison
//! - [`FeatureToken`] / [`MethodFeatures`] - Hashed structural fingerprints of one method
//! - [`Similarity`] - A metric outcome: a score in `[0, 1]` or not-applicable
//! - [`ComparisonResult`] - The five component scores, the aggregate, and the counts
//!
//! # Main Functions
//! - [`compare`] - Compare two loaded code bases under a filter
//! - [`compare_paths`] - Load two packages through a provider, then compare
//! - [`extract_features`] - Fingerprint one method
//! - The five metrics and [`aggregate`], for callers recomposing scores themselves
//!
//! # Example
//! ```rust
//! use clonescope::model::{CodeBaseBuilder, MethodAccessFlags, MethodBuilder};
//! use clonescope::{compare, MethodFilter};
//!
//! let mut original = CodeBaseBuilder::new("original.apk");
//! original.method(
//!     MethodBuilder::new("Lcom/app/Core;", "sync", "()V")
//!         .access(MethodAccessFlags::PRIVATE)
//!         .finish(),
//! );
//! let original = original.finish();
//!
//! let mut suspect = CodeBaseBuilder::new("suspect.apk");
//! suspect.method(
//!     MethodBuilder::new("Lcom/app/Core;", "sync", "()V")
//!         .access(MethodAccessFlags::PRIVATE)
//!         .finish(),
//! );
//! let suspect = suspect.finish();
//!
//! let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);
//! let result = compare(&original, &suspect, &filter);
//! assert_eq!(result.overall_similarity, 1.0);
//! ```

mod compare;
mod features;
mod filter;
mod metrics;

pub use compare::{compare, compare_paths, ComparisonCounts, ComparisonResult};
pub use features::{extract_features, FeatureToken, MethodFeatures};
pub use filter::MethodFilter;
pub use metrics::{
    aggregate, block_similarity, class_similarity, feature_similarity, length_similarity,
    signature_similarity, Similarity,
};
