//! # clonescope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the clonescope library. Import this module to get quick access to the essential
//! pieces for comparing two packages.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all clonescope operations
pub use crate::Error;

/// The result type used throughout clonescope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Compare two loaded code bases
pub use crate::analysis::{compare, compare_paths};

/// Method selection configuration
pub use crate::analysis::MethodFilter;

/// Comparison outcome types
pub use crate::analysis::{ComparisonCounts, ComparisonResult, Similarity};

// ================================================================================================
// Provider Object Model
// ================================================================================================

/// The provider seam and the package object model
pub use crate::model::{CodeAnalyzer, CodeBase, Method, MethodAccessFlags};

/// Builders for assembling code bases
pub use crate::model::{CodeBaseBuilder, MethodBuilder};

/// Arena ids and method body structure
pub use crate::model::{BasicBlock, CallKind, CallTarget, CrossRef, Instruction, MethodId, Operand, StringId};

// ================================================================================================
// Fingerprinting
// ================================================================================================

/// Feature extraction over single methods
pub use crate::analysis::{extract_features, FeatureToken, MethodFeatures};

// ================================================================================================
// Reporting
// ================================================================================================

/// Text rendering of comparison results
pub use crate::report::{render, render_method};
