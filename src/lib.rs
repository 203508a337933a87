// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # clonescope
//!
//! [![Crates.io](https://img.shields.io/crates/v/clonescope.svg)](https://crates.io/crates/clonescope)
//! [![Documentation](https://docs.rs/clonescope/badge.svg)](https://docs.rs/clonescope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/clonescope/blob/main/LICENSE-APACHE)
//!
//! A structural similarity engine that estimates how much internal code two compiled application
//! packages share, for clone, plagiarism and repackaging detection. `clonescope` consumes the
//! output of a disassembler — methods, basic blocks, instructions, cross-references and string
//! constants — reduces every method to a set of hashed structural fingerprints, and scores the
//! pair of packages with five independent similarity signals combined into one overall score.
//!
//! ## Features
//!
//! - **🔍 Structural fingerprints** - Methods hashed into 128-bit feature tokens across four
//!   fact families: signature, API calls, basic-block shape, string constants
//! - **📊 Five independent signals** - Signature overlap, best-match feature similarity, class
//!   overlap, mean-length ratio and mean-block-count ratio, each individually inspectable
//! - **⚡ Parallel scoring** - The quadratic best-match scan shards across the rayon pool
//! - **🧩 Provider-agnostic** - Any disassembler can feed the engine through a small read-only
//!   object model; no package parsing happens in this crate
//! - **🛡️ Degenerate-input safe** - Empty filtered lists, feature-less methods and damaged
//!   string pools are absorbed by explicit metric conventions, never errors
//!
//! ## Quick Start
//!
//! Add `clonescope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! clonescope = "0.1"
//! ```
//!
//! ### Comparing two packages
//!
//! ```rust,no_run
//! use std::path::Path;
//! use clonescope::prelude::*;
//!
//! # fn run(analyzer: &dyn CodeAnalyzer) -> clonescope::Result<()> {
//! // `analyzer` is a Code Analysis Provider: it unpacks and disassembles package files.
//! let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);
//! let result = compare_paths(analyzer, Path::new("a.apk"), Path::new("b.apk"), &filter)?;
//!
//! println!("{}", clonescope::report::render(&result, "a.apk", "b.apk"));
//! println!("overall: {:.4}", result.overall_similarity);
//! # Ok(())
//! # }
//! ```
//!
//! ### Working with loaded code bases
//!
//! ```rust
//! use clonescope::model::{CodeBaseBuilder, MethodBuilder};
//! use clonescope::{compare, MethodFilter};
//!
//! let mut package = CodeBaseBuilder::new("demo.apk");
//! package.method(MethodBuilder::new("Lcom/demo/A;", "f", "()V").finish());
//! let package = package.finish();
//!
//! let result = compare(&package, &package, &MethodFilter::all());
//! assert_eq!(result.overall_similarity, 1.0);
//! ```
//!
//! ## Architecture
//!
//! - [`model`] - The read-only object model a Code Analysis Provider fills in: code bases,
//!   methods, basic blocks, instructions, cross-references and the string-constant pool,
//!   arena-held and borrowed by index
//! - [`analysis`] - The engine: method filter, feature extractor, the five similarity metrics
//!   and the aggregator
//! - [`report`] - Text rendering of results and single-method dumps
//!
//! Both code bases are loaded before any metric runs; the metrics share no mutable state and the
//! five scores are order-independent. The best-match metric averages package 1's methods against
//! their best counterparts in package 2 and is intentionally directional — swapping the packages
//! can change that one score.

pub(crate) mod error;

pub mod analysis;
pub mod model;
pub mod report;

pub mod prelude;

/// The result type used throughout clonescope.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;

pub use analysis::{
    compare, compare_paths, ComparisonCounts, ComparisonResult, MethodFilter, Similarity,
};
pub use model::{CodeAnalyzer, CodeBase, Method, MethodAccessFlags};
