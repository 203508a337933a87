//! Method fingerprinting: structural facts hashed into opaque feature tokens.
//!
//! Each method is reduced to a set of [`FeatureToken`]s, one per structural fact, drawn from four
//! tag families:
//!
//! - `signature:<full_name>` - the method's fully-qualified signature
//! - `api_call:<callee_full_name>` - one per distinct cross-reference target
//! - `block:<instruction_count>` - the shape profile of the basic blocks
//! - `string:<value>` - one per resolvable string constant the method loads
//!
//! The tagged text is hashed (128-bit MD5) before insertion, so set operations cost the same per
//! element regardless of how long the underlying strings are, and raw strings are never retained.
//! Cross-family collisions would require equal tagged text and are accepted as a
//! negligible-probability approximation.

use std::collections::HashSet;
use std::fmt;

use md5::{Digest, Md5};
use tracing::debug;

use crate::model::{CodeBase, Method};

/// An opaque 128-bit fingerprint of one tagged structural fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureToken([u8; 16]);

impl FeatureToken {
    /// Hash a tagged textual fact into a token.
    ///
    /// Deterministic: the same input always produces the same token.
    #[must_use]
    pub fn of(fact: &str) -> Self {
        Self(Md5::digest(fact.as_bytes()).into())
    }

    /// The raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for FeatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The feature set of one method.
///
/// May be empty: a method with no instructions, no calls and no blocks contributes nothing beyond
/// its signature only when built through [`extract_features`], but sets constructed directly
/// (e.g. in tests) can be empty, and the Jaccard convention below keeps that case harmless.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodFeatures(HashSet<FeatureToken>);

impl MethodFeatures {
    /// Number of distinct tokens in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `token` is present.
    #[must_use]
    pub fn contains(&self, token: &FeatureToken) -> bool {
        self.0.contains(token)
    }

    /// Jaccard similarity `|A ∩ B| / |A ∪ B|` against another feature set.
    ///
    /// Two empty sets score 0, not 1: a method that exposes no features has matched nothing, and
    /// treating it as a perfect match would inflate scores from degenerate methods.
    #[must_use]
    pub fn jaccard(&self, other: &MethodFeatures) -> f64 {
        let intersection = self.0.intersection(&other.0).count();
        let union = self.0.len() + other.0.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

impl FromIterator<FeatureToken> for MethodFeatures {
    fn from_iter<I: IntoIterator<Item = FeatureToken>>(tokens: I) -> Self {
        Self(tokens.into_iter().collect())
    }
}

/// Derive the feature set of one method.
///
/// Deterministic over unchanged input: calling this twice yields identical token sets. Facts that
/// fail to resolve — a string-load whose pool entry is missing, a call whose internal target id
/// dangles — are skipped individually; one damaged reference never discards the rest of the
/// method's features.
#[must_use]
pub fn extract_features(codebase: &CodeBase, method: &Method) -> MethodFeatures {
    let mut tokens = HashSet::new();

    tokens.insert(FeatureToken::of(&format!(
        "signature:{}",
        method.full_name()
    )));

    for xref in method.cross_references_out() {
        match codebase.target_full_name(&xref.target) {
            Some(callee) => {
                tokens.insert(FeatureToken::of(&format!("api_call:{callee}")));
            }
            None => {
                debug!(
                    method = method.full_name(),
                    site = xref.site,
                    "skipping cross-reference with unresolvable target"
                );
            }
        }
    }

    for block in method.basic_blocks() {
        tokens.insert(FeatureToken::of(&format!(
            "block:{}",
            block.instruction_count()
        )));
    }

    for instruction in method.instructions() {
        let Some(id) = instruction.string_ref() else {
            continue;
        };
        match codebase.resolve_string(id) {
            Ok(value) => {
                tokens.insert(FeatureToken::of(&format!("string:{value}")));
            }
            Err(error) => {
                debug!(
                    method = method.full_name(),
                    offset = instruction.offset,
                    %error,
                    "skipping unresolvable string constant"
                );
            }
        }
    }

    MethodFeatures(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CallKind, CallTarget, CodeBaseBuilder, MethodBuilder, MethodId, Operand,
    };

    #[test]
    fn token_hashing_is_md5() {
        // Well-known digest of the empty input.
        assert_eq!(
            FeatureToken::of("").to_string(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(FeatureToken::of("").as_bytes()[0], 0xd4);
        assert_eq!(FeatureToken::of("a"), FeatureToken::of("a"));
        assert_ne!(FeatureToken::of("a"), FeatureToken::of("b"));
    }

    #[test]
    fn tag_families_do_not_collide() {
        assert_ne!(FeatureToken::of("api_call:x"), FeatureToken::of("string:x"));
        assert_ne!(FeatureToken::of("block:2"), FeatureToken::of("string:2"));
    }

    #[test]
    fn extraction_covers_all_four_families() {
        let mut builder = CodeBaseBuilder::new("app.apk");
        let greeting = builder.string("hello");
        let method = builder.method(
            MethodBuilder::new("Lcom/app/A;", "f", "()V")
                .instruction("const-string", Operand::String(greeting))
                .instruction("if-eqz", Operand::Target(3))
                .block_break()
                .instruction("return-void", Operand::None)
                .call(CallKind::Virtual, CallTarget::external("Lx/Y; g ()V"), 1)
                .finish(),
        );
        let codebase = builder.finish();
        let method = codebase.method(method).unwrap();

        let features = extract_features(&codebase, method);
        assert!(features.contains(&FeatureToken::of("signature:Lcom/app/A; f ()V")));
        assert!(features.contains(&FeatureToken::of("api_call:Lx/Y; g ()V")));
        assert!(features.contains(&FeatureToken::of("block:2")));
        assert!(features.contains(&FeatureToken::of("block:1")));
        assert!(features.contains(&FeatureToken::of("string:hello")));
        assert_eq!(features.len(), 5);
    }

    #[test]
    fn duplicate_facts_collapse() {
        let callee = CallTarget::external("Lx/Y; g ()V");
        let mut builder = CodeBaseBuilder::new("app.apk");
        let method = builder.method(
            MethodBuilder::new("Lcom/app/A;", "f", "()V")
                // Two blocks with one instruction each produce a single block:1 token.
                .instruction("nop", Operand::None)
                .block_break()
                .instruction("return-void", Operand::None)
                .call(CallKind::Virtual, callee.clone(), 0)
                .call(CallKind::Direct, callee, 1)
                .finish(),
        );
        let codebase = builder.finish();

        let features = extract_features(&codebase, codebase.method(method).unwrap());
        // signature + one api_call + one block token
        assert_eq!(features.len(), 3);
    }

    #[test]
    fn unresolvable_facts_are_skipped_not_fatal() {
        let mut builder = CodeBaseBuilder::new("app.apk");
        let damaged = builder.missing_string();
        let intact = builder.string("kept");
        let method = builder.method(
            MethodBuilder::new("Lcom/app/A;", "f", "()V")
                .instruction("const-string", Operand::String(damaged))
                .instruction("const-string", Operand::String(intact))
                .call(
                    CallKind::Direct,
                    CallTarget::Internal(MethodId::new(500)),
                    0,
                )
                .finish(),
        );
        let codebase = builder.finish();

        let features = extract_features(&codebase, codebase.method(method).unwrap());
        // signature + block:2 + string:kept; the damaged string and dangling call are dropped
        assert_eq!(features.len(), 3);
        assert!(features.contains(&FeatureToken::of("string:kept")));
    }

    #[test]
    fn extraction_is_deterministic() {
        let mut builder = CodeBaseBuilder::new("app.apk");
        let s = builder.string("v");
        let method = builder.method(
            MethodBuilder::new("Lcom/app/A;", "f", "()V")
                .instruction("const-string", Operand::String(s))
                .finish(),
        );
        let codebase = builder.finish();
        let method = codebase.method(method).unwrap();

        assert_eq!(
            extract_features(&codebase, method),
            extract_features(&codebase, method)
        );
    }

    #[test]
    fn jaccard_conventions() {
        let x = FeatureToken::of("x");
        let y = FeatureToken::of("y");
        let z = FeatureToken::of("z");

        let a: MethodFeatures = [x, y].into_iter().collect();
        let b: MethodFeatures = [x, y, z].into_iter().collect();
        let empty = MethodFeatures::default();

        assert!((a.jaccard(&b) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(a.jaccard(&a), 1.0);
        assert_eq!(a.jaccard(&empty), 0.0);
        // Empty against empty is 0 by convention, not 1.
        assert_eq!(empty.jaccard(&empty), 0.0);
    }
}
