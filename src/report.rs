//! Human-readable rendering of comparison results.
//!
//! The report emitter turns a [`ComparisonResult`] into the five numbered sections with their
//! intermediate counts and 4-decimal scores, and can dump a single method for inspection. Both
//! functions are pure string rendering — printing, colouring and CLI concerns stay with the
//! caller.

use std::fmt::Write;

use crate::{ComparisonResult, Method};

/// Render a comparison result as a sectioned text report.
///
/// `package1` and `package2` are display names for the two compared packages, typically their
/// file names.
///
/// # Examples
///
/// ```rust
/// use clonescope::model::{CodeBaseBuilder, MethodBuilder};
/// use clonescope::{compare, report, MethodFilter};
///
/// let mut a = CodeBaseBuilder::new("a.apk");
/// a.method(MethodBuilder::new("Lapp/M;", "f", "()V").finish());
/// let a = a.finish();
///
/// let result = compare(&a, &a, &MethodFilter::all());
/// let text = report::render(&result, a.name(), a.name());
/// assert!(text.contains("overall similarity:   1.0000"));
/// ```
#[must_use]
pub fn render(result: &ComparisonResult, package1: &str, package2: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Comparing {package1} and {package2}");
    let _ = writeln!(out);

    let _ = writeln!(out, "1. Method signatures:");
    let _ = writeln!(
        out,
        "   methods in {package1}: {}",
        result.counts.method_count1
    );
    let _ = writeln!(
        out,
        "   methods in {package2}: {}",
        result.counts.method_count2
    );
    let _ = writeln!(
        out,
        "   common signatures:    {}",
        result.counts.common_signatures
    );
    let _ = writeln!(
        out,
        "   signature similarity: {}",
        result.signature_similarity
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "2. Method features:");
    let _ = writeln!(
        out,
        "   feature similarity:   {:.4}",
        result.feature_similarity
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "3. Classes:");
    let _ = writeln!(
        out,
        "   common classes:       {}",
        result.counts.common_classes
    );
    let _ = writeln!(out, "   class similarity:     {}", result.class_similarity);
    let _ = writeln!(out);

    let _ = writeln!(out, "4. Method lengths:");
    let _ = writeln!(
        out,
        "   length similarity:    {:.4}",
        result.length_similarity
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "5. Basic blocks:");
    let _ = writeln!(
        out,
        "   block similarity:     {:.4}",
        result.block_similarity
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "overall similarity:   {:.4}",
        result.overall_similarity
    );

    out
}

/// Render one method for inspection: class, signature, modifiers and mnemonic body.
#[must_use]
pub fn render_method(method: &Method) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "class_name:\n{}", method.class_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "signature:\n{}", method.full_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "access:\n{}", method.access().names());
    let _ = writeln!(out);
    let _ = writeln!(out, "body:\n{}", method.body_text());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeBaseBuilder, MethodAccessFlags, MethodBuilder, Operand};
    use crate::{compare, MethodFilter};

    #[test]
    fn report_carries_counts_and_scores() {
        let mut a = CodeBaseBuilder::new("a.apk");
        a.method(
            MethodBuilder::new("Lapp/M;", "f", "()V")
                .instruction("nop", Operand::None)
                .finish(),
        );
        let a = a.finish();

        let result = compare(&a, &a, &MethodFilter::all());
        let text = render(&result, "a.apk", "a.apk");

        assert!(text.contains("methods in a.apk: 1"));
        assert!(text.contains("common signatures:    1"));
        assert!(text.contains("signature similarity: 1.0000"));
        assert!(text.contains("overall similarity:   1.0000"));
    }

    #[test]
    fn not_applicable_renders_as_sentinel() {
        let empty = CodeBaseBuilder::new("empty.apk").finish();
        let result = compare(&empty, &empty, &MethodFilter::all());
        let text = render(&result, "empty.apk", "empty.apk");

        assert!(text.contains("signature similarity: n/a"));
        assert!(text.contains("class similarity:     n/a"));
    }

    #[test]
    fn method_dump_lists_identity_and_body() {
        let method = MethodBuilder::new("Lapp/M;", "f", "(I)V")
            .access(MethodAccessFlags::PRIVATE | MethodAccessFlags::STATIC)
            .instruction("const/4", Operand::Immediate(0))
            .instruction("return-void", Operand::None)
            .finish();

        let text = render_method(&method);
        assert!(text.contains("Lapp/M; f (I)V"));
        assert!(text.contains("private static"));
        assert!(text.contains("const/4 return-void"));
    }
}
