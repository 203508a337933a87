//! Method selection for comparison.
//!
//! The filter decides *which* methods of a code base participate in comparison, decoupled from
//! *how* they are compared. The typical configuration restricts comparison to the application's
//! own namespace and to non-public methods, which obfuscators and repackagers are least likely to
//! have renamed consistently.

use crate::model::{CodeBase, Method, MethodAccessFlags};

/// Selects the methods of a code base that participate in comparison.
///
/// A method passes when its class name starts with the configured namespace prefix and its access
/// flags contain every required modifier. Matching is a pure predicate with no failure modes; an
/// empty result is legal and every metric tolerates it.
///
/// # Examples
///
/// ```rust
/// use clonescope::model::{MethodAccessFlags, MethodBuilder};
/// use clonescope::MethodFilter;
///
/// let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);
///
/// let internal = MethodBuilder::new("Lcom/app/Core;", "tick", "()V")
///     .access(MethodAccessFlags::PRIVATE | MethodAccessFlags::FINAL)
///     .finish();
/// assert!(filter.matches(&internal));
///
/// let library = MethodBuilder::new("Lokhttp3/Call;", "run", "()V")
///     .access(MethodAccessFlags::PRIVATE)
///     .finish();
/// assert!(!filter.matches(&library));
/// ```
#[derive(Debug, Clone)]
pub struct MethodFilter {
    namespace: String,
    required_access: MethodAccessFlags,
}

impl MethodFilter {
    /// Create a filter requiring a class-name prefix and a set of access modifiers.
    #[must_use]
    pub fn new(namespace: &str, required_access: MethodAccessFlags) -> Self {
        Self {
            namespace: namespace.to_string(),
            required_access,
        }
    }

    /// A filter that accepts every method: empty namespace prefix, no required modifiers.
    #[must_use]
    pub fn all() -> Self {
        Self::new("", MethodAccessFlags::empty())
    }

    /// The configured class-name prefix.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The configured required modifiers.
    #[must_use]
    pub fn required_access(&self) -> MethodAccessFlags {
        self.required_access
    }

    /// Whether `method` participates in comparison.
    #[must_use]
    pub fn matches(&self, method: &Method) -> bool {
        method.class_name().starts_with(&self.namespace)
            && method.access().contains(self.required_access)
    }

    /// The filtered view of a code base's internal methods, preserving provider order.
    #[must_use]
    pub fn apply<'a>(&self, codebase: &'a CodeBase) -> Vec<&'a Method> {
        codebase
            .internal_methods()
            .iter()
            .filter(|method| self.matches(method))
            .collect()
    }
}

impl Default for MethodFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeBaseBuilder, MethodBuilder};

    fn method(class_name: &str, name: &str, access: MethodAccessFlags) -> crate::model::Method {
        MethodBuilder::new(class_name, name, "()V")
            .access(access)
            .finish()
    }

    #[test]
    fn requires_namespace_prefix_and_modifiers() {
        let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);

        assert!(filter.matches(&method(
            "Lcom/app/Main;",
            "f",
            MethodAccessFlags::PRIVATE | MethodAccessFlags::STATIC
        )));
        assert!(!filter.matches(&method("Lcom/app/Main;", "g", MethodAccessFlags::PUBLIC)));
        assert!(!filter.matches(&method(
            "Lcom/other/Main;",
            "h",
            MethodAccessFlags::PRIVATE
        )));
    }

    #[test]
    fn all_accepts_everything() {
        let filter = MethodFilter::all();
        assert!(filter.matches(&method("Lx/Y;", "f", MethodAccessFlags::empty())));
        assert!(filter.matches(&method("Lx/Y;", "g", MethodAccessFlags::PUBLIC)));
    }

    #[test]
    fn configuration_is_inspectable() {
        let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);
        assert_eq!(filter.namespace(), "Lcom/app/");
        assert_eq!(filter.required_access(), MethodAccessFlags::PRIVATE);

        let permissive = MethodFilter::default();
        assert_eq!(permissive.namespace(), "");
        assert_eq!(permissive.required_access(), MethodAccessFlags::empty());
    }

    #[test]
    fn apply_preserves_provider_order() {
        let mut builder = CodeBaseBuilder::new("app.apk");
        builder.method(method("Lcom/app/A;", "first", MethodAccessFlags::PRIVATE));
        builder.method(method("Lother/B;", "skipped", MethodAccessFlags::PRIVATE));
        builder.method(method("Lcom/app/C;", "second", MethodAccessFlags::PRIVATE));
        let codebase = builder.finish();

        let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);
        let names: Vec<_> = filter
            .apply(&codebase)
            .iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
