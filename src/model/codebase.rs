//! Code base view and the provider trait.
//!
//! A [`CodeBase`] holds everything the similarity engine needs to know about one analyzed
//! package: the ordered arena of internal methods and the string-constant pool. It is produced by
//! a [`CodeAnalyzer`] implementation (or a [`CodeBaseBuilder`](crate::model::CodeBaseBuilder) in
//! tests) and is immutable for the duration of a comparison run.

use std::path::Path;

use crate::{
    model::{CallTarget, Method, MethodId, StringId},
    Error, Result,
};

/// The internal methods and string-constant pool of one analyzed package.
///
/// # Examples
///
/// ```rust
/// use clonescope::model::{CodeBaseBuilder, MethodBuilder};
///
/// let mut builder = CodeBaseBuilder::new("app.apk");
/// builder.method(MethodBuilder::new("La/B;", "f", "()V").finish());
/// let codebase = builder.finish();
///
/// assert_eq!(codebase.name(), "app.apk");
/// for method in codebase.internal_methods() {
///     println!("{}", method.full_name());
/// }
/// ```
#[derive(Debug)]
pub struct CodeBase {
    name: String,
    methods: Vec<Method>,
    strings: Vec<Option<String>>,
}

impl CodeBase {
    pub(crate) fn new(name: String, methods: Vec<Method>, strings: Vec<Option<String>>) -> Self {
        Self {
            name,
            methods,
            strings,
        }
    }

    /// Display name of the analyzed package, typically the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All internal methods of the package, in the provider's order.
    ///
    /// The order carries no meaning for comparison; every metric is set or mean based.
    #[must_use]
    pub fn internal_methods(&self) -> &[Method] {
        &self.methods
    }

    /// Look up a method by arena id.
    ///
    /// Returns `None` for ids that do not resolve in this code base, e.g. ids issued by a
    /// different one.
    #[must_use]
    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.index())
    }

    /// Resolve a string-constant pool reference.
    ///
    /// # Errors
    /// Returns [`Error::StringNotFound`] when the pool slot is out of range or holds no value
    /// (a damaged pool entry).
    pub fn resolve_string(&self, id: StringId) -> Result<&str> {
        self.strings
            .get(id.index())
            .and_then(|slot| slot.as_deref())
            .ok_or(Error::StringNotFound(id))
    }

    /// Number of slots in the string-constant pool, including damaged ones.
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Fully-qualified name of a call target.
    ///
    /// External targets carry their name; internal targets resolve through the method arena.
    /// A dangling internal id yields `None`, which callers treat like any other unresolvable
    /// fact: skip it.
    #[must_use]
    pub fn target_full_name<'a>(&'a self, target: &'a CallTarget) -> Option<&'a str> {
        match target {
            CallTarget::Internal(id) => self.method(*id).map(Method::full_name),
            CallTarget::External(name) => Some(name.as_ref()),
        }
    }
}

/// The Code Analysis Provider seam: load and disassemble one package file.
///
/// Everything upstream of the similarity engine — package unpacking, instruction decoding, basic
/// block construction, cross-reference and string-pool resolution — sits behind this trait.
/// Implementations receive their full configuration (including logging) at construction time;
/// nothing in this crate reads process-wide state.
pub trait CodeAnalyzer {
    /// Analyze the package at `path` and produce its [`CodeBase`].
    ///
    /// # Errors
    /// Fails with [`Error::LoadFailed`] when the file is not a valid package or cannot be
    /// disassembled. The error carries the offending path; a comparison aborts on the first
    /// load failure.
    fn analyze(&self, path: &Path) -> Result<CodeBase>;
}

#[cfg(test)]
mod tests {
    use crate::model::{CodeBaseBuilder, MethodBuilder, StringId};
    use crate::Error;

    #[test]
    fn resolve_string_round_trip() {
        let mut builder = CodeBaseBuilder::new("pool.apk");
        let id = builder.string("token");
        let codebase = builder.finish();

        assert_eq!(codebase.resolve_string(id).unwrap(), "token");
        assert_eq!(codebase.string_count(), 1);
    }

    #[test]
    fn resolve_string_reports_damaged_and_missing_slots() {
        let mut builder = CodeBaseBuilder::new("pool.apk");
        let damaged = builder.missing_string();
        let codebase = builder.finish();

        assert!(matches!(
            codebase.resolve_string(damaged),
            Err(Error::StringNotFound(id)) if id == damaged
        ));
        assert!(matches!(
            codebase.resolve_string(StringId::new(99)),
            Err(Error::StringNotFound(_))
        ));
    }

    #[test]
    fn method_lookup_by_id() {
        let mut builder = CodeBaseBuilder::new("app.apk");
        let id = builder.method(MethodBuilder::new("La;", "f", "()V").finish());
        let codebase = builder.finish();

        assert_eq!(codebase.method(id).unwrap().full_name(), "La; f ()V");
        assert!(codebase
            .method(crate::model::MethodId::new(7))
            .is_none());
    }
}
