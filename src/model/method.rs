//! Method representation: access flags, identity, body structure and outgoing calls.
//!
//! A [`Method`] is a read-only view over one disassembled method, sourced once per comparison run
//! from the Code Analysis Provider. It carries the attributes the similarity engine consumes:
//! the fully-qualified signature, access flags, decoded instructions, basic-block ranges and
//! outgoing cross-references.
//!
//! # Key Types
//! - [`Method`] - One disassembled method
//! - [`MethodAccessFlags`] - Access and modifier flags
//! - [`CrossRef`], [`CallTarget`], [`CallKind`] - Outgoing call edges

use std::sync::{Arc, OnceLock};

use bitflags::bitflags;

use crate::model::{BasicBlock, Instruction, MethodId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Access and modifier flags of a method, using Dalvik-style flag values.
    pub struct MethodAccessFlags: u32 {
        /// Visible everywhere
        const PUBLIC = 0x0001;
        /// Visible only to the defining class
        const PRIVATE = 0x0002;
        /// Visible to the defining class and its subclasses
        const PROTECTED = 0x0004;
        /// Defined on the class, not per instance
        const STATIC = 0x0008;
        /// Method cannot be overridden
        const FINAL = 0x0010;
        /// Associated lock is taken around invocation
        const SYNCHRONIZED = 0x0020;
        /// Compiler-generated bridge method
        const BRIDGE = 0x0040;
        /// Last argument is a variadic rest argument
        const VARARGS = 0x0080;
        /// Implemented in native code
        const NATIVE = 0x0100;
        /// Method provides no implementation
        const ABSTRACT = 0x0400;
        /// Strict floating-point semantics
        const STRICT = 0x0800;
        /// Not directly present in the source code
        const SYNTHETIC = 0x1000;
        /// Constructor method
        const CONSTRUCTOR = 0x10000;
        /// Synchronized declared in source, not enforced by the runtime
        const DECLARED_SYNCHRONIZED = 0x20000;
    }
}

impl MethodAccessFlags {
    /// Render the set flags as lowercase modifier names, e.g. `"private static"`.
    ///
    /// Names follow the source-level spelling, so `DECLARED_SYNCHRONIZED` renders as
    /// `declared-synchronized`. An empty flag set renders as an empty string.
    #[must_use]
    pub fn names(&self) -> String {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase().replace('_', "-"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Dispatch kind of an outgoing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Direct invocation of a known method
    Direct,
    /// Virtual dispatch through the receiver's class
    Virtual,
    /// Static invocation, no receiver
    Static,
    /// Invocation of the superclass implementation
    Super,
    /// Dispatch through an interface
    Interface,
}

/// The resolved target of an outgoing call.
///
/// Calls into the analyzed package resolve to a method in the owning code base's arena; calls out
/// of it (framework and library APIs) carry the callee's fully-qualified name instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// A method of the analyzed package, by arena id
    Internal(MethodId),
    /// A method outside the analyzed package, by fully-qualified name
    External(Arc<str>),
}

impl CallTarget {
    /// Convenience constructor for an external target by fully-qualified name.
    #[must_use]
    pub fn external(full_name: &str) -> Self {
        Self::External(Arc::from(full_name))
    }
}

/// One outgoing cross-reference from a method to a callee.
#[derive(Debug, Clone)]
pub struct CrossRef {
    /// Dispatch kind of the call
    pub kind: CallKind,
    /// The resolved callee
    pub target: CallTarget,
    /// Code offset of the call site within the caller's body
    pub site: u64,
}

/// One disassembled method of an analyzed package.
///
/// Identified by its fully-qualified signature (owning class, name and descriptor). The method
/// owns its decoded instructions; basic blocks are ranges into that instruction sequence, and
/// cross-references point at callees by id or name. Instances are built through
/// [`MethodBuilder`](crate::model::MethodBuilder) and never mutated afterwards.
///
/// # Examples
///
/// ```rust
/// use clonescope::model::{MethodAccessFlags, MethodBuilder, Operand};
///
/// let method = MethodBuilder::new("Lcom/demo/Main;", "run", "()V")
///     .access(MethodAccessFlags::PRIVATE | MethodAccessFlags::STATIC)
///     .instruction("nop", Operand::None)
///     .instruction("return-void", Operand::None)
///     .finish();
///
/// assert_eq!(method.full_name(), "Lcom/demo/Main; run ()V");
/// assert_eq!(method.length(), 2);
/// assert_eq!(method.basic_blocks().len(), 1);
/// ```
#[derive(Debug)]
pub struct Method {
    class_name: String,
    name: String,
    descriptor: String,
    full_name: String,
    access: MethodAccessFlags,
    code_size: Option<usize>,
    instructions: Vec<Instruction>,
    blocks: Vec<BasicBlock>,
    xrefs: Vec<CrossRef>,
    length: OnceLock<usize>,
}

impl Method {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        class_name: String,
        name: String,
        descriptor: String,
        access: MethodAccessFlags,
        code_size: Option<usize>,
        instructions: Vec<Instruction>,
        blocks: Vec<BasicBlock>,
        xrefs: Vec<CrossRef>,
    ) -> Self {
        let full_name = format!("{class_name} {name} {descriptor}");
        Self {
            class_name,
            name,
            descriptor,
            full_name,
            access,
            code_size,
            instructions,
            blocks,
            xrefs,
            length: OnceLock::new(),
        }
    }

    /// Name of the owning class, e.g. `"Lcom/demo/Main;"`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Simple method name, without class or descriptor.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter-and-return descriptor, e.g. `"(I)V"`.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Canonical fully-qualified signature: class name, method name and descriptor.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Access and modifier flags.
    #[must_use]
    pub fn access(&self) -> MethodAccessFlags {
        self.access
    }

    /// Length of this method, lazily computed on first access.
    ///
    /// Uses the code byte size reported by the disassembler when available, otherwise the number
    /// of decoded instructions. Both bases are consistent within one comparison run, since both
    /// packages come from the same provider.
    #[must_use]
    pub fn length(&self) -> usize {
        *self
            .length
            .get_or_init(|| self.code_size.unwrap_or(self.instructions.len()))
    }

    /// The basic blocks of this method, in code order.
    #[must_use]
    pub fn basic_blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    /// The decoded instructions of this method, in code order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Outgoing cross-references of this method, one per call site.
    #[must_use]
    pub fn cross_references_out(&self) -> &[CrossRef] {
        &self.xrefs
    }

    /// Render the method body as its space-joined mnemonic sequence.
    ///
    /// Used by the report emitter's method inspection; an empty body renders as an empty string.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.instructions
            .iter()
            .map(|instruction| instruction.mnemonic.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
