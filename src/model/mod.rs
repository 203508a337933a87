//! Read-only object model for one disassembled application package.
//!
//! This module defines the surface that a Code Analysis Provider — the upstream component that
//! unpacks a package, disassembles its code and resolves cross-references and string constants —
//! exposes to the similarity engine. All data is held in arenas owned by [`CodeBase`]; methods,
//! basic blocks, instructions and cross-references borrow by index instead of pointing at each
//! other, so the object graph has no ownership cycles and nothing in the engine can mutate it.
//!
//! # Key Types
//! - [`CodeBase`] - The internal methods and string-constant pool of one package
//! - [`Method`] - One disassembled method with its blocks, instructions and outgoing calls
//! - [`BasicBlock`] - A straight-line instruction range within a method
//! - [`Instruction`] - A decoded instruction with mnemonic and operand
//! - [`CrossRef`] / [`CallTarget`] - An outgoing call edge and its resolved target
//! - [`MethodAccessFlags`] - Access and modifier flags of a method
//! - [`CodeAnalyzer`] - The provider trait: load a package file into a [`CodeBase`]
//!
//! # Construction
//! Provider implementations and tests build code bases through [`CodeBaseBuilder`] and
//! [`MethodBuilder`]; a finished [`CodeBase`] is immutable for the duration of a comparison run.
//!
//! # Example
//! ```rust
//! use clonescope::model::{CodeBaseBuilder, MethodAccessFlags, MethodBuilder, Operand};
//!
//! let mut builder = CodeBaseBuilder::new("demo.apk");
//! let greeting = builder.string("hello");
//! builder.method(
//!     MethodBuilder::new("Lcom/demo/Main;", "run", "()V")
//!         .access(MethodAccessFlags::PRIVATE)
//!         .instruction("const-string", Operand::String(greeting))
//!         .instruction("return-void", Operand::None)
//!         .finish(),
//! );
//! let codebase = builder.finish();
//! assert_eq!(codebase.internal_methods().len(), 1);
//! ```

mod block;
mod builder;
mod codebase;
mod ids;
mod instruction;
mod method;

pub use block::BasicBlock;
pub use builder::{CodeBaseBuilder, MethodBuilder};
pub use codebase::{CodeAnalyzer, CodeBase};
pub use ids::{MethodId, StringId};
pub use instruction::{Instruction, Operand};
pub use method::{CallKind, CallTarget, CrossRef, Method, MethodAccessFlags};
