//! Decoded instruction representation.
//!
//! Instructions are produced by the upstream disassembler and stored per method. The engine only
//! cares about the mnemonic (for body rendering) and about string-load operands, which reference
//! the owning code base's string-constant pool.

use std::sync::Arc;

use crate::model::StringId;

/// The operand of a decoded [`Instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The instruction takes no operand
    None,
    /// An immediate integer value
    Immediate(i64),
    /// A branch target, as an absolute code offset
    Target(u64),
    /// A reference into the owning code base's string-constant pool
    String(StringId),
}

/// A single decoded instruction inside a method body.
///
/// # Examples
///
/// ```rust
/// use clonescope::model::{Instruction, Operand, StringId};
///
/// let instruction = Instruction::new(0, "const-string", Operand::String(StringId::new(3)));
/// assert_eq!(instruction.mnemonic.as_ref(), "const-string");
/// assert_eq!(instruction.string_ref(), Some(StringId::new(3)));
/// ```
#[derive(Debug, Clone)]
pub struct Instruction {
    /// Code offset of this instruction within the method body
    pub offset: u64,
    /// Human-readable instruction mnemonic (e.g. "const-string", "invoke-virtual")
    pub mnemonic: Arc<str>,
    /// The operand data for this instruction
    pub operand: Operand,
}

impl Instruction {
    /// Create an instruction from its decoded parts.
    #[must_use]
    pub fn new(offset: u64, mnemonic: &str, operand: Operand) -> Self {
        Self {
            offset,
            mnemonic: Arc::from(mnemonic),
            operand,
        }
    }

    /// The string-constant pool reference of this instruction, if it is a string load.
    #[must_use]
    pub fn string_ref(&self) -> Option<StringId> {
        match self.operand {
            Operand::String(id) => Some(id),
            _ => None,
        }
    }
}
