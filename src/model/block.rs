//! Basic block representation.
//!
//! A basic block is a straight-line run of instructions with no internal control transfer. Blocks
//! do not own their instructions; each block is a range into the owning method's instruction
//! arena. The similarity engine only consumes the instruction count, which feeds the
//! `block:<count>` feature family and the mean-block-count metric.

use std::ops::Range;

use crate::model::{Instruction, Method};

/// A straight-line instruction range within one [`Method`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    instructions: Range<usize>,
}

impl BasicBlock {
    pub(crate) fn new(instructions: Range<usize>) -> Self {
        Self { instructions }
    }

    /// Number of instructions in this block.
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// The index range this block covers in the owning method's instruction sequence.
    #[must_use]
    pub fn instruction_range(&self) -> Range<usize> {
        self.instructions.clone()
    }

    /// The instructions of this block, borrowed from the owning method.
    ///
    /// # Arguments
    /// * `method` - The method this block belongs to
    #[must_use]
    pub fn instructions<'a>(&self, method: &'a Method) -> &'a [Instruction] {
        &method.instructions()[self.instructions.clone()]
    }
}
