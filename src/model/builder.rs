//! Fluent builders for assembling code bases.
//!
//! Provider implementations translate their disassembly results into the engine's object model
//! through these builders; tests use them to assemble synthetic packages without any file
//! parsing. A finished [`CodeBase`] is immutable.
//!
//! # Example
//! ```rust
//! use clonescope::model::{
//!     CallKind, CallTarget, CodeBaseBuilder, MethodAccessFlags, MethodBuilder, Operand,
//! };
//!
//! let mut builder = CodeBaseBuilder::new("app.apk");
//! let tag = builder.string("startup");
//! builder.method(
//!     MethodBuilder::new("Lcom/app/Boot;", "init", "()V")
//!         .access(MethodAccessFlags::PRIVATE)
//!         .instruction("const-string", Operand::String(tag))
//!         .instruction("if-eqz", Operand::Target(0x08))
//!         .block_break()
//!         .instruction("return-void", Operand::None)
//!         .call(CallKind::Static, CallTarget::external("Landroid/util/Log; d (II)I"), 2)
//!         .finish(),
//! );
//! let codebase = builder.finish();
//!
//! let method = &codebase.internal_methods()[0];
//! assert_eq!(method.basic_blocks().len(), 2);
//! ```

use crate::model::{
    BasicBlock, CallKind, CallTarget, CodeBase, CrossRef, Instruction, Method, MethodAccessFlags,
    MethodId, Operand, StringId,
};

/// Builder for one [`Method`].
///
/// Instructions are appended in code order; [`block_break`](Self::block_break) marks the start of
/// a new basic block before the next instruction. [`finish`](Self::finish) derives the block
/// ranges — a method without instructions has no blocks.
#[derive(Debug)]
pub struct MethodBuilder {
    class_name: String,
    name: String,
    descriptor: String,
    access: MethodAccessFlags,
    code_size: Option<usize>,
    instructions: Vec<Instruction>,
    block_starts: Vec<usize>,
    xrefs: Vec<CrossRef>,
}

impl MethodBuilder {
    /// Start building a method identified by class name, method name and descriptor.
    #[must_use]
    pub fn new(class_name: &str, name: &str, descriptor: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access: MethodAccessFlags::empty(),
            code_size: None,
            instructions: Vec::new(),
            block_starts: Vec::new(),
            xrefs: Vec::new(),
        }
    }

    /// Set the access and modifier flags.
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Record the code byte size reported by the disassembler.
    ///
    /// When set, [`Method::length`] uses it; otherwise the instruction count stands in.
    #[must_use]
    pub fn code_size(mut self, size: usize) -> Self {
        self.code_size = Some(size);
        self
    }

    /// Append an instruction to the current basic block.
    ///
    /// The instruction's offset is its position in the sequence; providers that track real byte
    /// offsets can construct [`Instruction`] values directly and push them the same way.
    #[must_use]
    pub fn instruction(mut self, mnemonic: &str, operand: Operand) -> Self {
        let offset = self.instructions.len() as u64;
        self.instructions.push(Instruction::new(offset, mnemonic, operand));
        self
    }

    /// Start a new basic block before the next appended instruction.
    #[must_use]
    pub fn block_break(mut self) -> Self {
        self.block_starts.push(self.instructions.len());
        self
    }

    /// Record an outgoing call to `target` from the call site at `site`.
    #[must_use]
    pub fn call(mut self, kind: CallKind, target: CallTarget, site: u64) -> Self {
        self.xrefs.push(CrossRef { kind, target, site });
        self
    }

    /// Finish the method, deriving basic-block ranges from the recorded breaks.
    #[must_use]
    pub fn finish(self) -> Method {
        let blocks = derive_blocks(self.instructions.len(), &self.block_starts);
        Method::new(
            self.class_name,
            self.name,
            self.descriptor,
            self.access,
            self.code_size,
            self.instructions,
            blocks,
            self.xrefs,
        )
    }
}

/// Partition `0..instruction_count` into block ranges at the recorded starts.
fn derive_blocks(instruction_count: usize, block_starts: &[usize]) -> Vec<BasicBlock> {
    if instruction_count == 0 {
        return Vec::new();
    }

    let mut starts: Vec<usize> = std::iter::once(0)
        .chain(block_starts.iter().copied())
        .filter(|&start| start < instruction_count)
        .collect();
    starts.sort_unstable();
    starts.dedup();

    starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let end = starts.get(index + 1).copied().unwrap_or(instruction_count);
            BasicBlock::new(start..end)
        })
        .collect()
}

/// Builder for one [`CodeBase`].
#[derive(Debug)]
pub struct CodeBaseBuilder {
    name: String,
    methods: Vec<Method>,
    strings: Vec<Option<String>>,
}

impl CodeBaseBuilder {
    /// Start building a code base with the given display name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            methods: Vec::new(),
            strings: Vec::new(),
        }
    }

    /// Add a string constant to the pool, returning its id.
    pub fn string(&mut self, value: &str) -> StringId {
        let id = StringId::new(self.strings.len() as u32);
        self.strings.push(Some(value.to_string()));
        id
    }

    /// Add a damaged pool slot: the id exists but never resolves.
    ///
    /// Models packages whose string pool references entries that are absent or corrupt.
    pub fn missing_string(&mut self) -> StringId {
        let id = StringId::new(self.strings.len() as u32);
        self.strings.push(None);
        id
    }

    /// Add a method to the arena, returning its id.
    pub fn method(&mut self, method: Method) -> MethodId {
        let id = MethodId::new(self.methods.len() as u32);
        self.methods.push(method);
        id
    }

    /// Finish the code base.
    #[must_use]
    pub fn finish(self) -> CodeBase {
        CodeBase::new(self.name, self.methods, self.strings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_partition_the_instruction_sequence() {
        let method = MethodBuilder::new("La;", "f", "()V")
            .instruction("nop", Operand::None)
            .instruction("if-eqz", Operand::Target(3))
            .block_break()
            .instruction("const/4", Operand::Immediate(0))
            .block_break()
            .instruction("return", Operand::None)
            .finish();

        let ranges: Vec<_> = method
            .basic_blocks()
            .iter()
            .map(BasicBlock::instruction_range)
            .collect();
        assert_eq!(ranges, vec![0..2, 2..3, 3..4]);

        let counts: Vec<_> = method
            .basic_blocks()
            .iter()
            .map(BasicBlock::instruction_count)
            .collect();
        assert_eq!(counts, vec![2, 1, 1]);

        let entry = &method.basic_blocks()[0];
        let mnemonics: Vec<_> = entry
            .instructions(&method)
            .iter()
            .map(|instruction| instruction.mnemonic.as_ref())
            .collect();
        assert_eq!(mnemonics, vec!["nop", "if-eqz"]);
    }

    #[test]
    fn method_without_instructions_has_no_blocks() {
        let method = MethodBuilder::new("La;", "f", "()V").finish();
        assert!(method.basic_blocks().is_empty());
        assert_eq!(method.length(), 0);
    }

    #[test]
    fn trailing_and_duplicate_breaks_are_ignored() {
        let method = MethodBuilder::new("La;", "f", "()V")
            .block_break()
            .instruction("nop", Operand::None)
            .block_break()
            .block_break()
            .instruction("return-void", Operand::None)
            .block_break()
            .finish();

        let ranges: Vec<_> = method
            .basic_blocks()
            .iter()
            .map(BasicBlock::instruction_range)
            .collect();
        assert_eq!(ranges, vec![0..1, 1..2]);
    }

    #[test]
    fn ids_are_issued_in_arena_order() {
        let mut builder = CodeBaseBuilder::new("app.apk");
        let first = builder.string("a");
        let second = builder.string("b");
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);

        let m0 = builder.method(MethodBuilder::new("La;", "f", "()V").finish());
        let m1 = builder.method(MethodBuilder::new("La;", "g", "()V").finish());
        let codebase = builder.finish();
        assert_eq!(codebase.method(m0).unwrap().name(), "f");
        assert_eq!(codebase.method(m1).unwrap().name(), "g");
    }
}
