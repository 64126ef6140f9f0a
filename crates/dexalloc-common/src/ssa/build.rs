use std::cell::OnceCell;
use std::collections::HashSet;

use super::{Block, BlockId, Insn, InsnId, Method, Op};
use crate::register::{Reg, RegisterSpec};

#[derive(Debug)]
pub struct MethodBuilder {
    name: String,
    blocks: Vec<Block>,
    insns: Vec<Insn>,
    defined: HashSet<Reg>,
    next_reg: usize,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            insns: Vec::new(),
            defined: HashSet::new(),
            next_reg: 0,
        }
    }

    pub fn add_block(&mut self, label: impl Into<String>) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block::new(id, label));
        id
    }

    pub fn add_edge(&mut self, from: BlockId, to: BlockId) {
        let succs = &mut self.blocks[from.0].succs;
        if !succs.contains(&to) {
            succs.push(to);
        }
    }

    pub fn is_defined(&self, reg: Reg) -> bool {
        self.defined.contains(&reg)
    }

    pub fn normal(
        &mut self,
        block: BlockId,
        op: Op,
        result: Option<RegisterSpec>,
        sources: Vec<RegisterSpec>,
    ) -> InsnId {
        self.push(Insn::normal(block, op, result, sources))
    }

    pub fn phi(
        &mut self,
        block: BlockId,
        result: RegisterSpec,
        operands: Vec<(RegisterSpec, BlockId)>,
    ) -> InsnId {
        self.push(Insn::phi(block, result, operands))
    }

    /// Append an instruction to the end of its block.
    ///
    /// # Panics
    ///
    /// Panics if the result register of `insn` is already defined, or if it
    /// names a register above [`Reg::MAX`].
    pub fn push(&mut self, insn: Insn) -> InsnId {
        for spec in insn.result.iter().chain(insn.sources.iter()) {
            let next = spec
                .reg
                .0
                .checked_add(1)
                .filter(|next| *next <= Reg::MAX + 1);
            let Some(next) = next else {
                panic!("{} is above the register limit of {}", spec.reg, Reg::MAX);
            };

            self.next_reg = self.next_reg.max(next);
        }

        if let Some(result) = &insn.result {
            assert!(
                self.defined.insert(result.reg),
                "{} is defined more than once",
                result.reg
            );
        }

        let id = InsnId(self.insns.len());
        self.blocks[insn.block.0].insns.push(id);
        self.insns.push(insn);
        id
    }

    pub fn build(self, entry: BlockId) -> Method {
        Method {
            name: self.name,
            entry,
            blocks: self.blocks,
            insns: self.insns,
            next_reg: self.next_reg,
            definitions: OnceCell::new(),
        }
    }
}
