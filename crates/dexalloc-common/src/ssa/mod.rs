//! The SSA form of a single method, as seen by the register allocator.
//!
//! Instructions live in an arena owned by the [`Method`] and are referred to by
//! [`InsnId`]. Each [`Block`] holds the ordered list of instructions placed in
//! it. The method also keeps an index from every register to its (unique)
//! defining instruction. This index is derived data: anything that changes the
//! instruction graph must call [`Method::on_insns_changed`] afterwards so that
//! it is rebuilt on the next query.

mod build;
mod insn;
mod pretty;


pub use build::MethodBuilder;
pub use insn::{BinOp, Condition, Insn, InsnId, InsnKind, Op};
pub use pretty::Prettier;

use std::cell::OnceCell;
use std::collections::BTreeSet;

use log::trace;

use crate::register::{Category, Reg, RegisterSpec};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlockId(pub usize);

#[derive(Clone, Debug)]
pub struct Block {
    pub id: BlockId,
    pub label: String,
    pub succs: Vec<BlockId>,

    insns: Vec<InsnId>,
    live_out: BTreeSet<Reg>,
}

impl Block {
    pub fn new(id: BlockId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            succs: Vec::new(),
            insns: Vec::new(),
            live_out: BTreeSet::new(),
        }
    }

    pub fn insns(&self) -> &[InsnId] {
        &self.insns
    }

    pub fn last_insn(&self) -> Option<InsnId> {
        self.insns.last().copied()
    }

    /// The registers live on exit from this block. Empty until liveness has
    /// been computed.
    pub fn live_out(&self) -> &BTreeSet<Reg> {
        &self.live_out
    }
}

#[derive(Debug)]
pub struct Method {
    pub name: String,
    pub entry: BlockId,

    blocks: Vec<Block>,
    insns: Vec<Insn>,
    next_reg: usize,

    definitions: OnceCell<Vec<Option<InsnId>>>,
}

impl Method {
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn insn(&self, id: InsnId) -> &Insn {
        &self.insns[id.0]
    }

    /// Like [`Method::insn`], but `None` for ids which do not belong to this
    /// method.
    pub fn get_insn(&self, id: InsnId) -> Option<&Insn> {
        self.insns.get(id.0)
    }

    /// All blocks with an edge into `id`, in block order.
    pub fn preds(&self, id: BlockId) -> Vec<BlockId> {
        self.blocks
            .iter()
            .filter(|block| block.succs.contains(&id))
            .map(|block| block.id)
            .collect()
    }

    pub fn set_live_out(&mut self, id: BlockId, live: BTreeSet<Reg>) {
        self.blocks[id.0].live_out = live;
    }

    /// Mint a register number which has never been used in this method. The
    /// register is not defined or used by anything yet.
    pub fn make_new_ssa_reg(&mut self) -> Reg {
        let reg = Reg(self.next_reg);
        self.next_reg += 1;
        trace!("{}: minted {reg}", self.name);
        reg
    }

    /// Get the instruction defining `reg`, or `None` for registers without a
    /// definition (version zero registers).
    pub fn definition_of(&self, reg: Reg) -> Option<InsnId> {
        self.definitions
            .get_or_init(|| self.index_definitions())
            .get(reg.0)
            .copied()
            .flatten()
    }

    pub fn definition_insn(&self, reg: Reg) -> Option<&Insn> {
        self.definition_of(reg).map(|id| self.insn(id))
    }

    /// The category of the value held by `reg`. Undefined registers are
    /// single-width.
    pub fn category_of(&self, reg: Reg) -> Category {
        self.definition_insn(reg)
            .and_then(|insn| insn.result.as_ref())
            .map(RegisterSpec::category)
            .unwrap_or_default()
    }

    /// Must be called after any change to the instructions of this method.
    pub fn on_insns_changed(&mut self) {
        trace!("{}: instructions changed", self.name);
        self.definitions.take();
    }

    /// Insert `insn` into `block` at position `index`, shifting the
    /// instruction at that position (and everything after it) back. The
    /// caller is responsible for calling [`Method::on_insns_changed`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end of the block, or if `insn` claims to
    /// belong to a different block.
    pub fn insert_insn(&mut self, block: BlockId, index: usize, insn: Insn) -> InsnId {
        assert_eq!(block, insn.block);

        let id = InsnId(self.insns.len());
        self.insns.push(insn);
        self.blocks[block.0].insns.insert(index, id);
        id
    }

    /// Replace the source at `index` of `insn`. The caller is responsible for
    /// calling [`Method::on_insns_changed`].
    pub fn set_source(&mut self, insn: InsnId, index: usize, spec: RegisterSpec) {
        self.insns[insn.0].sources[index] = spec;
    }

    /// Every register defined or used by an instruction placed in a block.
    pub fn registers(&self) -> BTreeSet<Reg> {
        self.placed_insns()
            .flat_map(|(_, insn)| insn.result.iter().chain(insn.sources.iter()))
            .map(|spec| spec.reg)
            .collect()
    }

    /// Every instruction placed in a block, in block order.
    pub fn placed_insns(&self) -> impl Iterator<Item = (InsnId, &Insn)> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.insns.iter())
            .map(|id| (*id, self.insn(*id)))
    }

    fn index_definitions(&self) -> Vec<Option<InsnId>> {
        trace!("{}: indexing definitions", self.name);
        let mut definitions = vec![None; self.next_reg];

        for (id, insn) in self.placed_insns() {
            if let Some(result) = &insn.result {
                definitions[result.reg.0] = Some(id);
            }
        }

        definitions
    }
}
