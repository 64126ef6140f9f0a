use dexalloc_common::register::{Reg, RegisterSpec};
use dexalloc_common::ssa::{Insn, InsnId, Op};
use log::debug;

use super::{AllocContext, AllocError};

impl AllocContext<'_> {
    /// Copy `spec` into a fresh register with a move placed right before
    /// `insn`, and return the spec of the copy.
    ///
    /// `insn` must be the last instruction of its block and must not have a
    /// result. The copy interferes with everything live out of the block and
    /// with every source of `insn`.
    pub fn insert_move_before(
        &mut self,
        insn: InsnId,
        spec: &RegisterSpec,
    ) -> Result<RegisterSpec, AllocError> {
        let block = self
            .method
            .get_insn(insn)
            .ok_or(AllocError::NotInBlock(insn))?
            .block;
        let insns = self.method.block(block).insns();

        let index = insns
            .iter()
            .position(|id| *id == insn)
            .ok_or(AllocError::NotInBlock(insn))?;

        if index + 1 != insns.len() {
            return Err(AllocError::NotLastInsn(insn));
        }

        if self.method.insn(insn).result.is_some() {
            return Err(AllocError::HasResult(insn));
        }

        let reg = self.method.make_new_ssa_reg();
        let copy = RegisterSpec::new(reg, spec.ty);
        let mov = Insn::normal(block, Op::Move, Some(copy.clone()), vec![spec.clone()]);
        self.method.insert_insn(block, index, mov);

        let live_out = self.method.block(block).live_out().iter().copied();
        let sources = self.method.insn(insn).sources.iter().map(|source| source.reg);
        let others: Vec<Reg> = live_out.chain(sources).collect();

        for other in others {
            self.interference.add(reg, other);
        }

        self.method.on_insns_changed();

        debug!(
            "{}: copied {} into {reg} before {insn}",
            self.method.name, spec.reg
        );

        Ok(copy)
    }

    /// Make `insn` read `spec` in place of its source at `index`.
    pub fn replace_source(&mut self, insn: InsnId, index: usize, spec: RegisterSpec) {
        self.method.set_source(insn, index, spec);
        self.method.on_insns_changed();
    }
}
