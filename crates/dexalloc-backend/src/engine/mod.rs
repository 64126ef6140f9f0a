//! The pieces every allocation strategy shares: the [`RegisterAllocator`]
//! trait, the [`AllocContext`] a strategy runs in, and the errors a run can
//! end with.

mod moves;

#[cfg(test)]
mod tests;

use dexalloc_common::interference::InterferenceGraph;
use dexalloc_common::mapper::RegisterMapper;
use dexalloc_common::register::{Category, Reg, RegisterSpec};
use dexalloc_common::ssa::{InsnId, Method};
use thiserror::Error;

use crate::check::ContractViolation;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum AllocError {
    #[error("instruction {0} is not in its block")]
    NotInBlock(InsnId),

    #[error("instruction {0} is not the last one in its block")]
    NotLastInsn(InsnId),

    #[error("instruction {0} has a result register")]
    HasResult(InsnId),

    #[error("inconsistent allocation: {0}")]
    Contract(#[from] ContractViolation),
}

/// An allocation strategy.
pub trait RegisterAllocator {
    /// Returns `true` if this strategy places parameters at the bottom of the
    /// frame, and expects them to be moved to the top once it is done.
    fn wants_params_moved_high(&self) -> bool;

    /// Assign a slot to every register of the method in `ctx`. The strategy
    /// may insert moves through [`AllocContext::insert_move_before`].
    fn allocate_registers(&mut self, ctx: &mut AllocContext) -> Result<RegisterMapper, AllocError>;
}

/// A single allocation run over one method. Owns the interference graph and
/// has exclusive access to the method for the duration of the run.
#[derive(Debug)]
pub struct AllocContext<'a> {
    method: &'a mut Method,
    interference: InterferenceGraph,
}

impl<'a> AllocContext<'a> {
    pub fn new(method: &'a mut Method, interference: InterferenceGraph) -> Self {
        Self {
            method,
            interference,
        }
    }

    pub fn method(&self) -> &Method {
        &*self.method
    }

    pub fn interference(&self) -> &InterferenceGraph {
        &self.interference
    }

    /// Strategies which introduce registers of their own are responsible for
    /// recording their interference.
    pub fn interference_mut(&mut self) -> &mut InterferenceGraph {
        &mut self.interference
    }

    pub fn category_for_register(&self, reg: Reg) -> Category {
        self.method.category_of(reg)
    }

    /// The result spec of the instruction defining `reg`, if any.
    pub fn definition_spec_for_register(&self, reg: Reg) -> Option<&RegisterSpec> {
        self.method
            .definition_insn(reg)
            .and_then(|insn| insn.result.as_ref())
    }

    pub fn is_parameter_definition(&self, reg: Reg) -> bool {
        self.method
            .definition_insn(reg)
            .map(|insn| insn.is_move_param())
            .unwrap_or(false)
    }
}
