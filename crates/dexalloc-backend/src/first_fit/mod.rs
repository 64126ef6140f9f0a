//! A first-fit strategy: parameters go at the bottom of the frame in order,
//! and every other register takes the lowest free slot above them.

mod cast;
mod fit;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use dexalloc_common::mapper::{MapperBuilder, RegisterMapper};
use dexalloc_common::register::Reg;
use dexalloc_common::ssa::Op;
use itertools::Itertools;
use log::{debug, info, trace};

use crate::engine::{AllocContext, AllocError, RegisterAllocator};

#[derive(Clone, Copy, Debug)]
pub struct FirstFit {
    params_high: bool,
}

impl FirstFit {
    pub fn new() -> Self {
        Self { params_high: true }
    }

    /// Choose whether the parameters should end up at the top of the frame.
    pub fn with_params_high(self, params_high: bool) -> Self {
        Self { params_high }
    }
}

impl Default for FirstFit {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAllocator for FirstFit {
    fn wants_params_moved_high(&self) -> bool {
        self.params_high
    }

    fn allocate_registers(&mut self, ctx: &mut AllocContext) -> Result<RegisterMapper, AllocError> {
        info!("first-fit allocation for {}", ctx.method().name);

        let pairs = cast::pair_casts(ctx)?;
        let partners: HashMap<Reg, Reg> = pairs
            .iter()
            .flat_map(|[a, b]| [(*a, *b), (*b, *a)])
            .collect();

        let mut builder = MapperBuilder::new();
        let base = place_params(ctx, &mut builder);

        for reg in ctx.method().registers() {
            if builder.contains(reg) {
                continue;
            }

            let group: Vec<Reg> = std::iter::once(reg)
                .chain(partners.get(&reg).copied())
                .collect();

            let category = ctx.category_for_register(reg);
            let unavailable = fit::unavailable(ctx, &builder, &group);
            let slot = fit::first_fitting_slot(unavailable, base, category.width());

            for member in group {
                trace!("{member} -> r{slot}");
                builder.add(member, slot, category);
            }
        }

        let mapper = builder.build();
        debug!(
            "{}: {} registers in {} slots",
            ctx.method().name,
            mapper.len(),
            mapper.register_count()
        );

        Ok(mapper)
    }
}

/// Place every parameter at the bottom of the frame, in argument order.
/// Returns the first slot above them.
fn place_params(ctx: &AllocContext, builder: &mut MapperBuilder) -> usize {
    let params = ctx
        .method()
        .placed_insns()
        .filter_map(|(_, insn)| match (insn.op(), &insn.result) {
            (Some(Op::MoveParam(index)), Some(result)) => Some((*index, result.reg)),
            _ => None,
        })
        .sorted_by_key(|(index, _)| *index);

    let mut slot = 0;
    for (_, reg) in params {
        let category = ctx.category_for_register(reg);
        trace!("parameter {reg} -> r{slot}");
        builder.add(reg, slot, category);
        slot += category.width();
    }

    slot
}
