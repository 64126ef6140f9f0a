use std::collections::HashSet;

use dexalloc_common::register::{Reg, RegisterSpec};
use dexalloc_common::ssa::{BlockId, InsnId, Method, Op};
use log::{debug, trace};

use crate::engine::{AllocContext, AllocError};

/// Find every `check-cast` whose successor picks up the cast value with a
/// `move-result-pseudo`, and pair the cast source with the pseudo result so
/// both can be given the same slot. Where the source cannot share a slot with
/// the result, a copy of it is made right before the cast and paired instead.
pub fn pair_casts(ctx: &mut AllocContext) -> Result<Vec<[Reg; 2]>, AllocError> {
    let casts: Vec<(InsnId, RegisterSpec)> = ctx
        .method()
        .blocks()
        .filter_map(|block| {
            let last = block.last_insn()?;
            let insn = ctx.method().insn(last);
            match (insn.op(), insn.sources.first()) {
                (Some(Op::CheckCast(_)), Some(source)) => Some((last, source.clone())),
                _ => None,
            }
        })
        .collect();

    let mut grouped = HashSet::new();
    let mut pairs = Vec::new();

    for (cast, source) in casts {
        let block = ctx.method().insn(cast).block;
        let Some(result) = pseudo_result(ctx.method(), block) else {
            continue;
        };

        if grouped.contains(&result.reg)
            || ctx.category_for_register(source.reg) != result.category()
        {
            continue;
        }

        let needs_copy = ctx.interference().interferes(source.reg, result.reg)
            || ctx.is_parameter_definition(source.reg)
            || grouped.contains(&source.reg);

        let source = if needs_copy {
            let copy = ctx.insert_move_before(cast, &source)?;
            ctx.replace_source(cast, 0, copy.clone());
            debug!("cast {cast} now reads {}", copy.reg);
            copy
        } else {
            source
        };

        if ctx.interference().interferes(source.reg, result.reg) {
            continue;
        }

        trace!("pairing {} with {}", source.reg, result.reg);
        grouped.insert(source.reg);
        grouped.insert(result.reg);
        pairs.push([source.reg, result.reg]);
    }

    Ok(pairs)
}

/// The result of the `move-result-pseudo` opening the first successor of
/// `block` which has one.
fn pseudo_result(method: &Method, block: BlockId) -> Option<RegisterSpec> {
    method.block(block).succs.iter().find_map(|succ| {
        let first = *method.block(*succ).insns().first()?;
        let insn = method.insn(first);
        match insn.op() {
            Some(Op::MoveResultPseudo) => insn.result.clone(),
            _ => None,
        }
    })
}
