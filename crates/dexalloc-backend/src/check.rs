//! Validates a finished allocation before it is handed out: every register has
//! a slot of the right width, no two interfering registers overlap, and
//! parameters sit above everything else when asked for.

use dexalloc_common::mapper::{Mapping, RegisterMapper};
use dexalloc_common::register::{Category, Reg};
use log::trace;
use thiserror::Error;

use crate::engine::{AllocContext, AllocError};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ContractViolation {
    #[error("{0} was never assigned a slot")]
    Missing(Reg),

    #[error("{reg} holds a value of width {actual} but was given width {mapped}")]
    Width {
        reg: Reg,
        actual: Category,
        mapped: Category,
    },

    #[error("{a} (slot {a_slot}) and {b} (slot {b_slot}) interfere but overlap")]
    Overlap {
        a: Reg,
        a_slot: usize,
        b: Reg,
        b_slot: usize,
    },

    #[error("parameter {param} in slot {slot} is below {other}, which ends at slot {end}")]
    ParamsNotHigh {
        param: Reg,
        slot: usize,
        other: Reg,
        end: usize,
    },
}

pub fn check(
    ctx: &AllocContext,
    mapper: &RegisterMapper,
    params_high: bool,
) -> Result<(), AllocError> {
    let method = ctx.method();
    trace!("{}: checking allocation", method.name);

    let mut mapped = Vec::new();
    for reg in method.registers() {
        let mapping = mapper
            .get(reg)
            .ok_or(ContractViolation::Missing(reg))?;

        let actual = ctx.category_for_register(reg);
        if mapping.category != actual {
            return Err(ContractViolation::Width {
                reg,
                actual,
                mapped: mapping.category,
            }
            .into());
        }

        mapped.push((reg, mapping));
    }

    for (a, b) in ctx.interference().edges() {
        let (a_map, b_map) = match (mapper.get(a), mapper.get(b)) {
            (Some(a_map), Some(b_map)) => (a_map, b_map),
            (None, _) => return Err(ContractViolation::Missing(a).into()),
            (_, None) => return Err(ContractViolation::Missing(b).into()),
        };

        if a_map.overlaps(&b_map) {
            return Err(ContractViolation::Overlap {
                a,
                a_slot: a_map.slot,
                b,
                b_slot: b_map.slot,
            }
            .into());
        }
    }

    if params_high {
        check_params_high(ctx, &mapped)?;
    }

    Ok(())
}

fn check_params_high(ctx: &AllocContext, mapped: &[(Reg, Mapping)]) -> Result<(), ContractViolation> {
    let (params, others): (Vec<_>, Vec<_>) = mapped
        .iter()
        .partition(|(reg, _)| ctx.is_parameter_definition(*reg));

    let lowest = params.iter().min_by_key(|(_, mapping)| mapping.slot);
    let highest = others.iter().max_by_key(|(_, mapping)| mapping.end());

    match (lowest, highest) {
        (Some((param, low)), Some((other, high))) if low.slot < high.end() => {
            Err(ContractViolation::ParamsNotHigh {
                param: *param,
                slot: low.slot,
                other: *other,
                end: high.end(),
            })
        }
        _ => Ok(()),
    }
}
