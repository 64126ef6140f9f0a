use dexalloc_common::mapper::{MapperBuilder, Mapping};
use dexalloc_common::register::Reg;

use crate::engine::AllocContext;

/// The mappings of every already placed register interfering with any member
/// of `group`.
pub fn unavailable(ctx: &AllocContext, builder: &MapperBuilder, group: &[Reg]) -> Vec<Mapping> {
    group
        .iter()
        .flat_map(|reg| ctx.interference().neighbors(*reg))
        .filter_map(|other| builder.get(other))
        .collect()
}

/// The lowest slot at or above `from` where `width` consecutive slots are
/// free of every mapping in `unavailable`.
pub fn first_fitting_slot(mut unavailable: Vec<Mapping>, from: usize, width: usize) -> usize {
    unavailable.sort_by_key(|mapping| mapping.slot);

    let mut slot = from;
    for mapping in unavailable {
        if mapping.end() <= slot {
            continue;
        }

        if mapping.slot >= slot + width {
            break;
        }

        slot = mapping.end();
    }

    slot
}
