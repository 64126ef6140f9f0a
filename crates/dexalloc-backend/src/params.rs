use dexalloc_common::mapper::RegisterMapper;
use dexalloc_common::ssa::Method;
use log::debug;

/// The number of slots taken up by the parameters of `method`.
pub fn param_width(method: &Method) -> usize {
    method
        .placed_insns()
        .filter(|(_, insn)| insn.is_move_param())
        .filter_map(|(_, insn)| insn.result.as_ref())
        .map(|result| result.category().width())
        .sum()
}

/// Rotate the low `param_width` slots of `mapper` to the top of the frame,
/// shifting every other slot down to make room.
#[must_use]
pub fn move_params_high(mapper: &RegisterMapper, param_width: usize) -> RegisterMapper {
    let count = mapper.register_count();
    debug!("moving {param_width} parameter slots above {count} slots");

    mapper.map_slots(|_, mapping| {
        if mapping.slot < param_width {
            mapping.slot + (count - param_width)
        } else {
            mapping.slot - param_width
        }
    })
}
