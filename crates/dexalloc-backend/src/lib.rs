pub mod check;
pub mod engine;
pub mod first_fit;
pub mod liveness;
pub mod params;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use engine::{AllocContext, AllocError, RegisterAllocator};
pub use first_fit::FirstFit;

use dexalloc_common::mapper::RegisterMapper;
use dexalloc_common::ssa::Method;
use log::info;

/// Run a full allocation of `method` with the given strategy: liveness and
/// interference, the strategy itself, moving parameters high if the strategy
/// asks for it, and finally a consistency check of the result.
pub fn allocate(
    method: &mut Method,
    strategy: &mut impl RegisterAllocator,
) -> Result<RegisterMapper, AllocError> {
    let interference = liveness::analyze(method);
    let mut ctx = AllocContext::new(method, interference);

    let mut mapper = strategy.allocate_registers(&mut ctx)?;

    let params_high = strategy.wants_params_moved_high();
    if params_high {
        let width = params::param_width(ctx.method());
        mapper = params::move_params_high(&mapper, width);
    }

    check::check(&ctx, &mapper, params_high)?;

    info!(
        "allocated {} into {} registers",
        ctx.method().name,
        mapper.register_count()
    );

    Ok(mapper)
}
