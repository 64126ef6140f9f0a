use dexalloc_common::mapper::{MapperBuilder, RegisterMapper};
use dexalloc_common::register::{Category, Reg};
use dexalloc_common::ssa::Method;

use crate::check::{check, ContractViolation};
use crate::engine::{AllocContext, AllocError, RegisterAllocator};
use crate::mock::method;
use crate::{allocate, liveness};

/// Maps every register to slot zero, with whatever width it is told to.
struct Squash {
    category: Option<Category>,
    skip: Option<Reg>,
}

impl RegisterAllocator for Squash {
    fn wants_params_moved_high(&self) -> bool {
        false
    }

    fn allocate_registers(&mut self, ctx: &mut AllocContext) -> Result<RegisterMapper, AllocError> {
        let mut builder = MapperBuilder::new();
        for reg in ctx.method().registers() {
            if Some(reg) == self.skip {
                continue;
            }

            let category = self
                .category
                .unwrap_or_else(|| ctx.category_for_register(reg));
            builder.add(reg, 0, category);
        }

        Ok(builder.build())
    }
}

fn sample() -> Method {
    method(
        "method m\n\
         block b0\n\
           v0:int = move-param #0\n\
           v1:long = const #1\n\
           v2:long = add v1 v1\n\
           return v2\n",
    )
}

#[test]
fn overlap_is_caught() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:int = const #0\n\
           v1:int = const #1\n\
           v2:int = add v0 v1\n\
           return v2\n",
    );

    let mut strategy = Squash {
        category: None,
        skip: None,
    };

    assert!(matches!(
        allocate(&mut method, &mut strategy),
        Err(AllocError::Contract(ContractViolation::Overlap { .. }))
    ));
}

#[test]
fn missing_register_is_caught() {
    let mut method = sample();
    let mut strategy = Squash {
        category: None,
        skip: Some(Reg(2)),
    };

    assert_eq!(
        Err(AllocError::Contract(ContractViolation::Missing(Reg(2)))),
        allocate(&mut method, &mut strategy)
    );
}

#[test]
fn wrong_width_is_caught() {
    let mut method = sample();
    let mut strategy = Squash {
        category: Some(Category::Single),
        skip: None,
    };

    assert_eq!(
        Err(AllocError::Contract(ContractViolation::Width {
            reg: Reg(1),
            actual: Category::Double,
            mapped: Category::Single,
        })),
        allocate(&mut method, &mut strategy)
    );
}

#[test]
fn low_params_are_caught() {
    let mut method = sample();
    let graph = liveness::analyze(&mut method);
    let ctx = AllocContext::new(&mut method, graph);

    let mut builder = MapperBuilder::new();
    builder.add(Reg(0), 0, Category::Single);
    builder.add(Reg(1), 1, Category::Double);
    builder.add(Reg(2), 3, Category::Double);
    let mapper = builder.build();

    assert_eq!(Ok(()), check(&ctx, &mapper, false));
    assert_eq!(
        Err(AllocError::Contract(ContractViolation::ParamsNotHigh {
            param: Reg(0),
            slot: 0,
            other: Reg(2),
            end: 5,
        })),
        check(&ctx, &mapper, true)
    );
}
