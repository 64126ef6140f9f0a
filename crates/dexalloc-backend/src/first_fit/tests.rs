use dexalloc_common::mapper::RegisterMapper;
use dexalloc_common::register::Reg;
use dexalloc_common::ssa::{Method, Op};

use super::FirstFit;
use crate::allocate;
use crate::mock::method;

fn slots(mapper: &RegisterMapper) -> Vec<(usize, usize)> {
    mapper
        .iter()
        .map(|(reg, mapping)| (reg.0, mapping.slot))
        .collect()
}

fn slot(mapper: &RegisterMapper, reg: usize) -> usize {
    mapper.slot_for(Reg(reg)).unwrap()
}

fn two_params() -> Method {
    method(
        "method m\n\
         block b0\n\
           v0:int = move-param #0\n\
           v1:int = move-param #1\n\
           v2:int = const #1\n\
           v3:int = const #2\n\
           v4:int = add v2 v3\n\
           return v4\n",
    )
}

#[test]
fn params_end_up_on_top() {
    let mut method = two_params();
    let mapper = allocate(&mut method, &mut FirstFit::new()).unwrap();

    assert_eq!(4, mapper.register_count());
    assert_eq!(vec![(0, 2), (1, 3), (2, 0), (3, 1), (4, 0)], slots(&mapper));
}

#[test]
fn params_stay_low_when_asked() {
    let mut method = two_params();
    let mut strategy = FirstFit::new().with_params_high(false);
    let mapper = allocate(&mut method, &mut strategy).unwrap();

    assert_eq!(vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 2)], slots(&mapper));
}

#[test]
fn params_follow_argument_order() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:int = move-param #1\n\
           v1:int = move-param #0\n\
           return-void\n",
    );

    let mut strategy = FirstFit::new().with_params_high(false);
    let mapper = allocate(&mut method, &mut strategy).unwrap();

    assert_eq!(1, slot(&mapper, 0));
    assert_eq!(0, slot(&mapper, 1));
}

#[test]
fn wide_registers_take_two_slots() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:long = move-param #0\n\
           v1:int = move-param #1\n\
           v2:double = const #0\n\
           v3:int = const #1\n\
           v4:double = add v2 v3\n\
           return v4\n",
    );

    let mapper = allocate(&mut method, &mut FirstFit::new()).unwrap();

    assert_eq!(6, mapper.register_count());
    assert_eq!(
        vec![(0, 3), (1, 5), (2, 0), (3, 2), (4, 0)],
        slots(&mapper)
    );
}

#[test]
fn loop_values_stay_apart() {
    let mut method = method(
        "method count\n\
         block b0 -> b1\n\
           v0:int = move-param #0\n\
           v1:int = const #0\n\
           goto\n\
         block b1 -> b1, b2\n\
           v2:int = phi v1@b0 v3@b1\n\
           v3:int = add v2 v0\n\
           if-lt v3 v0\n\
         block b2\n\
           return v3\n",
    );

    let mapper = allocate(&mut method, &mut FirstFit::new()).unwrap();

    assert_ne!(slot(&mapper, 0), slot(&mapper, 3));
    assert_ne!(slot(&mapper, 0), slot(&mapper, 2));
    assert_eq!(slot(&mapper, 1), slot(&mapper, 2));
    assert_eq!(2, mapper.register_count());
}

#[test]
fn cast_shares_a_slot_with_its_result() {
    let mut method = method(
        "method cast\n\
         block b0 -> b1\n\
           v0:object = move-param #0\n\
           v1:object = const #0\n\
           check-cast java/lang/String v1\n\
         block b1\n\
           v2:object = move-result-pseudo\n\
           return v2\n",
    );

    let mapper = allocate(&mut method, &mut FirstFit::new()).unwrap();

    assert_eq!(3, method.block(method.entry).insns().len());
    assert_eq!(slot(&mapper, 1), slot(&mapper, 2));
    assert_eq!(1, slot(&mapper, 0));
}

#[test]
fn cast_of_a_live_value_is_copied() {
    let mut method = method(
        "method cast\n\
         block b0 -> b1\n\
           v1:object = const #0\n\
           check-cast java/lang/String v1\n\
         block b1\n\
           v2:object = move-result-pseudo\n\
           invoke java/lang/Object.equals v1 v2\n\
           return-void\n",
    );

    let mapper = allocate(&mut method, &mut FirstFit::new()).unwrap();

    let entry = method.block(method.entry);
    assert_eq!(3, entry.insns().len());

    let mov = method.insn(entry.insns()[1]);
    let copy = mov.result.as_ref().unwrap().reg;
    assert_eq!(Some(&Op::Move), mov.op());
    assert_eq!(Reg(3), copy);

    let cast = method.insn(entry.insns()[2]);
    assert_eq!(copy, cast.sources[0].reg);

    assert_eq!(slot(&mapper, 3), slot(&mapper, 2));
    assert_ne!(slot(&mapper, 1), slot(&mapper, 2));
}

#[test]
fn cast_of_a_param_is_copied() {
    let mut method = method(
        "method cast\n\
         block b0 -> b1\n\
           v0:object = move-param #0\n\
           check-cast java/lang/String v0\n\
         block b1\n\
           v1:object = move-result-pseudo\n\
           return v1\n",
    );

    let mapper = allocate(&mut method, &mut FirstFit::new()).unwrap();

    assert_eq!(3, method.block(method.entry).insns().len());
    assert_eq!(slot(&mapper, 2), slot(&mapper, 1));
    assert_eq!(1, slot(&mapper, 0));
    assert_eq!(2, mapper.register_count());
}
