use dexalloc_common::register::{Category, Reg, Type};
use dexalloc_common::ssa::{BlockId, InsnId, Method, Op};

use super::{AllocContext, AllocError};
use crate::liveness;
use crate::mock::method;

fn branching() -> Method {
    method(
        "method m\n\
         block b0 -> b1\n\
           v0:int = const #0\n\
           v1:int = const #1\n\
           v2:int = const #2\n\
           if-ne v2 v0\n\
         block b1\n\
           v4:int = add v1 v2\n\
           return v4\n",
    )
}

fn entry_len(method: &Method) -> usize {
    method.block(method.entry).insns().len()
}

#[test]
fn move_before_last_insn() {
    let mut method = branching();
    let graph = liveness::analyze(&mut method);
    let entry = method.entry;
    let branch = method.block(entry).last_insn().unwrap();
    let v1 = method.definition_insn(Reg(1)).unwrap().result.clone().unwrap();

    let mut ctx = AllocContext::new(&mut method, graph);
    let copy = ctx.insert_move_before(branch, &v1).unwrap();

    assert_eq!(Reg(5), copy.reg);
    assert_eq!(Type::Int, copy.ty);
    assert_eq!(None, copy.local);

    let graph = ctx.interference();
    assert!(graph.interferes(copy.reg, Reg(2)));
    assert!(graph.interferes(copy.reg, Reg(0)));
    assert!(!graph.interferes(copy.reg, copy.reg));

    let method = ctx.method();
    assert_eq!(5, entry_len(method));

    let insns = method.block(entry).insns();
    assert_eq!(branch, insns[4]);

    let mov = method.insn(insns[3]);
    assert_eq!(Some(&Op::Move), mov.op());
    assert_eq!(Some(&copy), mov.result.as_ref());
    assert_eq!(vec![v1], mov.sources);

    assert_eq!(Some(insns[3]), method.definition_of(copy.reg));
}

#[test]
fn move_of_a_wide_value() {
    let mut method = method(
        "method m\n\
         block b0 -> b1\n\
           v0:long(sum) = const #0\n\
           goto\n\
         block b1\n\
           return v0\n",
    );

    let graph = liveness::analyze(&mut method);
    let goto = method.block(method.entry).last_insn().unwrap();
    let v0 = method.definition_insn(Reg(0)).unwrap().result.clone().unwrap();

    let mut ctx = AllocContext::new(&mut method, graph);
    let copy = ctx.insert_move_before(goto, &v0).unwrap();

    assert_eq!(Category::Double, ctx.category_for_register(copy.reg));
    assert_eq!(None, copy.local);
    assert!(ctx.interference().interferes(copy.reg, Reg(0)));
}

#[test]
fn move_before_middle_insn_fails() {
    let mut method = branching();
    let graph = liveness::analyze(&mut method);
    let first = method.block(method.entry).insns()[0];
    let v1 = method.definition_insn(Reg(1)).unwrap().result.clone().unwrap();
    let before = entry_len(&method);

    let mut ctx = AllocContext::new(&mut method, graph);

    assert_eq!(
        Err(AllocError::NotLastInsn(first)),
        ctx.insert_move_before(first, &v1)
    );
    assert_eq!(before, entry_len(ctx.method()));
}

#[test]
fn move_before_insn_with_result_fails() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:int = const #0\n\
           v1:int = neg v0\n",
    );

    let graph = liveness::analyze(&mut method);
    let last = method.block(method.entry).last_insn().unwrap();
    let v0 = method.definition_insn(Reg(0)).unwrap().result.clone().unwrap();

    let mut ctx = AllocContext::new(&mut method, graph);

    assert_eq!(
        Err(AllocError::HasResult(last)),
        ctx.insert_move_before(last, &v0)
    );
}

#[test]
fn move_before_unknown_insn_fails() {
    let mut method = branching();
    let graph = liveness::analyze(&mut method);
    let v1 = method.definition_insn(Reg(1)).unwrap().result.clone().unwrap();
    let before = entry_len(&method);

    let mut ctx = AllocContext::new(&mut method, graph);

    assert_eq!(
        Err(AllocError::NotInBlock(InsnId(999))),
        ctx.insert_move_before(InsnId(999), &v1)
    );
    assert_eq!(before, entry_len(ctx.method()));
}

#[test]
fn queries_on_undefined_registers() {
    let mut method = branching();
    let graph = liveness::analyze(&mut method);
    let ctx = AllocContext::new(&mut method, graph);

    assert_eq!(Category::Single, ctx.category_for_register(Reg(3)));
    assert_eq!(None, ctx.definition_spec_for_register(Reg(3)));
    assert!(!ctx.is_parameter_definition(Reg(3)));
}

#[test]
fn queries_are_stable() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:double = move-param #0\n\
           v1:int = const #0\n\
           return v0\n",
    );

    let graph = liveness::analyze(&mut method);
    let ctx = AllocContext::new(&mut method, graph);

    for _ in 0..2 {
        assert!(ctx.is_parameter_definition(Reg(0)));
        assert!(!ctx.is_parameter_definition(Reg(1)));
        assert_eq!(Category::Double, ctx.category_for_register(Reg(0)));
        assert_eq!(
            Some(Type::Double),
            ctx.definition_spec_for_register(Reg(0)).map(|spec| spec.ty)
        );
    }

    assert_eq!(BlockId(0), ctx.method().entry);
}
