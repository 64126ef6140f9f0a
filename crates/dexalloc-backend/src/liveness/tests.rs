use dexalloc_common::register::Reg;

use super::analyze;
use crate::mock::method;

fn edges(graph: &dexalloc_common::interference::InterferenceGraph) -> Vec<(usize, usize)> {
    graph.edges().into_iter().map(|(a, b)| (a.0, b.0)).collect()
}

#[test]
fn straight_line() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:int = move-param #0\n\
           v1:int = const #1\n\
           v2:int = add v0 v1\n\
           return v2\n",
    );

    let graph = analyze(&mut method);

    assert_eq!(vec![(0, 1)], edges(&graph));
    assert!(method.block(method.entry).live_out().is_empty());
}

#[test]
fn dead_results_still_interfere() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:int = move-param #0\n\
           v1:int = const #1\n\
           return v0\n",
    );

    let graph = analyze(&mut method);

    assert!(graph.interferes(Reg(1), Reg(0)));
}

#[test]
fn loop_with_phi() {
    let mut method = method(
        "method loop\n\
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

    let graph = analyze(&mut method);

    assert_eq!(vec![(0, 1), (0, 2), (0, 3)], edges(&graph));

    let b0 = method.entry;
    let b1 = method.block(b0).succs[0];
    let live: Vec<_> = method.block(b0).live_out().iter().copied().collect();
    assert_eq!(vec![Reg(0), Reg(1)], live);

    let live: Vec<_> = method.block(b1).live_out().iter().copied().collect();
    assert_eq!(vec![Reg(0), Reg(3)], live);
}

#[test]
fn phis_of_a_block_interfere_with_each_other() {
    let mut method = method(
        "method swap\n\
         block b0 -> b1\n\
           v0:int = const #0\n\
           v1:int = const #1\n\
           goto\n\
         block b1\n\
           v2:int = phi v1@b0\n\
           v3:int = phi v0@b0\n\
           v4:int = sub v2 v3\n\
           return v4\n",
    );

    let graph = analyze(&mut method);

    assert!(graph.interferes(Reg(2), Reg(3)));
    assert!(graph.interferes(Reg(0), Reg(1)));
    assert!(!graph.interferes(Reg(0), Reg(2)));
}

#[test]
fn undefined_registers_interfere_on_entry() {
    let mut method = method(
        "method m\n\
         block b0\n\
           v0:int = add v5 v6\n\
           return v0\n",
    );

    let graph = analyze(&mut method);

    assert_eq!(vec![(5, 6)], edges(&graph));
}
