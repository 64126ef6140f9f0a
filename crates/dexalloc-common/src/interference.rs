use std::collections::{BTreeSet, HashMap, HashSet};

use crate::register::Reg;

/// Symmetric "may not share a slot" relation between registers. A register
/// never interferes with itself.
#[derive(Clone, Debug, Default)]
pub struct InterferenceGraph {
    graph: HashMap<Reg, HashSet<Reg>>,
}

impl InterferenceGraph {
    pub fn new() -> Self {
        Self {
            graph: HashMap::new(),
        }
    }

    /// Record that `a` and `b` interfere. Adding a register to itself does
    /// nothing.
    pub fn add(&mut self, a: Reg, b: Reg) {
        if a == b {
            return;
        }

        self.graph.entry(a).or_default().insert(b);
        self.graph.entry(b).or_default().insert(a);
    }

    pub fn interferes(&self, a: Reg, b: Reg) -> bool {
        self.graph
            .get(&a)
            .map(|others| others.contains(&b))
            .unwrap_or(false)
    }

    /// Every register interfering with `reg`.
    pub fn neighbors(&self, reg: Reg) -> impl Iterator<Item = Reg> + '_ {
        self.graph.get(&reg).into_iter().flatten().copied()
    }

    /// Every interfering pair, each listed once with the smaller register
    /// first.
    pub fn edges(&self) -> BTreeSet<(Reg, Reg)> {
        self.graph
            .iter()
            .flat_map(|(a, others)| others.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| a < b)
            .collect()
    }
}
