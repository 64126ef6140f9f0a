//! Backward liveness over the block graph, and the interference graph built
//! from it.
//!
//! Phi results are treated as defined at the very start of their block, and
//! each phi operand is live out of the predecessor it flows in from rather
//! than live into the phi's own block.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use dexalloc_common::interference::InterferenceGraph;
use dexalloc_common::register::Reg;
use dexalloc_common::ssa::{BlockId, Method};
use im::OrdSet;
use log::{debug, info, trace};

/// Compute the live-out set of every block of `method`, store it on the
/// blocks, and build the interference graph.
pub fn analyze(method: &mut Method) -> InterferenceGraph {
    info!(
        "computing liveness for {} ({} blocks)",
        method.name,
        method.block_count()
    );

    let mut analyzer = Analyzer::new(method);
    analyzer.analyze();

    let interference = analyzer.interference();
    let Analyzer { live_out, .. } = analyzer;

    for (id, live) in live_out {
        method.set_live_out(id, live.into_iter().collect());
    }

    interference
}

#[derive(Debug)]
struct Analyzer<'a> {
    method: &'a Method,
    preds: HashMap<BlockId, Vec<BlockId>>,

    live_in: HashMap<BlockId, OrdSet<Reg>>,
    live_out: HashMap<BlockId, OrdSet<Reg>>,
}

impl<'a> Analyzer<'a> {
    pub fn new(method: &'a Method) -> Self {
        let preds = method
            .blocks()
            .map(|block| (block.id, method.preds(block.id)))
            .collect();

        Self {
            method,
            preds,
            live_in: HashMap::new(),
            live_out: HashMap::new(),
        }
    }

    pub fn analyze(&mut self) {
        let mut worklist: Vec<BlockId> = self.method.blocks().map(|block| block.id).collect();
        let mut rounds = 0;

        while let Some(id) = worklist.pop() {
            rounds += 1;
            let next = self.analyze_block(id);
            worklist.extend(next);
        }

        debug!("{}: liveness settled after {rounds} block visits", self.method.name);
    }

    /// Recompute the live sets of a single block. Returns the blocks which
    /// need another look.
    fn analyze_block(&mut self, id: BlockId) -> Vec<BlockId> {
        let out = self.out_for(id);
        let mut live = out.clone();
        self.live_out.insert(id, out);

        for insn in self.method.block(id).insns().iter().rev() {
            let insn = self.method.insn(*insn);

            if let Some(result) = &insn.result {
                live.remove(&result.reg);
            }

            if !insn.is_phi() {
                live.extend(insn.sources.iter().map(|source| source.reg));
            }
        }

        trace!("{}: live into b{}: {:?}", self.method.name, id.0, live);

        let old = self.live_in.insert(id, live.clone()).unwrap_or_default();
        if old == live {
            vec![]
        } else {
            self.preds[&id].clone()
        }
    }

    fn out_for(&self, id: BlockId) -> OrdSet<Reg> {
        let mut res = OrdSet::new();

        for succ in self.method.block(id).succs.iter() {
            if let Some(live) = self.live_in.get(succ) {
                res.extend(live.iter().copied());
            }

            for insn in self.method.block(*succ).insns() {
                let insn = self.method.insn(*insn);
                res.extend(insn.phi_sources_from(id).map(|source| source.reg));
            }
        }

        res
    }

    /// Walk every block backwards from its live-out set, making each result
    /// interfere with everything live immediately after its definition.
    fn interference(&self) -> InterferenceGraph {
        let mut graph = InterferenceGraph::new();

        for block in self.method.blocks() {
            let mut live = self.live_out.get(&block.id).cloned().unwrap_or_default();
            let mut phis = Vec::new();

            for insn in block.insns().iter().rev() {
                let insn = self.method.insn(*insn);

                if insn.is_phi() {
                    phis.extend(insn.result.as_ref().map(|result| result.reg));
                    continue;
                }

                if let Some(result) = &insn.result {
                    for other in live.iter() {
                        graph.add(result.reg, *other);
                    }

                    live.remove(&result.reg);
                }

                live.extend(insn.sources.iter().map(|source| source.reg));
            }

            // All phis of a block define their results at once, on entry.
            for (i, phi) in phis.iter().enumerate() {
                for other in live.iter().chain(phis[i + 1..].iter()) {
                    graph.add(*phi, *other);
                }
            }
        }

        // Registers without a definition are all live on entry at once.
        let entry: Vec<_> = self
            .live_in
            .get(&self.method.entry)
            .into_iter()
            .flatten()
            .copied()
            .collect();

        for (i, a) in entry.iter().enumerate() {
            for b in entry[i + 1..].iter() {
                graph.add(*a, *b);
            }
        }

        trace!("{}: {} interfering pairs", self.method.name, graph.edges().len());

        graph
    }
}
