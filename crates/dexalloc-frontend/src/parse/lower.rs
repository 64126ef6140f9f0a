use std::collections::HashMap;

use dexalloc_common::message::{Messages, Span};
use dexalloc_common::register::{Reg, RegisterSpec, Type};
use dexalloc_common::ssa::{BinOp, BlockId, Condition, Method, MethodBuilder, Op};
use log::{debug, trace};

use super::tree::{BlockDecl, InsnDecl, MethodDecl, Operand};

type Labels = HashMap<String, (BlockId, Span)>;

/// Turns parsed declarations into SSA methods, resolving block labels, types
/// and opcodes along the way.
#[derive(Debug, Default)]
pub struct Lowerer {
    pub msgs: Messages,
}

impl Lowerer {
    pub fn new() -> Self {
        Self {
            msgs: Messages::new(),
        }
    }

    /// Lower a single method. Returns `None` if anything in it was malformed.
    pub fn lower_method(&mut self, decl: MethodDecl) -> Option<Method> {
        trace!("lowering method {}", decl.name);

        if decl.blocks.is_empty() {
            self.msgs.at(decl.span).parse_empty_method(&decl.name);
            return None;
        }

        let errors = self.msgs.len();
        let mut builder = MethodBuilder::new(&decl.name);
        let mut labels = Labels::new();
        let mut blocks: Vec<(BlockId, &BlockDecl)> = Vec::new();

        for block in decl.blocks.iter() {
            if let Some((_, previous)) = labels.get(&block.label) {
                self.msgs
                    .at(block.span)
                    .parse_duplicate_block(&block.label, *previous);
                continue;
            }

            let id = builder.add_block(&block.label);
            labels.insert(block.label.clone(), (id, block.span));
            blocks.push((id, block));
        }

        // Sources take the type of their definition, wherever it is.
        let mut types = HashMap::new();
        for (_, block) in blocks.iter() {
            for result in block.insns.iter().filter_map(|insn| insn.result.as_ref()) {
                if let Some(ty) = Type::from_name(&result.ty) {
                    types.entry(result.reg).or_insert(ty);
                }
            }
        }

        for (id, block) in blocks.iter() {
            for (succ, span) in block.succs.iter() {
                match labels.get(succ) {
                    Some((to, _)) => builder.add_edge(*id, *to),
                    None => self.msgs.at(*span).parse_unknown_block(succ),
                }
            }

            for (index, insn) in block.insns.iter().enumerate() {
                let last = index + 1 == block.insns.len();
                self.lower_insn(&mut builder, &labels, &types, *id, insn, last);
            }
        }

        if self.msgs.len() > errors {
            debug!("dropping method {} after {} errors", decl.name, self.msgs.len() - errors);
            return None;
        }

        let (entry, _) = blocks.first()?;
        Some(builder.build(*entry))
    }

    fn lower_insn(
        &mut self,
        builder: &mut MethodBuilder,
        labels: &Labels,
        types: &HashMap<usize, Type>,
        block: BlockId,
        insn: &InsnDecl,
        last: bool,
    ) {
        let result = match &insn.result {
            Some(result) => {
                if !self.check_register(result.reg, result.span) {
                    return;
                }

                let Some(ty) = Type::from_name(&result.ty) else {
                    self.msgs.at(result.ty_span).parse_unknown_type(&result.ty);
                    return;
                };

                if builder.is_defined(Reg(result.reg)) {
                    self.msgs
                        .at(result.span)
                        .parse_redefined_register(&Reg(result.reg).to_string());
                    return;
                }

                let spec = RegisterSpec::new(Reg(result.reg), ty);
                Some(match &result.local {
                    Some(local) => spec.with_local(local),
                    None => spec,
                })
            }

            None => None,
        };

        // Registers without a definition are version zero values; treat them
        // as ints.
        let source = |reg: usize| {
            RegisterSpec::new(Reg(reg), types.get(&reg).copied().unwrap_or(Type::Int))
        };

        if insn.opcode == "phi" {
            let Some(result) = result else {
                self.msgs.at(insn.opcode_span).parse_expected("a result register for phi");
                return;
            };

            let mut operands = Vec::with_capacity(insn.operands.len());
            for operand in insn.operands.iter() {
                match operand {
                    Operand::Register {
                        reg,
                        pred: Some((label, span)),
                        span: reg_span,
                    } => match labels.get(label) {
                        Some((pred, _)) => {
                            if !self.check_register(*reg, *reg_span) {
                                return;
                            }

                            operands.push((source(*reg), *pred));
                        }
                        None => {
                            self.msgs.at(*span).parse_unknown_block(label);
                            return;
                        }
                    },

                    Operand::Register {
                        pred: None, span, ..
                    } => {
                        self.msgs.at(*span).parse_missing_predecessor();
                        return;
                    }

                    other => {
                        self.msgs.at(other.span()).parse_expected("a register");
                        return;
                    }
                }
            }

            builder.phi(block, result, operands);
            return;
        }

        let Some((op, rest)) = self.lower_op(insn) else {
            return;
        };

        if op.ends_block() && !last {
            self.msgs.at(insn.opcode_span).parse_early_terminator(&insn.opcode);
            return;
        }

        let mut sources = Vec::with_capacity(rest.len());
        for operand in rest {
            match operand {
                Operand::Register {
                    reg,
                    pred: None,
                    span,
                } => {
                    if !self.check_register(*reg, *span) {
                        return;
                    }

                    sources.push(source(*reg));
                }

                Operand::Register {
                    pred: Some((_, span)),
                    ..
                } => {
                    self.msgs
                        .at(*span)
                        .parse_expected("a register without a predecessor block");
                    return;
                }

                other => {
                    self.msgs.at(other.span()).parse_expected("a register");
                    return;
                }
            }
        }

        builder.normal(block, op, result, sources);
    }

    /// Returns `false`, after reporting it, if `reg` is out of range.
    fn check_register(&mut self, reg: usize, span: Span) -> bool {
        if reg > Reg::MAX {
            self.msgs.at(span).parse_register_too_large(Reg::MAX);
            false
        } else {
            true
        }
    }

    /// Resolve the opcode and any leading immediate operand. Returns the
    /// operation along with the remaining (register) operands.
    fn lower_op<'d>(&mut self, insn: &'d InsnDecl) -> Option<(Op, &'d [Operand])> {
        let operands = &insn.operands[..];

        let op = match insn.opcode.as_str() {
            "move-param" => {
                let (index, span, rest) = self.literal_operand(insn)?;
                let Ok(index) = usize::try_from(index) else {
                    self.msgs.at(span).parse_expected("a non-negative parameter index");
                    return None;
                };

                return Some((Op::MoveParam(index), rest));
            }

            "const" => {
                let (value, _, rest) = self.literal_operand(insn)?;
                return Some((Op::Const(value), rest));
            }

            "invoke" => {
                let (name, rest) = self.name_operand(insn)?;
                return Some((Op::Invoke(name), rest));
            }

            "check-cast" => {
                let (name, rest) = self.name_operand(insn)?;
                return Some((Op::CheckCast(name), rest));
            }

            "move" => Op::Move,
            "neg" => Op::Neg,
            "move-result-pseudo" => Op::MoveResultPseudo,
            "goto" => Op::Goto,
            "return" | "return-void" => Op::Return,
            "throw" => Op::Throw,

            name => {
                if let Some(op) = BinOp::ALL.into_iter().find(|op| op.name() == name) {
                    Op::Binary(op)
                } else if let Some(cond) = Condition::ALL.into_iter().find(|c| c.name() == name) {
                    Op::If(cond)
                } else {
                    self.msgs.at(insn.opcode_span).parse_unknown_opcode(name);
                    return None;
                }
            }
        };

        Some((op, operands))
    }

    fn literal_operand<'d>(&mut self, insn: &'d InsnDecl) -> Option<(i64, Span, &'d [Operand])> {
        match insn.operands.first() {
            Some(Operand::Literal(value, span)) => Some((*value, *span, &insn.operands[1..])),
            other => {
                let span = other.map(Operand::span).unwrap_or(insn.opcode_span);
                self.msgs.at(span).parse_expected("an immediate such as '#0'");
                None
            }
        }
    }

    fn name_operand<'d>(&mut self, insn: &'d InsnDecl) -> Option<(String, &'d [Operand])> {
        match insn.operands.first() {
            Some(Operand::Name(name, _)) => Some((name.clone(), &insn.operands[1..])),
            other => {
                let span = other.map(Operand::span).unwrap_or(insn.opcode_span);
                self.msgs.at(span).parse_expected("a name");
                None
            }
        }
    }
}
