use std::fmt::{self, Display};

use super::BlockId;
use crate::register::RegisterSpec;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InsnId(pub usize);

impl Display for InsnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl BinOp {
    pub const ALL: [BinOp; 10] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Shl,
        Self::Shr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Rem => "rem",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::Shr => "shr",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Condition {
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Ge,
        Self::Gt,
        Self::Le,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Eq => "if-eq",
            Self::Ne => "if-ne",
            Self::Lt => "if-lt",
            Self::Ge => "if-ge",
            Self::Gt => "if-gt",
            Self::Le => "if-le",
        }
    }
}

/// The operation performed by a normal (non-phi) instruction.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Op {
    /// Materializes the incoming argument with the given index.
    MoveParam(usize),
    Move,
    Const(i64),
    Binary(BinOp),
    Neg,
    Invoke(String),
    /// Throwing cast. Always ends its block; the cast value is picked up by a
    /// `MoveResultPseudo` at the start of the successor.
    CheckCast(String),
    MoveResultPseudo,
    If(Condition),
    Goto,
    Return,
    Throw,
}

impl Op {
    /// Returns `true` if this operation must be the last one in its block.
    pub fn ends_block(&self) -> bool {
        matches!(
            self,
            Self::CheckCast(_) | Self::If(_) | Self::Goto | Self::Return | Self::Throw
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsnKind {
    Normal(Op),

    /// A phi function. The predecessor at index `i` is the block the source at
    /// index `i` flows in from.
    Phi(Vec<BlockId>),
}

/// An SSA instruction, with at most one result and any number of sources.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Insn {
    pub kind: InsnKind,
    pub result: Option<RegisterSpec>,
    pub sources: Vec<RegisterSpec>,
    pub block: BlockId,
}

impl Insn {
    pub fn normal(
        block: BlockId,
        op: Op,
        result: Option<RegisterSpec>,
        sources: Vec<RegisterSpec>,
    ) -> Self {
        Self {
            kind: InsnKind::Normal(op),
            result,
            sources,
            block,
        }
    }

    pub fn phi(block: BlockId, result: RegisterSpec, operands: Vec<(RegisterSpec, BlockId)>) -> Self {
        let (sources, preds) = operands.into_iter().unzip();
        Self {
            kind: InsnKind::Phi(preds),
            result: Some(result),
            sources,
            block,
        }
    }

    pub fn op(&self) -> Option<&Op> {
        match &self.kind {
            InsnKind::Normal(op) => Some(op),
            InsnKind::Phi(_) => None,
        }
    }

    pub fn is_phi(&self) -> bool {
        matches!(self.kind, InsnKind::Phi(_))
    }

    pub fn is_move_param(&self) -> bool {
        matches!(self.kind, InsnKind::Normal(Op::MoveParam(_)))
    }

    /// The phi operands flowing in from `pred`.
    pub fn phi_sources_from(&self, pred: BlockId) -> impl Iterator<Item = &RegisterSpec> + '_ {
        let preds: &[BlockId] = match &self.kind {
            InsnKind::Phi(preds) => preds,
            InsnKind::Normal(_) => &[],
        };

        preds
            .iter()
            .zip(self.sources.iter())
            .filter(move |(from, _)| **from == pred)
            .map(|(_, source)| source)
    }
}

impl Display for Insn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = &self.result {
            write!(f, "{result} = ")?;
        }

        match &self.kind {
            InsnKind::Phi(preds) => {
                write!(f, "phi")?;
                for (source, pred) in self.sources.iter().zip(preds) {
                    write!(f, " {}@b{}", source.reg, pred.0)?;
                }
                return Ok(());
            }

            InsnKind::Normal(op) => match op {
                Op::MoveParam(index) => write!(f, "move-param #{index}")?,
                Op::Move => write!(f, "move")?,
                Op::Const(value) => write!(f, "const #{value}")?,
                Op::Binary(op) => write!(f, "{}", op.name())?,
                Op::Neg => write!(f, "neg")?,
                Op::Invoke(name) => write!(f, "invoke {name}")?,
                Op::CheckCast(name) => write!(f, "check-cast {name}")?,
                Op::MoveResultPseudo => write!(f, "move-result-pseudo")?,
                Op::If(cond) => write!(f, "{}", cond.name())?,
                Op::Goto => write!(f, "goto")?,
                Op::Return if self.sources.is_empty() => write!(f, "return-void")?,
                Op::Return => write!(f, "return")?,
                Op::Throw => write!(f, "throw")?,
            },
        }

        for source in self.sources.iter() {
            write!(f, " {}", source.reg)?;
        }

        Ok(())
    }
}
