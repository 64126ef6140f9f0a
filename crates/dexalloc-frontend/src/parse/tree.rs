use dexalloc_common::message::Span;

#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: String,
    pub span: Span,
    pub blocks: Vec<BlockDecl>,
}

#[derive(Clone, Debug)]
pub struct BlockDecl {
    pub label: String,
    pub span: Span,
    pub succs: Vec<(String, Span)>,
    pub insns: Vec<InsnDecl>,
}

#[derive(Clone, Debug)]
pub struct InsnDecl {
    pub result: Option<ResultDecl>,
    pub opcode: String,
    pub opcode_span: Span,
    pub operands: Vec<Operand>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ResultDecl {
    pub reg: usize,
    pub ty: String,
    pub ty_span: Span,
    pub local: Option<String>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum Operand {
    Register {
        reg: usize,
        pred: Option<(String, Span)>,
        span: Span,
    },
    Literal(i64, Span),
    Name(String, Span),
}

impl Operand {
    pub fn span(&self) -> Span {
        match self {
            Self::Register { span, .. } => *span,
            Self::Literal(_, span) => *span,
            Self::Name(_, span) => *span,
        }
    }
}
