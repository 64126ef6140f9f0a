use pretty::{Arena, DocAllocator, DocBuilder};

use super::{Block, Insn, InsnKind, Method, Op};
use crate::mapper::RegisterMapper;
use crate::register::{Reg, RegisterSpec};

/// Renders a method as a listing, in the same syntax the listing parser
/// accepts. When given a mapper, every register is annotated with the slot it
/// was assigned (`v3/r1`).
pub struct Prettier<'a> {
    method: &'a Method,
    mapper: Option<&'a RegisterMapper>,
    allocator: Arena<'a>,
    width: usize,
}

impl<'a> Prettier<'a> {
    pub fn new(method: &'a Method) -> Self {
        Self {
            method,
            mapper: None,
            allocator: Arena::new(),
            width: 80,
        }
    }

    pub fn with_mapper(self, mapper: &'a RegisterMapper) -> Self {
        Self {
            mapper: Some(mapper),
            ..self
        }
    }

    pub fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }

    #[must_use]
    pub fn pretty_method(&'a self) -> String {
        let doc = self.doc_method();
        let mut res = Vec::new();
        doc.render(self.width, &mut res).unwrap();
        String::from_utf8(res).unwrap()
    }

    #[must_use]
    pub fn pretty_insn(&'a self, insn: &Insn) -> String {
        let doc = self.doc_insn(insn);
        let mut res = Vec::new();
        doc.render(self.width, &mut res).unwrap();
        String::from_utf8(res).unwrap()
    }

    fn doc_method(&'a self) -> DocBuilder<Arena<'a>> {
        let mut header = self
            .allocator
            .text(format!("method {}", self.method.name));

        if let Some(mapper) = self.mapper {
            header = header.append(self.allocator.text(format!(
                " ; {} registers",
                mapper.register_count()
            )));
        }

        header.append(self.allocator.hardline()).append(
            self.allocator.intersperse(
                self.method.blocks().map(|block| self.doc_block(block)),
                self.allocator.hardline(),
            ),
        )
    }

    fn doc_block(&'a self, block: &'a Block) -> DocBuilder<Arena<'a>> {
        let mut header = self.allocator.text(format!("block {}", block.label));

        if !block.succs.is_empty() {
            let succs: Vec<_> = block
                .succs
                .iter()
                .map(|succ| self.method.block(*succ).label.as_str())
                .collect();
            header = header.append(self.allocator.text(format!(" -> {}", succs.join(", "))));
        }

        if !block.live_out().is_empty() {
            let live: Vec<_> = block
                .live_out()
                .iter()
                .map(|reg| self.reg_name(*reg))
                .collect();
            header = header.append(self.allocator.text(format!(" ; live-out: {}", live.join(" "))));
        }

        let insns = self.allocator.concat(block.insns().iter().map(|id| {
            self.allocator
                .hardline()
                .append(self.doc_insn(self.method.insn(*id)))
        }));

        header.append(insns.nest(2))
    }

    fn doc_insn(&'a self, insn: &Insn) -> DocBuilder<Arena<'a>> {
        let result = match &insn.result {
            Some(result) => self
                .doc_spec(result)
                .append(self.allocator.text(" = ")),
            None => self.allocator.nil(),
        };

        let body = match &insn.kind {
            InsnKind::Phi(preds) => {
                self.allocator
                    .text("phi")
                    .append(self.allocator.concat(insn.sources.iter().zip(preds).map(
                        |(source, pred)| {
                            self.allocator.text(format!(
                                " {}@{}",
                                self.reg_name(source.reg),
                                self.method.block(*pred).label
                            ))
                        },
                    )))
            }

            InsnKind::Normal(op) => self
                .doc_op(op, insn.sources.is_empty())
                .append(self.allocator.concat(insn.sources.iter().map(|source| {
                    self.allocator
                        .text(format!(" {}", self.reg_name(source.reg)))
                }))),
        };

        result.append(body)
    }

    fn doc_op(&'a self, op: &Op, no_sources: bool) -> DocBuilder<Arena<'a>> {
        let text = match op {
            Op::MoveParam(index) => format!("move-param #{index}"),
            Op::Move => "move".into(),
            Op::Const(value) => format!("const #{value}"),
            Op::Binary(op) => op.name().into(),
            Op::Neg => "neg".into(),
            Op::Invoke(name) => format!("invoke {name}"),
            Op::CheckCast(name) => format!("check-cast {name}"),
            Op::MoveResultPseudo => "move-result-pseudo".into(),
            Op::If(cond) => cond.name().into(),
            Op::Goto => "goto".into(),
            Op::Return if no_sources => "return-void".into(),
            Op::Return => "return".into(),
            Op::Throw => "throw".into(),
        };

        self.allocator.text(text)
    }

    fn doc_spec(&'a self, spec: &RegisterSpec) -> DocBuilder<Arena<'a>> {
        let mut doc = self
            .allocator
            .text(format!("{}:{}", self.reg_name(spec.reg), spec.ty));

        if let Some(local) = &spec.local {
            doc = doc.append(self.allocator.text(format!("({local})")));
        }

        doc
    }

    fn reg_name(&self, reg: Reg) -> String {
        match self.mapper.and_then(|mapper| mapper.get(reg)) {
            Some(mapping) => format!("{reg}/r{}", mapping.slot),
            None => format!("{reg}"),
        }
    }
}
