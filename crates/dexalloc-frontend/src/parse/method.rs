use dexalloc_common::message::Span;

use super::tree::{BlockDecl, InsnDecl, MethodDecl, Operand, ResultDecl};
use super::Parser;
use crate::lex::Token;

impl<I> Parser<I>
where
    I: Iterator<Item = (Token, Span)>,
{
    /// ```abnf
    /// program = *method
    /// ```
    pub fn parse_program(&mut self) -> Vec<MethodDecl> {
        let mut methods = Vec::new();

        while !self.is_done() {
            if self.peek(Token::Method) {
                methods.push(self.parse_method());
            } else {
                let span = self.curr_span();
                self.msgs.at(span).parse_expected("a method declaration");

                while !self.is_done() && !self.peek(Token::Method) {
                    self.advance();
                }
            }
        }

        methods
    }

    /// ```abnf
    /// method = "method" NAME NEWLINE *block
    /// ```
    fn parse_method(&mut self) -> MethodDecl {
        let start = self.matches(Token::Method).unwrap_or(self.default_span);
        let (name, name_span) = self
            .expect_name("a method name")
            .unwrap_or_else(|| (String::new(), start));
        self.end_line();

        let mut blocks = Vec::new();
        while !self.is_done() && !self.peek(Token::Method) {
            if self.peek(Token::Block) {
                blocks.push(self.parse_block());
            } else {
                let span = self.curr_span();
                self.msgs.at(span).parse_outside_block();
                self.skip_line();
            }
        }

        MethodDecl {
            name,
            span: start + name_span,
            blocks,
        }
    }

    /// ```abnf
    /// block = "block" NAME ["->" NAME *("," NAME)] NEWLINE *insn
    /// ```
    fn parse_block(&mut self) -> BlockDecl {
        let start = self.matches(Token::Block).unwrap_or(self.default_span);
        let (label, label_span) = self
            .expect_name("a block name")
            .unwrap_or_else(|| (String::new(), start));

        let mut succs = Vec::new();
        if self.consume(Token::Arrow) {
            while let Some(succ) = self.expect_name("a successor block name") {
                succs.push(succ);
                if !self.consume(Token::Comma) {
                    break;
                }
            }
        }

        self.end_line();

        let mut insns = Vec::new();
        while !self.is_done() && !self.peek(&[Token::Method, Token::Block][..]) {
            if let Some(insn) = self.parse_insn() {
                insns.push(insn);
            }
        }

        BlockDecl {
            label,
            span: start + label_span,
            succs,
            insns,
        }
    }

    /// ```abnf
    /// insn = [result "="] NAME *operand NEWLINE
    /// ```
    ///
    /// Recovers by skipping the rest of the line.
    fn parse_insn(&mut self) -> Option<InsnDecl> {
        let result = if self.peek(Token::Register(0)) {
            let Some(result) = self.parse_result() else {
                self.skip_line();
                return None;
            };

            if !self.consume(Token::Equal) {
                let span = self.curr_span();
                self.msgs.at(span).parse_expected("'='");
                self.skip_line();
                return None;
            }

            Some(result)
        } else {
            None
        };

        let Some((opcode, opcode_span)) = self.expect_name("an opcode") else {
            self.skip_line();
            return None;
        };

        let mut operands = Vec::new();
        while !self.is_done() && !self.peek(Token::Newline) {
            match self.parse_operand() {
                Some(operand) => operands.push(operand),
                None => {
                    self.skip_line();
                    return None;
                }
            }
        }

        self.consume(Token::Newline);

        let mut span = opcode_span;
        if let Some(result) = &result {
            span += result.span;
        }

        if let Some(operand) = operands.last() {
            span += operand.span();
        }

        Some(InsnDecl {
            result,
            opcode,
            opcode_span,
            operands,
            span,
        })
    }

    /// ```abnf
    /// result = REGISTER ":" NAME ["(" NAME ")"]
    /// ```
    fn parse_result(&mut self) -> Option<ResultDecl> {
        let (reg, start) = self.register()?;

        if !self.consume(Token::Colon) {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected("':' followed by a type");
            return None;
        }

        let (ty, ty_span) = self.expect_name("a type")?;
        let mut end = ty_span;

        let local = if self.consume(Token::LParen) {
            let (local, _) = self.expect_name("a local variable name")?;

            match self.matches(Token::RParen) {
                Some(span) => end = span,
                None => {
                    let span = self.curr_span();
                    self.msgs.at(span).parse_expected("')'");
                    return None;
                }
            }

            Some(local)
        } else {
            None
        };

        Some(ResultDecl {
            reg,
            ty,
            ty_span,
            local,
            span: start + end,
        })
    }

    /// ```abnf
    /// operand = REGISTER ["@" NAME]
    /// operand =/ LITERAL
    /// operand =/ NAME
    /// ```
    fn parse_operand(&mut self) -> Option<Operand> {
        if let Some((reg, span)) = self.register() {
            let pred = if self.consume(Token::At) {
                Some(self.expect_name("a predecessor block name")?)
            } else {
                None
            };

            let span = match &pred {
                Some((_, pred_span)) => span + *pred_span,
                None => span,
            };

            Some(Operand::Register { reg, pred, span })
        } else if let Some((value, span)) = self.literal() {
            Some(Operand::Literal(value, span))
        } else if let Some((name, span)) = self.name() {
            Some(Operand::Name(name, span))
        } else {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected("an operand");
            None
        }
    }
}
