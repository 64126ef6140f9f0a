pub mod tree;

mod lower;
mod matcher;
mod method;


use dexalloc_common::message::{File, Messages, Span};
use dexalloc_common::ssa::Method;
use dexalloc_common::Driver;
use log::{info, trace};

use crate::lex::Token;
use lower::Lowerer;
use matcher::Matcher;

/// Parse a token stream into methods. Methods with errors are reported through
/// the driver and left out of the result.
pub fn parse(
    driver: &mut impl Driver,
    tokens: impl IntoIterator<Item = (Token, Span)>,
    file: File,
) -> Vec<Method> {
    info!("parsing file with id {file}");

    let mut parser = Parser::new(tokens, file);
    let decls = parser.parse_program();

    driver.report(parser.msgs);

    let mut lowerer = Lowerer::new();
    let methods = decls
        .into_iter()
        .filter_map(|decl| lowerer.lower_method(decl))
        .collect();

    driver.report(lowerer.msgs);

    trace!("done parsing file {file}");

    methods
}

#[derive(Debug)]
struct Parser<I> {
    tokens: I,
    curr: Option<(Token, Span)>,
    prev: Option<(Token, Span)>,
    msgs: Messages,
    default_span: Span,
}

impl<I> Parser<I>
where
    I: Iterator<Item = (Token, Span)>,
{
    pub fn new<In>(tokens: In, file: File) -> Self
    where
        In: IntoIterator<Item = (Token, Span), IntoIter = I>,
    {
        let mut parser = Self {
            tokens: tokens.into_iter(),

            curr: None,
            prev: None,

            msgs: Messages::new(),
            default_span: Span::new(file, 0, 0),
        };

        parser.advance();
        parser
    }

    fn is_done(&self) -> bool {
        self.curr.is_none()
    }

    fn advance(&mut self) {
        self.prev = self.curr.take();
        if let Some(curr) = self.tokens.next() {
            self.curr = Some(curr);
        }
    }

    fn peek(&self, matcher: impl Matcher) -> bool {
        self.curr
            .as_ref()
            .map(|(tok, _)| matcher.matches(tok))
            .unwrap_or(false)
    }

    fn consume(&mut self, matcher: impl Matcher) -> bool {
        if self.peek(matcher) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn matches(&mut self, matcher: impl Matcher) -> Option<Span> {
        if self.peek(matcher) {
            self.advance();
            self.prev.as_ref().map(|(_, span)| *span)
        } else {
            None
        }
    }

    /// The span of the current token, or of the last one if at the end.
    fn curr_span(&self) -> Span {
        self.curr
            .as_ref()
            .or(self.prev.as_ref())
            .map(|(_, span)| *span)
            .unwrap_or(self.default_span)
    }

    fn name(&mut self) -> Option<(String, Span)> {
        match &self.curr {
            Some((Token::Name(name), span)) => {
                let res = (name.clone(), *span);
                self.advance();
                Some(res)
            }
            _ => None,
        }
    }

    fn register(&mut self) -> Option<(usize, Span)> {
        match &self.curr {
            Some((Token::Register(reg), span)) => {
                let res = (*reg, *span);
                self.advance();
                Some(res)
            }
            _ => None,
        }
    }

    fn literal(&mut self) -> Option<(i64, Span)> {
        match &self.curr {
            Some((Token::Literal(value), span)) => {
                let res = (*value, *span);
                self.advance();
                Some(res)
            }
            _ => None,
        }
    }

    fn expect_name(&mut self, what: &str) -> Option<(String, Span)> {
        let res = self.name();
        if res.is_none() {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected(what);
        }
        res
    }

    /// Skip past the end of the current line.
    fn skip_line(&mut self) {
        while !self.is_done() && !self.consume(Token::Newline) {
            self.advance();
        }
    }

    fn end_line(&mut self) {
        if !self.consume(Token::Newline) {
            let span = self.curr_span();
            self.msgs.at(span).parse_expected("end of line");
            self.skip_line();
        }
    }
}
