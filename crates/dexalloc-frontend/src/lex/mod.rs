mod token;

#[cfg(test)]
mod tests;

use dexalloc_common::message::{File, Messages, Span};
use dexalloc_common::Driver;
use log::{info, trace};
use logos::Logos;

use token::RawToken;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    Method,
    Block,

    Arrow,
    Equal,
    Colon,
    Comma,
    At,
    LParen,
    RParen,

    Literal(i64),
    Register(usize),
    Name(String),

    Newline,
}

pub fn lex(driver: &mut impl Driver, src: impl AsRef<str>, file: File) -> Vec<(Token, Span)> {
    info!("lexing file with id {file}");
    let mut lexer = Lexer::new(src.as_ref(), file);
    lexer.lex();
    driver.report(lexer.msgs);
    trace!("done lexing {file}");
    lexer.res
}

struct Lexer<'src> {
    lex: logos::SpannedIter<'src, RawToken<'src>>,
    file: File,
    res: Vec<(Token, Span)>,
    msgs: Messages,
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str, file: File) -> Self {
        Self {
            lex: RawToken::lexer(src).spanned(),
            file,
            res: Vec::new(),
            msgs: Messages::new(),
        }
    }

    fn lex(&mut self) {
        while let Some((tok, span)) = self.lex.next() {
            let span = Span::new(self.file, span.start, span.end);
            let tok = match tok {
                RawToken::Method => Token::Method,
                RawToken::Block => Token::Block,
                RawToken::Arrow => Token::Arrow,
                RawToken::Equal => Token::Equal,
                RawToken::Colon => Token::Colon,
                RawToken::Comma => Token::Comma,
                RawToken::At => Token::At,
                RawToken::LParen => Token::LParen,
                RawToken::RParen => Token::RParen,
                RawToken::Literal(value) => Token::Literal(value),
                RawToken::Register(reg) => Token::Register(reg),
                RawToken::Name(name) => Token::Name(name.into()),

                // Blank lines and leading newlines carry no meaning.
                RawToken::Newline => match self.res.last() {
                    None | Some((Token::Newline, _)) => continue,
                    Some(_) => Token::Newline,
                },

                RawToken::Error => {
                    self.msgs.at(span).lex_invalid();
                    continue;
                }
            };

            self.res.push((tok, span));
        }

        // Every line is terminated, including the last one.
        if let Some((tok, span)) = self.res.last() {
            if tok != &Token::Newline {
                let span = Span::new(self.file, span.end, span.end);
                self.res.push((Token::Newline, span));
            }
        }
    }
}
