//! Reads the textual listing format into SSA methods.

pub mod lex;
pub mod parse;

#[cfg(test)]
mod mock;

use dexalloc_common::message::File;
use dexalloc_common::ssa::Method;
use dexalloc_common::Driver;

/// Lex and parse a whole listing. Every diagnostic is reported through the
/// driver; only the methods which came through cleanly are returned.
pub fn parse_listing(driver: &mut impl Driver, src: impl AsRef<str>, file: File) -> Vec<Method> {
    let tokens = lex::lex(driver, src, file);
    parse::parse(driver, tokens, file)
}
