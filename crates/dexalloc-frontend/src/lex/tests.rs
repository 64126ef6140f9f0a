use super::{lex, Token};
use crate::mock::MockDriver;

fn check(source: &str, expected: &[Token]) {
    let mut driver = MockDriver::default();
    let tokens: Vec<_> = lex(&mut driver, source, 0)
        .into_iter()
        .map(|(tok, _)| tok)
        .collect();

    assert_eq!(expected, &tokens[..]);
    assert!(driver.messages.is_empty());
}

#[test]
fn lex_instruction() {
    check(
        "v3:long = add v1 v2",
        &[
            Token::Register(3),
            Token::Colon,
            Token::Name("long".into()),
            Token::Equal,
            Token::Name("add".into()),
            Token::Register(1),
            Token::Register(2),
            Token::Newline,
        ],
    );
}

#[test]
fn lex_keywords_and_dashed_names() {
    check(
        "method main\nblock entry -> exit\n  v0:int = move-param #0",
        &[
            Token::Method,
            Token::Name("main".into()),
            Token::Newline,
            Token::Block,
            Token::Name("entry".into()),
            Token::Arrow,
            Token::Name("exit".into()),
            Token::Newline,
            Token::Register(0),
            Token::Colon,
            Token::Name("int".into()),
            Token::Equal,
            Token::Name("move-param".into()),
            Token::Literal(0),
            Token::Newline,
        ],
    );
}

#[test]
fn lex_phi_operands() {
    check(
        "phi v1@left v2@right",
        &[
            Token::Name("phi".into()),
            Token::Register(1),
            Token::At,
            Token::Name("left".into()),
            Token::Register(2),
            Token::At,
            Token::Name("right".into()),
            Token::Newline,
        ],
    );
}

#[test]
fn lex_skips_comments_and_blank_lines() {
    check(
        "\n\n; a comment\ngoto ; trailing\n\n\nconst #-12\n",
        &[
            Token::Name("goto".into()),
            Token::Newline,
            Token::Name("const".into()),
            Token::Literal(-12),
            Token::Newline,
        ],
    );
}

#[test]
fn lex_registers_need_digits() {
    check(
        "v vx v10x",
        &[
            Token::Name("v".into()),
            Token::Name("vx".into()),
            Token::Name("v10x".into()),
            Token::Newline,
        ],
    );
}

#[test]
fn lex_invalid_character() {
    let mut driver = MockDriver::default();
    let tokens = lex(&mut driver, "goto %", 0);

    assert_eq!(2, tokens.len());
    assert_eq!(1, driver.messages.len());
}

#[test]
fn lex_register_overflowing_usize() {
    let mut driver = MockDriver::default();
    let tokens = lex(&mut driver, "return v99999999999999999999999", 0);

    assert!(tokens
        .iter()
        .all(|(tok, _)| !matches!(tok, Token::Register(_))));
    assert_eq!(1, driver.messages.len());
}
