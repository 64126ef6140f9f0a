use logos::Logos;

#[derive(Logos, Debug)]
pub enum RawToken<'src> {
    #[token("method")]
    Method,

    #[token("block")]
    Block,

    #[token("->")]
    Arrow,

    #[token("=")]
    Equal,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("@")]
    At,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"#-?[0-9]+", |lex| lex.slice()[1..].parse().ok())]
    Literal(i64),

    #[regex(r"v[0-9]+", |lex| lex.slice()[1..].parse().ok(), priority = 10)]
    Register(usize),

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$./]*(-[a-zA-Z0-9_$./]+)*")]
    Name(&'src str),

    #[regex(r"\n")]
    Newline,

    #[error]
    #[regex(r"[ \t\r\f]+", logos::skip)]
    #[regex(r";[^\n]*", logos::skip)]
    Error,
}
