//! # Lexer for Intcode Assembly

use logos::Logos;

/// Tokens for Intcode assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace (not newlines)
#[logos(skip r"[#;][^\n]*")] // Skip comments
pub enum Token {
    /// Identifier (mnemonics, labels, `rb`)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Decimal number
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse().ok())]
    Number(i64),

    /// Directive (.word)
    #[regex(r"\.[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Directive(String),

    #[token(",")]
    Comma,

    /// Colon (for labels)
    #[token(":")]
    Colon,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("\n")]
    Newline,
}
