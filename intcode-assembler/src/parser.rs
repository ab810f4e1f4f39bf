//! Assembly parser
//!
//! Turns source text into one [`Statement`] per non-empty line. Labels are
//! collected but not resolved here.

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use intcode_spec::{Mode, Opcode, Value};
use logos::Logos;

/// Register name reserved for relative operands
pub const RELATIVE_BASE: &str = "rb";

/// Operand value: a literal or a label address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(Value),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub mode: Mode,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// An instruction with one operand per parameter
    Instruction { opcode: Opcode, operands: Vec<Operand> },
    /// `.word` data
    Words(Vec<Expr>),
}

/// One source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based source line
    pub line: usize,
    /// Labels defined at this line's address
    pub labels: Vec<String>,
    pub body: Option<Body>,
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    column: usize,
}

/// Parse source text into statements
pub fn parse(source: &str) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut line_start = 0;

    for (token, span) in Token::lexer(source).spanned() {
        let column = span.start - line_start + 1;
        match token {
            Ok(Token::Newline) => {
                statements.extend(parse_line(&tokens, line)?);
                tokens.clear();
                line += 1;
                line_start = span.end;
            }
            Ok(token) => tokens.push(Spanned { token, column }),
            Err(()) => {
                return Err(AssemblerError::SyntaxError {
                    line,
                    column,
                    message: format!("Unexpected input {:?}", &source[span]),
                })
            }
        }
    }
    statements.extend(parse_line(&tokens, line)?);

    Ok(statements)
}

fn parse_line(tokens: &[Spanned], line: usize) -> Result<Option<Statement>> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut parser = LineParser {
        tokens,
        pos: 0,
        line,
    };

    let mut labels = Vec::new();
    while let Some(name) = parser.label_definition()? {
        labels.push(name);
    }

    let body = match parser.next() {
        None => None,
        Some(Spanned {
            token: Token::Identifier(mnemonic),
            ..
        }) => Some(parser.instruction(mnemonic)?),
        Some(Spanned {
            token: Token::Directive(name),
            ..
        }) => {
            if name != "word" {
                return Err(AssemblerError::InvalidDirective(name.clone()));
            }
            Some(Body::Words(parser.expr_list()?))
        }
        Some(other) => {
            return Err(parser.error_at(
                other.column,
                format!("Expected instruction or directive, found {:?}", other.token),
            ))
        }
    };

    Ok(Some(Statement { line, labels, body }))
}

struct LineParser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    line: usize,
}

impl<'a> LineParser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let spanned = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(spanned)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Column of the next token, or one past the last one
    fn column(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some(s) => s.column,
            None => self.tokens.last().map_or(1, |s| s.column + 1),
        }
    }

    fn error_at(&self, column: usize, message: String) -> AssemblerError {
        AssemblerError::SyntaxError {
            line: self.line,
            column,
            message,
        }
    }

    fn error(&self, message: String) -> AssemblerError {
        self.error_at(self.column(), message)
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(s) if s.token == expected => Ok(()),
            Some(s) => Err(self.error_at(
                s.column,
                format!("Expected {:?}, found {:?}", expected, s.token),
            )),
            None => Err(self.error(format!("Expected {:?}, found end of line", expected))),
        }
    }

    /// Consume `name:` if present
    fn label_definition(&mut self) -> Result<Option<String>> {
        match (self.tokens.get(self.pos), self.tokens.get(self.pos + 1)) {
            (
                Some(Spanned {
                    token: Token::Identifier(name),
                    column,
                }),
                Some(Spanned {
                    token: Token::Colon,
                    ..
                }),
            ) => {
                if name == RELATIVE_BASE {
                    return Err(
                        self.error_at(*column, "rb is reserved and cannot be a label".to_string())
                    );
                }
                self.pos += 2;
                Ok(Some(name.clone()))
            }
            _ => Ok(None),
        }
    }

    fn instruction(&mut self, mnemonic: &str) -> Result<Body> {
        let opcode =
            Opcode::from_mnemonic(mnemonic).ok_or_else(|| AssemblerError::UnknownInstruction {
                line: self.line,
                mnemonic: mnemonic.to_string(),
            })?;

        let mut operands = Vec::new();
        if !self.at_end() {
            loop {
                operands.push(self.operand()?);
                if self.at_end() {
                    break;
                }
                self.expect(Token::Comma)?;
            }
        }

        if operands.len() != opcode.param_count() {
            return Err(AssemblerError::OperandCount {
                line: self.line,
                mnemonic: mnemonic.to_string(),
                expected: opcode.param_count(),
                found: operands.len(),
            });
        }

        if let Some(dest) = opcode.destination() {
            if operands[dest].mode == Mode::Immediate {
                return Err(AssemblerError::ImmediateDestination {
                    line: self.line,
                    mnemonic: mnemonic.to_string(),
                });
            }
        }

        Ok(Body::Instruction { opcode, operands })
    }

    fn operand(&mut self) -> Result<Operand> {
        if self.peek() != Some(&Token::LBracket) {
            let expr = self.expr()?;
            return Ok(Operand {
                mode: Mode::Immediate,
                expr,
            });
        }
        self.pos += 1;

        let operand = match self.peek() {
            Some(Token::Identifier(name)) if name == RELATIVE_BASE => {
                self.pos += 1;
                Operand {
                    mode: Mode::Relative,
                    expr: self.relative_offset()?,
                }
            }
            _ => Operand {
                mode: Mode::Positional,
                expr: self.expr()?,
            },
        };

        self.expect(Token::RBracket)?;
        Ok(operand)
    }

    /// Offset following `rb` inside brackets
    fn relative_offset(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::RBracket) => Ok(Expr::Number(0)),
            Some(Token::Plus) => {
                self.pos += 1;
                self.expr()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                match self.next() {
                    Some(Spanned {
                        token: Token::Number(n),
                        column,
                    }) => n
                        .checked_neg()
                        .map(Expr::Number)
                        .ok_or_else(|| self.error_at(*column, format!("Offset out of range: -{n}"))),
                    _ => Err(self.error("Expected number after '-'".to_string())),
                }
            }
            // "rb-5" lexes as `rb` followed by the number -5
            Some(Token::Number(n)) if *n < 0 => {
                self.pos += 1;
                Ok(Expr::Number(*n))
            }
            _ => Err(self.error("Expected '+', '-' or ']' after rb".to_string())),
        }
    }

    fn expr(&mut self) -> Result<Expr> {
        match self.next() {
            Some(Spanned {
                token: Token::Number(n),
                ..
            }) => Ok(Expr::Number(*n)),
            Some(Spanned {
                token: Token::Identifier(name),
                column,
            }) => {
                if name == RELATIVE_BASE {
                    return Err(self.error_at(*column, "rb is only valid inside brackets".to_string()));
                }
                Ok(Expr::Label(name.clone()))
            }
            Some(other) => Err(self.error_at(
                other.column,
                format!("Expected number or label, found {:?}", other.token),
            )),
            None => Err(self.error("Expected number or label, found end of line".to_string())),
        }
    }

    fn expr_list(&mut self) -> Result<Vec<Expr>> {
        let mut values = vec![self.expr()?];
        while !self.at_end() {
            self.expect(Token::Comma)?;
            values.push(self.expr()?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(source: &str) -> Statement {
        let mut statements = parse(source).unwrap();
        assert_eq!(statements.len(), 1);
        statements.remove(0)
    }

    #[test]
    fn test_parse_operand_modes() {
        let stmt = single("add [9], 10, [rb+3]");
        assert_eq!(
            stmt.body,
            Some(Body::Instruction {
                opcode: Opcode::Add,
                operands: vec![
                    Operand { mode: Mode::Positional, expr: Expr::Number(9) },
                    Operand { mode: Mode::Immediate, expr: Expr::Number(10) },
                    Operand { mode: Mode::Relative, expr: Expr::Number(3) },
                ],
            })
        );
    }

    #[test]
    fn test_parse_relative_forms() {
        for (text, offset) in [("[rb]", 0), ("[rb+4]", 4), ("[rb-4]", -4), ("[rb - 4]", -4)] {
            let stmt = single(&format!("out {text}"));
            let Some(Body::Instruction { operands, .. }) = stmt.body else {
                panic!("expected instruction");
            };
            assert_eq!(operands[0].mode, Mode::Relative, "{text}");
            assert_eq!(operands[0].expr, Expr::Number(offset), "{text}");
        }
    }

    #[test]
    fn test_parse_labels() {
        let statements = parse("start: loop:\n  jnz [flag], start\nflag: .word 1, start").unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].labels, vec!["start", "loop"]);
        assert_eq!(statements[0].body, None);
        assert_eq!(statements[1].line, 2);
        assert_eq!(
            statements[2].body,
            Some(Body::Words(vec![
                Expr::Number(1),
                Expr::Label("start".to_string())
            ]))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let statements = parse("\n; comment\n   \n# another\nhalt\n").unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].line, 5);
    }

    #[test]
    fn test_parse_unknown_instruction() {
        assert_eq!(
            parse("nop"),
            Err(AssemblerError::UnknownInstruction {
                line: 1,
                mnemonic: "nop".to_string()
            })
        );
    }

    #[test]
    fn test_parse_operand_count() {
        assert!(matches!(
            parse("add 1, 2"),
            Err(AssemblerError::OperandCount { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            parse("halt 1"),
            Err(AssemblerError::OperandCount { expected: 0, found: 1, .. })
        ));
    }

    #[test]
    fn test_parse_immediate_destination() {
        assert!(matches!(
            parse("in 5"),
            Err(AssemblerError::ImmediateDestination { line: 1, .. })
        ));
        assert!(matches!(
            parse("\nlt 1, 2, 3"),
            Err(AssemblerError::ImmediateDestination { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_syntax_error_position() {
        let err = parse("halt\nout [5").unwrap_err();
        assert!(matches!(err, AssemblerError::SyntaxError { line: 2, .. }));

        let err = parse("out @").unwrap_err();
        assert_eq!(
            err,
            AssemblerError::SyntaxError {
                line: 1,
                column: 5,
                message: "Unexpected input \"@\"".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rb_outside_brackets() {
        assert!(matches!(
            parse("out rb"),
            Err(AssemblerError::SyntaxError { .. })
        ));
    }

    #[test]
    fn test_parse_rb_label_rejected() {
        assert_eq!(
            parse("halt
  rb: .word 1"),
            Err(AssemblerError::SyntaxError {
                line: 2,
                column: 3,
                message: "rb is reserved and cannot be a label".to_string(),
            })
        );
        assert!(matches!(
            parse("start: rb: halt"),
            Err(AssemblerError::SyntaxError { line: 1, column: 8, .. })
        ));
    }

    #[test]
    fn test_parse_invalid_directive() {
        assert_eq!(
            parse(".data 1"),
            Err(AssemblerError::InvalidDirective("data".to_string()))
        );
    }
}
