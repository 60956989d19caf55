//! Padding values and the arithmetic they are written in.
//!
//! Padding is entered as a small expression (`720 - 90 / 4`, `(10 + 2) * 2`), not only as a
//! literal. Only numeric literals, `+ - * /`, unary signs and parentheses are accepted.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 20.0,
            right: 20.0,
            top: 20.0,
            bottom: 24.0,
        }
    }
}

impl Padding {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn from_exprs(left: &str, right: &str, top: &str, bottom: &str) -> Result<Self> {
        let side = |side: &'static str, expr: &str| {
            eval_expr(expr).map_err(|e| Error::InvalidPadding {
                side,
                expr: expr.to_string(),
                message: e.message,
            })
        };
        Ok(Self {
            left: side("left", left)?,
            right: side("right", right)?,
            top: side("top", top)?,
            bottom: side("bottom", bottom)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ExprError {
    pub message: String,
}

impl ExprError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Evaluates a padding expression.
///
/// ```
/// assert_eq!(boxfit_core::padding::eval_expr("720 - 90 / 4").unwrap(), 697.5);
/// ```
pub fn eval_expr(input: &str) -> std::result::Result<f64, ExprError> {
    let tokens = Lexer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(ExprError::new("empty expression"));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let v = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(ExprError::new(format!("unexpected {tok}")));
    }
    if !v.is_finite() {
        return Err(ExprError::new("result is not a finite number"));
    }
    Ok(v)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl std::fmt::Display for Tok {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "number {v}"),
            Tok::Plus => write!(f, "'+'"),
            Tok::Minus => write!(f, "'-'"),
            Tok::Star => write!(f, "'*'"),
            Tok::Slash => write!(f, "'/'"),
            Tok::LParen => write!(f, "'('"),
            Tok::RParen => write!(f, "')'"),
        }
    }
}

struct Lexer<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Lexer<'input> {
    fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> std::result::Result<Tok, ExprError> {
        let start = self.pos;
        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            return Err(ExprError::new(format!("malformed number at offset {start}")));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                return Err(ExprError::new(format!("malformed exponent at offset {start}")));
            }
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Tok::Num)
            .map_err(|_| ExprError::new(format!("malformed number {text:?}")))
    }

    fn tokenize(mut self) -> std::result::Result<Vec<Tok>, ExprError> {
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            let tok = match b {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.pos += 1;
                    continue;
                }
                b'0'..=b'9' | b'.' => self.number()?,
                b'+' | b'-' | b'*' | b'/' | b'(' | b')' => {
                    self.bump();
                    match b {
                        b'+' => Tok::Plus,
                        b'-' => Tok::Minus,
                        b'*' => Tok::Star,
                        b'/' => Tok::Slash,
                        b'(' => Tok::LParen,
                        _ => Tok::RParen,
                    }
                }
                _ => {
                    let ch = self.input[self.pos..].chars().next().unwrap_or('?');
                    return Err(ExprError::new(format!(
                        "unexpected character {ch:?} at offset {}",
                        self.pos
                    )));
                }
            };
            out.push(tok);
        }
        Ok(out)
    }
}

const MAX_DEPTH: usize = 256;

// Recursive descent; unary signs bind tighter than `*` and `/`.
struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Tok> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Tok> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    fn expr(&mut self) -> std::result::Result<f64, ExprError> {
        let mut acc = self.term()?;
        while let Some(op @ (Tok::Plus | Tok::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == Tok::Plus {
                acc += rhs;
            } else {
                acc -= rhs;
            }
        }
        Ok(acc)
    }

    fn term(&mut self) -> std::result::Result<f64, ExprError> {
        let mut acc = self.factor()?;
        while let Some(op @ (Tok::Star | Tok::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == Tok::Star {
                acc *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(ExprError::new("division by zero"));
                }
                acc /= rhs;
            }
        }
        Ok(acc)
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> std::result::Result<f64, ExprError>,
    ) -> std::result::Result<f64, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::new("expression nested too deeply"));
        }
        self.depth += 1;
        let v = f(self);
        self.depth -= 1;
        v
    }

    fn factor(&mut self) -> std::result::Result<f64, ExprError> {
        match self.next() {
            Some(Tok::Num(v)) => Ok(v),
            Some(Tok::Plus) => self.nested(Self::factor),
            Some(Tok::Minus) => Ok(-self.nested(Self::factor)?),
            Some(Tok::LParen) => {
                let v = self.nested(Self::expr)?;
                match self.next() {
                    Some(Tok::RParen) => Ok(v),
                    Some(tok) => Err(ExprError::new(format!("expected ')', found {tok}"))),
                    None => Err(ExprError::new("unclosed '('")),
                }
            }
            Some(tok) => Err(ExprError::new(format!("unexpected {tok}"))),
            None => Err(ExprError::new("unexpected end of expression")),
        }
    }
}
