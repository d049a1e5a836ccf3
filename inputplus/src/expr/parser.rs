//! Recursive-descent parser for restricted arithmetic.
//!
//! Precedence, loosest first:
//! - Xor: `^`
//! - Additive: `+`, `-`
//! - Multiplicative: `*`, `/`
//! - Unary: `-`
//! - Power: `**` (right associative, binds tighter than a unary minus on its left)
//! - Primary: number literals, parenthesised expressions

use super::ast::{BinaryOp, Expr};
use super::lexer::{Token, TokenKind};
use super::{ExprError, MAX_DEPTH};

pub(crate) fn parse(tokens: Vec<Token>) -> Result<Expr, ExprError> {
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn eat_operator(&mut self, op: BinaryOp) -> bool {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Operator(found),
                ..
            }) if found == op => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ExprError> {
        self.parse_xor()
    }

    fn parse_xor(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_sum()?;

        while self.eat_operator(BinaryOp::Xor) {
            let right = self.parse_sum()?;
            left = Expr::Binary(BinaryOp::Xor, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_sum(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_product()?;

        loop {
            let op = if self.eat_operator(BinaryOp::Add) {
                BinaryOp::Add
            } else if self.eat_operator(BinaryOp::Sub) {
                BinaryOp::Sub
            } else {
                break;
            };

            let right = self.parse_product()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_product(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.eat_operator(BinaryOp::Mul) {
                BinaryOp::Mul
            } else if self.eat_operator(BinaryOp::Div) {
                BinaryOp::Div
            } else {
                break;
            };

            let right = self.parse_unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }

        let expr = if self.eat_operator(BinaryOp::Sub) {
            self.parse_unary().map(|inner| Expr::Negate(Box::new(inner)))
        } else {
            self.parse_power()
        };

        self.depth -= 1;
        expr
    }

    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let base = self.parse_primary()?;

        if self.eat_operator(BinaryOp::Pow) {
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.peek().ok_or(ExprError::UnexpectedEnd)?;

        match token.kind {
            TokenKind::Number(n) => {
                self.pos += 1;
                Ok(Expr::Literal(n))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                match self.peek() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some(other) => Err(unexpected(other)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            _ => Err(unexpected(token)),
        }
    }
}

fn unexpected(token: Token) -> ExprError {
    ExprError::UnexpectedToken {
        found: token.describe(),
        at: token.at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Number;
    use crate::expr::lexer::tokenize;

    fn tree(src: &str) -> Result<Expr, ExprError> {
        parse(tokenize(src)?)
    }

    fn lit(i: i64) -> Box<Expr> {
        Box::new(Expr::Literal(Number::Int(i)))
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(
            tree("1-2-3"),
            Ok(Expr::Binary(
                BinaryOp::Sub,
                Box::new(Expr::Binary(BinaryOp::Sub, lit(1), lit(2))),
                lit(3)
            ))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            tree("2**3**2"),
            Ok(Expr::Binary(
                BinaryOp::Pow,
                lit(2),
                Box::new(Expr::Binary(BinaryOp::Pow, lit(3), lit(2)))
            ))
        );
    }

    #[test]
    fn test_unary_minus_applies_after_power() {
        assert_eq!(
            tree("-2**2"),
            Ok(Expr::Negate(Box::new(Expr::Binary(
                BinaryOp::Pow,
                lit(2),
                lit(2)
            ))))
        );
    }

    #[test]
    fn test_reports_offending_token() {
        assert_eq!(
            tree("1 ) 2"),
            Err(ExprError::UnexpectedToken {
                found: ")".to_string(),
                at: 2
            })
        );
        assert_eq!(
            tree("* 2"),
            Err(ExprError::UnexpectedToken {
                found: "*".to_string(),
                at: 0
            })
        );
    }

    #[test]
    fn test_long_chain_of_minus_signs_hits_depth_limit() {
        let src = format!("{}1", "-".repeat(MAX_DEPTH + 1));
        assert_eq!(tree(&src), Err(ExprError::TooDeep));

        let src = format!("{}1", "-".repeat(MAX_DEPTH - 1));
        assert!(tree(&src).is_ok());
    }
}
