//! Tokenizer for restricted arithmetic.

use super::ast::{BinaryOp, OPERATORS};
use super::{ExprError, MAX_TOKENS, Number};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TokenKind {
    Number(Number),
    Operator(BinaryOp),
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset into the source text.
    pub at: usize,
}

impl Token {
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Operator(op) => op.symbol().to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
        }
    }
}

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = src[pos..].chars().next() {
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        let start = pos;
        let kind = if ch.is_ascii_digit() || (ch == '.' && starts_with_digit(&src[pos + 1..])) {
            let end = number_end(src, pos);
            pos = end;
            TokenKind::Number(number(&src[start..end])?)
        } else if ch.is_alphabetic() || ch == '_' {
            let end = src[pos..]
                .char_indices()
                .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
                .map_or(src.len(), |(i, _)| pos + i);
            return Err(ExprError::Name(src[start..end].to_string()));
        } else if ch == '(' {
            pos += 1;
            TokenKind::LParen
        } else if ch == ')' {
            pos += 1;
            TokenKind::RParen
        } else {
            match OPERATORS.iter().find(|(symbol, _)| src[pos..].starts_with(symbol)) {
                Some((symbol, op)) => {
                    pos += symbol.len();
                    TokenKind::Operator(*op)
                }
                None => return Err(ExprError::UnexpectedChar { ch, at: pos }),
            }
        };

        if tokens.len() == MAX_TOKENS {
            return Err(ExprError::TooLong);
        }
        tokens.push(Token { kind, at: start });
    }

    Ok(tokens)
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Finds the end of a number-like run: alphanumerics, `.`, `_`, and a sign
/// directly after an exponent marker. Validation happens in [`number`].
fn number_end(src: &str, start: usize) -> usize {
    let mut prev = '\0';

    for (i, c) in src[start..].char_indices() {
        let continues = c.is_ascii_alphanumeric()
            || c == '.'
            || c == '_'
            || ((c == '+' || c == '-') && (prev == 'e' || prev == 'E'));
        if !continues {
            return start + i;
        }
        prev = c;
    }
    src.len()
}

fn number(text: &str) -> Result<Number, ExprError> {
    let well_formed = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return Err(ExprError::MalformedNumber(text.to_string()));
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Number::Int(i));
        }
    }

    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Number::Float(f)),
        Ok(_) => Err(ExprError::NonFinite),
        Err(_) => Err(ExprError::MalformedNumber(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .expect("tokenizes")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("2**3 ^ -1"),
            vec![
                TokenKind::Number(Number::Int(2)),
                TokenKind::Operator(BinaryOp::Pow),
                TokenKind::Number(Number::Int(3)),
                TokenKind::Operator(BinaryOp::Xor),
                TokenKind::Operator(BinaryOp::Sub),
                TokenKind::Number(Number::Int(1)),
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(kinds("12"), vec![TokenKind::Number(Number::Int(12))]);
        assert_eq!(kinds("1.5"), vec![TokenKind::Number(Number::Float(1.5))]);
        assert_eq!(kinds(".25"), vec![TokenKind::Number(Number::Float(0.25))]);
        assert_eq!(kinds("2e-3"), vec![TokenKind::Number(Number::Float(0.002))]);
        assert_eq!(
            kinds("99999999999999999999"),
            vec![TokenKind::Number(Number::Float(1e20))]
        );
    }

    #[test]
    fn test_exponent_sign_only_after_marker() {
        assert_eq!(
            kinds("1-2"),
            vec![
                TokenKind::Number(Number::Int(1)),
                TokenKind::Operator(BinaryOp::Sub),
                TokenKind::Number(Number::Int(2)),
            ]
        );
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let tokens = tokenize(" (1 +2)").expect("tokenizes");
        let offsets: Vec<usize> = tokens.iter().map(|t| t.at).collect();
        assert_eq!(offsets, vec![1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_rejects_names_and_stray_characters() {
        assert_eq!(
            tokenize("1 + foo_bar"),
            Err(ExprError::Name("foo_bar".to_string()))
        );
        assert_eq!(
            tokenize("1 = 1"),
            Err(ExprError::UnexpectedChar { ch: '=', at: 2 })
        );
        assert_eq!(
            tokenize("."),
            Err(ExprError::UnexpectedChar { ch: '.', at: 0 })
        );
        assert_eq!(
            tokenize("1_000"),
            Err(ExprError::MalformedNumber("1_000".to_string()))
        );
    }
}
