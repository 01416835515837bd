//! Tokenizer for objective and constraint expressions.

use super::error::ExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Ident(String),
    /// One of `+ - * / ^ %`.
    Operator(char),
    /// `(` or `[`.
    Open(char),
    /// `)` or `]`.
    Close(char),
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    /// Source-like rendering for diagnostics.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Operator(c) | TokenKind::Open(c) | TokenKind::Close(c) => c.to_string(),
            TokenKind::Comma => ",".to_string(),
        }
    }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos] as char;

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let kind = match c {
            '+' | '-' | '*' | '/' | '^' | '%' => TokenKind::Operator(c),
            '(' | '[' => TokenKind::Open(c),
            ')' | ']' => TokenKind::Close(c),
            ',' => TokenKind::Comma,
            _ if c.is_ascii_digit() || c == '.' => {
                let end = scan_number(bytes, pos);
                let text = &input[pos..end];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::InvalidNumber {
                        text: text.to_string(),
                        position: pos,
                    })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position: pos,
                });
                pos = end;
                continue;
            }
            _ if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = pos + 1;
                while end < bytes.len()
                    && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(input[pos..end].to_string()),
                    position: pos,
                });
                pos = end;
                continue;
            }
            _ => {
                // Report the full (possibly multi-byte) character.
                let ch = input[pos..].chars().next().unwrap_or(c);
                return Err(ExpressionError::UnexpectedChar { ch, position: pos });
            }
        };

        tokens.push(Token {
            kind,
            position: pos,
        });
        pos += 1;
    }

    Ok(tokens)
}

/// Returns the end offset of the numeric literal starting at `start`.
///
/// Accepts `12`, `1.5`, `.5`, `3.` and an optional exponent (`1e-3`). An `e`
/// not followed by digits is left for the identifier scanner.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            end = exp;
        }
    }
    end
}
