//! Precedence-climbing parser and the compiled expression tree.

use super::context::EvalContext;
use super::error::ExpressionError;
use super::functions::{constant, Function};
use super::lexer::{tokenize, Token, TokenKind};
use std::collections::HashMap;
use std::fmt;

/// Precedence of unary minus: binds tighter than `* / %`, looser than `^`.
const NEGATE_PRECEDENCE: u8 = 3;

/// Combined limit on bracket nesting, unary minus chains, and operator
/// chains. Parsing, evaluation, and dropping all recurse over the tree, so
/// its depth has to stay well inside a worker thread's stack.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '%' => Some(BinaryOp::Rem),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 2,
            BinaryOp::Pow => 4,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Rem => lhs % rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Number(f64),
    Variable(String),
    Negate(Box<Node>),
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        function: Function,
        args: Vec<Node>,
    },
}

impl Node {
    fn eval(
        &self,
        ctx: &mut EvalContext,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, ExpressionError> {
        match self {
            Node::Number(n) => Ok(*n),
            Node::Variable(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| ExpressionError::UnknownIdentifier(name.clone())),
            Node::Negate(inner) => Ok(-inner.eval(ctx, bindings)?),
            Node::Binary { op, lhs, rhs } => {
                let l = lhs.eval(ctx, bindings)?;
                let r = rhs.eval(ctx, bindings)?;
                Ok(op.apply(l, r))
            }
            Node::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(ctx, bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(function.apply(&values, ctx))
            }
        }
    }
}

/// A parsed expression, ready to be evaluated many times.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_bruteforce::expr::{EvalContext, Expression};
///
/// let expr = Expression::parse("2*x1 + sqrt(x2)").unwrap();
/// let bindings = HashMap::from([("x1".to_string(), 3.0), ("x2".to_string(), 16.0)]);
/// let value = expr.eval(&mut EvalContext::seeded(0), &bindings).unwrap();
/// assert_eq!(value, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// Parses expression text.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(ExpressionError::Empty);
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let root = parser.parse_expression(1)?;
        if let Some(token) = parser.peek() {
            return Err(unexpected(token));
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// Evaluates the expression against variable bindings.
    ///
    /// Fails only on identifiers that are neither constants nor bound.
    /// Numeric problems (division by zero, domain errors) follow IEEE-754
    /// and produce infinities or NaN rather than errors.
    pub fn eval(
        &self,
        ctx: &mut EvalContext,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, ExpressionError> {
        self.root.eval(ctx, bindings)
    }

    /// The original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Result<Token, ExpressionError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ExpressionError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        match self.peek()?.kind {
            TokenKind::Operator(c) => BinaryOp::from_char(c),
            _ => None,
        }
    }

    /// Parses operators of at least `min_precedence`; all are left-associative.
    fn parse_expression(&mut self, min_precedence: u8) -> Result<Node, ExpressionError> {
        let entry_depth = self.depth;
        self.descend()?;
        let mut lhs = self.parse_operand()?;

        while let Some(op) = self.peek_binary_op() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.descend()?;
            self.pos += 1;
            let rhs = self.parse_expression(precedence + 1)?;
            lhs = Node::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        self.depth = entry_depth;
        Ok(lhs)
    }

    fn parse_operand(&mut self) -> Result<Node, ExpressionError> {
        let token = self.advance()?;
        match &token.kind {
            TokenKind::Number(n) => Ok(Node::Number(*n)),
            TokenKind::Operator('-') => {
                let inner = self.parse_expression(NEGATE_PRECEDENCE)?;
                Ok(Node::Negate(Box::new(inner)))
            }
            TokenKind::Ident(name) => {
                if matches!(self.peek(), Some(Token { kind: TokenKind::Open('('), .. })) {
                    let function = Function::from_name(name)
                        .ok_or_else(|| ExpressionError::UnknownFunction(name.clone()))?;
                    self.parse_call(function)
                } else if let Some(value) = constant(name) {
                    Ok(Node::Number(value))
                } else {
                    Ok(Node::Variable(name.clone()))
                }
            }
            TokenKind::Open(open) => {
                let inner = self.parse_expression(1)?;
                self.expect_close(*open, token.position)?;
                Ok(inner)
            }
            _ => Err(unexpected(&token)),
        }
    }

    fn parse_call(&mut self, function: Function) -> Result<Node, ExpressionError> {
        let open = self.advance()?;
        let mut args = Vec::new();

        if matches!(self.peek(), Some(Token { kind: TokenKind::Close(')'), .. })) {
            self.pos += 1;
        } else {
            loop {
                args.push(self.parse_expression(1)?);
                let token = self.advance()?;
                match token.kind {
                    TokenKind::Comma => continue,
                    TokenKind::Close(')') => break,
                    TokenKind::Close(found) => {
                        return Err(ExpressionError::MismatchedBracket {
                            open: open.position,
                            found,
                            position: token.position,
                        })
                    }
                    _ => return Err(unexpected(&token)),
                }
            }
        }

        function.check_arity(args.len())?;
        Ok(Node::Call { function, args })
    }

    fn expect_close(&mut self, open: char, open_position: usize) -> Result<(), ExpressionError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Close(found) if matches_bracket(open, found) => Ok(()),
            TokenKind::Close(found) => Err(ExpressionError::MismatchedBracket {
                open: open_position,
                found,
                position: token.position,
            }),
            _ => Err(unexpected(&token)),
        }
    }
}

fn matches_bracket(open: char, close: char) -> bool {
    matches!((open, close), ('(', ')') | ('[', ']'))
}

fn unexpected(token: &Token) -> ExpressionError {
    ExpressionError::UnexpectedToken {
        found: token.describe(),
        position: token.position,
    }
}
