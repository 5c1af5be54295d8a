use calc_common::types::Spanned;

use std::fmt::{self, Display, Formatter};

pub type LexiconS = Spanned<Lexicon>;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Op {
    #[default]
    None,
    OpenParen,
    CloseParen,
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    /// Relative binding strength. Only comparisons are meaningful; a node
    /// without an operator ranks highest.
    pub fn precedence(self) -> i32 {
        match self {
            Op::OpenParen => -5,
            Op::Assign => -4,
            Op::Add | Op::Sub => -3,
            Op::Mul | Op::Div => -2,
            Op::Pow => -1,
            Op::None | Op::CloseParen => 0,
        }
    }

    /// Whether the operator may join two operands.
    pub fn is_binary(self) -> bool {
        matches!(self, Op::Assign | Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Pow)
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let op = match self {
            Op::None => "",
            Op::OpenParen => "(",
            Op::CloseParen => ")",
            Op::Assign => "=",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
        };
        write!(f, "{op}")
    }
}

/// A pre-classified lexical unit.
#[derive(Clone, Debug, PartialEq)]
pub enum Lexicon {
    Scalar(f64),
    Operator(Op),
    Identifier(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexiconKind {
    Scalar,
    Operator,
    Identifier,
}

impl Lexicon {
    pub fn kind(&self) -> LexiconKind {
        match self {
            Lexicon::Scalar(_) => LexiconKind::Scalar,
            Lexicon::Operator(_) => LexiconKind::Operator,
            Lexicon::Identifier(_) => LexiconKind::Identifier,
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            Lexicon::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    /// The operator, or [`Op::None`] for scalars and identifiers.
    pub fn op(&self) -> Op {
        match self {
            Lexicon::Operator(op) => *op,
            _ => Op::None,
        }
    }

    pub fn ident(&self) -> Option<&str> {
        match self {
            Lexicon::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

impl Display for Lexicon {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Lexicon::Scalar(scalar) => write!(f, "{scalar}"),
            Lexicon::Operator(op) => write!(f, "{op}"),
            Lexicon::Identifier(ident) => write!(f, "{ident}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn precedence_order() {
        let order = [Op::OpenParen, Op::Assign, Op::Sub, Op::Mul, Op::Pow, Op::None];
        for pair in order.windows(2) {
            assert!(pair[0].precedence() < pair[1].precedence(), "{:?} < {:?}", pair[0], pair[1]);
        }
        assert_eq!(Op::Add.precedence(), Op::Sub.precedence());
        assert_eq!(Op::Mul.precedence(), Op::Div.precedence());
        assert_eq!(Op::CloseParen.precedence(), Op::None.precedence());
    }

    #[test]
    fn accessors() {
        let scalar = Lexicon::Scalar(1.5);
        assert_eq!(scalar.kind(), LexiconKind::Scalar);
        assert_eq!(scalar.scalar(), Some(1.5));
        assert_eq!(scalar.op(), Op::None);
        assert_eq!(scalar.ident(), None);

        let op = Lexicon::Operator(Op::Pow);
        assert_eq!(op.kind(), LexiconKind::Operator);
        assert_eq!(op.op(), Op::Pow);
        assert_eq!(op.scalar(), None);

        let ident = Lexicon::Identifier("x".to_string());
        assert_eq!(ident.kind(), LexiconKind::Identifier);
        assert_eq!(ident.ident(), Some("x"));
        assert_eq!(ident.op(), Op::None);
    }
}
