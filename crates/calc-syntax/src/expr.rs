use crate::lexicon::{Lexicon, LexiconS, Op};

use calc_common::types::Span;

use std::fmt::{self, Display, Formatter};

pub type ExprS = Box<Expr>;

/// A node of the expression tree.
///
/// The shape (`lexicon`) is fixed at construction. Children are owned
/// exclusively by their parent; only operator nodes carry any.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub lexicon: Lexicon,
    pub span: Span,
    pub left: Option<ExprS>,
    pub right: Option<ExprS>,
}

impl Expr {
    pub fn new(lexicon_s: &LexiconS) -> Self {
        let (lexicon, span) = lexicon_s;
        Self { lexicon: lexicon.clone(), span: span.clone(), left: None, right: None }
    }

    pub fn op(&self) -> Op {
        self.lexicon.op()
    }

    pub fn precedence(&self) -> i32 {
        self.op().precedence()
    }
}

/// Prints the tree as an s-expression, e.g. `(+ a (* b c))`.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.lexicon {
            Lexicon::Scalar(_) | Lexicon::Identifier(_) => write!(f, "{}", self.lexicon)?,
            Lexicon::Operator(op) => {
                match op {
                    Op::OpenParen => write!(f, "(group")?,
                    op => write!(f, "({op}")?,
                }
                for child in [&self.left, &self.right].into_iter().flatten() {
                    write!(f, " {child}")?;
                }
                write!(f, ")")?;
            }
        }
        Ok(())
    }
}
