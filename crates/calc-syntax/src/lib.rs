pub mod expr;
pub mod lexer;
pub mod lexicon;
pub mod parser;

pub use crate::expr::{Expr, ExprS};
pub use crate::lexer::{tokenize, Lexer};
pub use crate::lexicon::{Lexicon, LexiconKind, LexiconS, Op};
pub use crate::parser::parse;

/// Whether `source` has no unclosed parenthesis. Invalid input counts as
/// complete so that the error gets reported instead of waiting for more.
pub fn is_complete(source: &str) -> bool {
    let mut depth = 0_usize;
    for lexicon in Lexer::new(source) {
        match lexicon {
            Ok((lexicon, _)) => match lexicon.op() {
                Op::OpenParen => depth += 1,
                Op::CloseParen => depth = depth.saturating_sub(1),
                _ => (),
            },
            Err(_) => return true,
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_input() {
        assert!(is_complete(""));
        assert!(is_complete("1 + 2"));
        assert!(is_complete("(1 + (2))"));
        assert!(is_complete("1 + 2)"));
        assert!(is_complete("(1 + @"));
    }

    #[test]
    fn incomplete_input() {
        assert!(!is_complete("(1 + 2"));
        assert!(!is_complete("((1 + 2)\n* 3"));
    }
}
