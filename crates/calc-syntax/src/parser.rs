use crate::expr::{Expr, ExprS};
use crate::lexicon::{LexiconS, Op};

use calc_common::error::{ParseError, Result};
use calc_common::types::Span;

/// Builds an expression tree from a sequence of lexical units.
///
/// Each call takes one primary off the front, then the operator after it,
/// and recurses on the remainder. The recursion naturally nests to the right,
/// so when the remainder comes back rooted at a looser operator than the
/// current one, the two are rotated: the current operator takes the
/// remainder's left operand and becomes that operand itself.
///
/// Rotation only happens on strictly lower precedence, so operators of equal
/// precedence nest to the right (`a - b - c` is `a - (b - c)`). Recursion
/// depth grows with the input length; there is no guard against exhausting
/// the stack.
pub fn parse(lexicons: &[LexiconS]) -> Result<ExprS> {
    parse_from(lexicons, 0..0)
}

/// `eof` is the span reported when `lexicons` ends before an expression does.
fn parse_from(lexicons: &[LexiconS], eof: Span) -> Result<ExprS> {
    let first = match lexicons.first() {
        Some(first) => first,
        None => return Err(ParseError::ExpectedInput { span: eof }.into()),
    };

    let (left, pos) = match first.0.op() {
        Op::OpenParen => {
            let (paren, consumed) = group(first, &lexicons[1..])?;
            (paren, 1 + consumed)
        }
        Op::Add | Op::Sub => {
            let mut unary = Box::new(Expr::new(first));
            let (operand, consumed) = unary_operand(&lexicons[1..], first)?;
            unary.right = Some(operand);
            (unary, 1 + consumed)
        }
        Op::None => (Box::new(Expr::new(first)), 1),
        _ => {
            let (lexicon, span) = first;
            return Err(ParseError::ExpectedPrimary { token: lexicon.to_string(), span: span.clone() }
                .into());
        }
    };

    let (op_s, rest) = match lexicons[pos..].split_first() {
        Some(split) => split,
        None => return Ok(left),
    };
    if !op_s.0.op().is_binary() {
        let (lexicon, span) = op_s;
        return Err(ParseError::ExpectedOperator { token: lexicon.to_string(), span: span.clone() }
            .into());
    }

    let mut current = Box::new(Expr::new(op_s));
    current.left = Some(left);
    let eof = current.span.end..current.span.end;
    let mut next = parse_from(rest, eof)?;

    // A unary node has no left operand to hand over, so it stays on the right.
    if next.precedence() < current.precedence() && next.left.is_some() {
        tracing::trace!(current = %current.op(), next = %next.op(), "rotating");
        current.right = next.left.take();
        next.left = Some(current);
        Ok(next)
    } else {
        current.right = Some(next);
        Ok(current)
    }
}

/// Parses the group opened by `open`, whose contents start at `inner`.
/// Returns the group node and the number of units of `inner` consumed,
/// closing parenthesis included.
fn group(open: &LexiconS, inner: &[LexiconS]) -> Result<(ExprS, usize)> {
    let mut depth = 1_usize;
    let close = inner.iter().position(|(lexicon, _)| {
        match lexicon.op() {
            Op::OpenParen => depth += 1,
            Op::CloseParen => depth -= 1,
            _ => (),
        }
        depth == 0
    });
    let close = match close {
        Some(idx) => idx,
        None => return Err(ParseError::UnmatchedParen { span: open.1.clone() }.into()),
    };

    let mut paren = Box::new(Expr::new(open));
    let eof = inner[close].1.clone();
    paren.left = Some(parse_from(&inner[..close], eof)?);
    Ok((paren, close + 1))
}

/// Parses the operand of a prefix `+`/`-`: a scalar, an identifier, or a
/// parenthesized group.
fn unary_operand(lexicons: &[LexiconS], unary: &LexiconS) -> Result<(ExprS, usize)> {
    let operand = match lexicons.first() {
        Some(operand) => operand,
        None => {
            let (lexicon, span) = unary;
            return Err(ParseError::MissingOperand { token: lexicon.to_string(), span: span.clone() }
                .into());
        }
    };

    match operand.0.op() {
        Op::None => Ok((Box::new(Expr::new(operand)), 1)),
        Op::OpenParen => {
            let (paren, consumed) = group(operand, &lexicons[1..])?;
            Ok((paren, 1 + consumed))
        }
        _ => {
            let (lexicon, span) = operand;
            Err(ParseError::ExpectedPrimary { token: lexicon.to_string(), span: span.clone() }
                .into())
        }
    }
}
