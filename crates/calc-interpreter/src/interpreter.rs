use crate::env::Env;

use calc_common::error::{Error, EvalError, Result};
use calc_syntax::{Expr, Lexer, Op};

/// Evaluates `expr`, reading identifiers from and writing assignments to
/// `env`. Division by zero and similar cases yield infinities or NaN.
pub fn evaluate(expr: &Expr, env: &mut Env) -> Result<f64> {
    match expr.op() {
        Op::Add => match &expr.left {
            None => evaluate(rt(expr)?, env),
            Some(lt) => Ok(evaluate(lt, env)? + evaluate(rt(expr)?, env)?),
        },
        Op::Sub => match &expr.left {
            None => Ok(-evaluate(rt(expr)?, env)?),
            Some(lt) => Ok(evaluate(lt, env)? - evaluate(rt(expr)?, env)?),
        },
        Op::Mul => Ok(evaluate(lt(expr)?, env)? * evaluate(rt(expr)?, env)?),
        Op::Div => Ok(evaluate(lt(expr)?, env)? / evaluate(rt(expr)?, env)?),
        Op::Pow => Ok(evaluate(lt(expr)?, env)?.powf(evaluate(rt(expr)?, env)?)),
        Op::Assign => {
            let target = lt(expr)?;
            let name = target.lexicon.ident().ok_or_else(|| invalid_tree(target))?;
            let value = evaluate(rt(expr)?, env)?;
            tracing::trace!(name = %name, value, "assign");
            env.set(name, value);
            Ok(value)
        }
        Op::OpenParen => evaluate(lt(expr)?, env),
        Op::None | Op::CloseParen => match expr.lexicon.ident() {
            Some(name) => env.get(name).ok_or_else(|| {
                EvalError::NotDefined { name: name.to_string(), span: expr.span.clone() }.into()
            }),
            None => expr.lexicon.scalar().ok_or_else(|| invalid_tree(expr)),
        },
    }
}

fn lt(expr: &Expr) -> Result<&Expr> {
    expr.left.as_deref().ok_or_else(|| invalid_tree(expr))
}

fn rt(expr: &Expr) -> Result<&Expr> {
    expr.right.as_deref().ok_or_else(|| invalid_tree(expr))
}

fn invalid_tree(expr: &Expr) -> Error {
    EvalError::InvalidTree { span: expr.span.clone() }.into()
}

/// A session that carries one environment across many inputs.
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Env,
}

impl Interpreter {
    /// The variables assigned so far.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Tokenizes, parses and evaluates `source`. Returns `None` if there is
    /// nothing to evaluate.
    pub fn run(&mut self, source: &str) -> Result<Option<f64>> {
        self.run_at(source, 0)
    }

    /// Like [`run`](Self::run), for a `source` found `offset` bytes into a
    /// larger file. Error spans point into that file.
    pub fn run_at(&mut self, source: &str, offset: usize) -> Result<Option<f64>> {
        let lexicons = Lexer::with_offset(source, offset).collect::<Result<Vec<_>>>()?;
        if lexicons.is_empty() {
            return Ok(None);
        }
        let expr = calc_syntax::parse(&lexicons)?;
        tracing::debug!(tree = %expr, "parsed");
        evaluate(&expr, &mut self.env).map(Some)
    }

    /// Evaluates every line of `source` in order, handing each result to
    /// `on_value`. A line that leaves a parenthesis open continues onto the
    /// next ones until it closes, as in the editor. Stops at the first error.
    pub fn run_lines(&mut self, source: &str, mut on_value: impl FnMut(f64)) -> Result<()> {
        let mut start = 0;
        let mut end = 0;
        for line in source.split_inclusive('\n') {
            end += line.len();
            let unit = &source[start..end];
            if calc_syntax::is_complete(unit) {
                if let Some(value) = self.run_at(unit, start)? {
                    on_value(value);
                }
                start = end;
            }
        }
        if start < source.len() {
            tracing::debug!(offset = start, "unclosed input at end of source");
            if let Some(value) = self.run_at(&source[start..], start)? {
                on_value(value);
            }
        }
        Ok(())
    }
}
