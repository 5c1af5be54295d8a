use crate::types::Span;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{self, SimpleFile};
use codespan_reporting::term;
use termcolor::WriteColor;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("EvalError: {0}")]
    EvalError(EvalError),
    #[error("ParseError: {0}")]
    ParseError(ParseError),
}

impl Error {
    pub fn span(&self) -> &Span {
        match self {
            Error::EvalError(e) => e.span(),
            Error::ParseError(e) => e.span(),
        }
    }
}

impl AsDiagnostic for Error {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            Error::EvalError(e) => e.as_diagnostic(),
            Error::ParseError(e) => e.as_diagnostic(),
        }
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::EvalError(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::ParseError(e)
    }
}

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum EvalError {
    #[error("invalid parse tree")]
    InvalidTree { span: Span },
    #[error("variable {name:?} does not exist")]
    NotDefined { name: String, span: Span },
}

impl EvalError {
    pub fn span(&self) -> &Span {
        match self {
            EvalError::InvalidTree { span } | EvalError::NotDefined { span, .. } => span,
        }
    }
}

impl AsDiagnostic for EvalError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_code("EvalError")
            .with_message(self.to_string())
            .with_labels(vec![Label::primary((), self.span().clone())])
    }
}

#[remain::sorted]
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("expected input")]
    ExpectedInput { span: Span },
    #[error("expected operator, found {token:?}")]
    ExpectedOperator { token: String, span: Span },
    #[error("unexpected operator {token:?}, expected identifier or scalar")]
    ExpectedPrimary { token: String, span: Span },
    #[error("unary operator {token:?} expected identifier or scalar")]
    MissingOperand { token: String, span: Span },
    #[error("unexpected input: {token:?}")]
    UnexpectedInput { token: String, span: Span },
    #[error("expected a ')' to match")]
    UnmatchedParen { span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::ExpectedInput { span }
            | ParseError::ExpectedOperator { span, .. }
            | ParseError::ExpectedPrimary { span, .. }
            | ParseError::MissingOperand { span, .. }
            | ParseError::UnexpectedInput { span, .. }
            | ParseError::UnmatchedParen { span } => span,
        }
    }
}

impl AsDiagnostic for ParseError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        let diagnostic = Diagnostic::error()
            .with_code("ParseError")
            .with_message(self.to_string())
            .with_labels(vec![Label::primary((), self.span().clone())]);
        match self {
            ParseError::UnmatchedParen { .. } => {
                diagnostic.with_notes(vec!["this '(' is never closed".to_string()])
            }
            _ => diagnostic,
        }
    }
}

trait AsDiagnostic {
    fn as_diagnostic(&self) -> Diagnostic<()>;
}

/// Renders `e` against `source` as a labelled diagnostic.
pub fn report_err(
    writer: &mut dyn WriteColor,
    name: &str,
    source: &str,
    e: &Error,
) -> Result<(), files::Error> {
    let file = SimpleFile::new(name, source);
    let config = term::Config::default();
    let diagnostic = e.as_diagnostic();
    term::emit(writer, &config, &file, &diagnostic)
}
