use crate::lexicon::{Lexicon, LexiconS, Op};

use calc_common::error::{ParseError, Result};
use calc_common::types::Span;
use logos::Logos;

use std::num::ParseFloatError;

pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    pending: Option<(Token, Span)>,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_offset(source, 0)
    }

    /// Lexes `source` as if it started `offset` bytes into a larger file.
    pub fn with_offset(source: &'a str, offset: usize) -> Self {
        Self { inner: Token::lexer(source), pending: None, offset }
    }

    fn shift(&self, span: Span) -> Span {
        span.start + self.offset..span.end + self.offset
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<LexiconS>;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, mut span) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let token = self.inner.next()?;
                (token, self.inner.span())
            }
        };

        match token.into_lexicon() {
            Some(lexicon) => Some(Ok((lexicon, self.shift(span)))),
            None => {
                // Recover error, merging only adjacent invalid input.
                while let Some(token) = self.inner.next() {
                    let span_new = self.inner.span();
                    if token == Token::Error && span.end == span_new.start {
                        span.end = span_new.end;
                    } else {
                        self.pending = Some((token, span_new));
                        break;
                    }
                }

                Some(Err(ParseError::UnexpectedInput {
                    token: self.inner.source()[span.clone()].to_string(),
                    span: self.shift(span),
                }
                .into()))
            }
        }
    }
}

/// Lexes the whole of `source`, stopping at the first invalid input.
pub fn tokenize(source: &str) -> Result<Vec<LexiconS>> {
    Lexer::new(source).collect()
}

#[derive(Clone, Debug, Logos, PartialEq)]
pub enum Token {
    #[token("(")]
    LtParen,
    #[token(")")]
    RtParen,
    #[token("=")]
    Equal,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,

    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", lex_identifier)]
    Identifier(String),
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", lex_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", lex_number)]
    Number(f64),

    #[regex(r"#.*", logos::skip)]
    #[regex(r"[ \r\n\t\f]+", logos::skip)]
    #[error]
    Error,
}

impl Token {
    fn into_lexicon(self) -> Option<Lexicon> {
        let lexicon = match self {
            Token::LtParen => Lexicon::Operator(Op::OpenParen),
            Token::RtParen => Lexicon::Operator(Op::CloseParen),
            Token::Equal => Lexicon::Operator(Op::Assign),
            Token::Plus => Lexicon::Operator(Op::Add),
            Token::Minus => Lexicon::Operator(Op::Sub),
            Token::Asterisk => Lexicon::Operator(Op::Mul),
            Token::Slash => Lexicon::Operator(Op::Div),
            Token::Caret => Lexicon::Operator(Op::Pow),
            Token::Identifier(ident) => Lexicon::Identifier(ident),
            Token::Number(number) => Lexicon::Scalar(number),
            Token::Error => return None,
        };
        Some(lexicon)
    }
}

fn lex_number(lexer: &mut logos::Lexer<Token>) -> Result<f64, ParseFloatError> {
    let slice = lexer.slice();
    slice.parse::<f64>()
}

fn lex_identifier(lexer: &mut logos::Lexer<Token>) -> String {
    let slice = lexer.slice();
    slice.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use calc_common::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn lex_expression() {
        let exp = vec![
            Ok((Lexicon::Identifier("x".to_string()), 0..1)),
            Ok((Lexicon::Operator(Op::Assign), 2..3)),
            Ok((Lexicon::Operator(Op::OpenParen), 4..5)),
            Ok((Lexicon::Scalar(1.5), 5..8)),
            Ok((Lexicon::Operator(Op::Pow), 8..9)),
            Ok((Lexicon::Scalar(2.0), 9..10)),
            Ok((Lexicon::Operator(Op::CloseParen), 10..11)),
            Ok((Lexicon::Operator(Op::Div), 12..13)),
            Ok((Lexicon::Scalar(0.25), 14..17)),
        ];
        let got = Lexer::new("x = (1.5^2) / .25 # quarter").collect::<Vec<_>>();
        assert_eq!(exp, got);
    }

    #[test]
    fn lex_exponent() {
        let got = tokenize("1e3 2.5E-1").unwrap();
        assert_eq!(got, vec![(Lexicon::Scalar(1000.0), 0..3), (Lexicon::Scalar(0.25), 4..10)]);
    }

    #[test]
    fn lex_invalid_token() {
        let exp = vec![
            Err(Error::ParseError(ParseError::UnexpectedInput {
                token: "@$".to_string(),
                span: 0..2,
            })),
            Ok((Lexicon::Identifier("bar".to_string()), 3..6)),
        ];
        let got = Lexer::new("@$ bar").collect::<Vec<_>>();
        assert_eq!(exp, got);
    }

    #[test]
    fn lex_invalid_token_between_valid() {
        let exp = vec![
            Ok((Lexicon::Scalar(1.0), 0..1)),
            Err(Error::ParseError(ParseError::UnexpectedInput {
                token: "?".to_string(),
                span: 1..2,
            })),
            Ok((Lexicon::Scalar(2.0), 2..3)),
        ];
        assert_eq!(Lexer::new("1?2").collect::<Vec<_>>(), exp);

        let exp = vec![
            Ok((Lexicon::Identifier("x".to_string()), 0..1)),
            Err(Error::ParseError(ParseError::UnexpectedInput {
                token: "@!".to_string(),
                span: 1..3,
            })),
            Ok((Lexicon::Identifier("y".to_string()), 3..4)),
        ];
        assert_eq!(Lexer::new("x@!y").collect::<Vec<_>>(), exp);
    }

    #[test]
    fn lex_with_offset() {
        let exp = vec![
            Ok((Lexicon::Scalar(1.0), 10..11)),
            Err(Error::ParseError(ParseError::UnexpectedInput {
                token: "!".to_string(),
                span: 12..13,
            })),
        ];
        let got = Lexer::with_offset("1 !", 10).collect::<Vec<_>>();
        assert_eq!(exp, got);
    }

    #[test]
    fn tokenize_stops_at_first_error() {
        let got = tokenize("1 + ! 2");
        assert_eq!(
            got,
            Err(Error::ParseError(ParseError::UnexpectedInput { token: "!".to_string(), span: 4..5 }))
        );
    }
}
