// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a character stream to a token stream. Atoms (booleans,
//! characters, fixnums, strings) are fully parsed here into
//! [Value](crate::value::Value)s; the only other tokens are the
//! parens and the dot. See [read](../read/index.html) for building
//! trees from them.

use crate::stream::{CharStream, Pos};
use crate::value::{Obj, Value, Singletons, char_name_starting_with,
                   name2char};
use kstring::KString;
use thiserror::Error;
use std::fmt::Write;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error ({0}) after")]
    IOError(anyhow::Error),
    #[error("unexpected EOF in {0} starting")]
    UnexpectedEOF(&'static str),
    #[error("{0} not followed by a delimiter")]
    MissingDelimiter(&'static str),
    #[error("expected '#\\{}', got {}",
            .name, .got.map_or("EOF".into(), |c| format!("'{}'", c)))]
    CharNameMismatch { name: &'static str, got: Option<char> },
    #[error("unknown '#' syntax '#{0}'")]
    UnknownHashSyntax(char),
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("out of memory reading string")]
    AllocationFailure,
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    pub pos: Pos
}

impl ParseError {
    pub fn at(self, p: Pos) -> ParseErrorWithPos {
        ParseErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Debug)]
pub enum Token {
    Datum(Obj),
    Dot,
    Open,
    Close,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Datum(v) => std::fmt::Display::fmt(v, f),
            Token::Dot => f.write_char('.'),
            Token::Open => f.write_char('('),
            Token::Close => f.write_char(')'),
        }
    }
}

#[derive(Debug)]
pub struct TokenWithPos(pub Token, pub Pos);

fn digit_value(c: char) -> Option<i64> {
    c.to_digit(10).map(i64::from)
}

pub struct Tokenizer<I> {
    cs: CharStream<I>,
    singletons: &'static Singletons,
}

impl<I> Tokenizer<I>
    where I: Iterator<Item = anyhow::Result<(char, Pos)>>
{
    pub fn new(cs: I) -> Self {
        Tokenizer {
            cs: CharStream::new(cs),
            singletons: Singletons::global(),
        }
    }

    /// Where the next token would start (or where the input ended).
    pub fn pos(&self) -> Pos {
        self.cs.pos()
    }

    pub fn skip_line(&mut self) -> Result<(), ParseErrorWithPos> {
        self.cs.skip_line()
    }

    /// Returns `Ok(None)` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<TokenWithPos>, ParseErrorWithPos> {
        self.cs.skip_atmosphere()?;
        let (c, pos) = match self.cs.next()? {
            Some(cp) => cp,
            None => return Ok(None)
        };
        let t = match c {
            '(' => Token::Open,
            ')' => Token::Close,
            '.' => {
                if self.cs.peek_is_delimiter()? {
                    Token::Dot
                } else {
                    return Err(ParseError::UnexpectedChar(c).at(pos))
                }
            }
            '#' => Token::Datum(self.read_hash(pos)?),
            '"' => Token::Datum(self.read_string(pos)?),
            '-' => {
                if self.cs.peek()?.map_or(false, |c| c.is_ascii_digit()) {
                    Token::Datum(self.read_fixnum(pos, true, 0)?)
                } else {
                    return Err(ParseError::UnexpectedChar(c).at(pos))
                }
            }
            _ => {
                if let Some(d) = digit_value(c) {
                    Token::Datum(self.read_fixnum(pos, false, d)?)
                } else {
                    return Err(ParseError::UnexpectedChar(c).at(pos))
                }
            }
        };
        Ok(Some(TokenWithPos(t, pos)))
    }

    fn expect_delimiter(
        &mut self,
        what: &'static str,
        startpos: Pos
    ) -> Result<(), ParseErrorWithPos> {
        if self.cs.peek_is_delimiter()? {
            Ok(())
        } else {
            Err(ParseError::MissingDelimiter(what).at(startpos))
        }
    }

    // After '#'
    fn read_hash(&mut self, startpos: Pos) -> Result<Obj, ParseErrorWithPos> {
        let c = match self.cs.next()? {
            Some((c, _)) => c,
            None => return Err(ParseError::UnexpectedEOF("'#' syntax").at(startpos))
        };
        match c {
            't' | 'f' => Ok(self.singletons.boolean(c == 't')),
            '\\' => self.read_character(startpos),
            _ => Err(ParseError::UnknownHashSyntax(c).at(startpos))
        }
    }

    // After '#\'
    fn read_character(&mut self, startpos: Pos) -> Result<Obj, ParseErrorWithPos> {
        let c0 = match self.cs.next()? {
            Some((c, _)) => c,
            None => return Err(ParseError::UnexpectedEOF("character").at(startpos))
        };
        let mut c = c0;
        if let Some(c1) = self.cs.peek()? {
            if let Some(name) = char_name_starting_with(c0, c1) {
                for expected in name.chars().skip(1) {
                    match self.cs.next()? {
                        Some((got, _)) if got == expected => {}
                        Some((got, pos)) => return Err(
                            ParseError::CharNameMismatch { name, got: Some(got) }
                            .at(pos)),
                        None => return Err(
                            ParseError::CharNameMismatch { name, got: None }
                            .at(self.cs.pos())),
                    }
                }
                if let Some(nc) = name2char(name) {
                    c = nc;
                }
            }
        }
        self.expect_delimiter("character", startpos)?;
        Ok(Value::character(c))
    }

    // After the '-' or the first digit. The digits are accumulated with
    // wrapping arithmetic, overflow is not detected.
    fn read_fixnum(
        &mut self,
        startpos: Pos,
        is_neg: bool,
        first: i64
    ) -> Result<Obj, ParseErrorWithPos> {
        let mut n = first;
        while let Some((c, pos)) = self.cs.next()? {
            if let Some(d) = digit_value(c) {
                n = n.wrapping_mul(10).wrapping_add(d);
            } else {
                self.cs.unread((c, pos));
                break;
            }
        }
        self.expect_delimiter("number", startpos)?;
        Ok(Value::fixnum(if is_neg { n.wrapping_neg() } else { n }))
    }

    // After the opening '"'. Only `\n` is translated, any other escaped
    // character stands for itself.
    fn read_string(&mut self, startpos: Pos) -> Result<Obj, ParseErrorWithPos> {
        let eof = || ParseError::UnexpectedEOF("string").at(startpos);
        let mut out = String::new();
        loop {
            let (c, pos) = self.cs.next()?.ok_or_else(eof)?;
            let c = match c {
                '"' => break,
                '\\' => match self.cs.next()?.ok_or_else(eof)? {
                    ('n', _) => '\n',
                    (c, _) => c,
                },
                _ => c
            };
            out.try_reserve(c.len_utf8())
                .map_err(|_| ParseError::AllocationFailure.at(pos))?;
            out.push(c);
        }
        Ok(Value::string(KString::from_string(out)))
    }
}
