// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Characters and their positions from anything implementing `Read`,
//! and the one-character-lookahead stream the parser works on.

use crate::parse::{ParseError, ParseErrorWithPos};
use std::io::{self, Read};
use std::iter::Fuse;
use anyhow::{Result, anyhow};
use utf8::BufReadDecoder;
use genawaiter::rc::Gen;

/// Both line and col are zero based; Emacs uses 1-based line
/// numbering, so line is incremented by 1 in Display.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const START: Pos = Pos { line: 0, col: 0 };

    /// The position of the character following `c`, if `c` is at
    /// `self`.
    pub fn advance(self, c: char) -> Pos {
        if c == '\n' {
            Pos { line: self.line + 1, col: 0 }
        } else {
            Pos { line: self.line, col: self.col + 1 }
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}

pub fn buffered_chars<R>(
    fh: R
) -> impl Iterator<Item=Result<(char, Pos)>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos::START;
        while let Some(r) = inp.next_strict() {
            match r {
                Ok(s) => {
                    for c in s.chars() {
                        co.yield_(Ok((c, pos))).await;
                        pos = pos.advance(c);
                    }
                }
                Err(e) => {
                    co.yield_(Err(anyhow!("buffered_chars: {}", e))).await;
                    return;
                }
            }
        }
    }).into_iter()
}

/// Whitespace, end of input (`None`), or one of `( ) " ;`.
pub fn is_delimiter(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';')
    }
}

/// Pull stream over `(char, Pos)` items with a single character of
/// pushback.
pub struct CharStream<I> {
    // Fused: a finished generator must not be resumed
    cs: Fuse<I>,
    pushback: Option<(char, Pos)>,
    // Position after the last character taken from `cs`
    endpos: Pos,
    lastc: Option<char>,
}

impl<I> CharStream<I>
    where I: Iterator<Item = Result<(char, Pos)>>
{
    pub fn new(cs: I) -> Self {
        CharStream { cs: cs.fuse(), pushback: None, endpos: Pos::START, lastc: None }
    }

    /// The position the next character will have, or where the input
    /// ended.
    pub fn pos(&self) -> Pos {
        if let Some((_, pos)) = self.pushback {
            pos
        } else {
            self.endpos
        }
    }

    pub fn next(&mut self) -> Result<Option<(char, Pos)>, ParseErrorWithPos> {
        if let Some(cp) = self.pushback.take() {
            self.lastc = Some(cp.0);
            return Ok(Some(cp))
        }
        match self.cs.next() {
            None => Ok(None),
            Some(Err(e)) => Err(ParseError::IOError(e).at(self.endpos)),
            Some(Ok((c, pos))) => {
                self.endpos = pos.advance(c);
                self.lastc = Some(c);
                Ok(Some((c, pos)))
            }
        }
    }

    /// Put back the character that was just returned by `next`.
    pub fn unread(&mut self, cp: (char, Pos)) {
        debug_assert!(self.pushback.is_none(), "only one char of pushback");
        self.pushback = Some(cp);
    }

    pub fn peek(&mut self) -> Result<Option<char>, ParseErrorWithPos> {
        let lastc = self.lastc;
        let r = self.next()?;
        if let Some(cp) = r {
            self.unread(cp);
            self.lastc = lastc;
            Ok(Some(cp.0))
        } else {
            Ok(None)
        }
    }

    pub fn peek_is_delimiter(&mut self) -> Result<bool, ParseErrorWithPos> {
        Ok(is_delimiter(self.peek()?))
    }

    /// Skip whitespace and `;` comments.
    pub fn skip_atmosphere(&mut self) -> Result<(), ParseErrorWithPos> {
        while let Some((c, pos)) = self.next()? {
            if c.is_whitespace() {
                continue;
            } else if c == ';' {
                self.skip_line()?;
            } else {
                self.unread((c, pos));
                break;
            }
        }
        Ok(())
    }

    /// Discard input up to and including the next newline. Does
    /// nothing if the last character taken was a newline already.
    pub fn skip_line(&mut self) -> Result<(), ParseErrorWithPos> {
        if self.pushback.is_none() && self.lastc == Some('\n') {
            return Ok(())
        }
        while let Some((c, _)) = self.next()? {
            if c == '\n' {
                break;
            }
        }
        Ok(())
    }
}
