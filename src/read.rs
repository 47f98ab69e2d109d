// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building [Value](crate::value::Value) trees from the token stream
//! of [parse](../parse/index.html).

use crate::stream::{Pos, buffered_chars};
use crate::context::{self, Context};
use crate::parse::{Token, TokenWithPos, Tokenizer,
                   ParseError, ParseErrorWithPos};
use crate::settings::Settings;
use crate::value::{Obj, Value, Singletons};
use std::fmt::{Formatter, Display};
use std::io::Read;
use std::path::Path;
use std::fs::File;
use thiserror::Error;

/// Classification of all the ways reading can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended inside a token, or where a datum was required
    UnexpectedEndOfInput,
    /// A literal (or a character name) runs into something other than
    /// a delimiter
    MissingDelimiter,
    /// `#` followed by something other than `t`, `f` or `\`
    UnknownLiteral,
    /// A character that can't start a datum
    UnexpectedCharacter,
    /// Missing or stray parens, misplaced '.'
    MalformedList,
    NestingTooDeep,
    AllocationFailure,
    Io,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::IOError(_) => ErrorKind::Io,
            ParseError::UnexpectedEOF(_) => ErrorKind::UnexpectedEndOfInput,
            ParseError::MissingDelimiter(_) => ErrorKind::MissingDelimiter,
            ParseError::CharNameMismatch { .. } => ErrorKind::MissingDelimiter,
            ParseError::UnknownHashSyntax(_) => ErrorKind::UnknownLiteral,
            ParseError::UnexpectedChar(_) => ErrorKind::UnexpectedCharacter,
            ParseError::AllocationFailure => ErrorKind::AllocationFailure,
        }
    }
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    PE(ParseError),
    #[error("premature EOF, expecting a datum")]
    PrematureEof,
    #[error("missing item after '.'")]
    MissingItemAfterDot,
    #[error("expecting ')' after the item following '.', got '{0}'")]
    ExpectingCloseAfterDottedTail(Token),
    #[error("'.' already appeared {0}, again")]
    DotAlreadyAppeared(Pos),
    #[error("'.' without preceding item")]
    DotWithoutPrecedingItem,
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("unexpected closing character ')'")]
    UnexpectedClosingParen,
    #[error("premature EOF while expecting closing character ')' for '('")]
    PrematureEofExpectingClosingParen,
    #[error("'.' outside of list context")]
    DotOutsideListContext
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos: p
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadError::PE(e) => e.kind(),
            ReadError::PrematureEof => ErrorKind::UnexpectedEndOfInput,
            ReadError::NestingTooDeep => ErrorKind::NestingTooDeep,
            ReadError::MissingItemAfterDot
            | ReadError::ExpectingCloseAfterDottedTail(_)
            | ReadError::DotAlreadyAppeared(_)
            | ReadError::DotWithoutPrecedingItem
            | ReadError::UnexpectedClosingParen
            | ReadError::PrematureEofExpectingClosingParen
            | ReadError::DotOutsideListContext => ErrorKind::MalformedList,
        }
    }
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ReadErrorWithPos {
    err: ReadError,
    pos: Pos
}

impl ReadErrorWithPos {
    pub fn err(&self) -> &ReadError {
        &self.err
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn kind(&self) -> ErrorKind {
        self.err.kind()
    }

    /// Attach the description of where the input came from.
    pub fn in_context(self, container: Box<dyn Context>) -> ReadErrorWithPosContext {
        ReadErrorWithPosContext {
            err_with_pos: self,
            container
        }
    }
}

#[derive(Error, Debug)]
pub struct ReadErrorWithPosContext {
    err_with_pos: ReadErrorWithPos,
    container: Box<dyn Context>
}

impl ReadErrorWithPosContext {
    pub fn err_with_pos(&self) -> &ReadErrorWithPos {
        &self.err_with_pos
    }
}

impl Display for ReadErrorWithPosContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ",
                                 self.err_with_pos.err))?;
        self.container.format_with_pos(self.err_with_pos.pos, f)?;
        Ok(())
    }
}

impl From<ParseErrorWithPos> for ReadErrorWithPos {
    fn from(ep: ParseErrorWithPos) -> ReadErrorWithPos {
        let ParseErrorWithPos { err, pos } = ep;
        ReadErrorWithPos {
            err: ReadError::PE(err),
            pos
        }
    }
}

#[derive(Error, Debug)]
pub enum ReadErrorWithContext {
    #[error("{}: {0}", .1.to_string_without_pos())]
    IO(std::io::Error, Box<dyn Context>)
}

#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{0}")]
    PC(Box<ReadErrorWithPosContext>),
    #[error("{0}")]
    IO(Box<ReadErrorWithContext>)
}


fn file_context(path: &Path) -> Box<dyn Context> {
    Box::new(context::FileContext::new(path))
}

// Transform an IO error without Pos context
fn io_add_file<T>(
    r: Result<T, std::io::Error>,
    path: &Path
) -> Result<T, ReadErrorWithLocation>
{
    r.map_err(|e| ReadErrorWithLocation::IO(Box::new(
        ReadErrorWithContext::IO(e, file_context(path)))))
}

// Transform ReadErrorWithPos adding file
fn rewp_add_file<T>(
    r: Result<T, ReadErrorWithPos>,
    path: &Path
) -> Result<T, ReadErrorWithLocation>
{
    r.map_err(|e| ReadErrorWithLocation::PC(
        Box::new(e.in_context(file_context(path)))))
}


/// Reads one datum per call from a character stream (as delivered
/// by [buffered_chars](crate::stream::buffered_chars)). Errors leave
/// the stream right after the offending character; call
/// [discard_line](Reader::discard_line) to continue with the next
/// line of input.
pub struct Reader<I> {
    ts: Tokenizer<I>,
    settings: Settings,
    singletons: &'static Singletons,
}

impl<I> Reader<I>
    where I: Iterator<Item = anyhow::Result<(char, Pos)>>
{
    pub fn new(cs: I, settings: Settings) -> Self {
        Reader {
            ts: Tokenizer::new(cs),
            settings,
            singletons: Singletons::global(),
        }
    }

    /// Read the next datum, `Ok(None)` if the input ends before one
    /// starts.
    pub fn read_next(&mut self) -> Result<Option<Obj>, ReadErrorWithPos> {
        if let Some(t) = self.ts.next_token()? {
            Ok(Some(self.read_datum(t, self.settings.max_depth)?))
        } else {
            Ok(None)
        }
    }

    /// Read the next datum; running out of input is an error.
    pub fn read(&mut self) -> Result<Obj, ReadErrorWithPos> {
        if let Some(v) = self.read_next()? {
            Ok(v)
        } else {
            Err(ReadError::PrematureEof.at(self.ts.pos()))
        }
    }

    /// Skip the rest of the current line, to resume after an error.
    pub fn discard_line(&mut self) -> Result<(), ReadErrorWithPos> {
        Ok(self.ts.skip_line()?)
    }

    fn read_datum(
        &mut self,
        t: TokenWithPos,
        depth_fuel: u32
    ) -> Result<Obj, ReadErrorWithPos> {
        let TokenWithPos(t, pos) = t;
        match t {
            Token::Datum(v) => Ok(v),
            Token::Open => {
                if depth_fuel == 0 {
                    return Err(ReadError::NestingTooDeep.at(pos))
                }
                self.read_list(pos, depth_fuel - 1)
            }
            Token::Close => Err(ReadError::UnexpectedClosingParen.at(pos)),
            Token::Dot => Err(ReadError::DotOutsideListContext.at(pos)),
        }
    }

    fn next_in_list(&mut self, openpos: Pos) -> Result<TokenWithPos, ReadErrorWithPos> {
        if let Some(t) = self.ts.next_token()? {
            Ok(t)
        } else {
            Err(ReadError::PrematureEofExpectingClosingParen.at(openpos))
        }
    }

    // The elements are collected first, then consed up from the end,
    // so that only nesting recurses.
    fn read_list(
        &mut self,
        openpos: Pos,
        depth_fuel: u32
    ) -> Result<Obj, ReadErrorWithPos> {
        let mut items: Vec<Obj> = Vec::new();
        loop {
            let TokenWithPos(t, pos) = self.next_in_list(openpos)?;
            match t {
                Token::Close => {
                    return Ok(build_list(items, self.singletons.empty_list()))
                }
                Token::Dot => {
                    if items.is_empty() {
                        return Err(ReadError::DotWithoutPrecedingItem.at(pos))
                    }
                    let dotpos = pos;
                    let TokenWithPos(t, pos) = self.next_in_list(openpos)?;
                    let tail = match t {
                        Token::Close =>
                            return Err(ReadError::MissingItemAfterDot.at(dotpos)),
                        Token::Dot =>
                            return Err(ReadError::DotAlreadyAppeared(dotpos).at(pos)),
                        t => self.read_datum(TokenWithPos(t, pos), depth_fuel)?
                    };
                    let TokenWithPos(t, pos) = self.next_in_list(openpos)?;
                    return match t {
                        Token::Close => Ok(build_list(items, tail)),
                        t => Err(ReadError::ExpectingCloseAfterDottedTail(t).at(pos))
                    }
                }
                t => {
                    items.push(self.read_datum(TokenWithPos(t, pos), depth_fuel)?);
                }
            }
        }
    }
}

impl<I> Iterator for Reader<I>
    where I: Iterator<Item = anyhow::Result<(char, Pos)>>
{
    type Item = Result<Obj, ReadErrorWithPos>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

fn build_list(items: Vec<Obj>, tail: Obj) -> Obj {
    items.into_iter().rev().fold(tail, |rest, first| Value::cons(first, rest))
}

/// Read exactly one datum from `s`, ignoring anything after it.
pub fn read_str(s: &str) -> Result<Obj, ReadErrorWithPos> {
    Reader::new(buffered_chars(s.as_bytes()), Settings::default()).read()
}

/// Read all data up to the end of the input.
pub fn read_all(
    fh: impl Read,
    settings: Settings,
) -> Result<Vec<Obj>, ReadErrorWithPos>
{
    Reader::new(buffered_chars(fh), settings).collect()
}

pub fn read_file(
    path: &Path,
    settings: Settings
) -> Result<Vec<Obj>, ReadErrorWithLocation> {
    let fh = io_add_file(File::open(path), path)?;
    let v = rewp_add_file(read_all(fh, settings), path)?;
    Ok(v)
}
