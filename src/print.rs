// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonical text for [Value](crate::value::Value)s, via `Display`.
//! The output is accepted by [read](../read/index.html) and reads
//! back as an equal value.

use crate::value::{Value, Obj, char2name};
use std::fmt::{Display, Formatter, Write as FmtWrite};
use std::io::Write;
use std::path::Path;
use std::fs::File;

fn fmt_string(f: &mut Formatter<'_>, s: &str) -> Result<(), std::fmt::Error> {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            _ => f.write_char(c)?
        }
    }
    f.write_char('"')
}

// The elements of a pair chain, without the parens. Walks the rest
// pointers iteratively; only `first` values recurse.
fn fmt_pair_body(
    f: &mut Formatter<'_>,
    first: &Value,
    rest: &Obj
) -> Result<(), std::fmt::Error> {
    first.fmt(f)?;
    let mut rest = rest;
    loop {
        match &**rest {
            Value::Pair(a, d) => {
                f.write_char(' ')?;
                a.fmt(f)?;
                rest = d;
            }
            Value::EmptyList => return Ok(()),
            tail => {
                f.write_str(" . ")?;
                return tail.fmt(f)
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Value::EmptyList => f.write_str("()"),
            Value::Bool(b) => f.write_str(if *b { "#t" } else { "#f" }),
            Value::Fixnum(n) => f.write_fmt(format_args!("{}", n)),
            Value::Char(c) => {
                f.write_str("#\\")?;
                if let Some(name) = char2name(*c) {
                    f.write_str(name)
                } else {
                    f.write_char(*c)
                }
            }
            Value::String(s) => fmt_string(f, s),
            Value::Pair(first, rest) => {
                f.write_char('(')?;
                fmt_pair_body(f, first, rest)?;
                f.write_char(')')
            }
        }
    }
}

/// Write each value followed by a newline.
pub fn write_all<'t>(
    out: impl Write,
    vals: impl IntoIterator<Item = &'t Obj>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    for v in vals.into_iter() {
        writeln!(out, "{}", v)?;
    }
    out.flush()
}

pub fn write_file<'t>(path: &Path, vals: impl IntoIterator<Item = &'t Obj>)
                      -> Result<(), std::io::Error> {
    write_all(std::io::BufWriter::new(File::create(path)?), vals)
}
