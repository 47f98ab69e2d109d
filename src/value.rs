// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing a parsed datum.

//! [Value](Value) is a closed set of variants; lists are chains of
//! [Value::Pair](Value::Pair) ending in the empty list (proper) or in
//! anything else (improper). Values are shared via [Obj](Obj), the
//! reader never creates cycles.

use kstring::KString;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A reference to a value. Pairs hold their children through these,
/// and `#t`, `#f` and `()` are always references to the
/// [Singletons](Singletons).
pub type Obj = Arc<Value>;

pub enum Value {
    Bool(bool),
    Char(char),
    EmptyList,
    /// Arithmetic on fixnums wraps, there is no overflow detection.
    Fixnum(i64),
    /// first, rest
    Pair(Obj, Obj),
    String(KString),
}

impl Value {
    pub fn fixnum(n: i64) -> Obj {
        Arc::new(Value::Fixnum(n))
    }

    pub fn character(c: char) -> Obj {
        Arc::new(Value::Char(c))
    }

    pub fn string(s: KString) -> Obj {
        Arc::new(Value::String(s))
    }

    pub fn cons(first: Obj, rest: Obj) -> Obj {
        Arc::new(Value::Pair(first, rest))
    }

    pub fn first(&self) -> Option<&Obj> {
        match self {
            Value::Pair(a, _) => Some(a),
            _ => None
        }
    }

    pub fn rest(&self) -> Option<&Obj> {
        match self {
            Value::Pair(_, d) => Some(d),
            _ => None
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_, _))
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::EmptyList)
    }

    /// Scheme truthiness: everything except `#f` counts as true.
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// Whether following `rest` from here ends in the empty list.
    pub fn is_proper_list(&self) -> bool {
        let mut v = self;
        loop {
            match v {
                Value::EmptyList => return true,
                Value::Pair(_, d) => v = d,
                _ => return false
            }
        }
    }
}

// Structural equality. Like `Drop` below, walks the rest chain in a
// loop so that long lists don't exhaust the stack.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (a, b) {
                (Value::Pair(a0, a1), Value::Pair(b0, b1)) => {
                    if !(Arc::ptr_eq(a0, b0) || a0 == b0) {
                        return false
                    }
                    if Arc::ptr_eq(a1, b1) {
                        return true
                    }
                    a = &**a1;
                    b = &**b1;
                }
                (Value::Bool(x), Value::Bool(y)) => return x == y,
                (Value::Char(x), Value::Char(y)) => return x == y,
                (Value::EmptyList, Value::EmptyList) => return true,
                (Value::Fixnum(x), Value::Fixnum(y)) => return x == y,
                (Value::String(x), Value::String(y)) => return x == y,
                _ => return false
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut v = self;
        let mut open = 0;
        loop {
            match v {
                Value::Pair(a, d) => {
                    write!(f, "Pair({:?}, ", a)?;
                    open += 1;
                    v = &**d;
                    continue
                }
                Value::Bool(b) => write!(f, "Bool({:?})", b)?,
                Value::Char(c) => write!(f, "Char({:?})", c)?,
                Value::EmptyList => f.write_str("EmptyList")?,
                Value::Fixnum(n) => write!(f, "Fixnum({})", n)?,
                Value::String(s) => write!(f, "String({:?})", s.as_str())?,
            }
            break
        }
        for _ in 0..open {
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn take_obj(o: &mut Obj) -> Obj {
    std::mem::replace(o, Singletons::global().empty_list())
}

// The compiler-generated drop would recurse once per element of a
// list. Instead unlink the chain of rest pointers that are not shared
// with anything else; only nesting via `first` still recurses.
impl Drop for Value {
    fn drop(&mut self) {
        let mut rest = match self {
            Value::Pair(_, d) => take_obj(d),
            _ => return
        };
        while let Ok(mut v) = Arc::try_unwrap(rest) {
            match &mut v {
                Value::Pair(_, d) => rest = take_obj(d),
                _ => break
            }
        }
    }
}

/// The values of which exactly one instance exists per process.
#[derive(Debug)]
pub struct Singletons {
    t: Obj,
    f: Obj,
    empty_list: Obj,
}

static SINGLETONS: OnceLock<Singletons> = OnceLock::new();

impl Singletons {
    /// The process-wide instances, created on first access and never
    /// changed afterwards.
    pub fn global() -> &'static Singletons {
        SINGLETONS.get_or_init(|| Singletons {
            t: Arc::new(Value::Bool(true)),
            f: Arc::new(Value::Bool(false)),
            empty_list: Arc::new(Value::EmptyList),
        })
    }

    pub fn boolean(&self, b: bool) -> Obj {
        if b { self.t.clone() } else { self.f.clone() }
    }

    pub fn empty_list(&self) -> Obj {
        self.empty_list.clone()
    }
}

// Characters with a name in `#\name` syntax.
const CHAR_NAMES: [(&str, char); 2] = [
    ("newline", '\n'),
    ("space", ' '),
];

pub fn char2name(c: char) -> Option<&'static str> {
    CHAR_NAMES.iter().find(|(_, nc)| *nc == c).map(|(name, _)| *name)
}

pub fn name2char(s: &str) -> Option<char> {
    CHAR_NAMES.iter().find(|(name, _)| *name == s).map(|(_, c)| *c)
}

/// The character names starting with `c0` followed by `c1`; this is
/// how the reader decides that a name (rather than the single
/// character `c0`) is being written.
pub fn char_name_starting_with(c0: char, c1: char) -> Option<&'static str> {
    CHAR_NAMES.iter()
        .map(|(name, _)| *name)
        .find(|name| {
            let mut cs = name.chars();
            cs.next() == Some(c0) && cs.next() == Some(c1)
        })
}
