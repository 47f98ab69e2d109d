// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reader and printer for the data language of a small Scheme:
//! booleans, characters, fixnums, strings, and (possibly improper)
//! lists built from pairs.
//!
//! * `bootscheme::read` builds one [Value](value::Value) tree per call
//!   from a character stream; `bootscheme::parse` is the tokenizer
//!   underneath it.
//!
//! * Printing is `Display` on values (`bootscheme::print`); the output
//!   reads back as an equal value.
//!
//! * Errors are values carrying a kind and a position, so that a
//!   driver (see the `repl` example) can report them and carry on
//!   with the next line of input.
//!
//! There is no evaluator. Fixnums are 64 bit and wrap on overflow.

pub mod context;
pub mod parse;
pub mod print;
pub mod read;
pub mod settings;
pub mod stream;
pub mod value;
