// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bootscheme::context::StreamContext;
use bootscheme::read::{Reader, ErrorKind, read_file};
use bootscheme::print::write_all;
use bootscheme::settings::{Settings, DEFAULT_MAX_DEPTH};
use bootscheme::stream::buffered_chars;
use bootscheme::value::Obj;
use clap::Parser as ClapParser;
use std::io::{stdin, stdout, BufWriter, Write};
use std::path::PathBuf;
use anyhow::Result;


#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Printed before reading each datum (interactive mode only)
    #[clap(long, value_parser, default_value = "> ")]
    prompt: String,
    /// How deeply lists may be nested
    #[clap(long, value_parser, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,
    /// Read all data from this file and print it back, instead of
    /// running interactively on stdin
    #[clap(value_parser)]
    input_path: Option<PathBuf>,
}

// No evaluation yet
fn eval(v: Obj) -> Obj {
    v
}

fn repl(settings: Settings, prompt: &str) -> Result<()> {
    let context = StreamContext::new("stdin");
    let mut reader = Reader::new(buffered_chars(stdin()), settings);
    let mut out = stdout();
    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;
        match reader.read_next() {
            Ok(Some(v)) => writeln!(out, "{}", eval(v))?,
            Ok(None) => {
                writeln!(out)?;
                return Ok(())
            }
            Err(e) => {
                let is_io = e.kind() == ErrorKind::Io;
                let e = e.in_context(Box::new(context.clone()));
                if is_io {
                    return Err(e.into())
                }
                eprintln!("error: {}", e);
                reader.discard_line()?;
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings { max_depth: args.max_depth };

    if let Some(path) = &args.input_path {
        let vals: Vec<Obj> = read_file(path, settings)?
            .into_iter()
            .map(eval)
            .collect();
        write_all(BufWriter::new(stdout()), &vals)?;
    } else {
        repl(settings, &args.prompt)?;
    }
    Ok(())
}
