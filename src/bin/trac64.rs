//! Command-line host for the interpreter. Argv parsing, file/stdin
//! reading, and the `ps` sink binding all live here rather than in the
//! library, which never touches the filesystem or stdio.

use anyhow::Context;
use clap::{App, Arg};
use std::io::Read;
use trac64::{Interpreter, InterpreterOptions};

fn main() -> anyhow::Result<()> {
    let matches = App::new("trac64")
        .version(env!("CARGO_PKG_VERSION"))
        .about("An interpreter for a TRAC T64-style text-rewriting macro language")
        .arg(
            Arg::with_name("file")
                .help("Source file to execute; reads stdin if omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Raise scan-loop logging (frame push/pop, dispatch, abort) from trace to debug"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("initializing logger")?;

    let source = match matches.value_of("file") {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading source from stdin")?;
            buf
        }
    };

    let options = InterpreterOptions {
        trace_scan: matches.is_present("verbose"),
        ..InterpreterOptions::default()
    };
    let mut interpreter = Interpreter::with_options(options);
    interpreter.set_sink(Box::new(|text: &str| print!("{text}")));

    let output = interpreter.execute(&source);
    print!("{output}");
    Ok(())
}
