/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Print serialized protobuf fixture messages as byte arrays.

/* Turn all warnings into errors! */
/* #![deny(warnings)] */
/* Warn for missing docs in general, and hard require crate-level docs. */
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]
/* Enable all clippy lints except for many of the pedantic ones. It's a shame this needs to be
 * copied and pasted across crates, but there doesn't appear to be a way to include inner attributes
 * from a common source. */
#![deny(
  clippy::all,
  clippy::default_trait_access,
  clippy::expl_impl_clone_on_copy,
  clippy::if_not_else,
  clippy::needless_continue,
  clippy::unseparated_literal_suffix,
  clippy::used_underscore_binding
)]
/* It is often more clear to show that nothing is being moved. */
#![allow(clippy::match_ref_pats)]
/* Subjective style. */
#![allow(
  clippy::len_without_is_empty,
  clippy::redundant_field_names,
  clippy::too_many_arguments
)]
/* Default isn't as big a deal as people seem to think it is. */
#![allow(clippy::new_without_default, clippy::new_ret_no_self)]

mod commands;
mod error;

use crate::commands::{execute, ArrayOptions, Command};
use crate::error::Error;

use protobytes::fixtures::FixtureKind;

use clap::{App, Arg, ArgMatches, SubCommand};
use log::debug;

use std::{
  ffi::OsStr,
  fs,
  io::{self, Read, Write},
  process,
};

fn message_type_arg() -> Arg<'static, 'static> {
  Arg::with_name("message-type")
    .short("t")
    .long("message-type")
    .value_name("MESSAGE-TYPE")
    .help("Interpret the input as the fixture message named MESSAGE-TYPE.")
    .possible_values(&["empty", "required-int", "all-optional", "envelope", "nested"])
    .takes_value(true)
    .required(true)
}

fn input_arg() -> Arg<'static, 'static> {
  Arg::with_name("input")
    .short("f")
    .long("input")
    .value_name("INPUT")
    .help("If not provided, or if the value is the string '-', read from stdin.")
    .takes_value(true)
}

fn main() {
  env_logger::init();

  let matches = App::new("protobytes")
    .version("0.1.0")
    .author("Danny McClanahan <dmcC2@hypnicjerk.ai>")
    .about("Inspect serialized protobuf fixture messages as byte arrays.")
    .subcommand(

      /* array */
      SubCommand::with_name("array")
        .about("Parse a serialized message and print it back out as an array of byte values.")
        .arg(message_type_arg())
        .arg(input_arg())
        .arg(
          Arg::with_name("output")
            .short("o")
            .long("output")
            .value_name("OUTPUT")
            .help("If not provided, or if the value is the string '-', write to stdout.")
            .takes_value(true),
        )
        .arg(
          Arg::with_name("partial")
            .long("partial")
            .help("Accept and write messages which are missing required fields."),
        )
        .arg(
          Arg::with_name("max-size")
            .long("max-size")
            .value_name("MAX-SIZE")
            .help("Refuse messages longer than MAX-SIZE bytes.")
            .takes_value(true),
        ),
    )
    .subcommand(

      /* check */
      SubCommand::with_name("check")
        .about("Report the first required field missing from a serialized message, if any.")
        .arg(message_type_arg())
        .arg(input_arg()),
    )
    .get_matches();

  if let Err(e) = run(&matches) {
    debug!("command failed: {:?}", e);
    eprintln!("error: {}", e);
    process::exit(1);
  }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
  let (command, matches) = match matches.subcommand() {
    ("array", Some(matches)) => {
      let options = ArrayOptions::new(
        message_type(matches)?,
        matches.is_present("partial"),
        matches.value_of("max-size"),
      )?;
      (Command::Array(options), matches)
    }
    ("check", Some(matches)) => (Command::Check(message_type(matches)?), matches),
    _ => {
      eprintln!("{}", matches.usage());
      process::exit(2);
    }
  };

  let mut input = Vec::new();
  input_stream(matches.value_of_os("input"))?.read_to_end(&mut input)?;
  let line = execute(&command, &input)?;
  let mut output = output_stream(matches.value_of_os("output"))?;
  writeln!(output, "{}", line)?;
  Ok(())
}

fn message_type(matches: &ArgMatches) -> Result<FixtureKind, Error> {
  /* clap has already checked this was provided and is one of the possible values. */
  let name = matches.value_of("message-type").unwrap_or_default();
  Ok(name.parse::<FixtureKind>()?)
}

fn output_stream(output_specification: Option<&OsStr>) -> io::Result<Box<dyn io::Write>> {
  match output_specification {
    None => Ok(Box::new(io::stdout())),
    Some(path) if path == "-" => Ok(Box::new(io::stdout())),
    Some(path) => Ok(Box::new(fs::File::create(path)?)),
  }
}

fn input_stream(input_specification: Option<&OsStr>) -> io::Result<Box<dyn io::Read>> {
  match input_specification {
    None => Ok(Box::new(io::stdin())),
    Some(path) if path == "-" => Ok(Box::new(io::stdin())),
    Some(path) => Ok(Box::new(fs::File::open(path)?)),
  }
}
