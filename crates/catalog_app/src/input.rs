//! Turns terminal lines into core messages.
//!
//! Plain lines behave like typing into the search box and commit after the
//! quiet period. Lines starting with `/` are commands.

use std::time::Instant;

use catalog_core::{KindFilter, Msg};

pub const HELP: &str = "\
commands:
  <text>            type into the search box (commits after the quiet period)
  /search <text>    search immediately
  /type any|movie|series
  /year <yyyy>|-    set or clear the year filter
  /genre <name>|-   set or clear the genre filter
  /clear            clear all filters
  /more             load the next page
  /retry            retry after an error
  /open <id>        show details for a record
  /close            close the detail view
  /years            list year filter choices
  /help             show this help
  /quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Vec<Msg>),
    ShowYears,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str, now: Instant) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix('/') else {
        return Command::Send(vec![Msg::InputChanged {
            text: line.to_string(),
            at: now,
        }]);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "search" => Command::Send(vec![
            Msg::InputChanged {
                text: arg.to_string(),
                at: now,
            },
            Msg::InputSubmitted,
        ]),
        "type" => match KindFilter::parse(arg) {
            Some(kind) => Command::Send(vec![Msg::KindSelected(kind)]),
            None => Command::Invalid(format!("unknown type {arg:?}")),
        },
        "year" => {
            if arg.is_empty() || arg == "-" {
                Command::Send(vec![Msg::YearSelected(None)])
            } else if arg.len() == 4 && arg.chars().all(|c| c.is_ascii_digit()) {
                Command::Send(vec![Msg::YearSelected(Some(arg.to_string()))])
            } else {
                Command::Invalid(format!("year must be four digits, got {arg:?}"))
            }
        }
        "genre" => {
            let genre = (arg != "-").then(|| arg.to_string());
            Command::Send(vec![Msg::GenreSelected(genre)])
        }
        "clear" => Command::Send(vec![Msg::FiltersCleared]),
        "more" => Command::Send(vec![Msg::NearEnd]),
        "retry" => Command::Send(vec![Msg::RetryClicked]),
        "open" => Command::Send(vec![Msg::RecordOpened {
            id: arg.to_string(),
        }]),
        "close" => Command::Send(vec![Msg::DetailClosed]),
        "years" => Command::ShowYears,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command /{other}")),
    }
}
