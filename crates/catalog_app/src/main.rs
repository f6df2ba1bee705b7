//! Terminal front end for the catalog browser.
mod config;
mod effects;
mod input;
mod render;
mod session;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use catalog_core::{update, year_options, AppState, LoadState, Msg, Query};
use chrono::Datelike;
use clap::Parser;
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;

use config::AppConfig;
use effects::EffectRunner;
use input::{parse_line, Command, HELP};
use render::Renderer;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Browse a remote movie catalog with incremental search and paging.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
struct Cli {
    /// RON configuration file (defaults to ./catalog.ron when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upstream API key (overrides config)
    #[arg(long, env = "OMDB_API_KEY")]
    api_key: Option<String>,

    /// Upstream base URL (overrides config)
    #[arg(long, env = "OMDB_BASE_URL")]
    base_url: Option<String>,

    /// Initial search text; otherwise the last session's query is restored
    #[arg(long)]
    query: Option<String>,

    /// Request the next page automatically whenever the list is exhausted on screen
    #[arg(long, default_value_t = false)]
    auto_scroll: bool,

    /// Write logs to this file instead of the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

/// Everything the main loop reacts to, one at a time.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Line(String),
    Quit,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    match cli.log_file.as_deref() {
        Some(path) => engine_logging::initialize(LogDestination::File(path), level),
        None => engine_logging::initialize(LogDestination::Terminal, level),
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(api_key) = cli.api_key.clone() {
        config.api_key = api_key;
    }
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }
    if config.api_key.is_empty() {
        eprintln!("warning: no API key configured; set OMDB_API_KEY or api_key in catalog.ron");
    }

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner =
        EffectRunner::new(config.fetch_settings(), tx.clone()).context("starting engine")?;
    spawn_stdin_reader(tx.clone());
    spawn_ticker(tx.clone());

    let initial = match cli.query.clone() {
        Some(text) => Query::new(text),
        None => session::load_query(&config.state_dir).unwrap_or_default(),
    };
    engine_info!("Starting with query {:?}", initial.search_term());
    let _ = tx.send(AppEvent::Msg(Msg::QuerySubmitted(initial)));
    println!("{HELP}");

    let mut state = AppState::with_quiet_period(config.quiet_period())
        .with_scan_ahead_limit(config.scan_ahead_pages);
    let mut renderer = Renderer::new();

    while let Ok(event) = rx.recv() {
        let msgs = match event {
            AppEvent::Msg(msg) => vec![msg],
            AppEvent::Quit => break,
            AppEvent::Line(line) => match parse_line(&line, Instant::now()) {
                Command::Send(msgs) => msgs,
                Command::ShowYears => {
                    let years: Vec<String> = year_options(chrono::Local::now().year())
                        .iter()
                        .map(i32::to_string)
                        .collect();
                    println!("years: {}", years.join(" "));
                    continue;
                }
                Command::Help => {
                    println!("{HELP}");
                    continue;
                }
                Command::Quit => break,
                Command::Invalid(reason) => {
                    eprintln!("{reason}");
                    continue;
                }
            },
        };

        for msg in msgs {
            state = dispatch(state, msg, &runner, &mut renderer, cli.auto_scroll);
        }
    }

    if let Some(query) = state.query() {
        session::save_query(&config.state_dir, query);
    }
    Ok(())
}

/// Applies one message, runs its effects and prints the snapshot if it changed.
fn dispatch(
    state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    renderer: &mut Renderer,
    auto_scroll: bool,
) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.run(effects);

    if state.consume_dirty() {
        let view = state.view();
        for line in renderer.render(&view) {
            println!("{line}");
        }
        // With auto-scroll the last printed record always counts as visible.
        if auto_scroll && view.load_state == LoadState::IdleWithData && view.has_more {
            return dispatch(state, Msg::NearEnd, runner, renderer, auto_scroll);
        }
    }
    state
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}

fn spawn_ticker(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while tx
            .send(AppEvent::Msg(Msg::Tick {
                now: Instant::now(),
            }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });
}
