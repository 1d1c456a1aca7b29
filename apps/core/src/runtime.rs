use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Instant;

use crate::config::{self, ConfigError};
use crate::controller::{ControllerError, SearchController};
use crate::logging::{self, LoggingError};
use crate::result_store::{ResultStore, StoreError};
use crate::shortcut::LocalKeyListenerTable;
use crate::transport::{handle_json, snapshot_json};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("controller error: {0}")]
    Controller(#[from] ControllerError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub corpus_path: Option<PathBuf>,
    pub show_help: bool,
}

pub const USAGE: &str = "usage: searchpane-core [--config <path>] [--corpus <path>]\n\
reads JSON view events from stdin, one per line, and writes JSON responses to stdout";

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, RuntimeError> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => options.config_path = Some(flag_value(&mut iter, "--config")?),
            "--corpus" => options.corpus_path = Some(flag_value(&mut iter, "--corpus")?),
            "-h" | "--help" => options.show_help = true,
            other => return Err(RuntimeError::Usage(format!("unknown argument: {other}"))),
        }
    }
    Ok(options)
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<PathBuf, RuntimeError> {
    match iter.next() {
        Some(value) if !value.trim().is_empty() && !value.starts_with("--") => {
            Ok(PathBuf::from(value))
        }
        _ => Err(RuntimeError::Usage(format!("{flag} requires a path"))),
    }
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    if options.show_help {
        println!("{USAGE}");
        return Ok(());
    }

    let log_path = logging::init()?;
    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
        tracing::info!(path = %config.config_path.display(), "wrote default config");
    }
    tracing::info!(
        config_path = %config.config_path.display(),
        log_path = %log_path.display(),
        debounce_ms = config.debounce_ms,
        shortcut = %config.shortcut_key,
        "startup"
    );

    let store = match options.corpus_path.as_ref().or(config.corpus_path.as_ref()) {
        Some(path) => ResultStore::load(path)?,
        None => ResultStore::sample(),
    };

    let mut controller =
        SearchController::from_config(&config, store, Box::new(LocalKeyListenerTable::default()))?;
    controller.mount()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", snapshot_json(controller.snapshot()))?;
    out.flush()?;

    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    event_loop(&mut controller, &rx, &mut out)?;
    controller.dispose();
    tracing::info!("session closed");
    Ok(())
}

/// Waits for the next event or the next debounce deadline, whichever comes first.
fn event_loop(
    controller: &mut SearchController,
    rx: &mpsc::Receiver<String>,
    out: &mut impl Write,
) -> Result<(), RuntimeError> {
    loop {
        let received = match controller.next_deadline() {
            Some(due_at) => rx.recv_timeout(due_at.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                writeln!(out, "{}", handle_json(controller, &line, Instant::now()))?;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(snapshot) = controller.poll(Instant::now()) {
                    writeln!(out, "{}", snapshot_json(snapshot))?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
        out.flush()?;

        if controller.is_disposed() {
            return Ok(());
        }
    }
}
