mod app;
mod command;
mod config;
mod consts;
mod environment;
mod game;
mod geometry;
mod name_entry;
mod profile;
mod random;
mod remote;
mod scheduler;
mod ui;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::environment::Environment;
use crate::geometry::BoardSize;
use crate::profile::Profile;
use crate::remote::{RemoteClient, SigningKey};
use crate::util::ErrorChain;
use anyhow::Context;
use lexopt::{Arg, Parser};
use ratatui::layout::Size;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: snakolek [<options>]

Play snake in the terminal

Options:
  -c, --config <FILE>   Read configuration from the given file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

/// Environment variable holding the log filter directives
const LOG_ENV_VAR: &str = "SNAKOLEK_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Play { config: Option<PathBuf> },
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Play { config })
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Play { config }) => match play(config.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("snakolek: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), consts::APP_VERSION);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snakolek: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn play(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => Config::load(path, false)?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true)?,
            Err(_) => Config::default(),
        },
    };
    if let Some(path) = config.log_file() {
        init_logging(&path);
    }
    info!("Starting {} version {}", consts::APP_NAME, consts::APP_VERSION);
    let profile_path = config.profile_file();
    let profile = load_profile(profile_path.as_deref(), config.game.sound);
    let (columns, rows) =
        crossterm::terminal::size().context("failed to determine terminal size")?;
    let board = BoardSize::from_terminal(Size::new(columns, rows));
    anyhow::ensure!(
        board.area() > 0,
        "terminal is too small ({columns}x{rows}) to play in"
    );
    let client = RemoteClient::new(
        &config.server.url,
        config.server.timeout(),
        SigningKey::embedded(),
    )?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let mut app = App::new(Environment::new(board, profile, &config.server.url));
    let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;
    let r = app.run(&mut terminal, &runtime, client);
    ratatui::restore();
    // Requests still in flight are abandoned.
    runtime.shutdown_background();
    if let Some(path) = profile_path {
        if let Err(e) = app.env().profile().save(&path) {
            warn!(error = %ErrorChain(&e), "Failed to save player profile");
        }
    }
    info!("Exiting");
    r.context("error while running game")
}

/// Send logs to `path`.  Logging stays disabled if the file can't be opened.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs_err::create_dir_all(parent);
    }
    let Ok(file) = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn load_profile(path: Option<&Path>, default_sound: bool) -> Profile {
    let fallback = Profile {
        player_name: String::new(),
        sound: default_sound,
    };
    let Some(path) = path else {
        return fallback;
    };
    match Profile::load(path) {
        Ok(Some(profile)) => profile,
        Ok(None) => fallback,
        Err(e) => {
            warn!(error = %ErrorChain(&e), "Failed to load player profile");
            fallback
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|src| src.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}
