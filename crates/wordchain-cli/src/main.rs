mod app;
mod cli;
mod render;
mod store;
mod theme;

use app::App;
use clap::Parser;
use cli::Cli;
use render::Painter;
use std::io;
use std::process::ExitCode;
use store::FileStore;
use theme::Theme;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let store = FileStore::new(cli.store.clone().unwrap_or_else(FileStore::default_path));
    log::debug!("using store {}", store.path().display());

    let painter = if cli.no_color {
        Painter::plain()
    } else if cli.high_contrast {
        Painter::new(Theme::high_contrast(), true)
    } else {
        Painter::new(Theme::default(), true)
    };
    let mut app = App::new(store, cli.alphabet.alphabet(), painter);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match app.run(&cli.command, &mut out) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
