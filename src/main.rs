// momonga playground: terminal editor and runner for momonga programs

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use momonga_playground::cli::Cli;
use momonga_playground::config::Config;
use momonga_playground::editor::EditorHost;
use momonga_playground::interpreter::ProcessInterpreter;
use momonga_playground::prefs::{FileStore, MemoryStore, PreferenceStore};
use momonga_playground::session::{Session, SessionOptions};
use momonga_playground::snippets::SnippetCatalog;
use momonga_playground::ui::App;

/// Log to a file; the terminal belongs to the UI. Logging stays off when no
/// file can be opened.
fn setup_tracing(log_file: Option<PathBuf>) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let Some(path) = log_file.or_else(|| {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("momonga-playground").join("playground.log"))
    }) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("momonga_playground=info"));

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        tracing::info!(path = ?path, "tracing initialized");
    }
}

fn open_store(path: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    let Some(path) = path.or_else(FileStore::default_path) else {
        tracing::warn!("no preferences directory, preferences will not be saved");
        return Box::new(MemoryStore::new());
    };

    match FileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable preferences");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let catalog = SnippetCatalog::builtin();

    if cli.list_snippets {
        for snippet in catalog.iter() {
            println!("{:<28} {}", snippet.key, snippet.label);
        }
        return Ok(());
    }

    setup_tracing(cli.log_file.clone());

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let mut process = config.interpreter.process_config();
    if let Some(program) = cli.interpreter {
        process.program = program;
    }

    let options = SessionOptions {
        tab_width: config.ui.tab_width,
        max_output_lines: config.output.max_lines,
        narrow_width: config.ui.narrow_width,
        initial_snippet: cli.snippet,
        theme_override: cli.theme,
    };

    let host = EditorHost::new();
    let session = Session::new(
        Box::new(ProcessInterpreter::new(process)),
        open_store(cli.prefs),
        catalog,
        &host,
        options,
    )?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
