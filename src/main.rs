//! Grantview - A terminal-based search and export client for FTA grant records.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use grantview::app::{App, AppSettings, View};
use grantview::config::{Config, DataSource};
use grantview::prefs::PreferenceStore;
use grantview::remote::{Backend, Dispatcher, MemoryStore, RestClient};
use grantview::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// How long pending email saves may run after the UI exits.
const SAVE_GRACE: Duration = Duration::from_secs(3);

fn main() -> Result<()> {
    let config = Config::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &config.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Grantview");
    }

    // Everything that can fail on bad input fails before the terminal is touched
    let backend = match build_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let dispatcher = Dispatcher::new(backend, runtime.handle().clone());
    let settings = AppSettings {
        pager: config.pager(),
        result_cap: config.result_cap,
        export_dir: config.export_dir.clone(),
    };
    let mut app = App::new(settings, dispatcher, PreferenceStore::load(config.prefs_path()));
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    // Let captured addresses reach the store before the runtime goes away
    runtime.block_on(app.dispatcher.flush_saves(SAVE_GRACE));

    if config.log.is_some() {
        tracing::info!("Grantview exited");
    }

    Ok(())
}

fn build_backend(config: &Config) -> grantview::Result<Arc<dyn Backend>> {
    config.validate()?;
    let backend: Arc<dyn Backend> = match config.source()? {
        DataSource::Remote { url, key } => {
            tracing::info!("Using remote store at {}", url);
            Arc::new(RestClient::new(url, key))
        },
        DataSource::File(path) => {
            let store = MemoryStore::from_file(&path)?;
            tracing::info!("Using data file {}", path.display());
            Arc::new(store)
        },
    };
    Ok(backend)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                    return Ok(());
                }
                let now = Instant::now();

                // Email gate - handle separately
                if app.gate.is_open() {
                    match key.code {
                        KeyCode::Enter => {
                            app.submit_email(Local::now().date_naive());
                        },
                        KeyCode::Esc => {
                            app.gate.close();
                            app.status = "Export cancelled".to_string();
                        },
                        KeyCode::Backspace => app.gate.backspace(),
                        KeyCode::Char(c) => app.gate.input(c),
                        _ => {},
                    }
                    continue;
                }

                // Filter panel - handle separately
                if app.filters.visible {
                    match key.code {
                        KeyCode::Enter => app.apply_filters(),
                        KeyCode::Esc => app.filters.close(),
                        KeyCode::Tab => app.filters.next_focus(),
                        KeyCode::Backspace => app.filters.backspace(),
                        KeyCode::Up | KeyCode::Left => app.filters.cursor_prev(),
                        KeyCode::Down | KeyCode::Right => app.filters.cursor_next(),
                        KeyCode::Char(c) if app.filters.editing_funding() => app.filters.input(c),
                        KeyCode::Char('k') | KeyCode::Char('h') => app.filters.cursor_prev(),
                        KeyCode::Char('j') | KeyCode::Char('l') => app.filters.cursor_next(),
                        KeyCode::Char(' ') => app.filters.toggle_current(),
                        KeyCode::Char('c') => {
                            app.filters.clear();
                            app.status = "Filters cleared".to_string();
                        },
                        _ => {},
                    }
                    continue;
                }

                // Detail overlay
                if app.detail.is_open() {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => app.detail.close(),
                        KeyCode::Down | KeyCode::Char('j') => app.detail.scroll_down(),
                        KeyCode::Up | KeyCode::Char('k') => app.detail.scroll_up(),
                        _ => {},
                    }
                    continue;
                }

                // Search mode - handle separately
                if app.search.is_editing() {
                    match key.code {
                        KeyCode::Enter => {
                            app.submit_search();
                        },
                        KeyCode::Esc => app.search.cancel(),
                        KeyCode::Tab => app.search.cycle_suggestion(),
                        KeyCode::Backspace => app.search.backspace(),
                        KeyCode::Char(c) => app.search.input(c),
                        _ => {},
                    }
                    continue;
                }

                // Normal mode
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),

                    // Navigation
                    (KeyModifiers::NONE, KeyCode::Up)
                    | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                        app.select_prev(now);
                    },
                    (KeyModifiers::NONE, KeyCode::Down)
                    | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                        app.select_next(now);
                    },
                    (KeyModifiers::CONTROL, KeyCode::Char('d'))
                    | (KeyModifiers::NONE, KeyCode::PageDown) => {
                        app.page_down(now);
                    },
                    (KeyModifiers::CONTROL, KeyCode::Char('u'))
                    | (KeyModifiers::NONE, KeyCode::PageUp) => {
                        app.page_up(now);
                    },
                    (KeyModifiers::NONE, KeyCode::Enter) => {
                        app.open_detail();
                    },
                    (KeyModifiers::NONE, KeyCode::Char('m')) => {
                        if app.view == View::Results {
                            app.load_more(now);
                        }
                    },

                    // Search
                    (KeyModifiers::NONE, KeyCode::Char('/')) => {
                        app.search.start();
                    },
                    (KeyModifiers::NONE, KeyCode::Char('b')) => {
                        app.return_to_search();
                    },

                    // Features
                    (KeyModifiers::NONE, KeyCode::Char('f')) => {
                        app.open_filters();
                    },
                    (KeyModifiers::NONE, KeyCode::Char('e')) => {
                        app.start_export();
                    },
                    (KeyModifiers::SHIFT, KeyCode::Char('T')) => {
                        app.toggle_dark_mode();
                    },
                    (KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                        app.status = "Help: /=search, f=filters, e=export, m=more, b=back, T=theme, q=quit".to_string();
                    },

                    // Escape - close overlays
                    (KeyModifiers::NONE, KeyCode::Esc) => {
                        app.close_overlay();
                    },

                    _ => {},
                }
            }
        }
    }
}
