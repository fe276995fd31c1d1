use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

mod app;
mod cli;
mod config;
mod i18n;
mod input;
mod models;
mod sort;
mod state;
mod store;
mod ui;
mod validate;

use app::App;

fn main() -> Result<()> {
    // Pick the app flavor from the process arguments
    let Some(flavor) = cli::handle_cli()? else {
        return Ok(());
    };

    // All configured paths are resolved relative to the install directory
    let install_dir = config::install_dir()?;
    let config = config::load_config(&install_dir)?;

    let store = store::RecordStore::new(config.db_path(&install_dir), flavor);

    // Build the language registry once; a language file without a matching
    // icon is an unrecoverable configuration error
    let mut localization = i18n::Localization::load(
        &config.languages_path(&install_dir),
        &config.icons_path(&install_dir),
    )?;

    // Restore the previously selected language
    let ui_state = state::load_state(&install_dir).unwrap_or_default();
    if let Some(code) = ui_state.language.as_deref() {
        localization.set_language(code);
    }

    let mut app = App::new(store, localization, install_dir)?;

    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.notification.as_ref().is_some_and(|n| n.is_expired()) {
            app.notification = None;
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if !input::handle_key_input(app, key) {
                    // Persist the selected language before exiting
                    let ui_state = state::UiState {
                        language: Some(app.localization.current().to_string()),
                    };
                    if let Err(e) = state::save_state(&app.install_dir, &ui_state) {
                        eprintln!("Failed to save state: {}", e);
                    }
                    return Ok(());
                }
            }
        }
    }
}
