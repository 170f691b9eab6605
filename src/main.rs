mod action;
mod app;
mod backend;
mod command;
mod config;
mod editor;
mod extract;
mod preview;
mod ui;

use std::env;
use std::io;

use arboard::Clipboard;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use action::Action;
use app::{App, Focus, Phase, Screen, View};
use config::Config;
use ui::draw;

fn main() -> io::Result<()> {
    // Parse command line args
    let args: Vec<String> = env::args().collect();
    let mut api_url: Option<String> = None;
    let mut raw = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--api" => {
                i += 1;
                api_url = args.get(i).cloned();
            }
            "--raw" => raw = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let _log_guard = init_logging();

    let mut config = Config::from_env();
    if let Some(url) = api_url {
        config.api_url = url;
    }
    if raw {
        config.strip_fences = false;
    }

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(());
        }
    };
    info!(endpoint = app.endpoint(), "starting uigen");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn print_usage() {
    println!("uigen - AI component generator for the terminal");
    println!();
    println!("Usage: uigen [options]");
    println!();
    println!("Options:");
    println!("  --api <url>   Backend base URL (default http://localhost:5000)");
    println!("  --raw         Take backend responses verbatim, keeping code fences");
    println!("  -h, --help    Show this help");
    println!();
    println!("Environment:");
    println!("  UIGEN_API_URL        Backend base URL");
    println!("  UIGEN_GENERATE_PATH  Path appended for generation (default /generate)");
    println!("  UIGEN_RAW_RESULT     Set to 1 to keep responses verbatim");
    println!("  UIGEN_LOG            Filter for diagnostics written to uigen.log");
}

/// The terminal belongs to the TUI, so diagnostics go to a file, and only
/// when UIGEN_LOG asks for them.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = env::var("UIGEN_LOG").ok()?;
    let appender = tracing_appender::rolling::never(".", "uigen.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| draw(frame, app))?;

        // Poll for events with timeout (60 FPS for smooth animation)
        if event::poll(std::time::Duration::from_millis(app.config.tick_rate_ms))? {
            match event::read()? {
                Event::Key(key) => match app.screen {
                    Screen::Splash => {
                        if key.code == KeyCode::Esc {
                            return Ok(());
                        }
                        app.screen = Screen::Workbench;
                    }
                    Screen::Workbench => handle_key(app, key),
                },
                Event::Paste(text) => handle_paste(app, &text),
                Event::Mouse(mouse) => handle_mouse(app, mouse, terminal.size()?.width),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: event::KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Bindings that work from any panel
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('y') if ctrl => {
            app.handle_action(Action::CopyCode);
            return;
        }
        KeyCode::Char('e') if ctrl => {
            app.handle_action(Action::ExportCode);
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.handle_action(Action::RefreshPreview);
            return;
        }
        KeyCode::F(1) => {
            app.handle_action(Action::Help);
            return;
        }
        KeyCode::F(2) => {
            app.toggle_view();
            return;
        }
        KeyCode::Esc => {
            app.escape();
            return;
        }
        KeyCode::Tab => {
            if app.showing_command_popup() && app.command_selection.is_some() {
                // Tab applies the highlighted command when the popup is open
                app.apply_command_selection();
            } else {
                app.cycle_focus();
            }
            return;
        }
        KeyCode::BackTab => {
            app.cycle_focus_back();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Prompt => handle_prompt_key(app, key),
        Focus::Framework => handle_framework_key(app, key),
        Focus::Output => handle_output_key(app, key),
    }
}

fn handle_prompt_key(app: &mut App, key: event::KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => app.prompt_backspace(),
        KeyCode::Up => {
            if app.showing_command_popup() {
                app.command_select_up();
            }
        }
        KeyCode::Down => {
            if app.showing_command_popup() {
                app.command_select_down();
            }
        }
        KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Bracketed paste covers most terminals; Ctrl+V covers the rest.
            if let Ok(text) = Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
                app.prompt_paste(&text);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.prompt_insert(c)
        }
        _ => {}
    }
}

fn handle_framework_key(app: &mut App, key: event::KeyEvent) {
    match key.code {
        KeyCode::Up => app.framework_up(),
        KeyCode::Down => app.framework_down(),
        KeyCode::Enter => app.submit_input(),
        _ => {}
    }
}

fn handle_output_key(app: &mut App, key: event::KeyEvent) {
    match app.view {
        View::Preview => {
            let step = app.config.scroll_step;
            match key.code {
                KeyCode::Up => app.preview.scroll = app.preview.scroll.saturating_sub(step),
                KeyCode::Down => app.preview.scroll = app.preview.scroll.saturating_add(step),
                KeyCode::PageUp => app.preview.scroll = app.preview.scroll.saturating_sub(20),
                KeyCode::PageDown => app.preview.scroll = app.preview.scroll.saturating_add(20),
                _ => {}
            }
        }
        View::Source => {
            // Edits are refused while a request is in flight so a completing
            // generation cannot race hand edits.
            if !app.editing_enabled() {
                return;
            }
            match key.code {
                KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Ok(text) = Clipboard::new().and_then(|mut clipboard| clipboard.get_text())
                    {
                        app.code.insert_str(&text);
                    }
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.code.insert_char(c)
                }
                KeyCode::Enter => app.code.insert_newline(),
                KeyCode::Backspace => app.code.backspace(),
                KeyCode::Delete => app.code.delete_forward(),
                KeyCode::Left => app.code.move_left(),
                KeyCode::Right => app.code.move_right(),
                KeyCode::Up => app.code.move_up(1),
                KeyCode::Down => app.code.move_down(1),
                KeyCode::Home => app.code.move_home(),
                KeyCode::End => app.code.move_end(),
                KeyCode::PageUp => app.code.move_up(20),
                KeyCode::PageDown => app.code.move_down(20),
                _ => {}
            }
        }
    }
}

fn handle_paste(app: &mut App, text: &str) {
    if app.screen != Screen::Workbench {
        return;
    }
    match app.focus {
        Focus::Prompt => app.prompt_paste(text),
        Focus::Output if app.editing_enabled() => app.code.insert_str(text),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: event::MouseEvent, term_width: u16) {
    if app.screen != Screen::Workbench {
        return;
    }

    // The composer owns the left 42% of the row (ui.rs layout).
    let split = term_width.saturating_mul(42) / 100;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.focus = if mouse.column <= split {
                Focus::Prompt
            } else {
                Focus::Output
            };
        }
        MouseEventKind::ScrollUp if mouse.column > split => scroll_output(app, true),
        MouseEventKind::ScrollDown if mouse.column > split => scroll_output(app, false),
        _ => {}
    }
}

fn scroll_output(app: &mut App, up: bool) {
    if app.phase != Phase::Ready {
        return;
    }
    let step = app.config.scroll_step;
    match app.view {
        View::Preview => {
            app.preview.scroll = if up {
                app.preview.scroll.saturating_sub(step)
            } else {
                app.preview.scroll.saturating_add(step)
            };
        }
        View::Source => {
            if up {
                app.code.move_up(step);
            } else {
                app.code.move_down(step);
            }
        }
    }
}
