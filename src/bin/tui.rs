//! GreenChat TUI (Terminal User Interface)
//!
//! A terminal-based chat client for a GREEN-API WhatsApp instance.

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use greenchat::storage::Settings;
use greenchat::tui::{app::DEFAULT_SETTINGS_PATH, clipboard::RealClipboard, ui::ui, App, Screen};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::io;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(DEFAULT_SETTINGS_PATH)
        .with_context(|| format!("failed to load settings from {}", DEFAULT_SETTINGS_PATH))?;

    // Log to a file; stdout belongs to the terminal UI
    greenchat::init_with_log_file(&settings.log_path)
        .with_context(|| format!("failed to open log file {}", settings.log_path))?;
    tracing::info!("Starting greenchat-tui against {}", settings.api_url);

    let mut app = App::with_settings(settings)
        .map_err(|e| anyhow::anyhow!("failed to start application: {}", e))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let res = run_app(&mut terminal, &mut app);

    // Stop the poll task before the runtime goes away
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("UI loop failed: {:?}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Pick up messages folded in by the poll task
        app.refresh_snapshot();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.current_screen {
                    Screen::Login => {
                        match key.code {
                            KeyCode::Esc => {
                                app.should_quit = true;
                            }
                            KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                match RealClipboard::new() {
                                    Ok(mut clipboard) => app.paste_into_login(&mut clipboard),
                                    Err(e) => {
                                        if let Some(screen) = &mut app.login_screen {
                                            screen.set_error(e.to_string());
                                        }
                                    }
                                }
                            }
                            KeyCode::Tab | KeyCode::BackTab => {
                                if let Some(screen) = &mut app.login_screen {
                                    screen.toggle_field();
                                }
                            }
                            KeyCode::Char(c) if !c.is_control() => {
                                if let Some(screen) = &mut app.login_screen {
                                    screen.add_char(c);
                                }
                            }
                            KeyCode::Backspace => {
                                if let Some(screen) = &mut app.login_screen {
                                    screen.backspace();
                                }
                            }
                            KeyCode::Enter => {
                                app.submit_login();
                            }
                            _ => {}
                        }
                    }
                    Screen::ChatList => {
                        let chat_count = app.snapshot.conversations.len();
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                app.should_quit = true;
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                if let Some(screen) = &mut app.chat_list_screen {
                                    screen.next(chat_count);
                                }
                            }
                            KeyCode::Up | KeyCode::Char('k') => {
                                if let Some(screen) = &mut app.chat_list_screen {
                                    screen.previous(chat_count);
                                }
                            }
                            KeyCode::Enter => {
                                app.open_selected_chat();
                            }
                            KeyCode::Char('n') => {
                                app.show_new_chat_screen();
                            }
                            KeyCode::Char('r') => {
                                app.poll_now();
                            }
                            KeyCode::Char('L') => {
                                app.logout();
                            }
                            _ => {}
                        }
                    }
                    Screen::NewChat => {
                        match key.code {
                            KeyCode::Esc => {
                                app.back_to_chat_list();
                            }
                            KeyCode::Char(c) => {
                                if let Some(screen) = &mut app.new_chat_screen {
                                    screen.add_char(c);
                                }
                            }
                            KeyCode::Backspace => {
                                if let Some(screen) = &mut app.new_chat_screen {
                                    screen.backspace();
                                }
                            }
                            KeyCode::Enter => {
                                app.submit_new_chat();
                            }
                            _ => {}
                        }
                    }
                    Screen::ChatView => {
                        match key.code {
                            KeyCode::Esc => {
                                app.back_to_chat_list();
                            }
                            KeyCode::Char(c) if !c.is_control() => {
                                if let Some(screen) = &mut app.chat_view_screen {
                                    screen.add_char(c);
                                }
                            }
                            KeyCode::Backspace => {
                                if let Some(screen) = &mut app.chat_view_screen {
                                    screen.backspace();
                                }
                            }
                            KeyCode::Enter => {
                                app.send_message_in_chat();
                            }
                            KeyCode::Up => {
                                if let Some(screen) = &mut app.chat_view_screen {
                                    let max_offset = app
                                        .snapshot
                                        .conversation(&screen.counterpart_id)
                                        .map(|c| c.messages.len().saturating_sub(1))
                                        .unwrap_or(0);
                                    screen.scroll_up(max_offset);
                                }
                            }
                            KeyCode::Down => {
                                if let Some(screen) = &mut app.chat_view_screen {
                                    screen.scroll_down();
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
