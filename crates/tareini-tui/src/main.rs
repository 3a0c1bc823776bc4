mod app;
mod session;
mod ui;

use anyhow::Result;
use app::{AppState, DraftField, EditField, Screen, TasksMode};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use session::Session;
use std::{io, time::Duration};
use tareini_api::{ApiError, AuthClient, Credentials, TaskClient};
use tareini_api::validate::{validate_credentials, validate_draft};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let base_url =
        std::env::var("TAREINI_API_URL").unwrap_or_else(|_| "http://localhost:8001".to_string());
    let session = Session::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &session, &base_url).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &Session,
    base_url: &str,
) -> Result<()> {
    let auth_client = AuthClient::new(base_url.to_string());
    let mut app = AppState::default();
    let mut task_client: Option<TaskClient> = None;

    // A stored token from an earlier session goes straight to the task
    // list; the first fetch decides whether it is still good.
    if let Some(token) = session.load() {
        let client = TaskClient::new(base_url.to_string(), token);
        app.enter_tasks();
        refresh_tasks(&mut app, &client).await;
        task_client = Some(client);
    }

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        // The relogin prompt swallows the next key as its acknowledgment.
        if app.relogin_prompt.is_some() {
            app.acknowledge_relogin(session);
            task_client = None;
            continue;
        }

        // An error popup is dismissed by the next key.
        if app.error_message.take().is_some() {
            continue;
        }

        match app.screen {
            Screen::Login | Screen::Register => match key.code {
                KeyCode::Tab => app.form.toggle_focus(),
                KeyCode::Backspace => app.form.backspace(),
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if app.screen == Screen::Login {
                        app.form.reset();
                        app.screen = Screen::Register;
                    }
                }
                KeyCode::Esc => {
                    if app.screen == Screen::Register {
                        app.form.reset();
                        app.screen = Screen::Login;
                    } else {
                        return Ok(());
                    }
                }
                KeyCode::Enter => {
                    // Only login tracks an in-flight flag; a submission in
                    // progress cannot be repeated.
                    if app.screen == Screen::Login && app.form.in_flight {
                        continue;
                    }

                    app.form.general_error = None;
                    app.form.errors =
                        validate_credentials(&app.form.email, &app.form.password);
                    if !app.form.errors.is_clean() {
                        continue;
                    }

                    let credentials = Credentials {
                        email: app.form.email.clone(),
                        password: app.form.password.clone(),
                    };
                    let is_login = app.screen == Screen::Login;
                    if is_login {
                        app.form.in_flight = true;
                        terminal.draw(|f| ui::draw(f, &mut app))?;
                    }

                    let result = if is_login {
                        auth_client.log_in(&credentials).await
                    } else {
                        auth_client.sign_up(&credentials).await
                    };
                    app.form.in_flight = false;

                    match result {
                        Ok(response) => {
                            if let Err(err) = session.store(&response.token) {
                                warn!(%err, "failed to persist session token");
                            }
                            let client =
                                TaskClient::new(base_url.to_string(), response.token);
                            app.enter_tasks();
                            refresh_tasks(&mut app, &client).await;
                            task_client = Some(client);
                        }
                        Err(err) => {
                            app.form.general_error = Some(err.user_message());
                        }
                    }
                }
                KeyCode::Char(c) => app.form.push_char(c),
                _ => {}
            },
            Screen::Tasks => {
                let Some(client) = task_client.as_ref() else {
                    // No usable session; back to login.
                    app.sign_out(session);
                    continue;
                };

                match app.mode {
                    TasksMode::List => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('s') => {
                            app.sign_out(session);
                            task_client = None;
                        }
                        KeyCode::Char('r') => refresh_tasks(&mut app, client).await,
                        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
                        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
                        KeyCode::Char('n') => app.open_create(),
                        KeyCode::Char('e') => app.start_editing(),
                        KeyCode::Char('d') => {
                            if let Some(task) = app.selected_task() {
                                let id = task.id.clone();
                                // A failed delete leaves the list as it was;
                                // only a completed one triggers the refetch.
                                match client.delete(&id).await {
                                    Ok(()) => refresh_tasks(&mut app, client).await,
                                    Err(err) => warn!(%err, %id, "task deletion failed"),
                                }
                            }
                        }
                        _ => {}
                    },
                    TasksMode::Create => match key.code {
                        KeyCode::Esc => app.close_create(),
                        KeyCode::Tab => {
                            app.draft_focus = match app.draft_focus {
                                DraftField::Title => DraftField::Description,
                                DraftField::Description => DraftField::LimitDate,
                                DraftField::LimitDate => DraftField::Title,
                            };
                        }
                        KeyCode::Backspace => match app.draft_focus {
                            DraftField::Title => {
                                app.draft.title.pop();
                            }
                            DraftField::Description => {
                                app.draft.description.pop();
                            }
                            DraftField::LimitDate => {
                                app.draft.limit_date.pop();
                            }
                        },
                        KeyCode::Enter => {
                            let today = Local::now().date_naive();
                            app.draft_errors = validate_draft(&app.draft, today);
                            if !app.draft_errors.is_clean() {
                                continue;
                            }
                            let Some(payload) = app.draft.to_payload() else {
                                continue;
                            };
                            match client.create(&payload).await {
                                Ok(()) => {
                                    app.draft.clear();
                                    app.close_create();
                                    refresh_tasks(&mut app, client).await;
                                }
                                Err(ApiError::Unauthenticated) => app.force_relogin(),
                                Err(err) => {
                                    app.error_message = Some(err.user_message());
                                }
                            }
                        }
                        KeyCode::Char(c) => match app.draft_focus {
                            DraftField::Title => app.draft.title.push(c),
                            DraftField::Description => app.draft.description.push(c),
                            DraftField::LimitDate => app.draft.limit_date.push(c),
                        },
                        _ => {}
                    },
                    TasksMode::Edit => {
                        let Some(edit) = app.editing.as_mut() else {
                            app.stop_editing();
                            continue;
                        };
                        match key.code {
                            KeyCode::Esc => app.stop_editing(),
                            KeyCode::Tab => {
                                edit.focus = match edit.focus {
                                    EditField::Title => EditField::Description,
                                    EditField::Description => EditField::LimitDate,
                                    EditField::LimitDate => EditField::Status,
                                    EditField::Status => EditField::Title,
                                };
                            }
                            KeyCode::Left if edit.focus == EditField::Status => {
                                edit.task.status = edit.task.status.prev();
                            }
                            KeyCode::Right if edit.focus == EditField::Status => {
                                edit.task.status = edit.task.status.next();
                            }
                            KeyCode::Backspace => match edit.focus {
                                EditField::Title => {
                                    edit.task.title.pop();
                                }
                                EditField::Description => {
                                    edit.task.description.pop();
                                }
                                EditField::LimitDate => {
                                    edit.limit_date_input.pop();
                                }
                                EditField::Status => {}
                            },
                            KeyCode::Enter => {
                                // The edit path sends the full record as-is,
                                // without re-validation.
                                let record = edit.record();
                                match client.update(&record).await {
                                    Ok(()) => {
                                        app.stop_editing();
                                        refresh_tasks(&mut app, client).await;
                                    }
                                    Err(err) => {
                                        app.error_message = Some(err.user_message());
                                    }
                                }
                            }
                            KeyCode::Char(c) => match edit.focus {
                                EditField::Title => edit.task.title.push(c),
                                EditField::Description => edit.task.description.push(c),
                                EditField::LimitDate => edit.limit_date_input.push(c),
                                EditField::Status => {}
                            },
                            _ => {}
                        }
                    }
                }
            }
        }
    }
}

/// Fetches the collection and replaces view state verbatim. A dead session
/// raises the acknowledgment prompt instead of an inline error.
async fn refresh_tasks(app: &mut AppState, client: &TaskClient) {
    app.loading = true;
    match client.list().await {
        Ok(tasks) => app.replace_tasks(tasks),
        Err(ApiError::Unauthenticated) => app.force_relogin(),
        Err(err) => app.error_message = Some(err.user_message()),
    }
    app.loading = false;
}
