//! Screen rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tareini_api::types::format_limit_date;

use crate::app::{AppState, AuthField, DraftField, EditField, Screen, TasksMode};

pub fn draw(frame: &mut Frame, app: &mut AppState) {
    match app.screen {
        Screen::Login => draw_credential_screen(
            frame,
            app,
            " Iniciar sesión ",
            "Ingresa tus credenciales para acceder",
            Color::Cyan,
            vec![
                Line::from(vec![
                    Span::raw("Pulsa "),
                    key_span("Tab", Color::Cyan),
                    Span::raw(" para cambiar de campo | "),
                    key_span("Enter", Color::Green),
                    Span::raw(" para iniciar sesión"),
                ]),
                Line::from(vec![
                    Span::raw("Pulsa "),
                    key_span("Ctrl+R", Color::Magenta),
                    Span::raw(" para registrarte | "),
                    key_span("Esc", Color::Red),
                    Span::raw(" para salir"),
                ]),
            ],
        ),
        Screen::Register => draw_credential_screen(
            frame,
            app,
            " Crear cuenta ",
            "Regístrate para acceder a tu cuenta",
            Color::Green,
            vec![
                Line::from(vec![
                    Span::raw("Pulsa "),
                    key_span("Tab", Color::Cyan),
                    Span::raw(" para cambiar de campo | "),
                    key_span("Enter", Color::Green),
                    Span::raw(" para crear la cuenta"),
                ]),
                Line::from(vec![
                    Span::raw("Pulsa "),
                    key_span("Esc", Color::Red),
                    Span::raw(" para volver al inicio de sesión"),
                ]),
            ],
        ),
        Screen::Tasks => draw_tasks_screen(frame, app),
    }

    if let Some(prompt) = app.relogin_prompt.clone() {
        draw_relogin_popup(frame, &prompt);
    } else if let Some(error) = app.error_message.clone() {
        draw_error_popup(frame, &error);
    }
}

fn key_span(key: &str, color: Color) -> Span<'_> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn error_line(message: &Option<String>) -> Line<'_> {
    match message {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

/// Login and register share the same form body; only the framing differs.
fn draw_credential_screen(
    frame: &mut Frame,
    app: &AppState,
    title: &str,
    subtitle: &str,
    accent: Color,
    instructions: Vec<Line>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(frame.area());

    let form_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(accent));
    frame.render_widget(form_block.clone(), chunks[1]);

    let inner_area = form_block.inner(chunks[1]);
    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Email field
            Constraint::Length(1), // Email error
            Constraint::Length(1), // Password field
            Constraint::Length(1), // Password error
            Constraint::Length(1), // General error
            Constraint::Min(0),    // Instructions
        ])
        .split(inner_area);

    let subtitle_widget =
        Paragraph::new(subtitle).style(Style::default().fg(Color::Gray));
    frame.render_widget(subtitle_widget, form_chunks[0]);

    let email_field = Paragraph::new(format!("Correo electrónico: {}", app.form.email))
        .style(field_style(app.form.focus == AuthField::Email));
    frame.render_widget(email_field, form_chunks[2]);
    frame.render_widget(
        Paragraph::new(error_line(&app.form.errors.email)),
        form_chunks[3],
    );

    let password_display = "*".repeat(app.form.password.chars().count());
    let label = if app.form.in_flight {
        format!("Contraseña: {password_display}  (Cargando...)")
    } else {
        format!("Contraseña: {password_display}")
    };
    let password_field =
        Paragraph::new(label).style(field_style(app.form.focus == AuthField::Password));
    frame.render_widget(password_field, form_chunks[4]);
    frame.render_widget(
        Paragraph::new(error_line(&app.form.errors.password)),
        form_chunks[5],
    );

    if let Some(general) = &app.form.general_error {
        let general_widget = Paragraph::new(general.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(general_widget, form_chunks[6]);
    }

    let instructions_widget = Paragraph::new(instructions)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(instructions_widget, form_chunks[7]);

    match app.form.focus {
        AuthField::Email => frame.set_cursor_position((
            form_chunks[2].x + 20 + app.form.email.chars().count() as u16,
            form_chunks[2].y,
        )),
        AuthField::Password => frame.set_cursor_position((
            form_chunks[4].x + 12 + password_display.chars().count() as u16,
            form_chunks[4].y,
        )),
    }
}

fn draw_tasks_screen(frame: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Navbar: brand on the left, sign-out on the right.
    let header_title = if app.loading {
        " Tareini — Gestor de Tareas (Cargando...) "
    } else {
        " Tareini — Gestor de Tareas "
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            header_title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("(s) Cerrar sesión", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick),
    );
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|task| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    task.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw(task.description.clone())),
                Line::from(vec![
                    Span::styled(
                        format!("Fecha límite: {}", format_limit_date(&task.limit_date)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("Estado: {}", task.status),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Tareas ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut list_state = ListState::default();
    if !app.tasks.is_empty() {
        list_state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    let instructions = Paragraph::new(Line::from(
        "j/k moverse | n nueva | e editar | d eliminar | r actualizar | s cerrar sesión | q salir",
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, chunks[2]);

    match app.mode {
        TasksMode::Create => draw_create_popup(frame, app),
        TasksMode::Edit => draw_edit_popup(frame, app),
        TasksMode::List => {}
    }
}

fn draw_create_popup(frame: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let popup_block = Block::default()
        .title(" Nueva tarea ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(popup_block.clone(), area);

    let inner = popup_block.inner(area);
    let field_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Title error
            Constraint::Length(1), // Description
            Constraint::Length(1), // Description error
            Constraint::Length(1), // Limit date
            Constraint::Length(1), // Limit date error
            Constraint::Min(0),    // Instructions
        ])
        .split(inner);

    let title_field = Paragraph::new(format!("Título: {}", app.draft.title))
        .style(field_style(app.draft_focus == DraftField::Title));
    frame.render_widget(title_field, field_chunks[0]);
    frame.render_widget(
        Paragraph::new(error_line(&app.draft_errors.title)),
        field_chunks[1],
    );

    let description_field = Paragraph::new(format!("Descripción: {}", app.draft.description))
        .style(field_style(app.draft_focus == DraftField::Description));
    frame.render_widget(description_field, field_chunks[2]);
    frame.render_widget(
        Paragraph::new(error_line(&app.draft_errors.description)),
        field_chunks[3],
    );

    let date_field = Paragraph::new(format!(
        "Fecha límite (YYYY-MM-DD): {}",
        app.draft.limit_date
    ))
    .style(field_style(app.draft_focus == DraftField::LimitDate));
    frame.render_widget(date_field, field_chunks[4]);
    frame.render_widget(
        Paragraph::new(error_line(&app.draft_errors.limit_date)),
        field_chunks[5],
    );

    let instructions = Paragraph::new(Line::from(vec![
        key_span("Tab", Color::Cyan),
        Span::raw(" campos | "),
        key_span("Enter", Color::Green),
        Span::raw(" agregar | "),
        key_span("Esc", Color::Red),
        Span::raw(" cancelar"),
    ]))
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center);
    frame.render_widget(instructions, field_chunks[6]);
}

fn draw_edit_popup(frame: &mut Frame, app: &AppState) {
    let Some(edit) = &app.editing else {
        return;
    };

    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let popup_block = Block::default()
        .title(" Editar tarea ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(popup_block.clone(), area);

    let inner = popup_block.inner(area);
    let field_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Description
            Constraint::Length(2), // Limit date
            Constraint::Length(2), // Status selector
            Constraint::Min(0),    // Instructions
        ])
        .split(inner);

    let title_field = Paragraph::new(format!("Título: {}", edit.task.title))
        .style(field_style(edit.focus == EditField::Title));
    frame.render_widget(title_field, field_chunks[0]);

    let description_field = Paragraph::new(format!("Descripción: {}", edit.task.description))
        .style(field_style(edit.focus == EditField::Description));
    frame.render_widget(description_field, field_chunks[1]);

    let date_field = Paragraph::new(format!(
        "Fecha límite (YYYY-MM-DD): {}",
        edit.limit_date_input
    ))
    .style(field_style(edit.focus == EditField::LimitDate));
    frame.render_widget(date_field, field_chunks[2]);

    let status_field = Paragraph::new(format!("Estado: ◀ {} ▶", edit.task.status))
        .style(field_style(edit.focus == EditField::Status));
    frame.render_widget(status_field, field_chunks[3]);

    let instructions = Paragraph::new(Line::from(vec![
        key_span("Tab", Color::Cyan),
        Span::raw(" campos | "),
        key_span("←/→", Color::Magenta),
        Span::raw(" estado | "),
        key_span("Enter", Color::Green),
        Span::raw(" guardar | "),
        key_span("Esc", Color::Red),
        Span::raw(" cancelar"),
    ]))
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center);
    frame.render_widget(instructions, field_chunks[4]);
}

fn draw_relogin_popup(frame: &mut Frame, prompt: &str) {
    let area = centered_rect(60, 25, frame.area());

    let popup_block = Block::default()
        .title(" Debes iniciar sesión ")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .style(Style::default().fg(Color::Yellow));

    let text = Paragraph::new(vec![
        Line::from(prompt),
        Line::from(""),
        Line::from(Span::styled(
            "Pulsa cualquier tecla para continuar",
            Style::default().fg(Color::Gray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::White))
    .block(popup_block);

    frame.render_widget(Clear, area);
    frame.render_widget(text, area);
}

fn draw_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());

    let popup_block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .style(Style::default().fg(Color::Red));

    let error_text = Paragraph::new(error)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(popup_block);

    frame.render_widget(Clear, area);
    frame.render_widget(error_text, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
