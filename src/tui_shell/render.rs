use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::model::{ApiClient, FactoryEntry, Route};
use crate::notify::NoticeLevel;
use crate::shell::{MenuKind, Screen};

use super::app::App;
use super::form_rows;

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);

    match app.screen() {
        Screen::RouteList => draw_route_list(frame, app, chunks[1]),
        Screen::RouteForm => draw_route_form(frame, app, chunks[1]),
        Screen::ClientList => draw_client_list(frame, app, chunks[1]),
        Screen::FactoryList => draw_factory_list(frame, app, chunks[1]),
    }

    draw_notice(frame, app, chunks[2]);
    draw_input_or_hints(frame, app, chunks[3]);

    if let Some(pending) = &app.pending {
        draw_confirm(frame, &pending.prompt());
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |kind: MenuKind, label: &str| -> Span<'static> {
        if app.shell.active() == kind {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )
        } else {
            Span::raw(format!(" {} ", label))
        }
    };
    let line = Line::from(vec![
        tab(MenuKind::Routes, "1 Routes"),
        Span::raw(" "),
        tab(MenuKind::ApiClients, "2 API Clients"),
        Span::raw(" "),
        tab(MenuKind::Factories, "3 Factories"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn list_title(label: &str, query: &str, loading: bool) -> String {
    let mut title = label.to_string();
    if !query.is_empty() {
        title.push_str(&format!(" query={}", query));
    }
    if loading {
        title.push_str(" (loading...)");
    }
    title
}

fn draw_route_list(frame: &mut Frame, app: &App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let items = app.shell.routes.items();
    let mut rows: Vec<ListItem> = items.iter().map(route_row).collect();
    if items.is_empty() {
        rows.push(ListItem::new("(no routes)"));
    }

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.routes_selected.min(items.len() - 1)));
    }

    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(list_title(
            "routes",
            app.shell.routes.query(),
            app.shell.routes.is_loading(),
        )))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, parts[0], &mut state);

    let details = items
        .get(app.routes_selected)
        .map(route_details)
        .unwrap_or_else(|| vec![Line::from("(no selection)")]);
    frame.render_widget(
        Paragraph::new(details)
            .block(Block::default().borders(Borders::ALL).title("details"))
            .wrap(Wrap { trim: false }),
        parts[1],
    );
}

fn route_row(route: &Route) -> ListItem<'static> {
    let marker = if route.enabled { "*" } else { " " };
    let style = if route.enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    ListItem::new(format!(
        "{} {:<24} order={:<4} {}",
        marker, route.id, route.order, route.uri
    ))
    .style(style)
}

fn route_details(route: &Route) -> Vec<Line<'static>> {
    let mut out = vec![
        Line::from(format!("id: {}", route.id)),
        Line::from(format!("uri: {}", route.uri)),
        Line::from(format!("order: {}  enabled: {}", route.order, route.enabled)),
    ];
    for (i, p) in route.predicates.iter().enumerate() {
        out.push(Line::from(format!(
            "predicate #{}: {} {}",
            i + 1,
            p.name,
            serde_json::Value::Object(p.args.clone())
        )));
    }
    for (i, f) in route.filters.iter().enumerate() {
        out.push(Line::from(format!(
            "filter #{}: {} {} (enabled: {})",
            i + 1,
            f.name,
            serde_json::Value::Object(f.args.clone()),
            f.enabled
        )));
    }
    if let Some(desc) = &route.predicate_description {
        out.push(Line::from(format!("predicate notes: {}", desc)));
    }
    if let Some(desc) = &route.filter_description {
        out.push(Line::from(format!("filter notes: {}", desc)));
    }
    out
}

fn draw_route_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.shell.controller.form() else {
        return;
    };
    let rows = form_rows::form_rows(form);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|&row| {
            ListItem::new(format!(
                "{:<22} {}",
                form_rows::row_label(row),
                form_rows::row_value(form, row)
            ))
        })
        .collect();

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.form_selected.min(rows.len() - 1)));
    }

    let title = if form.is_edit() {
        format!("edit route {}", form.id)
    } else {
        "new route".to_string()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_client_list(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.shell.clients.items();
    let mut rows: Vec<ListItem> = items.iter().map(client_row).collect();
    if items.is_empty() {
        rows.push(ListItem::new("(no API clients)"));
    }

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.clients_selected.min(items.len() - 1)));
    }

    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(list_title(
            "API clients",
            app.shell.clients.query(),
            app.shell.clients.is_loading(),
        )))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut state);
}

fn client_row(client: &ApiClient) -> ListItem<'static> {
    let marker = if client.enabled { "*" } else { " " };
    let style = if client.enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    ListItem::new(format!(
        "{} {:<36} {}",
        marker, client.app_key, client.description
    ))
    .style(style)
}

fn draw_factory_list(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.shell.factories.items();
    let mut rows: Vec<ListItem> = items.iter().map(factory_row).collect();
    if items.is_empty() {
        rows.push(ListItem::new("(no factories)"));
    }

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.factories_selected.min(items.len() - 1)));
    }

    let list = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("factory catalog (read-only)"),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut state);
}

fn factory_row(entry: &FactoryEntry) -> ListItem<'static> {
    let params = entry
        .info
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.type_name))
        .collect::<Vec<_>>()
        .join(", ");
    ListItem::new(format!(
        "{:<10} {:<28} {}",
        entry.kind.label(),
        entry.info.name,
        params
    ))
}

fn draw_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.notices.latest() else {
        return;
    };
    let style = match notice.level {
        NoticeLevel::Success => Style::default().fg(Color::Green),
        NoticeLevel::Error => Style::default().fg(Color::Red),
        NoticeLevel::Warn => Style::default().fg(Color::Yellow),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(notice.message, style))),
        area,
    );
}

fn draw_input_or_hints(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_target.is_some() {
        frame.render_widget(
            Paragraph::new(format!("> {}", app.input.buf)),
            area,
        );
        return;
    }
    let hints = match app.screen() {
        Screen::RouteList => "n:new  Enter:edit  e:toggle  d:delete  /:search  r:reset  q:quit",
        Screen::RouteForm => "Enter:edit field  p:+predicate  f:+filter  x:remove  s:submit  Esc:back",
        Screen::ClientList => "n:new  Enter:edit  e:toggle  d:delete  /:search  r:reset  q:quit",
        Screen::FactoryList => "/:search  r:reset  q:quit",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::Gray),
        ))),
        area,
    );
}

fn draw_confirm(frame: &mut Frame, prompt: &str) {
    let area = frame.area();
    let width = (prompt.len() as u16 + 6).min(area.width.saturating_sub(4));
    let rect = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height / 2,
        width,
        height: 3,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(prompt.to_string())
            .block(Block::default().borders(Borders::ALL).title("confirm")),
        rect,
    );
}
