use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use salon_core::actions::AUTO_RULE_BADGE;
use salon_core::{
    action_status_style, booking_status_style, history_entries, ActionGroup, BookingStatus,
    DraftField, Screen, Tone,
};

use crate::app::{App, InputMode};

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Amber => Color::Yellow,
        Tone::Blue => Color::LightBlue,
        Tone::Green => Color::Green,
        Tone::Red => Color::Red,
        Tone::Teal => Color::Cyan,
        Tone::Muted => Color::Gray,
        Tone::Dim => Color::DarkGray,
    }
}

/// Single-cell glyph for an icon name. Unknown names get a bullet.
fn icon_glyph(name: &str) -> &'static str {
    match name {
        "AlertTriangle" => "▲",
        "AlertCircle" => "●",
        "Zap" => "ϟ",
        "MoveHorizontal" => "↔",
        "Send" => "➤",
        "UserCheck" => "✓",
        "Calendar" => "▦",
        "Info" => "ⓘ",
        "ArrowRight" => "→",
        _ => "•",
    }
}

fn status_badge(status: BookingStatus) -> Span<'static> {
    let style = booking_status_style(status);
    Span::styled(
        format!(" {} ", style.label),
        Style::default().fg(Color::Black).bg(tone_color(style.tone)),
    )
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen() {
        Screen::Dashboard => render_dashboard(app, frame, body_area),
        Screen::Chat => render_chat(app, frame, body_area),
        Screen::Inbox => render_inbox(app, frame, body_area),
        Screen::Client => render_client(app, frame, body_area),
        Screen::Booking => render_booking(app, frame, body_area),
        Screen::Result => render_result(app, frame, body_area),
        Screen::History => render_history(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Салон · ассистент записи ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("{} ", app.screen().title()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("[{}] v{}", app.session.variant().as_str(), env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    if let Some(message) = &app.status_message {
        let line = Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let mode_span = match app.input_mode() {
        InputMode::Normal => Span::styled(" NORMAL ", Style::default().bg(Color::Blue).fg(Color::White)),
        InputMode::Editing => Span::styled(" EDIT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
    };

    let keys: &[(&str, &str)] = match app.screen() {
        Screen::Dashboard => &[("j/k", "nav"), ("q", "quit")],
        Screen::Chat if app.session.variant().has_screen(Screen::Client) => &[
            ("o", "offer time"),
            ("c", "client"),
            ("y/n", "confirm/decline"),
            ("j/k", "client"),
            ("q", "quit"),
        ],
        Screen::Chat => &[
            ("o", "offer time"),
            ("y/n", "confirm/decline"),
            ("j/k", "client"),
            ("q", "quit"),
        ],
        Screen::Inbox => &[("j/k", "nav"), ("Enter", "offer time"), ("q", "quit")],
        Screen::Client => &[("b", "offer time"), ("h", "history"), ("Esc", "back"), ("q", "quit")],
        Screen::History => &[("Esc", "back"), ("q", "quit")],
        Screen::Booking => &[("Tab", "field"), ("←/→", "cursor"), ("Enter", "send"), ("C-c", "quit")],
        Screen::Result => &[],
    };

    let mut spans = vec![mode_span];
    for (key, label) in keys {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_dashboard(app: &App, frame: &mut Frame, area: Rect) {
    let mut constraints = vec![Constraint::Length(4)];
    for group in &app.action_groups {
        let subtitle = u16::from(group.subtitle.is_some());
        let hint = u16::from(group.shows_inbox_hint());
        let rows: u16 = group
            .actions
            .iter()
            .map(|a| 1 + u16::from(!a.description.is_empty()) + u16::from(a.is_pending()))
            .sum();
        constraints.push(Constraint::Length(rows + subtitle + hint + 2));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::vertical(constraints).split(area);

    render_load_ring(app, frame, chunks[0]);

    let mut offset = 0;
    for (i, group) in app.action_groups.iter().enumerate() {
        render_action_group(app, group, offset, frame, chunks[i + 1]);
        offset += group.actions.len();
    }

    let back = Line::from(vec![
        Span::styled("──── вернуться в calm ", Style::default().fg(Color::DarkGray)),
        Span::styled(icon_glyph("ArrowRight"), Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(back), chunks[app.action_groups.len() + 1]);
}

fn render_load_ring(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Загрузка ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [caption_area, gauge_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    frame.render_widget(
        Paragraph::new("orb + решения по контексту").style(Style::default().fg(Color::Gray)),
        caption_area,
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(app.load_ring.fraction())
        .label(format!("load {}%", app.load_ring.progress()));
    frame.render_widget(gauge, gauge_area);
}

fn render_action_group(app: &App, group: &ActionGroup, offset: usize, frame: &mut Frame, area: Rect) {
    let palette = group.color.palette();
    let accent = tone_color(palette.accent);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} ", group.title));

    let mut lines: Vec<Line> = Vec::new();
    if let Some(subtitle) = &group.subtitle {
        lines.push(Line::styled(subtitle.clone(), Style::default().fg(Color::Gray)));
    }

    for (i, action) in group.actions.iter().enumerate() {
        let selected = offset + i == app.action_cursor;
        let title_style = if selected {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(tone_color(action_status_style(action.status).tone))
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", icon_glyph(&action.icon)),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw(" "),
            Span::styled(action.title.clone(), title_style),
        ];
        if action.is_pending() {
            spans.push(Span::styled(format!(" {}", icon_glyph("Info")), Style::default().fg(Color::LightBlue)));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", AUTO_RULE_BADGE),
            Style::default().fg(tone_color(palette.badge)),
        ));
        lines.push(Line::from(spans));

        if !action.description.is_empty() {
            lines.push(Line::styled(
                format!("     {}", action.description),
                Style::default().fg(Color::Gray),
            ));
        }

        if action.is_pending() {
            let dots: String = (0..5u8)
                .map(|d| if d == app.animation_frame { '●' } else { '·' })
                .collect();
            lines.push(Line::styled(format!("     {}", dots), Style::default().fg(Color::LightBlue)));
        }
    }

    if group.shows_inbox_hint() {
        lines.push(Line::styled(
            "Смахните справа для полного inbox ······",
            Style::default().fg(Color::Gray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chat(app: &App, frame: &mut Frame, area: Rect) {
    let Some(client) = app.selected_client() else {
        frame.render_widget(Paragraph::new("Нет диалогов"), area);
        return;
    };

    let mut title = vec![Span::styled(
        format!(" {} · {} ", client.initials(), client.name),
        Style::default().fg(Color::Cyan).bold(),
    )];
    if client.is_new {
        title.push(Span::styled(" новый ", Style::default().fg(Color::Black).bg(Color::Green)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(title));

    let lines = vec![
        Line::styled("Клиент:", Style::default().fg(Color::Gray)),
        Line::raw(client.last_message.clone()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Статус записи: ", Style::default().fg(Color::Gray)),
            status_badge(app.session.status()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_inbox(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Входящие ");

    let items: Vec<ListItem> = app
        .clients
        .iter()
        .map(|client| {
            let marker = if client.is_new { "● " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(client.name.clone(), Style::default().bold()),
                ]),
                Line::styled(format!("  {}", client.last_message), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.client_state);
}

fn render_client(app: &App, frame: &mut Frame, area: Rect) {
    let Some(client) = app.selected_client() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", client.name));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Клиент: ", Style::default().fg(Color::Gray)),
            Span::raw(if client.is_new { "новый" } else { "постоянный" }),
        ]),
        Line::from(vec![
            Span::styled("Записей: ", Style::default().fg(Color::Gray)),
            Span::raw(client.bookings.len().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Текущее предложение: ", Style::default().fg(Color::Gray)),
            status_badge(app.session.status()),
        ]),
        Line::raw(""),
    ];

    if let Some(latest) = client.latest_booking() {
        lines.push(Line::styled("Последняя запись", Style::default().bold()));
        lines.push(Line::from(vec![
            Span::raw(format!("{} · {} · {} {}  ", latest.service, latest.master, latest.date, latest.time)),
            status_badge(latest.status),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_booking(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Предложить время ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical(
        DraftField::ALL
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(0))),
    )
    .split(inner);

    let draft = app.session.draft();
    for (i, field) in DraftField::ALL.iter().enumerate() {
        let focused = *field == app.draft_field;
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let input = Paragraph::new(draft.get(*field).to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", field.label())),
        );
        frame.render_widget(input, rows[i]);

        if focused {
            frame.set_cursor_position(field_cursor(rows[i], app.draft_cursor));
        }
    }
}

/// Terminal cell for a text cursor `cursor` chars into a bordered input.
fn field_cursor(input: Rect, cursor: usize) -> (u16, u16) {
    let offset = u16::try_from(cursor).unwrap_or(u16::MAX);
    let x = input.x.saturating_add(1).saturating_add(offset);
    (x.min(input.right().saturating_sub(2)), input.y.saturating_add(1))
}

fn render_result(app: &App, frame: &mut Frame, area: Rect) {
    let draft = app.session.draft();
    let mut lines = vec![
        Line::raw(""),
        Line::styled("✓ Предложение отправлено", Style::default().fg(Color::Green).bold()).centered(),
        Line::raw(""),
        Line::raw(format!("{} · {}", draft.service, draft.master)).centered(),
        Line::raw(format!("{} {}", draft.date, draft.time)).centered(),
        Line::raw(""),
        Line::from(vec![status_badge(app.session.status())]).centered(),
        Line::raw(""),
    ];
    if app.has_scheduled_return() {
        lines.push(Line::styled("Возврат в чат…", Style::default().fg(Color::Gray)).centered());
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history(app: &App, frame: &mut Frame, area: Rect) {
    let Some(client) = app.selected_client() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" История · {} ", client.name));

    let entries = history_entries(&client.bookings);
    if entries.is_empty() {
        let empty = Paragraph::new("Записей пока нет").style(Style::default().fg(Color::Gray));
        frame.render_widget(empty.block(block), area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let booking = &entry.booking;
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}, {}  ", entry.display_date, booking.time), Style::default().bold()),
                    status_badge(booking.status),
                ]),
                Line::styled(
                    format!("  {} · {}", booking.service, booking.master),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use salon_core::Variant;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn new_app(variant: Variant) -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(variant, Duration::from_millis(2500), tx)
    }

    #[test]
    fn test_icon_glyph_fallback() {
        assert_eq!(icon_glyph("Zap"), "ϟ");
        assert_eq!(icon_glyph("NoSuchIcon"), "•");
    }

    #[test]
    fn test_field_cursor_is_clamped() {
        let input = Rect::new(2, 5, 30, 3);
        assert_eq!(field_cursor(input, 0), (3, 6));
        assert_eq!(field_cursor(input, 4), (7, 6));
        assert_eq!(field_cursor(input, 500), (30, 6));
        assert_eq!(field_cursor(input, usize::MAX), (30, 6));
    }

    #[test]
    fn test_render_booking_with_oversized_field() {
        let mut app = new_app(Variant::Full);
        app.offer_time();
        let long: String = "ж".repeat(70_000);
        app.session.edit_draft(DraftField::Service, long).unwrap();
        app.focus_field(DraftField::Service);
        assert_eq!(app.draft_cursor, 70_000);
        let text = draw(&mut app);
        assert!(text.contains("Услуга"));
    }

    #[test]
    fn test_group_colours_follow_palette() {
        let mut app = new_app(Variant::Dashboard);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        // the "Действия" card is red; its top-left corner is the first cell of its border
        let red = tone_color(salon_core::GroupColor::Red.palette().accent);
        let row = (0..buffer.area.height)
            .find(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, *y).symbol())
                    .collect::<String>()
                    .contains("Действия")
            })
            .unwrap();
        assert_eq!(buffer.get(0, row).fg, red);
    }

    #[test]
    fn test_render_chat_shows_status() {
        let mut app = new_app(Variant::Full);
        let text = draw(&mut app);
        assert!(text.contains("Анна Смирнова"));
        assert!(text.contains("Ожидает"));
    }

    #[test]
    fn test_render_dashboard() {
        let mut app = new_app(Variant::Dashboard);
        let text = draw(&mut app);
        assert!(text.contains("load 44%"));
        assert!(text.contains("No-show алерты"));
        assert!(text.contains("Авто-правило"));
        assert!(text.contains("вернуться в calm"));
    }

    #[test]
    fn test_render_history_is_newest_first() {
        let mut app = new_app(Variant::Full);
        app.open_client();
        app.open_history();
        let text = draw(&mut app);
        // ordered by creation time, labelled with the appointment date
        let newest = text.find("14 января 2026 г.").unwrap();
        let middle = text.find("31 декабря 2025 г.").unwrap();
        let oldest = text.find("12 декабря 2025 г.").unwrap();
        assert!(newest < middle);
        assert!(middle < oldest);
    }

    #[tokio::test]
    async fn test_render_result_then_chat() {
        let mut app = new_app(Variant::Full);
        app.offer_time();
        for c in "Стрижка".chars() {
            app.insert_char(c);
        }
        app.submit_booking();
        let text = draw(&mut app);
        assert!(text.contains("Предложение отправлено"));
        assert!(text.contains("Стрижка"));
        assert!(text.contains("Возврат в чат"));

        let ticket = app.session.pending_return().unwrap();
        app.on_auto_return(ticket);
        let text = draw(&mut app);
        assert!(text.contains("Предложено"));
    }
}
