use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::app::{App, FormField, Mode};
use crate::filter::FilterMode;
use crate::task::Priority;
use crate::view::{self, TaskCard};

/// Named colors for one display mode.
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
}

pub fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(243, 244, 246),
            dim: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(129, 140, 248),
            border: Color::Rgb(55, 65, 81),
            high: Color::Rgb(248, 113, 113),
            medium: Color::Rgb(251, 191, 36),
            low: Color::Rgb(52, 211, 153),
        }
    } else {
        Palette {
            bg: Color::Rgb(249, 250, 251),
            fg: Color::Rgb(17, 24, 39),
            dim: Color::Rgb(107, 114, 128),
            accent: Color::Rgb(79, 70, 229),
            border: Color::Rgb(209, 213, 219),
            high: Color::Rgb(220, 38, 38),
            medium: Color::Rgb(217, 119, 6),
            low: Color::Rgb(5, 150, 105),
        }
    }
}

/// Full redraw of every panel; nothing is patched incrementally.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette(app.dark_mode);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, &palette, chunks[0]);
    draw_stats(frame, app, &palette, chunks[1]);
    draw_filter_tabs(frame, app, &palette, chunks[2]);
    draw_task_list(frame, app, &palette, chunks[3]);
    draw_help(frame, app, &palette, chunks[4]);

    match app.mode {
        Mode::Adding => draw_form(frame, app, &palette),
        Mode::ConfirmingDelete(id) => draw_confirm(frame, app, &palette, id),
        Mode::Normal => {}
    }

    draw_notifications(frame, app, &palette);
}

fn bordered(palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
}

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(18)])
        .split(area);

    let title = Paragraph::new("🎓 Tugasku — Student Task Tracker")
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .block(bordered(palette));
    frame.render_widget(title, halves[0]);

    let theme = Paragraph::new(app.theme_toggle_label())
        .alignment(Alignment::Center)
        .block(bordered(palette));
    frame.render_widget(theme, halves[1]);
}

fn draw_stats(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let stats = view::stats_view(app.stats());
    let tiles = [
        ("Total", stats.total),
        ("Completed", stats.completed),
        ("Pending", stats.pending),
        ("Completion", stats.rate),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for ((label, value), chunk) in tiles.into_iter().zip(chunks.iter()) {
        let tile = Paragraph::new(value)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(bordered(palette).title(label));
        frame.render_widget(tile, *chunk);
    }
}

fn draw_filter_tabs(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let labels: Vec<&str> = FilterMode::MODES.iter().map(|m| m.label()).collect();
    let selected = FilterMode::MODES
        .iter()
        .position(|m| *m == app.filter)
        .unwrap_or(0);

    let tabs = Tabs::new(labels)
        .select(selected)
        .style(Style::default().fg(palette.dim))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(bordered(palette).title("Filter"));
    frame.render_widget(tabs, area);
}

fn priority_color(palette: &Palette, priority: Priority) -> Color {
    match priority {
        Priority::High => palette.high,
        Priority::Medium => palette.medium,
        Priority::Low => palette.low,
    }
}

fn card_lines(card: &TaskCard, palette: &Palette) -> Vec<Line<'static>> {
    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if card.completed {
        title_style = Style::default()
            .fg(palette.dim)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    let status = if card.completed { "✓ " } else { "○ " };
    let mut lines = vec![Line::from(vec![
        Span::styled(status.to_string(), Style::default().fg(palette.dim)),
        Span::styled(card.title.clone(), title_style),
    ])];

    if let Some(description) = &card.description {
        lines.push(Line::from(Span::styled(
            format!("  {description}"),
            Style::default().fg(palette.dim),
        )));
    }

    let mut meta = vec![
        Span::raw(format!("  {} {}", card.category_icon, card.category_name)),
    ];
    if let Some(subject) = &card.subject {
        meta.push(Span::raw(format!("  ·  📚 {subject}")));
    }
    let deadline_style = if card.overdue && !card.completed {
        Style::default().fg(palette.high)
    } else {
        Style::default().fg(palette.dim)
    };
    meta.push(Span::raw("  ·  ".to_string()));
    meta.push(Span::styled(
        format!("📅 {}", card.deadline_label),
        deadline_style,
    ));
    meta.push(Span::raw("  ·  ".to_string()));
    meta.push(Span::styled(
        format!("[{}]", card.priority_label),
        Style::default().fg(priority_color(palette, card.priority)),
    ));
    lines.push(Line::from(meta));

    lines.push(Line::from(Span::styled(
        format!("  [Space] {}   [d] {}", card.toggle_label, card.delete_label),
        Style::default().fg(palette.dim),
    )));
    lines.push(Line::raw(""));

    lines
}

fn draw_task_list(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let cards = view::build_cards(&app.visible_tasks(), app.today());

    if cards.is_empty() {
        let (headline, body) = view::empty_state(app.filter);
        let text = Text::from(vec![
            Line::raw(""),
            Line::from(Span::styled(
                headline,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(body, Style::default().fg(palette.dim))),
        ]);
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(bordered(palette).title("Tasks"));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| ListItem::new(Text::from(card_lines(card, palette))))
        .collect();

    let list = List::new(items)
        .block(bordered(palette).title(format!("Tasks ({})", cards.len())))
        .highlight_style(Style::default().bg(palette.border));

    let mut state = ListState::default();
    state.select(Some(app.selected.min(cards.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_help(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let text = match app.mode {
        Mode::Normal => {
            "a: Add · Space: Complete/Undo · d: Delete · ↑/↓: Select · 1-4/Tab: Filter · t: Theme · q: Quit"
        }
        Mode::Adding => "Tab/↓: Next field · ←/→: Change value · Enter: Save · Esc: Close",
        Mode::ConfirmingDelete(_) => "y: Delete · n: Cancel",
    };
    let help = Paragraph::new(text)
        .style(Style::default().fg(palette.dim))
        .block(bordered(palette).title("Help"));
    frame.render_widget(help, area);
}

fn centered_rect(area: Rect, width_ratio: u16, height: u16) -> Rect {
    let width = area.width * width_ratio / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}

fn form_line(app: &App, palette: &Palette, field: FormField) -> Line<'static> {
    let focused = app.form.focus == field;
    let value = match field {
        FormField::Title => app.form.title.clone(),
        FormField::Description => app.form.description.clone(),
        FormField::Category => {
            let name = app.form.category.name();
            if focused {
                format!("◀ {name} ▶")
            } else {
                name.to_string()
            }
        }
        FormField::Priority => {
            let label = app.form.priority.label();
            if focused {
                format!("◀ {label} ▶")
            } else {
                label.to_string()
            }
        }
        FormField::Deadline => app.form.deadline.clone(),
        FormField::Subject => app.form.subject.clone(),
    };

    let is_text = !matches!(field, FormField::Category | FormField::Priority);
    let cursor = if focused && is_text { "▌" } else { "" };
    let value_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(
            format!("{:<22} ", field.label()),
            Style::default().fg(palette.dim),
        ),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn draw_form(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(frame.area(), 70, 12);
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = FormField::ORDER
        .iter()
        .map(|field| form_line(app, palette, *field))
        .collect();
    lines.push(Line::raw(""));
    if let Some(error) = app.form.error {
        lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(palette.high),
        )));
    }

    let form = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .wrap(Wrap { trim: false })
        .block(
            bordered(palette)
                .title("New Task")
                .border_style(Style::default().fg(palette.accent)),
        );
    frame.render_widget(form, area);
}

fn draw_confirm(frame: &mut Frame, app: &App, palette: &Palette, id: i64) {
    let area = centered_rect(frame.area(), 50, 6);
    frame.render_widget(Clear, area);

    let title = app
        .store
        .find_by_id(id)
        .map(|t| t.title.clone())
        .unwrap_or_default();
    let text = Text::from(vec![
        Line::from(format!("Delete \"{title}\"?")),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(palette.dim),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[y] Delete", Style::default().fg(palette.high)),
            Span::raw("   "),
            Span::styled("[n] Cancel", Style::default().fg(palette.dim)),
        ]),
    ]);

    let confirm = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .block(
            bordered(palette)
                .title("Confirm")
                .border_style(Style::default().fg(palette.high)),
        );
    frame.render_widget(confirm, area);
}

fn draw_notifications(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = frame.area();
    for (i, notification) in app.notifications.iter().enumerate() {
        let width = (notification.message.chars().count() as u16 + 4).min(area.width);
        let y = 1 + i as u16 * 3;
        if y + 3 > area.height {
            break;
        }
        let rect = Rect {
            x: area.width.saturating_sub(width + 2),
            y,
            width,
            height: 3,
        };

        let style = if notification.fading() {
            Style::default().fg(palette.dim)
        } else {
            Style::default().fg(palette.bg).bg(palette.accent)
        };

        frame.render_widget(Clear, rect);
        let toast = Paragraph::new(notification.message.clone())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(toast, rect);
    }
}
