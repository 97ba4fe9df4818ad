use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::line::NORMAL as LINE;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType,
    Paragraph,
};
use ratatui::{Frame, Terminal};
use tui_widgets::popup::Popup;

use crate::config::{RgbColor, TopBarButton};
use crate::dataset::DatasetKind;
use crate::store::CellRef;

use super::app::{editable_columns, App, HitRegion};
use super::panes::Card;

const NAVIGATION_HELP: &str = "j/k: row  h/l: column  Tab: card  e/Enter: edit  ?: help  q: quit";
const EDITOR_HELP: &str = "Type to change value  Enter/Esc/Tab: done";
const CONFIRM_HELP: &str = "Y/Enter: confirm  N/Esc: cancel";
const HELP_MODAL_FOOTER: &str = "j/k: scroll  Esc/q: close";
const VALUE_COLUMN_WIDTH: usize = 10;
const MAX_NAME_WIDTH: usize = 20;
/// Largest bar value BarChart can scale by `height * 8` without overflowing.
const MAX_BAR_VALUE: u64 = u64::MAX / (8 * u16::MAX as u64);
const MAX_CHART_VALUE: f64 = 1e9;

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw_frame(frame, app))?;
    Ok(())
}

fn draw_frame(frame: &mut Frame<'_>, app: &mut App) {
    app.hit_regions.clear();
    app.card_regions.clear();

    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(frame, layout[0], app);
    draw_summary(frame, layout[1], app);
    draw_cards(frame, layout[2], app);
    draw_footer(frame, layout[3], app);
    draw_confirm_modal(frame, size, app);
    draw_help_modal(frame, size, app);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let buttons = app.top_bar_buttons();
    let total_buttons_width = calculate_buttons_width(buttons);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(total_buttons_width)])
        .split(area);

    let header_style = header_text_style(app);
    let line = Line::from(vec![
        Span::styled("ISSUE SUMMARY DASHBOARD", header_style.add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(format!("REV {}", app.store.revision()), header_style),
    ]);
    frame.render_widget(Paragraph::new(line), chunks[0]);

    draw_top_bar_buttons(frame, chunks[1], app);
}

fn calculate_buttons_width(buttons: &[TopBarButton]) -> u16 {
    if buttons.is_empty() {
        return 0;
    }

    let max_title_len = buttons
        .iter()
        .map(|b| b.action.title().len())
        .max()
        .unwrap_or(0);

    // " F1: TITLE " with keys padded to 3 chars (F10-F12)
    let button_width = (1 + 3 + 2 + max_title_len + 1) as u16;
    let num_buttons = buttons.len() as u16;
    button_width * num_buttons + num_buttons.saturating_sub(1)
}

fn draw_top_bar_buttons(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let buttons = app.top_bar_buttons();
    if buttons.is_empty() || area.width == 0 {
        return;
    }

    let max_title_len = buttons
        .iter()
        .map(|b| b.action.title().len())
        .max()
        .unwrap_or(0);
    let button_content_width = (1 + 3 + 2 + max_title_len + 1) as u16;

    let colors = app.ui_colors();
    let button_style = Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
        .add_modifier(Modifier::BOLD);

    let mut x = area.x;
    for button in buttons {
        if x + button_content_width > area.x + area.width {
            break;
        }

        let text = format!(
            " {}: {:^width$} ",
            button.key,
            button.action.title(),
            width = max_title_len
        );
        let button_area = Rect::new(x, area.y, button_content_width, 1);
        frame.render_widget(
            Paragraph::new(text).style(button_style).alignment(Alignment::Center),
            button_area,
        );

        // one blank cell between buttons
        x += button_content_width + 1;
    }
}

fn draw_summary(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let summary = app.summary();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let cards = [
        ("TOTAL ISSUES (MTD)", summary.total_issues_display(), "issues"),
        ("RESOLUTION RATE", summary.resolution_rate.to_string(), "resolved"),
        ("AVG RESPONSE TIME (MTD)", summary.average_response_display(), "hours"),
    ];

    for ((title, value, unit), area) in cards.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(app, false))
            .title(Span::styled(format!(" {} ", title), header_text_style(app)));
        let lines = vec![
            Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(unit, header_text_style(app))),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            *area,
        );
    }
}

fn draw_cards(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut areas = Vec::with_capacity(Card::COUNT);
    for row in rows.iter() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        areas.extend(columns.iter().copied());
    }

    for (card, area) in Card::ALL.into_iter().zip(areas) {
        draw_card(frame, area, app, card);
    }
}

fn draw_card(frame: &mut Frame<'_>, area: Rect, app: &mut App, card: Card) {
    app.card_regions.push((area, card));

    let active = app.focused == card;
    let title_style = if active {
        selection_style(app)
    } else {
        header_text_style(app)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app, active))
        .title(Span::styled(
            format!(" {}: {} ", card.digit(), card.title()),
            title_style,
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let dataset = card.dataset();
    let table_height = (app.store.len(dataset) as u16 + 1).min(inner.height);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(table_height)])
        .split(inner);

    if layout[0].height > 0 {
        match card {
            Card::Channel => draw_channel_chart(frame, layout[0], app),
            Card::Category => draw_category_gauges(frame, layout[0], app),
            Card::Bugs => draw_bug_share(frame, layout[0], app),
            Card::Time => draw_time_chart(frame, layout[0], app),
        }
    }

    draw_value_table(frame, layout[1], app, dataset);
}

fn draw_channel_chart(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let weekly_style = Style::default().fg(Color::Rgb(0x88, 0x84, 0xd8));
    let mtd_style = Style::default().fg(Color::Rgb(0x82, 0xca, 0x9d));

    let mut chart = BarChart::default()
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));

    let records = app.store.channel();
    let scale = bar_scale(
        records
            .iter()
            .flat_map(|record| [record.weekly, record.mtd])
            .fold(0.0_f64, f64::max),
    );

    for record in records {
        let bars = [
            Bar::default()
                .value(bar_value(record.weekly, scale))
                .text_value(format_number(record.weekly))
                .style(weekly_style),
            Bar::default()
                .value(bar_value(record.mtd, scale))
                .text_value(format_number(record.mtd))
                .style(mtd_style),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(record.name.clone()))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, area);
}

fn draw_category_gauges(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let records = app.store.category();
    let max = records
        .iter()
        .map(|record| record.value)
        .fold(0.0_f64, f64::max);

    let rows = records.len().min(area.height as usize);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); rows])
        .split(area);

    for (record, row) in records.iter().zip(layout.iter()) {
        let ratio = if max > 0.0 {
            (record.value / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(fill_color(&record.fill)))
            .ratio(ratio)
            .label(Span::raw(format!("{} {}", record.name, format_number(record.value))));
        frame.render_widget(gauge, *row);
    }
}

fn draw_bug_share(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let records = app.store.bugs();
    let total: f64 = records.iter().map(|record| record.value.max(0.0)).sum();
    if total <= 0.0 {
        frame.render_widget(Paragraph::new("No bugs reported"), area);
        return;
    }

    let width = area.width as usize;
    let mut strip: Vec<Span> = Vec::new();
    let mut used = 0usize;
    for (idx, record) in records.iter().enumerate() {
        let share = record.value.max(0.0) / total;
        let cells = if idx + 1 == records.len() {
            width.saturating_sub(used)
        } else {
            ((share * width as f64).round() as usize).min(width.saturating_sub(used))
        };
        used += cells;
        strip.push(Span::styled(
            "█".repeat(cells),
            Style::default().fg(fill_color(&record.fill)),
        ));
    }

    let mut lines = vec![Line::from(strip), Line::from("")];
    for record in records {
        let share = record.value.max(0.0) / total * 100.0;
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(fill_color(&record.fill))),
            Span::raw(format!("{:<12}", record.name)),
            Span::styled(format!("{:>5.1}%", share), header_text_style(app)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_time_chart(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let records = app.store.time();
    let unit = chart_unit(
        records
            .iter()
            .flat_map(|record| [record.response, record.resolution])
            .fold(0.0_f64, f64::max),
    );
    let response: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| (idx as f64, record.response / unit))
        .collect();
    let resolution: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| (idx as f64, record.resolution / unit))
        .collect();

    // plotted in units of `unit`; labels show real values
    let y_max = y_axis_max(
        response
            .iter()
            .chain(&resolution)
            .map(|(_, y)| *y)
            .fold(0.0_f64, f64::max),
    );
    let x_max = (records.len().saturating_sub(1) as f64).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Response")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Rgb(0x88, 0x84, 0xd8)))
            .data(&response),
        Dataset::default()
            .name("Resolution")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Rgb(0x82, 0xca, 0x9d)))
            .data(&resolution),
    ];

    let x_labels: Vec<Span> = records
        .iter()
        .map(|record| Span::from(record.name.clone()))
        .collect();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::from("0"),
                    Span::from(axis_label(y_max / 2.0 * unit)),
                    Span::from(axis_label(y_max * unit)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Name column plus one column per numeric field. Editable cells are
/// registered as hit regions and show the inline editor when active.
fn draw_value_table(frame: &mut Frame<'_>, area: Rect, app: &mut App, dataset: DatasetKind) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let columns = dataset.columns();
    let editable = editable_columns(dataset);
    let names: Vec<String> = (0..app.store.len(dataset))
        .filter_map(|index| app.store.record_name(dataset, index).map(str::to_string))
        .collect();
    let name_width = names
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(4, MAX_NAME_WIDTH);

    let header_style = header_text_style(app);
    let mut header = vec![Span::styled(format!("{:<name_width$} ", "NAME"), header_style)];
    for field in columns {
        header.push(Span::styled(
            format!("{:>VALUE_COLUMN_WIDTH$} ", field.label()),
            header_style,
        ));
    }

    let mut lines = vec![Line::from(header)];
    let mut regions = Vec::new();
    let mut cursor = None;
    let active = app.focused == Card::from_dataset(dataset);

    for (index, name) in names.iter().enumerate() {
        let y_offset = index as u16 + 1;
        let mut spans = vec![Span::raw(format!(
            "{:<name_width$} ",
            truncate_value(name, name_width)
        ))];
        let mut x_offset = name_width + 1;

        for field in columns {
            let cell = CellRef::new(dataset, index, *field);
            let editing = app.editor.is_editing() && app.editor.target() == Some(cell);
            let selected = active
                && app.row == index
                && editable.get(app.column) == Some(field);

            let scroll = if editing {
                app.editor.visual_scroll(VALUE_COLUMN_WIDTH)
            } else {
                0
            };
            let text = if editing {
                app.editor
                    .value()
                    .chars()
                    .skip(scroll)
                    .take(VALUE_COLUMN_WIDTH)
                    .collect()
            } else {
                truncate_value(
                    &app.store.number(cell).map(format_number).unwrap_or_default(),
                    VALUE_COLUMN_WIDTH,
                )
            };
            let style = if editing || selected {
                selection_style(app)
            } else if dataset.is_editable(*field) {
                Style::default().add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("{:>VALUE_COLUMN_WIDTH$}", text), style));
            spans.push(Span::raw(" "));

            if y_offset < area.height && x_offset < area.width as usize {
                let x = area.x + x_offset as u16;
                let width = (VALUE_COLUMN_WIDTH as u16).min(area.x + area.width - x);
                let cell_area = Rect::new(x, area.y + y_offset, width, 1);
                if dataset.is_editable(*field) {
                    regions.push(HitRegion {
                        area: cell_area,
                        cell,
                    });
                }
                if editing {
                    // value is right-aligned within the column
                    let text_width = text.chars().count().min(VALUE_COLUMN_WIDTH);
                    let start = VALUE_COLUMN_WIDTH - text_width;
                    let offset = app.editor.visual_cursor().saturating_sub(scroll);
                    let column = (start + offset).min(VALUE_COLUMN_WIDTH);
                    cursor = Some((x + column as u16, area.y + y_offset));
                }
            }
            x_offset += VALUE_COLUMN_WIDTH + 1;
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
    app.hit_regions.extend(regions);

    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let message: String = if app.confirm_modal.is_some() {
        CONFIRM_HELP.to_string()
    } else if app.help_modal.is_some() {
        HELP_MODAL_FOOTER.to_string()
    } else if app.editor.is_editing() {
        match &app.status {
            Some(status) => format!("{}  |  {}", status, EDITOR_HELP),
            None => EDITOR_HELP.to_string(),
        }
    } else {
        app.status
            .clone()
            .unwrap_or_else(|| NAVIGATION_HELP.to_string())
    };
    let colors = app.ui_colors();
    let style = Style::default()
        .fg(color(colors.status_fg))
        .bg(color(colors.status_bg));

    let background = Block::default().style(Style::default().bg(color(colors.status_bg)));
    frame.render_widget(background, area);
    frame.render_widget(Paragraph::new(message).style(style), area);
}

fn draw_confirm_modal(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let Some(modal) = app.confirm_modal.as_ref() else {
        return;
    };

    let body_text = ratatui::text::Text::from(vec![
        Line::from(modal.message.clone()),
        Line::from(""),
        Line::from(CONFIRM_HELP),
    ]);

    let title_line = Line::from(Span::styled(modal.title.clone(), header_text_style(app)));
    let popup = Popup::new(body_text)
        .title(title_line)
        .border_style(border_style(app, true));

    frame.render_stateful_widget_ref(popup, area, &mut app.modal_popup);
}

fn draw_help_modal(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    if app.help_modal.is_none() {
        return;
    }

    // 2/3 width, 80% height, centered
    let width = area.width.saturating_mul(2).saturating_div(3).max(40).min(area.width);
    let height = area.height.saturating_mul(4).saturating_div(5).max(10).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal_area);

    let header_style = header_text_style(app);
    let border_s = border_style(app, true);

    let sections = app.help_entries();
    let mut lines: Vec<Line> = Vec::new();
    let content_width = width.saturating_sub(4) as usize;
    let action_width = 20usize;

    for (section_idx, section) in sections.iter().enumerate() {
        let header_text = format!(" {} ", section.title);
        let padding_total = content_width.saturating_sub(header_text.len());
        let left_pad = padding_total / 2;
        let right_pad = padding_total - left_pad;
        lines.push(Line::from(Span::styled(
            format!(
                "{}{}{}",
                LINE.horizontal.repeat(left_pad),
                header_text,
                LINE.horizontal.repeat(right_pad)
            ),
            header_style,
        )));

        for entry in &section.entries {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<width$}", entry.action, width = action_width)),
                Span::styled(entry.keys.clone(), header_style),
            ]));
        }

        if section_idx < sections.len() - 1 {
            lines.push(Line::from(""));
        }
    }

    let total_lines = lines.len();
    // borders (2) + footer line (1)
    let inner_height = height.saturating_sub(3) as usize;

    let Some(modal) = app.help_modal.as_mut() else {
        return;
    };
    modal.total_lines = total_lines;
    modal.viewport_height = inner_height;
    modal.scroll = modal.scroll.min(total_lines.saturating_sub(inner_height));

    let scroll_indicator = match (modal.can_scroll_up(), modal.can_scroll_down()) {
        (true, true) => "▲▼",
        (true, false) => "▲ ",
        (false, true) => " ▼",
        (false, false) => "  ",
    };
    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(modal.scroll)
        .take(inner_height)
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_s)
        .title(Line::from(vec![
            Span::styled(" HELP ", header_style),
            Span::styled(scroll_indicator, header_style),
        ]))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", HELP_MODAL_FOOTER),
            header_style,
        )))
        .title_alignment(Alignment::Center);

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);
    frame.render_widget(Paragraph::new(visible_lines), inner);
}

/// Display form of a numeric field: integers without a fraction.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Factor that keeps the tallest bar within [`MAX_BAR_VALUE`].
fn bar_scale(max: f64) -> f64 {
    if max.is_finite() && max > MAX_BAR_VALUE as f64 {
        MAX_BAR_VALUE as f64 / max
    } else {
        1.0
    }
}

fn bar_value(value: f64, scale: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        ((value * scale).round() as u64).min(MAX_BAR_VALUE)
    } else {
        0
    }
}

/// Divisor that brings the largest plotted value down to [`MAX_CHART_VALUE`].
/// Canvas grid math overflows for values near `f64::MAX`.
fn chart_unit(max: f64) -> f64 {
    if max.is_finite() && max > MAX_CHART_VALUE {
        max / MAX_CHART_VALUE
    } else {
        1.0
    }
}

/// Upper y bound with 20% headroom, at least 1.
fn y_axis_max(max: f64) -> f64 {
    let max = if max.is_finite() { max.max(1.0) } else { 1.0 };
    max * 1.2
}

fn axis_label(value: f64) -> String {
    let value = value.clamp(f64::MIN, f64::MAX);
    if value.abs() >= 1e6 {
        format!("{:.1e}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn truncate_value(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        value.to_string()
    } else {
        let mut truncated: String = value.chars().take(max_len.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

fn fill_color(fill: &str) -> Color {
    RgbColor::from_hex(fill).map(color).unwrap_or(Color::Gray)
}

fn selection_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
}

fn border_style(app: &App, active: bool) -> Style {
    let colors = app.ui_colors();
    let style = Style::default().fg(color(colors.border));
    if active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn header_text_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default().fg(color(colors.separator))
}

fn color(rgb: RgbColor) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dataset::FieldKey;
    use crate::dataset::FieldValue;
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn render_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        render(&mut terminal, app).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
        let buffer = render_to_buffer(app, width, height);
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn text_in(buffer: &Buffer, area: Rect) -> String {
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
        }
        text
    }

    #[test]
    fn renders_summary_cards_and_titles() {
        let config = Config::default();
        let mut app = App::new(&config);
        let screen = render_to_string(&mut app, 160, 50);

        assert!(screen.contains("ISSUE SUMMARY DASHBOARD"));
        assert!(screen.contains("TOTAL ISSUES (MTD)"));
        assert!(screen.contains("100%"));
        assert!(screen.contains("2.10"));
        for kind in DatasetKind::ALL {
            assert!(screen.contains(kind.title()), "{}", kind.title());
        }
    }

    #[test]
    fn every_editable_value_gets_a_hit_region() {
        let config = Config::default();
        let mut app = App::new(&config);
        render_to_string(&mut app, 160, 50);

        let expected: usize = DatasetKind::ALL
            .iter()
            .map(|kind| app.store.len(*kind) * editable_columns(*kind).len())
            .sum();
        assert_eq!(app.hit_regions.len(), expected);
        assert!(app
            .hit_regions
            .iter()
            .all(|region| region.cell.dataset.is_editable(region.cell.field)));
        assert_eq!(app.card_regions.len(), Card::COUNT);
    }

    #[test]
    fn clicking_a_rendered_value_edits_it() {
        let config = Config::default();
        let mut app = App::new(&config);
        render_to_string(&mut app, 160, 50);

        let target = CellRef::new(DatasetKind::Category, 0, FieldKey::Value);
        let region = app
            .hit_regions
            .iter()
            .find(|region| region.cell == target)
            .copied()
            .unwrap();

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: region.area.x + 1,
            row: region.area.y,
            modifiers: KeyModifiers::NONE,
        }));
        assert!(app.editor.is_editing());
        assert_eq!(app.editor.target(), Some(target));

        let screen = render_to_string(&mut app, 160, 50);
        assert!(screen.contains("Editing CATEGORY / Client Data Issue / VALUE"));
    }

    #[test]
    fn edited_total_shows_in_summary() {
        let config = Config::default();
        let mut app = App::new(&config);
        app.store
            .update_by_name("channel", 1, "mtd", &crate::dataset::FieldValue::Number(5.0))
            .unwrap();
        let screen = render_to_string(&mut app, 160, 50);
        assert!(screen.contains("15"));
        assert!(screen.contains("REV 1"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let config = Config::default();
        let mut app = App::new(&config);
        render_to_string(&mut app, 20, 6);
        app.show_help();
        render_to_string(&mut app, 20, 6);
    }

    #[test]
    fn huge_channel_values_render() {
        let config = Config::default();
        let mut app = App::new(&config);
        app.store
            .update_by_name("channel", 0, "mtd", &FieldValue::Number(1e19))
            .unwrap();
        app.store
            .update_by_name("channel", 1, "weekly", &FieldValue::Number(f64::MAX))
            .unwrap();
        let screen = render_to_string(&mut app, 160, 50);
        assert!(screen.contains("ISSUES BY CHANNEL"));
    }

    #[test]
    fn huge_response_times_render() {
        let config = Config::default();
        let mut app = App::new(&config);
        app.store
            .update_by_name("time", 0, "response", &FieldValue::Number(1e308))
            .unwrap();
        app.store
            .update_by_name("time", 1, "resolution", &FieldValue::Number(f64::MAX))
            .unwrap();
        let screen = render_to_string(&mut app, 160, 50);
        assert!(screen.contains("RESPONSE / RESOLUTION TIME"));
    }

    #[test]
    fn long_editor_input_stays_in_its_column() {
        let config = Config::default();
        let mut app = App::new(&config);
        render_to_buffer(&mut app, 160, 50);
        let mtd = app
            .hit_regions
            .iter()
            .find(|region| region.cell == CellRef::new(DatasetKind::Channel, 0, FieldKey::Mtd))
            .copied()
            .unwrap();

        app.begin_edit_at(CellRef::new(DatasetKind::Channel, 0, FieldKey::Weekly));
        for _ in 0..15 {
            app.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('9'),
                KeyModifiers::NONE,
            )));
        }
        assert!(app.editor.value().chars().count() > VALUE_COLUMN_WIDTH);

        let buffer = render_to_buffer(&mut app, 160, 50);
        assert!(app.hit_regions.contains(&mtd));
        assert_eq!(text_in(&buffer, mtd.area).trim(), "10");
    }

    #[test]
    fn bar_values_are_scaled_into_range() {
        assert_eq!(bar_value(-3.0, 1.0), 0);
        assert_eq!(bar_value(2.6, 1.0), 3);

        let scale = bar_scale(1e19);
        assert!(scale < 1.0);
        assert_eq!(bar_value(1e19, scale), MAX_BAR_VALUE);
        assert!(bar_value(5e18, scale) <= MAX_BAR_VALUE / 2 + 1);
        assert_eq!(bar_scale(10.0), 1.0);
    }

    #[test]
    fn time_axis_stays_finite() {
        let unit = chart_unit(f64::MAX);
        let top = y_axis_max(f64::MAX / unit);
        assert!(top.is_finite());
        assert!(!axis_label(top * unit).contains("inf"));
        assert_eq!(chart_unit(5.2), 1.0);
        assert_eq!(y_axis_max(0.0), 1.2);
        assert_eq!(axis_label(2.5), "2.5");
        assert!(axis_label(1e308).contains('e'));
    }

    #[test]
    fn format_number_drops_trailing_zero() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(2.1), "2.1");
    }

    #[test]
    fn names_longer_than_column_are_truncated() {
        assert_eq!(truncate_value("Access Request", 20), "Access Request");
        assert_eq!(truncate_value("abcdef", 4), "abc…");
    }
}
