/// Per-metric detail screen
///
/// The drill-down "route": one metric selected by key, a five-point
/// time-series chart, the current usage and a system info panel. Values
/// come from the fixed sample snapshot; see DetailSnapshot.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::core::stats::{history_series, DetailSnapshot, Metric, HISTORY_LABELS};
use crate::utils::helpers::format_percent;

pub fn render(frame: &mut Frame, metric: Metric) {
    let snapshot = DetailSnapshot::sample();
    let current = snapshot.value(metric);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Title
            Constraint::Min(10),    // Chart
            Constraint::Length(7),  // Status | system info
            Constraint::Length(3),  // Footer
        ])
        .split(frame.size());

    render_header(frame, chunks[0], metric, current);
    render_chart(frame, chunks[1], metric, current);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_status(frame, columns[0], current);
    render_system_info(frame, columns[1], &snapshot);

    let footer = Paragraph::new(Line::from(Span::styled(
        "[Esc] Back | [q]uit",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, metric: Metric, current: f64) {
    let title_line = Line::from(vec![
        Span::styled(
            format!("{} {}", metric.glyph(), metric.title()),
            Style::default().fg(metric.color()).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_percent(current),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let subtitle = Line::from(Span::styled(
        "Detailed Statistics - Real-time monitoring data",
        Style::default().fg(Color::Gray),
    ));

    let header = Paragraph::new(vec![title_line, subtitle])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_chart(frame: &mut Frame, area: Rect, metric: Metric, current: f64) {
    let points = history_series(current);

    let datasets = vec![Dataset::default()
        .name(metric.title())
        .data(&points)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(metric.color()))];

    let x_labels: Vec<Span> = HISTORY_LABELS.iter().map(|l| Span::raw(*l)).collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(metric.title())
                .title_alignment(Alignment::Right),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(x_labels)
                .bounds([0.0, 4.0]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")])
                .bounds([0.0, 100.0]),
        );

    frame.render_widget(chart, area);
}

fn render_status(frame: &mut Frame, area: Rect, current: f64) {
    let block = Block::default().borders(Borders::ALL).title("Current Status");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2).max(10) as usize;
    let clamped = current.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled.min(width)),
        "░".repeat(width - filled.min(width))
    );

    let lines = vec![
        Line::from(vec![
            Span::styled("Usage  ", Style::default().fg(Color::Gray)),
            Span::styled(format_percent(current), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(bar, Style::default().fg(Color::Blue))),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_system_info(frame: &mut Frame, area: Rect, snapshot: &DetailSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("System Information");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Platform      ", Style::default().fg(Color::Gray)),
            Span::raw(snapshot.platform),
        ]),
        Line::from(vec![
            Span::styled("Version       ", Style::default().fg(Color::Gray)),
            Span::raw(snapshot.version),
        ]),
        Line::from(vec![
            Span::styled("Architecture  ", Style::default().fg(Color::Gray)),
            Span::raw(snapshot.architecture),
        ]),
        Line::from(vec![
            Span::styled("CPU           ", Style::default().fg(Color::Gray)),
            Span::raw(format!(
                "{} ({} cores @ {})",
                snapshot.cpu_model, snapshot.cpu_cores, snapshot.cpu_speed
            )),
        ]),
        Line::from(vec![
            Span::styled("Memory        ", Style::default().fg(Color::Gray)),
            Span::raw(format!(
                "{} total, {} used, {} free",
                snapshot.memory_total, snapshot.memory_used, snapshot.memory_free
            )),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
