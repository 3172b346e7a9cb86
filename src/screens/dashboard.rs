/// Main dashboard screen
///
/// Pure function of (page state, aggregate stats, footer info) to a widget
/// tree. While the page is loading the panels render fixed-shape skeleton
/// bars with the same layout constraints as the data state, so nothing
/// shifts when the batch lands.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::core::fetch::{Page, PageState};
use crate::core::stats::{partition_containers, Metric, ServerInfo, SystemStats};
use crate::utils::helpers::{format_gb, format_percent, format_uptime};

pub fn render(
    frame: &mut Frame,
    page: &Page,
    stats: &SystemStats,
    server_info: &ServerInfo,
    backend_url: &str,
    selected_card: usize,
    last_updated: Option<DateTime<Local>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title + backend line
            Constraint::Length(5), // Stat cards
            Constraint::Length(6), // System information
            Constraint::Min(8),    // File system | containers
            Constraint::Length(4), // Footer
        ])
        .split(frame.size());

    render_header(frame, chunks[0], page, backend_url, last_updated);
    render_cards(frame, chunks[1], page, stats, selected_card);
    render_system_info(frame, chunks[2], page, stats);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    render_file_system(frame, columns[0], page, stats);
    render_containers(frame, columns[1], page, stats);

    render_footer(frame, chunks[4], page, server_info);
}

fn state_line(page: &Page) -> Line<'static> {
    let (text, color) = match page.state() {
        PageState::Idle => ("Starting...", Color::Gray),
        PageState::Probing => ("Probing host...", Color::Yellow),
        PageState::Unreachable => ("Host unreachable", Color::Red),
        PageState::Reachable => ("Host reachable", Color::Green),
        PageState::Fetching => ("Fetching system information...", Color::Yellow),
        PageState::FetchFailed => ("Fetch failed - showing last known values", Color::Red),
        PageState::FetchSucceeded => ("System is operational", Color::Green),
    };

    Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    page: &Page,
    backend_url: &str,
    last_updated: Option<DateTime<Local>>,
) {
    let title_line = Line::from(vec![
        Span::styled(
            "Server Monitor",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Backend: ", Style::default().fg(Color::Gray)),
        Span::styled(backend_url.to_string(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(
            match last_updated {
                Some(ts) => format!("Updated: {}", ts.format("%H:%M:%S")),
                None => "Updated: never".to_string(),
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(vec![title_line, state_line(page)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Fixed-shape placeholder shown in place of a value while loading.
fn skeleton_line() -> Line<'static> {
    Line::from(Span::styled(
        "▒▒▒▒▒▒▒▒▒▒▒▒",
        Style::default().fg(Color::DarkGray),
    ))
}

fn usage_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    page: &Page,
    stats: &SystemStats,
    selected_card: usize,
) {
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for (index, metric) in Metric::all().iter().enumerate() {
        let selected = index == selected_card;
        let border_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} {} ", metric.glyph(), metric.title()),
                Style::default().fg(metric.color()).add_modifier(Modifier::BOLD),
            ));

        let lines = if page.is_loading() {
            vec![skeleton_line(), skeleton_line()]
        } else {
            card_lines(*metric, stats)
        };

        let card = Paragraph::new(lines).block(block);
        frame.render_widget(card, slots[index]);
    }
}

fn card_lines(metric: Metric, stats: &SystemStats) -> Vec<Line<'static>> {
    match metric {
        Metric::Cpu => vec![
            Line::from(Span::styled(
                format_percent(stats.cpu),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                usage_bar(stats.cpu, 16),
                Style::default().fg(metric.color()),
            )),
        ],
        Metric::Memory => vec![
            Line::from(Span::styled(
                format!("{} / {}", stats.memory_info.used, stats.memory_info.total),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("free {}", stats.memory_info.free),
                Style::default().fg(Color::Gray),
            )),
        ],
        Metric::Storage => {
            let percent = stats.storage_info[0].used_percent;
            vec![
                Line::from(Span::styled(
                    format!("{} Used", format_percent(percent)),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    usage_bar(percent, 16),
                    Style::default().fg(metric.color()),
                )),
            ]
        }
        Metric::Containers => {
            let (running, stopped) = partition_containers(&stats.containers_info);
            vec![
                Line::from(Span::styled(
                    format!("{} running", running.len()),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} stopped", stopped.len()),
                    Style::default().fg(Color::Red),
                )),
            ]
        }
    }
}

fn render_system_info(frame: &mut Frame, area: Rect, page: &Page, stats: &SystemStats) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("System Information");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(inner);

    let loading = page.is_loading();

    let sections: [(&str, Vec<Line>); 4] = [
        (
            "Operating System",
            if loading {
                vec![skeleton_line(), skeleton_line()]
            } else {
                vec![
                    Line::from(stats.os_info.distro.clone()),
                    Line::from(Span::styled(
                        format!("Architecture: {}", stats.os_info.architecture),
                        Style::default().fg(Color::Gray),
                    )),
                ]
            },
        ),
        (
            "CPU Information",
            if loading {
                vec![skeleton_line(), skeleton_line()]
            } else {
                vec![
                    Line::from(stats.cpu_info.brand.clone()),
                    Line::from(Span::styled(
                        format!("{} Cores @ {} GHz", stats.cpu_info.cores, stats.cpu_info.speed),
                        Style::default().fg(Color::Gray),
                    )),
                ]
            },
        ),
        (
            "Memory Information",
            if loading {
                vec![skeleton_line(), skeleton_line()]
            } else {
                vec![
                    Line::from(format!("Total: {}", stats.memory_info.total)),
                    Line::from(Span::styled(
                        format!(
                            "Used: {} | Free: {}",
                            stats.memory_info.used, stats.memory_info.free
                        ),
                        Style::default().fg(Color::Gray),
                    )),
                ]
            },
        ),
        (
            "Server Status",
            if loading {
                vec![skeleton_line(), skeleton_line()]
            } else {
                vec![
                    state_line(page),
                    Line::from(Span::styled(
                        "[p] Ping Server",
                        Style::default().fg(Color::Cyan),
                    )),
                ]
            },
        ),
    ];

    for (index, (title, lines)) in sections.into_iter().enumerate() {
        let mut content = vec![Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        content.extend(lines);

        let section = Paragraph::new(content);
        frame.render_widget(section, boxes[index]);
    }
}

fn render_file_system(frame: &mut Frame, area: Rect, page: &Page, stats: &SystemStats) {
    let block = Block::default().borders(Borders::ALL).title("File System");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Storage Overview",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if page.is_loading() {
        lines.push(skeleton_line());
        lines.push(skeleton_line());
    } else {
        // the overview reads the first mount; the placeholder constructor
        // guarantees it exists
        let first = &stats.storage_info[0];
        lines.push(Line::from(vec![
            Span::styled("Total Storage: ", Style::default().fg(Color::Gray)),
            Span::raw(format_gb(first.size)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Free Space: ", Style::default().fg(Color::Gray)),
            Span::raw(format_gb(first.size.saturating_sub(first.used))),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Mount Points",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if page.is_loading() {
        lines.push(skeleton_line());
    } else {
        for disk in &stats.storage_info {
            lines.push(Line::from(vec![
                Span::styled(disk.fs.clone(), Style::default().fg(Color::Magenta)),
                Span::styled(format!(" ({})", disk.kind), Style::default().fg(Color::Gray)),
                Span::raw("  "),
                Span::styled(
                    format!("{} Used", format_percent(disk.used_percent)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} / {}", format_gb(disk.used), format_gb(disk.size)),
                    Style::default().fg(Color::Gray),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                usage_bar(disk.used_percent, 32),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_containers(frame: &mut Frame, area: Rect, page: &Page, stats: &SystemStats) {
    let (running, stopped) = partition_containers(&stats.containers_info);

    let title = if page.is_loading() {
        "Docker Containers".to_string()
    } else {
        format!(
            "Docker Containers - {} Running / {} Stopped",
            running.len(),
            stopped.len()
        )
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
        "Running Containers",
        Style::default().add_modifier(Modifier::BOLD),
    )))];

    if page.is_loading() {
        items.push(ListItem::new(skeleton_line()));
    } else if running.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No running containers available",
            Style::default().fg(Color::Gray),
        ))));
    } else {
        for container in &running {
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    container.name.clone(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", container.tag),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  Uptime: {}", format_uptime(container.uptime)),
                    Style::default().fg(Color::Gray),
                ),
            ])));
        }
    }

    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
        "Stopped Containers",
        Style::default().add_modifier(Modifier::BOLD),
    ))));

    if page.is_loading() {
        items.push(ListItem::new(skeleton_line()));
    } else if stopped.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No stopped containers available",
            Style::default().fg(Color::Gray),
        ))));
    } else {
        for container in &stopped {
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    container.name.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", container.tag),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled("  Stopped", Style::default().fg(Color::Gray)),
            ])));
        }
    }

    frame.render_widget(List::new(items), inner);
}

fn render_footer(frame: &mut Frame, area: Rect, page: &Page, server_info: &ServerInfo) {
    let info_line = Line::from(vec![
        Span::styled("Location: ", Style::default().fg(Color::Gray)),
        Span::raw(server_info.location.clone()),
        Span::raw(" | "),
        Span::styled("Timezone: ", Style::default().fg(Color::Gray)),
        Span::raw(server_info.timezone.clone()),
        Span::raw(" | "),
        Span::styled("Uptime: ", Style::default().fg(Color::Gray)),
        Span::raw(server_info.uptime.clone()),
    ]);

    let hints = if page.state() == PageState::Unreachable {
        "[p] Ping Server | [← →] Select | [1-4/Enter] Details | [q]uit"
    } else {
        "[← →] Select | [1-4/Enter] Details | [p] Ping Server | [q]uit"
    };

    let footer = Paragraph::new(vec![
        info_line,
        Line::from(Span::styled(hints, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
