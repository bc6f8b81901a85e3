use std::iter;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row,
    Table, Tabs, Wrap,
};

use crate::sections::Section;
use crate::state::{AppState, ViewOutcome};
use crate::view::{self, CountChart, RenderedView, StackedHistogram, TableBlock};

pub const BANNER: &str = "   _____ ____  _____\n  / ___// __ \\/__  /\n / /__ / /_/ /  / / \n \\___//_/ |_|  /_/  ";

const MAX_LABEL: usize = 24;
const MAX_TABLE_COL: usize = 28;

const PALETTE: [Color; 12] = [
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::Magenta,
    Color::Yellow,
    Color::LightBlue,
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::LightYellow,
];

pub fn series_color(idx: usize) -> Color {
    PALETTE
        .get(idx)
        .copied()
        .unwrap_or_else(|| Color::Indexed(16 + ((idx * 37) % 216) as u8))
}

pub fn draw_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let outer = Block::default()
        .title(" 📊 CR7 Analytics ")
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let banner_height = BANNER.lines().count() as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(1)])
        .split(inner);

    let banner = Paragraph::new(BANNER).style(Style::default().fg(Color::Yellow));
    frame.render_widget(banner, chunks[0]);

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|s| ListItem::new(s.label()))
        .collect();
    let list = List::new(items)
        .block(Block::default().title("Navigate to").borders(Borders::TOP))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

pub fn draw_view(frame: &mut Frame, area: Rect, state: &AppState) {
    match &state.outcome {
        ViewOutcome::Ready(view) => render_view(frame, area, view, state.tab, state.scroll),
        ViewOutcome::Failed { section, message } => {
            render_failure(frame, area, *section, message)
        }
    }
}

pub fn draw_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = if state.logs.is_empty() {
        "No alerts yet".to_string()
    } else {
        let skip = state.logs.len().saturating_sub(3);
        state
            .logs
            .iter()
            .skip(skip)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    };
    let console =
        Paragraph::new(text).block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, area);
}

pub fn render_view(frame: &mut Frame, area: Rect, view: &RenderedView, tab: usize, scroll: u16) {
    let outer = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    render_blocks(frame, inner, &view.blocks, tab, scroll);
}

pub fn render_failure(frame: &mut Frame, area: Rect, section: Section, message: &str) {
    let text = vec![
        Line::from(Span::styled(
            format!("{} could not be rendered", section.name()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Pick another section or press Enter to retry."),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .title(format!(" {} ", section.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(panel, area);
}

fn render_blocks(frame: &mut Frame, area: Rect, blocks: &[view::Block], tab: usize, scroll: u16) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let constraints: Vec<Constraint> = blocks
        .iter()
        .map(|b| match b {
            view::Block::Tabs { .. } => Constraint::Min(3),
            other => Constraint::Length(block_height(other, area.width)),
        })
        .chain(iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (block, chunk) in blocks.iter().zip(chunks.iter()) {
        render_block(frame, *chunk, block, tab, scroll);
    }
}

fn render_block(frame: &mut Frame, area: Rect, block: &view::Block, tab: usize, scroll: u16) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let offset = usize::from(scroll);
    match block {
        view::Block::Heading { text } => {
            let heading = Paragraph::new(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(heading, area);
        }
        view::Block::Text { lines } => {
            let text: Vec<Line> = lines.iter().map(|l| styled_text_line(l)).collect();
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
        }
        view::Block::Note { text } => {
            let note = Paragraph::new(text.clone())
                .wrap(Wrap { trim: false })
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                );
            frame.render_widget(note, area);
        }
        view::Block::Columns { panes } => {
            let total: u32 = panes.iter().map(|p| u32::from(p.weight.max(1))).sum();
            let constraints: Vec<Constraint> = panes
                .iter()
                .map(|p| Constraint::Ratio(u32::from(p.weight.max(1)), total.max(1)))
                .collect();
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(area);
            for (pane, chunk) in panes.iter().zip(chunks.iter()) {
                render_blocks(frame, *chunk, &pane.blocks, tab, scroll);
            }
        }
        view::Block::Tabs { panes } => {
            if panes.is_empty() {
                return;
            }
            let selected = tab % panes.len();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1)])
                .split(area);
            let tabs = Tabs::new(panes.iter().map(|p| p.title.clone()))
                .select(selected)
                .block(Block::default().borders(Borders::BOTTOM))
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_widget(tabs, chunks[0]);
            render_blocks(frame, chunks[1], &panes[selected].blocks, tab, scroll);
        }
        view::Block::Table(table) => render_table(frame, area, table, offset),
        view::Block::Histogram(hist) => render_histogram(frame, area, hist, offset),
        view::Block::Bars(chart) => render_bars(frame, area, chart, offset),
    }
}

fn block_height(block: &view::Block, width: u16) -> u16 {
    let height = match block {
        view::Block::Heading { .. } => 1,
        view::Block::Text { lines } => lines.iter().map(|l| wrapped_rows(l, width)).sum(),
        view::Block::Note { text } => wrapped_rows(text, width),
        view::Block::Table(table) => table.rows.len() + 3,
        view::Block::Histogram(hist) => {
            let inner = width.saturating_sub(2);
            hist.data.categories.len().max(1) + legend_lines(hist, inner).len() + 2
        }
        view::Block::Bars(chart) => chart.bars.len().max(1) + 2,
        view::Block::Columns { panes } => {
            let total: u32 = panes.iter().map(|p| u32::from(p.weight.max(1))).sum();
            panes
                .iter()
                .map(|p| {
                    let pane_width =
                        (u32::from(width) * u32::from(p.weight.max(1)) / total.max(1)) as u16;
                    p.blocks
                        .iter()
                        .map(|b| usize::from(block_height(b, pane_width)))
                        .sum::<usize>()
                })
                .max()
                .unwrap_or(0)
        }
        view::Block::Tabs { .. } => 3,
    };
    u16::try_from(height).unwrap_or(u16::MAX)
}

fn wrapped_rows(text: &str, width: u16) -> usize {
    let width = usize::from(width.max(1));
    let len = text.chars().count();
    len.div_ceil(width).max(1)
}

fn styled_text_line(raw: &str) -> Line<'static> {
    if let Some(heading) = raw.strip_prefix("### ") {
        return Line::from(Span::styled(
            heading.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(raw.to_string())
}

fn render_table(frame: &mut Frame, area: Rect, table: &TableBlock, offset: usize) {
    let ncols = table.headers.len();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (idx, cell) in row.iter().enumerate().take(ncols) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    let widths: Vec<Constraint> = widths
        .into_iter()
        .map(|w| Constraint::Length(w.clamp(3, MAX_TABLE_COL) as u16))
        .collect();

    let range = table.gradient.and_then(|col| {
        let values: Vec<f64> = table
            .rows
            .iter()
            .filter_map(|r| r.get(col).and_then(|c| c.parse::<f64>().ok()))
            .collect();
        let lo = values.iter().copied().reduce(f64::min)?;
        let hi = values.iter().copied().reduce(f64::max)?;
        Some((col, lo, hi))
    });

    let offset = offset.min(table.rows.len().saturating_sub(1));
    let rows = table.rows.iter().skip(offset).map(|row| {
        Row::new(row.iter().enumerate().map(|(idx, cell)| {
            let mut styled = Cell::from(cell.clone());
            if let Some((col, lo, hi)) = range
                && col == idx
                && let Ok(value) = cell.parse::<f64>()
            {
                styled = styled.style(gradient_style(value, lo, hi));
            }
            styled
        }))
    });
    let header = Row::new(table.headers.iter().map(|h| Cell::from(h.clone())))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let mut frame_block = Block::default().borders(Borders::ALL);
    if let Some(title) = &table.title {
        frame_block = frame_block.title(format!(" {title} "));
    }
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(frame_block);
    frame.render_widget(widget, area);
}

pub fn gradient_style(value: f64, lo: f64, hi: f64) -> Style {
    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    let bg = Color::Rgb(lerp(236, 4), lerp(231, 90), lerp(242, 141));
    let fg = if t > 0.5 { Color::White } else { Color::Black };
    Style::default().fg(fg).bg(bg)
}

fn render_histogram(frame: &mut Frame, area: Rect, hist: &StackedHistogram, offset: usize) {
    let outer = Block::default()
        .title(format!(" {} ", hist.title))
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let legend = legend_lines(hist, inner.width);
    let legend_height = (legend.len() as u16).min(inner.height.saturating_sub(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(legend_height)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(histogram_lines(hist, chunks[0].width, offset)),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}

/// One horizontal stacked bar per category, scaled to the widest category.
pub fn histogram_lines(hist: &StackedHistogram, width: u16, offset: usize) -> Vec<Line<'static>> {
    let data = &hist.data;
    if data.categories.is_empty() {
        return vec![Line::from(Span::styled(
            "No data",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let label_width = data
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL);
    let max_total = data.max_category_total();
    let count_width = max_total.to_string().len();
    let bar_width = usize::from(width).saturating_sub(label_width + count_width + 2);

    data.categories
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(idx, category)| {
            let mut spans = vec![Span::raw(format!(
                "{:<width$} ",
                truncate(category, label_width),
                width = label_width
            ))];
            let mut cumulative = 0u64;
            let mut drawn = 0usize;
            for (series, count) in data.counts[idx].iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                cumulative += count;
                let end = scaled(cumulative, max_total, bar_width);
                if end > drawn {
                    spans.push(Span::styled(
                        "█".repeat(end - drawn),
                        Style::default().fg(series_color(series)),
                    ));
                    drawn = end;
                }
            }
            spans.push(Span::raw(format!(" {}", data.category_total(idx))));
            Line::from(spans)
        })
        .collect()
}

pub fn legend_lines(hist: &StackedHistogram, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let prefix = format!("{}: ", hist.color_label);
    let mut used = prefix.chars().count();
    let mut current = vec![Span::styled(
        prefix,
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for (idx, name) in hist.data.series.iter().enumerate() {
        let name = truncate(name, MAX_LABEL);
        let item_width = name.chars().count() + 4;
        if used + item_width > width && current.len() > 1 {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        current.push(Span::styled("■ ", Style::default().fg(series_color(idx))));
        current.push(Span::raw(format!("{name}  ")));
        used += item_width;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn render_bars(frame: &mut Frame, area: Rect, chart: &CountChart, offset: usize) {
    let outer = Block::default()
        .title(format!(" {} ", chart.title))
        .borders(Borders::ALL);
    if chart.bars.is_empty() {
        let empty = Paragraph::new("No data")
            .style(Style::default().fg(Color::DarkGray))
            .block(outer);
        frame.render_widget(empty, area);
        return;
    }

    let offset = offset.min(chart.bars.len() - 1);
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(idx, bar)| {
            Bar::default()
                .label(Line::from(truncate(&bar.value, MAX_LABEL)))
                .value(bar.count)
                .text_value(bar.count.to_string())
                .style(Style::default().fg(series_color(idx)))
        })
        .collect();

    let widget = BarChart::default()
        .block(outer)
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0);
    frame.render_widget(widget, area);
}

fn scaled(value: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (value as f64 / max as f64 * width as f64).round() as usize
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
