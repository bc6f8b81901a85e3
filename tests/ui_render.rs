use std::path::PathBuf;
use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use cr7_terminal::aggregate::CrossTab;
use cr7_terminal::dataset::{Column, GoalTable};
use cr7_terminal::sections::Section;
use cr7_terminal::state::AppState;
use cr7_terminal::ui;
use cr7_terminal::view::StackedHistogram;

fn fixture_table() -> GoalTable {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("goals_sample.csv");
    GoalTable::load(&path).expect("fixture should load")
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

fn draw(state: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.size();
            let sidebar = ratatui::layout::Rect { width: 30, ..area };
            let view = ratatui::layout::Rect {
                x: 30,
                width: area.width - 30,
                height: area.height - 5,
                ..area
            };
            let console = ratatui::layout::Rect {
                x: 30,
                y: area.height - 5,
                width: area.width - 30,
                height: 5,
            };
            ui::draw_sidebar(frame, sidebar, state);
            ui::draw_view(frame, view, state);
            ui::draw_console(frame, console, state);
        })
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

#[test]
fn every_section_draws_without_panicking() {
    let mut state = AppState::new(Arc::new(fixture_table()));
    for section in Section::ALL {
        state.select(section);
        let text = draw(&state);
        assert!(text.contains("Console"), "{} missing console", section.key());
    }
}

#[test]
fn sidebar_lists_sections() {
    let state = AppState::new(Arc::new(fixture_table()));
    let text = draw(&state);
    assert!(text.contains("Navigate to"));
    assert!(text.contains("Introduction"));
    assert!(text.contains("Venue Statistics"));
}

#[test]
fn bar_sections_show_their_titles() {
    let mut state = AppState::new(Arc::new(fixture_table()));
    state.select(Section::Assists);
    let text = draw(&state);
    assert!(text.contains("Top 10 Assists"));

    state.select(Section::FavoriteOpponents);
    let text = draw(&state);
    assert!(text.contains("No data"));
}

#[test]
fn failure_panel_names_the_missing_column() {
    let columns: Vec<Column> = fixture_table()
        .columns()
        .iter()
        .filter(|c| c.name() != "Venue")
        .cloned()
        .collect();
    let mut state = AppState::new(Arc::new(GoalTable::from_columns(columns).unwrap()));
    state.select(Section::GoalsPerVenue);
    let text = draw(&state);
    assert!(text.contains("could not be rendered"));
    assert!(text.contains("Venue"));
}

#[test]
fn histogram_bars_scale_to_the_widest_category() {
    let hist = StackedHistogram {
        title: "Goals per Season".to_string(),
        x_label: "Season".to_string(),
        color_label: "Club".to_string(),
        data: CrossTab::build(
            vec![Some("a"), Some("a"), Some("a"), Some("a"), Some("b")],
            vec![Some("X"), Some("Y"), Some("Y"), Some("Y"), Some("X")],
        ),
    };
    let lines = ui::histogram_lines(&hist, 12, 0);
    assert_eq!(lines.len(), 2);

    let bar_cells = |line: &ratatui::text::Line| -> usize {
        line.spans
            .iter()
            .filter(|s| s.content.contains('█'))
            .map(|s| s.content.chars().count())
            .sum()
    };
    // 12 columns minus label, count and two spaces leaves 8 bar cells
    assert_eq!(bar_cells(&lines[0]), 8);
    assert_eq!(bar_cells(&lines[1]), 2);
    assert_eq!(ui::histogram_lines(&hist, 12, 1).len(), 1);
}

#[test]
fn gradient_darkens_with_value() {
    let low = ui::gradient_style(0.0, 0.0, 10.0);
    let high = ui::gradient_style(10.0, 0.0, 10.0);
    assert_ne!(low.bg, high.bg);
    assert_eq!(high.fg, Some(ratatui::style::Color::White));
}
