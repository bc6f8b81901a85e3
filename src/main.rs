use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::{error, info};

use cr7_terminal::config::Config;
use cr7_terminal::dataset::GoalTable;
use cr7_terminal::logging;
use cr7_terminal::sections::Section;
use cr7_terminal::state::AppState;
use cr7_terminal::ui;

struct App {
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new(table: Arc<GoalTable>, tick_rate: Duration) -> Self {
        Self {
            state: AppState::new(table),
            should_quit: false,
            tick_rate,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Home => self.state.select(Section::ALL[0]),
            KeyCode::Enter | KeyCode::Char('r') => {
                self.state.rerender();
                let name = self.state.section().name();
                self.state.push_log(format!("[INFO] Re-rendered {name}"));
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.state.next_tab(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.state.prev_tab(),
            KeyCode::PageDown | KeyCode::Char('J') => self.state.scroll_down(5),
            KeyCode::PageUp | KeyCode::Char('K') => self.state.scroll_up(5),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let config = Config::load();
    if let Err(err) = logging::init_file(&config.log_path) {
        eprintln!("warning: {err:#}");
    }

    let table = GoalTable::load(&config.data_path)
        .with_context(|| format!("load dataset {}", config.data_path.display()))?;
    info!(
        rows = table.len(),
        columns = table.columns().len(),
        path = %config.data_path.display(),
        "dataset loaded"
    );
    let table = Arc::new(table);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(table, config.tick);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "terminal loop failed");
    }
    info!(renders = app.state.renders, "shutdown");
    res.context("terminal loop")
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(30)])
        .split(rows[1]);
    ui::draw_sidebar(frame, columns[0], &app.state);
    ui::draw_view(frame, columns[1], &app.state);

    ui::draw_console(frame, rows[2], &app.state);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, rows[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!(
        "  .-.  CR7 TERMINAL | {} | {} goals",
        state.section().label(),
        state.table().len()
    );
    let line2 = " /___\\  UR Cristiano - Extensive EDA & Analytics".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.tab_count() > 0 {
        "j/k/↑/↓ Section | Tab/←/→ Tab | PgUp/PgDn Scroll | Enter Re-render | ? Help | q Quit"
            .to_string()
    } else {
        "j/k/↑/↓ Section | PgUp/PgDn Scroll | Enter Re-render | ? Help | q Quit".to_string()
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "CR7 Terminal - Help",
        "",
        "Navigation:",
        "  j/k or ↑/↓   Previous / next section",
        "  Home         Introduction",
        "  Enter / r    Re-render the current section",
        "",
        "View:",
        "  Tab / ←/→    Switch tab (Data Overview)",
        "  PgUp/PgDn    Scroll tables and charts",
        "",
        "  ?            Toggle help",
        "  q / Esc      Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let scale = |len: u16, pct: u16| (u32::from(len) * u32::from(pct.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_inside_the_area() {
        let area = Rect::new(10, 5, 100, 40);
        let popup = centered_rect(60, 60, area);
        assert_eq!(popup, Rect::new(30, 13, 60, 24));

        let full = centered_rect(150, 100, area);
        assert_eq!(full, area);
    }
}
