use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tracing::{info, warn};

use crate::dataset::GoalTable;
use crate::sections::{self, Section};
use crate::view::RenderedView;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub enum ViewOutcome {
    Ready(RenderedView),
    Failed { section: Section, message: String },
}

impl ViewOutcome {
    pub fn section(&self) -> Section {
        match self {
            ViewOutcome::Ready(view) => view.section,
            ViewOutcome::Failed { section, .. } => *section,
        }
    }

    pub fn view(&self) -> Option<&RenderedView> {
        match self {
            ViewOutcome::Ready(view) => Some(view),
            ViewOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewOutcome::Failed { .. })
    }
}

pub struct AppState {
    table: Arc<GoalTable>,
    pub cursor: usize,
    pub outcome: ViewOutcome,
    pub tab: usize,
    pub scroll: u16,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub renders: u64,
}

impl AppState {
    pub fn new(table: Arc<GoalTable>) -> Self {
        let first = Section::ALL[0];
        let outcome = render_section(first, &table);
        let mut state = Self {
            table,
            cursor: 0,
            outcome,
            tab: 0,
            scroll: 0,
            help_overlay: false,
            logs: VecDeque::new(),
            renders: 1,
        };
        state.push_log(format!("[INFO] Loaded {} goals", state.table.len()));
        state
    }

    pub fn table(&self) -> &GoalTable {
        &self.table
    }

    pub fn section(&self) -> Section {
        Section::ALL[self.cursor]
    }

    pub fn select(&mut self, section: Section) {
        self.cursor = section.index();
        self.tab = 0;
        self.scroll = 0;
        self.rerender();
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < Section::ALL.len() {
            self.select(Section::ALL[self.cursor + 1]);
        }
    }

    pub fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.select(Section::ALL[self.cursor - 1]);
        }
    }

    pub fn rerender(&mut self) {
        let section = self.section();
        self.outcome = render_section(section, &self.table);
        self.renders += 1;
        if let ViewOutcome::Failed { message, .. } = &self.outcome {
            let line = format!("[WARN] {}: {message}", section.name());
            self.push_log(line);
        }
    }

    pub fn tab_count(&self) -> usize {
        self.outcome
            .view()
            .map(|v| v.tab_titles().len())
            .unwrap_or(0)
    }

    pub fn next_tab(&mut self) {
        let total = self.tab_count();
        if total == 0 {
            return;
        }
        self.tab = (self.tab + 1) % total;
        self.scroll = 0;
    }

    pub fn prev_tab(&mut self) {
        let total = self.tab_count();
        if total == 0 {
            return;
        }
        self.tab = (self.tab + total - 1) % total;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn render_section(section: Section, table: &GoalTable) -> ViewOutcome {
    let started = Instant::now();
    match sections::render(section, table) {
        Ok(view) => {
            info!(
                section = section.key(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "section rendered"
            );
            ViewOutcome::Ready(view)
        }
        Err(err) => {
            warn!(section = section.key(), error = %format!("{err:#}"), "section failed");
            ViewOutcome::Failed {
                section,
                message: format!("{err:#}"),
            }
        }
    }
}
