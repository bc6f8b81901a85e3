use std::fmt;

use serde::Serialize;

use crate::aggregate::{CrossTab, ValueCount};
use crate::sections::Section;

#[derive(Debug, Clone, Serialize)]
pub struct RenderedView {
    pub section: Section,
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Text { lines: Vec<String> },
    Note { text: String },
    Columns { panes: Vec<Pane> },
    Tabs { panes: Vec<Pane> },
    Table(TableBlock),
    Histogram(StackedHistogram),
    Bars(CountChart),
}

#[derive(Debug, Clone, Serialize)]
pub struct Pane {
    pub title: String,
    pub weight: u16,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TableBlock {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub gradient: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackedHistogram {
    pub title: String,
    pub x_label: String,
    pub color_label: String,
    pub data: CrossTab,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountChart {
    pub title: String,
    pub x_label: String,
    pub bars: Vec<ValueCount>,
}

impl RenderedView {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            title: section.label().to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn tab_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .find_map(|b| match b {
                Block::Tabs { panes } => Some(panes.iter().map(|p| p.title.as_str()).collect()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn histograms(&self) -> Vec<&StackedHistogram> {
        let mut out = Vec::new();
        collect_histograms(&self.blocks, &mut out);
        out
    }

    pub fn bar_charts(&self) -> Vec<&CountChart> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bars(chart) => Some(chart),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&TableBlock> {
        let mut out = Vec::new();
        collect_tables(&self.blocks, &mut out);
        out
    }
}

fn collect_histograms<'a>(blocks: &'a [Block], out: &mut Vec<&'a StackedHistogram>) {
    for block in blocks {
        match block {
            Block::Histogram(h) => out.push(h),
            Block::Columns { panes } | Block::Tabs { panes } => {
                for pane in panes {
                    collect_histograms(&pane.blocks, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_tables<'a>(blocks: &'a [Block], out: &mut Vec<&'a TableBlock>) {
    for block in blocks {
        match block {
            Block::Table(t) => out.push(t),
            Block::Columns { panes } | Block::Tabs { panes } => {
                for pane in panes {
                    collect_tables(&pane.blocks, out);
                }
            }
            _ => {}
        }
    }
}

impl Pane {
    pub fn column(weight: u16, blocks: Vec<Block>) -> Self {
        Self {
            title: String::new(),
            weight,
            blocks,
        }
    }

    pub fn tab(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            weight: 1,
            blocks,
        }
    }
}

impl Block {
    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::Text {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn note(text: impl Into<String>) -> Self {
        Block::Note { text: text.into() }
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} [{}]", self.title, self.section.key())?;
        write_blocks(f, &self.blocks, 0)
    }
}

fn write_blocks(f: &mut fmt::Formatter<'_>, blocks: &[Block], depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    for block in blocks {
        match block {
            Block::Heading { text } => writeln!(f, "{pad}# {text}")?,
            Block::Text { lines } => {
                for line in lines {
                    writeln!(f, "{pad}{line}")?;
                }
            }
            Block::Note { text } => writeln!(f, "{pad}({text})")?,
            Block::Columns { panes } | Block::Tabs { panes } => {
                for pane in panes {
                    if !pane.title.is_empty() {
                        writeln!(f, "{pad}[{}]", pane.title)?;
                    }
                    write_blocks(f, &pane.blocks, depth + 1)?;
                }
            }
            Block::Table(table) => {
                if let Some(title) = &table.title {
                    writeln!(f, "{pad}{title}")?;
                }
                writeln!(f, "{pad}{}", table.headers.join(" | "))?;
                for row in &table.rows {
                    writeln!(f, "{pad}{}", row.join(" | "))?;
                }
            }
            Block::Histogram(h) => {
                writeln!(f, "{pad}{} (x={}, color={})", h.title, h.x_label, h.color_label)?;
                for (idx, category) in h.data.categories.iter().enumerate() {
                    writeln!(f, "{pad}  {category}: {}", h.data.category_total(idx))?;
                }
            }
            Block::Bars(chart) => {
                writeln!(f, "{pad}{} (x={})", chart.title, chart.x_label)?;
                for bar in &chart.bars {
                    writeln!(f, "{pad}  {}: {}", bar.value, bar.count)?;
                }
            }
        }
    }
    Ok(())
}
