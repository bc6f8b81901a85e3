use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Competition,
    Club,
    Season,
    PlayingPosition,
    Minute,
    Type,
    AtScore,
    Opponent,
    GoalAssist,
    Venue,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Season,
        Field::Competition,
        Field::Venue,
        Field::Club,
        Field::Opponent,
        Field::PlayingPosition,
        Field::Minute,
        Field::AtScore,
        Field::Type,
        Field::GoalAssist,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Field::Competition => "Competition",
            Field::Club => "Club",
            Field::Season => "Season",
            Field::PlayingPosition => "Playing_Position",
            Field::Minute => "Minute",
            Field::Type => "Type",
            Field::AtScore => "At_score",
            Field::Opponent => "Opponent",
            Field::GoalAssist => "Goal_assist",
            Field::Venue => "Venue",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoalRecord {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Competition")]
    pub competition: String,
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Club")]
    pub club: String,
    #[serde(rename = "Opponent")]
    pub opponent: String,
    #[serde(rename = "Playing_Position")]
    pub playing_position: String,
    #[serde(rename = "Minute")]
    pub minute: String,
    #[serde(rename = "At_score")]
    pub at_score: String,
    #[serde(rename = "Type")]
    pub goal_type: String,
    #[serde(rename = "Goal_assist")]
    pub goal_assist: String,
}

impl GoalRecord {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Competition => &self.competition,
            Field::Club => &self.club,
            Field::Season => &self.season,
            Field::PlayingPosition => &self.playing_position,
            Field::Minute => &self.minute,
            Field::Type => &self.goal_type,
            Field::AtScore => &self.at_score,
            Field::Opponent => &self.opponent,
            Field::GoalAssist => &self.goal_assist,
            Field::Venue => &self.venue,
        }
    }
}

/// A single named column. `None` cells are missing (see `is_missing`).
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|c| c.as_deref())
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.cells.iter().map(|c| c.as_deref())
    }

    pub fn present(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().filter_map(|c| c.as_deref())
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

#[derive(Debug, Clone)]
pub struct GoalTable {
    columns: Vec<Column>,
    rows: usize,
}

impl GoalTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("open goals csv {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("parse goals csv {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("read csv header")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            bail!("csv has no header row");
        }
        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                bail!("duplicate column {header:?} in csv header");
            }
        }

        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::new()))
            .collect();

        let mut rows = 0usize;
        for record in rdr.records() {
            let record = record.with_context(|| format!("read csv record {}", rows + 1))?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                column.cells.push(normalize_cell(cell));
            }
            rows += 1;
        }

        Ok(Self { columns, rows })
    }

    pub fn from_records(records: &[GoalRecord]) -> Self {
        let columns = Field::ALL
            .iter()
            .map(|field| {
                let cells = records
                    .iter()
                    .map(|r| normalize_cell(r.value(*field)))
                    .collect();
                Column::new(field.header(), cells)
            })
            .collect();
        Self {
            columns,
            rows: records.len(),
        }
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(anyhow!(
                "column {:?} has {} cells, expected {}",
                bad.name(),
                bad.len(),
                rows
            ));
        }
        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column(&self, field: Field) -> Result<&Column> {
        self.column_by_name(field.header())
            .ok_or_else(|| anyhow!("column {:?} not found in dataset", field.header()))
    }

    /// First `n` rows as display strings; missing cells show as `NaN`.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        (0..self.rows.min(n))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.get(row).unwrap_or("NaN").to_string())
                    .collect()
            })
            .collect()
    }
}

/// Tokens read as missing, on top of blank cells. Matches the usual
/// dataframe `read_csv` defaults.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(raw: &str) -> bool {
    let cell = raw.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

fn normalize_cell(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}
