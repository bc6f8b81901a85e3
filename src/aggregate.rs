use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::{Column, GoalTable};

pub const UNKNOWN_SERIES: &str = "(unknown)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Frequencies of the non-missing values of a column, most frequent first.
/// Ties keep the order in which the values first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    entries: Vec<ValueCount>,
}

impl ValueCounts {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut tally: Vec<(&'a str, u64)> = Vec::new();
        for value in values.into_iter().flatten() {
            match index.get(value) {
                Some(&idx) => tally[idx].1 += 1,
                None => {
                    index.insert(value, tally.len());
                    tally.push((value, 1));
                }
            }
        }
        // stable: equal counts stay in first-appearance order
        tally.sort_by(|a, b| b.1.cmp(&a.1));
        Self {
            entries: tally
                .into_iter()
                .map(|(value, count)| ValueCount {
                    value: value.to_string(),
                    count,
                })
                .collect(),
        }
    }

    pub fn of(column: &Column) -> Self {
        Self::from_values(column.values())
    }

    pub fn entries(&self) -> &[ValueCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn get(&self, value: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.count)
    }

    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.value.as_str()).collect()
    }

    pub fn top_n(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    pub fn above(&self, threshold: u64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.count > threshold)
                .cloned()
                .collect(),
        }
    }

    pub fn most_frequent(&self) -> Option<&ValueCount> {
        self.entries.first()
    }
}

pub fn filter_rows(column: &Column, keep: &[&str]) -> Vec<usize> {
    column
        .values()
        .enumerate()
        .filter(|(_, v)| v.is_some_and(|v| keep.contains(&v)))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn count_in_order(column: &Column, order: &[&str]) -> Vec<ValueCount> {
    let position: HashMap<&str, usize> = order.iter().enumerate().map(|(i, v)| (*v, i)).collect();
    let mut counts = vec![0u64; order.len()];
    for row in filter_rows(column, order) {
        if let Some(value) = column.get(row)
            && let Some(&idx) = position.get(value)
        {
            counts[idx] += 1;
        }
    }
    order
        .iter()
        .zip(counts)
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub categories: Vec<String>,
    pub series: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// Categories and series in first-appearance order. Rows with a missing
    /// `x` are dropped; a missing `color` is counted under `(unknown)`.
    pub fn build<'x, 'c, X, C>(x: X, color: C) -> Self
    where
        X: IntoIterator<Item = Option<&'x str>>,
        C: IntoIterator<Item = Option<&'c str>>,
    {
        Self::build_with_categories(&[], x, color)
    }

    pub fn build_with_categories<'x, 'c, X, C>(seed: &[&str], x: X, color: C) -> Self
    where
        X: IntoIterator<Item = Option<&'x str>>,
        C: IntoIterator<Item = Option<&'c str>>,
    {
        let mut tab = CrossTab::default();
        let mut cat_index: HashMap<String, usize> = HashMap::new();
        let mut series_index: HashMap<String, usize> = HashMap::new();
        for category in seed {
            cat_index.insert(category.to_string(), tab.categories.len());
            tab.categories.push(category.to_string());
            tab.counts.push(Vec::new());
        }

        for (x, color) in x.into_iter().zip(color) {
            let Some(x) = x else { continue };
            let color = color.unwrap_or(UNKNOWN_SERIES);

            let cat = match cat_index.get(x) {
                Some(&idx) => idx,
                None => {
                    let idx = tab.categories.len();
                    cat_index.insert(x.to_string(), idx);
                    tab.categories.push(x.to_string());
                    tab.counts.push(Vec::new());
                    idx
                }
            };
            let series = match series_index.get(color) {
                Some(&idx) => idx,
                None => {
                    let idx = tab.series.len();
                    series_index.insert(color.to_string(), idx);
                    tab.series.push(color.to_string());
                    idx
                }
            };
            let row = &mut tab.counts[cat];
            if row.len() <= series {
                row.resize(series + 1, 0);
            }
            row[series] += 1;
        }

        let width = tab.series.len();
        for row in &mut tab.counts {
            row.resize(width, 0);
        }
        tab
    }

    pub fn of(x: &Column, color: &Column) -> Self {
        Self::build(x.values(), color.values())
    }

    pub fn category_total(&self, category: usize) -> u64 {
        self.counts
            .get(category)
            .map(|row| row.iter().sum())
            .unwrap_or(0)
    }

    pub fn series_total(&self, series: usize) -> u64 {
        self.counts
            .iter()
            .filter_map(|row| row.get(series))
            .sum()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn max_category_total(&self) -> u64 {
        (0..self.categories.len())
            .map(|i| self.category_total(i))
            .max()
            .unwrap_or(0)
    }

    pub fn count(&self, category: &str, series: &str) -> u64 {
        let Some(c) = self.categories.iter().position(|v| v == category) else {
            return 0;
        };
        let Some(s) = self.series.iter().position(|v| v == series) else {
            return 0;
        };
        self.counts[c][s]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub value: String,
    pub count: u64,
    pub percent: f64,
}

pub fn shares(counts: &ValueCounts) -> Vec<Share> {
    let total = counts.total();
    counts
        .entries()
        .iter()
        .map(|e| Share {
            value: e.value.clone(),
            count: e.count,
            percent: if total == 0 {
                0.0
            } else {
                round2(e.count as f64 / total as f64 * 100.0)
            },
        })
        .collect()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct values per column. A column with missing cells counts "missing"
/// as one more distinct value.
pub fn unique_counts(table: &GoalTable) -> Vec<(String, usize)> {
    table
        .columns()
        .iter()
        .map(|column| {
            let distinct = ValueCounts::of(column).len();
            let missing = usize::from(column.missing_count() > 0);
            (column.name().to_string(), distinct + missing)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dtype {
    Int64,
    Float64,
    Object,
}

impl Dtype {
    pub fn label(self) -> &'static str {
        match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::Object => "object",
        }
    }

    pub fn infer(column: &Column) -> Self {
        let mut present = column.present().map(str::trim).peekable();
        if present.peek().is_none() {
            return Dtype::Float64;
        }
        let mut all_int = true;
        for cell in present {
            if cell.parse::<i64>().is_ok() {
                continue;
            }
            all_int = false;
            if cell.parse::<f64>().is_err() {
                return Dtype::Object;
            }
        }
        if all_int && column.missing_count() == 0 {
            Dtype::Int64
        } else {
            Dtype::Float64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub position: usize,
    pub name: String,
    pub non_null: usize,
    pub dtype: Dtype,
}

pub fn column_info(table: &GoalTable) -> Vec<ColumnInfo> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(position, column)| ColumnInfo {
            position,
            name: column.name().to_string(),
            non_null: column.len() - column.missing_count(),
            dtype: Dtype::infer(column),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: u64,
}

pub fn describe_categorical(table: &GoalTable) -> Vec<CategoricalSummary> {
    table
        .columns()
        .iter()
        .filter(|column| Dtype::infer(column) == Dtype::Object)
        .map(|column| {
            let counts = ValueCounts::of(column);
            let top = counts.most_frequent();
            CategoricalSummary {
                column: column.name().to_string(),
                count: column.len() - column.missing_count(),
                unique: counts.len(),
                top: top.map(|t| t.value.clone()),
                freq: top.map(|t| t.count).unwrap_or(0),
            }
        })
        .collect()
}
