use anyhow::Result;
use serde::Serialize;

use crate::aggregate::{
    CrossTab, ValueCounts, column_info, count_in_order, describe_categorical, shares,
    unique_counts,
};
use crate::dataset::{Field, GoalTable};
use crate::minute::{MinuteBin, derive_bins, derive_minutes};
use crate::view::{Block, CountChart, Pane, RenderedView, StackedHistogram, TableBlock};

pub const PREVIEW_ROWS: usize = 5;
pub const TOP_SCORELINES: usize = 20;
pub const TOP_OPPONENTS: usize = 20;
pub const TOP_ASSISTS: usize = 10;
/// Favorite opponents have strictly more goals than this.
pub const FAVORITE_OPPONENT_THRESHOLD: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Introduction,
    BasicExploration,
    GoalsPerCompetition,
    GoalsPerSeason,
    GoalsPerClub,
    GoalsPerPlayingPosition,
    GoalsPerGameMinute,
    GoalsPerType,
    ScorelineAfterGoals,
    Opponents,
    FavoriteOpponents,
    Assists,
    GoalsPerVenue,
}

impl Section {
    pub const ALL: [Section; 13] = [
        Section::Introduction,
        Section::BasicExploration,
        Section::GoalsPerCompetition,
        Section::GoalsPerSeason,
        Section::GoalsPerClub,
        Section::GoalsPerPlayingPosition,
        Section::GoalsPerGameMinute,
        Section::GoalsPerType,
        Section::ScorelineAfterGoals,
        Section::Opponents,
        Section::FavoriteOpponents,
        Section::Assists,
        Section::GoalsPerVenue,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Introduction => "introduction",
            Section::BasicExploration => "basic_exploration",
            Section::GoalsPerCompetition => "goals_per_competition",
            Section::GoalsPerSeason => "goals_per_season",
            Section::GoalsPerClub => "goals_per_club",
            Section::GoalsPerPlayingPosition => "goals_per_playing_position",
            Section::GoalsPerGameMinute => "goals_per_game_minute",
            Section::GoalsPerType => "goals_per_type",
            Section::ScorelineAfterGoals => "scoreline_after_goals",
            Section::Opponents => "opponents",
            Section::FavoriteOpponents => "favorite_opponents",
            Section::Assists => "assists",
            Section::GoalsPerVenue => "goals_per_venue",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Introduction => "Introduction",
            Section::BasicExploration => "Basic Exploration",
            Section::GoalsPerCompetition => "Goals per Competition",
            Section::GoalsPerSeason => "Goals per Season",
            Section::GoalsPerClub => "Goals per Club",
            Section::GoalsPerPlayingPosition => "Goals per Playing Position",
            Section::GoalsPerGameMinute => "Goals per Game Minute",
            Section::GoalsPerType => "Goals per Type",
            Section::ScorelineAfterGoals => "Scoreline After Goals",
            Section::Opponents => "Opponents",
            Section::FavoriteOpponents => "Favorite Opponents",
            Section::Assists => "Assists",
            Section::GoalsPerVenue => "Goals per Venue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Introduction => "👋 Introduction",
            Section::BasicExploration => "🔍 Data Overview",
            Section::GoalsPerCompetition => "🏆 Competition Analysis",
            Section::GoalsPerSeason => "📅 Seasonal Performance",
            Section::GoalsPerClub => "⚽ Club Career",
            Section::GoalsPerPlayingPosition => "🎯 Position Analysis",
            Section::GoalsPerGameMinute => "⏱️ Timing Analysis",
            Section::GoalsPerType => "🎨 Goal Types",
            Section::ScorelineAfterGoals => "📊 Impact Analysis",
            Section::Opponents => "🆚 Opposition Analysis",
            Section::FavoriteOpponents => "🎯 Top Opponents",
            Section::Assists => "🤝 Assist Analysis",
            Section::GoalsPerVenue => "🏟️ Venue Statistics",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key))
    }
}

pub type RenderFn = fn(&GoalTable) -> Result<RenderedView>;

pub struct SectionEntry {
    pub section: Section,
    pub render: RenderFn,
}

pub static REGISTRY: [SectionEntry; 13] = [
    SectionEntry { section: Section::Introduction, render: introduction },
    SectionEntry { section: Section::BasicExploration, render: basic_exploration },
    SectionEntry { section: Section::GoalsPerCompetition, render: goals_per_competition },
    SectionEntry { section: Section::GoalsPerSeason, render: goals_per_season },
    SectionEntry { section: Section::GoalsPerClub, render: goals_per_club },
    SectionEntry { section: Section::GoalsPerPlayingPosition, render: goals_per_playing_position },
    SectionEntry { section: Section::GoalsPerGameMinute, render: goals_per_game_minute },
    SectionEntry { section: Section::GoalsPerType, render: goals_per_type },
    SectionEntry { section: Section::ScorelineAfterGoals, render: scoreline_after_goals },
    SectionEntry { section: Section::Opponents, render: opponents },
    SectionEntry { section: Section::FavoriteOpponents, render: favorite_opponents },
    SectionEntry { section: Section::Assists, render: assists },
    SectionEntry { section: Section::GoalsPerVenue, render: goals_per_venue },
];

pub fn entry(section: Section) -> &'static SectionEntry {
    // REGISTRY is laid out in menu order
    &REGISTRY[section.index()]
}

pub fn render(section: Section, table: &GoalTable) -> Result<RenderedView> {
    (entry(section).render)(table)
}

fn introduction(_table: &GoalTable) -> Result<RenderedView> {
    let about = vec![
        Block::heading("Cristiano Ronaldo's Complete Goal Analysis"),
        Block::text([
            "Cristiano Ronaldo dos Santos Aveiro is widely regarded as one of the greatest",
            "footballers of all time. This dashboard provides comprehensive analysis of his",
            "goal-scoring career across different clubs and competitions.",
            "",
            "### Career Highlights",
            "- All-time top goalscorer in football history",
            "- Most international goals in men's football",
            "- 5 UEFA Champions League titles",
            "- 5 Ballon d'Or awards",
            "- Over 800 career goals",
        ]),
    ];
    let facts = vec![Block::text([
        "### Quick Facts",
        "- Current team: Al-Nassr (#7)",
        "- Position: Forward",
        "- Born: February 5, 1985",
        "- Nationality: Portuguese",
        "- Height: 1.87 m",
    ])];

    let mut view = RenderedView::new(Section::Introduction).with(Block::Columns {
        panes: vec![Pane::column(2, about), Pane::column(1, facts)],
    });
    view.title = "⚽ CR7 - Career Statistics Dashboard".to_string();
    Ok(view)
}

fn basic_exploration(table: &GoalTable) -> Result<RenderedView> {
    let headers: Vec<String> = table.headers().iter().map(|h| h.to_string()).collect();
    let preview = TableBlock {
        title: None,
        headers: headers.clone(),
        rows: table.head(PREVIEW_ROWS),
        gradient: None,
    };

    let info = column_info(table);
    let mut dtype_counts: Vec<(&'static str, usize)> = Vec::new();
    for col in &info {
        let label = col.dtype.label();
        match dtype_counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => dtype_counts.push((label, 1)),
        }
    }
    let range = if table.is_empty() {
        "RangeIndex: 0 entries".to_string()
    } else {
        format!("RangeIndex: {} entries, 0 to {}", table.len(), table.len() - 1)
    };
    let dtypes = dtype_counts
        .iter()
        .map(|(label, n)| format!("{label}({n})"))
        .collect::<Vec<_>>()
        .join(", ");
    let info_table = TableBlock {
        title: None,
        headers: vec![
            "#".to_string(),
            "Column".to_string(),
            "Non-Null Count".to_string(),
            "Dtype".to_string(),
        ],
        rows: info
            .iter()
            .map(|c| {
                vec![
                    c.position.to_string(),
                    c.name.clone(),
                    format!("{} non-null", c.non_null),
                    c.dtype.label().to_string(),
                ]
            })
            .collect(),
        gradient: None,
    };

    let uniques = TableBlock {
        title: None,
        headers: vec!["Column".to_string(), "Unique Values".to_string()],
        rows: unique_counts(table)
            .into_iter()
            .map(|(name, n)| vec![name, n.to_string()])
            .collect(),
        gradient: Some(1),
    };
    let describe = TableBlock {
        title: None,
        headers: ["Column", "count", "unique", "top", "freq"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: describe_categorical(table)
            .into_iter()
            .map(|s| {
                vec![
                    s.column,
                    s.count.to_string(),
                    s.unique.to_string(),
                    s.top.unwrap_or_else(|| "NaN".to_string()),
                    s.freq.to_string(),
                ]
            })
            .collect(),
        gradient: None,
    };

    let panes = vec![
        Pane::tab(
            "📊 Data Preview",
            vec![Block::heading("Raw Data Sample"), Block::Table(preview)],
        ),
        Pane::tab(
            "📈 Statistics",
            vec![
                Block::heading("Dataset Information"),
                Block::text([
                    range,
                    format!("Data columns (total {} columns):", info.len()),
                ]),
                Block::Table(info_table),
                Block::text([format!("dtypes: {dtypes}")]),
            ],
        ),
        Pane::tab(
            "🔢 Column Analysis",
            vec![Block::Columns {
                panes: vec![
                    Pane::column(
                        1,
                        vec![Block::heading("Unique Values per Column"), Block::Table(uniques)],
                    ),
                    Pane::column(
                        1,
                        vec![Block::heading("Categorical Statistics"), Block::Table(describe)],
                    ),
                ],
            }],
        ),
    ];

    Ok(RenderedView::new(Section::BasicExploration).with(Block::Tabs { panes }))
}

fn goals_per_competition(table: &GoalTable) -> Result<RenderedView> {
    let chart = stacked(
        table,
        Field::Competition,
        Field::Club,
        "Goals Distribution Across Competitions",
    )?;

    let counts = ValueCounts::of(table.column(Field::Competition)?);
    let breakdown = TableBlock {
        title: None,
        headers: vec![
            "Competition".to_string(),
            "Goals".to_string(),
            "Percentage".to_string(),
        ],
        rows: shares(&counts)
            .into_iter()
            .map(|s| vec![s.value, s.count.to_string(), format!("{:.2}", s.percent)])
            .collect(),
        gradient: Some(1),
    };

    Ok(
        RenderedView::new(Section::GoalsPerCompetition).with(Block::Columns {
            panes: vec![
                Pane::column(2, vec![Block::Histogram(chart)]),
                Pane::column(
                    1,
                    vec![Block::heading("Competition Breakdown"), Block::Table(breakdown)],
                ),
            ],
        }),
    )
}

fn goals_per_season(table: &GoalTable) -> Result<RenderedView> {
    let chart = stacked(table, Field::Season, Field::Club, "Goals per Season")?;
    Ok(RenderedView::new(Section::GoalsPerSeason).with(Block::Histogram(chart)))
}

fn goals_per_club(table: &GoalTable) -> Result<RenderedView> {
    let by_season = stacked(table, Field::Club, Field::Season, "Goals per Club - Season")?;
    let by_competition = stacked(
        table,
        Field::Club,
        Field::Competition,
        "Goals per Club - Competition",
    )?;
    Ok(RenderedView::new(Section::GoalsPerClub)
        .with(Block::Histogram(by_season))
        .with(Block::Histogram(by_competition)))
}

fn goals_per_playing_position(table: &GoalTable) -> Result<RenderedView> {
    let chart = stacked(
        table,
        Field::PlayingPosition,
        Field::Club,
        "Goals per Playing Position",
    )?;
    Ok(RenderedView::new(Section::GoalsPerPlayingPosition).with(Block::Histogram(chart)))
}

fn goals_per_game_minute(table: &GoalTable) -> Result<RenderedView> {
    let minutes = derive_minutes(table.column(Field::Minute)?);
    let bins = derive_bins(&minutes);
    let clubs = table.column(Field::Club)?;

    let labels: Vec<&str> = MinuteBin::ALL.iter().map(|b| b.label()).collect();
    let data = CrossTab::build_with_categories(
        &labels,
        bins.iter().map(|b| b.map(MinuteBin::label)),
        clubs.values(),
    );
    let excluded = bins.iter().filter(|b| b.is_none()).count();

    let mut view = RenderedView::new(Section::GoalsPerGameMinute).with(Block::Histogram(
        StackedHistogram {
            title: "Goals per Game Minute".to_string(),
            x_label: "Minute_Bin".to_string(),
            color_label: Field::Club.header().to_string(),
            data,
        },
    ));
    if excluded > 0 {
        view = view.with(Block::note(format!(
            "{excluded} goal(s) at minute 120 or later fall outside every bucket and are not shown"
        )));
    }
    Ok(view)
}

fn goals_per_type(table: &GoalTable) -> Result<RenderedView> {
    let chart = stacked(table, Field::Type, Field::Club, "Goals per Type")?;
    Ok(RenderedView::new(Section::GoalsPerType).with(Block::Histogram(chart)))
}

fn scoreline_after_goals(table: &GoalTable) -> Result<RenderedView> {
    let chart = ordered_counts(
        table,
        Field::AtScore,
        "Top 20 Scorelines after Scoring",
        |counts| counts.top_n(TOP_SCORELINES),
    )?;
    Ok(RenderedView::new(Section::ScorelineAfterGoals).with(Block::Bars(chart)))
}

fn opponents(table: &GoalTable) -> Result<RenderedView> {
    let chart = ordered_counts(table, Field::Opponent, "Goals per Opponent", |counts| {
        counts.top_n(TOP_OPPONENTS)
    })?;
    Ok(RenderedView::new(Section::Opponents).with(Block::Bars(chart)))
}

fn favorite_opponents(table: &GoalTable) -> Result<RenderedView> {
    let chart = ordered_counts(table, Field::Opponent, "Favorite Opponents", |counts| {
        counts.above(FAVORITE_OPPONENT_THRESHOLD)
    })?;
    let mut view = RenderedView::new(Section::FavoriteOpponents).with(Block::Bars(chart));
    if view.bar_charts().iter().all(|c| c.bars.is_empty()) {
        view = view.with(Block::note(format!(
            "No opponent has conceded more than {FAVORITE_OPPONENT_THRESHOLD} goals"
        )));
    }
    Ok(view)
}

fn assists(table: &GoalTable) -> Result<RenderedView> {
    let chart = ordered_counts(table, Field::GoalAssist, "Top 10 Assists", |counts| {
        counts.top_n(TOP_ASSISTS)
    })?;
    Ok(RenderedView::new(Section::Assists).with(Block::Bars(chart)))
}

fn goals_per_venue(table: &GoalTable) -> Result<RenderedView> {
    let chart = ordered_counts(table, Field::Venue, "Goals per Venue", |counts| counts.clone())?;
    Ok(RenderedView::new(Section::GoalsPerVenue).with(Block::Bars(chart)))
}

fn stacked(table: &GoalTable, x: Field, color: Field, title: &str) -> Result<StackedHistogram> {
    let data = CrossTab::of(table.column(x)?, table.column(color)?);
    Ok(StackedHistogram {
        title: title.to_string(),
        x_label: x.header().to_string(),
        color_label: color.header().to_string(),
        data,
    })
}

/// Pick values from the column's frequencies, keep only rows holding them,
/// and count those rows in the picked order.
fn ordered_counts<F>(table: &GoalTable, field: Field, title: &str, pick: F) -> Result<CountChart>
where
    F: Fn(&ValueCounts) -> ValueCounts,
{
    let column = table.column(field)?;
    let picked = pick(&ValueCounts::of(column));
    let order = picked.values();
    Ok(CountChart {
        title: title.to_string(),
        x_label: field.header().to_string(),
        bars: count_in_order(column, &order),
    })
}
