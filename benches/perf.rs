use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cr7_terminal::aggregate::{CrossTab, ValueCounts};
use cr7_terminal::dataset::{Field, GoalRecord, GoalTable};
use cr7_terminal::minute::{derive_bins, derive_minutes, parse_minute};
use cr7_terminal::sections::{self, Section};

const CLUBS: [&str; 5] = [
    "Sporting CP",
    "Manchester United",
    "Real Madrid",
    "Juventus FC",
    "Al-Nassr FC",
];
const OPPONENTS: [&str; 8] = [
    "Sevilla FC",
    "Getafe CF",
    "FC Barcelona",
    "Aston Villa",
    "Udinese Calcio",
    "Al-Hilal SFC",
    "Celta de Vigo",
    "Bayern Munich",
];

fn sample_table(rows: usize) -> GoalTable {
    let records: Vec<GoalRecord> = (0..rows)
        .map(|i| GoalRecord {
            season: format!("{:02}/{:02}", 2 + i % 21, 3 + i % 21),
            competition: if i % 4 == 0 { "UEFA Champions League" } else { "LaLiga" }.to_string(),
            venue: if i % 2 == 0 { "H" } else { "A" }.to_string(),
            club: CLUBS[i % CLUBS.len()].to_string(),
            opponent: OPPONENTS[i % OPPONENTS.len()].to_string(),
            playing_position: if i % 3 == 0 { "CF" } else { "LW" }.to_string(),
            minute: if i % 17 == 0 {
                format!("90+{}", i % 5)
            } else {
                (i % 118).to_string()
            },
            at_score: format!("{}:{}", i % 4, i % 3),
            goal_type: if i % 5 == 0 { "Penalty" } else { "Right-footed shot" }.to_string(),
            goal_assist: if i % 3 == 0 {
                String::new()
            } else {
                format!("Player {}", i % 40)
            },
        })
        .collect();
    GoalTable::from_records(&records)
}

fn bench_render_all_sections(c: &mut Criterion) {
    let table = sample_table(900);
    c.bench_function("render_all_sections", |b| {
        b.iter(|| {
            for section in Section::ALL {
                let view = sections::render(section, black_box(&table)).unwrap();
                black_box(view.blocks.len());
            }
        })
    });
}

fn bench_crosstab(c: &mut Criterion) {
    let table = sample_table(900);
    let season = table.column(Field::Season).unwrap();
    let club = table.column(Field::Club).unwrap();
    c.bench_function("crosstab_season_club", |b| {
        b.iter(|| {
            let tab = CrossTab::of(black_box(season), black_box(club));
            black_box(tab.total());
        })
    });
}

fn bench_value_counts(c: &mut Criterion) {
    let table = sample_table(900);
    let opponent = table.column(Field::Opponent).unwrap();
    c.bench_function("value_counts_opponent", |b| {
        b.iter(|| {
            let counts = ValueCounts::of(black_box(opponent)).top_n(20);
            black_box(counts.len());
        })
    });
}

fn bench_minute_bins(c: &mut Criterion) {
    let table = sample_table(900);
    let minute = table.column(Field::Minute).unwrap();
    c.bench_function("minute_bins", |b| {
        b.iter(|| {
            let bins = derive_bins(&derive_minutes(black_box(minute)));
            black_box(bins.len());
        })
    });
    c.bench_function("parse_minute", |b| {
        b.iter(|| black_box(parse_minute(black_box("90+4"))))
    });
}

criterion_group!(
    perf,
    bench_render_all_sections,
    bench_crosstab,
    bench_value_counts,
    bench_minute_bins
);
criterion_main!(perf);
