use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::dataset::GoalRecord;

struct Spell {
    club: &'static str,
    first_season: u16,
    last_season: u16,
    league: &'static str,
    cup: &'static str,
    opponents: &'static [&'static str],
}

const SPELLS: [Spell; 5] = [
    Spell {
        club: "Sporting CP",
        first_season: 2002,
        last_season: 2002,
        league: "Liga Portugal",
        cup: "Taca de Portugal Placard",
        opponents: &["Moreirense FC", "Boavista FC", "SC Braga", "CS Maritimo"],
    },
    Spell {
        club: "Manchester United",
        first_season: 2003,
        last_season: 2008,
        league: "Premier League",
        cup: "FA Cup",
        opponents: &[
            "Aston Villa",
            "Tottenham Hotspur",
            "Newcastle United",
            "Portsmouth FC",
            "Fulham FC",
            "Bolton Wanderers",
        ],
    },
    Spell {
        club: "Real Madrid",
        first_season: 2009,
        last_season: 2017,
        league: "LaLiga",
        cup: "Copa del Rey",
        opponents: &[
            "Sevilla FC",
            "Atletico de Madrid",
            "Getafe CF",
            "FC Barcelona",
            "Athletic Bilbao",
            "Celta de Vigo",
            "Real Sociedad",
            "Valencia CF",
            "Malaga CF",
            "Levante UD",
            "Granada CF",
        ],
    },
    Spell {
        club: "Juventus FC",
        first_season: 2018,
        last_season: 2020,
        league: "Serie A",
        cup: "Italy Cup",
        opponents: &["Udinese Calcio", "Cagliari Calcio", "Parma Calcio 1913", "Genoa CFC"],
    },
    Spell {
        club: "Al-Nassr FC",
        first_season: 2022,
        last_season: 2024,
        league: "Saudi Pro League",
        cup: "King Cup",
        opponents: &["Al-Hilal SFC", "Al-Ittihad Club", "Al-Ahli SFC", "Damac FC"],
    },
];

const EUROPEAN_OPPONENTS: [&str; 6] = [
    "Juventus FC",
    "Bayern Munich",
    "Olympique Lyon",
    "Galatasaray",
    "AFC Ajax",
    "Borussia Dortmund",
];

const POSITIONS: [(&str, u32); 4] = [("LW", 45), ("CF", 30), ("RW", 15), ("ST", 10)];
const TYPES: [(&str, u32); 7] = [
    ("Right-footed shot", 50),
    ("Left-footed shot", 15),
    ("Header", 15),
    ("Penalty", 12),
    ("Direct free kick", 5),
    ("Tap-in", 2),
    ("Counter attack goal", 1),
];
const ASSISTERS: [&str; 8] = [
    "Karim Benzema",
    "Marcelo",
    "Mesut Ozil",
    "Gareth Bale",
    "Angel Di Maria",
    "Wayne Rooney",
    "Luka Modric",
    "Sadio Mane",
];
const SCORELINES: [&str; 10] = [
    "1:0", "2:0", "1:1", "2:1", "3:0", "0:1", "3:1", "4:0", "2:2", "1:2",
];

pub fn generate(rows: usize, seed: u64) -> Vec<GoalRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows).map(|_| random_goal(&mut rng)).collect()
}

pub fn random_goal(rng: &mut StdRng) -> GoalRecord {
    let spell = &SPELLS[rng.gen_range(0..SPELLS.len())];
    let start = rng.gen_range(spell.first_season..=spell.last_season);
    let season = format!("{:02}/{:02}", start % 100, (start + 1) % 100);

    let (competition, opponent) = match rng.gen_range(0..10) {
        0..=6 => (spell.league, pick(rng, spell.opponents)),
        7 => (spell.cup, pick(rng, spell.opponents)),
        _ => ("UEFA Champions League", pick(rng, &EUROPEAN_OPPONENTS)),
    };

    GoalRecord {
        season,
        competition: competition.to_string(),
        venue: if rng.gen_bool(0.55) { "H" } else { "A" }.to_string(),
        club: spell.club.to_string(),
        opponent: opponent.to_string(),
        playing_position: weighted(rng, &POSITIONS).to_string(),
        minute: random_minute(rng),
        at_score: pick(rng, &SCORELINES).to_string(),
        goal_type: weighted(rng, &TYPES).to_string(),
        goal_assist: if rng.gen_bool(0.3) {
            String::new()
        } else {
            pick(rng, &ASSISTERS).to_string()
        },
    }
}

fn random_minute(rng: &mut StdRng) -> String {
    match rng.gen_range(0..100) {
        0..=3 => format!("45+{}", rng.gen_range(1..=4)),
        4..=9 => format!("90+{}", rng.gen_range(1..=6)),
        10 => rng.gen_range(91..=120).to_string(),
        _ => rng.gen_range(1..=90).to_string(),
    }
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn weighted<'a>(rng: &mut StdRng, values: &[(&'a str, u32)]) -> &'a str {
    values
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(value, _)| *value)
        .unwrap_or_default()
}
