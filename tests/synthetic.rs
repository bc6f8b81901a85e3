use cr7_terminal::dataset::{Field, GoalTable};
use cr7_terminal::minute::parse_minute;
use cr7_terminal::sections::{self, Section};
use cr7_terminal::synthetic::generate;

#[test]
fn same_seed_same_goals() {
    let first = generate(200, 7);
    let second = generate(200, 7);
    assert_eq!(first, second);
    assert_ne!(first, generate(200, 8));
}

#[test]
fn generated_goals_are_plausible() {
    let goals = generate(500, 42);
    assert_eq!(goals.len(), 500);
    for goal in &goals {
        assert!(!goal.club.is_empty());
        assert!(!goal.opponent.is_empty());
        assert!(goal.venue == "H" || goal.venue == "A");
        assert_eq!(goal.season.len(), 5);
        let minute = parse_minute(&goal.minute);
        assert!((1..=120).contains(&minute), "minute {}", goal.minute);
    }
    assert!(goals.iter().any(|g| g.goal_assist.is_empty()));
    assert!(goals.iter().any(|g| g.minute.contains('+')));
}

#[test]
fn generated_csv_loads_and_renders() {
    let goals = generate(300, 3);
    let mut writer = csv::Writer::from_writer(Vec::new());
    for goal in &goals {
        writer.serialize(goal).unwrap();
    }
    let bytes = writer.into_inner().unwrap();

    let table = GoalTable::from_reader(bytes.as_slice()).expect("generated csv should load");
    assert_eq!(table.len(), 300);
    assert_eq!(table.headers(), Field::ALL.iter().map(|f| f.header()).collect::<Vec<_>>());
    for section in Section::ALL {
        assert!(sections::render(section, &table).is_ok(), "{}", section.key());
    }
}
