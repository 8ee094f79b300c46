// Integration tests for Skout
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skout::{
    filter, rank, DatasetStore, Error, FeatureVector, LoadError, Player, PlayerId, Predicate,
    Ranker, Schema, Session, SessionConfig, Table,
};
use std::io::Write;

fn xyz_schema() -> Schema {
    Schema {
        version: 1,
        identity: "name".to_string(),
        image: None,
        features: vec!["x".to_string(), "y".to_string(), "z".to_string()],
        categories: vec!["league".to_string()],
        ranges: vec!["age".to_string()],
    }
}

fn xyz_table(rows: &[(&str, [Option<f64>; 3], i64)]) -> Table {
    Table::from_players(
        xyz_schema(),
        rows.iter()
            .enumerate()
            .map(|(i, (name, features, age))| Player {
                id: PlayerId(i as u32),
                name: name.to_string(),
                features: features.to_vec(),
                categories: vec!["Serie A".to_string()],
                ranges: vec![*age],
                image_url: None,
            })
            .collect(),
    )
}

fn random_table(rng: &mut StdRng, size: u32) -> Table {
    let leagues = ["Serie A", "La Liga", "Premier League", "Bundesliga", "Ligue 1"];
    let players = (0..size)
        .map(|i| Player {
            id: PlayerId(i),
            name: format!("player-{i}"),
            features: (0..3)
                .map(|_| {
                    // a few missing cells and exact duplicates to exercise ties
                    match rng.random_range(0..20) {
                        0 => None,
                        1 => Some(50.0),
                        _ => Some(rng.random_range(0.0..100.0)),
                    }
                })
                .collect(),
            categories: vec![leagues[rng.random_range(0..leagues.len())].to_string()],
            ranges: vec![rng.random_range(16..40)],
            image_url: None,
        })
        .collect();
    Table::from_players(xyz_schema(), players)
}

#[test]
fn test_ties_keep_table_order() {
    let table = xyz_table(&[
        ("first", [Some(1.0), Some(0.0), Some(0.0)], 20),
        ("second", [Some(1.0), Some(0.0), Some(0.0)], 21),
        ("orthogonal", [Some(0.0), Some(1.0), Some(0.0)], 22),
    ]);
    let query = FeatureVector::new(vec![1.0, 0.0, 0.0]);

    let outcome = rank(&query, &table, &["x", "y", "z"], 2).unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].name(), "first");
    assert_eq!(outcome.results[1].name(), "second");
    assert_eq!(outcome.results[0].score, 1.0);
    assert_eq!(outcome.results[1].score, 1.0);
}

#[test]
fn test_inclusive_age_range() {
    let table = xyz_table(&[
        ("a", [Some(1.0); 3], 19),
        ("b", [Some(1.0); 3], 20),
        ("c", [Some(1.0); 3], 25),
        ("d", [Some(1.0); 3], 30),
    ]);

    let result = filter(&table, &[Predicate::range("age", 20.0, 25.0)]).unwrap();

    let ages: Vec<i64> = result.iter().map(|p| p.ranges[0]).collect();
    assert_eq!(ages, vec![20, 25]);
}

#[test]
fn test_empty_membership_matches_nothing() {
    let mut rng = StdRng::seed_from_u64(3);
    let table = random_table(&mut rng, 50);

    let result = filter(&table, &[Predicate::membership("league", Vec::<String>::new())]).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_missing_feature_skipped() {
    let table = xyz_table(&[
        ("complete", [Some(1.0), Some(2.0), Some(3.0)], 20),
        ("holey", [Some(1.0), None, Some(3.0)], 21),
        ("other", [Some(3.0), Some(2.0), Some(1.0)], 22),
    ]);
    let query = FeatureVector::new(vec![1.0, 2.0, 3.0]);

    let outcome = Ranker::for_schema(table.schema()).rank(&query, &table, 5).unwrap();

    let names: Vec<_> = outcome.results.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["complete", "other"]);
    assert_eq!(outcome.skipped_identities(), vec!["holey"]);
}

#[test]
fn test_filter_properties_on_random_tables() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10 {
        let table = random_table(&mut rng, 300);
        assert_eq!(filter(&table, &[]).unwrap(), table);

        let lo = rng.random_range(0.0..80.0);
        let predicates = vec![
            Predicate::range("y", lo, lo + 40.0),
            Predicate::membership("league", ["Serie A", "Bundesliga", "Ligue 1"]),
            Predicate::range("age", 18.0, 33.0),
        ];
        let once = filter(&table, &predicates).unwrap();

        assert_eq!(filter(&once, &predicates).unwrap(), once);

        // order-preserving subsequence of the input
        let mut source = table.iter();
        for kept in &once {
            assert!(source.any(|p| p.id == kept.id));
        }
    }
}

#[test]
fn test_rank_properties_on_random_tables() {
    let mut rng = StdRng::seed_from_u64(29);
    let columns = ["x", "y", "z"];
    for _ in 0..10 {
        let table = random_table(&mut rng, 200);
        let query: FeatureVector = (0..3).map(|_| rng.random_range(-50.0..100.0)).collect();
        let k = rng.random_range(0..250);

        let first = rank(&query, &table, &columns, k).unwrap();
        let again = rank(&query, &table, &columns, k).unwrap();
        assert_eq!(first, again);

        let scorable = table.len() - first.skipped.len();
        assert_eq!(first.results.len(), k.min(scorable));
        assert!(first.results.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
        assert!(first.results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(first
            .results
            .windows(2)
            .filter(|w| w[0].score == w[1].score)
            .all(|w| w[0].player.id < w[1].player.id));

        assert!(rank(&query, &table, &columns, 0).unwrap().results.is_empty());
    }
}

#[test]
fn test_identical_vector_scores_one() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let values: Vec<f64> = (0..3).map(|_| rng.random_range(0.1..100.0)).collect();
        let table = xyz_table(&[("twin", [Some(values[0]), Some(values[1]), Some(values[2])], 25)]);
        let outcome = rank(&FeatureVector::new(values), &table, &["x", "y", "z"], 1).unwrap();
        assert!((outcome.results[0].score - 1.0).abs() < 1e-12);
    }
}

const PLAYERS_CSV: &str = "\
full_name,age,league,position,Current Club,height_cm,player_face_url,Shooting,Vision,Possession,Crossing,Dribbling,Interceptions,Tackling,Aerials won,pace
Ada Striker,23,Serie A,Forward,Roma,181,http://img/ada.png,90,40,50,30,80,5,10,60,88
Bea Winger,21,La Liga,Forward,Sevilla,172,,85,45,55,60,85,8,12,30,92
Cy Anchor,29,Serie A,Midfielder,Inter,185,NaN,20,70,85,20,30,80,85,70,60
Dee Sweeper,31,Ligue 1,Defender,Lyon,190,,10,30,70,15,20,90,92,88,55
Eve Gap,25,Serie A,Forward,Napoli,178,,88,,52,33,79,6,11,58,90
";

fn write_dataset(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("players.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(PLAYERS_CSV.as_bytes()).unwrap();
    path
}

#[test]
fn test_session_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        dataset: write_dataset(&dir),
        ..SessionConfig::default()
    };
    let session = Session::open(&config).unwrap();
    assert_eq!(session.table().len(), 5);

    let forwards = session
        .scout(&[
            Predicate::membership("position", ["Forward"]),
            Predicate::range("Shooting", 86.0, 100.0),
        ])
        .unwrap();
    assert_eq!(forwards.names(), vec!["Ada Striker", "Eve Gap"]);

    let report = session.similar("Ada Striker", &[]).unwrap();
    let names: Vec<_> = report.outcome.results.iter().map(|r| r.name()).collect();
    assert_eq!(names[0], "Bea Winger");
    assert!(!names.contains(&"Ada Striker"));
    assert_eq!(report.outcome.skipped_identities(), vec!["Eve Gap"]);
    assert_eq!(report.candidates_count, 4);

    let comparison = session.compare(&["Dee Sweeper", "Cy Anchor"]).unwrap();
    let tackling = comparison
        .leaders
        .iter()
        .find(|l| l.attribute == "Tackling")
        .unwrap();
    assert_eq!(tackling.player, "Dee Sweeper");
    assert_eq!(tackling.value, 92.0);
}

#[test]
fn test_session_domain_helpers() {
    let dir = tempfile::tempdir().unwrap();
    let store = DatasetStore::new(write_dataset(&dir), Schema::default());
    let table = store.load().unwrap();

    assert_eq!(table.range_bounds("age").unwrap(), Some((21.0, 31.0)));
    assert_eq!(table.range_bounds("Vision").unwrap(), Some((30.0, 70.0)));
    assert_eq!(
        table.distinct("league").unwrap(),
        vec!["Serie A", "La Liga", "Ligue 1"]
    );
}

#[test]
fn test_load_failure_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        dataset: dir.path().join("missing.csv"),
        ..SessionConfig::default()
    };
    assert!(matches!(Session::open(&config), Err(LoadError::Io { .. })));
}

#[test]
fn test_unknown_column_fails_call() {
    let table = xyz_table(&[("a", [Some(1.0); 3], 20)]);
    let err = filter(&table, &[Predicate::range("weight", 0.0, 1.0)]).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err, Error::UnknownColumn("weight".to_string()));
}
