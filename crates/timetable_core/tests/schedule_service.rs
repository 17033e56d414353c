use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use timetable_core::db::open_db_in_memory;
use timetable_core::{
    GenerateOutcome, RepoError, ScheduleConfig, ScheduleService, ScheduleServiceError,
    SqliteScheduleRepository, TeacherMap, EMPTY_CELL,
};

fn total_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM timetable;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn no_class_selected_leaves_store_untouched() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO timetable VALUES ('Class 12', 'Monday', 1, 'Math', 'Mr. Smith');",
        [],
    )
    .unwrap();
    let config = ScheduleConfig::standard();

    let outcome = {
        let repo = SqliteScheduleRepository::try_new(&mut conn).unwrap();
        let mut service = ScheduleService::new(repo, &config);
        service
            .generate_for_class(None, &mut StdRng::seed_from_u64(1))
            .unwrap()
    };

    assert_eq!(outcome, GenerateOutcome::NoClassSelected);
    assert_eq!(total_rows(&conn), 1);
}

#[test]
fn generate_persists_and_renders_full_grid() {
    let mut conn = open_db_in_memory().unwrap();
    let config = ScheduleConfig::standard();
    let repo = SqliteScheduleRepository::try_new(&mut conn).unwrap();
    let mut service = ScheduleService::new(repo, &config);

    let outcome = service
        .generate_for_class(Some("Class 12"), &mut StdRng::seed_from_u64(9))
        .unwrap();

    let GenerateOutcome::Generated { rows_written, view } = outcome else {
        panic!("class was selected");
    };
    assert_eq!(rows_written, 40);
    assert_eq!(view.headers.len(), 6);
    assert_eq!(view.rows.len(), 8);
    assert_eq!(view.filled_slots(), 40);
    for row in &view.rows {
        for cell in &row.cells {
            assert_ne!(cell, EMPTY_CELL);
            let (subject, teacher) = cell.split_once('\n').unwrap();
            assert!(config.teachers()[subject].iter().any(|t| t == teacher));
        }
    }
    assert_eq!(service.view_for_class("Class 12").unwrap(), view);
    assert_eq!(service.stored_classes().unwrap(), vec!["Class 12"]);
}

#[test]
fn single_candidate_configuration_renders_deterministically() {
    let config = ScheduleConfig::try_new(
        vec!["Monday".to_string()],
        2,
        vec!["Math".to_string()],
        TeacherMap::from([("Math".to_string(), vec!["Mr. Smith".to_string()])]),
        vec!["Class 11".to_string()],
    )
    .unwrap();
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteScheduleRepository::try_new(&mut conn).unwrap();
    let mut service = ScheduleService::new(repo, &config);

    for seed in 0..4 {
        let outcome = service
            .generate_for_class(Some("Class 11"), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let GenerateOutcome::Generated { view, .. } = outcome else {
            panic!("class was selected");
        };
        assert_eq!(view.rows[0].cells, vec!["Math\nMr. Smith"]);
        assert_eq!(view.rows[1].cells, vec!["Math\nMr. Smith"]);
    }
}

#[test]
fn unknown_class_renders_all_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let config = ScheduleConfig::standard();
    let repo = SqliteScheduleRepository::try_new(&mut conn).unwrap();
    let service = ScheduleService::new(repo, &config);

    let view = service.view_for_class("Class 10").unwrap();
    assert_eq!(view.filled_slots(), 0);
    assert!(view.rows.iter().flat_map(|row| &row.cells).all(|c| c == EMPTY_CELL));
}

#[test]
fn failed_write_propagates_and_keeps_previous_schedule() {
    let mut conn = open_db_in_memory().unwrap();
    let config = ScheduleConfig::standard();

    let before = {
        let repo = SqliteScheduleRepository::try_new(&mut conn).unwrap();
        let mut service = ScheduleService::new(repo, &config);
        service
            .generate_for_class(Some("Class 12"), &mut StdRng::seed_from_u64(1))
            .unwrap();
        service.view_for_class("Class 12").unwrap()
    };

    conn.execute_batch(
        "CREATE TRIGGER reject_timetable_insert BEFORE INSERT ON timetable
         BEGIN
             SELECT RAISE(ABORT, 'disk full');
         END;",
    )
    .unwrap();

    let repo = SqliteScheduleRepository::try_new(&mut conn).unwrap();
    let mut service = ScheduleService::new(repo, &config);
    let err = service
        .generate_for_class(Some("Class 12"), &mut StdRng::seed_from_u64(2))
        .unwrap_err();

    assert!(matches!(err, ScheduleServiceError::Repo(RepoError::Db(_))));
    assert!(err.to_string().contains("disk full"));
    assert_eq!(service.view_for_class("Class 12").unwrap(), before);
}
