//! Composite-key eager loading through the public API

use crate::common::{player, player_ids, team, Player, TableScan, Team};
use has_many_merged::sea_query::PostgresQueryBuilder;
use has_many_merged::{
    choose_membership_method, EagerLoadConfig, HasManyMerged, KeyType, MembershipMethod,
    RelationError,
};

fn roster() -> HasManyMerged<Team, Player> {
    HasManyMerged::new(["team_id", "season"], ["id", "season"]).unwrap()
}

#[test]
fn test_round_trip_groups_by_composite_key() {
    let rel = roster();
    let executor = TableScan::new(vec![
        player(10, 5, "a"),
        player(11, 5, "a"),
        player(12, 6, "b"),
    ]);
    let mut teams = vec![team(5, "a"), team(6, "b")];

    rel.get_eager(&mut teams, "players", &executor).unwrap();

    assert_eq!(player_ids(&teams[0], "players"), Some(vec![10, 11]));
    assert_eq!(player_ids(&teams[1], "players"), Some(vec![12]));
    assert_eq!(executor.calls(), 1);
}

#[test]
fn test_duplicate_related_row_is_attached_once() {
    let rel = roster();
    let executor = TableScan::new(vec![
        player(10, 5, "a"),
        player(10, 5, "a"),
        player(12, 6, "b"),
    ]);
    let mut teams = vec![team(5, "a"), team(6, "b")];

    rel.get_eager(&mut teams, "players", &executor).unwrap();

    assert_eq!(player_ids(&teams[0], "players"), Some(vec![10]));
}

#[test]
fn test_unmatched_parent_gets_empty_collection() {
    let rel = roster();
    let executor = TableScan::new(vec![player(10, 5, "a")]);
    let mut teams = vec![team(5, "a"), team(9, "z")];

    rel.get_eager(&mut teams, "players", &executor).unwrap();

    assert_eq!(player_ids(&teams[1], "players"), Some(vec![]));
}

#[test]
fn test_same_team_different_season_does_not_match() {
    let rel = roster();
    let executor = TableScan::new(vec![player(10, 5, "a"), player(11, 5, "b")]);
    let mut teams = vec![team(5, "b")];

    rel.get_eager(&mut teams, "players", &executor).unwrap();

    assert_eq!(player_ids(&teams[0], "players"), Some(vec![11]));
}

#[test]
fn test_parents_sharing_a_key_each_get_the_group() {
    let rel = roster();
    let executor = TableScan::new(vec![player(10, 5, "a")]);
    let mut teams = vec![team(5, "a"), team(5, "a")];

    rel.get_eager(&mut teams, "players", &executor).unwrap();

    assert_eq!(player_ids(&teams[0], "players"), Some(vec![10]));
    assert_eq!(player_ids(&teams[1], "players"), Some(vec![10]));
}

#[test]
fn test_reloading_replaces_previous_results() {
    let rel = roster();
    let mut teams = vec![team(5, "a")];

    rel.get_eager(&mut teams, "players", &TableScan::new(vec![player(10, 5, "a")]))
        .unwrap();
    rel.get_eager(&mut teams, "players", &TableScan::new(vec![]))
        .unwrap();

    assert_eq!(player_ids(&teams[0], "players"), Some(vec![]));
}

#[test]
fn test_missing_foreign_column_aborts_batch() {
    let rel: HasManyMerged<Team, Player> =
        HasManyMerged::new(["team_id", "league"], ["id", "season"]).unwrap();
    let executor = TableScan::new(vec![player(10, 5, "a")]);
    let mut teams = vec![team(5, "a")];

    let err = rel.get_eager(&mut teams, "players", &executor).unwrap_err();

    assert_eq!(
        err,
        RelationError::MissingColumn {
            table: "players".to_string(),
            column: "league".to_string(),
        }
    );
}

#[test]
fn test_get_results_bypasses_slots() {
    let rel = roster();
    let executor = TableScan::new(vec![player(10, 5, "a"), player(12, 6, "b")]);
    let parent = team(5, "a");

    let players = rel.get_results(&parent, &executor).unwrap();

    assert_eq!(players.iter().map(|p| p.id).collect::<Vec<_>>(), vec![10]);
    assert_eq!(player_ids(&parent, "players"), None);
}

#[test]
fn test_eager_query_sql() {
    let rel = roster();
    let query = rel.eager_query(&[team(5, "a"), team(6, "b")]).unwrap();
    let (sql, values) = query.build(PostgresQueryBuilder);

    assert!(sql.starts_with(r#"SELECT * FROM "players" WHERE"#), "{sql}");
    assert!(sql.contains(r#""players"."team_id" = 5"#), "{sql}");
    assert!(sql.contains(r#""players"."team_id" = 6"#), "{sql}");
    assert_eq!(values.0.len(), 2, "only the season values are bound");
}

#[test]
fn test_eager_query_without_fast_path_binds_everything() {
    let rel = roster().with_config(EagerLoadConfig {
        integer_fast_path: false,
        ..EagerLoadConfig::default()
    });
    let query = rel.eager_query(&[team(5, "a"), team(6, "b")]).unwrap();
    let (sql, values) = query.build(PostgresQueryBuilder);

    assert!(!sql.contains(r#""players"."team_id" = 5"#), "{sql}");
    assert_eq!(values.0.len(), 4);
}

#[test]
fn test_membership_method_selection() {
    assert_eq!(
        choose_membership_method("id", "id", &KeyType::Integer),
        MembershipMethod::RawIntegerMembership
    );
    assert_eq!(
        choose_membership_method("id", "email", &KeyType::String),
        MembershipMethod::GenericMembership
    );
}

#[test]
fn test_construction_fails_fast_on_column_mismatch() {
    let err = HasManyMerged::<Team, Player>::new(["team_id"], ["id", "season"]).unwrap_err();
    assert_eq!(err, RelationError::KeyColumnCountMismatch { local: 2, foreign: 1 });
}
