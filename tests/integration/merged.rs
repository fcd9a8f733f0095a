//! Merged relations: several foreign columns referencing one parent key

use crate::common::{fixture, team, Fixture, TableScan, Team};
use has_many_merged::sea_query::PostgresQueryBuilder;
use has_many_merged::{HasManyMerged, KeyMode, RelationSlots};

fn fixtures() -> HasManyMerged<Team, Fixture> {
    HasManyMerged::merged(["home_team_id", "away_team_id"], "id").unwrap()
}

fn fixture_ids(team: &Team) -> Vec<i64> {
    RelationSlots::<Fixture>::relation(team, "fixtures")
        .unwrap_or_default()
        .iter()
        .map(|f| f.id)
        .collect()
}

#[test]
fn test_fixture_belongs_to_both_teams() {
    let rel = fixtures();
    assert_eq!(rel.mode(), KeyMode::Merged);

    let executor = TableScan::new(vec![fixture(100, 1, 2), fixture(101, 2, 3), fixture(102, 3, 1)]);
    let mut teams = vec![team(1, "a"), team(2, "a"), team(4, "a")];

    rel.get_eager(&mut teams, "fixtures", &executor).unwrap();

    assert_eq!(fixture_ids(&teams[0]), vec![100, 102]);
    assert_eq!(fixture_ids(&teams[1]), vec![100, 101]);
    assert_eq!(RelationSlots::<Fixture>::relation(&teams[2], "fixtures"), Some(&[][..]));
}

#[test]
fn test_self_referencing_fixture_is_attached_once() {
    let rel = fixtures();
    let executor = TableScan::new(vec![fixture(100, 1, 1)]);
    let mut teams = vec![team(1, "a")];

    rel.get_eager(&mut teams, "fixtures", &executor).unwrap();

    assert_eq!(fixture_ids(&teams[0]), vec![100]);
}

#[test]
fn test_merged_eager_query_sql() {
    let rel = fixtures();
    let query = rel.eager_query(&[team(1, "a"), team(2, "a")]).unwrap();
    let (sql, values) = query.build(PostgresQueryBuilder);

    assert!(sql.contains(r#""fixtures"."home_team_id" IN (1, 2)"#), "{sql}");
    assert!(sql.contains(r#""fixtures"."away_team_id" IN (1, 2)"#), "{sql}");
    assert!(sql.contains(" OR "), "{sql}");
    assert!(values.0.is_empty());
}

#[test]
fn test_merged_qualified_names() {
    let rel = fixtures();
    assert_eq!(rel.qualified_parent_key_names(), vec!["teams.id"]);
    assert_eq!(
        rel.qualified_foreign_key_names(),
        vec!["fixtures.home_team_id", "fixtures.away_team_id"]
    );
}
