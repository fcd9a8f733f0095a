//! Fixture models and an in-memory executor

use has_many_merged::sea_query::SelectStatement;
use has_many_merged::{
    impl_attributes, LoadedRelations, ModelTrait, RelationError, RelationExecutor, RelationSlots,
};
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub team_id: Option<i64>,
    pub season: String,
    pub name: String,
}

impl_attributes!(Player { id, team_id, season, name });

impl ModelTrait for Player {
    fn table_name() -> &'static str {
        "players"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
}

impl_attributes!(Fixture { id, home_team_id, away_team_id });

impl ModelTrait for Fixture {
    fn table_name() -> &'static str {
        "fixtures"
    }
}

#[derive(Debug, Clone, Default)]
pub struct Team {
    pub id: Option<i64>,
    pub season: String,
    pub players: LoadedRelations<Player>,
    pub fixtures: LoadedRelations<Fixture>,
}

impl_attributes!(Team { id, season });

impl ModelTrait for Team {
    fn table_name() -> &'static str {
        "teams"
    }
}

impl RelationSlots<Player> for Team {
    fn set_relation(&mut self, relation: &str, models: Vec<Player>) {
        self.players.set(relation, models);
    }

    fn relation(&self, relation: &str) -> Option<&[Player]> {
        self.players.get(relation)
    }
}

impl RelationSlots<Fixture> for Team {
    fn set_relation(&mut self, relation: &str, models: Vec<Fixture>) {
        self.fixtures.set(relation, models);
    }

    fn relation(&self, relation: &str) -> Option<&[Fixture]> {
        self.fixtures.get(relation)
    }
}

pub fn team(id: i64, season: &str) -> Team {
    Team {
        id: Some(id),
        season: season.to_string(),
        ..Team::default()
    }
}

pub fn player(id: i64, team_id: i64, season: &str) -> Player {
    Player {
        id,
        team_id: Some(team_id),
        season: season.to_string(),
        name: format!("player-{id}"),
    }
}

pub fn fixture(id: i64, home_team_id: i64, away_team_id: i64) -> Fixture {
    Fixture {
        id,
        home_team_id,
        away_team_id,
    }
}

/// Returns every stored row for any query, like a table scan without `WHERE`
pub struct TableScan<R> {
    rows: Vec<R>,
    calls: Cell<usize>,
}

impl<R> TableScan<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<R: Clone> RelationExecutor<R> for TableScan<R> {
    fn fetch_all(&self, _query: &SelectStatement) -> Result<Vec<R>, RelationError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.rows.clone())
    }
}

pub fn player_ids<P: RelationSlots<Player>>(parent: &P, relation: &str) -> Option<Vec<i64>> {
    parent
        .relation(relation)
        .map(|players| players.iter().map(|p| p.id).collect())
}
