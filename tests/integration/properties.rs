//! Randomized checks of grouping, completeness and deduplication

use crate::common::{player, player_ids, team, Player, Team};
use has_many_merged::relation::key_selector::{extract_foreign_key_tuple, extract_local_key_value};
use has_many_merged::{HasManyMerged, RelationMatcher};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const SEASONS: [&str; 3] = ["a", "b", "c"];

/// A player's key is derived from its id so duplicated rows never collide
fn random_player(rng: &mut StdRng) -> Player {
    let id: i64 = rng.gen_range(0..40);
    player(id, id % 5, SEASONS[(id / 5) as usize % SEASONS.len()])
}

fn random_team(rng: &mut StdRng) -> Team {
    team(rng.gen_range(0..6), SEASONS[rng.gen_range(0..SEASONS.len())])
}

fn batch(seed: u64) -> (Vec<Team>, Vec<Player>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let teams = (0..rng.gen_range(0..12)).map(|_| random_team(&mut rng)).collect();
    let players = (0..rng.gen_range(0..60)).map(|_| random_player(&mut rng)).collect();
    (teams, players)
}

#[test]
fn test_every_record_lands_in_exactly_its_own_entry() {
    let matcher: RelationMatcher<Team, Player> = RelationMatcher::single(
        |t: &Team| extract_local_key_value(t, &["id", "season"]),
        |p: &Player| extract_foreign_key_tuple(p, &["team_id", "season"]),
    );

    for seed in 0..50 {
        let (_, players) = batch(seed);
        let dictionary = matcher.build_dictionary(players.clone()).unwrap();

        assert_eq!(dictionary.total_records(), players.len(), "seed {seed}");
        for (key, group) in dictionary.iter() {
            for p in group {
                let own = extract_foreign_key_tuple(p, &["team_id", "season"]).unwrap();
                assert_eq!(&own, key, "seed {seed}");
            }
        }
    }
}

#[test]
fn test_every_parent_ends_with_expected_unique_group() {
    let rel: HasManyMerged<Team, Player> =
        HasManyMerged::new(["team_id", "season"], ["id", "season"]).unwrap();

    for seed in 0..50 {
        let (mut teams, players) = batch(seed);
        rel.init_relation(&mut teams, "players");
        rel.match_models(&mut teams, players.clone(), "players").unwrap();

        for t in &teams {
            let mut seen = HashSet::new();
            let expected: Vec<i64> = players
                .iter()
                .filter(|p| p.team_id == t.id && p.season == t.season)
                .filter(|p| seen.insert(p.id))
                .map(|p| p.id)
                .collect();
            assert_eq!(player_ids(t, "players"), Some(expected), "seed {seed}");
        }
    }
}
