//! Integration tests for composite-key eager loading
//!
//! Test relationships:
//! - Team has_many Players through `(team_id, season)` → `(id, season)` (composite)
//! - Team has_many Fixtures through `home_team_id` / `away_team_id` → `id` (merged)

mod common;
mod eager_loading;
mod merged;
mod properties;
