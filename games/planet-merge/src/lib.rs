use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod boundary;
pub mod config;
pub mod events;
pub mod game;
pub mod gravity;
pub mod launch;
pub mod merge;
pub mod tiers;

pub use config::{ArenaConfig, ConfigError};
pub use game::{GameStatus, PlanetMergeGame};
pub use tiers::{Tier, TierError, TierTable};

orbit_web::export_game!(PlanetMergeGame, "planet-merge");

/// UI snapshot as JSON.
#[wasm_bindgen]
pub fn game_status() -> String {
    with_runner(|r| match serde_json::to_string(&r.game().status()) {
        Ok(json) => json,
        Err(err) => {
            log::error!("status serialization failed: {}", err);
            String::from("{}")
        }
    })
}
