//! Game event kinds sent to the host (`GameEvent.kind`).

use glam::Vec2;
use orbit_engine::GameEvent;

/// a, b = launch force.
pub const LAUNCHED: f32 = 1.0;
/// a = new tier, b, c = position.
pub const MERGED: f32 = 2.0;
/// a = distance of the offending planet from the attractor.
pub const GAME_OVER: f32 = 3.0;
/// a = tier of the newly staged planet.
pub const REARMED: f32 = 4.0;

pub fn launched(impulse: Vec2) -> GameEvent {
    GameEvent::new(LAUNCHED, impulse.x, impulse.y, 0.0)
}

pub fn merged(tier: usize, at: Vec2) -> GameEvent {
    GameEvent::new(MERGED, tier as f32, at.x, at.y)
}

pub fn game_over(distance: f32) -> GameEvent {
    GameEvent::new(GAME_OVER, distance, 0.0, 0.0)
}

pub fn rearmed(tier: usize) -> GameEvent {
    GameEvent::new(REARMED, tier as f32, 0.0, 0.0)
}
