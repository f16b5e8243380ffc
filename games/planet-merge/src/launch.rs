//! Drag-and-release launching.
//!
//! The controller only tracks state and answers with [`LaunchCommand`]s;
//! the game executes them against the physics world.

use glam::Vec2;
use orbit_engine::EntityId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchPhase {
    /// No launchable planet.
    Idle,
    /// A static planet waits at the staging point.
    Aiming { body: EntityId },
    /// The player holds the planet; `anchor` is where the drag began.
    Dragging { body: EntityId, anchor: Vec2 },
    /// Released; boundary checks stay off until the timer runs out.
    InFlight { launched: EntityId, remaining_ms: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchCommand {
    /// Follow the pointer while dragging.
    MovePending { body: EntityId, to: Vec2 },
    /// Make `body` dynamic at `at` and push it with `impulse` (gameplay units).
    Launch { body: EntityId, impulse: Vec2, at: Vec2 },
    /// The flight window closed; stage a new planet.
    Rearm,
}

#[derive(Debug, Clone)]
pub struct LaunchController {
    phase: LaunchPhase,
    impulse_scale: f32,
    cooldown_ms: f32,
}

impl LaunchController {
    pub fn new(impulse_scale: f32, cooldown_ms: f32) -> Self {
        Self {
            phase: LaunchPhase::Idle,
            impulse_scale,
            cooldown_ms,
        }
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    /// Hand over a freshly staged planet.
    pub fn arm(&mut self, body: EntityId) {
        if !matches!(self.phase, LaunchPhase::Idle) {
            log::warn!("launch: arming {:?} while {:?}", body, self.phase);
        }
        self.phase = LaunchPhase::Aiming { body };
    }

    /// The planet the player may grab or is holding.
    pub fn pending_body(&self) -> Option<EntityId> {
        match self.phase {
            LaunchPhase::Aiming { body } | LaunchPhase::Dragging { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn drag_anchor(&self) -> Option<Vec2> {
        match self.phase {
            LaunchPhase::Dragging { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, LaunchPhase::Dragging { .. })
    }

    /// True from release until the cooldown elapses.
    pub fn in_flight(&self) -> bool {
        matches!(self.phase, LaunchPhase::InFlight { .. })
    }

    /// Start a drag when the press lands on the waiting planet.
    pub fn pointer_down(&mut self, pointer: Vec2, body_pos: Vec2, body_radius: f32) -> bool {
        let LaunchPhase::Aiming { body } = self.phase else {
            return false;
        };
        if pointer.distance(body_pos) > body_radius {
            return false;
        }
        self.phase = LaunchPhase::Dragging {
            body,
            anchor: pointer,
        };
        true
    }

    pub fn pointer_move(&mut self, pointer: Vec2) -> Option<LaunchCommand> {
        match self.phase {
            LaunchPhase::Dragging { body, .. } => Some(LaunchCommand::MovePending { body, to: pointer }),
            _ => None,
        }
    }

    /// Release: the impulse points from the release point back to the anchor.
    pub fn pointer_up(&mut self, release: Vec2) -> Option<LaunchCommand> {
        let LaunchPhase::Dragging { body, anchor } = self.phase else {
            return None;
        };
        self.phase = LaunchPhase::InFlight {
            launched: body,
            remaining_ms: self.cooldown_ms,
        };
        Some(LaunchCommand::Launch {
            body,
            impulse: (anchor - release) * self.impulse_scale,
            at: release,
        })
    }

    /// Advance the flight timer.
    pub fn tick(&mut self, dt_ms: f32) -> Option<LaunchCommand> {
        let LaunchPhase::InFlight { launched, remaining_ms } = self.phase else {
            return None;
        };
        let remaining_ms = remaining_ms - dt_ms;
        if remaining_ms > 0.0 {
            self.phase = LaunchPhase::InFlight { launched, remaining_ms };
            return None;
        }
        self.phase = LaunchPhase::Idle;
        Some(LaunchCommand::Rearm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGING: Vec2 = Vec2::new(200.0, 300.0);
    const BODY: EntityId = EntityId(3);

    fn armed() -> LaunchController {
        let mut launch = LaunchController::new(0.0005, 2500.0);
        launch.arm(BODY);
        launch
    }

    #[test]
    fn drag_and_release_scenario() {
        let mut launch = armed();
        assert!(launch.pointer_down(STAGING, STAGING, 12.0));
        assert_eq!(launch.drag_anchor(), Some(STAGING));

        let release = Vec2::new(250.0, 320.0);
        assert_eq!(
            launch.pointer_move(release),
            Some(LaunchCommand::MovePending { body: BODY, to: release })
        );

        match launch.pointer_up(release) {
            Some(LaunchCommand::Launch { body, impulse, at }) => {
                assert_eq!(body, BODY);
                assert_eq!(at, release);
                let expected = Vec2::new(-50.0, -20.0) * 0.0005;
                assert!((impulse - expected).length() < 1e-7, "{:?}", impulse);
            }
            other => panic!("expected launch, got {:?}", other),
        }
        assert!(launch.in_flight());
        assert!(launch.pending_body().is_none());
    }

    #[test]
    fn press_outside_planet_is_ignored() {
        let mut launch = armed();
        assert!(!launch.pointer_down(Vec2::new(220.0, 300.0), STAGING, 12.0));
        assert_eq!(launch.phase(), LaunchPhase::Aiming { body: BODY });
        // Exactly on the rim still grabs.
        assert!(launch.pointer_down(Vec2::new(212.0, 300.0), STAGING, 12.0));
    }

    #[test]
    fn spurious_input_is_a_noop() {
        let mut launch = LaunchController::new(0.0005, 2500.0);
        assert!(launch.pointer_up(STAGING).is_none());
        assert!(launch.pointer_move(STAGING).is_none());
        assert!(!launch.pointer_down(STAGING, STAGING, 12.0));
        assert_eq!(launch.phase(), LaunchPhase::Idle);

        let mut launch = armed();
        assert!(launch.pointer_up(STAGING).is_none());
        assert!(launch.pointer_move(Vec2::ZERO).is_none());
        assert_eq!(launch.phase(), LaunchPhase::Aiming { body: BODY });
    }

    #[test]
    fn launches_exactly_once() {
        let mut launch = armed();
        launch.pointer_down(STAGING, STAGING, 12.0);
        assert!(launch.pointer_up(STAGING).is_some());
        assert!(launch.pointer_up(STAGING).is_none());
        assert!(!launch.pointer_down(STAGING, STAGING, 12.0));
    }

    #[test]
    fn rearm_only_after_cooldown() {
        let mut launch = armed();
        launch.pointer_down(STAGING, STAGING, 12.0);
        launch.pointer_up(STAGING);

        assert!(launch.tick(1000.0).is_none());
        assert!(launch.tick(1499.0).is_none());
        assert!(launch.in_flight());
        assert_eq!(launch.tick(1.0), Some(LaunchCommand::Rearm));
        assert_eq!(launch.phase(), LaunchPhase::Idle);
        assert!(launch.tick(5000.0).is_none());

        launch.arm(EntityId(9));
        assert_eq!(launch.pending_body(), Some(EntityId(9)));
    }

    #[test]
    fn tick_outside_flight_does_nothing() {
        let mut launch = armed();
        assert!(launch.tick(10_000.0).is_none());
        assert_eq!(launch.phase(), LaunchPhase::Aiming { body: BODY });
    }
}
