use glam::Vec2;
use orbit_engine::EntityId;

use crate::bodies::BodyRegistry;

/// A settled planet found outside the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryBreach {
    pub body: EntityId,
    pub distance: f32,
}

/// Game-over ring around the attractor.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryMonitor {
    center: Vec2,
    radius: f32,
}

impl BoundaryMonitor {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// First settled planet (by id) whose centre lies beyond the ring.
    pub fn check(
        &self,
        registry: &BodyRegistry,
        position_of: impl Fn(EntityId) -> Option<Vec2>,
    ) -> Option<BoundaryBreach> {
        registry.settled().find_map(|record| {
            let distance = position_of(record.id)?.distance(self.center);
            (distance > self.radius).then_some(BoundaryBreach {
                body: record.id,
                distance,
            })
        })
    }
}
