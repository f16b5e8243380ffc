use glam::Vec2;
use orbit_engine::{EngineContext, EntityId};

/// Pulls every body toward a fixed point with `G * mass / d²`.
#[derive(Debug, Clone, Copy)]
pub struct CentralGravityField {
    center: Vec2,
    strength: f32,
    force_scale: f32,
}

impl CentralGravityField {
    pub fn new(center: Vec2, strength: f32, force_scale: f32) -> Self {
        Self {
            center,
            strength,
            force_scale,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Force on a body at `position`, in gameplay units.
    /// `None` when the body sits on the centre.
    pub fn force_on(&self, position: Vec2, mass: f32) -> Option<Vec2> {
        let delta = self.center - position;
        let dist_sq = delta.length_squared();
        if !dist_sq.is_finite() || dist_sq <= 0.0 {
            return None;
        }
        let magnitude = self.strength * mass / dist_sq;
        Some(delta / dist_sq.sqrt() * magnitude)
    }

    /// Apply the field to every body for the coming step.
    /// Returns how many bodies received a force.
    pub fn apply(&self, ctx: &mut EngineContext) -> usize {
        let snapshot: Vec<(EntityId, Vec2, f32)> = ctx
            .scene
            .iter()
            .filter(|e| e.body.is_some())
            .map(|e| (e.id, e.pos, ctx.mass(e.id)))
            .collect();

        let mut applied = 0;
        for (id, pos, mass) in snapshot {
            if let Some(force) = self.force_on(pos, mass) {
                ctx.apply_force(id, force * self.force_scale);
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_engine::{BodyDesc, ColliderDesc, ColliderMaterial, Entity};
    use proptest::prelude::*;

    const CENTER: Vec2 = Vec2::new(700.0, 300.0);

    #[test]
    fn force_points_at_center() {
        let field = CentralGravityField::new(CENTER, 0.3, 1.0);
        let force = field.force_on(Vec2::new(600.0, 300.0), 2.0).unwrap();
        // 0.3 * 2 / 100² toward +x
        assert!((force.x - 6.0e-5).abs() < 1e-9, "{:?}", force);
        assert!(force.y.abs() < 1e-9);
    }

    #[test]
    fn no_force_at_center() {
        let field = CentralGravityField::new(CENTER, 0.3, 1.0);
        assert!(field.force_on(CENTER, 1.0).is_none());
        assert!(field.force_on(Vec2::new(f32::NAN, 0.0), 1.0).is_none());
    }

    #[test]
    fn apply_accelerates_dynamic_bodies_only() {
        let mut ctx = EngineContext::new();
        let material = ColliderMaterial {
            density: 0.001,
            ..ColliderMaterial::default()
        };

        let anchor = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(anchor),
            BodyDesc::fixed(ColliderDesc::Ball { radius: 30.0 }).with_position(CENTER),
            material,
        );
        let planet = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(planet),
            BodyDesc::dynamic(ColliderDesc::Ball { radius: 12.0 })
                .with_position(Vec2::new(700.0, 150.0)),
            material,
        );

        let field = CentralGravityField::new(CENTER, 0.3, 1.0e6);
        // The attractor sits on the centre and gets no force.
        assert_eq!(field.apply(&mut ctx), 1);
        ctx.step_physics();

        let vel = ctx.velocity(planet);
        assert!(vel.y > 0.0, "planet should fall toward the centre: {:?}", vel);
        assert!(vel.x.abs() < 1e-3);
        assert_eq!(ctx.position(anchor), Some(CENTER));
    }

    proptest! {
        #[test]
        fn magnitude_follows_inverse_square(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            mass in 0.01f32..10.0,
        ) {
            let field = CentralGravityField::new(CENTER, 0.3, 1.0);
            let pos = Vec2::new(x, y);
            let d = pos.distance(CENTER);
            prop_assume!(d > 1.0);

            let force = field.force_on(pos, mass).unwrap();
            let expected = 0.3 * mass / (d * d);
            prop_assert!((force.length() - expected).abs() <= expected * 1e-3);
            // Direction: toward the centre.
            prop_assert!(force.dot(CENTER - pos) > 0.0);
        }
    }
}
