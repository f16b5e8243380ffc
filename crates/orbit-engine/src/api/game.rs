use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::input::queue::InputQueue;
use crate::core::physics::{
    PhysicsWorld, BodyDesc, ColliderMaterial, CollisionPair,
};
use crate::components::entity::Entity;
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of draw instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Uniform gravity vector. Default: zero.
    /// Games with their own force fields leave this at zero.
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 512,
            max_events: 32,
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
///
/// Per fixed step the runner calls `update`, then `EngineContext::step_physics`,
/// then `after_step`.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Runs before integration: handle input, apply forces, check rules.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Runs after integration. Collision events of the step are in `ctx.collisions()`.
    fn after_step(&mut self, _ctx: &mut EngineContext) {}

    /// Whether the game reached a terminal state.
    fn is_finished(&self) -> bool {
        false
    }

    /// Reseed the game's random source. Called by the host before init.
    fn seed(&mut self, _seed: u64) {}
}

/// Mutable access to engine state, passed to the `Game` hooks.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    pub physics: PhysicsWorld,
    next_id: u32,
    max_events: usize,
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context sized and tuned from the game's configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        Self {
            scene: Scene::with_capacity(config.max_instances),
            events: Vec::with_capacity(config.max_events),
            physics,
            next_id: 1,
            max_events: config.max_events,
            collision_events: Vec::new(),
        }
    }

    /// Generate the next unique entity ID. IDs increase monotonically.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    /// Events beyond the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full, dropping event kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data (events, collision events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.collision_events.clear();
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_pos(desc.position).with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    /// Apply a force to an entity's physics body for the next step.
    pub fn apply_force(&mut self, id: EntityId, force: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_force(&body, force);
        }
    }

    /// Apply an instantaneous impulse to an entity's physics body.
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_impulse(&body, impulse);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport an entity and its body.
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(entity) = self.scene.get_mut(id) {
            entity.pos = pos;
            if let Some(body) = &entity.body {
                self.physics.set_position(body, pos);
            }
        }
    }

    /// Current entity position, `None` if the entity is gone.
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.scene.get(id).map(|e| e.pos)
    }

    /// Switch an entity's body between fixed and dynamic.
    pub fn set_static(&mut self, id: EntityId, is_static: bool) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_static(&body, is_static);
        }
    }

    /// Whether the entity's body is fixed. Entities without a body report `true`.
    pub fn is_static(&self, id: EntityId) -> bool {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.is_static(body))
            .unwrap_or(true)
    }

    /// Mass of the entity's body, zero if it has none.
    pub fn mass(&self, id: EntityId) -> f32 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.mass(body))
            .unwrap_or(0.0)
    }

    /// Get collision events from the most recent physics step.
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Ongoing solid contacts of an entity's body, as started pairs.
    pub fn contacts_with(&self, id: EntityId) -> Vec<CollisionPair> {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.contacts_with(body))
            .unwrap_or_default()
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner between `Game::update()` and `Game::after_step()`.
    pub fn step_physics(&mut self) {
        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        // Sync Rapier body positions back to entity positions
        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
