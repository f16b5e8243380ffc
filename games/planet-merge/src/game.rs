//! Planet merge: fling planets at a central star, fuse equal ones, keep them inside the ring.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use orbit_engine::api::game::GameConfig;
use orbit_engine::api::types::EntityId;
use orbit_engine::components::entity::Entity;
use orbit_engine::input::queue::{InputEvent, InputQueue};
use orbit_engine::{BodyDesc, ColliderDesc, ColliderMaterial, SpriteComponent};
use orbit_engine::{EngineContext, Game};

use crate::bodies::{BodyRegistry, Role};
use crate::boundary::BoundaryMonitor;
use crate::config::{ArenaConfig, ConfigError};
use crate::events;
use crate::gravity::CentralGravityField;
use crate::launch::{LaunchCommand, LaunchController};
use crate::merge::{MergePlan, MergeResolver};
use crate::tiers::{Tier, TierTable};

const FIXED_DT: f32 = 1.0 / 60.0;
const MAX_INSTANCES: usize = 512;
const MAX_EVENTS: usize = 64;

/// Snapshot for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStatus {
    pub drag_anchor: Option<Vec2>,
    pub is_dragging: bool,
    pub is_launch_in_flight: bool,
    pub is_game_over: bool,
    pub planets: usize,
    pub merges: u32,
    pub largest_tier: Option<usize>,
}

pub struct PlanetMergeGame {
    arena: ArenaConfig,
    tiers: TierTable,
    registry: BodyRegistry,
    launch: LaunchController,
    gravity: CentralGravityField,
    boundary: BoundaryMonitor,
    rng: Pcg32,
    /// Planets released this step. Touches they started while staged never
    /// produce a new collision event, so they are checked after the step.
    just_launched: Vec<EntityId>,
    game_over: bool,
    merges: u32,
}

impl PlanetMergeGame {
    pub fn new() -> Self {
        Self::build(ArenaConfig::default(), TierTable::planets())
    }

    /// Game with validated custom tuning.
    pub fn with_config(arena: ArenaConfig) -> Result<Self, ConfigError> {
        arena.validate()?;
        let tiers = arena.tier_table()?;
        Ok(Self::build(arena, tiers))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::with_config(ArenaConfig::from_json(json)?)
    }

    fn build(arena: ArenaConfig, tiers: TierTable) -> Self {
        Self {
            launch: LaunchController::new(arena.impulse_scale, arena.cooldown_ms),
            gravity: CentralGravityField::new(arena.attractor, arena.gravity_constant, arena.force_scale),
            boundary: BoundaryMonitor::new(arena.attractor, arena.boundary_radius),
            rng: Pcg32::seed_from_u64(arena.seed),
            registry: BodyRegistry::new(),
            just_launched: Vec::new(),
            game_over: false,
            merges: 0,
            tiers,
            arena,
        }
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            drag_anchor: self.launch.drag_anchor(),
            is_dragging: self.launch.is_dragging(),
            is_launch_in_flight: self.launch.in_flight(),
            is_game_over: self.game_over,
            planets: self.registry.count(Role::Settled),
            merges: self.merges,
            largest_tier: self.registry.settled().filter_map(|r| r.tier).max(),
        }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn launch(&self) -> &LaunchController {
        &self.launch
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn material(&self) -> ColliderMaterial {
        ColliderMaterial {
            restitution: self.arena.restitution,
            friction: self.arena.friction,
            density: self.arena.density,
        }
    }

    fn spawn_scenery(&mut self, ctx: &mut EngineContext) {
        let center = self.arena.attractor;

        let attractor = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(attractor)
                .with_tag("attractor")
                .with_radius(self.arena.attractor_radius)
                .with_sprite(SpriteComponent::outline().with_role(Role::Attractor.as_f32())),
            BodyDesc::fixed(ColliderDesc::Ball { radius: self.arena.attractor_radius })
                .with_position(center),
            self.material(),
        );
        self.registry.insert(attractor, Role::Attractor, None);

        let ring = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(ring)
                .with_tag("boundary")
                .with_radius(self.arena.boundary_radius)
                .with_sprite(SpriteComponent::outline().with_role(Role::BoundarySensor.as_f32())),
            BodyDesc::fixed(ColliderDesc::Ball { radius: self.arena.boundary_radius })
                .with_position(center)
                .with_sensor(true),
            self.material(),
        );
        self.registry.insert(ring, Role::BoundarySensor, None);
    }

    /// Spawn a planet. Pending planets are fixed until launched.
    fn spawn_planet(&mut self, ctx: &mut EngineContext, tier: &Tier, pos: Vec2, role: Role) -> EntityId {
        let id = ctx.next_id();
        let collider = ColliderDesc::Ball { radius: tier.radius };
        let desc = match role {
            Role::LaunchPending => BodyDesc::fixed(collider),
            _ => BodyDesc::dynamic(collider),
        }
        .with_position(pos)
        .with_gravity_scale(0.0)
        .with_linear_damping(self.arena.linear_damping);

        ctx.spawn_with_body(
            Entity::new(id)
                .with_tag(tier.identity.clone())
                .with_radius(tier.radius)
                .with_sprite(SpriteComponent::textured(tier.index as f32).with_role(role.as_f32())),
            desc,
            self.material(),
        );
        self.registry.insert(id, role, Some(tier.index));
        id
    }

    /// Stage a new launchable planet at the staging point.
    fn stage_planet(&mut self, ctx: &mut EngineContext) {
        let tier = self.tiers.random_spawn_tier(&mut self.rng).clone();
        let id = self.spawn_planet(ctx, &tier, self.arena.staging, Role::LaunchPending);
        self.launch.arm(id);
        ctx.emit_event(events::rearmed(tier.index));
        log::info!("Staged {} ({:?})", tier.identity, id);
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        let pointer = event.position();
        let command = match event {
            InputEvent::PointerDown { .. } => {
                let Some(body) = self.launch.pending_body() else {
                    return;
                };
                let (Some(pos), Some(tier)) = (ctx.position(body), self.registry.tier(body)) else {
                    return;
                };
                let radius = match self.tiers.tier_at(tier) {
                    Ok(t) => t.radius,
                    Err(err) => {
                        log::warn!("Pending planet has no tier: {}", err);
                        return;
                    }
                };
                if !self.launch.pointer_down(pointer, pos, radius) {
                    log::debug!("Press at {:?} missed the planet", pointer);
                }
                None
            }
            InputEvent::PointerMove { .. } => self.launch.pointer_move(pointer),
            InputEvent::PointerUp { .. } => self.launch.pointer_up(pointer),
        };
        if let Some(command) = command {
            self.execute(ctx, command);
        }
    }

    fn execute(&mut self, ctx: &mut EngineContext, command: LaunchCommand) {
        match command {
            LaunchCommand::MovePending { body, to } => ctx.set_position(body, to),
            LaunchCommand::Launch { body, impulse, at } => {
                ctx.set_position(body, at);
                ctx.set_static(body, false);
                self.registry.set_role(body, Role::Settled);
                if let Some(sprite) = ctx.scene.get_mut(body).and_then(|e| e.sprite.as_mut()) {
                    sprite.role = Role::Settled.as_f32();
                }
                let dt = ctx.physics.dt();
                ctx.apply_impulse(body, impulse * self.arena.force_scale * dt);
                self.just_launched.push(body);
                ctx.emit_event(events::launched(impulse));
                log::info!("Launched {:?} with {:?}", body, impulse);
            }
            LaunchCommand::Rearm => {
                if self.game_over {
                    log::info!("Cooldown elapsed after game over; not staging");
                    return;
                }
                self.stage_planet(ctx);
            }
        }
    }

    fn apply_merge(&mut self, ctx: &mut EngineContext, plan: MergePlan) {
        let tier = match self.tiers.tier_at(plan.tier) {
            Ok(tier) => tier.clone(),
            Err(err) => {
                log::warn!("Skipping merge: {}", err);
                return;
            }
        };
        for id in plan.consumed {
            ctx.despawn(id);
            self.registry.remove(id);
        }
        let id = self.spawn_planet(ctx, &tier, plan.at, Role::Settled);
        self.merges += 1;
        ctx.emit_event(events::merged(tier.index, plan.at));
        log::info!("Merged into {} ({:?}) at {:?}", tier.identity, id, plan.at);
    }
}

impl Default for PlanetMergeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PlanetMergeGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            world_width: self.arena.world_width,
            world_height: self.arena.world_height,
            max_instances: MAX_INSTANCES,
            max_events: MAX_EVENTS,
            gravity: Vec2::ZERO,
        }
    }

    fn seed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.spawn_scenery(ctx);
        self.stage_planet(ctx);
        log::info!(
            "Planet merge: {} tiers, ring radius {}",
            self.tiers.len(),
            self.boundary.radius()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if !self.game_over {
            for event in input.iter() {
                self.handle_input(ctx, event);
            }
        }

        let dt_ms = ctx.physics.dt() * 1000.0;
        if let Some(command) = self.launch.tick(dt_ms) {
            self.execute(ctx, command);
        }

        self.gravity.apply(ctx);

        if self.game_over || self.launch.in_flight() {
            return;
        }
        let breach = self.boundary.check(&self.registry, |id| ctx.position(id));
        if let Some(breach) = breach {
            self.game_over = true;
            ctx.emit_event(events::game_over(breach.distance));
            log::info!(
                "Game over: {:?} drifted {:.1} from the star",
                breach.body,
                breach.distance
            );
        }
    }

    fn after_step(&mut self, ctx: &mut EngineContext) {
        let launched = std::mem::take(&mut self.just_launched);
        if self.game_over {
            return;
        }
        let mut pairs = ctx.collisions().to_vec();
        for id in launched {
            pairs.extend(ctx.contacts_with(id));
        }
        let plans = MergeResolver::new(&self.tiers).plan(&pairs, &self.registry, |id| ctx.position(id));
        for plan in plans {
            self.apply_merge(ctx, plan);
        }
    }

    fn is_finished(&self) -> bool {
        self.game_over
    }
}
