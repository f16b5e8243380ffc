use orbit_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, DrawBuffer,
    FixedTimestep, ProtocolLayout,
};
use orbit_engine::systems::render::build_draw_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!`, because wasm-bindgen cannot export generic structs directly.
///
/// One fixed step is `Game::update`, the physics step, then `Game::after_step`.
/// Input queued by the host is handed to the first step of the next frame
/// that runs one, and to no other step.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    draw_buffer: DrawBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            draw_buffer: DrawBuffer::with_capacity(config.max_instances),
            timestep,
            layout,
            config,
            initialized: false,
            frame_counter: 0,
        }
    }

    /// Reseed the game. Only meaningful before `init`.
    pub fn seed(&mut self, seed: u64) {
        if self.initialized {
            log::warn!("seed ignored: game already initialized");
            return;
        }
        self.game.seed(seed);
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_draw_buffer();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: as many fixed steps as the elapsed time allows,
    /// then rebuild the draw list.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.run_step();
        }

        self.rebuild_draw_buffer();
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    /// Run exactly one fixed step, independent of frame time.
    pub fn step(&mut self) {
        if !self.initialized {
            return;
        }
        self.ctx.clear_frame_data();
        self.run_step();
        self.rebuild_draw_buffer();
    }

    fn run_step(&mut self) {
        let input = self.input.take();
        self.game.update(&mut self.ctx, &input);
        self.ctx.step_physics();
        self.game.after_step(&mut self.ctx);
    }

    fn rebuild_draw_buffer(&mut self) {
        build_draw_buffer(self.ctx.scene.iter(), &mut self.draw_buffer);
    }

    // ---- State accessors ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn draw_buffer(&self) -> &DrawBuffer {
        &self.draw_buffer
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.draw_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.draw_buffer.instance_count()
    }

    pub fn outline_split(&self) -> u32 {
        self.draw_buffer.outline_split
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
