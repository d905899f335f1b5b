//! Headless collision sandbox
//!
//! Spawns a player that walks back and forth between two walls, picking up
//! coin triggers along the way. Coins are removed through the deferred
//! command queue from inside the player's collision handler.
//!
//! Usage: `quad_sandbox [config.toml|config.ron]`

use std::cell::RefCell;
use std::rc::Rc;

use quad_engine::prelude::*;
use thiserror::Error;

/// Ten seconds at the default timestep
const DEFAULT_FRAMES: u64 = 600;

/// Sandbox errors
#[derive(Error, Debug)]
enum SandboxError {
    #[error("Config error: {0}")]
    Config(#[from] quad_engine::core::ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Player collision handler
#[derive(Default)]
struct Collector {
    coins: u32,
    bumps: u32,
}

impl Collidable for Collector {
    fn on_collision(&mut self, ctx: &mut CollisionContext<'_>, other: Entity) -> Result<(), CollisionError> {
        let is_coin = ctx
            .world()
            .collider(other)
            .map_or(false, |collider| collider.is_trigger);

        if is_coin {
            self.coins += 1;
            log::info!("Picked up coin {:?} ({} total)", other, self.coins);
            ctx.defer(SceneCommand::Destroy(other));
        } else {
            self.bumps += 1;
            log::debug!("Overlapping solid {:?}", other);
        }
        Ok(())
    }
}

struct Sandbox {
    player: Option<Entity>,
    collector: Rc<RefCell<Collector>>,
    direction: f32,
    speed: f32,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            player: None,
            collector: Rc::new(RefCell::new(Collector::default())),
            direction: 1.0,
            speed: 6.0,
        }
    }
}

impl Application for Sandbox {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let player = engine.spawn(
            EntityDesc::new(SceneNode::new(1.0, 1.0))
                .with_collider(Collider::boxed())
                .with_handler(self.collector.clone()),
        )?;
        self.player = Some(player);

        for x in [-8.0, 8.0] {
            engine.spawn(EntityDesc::new(SceneNode::new(1.0, 4.0).at(x, 0.0)).with_collider(Collider::boxed()))?;
        }

        for x in [-5.0, -2.5, 2.5, 5.0] {
            engine.spawn(
                EntityDesc::new(SceneNode::new(0.5, 0.5).at(x, 0.0).with_rotation(0.25 * std::f32::consts::PI))
                    .with_collider(Collider::boxed().as_trigger()),
            )?;
        }

        log::info!("Level ready: {}", engine.registry().diagnostics());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let Some(player) = self.player else {
            return Ok(());
        };

        let step = self.direction * self.speed * delta_time;
        if let Some(hit) = engine.move_entity(player, step, 0.0)? {
            log::info!(
                "Blocked by {:?} at toi {:.3}, normal ({:.1}, {:.1}); turning around",
                hit.other(),
                hit.time_of_impact(),
                hit.normal().x,
                hit.normal().y
            );
            self.direction = -self.direction;
        }
        Ok(())
    }

    fn after_step(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        if engine.clock().frame_count() % 60 == 0 {
            log::debug!("{}", engine.registry().diagnostics());
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let collector = self.collector.borrow();
        log::info!(
            "Collected {} coins, {} solid overlaps, {} entities left",
            collector.coins,
            collector.bumps,
            engine.world().len()
        );
    }
}

fn main() -> Result<(), SandboxError> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    if config.max_frames.is_none() {
        config = config.with_max_frames(DEFAULT_FRAMES);
    }
    config.validate()?;

    quad_engine::foundation::logging::init(&config.log_level);
    log::info!("Starting quad sandbox");

    let mut app = Sandbox::new();
    Engine::run(config, &mut app)?;
    Ok(())
}
