#![cfg_attr(docsrs, feature(doc_cfg))]
//! Simulation core of a first-person arena shooter.
//!
//! The player roams a procedurally generated field of trees, buildings and
//! walls, hunted by enemies that chase and shoot. Collecting every gold coin
//! wins; being caught or shot down loses. The crate runs the game rules one
//! frame at a time and reports what should be drawn through
//! [`presentation::Presentation`], so it can be driven headless, from tests,
//! or by the Bevy [`SimulationPlugin`].
pub mod aabb;
pub mod behaviour;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod game_over;
pub mod input;
pub mod logging;
pub mod movement;
pub mod obstacles;
pub mod physics;
pub mod pickups;
pub mod plugin;
pub mod presentation;
pub mod projectiles;
pub mod simulation;
pub mod spawn_world;
pub mod vector_math;
pub mod weapon;

pub use constants::*;

// Re-export commonly used items
pub use aabb::Aabb;
pub use config::WorldConfig;
pub use entity::{Enemy, EntityId, Player};
pub use error::ConfigError;
pub use game_over::{GameOverLatch, Outcome};
pub use input::{FrameInput, InputEvent, MovementKeys};
pub use logging::init as init_logging;
pub use obstacles::{ObstacleId, ObstacleKind, SpatialRegistry};
pub use plugin::{RunEnded, SimulationPlugin, SimulationState};
pub use presentation::{Presentation, PresentationEvent, PresentationQueue, Visual};
pub use projectiles::{ProjectilePool, Side};
pub use simulation::{FrameStatus, Simulation};
pub use spawn_world::WorldLayout;
pub use weapon::Weapon;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use grovefire::prelude::*;
    //! ```

    pub use crate::FrameInput;
    pub use crate::InputEvent;
    pub use crate::Presentation;
    pub use crate::PresentationQueue;
    pub use crate::Simulation;
    pub use crate::WorldConfig;
    pub use glam::Vec3;
}
