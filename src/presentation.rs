//! Boundary between the simulation and whatever draws it.
//!
//! The simulation never touches meshes, widgets or windows. It announces
//! scene membership, positions, HUD values and the terminal overlay through
//! [`Presentation`]; a renderer, a test double or [`PresentationQueue`]
//! decides what to do with them.

use glam::Vec3;
use serde::Serialize;

use crate::aabb::Aabb;
use crate::entity::EntityId;
use crate::obstacles::ObstacleKind;
use crate::pickups::PickupKind;
use crate::projectiles::Side;
use crate::weapon::Weapon;

/// What an entity looks like, as far as the simulation knows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Visual {
    /// The player's body.
    Player,
    /// An enemy cube.
    Enemy,
    /// A projectile fired by `Side`.
    Projectile(Side),
    /// A static obstacle with its bounds.
    Obstacle {
        /// Category of the obstacle.
        kind: ObstacleKind,
        /// World-space box to dress.
        bounds: Aabb,
    },
    /// A collectible item.
    Pickup(PickupKind),
}

/// Services the simulation expects from the presentation layer.
pub trait Presentation {
    /// Adds an entity's visual to the scene.
    fn spawn(&mut self, entity: EntityId, visual: Visual, position: Vec3);
    /// Removes an entity's visual. Removing an absent entity is a no-op.
    fn despawn(&mut self, entity: EntityId);
    /// Moves an entity's visual.
    fn sync_position(&mut self, entity: EntityId, position: Vec3);
    /// Moves the first-person camera.
    fn sync_camera(&mut self, position: Vec3);
    /// Updates the life counter.
    fn show_health(&mut self, health: i32);
    /// Updates the gold counter.
    fn show_gold(&mut self, collected: u32, target: u32);
    /// Updates the weapon label.
    fn show_weapon(&mut self, weapon: Weapon);
    /// Narrows (`true`) or restores (`false`) the field of view.
    fn set_aiming(&mut self, aiming: bool);
    /// Shows the end-of-run overlay.
    fn show_game_over(&mut self, message: &str);
    /// The restart delay elapsed; the host should start a fresh run.
    fn request_restart(&mut self);
}

/// A single call recorded by [`PresentationQueue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PresentationEvent {
    /// See [`Presentation::spawn`].
    Spawn {
        /// Entity being added.
        entity: EntityId,
        /// Its look.
        visual: Visual,
        /// Initial position.
        position: Vec3,
    },
    /// See [`Presentation::despawn`].
    Despawn(EntityId),
    /// See [`Presentation::sync_position`].
    Position(EntityId, Vec3),
    /// See [`Presentation::sync_camera`].
    Camera(Vec3),
    /// HUD text `"Life: N"`.
    Health(String),
    /// HUD text `"Gold: N/M"`.
    Gold(String),
    /// HUD weapon label.
    WeaponLabel(String),
    /// See [`Presentation::set_aiming`].
    Aiming(bool),
    /// Overlay text `"Game Over! ..."`.
    GameOver(String),
    /// See [`Presentation::request_restart`].
    Restart,
}

/// Buffers presentation calls for a consumer to drain later.
#[derive(Debug, Clone, Default)]
pub struct PresentationQueue {
    events: Vec<PresentationEvent>,
}

impl PresentationQueue {
    /// Removes and yields every buffered event in call order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, PresentationEvent> {
        self.events.drain(..)
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Buffered events without draining them.
    #[must_use]
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }
}

impl Presentation for PresentationQueue {
    fn spawn(&mut self, entity: EntityId, visual: Visual, position: Vec3) {
        self.events.push(PresentationEvent::Spawn {
            entity,
            visual,
            position,
        });
    }

    fn despawn(&mut self, entity: EntityId) {
        self.events.push(PresentationEvent::Despawn(entity));
    }

    fn sync_position(&mut self, entity: EntityId, position: Vec3) {
        self.events.push(PresentationEvent::Position(entity, position));
    }

    fn sync_camera(&mut self, position: Vec3) {
        self.events.push(PresentationEvent::Camera(position));
    }

    fn show_health(&mut self, health: i32) {
        self.events
            .push(PresentationEvent::Health(format!("Life: {health}")));
    }

    fn show_gold(&mut self, collected: u32, target: u32) {
        self.events
            .push(PresentationEvent::Gold(format!("Gold: {collected}/{target}")));
    }

    fn show_weapon(&mut self, weapon: Weapon) {
        self.events
            .push(PresentationEvent::WeaponLabel(weapon.hud_label()));
    }

    fn set_aiming(&mut self, aiming: bool) {
        self.events.push(PresentationEvent::Aiming(aiming));
    }

    fn show_game_over(&mut self, message: &str) {
        self.events
            .push(PresentationEvent::GameOver(format!("Game Over! {message}")));
    }

    fn request_restart(&mut self) {
        self.events.push(PresentationEvent::Restart);
    }
}
