//! Combat entities: the player and the enemies hunting them.
//!
//! Boxes are derived from the current position every time they are needed;
//! nothing caches them between frames.

use glam::Vec3;
use serde::Serialize;

use crate::aabb::Aabb;
use crate::weapon::Weapon;
use crate::{
    Millis, CAMERA_HEIGHT, ENEMY_HALF_EXTENT, ENEMY_SHOOT_INTERVAL_MS, ENEMY_START_HEALTH,
    GROUND_LEVEL, PLAYER_HALF_EXTENTS, PLAYER_START_HEALTH,
};

/// Identifier shared with the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u64);

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl EntityId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

/// Hands out fresh [`EntityId`]s.
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next: u64,
}

impl EntityIds {
    /// Returns an identifier never handed out before.
    pub fn allocate(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

/// Whether the player is standing or in the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum JumpState {
    /// On the ground or a roof.
    #[default]
    Grounded,
    /// Jumping or falling.
    Airborne,
}

#[derive(Debug, Clone, Serialize)]
/// The player-controlled character.
pub struct Player {
    /// Scene identifier.
    pub id: EntityId,
    /// Centre of the player's box.
    pub position: Vec3,
    /// Vertical speed in units per frame.
    pub vertical_velocity: f32,
    /// Remaining health; the run ends at zero or below.
    pub health: i32,
    /// Gun currently held.
    pub weapon: Weapon,
    /// Ground contact.
    pub jump: JumpState,
}

impl Player {
    /// Creates a player standing on flat ground at `x`/`z`.
    #[must_use]
    pub const fn new(id: EntityId, x: f32, z: f32) -> Self {
        Self {
            id,
            position: Vec3::new(x, GROUND_LEVEL, z),
            vertical_velocity: 0.0,
            health: PLAYER_START_HEALTH,
            weapon: Weapon::Default,
            jump: JumpState::Grounded,
        }
    }

    /// Half extents of the player's box.
    #[must_use]
    pub const fn half_extents() -> Vec3 {
        Vec3::from_array(PLAYER_HALF_EXTENTS)
    }

    /// Box around the current position.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_centre(self.position, Self::half_extents())
    }

    /// Where the first-person camera sits.
    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        self.position + Vec3::Y * CAMERA_HEIGHT
    }

    /// Whether the player has run out of health.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Debug, Clone, Serialize)]
/// A wandering enemy that chases and shoots at the player.
pub struct Enemy {
    /// Scene identifier.
    pub id: EntityId,
    /// Centre of the enemy cube.
    pub position: Vec3,
    /// Remaining health; the enemy is removed at zero or below.
    pub health: i32,
    /// When the enemy last fired.
    pub last_shot_ms: Millis,
    /// Minimum time between shots.
    pub shoot_interval_ms: Millis,
}

impl Enemy {
    /// Spawns an enemy at `position` whose shot clock starts at `now`.
    #[must_use]
    pub const fn new(id: EntityId, position: Vec3, now: Millis) -> Self {
        Self {
            id,
            position,
            health: ENEMY_START_HEALTH,
            last_shot_ms: now,
            shoot_interval_ms: ENEMY_SHOOT_INTERVAL_MS,
        }
    }

    /// Box around the current position.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_centre(self.position, Vec3::splat(ENEMY_HALF_EXTENT))
    }

    /// Subtracts `damage` and reports whether the enemy died.
    pub fn take_hit(&mut self, damage: i32) -> bool {
        self.health -= damage.max(0);
        self.is_dead()
    }

    /// Whether the enemy has run out of health.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Whether the shoot interval has strictly elapsed at `now`.
    #[must_use]
    pub const fn shot_due(&self, now: Millis) -> bool {
        now.saturating_sub(self.last_shot_ms) > self.shoot_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_repeats() {
        let mut ids = EntityIds::default();
        let first = ids.allocate();
        let second = ids.allocate();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn player_box_spans_two_units_of_height() {
        let player = Player::new(EntityId(1), 0.0, 0.0);
        let bounds = player.bounds();
        assert_eq!(bounds.min, Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(bounds.max, Vec3::new(0.5, 2.0, 0.5));
        assert_eq!(player.camera_position(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn enemy_dies_when_health_crosses_zero() {
        let mut enemy = Enemy::new(EntityId(2), Vec3::new(0.0, 1.0, 0.0), 0);
        assert!(!enemy.take_hit(9));
        assert_eq!(enemy.health, 1);
        assert!(enemy.take_hit(2));
        assert_eq!(enemy.health, -1);
    }

    #[test]
    fn shot_clock_needs_strictly_more_than_the_interval() {
        let enemy = Enemy::new(EntityId(3), Vec3::ZERO, 1_000);
        assert!(!enemy.shot_due(3_000));
        assert!(enemy.shot_due(3_001));
    }
}
