//! Horizontal movement resolution.
//!
//! A candidate displacement is tested by translating the mover's box and
//! scanning trees, buildings, walls and, for the player, every live enemy. The
//! first hit rejects the whole displacement; there is no per-axis sliding.

use glam::Vec3;
use log::debug;

use crate::aabb::Aabb;
use crate::entity::{Enemy, EntityId, Player};
use crate::input::MovementKeys;
use crate::obstacles::{ObstacleId, SpatialRegistry};
use crate::vector_math::{flatten, normalize_or_zero};
use crate::PLAYER_MOVE_SPEED;

/// Result of resolving one player displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The displacement was applied.
    Moved,
    /// A static obstacle rejected the displacement.
    Blocked(ObstacleId),
    /// The translated box touched an enemy: the move is rejected and the run
    /// must end.
    EnemyContact(EntityId),
}

/// Returns the first obstacle hit by `bounds` moved by `displacement`.
///
/// `supporting` names the building the mover stands on, which never blocks.
/// `None` means the move is free.
#[must_use]
pub fn first_obstacle_hit(
    obstacles: &SpatialRegistry,
    bounds: &Aabb,
    displacement: Vec3,
    supporting: Option<ObstacleId>,
) -> Option<ObstacleId> {
    obstacles.first_blocking(&bounds.translated(displacement), supporting)
}

/// Whether `bounds` can move by `displacement` without touching an obstacle.
#[must_use]
pub fn is_free(obstacles: &SpatialRegistry, bounds: &Aabb, displacement: Vec3) -> bool {
    first_obstacle_hit(obstacles, bounds, displacement, None).is_none()
}

/// Converts held movement keys into a horizontal displacement.
///
/// Forward follows the camera's `look` direction flattened onto the ground;
/// strafing follows `Y × forward`, which points to the player's left.
#[must_use]
pub fn player_intent(keys: MovementKeys, look: Vec3) -> Vec3 {
    let forward = normalize_or_zero(flatten(look));
    let left = normalize_or_zero(Vec3::Y.cross(forward));
    let mut intent = Vec3::ZERO;
    if keys.forward {
        intent += forward * PLAYER_MOVE_SPEED;
    }
    if keys.backward {
        intent -= forward * PLAYER_MOVE_SPEED;
    }
    if keys.left {
        intent += left * PLAYER_MOVE_SPEED;
    }
    if keys.right {
        intent -= left * PLAYER_MOVE_SPEED;
    }
    intent
}

/// Applies `displacement` to the player unless something is in the way.
///
/// Obstacles are tested before enemies, so a move blocked by a wall never
/// reports enemy contact.
pub fn resolve_player_move(
    player: &mut Player,
    obstacles: &SpatialRegistry,
    enemies: &[Enemy],
    displacement: Vec3,
    supporting: Option<ObstacleId>,
) -> MoveOutcome {
    let bounds = player.bounds();
    if let Some(obstacle) = first_obstacle_hit(obstacles, &bounds, displacement, supporting) {
        debug!("player move {displacement:?} blocked by {obstacle:?}");
        return MoveOutcome::Blocked(obstacle);
    }
    let moved = bounds.translated(displacement);
    if let Some(enemy) = enemies.iter().find(|enemy| enemy.bounds().intersects(&moved)) {
        return MoveOutcome::EnemyContact(enemy.id);
    }
    player.position += displacement;
    MoveOutcome::Moved
}
