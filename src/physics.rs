//! Vertical motion for the player.
//!
//! Gravity, jumping and landing are resolved independently of horizontal
//! collision. The floor is flat ground at [`GROUND_LEVEL`] unless the player
//! stands on a building roof, in which case it is the roof height plus half
//! the player's height.

use log::info;

use crate::entity::{JumpState, Player};
use crate::obstacles::{ObstacleId, SpatialRegistry};
use crate::{GRAVITY, GROUNDED_TOLERANCE, GROUND_LEVEL, JUMP_IMPULSE};

/// Surface the player would land on this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    /// Height the player's centre rests at.
    pub height: f32,
    /// The building providing it, if not the ground.
    pub building: Option<ObstacleId>,
}

/// Finds what the player is standing on.
///
/// # Examples
///
/// ```
/// use grovefire::entity::{EntityId, Player};
/// use grovefire::obstacles::SpatialRegistry;
/// use grovefire::physics::support_for;
///
/// let player = Player::new(EntityId(1), 0.0, 0.0);
/// let support = support_for(&player, &SpatialRegistry::new());
/// assert_eq!(support.height, grovefire::GROUND_LEVEL);
/// assert!(support.building.is_none());
/// ```
#[must_use]
pub fn support_for(player: &Player, obstacles: &SpatialRegistry) -> Support {
    let half_height = Player::half_extents().y;
    let building = obstacles.supporting_building(player.position, half_height);
    let height = building
        .and_then(|id| obstacles.get(id))
        .map_or(GROUND_LEVEL, |roof| roof.max.y + half_height);
    Support { height, building }
}

/// Applies one frame of jumping, gravity and landing.
///
/// A jump starts only when `jump_held`, the player is grounded, and their
/// centre is within [`GROUNDED_TOLERANCE`] of `floor`. Falling below `floor`
/// snaps the player onto it and clears vertical velocity.
pub fn apply_vertical(player: &mut Player, floor: f32, jump_held: bool) {
    let standing = (player.position.y - floor).abs() < GROUNDED_TOLERANCE;
    if jump_held && player.jump == JumpState::Grounded && standing {
        player.vertical_velocity = JUMP_IMPULSE;
        player.jump = JumpState::Airborne;
    }

    player.vertical_velocity -= GRAVITY;
    player.position.y += player.vertical_velocity;

    if player.position.y < floor {
        player.position.y = floor;
        player.vertical_velocity = 0.0;
        player.jump = JumpState::Grounded;
    }
}

/// Lifts the player onto the roof of the nearest building in reach.
///
/// Returns the building climbed, or `None` when no building footprint is
/// close enough.
pub fn climb_nearest_building(player: &mut Player, obstacles: &SpatialRegistry) -> Option<ObstacleId> {
    let (id, roof) = obstacles.nearest_building_in_reach(player.position)?;
    player.position.y = roof.max.y + Player::half_extents().y;
    info!("climbed building {} to height {}", id.index, player.position.y);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aabb::Aabb;
    use crate::entity::EntityId;
    use crate::obstacles::ObstacleKind;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rstest::rstest;

    fn grounded_player() -> Player {
        Player::new(EntityId(1), 0.0, 0.0)
    }

    #[rstest]
    fn gravity_keeps_a_standing_player_on_the_ground() {
        let mut player = grounded_player();
        apply_vertical(&mut player, GROUND_LEVEL, false);
        assert_relative_eq!(player.position.y, GROUND_LEVEL);
        assert_relative_eq!(player.vertical_velocity, 0.0);
        assert_eq!(player.jump, JumpState::Grounded);
    }

    #[rstest]
    fn jump_rises_then_lands() {
        let mut player = grounded_player();
        apply_vertical(&mut player, GROUND_LEVEL, true);
        assert_relative_eq!(player.position.y, GROUND_LEVEL + JUMP_IMPULSE - GRAVITY, epsilon = 1e-6);
        assert_eq!(player.jump, JumpState::Airborne);

        let mut frames = 1;
        while player.jump == JumpState::Airborne && frames < 200 {
            // Holding jump mid-air must not add a second impulse.
            apply_vertical(&mut player, GROUND_LEVEL, true);
            frames += 1;
        }
        assert_eq!(player.jump, JumpState::Grounded);
        assert_relative_eq!(player.position.y, GROUND_LEVEL);
        assert!(frames > 40, "jump ended after {frames} frames");
    }

    #[rstest]
    fn roof_becomes_the_floor() {
        let mut obstacles = SpatialRegistry::new();
        obstacles.push(
            ObstacleKind::Building,
            Aabb::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 30.0, 5.0)),
        );
        let mut player = grounded_player();
        assert!(support_for(&player, &obstacles).building.is_none());

        let climbed = climb_nearest_building(&mut player, &obstacles);
        assert!(climbed.is_some());
        let support = support_for(&player, &obstacles);
        assert_eq!(support.building, climbed);
        assert_relative_eq!(support.height, 31.0);

        apply_vertical(&mut player, support.height, false);
        assert_relative_eq!(player.position.y, 31.0);
    }
}
