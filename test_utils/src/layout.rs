//! Builder for hand-made world layouts.

use glam::Vec3;
use grovefire::obstacles::ObstacleKind;
use grovefire::pickups::PickupKind;
use grovefire::spawn_world::{grounded_box, WorldLayout};
use grovefire::{Aabb, Simulation, Weapon, GROUND_LEVEL};

/// Fluent constructor for [`WorldLayout`]s with the player at the origin.
///
/// # Examples
/// ```
/// use test_utils::LayoutBuilder;
/// let layout = LayoutBuilder::new().enemy_at(0.0, -50.0).build();
/// assert_eq!(layout.enemies.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    layout: WorldLayout,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBuilder {
    /// Empty world, player standing at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout: WorldLayout {
                player_start: Vec3::new(0.0, GROUND_LEVEL, 0.0),
                ..WorldLayout::default()
            },
        }
    }

    /// Moves the player's spawn point on the ground plane.
    #[must_use]
    pub fn player_at(mut self, x: f32, z: f32) -> Self {
        self.layout.player_start = Vec3::new(x, GROUND_LEVEL, z);
        self
    }

    /// Adds an obstacle with explicit bounds.
    #[must_use]
    pub fn obstacle(mut self, kind: ObstacleKind, bounds: Aabb) -> Self {
        self.layout.obstacles.push(kind, bounds);
        self
    }

    /// Adds a tree trunk centred on `(x, z)`.
    #[must_use]
    pub fn tree_at(self, x: f32, z: f32) -> Self {
        self.obstacle(ObstacleKind::Tree, grounded_box(x, z, Vec3::new(1.0, 5.0, 1.0)))
    }

    /// Adds a building centred on `(x, z)` with the given size.
    #[must_use]
    pub fn building_at(self, x: f32, z: f32, size: Vec3) -> Self {
        self.obstacle(ObstacleKind::Building, grounded_box(x, z, size))
    }

    /// Adds a wall centred on `(x, z)` with the given size.
    #[must_use]
    pub fn wall_at(self, x: f32, z: f32, size: Vec3) -> Self {
        self.obstacle(ObstacleKind::Wall, grounded_box(x, z, size))
    }

    /// Adds an enemy standing at `(x, z)`.
    #[must_use]
    pub fn enemy_at(mut self, x: f32, z: f32) -> Self {
        self.layout.enemies.push(Vec3::new(x, GROUND_LEVEL, z));
        self
    }

    /// Adds a pickup at `position`.
    #[must_use]
    pub fn pickup(mut self, kind: PickupKind, position: Vec3) -> Self {
        self.layout.pickups.push((kind, position));
        self
    }

    /// Adds a gold coin at `(x, 0.5, z)`.
    #[must_use]
    pub fn coin_at(self, x: f32, z: f32) -> Self {
        self.pickup(PickupKind::Gold, Vec3::new(x, 0.5, z))
    }

    /// Adds a weapon crate at `(x, 0.5, z)`.
    #[must_use]
    pub fn weapon_at(self, weapon: Weapon, x: f32, z: f32) -> Self {
        self.pickup(PickupKind::Weapon(weapon), Vec3::new(x, 0.5, z))
    }

    /// Finishes the layout.
    #[must_use]
    pub fn build(self) -> WorldLayout {
        self.layout
    }

    /// Starts a simulation on the layout at time zero.
    #[must_use]
    pub fn simulate(self, seed: u64) -> Simulation {
        Simulation::from_layout(self.layout, seed, 0)
    }
}
