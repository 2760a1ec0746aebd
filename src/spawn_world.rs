//! Procedural world layout.
//!
//! A [`WorldLayout`] is plain data: obstacle boxes, enemy spawn points and
//! pickups. [`generate`] fills one from a [`WorldConfig`] and an RNG;
//! tests build layouts by hand instead. Turning a layout into live entities
//! is the job of [`crate::simulation::Simulation::from_layout`].

use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec3;
use log::info;
use rand::Rng;

use crate::aabb::Aabb;
use crate::config::WorldConfig;
use crate::obstacles::{ObstacleKind, SpatialRegistry};
use crate::pickups::PickupKind;
use crate::weapon::Weapon;
use crate::{GOLD_TARGET, GROUND_LEVEL};

const TRUNK_SIZE: Vec3 = Vec3::new(1.0, 5.0, 1.0);
const BUILDING_SPAN: Range<f32> = 10.0..50.0;
const BUILDING_HEIGHT: Range<f32> = 20.0..200.0;
const WALL_WIDTH: Range<f32> = 10.0..30.0;
const WALL_HEIGHT: Range<f32> = 2.0..5.0;
const WALL_DEPTH: Range<f32> = 1.0..3.0;
const HEART_BANDS: [Range<f32>; 3] = [50.0..100.0, 100.0..150.0, 150.0..200.0];
const GOLD_BAND: Range<f32> = 250.0..400.0;
const RIFLE_BAND: Range<f32> = 100.0..200.0;
const SHOTGUN_BAND: Range<f32> = 200.0..400.0;
const HEART_HEIGHT: f32 = 1.0;
const ITEM_HEIGHT: f32 = 0.5;

/// Everything needed to populate a run.
#[derive(Debug, Clone, Default)]
pub struct WorldLayout {
    /// Static obstacles.
    pub obstacles: SpatialRegistry,
    /// Player spawn point on the ground plane.
    pub player_start: Vec3,
    /// Enemy spawn points.
    pub enemies: Vec<Vec3>,
    /// Pickups with their positions, in spawn order.
    pub pickups: Vec<(PickupKind, Vec3)>,
}

/// Box of a building or wall standing on the ground, centred on `(x, z)`.
#[must_use]
pub fn grounded_box(x: f32, z: f32, size: Vec3) -> Aabb {
    let half = size / 2.0;
    Aabb::new(
        Vec3::new(x - half.x, 0.0, z - half.z),
        Vec3::new(x + half.x, size.y, z + half.z),
    )
}

fn ground_point<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> (f32, f32) {
    (
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
    )
}

/// Point at a random bearing and a distance drawn from `band` around
/// `centre`, raised to `height`.
fn ring_point<R: Rng + ?Sized>(rng: &mut R, centre: Vec3, band: Range<f32>, height: f32) -> Vec3 {
    let distance = rng.gen_range(band);
    let bearing = rng.gen_range(0.0..TAU);
    Vec3::new(
        centre.x + distance * bearing.cos(),
        height,
        centre.z + distance * bearing.sin(),
    )
}

/// Generates a world following `config`.
///
/// Draw order is trees, buildings, walls, enemies, hearts, gold, weapons, so
/// a seed always reproduces the same world.
pub fn generate<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> WorldLayout {
    let half_extent = config.half_extent();
    let mut obstacles = SpatialRegistry::new();

    for _ in 0..config.trees {
        let (x, z) = ground_point(rng, half_extent);
        obstacles.push(ObstacleKind::Tree, grounded_box(x, z, TRUNK_SIZE));
    }
    for _ in 0..config.buildings {
        let (x, z) = ground_point(rng, half_extent);
        let size = Vec3::new(
            rng.gen_range(BUILDING_SPAN),
            rng.gen_range(BUILDING_HEIGHT),
            rng.gen_range(BUILDING_SPAN),
        );
        obstacles.push(ObstacleKind::Building, grounded_box(x, z, size));
    }
    for _ in 0..config.walls {
        let (x, z) = ground_point(rng, half_extent);
        let size = Vec3::new(
            rng.gen_range(WALL_WIDTH),
            rng.gen_range(WALL_HEIGHT),
            rng.gen_range(WALL_DEPTH),
        );
        obstacles.push(ObstacleKind::Wall, grounded_box(x, z, size));
    }

    let enemies = (0..config.enemies)
        .map(|_| {
            let (x, z) = ground_point(rng, half_extent);
            Vec3::new(x, GROUND_LEVEL, z)
        })
        .collect();

    let player_start = Vec3::new(0.0, GROUND_LEVEL, 0.0);
    let mut pickups = Vec::new();
    for band in HEART_BANDS {
        pickups.push((
            PickupKind::heart(),
            ring_point(rng, player_start, band, HEART_HEIGHT),
        ));
    }
    for _ in 0..GOLD_TARGET {
        pickups.push((
            PickupKind::Gold,
            ring_point(rng, player_start, GOLD_BAND, ITEM_HEIGHT),
        ));
    }
    pickups.push((
        PickupKind::Weapon(Weapon::Rifle),
        ring_point(rng, player_start, RIFLE_BAND, ITEM_HEIGHT),
    ));
    pickups.push((
        PickupKind::Weapon(Weapon::Shotgun),
        ring_point(rng, player_start, SHOTGUN_BAND, ITEM_HEIGHT),
    ));

    info!(
        "generated world: {} obstacles, {} enemies, {} pickups (seed {})",
        obstacles.len(),
        config.enemies,
        pickups.len(),
        config.seed
    );
    WorldLayout {
        obstacles,
        player_start,
        enemies,
        pickups,
    }
}
