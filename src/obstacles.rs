//! Spatial registry of the static world: tree trunks, building bases and
//! walls.
//!
//! Obstacles are appended during world generation and never move or
//! disappear, so every query is a flat scan in a fixed order: trees, then
//! buildings, then walls.

use glam::Vec3;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::aabb::Aabb;
use crate::vector_math::horizontal_distance;
use crate::{BUILDING_FOOTPRINT_MARGIN, ROOF_TOLERANCE};

/// Category of static obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObstacleKind {
    /// Tree trunk.
    Tree,
    /// Building base. The player can stand on its roof.
    Building,
    /// Low wall.
    Wall,
}

/// Stable handle to an obstacle: its category and position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObstacleId {
    /// Which set the obstacle lives in.
    pub kind: ObstacleKind,
    /// Index inside that set.
    pub index: usize,
}

/// Append-only collection of static obstacle boxes.
#[derive(Debug, Clone, Default)]
pub struct SpatialRegistry {
    trees: Vec<Aabb>,
    buildings: Vec<Aabb>,
    walls: Vec<Aabb>,
}

impl SpatialRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an obstacle and returns its handle.
    pub fn push(&mut self, kind: ObstacleKind, bounds: Aabb) -> ObstacleId {
        let set = match kind {
            ObstacleKind::Tree => &mut self.trees,
            ObstacleKind::Building => &mut self.buildings,
            ObstacleKind::Wall => &mut self.walls,
        };
        set.push(bounds);
        ObstacleId {
            kind,
            index: set.len() - 1,
        }
    }

    /// Looks up an obstacle's box.
    #[must_use]
    pub fn get(&self, id: ObstacleId) -> Option<&Aabb> {
        self.set(id.kind).get(id.index)
    }

    /// Boxes of one category, in insertion order.
    #[must_use]
    pub fn set(&self, kind: ObstacleKind) -> &[Aabb] {
        match kind {
            ObstacleKind::Tree => &self.trees,
            ObstacleKind::Building => &self.buildings,
            ObstacleKind::Wall => &self.walls,
        }
    }

    /// Total number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len() + self.buildings.len() + self.walls.len()
    }

    /// Whether no obstacle has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every obstacle in query order.
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Aabb)> + '_ {
        [ObstacleKind::Tree, ObstacleKind::Building, ObstacleKind::Wall]
            .into_iter()
            .flat_map(move |kind| {
                self.set(kind)
                    .iter()
                    .enumerate()
                    .map(move |(index, bounds)| (ObstacleId { kind, index }, bounds))
            })
    }

    /// Whether `bounds` touches any obstacle.
    #[must_use]
    pub fn intersects(&self, bounds: &Aabb) -> bool {
        self.first_blocking(bounds, None).is_some()
    }

    /// Returns the first obstacle touching `bounds`, skipping `ignored`.
    ///
    /// The movement resolver passes the building the player stands on as
    /// `ignored` so the roof does not block walking across it.
    #[must_use]
    pub fn first_blocking(&self, bounds: &Aabb, ignored: Option<ObstacleId>) -> Option<ObstacleId> {
        self.iter()
            .find(|(id, obstacle)| Some(*id) != ignored && obstacle.intersects(bounds))
            .map(|(id, _)| id)
    }

    /// Whether `point` lies inside any obstacle.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.iter().any(|(_, obstacle)| obstacle.contains_point(point))
    }

    /// Finds the building whose roof `position` is standing on.
    ///
    /// A building supports the player when its footprint, widened by
    /// [`BUILDING_FOOTPRINT_MARGIN`], contains the position and the position
    /// sits within [`ROOF_TOLERANCE`] of the roof-standing height
    /// `max.y + half_height`.
    #[must_use]
    pub fn supporting_building(&self, position: Vec3, half_height: f32) -> Option<ObstacleId> {
        self.buildings
            .iter()
            .position(|roof| {
                roof.footprint_contains(position, BUILDING_FOOTPRINT_MARGIN)
                    && (position.y - (roof.max.y + half_height)).abs() < ROOF_TOLERANCE
            })
            .map(|index| ObstacleId {
                kind: ObstacleKind::Building,
                index,
            })
    }

    /// Finds the building closest to `position` whose widened footprint
    /// contains it.
    #[must_use]
    pub fn nearest_building_in_reach(&self, position: Vec3) -> Option<(ObstacleId, &Aabb)> {
        self.buildings
            .iter()
            .enumerate()
            .filter(|(_, roof)| roof.footprint_contains(position, BUILDING_FOOTPRINT_MARGIN))
            .min_by_key(|(_, roof)| OrderedFloat(horizontal_distance(position, roof.centre())))
            .map(|(index, roof)| {
                (
                    ObstacleId {
                        kind: ObstacleKind::Building,
                        index,
                    },
                    roof,
                )
            })
    }
}
