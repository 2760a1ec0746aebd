//! Projectile arena and per-frame projectile update.
//!
//! Projectiles live in slots of a preallocated arena. A slot is always in
//! exactly one of three places: the active player shots, the active enemy
//! shots, or the free list. Firing takes a free slot (or grows the arena when
//! none is left) and retiring gives it back; being "active" is pure
//! bookkeeping and says nothing about visibility.

use glam::Vec3;
use log::{debug, info};
use serde::Serialize;

use crate::entity::{Enemy, EntityId, EntityIds, Player};
use crate::game_over::{GameOverLatch, Outcome};
use crate::obstacles::SpatialRegistry;
use crate::presentation::{Presentation, Visual};
use crate::vector_math::normalize_or_zero;
use crate::{Millis, ENEMY_SHOT_DAMAGE, PROJECTILE_SPAWN_OFFSET, PROJECTILE_SPEED};

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Fired by the player; hurts enemies.
    Player,
    /// Fired by an enemy; hurts the player.
    Enemy,
}

/// Index of a slot in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(usize);

/// State of one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Scene identifier, stable for the lifetime of the slot.
    pub entity: EntityId,
    /// Current position.
    pub position: Vec3,
    /// Unit travel direction.
    pub direction: Vec3,
    /// Side that fired it.
    pub side: Side,
    /// Distance from its reference point after which it is retired.
    pub range: f32,
}

/// Describes a shot to fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Side firing.
    pub side: Side,
    /// Point the shot is fired from.
    pub origin: Vec3,
    /// Direction of travel; normalised on firing.
    pub direction: Vec3,
    /// Retirement range.
    pub range: f32,
}

/// Arena of projectile slots with a free list.
#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    free: Vec<SlotIndex>,
    player_shots: Vec<SlotIndex>,
    enemy_shots: Vec<SlotIndex>,
}

impl ProjectilePool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn active_list(&self, side: Side) -> &Vec<SlotIndex> {
        match side {
            Side::Player => &self.player_shots,
            Side::Enemy => &self.enemy_shots,
        }
    }

    fn active_list_mut(&mut self, side: Side) -> &mut Vec<SlotIndex> {
        match side {
            Side::Player => &mut self.player_shots,
            Side::Enemy => &mut self.enemy_shots,
        }
    }

    /// Activates a slot for `shot` and announces it to the scene.
    ///
    /// The projectile appears [`PROJECTILE_SPAWN_OFFSET`] units along its
    /// direction from the origin.
    pub fn fire(
        &mut self,
        shot: Shot,
        ids: &mut EntityIds,
        presentation: &mut dyn Presentation,
    ) -> SlotIndex {
        let direction = normalize_or_zero(shot.direction);
        let position = shot.origin + direction * PROJECTILE_SPAWN_OFFSET;
        let slot = self.free.pop().unwrap_or_else(|| self.grow(ids));
        let mut entity = None;
        if let Some(projectile) = self.slot_mut(slot) {
            projectile.position = position;
            projectile.direction = direction;
            projectile.side = shot.side;
            projectile.range = shot.range;
            entity = Some(projectile.entity);
        }
        self.active_list_mut(shot.side).push(slot);
        if let Some(id) = entity {
            presentation.spawn(id, Visual::Projectile(shot.side), position);
        }
        debug!("{:?} fired from {:?} towards {direction:?}", shot.side, shot.origin);
        slot
    }

    fn grow(&mut self, ids: &mut EntityIds) -> SlotIndex {
        self.slots.push(Projectile {
            entity: ids.allocate(),
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            side: Side::Player,
            range: 0.0,
        });
        SlotIndex(self.slots.len() - 1)
    }

    fn slot_mut(&mut self, slot: SlotIndex) -> Option<&mut Projectile> {
        self.slots.get_mut(slot.0)
    }

    /// Looks up a slot's projectile.
    #[must_use]
    pub fn get(&self, slot: SlotIndex) -> Option<&Projectile> {
        self.slots.get(slot.0)
    }

    /// Active projectiles fired by `side`, oldest first.
    pub fn active(&self, side: Side) -> impl Iterator<Item = &Projectile> + '_ {
        self.active_list(side)
            .iter()
            .filter_map(|slot| self.slots.get(slot.0))
    }

    /// Number of active projectiles fired by `side`.
    #[must_use]
    pub fn active_count(&self, side: Side) -> usize {
        self.active_list(side).len()
    }

    /// Number of slots waiting on the free list.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of slots ever allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Moves the `nth` active projectile of `side` one frame forward and
    /// returns its new state.
    fn advance(&mut self, side: Side, nth: usize) -> Option<Projectile> {
        let slot = *self.active_list(side).get(nth)?;
        let projectile = self.slot_mut(slot)?;
        projectile.position += projectile.direction * PROJECTILE_SPEED;
        Some(*projectile)
    }

    /// Returns the `nth` active projectile of `side` to the free list.
    fn retire(&mut self, side: Side, nth: usize, presentation: &mut dyn Presentation) {
        let list = self.active_list_mut(side);
        if nth >= list.len() {
            return;
        }
        let slot = list.remove(nth);
        if let Some(projectile) = self.get(slot) {
            presentation.despawn(projectile.entity);
        }
        self.free.push(slot);
    }

    /// Checks that every slot sits in exactly one of the active lists or the
    /// free list.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![0_u8; self.slots.len()];
        for slot in self
            .player_shots
            .iter()
            .chain(&self.enemy_shots)
            .chain(&self.free)
        {
            match seen.get_mut(slot.0) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        seen.iter().all(|count| *count == 1)
    }
}

/// Advances player shots and applies hits to enemies.
///
/// Shots are processed newest first. A shot farther than its range from
/// `camera` is retired; otherwise it hits the newest enemy whose box contains
/// it, dealing `damage`. Enemies whose health drops to zero or below are
/// removed. Obstacles do not stop player shots. Returns the removed enemies.
pub fn advance_player_shots(
    pool: &mut ProjectilePool,
    enemies: &mut Vec<Enemy>,
    damage: i32,
    camera: Vec3,
    presentation: &mut dyn Presentation,
) -> Vec<EntityId> {
    let mut killed = Vec::new();
    for nth in (0..pool.active_count(Side::Player)).rev() {
        let Some(shot) = pool.advance(Side::Player, nth) else {
            continue;
        };
        if shot.position.distance(camera) > shot.range {
            pool.retire(Side::Player, nth, presentation);
            continue;
        }
        let Some(target) = enemies
            .iter()
            .rposition(|enemy| enemy.bounds().contains_point(shot.position))
        else {
            continue;
        };
        pool.retire(Side::Player, nth, presentation);
        let died = enemies
            .get_mut(target)
            .is_some_and(|enemy| enemy.take_hit(damage));
        if died {
            let dead = enemies.remove(target);
            presentation.despawn(dead.id);
            info!("enemy {:?} destroyed", dead.id);
            killed.push(dead.id);
        }
    }
    killed
}

/// Advances enemy shots and applies hits to the player.
///
/// Shots are processed newest first. A shot inside any obstacle is retired,
/// then one farther than its range from the player, then one inside the
/// player's box costs [`ENEMY_SHOT_DAMAGE`] health. The run ends with
/// [`Outcome::ShotByEnemy`] when health reaches zero.
pub fn advance_enemy_shots(
    pool: &mut ProjectilePool,
    obstacles: &SpatialRegistry,
    player: &mut Player,
    latch: &mut GameOverLatch,
    now: Millis,
    presentation: &mut dyn Presentation,
) {
    let target = player.bounds();
    for nth in (0..pool.active_count(Side::Enemy)).rev() {
        let Some(shot) = pool.advance(Side::Enemy, nth) else {
            continue;
        };
        if obstacles.contains_point(shot.position)
            || shot.position.distance(player.position) > shot.range
        {
            pool.retire(Side::Enemy, nth, presentation);
            continue;
        }
        if target.contains_point(shot.position) {
            player.health -= ENEMY_SHOT_DAMAGE;
            presentation.show_health(player.health);
            pool.retire(Side::Enemy, nth, presentation);
            debug!("player hit, health now {}", player.health);
            if player.is_dead() {
                latch.trigger(Outcome::ShotByEnemy, now, presentation);
                return;
            }
        }
    }
}
