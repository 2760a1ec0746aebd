//! Collectibles: weapons, hearts and gold coins.
//!
//! Every registry follows the same proximity-trigger pattern. Once per frame
//! each registry is scanned newest entry first; an entry closer to the player
//! than its kind's radius is removed, despawned, and its effect applied once.

use glam::Vec3;
use log::info;
use serde::Serialize;

use crate::entity::{EntityId, Player};
use crate::game_over::{GameOverLatch, Outcome};
use crate::presentation::{Presentation, Visual};
use crate::weapon::Weapon;
use crate::{
    Millis, GOLD_PICKUP_RADIUS, GOLD_TARGET, HEART_HEAL, HEART_PICKUP_RADIUS, WEAPON_PICKUP_RADIUS,
};

/// What a pickup does when collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PickupKind {
    /// Replaces the player's weapon.
    Weapon(Weapon),
    /// Restores `heal` health.
    Heart {
        /// Health restored.
        heal: i32,
    },
    /// Counts towards the win.
    Gold,
}

impl PickupKind {
    /// A heart restoring the standard amount.
    #[must_use]
    pub const fn heart() -> Self {
        Self::Heart { heal: HEART_HEAL }
    }

    /// Distance below which the player collects it.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Weapon(_) => WEAPON_PICKUP_RADIUS,
            Self::Heart { .. } => HEART_PICKUP_RADIUS,
            Self::Gold => GOLD_PICKUP_RADIUS,
        }
    }
}

/// A collectible lying in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pickup {
    /// Scene identifier.
    pub id: EntityId,
    /// Effect on collection.
    pub kind: PickupKind,
    /// World position.
    pub position: Vec3,
}

/// Pickups of one category.
#[derive(Debug, Clone, Default)]
pub struct PickupRegistry {
    entries: Vec<Pickup>,
}

impl PickupRegistry {
    /// Adds a pickup.
    pub fn push(&mut self, pickup: Pickup) {
        self.entries.push(pickup);
    }

    /// Pickups still lying in the world, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Pickup] {
        &self.entries
    }

    /// Number of uncollected pickups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every pickup has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns every pickup within reach of `point`, newest
    /// first.
    pub fn take_within(&mut self, point: Vec3) -> Vec<Pickup> {
        let mut taken = Vec::new();
        for index in (0..self.entries.len()).rev() {
            let in_reach = self
                .entries
                .get(index)
                .is_some_and(|pickup| point.distance(pickup.position) < pickup.kind.radius());
            if in_reach {
                taken.push(self.entries.remove(index));
            }
        }
        taken
    }
}

/// Gold collected so far against the winning target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoldTally {
    /// Coins collected.
    pub collected: u32,
    /// Coins needed to win.
    pub target: u32,
}

impl Default for GoldTally {
    fn default() -> Self {
        Self {
            collected: 0,
            target: GOLD_TARGET,
        }
    }
}

impl GoldTally {
    /// Whether the target has been reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.collected >= self.target
    }
}

/// The three pickup registries, scanned hearts, gold, then weapons.
#[derive(Debug, Clone, Default)]
pub struct Pickups {
    /// Health restoring hearts.
    pub hearts: PickupRegistry,
    /// Gold coins.
    pub coins: PickupRegistry,
    /// Weapon crates.
    pub weapons: PickupRegistry,
}

impl Pickups {
    /// Files `pickup` in the registry matching its kind.
    pub fn insert(&mut self, pickup: Pickup) {
        match pickup.kind {
            PickupKind::Heart { .. } => self.hearts.push(pickup),
            PickupKind::Gold => self.coins.push(pickup),
            PickupKind::Weapon(_) => self.weapons.push(pickup),
        }
    }

    /// Every uncollected pickup.
    pub fn iter(&self) -> impl Iterator<Item = &Pickup> + '_ {
        self.hearts
            .entries()
            .iter()
            .chain(self.coins.entries())
            .chain(self.weapons.entries())
    }

    /// Announces every pickup to the scene.
    pub fn spawn_all(&self, presentation: &mut dyn Presentation) {
        for pickup in self.iter() {
            presentation.spawn(pickup.id, Visual::Pickup(pickup.kind), pickup.position);
        }
    }

    /// Collects everything within reach of the player.
    pub fn collect(
        &mut self,
        player: &mut Player,
        gold: &mut GoldTally,
        latch: &mut GameOverLatch,
        now: Millis,
        presentation: &mut dyn Presentation,
    ) {
        let reach = player.position;
        for registry in [&mut self.hearts, &mut self.coins, &mut self.weapons] {
            for pickup in registry.take_within(reach) {
                presentation.despawn(pickup.id);
                apply(pickup.kind, player, gold, latch, now, presentation);
            }
        }
    }
}

fn apply(
    kind: PickupKind,
    player: &mut Player,
    gold: &mut GoldTally,
    latch: &mut GameOverLatch,
    now: Millis,
    presentation: &mut dyn Presentation,
) {
    match kind {
        PickupKind::Heart { heal } => {
            player.health += heal;
            presentation.show_health(player.health);
        }
        PickupKind::Gold => {
            gold.collected += 1;
            presentation.show_gold(gold.collected, gold.target);
            if gold.is_complete() {
                latch.trigger(Outcome::Victory, now, presentation);
            }
        }
        PickupKind::Weapon(weapon) => {
            player.weapon = weapon;
            presentation.show_weapon(weapon);
            info!("picked up {weapon}");
        }
    }
}
