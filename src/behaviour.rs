//! Enemy pursuit with obstacle avoidance.
//!
//! Enemies keep no behavioural mode between frames. Each frame an enemy tries
//! the straight line towards the player; when an obstacle is in the way it
//! sweeps a fan of headings either side of that line and takes the free one
//! that ends closest to the player. With the whole fan blocked it tries a
//! small random jitter, and failing that it waits.

use glam::Vec3;
use log::debug;
use ordered_float::OrderedFloat;
use rand::Rng;

use crate::aabb::Aabb;
use crate::entity::{Enemy, EntityIds, Player};
use crate::game_over::{GameOverLatch, Outcome};
use crate::movement::is_free;
use crate::obstacles::SpatialRegistry;
use crate::presentation::Presentation;
use crate::projectiles::{ProjectilePool, Shot, Side};
use crate::vector_math::{horizontal_direction, horizontal_distance, rotate_about_y};
use crate::{
    Millis, AVOIDANCE_MAX_DEGREES, AVOIDANCE_STEP_DEGREES, ENEMY_SHOT_RANGE, ENEMY_SPEED,
};

/// How an enemy decided to move this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Straight at the player.
    Direct(Vec3),
    /// Around an obstacle, turned by `degrees` from the direct heading.
    Detour {
        /// Displacement taken.
        displacement: Vec3,
        /// Signed deviation from the direct heading.
        degrees: i16,
    },
    /// A random nudge because every heading was blocked.
    Jitter(Vec3),
    /// No free move was found.
    Wait,
}

impl Step {
    /// Displacement to apply.
    #[must_use]
    pub const fn displacement(self) -> Vec3 {
        match self {
            Self::Direct(displacement)
            | Self::Detour { displacement, .. }
            | Self::Jitter(displacement) => displacement,
            Self::Wait => Vec3::ZERO,
        }
    }
}

/// Deviations of the avoidance fan, from one side to the other.
fn fan_degrees() -> impl Iterator<Item = i16> {
    let steps = AVOIDANCE_MAX_DEGREES / AVOIDANCE_STEP_DEGREES;
    (-steps..=steps).map(|step| step * AVOIDANCE_STEP_DEGREES)
}

/// Picks this frame's move for a mover with box `bounds` at `position`
/// chasing `target`.
pub fn plan_step<R: Rng + ?Sized>(
    bounds: &Aabb,
    position: Vec3,
    target: Vec3,
    obstacles: &SpatialRegistry,
    rng: &mut R,
) -> Step {
    let chase = horizontal_direction(position, target);
    let preferred = chase * ENEMY_SPEED;
    if is_free(obstacles, bounds, preferred) {
        return Step::Direct(preferred);
    }

    let detour = fan_degrees()
        .map(|degrees| {
            let displacement = rotate_about_y(chase, f32::from(degrees).to_radians()) * ENEMY_SPEED;
            (degrees, displacement)
        })
        .filter(|(_, displacement)| is_free(obstacles, bounds, *displacement))
        .min_by_key(|(_, displacement)| {
            OrderedFloat(horizontal_distance(position + *displacement, target))
        });
    if let Some((degrees, displacement)) = detour {
        return Step::Detour {
            displacement,
            degrees,
        };
    }

    let jitter = Vec3::new(
        (rng.gen::<f32>() - 0.5) * ENEMY_SPEED,
        0.0,
        (rng.gen::<f32>() - 0.5) * ENEMY_SPEED,
    );
    if is_free(obstacles, bounds, jitter) {
        Step::Jitter(jitter)
    } else {
        Step::Wait
    }
}

/// Shared state the enemy phase reads and writes.
pub struct EnemyPhase<'a, R: Rng + ?Sized> {
    /// Static world.
    pub obstacles: &'a SpatialRegistry,
    /// Projectile arena for enemy fire.
    pub projectiles: &'a mut ProjectilePool,
    /// Identifier source for new projectile slots.
    pub ids: &'a mut EntityIds,
    /// Randomness for jitter.
    pub rng: &'a mut R,
    /// End-of-run latch.
    pub latch: &'a mut GameOverLatch,
    /// Frame clock.
    pub now: Millis,
}

/// Moves every enemy, checks contact with the player and fires when due.
///
/// Contact ends the run with [`Outcome::CaughtByEnemy`] and stops the phase
/// immediately; enemies later in the list do not act that frame.
pub fn update_enemies<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    player: &Player,
    phase: &mut EnemyPhase<'_, R>,
    presentation: &mut dyn Presentation,
) {
    let player_box = player.bounds();
    for enemy in enemies.iter_mut() {
        let step = plan_step(
            &enemy.bounds(),
            enemy.position,
            player.position,
            phase.obstacles,
            phase.rng,
        );
        if !matches!(step, Step::Direct(_)) {
            debug!("enemy {:?} {step:?}", enemy.id);
        }
        enemy.position += step.displacement();

        if enemy.bounds().intersects(&player_box) {
            phase
                .latch
                .trigger(Outcome::CaughtByEnemy, phase.now, presentation);
            return;
        }

        if enemy.shot_due(phase.now) {
            enemy.last_shot_ms = phase.now;
            phase.projectiles.fire(
                Shot {
                    side: Side::Enemy,
                    origin: enemy.position,
                    direction: player.position - enemy.position,
                    range: ENEMY_SHOT_RANGE,
                },
                phase.ids,
                presentation,
            );
        }
    }
}
