//! The per-frame simulation.
//!
//! [`Simulation`] owns every piece of mutable game state and runs one frame
//! per [`Simulation::step`] in a fixed order: input events, player movement,
//! player shots, enemy shots, enemy AI, pickups, then render sync. Each phase
//! receives explicit borrows of the state it touches. Once the game-over latch
//! fires, no phase runs again and the only remaining work is to request the
//! restart when its deadline passes.

use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::behaviour::{update_enemies, EnemyPhase};
use crate::config::WorldConfig;
use crate::entity::{Enemy, EntityId, EntityIds, Player};
use crate::game_over::{GameOverLatch, Outcome};
use crate::input::{FrameInput, InputEvent};
use crate::movement::{player_intent, resolve_player_move, MoveOutcome};
use crate::obstacles::{ObstacleId, SpatialRegistry};
use crate::physics::{apply_vertical, climb_nearest_building, support_for};
use crate::pickups::{GoldTally, Pickup, Pickups};
use crate::presentation::{Presentation, Visual};
use crate::projectiles::{advance_enemy_shots, advance_player_shots, ProjectilePool, Shot, Side};
use crate::spawn_world::{generate, WorldLayout};
use crate::{
    Millis, DOUBLE_JUMP_WINDOW_MS, PLAYER_SHOT_RANGE, SHOOT_COOLDOWN_MS, SNIPER_COOLDOWN_MS,
    SNIPER_SHOT_RANGE,
};

/// Where the run stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Play continues.
    Running,
    /// The run has ended and the restart is not yet due.
    Over(Outcome),
    /// The restart delay elapsed this frame; the host should rebuild.
    RestartDue,
}

/// All mutable game state for one run.
#[derive(Debug, Clone)]
pub struct Simulation {
    rng: StdRng,
    ids: EntityIds,
    obstacles: SpatialRegistry,
    scenery: Vec<(EntityId, ObstacleId)>,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: ProjectilePool,
    pickups: Pickups,
    gold: GoldTally,
    latch: GameOverLatch,
    shoot_ready_at: Millis,
    sniper_ready_at: Millis,
    aiming: bool,
    last_jump_press: Option<Millis>,
    frame: u64,
}

impl Simulation {
    /// Generates a world from `config` and starts a run at `now`.
    #[must_use]
    pub fn new(config: &WorldConfig, now: Millis) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let layout = generate(config, &mut rng);
        Self::with_rng(layout, rng, now)
    }

    /// Starts a run on a prepared layout. `seed` drives enemy jitter.
    #[must_use]
    pub fn from_layout(layout: WorldLayout, seed: u64, now: Millis) -> Self {
        Self::with_rng(layout, StdRng::seed_from_u64(seed), now)
    }

    fn with_rng(layout: WorldLayout, rng: StdRng, now: Millis) -> Self {
        let WorldLayout {
            obstacles,
            player_start,
            enemies,
            pickups,
        } = layout;
        let mut ids = EntityIds::default();
        let player = Player::new(ids.allocate(), player_start.x, player_start.z);
        let scenery = obstacles
            .iter()
            .map(|(obstacle, _)| (ids.allocate(), obstacle))
            .collect();
        let enemies = enemies
            .into_iter()
            .map(|position| Enemy::new(ids.allocate(), position, now))
            .collect();
        let mut registries = Pickups::default();
        for (kind, position) in pickups {
            registries.insert(Pickup {
                id: ids.allocate(),
                kind,
                position,
            });
        }
        Self {
            rng,
            ids,
            obstacles,
            scenery,
            player,
            enemies,
            projectiles: ProjectilePool::new(),
            pickups: registries,
            gold: GoldTally::default(),
            latch: GameOverLatch::default(),
            shoot_ready_at: now,
            sniper_ready_at: now,
            aiming: false,
            last_jump_press: None,
            frame: 0,
        }
    }

    /// Announces the initial scene and HUD.
    pub fn populate_scene(&self, presentation: &mut dyn Presentation) {
        for (entity, obstacle) in &self.scenery {
            if let Some(bounds) = self.obstacles.get(*obstacle) {
                presentation.spawn(
                    *entity,
                    Visual::Obstacle {
                        kind: obstacle.kind,
                        bounds: *bounds,
                    },
                    bounds.centre(),
                );
            }
        }
        presentation.spawn(self.player.id, Visual::Player, self.player.position);
        for enemy in &self.enemies {
            presentation.spawn(enemy.id, Visual::Enemy, enemy.position);
        }
        self.pickups.spawn_all(presentation);
        presentation.show_health(self.player.health);
        presentation.show_gold(self.gold.collected, self.gold.target);
        presentation.show_weapon(self.player.weapon);
        presentation.sync_camera(self.player.camera_position());
    }

    /// Every entity of this run that is currently in the scene: scenery, the
    /// player, live enemies, uncollected pickups and active projectiles.
    pub fn live_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.scenery
            .iter()
            .map(|(entity, _)| *entity)
            .chain(std::iter::once(self.player.id))
            .chain(self.enemies.iter().map(|enemy| enemy.id))
            .chain(self.pickups.iter().map(|pickup| pickup.id))
            .chain([Side::Player, Side::Enemy].into_iter().flat_map(move |side| {
                self.projectiles
                    .active(side)
                    .map(|projectile| projectile.entity)
            }))
    }

    /// Despawns everything this run put in the scene.
    ///
    /// Hosts call this before replacing the run; the next run allocates its
    /// identifiers from scratch.
    pub fn clear_scene(&self, presentation: &mut dyn Presentation) {
        let mut cleared = 0_usize;
        for entity in self.live_entities() {
            presentation.despawn(entity);
            cleared += 1;
        }
        debug!("cleared {cleared} entities from the scene");
    }

    /// Runs one frame at time `now`.
    pub fn step(
        &mut self,
        now: Millis,
        input: &FrameInput,
        presentation: &mut dyn Presentation,
    ) -> FrameStatus {
        if let Some(outcome) = self.latch.outcome() {
            return if self.latch.poll_restart(now, presentation) {
                info!("restart due after {} frames", self.frame);
                FrameStatus::RestartDue
            } else {
                FrameStatus::Over(outcome)
            };
        }
        self.frame += 1;

        self.handle_events(now, input, presentation);
        self.move_player(now, input, presentation);
        if !self.latch.is_over() {
            advance_player_shots(
                &mut self.projectiles,
                &mut self.enemies,
                self.player.weapon.damage(),
                self.player.camera_position(),
                presentation,
            );
            advance_enemy_shots(
                &mut self.projectiles,
                &self.obstacles,
                &mut self.player,
                &mut self.latch,
                now,
                presentation,
            );
        }
        if !self.latch.is_over() {
            let mut phase = EnemyPhase {
                obstacles: &self.obstacles,
                projectiles: &mut self.projectiles,
                ids: &mut self.ids,
                rng: &mut self.rng,
                latch: &mut self.latch,
                now,
            };
            update_enemies(&mut self.enemies, &self.player, &mut phase, presentation);
        }
        if !self.latch.is_over() {
            self.pickups.collect(
                &mut self.player,
                &mut self.gold,
                &mut self.latch,
                now,
                presentation,
            );
        }

        if let Some(outcome) = self.latch.outcome() {
            return FrameStatus::Over(outcome);
        }
        self.sync_render(presentation);
        FrameStatus::Running
    }

    fn handle_events(&mut self, now: Millis, input: &FrameInput, presentation: &mut dyn Presentation) {
        for event in &input.events {
            match event {
                InputEvent::PrimaryFire => {
                    if now >= self.shoot_ready_at {
                        self.fire_player_shot(input.look, PLAYER_SHOT_RANGE, presentation);
                        self.shoot_ready_at = now.saturating_add(SHOOT_COOLDOWN_MS);
                    }
                }
                InputEvent::AimPressed => {
                    self.aiming = true;
                    presentation.set_aiming(true);
                }
                InputEvent::AimReleased => {
                    if !self.aiming {
                        continue;
                    }
                    self.aiming = false;
                    presentation.set_aiming(false);
                    if now >= self.sniper_ready_at {
                        self.fire_player_shot(input.look, SNIPER_SHOT_RANGE, presentation);
                        self.sniper_ready_at = now.saturating_add(SNIPER_COOLDOWN_MS);
                    }
                }
                InputEvent::JumpPressed => {
                    let quick = self
                        .last_jump_press
                        .is_some_and(|previous| now.saturating_sub(previous) < DOUBLE_JUMP_WINDOW_MS);
                    if quick {
                        climb_nearest_building(&mut self.player, &self.obstacles);
                    }
                    self.last_jump_press = Some(now);
                }
            }
        }
    }

    fn fire_player_shot(&mut self, look: Vec3, range: f32, presentation: &mut dyn Presentation) {
        self.projectiles.fire(
            Shot {
                side: Side::Player,
                origin: self.player.camera_position(),
                direction: look,
                range,
            },
            &mut self.ids,
            presentation,
        );
    }

    fn move_player(&mut self, now: Millis, input: &FrameInput, presentation: &mut dyn Presentation) {
        let support = support_for(&self.player, &self.obstacles);
        let intent = player_intent(input.keys, input.look);
        let outcome = resolve_player_move(
            &mut self.player,
            &self.obstacles,
            &self.enemies,
            intent,
            support.building,
        );
        if let MoveOutcome::EnemyContact(enemy) = outcome {
            debug!("player touched enemy {enemy:?}");
            self.latch
                .trigger(Outcome::CaughtByEnemy, now, presentation);
            return;
        }
        let floor = support_for(&self.player, &self.obstacles).height;
        apply_vertical(&mut self.player, floor, input.jump);
    }

    fn sync_render(&self, presentation: &mut dyn Presentation) {
        presentation.sync_position(self.player.id, self.player.position);
        presentation.sync_camera(self.player.camera_position());
        for enemy in &self.enemies {
            presentation.sync_position(enemy.id, enemy.position);
        }
        for side in [Side::Player, Side::Enemy] {
            for projectile in self.projectiles.active(side) {
                presentation.sync_position(projectile.entity, projectile.position);
            }
        }
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player, for hosts that script a run.
    pub const fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Live enemies in spawn order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Static obstacles.
    #[must_use]
    pub const fn obstacles(&self) -> &SpatialRegistry {
        &self.obstacles
    }

    /// Projectile arena.
    #[must_use]
    pub const fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    /// Uncollected pickups.
    #[must_use]
    pub const fn pickups(&self) -> &Pickups {
        &self.pickups
    }

    /// Gold collected so far.
    #[must_use]
    pub const fn gold(&self) -> GoldTally {
        self.gold
    }

    /// End-of-run latch.
    #[must_use]
    pub const fn latch(&self) -> &GameOverLatch {
        &self.latch
    }

    /// Whether the secondary button is held.
    #[must_use]
    pub const fn is_aiming(&self) -> bool {
        self.aiming
    }

    /// Frames run so far, not counting frames after the run ended.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{PresentationEvent, PresentationQueue};
    use crate::weapon::Weapon;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn lone_enemy() -> WorldLayout {
        WorldLayout {
            enemies: vec![Vec3::new(0.0, 1.0, -30.0)],
            player_start: Vec3::new(0.0, 1.0, 0.0),
            ..WorldLayout::default()
        }
    }

    #[rstest]
    fn primary_fire_respects_the_cooldown(lone_enemy: WorldLayout) {
        let mut sim = Simulation::from_layout(lone_enemy, 1, 0);
        let mut queue = PresentationQueue::default();
        let fire = FrameInput::default().with_event(InputEvent::PrimaryFire);
        sim.step(16, &fire, &mut queue);
        sim.step(32, &fire, &mut queue);
        assert_eq!(sim.projectiles().active_count(Side::Player), 1);
        sim.step(216, &fire, &mut queue);
        assert_eq!(sim.projectiles().active_count(Side::Player), 2);
    }

    #[rstest]
    fn sniper_fires_on_release_only_while_aiming(lone_enemy: WorldLayout) {
        let mut sim = Simulation::from_layout(lone_enemy, 1, 0);
        let mut queue = PresentationQueue::default();
        sim.step(16, &FrameInput::default().with_event(InputEvent::AimReleased), &mut queue);
        assert_eq!(sim.projectiles().active_count(Side::Player), 0);

        sim.step(32, &FrameInput::default().with_event(InputEvent::AimPressed), &mut queue);
        assert!(sim.is_aiming());
        sim.step(48, &FrameInput::default().with_event(InputEvent::AimReleased), &mut queue);
        assert!(!sim.is_aiming());
        let ranges: Vec<f32> = sim.projectiles().active(Side::Player).map(|p| p.range).collect();
        assert_eq!(ranges, vec![SNIPER_SHOT_RANGE]);
        assert!(queue.events().contains(&PresentationEvent::Aiming(true)));
        assert!(queue.events().contains(&PresentationEvent::Aiming(false)));
    }

    #[rstest]
    fn populate_scene_sets_the_hud(lone_enemy: WorldLayout) {
        let sim = Simulation::from_layout(lone_enemy, 1, 0);
        let mut queue = PresentationQueue::default();
        sim.populate_scene(&mut queue);
        let events = queue.events();
        assert!(events.contains(&PresentationEvent::Health("Life: 10".into())));
        assert!(events.contains(&PresentationEvent::Gold("Gold: 0/5".into())));
        assert!(events.contains(&PresentationEvent::WeaponLabel(Weapon::Default.hud_label())));
    }

    #[rstest]
    fn standing_still_against_an_enemy_ends_the_run_before_it_moves(lone_enemy: WorldLayout) {
        let mut sim = Simulation::from_layout(lone_enemy, 1, 0);
        let mut queue = PresentationQueue::default();
        sim.player_mut().position = Vec3::new(0.0, 1.0, -28.6);
        let status = sim.step(16, &FrameInput::default(), &mut queue);
        assert_eq!(status, FrameStatus::Over(Outcome::CaughtByEnemy));
        let enemy = sim.enemies().first().expect("enemy survives");
        assert_eq!(enemy.position, Vec3::new(0.0, 1.0, -30.0));
    }

    #[rstest]
    fn enemies_fire_at_the_player_every_two_seconds() {
        let layout = WorldLayout {
            enemies: vec![Vec3::new(0.0, 1.0, -60.0)],
            player_start: Vec3::new(0.0, 1.0, 0.0),
            ..WorldLayout::default()
        };
        let mut sim = Simulation::from_layout(layout, 1, 0);
        let mut queue = PresentationQueue::default();
        let mut fired_at = Vec::new();

        for frame in 1..=400_u64 {
            let now = frame * 16;
            assert_eq!(sim.step(now, &FrameInput::default(), &mut queue), FrameStatus::Running);
            let shots: Vec<EntityId> = queue
                .drain()
                .filter_map(|event| match event {
                    PresentationEvent::Spawn {
                        entity,
                        visual: Visual::Projectile(Side::Enemy),
                        ..
                    } => Some(entity),
                    _ => None,
                })
                .collect();
            for shot in shots {
                let enemy = sim.enemies().first().expect("enemy alive");
                assert_eq!(enemy.last_shot_ms, now);
                let expected = (sim.player().position - enemy.position).normalize();
                let projectile = sim
                    .projectiles()
                    .active(Side::Enemy)
                    .find(|projectile| projectile.entity == shot)
                    .expect("fresh shot is active");
                assert_relative_eq!(projectile.direction.x, expected.x, epsilon = 1e-5);
                assert_relative_eq!(projectile.direction.y, expected.y, epsilon = 1e-5);
                assert_relative_eq!(projectile.direction.z, expected.z, epsilon = 1e-5);
                fired_at.push(now);
            }
        }
        assert_eq!(fired_at, vec![2_016, 4_032, 6_048]);
    }

    #[rstest]
    fn frames_stop_after_game_over(lone_enemy: WorldLayout) {
        let mut sim = Simulation::from_layout(lone_enemy, 1, 0);
        let mut queue = PresentationQueue::default();
        sim.player_mut().position = Vec3::new(0.0, 1.0, -28.5);
        let status = sim.step(16, &FrameInput::default(), &mut queue);
        assert_eq!(status, FrameStatus::Over(Outcome::CaughtByEnemy));
        let frames = sim.frame();
        assert_eq!(sim.step(1_000, &FrameInput::default(), &mut queue), FrameStatus::Over(Outcome::CaughtByEnemy));
        assert_eq!(sim.step(3_016, &FrameInput::default(), &mut queue), FrameStatus::RestartDue);
        assert_eq!(sim.step(4_000, &FrameInput::default(), &mut queue), FrameStatus::Over(Outcome::CaughtByEnemy));
        assert_eq!(sim.frame(), frames);
    }
}
