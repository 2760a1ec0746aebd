//! Weapon damage, enemy removal and enemy fire against the player.

use glam::Vec3;
use grovefire::entity::{Enemy, EntityId, EntityIds, Player};
use grovefire::projectiles::{advance_enemy_shots, advance_player_shots, Shot};
use grovefire::{
    GameOverLatch, Outcome, PresentationQueue, ProjectilePool, Side, SpatialRegistry, Weapon,
    ENEMY_SHOT_RANGE, PLAYER_SHOT_RANGE,
};
use rstest::{fixture, rstest};

struct Range {
    pool: ProjectilePool,
    ids: EntityIds,
    queue: PresentationQueue,
    enemies: Vec<Enemy>,
    camera: Vec3,
}

impl Range {
    /// Fires one shot at the first enemy and advances until it lands.
    fn shoot(&mut self, weapon: Weapon) -> Vec<EntityId> {
        let target = self
            .enemies
            .first()
            .map_or(Vec3::ZERO, |enemy| enemy.position);
        self.pool.fire(
            Shot {
                side: Side::Player,
                origin: self.camera,
                direction: target - self.camera,
                range: PLAYER_SHOT_RANGE,
            },
            &mut self.ids,
            &mut self.queue,
        );
        let mut killed = Vec::new();
        for _ in 0..40 {
            killed.extend(advance_player_shots(
                &mut self.pool,
                &mut self.enemies,
                weapon.damage(),
                self.camera,
                &mut self.queue,
            ));
            if self.pool.active_count(Side::Player) == 0 {
                break;
            }
        }
        killed
    }

    fn enemy_health(&self) -> Option<i32> {
        self.enemies.first().map(|enemy| enemy.health)
    }
}

#[fixture]
fn range() -> Range {
    Range {
        pool: ProjectilePool::new(),
        ids: EntityIds::default(),
        queue: PresentationQueue::default(),
        enemies: vec![Enemy::new(EntityId(100), Vec3::new(0.0, 1.0, -20.0), 0)],
        camera: Vec3::new(0.0, 3.0, 0.0),
    }
}

#[rstest]
fn default_gun_then_rifle_finishes_an_enemy(mut range: Range) {
    for _ in 0..5 {
        assert!(range.shoot(Weapon::Default).is_empty());
    }
    assert_eq!(range.enemy_health(), Some(5));

    assert!(range.shoot(Weapon::Rifle).is_empty());
    assert!(range.shoot(Weapon::Rifle).is_empty());
    assert_eq!(range.enemy_health(), Some(1));
    assert_eq!(range.shoot(Weapon::Rifle), vec![EntityId(100)]);
    assert!(range.enemies.is_empty());
    assert!(test_utils::scene::was_despawned(
        range.queue.events(),
        EntityId(100)
    ));
    assert!(range.pool.is_consistent());
}

#[rstest]
#[case(Weapon::Default, 10)]
#[case(Weapon::Rifle, 5)]
#[case(Weapon::Shotgun, 2)]
fn shots_to_kill(mut range: Range, #[case] weapon: Weapon, #[case] shots: usize) {
    let mut health = range.enemy_health();
    for shot in 1..=shots {
        let killed = range.shoot(weapon);
        let now = range.enemy_health();
        if let (Some(before), Some(after)) = (health, now) {
            assert!(after < before, "health rose from {before} to {after}");
        }
        health = now;
        assert_eq!(killed.is_empty(), shot < shots);
    }
    assert!(range.enemies.is_empty());
}

#[rstest]
fn player_shots_retire_beyond_their_range(mut range: Range) {
    range.enemies.clear();
    range.pool.fire(
        Shot {
            side: Side::Player,
            origin: range.camera,
            direction: Vec3::NEG_Z,
            range: PLAYER_SHOT_RANGE,
        },
        &mut range.ids,
        &mut range.queue,
    );
    let mut frames = 0;
    while range.pool.active_count(Side::Player) > 0 {
        advance_player_shots(&mut range.pool, &mut range.enemies, 1, range.camera, &mut range.queue);
        frames += 1;
        assert!(frames < 200);
    }
    assert_eq!(frames, 99);
    assert_eq!(range.pool.free_count(), 1);
}

#[test]
fn enemy_fire_drains_health_and_ends_the_run() {
    let obstacles = SpatialRegistry::new();
    let mut player = Player::new(EntityId(1), 0.0, 0.0);
    let mut pool = ProjectilePool::new();
    let mut ids = EntityIds::default();
    let mut queue = PresentationQueue::default();
    let mut latch = GameOverLatch::default();

    for volley in 0..12_u64 {
        pool.fire(
            Shot {
                side: Side::Enemy,
                origin: Vec3::new(0.0, 1.0, -10.0),
                direction: Vec3::Z,
                range: ENEMY_SHOT_RANGE,
            },
            &mut ids,
            &mut queue,
        );
        for frame in 0..20 {
            advance_enemy_shots(
                &mut pool,
                &obstacles,
                &mut player,
                &mut latch,
                volley * 1_000 + frame,
                &mut queue,
            );
        }
        if latch.is_over() {
            break;
        }
    }

    assert_eq!(player.health, 0);
    assert_eq!(latch.outcome(), Some(Outcome::ShotByEnemy));
    assert_eq!(
        test_utils::scene::overlays(queue.events()),
        vec!["Game Over! You were shot by an enemy."]
    );
    assert_eq!(test_utils::scene::last_health(queue.events()), Some("Life: 0"));
}
