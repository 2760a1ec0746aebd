//! Behaviour tests for collectibles.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use glam::Vec3;
use grovefire::pickups::PickupKind;
use grovefire::{
    FrameInput, FrameStatus, MovementKeys, Outcome, PresentationEvent, PresentationQueue,
    Simulation, Weapon,
};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::LayoutBuilder;

#[derive(Debug, Clone)]
struct Stroll {
    sim: Simulation,
    queue: PresentationQueue,
    gold_seen: Vec<u32>,
    statuses: Vec<FrameStatus>,
}

impl Stroll {
    fn new(sim: Simulation) -> Self {
        Self {
            sim,
            queue: PresentationQueue::default(),
            gold_seen: Vec::new(),
            statuses: Vec::new(),
        }
    }

    fn walk_forward(&mut self, frames: u64) {
        let input = FrameInput {
            keys: MovementKeys {
                forward: true,
                ..MovementKeys::default()
            },
            ..FrameInput::default()
        };
        for frame in 1..=frames {
            let status = self.sim.step(frame * 16, &input, &mut self.queue);
            self.statuses.push(status);
            self.gold_seen.push(self.sim.gold().collected);
        }
    }
}

#[test]
fn gold_trail_wins_once() {
    let sim = [-3.0, -6.0, -9.0, -12.0, -15.0]
        .into_iter()
        .fold(LayoutBuilder::new(), |layout, z| layout.coin_at(0.0, z))
        .enemy_at(400.0, 400.0)
        .simulate(2);
    run_serial(&rspec::given(
        "five gold coins in a line ahead of the player",
        Stroll::new(sim),
        |scenario: &mut Scenario<Stroll>| {
            scenario.when("the player walks along the line", |scenario| {
                scenario.before_each(|stroll| stroll.walk_forward(80));

                scenario.then("the gold count never decreases", |stroll| {
                    assert!(stroll.gold_seen.windows(2).all(|pair| match pair {
                        [before, after] => after >= before,
                        _ => true,
                    }));
                });

                scenario.then("the run is won", |stroll| {
                    assert_eq!(stroll.sim.gold().collected, 5);
                    assert!(stroll
                        .statuses
                        .contains(&FrameStatus::Over(Outcome::Victory)));
                });

                scenario.then("the HUD counted every coin", |stroll| {
                    let gold: Vec<_> = stroll
                        .queue
                        .events()
                        .iter()
                        .filter_map(|event| match event {
                            PresentationEvent::Gold(text) => Some(text.as_str()),
                            _ => None,
                        })
                        .collect();
                    assert_eq!(
                        gold,
                        ["Gold: 1/5", "Gold: 2/5", "Gold: 3/5", "Gold: 4/5", "Gold: 5/5"]
                    );
                });

                scenario.then("the victory overlay appears once", |stroll| {
                    assert_eq!(
                        test_utils::scene::overlays(stroll.queue.events()),
                        vec!["Game Over! You win! You collected all gold coins."]
                    );
                });
            });
        },
    ));
}

#[test]
fn crates_and_hearts_apply_once() {
    let sim = LayoutBuilder::new()
        .weapon_at(Weapon::Rifle, 0.0, -3.0)
        .pickup(PickupKind::heart(), Vec3::new(0.0, 1.0, -6.0))
        .weapon_at(Weapon::Shotgun, 0.0, -9.0)
        .enemy_at(400.0, 400.0)
        .simulate(2);
    run_serial(&rspec::given(
        "a rifle, a heart and a shotgun ahead",
        Stroll::new(sim),
        |scenario: &mut Scenario<Stroll>| {
            scenario.when("the player walks past all three", |scenario| {
                scenario.before_each(|stroll| stroll.walk_forward(40));

                scenario.then("the last weapon collected is held", |stroll| {
                    assert_eq!(stroll.sim.player().weapon, Weapon::Shotgun);
                });

                scenario.then("the heart healed exactly once", |stroll| {
                    assert_eq!(stroll.sim.player().health, 12);
                });

                scenario.then("every pickup is gone", |stroll| {
                    assert_eq!(stroll.sim.pickups().iter().count(), 0);
                });

                scenario.then("the HUD announced both weapons", |stroll| {
                    let events = stroll.queue.events();
                    assert!(events.contains(&PresentationEvent::WeaponLabel(
                        "Rifle Damage: 2".into()
                    )));
                    assert!(events.contains(&PresentationEvent::WeaponLabel(
                        "Shotgun Damage: 5".into()
                    )));
                });
            });
        },
    ));
}
