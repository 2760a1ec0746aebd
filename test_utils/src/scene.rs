//! Queries over recorded presentation calls.

use std::collections::BTreeSet;

use grovefire::{EntityId, PresentationEvent};

/// Overlay texts shown, in order.
#[must_use]
pub fn overlays(events: &[PresentationEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| match event {
            PresentationEvent::GameOver(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Number of restart requests issued.
#[must_use]
pub fn restart_requests(events: &[PresentationEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, PresentationEvent::Restart))
        .count()
}

/// The most recent life counter text.
#[must_use]
pub fn last_health(events: &[PresentationEvent]) -> Option<&str> {
    events.iter().rev().find_map(|event| match event {
        PresentationEvent::Health(text) => Some(text.as_str()),
        _ => None,
    })
}

/// Whether `entity` was despawned.
#[must_use]
pub fn was_despawned(events: &[PresentationEvent], entity: EntityId) -> bool {
    events
        .iter()
        .any(|event| *event == PresentationEvent::Despawn(entity))
}

/// Entities a host replaying `events` in order would still be showing.
///
/// # Panics
///
/// Panics when an entity is spawned while its previous visual is still in
/// the scene.
#[must_use]
pub fn scene_contents(events: &[PresentationEvent]) -> BTreeSet<EntityId> {
    let mut live = BTreeSet::new();
    for event in events {
        match event {
            PresentationEvent::Spawn { entity, .. } => {
                assert!(live.insert(*entity), "{entity:?} spawned over a live visual");
            }
            PresentationEvent::Despawn(entity) => {
                live.remove(entity);
            }
            _ => {}
        }
    }
    live
}
