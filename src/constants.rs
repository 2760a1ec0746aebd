//! Gameplay constants shared across the simulation.
//!
//! Distances are world units, speeds are units per frame and durations are
//! milliseconds.

/// Milliseconds supplied by the caller as the frame clock.
pub type Millis = u64;

/// Height of the player's centre when standing on flat ground.
pub const GROUND_LEVEL: f32 = 1.0;
/// Downward acceleration applied to the player every frame.
pub const GRAVITY: f32 = 0.02;
/// Upward velocity granted by a jump.
pub const JUMP_IMPULSE: f32 = 0.5;
/// Distance from the ground plane that still counts as standing.
pub const GROUNDED_TOLERANCE: f32 = 0.01;
/// Horizontal distance covered per frame for each held movement key.
pub const PLAYER_MOVE_SPEED: f32 = 0.3;
/// Half extents of the player's 1x2x1 box.
pub const PLAYER_HALF_EXTENTS: [f32; 3] = [0.5, 1.0, 0.5];
/// Health the player starts a run with.
pub const PLAYER_START_HEALTH: i32 = 10;
/// Vertical offset of the camera above the player's centre.
pub const CAMERA_HEIGHT: f32 = 2.0;

/// Widening applied to building footprints when testing for support.
pub const BUILDING_FOOTPRINT_MARGIN: f32 = 2.0;
/// Vertical slack when deciding whether the player stands on a roof.
pub const ROOF_TOLERANCE: f32 = 0.5;
/// Two jump presses closer than this climb onto the nearest building.
pub const DOUBLE_JUMP_WINDOW_MS: Millis = 300;

/// Distance an enemy covers per frame.
pub const ENEMY_SPEED: f32 = 0.1;
/// Half extent of the enemy's 2x2x2 cube.
pub const ENEMY_HALF_EXTENT: f32 = 1.0;
/// Health each enemy spawns with.
pub const ENEMY_START_HEALTH: i32 = 10;
/// Minimum time between two shots of the same enemy.
pub const ENEMY_SHOOT_INTERVAL_MS: Millis = 2000;
/// Widest deviation from the direct heading considered when blocked.
pub const AVOIDANCE_MAX_DEGREES: i16 = 90;
/// Angular step of the avoidance fan.
pub const AVOIDANCE_STEP_DEGREES: i16 = 15;

/// Distance a projectile covers per frame.
pub const PROJECTILE_SPEED: f32 = 1.0;
/// Offset along the firing direction at which a projectile appears.
pub const PROJECTILE_SPAWN_OFFSET: f32 = 1.1;
/// Range of a standard player shot, measured from the camera.
pub const PLAYER_SHOT_RANGE: f32 = 100.0;
/// Range of a sniper shot, measured from the camera.
pub const SNIPER_SHOT_RANGE: f32 = 300.0;
/// Range of an enemy shot, measured from the player.
pub const ENEMY_SHOT_RANGE: f32 = 200.0;
/// Cooldown after a primary-fire shot.
pub const SHOOT_COOLDOWN_MS: Millis = 200;
/// Cooldown after a sniper shot.
pub const SNIPER_COOLDOWN_MS: Millis = 500;
/// Health removed from the player by one enemy hit.
pub const ENEMY_SHOT_DAMAGE: i32 = 1;

/// Pickup radius for weapons.
pub const WEAPON_PICKUP_RADIUS: f32 = 2.0;
/// Pickup radius for gold coins.
pub const GOLD_PICKUP_RADIUS: f32 = 2.0;
/// Pickup radius for hearts.
pub const HEART_PICKUP_RADIUS: f32 = 3.0;
/// Health restored by a heart.
pub const HEART_HEAL: i32 = 2;
/// Gold coins needed to win.
pub const GOLD_TARGET: u32 = 5;

/// Delay between the end of a run and the restart request.
pub const RESTART_DELAY_MS: Millis = 3000;
