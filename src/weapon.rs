//! Player weapons.

use serde::Serialize;
use std::fmt;

/// Gun carried by the player. Picking one up replaces the current weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Weapon {
    /// Starting sidearm.
    #[default]
    Default,
    /// Rifle found at medium range.
    Rifle,
    /// Shotgun found far from the start.
    Shotgun,
}

impl Weapon {
    /// Lower-case identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Rifle => "rifle",
            Self::Shotgun => "shotgun",
        }
    }

    /// Health removed from an enemy per hit.
    #[must_use]
    pub const fn damage(self) -> i32 {
        match self {
            Self::Default => 1,
            Self::Rifle => 2,
            Self::Shotgun => 5,
        }
    }

    /// Text for the HUD weapon label, e.g. `"Rifle Damage: 2"`.
    #[must_use]
    pub fn hud_label(self) -> String {
        let title = match self {
            Self::Default => "Default",
            Self::Rifle => "Rifle",
            Self::Shotgun => "Shotgun",
        };
        format!("{title} Damage: {}", self.damage())
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Weapon;
    use rstest::rstest;

    #[rstest]
    #[case(Weapon::Default, "default", 1)]
    #[case(Weapon::Rifle, "rifle", 2)]
    #[case(Weapon::Shotgun, "shotgun", 5)]
    fn weapon_table(#[case] weapon: Weapon, #[case] name: &str, #[case] damage: i32) {
        assert_eq!(weapon.name(), name);
        assert_eq!(weapon.damage(), damage);
        assert_eq!(weapon.to_string(), name);
    }

    #[test]
    fn hud_label_names_damage() {
        assert_eq!(Weapon::Shotgun.hud_label(), "Shotgun Damage: 5");
        assert_eq!(Weapon::Rifle.hud_label(), "Rifle Damage: 2");
    }
}
