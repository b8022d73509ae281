use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Active polygon–polygon resolver.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Separating Axis Theorem with minimum-overlap push.
    #[default]
    Sat,
    /// Diagonal intersection: every centre-to-vertex diagonal crossing an edge
    /// of the other polygon pushes its owner back along that diagonal. Does not
    /// minimise overlap and may not converge on deep or concave overlaps.
    Diags,
}

impl FromStr for CollisionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sat" => Ok(CollisionMode::Sat),
            "diags" => Ok(CollisionMode::Diags),
            other => Err(format!("unknown collision mode '{other}'")),
        }
    }
}

impl fmt::Display for CollisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionMode::Sat => write!(f, "sat"),
            CollisionMode::Diags => write!(f, "diags"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes_case_insensitively() {
        assert_eq!("SAT".parse::<CollisionMode>(), Ok(CollisionMode::Sat));
        assert_eq!(" diags ".parse::<CollisionMode>(), Ok(CollisionMode::Diags));
        assert!("gjk".parse::<CollisionMode>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for mode in [CollisionMode::Sat, CollisionMode::Diags] {
            assert_eq!(mode.to_string().parse::<CollisionMode>(), Ok(mode));
        }
    }
}
