// src/models/achievement.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Badge awarded on a scored submission.
///
/// Serialized by display name, which is also what gets stored on the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Achievement {
    #[serde(rename = "Perfect Score")]
    PerfectScore,
    #[serde(rename = "Sharp Shooter")]
    SharpShooter,
    #[serde(rename = "Speed Demon")]
    SpeedDemon,
    #[serde(rename = "First Timer")]
    FirstTimer,
}

impl Achievement {
    pub fn name(&self) -> &'static str {
        match self {
            Achievement::PerfectScore => "Perfect Score",
            Achievement::SharpShooter => "Sharp Shooter",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::FirstTimer => "First Timer",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
