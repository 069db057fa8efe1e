//! Competitive position classes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-valued competitive position of a company inside its sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    Leader,
    #[default]
    Strong,
    Average,
    Weak,
    Struggling,
}

impl PositionKind {
    pub const ALL: [PositionKind; 5] = [
        PositionKind::Leader,
        PositionKind::Strong,
        PositionKind::Average,
        PositionKind::Weak,
        PositionKind::Struggling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionKind::Leader => "leader",
            PositionKind::Strong => "strong",
            PositionKind::Average => "average",
            PositionKind::Weak => "weak",
            PositionKind::Struggling => "struggling",
        }
    }

    /// French label used in rendered documents
    pub fn label(&self) -> &'static str {
        match self {
            PositionKind::Leader => "Leader",
            PositionKind::Strong => "Forte",
            PositionKind::Average => "Moyenne",
            PositionKind::Weak => "Faible",
            PositionKind::Struggling => "En difficulté",
        }
    }
}

impl FromStr for PositionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown competitive position '{s}'"))
    }
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
