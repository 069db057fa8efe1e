//! ActionPlan - objectives, categorized actions and a phased timeline

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCategory {
    pub category: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase: String,
    pub duration: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub objectives: Vec<String>,
    pub actions: Vec<ActionCategory>,
    pub timeline: Vec<TimelinePhase>,
}

impl ActionPlan {
    pub fn action_count(&self) -> usize {
        self.actions.iter().map(|c| c.actions.len()).sum()
    }
}
