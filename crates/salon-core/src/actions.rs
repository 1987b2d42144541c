//! Dashboard action groups and the load ring shown above them.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::status::Tone;

/// Badge shown on every dashboard action.
pub const AUTO_RULE_BADGE: &str = "Авто-правило";

/// Groups with more actions than this show the "swipe for full inbox" hint.
pub const COMPACT_GROUP_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Active,
    Pending,
    Completed,
}

impl ActionStatus {
    pub const ALL: [ActionStatus; 3] = [
        ActionStatus::Active,
        ActionStatus::Pending,
        ActionStatus::Completed,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Teal,
    Red,
    Gray,
}

/// Tones a group card uses for its border and badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPalette {
    pub accent: Tone,
    pub badge: Tone,
}

impl GroupColor {
    pub fn palette(&self) -> GroupPalette {
        match self {
            GroupColor::Teal => GroupPalette {
                accent: Tone::Teal,
                badge: Tone::Teal,
            },
            GroupColor::Red => GroupPalette {
                accent: Tone::Red,
                badge: Tone::Red,
            },
            GroupColor::Gray => GroupPalette {
                accent: Tone::Dim,
                badge: Tone::Muted,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Icon name, rendered by the host
    pub icon: String,
    pub status: ActionStatus,
}

impl Action {
    pub fn is_pending(&self) -> bool {
        self.status == ActionStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionGroup {
    pub title: String,
    pub subtitle: Option<String>,
    pub color: GroupColor,
    pub actions: Vec<Action>,
}

impl ActionGroup {
    pub fn shows_inbox_hint(&self) -> bool {
        self.actions.len() > COMPACT_GROUP_LIMIT
    }
}

/// Circular progress indicator; progress is a percentage in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadRing {
    progress: u8,
}

impl LoadRing {
    pub fn new(progress: u8) -> Self {
        Self {
            progress: progress.min(100),
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.progress) / 100.0
    }

    pub fn circumference(radius: f64) -> f64 {
        2.0 * PI * radius
    }

    /// Length of the stroke left undrawn on a ring of `radius`.
    pub fn dash_offset(&self, radius: f64) -> f64 {
        Self::circumference(radius) * (1.0 - self.fraction())
    }
}
