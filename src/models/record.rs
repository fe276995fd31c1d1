use serde::{Deserialize, Serialize};

/// Priority of a record.
///
/// Persisted under a stable, language-independent token so that stored rows
/// can be displayed in whichever language is active later. The rank drives
/// sorting; the display text is looked up through the localization layer at
/// render time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Stable token used in the database.
    pub fn token(self) -> &'static str {
        match self {
            Priority::High => "HighPriority",
            Priority::Medium => "MediumPriority",
            Priority::Low => "LowPriority",
        }
    }

    /// Sort rank: High before Medium before Low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Localization key of the display text.
    pub fn label_key(self) -> &'static str {
        match self {
            Priority::High => "PriorityHigh",
            Priority::Medium => "PriorityMedium",
            Priority::Low => "PriorityLow",
        }
    }

    pub fn from_token(token: &str) -> Option<Priority> {
        match token {
            "HighPriority" => Some(Priority::High),
            "MediumPriority" => Some(Priority::Medium),
            "LowPriority" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Next priority in display order, wrapping around. Used by the add
    /// dialog's priority selector.
    pub fn cycle(self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

/// A single note or task row.
///
/// `id` is the store's rowid at the time of the last reload. It is unique
/// within the list but not stable across deletes: the store renumbers all
/// surviving rows when any row is removed.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}
