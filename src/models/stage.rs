use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interview pipeline stage
///
/// Declaration order is pipeline order: `next`/`previous` walk it and
/// both ends are terminal (no wraparound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Screening,
    Technical,
    Task,
    Hr,
    Final,
}

/// Unknown stage name, with the closest known key when one is near enough
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stage '{input}'.{}", suggestion_suffix(.suggestion))]
pub struct ParseStageError {
    pub input: String,
    pub suggestion: Option<&'static str>,
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" Did you mean '{}'?", s),
        None => format!(" Valid stages: {}", Stage::ALL.iter().map(|s| s.key()).collect::<Vec<_>>().join(", ")),
    }
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 5] = [
        Stage::Screening,
        Stage::Technical,
        Stage::Task,
        Stage::Hr,
        Stage::Final,
    ];

    /// Short key used on the command line and in the ledger
    pub fn key(&self) -> &'static str {
        match self {
            Stage::Screening => "screening",
            Stage::Technical => "technical",
            Stage::Task => "task",
            Stage::Hr => "hr",
            Stage::Final => "final",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Screening => "Screening",
            Stage::Technical => "Technical Interview",
            Stage::Task => "Task/Assignment",
            Stage::Hr => "HR Interview",
            Stage::Final => "Final Review",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Screening => "HR screening",
            Stage::Technical => "Technical assessment",
            Stage::Task => "Practical assignment",
            Stage::Hr => "HR round",
            Stage::Final => "Management review",
        }
    }

    /// Position in the pipeline (0-based)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn first() -> Stage {
        Stage::ALL[0]
    }

    pub fn last() -> Stage {
        Stage::ALL[Stage::ALL.len() - 1]
    }

    pub fn next(&self) -> Option<Stage> {
        Stage::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Stage> {
        self.index().checked_sub(1).and_then(|i| Stage::ALL.get(i).copied())
    }

    /// Parse a stage from its key or its display label (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.key() == needle || stage.label().to_lowercase() == needle)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::from_name(s).ok_or_else(|| {
            let keys: Vec<&'static str> = Stage::ALL.iter().map(|s| s.key()).collect();
            ParseStageError {
                input: s.to_string(),
                suggestion: crate::utils::fuzzy::closest_match(s, &keys, 2),
            }
        })
    }
}
