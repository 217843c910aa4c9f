//! Data types shared by the client and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two tutorial flows tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorialKind {
    /// Exploration editor tutorial.
    Editor,
    /// Translation tab tutorial.
    Translation,
}

impl TutorialKind {
    /// Returns the string label for this tutorial kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TutorialKind::Editor => "editor",
            TutorialKind::Translation => "translation",
        }
    }
}

impl fmt::Display for TutorialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
