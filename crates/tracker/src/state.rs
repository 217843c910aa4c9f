//! Session-scoped tutorial state.

use serde::Serialize;

/// Flags describing where the user stands with each tutorial this session.
///
/// The two `*_first_visit` flags only ever go from `true` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TutorialState {
    /// True until the editor tutorial has been skipped or finished.
    pub in_editor_first_visit: bool,
    /// True until the translation tutorial has been skipped or finished.
    pub in_translation_first_visit: bool,
    /// Translation tutorial is only offered once this has been set.
    pub translation_not_seen_before: bool,
}

impl Default for TutorialState {
    fn default() -> Self {
        Self {
            in_editor_first_visit: true,
            in_translation_first_visit: true,
            translation_not_seen_before: false,
        }
    }
}
