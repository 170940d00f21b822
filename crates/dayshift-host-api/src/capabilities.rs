//! Stage capabilities model

use serde::{Deserialize, Serialize};

/// Describes which collaborators are wired up for a session
///
/// The core only consults this where a missing collaborator changes timing:
/// without a camera, pans finish instantly instead of interpolating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageCapabilities {
    /// Typing minigame accepts enable/disable and new emails
    pub has_typing: bool,

    /// Camera can be panned and zoomed
    pub has_camera: bool,

    /// Interruption content can be spawned
    pub has_spawner: bool,

    /// Screens and HUD values can be shown
    pub has_presentation: bool,

    /// Music and sound effects can be played
    pub has_audio: bool,
}

impl StageCapabilities {
    /// Nothing attached (headless simulation)
    pub fn none() -> Self {
        Self::default()
    }

    /// Every collaborator attached
    pub fn full() -> Self {
        Self {
            has_typing: true,
            has_camera: true,
            has_spawner: true,
            has_presentation: true,
            has_audio: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_full() {
        let none = StageCapabilities::none();
        assert!(!none.has_camera && !none.has_typing && !none.has_audio);

        let full = StageCapabilities::full();
        assert!(full.has_camera && full.has_typing && full.has_spawner);
        assert!(full.has_presentation && full.has_audio);
    }

    #[test]
    fn capabilities_serialize() {
        let json = serde_json::to_string(&StageCapabilities::full()).unwrap();
        assert!(json.contains("\"has_camera\":true"));
    }
}
