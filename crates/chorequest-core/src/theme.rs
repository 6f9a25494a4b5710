//! World theme catalog.
//!
//! Static, read-only reference data used by onboarding and the kids-mode
//! scene renderer. Themes are not user-owned and cannot be modified.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A selectable world theme with its scene description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldTheme {
    /// Theme name, referenced by `UserProfile::world_theme`.
    pub name: String,
    /// Descriptive styling text for the scene renderer.
    pub scene_styling: String,
}

static BUILTIN_THEMES: Lazy<Vec<WorldTheme>> = Lazy::new(|| {
    vec![
        WorldTheme {
            name: "Fantasy".to_string(),
            scene_styling: "Enchanted forest with glowing mushrooms, winding paths and castle spires"
                .to_string(),
        },
        WorldTheme {
            name: "Space".to_string(),
            scene_styling: "Starfields, ringed planets and a friendly rocket base on a purple moon"
                .to_string(),
        },
        WorldTheme {
            name: "Ocean".to_string(),
            scene_styling: "Pirate coves, coral reefs and treasure islands under a turquoise sea"
                .to_string(),
        },
    ]
});

/// Returns the built-in world theme catalog.
pub fn builtin_world_themes() -> &'static [WorldTheme] {
    &BUILTIN_THEMES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let themes = builtin_world_themes();
        assert_eq!(themes.len(), 3);
        assert!(themes.iter().any(|t| t.name == "Fantasy"));
        assert!(themes.iter().all(|t| !t.scene_styling.is_empty()));
    }
}
