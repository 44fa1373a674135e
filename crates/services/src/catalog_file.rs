//! Course catalogs loaded from TOML configuration.
//!
//! ```toml
//! [[sections]]
//! id = "basics"
//! title = "Basics"
//! description = "Where everyone starts."
//! xp_reward = 50
//!
//! [[achievements]]
//! id = "first_steps"
//! title = "First Steps"
//! description = "Complete your first section."
//! xp_reward = 50
//! rule = { kind = "sections_completed", at_least = 1 }
//! ```

use std::path::Path;

use learn_core::model::{Achievement, Catalog, Section};
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogLoadError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    sections: Vec<Section>,
    #[serde(default)]
    achievements: Vec<Achievement>,
}

/// Parse and validate a TOML catalog.
///
/// # Errors
///
/// Returns `CatalogLoadError::Parse` for malformed TOML and
/// `CatalogLoadError::Invalid` if the catalog fails validation.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogLoadError> {
    let file: CatalogFile = toml::from_str(text)?;
    Ok(Catalog::new(file.sections, file.achievements)?)
}

/// Read a TOML catalog from disk.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or is invalid.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    let catalog = parse_catalog(&text)?;
    debug!(
        path = %path.display(),
        sections = catalog.sections().len(),
        achievements = catalog.achievements().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    use learn_core::model::{AchievementRule, CatalogError, SectionId};

    const COURSE: &str = r#"
        [[sections]]
        id = "basics"
        title = "Basics"
        description = "Where everyone starts."
        icon = "📗"
        xp_reward = 50

        [[sections]]
        id = "tools"
        title = "Tools"
        description = "Calling things."
        xp_reward = 80

        [[achievements]]
        id = "first_steps"
        title = "First Steps"
        description = "Complete your first section."
        xp_reward = 50
        rule = { kind = "sections_completed", at_least = 1 }

        [[achievements]]
        id = "speedy"
        title = "Speedy"
        description = "Finish a module in two minutes."
        icon = "⚡"
        xp_reward = 25
        rule = { kind = "fastest_module", within_secs = 120.0 }
    "#;

    #[test]
    fn parses_sections_and_rules_in_order() {
        let catalog = parse_catalog(COURSE).unwrap();

        let ids: Vec<&str> = catalog.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["basics", "tools"]);
        assert_eq!(catalog.sections()[1].icon, "");
        assert_eq!(
            catalog.achievements()[0].rule,
            AchievementRule::SectionsCompleted { at_least: 1 }
        );
        assert_eq!(
            catalog.achievements()[1].rule,
            AchievementRule::FastestModule { within_secs: 120.0 }
        );
    }

    #[test]
    fn duplicate_ids_are_invalid() {
        let text = r#"
            [[sections]]
            id = "basics"
            title = "A"
            description = ""
            xp_reward = 1

            [[sections]]
            id = "basics"
            title = "B"
            description = ""
            xp_reward = 1
        "#;
        let err = parse_catalog(text).unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Invalid(CatalogError::DuplicateSection(ref id))
                if *id == SectionId::new("basics").unwrap()
        ));
    }

    #[test]
    fn unknown_rule_kind_is_a_parse_error() {
        let text = r#"
            [[sections]]
            id = "basics"
            title = "A"
            description = ""
            xp_reward = 1

            [[achievements]]
            id = "odd"
            title = "Odd"
            description = ""
            xp_reward = 1
            rule = { kind = "moon_phase" }
        "#;
        assert!(matches!(
            parse_catalog(text),
            Err(CatalogLoadError::Parse(_))
        ));
    }

    #[test]
    fn empty_file_has_no_sections() {
        assert!(matches!(
            parse_catalog(""),
            Err(CatalogLoadError::Invalid(CatalogError::NoSections))
        ));
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.toml");
        tokio::fs::write(&path, COURSE).await.unwrap();

        let catalog = load_catalog(&path).await.unwrap();
        assert_eq!(catalog.sections().len(), 2);
    }
}
