//! Ability catalog loader.

use std::path::Path;

use crate::catalog::AbilityCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for ability catalogs from TOML files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability catalog from a TOML file.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!(
            target: "content::abilities",
            path = %path.display(),
            actor_types = catalog.actors.len(),
            abilities = catalog.ability_count(),
            "Loaded ability catalog"
        );
        Ok(catalog)
    }

    /// Parse an ability catalog from TOML text.
    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        AbilityCatalog::from_toml(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse abilities TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_catalog_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[actor]]
            type = "guard"

            [[actor.abilities]]
            id = "fortify"
            name = "Fortify"
            category = "active"
            cooldown = 2
            effects = [{{ kind = "reinforce", amount = 15 }}]
            "#
        )
        .unwrap();

        let catalog = AbilityLoader::load(file.path()).unwrap();
        assert_eq!(catalog.ability_count(), 1);
        assert_eq!(catalog.actors[0].actor_type, "guard");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = AbilityLoader::load(Path::new("/nonexistent/abilities.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/abilities.toml"));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = AbilityLoader::parse("[[actor]\ntype =").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse abilities TOML"));
    }
}
