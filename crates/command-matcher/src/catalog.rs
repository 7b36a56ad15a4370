//! Command catalog file loading.
//!
//! Catalogs are JSON documents of the shape
//! `{"commands": [{"template": "Vklopi sistem"}, ...]}` so that the
//! recognized command set can be edited without rebuilding.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub template: String,
}

/// On-disk command catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandCatalog {
    #[serde(default)]
    pub commands: Vec<CatalogEntry>,
}

impl CommandCatalog {
    /// Template strings in catalog order.
    pub fn templates(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.template.clone()).collect()
    }
}

/// Load the template strings from a JSON catalog file.
pub fn load_catalog_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog: {}", path.display()))?;
    let catalog: CommandCatalog =
        serde_json::from_str(&raw).with_context(|| format!("parsing catalog: {}", path.display()))?;
    Ok(catalog.templates())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_json() {
        let raw = r#"{
            "commands": [
                {"template": "Vklopi sistem"},
                {"template": "Nastavi temperaturo na <temperature> stopinj"}
            ]
        }"#;
        let catalog: CommandCatalog = serde_json::from_str(raw).expect("valid json");
        assert_eq!(
            catalog.templates(),
            vec![
                "Vklopi sistem".to_string(),
                "Nastavi temperaturo na <temperature> stopinj".to_string()
            ]
        );
    }

    #[test]
    fn missing_commands_key_is_an_empty_catalog() {
        let catalog: CommandCatalog = serde_json::from_str("{}").expect("valid json");
        assert!(catalog.templates().is_empty());
    }
}
