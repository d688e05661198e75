//! RON content loader

use crate::error::{Error, Result};
use crate::schema::kind::KindDef;
use crate::schema::swap::SwapDef;
use indexmap::IndexMap;
use stackcell_core::{Catalog, EngineConfig, KindId, SwapTable, UnitKey};
use std::fs;
use std::path::Path;

/// Layout of a content file; every section is optional
#[derive(serde::Deserialize)]
struct ContentFile {
    #[serde(default)]
    kinds: Vec<KindDef>,
    #[serde(default)]
    swaps: Vec<SwapDef>,
    #[serde(default)]
    config: Option<EngineConfig>,
}

/// Loaded catalog definitions
#[derive(Debug, Default)]
pub struct Definitions {
    /// Kind definitions by ID, in load order
    pub kinds: IndexMap<KindId, KindDef>,
    /// Container swap entries by filled identity
    pub swaps: IndexMap<UnitKey, SwapDef>,
    /// Engine configuration, if any file set one
    pub config: Option<EngineConfig>,
}

impl Definitions {
    /// Create empty definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a kind definition
    pub fn get_kind(&self, id: &KindId) -> Option<&KindDef> {
        self.kinds.get(id)
    }

    /// Build a catalog from the definitions
    ///
    /// Stats are validated here; the config falls back to the defaults.
    pub fn into_catalog(self) -> Result<Catalog> {
        let mut table = SwapTable::new();
        for swap in self.swaps.values() {
            table.insert_entry(swap.to_entry())?;
        }

        let config = self.config.unwrap_or_default();
        let mut catalog = Catalog::new().with_config(config).with_swap_table(table);
        for def in self.kinds.values() {
            catalog.register_kind(def.to_kind())?;
        }
        Ok(catalog)
    }
}

/// Loader for RON content files
pub struct Loader {
    defs: Definitions,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: Definitions::new(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        self.load_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded content file");
        Ok(())
    }

    /// Load definitions from a RON string
    ///
    /// The whole file is checked before anything is added, so a rejected
    /// file leaves the loader unchanged.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: ContentFile = ron::from_str(content)?;

        if file.config.is_some() && self.defs.config.is_some() {
            return Err(Error::DuplicateDefinition("config".to_string()));
        }

        let mut kinds = IndexMap::new();
        for kind in file.kinds {
            let id = kind.id.clone();
            if self.defs.kinds.contains_key(&id) || kinds.contains_key(&id) {
                return Err(Error::DuplicateDefinition(id.to_string()));
            }
            kinds.insert(id, kind);
        }

        let mut swaps = IndexMap::new();
        for swap in file.swaps {
            if swap.amount == 0 {
                return Err(Error::InvalidSchema(format!(
                    "swap entry {} holds no fluid",
                    swap.filled
                )));
            }
            if self.defs.swaps.contains_key(&swap.filled) || swaps.contains_key(&swap.filled) {
                return Err(Error::DuplicateDefinition(swap.filled.to_string()));
            }
            swaps.insert(swap.filled.clone(), swap);
        }

        if let Some(config) = file.config {
            self.defs.config = Some(config.validated());
        }
        self.defs.kinds.extend(kinds);
        self.defs.swaps.extend(swaps);
        Ok(())
    }

    /// Load all RON files from a directory, in file name order
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> Definitions {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &Definitions {
        &self.defs
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackcell_core::{FluidStack, Unit, VariantId};

    const CONTENT: &str = r#"
    (
        config: Some((
            use_tolerance: 0.000001,
            default_stack_limit: 16,
        )),
        kinds: [
            (
                id: "battery",
                name: "Small Battery",
                electric: Some((capacity: 100000, transfer_limit: 32, min_tier: 1, mode: -1)),
                charged_variant: Some(1),
                empty_variant: Some(0),
            ),
            (
                id: "tank",
                fluid: Some((capacity: 8000, max_stack_size: 1)),
            ),
            (id: "cell"),
        ],
        swaps: [
            (
                filled: (kind: "cell", variant: 1),
                empty: Some((kind: "cell", variant: 0)),
                fluid: "water",
                amount: 1000,
            ),
        ],
    )
    "#;

    #[test]
    fn test_load_content() {
        let mut loader = Loader::new();
        loader.load_str(CONTENT).unwrap();

        let defs = loader.finish();
        assert_eq!(defs.get_kind(&KindId::new("battery")).unwrap().name, "Small Battery");
        assert_eq!(defs.kinds.len(), 3);
        assert_eq!(defs.swaps.len(), 1);
        assert_eq!(defs.config.as_ref().unwrap().default_stack_limit(), 16);
    }

    #[test]
    fn test_into_catalog() {
        let mut loader = Loader::new();
        loader.load_str(CONTENT).unwrap();
        let catalog = loader.finish().into_catalog().unwrap();

        assert_eq!(catalog.config().use_tolerance(), 0.000001);
        assert_eq!(
            stackcell_core::tooltip::resource_lines(&catalog, &Unit::new("battery", 0u16)),
            vec!["Small Battery", "0 / 100000 EU at 32 V"]
        );
        assert_eq!(catalog.stack_limit(&Unit::new("cell", 0u16)), 16);

        let mut battery = Unit::new("battery", 0u16);
        assert_eq!(catalog.energy(&mut battery).charge(500, 1, false, false), 32);
        assert_eq!(battery.variant, VariantId::new(1));

        let mut cell = Unit::new("cell", 0u16);
        assert_eq!(catalog.fluid(&mut cell).fill(&FluidStack::new("water", 1000), true), 1000);
        assert_eq!(cell.variant, VariantId::new(1));
    }

    #[test]
    fn test_sections_are_optional() {
        let mut loader = Loader::new();
        loader.load_str("(swaps: [])").unwrap();
        loader.load_str(r#"(kinds: [(id: "rock")])"#).unwrap();

        let catalog = loader.finish().into_catalog().unwrap();
        assert_eq!(catalog.config(), &EngineConfig::default());
        assert_eq!(catalog.kinds().count(), 1);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut loader = Loader::new();
        loader.load_str(CONTENT).unwrap();

        let err = loader.load_str(r#"(kinds: [(id: "tank")])"#).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(ref id) if id == "tank"));

        let err = loader.load_str("(config: Some((default_stack_limit: 2)))").unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_rejected_file_leaves_loader_unchanged() {
        let mut loader = Loader::new();
        loader.load_str(r#"(kinds: [(id: "tank")])"#).unwrap();

        let err = loader
            .load_str(
                r#"(
                    config: Some((default_stack_limit: 8)),
                    kinds: [(id: "drill")],
                    swaps: [
                        (filled: (kind: "cell", variant: 1), fluid: "water", amount: 1000),
                        (filled: (kind: "cell", variant: 1), fluid: "lava", amount: 1000),
                    ],
                )"#,
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));

        let defs = loader.defs();
        assert_eq!(defs.kinds.len(), 1);
        assert!(defs.get_kind(&KindId::new("drill")).is_none());
        assert!(defs.swaps.is_empty());
        assert!(defs.config.is_none());

        let err = loader.load_str(r#"(kinds: [(id: "pump"), (id: "pump")])"#).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(ref id) if id == "pump"));
        assert_eq!(loader.defs().kinds.len(), 1);
    }

    #[test]
    fn test_invalid_stats_surface_at_build() {
        let mut loader = Loader::new();
        loader
            .load_str(
                r#"(kinds: [(id: "broken", fluid: Some((capacity: 1000, max_stack_size: 0)))])"#,
            )
            .unwrap();

        let err = loader.finish().into_catalog().unwrap_err();
        assert!(matches!(err, Error::Core(stackcell_core::Error::InvalidStats { .. })));
    }

    #[test]
    fn test_empty_swap_rejected() {
        let mut loader = Loader::new();
        let err = loader
            .load_str(r#"(swaps: [(filled: (kind: "cell", variant: 2), fluid: "air", amount: 0)])"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_bad_ron_reports_parse_error() {
        let mut loader = Loader::new();
        assert!(matches!(loader.load_str("(kinds: [").unwrap_err(), Error::Ron(_)));
    }
}
