//! Shared configuration loader for the akn toolchain.
//!
//! `defaults/akn.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AknConfig`].
//!
//! The definitions here are plain data. Turning them into working families
//! happens in [`AknConfig::family_registry`], where a definition the library
//! rejects is logged and left out.

use akn_babel::transform::config::{
    AttrCorrespondence, CellMapping, CellTags, ElementMapping, RootSegment, Selector, TableConfig,
    TransformationConfig,
};
use akn_babel::{ConfigError as FamilyError, Converter, FamilyRegistry, LeafMapping, LeafTable};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/akn.default.toml");

/// Top-level configuration consumed by akn applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AknConfig {
    pub convert: ConvertConfig,
    #[serde(default)]
    pub families: Vec<FamilyDefinition>,
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
    #[serde(default)]
    pub leaves: Vec<LeafDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub default_from: String,
}

/// One side-to-side attribute pair as written in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeDefinition {
    pub akn: Option<String>,
    pub html: Option<String>,
}

impl From<&AttributeDefinition> for AttrCorrespondence {
    fn from(definition: &AttributeDefinition) -> Self {
        AttrCorrespondence {
            akn: definition.akn.clone(),
            html: definition.html.clone(),
        }
    }
}

fn correspondences(definitions: &[AttributeDefinition]) -> Vec<AttrCorrespondence> {
    definitions.iter().map(AttrCorrespondence::from).collect()
}

/// Element pair; `html` is a selector such as `ol[data-akn-name=aknOrderedList]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementDefinition {
    pub akn: String,
    pub html: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

impl TryFrom<&ElementDefinition> for ElementMapping {
    type Error = FamilyError;

    fn try_from(definition: &ElementDefinition) -> Result<Self, Self::Error> {
        let selector: Selector = definition.html.parse()?;
        Ok(ElementMapping::new(
            &definition.akn,
            selector,
            correspondences(&definition.attributes),
        ))
    }
}

/// An AKN root segment: one tag, or alternatives
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SegmentDefinition {
    Tag(String),
    OneOf(Vec<String>),
}

impl From<&SegmentDefinition> for RootSegment {
    fn from(definition: &SegmentDefinition) -> Self {
        match definition {
            SegmentDefinition::Tag(tag) => RootSegment::from(tag.as_str()),
            SegmentDefinition::OneOf(tags) => {
                RootSegment::OneOf(tags.iter().map(|tag| tag.to_ascii_lowercase()).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyDefinition {
    pub name: String,
    pub akn_roots: Vec<SegmentDefinition>,
    pub html_roots: Vec<String>,
    pub wrapper: String,
    pub first_level: ElementDefinition,
}

impl TryFrom<&FamilyDefinition> for TransformationConfig {
    type Error = FamilyError;

    fn try_from(definition: &FamilyDefinition) -> Result<Self, Self::Error> {
        TransformationConfig::new(
            &definition.name,
            ElementMapping::try_from(&definition.first_level)?,
            definition.akn_roots.iter().map(RootSegment::from).collect(),
            &definition.wrapper,
            definition.html_roots.clone(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellTagsDefinition {
    pub head: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellDefinition {
    pub akn: CellTagsDefinition,
    pub html: CellTagsDefinition,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub table: ElementDefinition,
    pub row: ElementDefinition,
    pub cell: CellDefinition,
}

impl TryFrom<&TableDefinition> for TableConfig {
    type Error = FamilyError;

    fn try_from(definition: &TableDefinition) -> Result<Self, Self::Error> {
        let cell = &definition.cell;
        TableConfig::new(
            &definition.name,
            ElementMapping::try_from(&definition.table)?,
            ElementMapping::try_from(&definition.row)?,
            CellMapping {
                akn: CellTags::new(&cell.akn.head, &cell.akn.body),
                html: CellTags::new(&cell.html.head, &cell.html.body),
                attributes: correspondences(&cell.attributes),
            },
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeafDefinition {
    pub akn: String,
    pub html: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

impl From<&LeafDefinition> for LeafMapping {
    fn from(definition: &LeafDefinition) -> Self {
        LeafMapping::new(
            &definition.akn,
            &definition.html,
            correspondences(&definition.attributes),
        )
    }
}

impl AknConfig {
    /// Hierarchical families first, then tables, each in file order.
    ///
    /// Rejected definitions are logged by the registry and skipped.
    pub fn family_registry(&self) -> FamilyRegistry {
        let mut registry = FamilyRegistry::new();
        for family in &self.families {
            registry.register_hierarchical(TransformationConfig::try_from(family));
        }
        for table in &self.tables {
            registry.register_table(TableConfig::try_from(table));
        }
        registry
    }

    pub fn leaf_table(&self) -> LeafTable {
        let mappings: Vec<LeafMapping> = self.leaves.iter().map(LeafMapping::from).collect();
        LeafTable::new(&mappings)
    }

    pub fn converter(&self) -> Converter {
        Converter::new(self.family_registry(), self.leaf_table())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AknConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AknConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use akn_babel::builtin;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.convert.default_from, "akn");
        assert_eq!(config.families.len(), 4);
        assert_eq!(config.tables.len(), 1);
        assert_eq!(config.leaves.len(), 3);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.default_from", "html")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.convert.default_from, "html");
    }

    #[test]
    fn default_definitions_match_builtin_families() {
        let config = load_defaults().expect("defaults to deserialize");
        let families: Vec<TransformationConfig> = config
            .families
            .iter()
            .map(|family| TransformationConfig::try_from(family).expect("valid family"))
            .collect();
        let builtin: Vec<TransformationConfig> = builtin::hierarchical()
            .into_iter()
            .map(|family| family.expect("valid builtin family"))
            .collect();
        assert_eq!(families, builtin);

        let table = TableConfig::try_from(&config.tables[0]).expect("valid table");
        assert_eq!(table, builtin::table().expect("valid builtin table"));

        let leaves: Vec<LeafMapping> = config.leaves.iter().map(LeafMapping::from).collect();
        assert_eq!(leaves, builtin::leaves());
    }

    #[test]
    fn registry_follows_file_order() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(
            config.family_registry().names(),
            FamilyRegistry::with_defaults().names()
        );
    }

    #[test]
    fn alternative_root_segments_deserialize() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"
[[families]]
name = "points"
akn_roots = ["list", ["point", "indent"]]
html_roots = ["ol", "li"]
wrapper = "alinea"

[families.first_level]
akn = "list"
html = "ol"
"#
        )
        .expect("write config");

        let config = Loader::new().with_file(file.path()).build().expect("config to build");
        assert_eq!(config.families.len(), 1);
        let family = TransformationConfig::try_from(&config.families[0]).expect("valid family");
        assert_eq!(
            family.akn_roots()[1],
            RootSegment::OneOf(vec!["point".into(), "indent".into()])
        );
        // Tables and leaves were not redefined, so the defaults stay.
        assert_eq!(config.tables.len(), 1);
    }

    #[test]
    fn invalid_definition_is_left_out() {
        let mut config = load_defaults().expect("defaults to deserialize");
        let mut broken = config.families[0].clone();
        broken.name = "broken".into();
        broken.akn_roots.clear();
        config.families.insert(0, broken);

        let registry = config.family_registry();
        assert_eq!(
            registry.names(),
            vec![
                "unordered-list",
                "ordered-list",
                "numbered-paragraph",
                "alinea-mandate",
                "table"
            ]
        );
    }

    #[test]
    fn invalid_selector_is_reported() {
        let definition = ElementDefinition {
            akn: "list".into(),
            html: "ol[data-akn-name".into(),
            attributes: Vec::new(),
        };
        assert_eq!(
            ElementMapping::try_from(&definition),
            Err(FamilyError::InvalidSelector("ol[data-akn-name".into()))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/akn.toml").build();
        assert!(result.is_err());
    }
}
