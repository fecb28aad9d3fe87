//! Family configuration
//!
//! Configurations are built once, validated at construction, and shared read-only by every
//! transformation pass of their family.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// One segment of an AKN root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSegment {
    Tag(String),
    /// Alternative tags; the first one is used when the segment has to be created
    OneOf(Vec<String>),
}

impl RootSegment {
    /// Regex fragment matching this segment
    pub fn pattern(&self) -> String {
        match self {
            RootSegment::Tag(tag) => regex::escape(tag),
            RootSegment::OneOf(tags) => {
                let alternatives: Vec<String> = tags.iter().map(|tag| regex::escape(tag)).collect();
                format!("(?:{})", alternatives.join("|"))
            }
        }
    }

    /// Tag emitted when this segment is a target
    pub fn primary(&self) -> &str {
        match self {
            RootSegment::Tag(tag) => tag,
            RootSegment::OneOf(tags) => tags.first().map(String::as_str).unwrap_or_default(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            RootSegment::Tag(tag) => tag.eq_ignore_ascii_case(name),
            RootSegment::OneOf(tags) => tags.iter().any(|tag| tag.eq_ignore_ascii_case(name)),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            RootSegment::Tag(tag) => tag.is_empty(),
            RootSegment::OneOf(tags) => tags.is_empty() || tags.iter().any(String::is_empty),
        }
    }
}

impl From<&str> for RootSegment {
    fn from(tag: &str) -> Self {
        RootSegment::Tag(tag.to_ascii_lowercase())
    }
}

/// HTML element selector: a tag with an optional `[attribute=value]` condition.
///
/// ```text
/// ul
/// ol[data-akn-name=aknOrderedList]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub tag: String,
    pub condition: Option<(String, String)>,
}

impl Selector {
    pub fn tag(tag: &str) -> Self {
        Selector {
            tag: tag.to_ascii_lowercase(),
            condition: None,
        }
    }

    /// Whether an element with this name and these attributes is selected
    pub fn matches(&self, name: &str, attributes: &[(String, String)]) -> bool {
        if !self.tag.eq_ignore_ascii_case(name) {
            return false;
        }
        match &self.condition {
            None => true,
            Some((key, value)) => attributes.iter().any(|(k, v)| k == key && v == value),
        }
    }
}

impl FromStr for Selector {
    type Err = ConfigError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = source.trim();
        let invalid = || ConfigError::InvalidSelector(source.to_string());
        let Some(open) = source.find('[') else {
            if source.is_empty() || source.contains(']') {
                return Err(invalid());
            }
            return Ok(Selector::tag(source));
        };
        let tag = &source[..open];
        let condition = source[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
        let (key, value) = condition.split_once('=').ok_or_else(invalid)?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        if tag.is_empty() || key.trim().is_empty() {
            return Err(invalid());
        }
        Ok(Selector {
            tag: tag.to_ascii_lowercase(),
            condition: Some((key.trim().to_string(), value.to_string())),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some((key, value)) => write!(f, "{}[{key}={value}]", self.tag),
            None => f.write_str(&self.tag),
        }
    }
}

/// A single attribute correspondence between the two sides.
///
/// Either side may be missing; a side written as `name=value` is a fixed value stamped on
/// that side regardless of the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttrCorrespondence {
    pub akn: Option<String>,
    pub html: Option<String>,
}

impl AttrCorrespondence {
    pub fn pass(akn: &str, html: &str) -> Self {
        Self {
            akn: Some(akn.to_string()),
            html: Some(html.to_string()),
        }
    }

    pub fn html_only(html: &str) -> Self {
        Self {
            akn: None,
            html: Some(html.to_string()),
        }
    }

    pub fn akn_only(akn: &str) -> Self {
        Self {
            akn: Some(akn.to_string()),
            html: None,
        }
    }

    /// Correspondences for a table of `(akn, html)` name pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Vec<Self> {
        pairs.iter().map(|(akn, html)| Self::pass(akn, html)).collect()
    }
}

/// Element with a counterpart on the other side and its attribute correspondences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementMapping {
    pub akn: String,
    pub html: Selector,
    pub attributes: Vec<AttrCorrespondence>,
}

impl ElementMapping {
    pub fn new(akn: &str, html: Selector, attributes: Vec<AttrCorrespondence>) -> Self {
        Self {
            akn: akn.to_ascii_lowercase(),
            html,
            attributes,
        }
    }
}

/// Configuration of one hierarchical family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationConfig {
    name: String,
    first_level: ElementMapping,
    akn_roots: Vec<RootSegment>,
    wrapper: String,
    html_roots: Vec<String>,
}

impl TransformationConfig {
    pub fn new(
        name: &str,
        first_level: ElementMapping,
        akn_roots: Vec<RootSegment>,
        wrapper: &str,
        html_roots: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName {
                family: name.to_string(),
                field: "name",
            });
        }
        check_arity(name, "akn", akn_roots.len())?;
        check_arity(name, "html", html_roots.len())?;
        if akn_roots.iter().any(RootSegment::is_empty) || html_roots.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyName {
                family: name.to_string(),
                field: "root element",
            });
        }
        if wrapper.trim().is_empty() {
            return Err(ConfigError::EmptyName {
                family: name.to_string(),
                field: "wrapper",
            });
        }
        if !akn_roots[0].matches(&first_level.akn) {
            return Err(ConfigError::FirstLevelMismatch {
                family: name.to_string(),
                element: first_level.akn.clone(),
                segment: akn_roots[0].primary().to_string(),
            });
        }
        if !first_level.html.tag.eq_ignore_ascii_case(&html_roots[0]) {
            return Err(ConfigError::FirstLevelMismatch {
                family: name.to_string(),
                element: first_level.html.to_string(),
                segment: html_roots[0].clone(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            first_level,
            akn_roots,
            wrapper: wrapper.to_ascii_lowercase(),
            html_roots: html_roots.iter().map(|r| r.to_ascii_lowercase()).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_level(&self) -> &ElementMapping {
        &self.first_level
    }

    pub fn akn_roots(&self) -> &[RootSegment] {
        &self.akn_roots
    }

    pub fn wrapper(&self) -> &str {
        &self.wrapper
    }

    pub fn html_roots(&self) -> &[String] {
        &self.html_roots
    }

    /// AKN root path written on the target side (primary tag per segment)
    pub fn akn_root_path(&self) -> String {
        let segments: Vec<&str> = self.akn_roots.iter().map(RootSegment::primary).collect();
        segments.join("/")
    }

    pub fn html_root_path(&self) -> String {
        self.html_roots.join("/")
    }
}

fn check_arity(family: &str, side: &'static str, found: usize) -> Result<(), ConfigError> {
    if (1..=2).contains(&found) {
        Ok(())
    } else {
        Err(ConfigError::RootArity {
            family: family.to_string(),
            side,
            found,
        })
    }
}

/// Head and body cell tag names on one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTags {
    pub head: String,
    pub body: String,
}

impl CellTags {
    pub fn new(head: &str, body: &str) -> Self {
        Self {
            head: head.to_ascii_lowercase(),
            body: body.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMapping {
    pub akn: CellTags,
    pub html: CellTags,
    pub attributes: Vec<AttrCorrespondence>,
}

/// Configuration of a table family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    name: String,
    table: ElementMapping,
    row: ElementMapping,
    cell: CellMapping,
}

impl TableConfig {
    pub fn new(
        name: &str,
        table: ElementMapping,
        row: ElementMapping,
        cell: CellMapping,
    ) -> Result<Self, ConfigError> {
        let required = [
            ("name", name),
            ("table element", table.akn.as_str()),
            ("table element", table.html.tag.as_str()),
            ("row element", row.akn.as_str()),
            ("row element", row.html.tag.as_str()),
            ("head cell", cell.akn.head.as_str()),
            ("head cell", cell.html.head.as_str()),
            ("body cell", cell.akn.body.as_str()),
            ("body cell", cell.html.body.as_str()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::EmptyName {
                family: name.to_string(),
                field,
            });
        }
        Ok(Self {
            name: name.to_string(),
            table,
            row,
            cell,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &ElementMapping {
        &self.table
    }

    pub fn row(&self) -> &ElementMapping {
        &self.row
    }

    pub fn cell(&self) -> &CellMapping {
        &self.cell
    }
}
