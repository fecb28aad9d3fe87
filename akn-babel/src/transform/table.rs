//! Table families
//!
//!     AKN tables are a flat sequence of rows directly under `table` (a browser may have put a
//!     `tbody` in between). HTML tables split rows into `thead` and `tbody`. The split is not
//!     stored on the AKN side; it is derived from the cells every time a table goes to HTML:
//!     a row is a head row when none of its direct cells is a body cell.
//!
//!     Going back to AKN, `thead` and `tbody` rows are flattened into a single ordered `tr`
//!     sequence. Loose inline content of an HTML cell is grouped into `mp` elements, one per
//!     inline run; block children are nested directly under the cell.

use super::attributes::AttributeMap;
use super::classify::{is_blank, is_inline_gap, partition_runs, ContentUnit};
use super::config::TableConfig;
use super::pattern::{PathPattern, PatternTable};
use super::{Direction, StructuralFamily};
use crate::error::ConfigError;
use crate::product::Product;
use crate::tree::{NodeId, PathCache, Tree};
use crate::vocabulary as vocab;
use log::{debug, trace};

const CAPTION: &str = "caption";
const HEAD: &str = "thead";
const BODY: &str = "tbody";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Table,
    Caption,
    /// `tbody`/`thead` section wrapper
    Section,
    Row,
    HeadCell,
    BodyCell,
}

#[derive(Debug)]
struct Maps {
    table: AttributeMap,
    row: AttributeMap,
    cell: AttributeMap,
    caption: AttributeMap,
}

impl Maps {
    fn compile(config: &TableConfig, direction: Direction) -> Self {
        Self {
            table: AttributeMap::compile(&config.table().attributes, direction),
            row: AttributeMap::compile(&config.row().attributes, direction),
            cell: AttributeMap::compile(&config.cell().attributes, direction),
            caption: AttributeMap::pairs(vocab::IDENTITY, direction),
        }
    }
}

#[derive(Debug)]
pub struct TableTransformer {
    config: TableConfig,
    akn_patterns: PatternTable<TableRole>,
    html_patterns: PatternTable<TableRole>,
    to_html: Maps,
    to_akn: Maps,
}

impl TableTransformer {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        let akn_patterns = patterns(
            &config.table().akn,
            "(?:/tbody)?",
            &config.row().akn,
            &config.cell().akn.head,
            &config.cell().akn.body,
        )?;
        let html_patterns = patterns(
            &config.table().html.tag,
            "(?:/(?:thead|tbody|tfoot))?",
            &config.row().html.tag,
            &config.cell().html.head,
            &config.cell().html.body,
        )?;
        Ok(Self {
            to_html: Maps::compile(&config, Direction::AknToHtml),
            to_akn: Maps::compile(&config, Direction::HtmlToAkn),
            config,
            akn_patterns,
            html_patterns,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn classify(&self, path: &str, direction: Direction) -> Option<TableRole> {
        match direction {
            Direction::AknToHtml => self.akn_patterns.classify(path),
            Direction::HtmlToAkn => self.html_patterns.classify(path),
        }
    }

    /// Whether the AKN row holding `node` (or `node` itself) has no body cell.
    ///
    /// Cells and their content defer to their row.
    pub fn is_head_row(&self, tree: &Tree, node: NodeId) -> bool {
        let row_tag = self.config.row().akn.as_str();
        let body_tag = self.config.cell().akn.body.as_str();
        let row = if tree.is_element(node) && tree.name(node) == row_tag {
            Some(node)
        } else {
            tree.ancestor_named(node, row_tag)
        };
        row.is_some_and(|row| {
            !tree
                .children(row)
                .iter()
                .any(|&cell| tree.is_element(cell) && tree.name(cell) == body_tag)
        })
    }

    fn akn_to_html(&self, tree: &Tree, root: NodeId) -> Vec<Product> {
        let config = &self.config;
        let maps = &self.to_html;
        let table = config.table().html.tag.as_str();
        let row = config.row().html.tag.as_str();

        let mut products = Vec::new();
        let mut paths = PathCache::new(root);
        let mut walk = tree.walk(root);
        while let Some(node) = walk.next() {
            let path = paths.path(tree, node).to_string();
            let Some(role) = self.akn_patterns.classify(&path) else {
                trace!("{}: no role for {path}", config.name());
                continue;
            };
            match role {
                TableRole::Table => {
                    products.push(Product::element(table, maps.table.apply(tree, node)));
                    if let Some(caption) = tree.last_child_named(node, CAPTION) {
                        self.caption(tree, caption, table, maps, &mut products);
                    }
                    products.push(Product::child(table, HEAD, Vec::new()));
                    products.push(Product::child(table, BODY, Vec::new()));
                }
                TableRole::Caption => walk.skip_subtree(),
                TableRole::Section => {}
                TableRole::Row => {
                    let section = self.section(tree, node);
                    products.push(Product::child(
                        format!("{table}/{section}"),
                        row,
                        maps.row.apply(tree, node),
                    ));
                }
                TableRole::HeadCell | TableRole::BodyCell => {
                    let section = self.section(tree, node);
                    let tag = match role {
                        TableRole::HeadCell => config.cell().html.head.as_str(),
                        _ => config.cell().html.body.as_str(),
                    };
                    let parent = format!("{table}/{section}/{row}");
                    let cell = format!("{parent}/{tag}");
                    products.push(Product::child(&parent, tag, maps.cell.apply(tree, node)));
                    nested_content(tree, node, &cell, &mut products);
                    walk.skip_subtree();
                }
            }
        }
        products
    }

    fn section(&self, tree: &Tree, node: NodeId) -> &'static str {
        if self.is_head_row(tree, node) {
            HEAD
        } else {
            BODY
        }
    }

    fn caption(&self, tree: &Tree, caption: NodeId, table: &str, maps: &Maps, products: &mut Vec<Product>) {
        let path = format!("{table}/{CAPTION}");
        products.push(Product::child(table, CAPTION, maps.caption.apply(tree, caption)));
        nested_content(tree, caption, &path, products);
    }

    fn html_to_akn(&self, tree: &Tree, root: NodeId) -> Vec<Product> {
        let config = &self.config;
        let maps = &self.to_akn;
        let table = config.table().akn.as_str();
        let row = config.row().akn.as_str();
        let row_path = format!("{table}/{row}");

        let mut products = Vec::new();
        let mut paths = PathCache::new(root);
        let mut walk = tree.walk(root);
        while let Some(node) = walk.next() {
            let path = paths.path(tree, node).to_string();
            let Some(role) = self.html_patterns.classify(&path) else {
                trace!("{}: no role for {path}", config.name());
                continue;
            };
            match role {
                TableRole::Table => {
                    products.push(Product::element(table, maps.table.apply(tree, node)))
                }
                TableRole::Caption => {
                    self.caption(tree, node, table, maps, &mut products);
                    walk.skip_subtree();
                }
                TableRole::Section => {}
                TableRole::Row => {
                    products.push(Product::child(table, row, maps.row.apply(tree, node)))
                }
                TableRole::HeadCell | TableRole::BodyCell => {
                    let tag = match role {
                        TableRole::HeadCell => config.cell().akn.head.as_str(),
                        _ => config.cell().akn.body.as_str(),
                    };
                    let cell = format!("{row_path}/{tag}");
                    products.push(Product::child(&row_path, tag, maps.cell.apply(tree, node)));
                    cell_content(tree, node, &cell, &mut products);
                    walk.skip_subtree();
                }
            }
        }
        products
    }
}

/// Children of an AKN cell or a caption, without layout whitespace
fn nested_content(tree: &Tree, node: NodeId, path: &str, products: &mut Vec<Product>) {
    let children = tree.children(node);
    for (index, &child) in children.iter().enumerate() {
        match tree.text(child) {
            Some(_) if is_blank(tree, child) && !is_inline_gap(tree, children, index) => {}
            Some(value) => products.push(Product::text(format!("{path}/text"), value)),
            None => products.push(Product::nested(path, child, Vec::new())),
        }
    }
}

/// One `mp` per inline run of an HTML cell; blocks go straight under the cell
fn cell_content(tree: &Tree, cell: NodeId, path: &str, products: &mut Vec<Product>) {
    let mp = format!("{path}/mp");
    for content in partition_runs(tree, tree.children(cell)) {
        if content.is_blank_run(tree) {
            continue;
        }
        match content {
            ContentUnit::Run(nodes) => {
                products.push(Product::child(path, "mp", Vec::new()));
                for node in nodes {
                    match tree.text(node) {
                        Some(value) => products.push(Product::text(format!("{mp}/text"), value)),
                        None => products.push(Product::nested(&mp, node, Vec::new())),
                    }
                }
            }
            ContentUnit::Paragraph(node) | ContentUnit::Table(node) | ContentUnit::Block(node) => {
                products.push(Product::nested(path, node, Vec::new()))
            }
        }
    }
}

fn patterns(
    table: &str,
    section: &str,
    row: &str,
    head: &str,
    body: &str,
) -> Result<PatternTable<TableRole>, ConfigError> {
    let table = regex::escape(table);
    let rows = format!("{table}{section}/{}", regex::escape(row));

    let mut patterns = PatternTable::new();
    patterns.push(PathPattern::case_insensitive(&table)?, TableRole::Table);
    patterns.push(
        PathPattern::case_insensitive(&format!("{table}/{CAPTION}"))?,
        TableRole::Caption,
    );
    patterns.push(
        PathPattern::case_insensitive(&format!("{table}/(?:{HEAD}|{BODY}|tfoot)"))?,
        TableRole::Section,
    );
    patterns.push(PathPattern::case_insensitive(&rows)?, TableRole::Row);
    patterns.push(
        PathPattern::case_insensitive(&format!("{rows}/{}", regex::escape(head)))?,
        TableRole::HeadCell,
    );
    patterns.push(
        PathPattern::case_insensitive(&format!("{rows}/{}", regex::escape(body)))?,
        TableRole::BodyCell,
    );
    Ok(patterns)
}

impl StructuralFamily for TableTransformer {
    fn name(&self) -> &str {
        self.config.name()
    }

    fn supports(&self, tree: &Tree, root: NodeId, direction: Direction) -> bool {
        if !tree.is_element(root) {
            return false;
        }
        match direction {
            Direction::AknToHtml => self.config.table().akn.eq_ignore_ascii_case(tree.name(root)),
            Direction::HtmlToAkn => self
                .config
                .table()
                .html
                .matches(tree.name(root), tree.attributes(root)),
        }
    }

    fn transform(&self, tree: &Tree, root: NodeId, direction: Direction) -> Vec<Product> {
        if !self.supports(tree, root, direction) {
            debug!("{}: {} not supported", self.config.name(), tree.name(root));
            return Vec::new();
        }
        match direction {
            Direction::AknToHtml => self.akn_to_html(tree, root),
            Direction::HtmlToAkn => self.html_to_akn(tree, root),
        }
    }
}
