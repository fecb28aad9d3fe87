//! Hierarchical families: numbered units with optional content wrapping
//!
//!     A hierarchical family relates an AKN unit such as
//!
//!         <list>
//!           <indent xml:id="i1">
//!             <num>1.</num>
//!             <content xml:id="c1"><mp>text</mp></content>
//!           </indent>
//!         </list>
//!
//!     to its editable HTML form `<ul><li id="i1" data-akn-num="1." data-akn-content-id="c1">text</li></ul>`.
//!     The AKN side may also group content under a wrapper element (`indent/alinea/content/mp`)
//!     which HTML renders as `<p>` children of the `li`.
//!
//! AKN to HTML
//!
//!     Every node below the family root is classified by its path, most specific pattern
//!     first (see [`AknRole`]). Identities of `num`, `content` and `mp` are folded into
//!     `data-*` attributes of the HTML unit. Subtrees that are not part of the structure are
//!     delegated as [`Product::Nested`] and not walked any further.
//!
//! HTML to AKN
//!
//!     Only the unit element itself is classified. Its children are rebuilt in one go: the
//!     content classifier decides once whether the unit needs wrapper elements, then every
//!     inline run becomes a `content/mp` chain. Only the first run carries the unit's own
//!     content identities; later runs are emitted without attributes so ids stay unique.

use super::attributes::AttributeMap;
use super::classify::{partition_runs, should_wrap, ContentUnit};
use super::config::{RootSegment, TransformationConfig};
use super::pattern::{PathPattern, PatternTable};
use super::{Direction, StructuralFamily};
use crate::error::ConfigError;
use crate::product::{join_path, Attribute, Product};
use crate::tree::{NodeId, PathCache, Tree};
use crate::vocabulary as vocab;
use log::{debug, trace};

/// Structural role of an AKN node, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AknRole {
    /// Container of two-segment roots (`list`)
    FirstLevel,
    /// The unit itself (`list/indent`)
    Root,
    Num,
    NumText,
    Content,
    ContentMp,
    Wrapper,
    WrappedContent,
    WrappedMp,
    MpText,
    /// Inline element inside an `mp`
    MpNested,
    /// Block element inside a `content`
    ContentNested,
    /// Anything else below the unit
    Nested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlRole {
    FirstLevel,
    Root,
}

/// Rules for AKN to HTML
#[derive(Debug)]
struct ToHtml {
    first_level: AttributeMap,
    root: AttributeMap,
    num: AttributeMap,
    content: AttributeMap,
    mp: AttributeMap,
    wrapped_mp: AttributeMap,
    content_nested: AttributeMap,
    wrapped_nested: AttributeMap,
}

/// Rules for HTML to AKN
#[derive(Debug)]
struct ToAkn {
    first_level: AttributeMap,
    root: AttributeMap,
    num: AttributeMap,
    content: AttributeMap,
    wrapped_content: AttributeMap,
    mp: AttributeMap,
    wrapper: AttributeMap,
    paragraph: AttributeMap,
}

#[derive(Debug)]
pub struct HierarchicalTransformer {
    config: TransformationConfig,
    akn_patterns: PatternTable<AknRole>,
    html_patterns: PatternTable<HtmlRole>,
    akn_target: Vec<String>,
    html_target: Vec<String>,
    to_html: ToHtml,
    to_akn: ToAkn,
}

impl HierarchicalTransformer {
    pub fn new(config: TransformationConfig) -> Result<Self, ConfigError> {
        let akn_patterns = akn_patterns(&config)?;
        let html_patterns = html_patterns(&config)?;

        let wrapper = config.wrapper();
        let wrapper_pairs = [
            (vocab::XML_ID, vocab::wrapper_id(wrapper)),
            (vocab::LEOS_ORIGIN, vocab::wrapper_origin(wrapper)),
        ];
        let wrapper_pairs: Vec<(&str, &str)> = wrapper_pairs
            .iter()
            .map(|(akn, html)| (*akn, html.as_str()))
            .collect();

        let to_html = ToHtml {
            first_level: AttributeMap::compile(&config.first_level().attributes, Direction::AknToHtml),
            root: AttributeMap::pairs(vocab::ROOT, Direction::AknToHtml),
            num: AttributeMap::pairs(vocab::NUM, Direction::AknToHtml),
            content: AttributeMap::pairs(vocab::CONTENT, Direction::AknToHtml),
            mp: AttributeMap::pairs(vocab::MP, Direction::AknToHtml),
            wrapped_mp: AttributeMap::inherit(wrapper, vocab::IDENTITY)
                .chain(AttributeMap::inherit("content", vocab::WRAPPED_CONTENT))
                .chain(AttributeMap::pairs(vocab::MP, Direction::AknToHtml)),
            content_nested: AttributeMap::inherit("content", vocab::CONTENT),
            wrapped_nested: AttributeMap::inherit(wrapper, &wrapper_pairs)
                .chain(AttributeMap::inherit("content", vocab::WRAPPED_CONTENT)),
        };
        let to_akn = ToAkn {
            first_level: AttributeMap::compile(&config.first_level().attributes, Direction::HtmlToAkn),
            root: AttributeMap::pairs(vocab::ROOT, Direction::HtmlToAkn),
            num: AttributeMap::pairs(vocab::NUM, Direction::HtmlToAkn),
            content: AttributeMap::pairs(vocab::CONTENT, Direction::HtmlToAkn),
            wrapped_content: AttributeMap::pairs(vocab::WRAPPED_CONTENT, Direction::HtmlToAkn),
            mp: AttributeMap::pairs(vocab::MP, Direction::HtmlToAkn),
            wrapper: AttributeMap::pairs(&wrapper_pairs, Direction::HtmlToAkn),
            paragraph: AttributeMap::pairs(vocab::IDENTITY, Direction::HtmlToAkn),
        };

        Ok(Self {
            akn_target: config
                .akn_roots()
                .iter()
                .map(|segment| segment.primary().to_string())
                .collect(),
            html_target: config.html_roots().to_vec(),
            config,
            akn_patterns,
            html_patterns,
            to_html,
            to_akn,
        })
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// Role of an AKN path, if any
    pub fn classify_akn(&self, path: &str) -> Option<AknRole> {
        self.akn_patterns.classify(path)
    }

    /// Role of an HTML path, if any
    pub fn classify_html(&self, path: &str) -> Option<HtmlRole> {
        self.html_patterns.classify(path)
    }

    /// Whether the segment right after the unit is the wrapper element
    fn is_wrapped(&self, path: &str) -> bool {
        path.split('/').nth(self.config.akn_roots().len()) == Some(self.config.wrapper())
    }

    fn akn_to_html(&self, tree: &Tree, root: NodeId) -> Vec<Product> {
        let target = join_path(&self.html_target);
        let source_two = self.config.akn_roots().len() == 2;
        let maps = &self.to_html;

        let mut products = Vec::new();
        let mut paths = PathCache::new(root);
        let mut walk = tree.walk(root);
        while let Some(node) = walk.next() {
            let path = paths.path(tree, node).to_string();
            let Some(role) = self.akn_patterns.classify(&path) else {
                trace!("{}: no role for {path}", self.config.name());
                continue;
            };
            match role {
                AknRole::FirstLevel => {
                    if self.html_target.len() == 2 {
                        products.push(Product::element(
                            self.html_target[0].as_str(),
                            maps.first_level.apply(tree, node),
                        ));
                    }
                }
                AknRole::Root => {
                    let first_level = match (source_two, tree.parent(node)) {
                        (true, Some(parent)) => maps.first_level.apply(tree, parent),
                        (true, None) => Vec::new(),
                        (false, _) => maps.first_level.apply(tree, node),
                    };
                    products.extend(create_root(
                        source_two,
                        &self.html_target,
                        first_level,
                        maps.root.apply(tree, node),
                    ));
                }
                AknRole::Num => products.push(Product::element(&target, maps.num.apply(tree, node))),
                AknRole::NumText => {
                    if let Some(value) = tree.text(node) {
                        products.push(Product::SetAttribute {
                            path: target.clone(),
                            name: vocab::DATA_AKN_NUM.to_string(),
                            value: value.to_string(),
                        });
                    }
                }
                AknRole::Content => {
                    products.push(Product::element(&target, maps.content.apply(tree, node)))
                }
                AknRole::ContentMp => {
                    products.push(Product::element(&target, maps.mp.apply(tree, node)))
                }
                AknRole::Wrapper | AknRole::WrappedContent => {
                    products.push(Product::element(&target, Vec::new()))
                }
                AknRole::WrappedMp => {
                    products.push(Product::child(&target, "p", maps.wrapped_mp.apply(tree, node)))
                }
                AknRole::MpText => {
                    let parent = self.paragraph_target(&target, &path);
                    products.push(Product::text(
                        format!("{parent}/text"),
                        tree.text(node).unwrap_or_default(),
                    ));
                }
                AknRole::MpNested => {
                    let parent = self.paragraph_target(&target, &path);
                    products.push(Product::nested(parent, node, Vec::new()));
                    walk.skip_subtree();
                }
                AknRole::ContentNested => {
                    let attributes = if self.is_wrapped(&path) {
                        maps.wrapped_nested.apply(tree, node)
                    } else {
                        maps.content_nested.apply(tree, node)
                    };
                    products.push(Product::nested(&target, node, attributes));
                    walk.skip_subtree();
                }
                AknRole::Nested => {
                    products.push(Product::nested(&target, node, Vec::new()));
                    walk.skip_subtree();
                }
            }
        }
        products
    }

    /// HTML element holding `mp` content: the unit itself, or its `p` when wrapped
    fn paragraph_target(&self, target: &str, path: &str) -> String {
        if self.is_wrapped(path) {
            format!("{target}/p")
        } else {
            target.to_string()
        }
    }

    fn html_to_akn(&self, tree: &Tree, root: NodeId) -> Vec<Product> {
        let source_two = self.html_target.len() == 2;
        let maps = &self.to_akn;

        let mut products = Vec::new();
        let mut paths = PathCache::new(root);
        let mut walk = tree.walk(root);
        while let Some(node) = walk.next() {
            let path = paths.path(tree, node).to_string();
            match self.html_patterns.classify(&path) {
                Some(HtmlRole::FirstLevel) => {
                    if self.akn_target.len() == 2 {
                        products.push(Product::element(
                            self.akn_target[0].as_str(),
                            maps.first_level.apply(tree, node),
                        ));
                    }
                }
                Some(HtmlRole::Root) => {
                    self.html_unit(tree, node, source_two, &mut products);
                    walk.skip_subtree();
                }
                None => trace!("{}: no role for {path}", self.config.name()),
            }
        }
        products
    }

    fn html_unit(&self, tree: &Tree, unit: NodeId, source_two: bool, products: &mut Vec<Product>) {
        let maps = &self.to_akn;
        let base = join_path(&self.akn_target);

        let first_level = match (source_two, tree.parent(unit)) {
            (true, Some(parent)) => maps.first_level.apply(tree, parent),
            (true, None) => Vec::new(),
            (false, _) => maps.first_level.apply(tree, unit),
        };
        products.extend(create_root(
            source_two,
            &self.akn_target,
            first_level,
            maps.root.apply(tree, unit),
        ));

        if let Some(num) = tree
            .attribute(unit, vocab::DATA_AKN_NUM)
            .filter(|num| !num.is_empty())
        {
            let num_path = format!("{base}/num");
            products.push(Product::element(&num_path, maps.num.apply(tree, unit)));
            products.push(Product::text(format!("{num_path}/text"), num));
        }

        if should_wrap(tree, unit) {
            debug!("{}: wrapping content in {}", self.config.name(), self.config.wrapper());
            self.create_content_wrapper(tree, unit, &base, products);
        } else {
            self.create_content_directly(tree, unit, &base, products);
        }
    }

    /// Every unit of content under its own wrapper element.
    ///
    /// Only the first inline run takes the unit's wrapper id; later runs get a bare wrapper.
    fn create_content_wrapper(&self, tree: &Tree, unit: NodeId, base: &str, products: &mut Vec<Product>) {
        let maps = &self.to_akn;
        let wrapper = self.config.wrapper();
        let wrapped = format!("{base}/{wrapper}");
        let mut first_run = true;

        for content in partition_runs(tree, tree.children(unit)) {
            if content.is_blank_run(tree) {
                continue;
            }
            match content {
                ContentUnit::Paragraph(p) => {
                    products.push(Product::child(base, wrapper, maps.paragraph.apply(tree, p)));
                    create_content(
                        tree,
                        &wrapped,
                        maps.wrapped_content.apply(tree, p),
                        maps.mp.apply(tree, p),
                        tree.children(p),
                        products,
                    );
                }
                ContentUnit::Run(nodes) => {
                    if first_run {
                        products.push(Product::child(base, wrapper, maps.wrapper.apply(tree, unit)));
                        create_content(
                            tree,
                            &wrapped,
                            maps.content.apply(tree, unit),
                            maps.mp.apply(tree, unit),
                            &nodes,
                            products,
                        );
                        first_run = false;
                    } else {
                        products.push(Product::child(base, wrapper, Vec::new()));
                        create_content(tree, &wrapped, Vec::new(), Vec::new(), &nodes, products);
                    }
                }
                ContentUnit::Table(table) => {
                    products.push(Product::child(base, wrapper, maps.wrapper.apply(tree, table)));
                    wrap_with_content(
                        &wrapped,
                        table,
                        maps.wrapped_content.apply(tree, table),
                        products,
                    );
                }
                ContentUnit::Block(block) => products.push(Product::nested(base, block, Vec::new())),
            }
        }
    }

    /// Content straight under the unit, no wrapper element
    fn create_content_directly(&self, tree: &Tree, unit: NodeId, base: &str, products: &mut Vec<Product>) {
        let maps = &self.to_akn;
        let mut first_run = true;

        for content in partition_runs(tree, tree.children(unit)) {
            if content.is_blank_run(tree) {
                continue;
            }
            match content {
                ContentUnit::Run(nodes) => {
                    let (content_attributes, mp_attributes) = if first_run {
                        first_run = false;
                        (maps.content.apply(tree, unit), maps.mp.apply(tree, unit))
                    } else {
                        (Vec::new(), Vec::new())
                    };
                    create_content(tree, base, content_attributes, mp_attributes, &nodes, products);
                }
                ContentUnit::Paragraph(p) => create_content(
                    tree,
                    base,
                    maps.content.apply(tree, p),
                    maps.mp.apply(tree, p),
                    tree.children(p),
                    products,
                ),
                ContentUnit::Table(table) => {
                    wrap_with_content(base, table, maps.content.apply(tree, table), products)
                }
                ContentUnit::Block(block) => products.push(Product::nested(base, block, Vec::new())),
            }
        }
    }
}

/// Root creation on the target side.
///
/// Two-segment targets append a new child under the (resolved) container; single-segment
/// targets append a new element at the attach point, carrying the first-level attributes too.
fn create_root(
    source_two: bool,
    target: &[String],
    first_level: Vec<Attribute>,
    root: Vec<Attribute>,
) -> Vec<Product> {
    match target {
        [container, unit] => {
            let mut products = Vec::new();
            if !source_two {
                products.push(Product::element(container.as_str(), first_level));
            }
            products.push(Product::child(container.as_str(), unit.as_str(), root));
            products
        }
        [unit] => {
            let mut attributes = root;
            attributes.extend(first_level);
            vec![Product::child("", unit.as_str(), attributes)]
        }
        _ => Vec::new(),
    }
}

/// `content/mp` chain under `base` holding `children`
fn create_content(
    tree: &Tree,
    base: &str,
    content_attributes: Vec<Attribute>,
    mp_attributes: Vec<Attribute>,
    children: &[NodeId],
    products: &mut Vec<Product>,
) {
    let content = format!("{base}/content");
    let mp = format!("{content}/mp");
    products.push(Product::child(base, "content", content_attributes));
    products.push(Product::child(&content, "mp", mp_attributes));
    for &child in children {
        match tree.text(child) {
            Some(value) => products.push(Product::text(format!("{mp}/text"), value)),
            None => products.push(Product::nested(&mp, child, Vec::new())),
        }
    }
}

/// `content` element under `base` holding a nested block
fn wrap_with_content(base: &str, block: NodeId, attributes: Vec<Attribute>, products: &mut Vec<Product>) {
    products.push(Product::child(base, "content", attributes));
    products.push(Product::nested(format!("{base}/content"), block, Vec::new()));
}

fn akn_patterns(config: &TransformationConfig) -> Result<PatternTable<AknRole>, ConfigError> {
    let segments: Vec<String> = config.akn_roots().iter().map(RootSegment::pattern).collect();
    let r = segments.join("/");
    let wrapper = config.wrapper();
    let w = regex::escape(wrapper);
    let content = format!("{r}/(?:{w}/)?content");

    let mut table = PatternTable::new();
    if segments.len() == 2 {
        table.push(PathPattern::new(&segments[0])?, AknRole::FirstLevel);
    }
    table.push(PathPattern::new(&r)?, AknRole::Root);
    table.push(PathPattern::new(&format!("{r}/num"))?, AknRole::Num);
    table.push(PathPattern::new(&format!("{r}/num/text"))?, AknRole::NumText);
    table.push(PathPattern::new(&format!("{r}/content"))?, AknRole::Content);
    table.push(PathPattern::new(&format!("{r}/content/mp"))?, AknRole::ContentMp);
    table.push(PathPattern::new(&format!("{r}/{w}"))?, AknRole::Wrapper);
    table.push(PathPattern::new(&content)?, AknRole::WrappedContent);
    table.push(PathPattern::new(&format!("{content}/mp"))?, AknRole::WrappedMp);
    table.push(PathPattern::new(&format!("{content}/mp/text"))?, AknRole::MpText);
    table.push(
        PathPattern::with_tail(&format!("{content}/mp"), &["text"])?,
        AknRole::MpNested,
    );
    table.push(
        PathPattern::with_tail(&content, &["text", "num", "mp", wrapper])?,
        AknRole::ContentNested,
    );
    table.push(
        PathPattern::with_tail(&r, &["text", "num", wrapper, "content"])?,
        AknRole::Nested,
    );
    Ok(table)
}

fn html_patterns(config: &TransformationConfig) -> Result<PatternTable<HtmlRole>, ConfigError> {
    let segments: Vec<String> = config.html_roots().iter().map(|root| regex::escape(root)).collect();
    let mut table = PatternTable::new();
    if segments.len() == 2 {
        table.push(PathPattern::new(&segments[0])?, HtmlRole::FirstLevel);
    }
    table.push(PathPattern::new(&segments.join("/"))?, HtmlRole::Root);
    Ok(table)
}

impl StructuralFamily for HierarchicalTransformer {
    fn name(&self) -> &str {
        self.config.name()
    }

    fn supports(&self, tree: &Tree, root: NodeId, direction: Direction) -> bool {
        if !tree.is_element(root) {
            return false;
        }
        let has_child = |matches: &dyn Fn(&str) -> bool| {
            tree.children(root)
                .iter()
                .any(|&child| tree.is_element(child) && matches(tree.name(child)))
        };

        match direction {
            Direction::AknToHtml => {
                let roots = self.config.akn_roots();
                roots[0].matches(tree.name(root))
                    && roots.get(1).map_or(true, |unit| has_child(&|name| unit.matches(name)))
            }
            Direction::HtmlToAkn => {
                let roots = self.config.html_roots();
                self.config
                    .first_level()
                    .html
                    .matches(tree.name(root), tree.attributes(root))
                    && roots.get(1).map_or(true, |unit| has_child(&|name| name == unit))
            }
        }
    }

    fn groups_siblings(&self, direction: Direction) -> bool {
        match direction {
            Direction::AknToHtml => self.akn_target.len() == 1 && self.html_target.len() == 2,
            Direction::HtmlToAkn => self.html_target.len() == 1 && self.akn_target.len() == 2,
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
