#![forbid(unsafe_code)]

//! In-memory host element tree.
//!
//! [`SceneTree`] implements [`Surface`] without a browser. It models the
//! absolute positioning a DOM host uses for draggable items:
//!
//! - An element's origin is its parent's origin plus its static frame origin
//!   plus the offset last applied through [`Surface::set_offset`].
//! - Its width is content width plus border allowances.
//! - A container's height is the last height written, else its declared
//!   frame height.
//!
//! Structure (parent/children, document order) is fixed once appended;
//! moving an item between zones changes only its logical owner, never its
//! parent here, exactly like the DOM.
//!
//! Unknown handles are tolerated: queries return empty values and mutations
//! are ignored.

use std::time::Duration;

use brickwall_core::geometry::{Offset, Point, Rect, Size};
use rustc_hash::FxHashMap;

use crate::surface::{Cursor, ElementId, HorizontalBorders, Layer, Surface};

/// Declarative description of an element to append.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeSpec {
    identifier: Option<String>,
    frame: Rect,
    borders: HorizontalBorders,
    min_height: Option<f64>,
}

impl NodeSpec {
    /// An element with the given frame relative to its parent.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// An element anchored at its parent's origin.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(Rect::new(0.0, 0.0, width, height))
    }

    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn borders(mut self, borders: HorizontalBorders) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn min_height(mut self, min_height: f64) -> Self {
        self.min_height = Some(min_height);
        self
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    identifier: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    frame: Rect,
    borders: HorizontalBorders,
    min_height: Option<f64>,
    height: Option<f64>,
    offset: Offset,
    transition: Option<Duration>,
    height_transition: Option<Duration>,
    layer: Layer,
    cursor: Cursor,
}

impl SceneNode {
    fn from_spec(spec: NodeSpec, parent: Option<ElementId>) -> Self {
        Self {
            identifier: spec.identifier,
            parent,
            children: Vec::new(),
            frame: spec.frame,
            borders: spec.borders,
            min_height: spec.min_height,
            height: None,
            offset: Offset::ZERO,
            transition: None,
            height_transition: None,
            layer: Layer::default(),
            cursor: Cursor::default(),
        }
    }
}

/// Headless element tree implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
    by_identifier: FxHashMap<String, ElementId>,
}

impl SceneTree {
    /// Create a tree whose root spans `viewport` at the origin.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let root = SceneNode::from_spec(
            NodeSpec::new(Rect::from_origin_size(Point::default(), viewport)),
            None,
        );
        Self {
            nodes: vec![root],
            by_identifier: FxHashMap::default(),
        }
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    /// Append a new last child of `parent`.
    ///
    /// An unknown `parent` yields a detached element that is still
    /// queryable but belongs to no tree.
    ///
    /// A tree holds at most `u32::MAX` elements. Past that, nothing is
    /// added and the returned handle is inert.
    pub fn append(&mut self, parent: ElementId, spec: NodeSpec) -> ElementId {
        let Some(id) = next_id(self.nodes.len()) else {
            return ElementId::new(u32::MAX);
        };
        let attached = self.node(parent).is_some();
        if let Some(identifier) = &spec.identifier {
            self.by_identifier.insert(identifier.clone(), id);
        }
        self.nodes
            .push(SceneNode::from_spec(spec, attached.then_some(parent)));
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        id
    }

    /// Look up an element by identifier.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<ElementId> {
        self.by_identifier.get(identifier).copied()
    }

    /// Number of elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Offset last applied to `element`.
    #[must_use]
    pub fn offset(&self, element: ElementId) -> Offset {
        self.node(element).map_or(Offset::ZERO, |node| node.offset)
    }

    #[must_use]
    pub fn transition(&self, element: ElementId) -> Option<Duration> {
        self.node(element).and_then(|node| node.transition)
    }

    #[must_use]
    pub fn height_transition(&self, element: ElementId) -> Option<Duration> {
        self.node(element).and_then(|node| node.height_transition)
    }

    #[must_use]
    pub fn layer(&self, element: ElementId) -> Layer {
        self.node(element).map_or_else(Layer::default, |node| node.layer)
    }

    #[must_use]
    pub fn cursor(&self, element: ElementId) -> Cursor {
        self.node(element).map_or_else(Cursor::default, |node| node.cursor)
    }

    /// Height last written by the engine, if any.
    #[must_use]
    pub fn height(&self, element: ElementId) -> Option<f64> {
        self.node(element).and_then(|node| node.height)
    }

    fn node(&self, element: ElementId) -> Option<&SceneNode> {
        self.nodes.get(element.get() as usize)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(element.get() as usize)
    }

    fn origin(&self, element: ElementId) -> Point {
        let Some(node) = self.node(element) else {
            return Point::default();
        };
        let parent_origin = node
            .parent
            .map_or_else(Point::default, |parent| self.origin(parent));
        parent_origin + Offset::new(node.frame.x, node.frame.y) + node.offset
    }
}

impl Surface for SceneTree {
    fn bounds(&self, element: ElementId) -> Rect {
        let Some(node) = self.node(element) else {
            return Rect::default();
        };
        let size = Size::new(
            node.frame.width + node.borders.total(),
            node.height.unwrap_or(node.frame.height),
        );
        Rect::from_origin_size(self.origin(element), size)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|node| node.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn identifier(&self, element: ElementId) -> Option<&str> {
        self.node(element).and_then(|node| node.identifier.as_deref())
    }

    fn content_width(&self, element: ElementId) -> f64 {
        self.node(element).map_or(0.0, |node| node.frame.width)
    }

    fn client_size(&self, element: ElementId) -> Size {
        self.node(element).map_or_else(Size::default, |node| {
            Size::new(node.frame.width, node.height.unwrap_or(node.frame.height))
        })
    }

    fn borders(&self, element: ElementId) -> HorizontalBorders {
        self.node(element)
            .map_or_else(HorizontalBorders::default, |node| node.borders)
    }

    fn min_height(&self, element: ElementId) -> Option<f64> {
        self.node(element).and_then(|node| node.min_height)
    }

    fn set_offset(&mut self, element: ElementId, offset: Offset) {
        if let Some(node) = self.node_mut(element) {
            node.offset = offset;
        }
    }

    fn set_transition(&mut self, element: ElementId, transition: Option<Duration>) {
        if let Some(node) = self.node_mut(element) {
            node.transition = transition;
        }
    }

    fn set_layer(&mut self, element: ElementId, layer: Layer) {
        if let Some(node) = self.node_mut(element) {
            node.layer = layer;
        }
    }

    fn set_cursor(&mut self, element: ElementId, cursor: Cursor) {
        if let Some(node) = self.node_mut(element) {
            node.cursor = cursor;
        }
    }

    fn set_height(&mut self, element: ElementId, height: f64) {
        if let Some(node) = self.node_mut(element) {
            node.height = Some(height);
        }
    }

    fn set_min_height(&mut self, element: ElementId, height: f64) {
        if let Some(node) = self.node_mut(element) {
            node.min_height = Some(height);
        }
    }

    fn set_height_transition(&mut self, element: ElementId, transition: Option<Duration>) {
        if let Some(node) = self.node_mut(element) {
            node.height_transition = transition;
        }
    }
}

/// Handle for the element stored at `len`; `u32::MAX` stays unallocated.
fn next_id(len: usize) -> Option<ElementId> {
    u32::try_from(len)
        .ok()
        .filter(|&raw| raw != u32::MAX)
        .map(ElementId::new)
}
