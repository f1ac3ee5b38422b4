//! Node data model and per-type behavior hooks.
//!
//! A [`Node`] is a positioned, sized graph vertex owning a fixed set of
//! anchors partitioned into a left and a right side. The concrete node
//! catalog ("If", "Print", ...) lives outside the core; node types plug in
//! through the [`NodeBehavior`] trait, which carries the three hooks the
//! graph store invokes: validity checking and link/unlink notifications.
//!
//! # Example
//!
//! ```
//! use blueprint_editor::{Anchor, AnchorType, Node, Side, UidAllocator};
//!
//! let mut uids = UidAllocator::new();
//! let node = Node::new(&mut uids, "print", "Print")
//!     .with_anchor(Side::Left, "in", Anchor::new("In", AnchorType::Branch))
//!     .with_anchor(Side::Left, "msg", Anchor::new("Input", AnchorType::Str))
//!     .with_anchor(Side::Right, "out", Anchor::new("Out", AnchorType::Branch));
//!
//! assert_eq!(node.uid(), 1);
//! assert!(node.anchor(Side::Left, "msg").is_some());
//! ```

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

use crate::anchor::{Anchor, AnchorRef, Side};
use crate::blueprint::Blueprint;
use crate::geom::{Point, Size};
use crate::uid::{Uid, UidAllocator};

/// Vertical pitch between two anchors on the same side, in world units.
pub const ANCHOR_SPACING: f32 = 40.0;

/// World-space y offset of the first anchor below the node's top edge
/// (clears the 30-unit title header).
pub const ANCHOR_TOP_OFFSET: f32 = 45.0;

const DEFAULT_SIZE: Size = Size {
    width: 200.0,
    height: 100.0,
};
const DEFAULT_COLOR: &str = "#153";

/// Per-node-type hooks invoked by the [`Blueprint`].
///
/// All methods have no-op defaults, so a behavior only overrides what it
/// needs. `check_validity` returns the node's full, fresh error list — the
/// blueprint overwrites `node.errors` with it on every validity pass, so
/// stale messages can never accumulate.
pub trait NodeBehavior {
    /// Recompute this node's validation errors against the current graph.
    fn check_validity(&self, node: &Node, blueprint: &Blueprint) -> Vec<String> {
        let _ = (node, blueprint);
        Vec::new()
    }

    /// Called after one of this node's anchors was linked; `other` is the
    /// far endpoint of the new link.
    fn on_link(&self, node: &mut Node, other: &AnchorRef) {
        let _ = (node, other);
    }

    /// Called before one of this node's links is removed; `other` is the
    /// far endpoint of the disappearing link.
    fn on_unlink(&self, node: &mut Node, other: &AnchorRef) {
        let _ = (node, other);
    }
}

/// Behavior with no validity rules and no link reactions.
pub struct InertBehavior;

impl NodeBehavior for InertBehavior {}

/// A positioned graph vertex with typed ports.
pub struct Node {
    uid: Uid,
    /// Catalog identifier of the node type (`"print"`, `"if"`, ...).
    pub type_id: String,
    /// Human-readable title shown in the node header.
    pub display_name: String,
    /// Icon glyph for the header; empty when the type has none.
    pub icon: String,
    pub position: Point,
    pub size: Size,
    /// Header color as a CSS hex string.
    pub color: String,
    /// Validation messages from the last validity pass.
    pub errors: Vec<String>,
    left: IndexMap<String, Anchor>,
    right: IndexMap<String, Anchor>,
    behavior: Rc<dyn NodeBehavior>,
}

impl Node {
    /// Create a node with a freshly allocated uid and catalog defaults
    /// (200x100, no anchors, inert behavior).
    pub fn new(
        uids: &mut UidAllocator,
        type_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            uid: uids.next(),
            type_id: type_id.into(),
            display_name: display_name.into(),
            icon: String::new(),
            position: Point::ZERO,
            size: DEFAULT_SIZE,
            color: DEFAULT_COLOR.to_string(),
            errors: Vec::new(),
            left: IndexMap::new(),
            right: IndexMap::new(),
            behavior: Rc::new(InertBehavior),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Append an anchor to one side. Insertion order is layout order.
    pub fn with_anchor(mut self, side: Side, name: impl Into<String>, anchor: Anchor) -> Self {
        self.side_mut(side).insert(name.into(), anchor);
        self
    }

    pub fn with_behavior(mut self, behavior: Rc<dyn NodeBehavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Overwrite the uid (deserialization only) and advance the allocator
    /// past it so future allocations cannot collide.
    pub fn force_uid(&mut self, uid: Uid, uids: &mut UidAllocator) {
        self.uid = uid;
        uids.force(uid);
    }

    pub(crate) fn behavior(&self) -> Rc<dyn NodeBehavior> {
        Rc::clone(&self.behavior)
    }

    pub fn anchors(&self, side: Side) -> &IndexMap<String, Anchor> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut IndexMap<String, Anchor> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn anchor(&self, side: Side, name: &str) -> Option<&Anchor> {
        self.anchors(side).get(name)
    }

    pub fn anchor_mut(&mut self, side: Side, name: &str) -> Option<&mut Anchor> {
        self.side_mut(side).get_mut(name)
    }

    /// Build an [`AnchorRef`] pointing at one of this node's anchors.
    pub fn anchor_ref(&self, side: Side, name: impl Into<String>) -> AnchorRef {
        AnchorRef::new(self.uid, side, name)
    }

    /// World position of an anchor: stacked top to bottom on its side with a
    /// fixed pitch, x on the node's left or right edge.
    ///
    /// Returns `None` for a name that does not exist on that side.
    pub fn anchor_pos(&self, side: Side, name: &str) -> Option<Point> {
        let index = self.anchors(side).get_index_of(name)?;
        let x = match side {
            Side::Left => self.position.x,
            Side::Right => self.position.x + self.size.width,
        };
        let y = self.position.y + ANCHOR_TOP_OFFSET + index as f32 * ANCHOR_SPACING;
        Some(Point::new(x, y))
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("uid", &self.uid)
            .field("type_id", &self.type_id)
            .field("display_name", &self.display_name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("errors", &self.errors)
            .field("left", &self.left.keys().collect::<Vec<_>>())
            .field("right", &self.right.keys().collect::<Vec<_>>())
            .finish()
    }
}
