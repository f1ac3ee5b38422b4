//! The blueprint graph store.
//!
//! A [`Blueprint`] owns the node list and the link list and is the only
//! place either is mutated. It maintains the referential invariants of the
//! graph: links only ever name anchors of nodes currently present, node
//! deletion cascades to link cleanup, and the blueprint-level error list is
//! recomputed from the per-node errors after every mutation.
//!
//! Link legality is *not* checked here — that is the
//! [`crate::linking`] validator's job, run by the interaction layer before
//! it commits a link.

use log::debug;

use crate::anchor::{Anchor, AnchorRef, Side};
use crate::geom::{Bounds, Point};
use crate::node::Node;
use crate::uid::Uid;

/// An unordered edge between two anchors, stored as two locators.
///
/// Links hold no back-references; all discovery goes through the
/// blueprint's linear scans keyed on `(node, side, name)` equality.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub a: AnchorRef,
    pub b: AnchorRef,
}

impl Link {
    /// Whether either endpoint is `r`.
    pub fn touches(&self, r: &AnchorRef) -> bool {
        &self.a == r || &self.b == r
    }

    /// The endpoint opposite to `r`, if `r` is one of the two.
    pub fn other(&self, r: &AnchorRef) -> Option<&AnchorRef> {
        if &self.a == r {
            Some(&self.b)
        } else if &self.b == r {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// The owned graph of nodes and links being edited.
#[derive(Default)]
pub struct Blueprint {
    pub id: u64,
    nodes: Vec<Node>,
    links: Vec<Link>,
    errors: Vec<String>,
}

impl std::fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blueprint")
            .field("id", &self.id)
            .field("links", &self.links)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Nodes in insertion order. Later nodes render (and hit-test) on top.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Aggregated validation messages from the last validity pass.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn node(&self, uid: Uid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.uid() == uid)
    }

    pub fn node_mut(&mut self, uid: Uid) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.uid() == uid)
    }

    fn node_index(&self, uid: Uid) -> Option<usize> {
        self.nodes.iter().position(|n| n.uid() == uid)
    }

    /// Resolve a locator to the live anchor, or `None` if the node is gone
    /// or never had that anchor.
    pub fn resolve(&self, r: &AnchorRef) -> Option<&Anchor> {
        self.node(r.node)?.anchor(r.side, &r.name)
    }

    pub fn resolve_mut(&mut self, r: &AnchorRef) -> Option<&mut Anchor> {
        self.node_mut(r.node)?.anchor_mut(r.side, &r.name)
    }

    /// World position of the anchor a locator points at.
    pub fn anchor_world_pos(&self, r: &AnchorRef) -> Option<Point> {
        self.node(r.node)?.anchor_pos(r.side, &r.name)
    }

    /// Index of the *first* link touching `r`, or `None`.
    ///
    /// Most anchors carry at most one link; callers that must handle
    /// multi-link anchors either loop until `None` (as [`delete_node`] does)
    /// or use [`links_touching`].
    ///
    /// [`delete_node`]: Blueprint::delete_node
    /// [`links_touching`]: Blueprint::links_touching
    pub fn links_of(&self, r: &AnchorRef) -> Option<usize> {
        self.links.iter().position(|link| link.touches(r))
    }

    /// All links touching `r`, for fan-out anchors.
    pub fn links_touching<'a>(&'a self, r: &'a AnchorRef) -> impl Iterator<Item = &'a Link> {
        self.links.iter().filter(move |link| link.touches(r))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert a node at `pos` and re-run validation. Always succeeds;
    /// returns the node's uid for convenience.
    pub fn add_node(&mut self, mut node: Node, pos: Point) -> Uid {
        node.position = pos;
        let uid = node.uid();
        self.nodes.push(node);
        self.changed();
        uid
    }

    /// Remove a node and every link touching any of its anchors.
    ///
    /// Each severed link fires both endpoints' unlink hooks, exactly as an
    /// explicit [`unlink`] would. Returns `false` (and does nothing) when
    /// the node is not in this blueprint.
    ///
    /// [`unlink`]: Blueprint::unlink
    pub fn delete_node(&mut self, uid: Uid) -> bool {
        let Some(index) = self.node_index(uid) else {
            return false;
        };
        let refs: Vec<AnchorRef> = [Side::Left, Side::Right]
            .into_iter()
            .flat_map(|side| {
                self.nodes[index]
                    .anchors(side)
                    .keys()
                    .map(move |name| AnchorRef::new(uid, side, name.clone()))
            })
            .collect();
        for r in &refs {
            // An anchor may carry several links; unlink removes one each time.
            while self.links_of(r).is_some() {
                self.unlink(r);
            }
        }
        self.nodes.remove(index);
        debug!("deleted node #{uid}");
        self.changed();
        true
    }

    /// Append a link between two anchors and fire both `on_link` hooks,
    /// `a`'s node first.
    ///
    /// No legality checking happens here; run
    /// [`crate::linking::validate_link`] first.
    pub fn link(&mut self, a: AnchorRef, b: AnchorRef) -> &Link {
        debug!("link {a} <-> {b}");
        let index = self.links.len();
        self.links.push(Link {
            a: a.clone(),
            b: b.clone(),
        });
        self.fire_on_link(&a, &b);
        self.fire_on_link(&b, &a);
        self.changed();
        &self.links[index]
    }

    /// Remove the first link touching `r`, firing both endpoints' unlink
    /// hooks with the *other* endpoint. No-op when nothing is linked there.
    pub fn unlink(&mut self, r: &AnchorRef) {
        let Some(index) = self.links_of(r) else {
            return;
        };
        let Link { a, b } = self.links[index].clone();
        debug!("unlink {a} <-> {b}");
        self.fire_on_unlink(&a, &b);
        self.fire_on_unlink(&b, &a);
        self.links.remove(index);
        self.changed();
    }

    fn fire_on_link(&mut self, target: &AnchorRef, other: &AnchorRef) {
        if let Some(index) = self.node_index(target.node) {
            let behavior = self.nodes[index].behavior();
            behavior.on_link(&mut self.nodes[index], other);
        }
    }

    fn fire_on_unlink(&mut self, target: &AnchorRef, other: &AnchorRef) {
        if let Some(index) = self.node_index(target.node) {
            let behavior = self.nodes[index].behavior();
            behavior.on_unlink(&mut self.nodes[index], other);
        }
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Re-run every node's validity hook and rebuild the aggregated error
    /// list. Node errors are overwritten, never appended to, so the result
    /// is a pure function of the current graph.
    pub fn check_validity(&mut self) {
        let mut fresh: Vec<Vec<String>> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            fresh.push(node.behavior().check_validity(node, self));
        }
        self.errors.clear();
        for (node, errors) in self.nodes.iter_mut().zip(fresh) {
            node.errors = errors;
            self.errors.extend_from_slice(&node.errors);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn changed(&mut self) {
        debug!("blueprint #{} changed", self.id);
        self.check_validity();
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// World-space bounding box of all nodes; the degenerate zero bounds
    /// when the blueprint is empty.
    pub fn bounds(&self) -> Bounds {
        if self.nodes.is_empty() {
            return Bounds::default();
        }
        let mut bounds = Bounds::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for node in &self.nodes {
            bounds.x1 = bounds.x1.min(node.position.x);
            bounds.y1 = bounds.y1.min(node.position.y);
            bounds.x2 = bounds.x2.max(node.position.x + node.size.width);
            bounds.y2 = bounds.y2.max(node.position.y + node.size.height);
        }
        bounds
    }
}
