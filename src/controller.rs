//! Pointer-driven editing controller.
//!
//! [`EditorController`] owns the blueprint and the viewport and turns raw
//! pointer events into graph edits: hovering, node dragging, panning,
//! wheel zooming, link creation and single-node selection. The rendering
//! layer feeds it events and reads its state back every frame; it never
//! mutates the graph behind the controller's back.
//!
//! All coordinates entering the controller are screen coordinates; the
//! controller converts to world space internally.
//!
//! # Example
//!
//! ```
//! use blueprint_editor::{
//!     Anchor, AnchorType, EditorController, Node, Point, Side, Size, UidAllocator,
//! };
//!
//! let mut uids = UidAllocator::new();
//! let mut editor = EditorController::new(Size::new(800.0, 600.0));
//! let node = Node::new(&mut uids, "print", "Print")
//!     .with_anchor(Side::Left, "in", Anchor::new("In", AnchorType::Branch));
//! let uid = editor.blueprint_mut().add_node(node, Point::new(100.0, 100.0));
//!
//! // Press on the node body, drag, release: the node moved.
//! editor.pointer_pressed(Point::new(150.0, 150.0));
//! editor.pointer_moved(Point::new(180.0, 150.0));
//! editor.pointer_released(Point::new(180.0, 150.0));
//! assert_eq!(
//!     editor.blueprint().node(uid).unwrap().position,
//!     Point::new(130.0, 100.0)
//! );
//! ```

use log::debug;

use crate::anchor::AnchorRef;
use crate::blueprint::Blueprint;
use crate::geom::{Point, Size};
use crate::hit_test::{cursor_for, hover_at, Cursor, Hover};
use crate::linking::{infer_link_types, validate_link, LinkError};
use crate::uid::Uid;
use crate::viewport::Viewport;

/// Owns the graph and camera and drives them from pointer events.
pub struct EditorController {
    blueprint: Blueprint,
    viewport: Viewport,
    hover: Hover,
    /// Origin anchor of the link drag in progress, if any.
    create_link_anchor: Option<AnchorRef>,
    dragged_node: Option<Uid>,
    drag_last: Point,
    selected_node: Option<Uid>,
}

impl EditorController {
    pub fn new(view_size: Size) -> Self {
        Self {
            blueprint: Blueprint::new(),
            viewport: Viewport::new(view_size),
            hover: Hover::default(),
            create_link_anchor: None,
            dragged_node: None,
            drag_last: Point::ZERO,
            selected_node: None,
        }
    }

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    pub fn blueprint_mut(&mut self) -> &mut Blueprint {
        &mut self.blueprint
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn hover(&self) -> &Hover {
        &self.hover
    }

    pub fn selected_node(&self) -> Option<Uid> {
        self.selected_node
    }

    /// Origin anchor of the in-progress link drag, for preview rendering.
    pub fn create_link_anchor(&self) -> Option<&AnchorRef> {
        self.create_link_anchor.as_ref()
    }

    pub fn is_linking(&self) -> bool {
        self.create_link_anchor.is_some()
    }

    /// Whether the prospective link under the pointer would be accepted.
    /// `Ok(())` also when no link drag is active or no anchor is hovered.
    pub fn validate_current_link(&self) -> Result<(), LinkError> {
        match (&self.create_link_anchor, &self.hover.anchor) {
            (Some(origin), Some(target)) => validate_link(&self.blueprint, origin, target),
            _ => Ok(()),
        }
    }

    /// Cursor the UI should display right now.
    pub fn cursor(&self) -> Cursor {
        cursor_for(
            &self.hover,
            self.is_linking(),
            self.validate_current_link().is_ok(),
        )
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    /// Primary button pressed. On an anchor this starts a link drag, on a
    /// node body a node drag (and selects the node), on empty space a pan.
    pub fn pointer_pressed(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        self.hover = hover_at(&self.blueprint, world);

        if let Some(anchor) = self.hover.anchor.clone() {
            debug!("link drag from {anchor}");
            self.create_link_anchor = Some(anchor);
        } else if let Some(uid) = self.hover.node {
            self.dragged_node = Some(uid);
            self.drag_last = screen;
            self.selected_node = Some(uid);
        } else {
            self.viewport.begin_pan(screen);
        }
    }

    /// Pointer moved. Applies the active gesture (node drag or pan) and
    /// refreshes the hover state.
    pub fn pointer_moved(&mut self, screen: Point) {
        if let Some(uid) = self.dragged_node {
            let delta = (screen - self.drag_last) / self.viewport.zoom();
            if let Some(node) = self.blueprint.node_mut(uid) {
                node.position += delta;
            }
            self.drag_last = screen;
        } else {
            self.viewport.pointer_move(screen);
        }
        let world = self.viewport.screen_to_world(screen);
        self.hover = hover_at(&self.blueprint, world);
    }

    /// Primary button released. Commits or cancels the link drag, ends a
    /// node drag or pan, and updates the selection. A stationary click on
    /// empty space clears the selection.
    ///
    /// Returns the rejection reason when a link commit was attempted and
    /// refused, so the UI can surface it; `None` otherwise.
    pub fn pointer_released(&mut self, screen: Point) -> Option<LinkError> {
        let world = self.viewport.screen_to_world(screen);
        self.hover = hover_at(&self.blueprint, world);
        let mut feedback = None;

        // Any release closes an in-progress link drag, wherever it lands.
        if let Some(origin) = self.create_link_anchor.take() {
            if let Some(target) = self.hover.anchor.clone() {
                match validate_link(&self.blueprint, &origin, &target) {
                    Ok(()) => {
                        self.blueprint.link(origin.clone(), target.clone());
                        infer_link_types(&mut self.blueprint, &origin, &target);
                    }
                    Err(err) => {
                        debug!("link rejected: {err}");
                        feedback = Some(err);
                    }
                }
            }
        } else if self.dragged_node.take().is_some() {
            // Node drag over; selection was already set on press.
        } else if self.viewport.is_panning() {
            let moved = self.viewport.end_pan();
            if !moved {
                self.selected_node = None;
            }
        }
        feedback
    }

    /// Wheel input at a screen position; negative `delta_y` zooms in.
    pub fn wheel(&mut self, screen: Point, delta_y: f32) {
        self.viewport.zoom_at(screen, delta_y < 0.0);
        let world = self.viewport.screen_to_world(screen);
        self.hover = hover_at(&self.blueprint, world);
    }

    /// Double click: animate the camera to center the node under the
    /// pointer, if any.
    pub fn double_click(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        if let Some(uid) = hover_at(&self.blueprint, world).node {
            if let Some(node) = self.blueprint.node(uid) {
                let center = node.position
                    + Point::new(node.size.width * 0.5, node.size.height * 0.5);
                self.viewport.center_on(center);
            }
        }
    }

    /// Animate the camera to frame the whole blueprint.
    pub fn center_view(&mut self) {
        self.viewport.center_on(self.blueprint.bounds().center());
    }

    /// Per-frame update: camera smoothing only. Never mutates the graph.
    pub fn tick(&mut self) {
        self.viewport.tick();
    }
}
