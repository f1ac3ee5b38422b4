//! Screen to world transform, panning, and zooming.
//!
//! The viewport holds a zoom factor and a camera offset in screen units.
//! `screen = world * zoom + offset` and `world = (screen - offset) / zoom`;
//! the two are exact inverses for a fixed `(zoom, offset)` pair.
//!
//! The camera keeps two offsets: `offset` is what rendering uses every
//! frame, `target_offset` is where the camera wants to be. The per-frame
//! [`tick`] moves `offset` a fixed fraction toward the target, which
//! animates programmatic re-centering. User gestures (pan, wheel zoom)
//! keep the two synced so they take effect immediately.
//!
//! [`tick`]: Viewport::tick

use crate::geom::{Bounds, Point, Size};

/// Multiplier applied per wheel notch.
pub const ZOOM_STEP: f32 = 1.15;

/// Lower zoom clamp; keeps the inverse transform well-conditioned.
pub const MIN_ZOOM: f32 = 0.01;

/// Fraction of the remaining distance covered per tick.
const SMOOTHING: f32 = 0.2;

/// Camera state and coordinate conversions for one rendering surface.
#[derive(Clone, Debug)]
pub struct Viewport {
    zoom: f32,
    offset: Point,
    target_offset: Point,
    drag_origin: Point,
    panning: bool,
    pan_moved: bool,
    view_size: Size,
}

impl Viewport {
    pub fn new(view_size: Size) -> Self {
        Self {
            zoom: 1.0,
            offset: Point::ZERO,
            target_offset: Point::ZERO,
            drag_origin: Point::ZERO,
            panning: false,
            pan_moved: false,
            view_size,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn view_size(&self) -> Size {
        self.view_size
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Track a resize of the rendering surface.
    pub fn resize(&mut self, view_size: Size) {
        self.view_size = view_size;
    }

    // ------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------

    pub fn world_to_screen(&self, p: Point) -> Point {
        p * self.zoom + self.offset
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        (p - self.offset) / self.zoom
    }

    /// Scale a world-space length to screen pixels.
    pub fn world_to_screen_dim(&self, d: f32) -> f32 {
        d * self.zoom
    }

    pub fn screen_to_world_dim(&self, d: f32) -> f32 {
        d / self.zoom
    }

    /// The world-space rectangle currently visible, grown by `margin`
    /// screen pixels on every edge. Renderers use it for node culling.
    pub fn world_viewport(&self, margin: f32) -> Bounds {
        let top_left = self.screen_to_world(Point::new(-margin, -margin));
        let bottom_right = self.screen_to_world(Point::new(
            self.view_size.width + margin,
            self.view_size.height + margin,
        ));
        Bounds::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    // ------------------------------------------------------------------
    // Panning
    // ------------------------------------------------------------------

    /// Start a pan drag at a screen position.
    pub fn begin_pan(&mut self, screen: Point) {
        self.panning = true;
        self.pan_moved = false;
        self.drag_origin = screen;
    }

    /// Feed a pointer move; pans only while a drag is active. The target
    /// offset is snapped along so smoothing never fights the hand.
    pub fn pointer_move(&mut self, screen: Point) {
        if !self.panning {
            return;
        }
        let delta = screen - self.drag_origin;
        if delta != Point::ZERO {
            self.pan_moved = true;
        }
        self.offset += delta;
        self.target_offset = self.offset;
        self.drag_origin = screen;
    }

    /// End the pan drag; returns whether the pointer actually moved while
    /// dragging (a stationary press-release is a click, not a pan).
    pub fn end_pan(&mut self) -> bool {
        self.panning = false;
        self.pan_moved
    }

    // ------------------------------------------------------------------
    // Zooming
    // ------------------------------------------------------------------

    /// Zoom by one step, keeping the world point under `cursor` (screen
    /// coordinates) visually stationary.
    pub fn zoom_at(&mut self, cursor: Point, zoom_in: bool) {
        let before = self.screen_to_world(cursor);
        if zoom_in {
            self.zoom *= ZOOM_STEP;
        } else {
            self.zoom /= ZOOM_STEP;
        }
        self.zoom = self.zoom.max(MIN_ZOOM);
        let after = self.screen_to_world(cursor);
        self.offset += (after - before) * self.zoom;
        self.target_offset = self.offset;
    }

    // ------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------

    /// Set the camera target so `world` lands on the screen center; the
    /// transition animates through [`tick`](Viewport::tick).
    pub fn center_on(&mut self, world: Point) {
        let center = Point::new(self.view_size.width * 0.5, self.view_size.height * 0.5);
        self.target_offset = center - world * self.zoom;
    }

    /// Per-frame offset smoothing: exponential approach to the target.
    pub fn tick(&mut self) {
        self.offset += (self.target_offset - self.offset) * SMOOTHING;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}
