//! Scroll offset, phase windows and the damped tracker that owns the offset.

use std::f32::consts::PI;

use crate::math::{damp, smoothstep};

/// Normalised scroll position in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ScrollOffset(f32);

impl ScrollOffset {
    pub const START: ScrollOffset = ScrollOffset(0.0);
    pub const END: ScrollOffset = ScrollOffset(1.0);

    /// Clamps into `[0, 1]`; NaN and infinities map to the start of the page.
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn range(self, window: PhaseWindow) -> f32 {
        window.range(self)
    }

    pub fn curve(self, window: PhaseWindow) -> f32 {
        window.curve(self)
    }

    pub fn visible(self, window: PhaseWindow) -> bool {
        window.visible(self)
    }
}

/// `clamp((offset - start) / length, 0, 1)` on a raw offset, which may lie
/// outside `[0, 1]`.
pub fn range_phase(offset: f32, start: f32, length: f32) -> f32 {
    PhaseWindow::new(start, length).progress(offset)
}

/// A sub-range of the scroll domain with its own local `[0, 1]` progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseWindow {
    pub start: f32,
    pub length: f32,
    pub margin: f32,
}

impl PhaseWindow {
    pub const fn new(start: f32, length: f32) -> Self {
        Self {
            start,
            length,
            margin: 0.0,
        }
    }

    pub const fn with_margin(self, margin: f32) -> Self {
        Self { margin, ..self }
    }

    fn bounds(&self) -> (f32, f32) {
        let start = self.start - self.margin;
        (start, start + self.length + self.margin * 2.0)
    }

    /// Local progress through the window. Zero-length and non-finite windows
    /// degrade to a step at `start` rather than producing NaN.
    pub fn range(&self, offset: ScrollOffset) -> f32 {
        self.progress(offset.get())
    }

    fn progress(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        let (start, end) = self.bounds();
        let span = end - start;
        if !span.is_finite() || span <= 0.0 {
            return if offset < start { 0.0 } else { 1.0 };
        }
        let phase = ((offset - start) / span).clamp(0.0, 1.0);
        if phase.is_nan() {
            0.0
        } else {
            phase
        }
    }

    /// Same window eased with a smoothstep.
    pub fn eased(&self, offset: ScrollOffset) -> f32 {
        smoothstep(0.0, 1.0, self.range(offset))
    }

    /// Rises and falls back to zero across the window.
    pub fn curve(&self, offset: ScrollOffset) -> f32 {
        (self.range(offset) * PI).sin()
    }

    pub fn visible(&self, offset: ScrollOffset) -> bool {
        let (start, end) = self.bounds();
        offset.get() >= start && offset.get() <= end
    }
}

/// Rocks fly from the outer field into the core.
pub const IMPLOSION: PhaseWindow = PhaseWindow::new(0.1, 0.3);
/// Rocks leave the core for their resting grid.
pub const DISPERSION: PhaseWindow = PhaseWindow::new(0.6, 0.3);
/// Core and its light shrink away.
pub const CORE_FADE: PhaseWindow = PhaseWindow::new(0.45, 0.15);
/// Explosion rays travel outward.
pub const RAYS: PhaseWindow = PhaseWindow::new(0.48, 0.45);
pub const FULL: PhaseWindow = PhaseWindow::new(0.0, 1.0);

/// Strength of the orbital precession of the outer field; gone by 0.2.
pub fn orbit_strength(offset: ScrollOffset) -> f32 {
    1.0 - smoothstep(0.0, 0.2, offset.get())
}

/// Single writer of the scroll offset.
///
/// Reads the raw scroll surface as a target and eases the published offset
/// toward it, so a flick of the wheel plays out over `damping` seconds.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    pages: f32,
    damping: f32,
    target: ScrollOffset,
    offset: ScrollOffset,
}

impl ScrollTracker {
    pub fn new(pages: f32, damping: f32) -> Self {
        Self {
            pages: pages.max(1.0),
            damping,
            target: ScrollOffset::START,
            offset: ScrollOffset::START,
        }
    }

    pub fn pages(&self) -> f32 {
        self.pages
    }

    /// Total scrollable height for a viewport of `viewport_height` pixels.
    pub fn content_height(&self, viewport_height: f32) -> f32 {
        viewport_height * self.pages
    }

    /// Converts the scroll container's metrics into a target offset.
    pub fn set_scroll_metrics(&mut self, scroll_top: f32, scroll_height: f32, client_height: f32) {
        let travel = scroll_height - client_height;
        let target = if travel > 0.0 { scroll_top / travel } else { 0.0 };
        self.target = ScrollOffset::new(target);
    }

    pub fn set_target(&mut self, target: ScrollOffset) {
        self.target = target;
    }

    pub fn target(&self) -> ScrollOffset {
        self.target
    }

    /// Advances the damped offset by `delta` seconds and returns it.
    pub fn update(&mut self, delta: f32) -> ScrollOffset {
        let next = if self.damping <= 0.0 {
            self.target.get()
        } else {
            damp(self.offset.get(), self.target.get(), delta / self.damping)
        };
        self.offset = ScrollOffset::new(next);
        self.offset
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }
}
