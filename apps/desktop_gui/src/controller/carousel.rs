//! Carousel navigation: pointer-drag scrolling plus eased step-by-one-card
//! scrolling over a single horizontal viewport.

/// One card's rendered width including the inter-card gap.
pub const STEP_WIDTH: f32 = 260.0;

const STEP_ANIMATION_SECS: f32 = 0.3;

/// Drag gesture state. Dragging always carries the origin context captured
/// at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        origin_pointer_x: f32,
        origin_offset: f32,
    },
}

#[derive(Debug, Clone, Copy)]
struct StepAnimation {
    from: f32,
    to: f32,
    elapsed: f32,
}

pub struct CarouselState {
    offset: f32,
    drag: DragState,
    animation: Option<StepAnimation>,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            offset: 0.0,
            drag: DragState::Idle,
            animation: None,
        }
    }
}

impl CarouselState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Pointer-down inside the viewport: capture the drag origin. The
    /// pointer takes over from any running step animation.
    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.animation = None;
        self.drag = DragState::Dragging {
            origin_pointer_x: pointer_x,
            origin_offset: self.offset,
        };
    }

    /// Pointer-move while dragging: the offset tracks the pointer 1:1,
    /// inversely (dragging right reveals leftward cards). No-op when idle.
    pub fn drag_to(&mut self, pointer_x: f32) {
        if let DragState::Dragging {
            origin_pointer_x,
            origin_offset,
        } = self.drag
        {
            self.animation = None;
            self.offset = origin_offset - (pointer_x - origin_pointer_x);
        }
    }

    /// Pointer-up or pointer-leave: back to idle, no inertia.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn step_previous(&mut self) {
        self.step_by(-STEP_WIDTH);
    }

    pub fn step_next(&mut self) {
        self.step_by(STEP_WIDTH);
    }

    /// Consecutive steps accumulate: a second press while animating extends
    /// the target by another step width.
    fn step_by(&mut self, delta: f32) {
        let target = self.animation.map_or(self.offset, |anim| anim.to) + delta;
        self.animation = Some(StepAnimation {
            from: self.offset,
            to: target,
            elapsed: 0.0,
        });
    }

    /// Advances the step animation by `dt` seconds (cubic ease-out).
    /// Returns true while an animation is still running.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(mut anim) = self.animation else {
            return false;
        };
        anim.elapsed += dt;
        let t = (anim.elapsed / STEP_ANIMATION_SECS).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.offset = anim.from + (anim.to - anim.from) * eased;
        if t >= 1.0 {
            self.animation = None;
            false
        } else {
            self.animation = Some(anim);
            true
        }
    }

    pub fn animation_target(&self) -> Option<f32> {
        self.animation.map(|anim| anim.to)
    }

    /// List refresh: the viewport jumps to the start instantly, whatever
    /// else is going on. An active drag keeps its origin context.
    pub fn reset_offset(&mut self) {
        self.offset = 0.0;
        self.animation = None;
    }

    /// Adopts the viewport's own (boundary-clamped) offset. Skipped while a
    /// step animation is driving the offset.
    pub fn sync_from_viewport(&mut self, offset: f32) {
        if self.animation.is_none() {
            self.offset = offset;
        }
    }
}
