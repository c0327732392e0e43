//! In-memory host collaborators.
//!
//! Each type is a cheap handle over shared state: clone it, hand one clone to
//! the controller and keep the other to drive or inspect the host.
//!
//! ```
//! # use showcase::host::{Container, headless::HeadlessContainer};
//! # use showcase_core::geometry::Size;
//! let container = HeadlessContainer::new(Size::new(375.0, 812.0));
//! let mut handle = container.clone();
//! handle.attach_overlay();
//! assert!(container.is_attached());
//! ```

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use showcase_core::{
    draw::PersistentLayer,
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    Animator, Container, Fade, FadeStatus, PersistenceStore, RenderSurface, SubscriptionId,
    TargetElement, TextMeasure, TextRole,
};

#[derive(Debug)]
struct ContainerState {
    bounds: Bounds,
    safe_area: Insets,
    attached: bool,
    attach_count: usize,
}

/// Fixed-size container.
#[derive(Debug, Clone)]
pub struct HeadlessContainer {
    state: Rc<RefCell<ContainerState>>,
}

impl HeadlessContainer {
    pub fn new(size: Size) -> Self {
        Self {
            state: Rc::new(RefCell::new(ContainerState {
                bounds: Bounds::new_from_top_left(Point::default(), size),
                safe_area: Insets::default(),
                attached: false,
                attach_count: 0,
            })),
        }
    }

    pub fn with_safe_area(self, insets: Insets) -> Self {
        self.state.borrow_mut().safe_area = insets;
        self
    }

    /// Resizes the container. The host then notifies the controller.
    pub fn set_size(&self, size: Size) {
        self.state.borrow_mut().bounds = Bounds::new_from_top_left(Point::default(), size);
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// Number of times the overlay was attached.
    pub fn attach_count(&self) -> usize {
        self.state.borrow().attach_count
    }
}

impl Container for HeadlessContainer {
    fn bounds(&self) -> Bounds {
        self.state.borrow().bounds
    }

    fn safe_area_insets(&self) -> Insets {
        self.state.borrow().safe_area
    }

    fn attach_overlay(&mut self) {
        let mut state = self.state.borrow_mut();
        state.attached = true;
        state.attach_count += 1;
    }

    fn detach_overlay(&mut self) {
        self.state.borrow_mut().attached = false;
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    layer: Option<PersistentLayer>,
    added: usize,
    removed: usize,
    redraws: usize,
}

/// Surface that records layer changes and redraw requests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently installed persistent layer.
    pub fn persistent_layer(&self) -> Option<PersistentLayer> {
        self.state.borrow().layer.clone()
    }

    pub fn add_count(&self) -> usize {
        self.state.borrow().added
    }

    pub fn remove_count(&self) -> usize {
        self.state.borrow().removed
    }

    pub fn redraw_count(&self) -> usize {
        self.state.borrow().redraws
    }
}

impl RenderSurface for RecordingSurface {
    fn add_persistent_layer(&mut self, layer: PersistentLayer) {
        let mut state = self.state.borrow_mut();
        state.layer = Some(layer);
        state.added += 1;
    }

    fn remove_persistent_layer(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.layer.take().is_some() {
            state.removed += 1;
        }
    }

    fn request_redraw(&mut self) {
        self.state.borrow_mut().redraws += 1;
    }
}

/// Animator that completes every fade synchronously.
#[derive(Debug, Clone, Default)]
pub struct ImmediateAnimator {
    fades: Rc<RefCell<Vec<Fade>>>,
}

impl ImmediateAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fades started so far, oldest first.
    pub fn fades(&self) -> Vec<Fade> {
        self.fades.borrow().clone()
    }
}

impl Animator for ImmediateAnimator {
    fn fade(&mut self, fade: Fade) -> FadeStatus {
        self.fades.borrow_mut().push(fade);
        FadeStatus::Finished
    }
}

/// Animator whose fades stay in flight until the test finishes them.
#[derive(Debug, Clone, Default)]
pub struct ManualAnimator {
    fades: Rc<RefCell<Vec<Fade>>>,
}

impl ManualAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fades(&self) -> Vec<Fade> {
        self.fades.borrow().clone()
    }
}

impl Animator for ManualAnimator {
    fn fade(&mut self, fade: Fade) -> FadeStatus {
        self.fades.borrow_mut().push(fade);
        FadeStatus::InFlight
    }
}

/// Flag store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    flags: Rc<RefCell<HashSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a store with `key` already set.
    pub fn with_flag(key: &str) -> Self {
        let store = Self::default();
        store.flags.borrow_mut().insert(key.to_string());
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.flags.borrow().contains(key)
    }
}

impl PersistenceStore for MemoryStore {
    fn has_flag(&self, key: &str) -> bool {
        self.contains(key)
    }

    fn set_flag(&mut self, key: &str) {
        self.flags.borrow_mut().insert(key.to_string());
    }
}

#[derive(Debug, Default)]
struct TargetState {
    frame: Bounds,
    next_id: u64,
    active: HashSet<SubscriptionId>,
    unsubscribe_count: usize,
}

/// Rectangular target whose frame is given in container space.
#[derive(Debug, Clone, Default)]
pub struct RectTarget {
    state: Rc<RefCell<TargetState>>,
}

impl RectTarget {
    pub fn new(frame: Bounds) -> Self {
        Self {
            state: Rc::new(RefCell::new(TargetState {
                frame,
                ..TargetState::default()
            })),
        }
    }

    /// Moves the target. The host then notifies the controller.
    pub fn set_frame(&self, frame: Bounds) {
        self.state.borrow_mut().frame = frame;
    }

    pub fn frame(&self) -> Bounds {
        self.state.borrow().frame
    }

    /// Number of live frame-change subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Number of successful unsubscriptions.
    pub fn unsubscribe_count(&self) -> usize {
        self.state.borrow().unsubscribe_count
    }

    /// Ids of the live subscriptions.
    pub fn subscriptions(&self) -> Vec<SubscriptionId> {
        self.state.borrow().active.iter().copied().collect()
    }
}

impl TargetElement for RectTarget {
    fn bounds_in_own_space(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.frame().to_size())
    }

    fn convert_rect_to_container(&self, rect: Bounds) -> Bounds {
        rect.translate(self.frame().min_point())
    }

    fn point_inside_hit_area(&self, point: Point) -> bool {
        self.frame().contains_point(point)
    }

    fn subscribe_frame_changes(&mut self) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId::new(state.next_id);
        state.next_id += 1;
        state.active.insert(id);
        id
    }

    fn unsubscribe_frame_changes(&mut self, id: SubscriptionId) {
        let mut state = self.state.borrow_mut();
        if state.active.remove(&id) {
            state.unsubscribe_count += 1;
        }
    }
}

/// Font-independent measurer: every character advances by a fixed amount and
/// text wraps greedily per character.
#[derive(Debug, Clone, Copy)]
pub struct FixedTextMeasure {
    advance: f32,
    line_height: f32,
}

impl FixedTextMeasure {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedTextMeasure {
    fn default() -> Self {
        Self::new(8.0, 20.0)
    }
}

impl TextMeasure for FixedTextMeasure {
    fn measure(&self, text: &str, _role: TextRole, max_width: f32) -> Size {
        let chars = text.chars().count();
        if chars == 0 {
            return Size::default();
        }

        let per_line = ((max_width / self.advance).floor() as usize).max(1);
        let lines = chars.div_ceil(per_line);
        let width = (chars.min(per_line) as f32 * self.advance).min(max_width.max(0.0));
        Size::new(width, lines as f32 * self.line_height)
    }
}
