//! The showcase lifecycle: setup, show, live updates, dismissal.
//!
//! A [`ShowcaseController`] is built with [`ShowcaseBuilder`], pointed at a
//! target with [`ShowcaseController::setup`] and made visible with
//! [`ShowcaseController::show`]. The host forwards frame changes, container
//! resizes, foreground transitions and touches; the controller keeps the
//! layout and persistent layer in sync and dismisses when asked.
//!
//! ```text
//!              setup (Placed)            dismiss
//! Configured ─────────────────▶ Placed ───────────▶ Dismissing ──▶ Dismissed
//!     │   setup (Abort)                                  ▲
//!     └──────────────────────────────────────────────────┘
//!
//! Suppressed: the persistence flag was already set; every operation is a no-op.
//! ```

use std::fmt;

use log::{debug, info, trace};
use svg::node::element::{self as svg_element, path::Data};

use showcase_core::{
    color::Color,
    draw::{HighlightStrategy, LayeredOutput, PersistentLayer, RenderLayer},
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::ShowcaseConfig,
    error::ShowcaseError,
    host::{
        Fade, FadeDirection, FadeStatus, Host, PersistenceStore, SubscriptionId, TargetElement,
        TextRole,
    },
    placement::{BlockLayout, BlockSizes, Placement, PlacementEngine},
    router::{self, TouchAction},
};

/// Title used by [`ShowcaseController::add_dismiss_button`] when none is given.
pub const DEFAULT_DISMISS_TITLE: &str = "Got it";

/// Lifecycle state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseState {
    /// Already shown once for this persistence key. Terminal.
    Suppressed,
    /// Built, no successful setup yet.
    Configured,
    /// A layout exists for the current target.
    Placed,
    /// Fade-out in flight.
    Dismissing,
    Dismissed,
}

/// Target rectangle plus the caller's offset and margin.
///
/// Rebuilt wholesale on every setup and frame change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSpec {
    raw: Bounds,
    offset: Point,
    margin: f32,
}

impl TargetSpec {
    pub fn new(raw: Bounds, offset: Point, margin: f32) -> Self {
        Self {
            raw,
            offset,
            margin,
        }
    }

    /// Target rectangle in container space, before offset and margin.
    pub fn raw(&self) -> Bounds {
        self.raw
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// The highlighted rectangle: `raw` translated by `offset`, then grown by
    /// `margin` on every side.
    pub fn effective_rect(&self) -> Bounds {
        self.raw.translate(self.offset).expand(self.margin)
    }
}

/// Identifies a button added to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(usize);

impl ButtonId {
    pub fn index(self) -> usize {
        self.0
    }
}

enum ButtonKind {
    Dismiss,
    Action(Box<dyn FnMut()>),
}

struct Button {
    title: String,
    kind: ButtonKind,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ButtonKind::Dismiss => "dismiss",
            ButtonKind::Action(_) => "action",
        };
        f.debug_struct("Button")
            .field("title", &self.title)
            .field("kind", &kind)
            .finish()
    }
}

/// A placed button in a [`ShowcaseFrame`].
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonFrame {
    id: ButtonId,
    title: String,
    bounds: Bounds,
    dismisses: bool,
}

impl ButtonFrame {
    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether this is a dismiss button rather than an action button.
    pub fn dismisses(&self) -> bool {
        self.dismisses
    }
}

/// Read-only snapshot of everything a renderer needs.
#[derive(Debug, Clone)]
pub struct ShowcaseFrame {
    container: Bounds,
    target: Bounds,
    layout: BlockLayout,
    title: String,
    message: String,
    buttons: Vec<ButtonFrame>,
    persistent_layer: Option<PersistentLayer>,
}

impl ShowcaseFrame {
    pub fn container(&self) -> Bounds {
        self.container
    }

    /// The effective target rectangle.
    pub fn target(&self) -> Bounds {
        self.target
    }

    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn buttons(&self) -> &[ButtonFrame] {
        &self.buttons
    }

    pub fn persistent_layer(&self) -> Option<&PersistentLayer> {
        self.persistent_layer.as_ref()
    }
}

#[derive(Debug)]
struct Persistence {
    key: String,
    store: Box<dyn PersistenceStore>,
}

/// Builds a [`ShowcaseController`].
///
/// # Example
///
/// ```
/// # use showcase::{ShowcaseBuilder, host::{Host, headless::*}};
/// # use showcase_core::geometry::Size;
/// let host = Host::new(
///     HeadlessContainer::new(Size::new(375.0, 812.0)),
///     RecordingSurface::new(),
///     ImmediateAnimator::new(),
///     FixedTextMeasure::default(),
/// );
/// let controller = ShowcaseBuilder::new("New feature", "Tap here to try it")
///     .with_persistence("feature-tip", MemoryStore::new())
///     .on_dismiss(|| println!("dismissed"))
///     .build(host)
///     .unwrap();
/// assert_eq!(controller.state(), showcase::ShowcaseState::Configured);
/// ```
pub struct ShowcaseBuilder {
    title: String,
    message: String,
    persistence: Option<Persistence>,
    on_dismiss: Option<Box<dyn FnOnce()>>,
    on_tap_inside: Option<Box<dyn FnOnce()>>,
    config: ShowcaseConfig,
    strategy: Option<Box<dyn HighlightStrategy>>,
}

impl ShowcaseBuilder {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            persistence: None,
            on_dismiss: None,
            on_tap_inside: None,
            config: ShowcaseConfig::default(),
            strategy: None,
        }
    }

    /// Shows the overlay at most once per `key` in `store`.
    pub fn with_persistence(
        mut self,
        key: impl Into<String>,
        store: impl PersistenceStore + 'static,
    ) -> Self {
        self.persistence = Some(Persistence {
            key: key.into(),
            store: Box::new(store),
        });
        self
    }

    /// Runs after a user-initiated dismissal, once the overlay is detached.
    pub fn on_dismiss(mut self, handler: impl FnOnce() + 'static) -> Self {
        self.on_dismiss = Some(Box::new(handler));
        self
    }

    /// Runs when the user taps the target itself.
    pub fn on_tap_inside(mut self, handler: impl FnOnce() + 'static) -> Self {
        self.on_tap_inside = Some(Box::new(handler));
        self
    }

    pub fn with_config(mut self, config: ShowcaseConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the strategy selected by the highlight configuration.
    pub fn with_strategy(mut self, strategy: Box<dyn HighlightStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Builds the controller.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Config`] for unusable placement tunables and
    /// [`ShowcaseError::Color`] if a configured color is invalid.
    pub fn build(self, host: Host) -> Result<ShowcaseController, ShowcaseError> {
        self.config.validate()?;
        let strategy = match self.strategy {
            Some(strategy) => strategy,
            None => self.config.highlight().build_strategy()?,
        };
        let dim_color = self.config.style().dim_color()?;

        let suppressed = self
            .persistence
            .as_ref()
            .is_some_and(|persistence| persistence.store.has_flag(&persistence.key));

        let state = if suppressed {
            info!(key:? = self.persistence.as_ref().map(|p| p.key.as_str()); "Showcase already seen, suppressing");
            ShowcaseState::Suppressed
        } else {
            ShowcaseState::Configured
        };

        Ok(ShowcaseController {
            state,
            title: self.title,
            message: self.message,
            persistence: self.persistence,
            on_dismiss: self.on_dismiss,
            on_tap_inside: self.on_tap_inside,
            engine: PlacementEngine::new(*self.config.placement()),
            config: self.config,
            dim_color,
            strategy,
            host,
            target: None,
            subscription: None,
            spec: None,
            layout: None,
            persistent_layer: None,
            buttons: Vec::new(),
            has_dismiss_button: false,
            attached: false,
            last_known_container_size: None,
            run_handler_after_fade: false,
        })
    }
}

impl fmt::Debug for ShowcaseBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseBuilder")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("persistence", &self.persistence)
            .field("has_on_dismiss", &self.on_dismiss.is_some())
            .field("has_on_tap_inside", &self.on_tap_inside.is_some())
            .finish_non_exhaustive()
    }
}

/// Drives one showcase overlay over one target.
pub struct ShowcaseController {
    state: ShowcaseState,
    title: String,
    message: String,
    persistence: Option<Persistence>,
    on_dismiss: Option<Box<dyn FnOnce()>>,
    on_tap_inside: Option<Box<dyn FnOnce()>>,
    config: ShowcaseConfig,
    engine: PlacementEngine,
    dim_color: Color,
    strategy: Box<dyn HighlightStrategy>,
    host: Host,
    target: Option<Box<dyn TargetElement>>,
    subscription: Option<SubscriptionId>,
    spec: Option<TargetSpec>,
    layout: Option<BlockLayout>,
    persistent_layer: Option<PersistentLayer>,
    buttons: Vec<Button>,
    has_dismiss_button: bool,
    attached: bool,
    last_known_container_size: Option<Size>,
    run_handler_after_fade: bool,
}

impl ShowcaseController {
    pub fn state(&self) -> ShowcaseState {
        self.state
    }

    /// Whether a frame-change subscription is live.
    pub fn is_observing_target(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn has_dismiss_button(&self) -> bool {
        self.has_dismiss_button
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn target_spec(&self) -> Option<&TargetSpec> {
        self.spec.as_ref()
    }

    pub fn effective_target(&self) -> Option<Bounds> {
        self.spec.as_ref().map(TargetSpec::effective_rect)
    }

    pub fn layout(&self) -> Option<&BlockLayout> {
        self.layout.as_ref()
    }

    pub fn persistent_layer(&self) -> Option<&PersistentLayer> {
        self.persistent_layer.as_ref()
    }

    pub fn last_known_container_size(&self) -> Option<Size> {
        self.last_known_container_size
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    fn accepts_configuration(&self) -> bool {
        matches!(
            self.state,
            ShowcaseState::Configured | ShowcaseState::Placed
        )
    }

    /// Points the overlay at `target`.
    ///
    /// The target's rectangle is translated by `offset` and grown by `margin`
    /// before placement. Calling again replaces all previous layout state and
    /// moves the frame-change subscription to the new target. If too little
    /// of the target is visible, the overlay dismisses without running the
    /// dismiss handler.
    pub fn setup(&mut self, mut target: Box<dyn TargetElement>, offset: Point, margin: f32) {
        if !self.accepts_configuration() {
            debug!(state:? = self.state; "Ignoring setup");
            return;
        }

        self.stop_observing();

        let subscription = target.subscribe_frame_changes();
        let raw = target.convert_rect_to_container(target.bounds_in_own_space());

        self.subscription = Some(subscription);
        self.target = Some(target);
        self.spec = Some(TargetSpec::new(raw, offset, margin));

        debug!(subscription = subscription.raw(); "Observing target frame");
        self.place();
    }

    /// Attaches the overlay and starts the fade-in.
    ///
    /// Marks the persistence key as seen. A no-op when suppressed or already
    /// dismissed.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::NotSetUp`] if no setup has placed the overlay.
    pub fn show(&mut self) -> Result<(), ShowcaseError> {
        match self.state {
            ShowcaseState::Configured => return Err(ShowcaseError::NotSetUp),
            ShowcaseState::Placed => {}
            ShowcaseState::Suppressed | ShowcaseState::Dismissing | ShowcaseState::Dismissed => {
                return Ok(());
            }
        }

        if !self.attached {
            self.host.container.attach_overlay();
            self.attached = true;
            self.host.animator.fade(Fade::new(
                FadeDirection::In,
                self.config.animation().fade_in(),
            ));
            info!(title = self.title.as_str(); "Showcase shown");
        }

        if let Some(persistence) = self.persistence.as_mut() {
            persistence.store.set_flag(&persistence.key);
        }
        Ok(())
    }

    /// Starts dismissing the overlay.
    ///
    /// With `run_handler`, the dismiss handler runs once the overlay is
    /// detached. A no-op unless configured or placed.
    pub fn dismiss(&mut self, run_handler: bool) {
        if !self.accepts_configuration() {
            return;
        }

        info!(run_handler; "Dismissing showcase");
        self.state = ShowcaseState::Dismissing;
        self.run_handler_after_fade = run_handler;

        let status = if self.attached {
            self.host.animator.fade(Fade::new(
                FadeDirection::Out,
                self.config.animation().fade_out(),
            ))
        } else {
            FadeStatus::Finished
        };

        match status {
            FadeStatus::Finished => self.finish_fade_out(),
            FadeStatus::InFlight => debug!("Waiting for fade-out"),
        }
    }

    /// Completes a dismissal after an in-flight fade-out. Idempotent.
    pub fn finish_fade_out(&mut self) {
        if self.state != ShowcaseState::Dismissing {
            return;
        }

        if self.attached {
            self.host.container.detach_overlay();
            self.attached = false;
        }
        self.host.surface.remove_persistent_layer();
        self.persistent_layer = None;
        self.stop_observing();
        self.state = ShowcaseState::Dismissed;
        info!("Showcase dismissed");

        if self.run_handler_after_fade
            && let Some(handler) = self.on_dismiss.take()
        {
            handler();
        }
    }

    /// Re-runs placement after the target moved or resized.
    pub fn on_target_frame_changed(&mut self) {
        if self.state != ShowcaseState::Placed {
            return;
        }

        if let Some(raw) = self.refresh_target_spec() {
            debug!(raw:?; "Target frame changed");
            self.place();
        }
    }

    /// Re-runs placement if the container size differs from the last one seen.
    pub fn on_container_resized(&mut self) {
        if self.state != ShowcaseState::Placed {
            return;
        }

        let size = self.host.container.bounds().to_size();
        if self.last_known_container_size == Some(size) {
            trace!(size:?; "Container size unchanged");
            return;
        }

        if let Some(raw) = self.refresh_target_spec() {
            debug!(size:?, raw:?; "Container resized");
            self.place();
        }
    }

    /// Reinstalls the persistent layer, which hosts may drop while in the
    /// background.
    pub fn on_enter_foreground(&mut self) {
        if self.state != ShowcaseState::Placed {
            return;
        }

        self.host.surface.remove_persistent_layer();
        if let Some(layer) = &self.persistent_layer {
            self.host.surface.add_persistent_layer(layer.clone());
            debug!("Reinstalled persistent layer");
        }
    }

    /// Handles a touch at `point` in container space.
    pub fn handle_touch(&mut self, point: Point) -> TouchAction {
        if self.state != ShowcaseState::Placed || !self.attached {
            return TouchAction::Ignore;
        }

        let target = self.target.as_deref();
        let action = router::classify(
            point,
            |point| target.is_some_and(|target| target.point_inside_hit_area(point)),
            self.on_tap_inside.is_some(),
            self.has_dismiss_button,
        );
        debug!(action:?, x = point.x(), y = point.y(); "Routed touch");

        if action == TouchAction::RunTapInsideHandler
            && let Some(handler) = self.on_tap_inside.take()
        {
            handler();
        }
        if let Some(run_handler) = action.dismissal() {
            self.dismiss(run_handler);
        }
        action
    }

    /// Adds a button that dismisses the overlay and runs the dismiss handler.
    ///
    /// Once added, touches outside the target no longer dismiss.
    pub fn add_dismiss_button(&mut self, title: Option<&str>) -> Option<ButtonId> {
        let title = title.unwrap_or(DEFAULT_DISMISS_TITLE);
        let id = self.push_button(title.to_string(), ButtonKind::Dismiss)?;
        self.has_dismiss_button = true;
        Some(id)
    }

    /// Adds a button that runs `action`, then dismisses without the dismiss
    /// handler.
    pub fn add_action_button(
        &mut self,
        title: impl Into<String>,
        action: impl FnMut() + 'static,
    ) -> Option<ButtonId> {
        self.push_button(title.into(), ButtonKind::Action(Box::new(action)))
    }

    fn push_button(&mut self, title: String, kind: ButtonKind) -> Option<ButtonId> {
        if !self.accepts_configuration() {
            return None;
        }

        let id = ButtonId(self.buttons.len());
        self.buttons.push(Button { title, kind });
        if self.state == ShowcaseState::Placed {
            self.place();
        }
        Some(id)
    }

    /// Presses a button.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::UnknownButton`] if `id` was not issued by this
    /// controller.
    pub fn press_button(&mut self, id: ButtonId) -> Result<(), ShowcaseError> {
        if self.state != ShowcaseState::Placed {
            return Ok(());
        }

        let button = self
            .buttons
            .get_mut(id.0)
            .ok_or(ShowcaseError::UnknownButton(id.0))?;
        debug!(title = button.title.as_str(); "Button pressed");

        let run_handler = match &mut button.kind {
            ButtonKind::Dismiss => true,
            ButtonKind::Action(action) => {
                action();
                false
            }
        };
        self.dismiss(run_handler);
        Ok(())
    }

    /// Paints the per-redraw content: the dim layer with a cutout for the
    /// effective target, then the highlight. Empty without a current layout.
    pub fn paint(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if !matches!(
            self.state,
            ShowcaseState::Placed | ShowcaseState::Dismissing
        ) {
            return output;
        }
        let (Some(target), Some(_)) = (self.effective_target(), self.layout.as_ref()) else {
            return output;
        };

        let container = self.host.container.bounds();
        let data = Data::new()
            .move_to((container.min_x(), container.min_y()))
            .line_to((container.max_x(), container.min_y()))
            .line_to((container.max_x(), container.max_y()))
            .line_to((container.min_x(), container.max_y()))
            .close()
            .move_to((target.min_x(), target.min_y()))
            .line_to((target.max_x(), target.min_y()))
            .line_to((target.max_x(), target.max_y()))
            .line_to((target.min_x(), target.max_y()))
            .close();

        let dim = svg_element::Path::new()
            .set("d", data)
            .set("fill", self.dim_color.to_string())
            .set("fill-opacity", self.dim_color.alpha())
            .set("fill-rule", "evenodd");
        output.add_to_layer(RenderLayer::Dim, Box::new(dim));

        self.strategy.paint(&mut output, target);
        output
    }

    /// Snapshot of the placed overlay, or `None` before placement, after
    /// dismissal, and while fading out after the target went off-screen.
    pub fn frame(&self) -> Option<ShowcaseFrame> {
        if !matches!(
            self.state,
            ShowcaseState::Placed | ShowcaseState::Dismissing
        ) {
            return None;
        }
        let layout = self.layout.clone()?;
        let target = self.effective_target()?;

        let buttons = self
            .buttons
            .iter()
            .zip(layout.buttons())
            .enumerate()
            .map(|(index, (button, bounds))| ButtonFrame {
                id: ButtonId(index),
                title: button.title.clone(),
                bounds: *bounds,
                dismisses: matches!(button.kind, ButtonKind::Dismiss),
            })
            .collect();

        Some(ShowcaseFrame {
            container: self.host.container.bounds(),
            target,
            layout,
            title: self.title.clone(),
            message: self.message.clone(),
            buttons,
            persistent_layer: self.persistent_layer.clone(),
        })
    }

    /// Re-reads the target rectangle in container space and rebuilds the spec
    /// with the stored offset and margin.
    fn refresh_target_spec(&mut self) -> Option<Bounds> {
        let (Some(target), Some(spec)) = (self.target.as_ref(), self.spec) else {
            return None;
        };
        let raw = target.convert_rect_to_container(target.bounds_in_own_space());
        self.spec = Some(TargetSpec::new(raw, spec.offset(), spec.margin()));
        Some(raw)
    }

    fn place(&mut self) {
        let Some(spec) = self.spec else {
            return;
        };
        let effective = spec.effective_rect();

        let container = self.host.container.bounds();
        let safe_area = self.host.container.safe_area_insets();
        self.last_known_container_size = Some(container.to_size());

        let column = self.engine.text_column(container, safe_area);
        let measure = &self.host.text_measure;
        let padding = self.config.style().button_padding();

        let title = measure.measure(&self.title, TextRole::Title, column.width());
        let message = measure.measure(&self.message, TextRole::Message, column.width());
        let buttons = self
            .buttons
            .iter()
            .map(|button| {
                let max_width = (column.width() - 2.0 * padding).max(0.0);
                let text = measure.measure(&button.title, TextRole::Button, max_width);
                Size::new(text.width() + 2.0 * padding, text.height() + 2.0 * padding)
            })
            .collect();
        let sizes = BlockSizes::new(title.height(), message.height()).with_buttons(buttons);

        match self.engine.compute(container, safe_area, effective, &sizes) {
            Placement::Abort => {
                info!(effective:?; "Target mostly off-screen, dismissing");
                self.layout = None;
                self.dismiss(false);
            }
            Placement::Placed(layout) => {
                self.layout = Some(layout);

                self.host.surface.remove_persistent_layer();
                self.persistent_layer = self.strategy.effect_region(effective);
                if let Some(layer) = &self.persistent_layer {
                    self.host.surface.add_persistent_layer(layer.clone());
                }

                self.state = ShowcaseState::Placed;
                self.host.surface.request_redraw();
                trace!(effective:?; "Showcase placed");
            }
        }
    }

    fn stop_observing(&mut self) {
        if let Some(id) = self.subscription.take() {
            if let Some(target) = self.target.as_mut() {
                target.unsubscribe_frame_changes(id);
            }
            debug!(subscription = id.raw(); "Stopped observing target frame");
        }
    }
}

impl Drop for ShowcaseController {
    fn drop(&mut self) {
        self.stop_observing();
    }
}

impl fmt::Debug for ShowcaseController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseController")
            .field("state", &self.state)
            .field("title", &self.title)
            .field("spec", &self.spec)
            .field("layout", &self.layout)
            .field("buttons", &self.buttons)
            .field("attached", &self.attached)
            .field("is_observing_target", &self.is_observing_target())
            .finish_non_exhaustive()
    }
}
