//! Placement of the text block around the highlighted target.
//!
//! The [`PlacementEngine`] is pure geometry: given the container bounds, its
//! safe-area insets, the effective target rectangle and the measured heights of
//! the blocks, it decides whether the target is visible enough to showcase and,
//! if so, where the title, message and optional button row go.
//!
//! # Algorithm
//!
//! 1. **Visibility**: at least `min_visible_ratio` (0.75 by default, inclusive)
//!    of the target's area must lie inside the container; otherwise the result
//!    is [`Placement::Abort`].
//! 2. **Column**: text spans the container width minus a horizontal margin on
//!    both sides. The margin grows by the container's left safe-area inset.
//! 3. **Side**: the block goes above the target only when there is strictly more
//!    space above than below; ties go below.
//! 4. **Stacking**: title, then message, then buttons, separated by the block
//!    spacing. The block is separated from the target by twice the vertical
//!    margin.
//!
//! ```text
//!   ┌───────────────────────────┐
//!   │  ┌─────── title ───────┐  │
//!   │  └─────────────────────┘  │  block (above: more room up here)
//!   │  ┌────── message ──────┐  │
//!   │  └─────────────────────┘  │
//!   │            ↕ 2 × vertical margin
//!   │        ┌────────┐         │
//!   │        │ target │         │
//!   │        └────────┘         │
//!   └───────────────────────────┘
//! ```

use log::{debug, trace};

use showcase_core::geometry::{Bounds, Insets, Point, Size};

use crate::config::PlacementConfig;

/// Horizontal extent shared by every block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColumn {
    x: f32,
    width: f32,
}

impl TextColumn {
    /// Left edge of the column.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Width available to title, message and button row.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Measured sizes of the blocks to place.
///
/// Title and message are measured at the column width, so only their heights
/// matter. Buttons keep their intrinsic width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSizes {
    title_height: f32,
    message_height: f32,
    buttons: Vec<Size>,
}

impl BlockSizes {
    pub fn new(title_height: f32, message_height: f32) -> Self {
        Self {
            title_height,
            message_height,
            buttons: Vec::new(),
        }
    }

    /// Adds a row of buttons below the message.
    pub fn with_buttons(mut self, buttons: Vec<Size>) -> Self {
        self.buttons = buttons;
        self
    }

    fn button_row_height(&self) -> f32 {
        self.buttons
            .iter()
            .map(|size| size.height())
            .fold(0.0, f32::max)
    }
}

/// Which side of the target the block was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// Rectangles of a successfully placed block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    side: Side,
    title: Bounds,
    message: Bounds,
    buttons: Vec<Bounds>,
}

impl BlockLayout {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn title(&self) -> Bounds {
        self.title
    }

    pub fn message(&self) -> Bounds {
        self.message
    }

    pub fn buttons(&self) -> &[Bounds] {
        &self.buttons
    }
}

/// Result of a placement computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Placed(BlockLayout),
    /// The target is not visible enough; the caller dismisses silently.
    Abort,
}

/// Computes block rectangles around a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Returns the column shared by all blocks.
    ///
    /// Callers measure text heights at [`TextColumn::width`] before calling
    /// [`PlacementEngine::compute`].
    pub fn text_column(&self, container: Bounds, safe_area: Insets) -> TextColumn {
        let margin = self.config.horizontal_margin() + safe_area.left().max(0.0);
        TextColumn {
            x: container.min_x() + margin,
            width: (container.width() - 2.0 * margin).max(0.0),
        }
    }

    /// Computes the placement of the blocks around `target`.
    pub fn compute(
        &self,
        container: Bounds,
        safe_area: Insets,
        target: Bounds,
        sizes: &BlockSizes,
    ) -> Placement {
        let Some(ratio) = visible_ratio(container, target) else {
            debug!("Target has zero area, aborting placement");
            return Placement::Abort;
        };

        if ratio < self.config.min_visible_ratio() {
            debug!(ratio, threshold = self.config.min_visible_ratio(); "Target not visible enough, aborting placement");
            return Placement::Abort;
        }

        let column = self.text_column(container, safe_area);
        let spacing = self.config.block_spacing();
        let gap = 2.0 * self.config.vertical_margin();

        let mut block_height = sizes.title_height + spacing + sizes.message_height;
        if !sizes.buttons.is_empty() {
            block_height += spacing + sizes.button_row_height();
        }

        let space_above = target.min_y() - container.min_y();
        let space_below = container.max_y() - target.max_y();

        let (side, top) = if space_above > space_below {
            (Side::Above, target.min_y() - gap - block_height)
        } else {
            (Side::Below, target.max_y() + gap)
        };

        let title = Bounds::new_from_top_left(
            Point::new(column.x, top),
            Size::new(column.width, sizes.title_height),
        );
        let message = Bounds::new_from_top_left(
            Point::new(column.x, title.max_y() + spacing),
            Size::new(column.width, sizes.message_height),
        );

        let row_top = message.max_y() + spacing;
        let mut cursor_x = column.x;
        let buttons = sizes
            .buttons
            .iter()
            .map(|size| {
                let bounds = Bounds::new_from_top_left(Point::new(cursor_x, row_top), *size);
                cursor_x = bounds.max_x() + spacing;
                bounds
            })
            .collect();

        debug!(side:?, ratio, space_above, space_below; "Placed text block");
        let layout = BlockLayout {
            side,
            title,
            message,
            buttons,
        };
        trace!(layout:?; "Block layout");

        Placement::Placed(layout)
    }
}

/// Fraction of `target`'s area that lies inside `container`, or `None` for a
/// zero-area target.
pub fn visible_ratio(container: Bounds, target: Bounds) -> Option<f32> {
    let target_area = target.area();
    if target_area <= 0.0 {
        return None;
    }

    let overlap = container
        .intersection(&target)
        .map(Bounds::area)
        .unwrap_or(0.0);
    Some(overlap / target_area)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    fn phone() -> Bounds {
        rect(0.0, 0.0, 375.0, 812.0)
    }

    fn placed(placement: Placement) -> BlockLayout {
        match placement {
            Placement::Placed(layout) => layout,
            Placement::Abort => panic!("expected a placed layout"),
        }
    }

    #[test]
    fn test_target_near_bottom_places_above() {
        let engine = PlacementEngine::default();
        let target = rect(20.0, 700.0, 50.0, 50.0);

        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            target,
            &BlockSizes::new(24.0, 40.0),
        ));

        assert_eq!(layout.side(), Side::Above);
        // Block bottom sits 2 * 15 above the target
        assert_approx_eq!(f32, layout.message().max_y(), 700.0 - 30.0);
        assert_approx_eq!(f32, layout.title().min_y(), 670.0 - 40.0 - 10.0 - 24.0);
    }

    #[test]
    fn test_target_near_top_places_below() {
        let engine = PlacementEngine::default();
        let target = rect(300.0, 60.0, 44.0, 44.0);

        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            target,
            &BlockSizes::new(24.0, 40.0),
        ));

        assert_eq!(layout.side(), Side::Below);
        assert_approx_eq!(f32, layout.title().min_y(), 104.0 + 30.0);
        assert_approx_eq!(f32, layout.message().min_y(), layout.title().max_y() + 10.0);
    }

    #[test]
    fn test_exact_tie_places_below() {
        let engine = PlacementEngine::default();
        // 381 above, 812 - 431 = 381 below
        let target = rect(100.0, 381.0, 50.0, 50.0);

        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            target,
            &BlockSizes::new(20.0, 20.0),
        ));

        assert_eq!(layout.side(), Side::Below);
    }

    #[test]
    fn test_column_uses_margins() {
        let engine = PlacementEngine::default();
        let column = engine.text_column(phone(), Insets::default());

        assert_approx_eq!(f32, column.x(), 15.0);
        assert_approx_eq!(f32, column.width(), 375.0 - 30.0);
    }

    #[test]
    fn test_column_adds_left_safe_inset() {
        let engine = PlacementEngine::default();
        let column = engine.text_column(phone(), Insets::new(0.0, 44.0, 0.0, 44.0));

        assert_approx_eq!(f32, column.x(), 59.0);
        assert_approx_eq!(f32, column.width(), 375.0 - 2.0 * 59.0);
    }

    #[test]
    fn test_column_ignores_negative_inset() {
        let engine = PlacementEngine::default();
        let column = engine.text_column(phone(), Insets::new(0.0, 0.0, 0.0, -10.0));
        assert_approx_eq!(f32, column.x(), 15.0);
    }

    #[test]
    fn test_column_never_negative_on_narrow_container() {
        let engine = PlacementEngine::default();
        let narrow = rect(0.0, 0.0, 20.0, 400.0);
        let column = engine.text_column(narrow, Insets::default());

        assert_approx_eq!(f32, column.width(), 0.0);
    }

    #[test]
    fn test_title_and_message_share_column() {
        let engine = PlacementEngine::default();
        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            rect(20.0, 100.0, 50.0, 50.0),
            &BlockSizes::new(30.0, 60.0),
        ));

        assert_approx_eq!(f32, layout.title().min_x(), layout.message().min_x());
        assert_approx_eq!(f32, layout.title().width(), layout.message().width());
        assert_approx_eq!(f32, layout.title().height(), 30.0);
        assert_approx_eq!(f32, layout.message().height(), 60.0);
    }

    #[test]
    fn test_fully_offscreen_target_aborts() {
        let engine = PlacementEngine::default();
        let target = rect(500.0, 900.0, 50.0, 50.0);

        assert_eq!(
            engine.compute(phone(), Insets::default(), target, &BlockSizes::default()),
            Placement::Abort
        );
    }

    #[test]
    fn test_zero_area_target_aborts() {
        let engine = PlacementEngine::default();
        let target = rect(100.0, 100.0, 0.0, 50.0);

        assert_eq!(visible_ratio(phone(), target), None);
        assert_eq!(
            engine.compute(phone(), Insets::default(), target, &BlockSizes::default()),
            Placement::Abort
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let engine = PlacementEngine::default();
        // 100 wide, 75 inside the container
        let exactly = rect(300.0, 100.0, 100.0, 40.0);
        // 74 inside
        let below = rect(301.0, 100.0, 100.0, 40.0);

        assert!(matches!(
            engine.compute(phone(), Insets::default(), exactly, &BlockSizes::default()),
            Placement::Placed(_)
        ));
        assert_eq!(
            engine.compute(phone(), Insets::default(), below, &BlockSizes::default()),
            Placement::Abort
        );
    }

    #[test]
    fn test_buttons_follow_message_in_a_row() {
        let engine = PlacementEngine::default();
        let sizes = BlockSizes::new(20.0, 30.0)
            .with_buttons(vec![Size::new(80.0, 36.0), Size::new(60.0, 30.0)]);

        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            rect(20.0, 100.0, 50.0, 50.0),
            &sizes,
        ));

        let buttons = layout.buttons();
        assert_eq!(buttons.len(), 2);
        assert_approx_eq!(f32, buttons[0].min_y(), layout.message().max_y() + 10.0);
        assert_approx_eq!(f32, buttons[0].min_x(), 15.0);
        assert_approx_eq!(f32, buttons[1].min_x(), 15.0 + 80.0 + 10.0);
        assert_approx_eq!(f32, buttons[1].min_y(), buttons[0].min_y());
    }

    #[test]
    fn test_buttons_included_in_block_above_target() {
        let engine = PlacementEngine::default();
        let sizes = BlockSizes::new(20.0, 30.0).with_buttons(vec![Size::new(80.0, 36.0)]);

        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            rect(20.0, 700.0, 50.0, 50.0),
            &sizes,
        ));

        assert_eq!(layout.side(), Side::Above);
        assert_approx_eq!(f32, layout.buttons()[0].max_y(), 670.0);
    }

    #[test]
    fn test_custom_config_is_respected() {
        let engine = PlacementEngine::new(PlacementConfig::new(20.0, 5.0, 4.0, 0.5));
        // Half of the target is visible
        let target = rect(325.0, 100.0, 100.0, 40.0);

        let layout = placed(engine.compute(
            phone(),
            Insets::default(),
            target,
            &BlockSizes::new(10.0, 10.0),
        ));

        assert_approx_eq!(f32, layout.title().min_x(), 20.0);
        assert_approx_eq!(f32, layout.title().min_y(), 140.0 + 10.0);
        assert_approx_eq!(f32, layout.message().min_y(), layout.title().max_y() + 4.0);
    }
}
