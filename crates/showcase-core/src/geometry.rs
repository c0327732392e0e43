//! Geometric primitives for overlay placement.
//!
//! This module provides the geometric types used to describe the container,
//! the highlighted target and the text blocks placed around it.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, also used as an offset vector
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Values for four sides (safe areas, padding)
//!
//! # Coordinate System
//!
//! All coordinates are container-local and follow the screen convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! "Above" a rectangle means smaller Y values, "below" means larger ones.

/// A 2D point in container coordinate space.
///
/// # Examples
///
/// ```
/// # use showcase_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let offset = Point::new(10.0, -5.0);
///
/// let moved = position.add_point(offset);
/// assert_eq!(moved.x(), 110.0);
/// assert_eq!(moved.y(), 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns the area covered by this size, zero for negative dimensions
    pub fn area(self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Used for the container bounds, the target rectangle, and every placed
/// block (title, message, buttons).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns the covered area. Inverted bounds have zero area.
    pub fn area(self) -> f32 {
        self.to_size().area()
    }

    /// Returns the overlapping region of two bounds, or `None` when they
    /// do not overlap with a positive area.
    ///
    /// # Examples
    ///
    /// ```
    /// # use showcase_core::geometry::{Bounds, Point, Size};
    /// let screen = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
    /// let target = Bounds::new_from_top_left(Point::new(80.0, 80.0), Size::new(40.0, 40.0));
    ///
    /// let overlap = screen.intersection(&target).unwrap();
    /// assert_eq!(overlap.area(), 400.0);
    ///
    /// let outside = Bounds::new_from_top_left(Point::new(200.0, 0.0), Size::new(10.0, 10.0));
    /// assert!(screen.intersection(&outside).is_none());
    /// ```
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let overlap = Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };

        (overlap.width() > 0.0 && overlap.height() > 0.0).then_some(overlap)
    }

    /// Returns true if the two bounds share a region with positive area
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns true if the point lies inside the bounds (edges included)
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Moves the bounds by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use showcase_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
    ///
    /// let moved = bounds.translate(Point::new(100.0, 50.0));
    /// assert_eq!(moved.min_x(), 110.0);
    /// assert_eq!(moved.min_y(), 70.0);
    /// assert_eq!(moved.width(), 50.0);
    /// ```
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Expands the bounds by adding insets on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Grows the bounds outward by `amount` on every side.
    ///
    /// Negative amounts shrink the bounds.
    pub fn expand(&self, amount: f32) -> Self {
        self.add_padding(Insets::uniform(amount))
    }
}

/// Spacing around an element with potentially different values for each side.
///
/// Containers report their safe-area insets (notches, rounded corners) with
/// this type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    #[test]
    fn test_point_add() {
        let result = Point::new(1.0, 2.0).add_point(Point::new(3.0, 4.0));
        assert_eq!(result.x(), 4.0);
        assert_eq!(result.y(), 6.0);
    }

    #[test]
    fn test_point_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(1.0, 0.0).is_zero());
        assert!(!Point::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_size_area_clamps_negative() {
        assert_eq!(Size::new(10.0, 20.0).area(), 200.0);
        assert_eq!(Size::new(-10.0, 20.0).area(), 0.0);
        assert_eq!(Size::new(10.0, 0.0).area(), 0.0);
    }

    #[test]
    fn test_size_add_padding() {
        let padded = Size::new(10.0, 20.0).add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded.width(), 16.0);
        assert_eq!(padded.height(), 24.0);
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = rect(10.0, 20.0, 30.0, 40.0);

        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
        assert_eq!(bounds.min_point(), Point::new(10.0, 20.0));
        assert_eq!(bounds.to_size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_bounds_intersection_partial() {
        let container = rect(0.0, 0.0, 375.0, 812.0);
        let target = rect(350.0, 100.0, 50.0, 50.0);

        let overlap = container.intersection(&target).unwrap();
        assert_eq!(overlap.min_x(), 350.0);
        assert_eq!(overlap.max_x(), 375.0);
        assert_eq!(overlap.area(), 25.0 * 50.0);
    }

    #[test]
    fn test_bounds_intersection_contained() {
        let container = rect(0.0, 0.0, 100.0, 100.0);
        let target = rect(10.0, 10.0, 20.0, 20.0);

        assert_eq!(container.intersection(&target), Some(target));
    }

    #[test]
    fn test_bounds_intersection_disjoint_and_touching() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let far = rect(50.0, 50.0, 10.0, 10.0);
        let touching = rect(10.0, 0.0, 10.0, 10.0);

        assert!(a.intersection(&far).is_none());
        // Shared edge has zero area
        assert!(a.intersection(&touching).is_none());
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_bounds_contains_point() {
        let bounds = rect(10.0, 10.0, 20.0, 20.0);

        assert!(bounds.contains_point(Point::new(15.0, 15.0)));
        assert!(bounds.contains_point(Point::new(10.0, 30.0)));
        assert!(!bounds.contains_point(Point::new(9.9, 15.0)));
        assert!(!bounds.contains_point(Point::new(15.0, 30.1)));
    }

    #[test]
    fn test_bounds_translate_then_expand() {
        let bounds = rect(20.0, 700.0, 50.0, 50.0)
            .translate(Point::new(5.0, -10.0))
            .expand(4.0);

        assert_eq!(bounds.min_x(), 21.0);
        assert_eq!(bounds.min_y(), 686.0);
        assert_eq!(bounds.width(), 58.0);
        assert_eq!(bounds.height(), 58.0);
    }

    #[test]
    fn test_bounds_expand_negative_shrinks() {
        let bounds = rect(0.0, 0.0, 20.0, 20.0).expand(-5.0);
        assert_eq!(bounds.min_x(), 5.0);
        assert_eq!(bounds.width(), 10.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 44.0);
        assert_eq!(insets.horizontal_sum(), 46.0);
        assert_eq!(insets.vertical_sum(), 4.0);
        assert_eq!(insets.left(), 44.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Intersection should be commutative.
    fn check_intersection_is_commutative(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b1.intersection(&b2), b2.intersection(&b1));
        Ok(())
    }

    /// The overlap area never exceeds the area of either operand.
    fn check_intersection_area_is_bounded(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let overlap = b1.intersection(&b2).map(Bounds::area).unwrap_or(0.0);
        prop_assert!(overlap <= b1.area() + 0.01);
        prop_assert!(overlap <= b2.area() + 0.01);
        Ok(())
    }

    /// Expanding by a margin grows each dimension by twice the margin.
    fn check_expand_grows_both_sides(b: Bounds, margin: f32) -> Result<(), TestCaseError> {
        let expanded = b.expand(margin);
        prop_assert!(approx_eq!(
            f32,
            expanded.width(),
            b.width() + 2.0 * margin,
            epsilon = 0.01
        ));
        prop_assert!(approx_eq!(
            f32,
            expanded.height(),
            b.height() + 2.0 * margin,
            epsilon = 0.01
        ));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn intersection_is_commutative(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_intersection_is_commutative(b1, b2)?;
        }

        #[test]
        fn intersection_area_is_bounded(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_intersection_area_is_bounded(b1, b2)?;
        }

        #[test]
        fn expand_grows_both_sides(b in bounds_strategy(), margin in 0.0f32..100.0) {
            check_expand_grows_both_sides(b, margin)?;
        }
    }
}
