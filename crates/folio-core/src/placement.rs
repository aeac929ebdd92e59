//! Aspect-preserving image placement on a page.
//!
//! A rendered diagram is scaled so that one of its dimensions reaches the
//! page interior (the page minus its margins) while the other shrinks
//! proportionally. The scaled rectangle is then centered on the page, and a
//! title is anchored at a fixed distance below the top edge.
//!
//! Width is tried first: the image takes the full interior width unless the
//! resulting height would overflow the interior height, in which case the
//! height becomes the binding constraint.
//!
//! # Example
//!
//! ```
//! # use folio_core::geometry::Size;
//! # use folio_core::placement::fit_within;
//! // A 1200×1600 image on US Letter with 50pt margins
//! let fitted = fit_within(Size::new(1200.0, 1600.0), Size::new(512.0, 692.0)).unwrap();
//! assert_eq!(fitted.width(), 512.0);
//! assert!((fitted.height() - 682.6667).abs() < 0.001);
//! ```

use log::trace;
use thiserror::Error;

use crate::geometry::{Bounds, Insets, Point, Size};

/// Errors produced when no sensible placement exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("image has no area ({width}×{height})")]
    EmptyImage { width: f32, height: f32 },

    #[error("page interior has no area ({width}×{height}); margins are too large")]
    EmptyInterior { width: f32, height: f32 },
}

/// Fixed layout parameters shared by every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    margin: f32,
    title_offset: f32,
}

impl PlacementRules {
    /// Total margin, split evenly between opposite sides.
    pub const DEFAULT_MARGIN: f32 = 100.0;
    /// Distance from the top edge to the title baseline.
    pub const DEFAULT_TITLE_OFFSET: f32 = 30.0;

    /// Creates rules with a total margin per axis and a title offset.
    ///
    /// # Arguments
    ///
    /// * `margin` - Sum of both margins along one axis (50pt per side for 100).
    /// * `title_offset` - Distance from the top edge to the title baseline.
    pub fn new(margin: f32, title_offset: f32) -> Self {
        Self {
            margin,
            title_offset,
        }
    }

    /// Returns the total margin per axis.
    pub fn margin(self) -> f32 {
        self.margin
    }

    /// Returns the title offset from the top edge.
    pub fn title_offset(self) -> f32 {
        self.title_offset
    }

    /// Returns the margins as per-side insets.
    pub fn insets(self) -> Insets {
        Insets::uniform(self.margin / 2.0)
    }
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARGIN, Self::DEFAULT_TITLE_OFFSET)
    }
}

/// Where an image and its title go on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    image: Bounds,
    title_anchor: Point,
}

impl Placement {
    /// Rectangle the image is drawn into.
    pub fn image(self) -> Bounds {
        self.image
    }

    /// Point on the title baseline that the title is centered on.
    pub fn title_anchor(self) -> Point {
        self.title_anchor
    }
}

/// Scales `image` to fit `interior` without changing its aspect ratio.
///
/// The width bound is preferred; the height bound takes over only when the
/// width-bound height would exceed `interior.height()`. The result always
/// has at least one dimension equal to the corresponding interior dimension.
///
/// # Errors
///
/// Returns [`PlacementError`] when either size has no positive, finite area.
pub fn fit_within(image: Size, interior: Size) -> Result<Size, PlacementError> {
    if image.is_empty() || !image.is_finite() {
        return Err(PlacementError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    if interior.is_empty() || !interior.is_finite() {
        return Err(PlacementError::EmptyInterior {
            width: interior.width(),
            height: interior.height(),
        });
    }

    let aspect = image.aspect();
    let width = interior.width();
    let height = width * aspect;

    if height > interior.height() {
        let height = interior.height();
        Ok(Size::new(height / aspect, height))
    } else {
        Ok(Size::new(width, height))
    }
}

/// Computes the full page placement for an image of `image` pixels.
///
/// The fitted rectangle is centered on the whole page, so the margins are
/// symmetric. The title anchor sits horizontally centered,
/// `rules.title_offset()` below the top edge.
///
/// # Errors
///
/// Returns [`PlacementError`] when the image is empty or the margins leave
/// no interior.
pub fn place(image: Size, page: Size, rules: PlacementRules) -> Result<Placement, PlacementError> {
    let interior = page.shrink(rules.insets());
    let fitted = fit_within(image, interior)?;

    let origin = Point::new(
        (page.width() - fitted.width()) / 2.0,
        (page.height() - fitted.height()) / 2.0,
    );
    let image_bounds = Bounds::new_from_origin(origin, fitted);
    let title_anchor = Point::new(page.width() / 2.0, page.height() - rules.title_offset());

    trace!(
        image_width = image.width(),
        image_height = image.height(),
        display_width = fitted.width(),
        display_height = fitted.height();
        "Computed page placement"
    );

    Ok(Placement {
        image: image_bounds,
        title_anchor,
    })
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn image_strategy() -> impl Strategy<Value = Size> {
        (1.0f32..5000.0, 1.0f32..5000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn page_strategy() -> impl Strategy<Value = Size> {
        (150.0f32..2000.0, 150.0f32..2000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The fitted size keeps the source aspect ratio.
    fn check_aspect_preserved(image: Size, page: Size) -> Result<(), TestCaseError> {
        let interior = page.shrink(PlacementRules::default().insets());
        let fitted = fit_within(image, interior).unwrap();

        let expected = image.width() / image.height();
        let actual = fitted.width() / fitted.height();
        prop_assert!(
            approx_eq!(f32, actual, expected, epsilon = expected * 1e-3),
            "aspect changed from {expected} to {actual}"
        );
        Ok(())
    }

    /// Both interior bounds hold and at least one of them is tight.
    fn check_bounds_respected(image: Size, page: Size) -> Result<(), TestCaseError> {
        let interior = page.shrink(PlacementRules::default().insets());
        let fitted = fit_within(image, interior).unwrap();

        let tolerance = 0.01;
        prop_assert!(fitted.width() <= interior.width() + tolerance);
        prop_assert!(fitted.height() <= interior.height() + tolerance);

        let width_tight = approx_eq!(f32, fitted.width(), interior.width(), epsilon = tolerance);
        let height_tight =
            approx_eq!(f32, fitted.height(), interior.height(), epsilon = tolerance);
        prop_assert!(
            width_tight || height_tight,
            "neither bound tight: {fitted:?} in {interior:?}"
        );
        Ok(())
    }

    /// The image rectangle is centered on the page.
    fn check_centered(image: Size, page: Size) -> Result<(), TestCaseError> {
        let placement = place(image, page, PlacementRules::default()).unwrap();
        let bounds = placement.image();

        let expected_x = (page.width() - bounds.width()) / 2.0;
        let expected_y = (page.height() - bounds.height()) / 2.0;
        prop_assert!(approx_eq!(f32, bounds.min_x(), expected_x, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, bounds.min_y(), expected_y, epsilon = 0.01));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn aspect_preserved(image in image_strategy(), page in page_strategy()) {
            check_aspect_preserved(image, page)?;
        }

        #[test]
        fn bounds_respected(image in image_strategy(), page in page_strategy()) {
            check_bounds_respected(image, page)?;
        }

        #[test]
        fn centered(image in image_strategy(), page in page_strategy()) {
            check_centered(image, page)?;
        }
    }
}
