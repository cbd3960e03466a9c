//! Window rectangles and the pairwise spatial ordering between them.
//!
//! A [`Rect`] is a validated snapshot of one browser window's position on
//! screen.  [`Rect::comes_before`] answers the single question the rest of
//! the crate is built on: *does `other` lie after `self` when looking in a
//! given direction?*

use crate::command::Direction;
use std::cmp::Ordering;

/// Browser-assigned window identifier.
pub type WindowId = i64;

/// Browser-assigned tab identifier.
pub type TabId = i64;

/// Errors produced while turning a window snapshot into a [`Rect`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A geometry field is missing, not finite, or (for width/height) not
    /// strictly positive.
    #[error("invalid input: window {} has no usable `{field}`", window_label(.window))]
    InvalidInput {
        field: &'static str,
        window: Option<WindowId>,
    },
}

fn window_label(window: &Option<WindowId>) -> String {
    window.map_or_else(|| "?".to_string(), |id| id.to_string())
}

/// An axis-aligned screen rectangle belonging to one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub id: WindowId,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Build a rectangle, rejecting non-finite coordinates and empty extents.
    pub fn new(
        id: WindowId,
        top: f64,
        left: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, GeometryError> {
        let invalid = |field| GeometryError::InvalidInput {
            field,
            window: Some(id),
        };
        if !top.is_finite() {
            return Err(invalid("top"));
        }
        if !left.is_finite() {
            return Err(invalid("left"));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(invalid("width"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(invalid("height"));
        }
        Ok(Self {
            id,
            top,
            left,
            width,
            height,
        })
    }

    /// Center point `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Returns `true` if `other` lies after `self` in `direction`.
    ///
    /// Rectangles are compared by their centers on the direction's axis.
    /// Ties fall through to the leading edge on that axis, then the leading
    /// edge on the cross axis, then the window id:
    ///
    /// | direction   | keys                               |
    /// |-------------|------------------------------------|
    /// | left/right  | center x, left, top, id            |
    /// | up/down     | center y, top, left, id            |
    ///
    /// Right and down treat "greater" as "after"; left and up invert that.
    /// Only a rectangle compared with itself (same id, same geometry) yields
    /// `false` in both directions.
    pub fn comes_before(&self, other: &Rect, direction: Direction) -> bool {
        let (cx, cy) = self.center();
        let (ox, oy) = other.center();

        let ordering = match direction {
            Direction::Left | Direction::Right => cmp_f64(cx, ox)
                .then_with(|| cmp_f64(self.left, other.left))
                .then_with(|| cmp_f64(self.top, other.top)),
            Direction::Up | Direction::Down => cmp_f64(cy, oy)
                .then_with(|| cmp_f64(self.top, other.top))
                .then_with(|| cmp_f64(self.left, other.left)),
        }
        .then_with(|| self.id.cmp(&other.id));

        match ordering {
            Ordering::Less => direction.is_forward(),
            Ordering::Greater => !direction.is_forward(),
            Ordering::Equal => false,
        }
    }
}

/// Compare two finite coordinates.  `Rect::new` guarantees finiteness, so
/// `partial_cmp` never returns `None` here.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: WindowId, top: f64, left: f64, width: f64, height: f64) -> Rect {
        Rect::new(id, top, left, width, height).unwrap()
    }

    #[test]
    fn new_accepts_well_formed_rect() {
        let r = rect(7, -20.0, 5.0, 100.0, 50.0);
        assert_eq!(r.id, 7);
        assert_eq!(r.center(), (55.0, 5.0));
    }

    #[test]
    fn new_rejects_empty_extents() {
        assert_eq!(
            Rect::new(1, 0.0, 0.0, 0.0, 10.0),
            Err(GeometryError::InvalidInput {
                field: "width",
                window: Some(1)
            })
        );
        assert_eq!(
            Rect::new(1, 0.0, 0.0, 10.0, -3.0),
            Err(GeometryError::InvalidInput {
                field: "height",
                window: Some(1)
            })
        );
    }

    #[test]
    fn new_rejects_non_finite_coordinates() {
        assert!(Rect::new(1, f64::NAN, 0.0, 10.0, 10.0).is_err());
        assert!(Rect::new(1, 0.0, f64::INFINITY, 10.0, 10.0).is_err());
        assert!(Rect::new(1, 0.0, 0.0, f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn centers_decide_when_they_differ() {
        let a = rect(1, 0.0, 0.0, 10.0, 10.0);
        let b = rect(2, 0.0, 10.0, 10.0, 10.0);
        assert!(a.comes_before(&b, Direction::Right));
        assert!(!b.comes_before(&a, Direction::Right));
        assert!(b.comes_before(&a, Direction::Left));
        assert!(!a.comes_before(&b, Direction::Left));
    }

    #[test]
    fn equal_centers_fall_back_to_leading_edge() {
        // Same center x (10), different left edges.
        let wide = rect(1, 0.0, 0.0, 20.0, 10.0);
        let narrow = rect(2, 0.0, 5.0, 10.0, 10.0);
        assert!(wide.comes_before(&narrow, Direction::Right));
        assert!(narrow.comes_before(&wide, Direction::Left));
    }

    #[test]
    fn equal_centers_and_edges_fall_back_to_cross_axis() {
        // Side by side: identical vertical geometry, so down is decided by left.
        let a = rect(1, 0.0, 0.0, 10.0, 10.0);
        let b = rect(2, 0.0, 10.0, 10.0, 10.0);
        assert!(a.comes_before(&b, Direction::Down));
        assert!(b.comes_before(&a, Direction::Up));
        assert!(!b.comes_before(&a, Direction::Down));
    }

    #[test]
    fn identical_geometry_falls_back_to_id() {
        let a = rect(1, 0.0, 0.0, 10.0, 10.0);
        let b = rect(2, 0.0, 0.0, 10.0, 10.0);
        for dir in [Direction::Right, Direction::Down] {
            assert!(a.comes_before(&b, dir));
            assert!(!b.comes_before(&a, dir));
        }
        for dir in [Direction::Left, Direction::Up] {
            assert!(b.comes_before(&a, dir));
            assert!(!a.comes_before(&b, dir));
        }
    }

    #[test]
    fn rect_is_never_before_itself() {
        let a = rect(1, 3.0, 4.0, 10.0, 10.0);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!a.comes_before(&a, dir));
        }
    }

    #[test]
    fn invalid_input_message_names_field_and_window() {
        let e = GeometryError::InvalidInput {
            field: "top",
            window: Some(42),
        };
        assert_eq!(e.to_string(), "invalid input: window 42 has no usable `top`");
        let e = GeometryError::InvalidInput {
            field: "id",
            window: None,
        };
        assert_eq!(e.to_string(), "invalid input: window ? has no usable `id`");
    }
}
