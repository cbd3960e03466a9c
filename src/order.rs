//! Directional window selection.
//!
//! [`in_order`] classifies one pair of windows relative to a direction and
//! [`select_next`] reduces "which window is next in that direction?" to a
//! linear scan of pairwise comparisons.  Both are pure: they read the
//! snapshots they are given and nothing else.

use crate::command::{Direction, WindowInfo};
use crate::geometry::{GeometryError, WindowId};
use log::debug;

/// Returns `true` if `second` lies after `first` in `direction`.
///
/// Fails with [`GeometryError::InvalidInput`] if either snapshot lacks
/// usable geometry.  See [`Rect::comes_before`](crate::geometry::Rect::comes_before)
/// for the tie-break order.
pub fn in_order(
    first: &WindowInfo,
    second: &WindowInfo,
    direction: Direction,
) -> Result<bool, GeometryError> {
    Ok(first.rect()?.comes_before(&second.rect()?, direction))
}

/// Find the window nearest to `focused` in `direction`.
///
/// Candidates sharing `focused`'s id and candidates without usable geometry
/// are skipped.  Of the remaining windows, only those after `focused` are
/// considered, and the one closest to it wins.
///
/// Returns `focused`'s own id when no window lies in that direction, so
/// callers can treat "same id" as "stay in place".  Fails only when
/// `focused` itself is malformed.
pub fn select_next(
    focused: &WindowInfo,
    candidates: &[WindowInfo],
    direction: Direction,
) -> Result<WindowId, GeometryError> {
    let origin = focused.rect()?;

    let mut nearest = None;
    for candidate in candidates {
        let rect = match candidate.rect() {
            Ok(rect) => rect,
            Err(e) => {
                debug!("skipping candidate: {}", e);
                continue;
            }
        };
        if rect.id == origin.id || !origin.comes_before(&rect, direction) {
            continue;
        }
        match nearest {
            None => nearest = Some(rect),
            // `rect` is after the origin but before the current pick.
            Some(current) if rect.comes_before(&current, direction) => nearest = Some(rect),
            Some(_) => {}
        }
    }

    Ok(nearest.map_or(origin.id, |rect| rect.id))
}
