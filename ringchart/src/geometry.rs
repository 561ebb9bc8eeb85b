// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc bounds within a padded container.

use kurbo::{Insets, Point, Rect, Size};

/// Computes the bounding rectangle of the ring's center line.
///
/// The ring is inscribed in the largest square that fits the padded container,
/// centered in the padded area. The square is then inset by half a stroke so the
/// stroke stays inside it. When the foreground and background widths differ, the
/// narrower one is used for the inset: the wider stroke may then overhang the
/// square by half the difference.
///
/// `padding` uses kurbo's side convention: `x0` is left, `y0` top, `x1` right and
/// `y1` bottom.
///
/// Returns `None` when the padded container, or the inset square, has no positive
/// extent. Callers should draw nothing in that case.
pub fn ring_bounds(
    container: Size,
    padding: Insets,
    stroke_width: f64,
    background_width: f64,
) -> Option<Rect> {
    let inner_width = container.width - padding.x0 - padding.x1;
    let inner_height = container.height - padding.y0 - padding.y1;
    if inner_width <= 0.0 || inner_height <= 0.0 {
        return None;
    }

    let half_size = inner_width.min(inner_height) / 2.0;
    let center = Point::new(
        (container.width + padding.x0 - padding.x1) / 2.0,
        (container.height + padding.y0 - padding.y1) / 2.0,
    );
    let half_stroke = stroke_width.min(background_width) / 2.0;

    let radius = half_size - half_stroke;
    if radius <= 0.0 {
        return None;
    }
    Some(Rect::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    ))
}
