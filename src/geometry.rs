//! Angle and distance helpers shared by the chart components.
//!
//! Angles are in degrees. Screen space has y pointing down, so angles returned
//! by [`angle_of_point`] grow clockwise on screen, matching the sector sweep
//! direction used by the pie chart.

/// Maps any degree value into `[0, 360)`.
pub fn normalize_angle_degrees(angle: f32) -> f32 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Angle of `(x, y)` around `(cx, cy)`, in `(-180, 180]`.
pub fn angle_of_point(cx: f32, cy: f32, x: f32, y: f32) -> f32 {
    (y - cy).atan2(x - cx).to_degrees()
}

pub fn distance(cx: f32, cy: f32, x: f32, y: f32) -> f32 {
    (x - cx).hypot(y - cy)
}

/// Point on the circle of `radius` around `(cx, cy)` at `angle` degrees.
pub fn point_at_angle(cx: f32, cy: f32, radius: f32, angle: f32) -> (f32, f32) {
    let rad = angle.to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}
