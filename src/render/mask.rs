use crate::foundation::{core::Size, math::unit_to_u8};

/// Rounded-rectangle coverage mask spanning a whole layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedMask {
    /// Corner radius in pixels, clamped to half the shorter side.
    pub radius: f32,
}

impl RoundedMask {
    /// Mask with the given corner radius.
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Anti-aliased coverage (0..=255) for every pixel of a `size` layer.
    pub fn coverage(&self, size: Size) -> Vec<u8> {
        let (w, h) = (size.width as f32, size.height as f32);
        let radius = effective_radius(self.radius, size);
        let half_w = w * 0.5;
        let half_h = h * 0.5;

        let mut out = Vec::with_capacity(size.pixel_count());
        for y in 0..size.height {
            let py = y as f32 + 0.5 - half_h;
            for x in 0..size.width {
                let px = x as f32 + 0.5 - half_w;
                let d = rounded_rect_sdf(px, py, half_w, half_h, radius);
                out.push(unit_to_u8(0.5 - d));
            }
        }
        out
    }
}

fn effective_radius(radius: f32, size: Size) -> f32 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    let max = size.width.min(size.height) as f32 * 0.5;
    radius.min(max)
}

/// Signed distance from `(px, py)` (relative to the centre) to a rounded rectangle edge.
fn rounded_rect_sdf(px: f32, py: f32, half_w: f32, half_h: f32, radius: f32) -> f32 {
    let qx = px.abs() - (half_w - radius);
    let qy = py.abs() - (half_h - radius);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
