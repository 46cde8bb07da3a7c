use crate::foundation::math::mul_div255_u8;

/// Width of every rendered card, in pixels.
pub const CANVAS_WIDTH: u32 = 1280;
/// Height of every rendered card, in pixels.
pub const CANVAS_HEIGHT: u32 = 720;

/// Integer pixel offset. May be negative; layers are clipped to the destination.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Offset {
    /// Horizontal displacement, growing rightwards.
    pub x: i32,
    /// Vertical displacement, growing downwards.
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Build an offset from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by `(dx, dy)`, saturating at the `i32` range.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Move by another offset, saturating at the `i32` range.
    pub fn shifted_by(self, other: Offset) -> Self {
        self.translate(other.x, other.y)
    }
}

/// Pixel extent of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Build a size from its components.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The card canvas, `CANVAS_WIDTH × CANVAS_HEIGHT`.
    pub const fn canvas() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }

    /// Whether either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels, saturating on overflow.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Top-left offset that centres `self` inside `outer`.
    pub fn centered_in(self, outer: Size) -> Offset {
        let dx = (i64::from(outer.width) - i64::from(self.width)) / 2;
        let dy = (i64::from(outer.height) - i64::from(self.height)) / 2;
        Offset::new(dx as i32, dy as i32)
    }
}

/// Convert straight RGBA8 into premultiplied RGBA8.
pub fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
