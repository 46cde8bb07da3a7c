use crate::foundation::{
    core::{Size, premul_rgba8, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    error::{CardError, CardResult},
    math::{mul_div255_u8, unit_to_u8},
};

/// Row-major premultiplied RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.pixel_count() * 4],
        }
    }

    /// Surface filled with a straight-alpha colour.
    pub fn solid(size: Size, rgba: [u8; 4]) -> Self {
        let px = premul_rgba8(rgba);
        Self {
            width: size.width,
            height: size.height,
            data: px.repeat(size.pixel_count()),
        }
    }

    /// Wrap an already premultiplied buffer of exactly `width * height * 4` bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> CardResult<Self> {
        let expected = Size::new(width, height).pixel_count().saturating_mul(4);
        if data.len() != expected {
            return Err(CardError::render(format!(
                "surface buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Premultiply a straight-alpha image.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Straight-alpha copy, ready for PNG encoding.
    pub fn to_rgba_image(&self) -> CardResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| CardError::render("invalid rgba buffer size"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw premultiplied bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`; transparent when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Multiply colour channels by `factor`, leaving alpha unchanged.
    ///
    /// Channels are clamped to alpha so the buffer stays valid premultiplied data.
    pub fn scale_brightness(&mut self, factor: f32) {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 1.0 };
        if factor <= 1.0 {
            let f = u16::from(unit_to_u8(factor));
            for px in self.data.chunks_exact_mut(4) {
                px[0] = mul_div255_u8(u16::from(px[0]), f);
                px[1] = mul_div255_u8(u16::from(px[1]), f);
                px[2] = mul_div255_u8(u16::from(px[2]), f);
            }
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = f32::from(px[3]);
            for c in 0..3 {
                px[c] = (f32::from(px[c]) * factor).round().min(a) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
