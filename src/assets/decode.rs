use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::Size,
    error::{CardError, CardResult},
};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CardError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(CardError::decode("decoded image has zero extent"));
    }
    Ok(rgba)
}

/// Scale and centre-crop `img` so it exactly fills `target`, preserving aspect ratio.
pub fn fit(img: &RgbaImage, target: Size) -> RgbaImage {
    let (w, h) = img.dimensions();
    if target.is_empty() || w == 0 || h == 0 {
        return RgbaImage::new(target.width, target.height);
    }
    if (w, h) == (target.width, target.height) {
        return img.clone();
    }

    let (cx, cy, cw, ch) = centered_crop(Size::new(w, h), target);
    let cropped = image::imageops::crop_imm(img, cx, cy, cw, ch).to_image();
    image::imageops::resize(&cropped, target.width, target.height, FilterType::Lanczos3)
}

/// Largest centred box of `source` with the aspect ratio of `target`: `(x, y, w, h)`.
pub(crate) fn centered_crop(source: Size, target: Size) -> (u32, u32, u32, u32) {
    let (sw, sh) = (u64::from(source.width), u64::from(source.height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));

    // Compare sw/sh against tw/th without floats.
    if sw * th > tw * sh {
        let cw = ((sh * tw + th / 2) / th).clamp(1, sw);
        let x = (sw - cw) / 2;
        (x as u32, 0, cw as u32, source.height)
    } else {
        let ch = ((sw * th + tw / 2) / tw).clamp(1, sh);
        let y = (sh - ch) / 2;
        (0, y as u32, source.width, ch as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
