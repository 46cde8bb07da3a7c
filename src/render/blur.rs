//! Gaussian blur on premultiplied RGBA8, approximated by three successive box blurs.
//!
//! Each box pass is a sliding-window average with clamped edges, so cost is independent of
//! the radius. Rows are processed in parallel; columns are handled by transposing.

use rayon::prelude::*;

use crate::render::surface::Surface;

const BOX_PASSES: usize = 3;
/// Keeps `(2r + 1) * 255` well inside the `u32` window accumulator.
const MAX_BOX_RADIUS: usize = 4096;

/// Blur `surface` in place with standard deviation `sigma` pixels.
pub fn gaussian_blur_in_place(surface: &mut Surface, sigma: f32) {
    if !sigma.is_finite() || sigma < 0.5 || surface.size().is_empty() {
        return;
    }
    let radii = box_radii_for_sigma(sigma).map(|r| r.min(MAX_BOX_RADIUS));
    let (w, h) = (surface.width() as usize, surface.height() as usize);

    let data = surface.data_mut();
    for &r in &radii {
        box_blur_rows(data, w, r);
    }
    let mut transposed = transpose_rgba8(data, w, h);
    for &r in &radii {
        box_blur_rows(&mut transposed, h, r);
    }
    let restored = transpose_rgba8(&transposed, h, w);
    data.copy_from_slice(&restored);
}

/// Box radii whose three-pass convolution approximates a Gaussian of `sigma`.
pub(crate) fn box_radii_for_sigma(sigma: f32) -> [usize; BOX_PASSES] {
    let n = BOX_PASSES as f64;
    let sigma = sigma.clamp(0.0, 1.0e6);
    let s = f64::from(sigma);
    let w_ideal = ((12.0 * s * s / n) + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wl_f = wl as f64;
    let m_ideal =
        (12.0 * s * s - n * wl_f * wl_f - 4.0 * n * wl_f - 3.0 * n) / (-4.0 * wl_f - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut out = [0usize; BOX_PASSES];
    for (i, r) in out.iter_mut().enumerate() {
        let width = if i < m { wl } else { wu };
        *r = ((width - 1) / 2) as usize;
    }
    out
}

fn box_blur_rows(data: &mut [u8], width: usize, radius: usize) {
    if radius == 0 || width == 0 {
        return;
    }
    data.par_chunks_mut(width * 4).for_each(|row| {
        let src = row.to_vec();
        box_blur_row(&src, row, width, radius);
    });
}

fn box_blur_row(src: &[u8], dst: &mut [u8], width: usize, radius: usize) {
    let last = width as i64 - 1;
    let r = radius as i64;
    let window = (2 * radius + 1) as u32;
    let half = window / 2;
    let px = |i: i64| -> usize { (i.clamp(0, last) as usize) * 4 };

    let mut acc = [0u32; 4];
    for i in -r..=r {
        let idx = px(i);
        for c in 0..4 {
            acc[c] += u32::from(src[idx + c]);
        }
    }

    for x in 0..width as i64 {
        let out = (x as usize) * 4;
        for c in 0..4 {
            dst[out + c] = ((acc[c] + half) / window).min(255) as u8;
        }
        let add = px(x + r + 1);
        let sub = px(x - r);
        for c in 0..4 {
            acc[c] = acc[c] + u32::from(src[add + c]) - u32::from(src[sub + c]);
        }
    }
}

fn transpose_rgba8(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; src.len()];
    out.par_chunks_mut(height * 4)
        .enumerate()
        .for_each(|(x, col)| {
            for y in 0..height {
                let s = (y * width + x) * 4;
                col[y * 4..y * 4 + 4].copy_from_slice(&src[s..s + 4]);
            }
        });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
