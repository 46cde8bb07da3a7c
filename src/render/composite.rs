use crate::{
    foundation::{
        core::{Offset, Size},
        math::{add_sat_u8, mul_div255_u8},
    },
    render::{mask::RoundedMask, surface::Surface},
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel, with `coverage` scaling the source.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }
    let cov = u16::from(coverage);
    let sa = mul_div255_u8(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let sc = mul_div255_u8(u16::from(src[c]), cov);
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(sc, dc);
    }
    out
}

/// Alpha-composite `src` onto `dst` with its top-left corner at `at`.
///
/// With a mask, `src` is clipped to a rounded rectangle covering its full extent. Pixels
/// falling outside `dst` are dropped.
pub fn composite_over_at(dst: &mut Surface, src: &Surface, at: Offset, mask: Option<RoundedMask>) {
    let coverage = mask.map(|m| m.coverage(src.size()));

    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));
    let (ax, ay) = (i64::from(at.x), i64::from(at.y));

    let x0 = ax.max(0);
    let y0 = ay.max(0);
    let x1 = (ax + sw).min(dw);
    let y1 = (ay + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_data = src.data();
    let dst_width = dst.width() as usize;
    let dst_data = dst.data_mut();
    for y in y0..y1 {
        let sy = (y - ay) as usize;
        for x in x0..x1 {
            let sx = (x - ax) as usize;
            let s_idx = sy * sw as usize + sx;
            let cov = coverage.as_ref().map_or(255, |c| c[s_idx]);
            let si = s_idx * 4;
            let di = ((y as usize) * dst_width + x as usize) * 4;
            let out = over(
                [
                    dst_data[di],
                    dst_data[di + 1],
                    dst_data[di + 2],
                    dst_data[di + 3],
                ],
                [
                    src_data[si],
                    src_data[si + 1],
                    src_data[si + 2],
                    src_data[si + 3],
                ],
                cov,
            );
            dst_data[di..di + 4].copy_from_slice(&out);
        }
    }
}

/// Composite a solid straight-alpha rectangle.
///
/// The rectangle is clipped to `dst` before any pixels are allocated.
pub fn fill_rect(dst: &mut Surface, at: Offset, size: Size, rgba: [u8; 4]) {
    let (ax, ay) = (i64::from(at.x), i64::from(at.y));
    let x0 = ax.max(0);
    let y0 = ay.max(0);
    let x1 = (ax + i64::from(size.width)).min(i64::from(dst.width()));
    let y1 = (ay + i64::from(size.height)).min(i64::from(dst.height()));
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    // All four bounds lie within the destination, which is at most u32 wide.
    let clipped = Size::new((x1 - x0) as u32, (y1 - y0) as u32);
    composite_over_at(
        dst,
        &Surface::solid(clipped, rgba),
        Offset::new(x0 as i32, y0 as i32),
        None,
    );
}

/// Composite a solid rounded rectangle.
pub fn fill_rounded_rect(dst: &mut Surface, at: Offset, size: Size, rgba: [u8; 4], radius: f32) {
    if size.is_empty() {
        return;
    }
    composite_over_at(
        dst,
        &Surface::solid(size, rgba),
        at,
        Some(RoundedMask::new(radius)),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
