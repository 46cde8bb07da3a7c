use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::fonts::FontData,
    foundation::error::{CardError, CardResult},
    render::surface::Surface,
};

/// Transparent margin around rasterised text so antialiased glyph edges are not clipped.
const TEXT_PAD_PX: u16 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Rasterised single-line text.
pub struct TextSprite {
    /// Premultiplied glyph coverage in the brush colour.
    pub surface: Surface,
    /// Padding to subtract from the intended draw position.
    pub origin_shift: i32,
}

/// A face registered with both the shaper and the rasteriser, sharing one byte buffer.
struct RegisteredFace {
    family: String,
    cpu: vello_cpu::peniko::FontData,
}

/// Stateful helper for shaping text from raw font bytes and rasterising it.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: HashMap<usize, RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Engine with an empty font collection.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn face_for(&mut self, font: &FontData) -> CardResult<&RegisteredFace> {
        let key = font.bytes().as_ptr() as usize;
        if !self.faces.contains_key(&key) {
            let face = self.register(font)?;
            self.faces.insert(key, face);
        }
        self.faces
            .get(&key)
            .ok_or_else(|| CardError::render("registered font face missing from cache"))
    }

    fn register(&mut self, font: &FontData) -> CardResult<RegisteredFace> {
        let shared: Arc<dyn AsRef<[u8]> + Send + Sync> = font.shared_bytes();
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::new(Arc::clone(&shared)), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::render("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::render("registered font family has no name"))?
            .to_string();
        let cpu =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(shared), font.index());
        Ok(RegisteredFace {
            family: family_name,
            cpu,
        })
    }

    /// Shape `text` on a single unbounded line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &FontData,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.face_for(font)?.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Shape and rasterise `text`. Returns `None` for empty strings.
    pub fn render_line(
        &mut self,
        text: &str,
        font: &FontData,
        size_px: f32,
        rgba: [u8; 4],
    ) -> CardResult<Option<TextSprite>> {
        if text.is_empty() {
            return Ok(None);
        }
        let layout = self.layout_line(text, font, size_px, rgba.into())?;

        let w = dimension_u16(layout.width())?;
        let h = dimension_u16(layout.height())?;
        let pad = TEXT_PAD_PX;
        let (sw, sh) = (w.saturating_add(2 * pad), h.saturating_add(2 * pad));

        let cpu_font = self.face_for(font)?.cpu.clone();

        let mut ctx = vello_cpu::RenderContext::new(sw, sh);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad),
            f64::from(pad),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&cpu_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(sw, sh);
        ctx.render_to_pixmap(&mut pixmap);
        let surface = Surface::from_premul(
            u32::from(sw),
            u32::from(sh),
            pixmap.data_as_u8_slice().to_vec(),
        )?;
        Ok(Some(TextSprite {
            surface,
            origin_shift: i32::from(pad),
        }))
    }
}

fn dimension_u16(v: f32) -> CardResult<u16> {
    if !v.is_finite() || v < 0.0 {
        return Err(CardError::render("text layout produced an invalid extent"));
    }
    let px = v.ceil().max(1.0);
    if px > f32::from(u16::MAX - 2 * TEXT_PAD_PX) {
        return Err(CardError::render("text layout extent exceeds u16"));
    }
    Ok(px as u16)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
