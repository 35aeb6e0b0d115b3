use crate::coords::Rect;

/// One laid-out glyph relative to the text origin (baseline-left).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphBox {
    pub rect: Rect,
    pub ch: char,
}

/// Text measurement and layout the canvas draws with.
///
/// The canvas renders each [`GlyphBox`] as geometry. A glyph-atlas source can
/// replace [`BoxGlyphs`] without touching paths or batching.
pub trait GlyphSource {
    /// Advance width of `text` at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Appends glyph boxes for the visible characters of `text`.
    fn layout(&self, text: &str, font_size: f32, out: &mut Vec<GlyphBox>);
}

/// Monospaced placeholder glyphs: a box per character, blanks skipped.
#[derive(Debug, Copy, Clone)]
pub struct BoxGlyphs {
    /// Character width as a fraction of the font size.
    pub width_ratio: f32,
    /// Gap after each character as a fraction of the character width.
    pub spacing_ratio: f32,
}

impl Default for BoxGlyphs {
    fn default() -> Self {
        Self {
            width_ratio: 0.6,
            spacing_ratio: 0.2,
        }
    }
}

impl GlyphSource for BoxGlyphs {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.width_ratio
    }

    fn layout(&self, text: &str, font_size: f32, out: &mut Vec<GlyphBox>) {
        let char_w = font_size * self.width_ratio;
        let advance = char_w * (1.0 + self.spacing_ratio);
        let mut x = 0.0;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                out.push(GlyphBox {
                    rect: Rect::new(x, -font_size * 0.8, char_w * 0.9, font_size * 0.9),
                    ch,
                });
            }
            x += advance;
        }
    }
}
