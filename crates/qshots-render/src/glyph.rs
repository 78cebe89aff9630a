//! Tiny bitmap font for resonator labels.
//!
//! Glyphs are 3x5 cells, drawn at an integer scale with a one-cell outline
//! so labels stay legible on top of a bright pulse.

use image::{Rgba, RgbaImage};

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_bits(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        ' ' => [0; 5],
        _ => [0b111, 0b101, 0b010, 0b010, 0b111],
    }
}

/// Pixel size of `text` at `scale`, outline excluded.
pub(crate) fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let n = text.chars().count() as u32;
    if n == 0 {
        return (0, 0);
    }
    let advance = (GLYPH_W + 1) * scale;
    (n * advance - scale, GLYPH_H * scale)
}

/// Draw `text` with its top-left corner at `(x, y)`. Clips at the image edge.
pub(crate) fn draw_text(
    img: &mut RgbaImage,
    x: i64,
    y: i64,
    text: &str,
    scale: u32,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
) {
    let scale = i64::from(scale.max(1));
    // Outline first, fill on top.
    for (pass_color, spread) in [(outline, scale), (fill, 0)] {
        let mut cursor = x;
        for ch in text.chars() {
            let glyph = glyph_bits(ch);
            for (row, pattern) in glyph.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if (pattern >> (GLYPH_W - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    let px = cursor + i64::from(col) * scale;
                    let py = y + row as i64 * scale;
                    fill_block(img, px - spread, py - spread, scale + 2 * spread, pass_color);
                }
            }
            cursor += i64::from(GLYPH_W + 1) * scale;
        }
    }
}

fn fill_block(img: &mut RgbaImage, x: i64, y: i64, size: i64, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + size).min(i64::from(w));
    let y1 = (y + size).min(i64::from(h));
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px as u32, py as u32, color);
        }
    }
}
