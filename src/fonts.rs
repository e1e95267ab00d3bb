extern crate embedded_graphics;
extern crate image;
extern crate imageproc;
extern crate rusttype;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

/// A font the boards can draw with.
///
/// TrueType fonts are read from disk at startup. If that fails the boards
/// still render, using the 5x7 embedded-graphics mono font scaled up to size.
#[derive(Clone)]
pub enum Typeface {
    Outline(rusttype::Font<'static>),
    Bitmap,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Typeface::Outline(_) => return write!(f, "Typeface::Outline"),
            Typeface::Bitmap => return write!(f, "Typeface::Bitmap"),
        }
    }
}

impl Typeface {
    pub fn load(path: Option<&std::path::Path>) -> Typeface {
        let path = match path {
            Some(path) => path,
            None => {
                warn!("No font configured, using built-in bitmap font");
                return Typeface::Bitmap;
            },
        };

        match std::fs::read(path) {
            Err(err) => {
                warn!("Could not read font {}: {}. Using built-in bitmap font", path.display(), err);
                return Typeface::Bitmap;
            },
            Ok(bytes) => match rusttype::Font::try_from_vec(bytes) {
                Some(font) => {
                    debug!("Loaded font {}", path.display());
                    return Typeface::Outline(font);
                },
                None => {
                    warn!("{} is not a usable font. Using built-in bitmap font", path.display());
                    return Typeface::Bitmap;
                },
            },
        }
    }

    pub fn draw_text(&self, imgbuf: &mut image::RgbImage, color: image::Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match *self {
            Typeface::Outline(ref font) => {
                imageproc::drawing::draw_text_mut(imgbuf, color, x, y, scale(size), font, text);
            },
            Typeface::Bitmap => {
                draw_bitmap_text(imgbuf, color, x, y, bitmap_pixel_size(size), text);
            },
        }
    }

    /// Horizontal extent of `text` in pixels.
    pub fn text_width(&self, size: f32, text: &str) -> i32 {
        match *self {
            Typeface::Outline(ref font) => {
                let glyphs: Vec<rusttype::PositionedGlyph> =
                    font.layout(text, scale(size), rusttype::point(0.0, 0.0)).collect();
                return glyphs.last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0)
                    .ceil() as i32;
            },
            Typeface::Bitmap => {
                return bitmap_text_width(bitmap_pixel_size(size), text);
            },
        }
    }
}

fn scale(s: f32) -> rusttype::Scale {
    return rusttype::Scale{x: s, y: s};
}

const BITMAP_FONT: embedded_graphics::mono_font::MonoFont<'static> =
    embedded_graphics::mono_font::iso_8859_1::FONT_5X7;

fn bitmap_pixel_size(size: f32) -> u32 {
    return (size / 12.0).floor().max(1.0) as u32;
}

// The bitmap font is Latin-1 only.
fn bitmap_text(text: &str) -> String {
    return text.replace('\u{2026}', "...");
}

fn bitmap_text_width(px: u32, text: &str) -> i32 {
    let count = bitmap_text(text).chars().count() as u32;
    if count == 0 {
        return 0;
    }
    let advance = BITMAP_FONT.character_size.width + BITMAP_FONT.character_spacing;
    return ((count * advance - BITMAP_FONT.character_spacing) * px) as i32;
}

/// Draws embedded-graphics pixels into an `RgbImage`, each one as a
/// `px`-sized square offset by `origin`.
struct ScaledCanvas<'a> {
    imgbuf: &'a mut image::RgbImage,
    color: image::Rgb<u8>,
    origin: (i32, i32),
    px: u32,
}

impl<'a> OriginDimensions for ScaledCanvas<'a> {
    fn size(&self) -> Size {
        return Size::new(self.imgbuf.width() / self.px, self.imgbuf.height() / self.px);
    }
}

impl<'a> DrawTarget for ScaledCanvas<'a> {
    type Color = BinaryColor;
    type Error = std::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let px = self.px as i32;
        for Pixel(point, color) in pixels {
            if color.is_off() {
                continue;
            }
            imageproc::drawing::draw_filled_rect_mut(
                self.imgbuf,
                imageproc::rect::Rect::at(self.origin.0 + point.x * px, self.origin.1 + point.y * px)
                    .of_size(self.px, self.px),
                self.color);
        }
        return Ok(());
    }
}

fn draw_bitmap_text(imgbuf: &mut image::RgbImage, color: image::Rgb<u8>, x: i32, y: i32, px: u32, text: &str) {
    let text = bitmap_text(text);
    let style = MonoTextStyle::new(&BITMAP_FONT, BinaryColor::On);
    let mut canvas = ScaledCanvas {
        imgbuf: imgbuf,
        color: color,
        // One pixel of headroom, roughly where an outline font's cap height starts.
        origin: (x, y + px as i32),
        px: px,
    };
    Text::with_baseline(&text, Point::zero(), style, Baseline::Top)
        .draw(&mut canvas)
        .ok();
}
