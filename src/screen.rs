//! Display collaborator.
//!
//! [`Screen`] is the small immediate-mode surface the game draws through:
//! rectangles, a text cursor and a rotation. [`GraphicsScreen`] implements it
//! on top of any `embedded-graphics` target, which is how the badge's ST7789
//! is driven and how tests render into a `MockDisplay`.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};

/// Glyph cell of the text font at size 1.
pub const CHAR_W: i32 = 6;
pub const CHAR_H: i32 = 10;

/// Quarter-turn screen rotation, clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Synchronous drawing surface. Every call completes before it returns.
pub trait Screen {
    type Error;

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) -> Result<(), Self::Error>;

    /// Top-left corner of the next character.
    fn set_text_cursor(&mut self, x: i32, y: i32);

    /// Integer glyph scale, `1` is the native font size.
    fn set_text_size(&mut self, size: u8);

    fn set_text_color(&mut self, color: Rgb565);

    /// Draws `text` at the cursor and leaves the cursor after the last glyph.
    fn write_string(&mut self, text: &str) -> Result<(), Self::Error>;

    fn set_rotation(&mut self, rotation: Rotation);
}

/// [`Screen`] over an `embedded-graphics` draw target.
pub struct GraphicsScreen<D> {
    target: D,
    rotation: Rotation,
    cursor: Point,
    text_size: u8,
    text_color: Rgb565,
}

impl<D> GraphicsScreen<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            rotation: Rotation::Deg0,
            cursor: Point::zero(),
            text_size: 1,
            text_color: Rgb565::WHITE,
        }
    }

    pub const fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub const fn cursor(&self) -> Point {
        self.cursor
    }

    fn oriented(&mut self) -> Oriented<'_, D> {
        Oriented {
            rotation: self.rotation,
            inner: &mut self.target,
        }
    }
}

impl<D> Screen for GraphicsScreen<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.target.clear(color)
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) -> Result<(), Self::Error> {
        let area = Rectangle::new(Point::new(x, y), Size::new(w, h));
        self.oriented().fill_solid(&area, color)
    }

    fn set_text_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn write_string(&mut self, text: &str) -> Result<(), Self::Error> {
        let origin = self.cursor;
        let factor = i32::from(self.text_size);
        let style = MonoTextStyle::new(&FONT_6X10, self.text_color);

        let mut oriented = self.oriented();
        let mut scaled = Scaled {
            inner: &mut oriented,
            origin,
            factor,
        };
        let next = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut scaled)?;

        self.cursor = origin + (next - origin) * factor;
        Ok(())
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

// ── Draw target adapters ────────────────────────────────────────────────────

/// Maps logical coordinates to the physical panel for a given rotation.
struct Oriented<'a, D> {
    inner: &'a mut D,
    rotation: Rotation,
}

impl<D: DrawTarget> Oriented<'_, D> {
    fn physical_size(&self) -> Size {
        self.inner.bounding_box().size
    }
}

fn rotate(rotation: Rotation, physical: Size, p: Point) -> Point {
    let w = physical.width as i32;
    let h = physical.height as i32;
    match rotation {
        Rotation::Deg0 => p,
        Rotation::Deg90 => Point::new(w - 1 - p.y, p.x),
        Rotation::Deg180 => Point::new(w - 1 - p.x, h - 1 - p.y),
        Rotation::Deg270 => Point::new(p.y, h - 1 - p.x),
    }
}

impl<D: DrawTarget> OriginDimensions for Oriented<'_, D> {
    fn size(&self) -> Size {
        let size = self.physical_size();
        if self.rotation.is_quarter_turn() {
            Size::new(size.height, size.width)
        } else {
            size
        }
    }
}

impl<D: DrawTarget> DrawTarget for Oriented<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let rotation = self.rotation;
        let physical = self.physical_size();
        self.inner.draw_iter(
            pixels
                .into_iter()
                .map(|Pixel(p, color)| Pixel(rotate(rotation, physical, p), color)),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let physical = self.physical_size();
        let a = rotate(self.rotation, physical, area.top_left);
        let b = rotate(self.rotation, physical, bottom_right);
        self.inner.fill_solid(&Rectangle::with_corners(a, b), color)
    }
}

/// Blows every pixel up to a `factor`×`factor` block around `origin`.
struct Scaled<'a, T> {
    inner: &'a mut T,
    origin: Point,
    factor: i32,
}

impl<T: DrawTarget> Scaled<'_, T> {
    fn scale(&self, p: Point) -> Point {
        self.origin + (p - self.origin) * self.factor
    }
}

impl<T: DrawTarget> Dimensions for Scaled<'_, T> {
    fn bounding_box(&self) -> Rectangle {
        self.inner.bounding_box()
    }
}

impl<T: DrawTarget> DrawTarget for Scaled<'_, T> {
    type Color = T::Color;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.factor == 1 {
            return self.inner.draw_iter(pixels);
        }
        let block = Size::new_equal(self.factor as u32);
        for Pixel(p, color) in pixels {
            let top_left = self.scale(p);
            self.inner.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let scaled = Rectangle::new(self.scale(area.top_left), area.size * self.factor as u32);
        self.inner.fill_solid(&scaled, color)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn screen() -> GraphicsScreen<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        GraphicsScreen::new(display)
    }

    fn pixel(screen: &GraphicsScreen<MockDisplay<Rgb565>>, x: i32, y: i32) -> Option<Rgb565> {
        screen.target().get_pixel(Point::new(x, y))
    }

    #[test]
    fn fill_rect_covers_exactly_the_area() {
        let mut screen = screen();
        screen.fill_rect(2, 3, 4, 2, Rgb565::RED).unwrap();
        assert_eq!(pixel(&screen, 2, 3), Some(Rgb565::RED));
        assert_eq!(pixel(&screen, 5, 4), Some(Rgb565::RED));
        assert_eq!(pixel(&screen, 6, 4), None);
        assert_eq!(pixel(&screen, 2, 5), None);
        assert_eq!(pixel(&screen, 1, 3), None);
    }

    #[test]
    fn clear_paints_everything() {
        let mut screen = screen();
        screen.clear(Rgb565::BLUE).unwrap();
        assert_eq!(pixel(&screen, 0, 0), Some(Rgb565::BLUE));
        assert_eq!(pixel(&screen, 63, 63), Some(Rgb565::BLUE));
    }

    #[test]
    fn rotation_remaps_rectangles() {
        let mut screen = screen();
        screen.set_rotation(Rotation::Deg90);
        screen.fill_rect(0, 0, 2, 1, Rgb565::GREEN).unwrap();
        assert_eq!(pixel(&screen, 63, 0), Some(Rgb565::GREEN));
        assert_eq!(pixel(&screen, 63, 1), Some(Rgb565::GREEN));
        assert_eq!(pixel(&screen, 62, 0), None);

        screen.set_rotation(Rotation::Deg180);
        screen.fill_rect(0, 0, 1, 1, Rgb565::RED).unwrap();
        assert_eq!(pixel(&screen, 63, 63), Some(Rgb565::RED));

        screen.set_rotation(Rotation::Deg270);
        screen.fill_rect(0, 0, 1, 1, Rgb565::BLUE).unwrap();
        assert_eq!(pixel(&screen, 0, 63), Some(Rgb565::BLUE));
    }

    #[test]
    fn text_advances_the_cursor_by_scaled_glyphs() {
        let mut screen = screen();
        screen.set_text_cursor(1, 2);
        screen.write_string("AB").unwrap();
        assert_eq!(screen.cursor(), Point::new(1 + 2 * CHAR_W, 2));

        screen.set_text_size(2);
        screen.set_text_cursor(0, 20);
        screen.write_string("A").unwrap();
        assert_eq!(screen.cursor(), Point::new(2 * CHAR_W, 20));
    }

    #[test]
    fn newline_moves_to_the_next_text_row() {
        let mut screen = screen();
        screen.set_text_cursor(0, 0);
        screen.write_string("A\nBC").unwrap();
        assert_eq!(screen.cursor(), Point::new(2 * CHAR_W, CHAR_H));
    }

    #[test]
    fn scaled_text_stays_inside_its_box() {
        let mut screen = screen();
        screen.set_text_color(Rgb565::YELLOW);
        screen.set_text_size(3);
        screen.set_text_cursor(4, 4);
        screen.write_string("X").unwrap();

        let area = screen.target().affected_area();
        assert!(!area.is_zero_sized());
        assert!(area.top_left.x >= 4 && area.top_left.y >= 4);
        let bottom_right = area.bottom_right().unwrap();
        assert!(bottom_right.x < 4 + 3 * CHAR_W);
        assert!(bottom_right.y < 4 + 3 * CHAR_H);
        // Scaled pixels come in 3x3 blocks.
        assert_eq!(area.size.width % 3, 0);
        assert_eq!(area.size.height % 3, 0);
    }
}
