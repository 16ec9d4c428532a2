use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use stance_image::{frame_size, resize, Filter, Frame, ImageError};
use std::convert::Infallible;

/// Packs a color into the `0RGB` word minifb expects.
pub fn pack(color: Rgb888) -> u32 {
    ((color.r() as u32) << 16) | ((color.g() as u32) << 8) | color.b() as u32
}

/// Inverse of [`pack`]; the top byte is ignored.
pub fn unpack(pixel: u32) -> Rgb888 {
    Rgb888::new((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
}

fn done<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(infallible) => match infallible {},
    }
}

/// Window-sized pixel buffer every widget paints into.
///
/// Drawing outside the buffer is clipped silently.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb888) -> Self {
        Self {
            width,
            height,
            pixels: vec![pack(background); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb888> {
        if x < self.width && y < self.height {
            Some(unpack(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    /// Copies out the pixels of `area`, row by row. Parts outside the canvas are skipped.
    pub fn snapshot(&self, area: &Rectangle) -> Vec<u32> {
        let visible = area.intersection(&self.bounding_box());
        visible
            .rows()
            .flat_map(|y| {
                visible.columns().map(move |x| self.pixels[y as usize * self.width + x as usize])
            })
            .collect()
    }

    pub fn fill_rect(&mut self, area: &Rectangle, color: Rgb888) {
        done(self.fill_solid(area, color));
    }

    /// Draws the outline of `area`, `width` pixels thick, inside the rectangle.
    pub fn stroke_rect(&mut self, area: &Rectangle, color: Rgb888, width: u32) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        done(area.into_styled(style).draw(self));
    }

    pub fn line(&mut self, start: Point, end: Point, color: Rgb888) {
        done(Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self));
    }

    /// Draws `text` with `position` as the anchor given by `alignment` and `baseline`.
    pub fn text(
        &mut self,
        text: &str,
        position: Point,
        font: &MonoFont<'_>,
        color: Rgb888,
        alignment: Alignment,
        baseline: Baseline,
    ) {
        let character_style = MonoTextStyle::new(font, color);
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();
        done(Text::with_text_style(text, position, character_style, text_style).draw(self));
    }

    /// Paints `frame` into `area`, scaled to the area's width with its aspect ratio kept.
    ///
    /// A frame that ends up shorter than `area` is centred vertically on a black band; a taller
    /// one is cropped evenly top and bottom.
    pub fn blit_frame(&mut self, frame: &Frame, area: &Rectangle) -> Result<(), ImageError> {
        let (src_w, src_h) = frame_size(frame)?;
        let dst_w = area.size.width as usize;
        let area_h = area.size.height as usize;
        if dst_w == 0 || area_h == 0 {
            return Ok(());
        }
        let dst_h = ((src_h * dst_w + src_w / 2) / src_w).max(1);
        let scaled = resize(frame, dst_w, dst_h, Filter::Bilinear)?;

        self.fill_rect(area, Rgb888::BLACK);
        let (skip_rows, offset_y) = if dst_h > area_h {
            ((dst_h - area_h) / 2, 0)
        } else {
            (0, (area_h - dst_h) / 2)
        };

        let left = area.top_left.x;
        let top = area.top_left.y + offset_y as i32;
        for (row_index, row) in scaled
            .data
            .chunks_exact(dst_w * 3)
            .skip(skip_rows)
            .take(area_h)
            .enumerate()
        {
            let y = top + row_index as i32;
            if y < 0 || y as usize >= self.height {
                continue;
            }
            for (col, rgb) in row.chunks_exact(3).enumerate() {
                let x = left + col as i32;
                if x < 0 || x as usize >= self.width {
                    continue;
                }
                self.pixels[y as usize * self.width + x as usize] =
                    pack(Rgb888::new(rgb[0], rgb[1], rgb[2]));
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && (point.x as usize) < self.width
                && point.y >= 0
                && (point.y as usize) < self.height
            {
                self.pixels[point.y as usize * self.width + point.x as usize] = pack(color);
            }
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        let packed = pack(color);
        for y in visible.rows() {
            let start = y as usize * self.width + visible.top_left.x as usize;
            let end = start + visible.size.width as usize;
            self.pixels[start..end].fill(packed);
        }
        Ok(())
    }
}
