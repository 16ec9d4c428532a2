//! The four widgets of the dashboard.
//!
//! Each widget owns a rectangle of the canvas and repaints all of it when updated, so a widget
//! that is not updated keeps showing its last contents.

use crate::canvas::Canvas;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_graphics::text::{Alignment, Baseline};
use stance_image::{Frame, ImageError};
use stance_infer::{LabelSet, Prediction};

pub const BACKGROUND: Rgb888 = Rgb888::new(0xF0, 0xF0, 0xF0);
pub const SURFACE_BORDER: Rgb888 = Rgb888::new(0xA9, 0xE2, 0xF3);
pub const BAR_COLOR: Rgb888 = Rgb888::new(70, 130, 180);
pub const BUTTON_BORDER: Rgb888 = Rgb888::new(0x81, 0x81, 0xF7);
pub const BUTTON_TEXT: Rgb888 = Rgb888::new(0, 0, 255);

const AXIS_COLOR: Rgb888 = Rgb888::new(0x40, 0x40, 0x40);
const GRID_COLOR: Rgb888 = Rgb888::new(0xDD, 0xDD, 0xDD);
const BORDER_WIDTH: u32 = 2;

/// Headline for a prediction, e.g. `Pose: Sitting  Confidence: 0.70`.
pub fn result_text(prediction: &Prediction) -> String {
    format!(
        "Pose: {}  Confidence: {:.2}",
        prediction.label(),
        prediction.confidence()
    )
}

/// Live camera view with a thin border.
pub struct RenderSurface {
    bounds: Rectangle,
}

impl RenderSurface {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Black view, shown until the first frame arrives.
    pub fn clear(&self, canvas: &mut Canvas) {
        canvas.fill_rect(&self.bounds, Rgb888::BLACK);
        canvas.stroke_rect(&self.bounds, SURFACE_BORDER, BORDER_WIDTH);
    }

    /// Paints `frame` scaled to the full surface width, then the border over its edge.
    pub fn show(&self, canvas: &mut Canvas, frame: &Frame) -> Result<(), ImageError> {
        canvas.blit_frame(frame, &self.bounds)?;
        canvas.stroke_rect(&self.bounds, SURFACE_BORDER, BORDER_WIDTH);
        Ok(())
    }
}

/// Bar chart of the class scores, one bar per label, y axis fixed to `[0, 1]`.
pub struct ScoreChart {
    bounds: Rectangle,
}

impl ScoreChart {
    const MARGIN_LEFT: i32 = 40;
    const MARGIN_RIGHT: i32 = 12;
    const MARGIN_TOP: i32 = 10;
    const MARGIN_BOTTOM: i32 = 22;
    const GRID_STEPS: i32 = 4;
    const TICK_CHAR_WIDTH: u32 = 6;

    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Region between the axes.
    pub fn plot_area(&self) -> Rectangle {
        let width = self.bounds.size.width as i32 - Self::MARGIN_LEFT - Self::MARGIN_RIGHT;
        let height = self.bounds.size.height as i32 - Self::MARGIN_TOP - Self::MARGIN_BOTTOM;
        Rectangle::new(
            self.bounds.top_left + Point::new(Self::MARGIN_LEFT, Self::MARGIN_TOP),
            Size::new(width.max(0) as u32, height.max(0) as u32),
        )
    }

    /// Horizontal extent `(x, width)` of bar `index` out of `count`.
    pub fn bar_span(&self, index: usize, count: usize) -> (i32, u32) {
        let plot = self.plot_area();
        let slot = plot.size.width as f32 / count.max(1) as f32;
        let width = (slot / 2.0).max(1.0);
        let centre = plot.top_left.x as f32 + slot * (index as f32 + 0.5);
        ((centre - width / 2.0).round() as i32, width.round() as u32)
    }

    /// Bar height in pixels for `score`, clamped to the fixed `[0, 1]` range.
    pub fn bar_height(&self, score: f32) -> u32 {
        let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };
        (score * self.plot_area().size.height as f32).round() as u32
    }

    /// Clears the chart and draws it again from `scores`; labels without a score get no bar.
    pub fn show(&self, canvas: &mut Canvas, labels: &LabelSet, scores: &[f32]) {
        canvas.fill_rect(&self.bounds, Rgb888::WHITE);
        let plot = self.plot_area();
        let left = plot.top_left.x;
        let right = left + plot.size.width as i32;
        let bottom = plot.top_left.y + plot.size.height as i32;

        for step in 0..=Self::GRID_STEPS {
            let value = step as f32 / Self::GRID_STEPS as f32;
            let y = bottom - (value * plot.size.height as f32).round() as i32;
            if step > 0 {
                canvas.line(Point::new(left, y), Point::new(right, y), GRID_COLOR);
            }
            canvas.text(
                &format!("{value:.2}"),
                Point::new(left - 4, y),
                &FONT_6X10,
                AXIS_COLOR,
                Alignment::Right,
                Baseline::Middle,
            );
        }

        let count = labels.len();
        for (index, label) in labels.iter().enumerate() {
            let (x, width) = self.bar_span(index, count);
            if let Some(&score) = scores.get(index) {
                let height = self.bar_height(score);
                let bar = Rectangle::new(
                    Point::new(x, bottom - height as i32),
                    Size::new(width, height),
                );
                canvas.fill_rect(&bar, BAR_COLOR);
            }

            let slot = plot.size.width / count.max(1) as u32;
            let tick = fit_text(label, (slot / Self::TICK_CHAR_WIDTH).max(1) as usize);
            canvas.text(
                &tick,
                Point::new(x + width as i32 / 2, bottom + 4),
                &FONT_6X10,
                AXIS_COLOR,
                Alignment::Center,
                Baseline::Top,
            );
        }

        canvas.line(Point::new(left, plot.top_left.y), Point::new(left, bottom), AXIS_COLOR);
        canvas.line(Point::new(left, bottom), Point::new(right, bottom), AXIS_COLOR);
    }
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with `~`.
fn fit_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

/// One line of centred text under the chart.
pub struct ResultLabel {
    bounds: Rectangle,
}

impl ResultLabel {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn show(&self, canvas: &mut Canvas, text: &str) {
        canvas.fill_rect(&self.bounds, BACKGROUND);
        canvas.text(
            text,
            self.bounds.center(),
            &FONT_10X20,
            Rgb888::BLACK,
            Alignment::Center,
            Baseline::Middle,
        );
    }
}

/// Push button that closes the window.
///
/// A click counts when the left button goes down and comes back up inside the button, like a
/// desktop button; dragging out before release cancels it.
pub struct CloseButton {
    bounds: Rectangle,
    armed: bool,
    was_down: bool,
}

impl CloseButton {
    pub const CAPTION: &'static str = "Close";

    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            armed: false,
            was_down: false,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_rect(&self.bounds, Rgb888::WHITE);
        canvas.stroke_rect(&self.bounds, BUTTON_BORDER, BORDER_WIDTH);
        canvas.text(
            Self::CAPTION,
            self.bounds.center(),
            &FONT_10X20,
            BUTTON_TEXT,
            Alignment::Center,
            Baseline::Middle,
        );
    }

    /// Feeds one pointer sample; returns `true` when a click completes.
    pub fn poll(&mut self, pointer: Option<(f32, f32)>, down: bool) -> bool {
        let inside = pointer.is_some_and(|(x, y)| {
            self.bounds.contains(Point::new(x.floor() as i32, y.floor() as i32))
        });
        let pressed = down && !self.was_down;
        let released = !down && self.was_down;
        self.was_down = down;

        if pressed {
            self.armed = inside;
        }
        if released {
            let clicked = self.armed && inside;
            self.armed = false;
            return clicked;
        }
        false
    }
}
