use crate::canvas::Canvas;
use crate::widgets::{
    result_text, CloseButton, RenderSurface, ResultLabel, ScoreChart, BACKGROUND,
};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use stance_image::{Frame, ImageError};
use stance_infer::{LabelSet, Prediction};

pub const SURFACE_SIZE: Size = Size::new(640, 480);
pub const CHART_SIZE: Size = Size::new(640, 200);
const LABEL_HEIGHT: u32 = 30;
const BUTTON_SIZE: Size = Size::new(120, 36);
const MARGIN: i32 = 12;
const SPACING: i32 = 10;

/// Widget rectangles for a window, stacked top to bottom and centred horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub surface: Rectangle,
    pub chart: Rectangle,
    pub label: Rectangle,
    pub button: Rectangle,
}

impl Layout {
    pub fn for_window(width: usize, height: usize) -> Self {
        let width = width as i32;
        let centred = |size: Size, y: i32| {
            Rectangle::new(Point::new((width - size.width as i32) / 2, y), size)
        };

        let surface = centred(SURFACE_SIZE, MARGIN);
        let chart = centred(CHART_SIZE, bottom_of(&surface) + SPACING);
        let label = Rectangle::new(
            Point::new(0, bottom_of(&chart) + SPACING),
            Size::new(width.max(0) as u32, LABEL_HEIGHT),
        );
        let button = centred(BUTTON_SIZE, bottom_of(&label) + SPACING);
        if bottom_of(&button) > height as i32 {
            log::warn!(
                "window height {} is too small, widgets end at {}",
                height,
                bottom_of(&button)
            );
        }

        Self {
            surface,
            chart,
            label,
            button,
        }
    }
}

fn bottom_of(rect: &Rectangle) -> i32 {
    rect.top_left.y + rect.size.height as i32
}

/// The window contents: camera view, score chart, result text and close button.
pub struct Dashboard {
    canvas: Canvas,
    layout: Layout,
    surface: RenderSurface,
    chart: ScoreChart,
    label: ResultLabel,
    close_button: CloseButton,
}

impl Dashboard {
    /// Lays out the widgets and draws their empty state: a black camera view, a chart with one
    /// empty slot per label, and a blank result line.
    pub fn new(width: usize, height: usize, labels: &LabelSet) -> Self {
        let layout = Layout::for_window(width, height);
        let mut dashboard = Self {
            canvas: Canvas::new(width, height, BACKGROUND),
            layout,
            surface: RenderSurface::new(layout.surface),
            chart: ScoreChart::new(layout.chart),
            label: ResultLabel::new(layout.label),
            close_button: CloseButton::new(layout.button),
        };
        dashboard.surface.clear(&mut dashboard.canvas);
        dashboard.chart.show(&mut dashboard.canvas, labels, &[]);
        dashboard.label.show(&mut dashboard.canvas, "");
        dashboard.close_button.draw(&mut dashboard.canvas);
        dashboard
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn chart(&self) -> &ScoreChart {
        &self.chart
    }

    pub fn close_button_mut(&mut self) -> &mut CloseButton {
        &mut self.close_button
    }

    pub fn show_frame(&mut self, frame: &Frame) -> Result<(), ImageError> {
        self.surface.show(&mut self.canvas, frame)
    }

    /// Redraws the chart from the full distribution and the result line from its top entry.
    pub fn show_prediction(&mut self, prediction: &Prediction, labels: &LabelSet) {
        self.chart.show(&mut self.canvas, labels, prediction.scores());
        self.label.show(&mut self.canvas, &result_text(prediction));
    }
}
