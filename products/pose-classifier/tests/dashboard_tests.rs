use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use pose_classifier::widgets::{BACKGROUND, BUTTON_BORDER, SURFACE_BORDER};
use pose_classifier::{Dashboard, Layout};
use stance_base::Tensor;
use stance_infer::{LabelSet, Prediction};

fn labels() -> LabelSet {
    LabelSet::parse("Sitting\nStanding\nLying").unwrap()
}

fn inside(outer: &Rectangle, inner: &Rectangle) -> bool {
    outer.intersection(inner) == *inner
}

#[test]
fn test_layout_for_default_window() {
    let layout = Layout::for_window(800, 800);
    let window = Rectangle::new(Point::zero(), Size::new(800, 800));

    assert_eq!(layout.surface.size, Size::new(640, 480));
    assert_eq!(layout.surface.top_left.x, 80);
    assert_eq!(layout.chart.size, Size::new(640, 200));
    assert_eq!(layout.chart.top_left.x, 80);

    for rect in [layout.surface, layout.chart, layout.label, layout.button] {
        assert!(inside(&window, &rect), "{rect:?} leaves the window");
    }
}

#[test]
fn test_layout_stacks_without_overlap() {
    let layout = Layout::for_window(800, 800);
    let order = [layout.surface, layout.chart, layout.label, layout.button];

    for pair in order.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        assert!(upper.top_left.y + upper.size.height as i32 <= lower.top_left.y);
    }
}

#[test]
fn test_new_dashboard_draws_empty_state() {
    let dashboard = Dashboard::new(800, 800, &labels());
    let layout = *dashboard.layout();
    let canvas = dashboard.canvas();

    assert_eq!(canvas.width(), 800);
    assert_eq!(canvas.height(), 800);
    assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));

    let surface = layout.surface;
    assert_eq!(
        canvas.pixel(surface.top_left.x as usize, surface.top_left.y as usize),
        Some(SURFACE_BORDER)
    );
    let centre = surface.center();
    assert_eq!(canvas.pixel(centre.x as usize, centre.y as usize), Some(Rgb888::BLACK));

    let button = layout.button;
    assert_eq!(
        canvas.pixel(button.top_left.x as usize, button.top_left.y as usize),
        Some(BUTTON_BORDER)
    );
    // result line starts blank
    assert!(canvas
        .snapshot(&layout.label)
        .iter()
        .all(|&p| p == pose_classifier::canvas::pack(BACKGROUND)));
}

#[test]
fn test_show_prediction_only_touches_chart_and_label() {
    let mut dashboard = Dashboard::new(800, 800, &labels());
    let layout = *dashboard.layout();
    let surface_before = dashboard.canvas().snapshot(&layout.surface);
    let button_before = dashboard.canvas().snapshot(&layout.button);
    let chart_before = dashboard.canvas().snapshot(&layout.chart);

    let prediction = Prediction::new(vec![0.7, 0.2, 0.1], &labels()).unwrap();
    dashboard.show_prediction(&prediction, &labels());

    assert_eq!(dashboard.canvas().snapshot(&layout.surface), surface_before);
    assert_eq!(dashboard.canvas().snapshot(&layout.button), button_before);
    assert_ne!(dashboard.canvas().snapshot(&layout.chart), chart_before);
}

#[test]
fn test_show_frame_keeps_border() {
    let mut dashboard = Dashboard::new(800, 800, &labels());
    let surface = dashboard.layout().surface;
    let frame = Tensor::new(vec![480, 640, 3], [9u8, 200, 30].repeat(640 * 480)).unwrap();

    dashboard.show_frame(&frame).unwrap();

    let canvas = dashboard.canvas();
    assert_eq!(
        canvas.pixel(surface.top_left.x as usize, surface.top_left.y as usize),
        Some(SURFACE_BORDER)
    );
    let centre = surface.center();
    assert_eq!(
        canvas.pixel(centre.x as usize, centre.y as usize),
        Some(Rgb888::new(9, 200, 30))
    );
}
