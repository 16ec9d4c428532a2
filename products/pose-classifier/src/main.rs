use anyhow::Context;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use pose_classifier::{ticker, AppConfig, Dashboard, RefreshLoop};
use stance_camera::{CameraConfig, FrameSource, V4l2Camera};
use stance_infer::{Classifier, OnnxBackend};
use std::ops::ControlFlow;
use std::path::Path;

fn open_camera(config: &CameraConfig) -> FrameSource<V4l2Camera> {
    match V4l2Camera::new(config.clone()) {
        Ok(camera) => FrameSource::new(camera).with_mirror(config.mirror()),
        Err(e) => {
            log::warn!(
                "camera {} unavailable, running without frames: {}",
                config.device(),
                e
            );
            FrameSource::unavailable()
        }
    }
}

#[cfg(target_os = "linux")]
fn apply_icon(window: &mut Window, path: &Path) {
    let buffer = match stance_image::load_rgba(path)
        .and_then(|rgba| pose_classifier::icon::icon_buffer(&rgba))
    {
        Ok(buffer) => buffer,
        Err(e) => {
            log::warn!("window icon {} not loaded: {}", path.display(), e);
            return;
        }
    };
    match minifb::Icon::try_from(buffer.as_slice()) {
        Ok(icon) => window.set_icon(icon),
        Err(e) => log::warn!("window icon {} rejected: {}", path.display(), e),
    }
}

#[cfg(not(target_os = "linux"))]
fn apply_icon(_window: &mut Window, path: &Path) {
    log::debug!("window icons from {} not supported here", path.display());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    stance_base::init_console_logger();
    let config = AppConfig::default();

    log::info!("model {}", config.model_path().display());
    log::info!("labels {}", config.labels_path().display());

    let backend = OnnxBackend::new().with_intra_threads(config.inference_threads());
    let classifier = Classifier::load_with(&backend, config.model_path(), config.labels_path())
        .context("failed to load the pose classifier")?;
    log::info!(
        "classes: {}",
        classifier.labels().iter().collect::<Vec<_>>().join(", ")
    );

    let source = open_camera(config.camera());

    let (width, height) = (config.window_width(), config.window_height());
    let dashboard = Dashboard::new(width, height, classifier.labels());
    let mut window = Window::new(config.title(), width, height, WindowOptions::default())
        .context("failed to create window")?;
    let (x, y) = config.window_position();
    window.set_position(x, y);
    window.set_target_fps(config.max_fps());
    apply_icon(&mut window, config.icon_path());

    let mut refresh = RefreshLoop::new(source, classifier, dashboard);
    let mut ticker = ticker(config.refresh_interval());

    log::info!("running, Close or ESC to exit");
    refresh
        .run(&mut ticker, |dashboard| -> anyhow::Result<ControlFlow<()>> {
            window
                .update_with_buffer(dashboard.canvas().pixels(), width, height)
                .context("failed to update window")?;
            if !window.is_open() || window.is_key_down(Key::Escape) {
                return Ok(ControlFlow::Break(()));
            }

            let pointer = window.get_mouse_pos(MouseMode::Discard);
            let down = window.get_mouse_down(MouseButton::Left);
            if dashboard.close_button_mut().poll(pointer, down) {
                log::info!("close button clicked");
                return Ok(ControlFlow::Break(()));
            }
            Ok(ControlFlow::Continue(()))
        })
        .await?;

    refresh.shutdown();
    let stats = refresh.stats();
    log::info!(
        "exiting after {} cycles ({} rendered, {} without frame, {} failed)",
        stats.cycles,
        stats.rendered,
        stats.no_frame,
        stats.failed
    );
    Ok(())
}
