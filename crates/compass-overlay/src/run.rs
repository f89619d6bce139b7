//! Headless session runs: config and optional script in, frame out.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use compass_overlay_core::{DatasetError, Marker};
use compass_overlay_render::Frame;
use compass_overlay_session::{EventScript, MarkerPayload, OverlayConfig, OverlayIoError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the run helpers.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("invalid heatmap: {0}")]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Io(#[from] OverlayIoError),
}

/// Result of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutput {
    /// Full render after the last step.
    pub frame: Frame,
    pub markers: MarkerPayload,
    /// How many times the marker-change listener fired.
    pub notifications: usize,
}

/// Build a session from `config`, replay `script` and render once.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn run(config: &OverlayConfig, script: Option<&EventScript>) -> Result<RunOutput, RunError> {
    let heatmap = config.heatmap_dataset()?;
    let mut engine = config.build_engine();

    let count = Rc::new(Cell::new(0usize));
    let sink = Rc::clone(&count);
    engine.set_listener(move |_: &[Marker]| sink.set(sink.get() + 1));

    if let Some(script) = script {
        script.replay(&mut engine);
    }
    let frame = engine.render(&config.render_inputs(heatmap.as_ref()));
    log::info!(
        "rendered {} primitives, {} markers",
        frame.primitive_count(),
        engine.markers().len()
    );

    Ok(RunOutput {
        frame,
        markers: MarkerPayload::new(engine.markers()),
        notifications: count.get(),
    })
}

/// Load the config (and script, if given) from disk and [`run`] them.
///
/// With the `image` feature, the background is probed from disk relative to
/// the config file; a missing or unreadable file renders the placeholder.
pub fn run_files(
    config_path: impl AsRef<Path>,
    script_path: Option<&Path>,
) -> Result<RunOutput, RunError> {
    let config_path = config_path.as_ref();
    #[allow(unused_mut)]
    let mut config = OverlayConfig::load_json(config_path)?;
    let script = script_path.map(EventScript::load_json).transpose()?;

    #[cfg(feature = "image")]
    if let Some(bg) = config.background.take() {
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        config.background = crate::probe::resolve_background(&bg, base);
    }

    run(&config, script.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_overlay_render::LayerKind;
    use compass_overlay_session::{Command, InputEvent};

    #[test]
    fn run_counts_notifications() {
        let script = EventScript {
            steps: vec![
                Command::AddMarker { label: "A".into() }.into(),
                InputEvent::pointer_down(300.0, 300.0).into(),
                InputEvent::pointer_move(310.0, 300.0).into(),
                InputEvent::pointer_up(310.0, 300.0).into(),
                Command::ToggleTopology.into(),
            ],
        };
        let out = run(&OverlayConfig::default(), Some(&script)).expect("run");
        assert_eq!(out.notifications, 2);
        assert_eq!(out.markers.markers.len(), 1);
        assert!(out.frame.layer(LayerKind::Heatmap).is_none());
        let grid = out.frame.layer(LayerKind::Grid).expect("grid");
        // radial: circle + 8 spokes
        assert_eq!(grid.primitives.len(), 9);
    }

    #[test]
    fn invalid_heatmap_is_an_error() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{"heatmap": [[1, 2, 3]]}"#).expect("parse");
        assert!(matches!(run(&config, None), Err(RunError::Dataset(_))));
    }

    #[cfg(feature = "image")]
    #[test]
    fn missing_background_file_renders_placeholder() {
        use compass_overlay_render::Primitive;

        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            r#"{"background": {"source": "does_not_exist.png", "width": 100, "height": 100}}"#,
        )
        .expect("write config");

        let out = run_files(&config, None).expect("run");
        let bg = out.frame.layer(LayerKind::Background).expect("background");
        assert!(matches!(bg.primitives[0], Primitive::Placeholder { .. }));
    }

    #[cfg(feature = "image")]
    #[test]
    fn background_next_to_config_is_drawn() {
        use compass_overlay_render::Primitive;

        let dir = tempfile::tempdir().expect("tempdir");
        ::image::RgbImage::new(30, 60)
            .save(dir.path().join("floor.png"))
            .expect("save png");
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"background": {"source": "floor.png", "width": 0, "height": 0}}"#)
            .expect("write config");

        let out = run_files(&config, None).expect("run");
        let bg = out.frame.layer(LayerKind::Background).expect("background");
        match &bg.primitives[0] {
            Primitive::Image { width, height, .. } => {
                assert_eq!((*width, *height), (300.0, 600.0));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }
}
