use compass_overlay_core::Viewport;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::primitive::Primitive;

/// Opaque reference to a background image plus its pixel size.
///
/// The render core never decodes the image; the host (or the facade's
/// `image` feature) supplies the dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl BackgroundImage {
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.source.trim().is_empty() && self.width > 0 && self.height > 0
    }
}

/// Places the background centered and fit-scaled into the viewport.
///
/// Independent of the grid transform: pan, zoom and rotation never move it.
#[derive(Clone, Debug)]
pub struct BackgroundLayer {
    pub placeholder_text: String,
}

impl BackgroundLayer {
    pub fn render(&self, viewport: Viewport, image: Option<&BackgroundImage>) -> Vec<Primitive> {
        let (cx, cy) = viewport.center();
        match image.filter(|img| img.is_valid()) {
            Some(img) => {
                let w = f64::from(img.width);
                let h = f64::from(img.height);
                let fit = (viewport.width / w).min(viewport.height / h);
                let (dw, dh) = (w * fit, h * fit);
                vec![Primitive::Image {
                    source: img.source.clone(),
                    x: cx - dw * 0.5,
                    y: cy - dh * 0.5,
                    width: dw,
                    height: dh,
                }]
            }
            None => {
                if let Some(img) = image {
                    log::warn!(
                        "background {:?} has unusable size {}x{}, showing placeholder",
                        img.source,
                        img.width,
                        img.height
                    );
                }
                vec![Primitive::Placeholder {
                    center: Point2::new(cx, cy),
                    text: self.placeholder_text.clone(),
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layer() -> BackgroundLayer {
        BackgroundLayer {
            placeholder_text: "drop an image".to_string(),
        }
    }

    #[test]
    fn wide_image_fits_width_and_centers_vertically() {
        let vp = Viewport::new(600.0, 600.0);
        let img = BackgroundImage::new("plan.png", 1200, 600);
        let prims = layer().render(vp, Some(&img));
        match &prims[0] {
            Primitive::Image {
                x,
                y,
                width,
                height,
                ..
            } => {
                assert_relative_eq!(*width, 600.0);
                assert_relative_eq!(*height, 300.0);
                assert_relative_eq!(*x, 0.0);
                assert_relative_eq!(*y, 150.0);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn small_image_is_scaled_up_to_fit() {
        let vp = Viewport::new(800.0, 400.0);
        let img = BackgroundImage::new("plan.png", 100, 100);
        let Primitive::Image { width, height, x, .. } = &layer().render(vp, Some(&img))[0] else {
            panic!("expected image");
        };
        assert_relative_eq!(*width, 400.0);
        assert_relative_eq!(*height, 400.0);
        assert_relative_eq!(*x, 200.0);
    }

    #[test]
    fn missing_or_invalid_image_renders_placeholder() {
        let vp = Viewport::new(600.0, 400.0);
        for img in [
            None,
            Some(BackgroundImage::new("plan.png", 0, 10)),
            Some(BackgroundImage::new("  ", 10, 10)),
        ] {
            let prims = layer().render(vp, img.as_ref());
            assert_eq!(
                prims,
                vec![Primitive::Placeholder {
                    center: Point2::new(300.0, 200.0),
                    text: "drop an image".to_string(),
                }]
            );
        }
    }
}
