use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use dot_field::prelude::*;
use glam::{DAffine2, DVec2};
use image::{GrayImage, ImageFormat, Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Subsamples per pixel axis when estimating ellipse coverage.
const COVERAGE_SUBSAMPLES: u32 = 4;

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Installs a fmt subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Seed from `DOT_FIELD_SEED`, falling back to the current time.
pub fn run_seed() -> u64 {
    let seed = std::env::var("DOT_FIELD_SEED")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        });
    info!("Using seed {seed} (set DOT_FIELD_SEED to replay).");
    seed
}

/// An RGB raster with a current fill colour and a push/pop affine transform stack.
pub struct RasterCanvas {
    image: RgbImage,
    color: Rgb<u8>,
    transform: DAffine2,
    stack: Vec<DAffine2>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
            color: Rgb(BLACK),
            transform: DAffine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn set_color(&mut self, rgb: [u8; 3]) {
        self.color = Rgb(rgb);
    }

    /// Fills the whole canvas with the current colour, ignoring the transform.
    pub fn clear(&mut self) {
        let color = self.color;
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn push(&mut self) {
        self.stack.push(self.transform);
    }

    /// Restores the transform saved by the matching [`RasterCanvas::push`].
    pub fn pop(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.transform = saved;
        }
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform * DAffine2::from_translation(DVec2::new(x, y));
    }

    /// Rotates subsequent drawing by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.transform = self.transform * DAffine2::from_angle(angle);
    }

    /// Fills an axis-aligned (in local coordinates) ellipse, blending edge pixels by coverage.
    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (width, height) = self.image.dimensions();
        let to_local = self.transform.inverse();

        let corners = [
            DVec2::new(cx - rx, cy - ry),
            DVec2::new(cx + rx, cy - ry),
            DVec2::new(cx - rx, cy + ry),
            DVec2::new(cx + rx, cy + ry),
        ]
        .map(|c| self.transform.transform_point2(c));
        let min = corners.iter().copied().reduce(DVec2::min).unwrap_or(DVec2::ZERO);
        let max = corners.iter().copied().reduce(DVec2::max).unwrap_or(DVec2::ZERO);

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(height);

        let step = 1.0 / COVERAGE_SUBSAMPLES as f64;
        let total = (COVERAGE_SUBSAMPLES * COVERAGE_SUBSAMPLES) as f64;
        for py in y0..y1 {
            for px in x0..x1 {
                let mut inside = 0u32;
                for sy in 0..COVERAGE_SUBSAMPLES {
                    for sx in 0..COVERAGE_SUBSAMPLES {
                        let sample = DVec2::new(
                            px as f64 + (sx as f64 + 0.5) * step,
                            py as f64 + (sy as f64 + 0.5) * step,
                        );
                        let local = to_local.transform_point2(sample);
                        let nx = (local.x - cx) / rx;
                        let ny = (local.y - cy) / ry;
                        if nx * nx + ny * ny <= 1.0 {
                            inside += 1;
                        }
                    }
                }
                if inside > 0 {
                    let coverage = inside as f64 / total;
                    let pixel = self.image.get_pixel_mut(px, py);
                    *pixel = blend(*pixel, self.color, coverage);
                }
            }
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {}.", path.display());
        Ok(())
    }
}

fn blend(under: Rgb<u8>, over: Rgb<u8>, coverage: f64) -> Rgb<u8> {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * coverage).round() as u8;
    Rgb([
        mix(under.0[0], over.0[0]),
        mix(under.0[1], over.0[1]),
        mix(under.0[2], over.0[2]),
    ])
}

/// Draws relaxed dots as white rotated ellipses on black.
pub fn render_dots(width: u32, height: u32, dots: &[Dot]) -> RasterCanvas {
    let mut canvas = RasterCanvas::new(width, height);
    canvas.set_color(BLACK);
    canvas.clear();

    canvas.set_color(WHITE);
    for dot in dots {
        canvas.push();
        canvas.translate(dot.position.x, dot.position.y);
        canvas.rotate(dot.rotation);
        canvas.fill_ellipse(0.0, 0.0, dot.rx(), dot.ry());
        canvas.pop();
    }
    canvas
}

/// Draws stipple marks in black on white.
pub fn render_marks(width: u32, height: u32, marks: &[Mark]) -> RasterCanvas {
    let mut canvas = RasterCanvas::new(width, height);
    canvas.set_color(WHITE);
    canvas.clear();

    canvas.set_color(BLACK);
    for mark in marks {
        canvas.push();
        canvas.translate(mark.center.x, mark.center.y);
        canvas.rotate(mark.rotation);
        canvas.fill_ellipse(0.0, 0.0, mark.rx, mark.ry);
        canvas.pop();
    }
    canvas
}

/// A decoded image reduced to 8-bit luma.
pub struct PngRaster {
    image: GrayImage,
}

impl PngRaster {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("decoding {}", path.display()))?
            .to_luma8();
        info!(
            "Loaded {} ({}x{}).",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    pub fn from_rgb(image: &RgbImage) -> Self {
        Self {
            image: image::DynamicImage::ImageRgb8(image.clone()).to_luma8(),
        }
    }
}

impl GrayscaleRaster for PngRaster {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn luma_at(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_ellipse_respects_rotation() {
        let mut canvas = RasterCanvas::new(40, 40);
        canvas.set_color(WHITE);
        canvas.push();
        canvas.translate(20.0, 20.0);
        canvas.rotate(std::f64::consts::FRAC_PI_2);
        canvas.fill_ellipse(0.0, 0.0, 15.0, 3.0);
        canvas.pop();

        // Rotated a quarter turn the long axis is vertical.
        assert_eq!(canvas.image().get_pixel(20, 8).0, WHITE);
        assert_eq!(canvas.image().get_pixel(8, 20).0, BLACK);
    }

    #[test]
    fn pop_restores_transform() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.set_color(WHITE);
        canvas.push();
        canvas.translate(100.0, 100.0);
        canvas.pop();
        canvas.fill_ellipse(10.0, 10.0, 3.0, 3.0);
        assert_eq!(canvas.image().get_pixel(10, 10).0, WHITE);
    }

    #[test]
    fn rendered_dots_read_back_as_luma() {
        let dots = [Dot::new(DVec2::new(10.0, 10.0), 5.0)];
        let canvas = render_dots(30, 20, &dots);
        let raster = PngRaster::from_rgb(canvas.image());
        assert_eq!(raster.dimensions(), (30, 20));
        assert_eq!(raster.luma_at(10, 10), 255);
        assert_eq!(raster.luma_at(25, 2), 0);
    }
}
