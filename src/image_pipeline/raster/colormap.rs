//! Figure-style rendering
//!
//! Draws a normalized array the way an image plot would: the value range is
//! autoscaled to the array's finite extremes, mapped through a 256-entry
//! colormap, and the first stored row is placed at the bottom. There are no
//! axes, margins or frame, and one output pixel is produced per array element.

use crate::image_pipeline::normalize::types::NormalizedImage;
use crate::image_pipeline::raster::types::{PixelLayout, RasterImage};

pub trait FigureRenderer {
    fn render(&self, image: &NormalizedImage) -> RasterImage;
}

/// Viridis control points, evenly spaced over [0, 1].
const VIRIDIS_ANCHORS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 145, 140],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

const LUT_SIZE: usize = 256;

/// Color drawn for non-finite pixels
const BAD_COLOR: [u8; 3] = [0, 0, 0];

pub struct ColormapRenderer {
    lut: Vec<[u8; 3]>,
}

impl ColormapRenderer {
    pub fn viridis() -> Self {
        Self::from_anchors(&VIRIDIS_ANCHORS)
    }

    /// Build a lookup table by linear interpolation between evenly spaced
    /// anchor colors.
    pub fn from_anchors(anchors: &[[u8; 3]]) -> Self {
        let segments = anchors.len().saturating_sub(1).max(1) as f64;
        let lut = (0..LUT_SIZE)
            .map(|i| {
                let t = i as f64 / (LUT_SIZE - 1) as f64 * segments;
                let lo = (t.floor() as usize).min(anchors.len() - 1);
                let hi = (lo + 1).min(anchors.len() - 1);
                let frac = t - lo as f64;
                let mut color = [0u8; 3];
                for (c, out) in color.iter_mut().enumerate() {
                    let a = f64::from(anchors[lo][c]);
                    let b = f64::from(anchors[hi][c]);
                    *out = (a + (b - a) * frac).round() as u8;
                }
                color
            })
            .collect();
        Self { lut }
    }

    fn color(&self, scaled: f64) -> [u8; 3] {
        if !scaled.is_finite() {
            return BAD_COLOR;
        }
        let index = ((scaled * LUT_SIZE as f64) as usize).min(LUT_SIZE - 1);
        self.lut[index]
    }
}

impl FigureRenderer for ColormapRenderer {
    fn render(&self, image: &NormalizedImage) -> RasterImage {
        let (vmin, vmax) = image
            .data
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| f64::from(v))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                (min.min(v), max.max(v))
            });
        let range = vmax - vmin;

        let mut data = Vec::with_capacity(image.width * image.height * 3);
        for y in (0..image.height).rev() {
            for &v in image.row(y) {
                let v = f64::from(v);
                let scaled = if !v.is_finite() {
                    f64::NAN
                } else if range > 0.0 {
                    (v - vmin) / range
                } else {
                    0.0
                };
                data.extend_from_slice(&self.color(scaled));
            }
        }

        RasterImage {
            width: image.width,
            height: image.height,
            layout: PixelLayout::Rgb8,
            data,
        }
    }
}
