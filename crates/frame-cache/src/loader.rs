use std::path::Path;

use tracing::warn;

use crate::image::{ColorSpace, Image};

/// A pluggable image decoder. `load` never propagates errors — a failed
/// decode is logged by the implementation and reported as `None`, matching
/// the cache's "disk errors are non-fatal" contract.
pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> Option<Image>;
}

/// Decodes any 8-bit-per-channel format the `image` crate understands
/// (PNG, JPEG, TIFF, …).
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardLoader;

impl ImageLoader for StandardLoader {
    fn load(&self, path: &Path) -> Option<Image> {
        match image::open(path) {
            Ok(dynamic) => {
                let rgb = dynamic.into_rgb8();
                let (width, height) = rgb.dimensions();
                Some(Image::new(width, height, rgb.into_raw()))
            }
            Err(err) => {
                warn!(target: "frame_cache::loader", path = %path.display(), %err, "failed to decode standard image");
                None
            }
        }
    }
}

/// Decodes HDR float imagery (OpenEXR) and tone-maps it down to an
/// sRGB-encoded 8-bit image: clamp negatives to 0, Reinhard (`x / (1 + x)`),
/// then an sRGB gamma approximation (`x.powf(1.0 / 2.2)`). The result is
/// tagged `ColorSpace::Srgb` since the gamma step is exactly what makes it
/// so.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExrLoader;

impl ExrLoader {
    fn tone_map_channel(value: f32) -> u8 {
        let clamped = value.max(0.0);
        let reinhard = clamped / (1.0 + clamped);
        let gamma_corrected = reinhard.powf(1.0 / 2.2);
        (gamma_corrected.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl ImageLoader for ExrLoader {
    fn load(&self, path: &Path) -> Option<Image> {
        match image::open(path) {
            Ok(dynamic) => {
                // Keep only the first 3 channels, matching _tone_map_hdr's
                // RGBA-to-RGB truncation (grayscale is broadcast to RGB by
                // `into_rgb32f` already).
                let rgb32f = dynamic.into_rgb32f();
                let (width, height) = rgb32f.dimensions();
                let rgb8: Vec<u8> = rgb32f
                    .into_raw()
                    .into_iter()
                    .map(Self::tone_map_channel)
                    .collect();
                Some(Image::with_color_space(width, height, rgb8, ColorSpace::Srgb))
            }
            Err(err) => {
                warn!(target: "frame_cache::loader", path = %path.display(), %err, "failed to decode EXR image");
                None
            }
        }
    }
}

/// Dispatches to [`ExrLoader`] or [`StandardLoader`] by lowercase file
/// extension, mirroring `is_exr_file`'s suffix check.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoaderRegistry {
    exr: ExrLoader,
    standard: StandardLoader,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exr_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("exr"))
            .unwrap_or(false)
    }
}

impl ImageLoader for LoaderRegistry {
    fn load(&self, path: &Path) -> Option<Image> {
        if Self::is_exr_file(path) {
            self.exr.load(path)
        } else {
            self.standard.load(path)
        }
    }
}
