use std::sync::Arc;

/// Color-space tag carried alongside the decoded pixels.
///
/// `StandardLoader` output is assumed already sRGB-encoded (the common
/// case for 8bpc PNG/JPEG/TIFF delivery), and `ExrLoader` explicitly
/// produces sRGB-encoded output via its tone-mapping gamma step — so
/// `Srgb` is both the default and, today, the only tag ever produced.
/// The field exists so a future HDR/linear display path has somewhere to
/// read the tag from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Srgb,
}

/// A decoded, immutable RGB8 bitmap. Cheap to clone (`Arc`-backed pixel
/// data) so it can cross the worker→owner channel and be handed out to
/// callers without re-copying the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    rgb8: Arc<[u8]>,
    color_space: ColorSpace,
}

impl Image {
    /// Constructs an image tagged `ColorSpace::Srgb` — the default for
    /// both loaders.
    pub fn new(width: u32, height: u32, rgb8: Vec<u8>) -> Self {
        Self::with_color_space(width, height, rgb8, ColorSpace::Srgb)
    }

    pub fn with_color_space(width: u32, height: u32, rgb8: Vec<u8>, color_space: ColorSpace) -> Self {
        debug_assert_eq!(rgb8.len(), width as usize * height as usize * 3);
        Self {
            width,
            height,
            rgb8: Arc::from(rgb8),
            color_space,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw interleaved RGB8 pixel data, row-major, no padding.
    pub fn rgb8(&self) -> &[u8] {
        &self.rgb8
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }
}
