use image::{DynamicImage, ImageDecoder, ImageReader};
use std::path::Path;

/// How the pixels should be rotated or mirrored when shown to a person.
/// Carried through the pipeline untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl From<image::metadata::Orientation> for Orientation {
    /// Maps the EXIF orientation tag, as reported by the decoder.
    fn from(exif: image::metadata::Orientation) -> Self {
        use image::metadata::Orientation as Exif;
        match exif {
            Exif::NoTransforms => Orientation::Up,
            Exif::Rotate90 => Orientation::Right,
            Exif::Rotate180 => Orientation::Down,
            Exif::Rotate270 => Orientation::Left,
            Exif::FlipHorizontal => Orientation::UpMirrored,
            Exif::FlipVertical => Orientation::DownMirrored,
            Exif::Rotate90FlipH => Orientation::LeftMirrored,
            Exif::Rotate270FlipH => Orientation::RightMirrored,
        }
    }
}

/// A captured or derived photo: a pixel buffer plus display metadata.
///
/// Stages take an `Image` by value and hand back a new one, so a photo is
/// never mutated after it is produced.
#[derive(Debug, Clone)]
pub struct Image {
    pixels: DynamicImage,
    orientation: Orientation,
    scale: f32,
}

impl Image {
    pub fn new(pixels: DynamicImage) -> Self {
        Self {
            pixels,
            orientation: Orientation::default(),
            scale: 1.0,
        }
    }

    pub fn with_metadata(pixels: DynamicImage, orientation: Orientation, scale: f32) -> Self {
        Self {
            pixels,
            orientation,
            scale,
        }
    }

    /// Decode the file at `path`, keeping its EXIF orientation as metadata.
    /// Pixels are left as stored.
    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = decoder.orientation()?;
        let pixels = DynamicImage::from_decoder(decoder)?;
        Ok(Self::with_metadata(pixels, orientation.into(), 1.0))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Swap the pixel buffer, keeping orientation and scale.
    pub fn replace_pixels(self, pixels: DynamicImage) -> Self {
        Self {
            pixels,
            orientation: self.orientation,
            scale: self.scale,
        }
    }
}
