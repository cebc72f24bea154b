use crate::error::PreprocessError;
use crate::photo::Image;
use image::imageops;

/// Fixed input resolution a classifier expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::square(224)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Largest square centred in a `width` x `height` image, or `None` when the
/// image has no area.
pub fn center_square(width: u32, height: u32) -> Option<CropRect> {
    if width == 0 || height == 0 {
        return None;
    }

    if width < height {
        Some(portrait_square(width, height))
    } else {
        Some(landscape_square(width, height))
    }
}

// Full width, vertically centred.
fn portrait_square(width: u32, height: u32) -> CropRect {
    CropRect {
        x: 0,
        y: (height - width) / 2,
        side: width,
    }
}

// Full height, horizontally centred.
fn landscape_square(width: u32, height: u32) -> CropRect {
    CropRect {
        x: (width - height) / 2,
        y: 0,
        side: height,
    }
}

/// Crop `image` to its centred square and scale that square to `target`.
///
/// Orientation and scale metadata are carried over from the source.
pub fn crop_and_resize(image: Image, target: TargetSize) -> Result<Image, PreprocessError> {
    if target.width == 0 || target.height == 0 {
        return Err(PreprocessError::InvalidTargetSize {
            width: target.width,
            height: target.height,
        });
    }

    let rect = center_square(image.width(), image.height()).ok_or(PreprocessError::CropFailed {
        width: image.width(),
        height: image.height(),
    })?;

    let cropped = image.pixels().crop_imm(rect.x, rect.y, rect.side, rect.side);

    if cropped.width() != rect.side || cropped.height() != rect.side {
        return Err(PreprocessError::CropFailed {
            width: image.width(),
            height: image.height(),
        });
    }

    let resized = cropped.resize_exact(
        target.width,
        target.height,
        imageops::FilterType::Triangle,
    );

    Ok(image.replace_pixels(resized))
}
