use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Channel difference above which a pixel is marked in the diff image
const DIFF_TOLERANCE: u8 = 10;

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose largest channel difference exceeds the diff tolerance
    pub differing_pixels: usize,
}

/// Compare two PNG files; see [`compare_rgba`].
pub fn compare_images(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    compare_rgba(&reference, &captured)
}

/// Compare two images with SSIM over their RGB channels
pub fn compare_rgba(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let ref_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let cap_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();
    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &ref_rgb, &cap_rgb)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    let differing_pixels = reference
        .pixels()
        .zip(captured.pixels())
        .filter(|(a, b)| pixel_difference(a, b) > DIFF_TOLERANCE)
        .count();

    Ok(CompareResult {
        similarity: result.score,
        differing_pixels,
    })
}

/// Write an image that dims matching pixels and marks differing ones in red
pub fn generate_diff_image(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    diff_rgba(&reference, &captured).save(output)?;
    Ok(())
}

fn diff_rgba(reference: &RgbaImage, captured: &RgbaImage) -> RgbaImage {
    let (width, height) = captured.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let cap = captured.get_pixel(x, y);
        let Some(reference) = reference.get_pixel_checked(x, y) else {
            return Rgba([255, 0, 0, 255]);
        };
        let diff = pixel_difference(reference, cap);
        if diff > DIFF_TOLERANCE {
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([cap[0] / 3, cap[1] / 3, cap[2] / 3, 255])
        }
    })
}

/// Largest channel difference between two pixels, alpha included
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}
