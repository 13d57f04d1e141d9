mod capture;
mod compare;

pub use capture::{capture_scene, render_scene, CaptureConfig, Scene};
pub use compare::{compare_images, generate_diff_image, CompareResult};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to capture screenshot: {0}")]
    Capture(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Scene to render
    pub scene: Scene,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl VisualTestConfig {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Path to the captured screenshot
    pub captured_path: PathBuf,
    /// Path to the reference image
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
    /// True when the reference did not exist and was created by this run
    pub created_reference: bool,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference image for a scene
pub fn reference_path(scene: Scene) -> PathBuf {
    references_dir().join(format!("{}.png", scene.name()))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a captured screenshot
pub fn captured_path(scene: Scene) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scene.name()))
}

/// Get the path to a diff image
pub fn diff_path(scene: Scene) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scene.name()))
}

/// Run a visual regression test
///
/// A missing reference is created from the capture and the test passes.
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let ref_path = reference_path(config.scene);
    let cap_path = captured_path(config.scene);

    capture_scene(&CaptureConfig {
        scene: config.scene,
        output_path: cap_path.clone(),
    })?;

    if !ref_path.exists() {
        std::fs::create_dir_all(references_dir())?;
        std::fs::copy(&cap_path, &ref_path)?;
        println!("Created missing reference: {}", ref_path.display());
        return Ok(VisualTestResult {
            passed: true,
            similarity: 1.0,
            captured_path: cap_path,
            reference_path: ref_path,
            diff_path: None,
            created_reference: true,
        });
    }

    let compare_result = compare_images(&ref_path, &cap_path)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    // Generate diff if failed
    let diff = if !passed {
        let diff_file = diff_path(config.scene);
        generate_diff_image(&ref_path, &cap_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
        created_reference: false,
    })
}

/// Update the reference image for a scene
pub fn update_reference(scene: Scene) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(scene);
    capture_scene(&CaptureConfig {
        scene,
        output_path: ref_path.clone(),
    })?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
