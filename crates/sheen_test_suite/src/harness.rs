//! Test harness for visual tests
//!
//! Provides infrastructure for running visual tests, including:
//! - Rendering a recorded scene with the CPU rasterizer
//! - Writing the result to PNG files
//! - Reference image comparison

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use sheen_core::{Color, Mat4, Size};
use sheen_raster::{CoordinateSpace, ImageTextures, QuadInstance, RasterConfig, Rasterizer};

use crate::layout::Hbox;

/// Result of a visual test
#[derive(Debug)]
pub enum TestResult {
    /// Test passed
    Passed,
    /// Test passed but reference image was created/updated
    PassedWithNewReference,
    /// Test failed with difference percentage
    Failed { difference: f32, diff_path: PathBuf },
    /// Test skipped
    Skipped { reason: String },
}

impl TestResult {
    pub fn is_passed(&self) -> bool {
        matches!(
            self,
            TestResult::Passed | TestResult::PassedWithNewReference
        )
    }
}

/// Context for a single test: the scene it records
pub struct TestContext {
    /// Instances in submission order
    pub instances: Vec<QuadInstance>,
    /// Textures the scene samples
    pub textures: ImageTextures,
    /// Camera applied to every instance
    pub camera: Option<Mat4>,
    /// Clear color override
    pub background: Option<Color>,
    /// Coordinate convention override
    pub coordinate_space: Option<CoordinateSpace>,
    /// Viewport size
    pub size: Size,
    /// Test name
    pub name: String,
}

impl TestContext {
    /// Create a new test context
    pub fn new(name: &str, width: f32, height: f32) -> Self {
        Self {
            instances: Vec::new(),
            textures: ImageTextures::new(),
            camera: None,
            background: None,
            coordinate_space: None,
            size: Size::new(width, height),
            name: name.to_string(),
        }
    }

    /// Record one instance
    pub fn draw(&mut self, instance: QuadInstance) -> &mut Self {
        self.instances.push(instance);
        self
    }

    /// Record instances in order
    pub fn draw_all(&mut self, instances: impl IntoIterator<Item = QuadInstance>) -> &mut Self {
        self.instances.extend(instances);
        self
    }

    /// Record everything a layout produces
    pub fn draw_layout(&mut self, hbox: &Hbox) -> &mut Self {
        self.instances.extend(hbox.layout());
        self
    }

    /// Register a texture and return its slot
    pub fn add_texture(&mut self, image: RgbaImage) -> u32 {
        self.textures.insert(image)
    }

    pub fn set_camera(&mut self, camera: Mat4) {
        self.camera = Some(camera);
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    pub fn set_coordinate_space(&mut self, space: CoordinateSpace) {
        self.coordinate_space = Some(space);
    }

    /// Clear the recorded scene
    pub fn clear(&mut self) {
        self.instances.clear();
        self.textures = ImageTextures::new();
        self.camera = None;
        self.background = None;
        self.coordinate_space = None;
    }
}

/// Test harness for running visual tests
pub struct TestHarness {
    config: TestHarnessConfig,
}

impl TestHarness {
    /// Create a new test harness with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TestHarnessConfig::default())
    }

    /// Create a new test harness with custom configuration
    pub fn with_config(config: TestHarnessConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.output_dir).context("Failed to create output directory")?;
        std::fs::create_dir_all(&config.reference_dir)
            .context("Failed to create reference directory")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TestHarnessConfig {
        &self.config
    }

    /// Create a test context with default size
    pub fn create_context(&self, name: &str) -> TestContext {
        let size = self.config.default_size;
        TestContext::new(name, size.width, size.height)
    }

    /// Rasterize a recorded scene
    pub fn render(&self, ctx: &TestContext) -> Result<RgbaImage> {
        let mut raster_config = self.config.raster.clone();
        if let Some(background) = ctx.background {
            raster_config.background = background;
        }
        if let Some(space) = ctx.coordinate_space {
            raster_config.coordinate_space = space;
        }
        let mut rasterizer = Rasterizer::new(raster_config);
        if let Some(camera) = ctx.camera {
            rasterizer = rasterizer.with_camera(camera);
        }

        let mut fb = rasterizer
            .framebuffer(ctx.size.width as u32, ctx.size.height as u32)
            .with_context(|| format!("Invalid viewport for test '{}'", ctx.name))?;
        rasterizer.draw(&mut fb, &ctx.instances, &ctx.textures);
        Ok(fb.to_image()?)
    }

    /// Render and write a scene to `path`
    pub fn render_to_png(&self, ctx: &TestContext, path: &Path) -> Result<()> {
        let img = self.render(ctx)?;
        img.save(path).context("Failed to save PNG")?;
        Ok(())
    }

    /// Compare two images and return the difference ratio (0.0 = identical, 1.0 = completely different)
    pub fn compare_images(img1: &RgbaImage, img2: &RgbaImage) -> f32 {
        if img1.dimensions() != img2.dimensions() {
            return 1.0;
        }

        let (width, height) = img1.dimensions();
        let total_pixels = (width as u64 * height as u64).max(1) as f64;
        let diff_sum: f64 = img1
            .pixels()
            .zip(img2.pixels())
            .map(|(p1, p2)| {
                let channel = |i: usize| (p1[i] as f64 - p2[i] as f64).abs() / 255.0;
                (channel(0) + channel(1) + channel(2) + channel(3)) / 4.0
            })
            .sum();

        (diff_sum / total_pixels) as f32
    }

    /// Generate a diff image highlighting differences between two images
    pub fn generate_diff_image(img1: &RgbaImage, img2: &RgbaImage) -> Option<RgbaImage> {
        if img1.dimensions() != img2.dimensions() {
            return None;
        }

        let (width, height) = img1.dimensions();
        let diff = ImageBuffer::from_fn(width, height, |x, y| {
            let p1 = img1.get_pixel(x, y);
            let p2 = img2.get_pixel(x, y);
            let max_diff = (0..4)
                .map(|i| (p1[i] as i32 - p2[i] as i32).abs())
                .max()
                .unwrap_or(0);

            // Differences in red, matching pixels dimmed
            if max_diff > 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([p1[0] / 3, p1[1] / 3, p1[2] / 3, 128])
            }
        });

        Some(diff)
    }

    /// Run a test and save output as PNG
    pub fn run_test<F>(&self, name: &str, test_fn: F) -> Result<TestResult>
    where
        F: FnOnce(&mut TestContext),
    {
        let size = self.config.default_size;
        self.run_test_with_size(name, size.width, size.height, test_fn)
    }

    /// Run a test with custom size and save output as PNG
    pub fn run_test_with_size<F>(
        &self,
        name: &str,
        width: f32,
        height: f32,
        test_fn: F,
    ) -> Result<TestResult>
    where
        F: FnOnce(&mut TestContext),
    {
        let mut ctx = TestContext::new(name, width, height);
        test_fn(&mut ctx);

        if ctx.instances.is_empty() {
            return Ok(TestResult::Skipped {
                reason: "scene is empty".to_string(),
            });
        }

        let output_path = self.output_path(name);
        let reference_path = self.reference_path(name);

        tracing::info!(
            "Test '{}': {} instances, {} textures",
            name,
            ctx.instances.len(),
            ctx.textures.len()
        );

        let output_img = self.render(&ctx)?;
        output_img
            .save(&output_path)
            .context("Failed to save PNG")?;
        tracing::info!("Rendered test '{}' to {:?}", name, output_path);

        if !reference_path.exists() {
            std::fs::copy(&output_path, &reference_path)
                .context("Failed to create reference image")?;
            tracing::info!(
                "Test '{}' created new reference at {:?}",
                name,
                reference_path
            );
            return Ok(TestResult::PassedWithNewReference);
        }

        let reference_img = image::open(&reference_path)
            .context("Failed to open reference image")?
            .to_rgba8();
        let difference = Self::compare_images(&output_img, &reference_img);

        if difference <= self.config.threshold {
            tracing::info!("Test '{}' PASSED (diff: {:.4}%)", name, difference * 100.0);
            Ok(TestResult::Passed)
        } else {
            let diff_path = self.diff_path(name);
            if let Some(diff_img) = Self::generate_diff_image(&output_img, &reference_img) {
                diff_img.save(&diff_path).ok();
            }
            tracing::warn!(
                "Test '{}' FAILED (diff: {:.4}%, threshold: {:.4}%)",
                name,
                difference * 100.0,
                self.config.threshold * 100.0
            );
            Ok(TestResult::Failed {
                difference,
                diff_path,
            })
        }
    }

    /// Get the reference image path for a test
    pub fn reference_path(&self, name: &str) -> PathBuf {
        self.config.reference_dir.join(file_name(name, ""))
    }

    /// Get the output image path for a test
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(file_name(name, ""))
    }

    /// Get the diff image path for a test
    pub fn diff_path(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(file_name(name, "_diff"))
    }
}

fn file_name(name: &str, suffix: &str) -> String {
    format!("{}{}.png", name.replace("::", "_"), suffix)
}

/// Configuration for test harness
///
/// Loadable from TOML; the `[raster]` table configures the rasterizer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TestHarnessConfig {
    /// Output directory for test results
    pub output_dir: PathBuf,
    /// Reference image directory
    pub reference_dir: PathBuf,
    /// Default viewport size
    pub default_size: Size,
    /// Difference threshold for visual comparison (0.0-1.0)
    pub threshold: f32,
    /// Rasterizer settings
    pub raster: RasterConfig,
}

impl Default for TestHarnessConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("test_output"),
            reference_dir: PathBuf::from("test_output/references"),
            default_size: Size::new(400.0, 300.0),
            threshold: 0.001, // 0.1% difference allowed
            raster: RasterConfig::default(),
        }
    }
}

impl TestHarnessConfig {
    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TestHarnessConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .raster
            .validate()
            .with_context(|| format!("Invalid raster settings in {}", path.display()))?;
        Ok(config)
    }
}
