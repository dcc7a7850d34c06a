//! Reference CPU host
//!
//! Drives the kernel over a [`Framebuffer`]. Instances are drawn strictly in
//! submission order; within one instance the covered rows are shaded in
//! parallel on the rayon pool, since every pixel only depends on its own
//! sample.

use rayon::prelude::*;
use sheen_core::{Color, Mat4, Point, Rect};

use crate::config::RasterConfig;
use crate::coords::{pixel_camera, quad_bounds, to_pixel_space};
use crate::framebuffer::{blend_premultiplied, Framebuffer};
use crate::instance::{GpuQuad, QuadInstance};
use crate::kernel::{evaluate, texture_coords, SampleContext};
use crate::texture::TextureSource;

/// CPU rasterizer for quad instances
#[derive(Clone, Debug, Default)]
pub struct Rasterizer {
    config: RasterConfig,
    camera: Option<Mat4>,
}

impl Rasterizer {
    pub fn new(config: RasterConfig) -> Self {
        Self {
            config,
            camera: None,
        }
    }

    /// Transform every placed instance by `camera` before it reaches the screen
    ///
    /// The camera acts in the configured coordinate space: NDC units for
    /// `Centered`, pixels for `Pixels`.
    pub fn with_camera(mut self, camera: Mat4) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Framebuffer cleared to the configured background
    pub fn framebuffer(&self, width: u32, height: u32) -> crate::error::Result<Framebuffer> {
        Framebuffer::new(width, height, self.config.background)
    }

    /// Draw `instances` in order, returning how many touched the framebuffer
    ///
    /// The framebuffer size is the viewport. The configured background is the
    /// framebuffer's business (see [`Rasterizer::framebuffer`]); shapes are
    /// composited onto whatever is already there.
    pub fn draw(
        &self,
        fb: &mut Framebuffer,
        instances: &[QuadInstance],
        textures: &dyn TextureSource,
    ) -> usize {
        let viewport = fb.viewport();
        let width = fb.width() as usize;
        let screen = Rect::new(0.0, 0.0, viewport.width, viewport.height);

        let camera = self
            .camera
            .map(|c| pixel_camera(&c, self.config.coordinate_space, viewport));
        let inverse = match camera {
            Some(camera) => match camera.inverse_affine_2d() {
                Some(inverse) => Some(inverse),
                None => {
                    tracing::warn!("Camera transform is singular, nothing drawn");
                    return 0;
                }
            },
            None => None,
        };

        // Shapes are layered onto the framebuffer, not onto the background
        let kernel_config = RasterConfig {
            background: Color::TRANSPARENT,
            ..self.config.clone()
        };

        tracing::debug!(
            "Rasterizing {} instances into {}x{}",
            instances.len(),
            fb.width(),
            fb.height()
        );

        let mut drawn = 0;
        for (index, instance) in instances.iter().enumerate() {
            let quad = to_pixel_space(instance, self.config.coordinate_space, viewport);

            let bounds = screen_bounds(&quad, camera.as_ref());
            let Some(visible) = bounds.intersection(&screen) else {
                tracing::trace!("Instance {} is off-screen, skipped", index);
                continue;
            };

            if let Some(tex) = quad.texture {
                if !textures.has_texture(tex.texture) {
                    tracing::warn!(
                        "Instance {} samples missing texture {}, drawing tint only",
                        index,
                        tex.texture
                    );
                }
            }

            let x0 = visible.x().floor().max(0.0) as usize;
            let x1 = (visible.max().x.ceil() as usize).min(width);
            let y0 = visible.y().floor().max(0.0) as usize;
            let y1 = (visible.max().y.ceil() as usize).min(fb.height() as usize);
            if x0 >= x1 || y0 >= y1 {
                continue;
            }

            let shade_row = |(row, pixels): (usize, &mut [Color])| {
                let y = (y0 + row) as f32 + 0.5;
                for x in x0..x1 {
                    let screen_point = Point::new(x as f32 + 0.5, y);
                    let position = inverse.map_or(screen_point, |m| m.transform_point(screen_point));
                    let texel = quad.texture.and_then(|tex| {
                        texture_coords(&quad, position).and_then(|uv| textures.sample(tex.texture, uv))
                    });
                    let sample = SampleContext { position, texel };
                    let out = evaluate(&quad, &sample, &kernel_config);
                    blend_premultiplied(&mut pixels[x], out.color);
                }
            };

            let rows = &mut fb.rows_mut()[y0 * width..y1 * width];
            if self.config.parallel {
                rows.par_chunks_mut(width).enumerate().for_each(shade_row);
            } else {
                rows.chunks_mut(width).enumerate().for_each(shade_row);
            }
            drawn += 1;
        }

        tracing::debug!("Drew {} of {} instances", drawn, instances.len());
        drawn
    }

    /// Draw flattened GPU records
    pub fn draw_records(
        &self,
        fb: &mut Framebuffer,
        records: &[GpuQuad],
        textures: &dyn TextureSource,
    ) -> usize {
        let instances: Vec<QuadInstance> = records.iter().map(GpuQuad::to_instance).collect();
        self.draw(fb, &instances, textures)
    }
}

/// Screen-space rect covering a pixel-space instance, camera included
fn screen_bounds(quad: &QuadInstance, camera: Option<&Mat4>) -> Rect {
    let bounds = quad_bounds(quad);
    let Some(camera) = camera else {
        return bounds;
    };
    let (min, max) = (bounds.min(), bounds.max());
    let corners = [
        min,
        Point::new(max.x, min.y),
        max,
        Point::new(min.x, max.y),
    ]
    .map(|p| camera.transform_point(p));

    let lo = corners
        .iter()
        .fold(corners[0], |a, p| Point::new(a.x.min(p.x), a.y.min(p.y)));
    let hi = corners
        .iter()
        .fold(corners[0], |a, p| Point::new(a.x.max(p.x), a.y.max(p.y)));
    Rect::from_points(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{map, ndc_to_pixels, CoordinateSpace};
    use crate::instance::{BoxShadow, TextureMapping, TextureMode};
    use crate::texture::{ImageTextures, NoTextures};

    fn render(rasterizer: &Rasterizer, instances: &[QuadInstance]) -> Framebuffer {
        let mut fb = rasterizer.framebuffer(64, 48).unwrap();
        rasterizer.draw(&mut fb, instances, &NoTextures);
        fb
    }

    #[test]
    fn test_draws_inside_only() {
        let r = Rasterizer::new(RasterConfig::default());
        let fb = render(&r, &[QuadInstance::new(8.0, 8.0, 16.0, 16.0).with_color(Color::RED)]);

        assert_eq!(fb.pixel(15, 15), Some(Color::RED));
        assert_eq!(fb.pixel(30, 30), Some(Color::TRANSPARENT));
        assert_eq!(fb.pixel(7, 15), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_submission_order() {
        let r = Rasterizer::new(RasterConfig::default());
        let below = QuadInstance::new(0.0, 0.0, 32.0, 32.0).with_color(Color::RED);
        let above = QuadInstance::new(16.0, 16.0, 32.0, 32.0).with_color(Color::BLUE);

        let fb = render(&r, &[below, above]);
        assert_eq!(fb.pixel(24, 24), Some(Color::BLUE));

        let fb = render(&r, &[above, below]);
        assert_eq!(fb.pixel(24, 24), Some(Color::RED));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let quads = [
            QuadInstance::new(4.0, 4.0, 40.0, 30.0)
                .with_corner_radius(8.0)
                .with_color(Color::rgba(0.2, 0.6, 0.9, 0.8))
                .with_border(2.0, Color::WHITE)
                .with_shadow(BoxShadow::new(3.0, 3.0, 4.0, Color::BLACK.with_alpha(0.5))),
            QuadInstance::new(30.0, 20.0, 20.0, 20.0).with_color(Color::YELLOW.with_alpha(0.5)),
        ];
        let parallel = render(&Rasterizer::new(RasterConfig::default()), &quads);
        let sequential = render(&Rasterizer::new(RasterConfig::default().sequential()), &quads);
        assert_eq!(parallel.to_rgba8(), sequential.to_rgba8());
    }

    #[test]
    fn test_background_is_clear_color() {
        let config = RasterConfig::default().with_background(Color::WHITE);
        let r = Rasterizer::new(config);
        let fb = render(&r, &[QuadInstance::new(8.0, 8.0, 16.0, 16.0).with_color(Color::RED)]);
        assert_eq!(fb.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(fb.pixel(15, 15), Some(Color::RED));
    }

    #[test]
    fn test_off_screen_is_skipped() {
        let r = Rasterizer::new(RasterConfig::default());
        let mut fb = r.framebuffer(16, 16).unwrap();
        let drawn = r.draw(
            &mut fb,
            &[
                QuadInstance::new(100.0, 100.0, 10.0, 10.0),
                QuadInstance::new(-50.0, 0.0, 10.0, 10.0),
                QuadInstance::new(2.0, 2.0, 4.0, 4.0),
            ],
            &NoTextures,
        );
        assert_eq!(drawn, 1);
    }

    #[test]
    fn test_shadow_extends_past_shape() {
        let r = Rasterizer::new(RasterConfig::default());
        let quad = QuadInstance::new(8.0, 8.0, 16.0, 16.0)
            .with_shadow(BoxShadow::new(0.0, 0.0, 3.0, Color::BLACK));
        let fb = render(&r, &[quad]);
        let halo = fb.pixel(26, 15).unwrap();
        assert!(halo.a > 0.0 && halo.a < 1.0);
        assert_eq!(fb.pixel(60, 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_centered_coordinates() {
        let config = RasterConfig::default().with_coordinate_space(CoordinateSpace::Centered);
        let r = Rasterizer::new(config);
        // Centered quad covering the middle half of the screen
        let fb = render(&r, &[QuadInstance::new(0.0, 0.0, 1.0, 1.0).with_color(Color::GREEN)]);
        assert_eq!(fb.pixel(32, 24), Some(Color::GREEN));
        assert_eq!(fb.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_camera_translation() {
        let r = Rasterizer::new(RasterConfig::default()).with_camera(Mat4::translation(20.0, 10.0, 0.0));
        let fb = render(&r, &[QuadInstance::new(0.0, 0.0, 8.0, 8.0).with_color(Color::RED)]);
        assert_eq!(fb.pixel(24, 14), Some(Color::RED));
        assert_eq!(fb.pixel(4, 4), Some(Color::TRANSPARENT));

        let singular = Rasterizer::new(RasterConfig::default()).with_camera(Mat4::scale(0.0, 0.0, 1.0));
        let mut fb = singular.framebuffer(8, 8).unwrap();
        assert_eq!(singular.draw(&mut fb, &[QuadInstance::new(0.0, 0.0, 8.0, 8.0)], &NoTextures), 0);
    }

    #[test]
    fn test_centered_camera_agrees_with_map() {
        let config = RasterConfig::default().with_coordinate_space(CoordinateSpace::Centered);
        let camera = Mat4::translation(0.5, 0.0, 0.0);
        let r = Rasterizer::new(config).with_camera(camera);
        let quad = QuadInstance::new(0.0, 0.0, 0.25, 0.25).with_color(Color::RED);
        let fb = render(&r, &[quad]);

        let viewport = fb.viewport();
        let center = ndc_to_pixels(
            map(Point::ZERO, &quad, viewport, Some(&camera), CoordinateSpace::Centered),
            viewport,
        );
        assert!((center.x - 48.0).abs() < 1e-3 && (center.y - 24.0).abs() < 1e-3);
        assert_eq!(fb.pixel(48, 24), Some(Color::RED));
        assert_eq!(fb.pixel(32, 24), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_zoomed_out_camera_draws() {
        let r = Rasterizer::new(RasterConfig::default()).with_camera(Mat4::scale(0.0003, 0.0003, 1.0));
        let mut fb = r.framebuffer(64, 48).unwrap();
        let quad = QuadInstance::new(0.0, 0.0, 100_000.0, 100_000.0).with_color(Color::RED);
        assert_eq!(r.draw(&mut fb, &[quad], &NoTextures), 1);
        assert_eq!(fb.pixel(10, 10), Some(Color::RED));
        assert_eq!(fb.pixel(40, 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_textured_quad() {
        let mut textures = ImageTextures::new();
        let slot = textures.insert_rgba([0, 0, 255, 255].repeat(4), 2, 2).unwrap();

        let r = Rasterizer::new(RasterConfig::default());
        let mut fb = r.framebuffer(16, 16).unwrap();
        let quad = QuadInstance::new(0.0, 0.0, 16.0, 16.0)
            .with_texture(TextureMapping::full(slot, TextureMode::Image));
        r.draw(&mut fb, &[quad], &textures);
        assert_eq!(fb.pixel(8, 8), Some(Color::BLUE));

        // Missing texture falls back to the tint
        let mut fb = r.framebuffer(16, 16).unwrap();
        r.draw(&mut fb, &[quad.with_color(Color::GREEN)], &NoTextures);
        assert_eq!(fb.pixel(8, 8), Some(Color::GREEN));
    }

    #[test]
    fn test_gpu_records_draw_identically() {
        let quads = [QuadInstance::new(4.0, 4.0, 20.0, 12.0)
            .with_corner_radius(4.0)
            .with_color(Color::RED)
            .with_border(1.0, Color::BLACK)];
        let records: Vec<GpuQuad> = quads.iter().map(QuadInstance::to_gpu).collect();

        let r = Rasterizer::new(RasterConfig::default());
        let mut a = r.framebuffer(32, 32).unwrap();
        let mut b = r.framebuffer(32, 32).unwrap();
        r.draw(&mut a, &quads, &NoTextures);
        r.draw_records(&mut b, &records, &NoTextures);
        assert_eq!(a.to_rgba8(), b.to_rgba8());
    }
}
