//! Border rendering tests
//!
//! The border band sits inside the shape edge and follows its rounding

use crate::runner::TestSuite;
use sheen_core::Color;
use sheen_raster::QuadInstance;

/// Create the borders test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("borders");

    suite.add("border_basic", |ctx| {
        ctx.set_background(Color::WHITE);
        ctx.draw(
            QuadInstance::new(100.0, 75.0, 200.0, 150.0)
                .with_color(Color::rgb(0.85, 0.9, 1.0))
                .with_border(4.0, Color::BLUE),
        );
    });

    suite.add("border_rounded", |ctx| {
        ctx.set_background(Color::WHITE);
        ctx.draw(
            QuadInstance::new(100.0, 75.0, 200.0, 150.0)
                .with_corner_radius(20.0)
                .with_color(Color::WHITE)
                .with_border(3.0, Color::BLACK),
        );
    });

    // Border wider than the rounding: inner corners turn square-ish
    suite.add("border_thick", |ctx| {
        ctx.set_background(Color::WHITE);
        ctx.draw(
            QuadInstance::new(120.0, 80.0, 160.0, 140.0)
                .with_corner_radius(12.0)
                .with_color(Color::YELLOW)
                .with_border(24.0, Color::RED),
        );
    });

    // Transparent fill leaves only the ring
    suite.add("border_only", |ctx| {
        ctx.set_background(Color::rgb(0.92, 0.92, 0.94));
        ctx.draw(
            QuadInstance::new(130.0, 80.0, 140.0, 140.0)
                .with_corner_radius(70.0)
                .with_color(Color::TRANSPARENT)
                .with_border(6.0, Color::from_hex(0x10B981)),
        );
    });

    // Widths from hairline to several pixels
    suite.add("border_widths", |ctx| {
        ctx.set_background(Color::WHITE);
        for (i, width) in [0.5, 1.0, 1.5, 2.0, 4.0].into_iter().enumerate() {
            ctx.draw(
                QuadInstance::new(20.0 + i as f32 * 75.0, 110.0, 60.0, 80.0)
                    .with_corner_radius(8.0)
                    .with_color(Color::WHITE)
                    .with_border(width, Color::BLACK),
            );
        }
    });

    suite
}
