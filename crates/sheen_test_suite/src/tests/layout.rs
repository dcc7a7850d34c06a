//! Layout tests
//!
//! Scenes assembled from horizontal box containers

use crate::layout::{Bbox, Element, Hbox};
use crate::runner::TestSuite;
use crate::tests::textures::checkerboard;
use sheen_core::Color;
use sheen_raster::{shadow_presets, BoxShadow};

/// Create the layout test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("layout");

    // Equal columns across the viewport
    suite.add("hbox_columns", |ctx| {
        let slot = ctx.add_texture(checkerboard(32, 4, [0, 0, 0, 255], [255, 255, 255, 255]));
        let hbox = Hbox::new(Bbox::new(0.0, 0.0, ctx.size.width, ctx.size.height))
            .with(Element::quad(Color::RED))
            .with(Element::textured(slot))
            .with(Element::quad(Color::GREEN))
            .with(Element::quad(Color::BLUE));
        ctx.draw_layout(&hbox);
    });

    // A nested box splits its column again
    suite.add("hbox_nested", |ctx| {
        ctx.set_background(Color::WHITE);
        let inner = Hbox::nested()
            .with(Element::panel(Color::from_hex(0xFDE68A), 8.0))
            .with(Element::panel(Color::from_hex(0xA7F3D0), 8.0))
            .with(Element::Hbox(
                Hbox::nested()
                    .with(Element::quad(Color::from_hex(0x93C5FD)))
                    .with(Element::quad(Color::from_hex(0xC4B5FD))),
            ));
        let outer = Hbox::new(Bbox::new(20.0, 60.0, 380.0, 240.0))
            .with(Element::panel(Color::from_hex(0xFCA5A5), 16.0))
            .with(Element::Hbox(inner));
        ctx.draw_layout(&outer);
    });

    // Cards with borders and shadows
    suite.add("hbox_cards", |ctx| {
        ctx.set_background(Color::rgb(0.95, 0.95, 0.97));
        let hbox = Hbox::new(Bbox::new(10.0, 80.0, 390.0, 220.0))
            .with(Element::panel(Color::WHITE, 12.0).with_shadow(shadow_presets::sm()))
            .with(Element::panel(Color::WHITE, 12.0).with_shadow(shadow_presets::md()))
            .with(
                Element::panel(Color::WHITE, 12.0)
                    .with_border(1.0, Color::rgb(0.8, 0.8, 0.85))
                    .with_shadow(BoxShadow::new(0.0, 8.0, 14.0, Color::BLACK.with_alpha(0.2))),
            );
        ctx.draw_layout(&hbox);
    });

    suite
}
