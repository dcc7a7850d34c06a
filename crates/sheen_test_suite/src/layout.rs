//! Minimal box layout for test scenes
//!
//! An [`Hbox`] splits its bounds into equal-width columns, one per child, and
//! emits a [`QuadInstance`] for every leaf. Nested `Hbox`es lay out inside
//! their column.

use sheen_core::{Color, Point, Rect};
use sheen_raster::{Border, BoxShadow, QuadInstance, TextureMapping, TextureMode};

/// Axis-aligned bounds given by two corners
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    pub min: Point,
    pub max: Point,
}

impl Bbox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        let rect = self.to_rect().outset(-amount);
        Self::from(rect)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.min, self.max)
    }
}

impl From<Rect> for Bbox {
    fn from(rect: Rect) -> Self {
        Self {
            min: rect.min(),
            max: rect.max(),
        }
    }
}

/// Something that can be placed in a container
#[derive(Clone, Debug)]
pub enum Element {
    /// Solid fill covering the whole cell
    Quad { color: Color },
    /// Image texture stretched over the cell
    TexturedQuad { texture: u32 },
    /// Rounded card with optional border and shadow, inset from the cell
    Panel {
        color: Color,
        corner_radius: f32,
        border: Option<Border>,
        shadow: Option<BoxShadow>,
        inset: f32,
    },
    /// Nested horizontal container
    Hbox(Hbox),
}

impl Element {
    pub fn quad(color: Color) -> Self {
        Element::Quad { color }
    }

    pub fn textured(texture: u32) -> Self {
        Element::TexturedQuad { texture }
    }

    pub fn panel(color: Color, corner_radius: f32) -> Self {
        Element::Panel {
            color,
            corner_radius,
            border: None,
            shadow: None,
            inset: 8.0,
        }
    }

    /// Add a border (panels only; other elements are returned unchanged)
    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        if let Element::Panel { border, .. } = &mut self {
            *border = Some(Border::new(width, color));
        }
        self
    }

    /// Add a shadow (panels only; other elements are returned unchanged)
    pub fn with_shadow(mut self, value: BoxShadow) -> Self {
        if let Element::Panel { shadow, .. } = &mut self {
            *shadow = Some(value);
        }
        self
    }

    fn emit(&self, cell: Bbox, out: &mut Vec<QuadInstance>) {
        match self {
            Element::Quad { color } => {
                out.push(QuadInstance::from_rect(cell.to_rect()).with_color(*color));
            }
            Element::TexturedQuad { texture } => {
                out.push(
                    QuadInstance::from_rect(cell.to_rect())
                        .with_texture(TextureMapping::full(*texture, TextureMode::Image)),
                );
            }
            Element::Panel {
                color,
                corner_radius,
                border,
                shadow,
                inset,
            } => {
                let mut quad = QuadInstance::from_rect(cell.inset(*inset).to_rect())
                    .with_color(*color)
                    .with_corner_radius(*corner_radius);
                quad.border = *border;
                quad.shadow = *shadow;
                out.push(quad);
            }
            Element::Hbox(hbox) => {
                let mut child = hbox.clone();
                child.bbox = cell;
                child.layout_into(out);
            }
        }
    }
}

/// Horizontal container with equal-width columns
#[derive(Clone, Debug)]
pub struct Hbox {
    elements: Vec<Element>,
    bbox: Bbox,
}

impl Hbox {
    pub fn new(bbox: Bbox) -> Self {
        Self {
            elements: Vec::new(),
            bbox,
        }
    }

    /// Container whose bounds are assigned by its parent
    pub fn nested() -> Self {
        Self::new(Bbox::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn add_element(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    pub fn with(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn bbox(&self) -> Bbox {
        self.bbox
    }

    pub fn set_bbox(&mut self, bbox: Bbox) {
        self.bbox = bbox;
    }

    /// Cell assigned to child `index`
    pub fn cell(&self, index: usize) -> Bbox {
        let child_width = self.bbox.width() / self.elements.len().max(1) as f32;
        let x0 = self.bbox.min.x + child_width * index as f32;
        Bbox::new(x0, self.bbox.min.y, x0 + child_width, self.bbox.max.y)
    }

    /// Lay out every child, in order
    pub fn layout(&self) -> Vec<QuadInstance> {
        let mut out = Vec::new();
        self.layout_into(&mut out);
        out
    }

    fn layout_into(&self, out: &mut Vec<QuadInstance>) {
        for (i, element) in self.elements.iter().enumerate() {
            element.emit(self.cell(i), out);
        }
    }
}
