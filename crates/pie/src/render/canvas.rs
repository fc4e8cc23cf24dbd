use super::theme::{Theme, set_source};
use crate::config::{HexColor, PieConfig, Shape, VariantConfig};
use cairo::{Context, Format, ImageSurface};
use pie_layout::{
    CircleLayout, ComposeError, LayoutError, Point, PointPlacement, SceneComposer,
    SegmentPlacement, compose_circle,
};
use std::f64::consts::TAU;
use std::io::Write;
use thiserror::Error;

const LABEL_SCALE: f64 = 0.42;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("Drawing error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Failed to write PNG: {0}")]
    Png(#[from] cairo::IoError),
}

impl From<ComposeError<cairo::Error>> for RenderError {
    fn from(err: ComposeError<cairo::Error>) -> Self {
        match err {
            ComposeError::Layout(e) => Self::Layout(e),
            ComposeError::Scene(e) => Self::Cairo(e),
        }
    }
}

/// Draws placements onto a cairo context.
///
/// Layout space has y pointing up and its origin in the middle of the canvas;
/// `anchor` is where the layout origin ends up, in that space.
pub struct CanvasComposer<'a> {
    cr: &'a Context,
    center: Point,
    anchor: Point,
    segment_radius: f64,
    item_radius: f64,
    theme: &'a Theme,
}

impl<'a> CanvasComposer<'a> {
    pub fn new(cr: &'a Context, config: &PieConfig, theme: &'a Theme) -> Self {
        Self {
            cr,
            center: Point::new(
                config.canvas.width as f64 / 2.0,
                config.canvas.height as f64 / 2.0,
            ),
            anchor: config.origin,
            segment_radius: config.segment_radius,
            item_radius: config.item_radius,
            theme,
        }
    }

    fn to_canvas(&self, p: Point) -> Point {
        Point::new(self.center.x + p.x, self.center.y - p.y)
    }

    fn trace_shape(&self, shape: Shape, at: Point) {
        let r = self.item_radius;
        let cr = self.cr;
        cr.new_path();
        match shape {
            Shape::Circle => cr.arc(at.x, at.y, r, 0.0, TAU),
            Shape::Square => cr.rectangle(at.x - r, at.y - r, 2.0 * r, 2.0 * r),
            Shape::Diamond => {
                cr.move_to(at.x, at.y - r);
                cr.line_to(at.x + r, at.y);
                cr.line_to(at.x, at.y + r);
                cr.line_to(at.x - r, at.y);
                cr.close_path();
            }
        }
    }

    fn draw_label(&self, text: &str, at: Point) -> Result<(), cairo::Error> {
        let cr = self.cr;
        set_source(cr, self.theme.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.item_radius * LABEL_SCALE);
        let ext = cr.text_extents(text)?;
        cr.move_to(
            at.x - ext.width() / 2.0 - ext.x_bearing(),
            at.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)
    }
}

impl SceneComposer<VariantConfig, HexColor> for CanvasComposer<'_> {
    type Error = cairo::Error;

    /// The slice fills clockwise from its rotation, so it ends at
    /// `start_angle_degrees` and covers `sweep_degrees` before that.
    fn place_segment(
        &mut self,
        segment: &SegmentPlacement,
        color: &HexColor,
    ) -> Result<(), cairo::Error> {
        let at = self.to_canvas(self.anchor);
        // cairo measures angles clockwise on screen
        let start = -segment.start_angle_degrees.to_radians();
        let end = start + segment.sweep_degrees().to_radians();

        let cr = self.cr;
        cr.new_path();
        cr.move_to(at.x, at.y);
        cr.arc(at.x, at.y, self.segment_radius, start, end);
        cr.close_path();
        set_source(cr, **color);
        cr.fill()
    }

    fn place_item(
        &mut self,
        item: &PointPlacement,
        variant: &VariantConfig,
        position: Point,
    ) -> Result<(), cairo::Error> {
        let at = self.to_canvas(position);
        log::debug!(
            "item {} '{}' at ({:.1}, {:.1})",
            item.index,
            variant.label,
            at.x,
            at.y
        );

        self.trace_shape(variant.shape, at);
        set_source(self.cr, self.theme.item_fill);
        self.cr.fill_preserve()?;
        set_source(self.cr, self.theme.item_outline);
        self.cr.set_line_width(self.theme.outline_width);
        self.cr.stroke()?;

        self.draw_label(&variant.label, at)
    }
}

/// Runs one layout pass over a fresh surface sized by the canvas config.
pub fn render_to_surface(
    config: &PieConfig,
    theme: &Theme,
) -> Result<(ImageSurface, CircleLayout), RenderError> {
    let surface = ImageSurface::create(Format::ARgb32, config.canvas.width, config.canvas.height)?;

    let layout = {
        let cr = Context::new(&surface)?;
        set_source(&cr, *config.canvas.background);
        cr.paint()?;

        let mut composer = CanvasComposer::new(&cr, config, theme);
        compose_circle(
            &config.variants,
            &config.colors,
            config.radius,
            config.origin,
            &mut composer,
        )?
    };

    surface.flush();
    Ok((surface, layout))
}

pub fn render_png<W: Write>(
    config: &PieConfig,
    theme: &Theme,
    out: &mut W,
) -> Result<CircleLayout, RenderError> {
    let (surface, layout) = render_to_surface(config, theme)?;
    surface.write_to_png(out)?;
    log::info!("Rendered {} slots", layout.len());
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasConfig, VariantLabel};

    fn variant(label: &str, shape: Shape) -> VariantConfig {
        VariantConfig {
            label: VariantLabel::from(label.to_string()),
            shape,
        }
    }

    fn color(hex: &str) -> HexColor {
        hex.parse().unwrap()
    }

    fn four_slot_config() -> PieConfig {
        PieConfig {
            radius: 40.0,
            segment_radius: 100.0,
            item_radius: 10.0,
            origin: Point::ORIGIN,
            canvas: CanvasConfig {
                width: 256,
                height: 256,
                background: HexColor::transparent(),
            },
            variants: vec![
                variant("A", Shape::Circle),
                variant("B", Shape::Square),
                variant("C", Shape::Diamond),
                variant("D", Shape::Circle),
            ],
            colors: vec![
                color("#ff0000"),
                color("#00ff00"),
                color("#0000ff"),
                color("#ffffff"),
            ],
        }
    }

    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    #[test]
    fn test_segments_are_centered_on_their_items() {
        let (mut surface, layout) =
            render_to_surface(&four_slot_config(), &Theme::default()).unwrap();
        assert_eq!(layout.len(), 4);

        // 80px out from the middle, past the item ring
        assert_eq!(pixel(&mut surface, 128 + 80, 128), 0xffff0000); // right
        assert_eq!(pixel(&mut surface, 128, 128 - 80), 0xff00ff00); // up
        assert_eq!(pixel(&mut surface, 128 - 80, 128), 0xff0000ff); // left
        assert_eq!(pixel(&mut surface, 128, 128 + 80), 0xffffffff); // down

        // outside the slices the background shows through
        assert_eq!(pixel(&mut surface, 2, 2), 0);
    }

    #[test]
    fn test_origin_moves_the_whole_circle() {
        let mut config = four_slot_config();
        config.origin = Point::new(20.0, 0.0);
        let (mut surface, _) = render_to_surface(&config, &Theme::default()).unwrap();

        assert_eq!(pixel(&mut surface, 128 + 20 + 90, 128), 0xffff0000);
        assert_eq!(pixel(&mut surface, 128 + 20 - 90, 128), 0xff0000ff);
    }

    #[test]
    fn test_mismatched_config_draws_nothing() {
        let mut config = four_slot_config();
        config.colors.pop();

        let err = render_to_surface(&config, &Theme::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Layout(LayoutError::ConfigurationMismatch {
                variants: 4,
                colors: 3
            })
        ));
    }

    #[test]
    fn test_empty_config_is_invalid_count() {
        let mut config = four_slot_config();
        config.variants.clear();
        config.colors.clear();

        let err = render_to_surface(&config, &Theme::default()).unwrap_err();
        assert!(matches!(err, RenderError::Layout(LayoutError::InvalidCount)));
    }

    #[test]
    fn test_render_png_writes_png() {
        let mut bytes = Vec::new();
        let layout = render_png(&four_slot_config(), &Theme::default(), &mut bytes).unwrap();

        assert_eq!(layout.points.len(), 4);
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_bundled_config_renders() {
        let config = crate::config::bundled_config().unwrap();
        let mut bytes = Vec::new();
        let layout = render_png(&config, &Theme::default(), &mut bytes).unwrap();

        assert_eq!(layout.len(), 5);
        assert_eq!(layout.segments.len(), 5);
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
