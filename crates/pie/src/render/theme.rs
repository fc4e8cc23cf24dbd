use palette::Srgba;

/// Colors for everything the config does not color itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub item_fill: Srgba<f64>,
    pub item_outline: Srgba<f64>,
    pub label: Srgba<f64>,
    pub outline_width: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            item_fill: Srgba::new(0.15, 0.15, 0.15, 0.85),
            item_outline: Srgba::new(1.0, 1.0, 1.0, 0.6),
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
            outline_width: 2.0,
        }
    }
}

pub(crate) fn set_source(cr: &cairo::Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}
