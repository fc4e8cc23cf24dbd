use crate::error::LayoutError;
use crate::geometry::Point;
use crate::layout::{CircleLayout, LayoutRequest, PointPlacement, SegmentPlacement};
use thiserror::Error;

/// Host side of a layout pass: turns placements into scene objects.
///
/// `V` is the item visual (a prefab, a drawable, ...) and `C` the color type of
/// the host's palette.
pub trait SceneComposer<V, C> {
    type Error;

    /// Instantiates the background slice for `segment`, filled to
    /// `segment.fill_fraction` with `color`, rotated by `segment.start_angle_degrees`.
    fn place_segment(&mut self, segment: &SegmentPlacement, color: &C) -> Result<(), Self::Error>;

    /// Instantiates `variant` at `position` (already offset by the layout origin)
    /// with identity orientation.
    fn place_item(
        &mut self,
        item: &PointPlacement,
        variant: &V,
        position: Point,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum ComposeError<E> {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("scene composer failed: {0}")]
    Scene(#[source] E),
}

/// Lays out one item per variant and one segment per color around `origin`.
///
/// `variants` and `colors` are parallel: entry `i` of each belongs to slot `i`.
/// Nothing is handed to `composer` unless both have the same, non-zero length.
pub fn compose_circle<V, C, S>(
    variants: &[V],
    colors: &[C],
    radius: f64,
    origin: Point,
    composer: &mut S,
) -> Result<CircleLayout, ComposeError<S::Error>>
where
    S: SceneComposer<V, C>,
{
    if variants.len() != colors.len() {
        return Err(LayoutError::ConfigurationMismatch {
            variants: variants.len(),
            colors: colors.len(),
        }
        .into());
    }

    let request = LayoutRequest::new(variants.len(), radius)?;
    let layout = CircleLayout::compute(&request)?;

    for (segment, color) in layout.segments.iter().zip(colors) {
        composer
            .place_segment(segment, color)
            .map_err(ComposeError::Scene)?;
    }

    for (item, variant) in layout.points.iter().zip(variants) {
        composer
            .place_item(item, variant, item.position + origin)
            .map_err(ComposeError::Scene)?;
    }

    log::debug!("composed {} slots around {:?}", layout.len(), origin);
    Ok(layout)
}
