pub mod compose;
pub mod error;
pub mod geometry;
pub mod layout;

pub use compose::{ComposeError, SceneComposer, compose_circle};
pub use error::LayoutError;
pub use geometry::Point;
pub use layout::{
    CircleLayout, LayoutRequest, PointPlacement, SegmentPlacement, compute_point_placements,
    compute_segment_placements,
};
