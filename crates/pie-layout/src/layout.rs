use crate::error::LayoutError;
use crate::geometry::Point;
use serde::Serialize;
use std::f64::consts::TAU;

pub const FULL_TURN_DEGREES: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub count: usize,
    pub radius: f64,
}

impl LayoutRequest {
    pub fn new(count: usize, radius: f64) -> Result<Self, LayoutError> {
        let request = Self { count, radius };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        check_count(self.count)?;
        check_radius(self.radius)
    }
}

fn check_count(count: usize) -> Result<(), LayoutError> {
    if count == 0 {
        return Err(LayoutError::InvalidCount);
    }
    Ok(())
}

fn check_radius(radius: f64) -> Result<(), LayoutError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(LayoutError::InvalidRadius(radius));
    }
    Ok(())
}

/// One pie slice of the background circle.
///
/// The slice is rotated by `start_angle_degrees` (counter-clockwise) and fills
/// `fill_fraction` of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentPlacement {
    pub index: usize,
    pub start_angle_degrees: f64,
    pub fill_fraction: f64,
}

impl SegmentPlacement {
    pub fn sweep_degrees(&self) -> f64 {
        self.fill_fraction * FULL_TURN_DEGREES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointPlacement {
    pub index: usize,
    pub angle_radians: f64,
    pub position: Point,
}

pub fn compute_segment_placements(count: usize) -> Result<Vec<SegmentPlacement>, LayoutError> {
    check_count(count)?;

    let segment_angle = FULL_TURN_DEGREES / count as f64;
    let half_segment_angle = segment_angle * 0.5;
    let fill_fraction = 1.0 / count as f64;

    Ok((0..count)
        .map(|index| SegmentPlacement {
            index,
            start_angle_degrees: segment_angle * index as f64 + half_segment_angle,
            fill_fraction,
        })
        .collect())
}

pub fn compute_point_placements(
    count: usize,
    radius: f64,
) -> Result<Vec<PointPlacement>, LayoutError> {
    check_count(count)?;
    check_radius(radius)?;

    let step = 1.0 / count as f64;

    Ok((0..count)
        .map(|index| {
            let t = step * TAU * index as f64;
            PointPlacement {
                index,
                angle_radians: t,
                position: Point::on_circle(radius, t),
            }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleLayout {
    pub segments: Vec<SegmentPlacement>,
    pub points: Vec<PointPlacement>,
}

impl CircleLayout {
    pub fn compute(request: &LayoutRequest) -> Result<Self, LayoutError> {
        request.validate()?;
        let layout = Self {
            segments: compute_segment_placements(request.count)?,
            points: compute_point_placements(request.count, request.radius)?,
        };
        log::debug!(
            "computed layout of {} segments on radius {}",
            request.count,
            request.radius
        );
        Ok(layout)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
