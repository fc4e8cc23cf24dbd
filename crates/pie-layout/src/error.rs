use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout needs at least one segment")]
    InvalidCount,
    #[error("radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("{variants} variants configured but {colors} colors; both lists must be the same size")]
    ConfigurationMismatch { variants: usize, colors: usize },
}
