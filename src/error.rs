//! Error type shared by every fallible operation of the crate.

use std::path::PathBuf;

/// Usage errors raised at the API boundary.
///
/// None of these are transient: they describe inputs the caller must fix
/// before any geometry can be produced.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Histogram alignment is not one of `left`, `center`, `right`.
    #[error("invalid histogram type {0:?}, expected one of \"left\", \"center\", \"right\"")]
    InvalidHistogramType(String),

    /// `x` and `y` lengths are neither equal nor `x == y + 1`.
    #[error("x has {x} values and y has {y}: lengths must be equal or x one longer")]
    LengthMismatch { x: usize, y: usize },

    /// The series yields fewer than two bin edges.
    #[error("histogram needs at least 2 edges, got {0}")]
    NotEnoughEdges(usize),

    #[error("invalid line style {0:?}")]
    InvalidLineStyle(String),

    #[error("invalid symbol {0:?}")]
    InvalidSymbol(String),

    #[error("invalid y axis {0:?}, expected \"left\" or \"right\"")]
    InvalidYAxis(String),

    #[error("invalid profile method {0:?}, expected \"mean\" or \"sum\"")]
    InvalidProfileMethod(String),

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// Error bars do not match the number of points they decorate.
    #[error("error bars have {got} values, expected 1 or {expected}")]
    ErrorBarLength { expected: usize, got: usize },

    /// Image buffer and declared shape disagree, or the geometry is degenerate.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The profile band does not intersect the image.
    #[error("profile region lies outside the image")]
    RoiOutsideImage,

    /// Malformed configuration file.
    #[error("invalid configuration in {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let e = PlotError::InvalidHistogramType("top".into());
        assert!(e.to_string().contains("\"top\""));
        let e = PlotError::LengthMismatch { x: 2, y: 5 };
        assert_eq!(
            e.to_string(),
            "x has 2 values and y has 5: lengths must be equal or x one longer"
        );
        let e = PlotError::NotEnoughEdges(1);
        assert!(e.to_string().contains("got 1"));
    }
}
