use crate::units::Pt;
use thiserror::Error;

/// All errors that the crate can generate. Running out of space during a
/// layout attempt is not an error; it is reported through
/// [`LayoutStatus`](crate::layout::LayoutStatus).
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("{property} must be a finite, non-negative length, got {value}")]
    /// A configured length was negative, NaN or infinite
    InvalidLength { property: &'static str, value: Pt },

    #[error("rotation angle must be finite, got {0}")]
    /// The configured rotation was NaN or infinite
    InvalidRotation(f32),

    #[error("content does not fit on an empty area of page {page}")]
    /// The paginator offered a fresh, empty area and the paragraph still
    /// could not place anything on it
    ContentDoesNotFit { page: usize },

    #[error("partial layout on page {page} did not produce both fragments")]
    /// A renderer reported a partial layout without its continuation pair
    MissingContinuation { page: usize },

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),
}
