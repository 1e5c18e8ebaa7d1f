mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod metrics;
pub use metrics::*;

/// Paragraph layout: lines, areas, alignment, leading and pagination
pub mod layout;

mod rect;
pub use rect::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for embedding rendered
/// [`Canvas`] content streams into documents
pub use pdf_writer;
