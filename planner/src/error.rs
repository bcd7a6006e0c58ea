//! Error types for layout mutations and exports.
//!
//! No error here is fatal to an editing session: every rejected mutation
//! leaves the model exactly as it was before the call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::model::ItemId;

/// Stable machine-readable code for an error, for hosts that map errors to
/// localized messages.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// A rejected layout mutation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The candidate box would overlap `other` under the overlap policy.
    /// `id` is `None` for a candidate that is not placed yet.
    #[error("position overlaps item {other}")]
    Collision { id: Option<ItemId>, other: ItemId },
    /// Size input was non-numeric or outside `(0, 20]`.
    #[error("invalid dimension: {value}")]
    InvalidDimension { value: f64 },
    /// The operation referenced an id that is not (or no longer) in the model.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Collision { .. } => "E_COLLISION",
            Self::InvalidDimension { .. } => "E_INVALID_DIMENSION",
            Self::ItemNotFound(_) => "E_ITEM_NOT_FOUND",
        }
    }
}

/// Failure while producing or reading an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SVG parse error: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("cannot allocate a {width}x{height} image")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("timestamp formatting failed: {0}")]
    Time(#[from] time::error::Format),
}

impl ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_JSON",
            Self::Layout(_) => "E_LAYOUT",
            Self::Io(_) => "E_IO",
            Self::Svg(_) => "E_SVG",
            Self::PixmapAlloc { .. } => "E_PIXMAP",
            Self::Png(_) => "E_PNG",
            Self::Time(_) => "E_TIME",
        }
    }
}
