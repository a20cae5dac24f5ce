//! Error types for drishti-view

use drishti_log::{ConfigError, FeedError, SessionError};
use thiserror::Error;

/// Viewer error type
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Something went wrong loading Zebra MotionWorks data: {0}")]
    Feed(#[from] FeedError),

    #[error("Failed to write SVG: {0}")]
    Svg(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
