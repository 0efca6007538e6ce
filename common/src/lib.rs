//! Tumor AI Common Library
//!
//! CLIとWeb(WASM)で共有される型とクライアント本体

pub mod types;
pub mod error;
pub mod staging;
pub mod render;
pub mod backend;
pub mod view;
pub mod client;

pub use types::{
    ActionState, AnnotatedImage, Classification, ConnectivityStatus, Outcome, PanelState, Variant,
    BUSY_LABEL, HEALTH_ENDPOINT, UPLOAD_FIELD,
};
pub use error::{Error, Result};
pub use staging::{
    is_allowed_mime, mime_from_path, DrawingSurface, StagedImage, ALLOWED_MIME_TYPES,
    INVALID_TYPE_MESSAGE, NO_FILE_LABEL, NO_IMAGE_MESSAGE,
};
pub use render::{format_percent, ClassificationDisplay, ConfidenceTier};
pub use backend::{check_status, endpoint_url, parse_classification, Backend};
pub use view::View;
pub use client::{Client, ClientState};
