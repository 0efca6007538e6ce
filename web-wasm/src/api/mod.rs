//! 推論API呼び出し

pub mod inference;

pub use inference::FetchBackend;
