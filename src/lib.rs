//! tumor-ai: 脳腫瘍推論APIのCLIクライアント

pub mod cli;
pub mod config;
pub mod error;
pub mod backend;
pub mod terminal;
pub mod upload;
