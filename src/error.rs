use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse file: {0}")]
    Parse(String),

    #[error("Unsupported language for file: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to set parser language for {language}: {message}")]
    Language { language: String, message: String },

    #[error("Config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, ClassmapError>;
