use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("seed source error: {0}")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
