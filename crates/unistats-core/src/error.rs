use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid repository slug: {0}")]
    InvalidRepository(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
