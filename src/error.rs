use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActiveReposError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ActiveReposError {
    fn from(err: reqwest::Error) -> Self {
        ActiveReposError::Api(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ActiveReposError>;
