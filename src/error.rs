use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    StoreError(sqlx::Error),

    #[error("file error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("migrate error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("dotenv error")]
    DotEnvError(#[from] dotenv::Error),

    #[error("jwt error")]
    JWTError(#[from] jsonwebtoken::errors::Error),

    #[error("bussiness error: {0}")]
    BusinessError(String),

    #[error("forbidden")]
    Forbidden,
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Error::NotFound("row not found".into()),
            e => Error::StoreError(e),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            Error::JWTError(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
