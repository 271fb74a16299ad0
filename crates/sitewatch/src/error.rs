use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitewatchError {
    #[error("Model error: {0}")]
    Model(#[from] crate::model::ModelError),
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),
    #[error("Query error: {0}")]
    Query(#[from] crate::query::QueryError),
    #[error("Directory error: {0}")]
    Directory(#[from] crate::directory::DirectoryError),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SitewatchError>;
