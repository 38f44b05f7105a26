use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] idsync_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] idsync_db::DbError),

    #[error("Directory client error: {0}")]
    Directory(#[from] idsync_directory::DirectoryError),

    #[error("Metrics exporter error: {message}")]
    Metrics { message: String },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
