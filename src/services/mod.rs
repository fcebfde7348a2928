pub mod artist;
pub mod listing;
pub mod query;
pub mod show;
pub mod venue;

use sea_orm::{DbErr, SqlErr, TransactionError};
use thiserror::Error;

pub use artist::ArtistService;
pub use show::ShowService;
pub use venue::VenueService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A constraint or a referenced row failed at write time.
    #[error("integrity error: {0}")]
    Integrity(String),

    #[error("{entity} {id} is still referenced by {references} show(s)")]
    InUse {
        entity: &'static str,
        id: i64,
        references: u64,
    },

    #[error("database error: {0}")]
    Database(DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message))
            | Some(SqlErr::UniqueConstraintViolation(message)) => Self::Integrity(message),
            _ => Self::Database(err),
        }
    }
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(db_err) => db_err.into(),
            TransactionError::Transaction(service_err) => service_err,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
