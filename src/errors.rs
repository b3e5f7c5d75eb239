//! Unified error type for the purchase ledger.
//!
//! Every access-layer operation returns [`Result`]; callers that need to branch on
//! the broad category of a failure use [`Error::kind`].

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced customer or product does not exist
    NotFound,
    /// A delete would leave a purchase pointing at a missing row
    ReferentialIntegrityViolation,
    /// Input rejected before reaching the store
    InvalidInput,
    /// Settings or seed data could not be loaded
    Configuration,
    /// Connectivity, transaction or query failure inside the store
    StoreFailure,
}

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No customer with this id
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Id that was looked up
        id: i64,
    },

    /// No product with this id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Id that was looked up
        id: i64,
    },

    /// Product still referenced by purchases and therefore not deletable
    #[error("Product {product_id} is referenced by {purchases} purchase(s)")]
    ProductInUse {
        /// Product that was to be deleted
        product_id: i64,
        /// Number of purchases that still reference it
        purchases: u64,
    },

    /// The store rejected a statement because of a foreign key
    #[error("Foreign key constraint violated: {message}")]
    ConstraintViolation {
        /// Message reported by the store
        message: String,
    },

    /// Generic input validation failure (blank names and titles)
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Quantity must be a positive number of units
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// Rejected quantity
        quantity: i32,
    },

    /// Price cannot be negative
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// Rejected price
        price: i32,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Any other store failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// Environment variable set but not valid unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CustomerNotFound { .. } | Self::ProductNotFound { .. } => ErrorKind::NotFound,
            Self::ProductInUse { .. } | Self::ConstraintViolation { .. } => {
                ErrorKind::ReferentialIntegrityViolation
            }
            Self::Validation { .. } | Self::InvalidQuantity { .. } | Self::InvalidPrice { .. } => {
                ErrorKind::InvalidInput
            }
            Self::Config { .. } | Self::EnvVar(_) => ErrorKind::Configuration,
            Self::Database(_) => ErrorKind::StoreFailure,
        }
    }
}

impl From<DbErr> for Error {
    // `sql_err()` only recognises SQLITE_CONSTRAINT_FOREIGNKEY (787), which is what
    // SQLite raises for `ON DELETE NO ACTION`; RESTRICT would report 1811 instead.
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Self::ConstraintViolation { message }
            }
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
