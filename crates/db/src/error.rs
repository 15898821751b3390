//! Record store error types.

/// Errors produced by [`RecordStore`](crate::RecordStore) and
/// [`DocumentStore`](crate::DocumentStore) implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No database connection was configured or the initial connect failed.
    #[error("record store is not initialized")]
    Unavailable,

    #[error("failed to write to collection '{collection}': {message}")]
    Write { collection: String, message: String },

    #[error("failed to read from collection '{collection}': {message}")]
    Read { collection: String, message: String },

    /// The record did not serialize into a JSON object.
    #[error("failed to encode record for collection '{collection}': {message}")]
    Encode { collection: String, message: String },

    /// Catalog queries used for diagnostics.
    #[error("store query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn write(collection: &str, error: impl std::fmt::Display) -> Self {
        Self::Write {
            collection: collection.to_string(),
            message: error.to_string(),
        }
    }

    pub fn read(collection: &str, error: impl std::fmt::Display) -> Self {
        Self::Read {
            collection: collection.to_string(),
            message: error.to_string(),
        }
    }

    /// The underlying error text, without the variant's own prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Unavailable => self.to_string(),
            Self::Write { message, .. }
            | Self::Read { message, .. }
            | Self::Encode { message, .. } => message.clone(),
            Self::Query(message) => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_displays() {
        assert_eq!(
            StoreError::Unavailable.to_string(),
            "record store is not initialized"
        );
    }

    #[test]
    fn write_error_names_collection() {
        let err = StoreError::write("videojob", "connection reset");
        let msg = err.to_string();
        assert!(msg.contains("videojob"), "got: {msg}");
        assert!(msg.contains("connection reset"), "got: {msg}");
    }

    #[test]
    fn detail_drops_variant_prefix() {
        assert_eq!(StoreError::write("videojob", "disk full").detail(), "disk full");
        assert_eq!(StoreError::Query("timeout".to_string()).detail(), "timeout");
        assert_eq!(
            StoreError::Unavailable.detail(),
            "record store is not initialized"
        );
    }

    #[test]
    fn read_error_names_collection() {
        let err = StoreError::read("videojob", "timeout");
        assert_eq!(
            err,
            StoreError::Read {
                collection: "videojob".to_string(),
                message: "timeout".to_string(),
            }
        );
    }
}
