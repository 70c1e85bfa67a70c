#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no rsvp store has been written yet")]
    Missing,
    #[error("rsvp store is unreadable")]
    Corrupt,
    #[error("rsvp store uses schema {found}, this build reads up to {supported}")]
    NewerSchema { found: u32, supported: u32 },
    #[error("rsvp store is held by another handle")]
    Busy,
    #[error("slug already taken: {0}")]
    SlugTaken(String),
    #[error("no host for slug: {0}")]
    HostNotFound(String),
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("record codec: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("redb: {0}")]
    Backend(Box<redb::Error>),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Missing,
    Corrupt,
    NewerSchema,
    Busy,
    Conflict,
    NotFound,
    InvalidKey,
    Io,
    Codec,
    Backend,
}

impl StorageError {
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            Self::Missing => StorageErrorKind::Missing,
            Self::Corrupt => StorageErrorKind::Corrupt,
            Self::NewerSchema { .. } => StorageErrorKind::NewerSchema,
            Self::Busy => StorageErrorKind::Busy,
            Self::SlugTaken(_) => StorageErrorKind::Conflict,
            Self::HostNotFound(_) => StorageErrorKind::NotFound,
            Self::InvalidKey(_) => StorageErrorKind::InvalidKey,
            Self::Io(_) => StorageErrorKind::Io,
            Self::Codec(_) => StorageErrorKind::Codec,
            Self::Backend(_) => StorageErrorKind::Backend,
        }
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(value: redb::DatabaseError) -> Self {
        match value {
            redb::DatabaseError::DatabaseAlreadyOpen => Self::Busy,
            other => Self::Backend(Box::new(other.into())),
        }
    }
}

macro_rules! backend_error {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for StorageError {
                fn from(value: $source) -> Self {
                    Self::Backend(Box::new(value.into()))
                }
            }
        )+
    };
}

backend_error!(
    redb::Error,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
