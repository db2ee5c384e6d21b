use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Storage,
    Codec,
    NotFound,
    FacetNotFound,
    DatabaseFull,
    Validation,
    InvalidArgument,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn not_found(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, context.into())
    }

    pub fn facet_not_found(facet: &str) -> Self {
        Error::new(ErrorKind::FacetNotFound, format!("index not found: {}", facet))
    }

    pub fn database_full(ceiling: u32) -> Self {
        Error::new(
            ErrorKind::DatabaseFull,
            format!("database full: id limit {} reached", ceiling),
        )
    }

    pub fn codec(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::Codec, context.into())
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_database_full(&self) -> bool {
        self.kind == ErrorKind::DatabaseFull
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error {
            kind: ErrorKind::Codec,
            context: err.to_string(),
        }
    }
}

impl From<lz4_flex::block::DecompressError> for Error {
    fn from(err: lz4_flex::block::DecompressError) -> Self {
        Error {
            kind: ErrorKind::Codec,
            context: format!("LZ4 error: {}", err),
        }
    }
}

macro_rules! storage_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Error {
                        kind: ErrorKind::Storage,
                        context: err.to_string(),
                    }
                }
            }
        )*
    };
}

storage_error!(
    redb::Error,
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

pub type Result<T> = std::result::Result<T, Error>;
