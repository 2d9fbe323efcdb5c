//! Status codes and the table's error type.

use core::fmt;
use thiserror::Error;

/// Closed set of status codes. Discriminants are stable.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCode {
    Success = 0,
    General,
    NullPtr,
    HashtableNotFound,
    HashtableCreate,
    HashtableInsert,
    HashtableDelete,
    HashtableDestroy,
    NodeNotFound,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::Success,
        ErrorCode::General,
        ErrorCode::NullPtr,
        ErrorCode::HashtableNotFound,
        ErrorCode::HashtableCreate,
        ErrorCode::HashtableInsert,
        ErrorCode::HashtableDelete,
        ErrorCode::HashtableDestroy,
        ErrorCode::NodeNotFound,
    ];

    /// Human-readable description of the code.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::Success => "Success, no error",
            ErrorCode::General => "General error",
            ErrorCode::NullPtr => "Null pointer",
            ErrorCode::HashtableNotFound => "Hashtable not found",
            ErrorCode::HashtableCreate => "Hashtable creation error",
            ErrorCode::HashtableInsert => "Hashtable insertion error",
            ErrorCode::HashtableDelete => "Hashtable deletion error",
            ErrorCode::HashtableDestroy => "Hashtable destruction error",
            ErrorCode::NodeNotFound => "Node not found",
        }
    }

    /// Look up a code by its numeric value.
    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Why a growth step could not produce a new bucket array.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GrowError {
    #[error("capacity rank {rank} is past the growth ceiling {ceiling}")]
    CeilingReached { rank: usize, ceiling: usize },
    #[error("failed to allocate {capacity} buckets")]
    Alloc { capacity: usize },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum TableError {
    #[error("null reference")]
    NullReference,
    #[error("capacity rank {rank} out of range (ladder has {len} entries)")]
    RankOutOfRange { rank: usize, len: usize },
    #[error("failed to allocate {capacity} buckets")]
    Create { capacity: usize },
    #[error("resize from rank {from_rank} failed; insert rolled back")]
    Resize {
        from_rank: usize,
        #[source]
        source: GrowError,
    },
    #[error("invalid configuration: {0}")]
    Config(&'static str),
}

impl TableError {
    /// Status code reported for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TableError::NullReference => ErrorCode::NullPtr,
            TableError::RankOutOfRange { .. } | TableError::Create { .. } => {
                ErrorCode::HashtableCreate
            }
            TableError::Resize { .. } => ErrorCode::HashtableInsert,
            TableError::Config(_) => ErrorCode::General,
        }
    }
}

impl From<&TableError> for ErrorCode {
    fn from(e: &TableError) -> Self {
        e.code()
    }
}
