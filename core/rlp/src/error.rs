use rawtx_primitives::{ErrorKind, PrimitiveError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RlpError {
    /// The enclosing list's payload is exhausted.
    #[error("end of list")]
    EndOfList,

    /// The outermost buffer is exhausted.
    #[error("end of stream")]
    EndOfStream,

    #[error("RLP item header truncated at offset {offset}")]
    TruncatedHeader { offset: usize },

    #[error("RLP value size {declared} exceeds {available} available bytes at offset {offset}")]
    ValueTooLarge {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("RLP element at offset {offset} is larger than its enclosing list")]
    ElementTooLarge { offset: usize },

    #[error("non-canonical RLP size at offset {offset}")]
    NonCanonicalSize { offset: usize },

    #[error("non-canonical RLP integer at offset {offset}")]
    NonCanonicalInteger { offset: usize },

    #[error("expected RLP string at offset {offset}, found list")]
    ExpectedString { offset: usize },

    #[error("expected RLP list at offset {offset}, found string")]
    ExpectedList { offset: usize },

    #[error("RLP lists nested deeper than {} at offset {offset}", crate::MAX_DEPTH)]
    TooDeep { offset: usize },

    #[error("list exit requested outside of any list")]
    NotInList,

    #[error("list exit requested with {remaining} unread bytes")]
    UnreadListData { remaining: usize },

    #[error("{0}")]
    Integer(#[from] PrimitiveError),
}

impl RlpError {
    /// `EndOfList` and `EndOfStream` are traversal signals, not failures.
    pub fn is_end(&self) -> bool {
        matches!(self, RlpError::EndOfList | RlpError::EndOfStream)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RlpError::Integer(e) => e.kind(),
            _ => ErrorKind::MalformedInput,
        }
    }
}
