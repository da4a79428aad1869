//! Error types for query evaluation and associative-container boundaries.
//!
//! All failures surface synchronously at the point of *enumeration* (a
//! terminal call such as [`first`](crate::sequence::Sequence::first)), never
//! when an operator is constructed. The single documented exception is
//! [`chunk`](crate::sequence::Sequence::chunk), which validates its size
//! argument at call time.
//!
//! "Not found" outcomes on the ordered trees are ordinary boolean results,
//! not errors; nothing in this crate retries or swallows a failure.

use std::fmt;

/// The error taxonomy shared by every fallible operation in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// An element was required but the source was empty.
    NoElements,
    /// A predicate-based single-element query matched nothing.
    NoMatchingElement,
    /// An unconditional single-element query found more than one element.
    MoreThanOneElement,
    /// A predicate-based single-element query matched more than once.
    MoreThanOneMatchingElement,
    /// Positional access outside the valid range. Index accessors always
    /// fail outright; they have no defaulting sibling.
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
    },
    /// A key was required to be present but was not.
    KeyNotFound,
    /// A key was required to be absent but was already present.
    KeyAlreadyAdded,
    /// An argument was rejected at call time.
    InvalidArgument(&'static str),
}

impl fmt::Display for QueryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoElements => write!(formatter, "sequence contains no elements"),
            Self::NoMatchingElement => {
                write!(formatter, "sequence contains no matching element")
            }
            Self::MoreThanOneElement => {
                write!(formatter, "sequence contains more than one element")
            }
            Self::MoreThanOneMatchingElement => {
                write!(formatter, "sequence contains more than one matching element")
            }
            Self::IndexOutOfBounds { index } => {
                write!(formatter, "index {index} is out of bounds")
            }
            Self::KeyNotFound => write!(formatter, "key not found"),
            Self::KeyAlreadyAdded => write!(formatter, "key already added"),
            Self::InvalidArgument(reason) => write!(formatter, "invalid argument: {reason}"),
        }
    }
}

impl std::error::Error for QueryError {}
