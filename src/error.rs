//! Checked-operation errors.

use core::fmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned by the checked accessors and by operations that take an
/// element count.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Index was not in `0..len`.
    OutOfRange { index: usize, len: usize },
    /// A requested slot count exceeds what the backing storage can hold.
    CapacityOverflow { requested: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Error::CapacityOverflow { requested, max } => {
                write!(f, "requested {requested} slots, at most {max} can be stored")
            }
        }
    }
}

impl std::error::Error for Error {}
