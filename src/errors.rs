use std::error::Error;
use std::fmt;

/// Malformed input data: out-of-alphabet symbols, unequal or empty sequences,
/// invalid cost matrices. Detected before any dynamic programming runs.
pub struct InputError {
    pub(crate) message: String,
}

impl InputError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        InputError {
            message: message.into(),
        }
    }
}

impl fmt::Debug for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input: {}", self.message)
    }
}

impl Error for InputError {}

/// Malformed tree topology: wrong number of children, zero or several roots,
/// cycles or nodes that cannot be reached from the root.
pub struct StructureError {
    pub(crate) message: String,
}

impl StructureError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        StructureError {
            message: message.into(),
        }
    }
}

impl fmt::Debug for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed tree: {}", self.message)
    }
}

impl Error for StructureError {}
