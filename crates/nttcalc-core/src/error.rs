//! Error type shared by every stage of the engine.

/// Error type for modulus search, root search, and transforms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NttError {
    /// Zero length, or a non power-of-two length given to a radix-2 variant.
    #[error("invalid transform length {length}")]
    InvalidLength { length: usize },

    /// The sequence does not match the length the context was built for.
    #[error("sequence length {actual} does not match transform length {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The digit bound is below 2.
    #[error("invalid base {0}: must be at least 2")]
    InvalidBase(u64),

    /// The modulus search hit its candidate ceiling.
    #[error("no prime modulus found for base {base}, length {length} after {iterations} candidates")]
    NoPrimeFound {
        base: u64,
        length: usize,
        iterations: u64,
    },

    /// No n-th root of unity of exact order n exists for this modulus.
    #[error("no primitive root of order {length} modulo {modulus}")]
    NoPrimitiveRootFound { length: usize, modulus: u64 },

    /// The modulus cannot be used for this length or arithmetic.
    #[error("invalid modulus {modulus}: {reason}")]
    InvalidModulus { modulus: u64, reason: &'static str },

    /// A supplied root does not have exact multiplicative order `length`.
    #[error("{root} is not a primitive root of order {length} modulo {modulus}")]
    InvalidRoot {
        root: u64,
        length: usize,
        modulus: u64,
    },

    /// A re-derived sub-length root disagrees with the top-level root.
    #[error("root re-derived for length {length} is {derived}, expected {expected}")]
    RootMismatch {
        length: usize,
        derived: u64,
        expected: u64,
    },

    /// A bound or modulus does not fit the supported integer width.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),

    /// Transform variants produced different outputs.
    #[error("result mismatch between transform variants")]
    Mismatch,

    /// Inverse of forward did not reproduce the input.
    #[error("round trip failed for {variant}")]
    RoundTripFailed { variant: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NttError::InvalidLength { length: 6 };
        assert_eq!(err.to_string(), "invalid transform length 6");

        let err = NttError::NoPrimitiveRootFound {
            length: 8,
            modulus: 13,
        };
        assert_eq!(err.to_string(), "no primitive root of order 8 modulo 13");

        let err = NttError::Mismatch;
        assert_eq!(err.to_string(), "result mismatch between transform variants");
    }

    #[test]
    fn errors_compare_by_value() {
        let a = NttError::LengthMismatch {
            expected: 8,
            actual: 4,
        };
        assert_eq!(a.clone(), a);
        assert_ne!(a, NttError::InvalidBase(1));
    }
}
