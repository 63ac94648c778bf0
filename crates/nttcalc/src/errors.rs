//! Error handling and exit codes.

use nttcalc_core::constants::exit_codes;
use nttcalc_core::NttError;

/// Map an engine error to the process exit code.
#[must_use]
pub fn exit_code(err: &NttError) -> i32 {
    match err {
        NttError::Mismatch | NttError::RoundTripFailed { .. } => exit_codes::ERROR_MISMATCH,
        NttError::Config(_) | NttError::InvalidBase(_) => exit_codes::ERROR_CONFIG,
        NttError::InvalidLength { .. }
        | NttError::LengthMismatch { .. }
        | NttError::NoPrimeFound { .. }
        | NttError::NoPrimitiveRootFound { .. }
        | NttError::InvalidModulus { .. }
        | NttError::InvalidRoot { .. }
        | NttError::RootMismatch { .. }
        | NttError::Overflow(_) => exit_codes::ERROR_GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(exit_code(&NttError::Mismatch), 3);
        assert_eq!(
            exit_code(&NttError::RoundTripFailed {
                variant: "iterative".into()
            }),
            3
        );
        assert_eq!(exit_code(&NttError::Config("bad".into())), 4);
        assert_eq!(exit_code(&NttError::InvalidLength { length: 6 }), 1);
        assert_eq!(
            exit_code(&NttError::NoPrimeFound {
                base: 9,
                length: 8,
                iterations: 1
            }),
            1
        );
    }
}
