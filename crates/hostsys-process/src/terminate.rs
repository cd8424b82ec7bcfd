//! Self termination.

use tracing::debug;

/// Converts a host number into a native exit code.
///
/// Fractions are truncated toward zero; values outside `i32` saturate and NaN
/// becomes 0.
pub fn exit_code_from_number(code: f64) -> i32 {
    code as i32
}

/// Ends the current process with `code`. Never returns.
///
/// Other threads and in-flight state are abandoned, not cleaned up.
pub fn terminate_self(code: i32) -> ! {
    debug!("Terminating process with exit code {}", code);
    std::process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation() {
        assert_eq!(exit_code_from_number(3.0), 3);
        assert_eq!(exit_code_from_number(3.9), 3);
        assert_eq!(exit_code_from_number(-2.7), -2);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(exit_code_from_number(1e12), i32::MAX);
        assert_eq!(exit_code_from_number(-1e12), i32::MIN);
        assert_eq!(exit_code_from_number(f64::NAN), 0);
    }
}
