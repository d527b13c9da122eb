//! Save the formatted report as plain text.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Write the report text to `path`, replacing any existing file.
pub fn write_report_text(path: &Path, text: &str) -> Result<(), AppError> {
    fs::write(path, text)
        .map_err(|e| AppError::new(2, format!("Failed to save report '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_text_verbatim() {
        let path = std::env::temp_dir().join(format!("approx_fit_report_{}.txt", std::process::id()));
        write_report_text(&path, "Best approximation: Linear\n").unwrap();
        let back = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(back, "Best approximation: Linear\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = std::env::temp_dir().join("approx_fit_missing_dir").join("nested").join("r.txt");
        let err = write_report_text(&path, "x").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
