//! Path utilities: expand ~ and validate absolute output paths.

use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Expand `~` and require the result to be absolute.
pub fn absolute_output(path: &str) -> AppResult<PathBuf> {
    let expanded = expand_tilde(path);
    if !expanded.is_absolute() {
        return Err(AppError::Export(format!(
            "Output file path must be absolute: {path}"
        )));
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_refused() {
        assert!(absolute_output("report.csv").is_err());
        let abs = std::env::temp_dir().join("report.csv");
        assert_eq!(absolute_output(abs.to_str().unwrap()).unwrap(), abs);
    }
}
