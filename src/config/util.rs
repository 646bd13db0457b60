//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/game/assets/sprites/   ← cwd
/// /home/user/game/spritefix.toml    ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` until a directory contains `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_find_config_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("spritefix.toml"), "").unwrap();

        let found = find_config_file_from(dir.path(), Path::new("spritefix.toml"));
        assert_eq!(found, Some(dir.path().join("spritefix.toml")));
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("spritefix.toml"), "").unwrap();
        let nested = dir.path().join("assets/sprites");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file_from(&nested, Path::new("spritefix.toml"));
        assert_eq!(found, Some(dir.path().join("spritefix.toml")));
    }

    #[test]
    fn test_directory_with_config_name_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("odd-name.toml")).unwrap();

        assert_eq!(
            find_config_file_from(dir.path(), Path::new("odd-name.toml")),
            None
        );
    }

    #[test]
    fn test_absolute_config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file_from(Path::new("/"), &path), None);

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &path), Some(path));
    }
}
