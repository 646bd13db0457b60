//! Sprite discovery shared by `fix` and `check`.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use jwalk::WalkDir;

use crate::config::{ScanConfig, SpriteConfig};
use crate::utils::path::{normalize_path, resolve_path};

/// A sprite selected for processing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sprite {
    /// Absolute path to the image.
    pub path: PathBuf,
    /// Path relative to the scan dir, or to the root it was found under
    /// when outside it (file name for explicitly named files). Used for
    /// display and backup layout.
    pub rel: PathBuf,
}

impl Sprite {
    fn new(path: PathBuf, root: &Path, scan_dir: &Path) -> Self {
        let rel = path
            .strip_prefix(scan_dir)
            .or_else(|_| path.strip_prefix(root))
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.file_name().map(PathBuf::from).unwrap_or_default());
        Self { path, rel }
    }

    pub fn display_name(&self) -> std::path::Display<'_> {
        self.rel.display()
    }
}

/// Collect sprites for the CLI paths, or the configured scan dir when none.
///
/// Results are sorted by path and deduplicated.
pub fn collect_sprites(paths: &[PathBuf], config: &SpriteConfig) -> Result<Vec<Sprite>> {
    let scan = &config.scan;

    // Handle stdin case: read paths from stdin when `-` is passed
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    let mut sprites = Vec::new();
    if paths.is_empty() {
        if !scan.dir.is_dir() {
            bail!("Sprite directory not found: {}", scan.dir.display());
        }
        sprites.extend(walk_dir(&scan.dir, scan));
    }

    for path in &paths {
        let resolved = normalize_path(&resolve_path(path, &scan.dir));

        if resolved.is_file() {
            if !scan.matches(&resolved) {
                bail!(
                    "Not a sprite file: {} (expected extension: {})",
                    path.display(),
                    scan.extensions.join(", ")
                );
            }
            let root = resolved.parent().map(Path::to_path_buf).unwrap_or_default();
            sprites.push(Sprite::new(resolved, &root, &scan.dir));
        } else if resolved.is_dir() {
            sprites.extend(walk_dir(&resolved, scan));
        } else {
            bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                normalize_path(path).display(),
                scan.dir.join(path).display()
            );
        }
    }

    sprites.sort();
    sprites.dedup_by(|a, b| a.path == b.path);
    Ok(sprites)
}

/// Sprites directly inside `dir`, or anywhere below it when recursive.
fn walk_dir(dir: &Path, scan: &ScanConfig) -> Vec<Sprite> {
    let max_depth = if scan.recursive { usize::MAX } else { 1 };
    WalkDir::new(dir)
        .max_depth(max_depth)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| scan.matches(path))
        .map(|path| Sprite::new(path, dir, &scan.dir))
        .collect()
}

/// Where sprites were looked for, for "nothing found" messages.
pub fn search_target(paths: &[PathBuf], scan: &ScanConfig) -> String {
    match paths {
        [] => scan.dir.display().to_string(),
        [stdin] if stdin.as_os_str() == "-" => "paths from stdin".to_string(),
        _ => paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Read file paths from stdin, one per line
fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Non-hidden temp dir, so the walker does not treat it as a dotfile.
    fn sprite_dir() -> TempDir {
        tempfile::Builder::new().prefix("sprites").tempdir().unwrap()
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn config_for(dir: &Path, recursive: bool) -> SpriteConfig {
        let mut config = SpriteConfig::default();
        config.scan.dir = normalize_path(dir);
        config.scan.recursive = recursive;
        config
    }

    fn names(sprites: &[Sprite]) -> Vec<String> {
        sprites
            .iter()
            .map(|s| s.rel.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn scans_configured_dir_sorted() {
        let dir = sprite_dir();
        touch(&dir.path().join("walk.png"));
        touch(&dir.path().join("idle.PNG"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("nested/jump.png"));

        let sprites = collect_sprites(&[], &config_for(dir.path(), false)).unwrap();
        assert_eq!(names(&sprites), vec!["idle.PNG", "walk.png"]);
    }

    #[test]
    fn recursive_scan_keeps_relative_layout() {
        let dir = sprite_dir();
        touch(&dir.path().join("idle.png"));
        touch(&dir.path().join("nested/jump.png"));

        let sprites = collect_sprites(&[], &config_for(dir.path(), true)).unwrap();
        assert_eq!(names(&sprites), vec!["idle.png", "nested/jump.png"]);
    }

    #[test]
    fn explicit_files_and_dirs_are_deduplicated() {
        let dir = sprite_dir();
        touch(&dir.path().join("idle.png"));
        touch(&dir.path().join("walk.png"));

        let config = config_for(dir.path(), false);
        let paths = vec![dir.path().join("idle.png"), dir.path().to_path_buf()];
        let sprites = collect_sprites(&paths, &config).unwrap();
        assert_eq!(sprites.len(), 2);
    }

    #[test]
    fn relative_paths_fall_back_to_scan_dir() {
        let dir = sprite_dir();
        touch(&dir.path().join("only-in-scan-dir-7f3a.png"));

        let config = config_for(dir.path(), false);
        let sprites =
            collect_sprites(&[PathBuf::from("only-in-scan-dir-7f3a.png")], &config).unwrap();
        assert_eq!(names(&sprites), vec!["only-in-scan-dir-7f3a.png"]);
    }

    #[test]
    fn rejects_missing_and_foreign_files() {
        let dir = sprite_dir();
        touch(&dir.path().join("readme.txt"));
        let config = config_for(dir.path(), false);

        let err = collect_sprites(&[dir.path().join("missing.png")], &config).unwrap_err();
        assert!(err.to_string().contains("Path not found"));

        let err = collect_sprites(&[dir.path().join("readme.txt")], &config).unwrap_err();
        assert!(err.to_string().contains("Not a sprite file"));
    }

    #[test]
    fn roots_under_scan_dir_keep_their_prefix() {
        let dir = sprite_dir();
        touch(&dir.path().join("a/idle.png"));
        touch(&dir.path().join("b/idle.png"));

        let config = config_for(dir.path(), false);
        let paths = vec![dir.path().join("a"), dir.path().join("b/idle.png")];
        let sprites = collect_sprites(&paths, &config).unwrap();
        assert_eq!(names(&sprites), vec!["a/idle.png", "b/idle.png"]);
    }

    #[test]
    fn search_target_names_what_was_searched() {
        let scan = ScanConfig {
            dir: PathBuf::from("/game/sprites"),
            ..ScanConfig::default()
        };
        assert_eq!(search_target(&[], &scan), "/game/sprites");
        assert_eq!(
            search_target(&[PathBuf::from("a"), PathBuf::from("b.png")], &scan),
            "a, b.png"
        );
        assert_eq!(search_target(&[PathBuf::from("-")], &scan), "paths from stdin");
    }

    #[test]
    fn missing_scan_dir_is_an_error() {
        let dir = sprite_dir();
        let config = config_for(&dir.path().join("nope"), false);
        assert!(collect_sprites(&[], &config).is_err());
    }
}
