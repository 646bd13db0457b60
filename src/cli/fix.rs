//! Fix command - back up each sprite, then fill its interior holes in place.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::FixArgs;
use crate::cli::batch::{Outcome, Summary, process_all};
use crate::cli::scan::{Sprite, collect_sprites, search_target};
use crate::config::SpriteConfig;
use crate::image::holes::{FillColor, inspect_file, repair_file};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Run the fix command
pub fn run_fix(args: &FixArgs, config: &SpriteConfig) -> Result<()> {
    let sprites = collect_sprites(&args.scan.paths, config)?;
    if sprites.is_empty() {
        log!("fix"; "no sprites found in {}", search_target(&args.scan.paths, &config.scan));
        return Ok(());
    }

    let color = config.fill.color;
    let backup_dir = config.backup.enable.then_some(config.backup.dir.as_path());
    if backup_dir.is_some() {
        check_backup_targets(&sprites)?;
    }
    debug!("fix"; "fill color {}, backup {}", color,
        backup_dir.map_or_else(|| "disabled".to_string(), |d| d.display().to_string()));

    let outcomes = process_all("fix", &sprites, |sprite| {
        if args.dry_run {
            Ok(inspect_file(&sprite.path)?)
        } else {
            fix_sprite(sprite, color, backup_dir)
        }
    });

    let summary = report(&sprites, &outcomes, args.dry_run);

    if args.dry_run {
        log!("fix"; "dry run: {} would be filled across {}",
            plural_count(summary.holes, "hole"), plural_count(summary.processed, "sprite"));
    } else {
        log!("fix"; "total: {} filled across {}",
            plural_count(summary.holes, "hole"), plural_count(summary.processed, "sprite"));
        if let Some(dir) = backup_dir
            && summary.processed > 0
        {
            log!("fix"; "backups saved to: {}", dir.display());
        }
    }

    summary.into_result()
}

/// Copy the original, then repair in place.
///
/// A failed backup leaves the sprite untouched.
fn fix_sprite(sprite: &Sprite, color: FillColor, backup_dir: Option<&Path>) -> Result<usize> {
    if let Some(dir) = backup_dir {
        backup_sprite(sprite, dir)?;
    }
    Ok(repair_file(&sprite.path, &sprite.path, color)?)
}

/// Refuse the batch before any write if two sprites map to one backup file.
fn check_backup_targets(sprites: &[Sprite]) -> Result<()> {
    let mut targets: HashMap<&Path, &Path> = HashMap::with_capacity(sprites.len());
    for sprite in sprites {
        if let Some(first) = targets.insert(&sprite.rel, &sprite.path) {
            bail!(
                "{} and {} would share the backup `{}`\n  hint: set `[scan] dir` to a common parent, or fix them separately",
                first.display(),
                sprite.path.display(),
                sprite.rel.display()
            );
        }
    }
    Ok(())
}

fn backup_sprite(sprite: &Sprite, dir: &Path) -> Result<()> {
    let dest = dir.join(&sprite.rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create backup dir {}", parent.display()))?;
    }
    fs::copy(&sprite.path, &dest)
        .with_context(|| format!("failed to back up to {}", dest.display()))?;
    Ok(())
}

/// Print one line per sprite and return the totals.
fn report(sprites: &[Sprite], outcomes: &[Outcome], dry_run: bool) -> Summary {
    for (sprite, outcome) in sprites.iter().zip(outcomes) {
        let name = sprite.display_name();
        match outcome {
            Outcome::Done(0) => log!("fix"; "{}: OK (no holes)", name),
            Outcome::Done(holes) if dry_run => {
                log!("fix"; "{}: {} would be filled", name, plural_count(*holes, "hole"))
            }
            Outcome::Done(holes) => log!("fix"; "{}: {} filled", name, plural_count(*holes, "hole")),
            Outcome::Skipped => debug!("fix"; "{}: skipped", name),
            Outcome::Failed(err) => log!("error"; "{}: failed: {:#}", name, err),
        }
    }
    Summary::tally(outcomes)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;
    use crate::cli::ScanArgs;
    use crate::utils::path::normalize_path;

    fn sprite_dir() -> TempDir {
        tempfile::Builder::new().prefix("sprites").tempdir().unwrap()
    }

    /// 6x6 sprite: transparent frame, opaque body, `holes` pinholes inside.
    fn write_sprite(path: &Path, holes: &[(u32, u32)]) {
        let mut img = RgbaImage::from_pixel(6, 6, Rgba([0, 0, 0, 0]));
        for y in 1..5 {
            for x in 1..5 {
                img.put_pixel(x, y, Rgba([220, 60, 30, 255]));
            }
        }
        for &(x, y) in holes {
            img.put_pixel(x, y, Rgba([0, 0, 0, 0]));
        }
        img.save(path).unwrap();
    }

    fn config_for(sprites: &Path, backup: &Path) -> SpriteConfig {
        let mut config = SpriteConfig::default();
        config.scan.dir = sprites.to_path_buf();
        config.backup.dir = backup.to_path_buf();
        config
    }

    fn fix_args(dry_run: bool) -> FixArgs {
        FixArgs {
            scan: ScanArgs {
                paths: vec![],
                recursive: None,
            },
            fill_color: None,
            backup_dir: None,
            no_backup: false,
            dry_run,
        }
    }

    #[test]
    fn fixes_sprites_and_keeps_backups() {
        let sprites = sprite_dir();
        let backup = sprite_dir();
        let lobster = sprites.path().join("lobster.png");
        let clean = sprites.path().join("clean.png");
        write_sprite(&lobster, &[(2, 2), (3, 3)]);
        write_sprite(&clean, &[]);
        let original = fs::read(&lobster).unwrap();

        run_fix(&fix_args(false), &config_for(sprites.path(), backup.path())).unwrap();

        let fixed = image::open(&lobster).unwrap().to_rgba8();
        assert_eq!(*fixed.get_pixel(2, 2), Rgba([0, 0, 0, 255]));
        assert_eq!(*fixed.get_pixel(3, 3), Rgba([0, 0, 0, 255]));
        assert_eq!(fixed.get_pixel(0, 0)[3], 0);

        assert_eq!(fs::read(backup.path().join("lobster.png")).unwrap(), original);
        assert!(backup.path().join("clean.png").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let sprites = sprite_dir();
        let backup = sprite_dir();
        let lobster = sprites.path().join("lobster.png");
        write_sprite(&lobster, &[(2, 2)]);
        let original = fs::read(&lobster).unwrap();

        let mut config = config_for(sprites.path(), backup.path());
        config.backup.enable = false;
        run_fix(&fix_args(true), &config).unwrap();

        assert_eq!(fs::read(&lobster).unwrap(), original);
        assert!(!backup.path().join("lobster.png").exists());
    }

    #[test]
    fn broken_sprite_fails_the_batch_but_not_the_others() {
        let sprites = sprite_dir();
        let backup = sprite_dir();
        let good = sprites.path().join("good.png");
        write_sprite(&good, &[(2, 3)]);
        fs::write(sprites.path().join("bad.png"), b"not an image").unwrap();

        let err = run_fix(&fix_args(false), &config_for(sprites.path(), backup.path()))
            .unwrap_err();
        assert!(err.to_string().contains("1 sprite failed"));

        let fixed = image::open(&good).unwrap().to_rgba8();
        assert_eq!(fixed.get_pixel(2, 3)[3], 255);
    }

    #[test]
    fn second_run_finds_nothing() {
        let sprites = sprite_dir();
        let backup = sprite_dir();
        write_sprite(&sprites.path().join("lobster.png"), &[(2, 2), (4, 1)]);
        let config = config_for(sprites.path(), backup.path());

        run_fix(&fix_args(false), &config).unwrap();

        let list = collect_sprites(&[], &config).unwrap();
        let outcomes = process_all("check", &list, |s| Ok(inspect_file(&s.path)?));
        assert_eq!(Summary::tally(&outcomes).holes, 0);
    }

    #[test]
    fn same_named_sprites_in_separate_roots_get_separate_backups() {
        let sprites = sprite_dir();
        let backup = sprite_dir();
        let a = sprites.path().join("a");
        let b = sprites.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        write_sprite(&a.join("idle.png"), &[(2, 2)]);
        RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]))
            .save(b.join("idle.png"))
            .unwrap();
        let original_a = fs::read(a.join("idle.png")).unwrap();
        let original_b = fs::read(b.join("idle.png")).unwrap();

        let mut config = config_for(sprites.path(), backup.path());
        config.scan.dir = normalize_path(sprites.path());
        let mut args = fix_args(false);
        args.scan.paths = vec![a.clone(), b.clone()];
        run_fix(&args, &config).unwrap();

        assert_eq!(fs::read(backup.path().join("a/idle.png")).unwrap(), original_a);
        assert_eq!(fs::read(backup.path().join("b/idle.png")).unwrap(), original_b);
    }

    #[test]
    fn colliding_backups_abort_before_any_write() {
        let sprites = sprite_dir();
        let elsewhere = sprite_dir();
        let backup = sprite_dir();
        let a = sprites.path().join("a/idle.png");
        let b = sprites.path().join("b/idle.png");
        fs::create_dir_all(a.parent().unwrap()).unwrap();
        fs::create_dir_all(b.parent().unwrap()).unwrap();
        write_sprite(&a, &[(2, 2)]);
        write_sprite(&b, &[(3, 3)]);
        let original_a = fs::read(&a).unwrap();
        let original_b = fs::read(&b).unwrap();

        let mut args = fix_args(false);
        args.scan.paths = vec![a.clone(), b.clone()];
        let err = run_fix(&args, &config_for(elsewhere.path(), backup.path())).unwrap_err();

        assert!(err.to_string().contains("would share the backup"));
        assert_eq!(fs::read(&a).unwrap(), original_a);
        assert_eq!(fs::read(&b).unwrap(), original_b);
        assert!(!backup.path().join("idle.png").exists());
    }
}
