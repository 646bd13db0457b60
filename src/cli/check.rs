//! Check command - report sprites with interior holes, read-only.

use anyhow::{Result, bail};

use crate::cli::CheckArgs;
use crate::cli::batch::{Outcome, Summary, process_all};
use crate::cli::scan::{Sprite, collect_sprites, search_target};
use crate::config::SpriteConfig;
use crate::image::holes::inspect_file;
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Run the check command
pub fn run_check(args: &CheckArgs, config: &SpriteConfig) -> Result<()> {
    let sprites = collect_sprites(&args.scan.paths, config)?;
    if sprites.is_empty() {
        log!("check"; "no sprites found in {}", search_target(&args.scan.paths, &config.scan));
        return Ok(());
    }

    let outcomes = process_all("check", &sprites, |sprite| Ok(inspect_file(&sprite.path)?));
    let summary = report(&sprites, &outcomes);

    if summary.dirty == 0 {
        log!("check"; "all {} clean", plural_count(summary.processed, "sprite"));
    } else {
        log!("check"; "{} with {} total, run `spritefix fix` to fill",
            plural_count(summary.dirty, "sprite"), plural_count(summary.holes, "hole"));
    }

    let dirty = summary.dirty;
    summary.into_result()?;
    if args.strict && dirty > 0 {
        bail!("{} with interior holes", plural_count(dirty, "sprite"));
    }
    Ok(())
}

/// Print sprites that need attention; clean ones only with --verbose.
fn report(sprites: &[Sprite], outcomes: &[Outcome]) -> Summary {
    for (sprite, outcome) in sprites.iter().zip(outcomes) {
        let name = sprite.display_name();
        match outcome {
            Outcome::Done(0) => debug!("check"; "{}: OK", name),
            Outcome::Done(holes) => log!("check"; "{}: {}", name, plural_count(*holes, "hole")),
            Outcome::Skipped => debug!("check"; "{}: skipped", name),
            Outcome::Failed(err) => log!("error"; "{}: failed: {:#}", name, err),
        }
    }
    Summary::tally(outcomes)
}
