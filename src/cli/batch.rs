//! Parallel batch execution shared by `fix` and `check`.
//!
//! Each worker owns one image at a time; images are never shared.

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::cli::scan::Sprite;
use crate::core::is_shutdown;
use crate::log;
use crate::logger::ProgressLine;
use crate::utils::plural::plural_count;

/// What happened to one sprite.
#[derive(Debug)]
pub enum Outcome {
    /// Holes filled (or found, in a dry run). Zero means the sprite was clean.
    Done(usize),
    /// Not started because of Ctrl+C.
    Skipped,
    Failed(anyhow::Error),
}

/// Run `job` for every sprite in parallel, one image per worker.
///
/// Outcomes come back in the order of `sprites`.
pub fn process_all<F>(module: &'static str, sprites: &[Sprite], job: F) -> Vec<Outcome>
where
    F: Fn(&Sprite) -> Result<usize> + Sync,
{
    let progress = ProgressLine::new(module, &[("sprites", sprites.len())]);
    let outcomes = sprites
        .par_iter()
        .map(|sprite| {
            let outcome = if is_shutdown() {
                Outcome::Skipped
            } else {
                match job(sprite) {
                    Ok(holes) => Outcome::Done(holes),
                    Err(err) => Outcome::Failed(err),
                }
            };
            progress.inc("sprites");
            outcome
        })
        .collect();
    progress.finish();
    outcomes
}

/// Totals over a batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub holes: usize,
    pub processed: usize,
    pub dirty: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn tally(outcomes: &[Outcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Done(holes) => {
                    summary.processed += 1;
                    summary.holes += holes;
                    if *holes > 0 {
                        summary.dirty += 1;
                    }
                }
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Error if any sprite failed or was skipped.
    pub fn into_result(self) -> Result<()> {
        if self.skipped > 0 {
            log!("error"; "interrupted: {} not processed", plural_count(self.skipped, "sprite"));
        }
        if self.failed > 0 {
            bail!("{} failed", plural_count(self.failed, "sprite"));
        }
        if self.skipped > 0 {
            bail!("interrupted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn sprites(n: usize) -> Vec<Sprite> {
        (0..n)
            .map(|i| Sprite {
                path: PathBuf::from(format!("/sprites/{i}.png")),
                rel: PathBuf::from(format!("{i}.png")),
            })
            .collect()
    }

    #[test]
    fn outcomes_keep_input_order() {
        let list = sprites(64);
        let outcomes = process_all("check", &list, |sprite| {
            let stem = sprite.rel.file_stem().unwrap().to_string_lossy();
            Ok(stem.parse::<usize>()?)
        });

        for (i, outcome) in outcomes.iter().enumerate() {
            assert!(matches!(outcome, Outcome::Done(n) if *n == i));
        }
    }

    #[test]
    fn job_errors_become_failures() {
        let list = sprites(3);
        let outcomes = process_all("fix", &list, |sprite| {
            if sprite.rel == PathBuf::from("1.png") {
                anyhow::bail!("decode failed");
            }
            Ok(0)
        });
        let summary = Summary::tally(&outcomes);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 2);
        assert!(summary.into_result().is_err());
    }

    #[test]
    fn tally_counts_each_outcome() {
        let outcomes = vec![
            Outcome::Done(0),
            Outcome::Done(3),
            Outcome::Done(2),
            Outcome::Skipped,
            Outcome::Failed(anyhow::anyhow!("boom")),
        ];
        assert_eq!(
            Summary::tally(&outcomes),
            Summary {
                holes: 5,
                processed: 3,
                dirty: 2,
                failed: 1,
                skipped: 1,
            }
        );
    }
}
