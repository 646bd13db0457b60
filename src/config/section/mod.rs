//! Configuration section definitions.
//!
//! | Section    | Purpose                                  |
//! |------------|------------------------------------------|
//! | `[fill]`   | Color written into interior holes        |
//! | `[scan]`   | Sprite directory, extensions, recursion  |
//! | `[backup]` | Where sprites are copied before fixing   |

mod backup;
mod fill;
mod scan;

pub use backup::BackupConfig;
pub use fill::FillConfig;
pub use scan::ScanConfig;
