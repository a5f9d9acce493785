mod content;
mod play;
mod progress;

pub use content::Content;
pub use play::Play;
pub use progress::Progress;

use std::path::PathBuf;

use anyhow::{Context, Result};
use skirmish_content::ContentFactory;

/// Data directory from the flag, or the bundled one.
pub(crate) fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| ContentFactory::bundled().data_dir().to_path_buf())
}

/// Save file from the flag, or the platform default.
pub(crate) fn save_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(skirmish_runtime::RuntimeConfig::default_save_path)
        .context("no platform data directory; pass --save explicitly")
}
