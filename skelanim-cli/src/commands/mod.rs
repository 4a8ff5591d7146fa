//! Command implementations

pub mod info;
pub mod sample;

use anyhow::{Context, Result};
use skelanim::{AnimationSet, ModelAsset};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a JSON asset and build its animation set
pub fn load_set(path: &Path) -> Result<AnimationSet> {
    log::info!("Loading animation asset: {}", path.display());

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let asset = ModelAsset::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    asset
        .into_animation_set()
        .with_context(|| format!("Invalid animation asset {}", path.display()))
}
