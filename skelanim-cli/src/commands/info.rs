//! `info` command: skeleton and clip summary of an asset

use anyhow::Result;
use std::path::Path;

use crate::utils::{add_table_row, create_table};

pub fn execute(path: &Path, show_bones: bool) -> Result<()> {
    let set = super::load_set(path)?;
    let skeleton = set.skeleton();

    println!("=== Animation Asset: {} ===", path.display());
    println!("Bones: {}", skeleton.len());
    println!("Hierarchy depth: {}", skeleton.depth());
    println!("Clips: {}", set.len());

    if show_bones {
        println!("\n=== Bones ===");
        let mut table = create_table(&["Index", "Name", "Parent", "Depth"]);
        for (index, bone) in skeleton.bones().iter().enumerate() {
            let parent = bone
                .parent()
                .and_then(|p| skeleton.bone(p).ok())
                .map_or_else(|| "-".to_string(), |p| p.name().to_string());
            let depth = skeleton.bone_chain(index)?.len();
            add_table_row(
                &mut table,
                &[
                    index.to_string(),
                    bone.name().to_string(),
                    parent,
                    depth.to_string(),
                ],
            );
        }
        table.printstd();
    }

    if !set.is_empty() {
        println!("\n=== Clips ===");
        let mut table = create_table(&["Name", "Frames", "Ticks/s", "Duration (s)"]);
        for name in set.clip_names() {
            let clip = set.clip(name)?;
            add_table_row(
                &mut table,
                &[
                    name.to_string(),
                    clip.frame_count().to_string(),
                    format!("{:.2}", clip.ticks_per_second()),
                    format!("{:.3}", clip.duration()),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}
