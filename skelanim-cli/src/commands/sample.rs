//! `sample` command: play a clip to a given time and print matrices

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use skelanim::{AnimationPlayer, CoordinateFixup, MatrixLayout};
use std::path::PathBuf;
use std::sync::Arc;

use crate::utils::{add_table_row, create_table, format_matrix};

#[derive(Args)]
pub struct SampleArgs {
    /// Path to the JSON asset
    pub file: PathBuf,

    /// Clip to play
    #[arg(short, long)]
    pub clip: String,

    /// Seconds of playback
    #[arg(short, long, default_value = "0")]
    pub time: f32,

    /// Print only the world matrix of this bone
    #[arg(short, long)]
    pub bone: Option<String>,

    /// Coordinate system conversion applied to every matrix
    #[arg(long, value_enum, default_value = "identity")]
    pub fixup: FixupArg,

    /// Element order of the printed matrices
    #[arg(long, value_enum, default_value = "row-major")]
    pub layout: LayoutArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FixupArg {
    Identity,
    YUpToZUp,
}

impl From<FixupArg> for CoordinateFixup {
    fn from(arg: FixupArg) -> Self {
        match arg {
            FixupArg::Identity => Self::Identity,
            FixupArg::YUpToZUp => Self::YUpToZUp,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    RowMajor,
    ColumnMajor,
}

impl From<LayoutArg> for MatrixLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::RowMajor => Self::RowMajor,
            LayoutArg::ColumnMajor => Self::ColumnMajor,
        }
    }
}

pub fn execute(args: &SampleArgs) -> Result<()> {
    if !args.time.is_finite() || args.time < 0.0 {
        bail!("Time must be a non-negative number of seconds, got {}", args.time);
    }

    let set = Arc::new(super::load_set(&args.file)?);
    let duration = set.clip(&args.clip)?.duration();
    let layout = MatrixLayout::from(args.layout);

    // A finished clip holds its previous pose; show the last frame instead
    let time = if args.time > duration {
        log::warn!(
            "Clip '{}' is {:.3}s long; clamping {:.3}s to its end",
            args.clip,
            duration,
            args.time
        );
        duration
    } else {
        args.time
    };

    let mut player = AnimationPlayer::new(set, args.fixup.into());
    player.advance(&args.clip, 0.0)?;
    player.advance(&args.clip, time)?;

    println!(
        "=== Clip '{}' at {:.3}s ({:?}, {:?}) ===",
        args.clip,
        player.elapsed(),
        player.fixup(),
        layout
    );

    if let Some(bone) = &args.bone {
        let world = player.world_matrix_of_bone(bone)?;
        println!("World matrix of '{bone}':");
        println!("{}", format_matrix(&layout.flatten(&world)));
        return Ok(());
    }

    let mut table = create_table(&["Index", "Bone", "Skinning matrix"]);
    let skeleton = player.set().skeleton();
    for (index, (bone, matrix)) in skeleton
        .bones()
        .iter()
        .zip(player.bone_matrices())
        .enumerate()
    {
        add_table_row(
            &mut table,
            &[
                index.to_string(),
                bone.name().to_string(),
                format_matrix(&layout.flatten(matrix)),
            ],
        );
    }
    table.printstd();

    Ok(())
}
