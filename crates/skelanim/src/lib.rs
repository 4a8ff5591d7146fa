//! Skeletal animation core
//!
//! This crate turns sampled skeletal animation into per-frame skinning
//! palettes:
//! - [`Skeleton`]: validated bone hierarchy with bind pose inverses
//! - [`AnimationClip`]: keyframes plus frame lookup and interpolation
//! - [`AnimationSet`]: named clips bound to one skeleton
//! - [`AnimationPlayer`]: per-entity playback state and the palette
//! - [`ClipTable`]: gameplay state to clip name mapping
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use glam::{Mat4, Vec3};
//! use skelanim::{
//!     AnimationClip, AnimationPlayer, AnimationSet, BoneDesc, CoordinateFixup, Frame,
//!     Keyframe, Skeleton,
//! };
//!
//! let skeleton = Arc::new(Skeleton::new(
//!     vec![BoneDesc::new("root", Mat4::IDENTITY, -1)],
//!     Mat4::IDENTITY,
//! )?);
//!
//! let frames = vec![
//!     Frame::from_iter([Keyframe::IDENTITY]),
//!     Frame::from_iter([Keyframe::translation(Vec3::X)]),
//! ];
//! let set = AnimationSet::new(skeleton).with_clip("slide", AnimationClip::new(frames, 1.0)?)?;
//!
//! let mut player = AnimationPlayer::new(Arc::new(set), CoordinateFixup::Identity);
//! player.advance("slide", 0.0)?;
//! player.advance("slide", 0.5)?;
//!
//! let palette = player.bone_matrices();
//! assert_eq!(palette[0].w_axis.truncate(), Vec3::new(0.5, 0.0, 0.0));
//! # Ok::<(), skelanim::AnimError>(())
//! ```

pub mod clip;
pub mod clip_table;
pub mod error;
pub mod fixup;
pub mod math;
pub mod player;
pub mod set;
pub mod skeleton;

#[cfg(feature = "serde")]
pub mod asset;

// Re-export common types
pub use clip::{AnimationClip, Frame, FrameCursor, Keyframe};
pub use clip_table::{
    ClipTable, CreatureState, WeaponState, creature_clip_table, weapon_clip_table,
};
pub use error::{AnimError, Result};
pub use fixup::{CoordinateFixup, MatrixLayout};
pub use player::AnimationPlayer;
pub use set::AnimationSet;
pub use skeleton::{Bone, BoneDesc, MAX_BONES, Skeleton};

#[cfg(feature = "serde")]
pub use asset::ModelAsset;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
