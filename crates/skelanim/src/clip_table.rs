//! Gameplay state to clip name tables
//!
//! Game logic decides *what* an entity is doing; a [`ClipTable`] maps that
//! state to the clip to play, with a fallback for unmapped states.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use glam::Mat4;
//! use skelanim::{
//!     AnimationClip, AnimationPlayer, AnimationSet, BoneDesc, ClipTable, CoordinateFixup,
//!     CreatureState, Frame, Keyframe, Skeleton,
//! };
//!
//! let skeleton = Arc::new(Skeleton::new(
//!     vec![BoneDesc::new("root", Mat4::IDENTITY, -1)],
//!     Mat4::IDENTITY,
//! )?);
//! let pose = || AnimationClip::new(vec![Frame::from_iter([Keyframe::IDENTITY])], 1.0);
//! let set = AnimationSet::new(skeleton)
//!     .with_clip("idle", pose()?)?
//!     .with_clip("roar", pose()?)?;
//!
//! let table = ClipTable::new("idle").with(CreatureState::Roar, "roar");
//! table.validate(&set)?;
//!
//! // Every tick
//! let mut player = AnimationPlayer::new(Arc::new(set), CoordinateFixup::Identity);
//! table.advance(&mut player, &CreatureState::Roar, 0.016)?;
//! assert_eq!(player.current_clip(), Some("roar"));
//!
//! table.advance(&mut player, &CreatureState::Walk, 0.016)?;
//! assert_eq!(player.current_clip(), Some("idle"));
//! # Ok::<(), skelanim::AnimError>(())
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{AnimError, Result};
use crate::player::AnimationPlayer;
use crate::set::AnimationSet;

/// Maps gameplay states to clip names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipTable<S: Eq + Hash> {
    clips: HashMap<S, String>,
    fallback: String,
}

impl<S: Eq + Hash> ClipTable<S> {
    /// Create a table that plays `fallback` for every state
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            clips: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Map a state to a clip
    pub fn with(mut self, state: S, clip: impl Into<String>) -> Self {
        self.clips.insert(state, clip.into());
        self
    }

    /// Clip name for a state
    pub fn clip_for(&self, state: &S) -> &str {
        self.clips.get(state).map_or(self.fallback.as_str(), String::as_str)
    }

    /// Clip played for unmapped states
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Check that every clip this table can select exists in `set`
    pub fn validate(&self, set: &AnimationSet) -> Result<()> {
        std::iter::once(&self.fallback)
            .chain(self.clips.values())
            .find(|clip| !set.has_clip(clip))
            .map_or(Ok(()), |clip| Err(AnimError::UnknownClip(clip.clone())))
    }

    /// Advance `player` with the clip mapped to `state`
    pub fn advance(&self, player: &mut AnimationPlayer, state: &S, dt: f32) -> Result<()> {
        player.advance(self.clip_for(state), dt)
    }
}

/// States of a first-person weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponState {
    Pose,
    Select,
    Putaway,
    EmptySelect,
    Idle,
    Inspect,
    Walk,
    Run,
    Fire,
    AlternateFire,
    MeleeAttack,
    AlternateFireModeOn,
    DryFire,
    Reload,
    EmptyReload,
}

/// States of an animated creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureState {
    Attack,
    Death,
    Idle,
    Idle2,
    Roar,
    Run,
    Walk,
}

/// Clip names of the carbine weapon model
pub fn weapon_clip_table() -> ClipTable<WeaponState> {
    ClipTable::new("04 idle")
        .with(WeaponState::Pose, "00 pose")
        .with(WeaponState::Select, "01 select")
        .with(WeaponState::Putaway, "02 putaway")
        .with(WeaponState::EmptySelect, "03 empty select")
        .with(WeaponState::Idle, "04 idle")
        .with(WeaponState::Inspect, "05 inspect")
        .with(WeaponState::Walk, "06 walk")
        .with(WeaponState::Run, "07 run")
        .with(WeaponState::Fire, "08 fire")
        .with(WeaponState::AlternateFire, "09 alternate fire")
        .with(WeaponState::MeleeAttack, "10 melee attack")
        .with(WeaponState::AlternateFireModeOn, "15 alternate fire mode on")
        .with(WeaponState::DryFire, "16 dryfire")
        .with(WeaponState::Reload, "17 reload")
        .with(WeaponState::EmptyReload, "18 empty reload")
}

/// Clip names of the creature model
pub fn creature_clip_table() -> ClipTable<CreatureState> {
    ClipTable::new("idle")
        .with(CreatureState::Attack, "attack")
        .with(CreatureState::Death, "death")
        .with(CreatureState::Idle, "idle")
        .with(CreatureState::Idle2, "idle2")
        .with(CreatureState::Roar, "roar")
        .with(CreatureState::Run, "run")
        .with(CreatureState::Walk, "walk")
}
