//! Named collection of clips bound to one skeleton

use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;

use crate::clip::AnimationClip;
use crate::error::{AnimError, Result};
use crate::skeleton::Skeleton;

/// All clips of a model, keyed by name
///
/// Built once at load time. Wrap it in an [`Arc`] and hand clones to every
/// [`AnimationPlayer`](crate::AnimationPlayer) that animates the model.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    skeleton: Arc<Skeleton>,
    clips: HashMap<String, AnimationClip>,
}

impl AnimationSet {
    /// Create an empty set for a skeleton
    pub fn new(skeleton: Arc<Skeleton>) -> Self {
        Self {
            skeleton,
            clips: HashMap::new(),
        }
    }

    /// Add a clip
    ///
    /// Every frame must hold exactly one keyframe per skeleton bone.
    pub fn insert(&mut self, name: impl Into<String>, clip: AnimationClip) -> Result<()> {
        let name = name.into();

        if self.clips.contains_key(&name) {
            return Err(AnimError::DuplicateClip(name));
        }

        let expected = self.skeleton.len();
        for (frame, data) in clip.frames().iter().enumerate() {
            let actual = data.positions.len();
            if actual != expected {
                return Err(AnimError::FrameSizeMismatch {
                    clip: name,
                    frame,
                    expected,
                    actual,
                });
            }
        }

        log::debug!(
            "Added clip '{}' ({} frames, {:.3}s)",
            name,
            clip.frame_count(),
            clip.duration()
        );
        self.clips.insert(name, clip);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_clip(mut self, name: impl Into<String>, clip: AnimationClip) -> Result<Self> {
        self.insert(name, clip)?;
        Ok(self)
    }

    /// Check if a clip exists
    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Get a clip by name
    pub fn clip(&self, name: &str) -> Result<&AnimationClip> {
        self.clips
            .get(name)
            .ok_or_else(|| AnimError::UnknownClip(name.to_string()))
    }

    /// Clip names in sorted order
    pub fn clip_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clips.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The skeleton all clips animate
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the set has no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Turn global bone transforms into skinning matrices, in place
    ///
    /// Row-vector `offset * global * global_inverse * fixup` per bone.
    /// `palette` must cover every skeleton bone.
    pub fn final_transforms(&self, palette: &mut [Mat4], fixup: Mat4) {
        let root = fixup * self.skeleton.global_inverse();
        for (matrix, bone) in palette.iter_mut().zip(self.skeleton.bones()) {
            *matrix = root * *matrix * bone.offset();
        }
    }
}
