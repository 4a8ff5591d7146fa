//! Per-entity animation playback
//!
//! An [`AnimationPlayer`] tracks which clip an entity is playing and how far
//! into it it is, and owns the skinning palette the renderer uploads.
//!
//! Playback states:
//! - playing: elapsed time within the clip's duration, pose recomputed on
//!   every [`advance`](AnimationPlayer::advance)
//! - finished: elapsed time past the duration, pose frozen at the last
//!   computed palette until [`reset`](AnimationPlayer::reset) or a clip switch
//!
//! Selecting a different clip name restarts playback at time zero.

use std::sync::Arc;

use glam::Mat4;

use crate::clip::AnimationClip;
use crate::error::{AnimError, Result};
use crate::fixup::{CoordinateFixup, MatrixLayout};
use crate::set::AnimationSet;
use crate::skeleton::MAX_BONES;

/// Runtime playback state of one animated entity
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    set: Arc<AnimationSet>,
    current_clip: Option<String>,
    elapsed: f32,
    /// Skinning palette, written by `advance`
    bone_matrices: Box<[Mat4; MAX_BONES]>,
    /// Scratch globals for attachment queries
    pose_scratch: Box<[Mat4; MAX_BONES]>,
    fixup: CoordinateFixup,
    fixup_matrix: Mat4,
}

impl AnimationPlayer {
    /// Create a player bound to an animation set
    ///
    /// No clip is active until the first [`advance`](Self::advance), and the
    /// palette starts out as identity matrices.
    pub fn new(set: Arc<AnimationSet>, fixup: CoordinateFixup) -> Self {
        Self {
            set,
            current_clip: None,
            elapsed: 0.0,
            bone_matrices: Box::new([Mat4::IDENTITY; MAX_BONES]),
            pose_scratch: Box::new([Mat4::IDENTITY; MAX_BONES]),
            fixup,
            fixup_matrix: fixup.matrix(),
        }
    }

    /// Advance playback of `clip_name` by `dt` seconds and recompute the
    /// skinning palette
    ///
    /// Continuing the current clip adds `dt` to the elapsed time; naming a
    /// different clip switches to it at time zero. Once the clip is finished
    /// the palette is left as it was. An unknown clip name leaves the player
    /// untouched.
    pub fn advance(&mut self, clip_name: &str, dt: f32) -> Result<()> {
        let set = &*self.set;
        let clip = set.clip(clip_name)?;

        if self.current_clip.as_deref() == Some(clip_name) {
            self.elapsed += dt;
        } else {
            log::debug!(
                "Switching clip {:?} -> '{}'",
                self.current_clip.as_deref(),
                clip_name
            );
            self.current_clip = Some(clip_name.to_string());
            self.elapsed = 0.0;
        }

        if self.elapsed > clip.duration() {
            log::trace!(
                "Clip '{}' finished at {:.3}s, holding pose",
                clip_name,
                self.elapsed
            );
            return Ok(());
        }

        let cursor = clip.locate_frame(self.elapsed);
        log::trace!(
            "Clip '{}' at {:.3}s: frames {}->{} factor {:.3}",
            clip_name,
            self.elapsed,
            cursor.base,
            cursor.next,
            cursor.factor
        );

        let skeleton = set.skeleton();
        for bone in 0..skeleton.len() {
            let global = clip.bone_to_global(&self.bone_matrices[..], cursor, skeleton, bone)?;
            self.bone_matrices[bone] = global;
        }
        set.final_transforms(&mut self.bone_matrices[..skeleton.len()], self.fixup_matrix);

        Ok(())
    }

    /// [`advance`](Self::advance), then restart the clip if it finished
    ///
    /// The restarted pose is computed on the next call.
    pub fn advance_looped(&mut self, clip_name: &str, dt: f32) -> Result<()> {
        self.advance(clip_name, dt)?;
        if self.is_finished() {
            self.reset();
        }
        Ok(())
    }

    /// Check if the elapsed time is past the current clip's duration
    pub fn is_finished(&self) -> bool {
        self.active_clip()
            .is_some_and(|clip| self.elapsed > clip.duration())
    }

    /// Check if the elapsed time still falls on a sampled frame of the
    /// current clip
    pub fn is_playing(&self) -> bool {
        self.active_clip()
            .is_some_and(|clip| clip.is_playing(self.elapsed))
    }

    /// Restart the current clip at time zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Model-space matrix of a named bone at the current playback time, for
    /// attaching objects to it
    ///
    /// Only the bone's parent chain is evaluated, into a scratch buffer, so
    /// the skinning palette is left untouched.
    pub fn world_matrix_of_bone(&mut self, bone_name: &str) -> Result<Mat4> {
        let set = &*self.set;
        let clip_name = self.current_clip.as_deref().ok_or(AnimError::NoActiveClip)?;
        let clip = set.clip(clip_name)?;
        let skeleton = set.skeleton();

        let index = skeleton
            .find_bone_index(bone_name)
            .ok_or_else(|| AnimError::UnknownBone(bone_name.to_string()))?;
        let chain = skeleton.bone_chain(index)?;
        let cursor = clip.locate_frame(self.elapsed);

        // Root first so every parent is ready before its child
        for &bone in chain.iter().rev() {
            let global = clip.bone_to_global(&self.pose_scratch[..], cursor, skeleton, bone)?;
            self.pose_scratch[bone] = global;
        }

        // Row-vector `pose * fixup`
        Ok(self.fixup_matrix * self.pose_scratch[index])
    }

    /// Name of the clip being played
    pub fn current_clip(&self) -> Option<&str> {
        self.current_clip.as_deref()
    }

    /// Seconds into the current clip
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The animation set this player draws clips from
    pub fn set(&self) -> &Arc<AnimationSet> {
        &self.set
    }

    /// Axis remap applied to every output matrix
    pub fn fixup(&self) -> CoordinateFixup {
        self.fixup
    }

    /// Skinning matrices of the skeleton's bones
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.bone_matrices[..self.set.skeleton().len()]
    }

    /// The full fixed-size palette, unused slots left as identity
    pub fn palette(&self) -> &[Mat4; MAX_BONES] {
        &self.bone_matrices
    }

    /// Skinning matrices flattened for upload
    pub fn palette_data(&self, layout: MatrixLayout) -> Vec<f32> {
        layout.flatten_all(self.bone_matrices())
    }

    fn active_clip(&self) -> Option<&AnimationClip> {
        self.current_clip
            .as_deref()
            .and_then(|name| self.set.clip(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Frame, Keyframe};
    use crate::skeleton::{BoneDesc, Skeleton};
    use glam::{Quat, Vec3};

    fn single_bone_set(frames: Vec<Frame>, tps: f32) -> Arc<AnimationSet> {
        let skeleton = Arc::new(
            Skeleton::new(
                vec![BoneDesc::new("root", Mat4::IDENTITY, -1)],
                Mat4::IDENTITY,
            )
            .unwrap(),
        );
        let clip = AnimationClip::new(frames, tps).unwrap();
        Arc::new(AnimationSet::new(skeleton).with_clip("move", clip).unwrap())
    }

    fn slide_set() -> Arc<AnimationSet> {
        single_bone_set(
            vec![
                Frame::from_iter([Keyframe::IDENTITY]),
                Frame::from_iter([Keyframe::translation(Vec3::new(4.0, 0.0, 0.0))]),
            ],
            1.0,
        )
    }

    #[test]
    fn test_new_player_is_idle() {
        let set = slide_set();
        let player = AnimationPlayer::new(Arc::clone(&set), CoordinateFixup::Identity);
        assert!(Arc::ptr_eq(player.set(), &set));
        assert_eq!(player.current_clip(), None);
        assert!(!player.is_finished());
        assert!(!player.is_playing());
        assert_eq!(player.bone_matrices(), &[Mat4::IDENTITY]);
    }

    #[test]
    fn test_advance_accumulates_time() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        player.advance("move", 0.3).unwrap();
        assert_eq!(player.elapsed(), 0.0);
        player.advance("move", 0.25).unwrap();
        player.advance("move", 0.25).unwrap();
        assert_eq!(player.elapsed(), 0.5);
        assert!(player.is_playing());

        let t = player.bone_matrices()[0].w_axis.truncate();
        assert_eq!(t, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_clip_leaves_state() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        player.advance("move", 0.0).unwrap();
        player.advance("move", 0.5).unwrap();

        assert!(matches!(
            player.advance("fly", 0.1),
            Err(AnimError::UnknownClip(_))
        ));
        assert_eq!(player.current_clip(), Some("move"));
        assert_eq!(player.elapsed(), 0.5);
    }

    #[test]
    fn test_advance_looped_restarts() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        player.advance_looped("move", 0.0).unwrap();
        player.advance_looped("move", 1.5).unwrap();
        assert_eq!(player.elapsed(), 1.5);
        player.advance_looped("move", 1.0).unwrap();
        assert_eq!(player.elapsed(), 0.0);
        assert!(!player.is_finished());
    }

    #[test]
    fn test_finished_and_playing_disagree_in_last_tick() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        player.advance("move", 0.0).unwrap();
        player.advance("move", 2.0).unwrap();

        // Exactly at the duration: not finished, but past the last frame
        assert!(!player.is_finished());
        assert!(!player.is_playing());
    }

    #[test]
    fn test_world_matrix_requires_clip() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        assert!(matches!(
            player.world_matrix_of_bone("root"),
            Err(AnimError::NoActiveClip)
        ));
    }

    #[test]
    fn test_world_matrix_unknown_bone() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        player.advance("move", 0.0).unwrap();
        assert!(matches!(
            player.world_matrix_of_bone("hand"),
            Err(AnimError::UnknownBone(_))
        ));
    }

    #[test]
    fn test_fixup_applied_to_palette() {
        let set = single_bone_set(
            vec![Frame::from_iter([Keyframe::translation(Vec3::new(
                0.0, 1.0, 0.0,
            ))])],
            1.0,
        );
        let mut player = AnimationPlayer::new(set, CoordinateFixup::YUpToZUp);
        player.advance("move", 0.0).unwrap();

        let t = player.bone_matrices()[0].w_axis.truncate();
        assert_eq!(t, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotation_is_interpolated() {
        let end = Keyframe {
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            ..Keyframe::IDENTITY
        };
        let set = single_bone_set(
            vec![Frame::from_iter([Keyframe::IDENTITY]), Frame::from_iter([end])],
            1.0,
        );
        let mut player = AnimationPlayer::new(set, CoordinateFixup::Identity);
        player.advance("move", 0.0).unwrap();
        player.advance("move", 0.5).unwrap();

        let expected = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);
        assert!(player.bone_matrices()[0].abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_palette_data_layout() {
        let mut player = AnimationPlayer::new(slide_set(), CoordinateFixup::Identity);
        player.advance("move", 0.0).unwrap();
        player.advance("move", 0.5).unwrap();

        let data = player.palette_data(MatrixLayout::RowMajor);
        assert_eq!(data.len(), 16);
        assert_eq!(data[12], 2.0);
        assert_eq!(player.palette().len(), MAX_BONES);
    }
}
