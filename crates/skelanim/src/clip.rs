//! Keyframe storage and frame interpolation for a single animation clip

use glam::{Mat4, Quat, Vec3};

use crate::error::{AnimError, Result};
use crate::math::{lerp, local_transform, slerp};
use crate::skeleton::Skeleton;

/// One bone's pose at a sample instant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Keyframe {
    /// Rest keyframe: no translation, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Keyframe that only translates
    pub fn translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }
}

impl Default for Keyframe {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Every bone's keyframe at one sample instant, as parallel arrays indexed
/// by bone
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub positions: Vec<Vec3>,
    pub rotations: Vec<Quat>,
    pub scales: Vec<Vec3>,
}

impl Frame {
    /// Number of bones covered, or `None` if the arrays disagree
    pub fn bone_count(&self) -> Option<usize> {
        let n = self.positions.len();
        (self.rotations.len() == n && self.scales.len() == n).then_some(n)
    }

    /// Keyframe of one bone
    pub fn keyframe(&self, bone: usize) -> Option<Keyframe> {
        Some(Keyframe {
            position: *self.positions.get(bone)?,
            rotation: *self.rotations.get(bone)?,
            scale: *self.scales.get(bone)?,
        })
    }
}

impl FromIterator<Keyframe> for Frame {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        let mut frame = Self::default();
        for key in iter {
            frame.positions.push(key.position);
            frame.rotations.push(key.rotation);
            frame.scales.push(key.scale);
        }
        frame
    }
}

/// Bracketing frame pair and blend factor for a playback time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCursor {
    /// Earlier frame of the pair
    pub base: usize,
    /// Later frame of the pair (equal to `base` on the last frame)
    pub next: usize,
    /// Blend factor towards `next`, in `[0, 1)`
    pub factor: f32,
}

/// Sampled animation for one skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    frames: Vec<Frame>,
    ticks_per_second: f32,
}

impl AnimationClip {
    /// Create a clip from its frames and sample rate
    pub fn new(frames: Vec<Frame>, ticks_per_second: f32) -> Result<Self> {
        if frames.is_empty() {
            return Err(AnimError::InvalidClip {
                reason: "clip has no frames".to_string(),
            });
        }

        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(AnimError::InvalidClip {
                reason: format!("ticks per second must be positive, got {ticks_per_second}"),
            });
        }

        if let Some(index) = frames.iter().position(|f| f.bone_count().is_none()) {
            return Err(AnimError::InvalidClip {
                reason: format!(
                    "frame {index} has mismatched position/rotation/scale array lengths"
                ),
            });
        }

        Ok(Self {
            frames,
            ticks_per_second,
        })
    }

    /// Frames in playback order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Sample rate in frames per second
    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    /// Clip length in seconds
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 / self.ticks_per_second
    }

    /// Find the frame pair and blend factor for time `t` (seconds)
    ///
    /// The factor is taken from the unclamped phase, so past the end of the
    /// clip both frames are the last one and the pose stays frozen.
    pub fn locate_frame(&self, t: f32) -> FrameCursor {
        let phase = t * self.ticks_per_second;
        let whole = phase.floor();
        let factor = phase - whole;

        let last = self.frames.len() - 1;
        let base = if whole > 0.0 {
            (whole as usize).min(last)
        } else {
            0
        };

        FrameCursor {
            base,
            next: self.next_frame(base),
            factor,
        }
    }

    /// Frame after `frame`, clamped to the last frame
    pub fn next_frame(&self, frame: usize) -> usize {
        (frame + 1).min(self.frames.len() - 1)
    }

    /// Check if time `t` still falls on a sampled frame
    pub fn is_playing(&self, t: f32) -> bool {
        (t * self.ticks_per_second).floor() < self.frames.len() as f32
    }

    /// Interpolated local transform of `bone`
    pub fn sample_bone(&self, cursor: FrameCursor, bone: usize) -> Result<Mat4> {
        let (Some(a), Some(b)) = (
            self.frames.get(cursor.base).and_then(|f| f.keyframe(bone)),
            self.frames.get(cursor.next).and_then(|f| f.keyframe(bone)),
        ) else {
            return Err(AnimError::BoneIndexOutOfRange {
                index: bone,
                count: self.frames[0].positions.len(),
            });
        };

        let f = cursor.factor;
        let scale = lerp(a.scale, b.scale, f);
        let rotation = slerp(a.rotation, b.rotation, f);
        let translation = lerp(a.position, b.position, f);

        Ok(local_transform(scale, rotation, translation))
    }

    /// Interpolated transform of `bone` composed with its parent's global
    /// transform from `globals`
    ///
    /// The parent's entry in `globals` must already hold this frame's value.
    pub fn bone_to_global(
        &self,
        globals: &[Mat4],
        cursor: FrameCursor,
        skeleton: &Skeleton,
        bone: usize,
    ) -> Result<Mat4> {
        let local = self.sample_bone(cursor, bone)?;

        // Row-vector `local * parent`
        Ok(match skeleton.bone(bone)?.parent() {
            Some(parent) => globals[parent] * local,
            None => local,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_frame(bones: usize) -> Frame {
        std::iter::repeat_n(Keyframe::IDENTITY, bones).collect()
    }

    fn clip(frames: usize, tps: f32) -> AnimationClip {
        AnimationClip::new(vec![still_frame(1); frames], tps).unwrap()
    }

    #[test]
    fn test_duration() {
        assert_eq!(clip(2, 1.0).duration(), 2.0);
        assert_eq!(clip(30, 30.0).duration(), 1.0);
    }

    #[test]
    fn test_locate_frame_midpoint() {
        let c = clip(4, 2.0);
        let cursor = c.locate_frame(0.75);
        assert_eq!(cursor.base, 1);
        assert_eq!(cursor.next, 2);
        assert!((cursor.factor - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_locate_frame_clamps_at_end() {
        let c = clip(2, 1.0);

        let cursor = c.locate_frame(1.5);
        assert_eq!((cursor.base, cursor.next), (1, 1));

        // Past the end the factor keeps its sub-frame value
        let cursor = c.locate_frame(5.25);
        assert_eq!((cursor.base, cursor.next), (1, 1));
        assert!((cursor.factor - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_locate_frame_negative_time() {
        let cursor = clip(3, 1.0).locate_frame(-0.5);
        assert_eq!(cursor.base, 0);
        assert_eq!(cursor.next, 1);
    }

    #[test]
    fn test_is_playing() {
        let c = clip(2, 1.0);
        assert!(c.is_playing(0.0));
        assert!(c.is_playing(1.99));
        assert!(!c.is_playing(2.0));
        assert!(!c.is_playing(3.0));
    }

    #[test]
    fn test_rejects_empty_clip() {
        assert!(matches!(
            AnimationClip::new(vec![], 24.0),
            Err(AnimError::InvalidClip { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_rate() {
        for rate in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(AnimationClip::new(vec![still_frame(1)], rate).is_err());
        }
    }

    #[test]
    fn test_rejects_ragged_frame() {
        let mut frame = still_frame(2);
        frame.scales.pop();
        assert!(matches!(
            AnimationClip::new(vec![frame], 24.0),
            Err(AnimError::InvalidClip { .. })
        ));
    }

    #[test]
    fn test_sample_bone_interpolates_translation() {
        let frames = vec![
            Frame::from_iter([Keyframe::IDENTITY]),
            Frame::from_iter([Keyframe::translation(Vec3::new(2.0, 0.0, -4.0))]),
        ];
        let c = AnimationClip::new(frames, 1.0).unwrap();

        let local = c.sample_bone(c.locate_frame(0.25), 0).unwrap();
        assert_eq!(local.w_axis.truncate(), Vec3::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_sample_bone_out_of_range() {
        let c = clip(2, 1.0);
        assert!(matches!(
            c.sample_bone(c.locate_frame(0.0), 3),
            Err(AnimError::BoneIndexOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_frame_keyframe_access() {
        let frame = Frame::from_iter([Keyframe::translation(Vec3::X), Keyframe::IDENTITY]);
        assert_eq!(frame.bone_count(), Some(2));
        assert_eq!(frame.keyframe(0).unwrap().position, Vec3::X);
        assert_eq!(frame.keyframe(2), None);
    }
}
