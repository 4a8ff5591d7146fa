//! JSON description of a loaded skeleton and its clips
//!
//! This is the data an asset loader hands to the animation core, in a form
//! that can be written by hand or exported from tooling. Matrices are 16
//! floats in row-vector, row-major order (translation in elements 12-14),
//! vectors are `[x, y, z]` and quaternions `[x, y, z, w]`.
//!
//! ```json
//! {
//!   "bones": [
//!     { "name": "root", "parent_index": -1 },
//!     { "name": "child", "parent_index": 0 }
//!   ],
//!   "clips": {
//!     "wave": {
//!       "ticks_per_second": 1.0,
//!       "frames": [
//!         { "positions": [[0,0,0],[0,0,0]], "rotations": [[0,0,0,1],[0,0,0,1]], "scales": [[1,1,1],[1,1,1]] }
//!       ]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::clip::{AnimationClip, Frame};
use crate::error::{AnimError, Result};
use crate::set::AnimationSet;
use crate::skeleton::{BoneDesc, Skeleton};

/// A bone as stored in an asset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneAsset {
    pub name: String,
    /// Inverse bind pose
    #[serde(default = "identity")]
    pub offset: Mat4,
    /// Parent bone index (-1 for root bones)
    #[serde(default = "no_parent")]
    pub parent_index: i32,
}

/// A clip as stored in an asset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipAsset {
    pub ticks_per_second: f32,
    pub frames: Vec<Frame>,
}

/// Skeleton plus named clips of one model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelAsset {
    #[serde(default = "identity")]
    pub global_inverse: Mat4,
    pub bones: Vec<BoneAsset>,
    #[serde(default)]
    pub clips: BTreeMap<String, ClipAsset>,
}

fn identity() -> Mat4 {
    Mat4::IDENTITY
}

const fn no_parent() -> i32 {
    -1
}

impl ModelAsset {
    /// Parse an asset from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an asset from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the asset and build the runtime skeleton and clips
    pub fn into_animation_set(self) -> Result<AnimationSet> {
        let bones = self
            .bones
            .into_iter()
            .map(|b| BoneDesc::new(b.name, b.offset, b.parent_index))
            .collect();
        let skeleton = Arc::new(Skeleton::new(bones, self.global_inverse)?);

        let mut set = AnimationSet::new(skeleton);
        for (name, clip) in self.clips {
            let clip = AnimationClip::new(clip.frames, clip.ticks_per_second).map_err(|e| {
                match e {
                    AnimError::InvalidClip { reason } => AnimError::InvalidClip {
                        reason: format!("'{name}': {reason}"),
                    },
                    other => other,
                }
            })?;
            set.insert(name, clip)?;
        }

        log::debug!(
            "Loaded model asset: {} bones, {} clips",
            set.skeleton().len(),
            set.len()
        );
        Ok(set)
    }
}

impl Default for BoneAsset {
    fn default() -> Self {
        Self {
            name: String::new(),
            offset: Mat4::IDENTITY,
            parent_index: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "bones": [ { "name": "root" } ],
        "clips": {
            "still": {
                "ticks_per_second": 24.0,
                "frames": [
                    { "positions": [[0,0,0]], "rotations": [[0,0,0,1]], "scales": [[1,1,1]] }
                ]
            }
        }
    }"#;

    #[test]
    fn test_minimal_asset_defaults() {
        let asset = ModelAsset::from_json_str(MINIMAL).unwrap();
        assert_eq!(asset.global_inverse, Mat4::IDENTITY);
        assert_eq!(asset.bones[0].parent_index, -1);
        assert_eq!(asset.bones[0].offset, Mat4::IDENTITY);

        let set = asset.into_animation_set().unwrap();
        assert!(set.has_clip("still"));
        assert_eq!(set.skeleton().len(), 1);
    }

    #[test]
    fn test_invalid_clip_names_clip() {
        let json = r#"{
            "bones": [ { "name": "root" } ],
            "clips": { "broken": { "ticks_per_second": 0.0, "frames": [] } }
        }"#;
        let err = ModelAsset::from_json_str(json)
            .unwrap()
            .into_animation_set()
            .unwrap_err();
        match err {
            AnimError::InvalidClip { reason } => assert!(reason.contains("'broken'")),
            other => panic!("expected InvalidClip, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            ModelAsset::from_json_str("{ \"bones\": 3 }"),
            Err(AnimError::Json(_))
        ));
    }
}
