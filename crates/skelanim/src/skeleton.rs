//! Bone hierarchy and bind pose data
//!
//! A [`Skeleton`] is built once from the loader's flat bone list and never
//! mutated afterwards. Parents always precede their children, so global
//! transforms can be composed in a single pass over bone indices.

use std::collections::HashMap;

use glam::Mat4;

use crate::error::{AnimError, Result};

/// Capacity of the fixed-size skinning palette
pub const MAX_BONES: usize = 256;

/// Bone description as produced by an asset loader
#[derive(Debug, Clone, PartialEq)]
pub struct BoneDesc {
    /// Bone name, used for attachment lookups
    pub name: String,
    /// Inverse bind pose matrix
    pub offset: Mat4,
    /// Parent bone index (-1 for root bones)
    pub parent_index: i32,
}

impl BoneDesc {
    /// Create a bone description
    pub fn new(name: impl Into<String>, offset: Mat4, parent_index: i32) -> Self {
        Self {
            name: name.into(),
            offset,
            parent_index,
        }
    }
}

/// A validated bone in a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    name: String,
    offset: Mat4,
    parent: Option<usize>,
}

impl Bone {
    /// Bone name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inverse bind pose matrix
    pub fn offset(&self) -> Mat4 {
        self.offset
    }

    /// Parent bone index, always lower than this bone's own index
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Check if this bone has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Static bone hierarchy shared by every player of a model
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
    global_inverse: Mat4,
    by_name: HashMap<String, usize>,
}

impl Skeleton {
    /// Build a skeleton from loader output
    ///
    /// Every `parent_index` must be -1 or the index of an earlier bone, and
    /// the bone count must fit in [`MAX_BONES`]. When two bones share a name,
    /// lookups resolve to the first one.
    pub fn new(bones: Vec<BoneDesc>, global_inverse: Mat4) -> Result<Self> {
        if bones.len() > MAX_BONES {
            return Err(AnimError::TooManyBones {
                count: bones.len(),
                max: MAX_BONES,
            });
        }

        let mut validated = Vec::with_capacity(bones.len());
        let mut by_name = HashMap::with_capacity(bones.len());

        for (index, desc) in bones.into_iter().enumerate() {
            let parent = match desc.parent_index {
                -1 => None,
                p if p >= 0 && (p as usize) < index => Some(p as usize),
                p => {
                    return Err(AnimError::MalformedSkeleton {
                        bone: index,
                        parent: p,
                    });
                }
            };

            by_name.entry(desc.name.clone()).or_insert(index);
            validated.push(Bone {
                name: desc.name,
                offset: desc.offset,
                parent,
            });
        }

        Ok(Self {
            bones: validated,
            global_inverse,
            by_name,
        })
    }

    /// Find a bone index by name
    pub fn find_bone_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Get a bone by index
    pub fn bone(&self, index: usize) -> Result<&Bone> {
        self.bones.get(index).ok_or(AnimError::BoneIndexOutOfRange {
            index,
            count: self.bones.len(),
        })
    }

    /// All bones in hierarchy order
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Check if the skeleton has no bones
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Inverse of the model's root transform
    pub fn global_inverse(&self) -> Mat4 {
        self.global_inverse
    }

    /// Bone indices from `index` up to its root, leaf first
    pub fn bone_chain(&self, index: usize) -> Result<Vec<usize>> {
        let mut chain = Vec::new();
        let mut current = Some(index);

        while let Some(id) = current {
            chain.push(id);
            current = self.bone(id)?.parent;
        }

        Ok(chain)
    }

    /// Maximum parent-chain length over all bones
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.bones.len()];
        for (i, bone) in self.bones.iter().enumerate() {
            depths[i] = bone.parent.map_or(1, |p| depths[p] + 1);
        }
        depths.into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str, parent: i32) -> BoneDesc {
        BoneDesc::new(name, Mat4::IDENTITY, parent)
    }

    #[test]
    fn test_skeleton_lookup() {
        let skeleton = Skeleton::new(
            vec![desc("root", -1), desc("spine", 0), desc("hand", 1)],
            Mat4::IDENTITY,
        )
        .unwrap();

        assert_eq!(skeleton.len(), 3);
        assert_eq!(skeleton.find_bone_index("spine"), Some(1));
        assert_eq!(skeleton.find_bone_index("tail"), None);
        assert!(skeleton.bone(0).unwrap().is_root());
        assert_eq!(skeleton.bone(2).unwrap().parent(), Some(1));
    }

    #[test]
    fn test_forward_parent_rejected() {
        let err = Skeleton::new(vec![desc("a", 1), desc("b", -1)], Mat4::IDENTITY).unwrap_err();
        assert!(matches!(
            err,
            AnimError::MalformedSkeleton { bone: 0, parent: 1 }
        ));
    }

    #[test]
    fn test_self_parent_rejected() {
        let err = Skeleton::new(vec![desc("a", -1), desc("b", 1)], Mat4::IDENTITY).unwrap_err();
        assert!(matches!(
            err,
            AnimError::MalformedSkeleton { bone: 1, parent: 1 }
        ));
    }

    #[test]
    fn test_negative_parent_rejected() {
        let err = Skeleton::new(vec![desc("a", -2)], Mat4::IDENTITY).unwrap_err();
        assert!(matches!(err, AnimError::MalformedSkeleton { .. }));
    }

    #[test]
    fn test_too_many_bones() {
        let mut bones = vec![desc("root", -1)];
        bones.extend((1..=MAX_BONES).map(|i| desc(&format!("b{i}"), 0)));
        let err = Skeleton::new(bones, Mat4::IDENTITY).unwrap_err();
        assert!(matches!(
            err,
            AnimError::TooManyBones { count: 257, max: 256 }
        ));
    }

    #[test]
    fn test_full_palette_accepted() {
        let mut bones = vec![desc("root", -1)];
        bones.extend((1..MAX_BONES).map(|i| desc(&format!("b{i}"), 0)));
        assert!(Skeleton::new(bones, Mat4::IDENTITY).is_ok());
    }

    #[test]
    fn test_duplicate_name_resolves_to_first() {
        let skeleton =
            Skeleton::new(vec![desc("a", -1), desc("a", 0)], Mat4::IDENTITY).unwrap();
        assert_eq!(skeleton.find_bone_index("a"), Some(0));
    }

    #[test]
    fn test_bone_chain_and_depth() {
        let skeleton = Skeleton::new(
            vec![desc("root", -1), desc("arm", 0), desc("leg", 0), desc("hand", 1)],
            Mat4::IDENTITY,
        )
        .unwrap();

        assert_eq!(skeleton.bone_chain(3).unwrap(), vec![3, 1, 0]);
        assert_eq!(skeleton.bone_chain(0).unwrap(), vec![0]);
        assert_eq!(skeleton.depth(), 3);
    }

    #[test]
    fn test_bone_index_out_of_range() {
        let skeleton = Skeleton::new(vec![desc("root", -1)], Mat4::IDENTITY).unwrap();
        assert!(matches!(
            skeleton.bone(4),
            Err(AnimError::BoneIndexOutOfRange { index: 4, count: 1 })
        ));
        assert!(skeleton.bone_chain(9).is_err());
    }
}
