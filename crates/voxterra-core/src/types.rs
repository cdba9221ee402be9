//! Placement and biome types.

use bytemuck::{Pod, Zeroable};
use glam::Quat;
use serde::{Deserialize, Serialize};

/// Geometry placed for a voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeClass {
    /// Solid cube
    #[default]
    Full,
    /// Ramp dropping towards one side
    Slope,
    /// Convex corner where two adjacent sides drop
    OuterCorner,
    /// Concave corner where only a diagonal drops
    InnerCorner,
}

/// Rotation about the +Y axis in quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation angle in degrees
    #[inline]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Rotation angle in radians
    #[inline]
    pub fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }

    /// Quaternion rotating about +Y by this angle
    #[inline]
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_y(self.radians())
    }
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(pub u32);
    };
}

resource_id!(
    /// Handle to a placeable prefab owned by the instantiation layer.
    PrefabId
);
resource_id!(
    /// Handle to a render material.
    MaterialId
);
resource_id!(
    /// Handle to an audio clip.
    AudioId
);
resource_id!(
    /// Handle to a post-processing profile.
    ProfileId
);

/// Type tag of a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BiomeKind {
    Prismafossil = 0,
    Mnemic = 1,
    Basal = 2,
    AstralSilt = 3,
    EtherCumulus = 4,
    SilkenSilica = 5,
    EdenGrass = 6,
    VoltaicVoxel = 7,
}

impl BiomeKind {
    /// Every biome kind in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Prismafossil,
        Self::Mnemic,
        Self::Basal,
        Self::AstralSilt,
        Self::EtherCumulus,
        Self::SilkenSilica,
        Self::EdenGrass,
        Self::VoltaicVoxel,
    ];
}

/// The four prefabs a biome places, one per shape class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeSet {
    pub full: PrefabId,
    pub slope: PrefabId,
    pub corner: PrefabId,
    pub inner_corner: PrefabId,
}

impl ShapeSet {
    /// Prefab for a shape class
    #[inline]
    pub const fn get(&self, shape: ShapeClass) -> PrefabId {
        match shape {
            ShapeClass::Full => self.full,
            ShapeClass::Slope => self.slope,
            ShapeClass::OuterCorner => self.corner,
            ShapeClass::InnerCorner => self.inner_corner,
        }
    }
}

/// Resources for one biome. Loaded once and shared by reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BiomeDefinition {
    pub name: String,
    pub kind: BiomeKind,
    pub shapes: ShapeSet,
    /// Material applied to every voxel of the biome. `None` keeps the prefab's own.
    pub material: Option<MaterialId>,
    pub step_sound: Option<AudioId>,
    pub post_process: Option<ProfileId>,
}

impl BiomeDefinition {
    /// Create a biome with shapes only.
    pub fn new(name: impl Into<String>, kind: BiomeKind, shapes: ShapeSet) -> Self {
        Self {
            name: name.into(),
            kind,
            shapes,
            material: None,
            step_sound: None,
            post_process: None,
        }
    }

    /// Attach a material
    #[must_use]
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Attach a step sound
    #[must_use]
    pub fn with_step_sound(mut self, sound: AudioId) -> Self {
        self.step_sound = Some(sound);
        self
    }

    /// Attach a post-processing profile
    #[must_use]
    pub fn with_post_process(mut self, profile: ProfileId) -> Self {
        self.post_process = Some(profile);
        self
    }
}
