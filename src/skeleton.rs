use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One forward move of the turtle, in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Turtle position before the move.
    pub start: Vec3,
    /// Turtle position after the move.
    pub end: Vec3,
}

impl Branch {
    /// Creates a segment from `start` to `end`.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Euclidean distance between the endpoints.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A point of interest (flower, leaf, bud) left behind by a non-moving symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// World-space position of the turtle when the symbol was read.
    pub position: Vec3,

    /// The symbol that produced this marker.
    pub tag: String,
}

/// The geometry grown from one symbol string.
///
/// Branches and markers are stored in the order the turtle produced them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantSkeleton {
    /// Segments, one per drawing move.
    pub branches: Vec<Branch>,
    /// Markers, empty when the walk ran in branches-only mode.
    pub markers: Vec<Marker>,
}

impl PlantSkeleton {
    /// An empty skeleton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    pub fn add_branch(&mut self, branch: Branch) {
        self.branches.push(branch);
    }

    /// Appends a marker.
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Encodes the skeleton as flat float buffers, see [`FlatGeometry`].
    pub fn to_flat(&self) -> FlatGeometry {
        let mut flat = FlatGeometry {
            branches: Vec::with_capacity(self.branches.len() * FlatGeometry::BRANCH_STRIDE),
            markers: Vec::with_capacity(self.markers.len() * FlatGeometry::MARKER_STRIDE),
        };
        for b in &self.branches {
            flat.branches.extend_from_slice(&b.start.to_array());
            flat.branches.extend_from_slice(&b.end.to_array());
        }
        for m in &self.markers {
            flat.markers.extend_from_slice(&m.position.to_array());
            flat.markers.push(encode_tag(&m.tag));
        }
        flat
    }
}

/// Flat numeric encoding of a [`PlantSkeleton`] for callers across an FFI or scripting boundary.
///
/// * `branches`: 6 floats per branch, `start.xyz` then `end.xyz`.
/// * `markers`: 4 floats per marker, `position.xyz` then the Unicode scalar value of the
///   tag's first character (`0.0` for an empty tag).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatGeometry {
    /// `BRANCH_STRIDE` floats per branch.
    pub branches: Vec<f32>,
    /// `MARKER_STRIDE` floats per marker.
    pub markers: Vec<f32>,
}

impl FlatGeometry {
    /// Floats per encoded branch.
    pub const BRANCH_STRIDE: usize = 6;
    /// Floats per encoded marker.
    pub const MARKER_STRIDE: usize = 4;

    /// Number of encoded branches.
    pub fn branch_count(&self) -> usize {
        self.branches.len() / Self::BRANCH_STRIDE
    }

    /// Number of encoded markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len() / Self::MARKER_STRIDE
    }
}

fn encode_tag(tag: &str) -> f32 {
    tag.chars().next().map_or(0.0, |c| u32::from(c) as f32)
}
