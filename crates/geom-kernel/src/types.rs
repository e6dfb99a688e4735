use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the kernel instance that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("primitive construction failed: {reason}")]
    ConstructionFailed { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("face selection failed: {reason}")]
    FaceSelectionFailed { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("STEP export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("solid not found: {handle:?}")]
    SolidNotFound { handle: KernelSolidHandle },

    #[error("kernel error: {message}")]
    Other { message: String },
}

/// Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> [f64; 3] {
        let mut v = [0.0; 3];
        v[self.index()] = 1.0;
        v
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Picks the face whose outward normal points furthest along a signed axis.
///
/// `>Z` is the top face, `<Z` the bottom face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceSelector {
    pub axis: Axis,
    pub positive: bool,
}

impl FaceSelector {
    pub const fn new(axis: Axis, positive: bool) -> Self {
        Self { axis, positive }
    }

    pub const fn top() -> Self {
        Self::new(Axis::Z, true)
    }

    pub const fn bottom() -> Self {
        Self::new(Axis::Z, false)
    }

    /// +1 for a positive-facing selector, -1 otherwise.
    pub fn sign(self) -> f64 {
        if self.positive {
            1.0
        } else {
            -1.0
        }
    }

    pub fn normal(self) -> [f64; 3] {
        let mut n = self.axis.unit();
        n[self.axis.index()] = self.sign();
        n
    }

    /// The two global axes spanning the face plane, in (u, v) order.
    pub fn in_plane_axes(self) -> (Axis, Axis) {
        match self.axis {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

impl fmt::Display for FaceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '>' } else { '<' };
        write!(f, "{sign}{}", self.axis)
    }
}

/// A selected planar face: its selector plus its position along the selector axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacePlane {
    pub selector: FaceSelector,
    pub coordinate: f64,
}

impl FacePlane {
    /// Point on the face at in-plane offset `(u, v)` given in global coordinates.
    pub fn point_at(&self, offset: [f64; 2]) -> [f64; 3] {
        let (u, v) = self.selector.in_plane_axes();
        let mut p = [0.0; 3];
        p[self.selector.axis.index()] = self.coordinate;
        p[u.index()] = offset[0];
        p[v.index()] = offset[1];
        p
    }
}

/// Cross-section used at either end of a loft.
///
/// Rectangles are measured along Y (width) and Z (height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
}

impl Section {
    pub fn same_kind(&self, other: &Section) -> bool {
        matches!(
            (self, other),
            (Section::Rect { .. }, Section::Rect { .. })
                | (Section::Circle { .. }, Section::Circle { .. })
        )
    }

    /// Half extents along Y and Z.
    pub fn half_extents(&self) -> (f64, f64) {
        match *self {
            Section::Rect { width, height } => (width / 2.0, height / 2.0),
            Section::Circle { radius } => (radius, radius),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Box of the given size centred on the origin.
    pub fn centered(size: [f64; 3]) -> Self {
        Self {
            min: [-size[0] / 2.0, -size[1] / 2.0, -size[2] / 2.0],
            max: [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0],
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = [f64; 3]>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |mut acc, p| {
            for i in 0..3 {
                acc.min[i] = acc.min[i].min(p[i]);
                acc.max[i] = acc.max[i].max(p[i]);
            }
            acc
        }))
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn translated(&self, offset: [f64; 3]) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] += offset[i];
            out.max[i] += offset[i];
        }
        out
    }

    pub fn corners(&self) -> [[f64; 3]; 8] {
        let (a, b) = (self.min, self.max);
        [
            [a[0], a[1], a[2]],
            [b[0], a[1], a[2]],
            [b[0], b[1], a[2]],
            [a[0], b[1], a[2]],
            [a[0], a[1], b[2]],
            [b[0], a[1], b[2]],
            [b[0], b[1], b[2]],
            [a[0], b[1], b[2]],
        ]
    }

    /// Bounding box of this box after rotating it about `axis` through the origin.
    pub fn rotated(&self, axis: Axis, degrees: f64) -> BoundingBox {
        let corners = self.corners().map(|c| rotate_point(c, axis, degrees));
        // corners is never empty
        BoundingBox::from_points(corners).unwrap_or(*self)
    }

    /// Whether `other` lies inside this box, allowing `eps` of slack.
    pub fn contains(&self, other: &BoundingBox, eps: f64) -> bool {
        (0..3).all(|i| other.min[i] >= self.min[i] - eps && other.max[i] <= self.max[i] + eps)
    }
}

/// Rotate a point about a coordinate axis through the origin.
pub fn rotate_point(p: [f64; 3], axis: Axis, degrees: f64) -> [f64; 3] {
    let (s, c) = degrees.to_radians().sin_cos();
    let [x, y, z] = p;
    match axis {
        Axis::X => [x, y * c - z * s, y * s + z * c],
        Axis::Y => [x * c + z * s, y, -x * s + z * c],
        Axis::Z => [x * c - y * s, x * s + y * c, z],
    }
}

/// Tessellated triangle mesh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals [nx0, ny0, nz0, nx1, ny1, nz1, ...].
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corner positions of triangle `i`.
    pub fn triangle(&self, i: usize) -> [[f32; 3]; 3] {
        let mut out = [[0.0; 3]; 3];
        for (k, corner) in out.iter_mut().enumerate() {
            let v = self.indices[i * 3 + k] as usize;
            *corner = [
                self.vertices[v * 3],
                self.vertices[v * 3 + 1],
                self.vertices[v * 3 + 2],
            ];
        }
        out
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.vertices
                .chunks_exact(3)
                .map(|v| [v[0] as f64, v[1] as f64, v[2] as f64]),
        )
    }
}
