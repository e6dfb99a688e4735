use crate::types::*;

/// Core geometry kernel trait. Every solid the connector builder creates goes through it.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
///
/// Operations never mutate an existing solid; each returns a fresh handle.
pub trait Kernel {
    /// Axis-aligned box of `size` centred on the origin.
    fn make_box(&mut self, size: [f64; 3]) -> Result<KernelSolidHandle, KernelError>;

    /// Trapezoidal prism centred on the origin. Runs along +X from a face of
    /// `base_width` (along Y) to a face of `tip_width`; `height` is along Z.
    fn make_wedge(
        &mut self,
        depth: f64,
        base_width: f64,
        tip_width: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Loft of `length` along +X between two parallel sections of the same kind,
    /// centred on the origin.
    fn make_loft(
        &mut self,
        length: f64,
        start: Section,
        end: Section,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Cylinder along Z centred on the origin.
    fn make_cylinder(&mut self, radius: f64, height: f64)
        -> Result<KernelSolidHandle, KernelError>;

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Rotate about a coordinate axis through the origin.
    fn rotate(
        &mut self,
        solid: &KernelSolidHandle,
        axis: Axis,
        degrees: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Locate the outermost planar face in the selector's direction.
    fn select_face(
        &mut self,
        solid: &KernelSolidHandle,
        selector: FaceSelector,
    ) -> Result<FacePlane, KernelError>;

    /// Drill a blind cylindrical hole into `face`.
    ///
    /// `offset` is the hole centre in the face's in-plane axes, global coordinates.
    fn cut_hole(
        &mut self,
        solid: &KernelSolidHandle,
        face: &FacePlane,
        offset: [f64; 2],
        diameter: f64,
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Serialize a solid as a STEP (ISO 10303-21) document.
    fn export_step(&mut self, solid: &KernelSolidHandle) -> Result<String, KernelError>;

    /// Drop a solid that is no longer needed. Unknown handles are ignored.
    fn release(&mut self, solid: &KernelSolidHandle);
}
