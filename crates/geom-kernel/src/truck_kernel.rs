//! TruckKernel: B-rep geometry kernel wrapping truck's API.

use std::collections::HashMap;

use tracing::debug;
use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::{Point3, Rad, Vector3};
use truck_stepio::out;

use crate::primitives;
use crate::tessellation;
use crate::traits::Kernel;
use crate::types::*;

/// Default tolerance handed to truck-shapeops for booleans.
pub const DEFAULT_BOOLEAN_TOLERANCE: f64 = 0.05;

/// Hole cutters start this far outside the face so the cut never shares
/// a plane with it.
const HOLE_CLEARANCE: f64 = 0.01;

/// Connector solids built and combined with truck B-reps.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
    boolean_tolerance: f64,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_BOOLEAN_TOLERANCE)
    }

    /// Kernel whose booleans run at the given tolerance.
    pub fn with_tolerance(boolean_tolerance: f64) -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            boolean_tolerance,
        }
    }

    pub fn boolean_tolerance(&self) -> f64 {
        self.boolean_tolerance
    }

    /// Solids currently held.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::SolidNotFound {
                handle: handle.clone(),
            })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_vector(axis: Axis) -> Vector3 {
    let [x, y, z] = axis.unit();
    Vector3::new(x, y, z)
}

impl Kernel for TruckKernel {
    fn make_box(&mut self, size: [f64; 3]) -> Result<KernelSolidHandle, KernelError> {
        Ok(self.store_solid(primitives::make_box(size)))
    }

    fn make_wedge(
        &mut self,
        depth: f64,
        base_width: f64,
        tip_width: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid = primitives::make_wedge(depth, base_width, tip_width, height)?;
        Ok(self.store_solid(solid))
    }

    fn make_loft(
        &mut self,
        length: f64,
        start: Section,
        end: Section,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid = primitives::make_loft(length, start, end)?;
        Ok(self.store_solid(solid))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid = primitives::make_cylinder(radius, height)?;
        Ok(self.store_solid(solid))
    }

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let moved = builder::translated(
            self.get_solid(solid)?,
            Vector3::new(offset[0], offset[1], offset[2]),
        );
        Ok(self.store_solid(moved))
    }

    fn rotate(
        &mut self,
        solid: &KernelSolidHandle,
        axis: Axis,
        degrees: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let turned = builder::rotated(
            self.get_solid(solid)?,
            Point3::new(0.0, 0.0, 0.0),
            axis_vector(axis),
            Rad(degrees.to_radians()),
        );
        Ok(self.store_solid(turned))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?;
        let solid_b = self.get_solid(b)?;

        let result = truck_shapeops::or(solid_a, solid_b, self.boolean_tolerance).ok_or_else(
            || KernelError::BooleanFailed {
                reason: "truck or() returned None".to_string(),
            },
        )?;
        Ok(self.store_solid(result))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?;
        let mut solid_b = self.get_solid(b)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result = truck_shapeops::and(solid_a, &solid_b, self.boolean_tolerance).ok_or_else(
            || KernelError::BooleanFailed {
                reason: "truck and() returned None for subtraction".to_string(),
            },
        )?;
        Ok(self.store_solid(result))
    }

    fn select_face(
        &mut self,
        solid: &KernelSolidHandle,
        selector: FaceSelector,
    ) -> Result<FacePlane, KernelError> {
        let bounds = self.bounding_box(solid)?;
        let i = selector.axis.index();
        let coordinate = if selector.positive {
            bounds.max[i]
        } else {
            bounds.min[i]
        };
        if bounds.max[i] - bounds.min[i] <= 0.0 {
            return Err(KernelError::FaceSelectionFailed {
                reason: format!("solid is flat along {}", selector.axis),
            });
        }
        Ok(FacePlane {
            selector,
            coordinate,
        })
    }

    fn cut_hole(
        &mut self,
        solid: &KernelSolidHandle,
        face: &FacePlane,
        offset: [f64; 2],
        diameter: f64,
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let selector = face.selector;
        let mut cutter = primitives::make_cylinder(diameter / 2.0, depth + 2.0 * HOLE_CLEARANCE)?;
        // Cylinders come out along Z; tip them onto the face axis.
        cutter = match selector.axis {
            Axis::X => builder::rotated(
                &cutter,
                Point3::new(0.0, 0.0, 0.0),
                Vector3::unit_y(),
                Rad(std::f64::consts::FRAC_PI_2),
            ),
            Axis::Y => builder::rotated(
                &cutter,
                Point3::new(0.0, 0.0, 0.0),
                Vector3::unit_x(),
                Rad(std::f64::consts::FRAC_PI_2),
            ),
            Axis::Z => cutter,
        };

        let mut center = face.point_at(offset);
        center[selector.axis.index()] -= selector.sign() * depth / 2.0;
        let cutter = builder::translated(&cutter, Vector3::new(center[0], center[1], center[2]));
        debug!(face = %selector, ?center, diameter, depth, "cutting hole");

        let cutter = self.store_solid(cutter);
        let result = self.boolean_subtract(solid, &cutter);
        self.solids.remove(&cutter.id());
        result
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        let mesh = tessellation::tessellate_solid(truck_solid, self.boolean_tolerance)?;
        mesh.bounds().ok_or_else(|| KernelError::TessellationFailed {
            reason: "empty mesh has no bounds".to_string(),
        })
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        tessellation::tessellate_solid(truck_solid, tolerance)
    }

    fn export_step(&mut self, solid: &KernelSolidHandle) -> Result<String, KernelError> {
        let compressed = self.get_solid(solid)?.compress();
        let step = out::CompleteStepDisplay::new(
            out::StepModel::from(&compressed),
            out::StepHeaderDescriptor {
                organization_system: env!("CARGO_PKG_NAME").to_owned(),
                ..Default::default()
            },
        )
        .to_string();
        if step.is_empty() {
            return Err(KernelError::ExportFailed {
                reason: "STEP writer produced no output".to_string(),
            });
        }
        Ok(step)
    }

    fn release(&mut self, solid: &KernelSolidHandle) {
        self.solids.remove(&solid.id());
    }
}
