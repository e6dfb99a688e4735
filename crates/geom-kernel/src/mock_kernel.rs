//! MockKernel: deterministic test double implementing Kernel.
//!
//! Tracks each solid as an axis-aligned envelope plus the holes drilled into
//! it, and records every call so tests can assert on the exact sequence a
//! builder issued. Failures can be injected per operation.

use std::collections::HashMap;

use crate::traits::Kernel;
use crate::types::*;

/// One recorded kernel call.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelCall {
    MakeBox {
        size: [f64; 3],
    },
    MakeWedge {
        depth: f64,
        base_width: f64,
        tip_width: f64,
        height: f64,
    },
    MakeLoft {
        length: f64,
        start: Section,
        end: Section,
    },
    MakeCylinder {
        radius: f64,
        height: f64,
    },
    Translate {
        offset: [f64; 3],
    },
    Rotate {
        axis: Axis,
        degrees: f64,
    },
    Union,
    Subtract,
    SelectFace {
        selector: FaceSelector,
    },
    CutHole {
        face: FaceSelector,
        offset: [f64; 2],
        diameter: f64,
        depth: f64,
    },
    Tessellate {
        tolerance: f64,
    },
    ExportStep,
}

impl KernelCall {
    pub fn op(&self) -> MockOp {
        match self {
            KernelCall::MakeBox { .. }
            | KernelCall::MakeWedge { .. }
            | KernelCall::MakeLoft { .. }
            | KernelCall::MakeCylinder { .. } => MockOp::Primitive,
            KernelCall::Translate { .. } | KernelCall::Rotate { .. } => MockOp::Transform,
            KernelCall::Union => MockOp::Union,
            KernelCall::Subtract => MockOp::Subtract,
            KernelCall::SelectFace { .. } => MockOp::SelectFace,
            KernelCall::CutHole { .. } => MockOp::CutHole,
            KernelCall::Tessellate { .. } => MockOp::Tessellate,
            KernelCall::ExportStep => MockOp::ExportStep,
        }
    }
}

/// Coarse operation class, used for counting calls and injecting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Primitive,
    Transform,
    Union,
    Subtract,
    SelectFace,
    CutHole,
    Tessellate,
    ExportStep,
}

/// A hole recorded on a mock solid.
#[derive(Debug, Clone, PartialEq)]
pub struct MockHole {
    pub face: FaceSelector,
    /// Centre of the hole mouth on the face.
    pub center: [f64; 3],
    pub diameter: f64,
    pub depth: f64,
}

#[derive(Debug, Clone)]
struct MockSolid {
    envelope: BoundingBox,
    holes: Vec<MockHole>,
}

/// Envelope-tracking kernel for tests: no real geometry, every call logged.
#[derive(Default)]
pub struct MockKernel {
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    calls: Vec<KernelCall>,
    fail_on: Option<MockOp>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kernel that fails every call of the given operation class.
    pub fn failing_on(op: MockOp) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::new()
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[KernelCall] {
        &self.calls
    }

    /// Solids currently held; released ones are gone.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    pub fn count(&self, op: MockOp) -> usize {
        self.calls.iter().filter(|c| c.op() == op).count()
    }

    /// Holes drilled into the given solid, including those inherited through booleans.
    pub fn holes(&self, solid: &KernelSolidHandle) -> Vec<MockHole> {
        self.solids
            .get(&solid.id())
            .map(|s| s.holes.clone())
            .unwrap_or_default()
    }

    fn record(&mut self, call: KernelCall) -> Result<(), KernelError> {
        let op = call.op();
        self.calls.push(call);
        if self.fail_on == Some(op) {
            return Err(match op {
                MockOp::Union | MockOp::Subtract | MockOp::CutHole => KernelError::BooleanFailed {
                    reason: format!("injected {op:?} failure"),
                },
                MockOp::SelectFace => KernelError::FaceSelectionFailed {
                    reason: "injected failure".to_string(),
                },
                MockOp::Tessellate => KernelError::TessellationFailed {
                    reason: "injected failure".to_string(),
                },
                MockOp::ExportStep => KernelError::ExportFailed {
                    reason: "injected failure".to_string(),
                },
                MockOp::Primitive | MockOp::Transform => KernelError::ConstructionFailed {
                    reason: format!("injected {op:?} failure"),
                },
            });
        }
        Ok(())
    }

    fn store(&mut self, solid: MockSolid) -> KernelSolidHandle {
        self.next_handle += 1;
        let h = KernelSolidHandle(self.next_handle);
        self.solids.insert(h.id(), solid);
        h
    }

    fn get(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::SolidNotFound {
                handle: handle.clone(),
            })
    }

    fn primitive(
        &mut self,
        call: KernelCall,
        envelope: BoundingBox,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(call)?;
        Ok(self.store(MockSolid {
            envelope,
            holes: Vec::new(),
        }))
    }
}

fn check_positive(what: &str, values: &[f64]) -> Result<(), KernelError> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(KernelError::ConstructionFailed {
            reason: format!("{what} dimensions must be positive: {values:?}"),
        })
    }
}

impl Kernel for MockKernel {
    fn make_box(&mut self, size: [f64; 3]) -> Result<KernelSolidHandle, KernelError> {
        check_positive("box", &size)?;
        self.primitive(KernelCall::MakeBox { size }, BoundingBox::centered(size))
    }

    fn make_wedge(
        &mut self,
        depth: f64,
        base_width: f64,
        tip_width: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("wedge", &[depth, base_width, tip_width, height])?;
        self.primitive(
            KernelCall::MakeWedge {
                depth,
                base_width,
                tip_width,
                height,
            },
            BoundingBox::centered([depth, base_width.max(tip_width), height]),
        )
    }

    fn make_loft(
        &mut self,
        length: f64,
        start: Section,
        end: Section,
    ) -> Result<KernelSolidHandle, KernelError> {
        if !start.same_kind(&end) {
            return Err(KernelError::ConstructionFailed {
                reason: "loft sections must both be rectangles or both circles".to_string(),
            });
        }
        let (sy, sz) = start.half_extents();
        let (ey, ez) = end.half_extents();
        check_positive("loft", &[length, sy, sz, ey, ez])?;
        self.primitive(
            KernelCall::MakeLoft { length, start, end },
            BoundingBox::centered([length, 2.0 * sy.max(ey), 2.0 * sz.max(ez)]),
        )
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("cylinder", &[radius, height])?;
        self.primitive(
            KernelCall::MakeCylinder { radius, height },
            BoundingBox::centered([2.0 * radius, 2.0 * radius, height]),
        )
    }

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(KernelCall::Translate { offset })?;
        let src = self.get(solid)?;
        let moved = MockSolid {
            envelope: src.envelope.translated(offset),
            holes: src
                .holes
                .iter()
                .map(|h| MockHole {
                    center: [
                        h.center[0] + offset[0],
                        h.center[1] + offset[1],
                        h.center[2] + offset[2],
                    ],
                    ..h.clone()
                })
                .collect(),
        };
        Ok(self.store(moved))
    }

    fn rotate(
        &mut self,
        solid: &KernelSolidHandle,
        axis: Axis,
        degrees: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(KernelCall::Rotate { axis, degrees })?;
        let src = self.get(solid)?;
        let turned = MockSolid {
            envelope: src.envelope.rotated(axis, degrees),
            holes: src
                .holes
                .iter()
                .map(|h| MockHole {
                    center: rotate_point(h.center, axis, degrees),
                    ..h.clone()
                })
                .collect(),
        };
        Ok(self.store(turned))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(KernelCall::Union)?;
        let (sa, sb) = (self.get(a)?, self.get(b)?);
        let mut holes = sa.holes.clone();
        holes.extend(sb.holes.iter().cloned());
        let merged = MockSolid {
            envelope: sa.envelope.union(&sb.envelope),
            holes,
        };
        Ok(self.store(merged))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(KernelCall::Subtract)?;
        self.get(b)?;
        let kept = self.get(a)?.clone();
        Ok(self.store(kept))
    }

    fn select_face(
        &mut self,
        solid: &KernelSolidHandle,
        selector: FaceSelector,
    ) -> Result<FacePlane, KernelError> {
        self.record(KernelCall::SelectFace { selector })?;
        let env = self.get(solid)?.envelope;
        let i = selector.axis.index();
        Ok(FacePlane {
            selector,
            coordinate: if selector.positive { env.max[i] } else { env.min[i] },
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
        self.record(KernelCall::CutHole {
            face: face.selector,
            offset,
            diameter,
            depth,
        })?;
        check_positive("hole", &[diameter, depth])?;
        let mut drilled = self.get(solid)?.clone();
        drilled.holes.push(MockHole {
            face: face.selector,
            center: face.point_at(offset),
            diameter,
            depth,
        });
        Ok(self.store(drilled))
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError> {
        Ok(self.get(solid)?.envelope)
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        self.record(KernelCall::Tessellate { tolerance })?;
        Ok(envelope_mesh(&self.get(solid)?.envelope))
    }

    fn export_step(&mut self, solid: &KernelSolidHandle) -> Result<String, KernelError> {
        self.record(KernelCall::ExportStep)?;
        let env = self.get(solid)?.envelope;
        Ok(format!(
            "ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION(('mock solid'),'2;1');\nENDSEC;\nDATA;\n\
             #1=CARTESIAN_POINT('min',({:.3},{:.3},{:.3}));\n\
             #2=CARTESIAN_POINT('max',({:.3},{:.3},{:.3}));\nENDSEC;\nEND-ISO-10303-21;\n",
            env.min[0], env.min[1], env.min[2], env.max[0], env.max[1], env.max[2]
        ))
    }

    fn release(&mut self, solid: &KernelSolidHandle) {
        self.solids.remove(&solid.id());
    }
}

/// Twelve-triangle mesh of a box, wound outward.
fn envelope_mesh(bb: &BoundingBox) -> RenderMesh {
    let corners = bb.corners();
    // Quads as corner indices, counter-clockwise seen from outside.
    let quads: [([usize; 4], [f32; 3]); 6] = [
        ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
        ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
        ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
        ([2, 3, 7, 6], [0.0, 1.0, 0.0]),
        ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
        ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
    ];

    let mut mesh = RenderMesh::default();
    for (quad, normal) in quads {
        let base = (mesh.vertices.len() / 3) as u32;
        for &c in &quad {
            mesh.vertices.extend(corners[c].iter().map(|&x| x as f32));
            mesh.normals.extend_from_slice(&normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}
