//! Kernel-independent construction plans.
//!
//! A [`BuildPlan`] is a seed shape followed by an ordered list of boolean
//! steps. Plans are plain data: they can be compared, serialized and checked
//! for geometric properties without touching a kernel.

use connector_types::{Stage, Topology};
use geom_kernel::{Axis, BoundingBox, FaceSelector, Section};
use serde::{Deserialize, Serialize};

/// A primitive solid, centred on the origin before transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        size: [f64; 3],
    },
    /// Trapezoidal prism along +X, widening from `base_width` to `tip_width`.
    Wedge {
        depth: f64,
        base_width: f64,
        tip_width: f64,
        height: f64,
    },
    /// Loft along +X from `start` to `end`.
    Loft {
        length: f64,
        start: Section,
        end: Section,
    },
    Cylinder {
        radius: f64,
        height: f64,
    },
}

impl Primitive {
    /// Untransformed bounding box.
    pub fn envelope(&self) -> BoundingBox {
        match *self {
            Primitive::Box { size } => BoundingBox::centered(size),
            Primitive::Wedge {
                depth,
                base_width,
                tip_width,
                height,
            } => BoundingBox::centered([depth, base_width.max(tip_width), height]),
            Primitive::Loft { length, start, end } => {
                let (sy, sz) = start.half_extents();
                let (ey, ez) = end.half_extents();
                BoundingBox::centered([length, 2.0 * sy.max(ey), 2.0 * sz.max(ez)])
            }
            Primitive::Cylinder { radius, height } => {
                BoundingBox::centered([2.0 * radius, 2.0 * radius, height])
            }
        }
    }
}

/// Rigid transform applied to a primitive, in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// Rotation about a coordinate axis through the origin, in degrees.
    Rotate { axis: Axis, degrees: f64 },
    Translate { offset: [f64; 3] },
}

/// A primitive plus the transforms that place it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub primitive: Primitive,
    pub transforms: Vec<Transform>,
}

impl ShapeSpec {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            transforms: Vec::new(),
        }
    }

    pub fn cuboid(size: [f64; 3]) -> Self {
        Self::new(Primitive::Box { size })
    }

    pub fn wedge(depth: f64, base_width: f64, tip_width: f64, height: f64) -> Self {
        Self::new(Primitive::Wedge {
            depth,
            base_width,
            tip_width,
            height,
        })
    }

    pub fn loft(length: f64, start: Section, end: Section) -> Self {
        Self::new(Primitive::Loft { length, start, end })
    }

    pub fn turned(mut self, axis: Axis, degrees: f64) -> Self {
        self.transforms.push(Transform::Rotate { axis, degrees });
        self
    }

    pub fn at(mut self, offset: [f64; 3]) -> Self {
        self.transforms.push(Transform::Translate { offset });
        self
    }

    /// Bounding box after all transforms.
    pub fn envelope(&self) -> BoundingBox {
        self.transforms
            .iter()
            .fold(self.primitive.envelope(), |bb, t| match *t {
                Transform::Rotate { axis, degrees } => bb.rotated(axis, degrees),
                Transform::Translate { offset } => bb.translated(offset),
            })
    }
}

/// A blind cylindrical hole drilled into the outermost face in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub face: FaceSelector,
    /// Centre in the face's in-plane axes, global coordinates.
    pub offset: [f64; 2],
    pub diameter: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Union { shape: ShapeSpec },
    Subtract { shape: ShapeSpec },
    Hole { hole: HoleSpec },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedStep {
    pub stage: Stage,
    pub label: String,
    pub step: Step,
}

impl PlannedStep {
    pub fn union(stage: Stage, label: impl Into<String>, shape: ShapeSpec) -> Self {
        Self {
            stage,
            label: label.into(),
            step: Step::Union { shape },
        }
    }

    pub fn subtract(stage: Stage, label: impl Into<String>, shape: ShapeSpec) -> Self {
        Self {
            stage,
            label: label.into(),
            step: Step::Subtract { shape },
        }
    }

    pub fn hole(label: impl Into<String>, hole: HoleSpec) -> Self {
        Self {
            stage: Stage::Hole,
            label: label.into(),
            step: Step::Hole { hole },
        }
    }

    /// The tool shape of a union or subtract step.
    pub fn shape(&self) -> Option<&ShapeSpec> {
        match &self.step {
            Step::Union { shape } | Step::Subtract { shape } => Some(shape),
            Step::Hole { .. } => None,
        }
    }
}

/// Seed shape plus the ordered steps that turn it into a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub topology: Topology,
    pub seed: ShapeSpec,
    pub steps: Vec<PlannedStep>,
}

impl BuildPlan {
    pub fn new(topology: Topology, seed: ShapeSpec) -> Self {
        Self {
            topology,
            seed,
            steps: Vec::new(),
        }
    }

    pub fn then(mut self, step: PlannedStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn extended(mut self, steps: impl IntoIterator<Item = PlannedStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn steps_in(&self, stage: Stage) -> impl Iterator<Item = &PlannedStep> {
        self.steps.iter().filter(move |s| s.stage == stage)
    }

    pub fn holes(&self) -> impl Iterator<Item = &HoleSpec> {
        self.steps.iter().filter_map(|s| match &s.step {
            Step::Hole { hole } => Some(hole),
            _ => None,
        })
    }

    /// Copies of every slot and taper cut made so far, in order.
    ///
    /// Appending these after a union restores the channels the union filled.
    pub fn channel_recuts(&self) -> Vec<PlannedStep> {
        self.steps
            .iter()
            .filter(|s| matches!(s.stage, Stage::SlotCut | Stage::Taper))
            .filter(|s| matches!(s.step, Step::Subtract { .. }))
            .map(|s| PlannedStep {
                stage: s.stage,
                label: format!("reopen {}", s.label),
                step: s.step.clone(),
            })
            .collect()
    }

    /// Envelope of everything unioned into the body.
    pub fn body_envelope(&self) -> BoundingBox {
        self.steps
            .iter()
            .filter_map(|s| match &s.step {
                Step::Union { shape } => Some(shape.envelope()),
                _ => None,
            })
            .fold(self.seed.envelope(), |acc, bb| acc.union(&bb))
    }

    /// Number of kernel calls executing this plan will make.
    pub fn kernel_call_count(&self) -> usize {
        fn shape_calls(shape: &ShapeSpec) -> usize {
            1 + shape.transforms.len()
        }
        shape_calls(&self.seed)
            + self
                .steps
                .iter()
                .map(|s| match &s.step {
                    Step::Union { shape } | Step::Subtract { shape } => shape_calls(shape) + 1,
                    Step::Hole { .. } => 2,
                })
                .sum::<usize>()
    }
}
