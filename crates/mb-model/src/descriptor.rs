//! Persisted joint configuration and its parse/materialize/store protocol.
//!
//! A joint block is read in two phases: the fields every joint shares
//! (`Name`, `MarkerI`, `MarkerJ`), then the kind-specific parameters. Each
//! kind-specific parameter is optional; when its keyword is absent the value
//! is `0.0` and no line is consumed.

use mb_asmt::{AsmtResult, AsmtWriter, LineCursor};
use mb_core::{ConstraintId, Units};
use mb_joints::{
    Attachment, DistanceJoint, GearJoint, JointConstraint, JointError, JointKind, JointResult,
    RackPinJoint, ScrewJoint,
};
use mb_system::{SystemBuilder, to_working_frame};

use crate::error::{ModelError, ModelResult};
use crate::factory;

/// Fields shared by every joint kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointCommon {
    pub name: String,
    /// Path of marker I.
    pub marker_i: String,
    /// Path of marker J.
    pub marker_j: String,
    runtime: Option<ConstraintId>,
}

impl JointCommon {
    pub fn new(
        name: impl Into<String>,
        marker_i: impl Into<String>,
        marker_j: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            marker_i: marker_i.into(),
            marker_j: marker_j.into(),
            runtime: None,
        }
    }

    /// Reads `Name`, `MarkerI`, `MarkerJ`, each a keyword line plus a value line.
    pub fn parse(&mut self, cursor: &mut LineCursor<'_>) -> AsmtResult<usize> {
        let start = cursor.checkpoint();
        match Self::read_fields(cursor) {
            Ok((name, marker_i, marker_j)) => {
                self.name = name;
                self.marker_i = marker_i;
                self.marker_j = marker_j;
                Ok(cursor.consumed_since(start))
            }
            Err(e) => {
                cursor.rewind(start);
                Err(e)
            }
        }
    }

    fn read_fields(cursor: &mut LineCursor<'_>) -> AsmtResult<(String, String, String)> {
        let name = cursor.read_keyword_string("Name")?;
        let marker_i = cursor.read_keyword_string("MarkerI")?;
        let marker_j = cursor.read_keyword_string("MarkerJ")?;
        Ok((name, marker_i, marker_j))
    }

    pub fn store(&self, writer: &mut AsmtWriter, level: usize) {
        writer.store_keyword_string(level, "Name", &self.name);
        writer.store_keyword_string(level, "MarkerI", &self.marker_i);
        writer.store_keyword_string(level, "MarkerJ", &self.marker_j);
    }
}

/// Kind-specific parameters, one variant per joint kind.
///
/// Values are raw numbers in the model's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointParams {
    Fixed,
    Revolute,
    Cylindrical,
    Translational,
    Spherical,
    Planar,
    PointInLine,
    PointInPlane,
    RackPinion { pitch_radius: f64 },
    Gear { radius_i: f64, radius_j: f64 },
    Screw { pitch: f64 },
    SphSph { distance: f64 },
    CylSph { distance: f64 },
}

impl JointParams {
    /// Parameters for `kind` with every scalar at `0.0`.
    pub fn empty(kind: JointKind) -> Self {
        match kind {
            JointKind::Fixed => JointParams::Fixed,
            JointKind::Revolute => JointParams::Revolute,
            JointKind::Cylindrical => JointParams::Cylindrical,
            JointKind::Translational => JointParams::Translational,
            JointKind::Spherical => JointParams::Spherical,
            JointKind::Planar => JointParams::Planar,
            JointKind::PointInLine => JointParams::PointInLine,
            JointKind::PointInPlane => JointParams::PointInPlane,
            JointKind::RackPinion => JointParams::RackPinion { pitch_radius: 0.0 },
            JointKind::Gear => JointParams::Gear {
                radius_i: 0.0,
                radius_j: 0.0,
            },
            JointKind::Screw => JointParams::Screw { pitch: 0.0 },
            JointKind::SphSph => JointParams::SphSph { distance: 0.0 },
            JointKind::CylSph => JointParams::CylSph { distance: 0.0 },
        }
    }

    pub fn kind(&self) -> JointKind {
        match self {
            JointParams::Fixed => JointKind::Fixed,
            JointParams::Revolute => JointKind::Revolute,
            JointParams::Cylindrical => JointKind::Cylindrical,
            JointParams::Translational => JointKind::Translational,
            JointParams::Spherical => JointKind::Spherical,
            JointParams::Planar => JointKind::Planar,
            JointParams::PointInLine => JointKind::PointInLine,
            JointParams::PointInPlane => JointKind::PointInPlane,
            JointParams::RackPinion { .. } => JointKind::RackPinion,
            JointParams::Gear { .. } => JointKind::Gear,
            JointParams::Screw { .. } => JointKind::Screw,
            JointParams::SphSph { .. } => JointKind::SphSph,
            JointParams::CylSph { .. } => JointKind::CylSph,
        }
    }

    /// Keyword and value of each parameter, in persisted order.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        match *self {
            JointParams::RackPinion { pitch_radius } => vec![("pitchRadius", pitch_radius)],
            JointParams::Gear { radius_i, radius_j } => {
                vec![("radiusI", radius_i), ("radiusJ", radius_j)]
            }
            JointParams::Screw { pitch } => vec![("pitch", pitch)],
            JointParams::SphSph { distance } | JointParams::CylSph { distance } => {
                vec![("distanceIJ", distance)]
            }
            _ => Vec::new(),
        }
    }

    fn fields_mut(&mut self) -> Vec<(&'static str, &mut f64)> {
        match self {
            JointParams::RackPinion { pitch_radius } => vec![("pitchRadius", pitch_radius)],
            JointParams::Gear { radius_i, radius_j } => {
                vec![("radiusI", radius_i), ("radiusJ", radius_j)]
            }
            JointParams::Screw { pitch } => vec![("pitch", pitch)],
            JointParams::SphSph { distance } | JointParams::CylSph { distance } => {
                vec![("distanceIJ", distance)]
            }
            _ => Vec::new(),
        }
    }

    /// Reads each parameter in order. An absent keyword leaves `0.0` and
    /// consumes nothing; a present one consumes the keyword and value lines.
    pub fn parse(&mut self, cursor: &mut LineCursor<'_>) -> AsmtResult<usize> {
        let start = cursor.checkpoint();
        let mut parsed = *self;
        for (keyword, slot) in parsed.fields_mut() {
            match cursor.read_optional_double(keyword) {
                Ok(value) => *slot = value.unwrap_or_default(),
                Err(e) => {
                    cursor.rewind(start);
                    return Err(e);
                }
            }
        }
        *self = parsed;
        Ok(cursor.consumed_since(start))
    }

    /// Writes every parameter, defaulted or not.
    pub fn store(&self, writer: &mut AsmtWriter, level: usize) {
        for (keyword, value) in self.fields() {
            writer.store_keyword_double(level, keyword, value);
        }
    }

    /// Copy the parameters onto a runtime joint of the same kind, as is.
    pub fn apply(&self, runtime: &mut (dyn JointConstraint + 'static)) -> JointResult<()> {
        let found = runtime.kind();
        if found != self.kind() {
            return Err(JointError::KindMismatch {
                expected: self.kind(),
                found,
            });
        }
        match *self {
            JointParams::RackPinion { pitch_radius } => {
                typed::<RackPinJoint>(runtime, found)?.pitch_radius = pitch_radius;
            }
            JointParams::Gear { radius_i, radius_j } => {
                let gear = typed::<GearJoint>(runtime, found)?;
                gear.radius_i = radius_i;
                gear.radius_j = radius_j;
            }
            JointParams::Screw { pitch } => {
                typed::<ScrewJoint>(runtime, found)?.pitch = pitch;
            }
            JointParams::SphSph { distance } | JointParams::CylSph { distance } => {
                typed::<DistanceJoint>(runtime, found)?.distance = distance;
            }
            _ => {}
        }
        Ok(())
    }
}

fn typed<'a, T: JointConstraint + 'static>(
    runtime: &'a mut (dyn JointConstraint + 'static),
    kind: JointKind,
) -> JointResult<&'a mut T> {
    runtime
        .downcast_mut::<T>()
        .ok_or(JointError::KindMismatch {
            expected: kind,
            found: kind,
        })
}

/// A parsed joint block.
#[derive(Debug, Clone, PartialEq)]
pub struct JointDescriptor {
    pub common: JointCommon,
    pub params: JointParams,
}

impl JointDescriptor {
    /// Empty descriptor: blank common fields, parameters at `0.0`.
    pub fn new(kind: JointKind) -> Self {
        Self {
            common: JointCommon::default(),
            params: JointParams::empty(kind),
        }
    }

    pub fn with_common(common: JointCommon, params: JointParams) -> Self {
        Self { common, params }
    }

    pub fn kind(&self) -> JointKind {
        self.params.kind()
    }

    pub fn tag(&self) -> &'static str {
        factory::tag_of(self.kind())
    }

    pub fn name(&self) -> &str {
        &self.common.name
    }

    /// Arena slot of the runtime joint, once materialized.
    pub fn runtime(&self) -> Option<ConstraintId> {
        self.common.runtime
    }

    /// Forget the runtime joint so the descriptor can be materialized again
    /// into a different system.
    pub fn detach(&mut self) {
        self.common.runtime = None;
    }

    /// Reads the block body (the tag line is already consumed).
    ///
    /// Returns the number of lines consumed. On error the cursor is back where
    /// the body started and the descriptor is unchanged.
    pub fn parse(&mut self, cursor: &mut LineCursor<'_>) -> AsmtResult<usize> {
        let start = cursor.checkpoint();
        let mut common = self.common.clone();
        let mut params = self.params;
        let read = common
            .parse(cursor)
            .and_then(|_| params.parse(cursor));
        if let Err(e) = read {
            cursor.rewind(start);
            return Err(e);
        }
        self.common.name = common.name;
        self.common.marker_i = common.marker_i;
        self.common.marker_j = common.marker_j;
        self.params = params;
        Ok(cursor.consumed_since(start))
    }

    pub fn instantiate_runtime(&self) -> Box<dyn JointConstraint> {
        factory::instantiate_runtime(self.kind())
    }

    /// Build the runtime joint and register it with `builder`.
    ///
    /// Marker frames are resolved by path and converted to SI through `units`.
    /// Kind-specific parameters are copied without conversion.
    pub fn materialize(
        &mut self,
        builder: &mut SystemBuilder,
        units: &Units,
    ) -> ModelResult<ConstraintId> {
        if self.common.marker_i.is_empty() || self.common.marker_j.is_empty() {
            return Err(ModelError::Structural {
                what: format!("{} '{}' has no marker references", self.tag(), self.name()),
            });
        }
        if let Some(id) = self.common.runtime {
            return Err(ModelError::Structural {
                what: format!("joint '{}' is already materialized as {id}", self.name()),
            });
        }

        let id = self.materialize_base(builder, units)?;
        self.materialize_params(builder, units, id)?;
        tracing::debug!(joint = %self.name(), kind = %self.kind(), constraint = %id, "materialized");
        Ok(id)
    }

    fn materialize_base(
        &mut self,
        builder: &mut SystemBuilder,
        units: &Units,
    ) -> ModelResult<ConstraintId> {
        let marker_i = builder.resolve_marker(&self.common.marker_i)?;
        let marker_j = builder.resolve_marker(&self.common.marker_j)?;
        let attachment = Attachment {
            marker_i: marker_i.id,
            marker_j: marker_j.id,
            frame_i: to_working_frame(units, &marker_i.frame),
            frame_j: to_working_frame(units, &marker_j.frame),
        };

        let mut runtime = self.instantiate_runtime();
        runtime.base_mut().attach(self.common.name.clone(), attachment);
        let id = builder.add_constraint(runtime);
        self.common.runtime = Some(id);
        Ok(id)
    }

    fn materialize_params(
        &self,
        builder: &mut SystemBuilder,
        units: &Units,
        id: ConstraintId,
    ) -> ModelResult<()> {
        let fields = self.params.fields();
        if !fields.is_empty() && !units.is_si_length() {
            let [_, _, length, _] = units.scale_factors();
            tracing::warn!(
                joint = %self.name(),
                length_unit_m = length,
                "kind-specific parameters copied without unit conversion"
            );
        }
        self.params.apply(builder.constraint_mut(id)?)?;
        Ok(())
    }

    /// Writes the block: tag at `level`, each field keyword at `level + 1`
    /// with its value at `level + 2`.
    pub fn store(&self, writer: &mut AsmtWriter, level: usize) {
        writer.store_string(level, self.tag());
        self.common.store(writer, level + 1);
        self.params.store(writer, level + 1);
    }
}
