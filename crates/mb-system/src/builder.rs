//! Incremental system builder.

use std::collections::HashMap;

use mb_core::{ConstraintId, MarkerId, Units};
use mb_joints::JointConstraint;
use nalgebra::Isometry3;

use crate::error::{SystemError, SystemResult};
use crate::marker::Marker;
use crate::system::System;

/// Builder for a constraint system.
///
/// Markers and constraints are registered in order. Call `build()` to check
/// every constraint is attached and freeze the result into a `System`.
#[derive(Debug, Default)]
pub struct SystemBuilder {
    markers: Vec<Marker>,
    marker_names: HashMap<String, MarkerId>,
    constraints: Vec<Box<dyn JointConstraint>>,
}

impl SystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a marker frame, given in model units.
    pub fn add_marker(
        &mut self,
        name: impl Into<String>,
        frame: Isometry3<f64>,
    ) -> SystemResult<MarkerId> {
        let name = name.into();
        if self.marker_names.contains_key(&name) {
            return Err(SystemError::DuplicateMarker { name });
        }
        let id = MarkerId::from_index(self.markers.len() as u32);
        self.marker_names.insert(name.clone(), id);
        self.markers.push(Marker { id, name, frame });
        Ok(id)
    }

    pub fn marker_id(&self, name: &str) -> Option<MarkerId> {
        self.marker_names.get(name).copied()
    }

    pub fn marker(&self, id: MarkerId) -> SystemResult<&Marker> {
        self.markers
            .get(id.slot())
            .ok_or(SystemError::MarkerNotFound { id })
    }

    /// Look a marker up by name.
    pub fn resolve_marker(&self, name: &str) -> SystemResult<&Marker> {
        let id = self
            .marker_id(name)
            .ok_or_else(|| SystemError::UnknownMarker {
                name: name.to_string(),
            })?;
        self.marker(id)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Register a constraint. Constraints are evaluated in registration order.
    pub fn add_constraint(&mut self, constraint: Box<dyn JointConstraint>) -> ConstraintId {
        let id = ConstraintId::from_index(self.constraints.len() as u32);
        self.constraints.push(constraint);
        id
    }

    pub fn constraint(&self, id: ConstraintId) -> SystemResult<&(dyn JointConstraint + 'static)> {
        self.constraints
            .get(id.slot())
            .map(|c| &**c)
            .ok_or(SystemError::UnknownConstraint { id })
    }

    pub fn constraint_mut(
        &mut self,
        id: ConstraintId,
    ) -> SystemResult<&mut (dyn JointConstraint + 'static)> {
        self.constraints
            .get_mut(id.slot())
            .map(|c| &mut **c)
            .ok_or(SystemError::UnknownConstraint { id })
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Validate and freeze the system.
    ///
    /// Every constraint must be attached. Each is initialized at the current
    /// marker pose, which is where couplers capture their reference value.
    pub fn build(self, units: Units) -> SystemResult<System> {
        let mut constraints = self.constraints;
        for (slot, constraint) in constraints.iter_mut().enumerate() {
            let id = ConstraintId::from_index(slot as u32);
            if !constraint.base().is_attached() {
                return Err(SystemError::Unattached {
                    id,
                    name: constraint.name().to_string(),
                });
            }
            constraint.initialize()?;
        }

        tracing::debug!(
            markers = self.markers.len(),
            constraints = constraints.len(),
            "system built"
        );

        Ok(System {
            units,
            markers: self.markers,
            marker_names: self.marker_names,
            constraints,
        })
    }
}
