//! Drives descriptors into a runtime system.

use mb_core::{ConstraintId, MarkerId, Units};
use mb_system::{System, SystemBuilder};

use crate::descriptor::JointDescriptor;
use crate::error::{ModelError, ModelResult};
use crate::marker::MarkerDescriptor;

/// Collects markers and joints for one system.
///
/// The units context is fixed at construction and shared with every joint
/// as it is materialized.
#[derive(Debug)]
pub struct Assembler {
    units: Units,
    builder: SystemBuilder,
}

impl Assembler {
    pub fn new(units: Units) -> Self {
        Self {
            units,
            builder: SystemBuilder::new(),
        }
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn builder(&self) -> &SystemBuilder {
        &self.builder
    }

    pub fn add_marker(&mut self, marker: &MarkerDescriptor) -> ModelResult<MarkerId> {
        let frame = marker.frame()?;
        Ok(self.builder.add_marker(marker.name.clone(), frame)?)
    }

    /// Materialize `joint` into the system under construction.
    pub fn add_joint(&mut self, joint: &mut JointDescriptor) -> ModelResult<ConstraintId> {
        joint
            .materialize(&mut self.builder, &self.units)
            .map_err(|source| ModelError::Materialize {
                name: joint.name().to_string(),
                source: Box::new(source),
            })
    }

    pub fn finish(self) -> ModelResult<System> {
        let system = self.builder.build(self.units)?;
        tracing::info!(
            markers = system.markers().len(),
            joints = system.len(),
            equations = system.equation_count(),
            "system assembled"
        );
        Ok(system)
    }
}
