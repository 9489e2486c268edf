//! Frozen constraint system.

use std::collections::HashMap;
use std::ops::Range;

use mb_core::{ConstraintId, MarkerId, Tolerances, Units};
use mb_joints::JointConstraint;
use mb_joints::jacobian::TWIST_DIM;
use nalgebra::{DMatrix, DVector, Isometry3};

use crate::error::{SystemError, SystemResult};
use crate::marker::{Marker, to_working_frame};

/// A validated set of markers and constraints.
///
/// Constraint order is registration order and is stable for the lifetime of
/// the system: residual rows are laid out in that order.
#[derive(Debug)]
pub struct System {
    pub(crate) units: Units,
    pub(crate) markers: Vec<Marker>,
    pub(crate) marker_names: HashMap<String, MarkerId>,
    pub(crate) constraints: Vec<Box<dyn JointConstraint>>,
}

impl System {
    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker_id(&self, name: &str) -> Option<MarkerId> {
        self.marker_names.get(name).copied()
    }

    pub fn marker(&self, id: MarkerId) -> SystemResult<&Marker> {
        self.markers
            .get(id.slot())
            .ok_or(SystemError::MarkerNotFound { id })
    }

    /// Constraints in registration order.
    pub fn constraints(
        &self,
    ) -> impl Iterator<Item = (ConstraintId, &(dyn JointConstraint + 'static))> + '_ {
        self.constraints
            .iter()
            .enumerate()
            .map(|(slot, c)| (ConstraintId::from_index(slot as u32), &**c))
    }

    pub fn constraint(&self, id: ConstraintId) -> SystemResult<&(dyn JointConstraint + 'static)> {
        self.constraints
            .get(id.slot())
            .map(|c| &**c)
            .ok_or(SystemError::UnknownConstraint { id })
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Total number of scalar equations.
    pub fn equation_count(&self) -> usize {
        self.constraints.iter().map(|c| c.equation_count()).sum()
    }

    /// Row range of each constraint within the stacked residual vector.
    pub fn equation_ranges(&self) -> Vec<Range<usize>> {
        let mut offset = 0;
        self.constraints
            .iter()
            .map(|c| {
                let start = offset;
                offset += c.equation_count();
                start..offset
            })
            .collect()
    }

    /// Stacked residuals of every constraint.
    pub fn residuals(&self) -> SystemResult<DVector<f64>> {
        let mut out = Vec::with_capacity(self.equation_count());
        for constraint in &self.constraints {
            out.extend(constraint.residuals()?);
        }
        Ok(DVector::from_vec(out))
    }

    /// Stacked derivative rows, `equation_count() x 6`.
    ///
    /// Each constraint's rows are taken with respect to a twist of its own J
    /// frame, so rows of different constraints share columns by position only.
    pub fn jacobian(&self) -> SystemResult<DMatrix<f64>> {
        let mut jac = DMatrix::zeros(self.equation_count(), TWIST_DIM);
        for (constraint, rows) in self.constraints.iter().zip(self.equation_ranges()) {
            let block = constraint.jacobian()?;
            jac.rows_mut(rows.start, rows.len()).copy_from(&block);
        }
        Ok(jac)
    }

    /// True when every residual is zero within tolerance.
    pub fn is_satisfied(&self, tol: Tolerances) -> SystemResult<bool> {
        let r = self.residuals()?;
        Ok(tol.all_satisfied(r.iter()))
    }

    /// Move a marker to a new frame in model units.
    ///
    /// Returns the number of constraints attached to the marker. Coupling
    /// joints follow the move, so large rotations should be applied in steps
    /// of less than half a turn.
    pub fn set_marker_frame(&mut self, id: MarkerId, frame: Isometry3<f64>) -> SystemResult<usize> {
        let marker = self
            .markers
            .get_mut(id.slot())
            .ok_or(SystemError::MarkerNotFound { id })?;
        marker.frame = frame;

        let working = to_working_frame(&self.units, &frame);
        let mut touched = 0;
        for constraint in &mut self.constraints {
            if constraint.move_marker(id, working)? {
                touched += 1;
            }
        }
        tracing::trace!(marker = %id, touched, "marker moved");
        Ok(touched)
    }
}
