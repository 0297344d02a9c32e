/*
    podyn, force models for precise orbit determination
    Copyright (C) 2026 podyn contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::{SatId, SatStateMap, SatVectorMap};
use crate::linalg::{DMatrix, Matrix3, Matrix3xX, Vector3};
use crate::time::Epoch;
use snafu::Snafu;

use std::fmt;

/// Per-satellite storage of accelerations and partial derivatives.
pub mod results;
pub use self::results::*;

/// Assembly of the coefficient matrix of the equations of variation.
pub mod eov;

/// Post-Newtonian correction of the central body attraction.
pub mod relativity;
pub use self::relativity::*;

/// Empirical accelerations in the radial, transverse and normal frame.
pub mod empirical;
pub use self::empirical::*;

/// Newtonian attraction of the central body.
pub mod point_mass;
pub use self::point_mass::*;

/// Sums several force models into a single one.
pub mod composite;
pub use self::composite::*;

/// Equations of motion and of variation handed to an integrator.
pub mod eom;
pub use self::eom::*;

/// A force model computes, for every satellite of a constellation, its perturbing acceleration and
/// the partials of that acceleration with respect to position, velocity and dynamic parameters.
///
/// A call to `compute` overwrites the results of every satellite it is given, and the accessors
/// return these results until the next call. Satellites which were computed before but are absent
/// from a later call keep their previous (stale) results: call `compute` before reading any
/// accessor for the current epoch.
///
/// A satellite which was never computed is reported as [`DynamicsError::SatNotFound`], never
/// defaulted to zero, because a silent zero would corrupt the variational equations.
pub trait ForceModel: Send + Sync + fmt::Display {
    /// Computes the acceleration and its partials for each satellite in `states` at `epoch`.
    ///
    /// Either every satellite is stored, or none is and the error is returned.
    fn compute(&mut self, epoch: Epoch, states: &SatStateMap) -> Result<(), DynamicsError>;

    /// Results of the latest computation of each satellite.
    fn results(&self) -> &ForceResults;

    /// Number of dynamic parameters of this model, i.e. the number of columns of `da_dp`.
    fn num_params(&self) -> usize;

    /// Hands the parameters of `family` estimated at the previous step to a model whose force is
    /// time correlated. Must be called once per integration step, before `compute`.
    ///
    /// Models without such a state ignore this call.
    fn set_previous_params(&mut self, _family: ParamFamily, _epoch: Epoch, _params: &SatVectorMap) {
    }

    /// Acceleration, in m/s^2
    fn acceleration(&self, sat: &SatId) -> Result<Vector3<f64>, DynamicsError> {
        self.results().acceleration(sat)
    }

    /// Partials of the acceleration with respect to position
    fn da_dr(&self, sat: &SatId) -> Result<Matrix3<f64>, DynamicsError> {
        self.results().da_dr(sat)
    }

    /// Partials of the acceleration with respect to velocity
    fn da_dv(&self, sat: &SatId) -> Result<Matrix3<f64>, DynamicsError> {
        self.results().da_dv(sat)
    }

    /// Partials of the acceleration with respect to all the dynamic parameters, 3 x N
    fn da_dp(&self, sat: &SatId) -> Result<Matrix3xX<f64>, DynamicsError> {
        self.results().da_dp(sat)
    }

    /// Partials of the acceleration with respect to the parameters of one family only
    fn da_dparam(&self, sat: &SatId, family: ParamFamily) -> Result<Matrix3xX<f64>, DynamicsError> {
        self.results().da_dparam(sat, family)
    }

    /// Coefficient matrix of the equations of variation of this satellite, (6+N) x (6+N).
    ///
    /// ```text
    ///          | 0      I      0     |
    /// cmat  =  | da/dr  da/dv  da/dp |
    ///          | 0      0      0     |
    /// ```
    fn coeff_mat_of_eov(&self, sat: &SatId) -> Result<DMatrix<f64>, DynamicsError> {
        let da_dr = self.da_dr(sat)?;
        let da_dv = self.da_dv(sat)?;
        let da_dp = self.da_dp(sat)?;
        Ok(eov::coeff_mat_of_eov(&da_dr, &da_dv, &da_dp))
    }
}

/// Families of dynamic parameters, each with its own partials map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamFamily {
    /// Gravity field coefficients
    Gravity,
    /// Solar radiation pressure coefficients
    SolarPressure,
    /// Empirical accelerations
    Empirical,
    /// Post-Newtonian parameters
    Relativity,
}

impl fmt::Display for ParamFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gravity => write!(f, "gravity"),
            Self::SolarPressure => write!(f, "solar pressure"),
            Self::Empirical => write!(f, "empirical"),
            Self::Relativity => write!(f, "relativity"),
        }
    }
}

/// What was looked up when a satellite could not be found.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartialKind {
    Acceleration,
    Position,
    Velocity,
    Parameters,
    Family(ParamFamily),
}

impl fmt::Display for PartialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acceleration => write!(f, "acceleration"),
            Self::Position => write!(f, "position partials"),
            Self::Velocity => write!(f, "velocity partials"),
            Self::Parameters => write!(f, "parameter partials"),
            Self::Family(family) => write!(f, "{family} parameter partials"),
        }
    }
}

/// Dynamical model errors.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DynamicsError {
    /// The satellite was never computed by this model.
    #[snafu(display("{kind} not found for {sat}"))]
    SatNotFound { sat: SatId, kind: PartialKind },
    /// Null position, or position collinear with the velocity.
    #[snafu(display("state of {sat} is degenerate: {action}"))]
    DegenerateState { sat: SatId, action: &'static str },
    /// The augmented state vector does not match the number of parameters.
    #[snafu(display("state of {sat} has {got} components but {expected} are expected"))]
    StateLength {
        sat: SatId,
        expected: usize,
        got: usize,
    },
    /// The parameter partials of a model do not have as many columns as it has parameters.
    #[snafu(display("{model} has {expected} parameters but {got} partials for {sat}"))]
    ParamCount {
        sat: SatId,
        model: String,
        expected: usize,
        got: usize,
    },
}
