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

use super::results::evaluate_all;
use super::{DegenerateStateSnafu, DynamicsError, ForceModel, ForceResults, ParamFamily, SatForce};
use crate::cosmic::{radius, SatId, SatStateMap, StateVector, GM_EARTH};
use crate::linalg::{Matrix3, Matrix3xX};
use crate::time::Epoch;
use snafu::ensure;
use std::fmt;

/// Newtonian attraction of the central body, a = −GM r / r³.
///
/// Combined with the perturbations in a [`super::ForceModelSet`], this yields the full right hand
/// side of the orbit equations. It has no dynamic parameter.
#[derive(Clone, Debug)]
pub struct PointMass {
    /// Gravitational parameter of the central body, in m^3/s^2
    pub gm: f64,
    results: ForceResults,
}

impl PointMass {
    pub fn new(gm: f64) -> Self {
        debug!("point mass with GM = {gm:e} m^3/s^2");
        Self {
            gm,
            results: ForceResults::new(),
        }
    }

    pub fn earth() -> Self {
        Self::new(GM_EARTH)
    }

    fn sat_force(&self, sat: &SatId, state: &StateVector) -> Result<SatForce, DynamicsError> {
        let r = radius(state);
        let rmag = r.norm();
        ensure!(
            rmag > 0.0,
            DegenerateStateSnafu {
                sat: *sat,
                action: "central attraction of a null position"
            }
        );

        let r3 = rmag.powi(3);
        let acc = (-self.gm / r3) * r;
        let r_unit = r / rmag;
        let da_dr = (-self.gm / r3) * (Matrix3::identity() - 3.0 * r_unit * r_unit.transpose());

        Ok(SatForce::new(
            acc,
            da_dr,
            Matrix3::zeros(),
            ParamFamily::Gravity,
            Matrix3xX::zeros(0),
        ))
    }
}

impl fmt::Display for PointMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point mass (GM = {:e} m^3/s^2)", self.gm)
    }
}

impl ForceModel for PointMass {
    fn compute(&mut self, epoch: Epoch, states: &SatStateMap) -> Result<(), DynamicsError> {
        let forces = evaluate_all(states, |sat, state| self.sat_force(sat, state))?;
        self.results.extend(forces);
        debug!("{self} computed for {} satellite(s) at {epoch}", states.len());
        Ok(())
    }

    fn results(&self) -> &ForceResults {
        &self.results
    }

    fn num_params(&self) -> usize {
        0
    }
}
