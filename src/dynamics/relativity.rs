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
use crate::cosmic::{radius, velocity, SatId, SatStateMap, StateVector, GM_EARTH, SPEED_OF_LIGHT};
use crate::linalg::{Matrix3, Matrix3xX};
use crate::time::Epoch;
use snafu::ensure;
use std::fmt;

/// Post-Newtonian correction to the attraction of the central body, cf. IERS Conventions (2010),
/// section 10.3, in the parameterized post-Newtonian (PPN) formulation:
///
/// a = GM / (c² r³) [ (2(β+γ) GM / r − γ v²) r + 2(1+γ) (r·v) v ]
///
/// General relativity corresponds to β = γ = 1. This model has no dynamic parameter.
#[derive(Clone, Debug)]
pub struct Relativity {
    /// Gravitational parameter of the central body, in m^3/s^2
    pub gm: f64,
    /// PPN parameter β
    pub beta: f64,
    /// PPN parameter γ
    pub gamma: f64,
    results: ForceResults,
}

impl Relativity {
    /// Initializes the general relativity correction around the Earth.
    pub fn new() -> Self {
        Self::with_ppn(GM_EARTH, 1.0, 1.0)
    }

    /// Initializes the correction around a central body of the provided GM, with custom PPN
    /// parameters.
    pub fn with_ppn(gm: f64, beta: f64, gamma: f64) -> Self {
        debug!("relativity with GM = {gm:e} m^3/s^2, beta = {beta}, gamma = {gamma}");
        Self {
            gm,
            beta,
            gamma,
            results: ForceResults::new(),
        }
    }

    /// Computes the correction and its analytic partials for a single state.
    fn sat_force(&self, sat: &SatId, state: &StateVector) -> Result<SatForce, DynamicsError> {
        let r = radius(state);
        let v = velocity(state);

        let rmag = r.norm();
        ensure!(
            rmag > 0.0,
            DegenerateStateSnafu {
                sat: *sat,
                action: "relativistic correction of a null position"
            }
        );

        let (gm, beta, gamma) = (self.gm, self.beta, self.gamma);
        let c2 = SPEED_OF_LIGHT * SPEED_OF_LIGHT;
        let r2 = rmag * rmag;
        let v2 = v.norm_squared();
        let rv = r.dot(&v);

        let p = gm / (c2 * r2 * rmag);
        let pr = 2.0 * (beta + gamma) * gm / rmag - gamma * v2;
        let pv = 2.0 * (1.0 + gamma) * rv;

        let acc = p * (pr * r + pv * v);

        // Differentiating p, pr and pv with respect to r
        let prr = -2.0 * (beta + gamma) * gm / (r2 * rmag);
        let pvv = 2.0 * (1.0 + gamma);
        let da_dr = p
            * (pr * Matrix3::identity() + prr * r * r.transpose() + pvv * v * v.transpose())
            - (3.0 / r2) * acc * r.transpose();

        // ... and with respect to v
        let prv = -2.0 * gamma;
        let pvr = 2.0 * (1.0 + gamma);
        let da_dv =
            p * (pv * Matrix3::identity() + prv * r * v.transpose() + pvr * v * r.transpose());

        trace!("{sat} relativity acc = {acc:e}");

        Ok(SatForce::new(
            acc,
            da_dr,
            da_dv,
            ParamFamily::Relativity,
            Matrix3xX::zeros(0),
        ))
    }
}

impl Default for Relativity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Relativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Relativity (beta = {}, gamma = {})", self.beta, self.gamma)
    }
}

impl ForceModel for Relativity {
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
