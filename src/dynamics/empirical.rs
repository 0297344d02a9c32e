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
use crate::cosmic::{
    radius, rtn_to_inertial, velocity, SatId, SatStateMap, SatVectorMap, StateVector,
};
use crate::linalg::{Matrix3, Matrix3xX, Vector3};
use crate::time::{Duration, Epoch};
use snafu::OptionExt;
use std::fmt;

/// Empirical accelerations absorbing the unmodeled forces, defined in the radial, transverse and
/// normal (RTN) frame of each satellite and rotated to the inertial frame.
///
/// The RTN force of each satellite is the one estimated at the previous step. It is handed to this
/// model by the caller, once per integration step and before `compute`, through
/// [`EmpiricalForce::set_previous_epoch`] and [`EmpiricalForce::set_previous_force`]. Satellites
/// without a previous force are subject to a null empirical acceleration.
///
/// The acceleration is linear in its three RTN components with unit sensitivity, so the partials
/// with respect to these parameters are the identity, and those with respect to the position and
/// velocity are null.
///
/// # Implementation notes
///
/// The process noise and the correlation time τ are stored for the estimator but the force is not
/// decayed by exp(−Δt/τ) between steps: the elapsed time since the previous epoch is only computed
/// and logged. A first-order Gauss-Markov variant would scale both the acceleration and `da_dp` by
/// that factor.
#[derive(Clone, Debug)]
pub struct EmpiricalForce {
    /// Standard deviation of the process noise on the radial component, in m/s^2
    pub sigma_r: f64,
    /// Standard deviation of the process noise on the transverse component, in m/s^2
    pub sigma_t: f64,
    /// Standard deviation of the process noise on the normal component, in m/s^2
    pub sigma_n: f64,
    /// Correlation time of the process
    pub tau: Duration,
    prev_epoch: Option<Epoch>,
    prev_force: SatVectorMap,
    results: ForceResults,
}

impl EmpiricalForce {
    /// Number of empirical parameters per satellite: R, T and N.
    pub const NUM_PARAMS: usize = 3;

    pub fn new() -> Self {
        Self {
            sigma_r: 0.0,
            sigma_t: 0.0,
            sigma_n: 0.0,
            tau: Duration::ZERO,
            prev_epoch: None,
            prev_force: SatVectorMap::new(),
            results: ForceResults::new(),
        }
    }

    /// Sets the same process noise on all three axes.
    pub fn set_process_sigma(&mut self, sigma: f64) -> &mut Self {
        self.set_process_sigmas(sigma, sigma, sigma)
    }

    /// Sets the process noise of the radial, transverse and normal axes.
    pub fn set_process_sigmas(&mut self, sigma_r: f64, sigma_t: f64, sigma_n: f64) -> &mut Self {
        self.sigma_r = sigma_r;
        self.sigma_t = sigma_t;
        self.sigma_n = sigma_n;
        self
    }

    pub fn set_correlation_time(&mut self, tau: Duration) -> &mut Self {
        self.tau = tau;
        self
    }

    /// Sets the epoch at which the previous forces were estimated.
    pub fn set_previous_epoch(&mut self, epoch: Epoch) -> &mut Self {
        self.prev_epoch = Some(epoch);
        self
    }

    /// Sets the RTN force of each satellite estimated at the previous epoch, replacing all the
    /// previous ones.
    pub fn set_previous_force(&mut self, force: SatVectorMap) -> &mut Self {
        self.prev_force = force;
        self
    }

    pub fn previous_epoch(&self) -> Option<Epoch> {
        self.prev_epoch
    }

    /// RTN force that will be applied to this satellite, null if none was set.
    pub fn previous_force(&self, sat: &SatId) -> Vector3<f64> {
        self.prev_force.get(sat).copied().unwrap_or_else(Vector3::zeros)
    }

    fn sat_force(&self, sat: &SatId, state: &StateVector) -> Result<SatForce, DynamicsError> {
        let rtn2eci = rtn_to_inertial(&radius(state), &velocity(state)).context(
            DegenerateStateSnafu {
                sat: *sat,
                action: "building the RTN frame",
            },
        )?;

        let acc = rtn2eci * self.previous_force(sat);

        trace!("{sat} empirical acc = {acc:e}");

        Ok(SatForce::new(
            acc,
            Matrix3::zeros(),
            Matrix3::zeros(),
            ParamFamily::Empirical,
            Matrix3xX::from_fn(Self::NUM_PARAMS, |i, j| if i == j { 1.0 } else { 0.0 }),
        ))
    }
}

impl Default for EmpiricalForce {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmpiricalForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Empirical force (σ_RTN = [{:e}, {:e}, {:e}] m/s^2, τ = {})",
            self.sigma_r, self.sigma_t, self.sigma_n, self.tau
        )
    }
}

impl ForceModel for EmpiricalForce {
    fn compute(&mut self, epoch: Epoch, states: &SatStateMap) -> Result<(), DynamicsError> {
        match self.prev_epoch {
            Some(prev_epoch) => trace!(
                "empirical force at {epoch}: {} since previous epoch",
                (epoch - prev_epoch).abs()
            ),
            None => trace!("empirical force at {epoch}: no previous epoch"),
        }

        let forces = evaluate_all(states, |sat, state| self.sat_force(sat, state))?;
        self.results.extend(forces);
        debug!("{self} computed for {} satellite(s) at {epoch}", states.len());
        Ok(())
    }

    fn results(&self) -> &ForceResults {
        &self.results
    }

    fn num_params(&self) -> usize {
        Self::NUM_PARAMS
    }

    fn set_previous_params(&mut self, family: ParamFamily, epoch: Epoch, params: &SatVectorMap) {
        if family == ParamFamily::Empirical {
            self.set_previous_epoch(epoch).set_previous_force(params.clone());
        }
    }
}

#[test]
fn test_empirical_setters() {
    use crate::time::TimeUnits;

    let mut emp = EmpiricalForce::new();
    emp.set_process_sigma(1e-9).set_correlation_time(30.minutes());
    assert_eq!((emp.sigma_r, emp.sigma_t, emp.sigma_n), (1e-9, 1e-9, 1e-9));
    assert_eq!(emp.tau, 30.minutes());

    emp.set_process_sigmas(1e-9, 2e-9, 3e-9);
    assert_eq!((emp.sigma_r, emp.sigma_t, emp.sigma_n), (1e-9, 2e-9, 3e-9));
    assert!(emp.previous_epoch().is_none());
}
