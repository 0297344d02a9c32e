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

use super::{DynamicsError, ForceModel, ParamCountSnafu};
use crate::cosmic::{SatId, SatStateMap, StateVector};
use crate::linalg::{DMatrix, DVector};
use crate::time::Epoch;
use snafu::ensure;
use std::collections::BTreeMap;

/// Map of the (augmented) state vector of each satellite.
pub type SatDVectorMap = BTreeMap<SatId, DVector<f64>>;

/// Provides an integrator with the time derivatives of the state of each satellite.
pub trait EquationOfMotion {
    /// Computes the derivative of each state at `epoch`.
    fn derivatives(
        &mut self,
        epoch: Epoch,
        states: &SatDVectorMap,
    ) -> Result<SatDVectorMap, DynamicsError>;
}

/// Orbit equations and equations of variation driven by a force model.
///
/// The augmented state of each satellite is `[r, v, vec(Φ)]` where Φ is the (6+N) x (6+N)
/// transition matrix of the position, velocity and the N dynamic parameters of the model, stored
/// column-major. Its derivative is `[v, a, vec(A Φ)]` with `a` the acceleration of the force model
/// and `A` the coefficient matrix of the equations of variation.
pub struct VariationalEquations<F: ForceModel> {
    pub model: F,
}

impl<F: ForceModel> VariationalEquations<F> {
    pub fn new(model: F) -> Self {
        Self { model }
    }

    /// Dimension of the augmented transition matrix, 6 + N.
    pub fn stm_dim(&self) -> usize {
        6 + self.model.num_params()
    }

    /// Length of the augmented state vector, 6 + (6 + N)^2.
    pub fn state_len(&self) -> usize {
        6 + self.stm_dim().pow(2)
    }

    /// Builds the initial augmented state: the orbit followed by an identity transition matrix.
    pub fn initial_state(&self, orbit: &StateVector) -> DVector<f64> {
        let stm = DMatrix::<f64>::identity(self.stm_dim(), self.stm_dim());
        DVector::from_iterator(
            self.state_len(),
            orbit.iter().chain(stm.iter()).copied(),
        )
    }

    /// Extracts the transition matrix from an augmented state.
    pub fn transition_matrix(
        &self,
        sat: &SatId,
        state: &DVector<f64>,
    ) -> Result<DMatrix<f64>, DynamicsError> {
        self.check_len(sat, state)?;
        let dim = self.stm_dim();
        Ok(DMatrix::from_column_slice(dim, dim, &state.as_slice()[6..]))
    }

    fn check_len(&self, sat: &SatId, state: &DVector<f64>) -> Result<(), DynamicsError> {
        if state.len() == self.state_len() {
            Ok(())
        } else {
            Err(DynamicsError::StateLength {
                sat: *sat,
                expected: self.state_len(),
                got: state.len(),
            })
        }
    }
}

impl<F: ForceModel> EquationOfMotion for VariationalEquations<F> {
    fn derivatives(
        &mut self,
        epoch: Epoch,
        states: &SatDVectorMap,
    ) -> Result<SatDVectorMap, DynamicsError> {
        let mut orbits = SatStateMap::new();
        for (sat, state) in states {
            self.check_len(sat, state)?;
            orbits.insert(*sat, state.fixed_rows::<6>(0).into_owned());
        }

        self.model.compute(epoch, &orbits)?;

        let mut derivatives = SatDVectorMap::new();
        for (sat, state) in states {
            let acc = self.model.acceleration(sat)?;
            let cmat = self.model.coeff_mat_of_eov(sat)?;
            ensure!(
                cmat.nrows() == self.stm_dim(),
                ParamCountSnafu {
                    sat: *sat,
                    model: self.model.to_string(),
                    expected: self.model.num_params(),
                    got: cmat.nrows() - 6,
                }
            );
            let stm_dt = cmat * self.transition_matrix(sat, state)?;

            let d_x = DVector::from_iterator(
                self.state_len(),
                state
                    .rows(3, 3)
                    .iter()
                    .chain(acc.iter())
                    .chain(stm_dt.iter())
                    .copied(),
            );
            derivatives.insert(*sat, d_x);
        }

        Ok(derivatives)
    }
}
