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

use super::{DynamicsError, ParamFamily, PartialKind, SatNotFoundSnafu};
use crate::cosmic::{SatId, SatStateMap, StateVector};
use crate::linalg::{Matrix3, Matrix3xX, Vector3};
use rayon::prelude::*;
use snafu::OptionExt;
use std::collections::BTreeMap;

/// Acceleration and partials of one satellite at one epoch, as computed by a force model.
#[derive(Clone, Debug, PartialEq)]
pub struct SatForce {
    pub acceleration: Vector3<f64>,
    pub da_dr: Matrix3<f64>,
    pub da_dv: Matrix3<f64>,
    /// Partials with respect to all the dynamic parameters, in the order of the parameter vector
    pub da_dp: Matrix3xX<f64>,
    /// Partials with respect to the parameters of each family this force depends on
    pub families: BTreeMap<ParamFamily, Matrix3xX<f64>>,
}

impl SatForce {
    /// Builds the force of a model whose dynamic parameters all belong to `family`.
    pub fn new(
        acceleration: Vector3<f64>,
        da_dr: Matrix3<f64>,
        da_dv: Matrix3<f64>,
        family: ParamFamily,
        da_dp: Matrix3xX<f64>,
    ) -> Self {
        let mut families = BTreeMap::new();
        families.insert(family, da_dp.clone());
        Self {
            acceleration,
            da_dr,
            da_dv,
            da_dp,
            families,
        }
    }

    /// A null force without any parameter, used as the start of a sum.
    pub fn zero() -> Self {
        Self {
            acceleration: Vector3::zeros(),
            da_dr: Matrix3::zeros(),
            da_dv: Matrix3::zeros(),
            da_dp: Matrix3xX::zeros(0),
            families: BTreeMap::new(),
        }
    }

    /// Number of dynamic parameters
    pub fn num_params(&self) -> usize {
        self.da_dp.ncols()
    }
}

/// Storage of the latest force of every computed satellite.
///
/// All the maps are written together for a given satellite, so a satellite present in one map is
/// present in all the maps of the families its force depends on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForceResults {
    acc: BTreeMap<SatId, Vector3<f64>>,
    partial_r: BTreeMap<SatId, Matrix3<f64>>,
    partial_v: BTreeMap<SatId, Matrix3<f64>>,
    partial_p: BTreeMap<SatId, Matrix3xX<f64>>,
    families: BTreeMap<ParamFamily, BTreeMap<SatId, Matrix3xX<f64>>>,
}

impl ForceResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the force of this satellite, replacing any previous one.
    pub fn insert(&mut self, sat: SatId, force: SatForce) {
        self.acc.insert(sat, force.acceleration);
        self.partial_r.insert(sat, force.da_dr);
        self.partial_v.insert(sat, force.da_dv);
        self.partial_p.insert(sat, force.da_dp);
        for (family, partials) in force.families {
            self.families.entry(family).or_default().insert(sat, partials);
        }
    }

    /// Stores the forces of several satellites.
    pub fn extend<I>(&mut self, forces: I)
    where
        I: IntoIterator<Item = (SatId, SatForce)>,
    {
        for (sat, force) in forces {
            self.insert(sat, force);
        }
    }

    /// Drops the results of every satellite.
    pub fn clear(&mut self) {
        self.acc.clear();
        self.partial_r.clear();
        self.partial_v.clear();
        self.partial_p.clear();
        self.families.clear();
    }

    /// Satellites with stored results
    pub fn sats(&self) -> impl Iterator<Item = &SatId> {
        self.acc.keys()
    }

    pub fn contains(&self, sat: &SatId) -> bool {
        self.acc.contains_key(sat)
    }

    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    pub fn len(&self) -> usize {
        self.acc.len()
    }

    /// Rebuilds the whole force of a satellite from the individual maps.
    pub fn sat_force(&self, sat: &SatId) -> Result<SatForce, DynamicsError> {
        let mut families = BTreeMap::new();
        for (family, partials) in &self.families {
            if let Some(da_dparam) = partials.get(sat) {
                families.insert(*family, da_dparam.clone());
            }
        }
        Ok(SatForce {
            acceleration: self.acceleration(sat)?,
            da_dr: self.da_dr(sat)?,
            da_dv: self.da_dv(sat)?,
            da_dp: self.da_dp(sat)?,
            families,
        })
    }

    pub fn acceleration(&self, sat: &SatId) -> Result<Vector3<f64>, DynamicsError> {
        self.acc.get(sat).copied().context(SatNotFoundSnafu {
            sat: *sat,
            kind: PartialKind::Acceleration,
        })
    }

    pub fn da_dr(&self, sat: &SatId) -> Result<Matrix3<f64>, DynamicsError> {
        self.partial_r.get(sat).copied().context(SatNotFoundSnafu {
            sat: *sat,
            kind: PartialKind::Position,
        })
    }

    pub fn da_dv(&self, sat: &SatId) -> Result<Matrix3<f64>, DynamicsError> {
        self.partial_v.get(sat).copied().context(SatNotFoundSnafu {
            sat: *sat,
            kind: PartialKind::Velocity,
        })
    }

    pub fn da_dp(&self, sat: &SatId) -> Result<Matrix3xX<f64>, DynamicsError> {
        self.partial_p.get(sat).cloned().context(SatNotFoundSnafu {
            sat: *sat,
            kind: PartialKind::Parameters,
        })
    }

    pub fn da_dparam(
        &self,
        sat: &SatId,
        family: ParamFamily,
    ) -> Result<Matrix3xX<f64>, DynamicsError> {
        self.families
            .get(&family)
            .and_then(|partials| partials.get(sat))
            .cloned()
            .context(SatNotFoundSnafu {
                sat: *sat,
                kind: PartialKind::Family(family),
            })
    }
}

/// Evaluates `eval` on every satellite of `states`, in parallel.
///
/// The forces are returned only if all the satellites succeeded, so that a failure never leaves
/// the results of a model half updated.
pub(crate) fn evaluate_all<F>(
    states: &SatStateMap,
    eval: F,
) -> Result<Vec<(SatId, SatForce)>, DynamicsError>
where
    F: Fn(&SatId, &StateVector) -> Result<SatForce, DynamicsError> + Sync + Send,
{
    states
        .par_iter()
        .map(|(sat, state)| eval(sat, state).map(|force| (*sat, force)))
        .collect()
}
