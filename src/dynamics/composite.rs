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

use super::{DynamicsError, ForceModel, ForceResults, ParamFamily, SatForce};
use crate::cosmic::{SatStateMap, SatVectorMap};
use crate::time::Epoch;
use crate::utils::hstack;
use std::fmt;

/// `ForceModelSet` sums the contributions of several force models into a single force model.
///
/// The accelerations and the position and velocity partials are summed. The parameter partials are
/// concatenated column-wise in the order in which the models were added, so the parameter vector of
/// the set is the concatenation of the parameter vectors of its models.
pub struct ForceModelSet {
    models: Vec<Box<dyn ForceModel>>,
    results: ForceResults,
}

impl ForceModelSet {
    /// Initialize a set with a list of force models
    pub fn new(models: Vec<Box<dyn ForceModel>>) -> Self {
        Self {
            models,
            results: ForceResults::new(),
        }
    }

    /// Initialize a set without any model, whose forces are all null.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Initialize a set with the provided model.
    pub fn with_model(model: Box<dyn ForceModel>) -> Self {
        Self::new(vec![model])
    }

    /// Add a model to the currently defined set
    pub fn add_model(&mut self, model: Box<dyn ForceModel>) {
        self.models.push(model);
    }

    pub fn models(&self) -> &[Box<dyn ForceModel>] {
        &self.models
    }

    /// Index of the first column of the parameters of each model in `da_dp`.
    pub fn param_offsets(&self) -> Vec<usize> {
        self.models
            .iter()
            .scan(0, |offset, model| {
                let this = *offset;
                *offset += model.num_params();
                Some(this)
            })
            .collect()
    }
}

impl fmt::Display for ForceModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .models
            .iter()
            .map(|model| format!("{model}"))
            .collect::<Vec<String>>();
        write!(f, "Force models [{}]", names.join("; "))
    }
}

impl ForceModel for ForceModelSet {
    fn compute(&mut self, epoch: Epoch, states: &SatStateMap) -> Result<(), DynamicsError> {
        for model in &mut self.models {
            model.compute(epoch, states)?;
        }

        let mut forces = Vec::with_capacity(states.len());
        for sat in states.keys() {
            let mut total = SatForce::zero();
            for model in &self.models {
                let force = model.results().sat_force(sat)?;
                total.acceleration += force.acceleration;
                total.da_dr += force.da_dr;
                total.da_dv += force.da_dv;
                total.da_dp = hstack(&[&total.da_dp, &force.da_dp]);
                for (family, partials) in force.families {
                    let merged = match total.families.get(&family) {
                        Some(prev) => hstack(&[prev, &partials]),
                        None => partials,
                    };
                    total.families.insert(family, merged);
                }
            }
            trace!("{sat} total acc = {:e}", total.acceleration);
            forces.push((*sat, total));
        }

        self.results.extend(forces);
        debug!(
            "{} force model(s) computed for {} satellite(s) at {epoch}",
            self.models.len(),
            states.len()
        );
        Ok(())
    }

    fn results(&self) -> &ForceResults {
        &self.results
    }

    fn num_params(&self) -> usize {
        self.models.iter().map(|model| model.num_params()).sum()
    }

    fn set_previous_params(&mut self, family: ParamFamily, epoch: Epoch, params: &SatVectorMap) {
        for model in &mut self.models {
            model.set_previous_params(family, epoch, params);
        }
    }
}
