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

use super::{duration_from_str, duration_to_str, ConfigError, ConfigRepr};
use crate::cosmic::GM_EARTH;
use crate::dynamics::{EmpiricalForce, ForceModel, ForceModelSet, PointMass, Relativity};
use hifitime::Duration;
use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

fn default_gm() -> f64 {
    GM_EARTH
}

fn default_ppn() -> f64 {
    1.0
}

/// Central body attraction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointMassCfg {
    /// Gravitational parameter in m^3/s^2, defaults to the Earth's
    #[serde(default = "default_gm")]
    pub gm: f64,
}

/// Post-Newtonian correction, defaults to general relativity around the Earth
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RelativityCfg {
    #[serde(default = "default_gm")]
    pub gm: f64,
    #[serde(default = "default_ppn")]
    pub beta: f64,
    #[serde(default = "default_ppn")]
    pub gamma: f64,
}

/// Empirical RTN accelerations
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmpiricalCfg {
    /// Process noise of the radial, transverse and normal accelerations, in m/s^2
    #[serde(default)]
    pub sigma_r: f64,
    #[serde(default)]
    pub sigma_t: f64,
    #[serde(default)]
    pub sigma_n: f64,
    /// Correlation time, e.g. `30 min`
    #[serde(
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub tau: Duration,
}

/// Set of force models acting on the constellation, e.g.:
///
/// ```yaml
/// point_mass:
///   gm: 3.986004418e14
/// relativity: {}
/// empirical:
///   sigma_r: 1.0e-9
///   sigma_t: 1.0e-9
///   sigma_n: 1.0e-9
///   tau: 1 h
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct ForceModelsCfg {
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_mass: Option<PointMassCfg>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relativity: Option<RelativityCfg>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empirical: Option<EmpiricalCfg>,
}

impl ConfigRepr for ForceModelsCfg {}

impl ForceModelsCfg {
    /// Checks that the physical constants are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> {
            Err(ConfigError::InvalidConfig { msg })
        };

        if let Some(point_mass) = &self.point_mass {
            if !(point_mass.gm.is_finite() && point_mass.gm > 0.0) {
                return invalid(format!("point mass GM must be positive, got {}", point_mass.gm));
            }
        }

        if let Some(relativity) = &self.relativity {
            if !(relativity.gm.is_finite() && relativity.gm > 0.0) {
                return invalid(format!("relativity GM must be positive, got {}", relativity.gm));
            }
            if !(relativity.beta.is_finite() && relativity.gamma.is_finite()) {
                return invalid(format!(
                    "PPN parameters must be finite, got beta = {}, gamma = {}",
                    relativity.beta, relativity.gamma
                ));
            }
        }

        if let Some(empirical) = &self.empirical {
            for (axis, sigma) in [
                ("R", empirical.sigma_r),
                ("T", empirical.sigma_t),
                ("N", empirical.sigma_n),
            ] {
                if !(sigma.is_finite() && sigma >= 0.0) {
                    return invalid(format!(
                        "empirical σ_{axis} must be finite and non-negative, got {sigma}"
                    ));
                }
            }
            if empirical.tau <= Duration::ZERO {
                return invalid(format!(
                    "empirical correlation time must be positive, got {}",
                    empirical.tau
                ));
            }
        }

        Ok(())
    }

    /// Builds the set of force models, in the order point mass, relativity, empirical.
    pub fn build(&self) -> Result<ForceModelSet, ConfigError> {
        self.validate()?;

        let mut models = ForceModelSet::empty();

        if let Some(point_mass) = &self.point_mass {
            models.add_model(Box::new(PointMass::new(point_mass.gm)));
        }

        if let Some(relativity) = &self.relativity {
            models.add_model(Box::new(Relativity::with_ppn(
                relativity.gm,
                relativity.beta,
                relativity.gamma,
            )));
        }

        if let Some(empirical) = &self.empirical {
            let mut force = EmpiricalForce::new();
            force
                .set_process_sigmas(empirical.sigma_r, empirical.sigma_t, empirical.sigma_n)
                .set_correlation_time(empirical.tau);
            models.add_model(Box::new(force));
        }

        info!("{models} with {} parameter(s)", models.num_params());
        Ok(models)
    }
}
