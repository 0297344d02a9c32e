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

/*! # podyn

Force models for precise orbit determination of satellite constellations.

Every force model computes, for each tracked satellite at a given epoch, the perturbing acceleration
and its partial derivatives with respect to position, velocity and the model's dynamic parameters.
These partials are assembled into the coefficient matrix of the equations of variation, which an
external integrator propagates alongside the orbit.
*/

/// Satellite identifiers, state vectors and local orbital frames.
pub mod cosmic;

/// Force models, their per-satellite results and the equations of variation.
pub mod dynamics;

/// Configuration of force models from YAML files.
pub mod io;

/// Small linear algebra helpers.
pub mod utils;

mod errors;
/// Functions which may fail return an error, never a silently defaulted value.
pub use self::errors::PodynError;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{SatId, SatStateMap, SatSystem, SatVectorMap, StateVector};
pub use self::dynamics::{DynamicsError, ForceModel, ForceModelSet, ParamFamily};
