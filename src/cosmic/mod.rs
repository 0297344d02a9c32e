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

use crate::linalg::{Vector3, Vector6};
use std::collections::BTreeMap;

// Re-Export satellite identifiers
mod sat;
pub use self::sat::*;

// Re-Export local orbital frames
mod rotations;
pub use self::rotations::*;

/// Speed of light in meters per second
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Gravitational parameter of the Earth (incl. atmosphere) in m^3/s^2, per the IERS conventions.
pub const GM_EARTH: f64 = 3.986_004_418e14;

/// Position (m) and velocity (m/s) of one satellite in the inertial frame of integration.
pub type StateVector = Vector6<f64>;

/// Map of the state vectors of a constellation at a single epoch.
pub type SatStateMap = BTreeMap<SatId, StateVector>;

/// Map of a three dimensional vector (e.g. an acceleration) per satellite.
pub type SatVectorMap = BTreeMap<SatId, Vector3<f64>>;

/// Returns the position part of a state vector.
pub fn radius(state: &StateVector) -> Vector3<f64> {
    state.fixed_rows::<3>(0).into_owned()
}

/// Returns the velocity part of a state vector.
pub fn velocity(state: &StateVector) -> Vector3<f64> {
    state.fixed_rows::<3>(3).into_owned()
}

/// Builds a state vector from its position and velocity.
pub fn state_from(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> StateVector {
    StateVector::from_iterator(radius.iter().chain(velocity.iter()).copied())
}

#[test]
fn test_state_halves() {
    let state = StateVector::new(7.0e6, 1.0, -2.0, 3.0, 7.5e3, 4.0);
    assert_eq!(radius(&state), Vector3::new(7.0e6, 1.0, -2.0));
    assert_eq!(velocity(&state), Vector3::new(3.0, 7.5e3, 4.0));
    assert_eq!(state_from(&radius(&state), &velocity(&state)), state);
}
