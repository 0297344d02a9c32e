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

use crate::linalg::{Matrix3, Vector3};

/// Returns the direction cosine matrix from the radial, transverse and normal (RTN) frame of a
/// satellite to the inertial frame of its position and velocity.
///
/// The columns are the unit vectors R = r/|r|, N = (r×v)/|r×v| and T = N×R, in the R, T, N
/// order.
/// Returns None if the position is null or collinear with the velocity, since the frame is then
/// undefined.
pub fn rtn_to_inertial(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> Option<Matrix3<f64>> {
    let r_unit = radius.try_normalize(0.0)?;
    let n_unit = radius.cross(velocity).try_normalize(0.0)?;
    let t_unit = n_unit.cross(&r_unit);
    Some(Matrix3::from_columns(&[r_unit, t_unit, n_unit]))
}

/// Returns the direction cosine matrix from the inertial frame to the RTN frame.
pub fn inertial_to_rtn(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> Option<Matrix3<f64>> {
    rtn_to_inertial(radius, velocity).map(|dcm| dcm.transpose())
}
