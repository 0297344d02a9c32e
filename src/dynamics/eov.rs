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

use crate::linalg::{DMatrix, Matrix3, Matrix3xX};

/// Builds the coefficient matrix of the equations of variation from the partials of the
/// acceleration.
///
/// With N the number of columns of `da_dp`, the matrix is (6+N) x (6+N) and is the Jacobian of the
/// time derivative of the augmented state [position, velocity, parameters]:
///
/// ```text
///          | 0      I      0     |
/// cmat  =  | da/dr  da/dv  da/dp |
///          | 0      0      0     |
/// ```
///
/// The top-right identity block is the kinematic relation between position and velocity, and the
/// dynamic parameters are constant over an integration step.
pub fn coeff_mat_of_eov(
    da_dr: &Matrix3<f64>,
    da_dv: &Matrix3<f64>,
    da_dp: &Matrix3xX<f64>,
) -> DMatrix<f64> {
    let num_params = da_dp.ncols();
    let mut cmat = DMatrix::zeros(6 + num_params, 6 + num_params);

    cmat.fixed_view_mut::<3, 3>(0, 3).copy_from(&Matrix3::identity());
    cmat.fixed_view_mut::<3, 3>(3, 0).copy_from(da_dr);
    cmat.fixed_view_mut::<3, 3>(3, 3).copy_from(da_dv);
    if num_params > 0 {
        cmat.view_mut((3, 6), (3, num_params)).copy_from(da_dp);
    }

    cmat
}
