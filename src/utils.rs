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

use crate::linalg::{Matrix3, Matrix3xX};

/// Concatenates matrices of three rows column-wise, in order.
pub fn hstack(mats: &[&Matrix3xX<f64>]) -> Matrix3xX<f64> {
    let ncols = mats.iter().map(|m| m.ncols()).sum();
    let mut stacked = Matrix3xX::zeros(ncols);
    let mut col = 0;
    for m in mats {
        if m.ncols() > 0 {
            stacked.columns_mut(col, m.ncols()).copy_from(*m);
            col += m.ncols();
        }
    }
    stacked
}

/// Returns whether the provided matrix is a proper rotation (orthonormal columns and a
/// determinant of +1), within `tol`.
pub fn is_rotation(m: &Matrix3<f64>, tol: f64) -> bool {
    let gram = m.transpose() * m - Matrix3::identity();
    gram.iter().all(|x| x.abs() <= tol) && (m.determinant() - 1.0).abs() <= tol
}
