mod composite;
mod relativity;

use podyn::cosmic::StateVector;
use podyn::linalg::{Matrix3, Vector3};
use podyn::time::Epoch;
use podyn::{ForceModel, SatId, SatStateMap};

pub fn epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2024, 3, 1)
}

/// Central finite differences of the acceleration of `model` with respect to the position
/// (`offset` = 0) or the velocity (`offset` = 3) of a single state.
pub fn finite_diff_partials<F: ForceModel>(
    model: &mut F,
    sat: SatId,
    state: &StateVector,
    offset: usize,
    step: f64,
) -> Matrix3<f64> {
    let mut partials = Matrix3::zeros();
    for j in 0..3 {
        let mut accs = Vec::with_capacity(2);
        for sign in [1.0, -1.0] {
            let mut pert = *state;
            pert[offset + j] += sign * step;
            let mut states = SatStateMap::new();
            states.insert(sat, pert);
            model.compute(epoch(), &states).unwrap();
            accs.push(model.acceleration(&sat).unwrap());
        }
        let col: Vector3<f64> = (accs[0] - accs[1]) / (2.0 * step);
        partials.set_column(j, &col);
    }
    partials
}
