use super::{epoch, finite_diff_partials};
use crate::{gps, leo, test_states};
use podyn::cosmic::{StateVector, GM_EARTH, SPEED_OF_LIGHT};
use podyn::dynamics::{PartialKind, Relativity};
use podyn::linalg::Vector3;
use podyn::time::Duration;
use podyn::{DynamicsError, ForceModel, ParamFamily, SatStateMap};
use rstest::rstest;

#[rstest]
#[case::meo(StateVector::new(15_600_000.0, -19_400_000.0, 8_250_000.0, 2_150.0, 2_540.0, 1_900.0))]
#[case::eccentric_leo(StateVector::new(6_878_000.0, 120_000.0, -45_000.0, 150.0, 6_350.0, 3_900.0))]
#[case::geo(StateVector::new(42_164_000.0, 5_000.0, 0.0, 12.0, 3_074.7, 1.5))]
fn relativity_partials_match_finite_differences(#[case] state: StateVector) {
    let _ = pretty_env_logger::try_init();

    let sat = gps(5);
    let mut states = SatStateMap::new();
    states.insert(sat, state);

    let mut rel = Relativity::new();
    rel.compute(epoch(), &states).unwrap();
    let da_dr = rel.da_dr(&sat).unwrap();
    let da_dv = rel.da_dv(&sat).unwrap();

    let fd_da_dr = finite_diff_partials(&mut rel, sat, &state, 0, 1.0);
    let fd_da_dv = finite_diff_partials(&mut rel, sat, &state, 3, 1e-3);

    println!("da_dr = {da_dr:e}\nfinite diff = {fd_da_dr:e}");
    println!("da_dv = {da_dv:e}\nfinite diff = {fd_da_dv:e}");

    assert!(
        (da_dr - fd_da_dr).norm() < 1e-6 * da_dr.norm(),
        "da_dr does not match finite differences"
    );
    assert!(
        (da_dv - fd_da_dv).norm() < 1e-6 * da_dv.norm(),
        "da_dv does not match finite differences"
    );
}

#[test]
fn relativity_circular_orbit() {
    let rmag = 7_000_000.0;
    let vmag = (GM_EARTH / rmag).sqrt();
    let sat = leo(7);
    let mut states = SatStateMap::new();
    // Inclined circular orbit, v is orthogonal to r
    states.insert(
        sat,
        StateVector::new(0.0, rmag, 0.0, -vmag * 0.6, 0.0, vmag * 0.8),
    );

    let mut rel = Relativity::new();
    rel.compute(epoch(), &states).unwrap();
    let acc = rel.acceleration(&sat).unwrap();

    // Leading order correction on a circular orbit: 3 (GM)² / (c² r³), along the radius
    let expected = 3.0 * GM_EARTH.powi(2) / (SPEED_OF_LIGHT.powi(2) * rmag.powi(3));
    approx::assert_relative_eq!(acc.norm(), expected, max_relative = 1e-12);
    approx::assert_relative_eq!(
        acc.normalize(),
        Vector3::new(0.0, 1.0, 0.0),
        epsilon = 1e-12
    );

    let newton = GM_EARTH / rmag.powi(2);
    assert!(acc.norm() / newton < 1e-6);
    println!("relativity / newton = {:e}", acc.norm() / newton);
}

#[test]
fn relativity_ppn_scaling() {
    // On a circular orbit with γ = 0, only the β term remains: 2 β GM / r
    let rmag = 26_560_000.0;
    let vmag = (GM_EARTH / rmag).sqrt();
    let sat = gps(12);
    let mut states = SatStateMap::new();
    states.insert(sat, StateVector::new(rmag, 0.0, 0.0, 0.0, vmag, 0.0));

    let mut rel = Relativity::with_ppn(GM_EARTH, 1.0, 0.0);
    rel.compute(epoch(), &states).unwrap();
    let acc = rel.acceleration(&sat).unwrap();
    let expected = 2.0 * GM_EARTH.powi(2) / (SPEED_OF_LIGHT.powi(2) * rmag.powi(3));
    approx::assert_relative_eq!(acc[0], expected, max_relative = 1e-12);
}

#[test]
fn relativity_not_found() {
    let mut rel = Relativity::new();
    rel.compute(epoch(), &test_states()).unwrap();

    let unknown = gps(30);
    let not_found = |kind| DynamicsError::SatNotFound { sat: unknown, kind };

    assert_eq!(
        rel.acceleration(&unknown),
        Err(not_found(PartialKind::Acceleration))
    );
    assert_eq!(rel.da_dr(&unknown), Err(not_found(PartialKind::Position)));
    assert_eq!(rel.da_dv(&unknown), Err(not_found(PartialKind::Velocity)));
    assert_eq!(rel.da_dp(&unknown), Err(not_found(PartialKind::Parameters)));
    assert_eq!(
        rel.da_dparam(&unknown, ParamFamily::Relativity),
        Err(not_found(PartialKind::Family(ParamFamily::Relativity)))
    );
    assert_eq!(
        rel.coeff_mat_of_eov(&unknown),
        Err(not_found(PartialKind::Position))
    );
}

#[test]
fn relativity_deterministic() {
    let states = test_states();
    let mut rel = Relativity::new();
    rel.compute(epoch(), &states).unwrap();
    let first = rel.results().clone();

    // Re-query without computing
    for sat in states.keys() {
        assert_eq!(rel.acceleration(sat), rel.acceleration(sat));
        assert_eq!(rel.coeff_mat_of_eov(sat), rel.coeff_mat_of_eov(sat));
    }

    rel.compute(epoch(), &states).unwrap();
    assert_eq!(rel.results(), &first);

    for sat in states.keys() {
        let da_dp = rel.da_dp(sat).unwrap();
        assert_eq!(da_dp.shape(), (3, 0));
        assert_eq!(rel.coeff_mat_of_eov(sat).unwrap().shape(), (6, 6));
    }
    assert_eq!(rel.num_params(), 0);
}

#[test]
fn relativity_keeps_stale_sats() {
    let states = test_states();
    let mut rel = Relativity::new();
    rel.compute(epoch(), &states).unwrap();
    let stale = rel.acceleration(&leo(1)).unwrap();

    // Only the MEO satellite is computed at the next epoch
    let mut next = SatStateMap::new();
    next.insert(gps(1), states[&gps(1)]);
    rel.compute(epoch() + Duration::from_seconds(30.0), &next).unwrap();

    assert_eq!(rel.acceleration(&leo(1)).unwrap(), stale);
    assert_eq!(rel.results().len(), 2);
}

#[test]
fn relativity_empty_input() {
    let mut rel = Relativity::new();
    rel.compute(epoch(), &SatStateMap::new()).unwrap();
    assert!(rel.results().is_empty());
}

#[test]
fn relativity_degenerate_state() {
    let mut states = test_states();
    states.insert(gps(2), StateVector::zeros());

    let mut rel = Relativity::new();
    let err = rel.compute(epoch(), &states).unwrap_err();
    assert!(matches!(err, DynamicsError::DegenerateState { sat, .. } if sat == gps(2)));
    // Nothing was stored, not even the valid satellites
    assert!(rel.results().is_empty());
}
