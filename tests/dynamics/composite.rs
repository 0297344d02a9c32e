use super::epoch;
use crate::{data_path, gps, leo, test_states};
use podyn::dynamics::{EmpiricalForce, PointMass, Relativity};
use podyn::io::{ConfigRepr, ForceModelsCfg};
use podyn::linalg::{Matrix3, Vector3};
use podyn::{ForceModel, ForceModelSet, ParamFamily, SatVectorMap};

#[test]
fn composite_sums_contributions() {
    let _ = pretty_env_logger::try_init();

    let states = test_states();
    let mut prev_force = SatVectorMap::new();
    prev_force.insert(gps(1), Vector3::new(5e-9, 0.0, -1e-9));

    let mut emp = EmpiricalForce::new();
    emp.set_previous_epoch(epoch()).set_previous_force(prev_force);

    let mut set = ForceModelSet::with_model(Box::new(PointMass::earth()));
    set.add_model(Box::new(Relativity::new()));
    set.add_model(Box::new(emp.clone()));
    set.compute(epoch(), &states).unwrap();
    println!("{set}");

    let mut point_mass = PointMass::earth();
    let mut rel = Relativity::new();
    point_mass.compute(epoch(), &states).unwrap();
    rel.compute(epoch(), &states).unwrap();
    emp.compute(epoch(), &states).unwrap();

    assert_eq!(set.num_params(), 3);
    assert_eq!(set.param_offsets(), vec![0, 0, 0]);
    assert_eq!(set.models().len(), 3);

    for sat in states.keys() {
        let expected = point_mass.acceleration(sat).unwrap()
            + rel.acceleration(sat).unwrap()
            + emp.acceleration(sat).unwrap();
        approx::assert_relative_eq!(set.acceleration(sat).unwrap(), expected, max_relative = 1e-15);

        let expected_dr = point_mass.da_dr(sat).unwrap() + rel.da_dr(sat).unwrap();
        approx::assert_relative_eq!(set.da_dr(sat).unwrap(), expected_dr, max_relative = 1e-15);
        assert_eq!(set.da_dv(sat).unwrap(), rel.da_dv(sat).unwrap());
        assert_eq!(set.da_dp(sat).unwrap(), emp.da_dp(sat).unwrap());

        // Each family is kept separately
        assert_eq!(set.da_dparam(sat, ParamFamily::Gravity).unwrap().ncols(), 0);
        assert_eq!(set.da_dparam(sat, ParamFamily::Relativity).unwrap().ncols(), 0);
        assert_eq!(set.da_dparam(sat, ParamFamily::Empirical).unwrap().ncols(), 3);
        assert!(set.da_dparam(sat, ParamFamily::SolarPressure).is_err());

        assert_eq!(set.coeff_mat_of_eov(sat).unwrap().shape(), (9, 9));
    }
}

#[test]
fn composite_concatenates_parameters() {
    let states = test_states();
    let mut set = ForceModelSet::new(vec![
        Box::new(EmpiricalForce::new()),
        Box::new(Relativity::new()),
        Box::new(EmpiricalForce::new()),
    ]);
    set.compute(epoch(), &states).unwrap();

    assert_eq!(set.num_params(), 6);
    assert_eq!(set.param_offsets(), vec![0, 3, 3]);

    let da_dp = set.da_dp(&leo(1)).unwrap();
    assert_eq!(da_dp.shape(), (3, 6));
    assert_eq!(da_dp.columns(0, 3).into_owned(), Matrix3::identity());
    assert_eq!(da_dp.columns(3, 3).into_owned(), Matrix3::identity());
    assert_eq!(
        set.da_dparam(&leo(1), ParamFamily::Empirical).unwrap(),
        da_dp
    );

    let cmat = set.coeff_mat_of_eov(&leo(1)).unwrap();
    assert_eq!(cmat.shape(), (12, 12));
    assert!(cmat.rows(6, 6).iter().all(|x| *x == 0.0));
}

#[test]
fn empty_composite() {
    let states = test_states();
    let mut set = ForceModelSet::empty();
    set.compute(epoch(), &states).unwrap();
    for sat in states.keys() {
        assert_eq!(set.acceleration(sat).unwrap(), Vector3::zeros());
        assert_eq!(set.coeff_mat_of_eov(sat).unwrap().shape(), (6, 6));
    }
    assert!(set.acceleration(&gps(9)).is_err());
}

#[test]
fn composite_from_config() {
    let _ = pretty_env_logger::try_init();

    let named = ForceModelsCfg::load_named(data_path("force_models.yaml")).unwrap();
    assert_eq!(named.len(), 2);

    let lofi = named["lofi"].build().unwrap();
    assert_eq!(lofi.models().len(), 1);
    assert_eq!(lofi.num_params(), 0);

    let mut hifi = named["hifi"].build().unwrap();
    assert_eq!(hifi.models().len(), 3);
    assert_eq!(hifi.num_params(), 3);

    // The previous empirical forces are forwarded to the empirical model of the set
    let mut prev_force = SatVectorMap::new();
    prev_force.insert(gps(1), Vector3::new(0.0, 0.0, 2e-9));
    hifi.set_previous_params(ParamFamily::Empirical, epoch(), &prev_force);

    let states = test_states();
    hifi.compute(epoch(), &states).unwrap();

    let mut reference = ForceModelSet::new(vec![
        Box::new(PointMass::earth()),
        Box::new(Relativity::new()),
    ]);
    reference.compute(epoch(), &states).unwrap();

    let delta = hifi.acceleration(&gps(1)).unwrap() - reference.acceleration(&gps(1)).unwrap();
    approx::assert_relative_eq!(delta.norm(), 2e-9, max_relative = 1e-6);
    let delta_leo = hifi.acceleration(&leo(1)).unwrap() - reference.acceleration(&leo(1)).unwrap();
    assert_eq!(delta_leo, Vector3::zeros());

    assert!(ForceModelsCfg::load(data_path("missing.yaml")).is_err());
}
