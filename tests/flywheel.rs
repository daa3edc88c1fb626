use approx::assert_relative_eq;
use flywheel_plant::config::{FlywheelConfig, MotorConfig};
use flywheel_plant::error::ModelError;
use flywheel_plant::system::linear_system::LinearSystem;
use flywheel_plant::system::model::StateSpaceModel;
use flywheel_plant::system::plant::dc_motor::{DcMotor, MotorPreset};
use flywheel_plant::system::plant::flywheel::flywheel_system;
use flywheel_plant::system::response::FirstOrderResponse;
use flywheel_plant::units::{KilogramSquareMeters, Ohms};

fn motor(r: f64, kt: f64, kb: f64) -> DcMotor {
    DcMotor::from_constants(Ohms::new(r), kt, kb).unwrap()
}

fn build(m: &DcMotor, j: f64, g: f64) -> Result<LinearSystem, ModelError> {
    flywheel_system(m, KilogramSquareMeters::new(j), g)
}

#[test]
fn reference_motor_unity_gearing() {
    let sys = build(&motor(0.5, 0.02, 0.02), 0.001, 1.0).unwrap();
    assert_relative_eq!(sys.a_at(0, 0), -0.8, max_relative = 1e-9);
    assert_relative_eq!(sys.b_at(0, 0), 40.0, max_relative = 1e-9);
    assert_eq!(sys.c_at(0, 0), 1.0);
    assert_eq!(sys.d_at(0, 0), 0.0);
}

#[test]
fn reference_motor_two_to_one() {
    let sys = build(&motor(0.5, 0.02, 0.02), 0.001, 2.0).unwrap();
    assert_relative_eq!(sys.a_at(0, 0), -3.2, max_relative = 1e-9);
    assert_relative_eq!(sys.b_at(0, 0), 80.0, max_relative = 1e-9);
}

#[test]
fn model_is_single_input_single_output() {
    let sys = build(&motor(0.5, 0.02, 0.02), 0.001, 1.0).unwrap();
    assert_eq!((sys.states(), sys.inputs(), sys.outputs()), (1, 1, 1));
    assert_eq!(sys.num_states(), 1);
    assert_eq!(sys.a().shape(), (1, 1));
    assert_eq!(sys.b().shape(), (1, 1));
    assert_eq!(sys.c().shape(), (1, 1));
    assert_eq!(sys.d().shape(), (1, 1));
}

#[test]
fn formula_holds_across_parameter_grid() {
    for &(r, kt, kb) in &[(0.5, 0.02, 0.02), (0.09, 0.018, 0.021), (2.0, 0.3, 0.25)] {
        let m = motor(r, kt, kb);
        for &j in &[1e-4, 0.001, 0.05, 3.0] {
            for &g in &[0.25, 1.0, 3.0, 20.0] {
                let sys = build(&m, j, g).unwrap();
                assert_relative_eq!(
                    sys.a_at(0, 0),
                    -g * g * kt * kb / (r * j),
                    max_relative = 1e-9
                );
                assert_relative_eq!(sys.b_at(0, 0), g * kt / (r * j), max_relative = 1e-9);
                assert_eq!(sys.c_at(0, 0), 1.0);
                assert_eq!(sys.d_at(0, 0), 0.0);
            }
        }
    }
}

#[test]
fn builder_is_deterministic() {
    let m = DcMotor::preset(MotorPreset::Falcon500, 2).unwrap();
    let first = build(&m, 0.004, 1.3).unwrap();
    let second = build(&m, 0.004, 1.3).unwrap();
    assert_eq!(first, second);
    assert!(first.approx_eq(&second, 0.0));
}

#[test]
fn reversed_gearing_flips_b_only() {
    let m = motor(0.5, 0.02, 0.02);
    let forward = build(&m, 0.001, 2.0).unwrap();
    let reversed = build(&m, 0.001, -2.0).unwrap();
    assert_eq!(reversed.a_at(0, 0), forward.a_at(0, 0));
    assert_eq!(reversed.b_at(0, 0), -forward.b_at(0, 0));
    assert_eq!(reversed.c_at(0, 0), 1.0);
    assert_eq!(reversed.d_at(0, 0), 0.0);
}

#[test]
fn non_positive_inertia_rejected() {
    let m = motor(0.5, 0.02, 0.02);
    for j in [0.0, -0.001, f64::NAN] {
        assert!(matches!(
            build(&m, j, 1.0),
            Err(ModelError::InvalidParameter { name: "moment_of_inertia", .. })
        ));
    }
}

#[test]
fn zero_gear_ratio_rejected() {
    let m = motor(0.5, 0.02, 0.02);
    assert!(matches!(
        build(&m, 0.001, 0.0),
        Err(ModelError::InvalidParameter { name: "gear_ratio", .. })
    ));
}

#[test]
fn overflowing_inertia_rejected() {
    let m = motor(0.5, 0.02, 0.02);
    assert!(matches!(
        build(&m, 1e-320, 1.0),
        Err(ModelError::InvalidParameter { name: "A", .. })
    ));
}

#[test]
fn overflowing_gear_ratio_rejected() {
    let m = motor(0.5, 0.02, 0.02);
    let err = build(&m, 0.001, 1e200).unwrap_err();
    assert!(matches!(
        err,
        ModelError::InvalidParameter { name: "A", value, .. } if value.is_infinite()
    ));
}

#[test]
fn steady_state_speed_matches_motor_free_speed() {
    // With unity gearing and no load, the flywheel settles at the motor's free speed.
    let m = motor(0.5, 0.02, 0.02);
    let sys = build(&m, 0.001, 1.0).unwrap();
    let response = FirstOrderResponse::from_model(&sys).unwrap();
    assert_relative_eq!(response.steady_state(12.0), m.free_speed().value(), max_relative = 1e-9);
    assert_relative_eq!(response.time_constant(), 1.25, max_relative = 1e-9);
}

#[test]
fn geared_steady_state_is_free_speed_over_ratio() {
    let m = DcMotor::preset(MotorPreset::Neo, 1).unwrap();
    let sys = build(&m, 0.002, 4.0).unwrap();
    let response = FirstOrderResponse::from_model(&sys).unwrap();
    // ω_ss = V·Kv / G
    assert_relative_eq!(response.steady_state(12.0), 12.0 * m.kv() / 4.0, max_relative = 1e-9);
}

#[test]
fn shipped_config_builds_limited_model() {
    let config = FlywheelConfig::from_toml(include_str!("../configs/flywheel.toml")).unwrap();
    assert_eq!(
        config.motor,
        MotorConfig::Preset {
            name: MotorPreset::Neo,
            count: 2
        }
    );
    let model = config.build_model().unwrap();
    assert_eq!(model.max_input(), Some(12.0));
    let expected = build(&DcMotor::preset(MotorPreset::Neo, 2).unwrap(), 0.0032, 1.5)
        .unwrap()
        .with_input_limit(12.0)
        .unwrap();
    assert!(model.approx_eq(&expected, 1e-12));
}

#[test]
fn output_follows_state_with_clamped_input() {
    let sys = build(&motor(0.5, 0.02, 0.02), 0.001, 1.0)
        .unwrap()
        .with_input_limit(12.0)
        .unwrap();
    let y = sys
        .calculate_y(&nalgebra::dvector![250.0], &nalgebra::dvector![20.0])
        .unwrap();
    assert_relative_eq!(y[0], 250.0);
}

#[test]
fn limited_step_response_saturates_at_max_voltage() {
    let sys = build(&motor(0.5, 0.02, 0.02), 0.001, 1.0)
        .unwrap()
        .with_input_limit(12.0)
        .unwrap();
    let resp = FirstOrderResponse::from_model(&sys).unwrap();
    assert_relative_eq!(resp.steady_state(24.0), 600.0, epsilon = 1e-9);
    assert_relative_eq!(resp.output_at(60.0, 24.0), 600.0, epsilon = 1e-6);
}

#[test]
fn config_step_above_max_voltage_rejected() {
    let mut config = FlywheelConfig::default();
    config.plot.voltage = 24.0;
    assert!(config.validate().is_err());
}
