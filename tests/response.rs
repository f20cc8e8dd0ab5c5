// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use fixtures::test_models::*;

use control_analyzer::model::{SystemKind, SystemModel};
use control_analyzer::response::{self, Trajectory};
use control_analyzer::time::TimeGrid;
use control_analyzer::AnalysisError;

use approx::assert_relative_eq;

const SAMPLES: usize = 1000;

fn assert_uniform_axis(trajectory: &Trajectory) {
    assert_eq!(trajectory.len(), SAMPLES);
    assert_eq!(trajectory.dt(), 0.01);
    for (i, sample) in trajectory.iter().enumerate() {
        assert_eq!(sample.time, i as f64 * 0.01);
    }
}

mod test_second_order {

    use super::*;

    #[test]
    fn test_underdamped_starts_at_zero_and_settles_at_one() {
        for zeta in [0.3, 0.5, 0.7, 0.9] {
            let model = SystemModel::second_order(2.0, zeta).unwrap();
            let trajectory = response::step_response(&model);

            assert_uniform_axis(&trajectory);
            assert_relative_eq!(trajectory.samples()[0].output, 0.0, epsilon = 1e-12);
            assert_relative_eq!(trajectory.final_value().unwrap(), 1.0, epsilon = 2e-2);
        }
    }

    #[test]
    fn test_setpoint_is_unit_and_no_control_is_recorded() {
        let trajectory = response::step_response(&make_underdamped());
        assert!(trajectory.iter().all(|s| s.setpoint == 1.0));
        assert!(trajectory.iter().all(|s| s.control.is_none()));
    }

    /// The closed form at wn = 2, zeta = 0.7 and t = 1
    #[test]
    fn test_underdamped_closed_form_value() {
        let trajectory = response::step_response(&make_underdamped());
        assert_relative_eq!(
            trajectory.samples()[100].output,
            0.725_713_130_795_292_8,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            response::second_order_step(2.0, 0.3, 1.0),
            1.018_630_730_160_703,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_critically_damped_is_monotonic() {
        let trajectory = response::step_response(&make_critically_damped());
        assert_eq!(trajectory.samples()[0].output, 0.0);
        for pair in trajectory.samples().windows(2) {
            assert!(pair[1].output >= pair[0].output);
        }
        assert!(trajectory.outputs().all(|y| y < 1.0));
    }

    #[test]
    fn test_overdamped_starts_at_zero_and_is_monotonic() {
        let trajectory = response::step_response(&make_overdamped());
        assert_relative_eq!(trajectory.samples()[0].output, 0.0, epsilon = 1e-12);
        for pair in trajectory.samples().windows(2) {
            assert!(pair[1].output >= pair[0].output);
        }
        // The slow pole at -0.268 rad/s has not settled after 10 s
        assert_relative_eq!(
            trajectory.final_value().unwrap(),
            0.925_897_637_185_721_4,
            epsilon = 1e-9
        );
    }

    /// Overdamped responses approach the critically damped one as zeta -> 1+
    #[test]
    fn test_overdamped_branch_is_continuous_at_critical_damping() {
        for t in [0.5, 1.0, 2.0, 5.0] {
            assert_relative_eq!(
                response::second_order_step(1.0, 1.0 + 1e-6, t),
                response::second_order_step(1.0, 1.0, t),
                epsilon = 1e-4
            );
        }
    }

    /// RK4 integration of the mass-spring-damper realization agrees with the closed form
    #[test]
    fn test_numerical_integration_matches_closed_form() {
        let grid = TimeGrid::default();
        for model in [
            make_underdamped(),
            make_lightly_damped(),
            make_critically_damped(),
            make_overdamped(),
        ] {
            let analytic = response::step_response_on(&model, &grid);
            let numeric = response::integrate_second_order(&model, &grid).unwrap();
            assert_eq!(analytic.len(), numeric.len());
            for (a, n) in analytic.iter().zip(numeric.iter()) {
                assert_eq!(a.time, n.time);
                assert_relative_eq!(a.output, n.output, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_numerical_integration_rejects_other_kinds() {
        let grid = TimeGrid::default();
        for model in [make_first_order(), make_pid()] {
            assert!(matches!(
                response::integrate_second_order(&model, &grid),
                Err(AnalysisError::InvalidParameter { name: "kind", .. })
            ));
        }
    }
}

mod test_first_order {

    use super::*;

    #[test]
    fn test_first_order_tracks_its_gain() {
        let model = make_first_order();
        let trajectory = response::step_response(&model);

        assert_uniform_axis(&trajectory);
        assert_eq!(trajectory.samples()[0].output, 0.0);
        assert!(trajectory.iter().all(|s| s.setpoint == 2.0));

        // One time constant reaches 63.2 % of K
        assert_relative_eq!(
            trajectory.samples()[50].output,
            2.0 * (1.0 - (-1.0f64).exp()),
            epsilon = 1e-12
        );
        assert_relative_eq!(trajectory.final_value().unwrap(), 2.0, epsilon = 1e-6);
    }
}

mod test_pid_loop {

    use super::*;

    #[test]
    fn test_pid_loop_first_samples() {
        let trajectory = response::step_response(&make_pid());
        assert_uniform_axis(&trajectory);

        let first = trajectory.samples()[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.setpoint, 1.0);
        assert_relative_eq!(first.control.unwrap(), 11.005, epsilon = 1e-12);
        assert_relative_eq!(first.output, 0.11005, epsilon = 1e-12);

        let second = trajectory.samples()[1];
        assert_relative_eq!(second.control.unwrap(), -0.201_100_25, epsilon = 1e-12);
        assert_relative_eq!(second.output, 0.106_938_497_5, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_loop_final_value() {
        let trajectory = response::step_response(&make_pid());
        let last = trajectory.samples().last().unwrap();
        assert_relative_eq!(last.output, 0.973_730_279_027_486_1, epsilon = 1e-9);
        assert_relative_eq!(last.control.unwrap(), 0.981_507_925_807_184_9, epsilon = 1e-9);
        assert!(trajectory.iter().all(|s| s.control.is_some()));
    }
}

mod test_time_grid {

    use super::*;

    #[test]
    fn test_custom_grid() {
        let grid = TimeGrid::new(0.1, 2.0).unwrap();
        for kind in SystemKind::ALL {
            let model = SystemModel::default().with_kind(kind).unwrap();
            let trajectory = response::step_response_on(&model, &grid);
            assert_eq!(trajectory.len(), 20);
            assert_eq!(trajectory.dt(), 0.1);
            assert_relative_eq!(trajectory.samples()[19].time, 1.9, epsilon = 1e-12);
        }
    }

    /// The default axis is the one `step_response` uses
    #[test]
    fn test_step_response_uses_default_grid() {
        let model = make_underdamped();
        assert_eq!(
            response::step_response(&model),
            response::step_response_on(&model, &TimeGrid::default())
        );
    }
}
