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

use control_analyzer::error::AnalysisError;
use control_analyzer::model::{SystemParams, SystemParamsBuilder};
use control_analyzer::tuning::{self, TuningRule};

use approx::assert_relative_eq;
use core::f64::consts::PI;

fn make_params(k: f64, tau: f64, wn: f64) -> SystemParams {
    SystemParamsBuilder::default()
        .k(k)
        .tau(tau)
        .wn(wn)
        .build()
        .unwrap()
}

mod test_ziegler_nichols {

    use super::*;

    /// Ku = 4, Pu = 2π / wn
    #[test]
    fn test_gains_follow_the_ultimate_cycle() {
        let tuned = tuning::tune(&make_params(1.0, 1.0, 2.0), TuningRule::ZieglerNichols).unwrap();

        assert_relative_eq!(tuned.kp(), 2.4);
        assert_relative_eq!(tuned.ki(), 4.8 / PI);
        assert_relative_eq!(tuned.kd(), 0.3 * PI);
    }

    #[test]
    fn test_ignores_plant_gain_and_time_constant() {
        let a = tuning::tune(&make_params(1.0, 1.0, 3.0), TuningRule::ZieglerNichols).unwrap();
        let b = tuning::tune(&make_params(5.0, 0.0, 3.0), TuningRule::ZieglerNichols).unwrap();
        assert_eq!(a.gains(), b.gains());
    }

    #[test]
    fn test_zero_natural_frequency() {
        let err = tuning::tune(&make_params(1.0, 1.0, 0.0), TuningRule::ZieglerNichols).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DivisionByZero {
                rule: "Ziegler-Nichols",
                parameter: "wn"
            }
        );
    }
}

mod test_cohen_coon {

    use super::*;

    #[test]
    fn test_unit_plant() {
        let tuned = tuning::tune(&make_params(1.0, 1.0, 2.0), TuningRule::CohenCoon).unwrap();

        assert_relative_eq!(tuned.kp(), 13.75, epsilon = 1e-12);
        assert_relative_eq!(tuned.ki(), 6.336_956_521_739_131, epsilon = 1e-12);
        assert_relative_eq!(tuned.kd(), 4.488_970_588_235_294, epsilon = 1e-12);
    }

    #[test]
    fn test_fast_high_gain_plant() {
        let tuned = tuning::tune(&make_params(2.0, 0.5, 2.0), TuningRule::CohenCoon).unwrap();

        assert_relative_eq!(tuned.kp(), 3.5, epsilon = 1e-12);
        assert_relative_eq!(tuned.ki(), 3.733_333_333_333_334, epsilon = 1e-12);
        assert_relative_eq!(tuned.kd(), 0.498_076_923_076_923_1, epsilon = 1e-12);
    }

    /// Dead time equal to the time constant zeroes the derivative term
    #[test]
    fn test_dead_time_equal_to_time_constant() {
        let tuned = tuning::tune(&make_params(1.0, 0.1, 2.0), TuningRule::CohenCoon).unwrap();

        assert_relative_eq!(tuned.kp(), 1.6, epsilon = 1e-12);
        assert_relative_eq!(tuned.ki(), 51.2, epsilon = 1e-9);
        assert_eq!(tuned.kd(), 0.0);
    }

    #[test]
    fn test_zero_gain_or_time_constant() {
        let err = tuning::tune(&make_params(0.0, 1.0, 2.0), TuningRule::CohenCoon).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DivisionByZero { parameter: "k", .. }
        ));

        let err = tuning::tune(&make_params(1.0, 0.0, 2.0), TuningRule::CohenCoon).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DivisionByZero { parameter: "tau", .. }
        ));
    }

    /// At tau = 0.08 the dead-time ratio is 1.25 and the integral time vanishes
    #[test]
    fn test_vanishing_integral_time() {
        let err = tuning::tune(&make_params(1.0, 0.08, 2.0), TuningRule::CohenCoon).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DivisionByZero {
                rule: "Cohen-Coon",
                parameter: "integral time"
            }
        );
    }
}

mod test_imc {

    use super::*;

    /// lambda = tau / 3, so kp = 3 / k regardless of tau
    #[test]
    fn test_gains() {
        let tuned = tuning::tune(&make_params(1.0, 2.0, 2.0), TuningRule::Imc).unwrap();
        assert_relative_eq!(tuned.kp(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(tuned.ki(), 1.5, epsilon = 1e-12);
        assert_eq!(tuned.kd(), 0.0);

        let tuned = tuning::tune(&make_params(4.0, 0.5, 2.0), TuningRule::Imc).unwrap();
        assert_relative_eq!(tuned.kp(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(tuned.ki(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_gain_or_time_constant() {
        for params in [make_params(0.0, 1.0, 2.0), make_params(1.0, 0.0, 2.0)] {
            let err = tuning::tune(&params, TuningRule::Imc).unwrap_err();
            assert!(matches!(
                err,
                AnalysisError::DivisionByZero {
                    rule: "Internal Model Control (IMC)",
                    ..
                }
            ));
        }
    }
}

/// Tuning only ever replaces the controller gains
#[test]
fn test_plant_parameters_are_untouched() {
    let params = SystemParamsBuilder::default()
        .k(1.5)
        .tau(0.8)
        .wn(3.0)
        .zeta(0.4)
        .build()
        .unwrap();

    for rule in TuningRule::ALL {
        let tuned = tuning::tune(&params, rule).unwrap();
        assert_eq!(tuned.k(), params.k());
        assert_eq!(tuned.tau(), params.tau());
        assert_eq!(tuned.wn(), params.wn());
        assert_eq!(tuned.zeta(), params.zeta());
    }
}

#[test]
fn test_rule_names() {
    let names: Vec<String> = TuningRule::ALL.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        names,
        ["Ziegler-Nichols", "Cohen-Coon", "Internal Model Control (IMC)"]
    );
    assert!(TuningRule::ALL.iter().all(|r| !r.description().is_empty()));
}
