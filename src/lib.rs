#![warn(missing_docs)]

//! # Control System Analyzer
//!
//! This library computes the time- and frequency-domain behavior of three families of linear
//! control systems and extracts the metrics a control engineer reads off their plots:
//!
//! - a first-order lag `K / (tau s + 1)`,
//! - a canonical second-order system `wn² / (s² + 2 zeta wn s + wn²)`,
//! - a first-order plant in closed loop with a PID controller.
//!
//! ## Features
//!
//! - Step responses: closed-form for the open-loop families, forward-Euler simulation of the PID
//!   loop, and an RK4 cross-check of the second-order closed form.
//! - Transient metrics (rise time, peak, overshoot, 2 % settling time, steady-state error) and
//!   integral criteria (IAE, ISE, ITAE).
//! - Bode and Nyquist samples over a logarithmic sweep from 0.01 to 100 rad/s.
//! - A parametric pole locus and a stability verdict with gain and phase margins.
//! - Ziegler-Nichols, Cohen-Coon and IMC tuning rules.
//! - Side-by-side comparison of saved configurations on a shared time axis.
//!
//! Every analysis is a pure function of an immutable [`model::SystemModel`]; the only state lives
//! in [`session::Session`], which a front end may use to hold the current configuration.
//!
//! ## Usage
//!
//! ### One-shot analyses
//!
//! ```rust
//! use control_analyzer::model::SystemModel;
//! use control_analyzer::{performance, response, stability};
//!
//! let model = SystemModel::second_order(2.0, 0.7).expect("Invalid model");
//!
//! let trajectory = response::step_response(&model);
//! assert_eq!(trajectory.len(), 1000);
//!
//! let metrics = performance::analyze(&trajectory).expect("Empty trajectory");
//! assert!(metrics.overshoot_pct > 4.5 && metrics.overshoot_pct < 4.7);
//!
//! let verdict = stability::analyze_stability(&model);
//! assert!(verdict.is_stable);
//! ```
//!
//! ### Keeping a current configuration
//!
//! ```rust
//! use control_analyzer::model::{SystemKind, SystemModel, SystemParamsBuilder};
//! use control_analyzer::session::Session;
//! use control_analyzer::tuning::TuningRule;
//!
//! let mut session = Session::new(SystemModel::default()).expect("Invalid model");
//!
//! let params = SystemParamsBuilder::default()
//!     .k(1.0)
//!     .tau(2.0)
//!     .build()
//!     .expect("Invalid parameters");
//! session.set_model(SystemKind::Pid, params).expect("Invalid model");
//!
//! // Replaces the gains of the current model and recomputes every analysis
//! let tuned = session.tune_controller(TuningRule::Imc).expect("Tuning failed");
//! assert_eq!(session.model().params().kp(), tuned.kp());
//!
//! // A rejected update keeps the previous model
//! assert!(session.set_model(SystemKind::Pid, params).is_ok());
//! let mut bad = params;
//! bad.set_tau(0.0).unwrap();
//! assert!(session.set_model(SystemKind::FirstOrder, bad).is_err());
//! assert_eq!(session.model().kind(), SystemKind::Pid);
//! ```
//!
//! ## License
//!
//! MIT

/// Error type and result alias.
pub mod error;

/// System families, parameter sets and validated models.
pub mod model;

/// The fixed-step time axis of the simulators.
pub mod time;

/// The discrete PID law used by the closed-loop simulation.
pub mod pid;

/// Plant dynamics and integrators.
pub mod plant;

/// Step responses.
pub mod response;

/// Transient metrics and integral criteria.
pub mod performance;

/// Bode and Nyquist sampling.
pub mod frequency;

/// Pole locus of the second-order family.
pub mod root_locus;

/// Stability classification and margins.
pub mod stability;

/// PID tuning rules.
pub mod tuning;

/// Comparison of saved configurations.
pub mod comparison;

/// One-pass recomputation of every analysis.
pub mod analysis;

/// Current-configuration holder for front ends.
pub mod session;

pub use analysis::Analysis;
pub use error::{AnalysisError, AnalysisResult};
pub use model::{SystemKind, SystemModel, SystemParams};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
