// System families and their validated parameter sets
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

use core::fmt;

use crate::error::{AnalysisError, AnalysisResult};

/// The three system families the engine knows how to analyze.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SystemKind {
    /// First-order lag `K / (tau s + 1)`.
    FirstOrder,
    /// Canonical second-order system `wn² / (s² + 2 zeta wn s + wn²)`.
    SecondOrder,
    /// First-order plant in closed loop with a PID controller.
    Pid,
}

impl SystemKind {
    /// Every kind, in the order a selector would list them.
    pub const ALL: [SystemKind; 3] = [
        SystemKind::SecondOrder,
        SystemKind::Pid,
        SystemKind::FirstOrder,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            SystemKind::FirstOrder => "First-Order System",
            SystemKind::SecondOrder => "Second-Order System",
            SystemKind::Pid => "PID Controlled System",
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of every system family.
///
/// All fields are carried regardless of the kind they are used with, so switching kinds never
/// loses a value the user typed in. Only finiteness is checked here; the constraints that depend
/// on the kind are enforced by [`SystemModel::new`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemParams {
    /// Plant (static) gain.
    /// Defaults to 1.0.
    k: f64,

    /// Plant time constant in seconds.
    /// Defaults to 1.0.
    tau: f64,

    /// Natural frequency of the second-order system in rad/s.
    /// Defaults to 2.0.
    wn: f64,

    /// Damping ratio of the second-order system. Its sign decides stability.
    /// Defaults to 0.7.
    zeta: f64,

    /// Proportional gain.
    /// Defaults to 1.0.
    kp: f64,

    /// Integral gain.
    /// Defaults to 0.5.
    ki: f64,

    /// Derivative gain.
    /// Defaults to 0.1.
    kd: f64,
}

impl Default for SystemParams {
    fn default() -> Self {
        SystemParams {
            k: 1.0,
            tau: 1.0,
            wn: 2.0,
            zeta: 0.7,
            kp: 1.0,
            ki: 0.5,
            kd: 0.1,
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> AnalysisResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::invalid(name, value, "must be finite"))
    }
}

impl SystemParams {
    /// Returns the plant gain.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Returns the plant time constant.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Returns the natural frequency.
    pub fn wn(&self) -> f64 {
        self.wn
    }

    /// Returns the damping ratio.
    pub fn zeta(&self) -> f64 {
        self.zeta
    }

    /// Returns the proportional gain.
    pub fn kp(&self) -> f64 {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> f64 {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Convenience method that returns the proportional, integral, and derivative gains together
    /// as a tuple.
    pub fn gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }

    /// Sets the plant gain.
    ///
    /// # Returns
    /// - `Ok(())` if the gain was set successfully.
    /// - `Err(AnalysisError::InvalidParameter)` if the gain is not finite. The old value is kept.
    pub fn set_k(&mut self, k: f64) -> AnalysisResult<()> {
        self.k = check_finite("k", k)?;
        Ok(())
    }

    /// Sets the plant time constant. Zero is accepted here and rejected when the parameters are
    /// bound to a first-order or PID model.
    pub fn set_tau(&mut self, tau: f64) -> AnalysisResult<()> {
        self.tau = check_finite("tau", tau)?;
        Ok(())
    }

    /// Sets the natural frequency.
    pub fn set_wn(&mut self, wn: f64) -> AnalysisResult<()> {
        self.wn = check_finite("wn", wn)?;
        Ok(())
    }

    /// Sets the damping ratio. Negative values are valid and describe unstable systems.
    pub fn set_zeta(&mut self, zeta: f64) -> AnalysisResult<()> {
        self.zeta = check_finite("zeta", zeta)?;
        Ok(())
    }

    /// Sets the proportional gain.
    pub fn set_kp(&mut self, kp: f64) -> AnalysisResult<()> {
        self.kp = check_finite("kp", kp)?;
        Ok(())
    }

    /// Sets the integral gain.
    pub fn set_ki(&mut self, ki: f64) -> AnalysisResult<()> {
        self.ki = check_finite("ki", ki)?;
        Ok(())
    }

    /// Sets the derivative gain.
    pub fn set_kd(&mut self, kd: f64) -> AnalysisResult<()> {
        self.kd = check_finite("kd", kd)?;
        Ok(())
    }

    /// Sets the three controller gains together. Either all of them are applied or none is.
    pub fn set_gains(&mut self, kp: f64, ki: f64, kd: f64) -> AnalysisResult<()> {
        let kp = check_finite("kp", kp)?;
        let ki = check_finite("ki", ki)?;
        let kd = check_finite("kd", kd)?;
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        Ok(())
    }
}

/// Builder for [`SystemParams`]. Unset fields keep their defaults.
///
/// ```rust
/// use control_analyzer::model::SystemParamsBuilder;
///
/// let params = SystemParamsBuilder::default()
///     .wn(4.0)
///     .zeta(0.3)
///     .build()
///     .expect("Invalid parameters");
/// assert_eq!(params.wn(), 4.0);
/// assert_eq!(params.tau(), 1.0);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemParamsBuilder {
    k: Option<f64>,
    tau: Option<f64>,
    wn: Option<f64>,
    zeta: Option<f64>,
    kp: Option<f64>,
    ki: Option<f64>,
    kd: Option<f64>,
}

impl SystemParamsBuilder {
    /// Sets the plant gain.
    pub fn k(mut self, k: f64) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets the plant time constant.
    pub fn tau(mut self, tau: f64) -> Self {
        self.tau = Some(tau);
        self
    }

    /// Sets the natural frequency.
    pub fn wn(mut self, wn: f64) -> Self {
        self.wn = Some(wn);
        self
    }

    /// Sets the damping ratio.
    pub fn zeta(mut self, zeta: f64) -> Self {
        self.zeta = Some(zeta);
        self
    }

    /// Sets the proportional gain.
    pub fn kp(mut self, kp: f64) -> Self {
        self.kp = Some(kp);
        self
    }

    /// Sets the integral gain.
    pub fn ki(mut self, ki: f64) -> Self {
        self.ki = Some(ki);
        self
    }

    /// Sets the derivative gain.
    pub fn kd(mut self, kd: f64) -> Self {
        self.kd = Some(kd);
        self
    }

    /// Validates every value that was set and assembles the parameter set. The first invalid
    /// value is reported.
    pub fn build(self) -> AnalysisResult<SystemParams> {
        let mut params = SystemParams::default();
        if let Some(k) = self.k {
            params.set_k(k)?;
        }
        if let Some(tau) = self.tau {
            params.set_tau(tau)?;
        }
        if let Some(wn) = self.wn {
            params.set_wn(wn)?;
        }
        if let Some(zeta) = self.zeta {
            params.set_zeta(zeta)?;
        }
        if let Some(kp) = self.kp {
            params.set_kp(kp)?;
        }
        if let Some(ki) = self.ki {
            params.set_ki(ki)?;
        }
        if let Some(kd) = self.kd {
            params.set_kd(kd)?;
        }
        Ok(params)
    }
}

/// An immutable, validated system configuration.
///
/// Models are plain values: every edit builds a new one, and anything that stores a model (such
/// as a comparison entry) owns its own copy.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedModel")
)]
pub struct SystemModel {
    kind: SystemKind,
    params: SystemParams,
}

impl Default for SystemModel {
    fn default() -> Self {
        SystemModel {
            kind: SystemKind::SecondOrder,
            params: SystemParams::default(),
        }
    }
}

impl SystemModel {
    /// Binds a parameter set to a system family, enforcing the invariants of that family.
    ///
    /// # Errors
    /// - `InvalidParameter` if `wn <= 0` for a second-order model
    /// - `InvalidParameter` if `tau == 0` for a first-order or PID model
    /// - `InvalidParameter` if any parameter is not finite
    pub fn new(kind: SystemKind, params: SystemParams) -> AnalysisResult<Self> {
        let SystemParams {
            k,
            tau,
            wn,
            zeta,
            kp,
            ki,
            kd,
        } = params;
        for (name, value) in [
            ("k", k),
            ("tau", tau),
            ("wn", wn),
            ("zeta", zeta),
            ("kp", kp),
            ("ki", ki),
            ("kd", kd),
        ] {
            check_finite(name, value)?;
        }

        match kind {
            SystemKind::SecondOrder if wn <= 0.0 => {
                return Err(AnalysisError::invalid("wn", wn, "must be positive"));
            }
            SystemKind::FirstOrder | SystemKind::Pid if tau == 0.0 => {
                return Err(AnalysisError::invalid("tau", tau, "must be non-zero"));
            }
            _ => {}
        }

        Ok(SystemModel { kind, params })
    }

    /// Shorthand for a second-order model with default values for the unused parameters.
    pub fn second_order(wn: f64, zeta: f64) -> AnalysisResult<Self> {
        let params = SystemParamsBuilder::default().wn(wn).zeta(zeta).build()?;
        Self::new(SystemKind::SecondOrder, params)
    }

    /// Shorthand for a first-order model with default values for the unused parameters.
    pub fn first_order(k: f64, tau: f64) -> AnalysisResult<Self> {
        let params = SystemParamsBuilder::default().k(k).tau(tau).build()?;
        Self::new(SystemKind::FirstOrder, params)
    }

    /// Shorthand for a PID-controlled first-order plant.
    pub fn pid(k: f64, tau: f64, kp: f64, ki: f64, kd: f64) -> AnalysisResult<Self> {
        let params = SystemParamsBuilder::default()
            .k(k)
            .tau(tau)
            .kp(kp)
            .ki(ki)
            .kd(kd)
            .build()?;
        Self::new(SystemKind::Pid, params)
    }

    /// Returns the system family.
    pub fn kind(&self) -> SystemKind {
        self.kind
    }

    /// Returns the parameter set.
    pub fn params(&self) -> &SystemParams {
        &self.params
    }

    /// Builds a new model of the same kind with a different parameter set.
    pub fn with_params(&self, params: SystemParams) -> AnalysisResult<Self> {
        Self::new(self.kind, params)
    }

    /// Builds a new model of another kind with the same parameter set.
    pub fn with_kind(&self, kind: SystemKind) -> AnalysisResult<Self> {
        Self::new(kind, self.params)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedModel {
    kind: SystemKind,
    params: SystemParams,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedModel> for SystemModel {
    type Error = AnalysisError;

    fn try_from(value: UncheckedModel) -> Result<Self, Self::Error> {
        SystemModel::new(value.kind, value.params)
    }
}
