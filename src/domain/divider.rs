//! Resistive divider search.
//!
//! The search runs in three steps:
//!
//! 1. [`Divider::solve_r2`] computes the exact R2 for every candidate R1.
//! 2. [`Divider::build_approximations`] snaps every ideal R2 to an available
//!    value (see [`snap_to_nearest`]) and pairs it with every candidate R1.
//! 3. [`pick_best`] selects the pair whose output is closest to the target.
//!
//! [`Divider::best_match`] runs all three.

use nonempty::NonEmpty;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use super::{candidates::CandidateSet, resistance::Ohms};

/// A validated pair of input and target output voltages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    vin: f64,
    vout: f64,
}

impl Divider {
    /// Creates a divider that steps `vin` down to `vout`.
    ///
    /// # Errors
    ///
    /// - [`Error::NonFiniteVoltage`] if either voltage is infinite or NaN
    /// - [`Error::InvalidVoltageRange`] if `vin` is not strictly greater than
    ///   `vout`
    /// - [`Error::ZeroTargetVoltage`] if `vout` is zero or negative, which
    ///   leaves the percent error undefined
    pub fn new(vin: f64, vout: f64) -> Result<Self, Error> {
        if !vin.is_finite() || !vout.is_finite() {
            return Err(Error::NonFiniteVoltage { vin, vout });
        }
        if vin <= vout {
            return Err(Error::InvalidVoltageRange { vin, vout });
        }
        if vout <= 0.0 {
            return Err(Error::ZeroTargetVoltage(vout));
        }
        Ok(Self { vin, vout })
    }

    /// The R2 that gives exactly the target output for the given R1.
    ///
    /// ```
    /// use divider::{Divider, Ohms};
    ///
    /// let divider = Divider::new(5.0, 3.3).unwrap();
    /// let r2 = divider.solve_r2(Ohms::new(10_000.0).unwrap());
    /// assert!((r2.get() - 29_411.76).abs() < 0.01);
    /// ```
    #[must_use]
    pub fn solve_r2(&self, r1: Ohms) -> Ohms {
        Ohms::from_raw((self.vin * r1.get()) / (self.vin - self.vout))
    }

    /// Solves R2 for every candidate, in candidate order.
    #[must_use]
    pub fn ideal_r2_list(&self, candidates: &CandidateSet) -> Vec<Ohms> {
        candidates.iter().map(|r1| self.solve_r2(r1)).collect()
    }

    /// The output voltage this divider produces with the given resistors.
    #[must_use]
    pub fn output_voltage(&self, r1: Ohms, r2: Ohms) -> f64 {
        (self.vin * r2.get()) / (r1.get() + r2.get())
    }

    /// The signed deviation of `vout` from the target, as a percentage of
    /// the target.
    #[must_use]
    pub fn error_percent(&self, vout: f64) -> f64 {
        ((vout - self.vout) / self.vout) * 100.0
    }

    /// Pairs every candidate R1 with every ideal R2, after snapping each
    /// ideal R2 to the candidate set.
    ///
    /// Results are ordered with R1 as the outer loop and the ideal R2 list as
    /// the inner loop, so the output holds `candidates.len() *
    /// ideal_r2s.len()` entries.
    #[must_use]
    pub fn build_approximations(
        &self,
        ideal_r2s: &[Ohms],
        candidates: &CandidateSet,
    ) -> Vec<DividerResult> {
        let snapped: Vec<Ohms> = ideal_r2s
            .iter()
            .map(|&ideal| snap_to_nearest(candidates, ideal).unwrap_or(Ohms::ZERO))
            .collect();

        let mut results = Vec::with_capacity(candidates.len() * snapped.len());
        for r1 in candidates.iter() {
            for &r2 in &snapped {
                let vout = self.output_voltage(r1, r2);
                results.push(DividerResult {
                    r1,
                    r2,
                    vout,
                    error_percent: self.error_percent(vout),
                });
            }
        }
        results
    }

    /// Runs the full search over `candidates` and returns the closest match.
    #[instrument(level = "debug", skip(candidates), fields(candidates = candidates.len()))]
    #[must_use]
    pub fn best_match(&self, candidates: &CandidateSet) -> DividerResult {
        let ideal_r2s = self.ideal_r2_list(candidates);
        let results = NonEmpty::from_vec(self.build_approximations(&ideal_r2s, candidates))
            .expect("a non-empty candidate set always yields results");
        debug!(pairs = results.len(), "evaluated resistor pairs");

        let best = pick_best(self.vout, &results).clone();
        debug!(r1 = best.r1.get(), r2 = best.r2.get(), vout = best.vout, "selected pair");
        best
    }
}

/// Finds the largest candidate that does not exceed `target`.
///
/// The target is truncated to a whole number of ohms before comparing. When
/// several candidates share the winning value, the first one is returned.
/// Returns `None` if every candidate is larger than the truncated target.
#[must_use]
pub fn snap_to_nearest(candidates: &CandidateSet, target: Ohms) -> Option<Ohms> {
    let limit = target.get().floor();
    candidates
        .iter()
        .filter(|candidate| candidate.get() <= limit)
        .fold(None, |best: Option<Ohms>, candidate| match best {
            Some(best) if best.get() >= candidate.get() => Some(best),
            _ => Some(candidate),
        })
}

/// Returns the result whose output voltage is closest to `target`.
///
/// Ties go to whichever result comes first.
#[must_use]
pub fn pick_best(target: f64, results: &NonEmpty<DividerResult>) -> &DividerResult {
    results.tail.iter().fold(&results.head, |best, result| {
        if (best.vout - target).abs() > (result.vout - target).abs() {
            trace!(r1 = result.r1.get(), r2 = result.r2.get(), "closer match");
            result
        } else {
            best
        }
    })
}

/// One candidate resistor pair and the output it achieves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividerResult {
    /// The upper resistor, between the input and the output.
    pub r1: Ohms,
    /// The lower resistor, between the output and ground.
    pub r2: Ohms,
    /// The output voltage this pair produces.
    pub vout: f64,
    /// Signed deviation from the target output, in percent.
    pub error_percent: f64,
}

/// Errors raised when the requested voltages cannot form a divider.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The output must be strictly lower than the input.
    #[error("Vout ({vout}V) must be lower than Vin ({vin}V)")]
    InvalidVoltageRange {
        /// The requested input voltage.
        vin: f64,
        /// The requested output voltage.
        vout: f64,
    },

    /// The target output is zero or negative.
    #[error("Vout ({0}V) must be greater than zero")]
    ZeroTargetVoltage(f64),

    /// A voltage is infinite or not a number.
    #[error("voltages must be finite numbers (Vin: {vin}, Vout: {vout})")]
    NonFiniteVoltage {
        /// The requested input voltage.
        vin: f64,
        /// The requested output voltage.
        vout: f64,
    },
}
