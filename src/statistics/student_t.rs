// Two-tailed Student-t critical values
//
// statrs provides the starting quantile. Newton steps then solve
// `upper_tail(t) = (1 - level) / 2` against the tail probability itself, so
// the 0.975-sized CDF value never enters the subtraction.
//
// For integer degrees of freedom the upper tail has a closed form as the
// remainder of a convergent positive series in x = df / (df + t^2)
// (Abramowitz & Stegun 26.7.3 / 26.7.4):
//   even df: 1/2 * sin(theta) * sum_{k >= df/2} (2k-1)!!/(2k)!! * x^k
//   odd df:  1/pi * sin(theta) * cos(theta) * sum_{k >= (df-1)/2} (2k)!!/(2k+1)!! * x^k
// with cos^2(theta) = x. No term is subtracted, so the tail keeps full
// relative precision.

use super::validate_level;
use crate::error::{AnalysisError, Result};
use statrs::distribution::{Continuous, ContinuousCDF, StudentsT};

const NEWTON_STEPS: usize = 4;

/// Above this the series gets long; statrs' survival function is used instead
const SERIES_MAX_DF: usize = 100_000;

/// `P(T > t)` for `t > 0` and `T ~ t(df)`
fn upper_tail(dist: &StudentsT, df: usize, t: f64) -> f64 {
    if df > SERIES_MAX_DF {
        return dist.sf(t);
    }
    if df == 1 {
        return 1.0f64.atan2(t) / std::f64::consts::PI;
    }

    let nu = df as f64;
    let s = nu + t * t;
    let x = nu / s;
    let sin_theta = t / s.sqrt();
    let even = df % 2 == 0;
    let ratio = |k: usize| -> f64 {
        let k = k as f64;
        if even {
            (2.0 * k + 1.0) / (2.0 * k + 2.0)
        } else {
            (2.0 * k + 2.0) / (2.0 * k + 3.0)
        }
    };

    let first = if even { df / 2 } else { (df - 1) / 2 };
    let mut term = 1.0;
    for k in 0..first {
        term *= x * ratio(k);
    }

    let mut sum = 0.0;
    let mut k = first;
    while term > sum * f64::EPSILON * 0.25 {
        sum += term;
        term *= x * ratio(k);
        k += 1;
    }

    if even {
        0.5 * sin_theta * sum
    } else {
        sin_theta * x.sqrt() * sum / std::f64::consts::PI
    }
}

/// Critical value `t` such that `P(|T| <= t) = level` for `T ~ t(df)`
///
/// # Example
/// ```
/// use benchci::statistics::critical_value;
///
/// let t = critical_value(11, 0.95).unwrap();
/// assert!((t - 2.2009851600916397).abs() < 1e-15);
/// ```
pub fn critical_value(degrees_of_freedom: usize, level: f64) -> Result<f64> {
    validate_level(level)?;
    if degrees_of_freedom == 0 {
        return Err(AnalysisError::invalid(
            "Student-t distribution needs at least 1 degree of freedom",
        ));
    }

    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
        .map_err(|e| AnalysisError::invalid(format!("Student-t distribution: {}", e)))?;

    let alpha = (1.0 - level) / 2.0;
    let mut t = dist.inverse_cdf(1.0 - alpha);
    for _ in 0..NEWTON_STEPS {
        let density = dist.pdf(t);
        if !(density > 0.0 && t > 0.0 && t.is_finite()) {
            break;
        }
        let step = (alpha - upper_tail(&dist, degrees_of_freedom, t)) / density;
        t -= step;
        if step.abs() <= f64::EPSILON * t.abs() {
            break;
        }
    }

    tracing::trace!(degrees_of_freedom, level, t, "student-t critical value");
    Ok(t)
}
