// Two-parameter throughput model: fitting and error accounting
//
// A benchmark round that performs `work_amount` units of work takes
//
//     duration ≈ alpha + work_amount / v
//
// where alpha is a fixed per-round overhead (ns) and v the steady-state rate
// (work units per ns). The naive model drops alpha and uses a single rate,
// usually the harmonic mean of per-round rates. Comparing the two shows how
// much of the observed duration the overhead term explains.
//
// Units: durations are nanoseconds throughout; per-second figures are
// converted with ONE_SECOND at the edges.

mod fit_error;
mod model;
mod regression;

pub use fit_error::{fit_error, fit_error_with_naive, FitErrorReport, ModelError};
pub use model::{ThroughputModel, ThroughputObservation, ONE_SECOND};
pub use regression::{
    fit_throughput_model, simple_regression, FitOptions, LinearFit, ThroughputFit,
};
