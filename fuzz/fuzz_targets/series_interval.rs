#![no_main]

use benchci::csv_input::read_series;
use benchci::statistics::{analyze_series, AnalysisConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Neither ingestion nor analysis may panic, whatever the input
    let Ok(series) = read_series(data, 0, None) else {
        return;
    };
    if series.is_empty() {
        return;
    }
    for config in [AnalysisConfig::quick(), AnalysisConfig::strict()] {
        let _ = analyze_series(&series, &config);
    }
});
