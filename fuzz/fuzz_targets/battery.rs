#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sigdiff::{
    find_statistically_significant_difference, MeanDifferenceTest, NtileRepresentationTest,
    SignificanceTest, TestOptions,
};

#[derive(Debug, Arbitrary)]
struct Input {
    tested: Vec<f64>,
    control: Vec<f64>,
    options: TestOptions,
    ntile: f64,
    filtering_outliers: bool,
}

fuzz_target!(|input: Input| {
    // Arbitrary samples (NaN, infinities, empty) and options must never panic;
    // failures surface as errors.
    if let Ok(findings) =
        find_statistically_significant_difference(&input.tested, &input.control, &input.options)
    {
        assert!(findings.len() <= 2);
        for finding in &findings {
            assert!(finding.p_value() < input.options.alpha);
        }
    }

    let mean_test = if input.filtering_outliers {
        MeanDifferenceTest::with_outlier_filtering()
    } else {
        MeanDifferenceTest::new()
    };
    let _ = mean_test.test(&input.tested, &input.control, &input.options);

    if let Ok(test) = NtileRepresentationTest::new(input.ntile) {
        let _ = test.test(&input.tested, &input.control, &input.options);
    }
});
