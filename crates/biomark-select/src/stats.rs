//! Two-sample t-tests used to validate the consensus features.
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::data_handling::Dataset;
use crate::error::SelectionError;
use crate::feature_selection::IntersectionSet;
use crate::math::Array1;

/// Test statistic and two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    pub statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

/// Independent two-sample t-test of `a` against `b` (statistic is `mean(a) - mean(b)` scaled).
///
/// With `equal_var` the pooled-variance Student test is used, otherwise
/// Welch's test with Welch-Satterthwaite degrees of freedom.
///
/// Degenerate input is not an error:
/// - fewer than two observations in either group gives NaN,
/// - zero variance in both groups gives `+-inf` (p = 0) when the means
///   differ and NaN when they are equal.
pub fn ttest_ind(a: &Array1<f64>, b: &Array1<f64>, equal_var: bool) -> TTest {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    if a.len() < 2 || b.len() < 2 {
        return TTest {
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: f64::NAN,
        };
    }
    let (m1, m2) = (a.mean().unwrap_or(f64::NAN), b.mean().unwrap_or(f64::NAN));
    let (v1, v2) = (a.var(1), b.var(1));

    let (std_err, df) = if equal_var {
        let df = n1 + n2 - 2.0;
        let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
        ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
    } else {
        let (s1, s2) = (v1 / n1, v2 / n2);
        let df = (s1 + s2).powi(2) / (s1.powi(2) / (n1 - 1.0) + s2.powi(2) / (n2 - 1.0));
        ((s1 + s2).sqrt(), df)
    };

    let statistic = (m1 - m2) / std_err;
    TTest {
        statistic,
        p_value: two_sided_p_value(statistic, df),
        df,
    }
}

fn two_sided_p_value(t: f64, df: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    // Welch df is NaN when both variances are zero; that case already gave a non-finite t.
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

/// One row of the t-test output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestRow {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "t-statistic")]
    pub statistic: f64,
    #[serde(rename = "p-value")]
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TTestResultTable {
    pub rows: Vec<TTestRow>,
}

impl TTestResultTable {
    pub const HEADER: [&'static str; 3] = ["Feature", "t-statistic", "p-value"];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Case vs. control t-test on the raw values of every intersected feature.
pub fn validate_features(
    dataset: &Dataset,
    intersection: &IntersectionSet,
    equal_var: bool,
) -> Result<TTestResultTable, SelectionError> {
    let rows = intersection
        .features()
        .iter()
        .map(|feature| {
            let (control, case) = dataset.split_by_label(feature)?;
            let test = ttest_ind(&case, &control, equal_var);
            if !test.statistic.is_finite() {
                log::warn!(
                    "t-test for {} is degenerate (statistic = {})",
                    feature,
                    test.statistic
                );
            }
            log::debug!(
                "t-test {}: t = {:.4}, df = {:.2}, p = {:.4e}",
                feature,
                test.statistic,
                test.df,
                test.p_value
            );
            Ok(TTestRow {
                feature: feature.clone(),
                statistic: test.statistic,
                p_value: test.p_value,
            })
        })
        .collect::<Result<Vec<_>, SelectionError>>()?;
    Ok(TTestResultTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(v: &[f64]) -> Array1<f64> {
        Array1::from_vec(v.to_vec())
    }

    #[test]
    fn student_matches_reference_values() {
        // Pooled variance 6.25, so t = -3 / sqrt(2.5) with 8 df.
        let t = ttest_ind(&arr(&[1.0, 2.0, 3.0, 4.0, 5.0]), &arr(&[2.0, 4.0, 6.0, 8.0, 10.0]), true);
        assert!((t.statistic - (-1.8973665961010275)).abs() < 1e-9, "{}", t.statistic);
        assert!((t.p_value - 0.0943498435).abs() < 1e-6, "{}", t.p_value);
        assert_eq!(t.df, 8.0);
    }

    #[test]
    fn welch_degrees_of_freedom() {
        let t = ttest_ind(&arr(&[1.0, 2.0, 3.0, 4.0, 5.0]), &arr(&[2.0, 4.0, 6.0, 8.0, 10.0]), false);
        assert!((t.statistic - (-1.8973665961010275)).abs() < 1e-9);
        // (2.5/5 + 10/5)^2 / ((0.5^2)/4 + (2^2)/4) = 6.25 / 1.0625
        assert!((t.df - 5.882352941176471).abs() < 1e-9, "{}", t.df);
        assert!(t.p_value > 0.09 && t.p_value < 0.12, "{}", t.p_value);
    }

    #[test]
    fn tiny_groups_give_nan() {
        let t = ttest_ind(&arr(&[1.0]), &arr(&[2.0, 3.0]), true);
        assert!(t.statistic.is_nan() && t.p_value.is_nan());
    }

    #[test]
    fn zero_variance_groups() {
        let same = ttest_ind(&arr(&[1.0, 1.0]), &arr(&[1.0, 1.0]), true);
        assert!(same.statistic.is_nan() && same.p_value.is_nan());

        let apart = ttest_ind(&arr(&[2.0, 2.0]), &arr(&[1.0, 1.0]), true);
        assert_eq!(apart.statistic, f64::INFINITY);
        assert_eq!(apart.p_value, 0.0);
    }
}
