//! The expression dataset shared by every pipeline stage.
//!
//! `Dataset` owns the raw sample x feature matrix, the binary label vector
//! (0 = control, 1 = case) and the feature names in column order.
use crate::error::SelectionError;
use crate::math::{Array1, Array2};

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<i32>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        x: Array2<f64>,
        y: Array1<i32>,
        feature_names: Vec<String>,
    ) -> Result<Self, SelectionError> {
        if x.nrows() != y.len() {
            return Err(SelectionError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if x.ncols() != feature_names.len() {
            return Err(SelectionError::FeatureCountMismatch {
                columns: x.ncols(),
                names: feature_names.len(),
            });
        }
        Ok(Dataset {
            x,
            y,
            feature_names,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn n_cases(&self) -> usize {
        self.y.iter().filter(|&&v| v == 1).count()
    }

    pub fn n_controls(&self) -> usize {
        self.y.iter().filter(|&&v| v == 0).count()
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!(
            "{} case samples and {} control samples",
            self.n_cases(),
            self.n_controls()
        );
        log::info!("{} expression features (columns)", self.n_features());
        log::info!("-------------------------------");
    }

    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| f == name)
    }

    /// Labels as plain `i32`s, in sample order.
    pub fn labels(&self) -> &[i32] {
        self.y.as_slice()
    }

    /// Split one feature's raw values into (control, case) groups.
    pub fn split_by_label(&self, feature: &str) -> Result<(Array1<f64>, Array1<f64>), SelectionError> {
        let idx = self
            .feature_index(feature)
            .ok_or_else(|| SelectionError::UnknownFeature(feature.to_string()))?;
        let column = self.x.column(idx);
        let mut control = Vec::with_capacity(self.n_controls());
        let mut case = Vec::with_capacity(self.n_cases());
        for (&value, &label) in column.iter().zip(self.y.iter()) {
            if label == 1 {
                case.push(value);
            } else {
                control.push(value);
            }
        }
        Ok((Array1::from_vec(control), Array1::from_vec(case)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Dataset {
        let x = Array2::from_shape_vec((4, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
            .unwrap();
        Dataset::new(
            x,
            Array1::from_vec(vec![0, 1, 0, 1]),
            vec!["GENE_A".to_string(), "GENE_B".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn split_by_label_partitions_raw_values() {
        let ds = toy();
        let (control, case) = ds.split_by_label("GENE_B").unwrap();
        assert_eq!(control.to_vec(), vec![10.0, 30.0]);
        assert_eq!(case.to_vec(), vec![20.0, 40.0]);
    }

    #[test]
    fn unknown_feature_is_an_error() {
        let ds = toy();
        assert_eq!(
            ds.split_by_label("GENE_Z").unwrap_err(),
            SelectionError::UnknownFeature("GENE_Z".to_string())
        );
    }

    #[test]
    fn class_counts() {
        let ds = toy();
        assert_eq!((ds.n_controls(), ds.n_cases()), (2, 2));
    }

    #[test]
    fn name_count_must_match_columns() {
        let x = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let err = Dataset::new(x, Array1::from_vec(vec![0, 1]), vec!["GENE_A".to_string()])
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::FeatureCountMismatch {
                columns: 2,
                names: 1
            }
        );
    }
}
