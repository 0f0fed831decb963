use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter;

/// A one-dimensional sample: labels, or one feature's values in a group.
#[derive(Clone, Debug, PartialEq)]
pub struct Array1<T> {
    values: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(values: Vec<T>) -> Self {
        Array1 { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.clone()
    }
}

impl<T> From<Vec<T>> for Array1<T> {
    fn from(values: Vec<T>) -> Self {
        Array1::from_vec(values)
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.values[i]
    }
}

impl Array1<f64> {
    /// `None` for an empty sample.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Variance with `ddof` delta degrees of freedom (0 = population, 1 = sample).
    ///
    /// NaN when there are no more than `ddof` observations.
    pub fn var(&self, ddof: usize) -> f64 {
        match self.mean() {
            Some(mean) if self.len() > ddof => {
                let ss: f64 = self.values.iter().map(|v| (v - mean) * (v - mean)).sum();
                ss / (self.len() - ddof) as f64
            }
            _ => f64::NAN,
        }
    }
}
