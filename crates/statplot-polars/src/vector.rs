//! Resolved plot variables

use crate::{Error, Result};
use statplot_core::utils::nan_last;

/// Values of a resolved variable
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// Numeric values; missing entries are `NaN`
    Numeric(Vec<f64>),
    /// Categorical labels; missing entries are `None`
    Labels(Vec<Option<String>>),
}

/// A variable resolved from a column or a raw sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    name: Option<String>,
    values: Values,
}

impl Vector {
    pub fn numeric(name: Option<String>, values: Vec<f64>) -> Self {
        Self {
            name,
            values: Values::Numeric(values),
        }
    }

    pub fn labels(name: Option<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name,
            values: Values::Labels(values),
        }
    }

    /// Column name the values came from, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn len(&self) -> usize {
        match &self.values {
            Values::Numeric(v) => v.len(),
            Values::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.values, Values::Numeric(_))
    }

    /// Numeric view of the values
    ///
    /// Labels convert only when every present label parses as a number;
    /// missing labels become `NaN`.
    pub fn as_numeric(&self) -> Result<Vec<f64>> {
        match &self.values {
            Values::Numeric(v) => Ok(v.clone()),
            Values::Labels(labels) => labels
                .iter()
                .map(|label| match label {
                    None => Ok(f64::NAN),
                    Some(s) => s.trim().parse::<f64>().map_err(|_| Error::TypeMismatch {
                        expected: "numeric".to_string(),
                        got: format!("label {s:?}"),
                    }),
                })
                .collect(),
        }
    }

    /// Label view of the values; numbers format without a trailing `.0`
    pub fn as_labels(&self) -> Vec<Option<String>> {
        match &self.values {
            Values::Numeric(v) => v
                .iter()
                .map(|&x| if x.is_nan() { None } else { Some(format_level(x)) })
                .collect(),
            Values::Labels(labels) => labels.clone(),
        }
    }

    pub fn is_missing(&self, i: usize) -> bool {
        match &self.values {
            Values::Numeric(v) => v[i].is_nan(),
            Values::Labels(v) => v[i].is_none(),
        }
    }

    /// Keep the rows where `mask` is true
    pub fn take(&self, mask: &[bool]) -> Vector {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        }
        let values = match &self.values {
            Values::Numeric(v) => Values::Numeric(keep(v, mask)),
            Values::Labels(v) => Values::Labels(keep(v, mask)),
        };
        Vector {
            name: self.name.clone(),
            values,
        }
    }

    /// Sorted distinct non-missing levels
    ///
    /// Numeric levels sort numerically, labels lexicographically.
    pub fn levels(&self) -> Vec<String> {
        match &self.values {
            Values::Numeric(v) => {
                let mut finite: Vec<f64> = v.iter().copied().filter(|x| !x.is_nan()).collect();
                finite.sort_by(nan_last);
                finite.dedup();
                finite.into_iter().map(format_level).collect()
            }
            Values::Labels(v) => {
                let mut levels: Vec<String> = v.iter().flatten().cloned().collect();
                levels.sort();
                levels.dedup();
                levels
            }
        }
    }
}

/// Format a numeric level the way it reads as a category
pub fn format_level(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_vector() {
        let v = Vector::numeric(Some("x".to_string()), vec![2.0, f64::NAN, 1.0, 2.0]);
        assert_eq!(v.len(), 4);
        assert_eq!(v.name(), Some("x"));
        assert!(v.is_numeric());
        assert!(v.is_missing(1));
        assert!(!v.is_missing(0));
        assert_eq!(v.levels(), vec!["1", "2"]);
    }

    #[test]
    fn test_label_vector() {
        let v = Vector::labels(
            None,
            vec![Some("b".into()), None, Some("a".into()), Some("b".into())],
        );
        assert_eq!(v.levels(), vec!["a", "b"]);
        assert!(v.is_missing(1));
        assert!(v.as_numeric().is_err());
    }

    #[test]
    fn test_numeric_labels_parse() {
        let v = Vector::labels(None, vec![Some("1.5".into()), None, Some("3".into())]);
        let x = v.as_numeric().unwrap();
        assert_eq!(x[0], 1.5);
        assert!(x[1].is_nan());
        assert_eq!(x[2], 3.0);
    }

    #[test]
    fn test_as_labels() {
        let v = Vector::numeric(None, vec![0.0, 1.5, f64::NAN, -2.0]);
        assert_eq!(
            v.as_labels(),
            vec![Some("0".to_string()), Some("1.5".to_string()), None, Some("-2".to_string())]
        );
    }

    #[test]
    fn test_take() {
        let v = Vector::numeric(Some("y".into()), vec![1.0, 2.0, 3.0]);
        let kept = v.take(&[true, false, true]);
        assert_eq!(kept.as_numeric().unwrap(), vec![1.0, 3.0]);
        assert_eq!(kept.name(), Some("y"));
    }
}
