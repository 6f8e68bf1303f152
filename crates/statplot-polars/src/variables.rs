//! A named bundle of resolved variables sharing one length

use crate::{Error, Result, Var, Vector};
use polars::prelude::DataFrame;
use std::collections::BTreeMap;
use tracing::debug;

/// Resolved plot variables keyed by role (`"x"`, `"y"`, `"units"`, ...)
///
/// Every stored vector has the same length. Roles given as `None` are
/// simply absent.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    len: Option<usize>,
    vectors: BTreeMap<String, Vector>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every `(role, var)` pair against `data`
    ///
    /// ```rust
    /// use statplot_polars::{Var, Variables};
    ///
    /// let x = Var::from(vec![1.0, 2.0, f64::NAN]);
    /// let y = Var::from(vec![3.0, 4.0, 5.0]);
    /// let mut vars = Variables::establish(None, &[("x", Some(&x)), ("y", Some(&y)), ("hue", None)]).unwrap();
    /// vars.dropna(&["x", "y"]);
    /// assert_eq!(vars.len(), 2);
    /// assert!(vars.get("hue").is_none());
    /// ```
    pub fn establish(data: Option<&DataFrame>, vars: &[(&str, Option<&Var>)]) -> Result<Self> {
        let mut variables = Self::new();
        for (role, var) in vars {
            if let Some(var) = var {
                variables.insert(role, var.resolve(data)?)?;
            }
        }
        Ok(variables)
    }

    /// Add a resolved vector under `role`
    pub fn insert(&mut self, role: &str, vector: Vector) -> Result<()> {
        match self.len {
            Some(len) if len != vector.len() => {
                return Err(Error::Core(statplot_core::Error::size_mismatch(
                    len,
                    vector.len(),
                    role,
                )))
            }
            _ => self.len = Some(vector.len()),
        }
        self.vectors.insert(role.to_string(), vector);
        Ok(())
    }

    pub fn get(&self, role: &str) -> Option<&Vector> {
        self.vectors.get(role)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.vectors.contains_key(role)
    }

    /// Numeric values of `role`, if present
    pub fn numeric(&self, role: &str) -> Result<Option<Vec<f64>>> {
        self.get(role).map(Vector::as_numeric).transpose()
    }

    /// Label values of `role`, if present
    pub fn labels(&self, role: &str) -> Option<Vec<Option<String>>> {
        self.get(role).map(Vector::as_labels)
    }

    /// Common length of the stored vectors, zero when empty
    pub fn len(&self) -> usize {
        self.len.unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every row in which any of `roles` is missing
    ///
    /// Absent roles are ignored. All stored vectors are filtered, not only
    /// the listed ones, so rows stay aligned.
    pub fn dropna(&mut self, roles: &[&str]) {
        let checked: Vec<&Vector> = roles.iter().filter_map(|r| self.vectors.get(*r)).collect();
        let mask: Vec<bool> = (0..self.len())
            .map(|i| checked.iter().all(|v| !v.is_missing(i)))
            .collect();
        let kept = mask.iter().filter(|&&keep| keep).count();
        if kept == self.len() {
            return;
        }

        debug!("Dropping {} rows with missing values", self.len() - kept);
        for vector in self.vectors.values_mut() {
            *vector = vector.take(&mask);
        }
        self.len = Some(kept);
    }
}
