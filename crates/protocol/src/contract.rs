//! Explicit checks of the per-chart-type key conventions.
//!
//! The backend contract is only loosely specified: each chart type expects a
//! particular x-axis key (`label` or `date`) plus a numeric `value`. A payload
//! that breaks the convention still decodes; these checks name what is wrong
//! so callers can log it and renderers can say why a chart is partial.

use std::fmt;

use crate::wire::{AxisKey, QueryResult, Visualization};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractIssue {
    UnknownType {
        index: usize,
        tag: String,
    },
    MissingAxisKey {
        index: usize,
        point: usize,
        key: AxisKey,
    },
    MissingValue {
        index: usize,
        point: usize,
    },
}

impl fmt::Display for ContractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractIssue::UnknownType { index, tag } => {
                write!(f, "visualization {index}: unknown type {tag:?}")
            }
            ContractIssue::MissingAxisKey { index, point, key } => write!(
                f,
                "visualization {index}, point {point}: missing {:?} key",
                key.field_name()
            ),
            ContractIssue::MissingValue { index, point } => {
                write!(f, "visualization {index}, point {point}: missing numeric value")
            }
        }
    }
}

impl Visualization {
    /// Issues for this descriptor, which sits at `index` among its siblings.
    pub fn contract_issues(&self, index: usize) -> Vec<ContractIssue> {
        let Some(kind) = self.chart_kind() else {
            return vec![ContractIssue::UnknownType {
                index,
                tag: self.kind.clone(),
            }];
        };

        let key = kind.axis_key();
        let mut issues = Vec::new();
        for (point, dp) in self.data.iter().enumerate() {
            if dp.axis_value(key).is_none() {
                issues.push(ContractIssue::MissingAxisKey { index, point, key });
            }
            if dp.value.is_none() {
                issues.push(ContractIssue::MissingValue { index, point });
            }
        }
        issues
    }
}

impl QueryResult {
    pub fn contract_issues(&self) -> Vec<ContractIssue> {
        self.visualizations
            .iter()
            .enumerate()
            .flat_map(|(index, viz)| viz.contract_issues(index))
            .collect()
    }
}
