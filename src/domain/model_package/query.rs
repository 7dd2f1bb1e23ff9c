//! Model package list queries

use crate::domain::storage::Filter;

/// Optional exact-match filters for listing model packages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPackageQuery {
    pub date_trained: Option<String>,
    pub package_label: Option<String>,
}

impl ModelPackageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_trained(mut self, date: impl Into<String>) -> Self {
        self.date_trained = Some(date.into());
        self
    }

    pub fn with_package_label(mut self, label: impl Into<String>) -> Self {
        self.package_label = Some(label.into());
        self
    }

    /// Builds the store filter; empty values are ignored
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::all();

        if let Some(date) = self.date_trained.as_deref().filter(|d| !d.is_empty()) {
            filter = filter.and(Filter::eq("date_trained", date));
        }

        if let Some(label) = self.package_label.as_deref().filter(|l| !l.is_empty()) {
            filter = filter.and(Filter::eq("package_label", label));
        }

        filter
    }
}
