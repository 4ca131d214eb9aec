//! Section builders - one per report topic
//!
//! Each module turns its literal datasets into a [`Section`]. The
//! [`Registry`] builds all of them once at startup and serves them by id.

pub mod context;
pub mod debt;
pub mod decentralized;
pub mod expenses;
pub mod income;
pub mod macroeconomic;
pub mod management;
pub mod other;
pub mod performance;
pub mod plan;

use crate::config::ReportsConfig;
use crate::data::{Section, SectionId, TableIssue};

/// Series colors shared by the income, expense and plan charts.
pub(crate) const PALETTE: [&str; 8] = [
    "#3b82f6", "#14b8a6", "#f97316", "#8b5cf6", "#ec4899", "#f59e0b", "#0ea5e9", "#10b981",
];

/// Build the section for `id`.
pub fn build(id: SectionId, reports: &ReportsConfig) -> Section {
    match id {
        SectionId::Context => context::build(),
        SectionId::Macroeconomic => macroeconomic::build(),
        SectionId::Income => income::build(),
        SectionId::Expenses => expenses::build(),
        SectionId::Performance => performance::build(),
        SectionId::Plan => plan::build(),
        SectionId::Debt => debt::build(),
        SectionId::Decentralized => decentralized::build(),
        SectionId::Other => other::build(),
        SectionId::Management => management::build(reports),
    }
}

/// Every section, indexed in navigation order.
pub struct Registry {
    sections: Vec<Section>,
}

impl Registry {
    pub fn new(reports: &ReportsConfig) -> Self {
        let sections = SectionId::ALL.iter().map(|id| build(*id, reports)).collect();
        Self { sections }
    }

    pub fn get(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    pub fn all(&self) -> &[Section] {
        &self.sections
    }

    /// Shape issues of every table in every section.
    pub fn table_issues(&self) -> Vec<TableIssue> {
        self.sections
            .iter()
            .flat_map(|section| section.tables())
            .flat_map(|table| table.validate())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_builds_its_own_section() {
        let registry = Registry::new(&ReportsConfig::default());
        assert_eq!(registry.all().len(), SectionId::ALL.len());
        for id in SectionId::ALL {
            assert_eq!(registry.get(id).id, id);
            assert!(!registry.get(id).blocks.is_empty());
        }
    }

    #[test]
    fn test_builtin_tables_are_well_formed() {
        let registry = Registry::new(&ReportsConfig::default());
        let issues = registry.table_issues();
        assert!(
            issues.is_empty(),
            "{:?}",
            issues.iter().map(|i| i.message()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_income_has_eleven_charts() {
        let section = build(SectionId::Income, &ReportsConfig::default());
        assert_eq!(section.inspectable().len(), 11);
    }
}
