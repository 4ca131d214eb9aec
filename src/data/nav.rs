//! Section identifiers and sidebar entries.

use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Closed set of report sections. Every id maps to exactly one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Context,
    Macroeconomic,
    Income,
    Expenses,
    Performance,
    Plan,
    Debt,
    Decentralized,
    Other,
    Management,
}

impl SectionId {
    /// Sidebar order.
    pub const ALL: [SectionId; 10] = [
        SectionId::Context,
        SectionId::Macroeconomic,
        SectionId::Income,
        SectionId::Expenses,
        SectionId::Performance,
        SectionId::Plan,
        SectionId::Debt,
        SectionId::Decentralized,
        SectionId::Other,
        SectionId::Management,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Context => "context",
            SectionId::Macroeconomic => "macroeconomic",
            SectionId::Income => "income",
            SectionId::Expenses => "expenses",
            SectionId::Performance => "performance",
            SectionId::Plan => "plan",
            SectionId::Debt => "debt",
            SectionId::Decentralized => "decentralized",
            SectionId::Other => "other",
            SectionId::Management => "management",
        }
    }

    /// Position in [`SectionId::ALL`].
    pub fn index(self) -> usize {
        SectionId::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> SectionId {
        SectionId::ALL[(self.index() + 1) % SectionId::ALL.len()]
    }

    pub fn previous(self) -> SectionId {
        let len = SectionId::ALL.len();
        SectionId::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        match SectionId::ALL.iter().find(|id| id.as_str() == needle) {
            Some(id) => Ok(*id),
            None => {
                let known: Vec<&str> = SectionId::ALL.iter().map(|id| id.as_str()).collect();
                bail!("Unknown section '{}' (expected one of: {})", s, known.join(", "))
            }
        }
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationEntry {
    pub id: SectionId,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Fixed navigation list, in display order.
pub fn navigation_entries() -> Vec<NavigationEntry> {
    SectionId::ALL
        .iter()
        .map(|&id| {
            let (label, icon) = match id {
                SectionId::Context => ("Contexto General", "▦"),
                SectionId::Macroeconomic => ("Contexto Macroeconómico", "◍"),
                SectionId::Income => ("Ingresos", "◫"),
                SectionId::Expenses => ("Gastos", "↗"),
                SectionId::Performance => ("Desempeño Fiscal", "▥"),
                SectionId::Plan => ("Plan Financiero", "⌂"),
                SectionId::Debt => ("Servicio de la Deuda", "$"),
                SectionId::Decentralized => ("Sector Descentralizado", "▣"),
                SectionId::Other => ("Otros Reportes", "≡"),
                SectionId::Management => ("Reporte Gerencial", "◧"),
            };
            NavigationEntry { id, label, icon }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_id() {
        for id in SectionId::ALL {
            assert_eq!(id.as_str().parse::<SectionId>().unwrap(), id);
        }
        assert_eq!(" Income ".parse::<SectionId>().unwrap(), SectionId::Income);
    }

    #[test]
    fn test_unknown_id_lists_known_ids() {
        let err = "budget".parse::<SectionId>().unwrap_err().to_string();
        assert!(err.contains("budget"));
        assert!(err.contains("context"));
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(SectionId::Context.next(), SectionId::Macroeconomic);
        assert_eq!(SectionId::Management.next(), SectionId::Context);
        assert_eq!(SectionId::Context.previous(), SectionId::Management);
    }

    #[test]
    fn test_navigation_entries_are_unique_and_ordered() {
        let entries = navigation_entries();
        assert_eq!(entries.len(), SectionId::ALL.len());
        for (entry, id) in entries.iter().zip(SectionId::ALL) {
            assert_eq!(entry.id, id);
        }
        assert_eq!(entries[2].label, "Ingresos");
    }
}
