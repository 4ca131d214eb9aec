use crate::config::ReportsConfig;
use crate::data::{EmbeddedDocument, Section, SectionId, StatCard};

pub fn build(reports: &ReportsConfig) -> Section {
    Section::new(SectionId::Management, "Reporte Gerencial")
        .block(
            StatCard::new("Reporte Gerencial")
                .text("El reporte gerencial es un documento HTML externo. Ábralo en el navegador del sistema con la acción \"Abrir en nueva pestaña\" (tecla o)."),
        )
        .block(EmbeddedDocument {
            title: "Reporte Gerencial - cali".to_string(),
            path: reports.management_report.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Block;

    #[test]
    fn test_embed_uses_configured_path() {
        let reports = ReportsConfig {
            management_report: "otros/gerencial.html".to_string(),
        };
        let section = build(&reports);
        let embed = section.blocks.iter().find_map(|b| match b {
            Block::Embed(doc) => Some(doc),
            _ => None,
        });
        assert_eq!(embed.map(|d| d.path.as_str()), Some("otros/gerencial.html"));
    }
}
