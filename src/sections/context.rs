use crate::data::{ChartKind, ChartSpec, EmbeddedDocument, Section, SectionId, StatCard, ValueFormat};

/// Budget (billions), population (millions) and per-capita income of the
/// main cities in 2025.
const CITIES: [(&str, f64, f64, f64); 4] = [
    ("Bogotá", 38.4, 8.4, 4.58),
    ("Medellín", 11.0, 2.6, 4.21),
    ("Cali", 5.9, 2.3, 2.58),
    ("Barranquilla", 6.9, 2.4, 5.17),
];

pub fn build() -> Section {
    let names: Vec<&str> = CITIES.iter().map(|c| c.0).collect();
    let per_capita: Vec<f64> = CITIES.iter().map(|c| c.3).collect();

    let public_sector = StatCard::new("El Papel del Sector Público")
        .bullet("En una economía de dos sectores (familias y empresas), los precios de servicios básicos como salud y educación pueden no ser asequibles para todos.")
        .bullet("El sector público garantiza el acceso universal a servicios esenciales.")
        .bullet("Para ello, subsidia a los estratos 1, 2 y 3, priorizando la equidad.")
        .bullet("El Estado actúa como gestor, inversor y regulador para asegurar sostenibilidad social, ambiental y económica.");

    let per_capita_chart = ChartSpec::new(
        ChartKind::StackedBar,
        "Ingreso Percápita de las Principales Ciudades de Colombia (2025)",
        &names,
    )
    .series("Ingreso Percápita", "#60a5fa", &per_capita)
    .format(ValueFormat::Currency);

    let budgets = CITIES.iter().fold(StatCard::new("Presupuesto y Población"), |card, (city, budget, people, _)| {
        card.labeled(
            *city,
            format!(
                "{} de presupuesto, {} millones de habitantes",
                crate::format::format_billions(*budget),
                crate::format::format_fixed(*people, 1)
            ),
        )
    });

    Section::new(SectionId::Context, "Contexto General y Económico")
        .columns(vec![public_sector.into(), budgets.into()])
        .block(per_capita_chart)
        .block(EmbeddedDocument {
            title: "El Estado y las Finanzas Públicas".to_string(),
            path: "assets/imagen.png".to_string(),
        })
        .block(StatCard::new("Visión Estratégica del Distrito").text(
            "La Sostenibilidad Fiscal para las entidades territoriales requiere finanzas equilibradas con una buena gestión tributaria, eficiencia en el gasto. La estabilidad en el mediano plazo implica una gestión eficiente de las fuentes de financiación incluidos los recursos del crédito. Para lograr avanzar en términos de sostenibilidad se requiere robustecer la capacidad de inversión de proyectos estratégicos para la ciudad.",
        ))
}
