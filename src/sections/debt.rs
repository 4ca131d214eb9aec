use crate::data::{ChartKind, ChartSpec, Section, SectionId, StatCard, TableSpec, ValueFormat};

const DEBT_RED: &str = "#ef4444";
const DEBT_BLUE: &str = "#3b82f6";
const DEBT_GREEN: &str = "#10b981";

pub fn build() -> Section {
    let evolution = ChartSpec::years(
        ChartKind::Line,
        "Evolución de la Deuda Total y Servicio Anual",
        2019,
        2024,
    )
    .description("Cifras en millones de pesos.")
    .series(
        "Deuda Total",
        DEBT_BLUE,
        &[1050000.0, 1100000.0, 1250000.0, 1300000.0, 1150000.0, 1060073.0],
    )
    .series(
        "Servicio Deuda",
        DEBT_RED,
        &[11321.0, 36952.0, 39488.0, 54647.0, 41009.0, 233751.0],
    );

    let composition = ChartSpec::new(
        ChartKind::HorizontalBar,
        "Composición de la Deuda por Acreedor",
        &["Banca Nacional", "Banca Multilateral", "Bonos"],
    )
    .series("Porcentaje", DEBT_GREEN, &[75.0, 15.0, 10.0])
    .format(ValueFormat::Percent { decimals: 1 })
    .y_bounds(0.0, 100.0);

    let projection = TableSpec::new(
        "Proyección del Servicio de la Deuda (Millones de Pesos)",
        &["Año", "Amortización Capital", "Intereses", "Servicio Total"],
    )
    .formatted_rows(
        &[
            &["2025", "2.514", "81.798", "84.312"],
            &["2026", "150.000", "120.000", "270.000"],
            &["2027", "180.000", "110.000", "290.000"],
            &["2028", "200.000", "95.000", "295.000"],
        ],
        true,
    );

    let sustainability = StatCard::new("Análisis de Sostenibilidad de la Deuda")
        .labeled(
            "Perfil de la Deuda",
            "La deuda del Distrito se encuentra mayoritariamente contratada a tasa fija y con plazos largos, lo que mitiga los riesgos de tasa de interés y refinanciamiento.",
        )
        .labeled(
            "Capacidad de Pago",
            "Los indicadores de capacidad de pago (Ley 358/97) se mantienen en niveles saludables, por debajo de los límites legales, asegurando el acceso a futuras fuentes de financiamiento.",
        )
        .labeled(
            "Proyecciones",
            "El plan financiero contempla un manejo prudente del endeudamiento, asegurando que el servicio de la deuda no comprometa la inversión social prioritaria. Las proyecciones muestran un perfil de amortizaciones manejable en el mediano plazo.",
        );

    Section::new(SectionId::Debt, "Análisis del Servicio de la Deuda")
        .lead("Esta sección detalla la estructura, evolución y proyecciones del servicio de la deuda del Distrito, un componente clave para la sostenibilidad fiscal a largo plazo.")
        .columns(vec![evolution.into(), composition.into()])
        .block(projection)
        .block(sustainability)
}
