use crate::data::{CellValue, ChartKind, ChartSpec, Section, SectionId, StatCard, TableSpec, Tone, ValueFormat};

const SLICE_COLORS: [&str; 6] = ["#ef4444", "#f97316", "#22c55e", "#3b82f6", "#8b5cf6", "#64748b"];

pub fn build() -> Section {
    let sentences = ChartSpec::new(
        ChartKind::Pie,
        "Sentencias Judiciales - Probabilidad de Pérdida",
        &["Alta", "Media", "Baja", "Remota", "Sin calificar", "No se califica"],
    )
    .series("Probabilidad", SLICE_COLORS[0], &[26.1, 26.0, 4.0, 15.2, 10.5, 18.2])
    .slice_colors(&SLICE_COLORS)
    .format(ValueFormat::Percent { decimals: 1 });

    let jurisdictions = TableSpec::new(
        "Cuantías por Jurisdicción",
        &["Jurisdicción", "No. de Procesos", "Cuantías en Millones de pesos"],
    )
    .rows([
        ("Administrativo", 2864.0, "2.712.782"),
        ("Civil", 29.0, "16.377"),
        ("Laboral", 385.0, "78.961"),
        ("MASC", 36.0, "19.702"),
        ("Tribunal arbitramento", 1.0, "5.704"),
        ("Total", 3315.0, "2.833.526"),
    ]
    .map(|(name, count, amount)| [CellValue::text(name), CellValue::number(count), CellValue::text(amount)]));

    let contingent = StatCard::new("Pasivos Contingentes (Cubrimiento 68,1%)").text(
        "“El pasivo pensional se constituye en un factor crítico... Este pasivo es un riesgo fiscal porque si no se gestiona adecuadamente puede generar presiones financieras significativas en el futuro...\"",
    );

    let pensions = TableSpec::new(
        "Resumen de Pasivos Pensionales",
        &[
            "No.",
            "Sector",
            "Pasivo Pensional (31/12/2023)",
            "Ahorro FONPET (30/04/2025)",
            "Ahorro Patrimonio Autónomo (31/07/2025)",
            "Total Ahorro",
        ],
    )
    .rows([
        [CellValue::number(1.0), "EDUCACIÓN".into(), "51.900".into(), "67.637".into(), "-".into(), "67.637".into()],
        [CellValue::number(2.0), "SALUD".into(), "58.309".into(), "223.399".into(), "-".into(), "223.399".into()],
        [
            CellValue::number(3.0),
            "PROPÓSITO GENERAL".into(),
            "3.326.707".into(),
            "1.238.285".into(),
            "821.727".into(),
            "2.060.012".into(),
        ],
        [
            CellValue::number(4.0),
            "RESERVAS CUOTAS PARTES".into(),
            "-".into(),
            "0,239".into(),
            "-".into(),
            "0,239".into(),
        ],
        [
            CellValue::Empty,
            "TOTAL".into(),
            "3.436.916".into(),
            "1.529.321".into(),
            "821.727".into(),
            "2.351.048".into(),
        ],
    ]);

    let train_investment = StatCard::new("Tren de Cercanías - Inversión y Financiación")
        .text("La inversión total se estima en 12 billones de pesos.")
        .text("Será financiada mediante un convenio donde la Nación asume el 70% y las entidades territoriales el 30%.")
        .text("Para Cali, esta participación equivale a aproximadamente $345.600 millones, lo que representa un riesgo para la sostenibilidad financiera del Distrito.")
        .figure("$345.600 Millones", Tone::Warning, "Participación estimada de Cali");

    let train_contributions = StatCard::new("Tren de Cercanías - Aportes del Distrito")
        .text("Mediante el Acuerdo 512 de 2021, Cali aprobó su vinculación y la destinación de recursos.")
        .labeled("Etapa de estructuración", "$7.005 millones (primeros 4 años).")
        .labeled("Fase de construcción", "$9.046 millones (años 5 a 7).")
        .labeled("Etapa de operación", "Aporte inicial de $3.337 millones (a partir del año 8).");

    Section::new(SectionId::Other, "Otros Reportes Financieros")
        .columns(vec![sentences.into(), contingent.into()])
        .columns(vec![jurisdictions.into(), pensions.into()])
        .heading("Proyectos Estratégicos")
        .columns(vec![train_investment.into(), train_contributions.into()])
}
