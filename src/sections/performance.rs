use crate::data::{
    series_points, CellStyle, CellValue, ChartKind, ChartSpec, Section, SectionId, StatCard, TableSpec, Tone,
    TrendDirection,
};
use crate::format::format_fixed;

/// Cali's IDF score, 2000-2024.
const HISTORICAL_IDF: [f64; 25] = [
    51.56, 57.13, 46.17, 49.70, 49.94, 57.28, 61.76, 69.28, 69.21, 63.20, 83.16, 76.67, 73.57, 74.09,
    79.02, 80.73, 79.86, 80.14, 81.13, 81.30, 70.71, 65.02, 66.00, 69.60, 58.30,
];

/// (category, indicator, 2020..2024)
const NEW_METHODOLOGY: [(&str, &str, [f64; 5]); 11] = [
    ("Resultados Fiscales", "Dependencia de las transferencias", [56.6, 57.9, 57.1, 58.7, 56.4]),
    ("Resultados Fiscales", "Relevancia FBK fijo", [66.4, 48.8, 47.1, 53.4, 28.4]),
    ("Resultados Fiscales", "Endeudamiento largo plazo", [68.4, 67.1, 66.9, 71.8, 70.0]),
    ("Resultados Fiscales", "Ahorro Corriente", [80.0, 80.0, 80.0, 80.0, 86.7]),
    ("Resultados Fiscales", "Balance Primario", [60.0, 80.0, 60.0, 60.0, 20.0]),
    ("Gestión Financiera", "Holgura", [0.0, 79.6, 56.8, 60.5, 61.3]),
    (
        "Gestión Financiera",
        "Capacidad de Programación de los ingresos",
        [100.0, 100.0, 100.0, 100.0, 100.0],
    ),
    (
        "Gestión Financiera",
        "Capacidad de Ejecución de Inversión",
        [80.0, 80.0, 80.0, 100.0, 100.0],
    ),
    ("Bonos", "Bonificación esfuerzo propio", [0.0, 0.0, 0.1, 0.1, 0.05]),
    ("Bonos", "Bono Catastro", [0.0, 0.0, 2.0, 2.0, 2.0]),
    ("Total", "IDF", [65.02, 71.49, 65.96, 69.60, 58.30]),
];

/// (city, [(position, idf); 2020..2024]). NaN marks a missing figure.
const CITY_RANKING: [(&str, [(f64, f64); 5]); 13] = [
    ("Bogotá", [(1.0, f64::NAN), (1.0, 85.78), (1.0, 79.72), (1.0, 90.10), (1.0, 77.00)]),
    ("Barranquilla", [(5.0, 64.03), (11.0, 56.47), (2.0, 75.70), (4.0, 72.70), (2.0, 75.50)]),
    ("Medellín", [(1.0, 78.56), (2.0, 80.45), (5.0, 71.18), (5.0, 69.80), (3.0, 69.70)]),
    ("Cali", [(4.0, 65.02), (3.0, 71.49), (7.0, 65.96), (6.0, 69.60), (6.0, 58.30)]),
    ("Bucaramanga", [(11.0, 53.80), (9.0, 61.34), (3.0, 73.37), (2.0, 76.10), (5.0, 62.90)]),
    ("Manizales", [(10.0, 54.33), (4.0, 64.41), (4.0, 72.25), (7.0, 69.10), (7.0, 69.10)]),
    ("Pereira", [(6.0, 63.84), (8.0, 62.12), (8.0, 65.47), (3.0, 75.00), (f64::NAN, f64::NAN)]),
    ("Cartagena", [(13.0, 51.70), (12.0, 50.39), (11.0, 63.00), (f64::NAN, f64::NAN), (4.0, 63.40)]),
    ("Cúcuta", [(2.0, 68.88), (5.0, 63.72), (9.0, 64.44), (10.0, 66.00), (10.0, 66.00)]),
    ("Montería", [(7.0, 52.20), (6.0, 63.84), (11.0, 53.60), (9.0, 66.40), (9.0, 66.40)]),
    ("Pasto", [(8.0, 60.25), (7.0, 63.49), (6.0, 68.23), (11.0, 63.50), (11.0, 63.50)]),
    ("Ibagué", [(9.0, 57.41), (13.0, 49.05), (11.0, 56.06), (12.0, 59.70), (12.0, 59.70)]),
    ("Villavicencio", [(12.0, 53.80), (10.0, 59.03), (10.0, 64.39), (8.0, 68.30), (8.0, 68.30)]),
];

const YEARS: [&str; 5] = ["2020", "2021", "2022", "2023", "2024"];

pub fn build() -> Section {
    let history = ChartSpec::years(
        ChartKind::Line,
        "Evolución Histórica del Desempeño Fiscal de Cali (2000-2024)",
        2000,
        2024,
    )
    .series("IDF Cali", "#8b5cf6", &HISTORICAL_IDF)
    .y_bounds(40.0, 90.0)
    .band(0.0, 40.0, "Deterioro", "#ef4444")
    .band(40.0, 60.0, "Riesgo", "#f97316")
    .band(60.0, 70.0, "Vulnerable", "#eab308")
    .band(70.0, 80.0, "Solvente", "#3b82f6")
    .band(80.0, 100.0, "Sostenible", "#16a34a");

    let cali = StatCard::new("Análisis de Cali (2023 vs 2024)").text(
        "En 2024, el IDF de Cali cayó a 58,30 (Riesgo) desde 69,60 (Vulnerable) en 2023. Esta caída se explica principalmente por el deterioro en los indicadores de Relevancia FBK fijo (de 53,4 a 28,4) y Balance Primario (de 60,0 a 20,0). A pesar de una mejora en Ahorro Corriente (de 80,0 a 86,7), no fue suficiente para compensar las caídas.",
    );
    let national = StatCard::new("Contexto Nacional DNP 2024").text(
        "El puntaje promedio del IDF municipal disminuyó a 55,86 en 2024 (desde 57,57 en 2023). Esta caída se debe a una disminución en la dimensión de Resultados Fiscales, aunque la Gestión Financiera mejoró. Casi 7 de cada 10 municipios se ubican en los rangos de \"Riesgo\" y \"Deterioro\".",
    );

    Section::new(SectionId::Performance, "Índice de Desempeño Fiscal (DNP)")
        .block(history)
        .columns(vec![cali.into(), national.into()])
        .block(new_methodology_table())
        .block(ranking_table())
}

/// Latest-year score: badges below 30 and above 80, otherwise colored by
/// the change against the previous year.
pub fn value_cell(value: f64, previous: Option<f64>) -> CellValue {
    if value.is_nan() {
        return CellValue::toned("N/A", Tone::Muted);
    }
    let text = format_fixed(value, 2);
    if value < 30.0 {
        return CellValue::badge(text, Tone::Negative);
    }
    if value > 80.0 {
        return CellValue::badge(text, Tone::Positive);
    }
    let tone = match previous.filter(|p| !p.is_nan()) {
        Some(p) if value > p => Tone::Positive,
        Some(p) if value < p => Tone::Negative,
        _ => Tone::Default,
    };
    CellValue::strong(text, tone)
}

fn new_methodology_table() -> TableSpec {
    let mut headers = vec!["Categoría", "Indicador"];
    headers.extend(YEARS);
    let mut table = TableSpec::new("Resultados Cali - Nueva Metodología DNP (2020-2024)", &headers);

    let mut last_category = "";
    for (category, indicator, values) in NEW_METHODOLOGY {
        let category_cell = if category == last_category {
            CellValue::Empty
        } else if category == "Total" {
            CellValue::strong(category, Tone::Info)
        } else {
            CellValue::strong(category, Tone::Default)
        };
        last_category = category;

        let mut row = vec![category_cell, CellValue::text(indicator)];
        row.extend(values[..4].iter().map(|v| CellValue::text(format_fixed(*v, 2))));
        row.push(value_cell(values[4], Some(values[3])));
        table = table.row(row);
    }
    table
}

/// Direction of the latest change; missing or zero figures are flat.
pub fn trend(last: f64, previous: f64) -> TrendDirection {
    let known = |v: f64| !v.is_nan() && v != 0.0;
    if !known(last) || !known(previous) {
        TrendDirection::Flat
    } else if last > previous {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

/// Gold, silver and bronze backgrounds for the top three positions.
pub fn podium_style(cell: &CellValue, col: usize, _row: usize) -> CellStyle {
    if col != 0 {
        return CellStyle::default();
    }
    let CellValue::Trend { text, .. } = cell else {
        return CellStyle::default();
    };
    match text.as_str() {
        "1" => CellStyle::bold().with_bg(Tone::Gold),
        "2" => CellStyle::bold().with_bg(Tone::Silver),
        "3" => CellStyle::bold().with_bg(Tone::Bronze),
        _ => CellStyle::default(),
    }
}

fn ranking_table() -> TableSpec {
    let mut headers = vec!["Posición", "Ciudad"];
    headers.extend(YEARS);
    headers.push("Tendencia");

    let mut table = TableSpec::new("Ranking IDF - Principales Ciudades (2020-2024)", &headers)
        .highlight(1, "Cali")
        .cell_style(podium_style);

    for (city, data) in CITY_RANKING {
        let (last_position, last_idf) = data[4];
        let (_, previous_idf) = data[3];
        let position = if last_position.is_nan() {
            "N/A".to_string()
        } else {
            format!("{}", last_position as u32)
        };

        let trend_points: Vec<(&str, f64)> = YEARS
            .iter()
            .zip(data.iter())
            .filter(|(_, (_, idf))| !idf.is_nan() && *idf > 0.0)
            .map(|(year, (_, idf))| (*year, *idf))
            .collect();

        let mut row = vec![
            CellValue::Trend {
                text: position,
                direction: trend(last_idf, previous_idf),
            },
            CellValue::text(city),
        ];
        row.extend(data.iter().map(|(_, idf)| {
            if idf.is_nan() {
                CellValue::text("N/A")
            } else {
                CellValue::text(format_fixed(*idf, 2))
            }
        }));
        row.push(CellValue::Spark {
            points: series_points(&trend_points),
        });
        table = table.row(row);
    }
    table
}
