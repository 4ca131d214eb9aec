use super::PALETTE;
use crate::data::{ChartKind, ChartSpec, Section, SectionId, StatCard, TableSpec, ValueFormat};

const PLAN_HEADERS: [&str; 12] = [
    "Detalle", "2026", "2027", "2028", "2029", "2030", "2031", "2032", "2033", "2034", "2035", "2036",
];

const PLAN_ROWS: [[&str; 12]; 7] = [
    [
        "Ingresos Corrientes", "6547004", "6915114", "7269017", "7690137", "8137502", "8614515", "9121803",
        "9666034", "10244757", "10853173", "11393240",
    ],
    [
        "Recursos de Capital", "1004541", "723179", "138052", "76427", "76520", "75731", "79415", "81678",
        "84006", "86405", "88475",
    ],
    [
        "TOTAL INGRESOS", "7551545", "7638294", "7407069", "7766564", "8214022", "8690246", "9201219",
        "9747712", "10328763", "10939578", "11481715",
    ],
    [
        "Funcionamiento", "1297031", "1375849", "1456704", "1550449", "1650308", "1756838", "1870454",
        "1992227", "2121786", "2259863", "2403875",
    ],
    [
        "Deuda Pública", "285457", "337077", "546274", "547511", "515266", "466203", "614620", "531805",
        "481357", "454345", "397898",
    ],
    [
        "Inversión", "5969057", "5925368", "5404091", "5668603", "6048448", "6467205", "6716146", "7223680",
        "7725620", "8225370", "8679942",
    ],
    [
        "TOTAL GASTOS", "7551545", "7638294", "7407069", "7766564", "8214022", "8690246", "9201219",
        "9747712", "10328763", "10939578", "11481715",
    ],
];

const LEY_617: [f64; 11] = [41.1, 40.9, 40.8, 40.9, 40.9, 40.8, 40.8, 40.7, 40.6, 40.6, 41.5];

const PRIMARY_SURPLUS: [f64; 11] = [
    -240.0, -159.0, 151.0, 170.0, 184.0, 236.0, 375.0, 433.0, 570.0, 850.0, 1227.0,
];

const DEBT_SERVICE_2025: [&[&str]; 13] = [
    &["ENERO", "1.060.073", "", "", "1.060.073", "22.345", "22.345"],
    &["FEBRERO", "1.060.073", "", "", "1.060.073", "0", "0"],
    &["MARZO", "1.060.073", "", "", "1.060.073", "14.369", "14.369"],
    &["ABRIL", "1.060.073", "", "", "1.060.073", "14.712", "14.712"],
    &["MAYO", "1.060.073", "", "", "1.060.073", "0", "0"],
    &["JUNIO", "1.060.073", "", "", "1.060.073", "15.768", "15.768"],
    &["JULIO", "1.060.073", "3.628", "2.514", "1.061.187", "14.605", "17.119"],
    &["AGOSTO", "1.061.187", "", "", "1.061.187", "0", "0"],
    &["SEPTIEMBRE", "1.061.187", "", "", "1.061.187", "0", "0"],
    &["OCTUBRE", "1.061.187", "", "", "1.061.187", "0", "0"],
    &["NOVIEMBRE", "1.061.187", "", "", "1.061.187", "0", "0"],
    &["DICIEMBRE", "1.061.187", "", "", "1.061.187", "0", "0"],
    &["TOTALES", "", "3.628", "2.514", "1.061.187", "81.798", "84.312"],
];

const SURCHARGE_DEBT_EARLY: [&[&str]; 6] = [
    &["2026", "45.000", "45.000", "25.260", "", "25.260", "45.000"],
    &["2027", "300.000", "255.000", "72.011", "", "72.011", "300.000"],
    &["2028", "300.000", "", "62.896", "", "62.896", "300.000"],
    &["2029", "300.000", "", "59.544", "", "59.544", "300.000"],
    &["2030", "300.000", "", "59.525", "", "59.525", "300.000"],
    &["2031", "300.000", "", "6.250", "65.775", "65.775", "293.750"],
];

const SURCHARGE_DEBT_LATE: [&[&str]; 5] = [
    &["2032", "293.750", "59.675", "34.722", "94.397", "259.028"],
    &["2033", "259.028", "59.502", "34.722", "94.224", "224.306"],
    &["2034", "224.306", "85.802", "34.722", "120.524", "189.583"],
    &["2035", "189.583", "108.943", "34.722", "143.666", "154.861"],
    &["2036", "154.861", "101.912", "34.722", "136.634", "120.139"],
];

/// Yearly values of plan row `row`; blank cells count as zero.
fn plan_series(row: usize) -> Vec<f64> {
    PLAN_ROWS[row][1..]
        .iter()
        .map(|raw| raw.parse::<f64>().unwrap_or(0.0))
        .collect()
}

fn projection(title: &str) -> ChartSpec {
    ChartSpec::new(ChartKind::Line, title, &PLAN_HEADERS[1..])
}

pub fn build() -> Section {
    let plan_rows: Vec<&[&str]> = PLAN_ROWS.iter().map(|r| r.as_slice()).collect();
    let plan = TableSpec::new(
        "Resumen Plan Financiero 2026-2036 (Cifras en millones de pesos)",
        &PLAN_HEADERS,
    )
    .formatted_rows(&plan_rows, true);

    let income = projection("Proyección de Ingresos Totales")
        .series("Ingresos Corrientes", PALETTE[0], &plan_series(0))
        .series("Recursos de Capital", PALETTE[1], &plan_series(1));

    let expenses = projection("Proyección de Gastos Totales")
        .series("Funcionamiento", PALETTE[2], &plan_series(3))
        .series("Inversión", PALETTE[3], &plan_series(5))
        .series("Deuda Pública", PALETTE[4], &plan_series(4));

    let ley_617 = projection("Proyección Indicador Ley 617 (2026-2036)")
        .series("Proyección", PALETTE[1], &LEY_617)
        .format(ValueFormat::Percent { decimals: 2 })
        .y_bounds(35.0, 55.0)
        .reference_line(50.0, "Límite Legal");

    let surplus = projection("Superávit Primario Proyectado (incl. Sobretasa Gasolina + Tren)")
        .series("Superávit", PALETTE[2], &PRIMARY_SURPLUS)
        .format(ValueFormat::Percent { decimals: 0 })
        .reference_line(100.0, "Límite 819 > 100%");

    let monthly = TableSpec::new(
        "Ejecución Servicio de la Deuda por Mes 2025 (Cifras en Millones)",
        &[
            "Mes",
            "Saldo Anterior",
            "Desembolsos",
            "Amortizaciones",
            "Nuevo Saldo",
            "Intereses",
            "Servicio Deuda",
        ],
    )
    .formatted_rows(&DEBT_SERVICE_2025, true);

    let surcharge = StatCard::new("Deuda Sobretasa a la Gasolina").text(
        "Metrocali tiene autorizado mediante Acuerdo 180 de 2020 un cupo de $300.000 millones con fuente de financiación Sobretasa a la Gasolina.",
    );

    let surcharge_early = TableSpec::new(
        "Proyección Deuda Sobretasa a la Gasolina (2026-2031)",
        &[
            "Año",
            "Saldo Inicial",
            "Desembolsos",
            "Intereses",
            "Capital",
            "Servicio Deuda",
            "Saldo Final",
        ],
    )
    .formatted_rows(&SURCHARGE_DEBT_EARLY, true);

    let surcharge_late = TableSpec::new(
        "Proyección Deuda Sobretasa a la Gasolina (2032-2036)",
        &[
            "Año",
            "Saldo Inicial",
            "Intereses",
            "Capital",
            "Servicio Deuda",
            "Saldo Final",
        ],
    )
    .formatted_rows(&SURCHARGE_DEBT_LATE, true);

    Section::new(SectionId::Plan, "Plan Financiero y Proyecciones")
        .block(plan)
        .columns(vec![income.into(), expenses.into()])
        .columns(vec![ley_617.into(), surplus.into()])
        .heading("Detalles Adicionales del Plan Financiero")
        .block(monthly)
        .block(surcharge)
        .block(surcharge_early)
        .block(surcharge_late)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Block, CellValue};

    #[test]
    fn test_plan_table_is_grouped() {
        let section = build();
        let plan = section.tables()[0];
        assert_eq!(plan.rows[0][0], CellValue::text("Ingresos Corrientes"));
        assert_eq!(plan.rows[0][1], CellValue::text("6.547.004"));
        assert_eq!(plan.rows[6][11], CellValue::text("11.481.715"));
    }

    #[test]
    fn test_blank_debt_cells_render_as_zero() {
        let section = build();
        let monthly = section.tables()[1];
        assert_eq!(monthly.rows[0][2], CellValue::text("0"));
        assert_eq!(monthly.rows[12][0], CellValue::text("TOTALES"));
        assert_eq!(monthly.rows[12][1], CellValue::text("0"));
    }

    #[test]
    fn test_ley_617_tooltip_uses_percent() {
        let section = build();
        let ley = section
            .inspectable()
            .into_iter()
            .find_map(|b| match b {
                Block::Chart(c) if c.title.starts_with("Proyección Indicador") => Some(c),
                _ => None,
            })
            .expect("ley 617 chart");
        let (label, values) = ley.tooltip(0).expect("first year");
        assert_eq!(label, "2026");
        assert_eq!(values, vec![("Proyección".to_string(), "41,10%".to_string())]);
    }
}
