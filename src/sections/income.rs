use super::PALETTE;
use crate::data::{ChartKind, ChartSpec, Section, SectionId};

const FIRST_YEAR: u32 = 2019;
const LAST_YEAR: u32 = 2024;
const IN_MILLIONS: &str = "Cifras en millones de pesos.";

fn yearly(kind: ChartKind, title: &str, description: &str) -> ChartSpec {
    ChartSpec::years(kind, title, FIRST_YEAR, LAST_YEAR).description(description)
}

pub fn build() -> Section {
    let current_vs_capital = yearly(
        ChartKind::Line,
        "Ingresos Corrientes vs. Ingresos de Capital",
        IN_MILLIONS,
    )
    .series(
        "Ingresos Corrientes",
        PALETTE[0],
        &[4668165.0, 4644078.0, 4595213.0, 4642504.0, 5132323.0, 5494630.0],
    )
    .series(
        "Ingresos Capital",
        PALETTE[1],
        &[1257386.0, 1221259.0, 1168966.0, 1252991.0, 1343407.0, 1229763.0],
    );

    let current_breakdown = yearly(ChartKind::StackedArea, "Desglose de Ingresos Corrientes", IN_MILLIONS)
        .series(
            "Transferencias",
            PALETTE[0],
            &[2165341.0, 2164866.0, 2126247.0, 2195104.0, 2515846.0, 2496186.0],
        )
        .series(
            "No tributarios",
            PALETTE[2],
            &[410527.0, 260136.0, 244654.0, 229973.0, 239867.0, 284193.0],
        )
        .series(
            "Tributario",
            PALETTE[1],
            &[2092297.0, 2219075.0, 2224313.0, 2217427.0, 2376610.0, 2714251.0],
        );

    let tax_breakdown = yearly(ChartKind::StackedArea, "Desglose de Ingresos Tributarios", IN_MILLIONS)
        .series("Predial", PALETTE[0], &[535851.0, 547109.0, 0.0, 0.0, 0.0, 0.0])
        .series("Ind. y Cio", PALETTE[1], &[167639.0, 156090.0, 0.0, 0.0, 0.0, 0.0])
        .series(
            "Estampillas",
            PALETTE[2],
            &[136681.0, 104093.0, 143978.0, 169664.0, 199683.0, 190169.0],
        )
        .series(
            "Gasolina",
            PALETTE[3],
            &[193534.0, 201171.0, 115780.0, 123378.0, 124741.0, 120962.0],
        )
        .series(
            "Alumbrado",
            PALETTE[4],
            &[246144.0, 241948.0, 203746.0, 221591.0, 231375.0, 249133.0],
        )
        .series("Otros", PALETTE[5], &[0.0, 0.0, 226142.0, 224407.0, 288105.0, 283332.0]);

    let capital = yearly(
        ChartKind::HorizontalBar,
        "Recursos de Capital: composición",
        "Otros / Recursos del Balance / Recursos del Crédito.",
    )
    .series("Otros", PALETTE[2], &[118470.0, 110791.0, 99880.0, 87100.0, 106803.0, 120481.0])
    .series(
        "Balance",
        PALETTE[6],
        &[486120.0, 402525.0, 361860.0, 318641.0, 409513.0, 391323.0],
    )
    .series(
        "Credito",
        PALETTE[0],
        &[653909.0, 448452.0, 528920.0, 625938.0, 879828.0, 940783.0],
    );

    let sgp = yearly(
        ChartKind::StackedBar,
        "SGP por sector",
        "Educación, Salud, Propósito General, Agua & Saneamiento, Alimentación Escolar.",
    )
    .series(
        "Educacion",
        PALETTE[0],
        &[813052.0, 853280.0, 841634.0, 798884.0, 794458.0, 945407.0],
    )
    .series("Salud", PALETTE[4], &[402525.0, 394612.0, 417319.0, 417468.0, 517027.0, 517027.0])
    .series(
        "PropGeneral",
        PALETTE[3],
        &[402525.0, 402525.0, 396853.0, 396853.0, 409765.0, 409765.0],
    )
    .series("APSB", PALETTE[6], &[361860.0, 361860.0, 366264.0, 362264.0, 386765.0, 406803.0])
    .series("AlimEscolar", PALETTE[2], &[54630.0, 48000.0, 62000.0, 70000.0, 95000.0, 106803.0]);

    let transfers = yearly(
        ChartKind::StackedBar,
        "Transferencias",
        "SGP, otras transferencias de la Nación y transferencias departamentales.",
    )
    .series(
        "SGP",
        PALETTE[0],
        &[1390824.0, 1407360.0, 1407546.0, 1321215.0, 1330833.0, 1602386.0],
    )
    .series(
        "OtrasNac",
        PALETTE[6],
        &[538497.0, 664664.0, 633401.0, 792170.0, 998646.0, 1063416.0],
    )
    .series("Deptal", PALETTE[1], &[102978.0, 129029.0, 149028.0, 170942.0, 213131.0, 216680.0]);

    let non_tax = yearly(
        ChartKind::StackedBar,
        "Ingresos No Tributarios por concepto",
        "Valorización, especial, intereses, tránsito, cuota, convenios y otros.",
    )
    .series("Valorizacion", PALETTE[5], &[27407.0, 18730.0, 9854.0, 4614.0, 1115.0, 977.0])
    .series("Especial", PALETTE[4], &[33260.0, 32572.0, 32521.0, 25317.0, 34454.0, 24138.0])
    .series("Intereses", PALETTE[0], &[126659.0, 39679.0, 28112.0, 34649.0, 51598.0, 72651.0])
    .series("Transito", PALETTE[1], &[75309.0, 57281.0, 65263.0, 49310.0, 43761.0, 71833.0])
    .series("Cuota", PALETTE[6], &[15564.0, 15341.0, 13803.0, 13405.0, 12258.0, 13654.0])
    .series("Convenios", PALETTE[2], &[17000.0, 20000.0, 30888.0, 10353.0, 12271.0, 10989.0])
    .series("Otros", PALETTE[3], &[117251.0, 68334.0, 74209.0, 92624.0, 84710.0, 90151.0]);

    let stamps = yearly(
        ChartKind::StackedBar,
        "Estampillas (composición)",
        "Pro-Cultura, Desarrollo Urbano, Adulto Mayor, Justicia Familiar.",
    )
    .series("ProCultura", PALETTE[0], &[46644.0, 39860.0, 36861.0, 36861.0, 38641.0, 46644.0])
    .series(
        "ProdUrbano",
        PALETTE[3],
        &[108753.0, 101791.0, 85912.0, 96262.0, 114040.0, 108753.0],
    )
    .series("AdultoMayor", PALETTE[6], &[33000.0, 29066.0, 20046.0, 20046.0, 38741.0, 33000.0])
    .series("Justicia", PALETTE[2], &[8700.0, 10301.0, 9967.0, 8711.0, 8711.0, 8711.0]);

    let fuel = yearly(
        ChartKind::StackedBar,
        "Sobretasa a la Gasolina",
        "Recaudo anual (millones de pesos).",
    )
    .series(
        "Recaudo",
        PALETTE[0],
        &[136681.0, 104093.0, 115780.0, 123378.0, 124741.0, 120962.0],
    );

    let industry = yearly(
        ChartKind::StackedBar,
        "Industria y Comercio: detalle",
        "Avisos, complementarios, sanciones, capital y base de I&C.",
    )
    .series("IndCio", PALETTE[0], &[600601.0, 547109.0, 528920.0, 625938.0, 940783.0, 990948.0])
    .series("Avisos", PALETTE[1], &[91624.0, 53651.0, 45330.0, 52920.0, 108367.0, 94948.0])
    .series("CompAvisos", PALETTE[6], &[32753.0, 45263.0, 32990.0, 20046.0, 38741.0, 31657.0])
    .series("Sanciones", PALETTE[2], &[14672.0, 12027.0, 11023.0, 12027.0, 21030.0, 19836.0])
    .series(
        "CapitalIndCio",
        PALETTE[3],
        &[118473.0, 101791.0, 85912.0, 96262.0, 114040.0, 108753.0],
    );

    let property = yearly(
        ChartKind::StackedBar,
        "Predial (grupo): composición",
        "Corriente, ambiental/ bomberil, alumbrado, capital.",
    )
    .series(
        "Corriente",
        PALETTE[0],
        &[535851.0, 547109.0, 528920.0, 625938.0, 940783.0, 990948.0],
    )
    .series(
        "AmbientalBomberil",
        PALETTE[6],
        &[118473.0, 101791.0, 85912.0, 96262.0, 114040.0, 108753.0],
    )
    .series(
        "Alumbrado",
        PALETTE[4],
        &[246144.0, 241948.0, 203746.0, 221591.0, 231375.0, 249133.0],
    )
    .series("Capital", PALETTE[2], &[19883.0, 19783.0, 14582.0, 12042.0, 10989.0, 9951.0]);

    Section::new(SectionId::Income, "Análisis de Ingresos 2019-2024")
        .columns(vec![current_vs_capital.into(), current_breakdown.into()])
        .columns(vec![tax_breakdown.into(), capital.into()])
        .columns(vec![sgp.into(), transfers.into()])
        .columns(vec![non_tax.into(), stamps.into()])
        .columns(vec![fuel.into(), industry.into()])
        .block(property)
}
