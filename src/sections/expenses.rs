use super::PALETTE;
use crate::data::{ChartKind, ChartSpec, Section, SectionId, StatCard};

pub fn build() -> Section {
    let total = ChartSpec::years(ChartKind::StackedArea, "Evolución del Gasto Total", 2019, 2024)
        .description("Cifras en millones de pesos.")
        .series(
            "Funcionamiento",
            PALETTE[0],
            &[923033.0, 867598.0, 926628.0, 962567.0, 941462.0, 1004114.0],
        )
        .series(
            "Inversión",
            PALETTE[1],
            &[4553329.0, 3873913.0, 4162983.0, 4463672.0, 4844902.0, 4654367.0],
        )
        .series("Deuda", PALETTE[2], &[11321.0, 36952.0, 39488.0, 54647.0, 41009.0, 233751.0]);

    let investment = ChartSpec::years(ChartKind::StackedArea, "Desglose de la Inversión", 2019, 2024)
        .description("Cifras en millones de pesos.")
        .series(
            "Destinación Específica",
            PALETTE[3],
            &[3693133.0, 3216658.0, 3415799.0, 3350920.0, 3742986.0, 3584346.0],
        )
        .series(
            "Libre Destinación",
            PALETTE[4],
            &[860196.0, 657255.0, 747184.0, 1112752.0, 1101916.0, 1070021.0],
        );

    let growth = StatCard::new("Análisis del Crecimiento de Componentes")
        .labeled(
            "Crecimiento General (1%)",
            "Entre 2019 y 2024, los gastos del Distrito crecieron un 1% en promedio anual real, pasando de $5,4 billones a $5,8 billones.",
        )
        .labeled(
            "Funcionamiento (17% del total)",
            "Estos gastos se mantienen controlados en cumplimiento de la Ley 617 de 2000, con un crecimiento promedio real del 2%.",
        )
        .labeled(
            "Inversión (81% del total)",
            "Registra un crecimiento moderado del 0,4%, explicado por el agotamiento de recursos de crédito autorizados.",
        )
        .labeled(
            "Deuda (2% del total)",
            "Presenta un incremento real del 83%, derivado de nuevas obligaciones y amortizaciones pactadas.",
        );

    let operating = ChartSpec::years(ChartKind::Line, "Gastos de Funcionamiento y Ley 617", 2019, 2024)
        .description("Componentes clave para el cálculo del indicador de la Ley 617.")
        .series(
            "Serv. Personales",
            PALETTE[0],
            &[133994.0, 126784.0, 146672.0, 220474.0, 241606.0, 235373.0],
        )
        .series(
            "Gastos Generales",
            PALETTE[1],
            &[545682.0, 480344.0, 487754.0, 496442.0, 422411.0, 466114.0],
        )
        .series("Transferencias", PALETTE[2], &[0.0; 6]);

    Section::new(SectionId::Expenses, "Análisis de Gastos 2019-2024")
        .columns(vec![total.into(), investment.into()])
        .block(growth)
        .block(operating)
}
