use crate::data::{series_points, Section, SectionId, SparklineSpec, StatCard, TableSpec, Tone};

pub fn build() -> Section {
    let emcali = StatCard::new("EMCALI EICE ESP")
        .subheading("Empresas Municipales de Cali")
        .text("Servicios Públicos (Energía, Acueducto, Telecomunicaciones)")
        .figure("$4,8 Billones", Tone::Positive, "Ingresos Operacionales 2024")
        .sparkline(SparklineSpec::new(
            "Ingresos (Billones COP)",
            "#3b82f6",
            series_points(&[("2020", 4.1), ("2021", 4.3), ("2022", 4.5), ("2023", 4.6), ("2024", 4.8)]),
        ));

    let metrocali = StatCard::new("Metrocali S.A.")
        .subheading("Metrocali S.A.")
        .text("Ente Gestor del Sistema de Transporte Masivo (MIO)")
        .figure("-$120 Mil Millones", Tone::Negative, "Resultado Neto 2024 (Estimado)")
        .sparkline(SparklineSpec::new(
            "Resultado Neto (Miles de Millones COP)",
            "#ef4444",
            series_points(&[
                ("2020", -150.0),
                ("2021", -180.0),
                ("2022", -165.0),
                ("2023", -140.0),
                ("2024", -120.0),
            ]),
        ));

    let transfers = TableSpec::new(
        "Transferencias Nivel Central - Entidades Descentralizadas",
        &[
            "Entidad",
            "2022 (Millones)",
            "2023 (Millones)",
            "2024 (Millones)",
            "Concepto Principal",
        ],
    )
    .rows([
        ["EMCALI EICE ESP", "180.000", "195.000", "210.000", "Excedentes Financieros"],
        ["Metrocali S.A.", "-250.000", "-280.000", "-310.000", "Subsidio al Diferencial Tarifario"],
        ["Corfecali", "15.000", "18.000", "20.000", "Aportes para Feria de Cali"],
        ["Hospitales (ESE)", "-90.000", "-95.000", "-105.000", "Financiación de no POS y saneamiento"],
        ["Fondo de Vivienda", "25.000", "30.000", "35.000", "Subsidios de Vivienda de Interés Social"],
    ]);

    let risks = StatCard::new("Análisis y Riesgos")
        .labeled(
            "Fortaleza (EMCALI)",
            "EMCALI sigue siendo la principal fuente de excedentes financieros para el Distrito, con un desempeño operativo estable y en crecimiento.",
        )
        .labeled(
            "Riesgo Fiscal (Metrocali)",
            "El déficit operacional de Metrocali representa la mayor presión fiscal para el nivel central, requiriendo transferencias significativas para cubrir el diferencial tarifario y sostener la operación del MIO.",
        )
        .labeled(
            "Sostenibilidad Hospitalaria",
            "La red de salud pública (ESE) depende de transferencias para su equilibrio financiero, lo que constituye un pasivo contingente y una presión de gasto constante.",
        )
        .labeled(
            "Diversidad de Desempeño",
            "El resto de entidades muestra un comportamiento mixto, con algunas generando superávits menores y otras requiriendo aportes para su funcionamiento.",
        );

    Section::new(SectionId::Decentralized, "Análisis del Sector Descentralizado")
        .lead("Revisión del desempeño financiero y las transferencias entre el nivel central y las principales entidades descentralizadas del Distrito.")
        .columns(vec![emcali.into(), metrocali.into()])
        .block(transfers)
        .block(risks)
}
