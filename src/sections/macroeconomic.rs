use crate::data::{Section, SectionId, StatCard, Tone};

pub fn build() -> Section {
    let growth = StatCard::new("Crecimiento Económico").figure(
        "+3,4%",
        Tone::Positive,
        "Iguala el promedio histórico y supera la media nacional (+2,5%).",
    );
    let unemployment = StatCard::new("Tasa de Desempleo Histórica").figure(
        "7,8%",
        Tone::Info,
        "La más baja en 19 años (vs. 10,9% en 2023 y 11,2% en 2024).",
    );
    let inflation = StatCard::new("Inflación Controlada").figure(
        "4,7%",
        Tone::Accent,
        "Continúa descendiendo y se ubica por debajo de la variación nacional (5,1%).",
    );

    let drivers = StatCard::new("Motores del Crecimiento Económico")
        .subheading("Construcción")
        .figure("+13,9%", Tone::Positive, "en licencias de construcción.")
        .subheading("Turismo")
        .figure(
            "+3,5%",
            Tone::Positive,
            "en ocupación hotelera, con aumento de turistas extranjeros (+20,4% Jul, +13,8% Ago).",
        )
        .subheading("Consumo")
        .figure(
            "+11,9%",
            Tone::Positive,
            "en el Índice de Confianza del Consumidor y +20,4% en matrículas de vehículos.",
        )
        .subheading("Exportaciones")
        .figure("+7,9%", Tone::Positive, "en Cali y Yumbo (azúcares, farmacéuticos, etc.).");

    Section::new(SectionId::Macroeconomic, "Panorama Económico Distrito de Santiago de Cali")
        .columns(vec![growth.into(), unemployment.into(), inflation.into()])
        .block(drivers)
        .block(StatCard::new("Análisis General").text(
            "El segundo trimestre de 2025 muestra una economía distrital robusta y en sólida recuperación, con una trayectoria de crecimiento que iguala su promedio histórico. El dinamismo se apoya en múltiples sectores, destacando la construcción, el turismo y un fuerte consumo interno. La moderación de la inflación y las cifras históricas de empleo refuerzan la perspectiva positiva, posicionando a Cali con un desempeño económico superior al promedio nacional y confirmando la recuperación de su actividad productiva este año.",
        ))
}
