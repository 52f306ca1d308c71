use crate::models::EnvironmentalReading;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Advisory => "Advisory",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "✅",
            Severity::Advisory => "→",
            Severity::Warning => "⚠",
            Severity::Critical => "❌",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spraying advice for the current conditions.
///
/// Checked in order, first match wins:
/// - temperature > 35°C: avoid application
/// - temperature > 30°C: apply in the cool hours
/// - wind > 15 km/h: do not apply
/// - wind > 10 km/h: use anti-drift nozzles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherAdvice {
    Favorable,
    ApplyInCoolHours,
    AvoidHeat,
    UseAntiDriftNozzles,
    DoNotApply,
}

impl WeatherAdvice {
    pub fn assess(reading: &EnvironmentalReading) -> Self {
        let temp = reading.temperature_c;
        let wind = reading.wind_kmh;

        if temp > 35.0 {
            WeatherAdvice::AvoidHeat
        } else if temp > 30.0 {
            WeatherAdvice::ApplyInCoolHours
        } else if wind > 15.0 {
            WeatherAdvice::DoNotApply
        } else if wind > 10.0 {
            WeatherAdvice::UseAntiDriftNozzles
        } else {
            WeatherAdvice::Favorable
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            WeatherAdvice::Favorable => Severity::Info,
            WeatherAdvice::ApplyInCoolHours | WeatherAdvice::UseAntiDriftNozzles => {
                Severity::Advisory
            }
            WeatherAdvice::AvoidHeat => Severity::Warning,
            WeatherAdvice::DoNotApply => Severity::Critical,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WeatherAdvice::Favorable => "Condiciones favorables para aplicación",
            WeatherAdvice::ApplyInCoolHours => "Temperatura alta - Aplicar en horas frescas",
            WeatherAdvice::AvoidHeat => "Temperatura muy alta - Evitar aplicación",
            WeatherAdvice::UseAntiDriftNozzles => "Viento moderado - Usar boquillas antideriva",
            WeatherAdvice::DoNotApply => "Viento fuerte - NO APLICAR",
        }
    }
}

impl std::fmt::Display for WeatherAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.severity().symbol(), self.message())
    }
}
