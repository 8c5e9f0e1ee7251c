// src/common/time_format.rs

//! Formatos de horário usados na API.
//!
//! O front envia horários de `<input type="time">` ("09:00") e o banco
//! devolve colunas TIME ("09:00:00"). Aceitamos os dois formatos.

use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// `HH:MM` na saída (slots), `HH:MM` ou `HH:MM:SS` na entrada.
pub mod hour_minute {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw)
            .ok_or_else(|| de::Error::custom(format!("horário inválido: '{}'", raw)))
    }
}

/// `HH:MM:SS` na saída (regras), `HH:MM` ou `HH:MM:SS` na entrada.
pub mod time_of_day {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        hour_minute::deserialize(deserializer)
    }
}
