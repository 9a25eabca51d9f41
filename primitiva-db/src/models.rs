use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

/// Univers des numéros jouables (1-49).
pub const POOL_SIZE: usize = 49;
/// Numéros enregistrés par tirage (6 + complémentaire).
pub const DRAW_SIZE: usize = 7;
/// Numéros par combinaison générée.
pub const COMBINATION_SIZE: usize = 6;

pub const MIN_COMBINATIONS: usize = 1;
pub const MAX_COMBINATIONS: usize = 8;

/// Valeur d'absence d'un numéro jamais sorti.
pub const NEVER_DRAWN: i64 = -1;

#[derive(Debug, Clone)]
pub struct Draw {
    pub date: NaiveDate,
    pub day: String,
    pub numbers: [u8; DRAW_SIZE],
}

#[derive(Debug, Clone)]
pub struct NumberStat {
    pub number: u8,
    pub times_drawn: u32,
    pub days_since_last: i64,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct CombinationBatch {
    pub combinations: Vec<[u8; COMBINATION_SIZE]>,
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nombre de combinaisons invalide: {0} (entre 1 et 8)")]
    CombinationCount(usize),
    #[error("Format de date invalide: '{0}' (JJ/MM/AAAA ou AAAA-MM-JJ)")]
    Date(String),
    #[error("Numéro {0} hors limites (1-49)")]
    NumberOutOfRange(u8),
    #[error("Nombre de numéros invalide: {0} (7 attendus)")]
    NumberCount(usize),
    #[error("Table de statistiques invalide: {0} lignes (49 attendues)")]
    StatsTableSize(usize),
}

/// Valide les 7 numéros d'un tirage. Les doublons sont acceptés :
/// le format source n'interdit pas qu'un numéro occupe deux colonnes.
pub fn validate_numbers(numbers: &[u8]) -> Result<(), ValidationError> {
    if numbers.len() != DRAW_SIZE {
        return Err(ValidationError::NumberCount(numbers.len()));
    }
    for &n in numbers {
        if n < 1 || n as usize > POOL_SIZE {
            return Err(ValidationError::NumberOutOfRange(n));
        }
    }
    Ok(())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| ValidationError::Date(raw.to_string()))
}

pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "LUNDI",
        Weekday::Tue => "MARDI",
        Weekday::Wed => "MERCREDI",
        Weekday::Thu => "JEUDI",
        Weekday::Fri => "VENDREDI",
        Weekday::Sat => "SAMEDI",
        Weekday::Sun => "DIMANCHE",
    }
}
