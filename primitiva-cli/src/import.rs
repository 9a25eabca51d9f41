use anyhow::{Context, Result};
use primitiva_db::rusqlite::Connection;
use std::path::Path;

use primitiva_db::db::insert_draw;
use primitiva_db::models::{day_name, parse_date, validate_numbers, Draw, DRAW_SIZE};

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let date = parse_date(&get(0)?)?;

    let mut numbers = [0u8; DRAW_SIZE];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = get_u8(i + 1)?;
    }
    validate_numbers(&numbers)?;

    Ok(Draw {
        date,
        day: day_name(date).to_string(),
        numbers,
    })
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Importe l'archive historique (CSV `fecha;n1;...;n7` avec en-tête)
/// dans une seule transaction. Les lignes illisibles sont comptées et
/// signalées sans interrompre l'import.
pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => {
                match parse_record(&record) {
                    Ok(draw) => {
                        match insert_draw(&tx, &draw) {
                            Ok(true) => result.inserted += 1,
                            Ok(false) => result.skipped += 1,
                            Err(e) => {
                                eprintln!("Erreur insertion tirage {}: {}", result.total_records, e);
                                result.errors += 1;
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("Erreur parsing ligne {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                }
            }
            Err(e) => {
                eprintln!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
