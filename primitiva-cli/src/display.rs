use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::import::ImportResult;
use primitiva_db::models::{CombinationBatch, Draw, NumberStat, NEVER_DRAWN};

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Jour", "Numéros"]);

    for draw in draws {
        let numbers_str = draw
            .numbers
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![
            &draw.date.to_string(),
            &draw.day,
            &numbers_str,
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

/// Le score est affiché en pourcentage : la mise en forme appartient à
/// l'affichage, la table de statistiques reste en valeurs [0,1].
pub fn display_stats(stats: &[NumberStat], draw_count: u32, as_of: NaiveDate) {
    println!("\n📊 Statistiques par numéro sur {} tirages (au {})\n", draw_count, as_of);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Absence (jours)", "Score"]);

    for stat in stats {
        let absence = if stat.days_since_last == NEVER_DRAWN {
            "—".to_string()
        } else {
            stat.days_since_last.to_string()
        };

        table.add_row(vec![
            &format!("{:2}", stat.number),
            &stat.times_drawn.to_string(),
            &absence,
            &format!("{:.2} %", stat.score * 100.0),
        ]);
    }

    println!("{table}");
}

pub fn display_combinations(batch: &CombinationBatch, requested: usize) {
    if batch.combinations.is_empty() {
        println!("Impossible de générer des combinaisons : plus assez de numéros disponibles.");
        return;
    }

    println!("\n🎲 Combinaisons générées\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéros"]);

    for (i, combination) in batch.combinations.iter().enumerate() {
        let numbers_str = combination
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![&format!("{}", i + 1), &numbers_str]);
    }

    println!("{table}");

    if batch.exhausted {
        println!(
            "Numéros épuisés : {} combinaisons générées sur {} demandées.",
            batch.combinations.len(),
            requested
        );
    }
}

/// Contenu du fichier texte : une combinaison par ligne, numéros
/// joints par des virgules sans espace.
pub fn combinations_text(batch: &CombinationBatch) -> String {
    let mut content = String::new();
    for combination in &batch.combinations {
        let line = combination
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        content.push_str(&line);
        content.push('\n');
    }
    content
}
