mod analysis;
mod display;
mod import;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::analysis::compute_stats;
use crate::analysis::generator::generate;
use primitiva_db::db::{count_draws, db_path, fetch_all_draws, fetch_last_draws, insert_draw, migrate, open_db};
use primitiva_db::models::{day_name, parse_date, validate_numbers, Draw, DRAW_SIZE};
use crate::display::{
    combinations_text, display_combinations, display_draws, display_import_summary, display_stats,
};

#[derive(Parser)]
#[command(name = "primitiva", about = "Analyseur de statistiques La Primitiva")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/primitiva.csv")]
        file: PathBuf,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Afficher les statistiques (fréquences, absences et scores)
    Stats {
        /// Date de référence pour le calcul des absences (défaut : aujourd'hui)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Générer des combinaisons pondérées par les scores
    Generate {
        /// Nombre de combinaisons à générer (1-8)
        #[arg(short, long, default_value = "7")]
        count: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Date de référence pour le calcul des absences (défaut : aujourd'hui)
        #[arg(long)]
        as_of: Option<String>,

        /// Écrire les combinaisons dans un fichier texte
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ajouter un tirage manuellement
    Add,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { as_of } => cmd_stats(&conn, as_of),
        Command::Generate {
            count,
            seed,
            as_of,
            output,
        } => cmd_generate(&conn, count, seed, as_of, output),
        Command::Add => cmd_add(&conn),
    }
}

fn cmd_import(conn: &primitiva_db::rusqlite::Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &primitiva_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : primitiva import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &primitiva_db::rusqlite::Connection, as_of: Option<String>) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : primitiva import");
        return Ok(());
    }
    let as_of = resolve_as_of(as_of)?;
    let draws = fetch_all_draws(conn)?;

    let stats = compute_stats(&draws, as_of);
    display_stats(&stats, n, as_of);
    Ok(())
}

fn cmd_generate(
    conn: &primitiva_db::rusqlite::Connection,
    count: usize,
    seed: Option<u64>,
    as_of: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : primitiva import");
        return Ok(());
    }
    let as_of = resolve_as_of(as_of)?;
    let draws = fetch_all_draws(conn)?;

    let stats = compute_stats(&draws, as_of);
    let batch = generate(&stats, count, seed)?;
    display_combinations(&batch, count);

    if let Some(path) = output {
        if !batch.combinations.is_empty() {
            std::fs::write(&path, combinations_text(&batch))
                .with_context(|| format!("Impossible d'écrire {:?}", path))?;
            println!("\nCombinaisons écrites dans {}", path.display());
        }
    }

    Ok(())
}

fn cmd_add(conn: &primitiva_db::rusqlite::Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let today = Local::now().date_naive();
    let raw_date = prompt_with_default("Date (JJ/MM/AAAA ou AAAA-MM-JJ)", &today.to_string())?;
    let date = parse_date(&raw_date)?;
    if date > today {
        bail!("La date {} est dans le futur", date);
    }

    let numbers = prompt_numbers()?;

    let draw = Draw {
        date,
        day: day_name(date).to_string(),
        numbers,
    };

    println!("\nTirage à insérer :");
    display_draws(&[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Un tirage existe déjà à cette date (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn resolve_as_of(raw: Option<String>) -> Result<NaiveDate> {
    match raw {
        Some(s) => Ok(parse_date(&s)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn prompt_numbers() -> Result<[u8; DRAW_SIZE]> {
    loop {
        let input = prompt("7 numéros (séparés par des espaces, 1-49) : ")?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == DRAW_SIZE => {
                let mut arr = [0u8; DRAW_SIZE];
                arr.copy_from_slice(&v);
                if validate_numbers(&arr).is_ok() {
                    return Ok(arr);
                }
                println!("Numéros invalides (1-49). Réessayez.");
            }
            _ => println!("Entrez exactement 7 numéros. Réessayez."),
        }
    }
}
