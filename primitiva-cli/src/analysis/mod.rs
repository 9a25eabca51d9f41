pub mod generator;

use chrono::NaiveDate;

use primitiva_db::models::{Draw, NumberStat, NEVER_DRAWN, POOL_SIZE};

/// Poids de l'absence dans le score combiné.
pub const ABSENCE_WEIGHT: f64 = 0.6;
/// Poids de la rareté (inverse de la fréquence).
pub const FREQUENCY_WEIGHT: f64 = 0.4;

/// Calcule pour chacun des 49 numéros sa fréquence de sortie, son
/// absence en jours à la date `as_of` et son score combiné. L'historique
/// peut arriver dans n'importe quel ordre : les tirages sont traités du
/// plus ancien au plus récent pour que la dernière apparition l'emporte.
pub fn compute_stats(draws: &[Draw], as_of: NaiveDate) -> Vec<NumberStat> {
    let mut stats: Vec<NumberStat> = (1..=POOL_SIZE as u8)
        .map(|n| NumberStat {
            number: n,
            times_drawn: 0,
            days_since_last: NEVER_DRAWN,
            score: 0.0,
        })
        .collect();

    let mut ordered: Vec<&Draw> = draws.iter().collect();
    ordered.sort_by_key(|d| d.date);

    for draw in ordered {
        // Un tirage daté après as_of compte comme une absence nulle :
        // la sentinelle reste réservée aux numéros jamais sortis
        let days = (as_of - draw.date).num_days().max(0);
        for &n in &draw.numbers {
            let idx = n as usize;
            if idx >= 1 && idx <= stats.len() {
                stats[idx - 1].times_drawn += 1;
                stats[idx - 1].days_since_last = days;
            }
        }
    }

    score_stats(&mut stats);
    stats
}

/// Normalisation min-max de l'absence et de la fréquence, puis score
/// pondéré 60/40. Un numéro jamais sorti compte comme l'absence la plus
/// longue : score d'absence 1.0 dès que l'historique n'est pas vide.
fn score_stats(stats: &mut [NumberStat]) {
    // Bornes d'absence sur les numéros déjà sortis
    let observed: Vec<f64> = stats
        .iter()
        .filter(|s| s.times_drawn > 0)
        .map(|s| s.days_since_last as f64)
        .collect();
    let absence_min = observed.iter().cloned().fold(f64::INFINITY, f64::min);
    let absence_max = observed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let freq_min = stats.iter().map(|s| s.times_drawn).min().unwrap_or(0) as f64;
    let freq_max = stats.iter().map(|s| s.times_drawn).max().unwrap_or(0) as f64;

    for stat in stats.iter_mut() {
        let absence_score = if stat.times_drawn == 0 {
            if observed.is_empty() { 0.0 } else { 1.0 }
        } else if absence_max > absence_min {
            (stat.days_since_last as f64 - absence_min) / (absence_max - absence_min)
        } else {
            0.0
        };

        let frequency_score = if freq_max > freq_min {
            1.0 - (stat.times_drawn as f64 - freq_min) / (freq_max - freq_min)
        } else {
            0.0
        };

        stat.score = ABSENCE_WEIGHT * absence_score + FREQUENCY_WEIGHT * frequency_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitiva_db::models::day_name;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draw(s: &str, numbers: [u8; 7]) -> Draw {
        let date = date(s);
        Draw {
            date,
            day: day_name(date).to_string(),
            numbers,
        }
    }

    #[test]
    fn test_stats_counts_sum_to_seven_per_draw() {
        let draws = vec![
            draw("2024-01-01", [1, 2, 3, 4, 5, 6, 7]),
            draw("2024-01-04", [1, 12, 23, 34, 45, 46, 47]),
            draw("2024-01-06", [8, 9, 10, 11, 12, 13, 14]),
        ];
        let stats = compute_stats(&draws, date("2024-01-10"));
        let total: u32 = stats.iter().map(|s| s.times_drawn).sum();
        assert_eq!(total, 7 * draws.len() as u32);
    }

    #[test]
    fn test_stats_never_drawn_sentinel() {
        let draws = vec![draw("2024-01-01", [1, 2, 3, 4, 5, 6, 7])];
        let stats = compute_stats(&draws, date("2024-01-10"));
        for stat in stats.iter().filter(|s| s.number >= 8) {
            assert_eq!(stat.times_drawn, 0);
            assert_eq!(stat.days_since_last, NEVER_DRAWN);
        }
    }

    #[test]
    fn test_stats_single_draw_scenario() {
        let draws = vec![draw("2024-01-01", [1, 2, 3, 4, 5, 6, 7])];
        let stats = compute_stats(&draws, date("2024-01-08"));

        for stat in stats.iter().filter(|s| s.number <= 7) {
            assert_eq!(stat.times_drawn, 1);
            assert_eq!(stat.days_since_last, 7);
        }
        for stat in stats.iter().filter(|s| s.number >= 8) {
            assert_eq!(stat.times_drawn, 0);
            assert_eq!(stat.days_since_last, NEVER_DRAWN);
        }

        // Les numéros jamais sortis doivent dominer : absence et rareté maximales
        let drawn = stats.iter().find(|s| s.number == 1).unwrap().score;
        let unseen = stats.iter().find(|s| s.number == 8).unwrap().score;
        assert!(
            unseen > drawn,
            "score({}) devrait être > score({})", unseen, drawn
        );
        for stat in &stats {
            assert!(stat.score >= 0.0 && stat.score <= 1.0, "score hors [0,1]: {}", stat.score);
        }
    }

    #[test]
    fn test_stats_empty_history_all_zero() {
        let stats = compute_stats(&[], date("2024-01-08"));
        assert_eq!(stats.len(), POOL_SIZE);
        for stat in &stats {
            assert_eq!(stat.times_drawn, 0);
            assert_eq!(stat.days_since_last, NEVER_DRAWN);
            assert_eq!(stat.score, 0.0);
        }
    }

    #[test]
    fn test_stats_most_recent_occurrence_wins() {
        // Historique fourni du plus récent au plus ancien : l'ordre
        // d'entrée ne doit pas changer le résultat
        let draws = vec![
            draw("2024-01-10", [5, 20, 21, 22, 23, 24, 25]),
            draw("2024-01-01", [5, 30, 31, 32, 33, 34, 35]),
        ];
        let stats = compute_stats(&draws, date("2024-01-20"));

        let five = stats.iter().find(|s| s.number == 5).unwrap();
        assert_eq!(five.times_drawn, 2);
        assert_eq!(five.days_since_last, 10);
    }

    #[test]
    fn test_stats_draw_after_as_of_keeps_sentinel_for_unseen_only() {
        // Une absence négative (tirage daté après as_of) ne doit pas
        // forger la sentinelle des numéros jamais sortis
        let draws = vec![
            draw("2024-01-01", [1, 2, 3, 4, 5, 6, 7]),
            draw("2024-01-09", [8, 9, 10, 11, 12, 13, 14]),
        ];
        let stats = compute_stats(&draws, date("2024-01-08"));

        let eight = stats.iter().find(|s| s.number == 8).unwrap();
        assert_eq!(eight.times_drawn, 1);
        assert_eq!(eight.days_since_last, 0);

        for stat in &stats {
            assert_eq!(stat.days_since_last == NEVER_DRAWN, stat.times_drawn == 0);
        }

        // Tout juste sorti : absence minimale, donc sous un numéro
        // absent depuis une semaine et loin sous un numéro jamais sorti
        let one = stats.iter().find(|s| s.number == 1).unwrap();
        let unseen = stats.iter().find(|s| s.number == 15).unwrap();
        assert!(eight.score < one.score);
        assert!(one.score < unseen.score);
    }

    #[test]
    fn test_stats_duplicate_slots_counted_twice() {
        let draws = vec![draw("2024-01-01", [5, 5, 3, 4, 12, 6, 7])];
        let stats = compute_stats(&draws, date("2024-01-02"));
        assert_eq!(stats.iter().find(|s| s.number == 5).unwrap().times_drawn, 2);
    }

    #[test]
    fn test_stats_out_of_range_slot_ignored() {
        // La validation se fait en amont ; le moteur ignore les valeurs
        // hors univers sans paniquer
        let draws = vec![draw("2024-01-01", [0, 50, 3, 4, 5, 6, 7])];
        let stats = compute_stats(&draws, date("2024-01-02"));
        assert_eq!(stats.len(), POOL_SIZE);
        let total: u32 = stats.iter().map(|s| s.times_drawn).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_stats_ordered_by_number() {
        let stats = compute_stats(&[], date("2024-01-08"));
        for (i, stat) in stats.iter().enumerate() {
            assert_eq!(stat.number as usize, i + 1);
        }
    }

    #[test]
    fn test_stats_degenerate_frequency() {
        // Chaque numéro sort exactement une fois : la composante
        // fréquence s'annule, seule l'absence départage
        let draws: Vec<Draw> = (0..7)
            .map(|i| {
                let numbers: Vec<u8> = (1..=7).map(|j| (i * 7 + j) as u8).collect();
                draw(
                    &format!("2024-01-{:02}", 2 * i + 1),
                    [
                        numbers[0], numbers[1], numbers[2], numbers[3],
                        numbers[4], numbers[5], numbers[6],
                    ],
                )
            })
            .collect();
        let stats = compute_stats(&draws, date("2024-02-01"));

        for stat in &stats {
            assert_eq!(stat.times_drawn, 1);
            assert!(stat.score <= ABSENCE_WEIGHT + 1e-12, "score: {}", stat.score);
            assert!(stat.score >= 0.0);
        }
        // Le plus ancien tirage porte l'absence maximale
        let oldest = stats.iter().find(|s| s.number == 1).unwrap();
        assert!((oldest.score - ABSENCE_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_stats_scores_within_unit_interval() {
        let draws = vec![
            draw("2024-01-01", [1, 2, 3, 4, 5, 6, 7]),
            draw("2024-01-04", [1, 2, 3, 10, 11, 12, 13]),
            draw("2024-01-06", [1, 20, 21, 22, 23, 24, 25]),
            draw("2024-01-08", [40, 41, 42, 43, 44, 45, 46]),
        ];
        let stats = compute_stats(&draws, date("2024-01-15"));
        for stat in &stats {
            assert!(stat.score >= 0.0 && stat.score <= 1.0, "score hors [0,1]: {}", stat.score);
        }
    }
}
