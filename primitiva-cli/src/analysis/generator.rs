use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use primitiva_db::models::{
    CombinationBatch, NumberStat, ValidationError, COMBINATION_SIZE, MAX_COMBINATIONS,
    MIN_COMBINATIONS, POOL_SIZE,
};

/// Les 49 numéros classés par score sont répartis en trois groupes :
/// chaque combinaison puise un quota fixe dans chacun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    Middle,
    Bottom,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Top, Tier::Middle, Tier::Bottom];

    pub fn size(&self) -> usize {
        match self {
            Tier::Top => 14,
            Tier::Middle => 21,
            Tier::Bottom => 14,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Tier::Top => 2,
            Tier::Middle => 3,
            Tier::Bottom => 1,
        }
    }

    fn offset(&self) -> usize {
        match self {
            Tier::Top => 0,
            Tier::Middle => Tier::Top.size(),
            Tier::Bottom => Tier::Top.size() + Tier::Middle.size(),
        }
    }

    fn slice<'a>(&self, ranked: &'a [u8]) -> &'a [u8] {
        &ranked[self.offset()..self.offset() + self.size()]
    }
}

/// Génère jusqu'à `count` combinaisons de 6 numéros sans réutiliser un
/// numéro d'une combinaison à l'autre. Si un groupe s'épuise avant la
/// fin, le lot est rendu plus court avec `exhausted` à true.
pub fn generate(
    stats: &[NumberStat],
    count: usize,
    seed: Option<u64>,
) -> Result<CombinationBatch, ValidationError> {
    if count < MIN_COMBINATIONS || count > MAX_COMBINATIONS {
        return Err(ValidationError::CombinationCount(count));
    }
    if stats.len() != POOL_SIZE {
        return Err(ValidationError::StatsTableSize(stats.len()));
    }

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let ranked = rank_by_score(stats);
    let mut used: HashSet<u8> = HashSet::new();
    let mut combinations = Vec::with_capacity(count);
    let mut exhausted = false;

    for _ in 0..count {
        match sample_combination(&ranked, &used, &mut rng) {
            Some(combination) => {
                used.extend(combination);
                combinations.push(combination);
            }
            None => {
                exhausted = true;
                break;
            }
        }
    }

    Ok(CombinationBatch {
        combinations,
        exhausted,
    })
}

/// Numéros triés par score décroissant. Les égalités sont départagées
/// par numéro croissant pour que le classement soit déterministe.
fn rank_by_score(stats: &[NumberStat]) -> Vec<u8> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.number.cmp(&b.number))
    });
    sorted.iter().map(|s| s.number).collect()
}

/// Tire 2 numéros du groupe haut, 3 du groupe médian et 1 du groupe bas,
/// uniformément parmi les numéros encore libres de chaque groupe.
/// Retourne None dès qu'un groupe ne peut plus fournir son quota.
fn sample_combination(
    ranked: &[u8],
    used: &HashSet<u8>,
    rng: &mut StdRng,
) -> Option<[u8; COMBINATION_SIZE]> {
    let mut picks: Vec<u8> = Vec::with_capacity(COMBINATION_SIZE);

    for tier in Tier::ALL {
        let pool: Vec<u8> = tier
            .slice(ranked)
            .iter()
            .copied()
            .filter(|n| !used.contains(n))
            .collect();
        if pool.len() < tier.pick_count() {
            return None;
        }
        picks.extend(pool.choose_multiple(rng, tier.pick_count()).copied());
    }

    let mut combination = [0u8; COMBINATION_SIZE];
    for (i, &n) in picks.iter().enumerate() {
        combination[i] = n;
    }
    combination.sort();
    Some(combination)
}
