use crate::card::Card;
use crate::error::{ConfigError, EmptyDeckError};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::str::FromStr;

/// Which facts a game puts in front of the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum FocusType {
    /// Least mastered facts first
    #[default]
    Weak,
    /// Best mastered facts first
    Strong,
    /// Facts with the slowest response time first
    Slow,
}

impl FocusType {
    pub const ALL: [FocusType; 3] = [FocusType::Weak, FocusType::Strong, FocusType::Slow];

    pub fn as_str(&self) -> &str {
        match self {
            FocusType::Weak => "weak",
            FocusType::Strong => "strong",
            FocusType::Slow => "slow",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "weak" => Some(FocusType::Weak),
            "strong" => Some(FocusType::Strong),
            "slow" => Some(FocusType::Slow),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FocusType::Weak => "Weak facts",
            FocusType::Strong => "Strong facts",
            FocusType::Slow => "Slow facts",
        }
    }
}

impl FromStr for FocusType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FocusType::from(&s.trim().to_lowercase())
            .ok_or_else(|| ConfigError::UnknownFocus(s.to_string()))
    }
}

/// Picks the position in `deck` of the next card to present
///
/// Cards whose question is in `excluding` were already asked in the current cycle.
/// Once every card has been asked the whole deck is eligible again.
pub fn select_next<R: Rng + ?Sized>(
    deck: &[Card],
    focus: FocusType,
    excluding: &HashSet<String>,
    rng: &mut R,
) -> Result<usize, EmptyDeckError> {
    if deck.is_empty() {
        return Err(EmptyDeckError);
    }

    let mut candidates: Vec<usize> = (0..deck.len())
        .filter(|&i| !excluding.contains(&deck[i].question()))
        .collect();
    if candidates.is_empty() {
        candidates = (0..deck.len()).collect();
    }

    let pool = match focus {
        FocusType::Weak => at_level(deck, &candidates, false),
        FocusType::Strong => at_level(deck, &candidates, true),
        FocusType::Slow => slowest_decile(deck, &candidates),
    };

    pool.choose(rng).copied().ok_or(EmptyDeckError)
}

fn at_level(deck: &[Card], candidates: &[usize], highest: bool) -> Vec<usize> {
    let levels = candidates.iter().map(|&i| deck[i].level());
    let target = if highest { levels.max() } else { levels.min() };
    let Some(target) = target else {
        return Vec::new();
    };

    candidates
        .iter()
        .copied()
        .filter(|&i| deck[i].level() == target)
        .collect()
}

/// Candidates among the slowest tenth, at least the single slowest card
fn slowest_decile(deck: &[Card], candidates: &[usize]) -> Vec<usize> {
    let mut times: Vec<f64> = candidates.iter().map(|&i| deck[i].time()).collect();
    times.sort_by(|a, b| b.total_cmp(a));

    let keep = candidates.len().div_ceil(10).max(1);
    let Some(&threshold) = times.get(keep - 1) else {
        return Vec::new();
    };

    candidates
        .iter()
        .copied()
        .filter(|&i| deck[i].time() >= threshold)
        .collect()
}
