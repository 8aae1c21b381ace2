use crate::card::{Card, MAX_FACTOR, MIN_FACTOR, question_key};
use crate::config::NumberSelection;
use std::collections::HashMap;

/// Builds the active deck for a selection of tables
///
/// Every selected number is paired with each factor from 2 to 9. Facts already present
/// in `persisted` keep their learning state; unseen facts start as fresh cards.
pub fn build_deck(select: &NumberSelection, persisted: &HashMap<String, Card>) -> Vec<Card> {
    let mut deck = Vec::with_capacity(select.len() * (MAX_FACTOR - MIN_FACTOR + 1) as usize);

    for table in select.iter() {
        for factor in MIN_FACTOR..=MAX_FACTOR {
            let card = match persisted.get(&question_key(table, factor)) {
                Some(card) => card.clone(),
                None => match Card::new(table, factor) {
                    Ok(card) => card,
                    // NumberSelection only holds numbers in range
                    Err(_) => continue,
                },
            };
            deck.push(card);
        }
    }

    deck
}

/// Cards of `deck` that have no persisted counterpart yet
pub fn new_cards<'a>(deck: &'a [Card], persisted: &HashMap<String, Card>) -> Vec<&'a Card> {
    deck.iter()
        .filter(|card| !persisted.contains_key(&card.question()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn selection(numbers: &[u8]) -> NumberSelection {
        NumberSelection::new(numbers.iter().copied()).unwrap()
    }

    #[test]
    fn test_single_table_deck() {
        let deck = build_deck(&selection(&[6]), &HashMap::new());

        assert_eq!(deck.len(), 8);
        let questions: Vec<String> = deck.iter().map(|c| c.question()).collect();
        assert_eq!(questions[0], "6×2");
        assert_eq!(questions[7], "6×9");
        assert!(deck.iter().all(|c| c.level() == 1 && c.time() == 60.0));
    }

    #[test]
    fn test_every_selection_has_eight_unique_cards_per_table() {
        // all 255 non-empty subsets of 2..=9
        for mask in 1u16..256 {
            let numbers: Vec<u8> = (0..8u8)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| bit + 2)
                .collect();
            let deck = build_deck(&selection(&numbers), &HashMap::new());

            assert_eq!(deck.len(), numbers.len() * 8);
            let unique: HashSet<String> = deck.iter().map(|c| c.question()).collect();
            assert_eq!(unique.len(), deck.len());
        }
    }

    #[test]
    fn test_persisted_cards_are_reused() {
        let mut persisted = HashMap::new();
        let known = Card::restore(3, 4, 4, 2.5).unwrap();
        persisted.insert(known.question(), known.clone());
        // outside the selection, must not leak into the deck
        let other = Card::restore(7, 7, 5, 1.0).unwrap();
        persisted.insert(other.question(), other);

        let deck = build_deck(&selection(&[3]), &persisted);

        assert_eq!(deck.len(), 8);
        let reused = deck.iter().find(|c| c.question() == "3×4").unwrap();
        assert_eq!(reused, &known);
        assert!(deck.iter().all(|c| c.table() == 3));
    }

    #[test]
    fn test_new_cards_lists_unpersisted_facts() {
        let mut persisted = HashMap::new();
        let known = Card::restore(2, 2, 2, 10.0).unwrap();
        persisted.insert(known.question(), known);

        let deck = build_deck(&selection(&[2]), &persisted);
        let fresh = new_cards(&deck, &persisted);

        assert_eq!(fresh.len(), 7);
        assert!(fresh.iter().all(|c| c.question() != "2×2"));
    }
}
