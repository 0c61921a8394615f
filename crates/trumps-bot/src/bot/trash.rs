use trumps_core::GameError;
use trumps_core::model::card::Card;
use trumps_core::model::hand::{Hand, lowest_of};
use trumps_core::model::suit::Suit;

/// Card to throw away when the seat has no better use for its turn.
///
/// Holding trump, a lone plain-suit card goes first so the suit can be cut
/// later. Otherwise the lowest plain card, and only then the lowest trump.
pub fn trash_card(hand: &Hand) -> Result<Card, GameError> {
    if hand.has_trump() {
        if let Some(singleton) = Suit::PLAIN
            .iter()
            .find(|suit| hand.count_in(**suit) == 1)
            .and_then(|suit| hand.in_suit(*suit).next())
        {
            return Ok(singleton);
        }
    }

    if hand.plain_cards().next().is_some() {
        lowest_of(hand.plain_cards())
    } else {
        lowest_of(hand.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::trash_card;
    use crate::bot::test_support::{card, hand};
    use trumps_core::GameError;
    use trumps_core::model::hand::Hand;

    #[test]
    fn singleton_goes_first_when_holding_trump() {
        let hand = hand(&["T3", "A2", "A5", "B13", "C4", "C9"]);
        assert_eq!(trash_card(&hand), Ok(card("B13")));
    }

    #[test]
    fn singleton_search_follows_suit_order() {
        let hand = hand(&["T3", "A12", "B13", "C4", "C9"]);
        assert_eq!(trash_card(&hand), Ok(card("A12")));
    }

    #[test]
    fn without_trump_the_lowest_plain_card_goes() {
        let hand = hand(&["A12", "B13", "C4", "C9"]);
        assert_eq!(trash_card(&hand), Ok(card("C4")));
    }

    #[test]
    fn no_singleton_means_lowest_plain_card() {
        let hand = hand(&["T2", "A7", "A9", "B6", "B8"]);
        assert_eq!(trash_card(&hand), Ok(card("B6")));
    }

    #[test]
    fn all_trump_hand_discards_lowest_trump() {
        let hand = hand(&["T5", "T9", "T14"]);
        assert_eq!(trash_card(&hand), Ok(card("T5")));
    }

    #[test]
    fn empty_hand_is_a_contract_violation() {
        assert_eq!(trash_card(&Hand::default()), Err(GameError::EmptyCardSelection));
    }
}
