mod follow;
mod lead;
mod trash;

pub use follow::FollowPlanner;
pub use lead::LeadPlanner;
pub use trash::trash_card;

use trumps_core::GameError;
use trumps_core::game::engine::DecisionContext;
use trumps_core::model::card::Card;

/// Which branch of the rule set produced a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayReason {
    LeadSafeHigh,
    LeadFeedPartnerCut,
    LeadSafeLow,
    LeadTrash,
    LastPartnerWinning,
    LastCheapestWinner,
    LastCannotWin,
    FollowTopCard,
    FollowLow,
    DiscardPartnerWinning,
    CheapestCut,
    DiscardCannotWin,
}

impl PlayReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayReason::LeadSafeHigh => "lead_safe_high",
            PlayReason::LeadFeedPartnerCut => "lead_feed_partner_cut",
            PlayReason::LeadSafeLow => "lead_safe_low",
            PlayReason::LeadTrash => "lead_trash",
            PlayReason::LastPartnerWinning => "last_partner_winning",
            PlayReason::LastCheapestWinner => "last_cheapest_winner",
            PlayReason::LastCannotWin => "last_cannot_win",
            PlayReason::FollowTopCard => "follow_top_card",
            PlayReason::FollowLow => "follow_low",
            PlayReason::DiscardPartnerWinning => "discard_partner_winning",
            PlayReason::CheapestCut => "cheapest_cut",
            PlayReason::DiscardCannotWin => "discard_cannot_win",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub card: Card,
    pub reason: PlayReason,
}

impl Decision {
    pub const fn new(card: Card, reason: PlayReason) -> Self {
        Self { card, reason }
    }
}

/// Runs the full rule set for the seat on turn.
pub fn decide(ctx: &DecisionContext<'_>) -> Result<Decision, GameError> {
    if ctx.hand.is_empty() {
        return Err(GameError::EmptyCardSelection);
    }
    if ctx.is_leading() {
        LeadPlanner::choose(ctx)
    } else {
        FollowPlanner::choose(ctx)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use trumps_core::game::engine::DecisionContext;
    use trumps_core::game::state::{GameState, TrickOutcome};
    use trumps_core::model::card::Card;
    use trumps_core::model::hand::Hand;
    use trumps_core::model::seat::Seat;

    pub fn card(text: &str) -> Card {
        text.parse().expect("valid card")
    }

    pub fn hand(cards: &[&str]) -> Hand {
        Hand::with_cards(cards.iter().map(|text| card(text)).collect())
    }

    /// Game where only the listed cards are still out; the rest count as played.
    pub fn game(hands: [&[&str]; 4], leader: Seat) -> GameState {
        GameState::from_hands(hands.map(hand), leader)
    }

    /// Context for `seat`, which must be the seat due to play.
    pub fn context(game: &GameState, seat: Seat) -> DecisionContext<'_> {
        let trick = game.current_trick();
        assert_eq!(trick.next_seat(), Some(seat), "{seat} is not on turn");
        DecisionContext {
            seat,
            turn_index: trick.plays().len(),
            hand: game.hand(seat),
            tracker: game.tracker(),
            trick,
        }
    }

    /// Plays `cards` in turn order from whoever is due, leading if the trick
    /// is empty. Returns the outcome if the last card resolved the trick.
    pub fn play(game: &mut GameState, cards: &[&str]) -> Option<TrickOutcome> {
        let mut outcome = None;
        for text in cards {
            let trick = game.current_trick();
            let seat = trick.next_seat().expect("trick has room");
            if trick.plays().is_empty() {
                game.lead(seat, card(text)).expect("lead");
            } else {
                outcome = game.follow(seat, card(text)).expect("follow");
            }
        }
        outcome
    }
}
