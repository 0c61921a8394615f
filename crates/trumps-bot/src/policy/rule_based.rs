use tracing::{Level, event};
use trumps_core::GameError;
use trumps_core::game::engine::{DecisionContext, SeatStrategy};
use trumps_core::model::card::Card;

use super::PolicyOptions;
use crate::bot::{Decision, decide};

/// The fixed rule set, played identically by all four seats.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedPolicy {
    options: PolicyOptions,
}

impl RuleBasedPolicy {
    pub fn new(options: PolicyOptions) -> Self {
        Self { options }
    }

    pub fn from_env() -> Self {
        Self::new(PolicyOptions::from_env())
    }

    pub fn options(&self) -> PolicyOptions {
        self.options
    }

    /// Chooses a card and the rule that picked it.
    pub fn decide(&self, ctx: &DecisionContext<'_>) -> Result<Decision, GameError> {
        let decision = decide(ctx)?;
        if !ctx.hand.contains(decision.card) {
            return Err(GameError::CardNotInHand {
                seat: ctx.seat,
                card: decision.card,
            });
        }
        if self.options.decision_details() {
            log_play_decision(ctx, &decision);
        }
        Ok(decision)
    }
}

impl SeatStrategy for RuleBasedPolicy {
    fn choose_card(&mut self, ctx: &DecisionContext<'_>) -> Result<Card, GameError> {
        self.decide(ctx).map(|decision| decision.card)
    }
}

fn log_play_decision(ctx: &DecisionContext<'_>, decision: &Decision) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "trumps_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        turn = ctx.turn_index,
        reason = decision.reason.as_str(),
        chosen = %decision.card,
        hand_size = ctx.hand.len(),
        cut = ctx.trick.is_cut(),
    );
}

#[cfg(test)]
mod tests {
    use super::RuleBasedPolicy;
    use crate::bot::PlayReason;
    use crate::policy::PolicyOptions;
    use trumps_core::game::engine::{SeatStrategy, play_trick};
    use trumps_core::game::state::GameState;
    use trumps_core::model::card::Card;
    use trumps_core::model::deck::Deck;
    use trumps_core::model::seat::Seat;

    fn card(text: &str) -> Card {
        text.parse().expect("valid card")
    }

    #[test]
    fn opening_lead_on_a_standard_deal() {
        // Round-robin deal: North holds T2 T6 T10 T14 A5 A9 A13 B4 B8 B12 C3 C7 C11.
        let mut game = GameState::deal(&Deck::standard()).expect("deal");
        let mut policy = RuleBasedPolicy::default();
        let outcome = play_trick(&mut game, &mut policy).expect("trick");

        // Thirteen cards, so trump stays out of the safe-high search. North
        // lacks every plain top card, nobody is short yet, so A5 leads low.
        assert_eq!(outcome.plays[0].seat, Seat::North);
        assert_eq!(outcome.plays[0].card, card("A5"));
    }

    #[test]
    fn decide_reports_the_branch() {
        let game = GameState::deal(&Deck::standard()).expect("deal");
        let policy = RuleBasedPolicy::new(PolicyOptions::new(true));
        let ctx = trumps_core::game::engine::DecisionContext {
            seat: Seat::North,
            turn_index: 0,
            hand: game.hand(Seat::North),
            tracker: game.tracker(),
            trick: game.current_trick(),
        };
        let decision = policy.decide(&ctx).expect("decision");
        assert_eq!(decision.reason, PlayReason::LeadSafeLow);
        assert!(policy.options().decision_details());
    }

    #[test]
    fn choose_card_matches_decide() {
        let game = GameState::deal(&Deck::standard()).expect("deal");
        let mut policy = RuleBasedPolicy::default();
        let ctx = trumps_core::game::engine::DecisionContext {
            seat: Seat::North,
            turn_index: 0,
            hand: game.hand(Seat::North),
            tracker: game.tracker(),
            trick: game.current_trick(),
        };
        let decided = policy.decide(&ctx).expect("decision").card;
        assert_eq!(policy.choose_card(&ctx), Ok(decided));
    }
}
