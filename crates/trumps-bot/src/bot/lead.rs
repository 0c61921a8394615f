use super::{Decision, PlayReason, trash_card};
use trumps_core::GameError;
use trumps_core::game::engine::DecisionContext;
use trumps_core::model::suit::Suit;

/// Hand size at or below which trump joins the safe-high-card search.
const SHORT_HAND_TRUMP_LEAD: usize = 5;

pub struct LeadPlanner;

impl LeadPlanner {
    pub fn choose(ctx: &DecisionContext<'_>) -> Result<Decision, GameError> {
        // The top unplayed card of a suit the opponents still follow.
        let high_suits: &[Suit] = if ctx.hand.len() <= SHORT_HAND_TRUMP_LEAD {
            &Suit::ALL
        } else {
            &Suit::PLAIN
        };
        for &suit in high_suits {
            if let Some(top) = ctx.tracker.top_card(suit) {
                if ctx.opponents_follow(suit) && ctx.hand.contains(top) {
                    return Ok(Decision::new(top, PlayReason::LeadSafeHigh));
                }
            }
        }

        // Something the partner can cut.
        let partner = ctx.seat.partner();
        for suit in Suit::PLAIN {
            if ctx.tracker.is_short(suit, partner) && ctx.hand.has_suit(suit) {
                let card = ctx.hand.lowest_in(suit)?;
                return Ok(Decision::new(card, PlayReason::LeadFeedPartnerCut));
            }
        }

        // A low card the opponents are not known to cut.
        for suit in Suit::PLAIN {
            if ctx.opponents_follow(suit) && ctx.hand.has_suit(suit) {
                let card = ctx.hand.lowest_in(suit)?;
                return Ok(Decision::new(card, PlayReason::LeadSafeLow));
            }
        }

        Ok(Decision::new(trash_card(ctx.hand)?, PlayReason::LeadTrash))
    }
}
