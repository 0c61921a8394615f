use super::{Decision, PlayReason, trash_card};
use trumps_core::GameError;
use trumps_core::game::engine::DecisionContext;
use trumps_core::model::card::Card;
use trumps_core::model::hand::lowest_of;
use trumps_core::model::rank::Rank;
use trumps_core::model::suit::Suit;

pub struct FollowPlanner;

impl FollowPlanner {
    pub fn choose(ctx: &DecisionContext<'_>) -> Result<Decision, GameError> {
        let (Some(lead), Some(highest)) = (ctx.trick.lead_suit(), ctx.trick.highest_rank())
        else {
            return Err(GameError::NoLeadPlayed);
        };

        if ctx.hand.has_suit(lead) {
            if ctx.is_last() {
                Self::last_to_play(ctx, lead, highest)
            } else {
                Self::mid_trick(ctx, lead, highest)
            }
        } else {
            Self::without_lead_suit(ctx, highest)
        }
    }

    fn last_to_play(
        ctx: &DecisionContext<'_>,
        lead: Suit,
        highest: Rank,
    ) -> Result<Decision, GameError> {
        if ctx.partner_winning() {
            let card = ctx.hand.lowest_in(lead)?;
            return Ok(Decision::new(card, PlayReason::LastPartnerWinning));
        }
        if !ctx.trick.is_cut() {
            let winners: Vec<Card> = ctx.hand.in_suit(lead).filter(|c| c.rank > highest).collect();
            if !winners.is_empty() {
                return Ok(Decision::new(lowest_of(winners)?, PlayReason::LastCheapestWinner));
            }
        }
        Ok(Decision::new(ctx.hand.lowest_in(lead)?, PlayReason::LastCannotWin))
    }

    fn mid_trick(
        ctx: &DecisionContext<'_>,
        lead: Suit,
        highest: Rank,
    ) -> Result<Decision, GameError> {
        if !ctx.trick.is_cut() && ctx.opponents_follow(lead) {
            if let Some(top) = ctx.tracker.top_card(lead) {
                if top.rank > highest && ctx.hand.contains(top) {
                    return Ok(Decision::new(top, PlayReason::FollowTopCard));
                }
            }
        }
        Ok(Decision::new(ctx.hand.lowest_in(lead)?, PlayReason::FollowLow))
    }

    fn without_lead_suit(ctx: &DecisionContext<'_>, highest: Rank) -> Result<Decision, GameError> {
        if ctx.partner_winning() {
            return Ok(Decision::new(trash_card(ctx.hand)?, PlayReason::DiscardPartnerWinning));
        }

        let cut = ctx.trick.is_cut();
        let cuts: Vec<Card> = ctx
            .hand
            .in_suit(Suit::Trump)
            .filter(|c| !cut || c.rank > highest)
            .collect();
        if cuts.is_empty() {
            Ok(Decision::new(trash_card(ctx.hand)?, PlayReason::DiscardCannotWin))
        } else {
            Ok(Decision::new(lowest_of(cuts)?, PlayReason::CheapestCut))
        }
    }
}
