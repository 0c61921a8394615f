pub mod card;
pub mod card_set;
pub mod deck;
pub mod hand;
pub mod rank;
pub mod score;
pub mod seat;
pub mod suit;
pub mod tracker;
pub mod trick;
