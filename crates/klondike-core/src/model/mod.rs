pub mod card;
pub mod deck;
pub mod pile;
pub mod rank;
pub mod suit;
pub mod table;
