//! Structural state keys for the hint search's visited set.
//!
//! Each pile is written as its length followed by one byte per card, in a
//! fixed pile order, then the recycle counter. The length prefixes make the
//! encoding self-delimiting, so two fingerprints are equal exactly when the
//! positions are.

use crate::model::card::Card;
use crate::model::table::Table;
use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const FACE_UP_BIT: u8 = 0x80;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Box<[u8]>);

impl Fingerprint {
    pub fn of(table: &Table) -> Self {
        // 13 length bytes, at most 52 card bytes, 1 counter byte.
        let mut bytes = Vec::with_capacity(66);
        for pile in table.piles() {
            bytes.push(pile.len() as u8);
            bytes.extend(pile.cards().iter().map(|&card| encode_card(card)));
        }
        bytes.push(table.recycles());
        Self(bytes.into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 64-bit FNV-1a of the key. For log fields only; equality checks use the
    /// full key.
    pub fn digest(&self) -> u64 {
        self.0.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.digest())
    }
}

/// Rank in the low nibble, suit in bits 4-5, orientation in bit 7.
fn encode_card(card: Card) -> u8 {
    let orientation = if card.face_up { FACE_UP_BIT } else { 0 };
    card.rank.value() | ((card.suit.index() as u8) << 4) | orientation
}

#[cfg(test)]
mod tests {
    use super::{Fingerprint, encode_card};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::table::Table;
    use std::collections::HashSet;

    #[test]
    fn card_bytes_are_distinct() {
        let mut seen = HashSet::new();
        for suit in Suit::ALL {
            for rank in Rank::ORDERED {
                assert!(seen.insert(encode_card(Card::new(rank, suit))));
                assert!(seen.insert(encode_card(Card::up(rank, suit))));
            }
        }
        assert_eq!(seen.len(), 104);
    }

    #[test]
    fn same_deal_same_fingerprint() {
        let a = Fingerprint::of(&Table::deal_with_seed(5));
        let b = Fingerprint::of(&Table::deal_with_seed(5));
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a, Fingerprint::of(&Table::deal_with_seed(6)));
    }

    #[test]
    fn orientation_changes_the_key() {
        let card = Card::new(Rank::Four, Suit::Clubs);
        let hidden = Table::from_piles(Default::default(), Default::default(), vec![], vec![card], 0);
        let shown = Table::from_piles(
            Default::default(),
            Default::default(),
            vec![],
            vec![card.with_face_up(true)],
            0,
        );
        assert_ne!(Fingerprint::of(&hidden), Fingerprint::of(&shown));
    }

    #[test]
    fn pile_boundaries_change_the_key() {
        let a = Card::up(Rank::Four, Suit::Clubs);
        let b = Card::up(Rank::Three, Suit::Hearts);
        let mut split: [Vec<Card>; 7] = Default::default();
        split[0] = vec![a];
        split[1] = vec![b];
        let mut joined: [Vec<Card>; 7] = Default::default();
        joined[0] = vec![a, b];
        let split = Table::from_piles(split, Default::default(), vec![], vec![], 0);
        let joined = Table::from_piles(joined, Default::default(), vec![], vec![], 0);
        assert_ne!(Fingerprint::of(&split), Fingerprint::of(&joined));
    }

    #[test]
    fn recycle_count_changes_the_key() {
        let fresh = Table::from_piles(Default::default(), Default::default(), vec![], vec![], 0);
        let spent = Table::from_piles(Default::default(), Default::default(), vec![], vec![], 1);
        assert_ne!(Fingerprint::of(&fresh), Fingerprint::of(&spent));
    }

    #[test]
    fn display_is_hex_digest() {
        let key = Fingerprint::of(&Table::empty());
        assert_eq!(key.to_string().len(), 16);
        assert_eq!(key.as_bytes().len(), 14);
    }
}
