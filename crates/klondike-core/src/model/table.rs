use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::pile::{Pile, PileKind};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::array;

pub const TABLEAU_COUNT: usize = 7;
pub const FOUNDATION_COUNT: usize = 4;
pub const MAX_RECYCLES: u8 = 3;

/// The complete game position: seven tableaus, four suit-locked foundations,
/// stock, waste and the number of recycles spent.
///
/// Cloning a `Table` is the snapshot used by undo and by the hint search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    tableaus: [Pile; TABLEAU_COUNT],
    foundations: [Pile; FOUNDATION_COUNT],
    stock: Pile,
    waste: Pile,
    recycles: u8,
}

impl Table {
    pub fn empty() -> Self {
        Self {
            tableaus: array::from_fn(|_| Pile::new(PileKind::Tableau)),
            foundations: array::from_fn(|idx| Pile::new(PileKind::Foundation(Suit::ALL[idx]))),
            stock: Pile::new(PileKind::Stock),
            waste: Pile::new(PileKind::Waste),
            recycles: 0,
        }
    }

    /// Deals `deck` in order: tableau `i` receives `i + 1` cards with only
    /// the last one face-up, the remainder goes to the stock face-down with
    /// the final deck card on top.
    pub fn deal(deck: &Deck) -> Self {
        let mut table = Self::empty();
        let mut cards = deck.cards().iter().copied();

        for column in 0..TABLEAU_COUNT {
            for row in 0..=column {
                if let Some(card) = cards.next() {
                    table.tableaus[column].push(card.with_face_up(row == column));
                }
            }
        }

        for card in cards {
            table.stock.push(card.with_face_up(false));
        }
        table
    }

    pub fn deal_with_seed(seed: u64) -> Self {
        Self::deal(&Deck::shuffled_with_seed(seed))
    }

    /// Builds an arbitrary position. No census check is made; positions
    /// built here need not hold a full deck.
    pub fn from_piles(
        tableaus: [Vec<Card>; TABLEAU_COUNT],
        foundations: [Vec<Card>; FOUNDATION_COUNT],
        stock: Vec<Card>,
        waste: Vec<Card>,
        recycles: u8,
    ) -> Self {
        let mut tableaus = tableaus.into_iter();
        let mut foundations = foundations.into_iter();
        Self {
            tableaus: array::from_fn(|_| {
                Pile::with_cards(PileKind::Tableau, tableaus.next().unwrap_or_default())
            }),
            foundations: array::from_fn(|idx| {
                Pile::with_cards(
                    PileKind::Foundation(Suit::ALL[idx]),
                    foundations.next().unwrap_or_default(),
                )
            }),
            stock: Pile::with_cards(PileKind::Stock, stock),
            waste: Pile::with_cards(PileKind::Waste, waste),
            recycles,
        }
    }

    pub fn tableaus(&self) -> &[Pile; TABLEAU_COUNT] {
        &self.tableaus
    }

    pub fn tableau(&self, index: usize) -> Option<&Pile> {
        self.tableaus.get(index)
    }

    pub fn foundations(&self) -> &[Pile; FOUNDATION_COUNT] {
        &self.foundations
    }

    pub fn foundation(&self, index: usize) -> Option<&Pile> {
        self.foundations.get(index)
    }

    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    pub fn recycles(&self) -> u8 {
        self.recycles
    }

    pub fn can_recycle(&self) -> bool {
        self.recycles < MAX_RECYCLES
    }

    pub fn recycles_remaining(&self) -> u8 {
        MAX_RECYCLES.saturating_sub(self.recycles)
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(|pile| pile.len() == Rank::ORDERED.len())
    }

    /// Piles in canonical order: tableaus, foundations, stock, waste.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.tableaus
            .iter()
            .chain(self.foundations.iter())
            .chain(std::iter::once(&self.stock))
            .chain(std::iter::once(&self.waste))
    }

    /// Card identities across every pile, sorted by suit then rank.
    pub fn census(&self) -> Vec<(Rank, Suit)> {
        let mut cards: Vec<(Rank, Suit)> = self
            .piles()
            .flat_map(|pile| pile.cards().iter().map(|card| card.identity()))
            .collect();
        cards.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        cards
    }

    /// Exactly the 52 distinct cards, each once.
    pub fn holds_full_deck(&self) -> bool {
        let census = self.census();
        let expected: Vec<(Rank, Suit)> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ORDERED.iter().map(move |&rank| (rank, suit)))
            .collect();
        census == expected
    }

    pub(crate) fn tableau_mut(&mut self, index: usize) -> &mut Pile {
        &mut self.tableaus[index]
    }

    pub(crate) fn foundation_mut(&mut self, index: usize) -> &mut Pile {
        &mut self.foundations[index]
    }

    pub(crate) fn waste_mut(&mut self) -> &mut Pile {
        &mut self.waste
    }

    pub(crate) fn stock_and_waste_mut(&mut self) -> (&mut Pile, &mut Pile) {
        (&mut self.stock, &mut self.waste)
    }

    pub(crate) fn two_tableaus_mut(&mut self, first: usize, second: usize) -> (&mut Pile, &mut Pile) {
        debug_assert_ne!(first, second);
        if first < second {
            let (low, high) = self.tableaus.split_at_mut(second);
            (&mut low[first], &mut high[0])
        } else {
            let (low, high) = self.tableaus.split_at_mut(first);
            (&mut high[0], &mut low[second])
        }
    }

    pub(crate) fn note_recycle(&mut self) {
        self.recycles = self.recycles.saturating_add(1);
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}
