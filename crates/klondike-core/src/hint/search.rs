//! Depth-bounded, greedy hint search.
//!
//! Each node tries, in order: waste to foundation, waste to tableau, tableau
//! to foundation, tableau to tableau, then a hypothetical draw and a
//! hypothetical recycle that recurse one level deeper. The first admissible
//! candidate wins; nothing here looks for the shortest line.

use super::Hint;
use super::reversal::reversal_of;
use crate::engine::Move;
use crate::fingerprint::Fingerprint;
use crate::model::table::{FOUNDATION_COUNT, TABLEAU_COUNT, Table};
use std::collections::HashSet;
use tracing::{Level, event};

pub const DEFAULT_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintConfig {
    /// Deepest level explored; the root is level 0.
    pub max_depth: usize,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Which candidates a pass may return.
#[derive(Debug, Clone, Copy)]
enum Filter<'a> {
    Any,
    /// Skip anything whose descriptor equals this text.
    Avoid(&'a str),
}

impl Filter<'_> {
    fn admits(self, hint: &Hint) -> bool {
        match self {
            Filter::Any => true,
            Filter::Avoid(inverse) => !hint.to_string().eq_ignore_ascii_case(inverse),
        }
    }
}

#[derive(Debug, Default)]
struct PassStats {
    nodes: usize,
    revisits: usize,
    depth_cutoffs: usize,
}

/// Proposes one legal next move for `table`, or `None`.
///
/// `last_move` is the descriptor of the player's previous move. The first
/// pass ignores it; if that pass finds nothing, or finds exactly the inverse
/// of `last_move`, a second pass runs with the inverse filtered out at every
/// branch. `table` is never modified.
pub fn find_hint(table: &Table, last_move: Option<&str>, config: &HintConfig) -> Option<Hint> {
    let inverse = last_move.and_then(reversal_of);

    let mut visited = HashSet::new();
    let mut stats = PassStats::default();
    let first = explore(table, 0, &mut visited, Filter::Any, config, &mut stats);
    log_pass(1, table, &stats, first.as_ref());

    let reverses_last = match (&first, &inverse) {
        (Some(hint), Some(inverse)) => hint.to_string().eq_ignore_ascii_case(inverse),
        _ => false,
    };
    if first.is_some() && !reverses_last {
        return first;
    }

    visited.clear();
    let mut stats = PassStats::default();
    let filter = inverse.as_deref().map_or(Filter::Any, Filter::Avoid);
    let second = explore(table, 0, &mut visited, filter, config, &mut stats);
    log_pass(2, table, &stats, second.as_ref());
    second
}

fn explore(
    table: &Table,
    depth: usize,
    visited: &mut HashSet<Fingerprint>,
    filter: Filter<'_>,
    config: &HintConfig,
    stats: &mut PassStats,
) -> Option<Hint> {
    if depth > config.max_depth {
        stats.depth_cutoffs += 1;
        return None;
    }
    if !visited.insert(Fingerprint::of(table)) {
        stats.revisits += 1;
        return None;
    }
    stats.nodes += 1;

    if let Some(hint) = direct_moves(table)
        .map(Hint::Move)
        .find(|hint| filter.admits(hint))
    {
        return Some(hint);
    }

    if !table.stock().is_empty() {
        let mut drawn = table.clone();
        if drawn.draw_from_stock().is_ok() {
            if let Some(next) = explore(&drawn, depth + 1, visited, filter, config, stats) {
                let hint = Hint::AfterDraw(Box::new(next));
                if filter.admits(&hint) {
                    return Some(hint);
                }
            }
        }
    }

    if table.can_recycle() {
        let mut recycled = table.clone();
        if recycled.recycle_stock().is_ok() {
            if let Some(next) = explore(&recycled, depth + 1, visited, filter, config, stats) {
                let hint = Hint::AfterRecycle(Box::new(next));
                if filter.admits(&hint) {
                    return Some(hint);
                }
            }
        }
    }

    None
}

/// Legal pile moves in priority order. Tableau indices are scanned
/// ascending, and runs by source, then start card, then destination.
fn direct_moves(table: &Table) -> impl Iterator<Item = Move> + '_ {
    let waste_home = (0..FOUNDATION_COUNT).map(|foundation| Move::WasteToFoundation { foundation });
    let waste_down = (0..TABLEAU_COUNT).map(|tableau| Move::WasteToTableau { tableau });
    let tableau_home = (0..TABLEAU_COUNT).flat_map(|tableau| {
        (0..FOUNDATION_COUNT).map(move |foundation| Move::TableauToFoundation {
            tableau,
            foundation,
        })
    });
    let runs = (0..TABLEAU_COUNT).flat_map(move |from| {
        (0..table.tableaus()[from].len()).flat_map(move |start| {
            (0..TABLEAU_COUNT)
                .filter(move |&to| to != from)
                .map(move |to| Move::TableauToTableau { from, to, start })
        })
    });

    waste_home
        .chain(waste_down)
        .chain(tableau_home)
        .chain(runs)
        .filter(move |&mv| table.check(mv).is_ok())
}

fn log_pass(pass: u8, table: &Table, stats: &PassStats, found: Option<&Hint>) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let hint = found.map(ToString::to_string).unwrap_or_default();
    event!(
        target: "klondike_core::hint",
        Level::DEBUG,
        pass,
        root = %Fingerprint::of(table),
        nodes = stats.nodes,
        revisits = stats.revisits,
        depth_cutoffs = stats.depth_cutoffs,
        found = found.is_some(),
        hint = %hint
    );
}

#[cfg(test)]
mod tests {
    use super::{HintConfig, direct_moves, find_hint};
    use crate::engine::Move;
    use crate::fingerprint::Fingerprint;
    use crate::hint::{Hint, HintStep};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::table::{MAX_RECYCLES, Table};

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::up(rank, suit)
    }

    fn down(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn columns(piles: Vec<Vec<Card>>) -> [Vec<Card>; 7] {
        let mut out: [Vec<Card>; 7] = Default::default();
        for (slot, pile) in out.iter_mut().zip(piles) {
            *slot = pile;
        }
        out
    }

    #[test]
    fn waste_to_foundation_beats_everything_else() {
        let table = Table::from_piles(
            columns(vec![
                vec![up(Rank::Ace, Suit::Clubs)],
                vec![up(Rank::Nine, Suit::Spades)],
            ]),
            Default::default(),
            vec![down(Rank::Two, Suit::Clubs)],
            vec![up(Rank::Eight, Suit::Hearts), up(Rank::Ace, Suit::Diamonds)],
            0,
        );
        let hint = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(hint, Hint::Move(Move::WasteToFoundation { foundation: 1 }));
        assert_eq!(hint.to_string(), "Move waste to foundation DIAMONDS");
    }

    #[test]
    fn waste_to_tableau_comes_before_tableau_moves() {
        let table = Table::from_piles(
            columns(vec![
                vec![up(Rank::Ace, Suit::Clubs)],
                vec![up(Rank::Nine, Suit::Spades)],
            ]),
            Default::default(),
            vec![],
            vec![up(Rank::Eight, Suit::Hearts)],
            0,
        );
        let hint = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(hint.to_string(), "Move waste to tableau 2");
    }

    #[test]
    fn tableau_to_foundation_before_runs() {
        let table = Table::from_piles(
            columns(vec![
                vec![up(Rank::Ten, Suit::Hearts)],
                vec![up(Rank::Nine, Suit::Spades)],
                vec![up(Rank::Ace, Suit::Clubs)],
            ]),
            Default::default(),
            vec![],
            vec![],
            MAX_RECYCLES,
        );
        let hint = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(hint.to_string(), "Move tableau 3 to foundation CLUBS");
    }

    #[test]
    fn runs_scan_by_source_then_start() {
        let table = Table::from_piles(
            columns(vec![
                vec![up(Rank::Ten, Suit::Hearts)],
                vec![up(Rank::Nine, Suit::Spades)],
                vec![up(Rank::Jack, Suit::Clubs)],
            ]),
            Default::default(),
            vec![],
            vec![],
            MAX_RECYCLES,
        );
        let hint = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(
            hint,
            Hint::Move(Move::TableauToTableau {
                from: 0,
                to: 2,
                start: 0
            })
        );
    }

    #[test]
    fn draws_when_no_pile_move_exists() {
        let table = Table::from_piles(
            columns(vec![vec![up(Rank::Nine, Suit::Spades)]]),
            Default::default(),
            vec![down(Rank::Ace, Suit::Hearts), down(Rank::Four, Suit::Clubs)],
            vec![],
            MAX_RECYCLES,
        );
        let hint = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(hint.first_step(), HintStep::Draw);
        assert_eq!(
            hint.to_string(),
            "Draw card from stock, then: Draw card from stock, then: Move waste to foundation HEARTS"
        );
    }

    #[test]
    fn recycles_when_stock_is_spent() {
        let table = Table::from_piles(
            columns(vec![vec![up(Rank::Nine, Suit::Spades)]]),
            Default::default(),
            vec![],
            vec![up(Rank::Ace, Suit::Hearts), up(Rank::Four, Suit::Clubs)],
            1,
        );
        let hint = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(hint.first_step(), HintStep::Recycle);
        assert_eq!(hint.target_move(), Move::WasteToFoundation { foundation: 0 });
    }

    #[test]
    fn stuck_position_has_no_hint() {
        let table = Table::from_piles(
            columns(vec![vec![up(Rank::Nine, Suit::Spades)]]),
            Default::default(),
            vec![],
            vec![up(Rank::Four, Suit::Clubs)],
            MAX_RECYCLES,
        );
        assert_eq!(find_hint(&table, None, &HintConfig::default()), None);
    }

    #[test]
    fn depth_limit_bounds_lookahead() {
        let mut stock = vec![down(Rank::Ace, Suit::Hearts)];
        stock.extend(
            [Rank::Four, Rank::Five, Rank::Six]
                .into_iter()
                .map(|rank| down(rank, Suit::Clubs)),
        );
        let table = Table::from_piles(Default::default(), Default::default(), stock, vec![], MAX_RECYCLES);
        let shallow = HintConfig { max_depth: 2 };
        assert_eq!(find_hint(&table, None, &shallow), None);
        let deep = HintConfig { max_depth: 4 };
        let hint = find_hint(&table, None, &deep).expect("ace is four draws away");
        assert_eq!(hint.lead_in(), 4);
    }

    #[test]
    fn search_leaves_table_untouched() {
        let table = Table::deal_with_seed(99);
        let before = Fingerprint::of(&table);
        let _ = find_hint(&table, None, &HintConfig::default());
        assert_eq!(Fingerprint::of(&table), before);
    }

    #[test]
    fn inverse_of_last_move_is_avoided() {
        // Last move put the five of hearts from tableau 1 onto tableau 2.
        let table = Table::from_piles(
            columns(vec![
                vec![up(Rank::Six, Suit::Clubs)],
                vec![up(Rank::Six, Suit::Spades), up(Rank::Five, Suit::Hearts)],
            ]),
            Default::default(),
            vec![down(Rank::Ace, Suit::Diamonds)],
            vec![],
            MAX_RECYCLES,
        );
        let last = "Move cards from tableau 1 to tableau 2";

        let unguarded = find_hint(&table, None, &HintConfig::default()).expect("hint");
        assert_eq!(unguarded.to_string(), "Move cards from tableau 2 to tableau 1");

        let guarded = find_hint(&table, Some(last), &HintConfig::default()).expect("hint");
        assert_eq!(
            guarded.to_string(),
            "Draw card from stock, then: Move waste to foundation DIAMONDS"
        );
    }

    #[test]
    fn only_the_inverse_left_means_no_hint() {
        let table = Table::from_piles(
            columns(vec![
                vec![up(Rank::Six, Suit::Clubs)],
                vec![up(Rank::Six, Suit::Spades), up(Rank::Five, Suit::Hearts)],
            ]),
            Default::default(),
            vec![],
            vec![],
            MAX_RECYCLES,
        );
        let last = "Move cards from tableau 1 to tableau 2";
        assert_eq!(find_hint(&table, Some(last), &HintConfig::default()), None);
    }

    #[test]
    fn direct_moves_are_all_legal() {
        for seed in 0..5 {
            let table = Table::deal_with_seed(seed);
            for mv in direct_moves(&table) {
                assert!(table.after(mv).is_ok(), "{mv:?} should apply");
            }
        }
    }
}
