use std::fmt::Write;

use klondike_core::game::view::{CardView, DisplayState};

const FACE_DOWN: &str = "##";
const EMPTY: &str = "--";

fn label(card: &CardView) -> &str {
    if card.face_up { &card.label } else { FACE_DOWN }
}

/// Plain-text board: status line, foundations, then one line per tableau
/// listed bottom card first.
pub fn render_board(state: &DisplayState) -> String {
    let mut out = String::new();

    let waste_top = state.waste.last().map_or(EMPTY, label);
    let _ = writeln!(
        out,
        "Stock: {:<2}  Waste: {waste_top} ({})  Recycles left: {}  Seed: {}",
        state.stock_count,
        state.waste.len(),
        state.recycles_remaining,
        state.seed
    );

    let foundations: Vec<String> = state
        .foundations
        .iter()
        .map(|foundation| {
            let top = foundation.cards.last().map_or(EMPTY, label);
            format!("{}:{top}", foundation.suit)
        })
        .collect();
    let _ = writeln!(out, "Foundations: {}", foundations.join("  "));

    for (idx, tableau) in state.tableaus.iter().enumerate() {
        let cards: Vec<&str> = tableau.iter().map(label).collect();
        let body = if cards.is_empty() {
            EMPTY.to_string()
        } else {
            cards.join(" ")
        };
        let _ = writeln!(out, "t{}: {body}", idx + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_core::model::card::Card;
    use klondike_core::model::rank::Rank;
    use klondike_core::model::suit::Suit;
    use klondike_core::model::table::Table;

    #[test]
    fn fresh_deal_hides_buried_cards() {
        let state = DisplayState::from_table(&Table::deal_with_seed(5), 5, 0);
        let board = render_board(&state);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("Stock: 24"));
        assert!(lines[0].contains("Waste: -- (0)"));
        assert!(lines[0].contains("Recycles left: 3"));
        assert!(lines[0].ends_with("Seed: 5"));
        assert_eq!(lines[1], "Foundations: H:--  D:--  C:--  S:--");
        for (idx, line) in lines[2..].iter().enumerate() {
            let hidden = line.matches(FACE_DOWN).count();
            assert_eq!(hidden, idx, "{line}");
            assert!(line.starts_with(&format!("t{}: ", idx + 1)));
        }
    }

    #[test]
    fn shows_foundation_and_waste_tops() {
        let mut foundations: [Vec<Card>; 4] = Default::default();
        foundations[1] = vec![Card::up(Rank::Ace, Suit::Diamonds), Card::up(Rank::Two, Suit::Diamonds)];
        let table = Table::from_piles(
            Default::default(),
            foundations,
            vec![],
            vec![Card::up(Rank::Nine, Suit::Clubs), Card::up(Rank::Ten, Suit::Spades)],
            1,
        );
        let board = render_board(&DisplayState::from_table(&table, 0, 0));
        assert!(board.contains("Waste: 10S (2)"));
        assert!(board.contains("Recycles left: 2"));
        assert!(board.contains("D:2D"));
        assert!(board.contains("t7: --"));
    }
}
