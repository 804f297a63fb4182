use matchtwo_core::{CardPhase, CardType, Coord2, Selection, Session};
use std::collections::BTreeMap;

/// Automatic player with perfect memory: it remembers every face it has seen
/// and plays a known pair whenever it can.
#[derive(Clone, Debug, Default)]
pub struct MemoryPlayer {
    seen: BTreeMap<Coord2, CardType>,
}

impl MemoryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remembered(&self) -> usize {
        self.seen.len()
    }

    /// Records every face currently showing and forgets cleared cards.
    pub fn observe(&mut self, session: &Session) {
        for view in session.card_views().filter(|view| view.shows_face) {
            self.seen.insert(view.coords, view.kind);
        }
        self.seen
            .retain(|&coords, _| !session.board().card_at(coords).is_locked());
    }

    /// Next card to pick, `None` while waiting for the table to settle.
    pub fn next_pick(&self, session: &Session) -> Option<Coord2> {
        let board = session.board();
        match session.selection() {
            Selection::Judging { .. } => None,
            Selection::OneChosen { first } => {
                if board.card_at(first).phase() != CardPhase::FaceUp {
                    return None;
                }
                let kind = board.card_at(first).kind();
                self.known_partner(session, first, kind)
                    .or_else(|| self.unseen(session))
                    .or_else(|| self.any_selectable(session))
            }
            Selection::Idle => self
                .known_pair(session)
                .or_else(|| self.unseen(session))
                .or_else(|| self.any_selectable(session)),
        }
    }

    fn known_partner(&self, session: &Session, coords: Coord2, kind: CardType) -> Option<Coord2> {
        self.seen
            .iter()
            .find(|&(&other, &other_kind)| {
                other != coords
                    && other_kind == kind
                    && session.board().card_at(other).is_selectable()
            })
            .map(|(&other, _)| other)
    }

    fn known_pair(&self, session: &Session) -> Option<Coord2> {
        self.seen
            .iter()
            .filter(|&(&coords, _)| session.board().card_at(coords).is_selectable())
            .find(|&(&coords, &kind)| self.known_partner(session, coords, kind).is_some())
            .map(|(&coords, _)| coords)
    }

    fn unseen(&self, session: &Session) -> Option<Coord2> {
        session
            .board()
            .iter()
            .find(|(coords, card)| card.is_selectable() && !self.seen.contains_key(coords))
            .map(|(coords, _)| coords)
    }

    fn any_selectable(&self, session: &Session) -> Option<Coord2> {
        session
            .board()
            .iter()
            .find(|(_, card)| card.is_selectable())
            .map(|(coords, _)| coords)
    }
}
