//! Generated demo cards.

use super::card::DemoCard;

const PLACES: &[(&str, &str)] = &[
    ("Lisbon", "Yellow trams climbing tiled hills."),
    ("Kyoto", "Moss gardens and wooden temples."),
    ("Valparaiso", "Funiculars over painted stairways."),
    ("Tromso", "Northern lights above the fjord."),
    ("Marrakesh", "Spice stalls in the old medina."),
    ("Hobart", "Ferries, oysters, and a mountain at the door."),
    ("Tbilisi", "Sulphur baths under carved balconies."),
    ("Oaxaca", "Mezcal, mole, and markets at dawn."),
];

/// Endless source of numbered demo cards.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    next_id: u64,
}

impl CardGenerator {
    /// Start numbering at `first_id`.
    pub fn starting_at(first_id: u64) -> Self {
        Self { next_id: first_id }
    }

    /// Produce the next card.
    pub fn next_card(&mut self) -> DemoCard {
        let id = self.next_id;
        self.next_id += 1;
        let (place, blurb) = PLACES[(id as usize) % PLACES.len()];
        DemoCard::new(id, format!("#{} {}", id, place), blurb)
    }

    /// Produce `count` cards.
    pub fn next_batch(&mut self, count: usize) -> Vec<DemoCard> {
        (0..count).map(|_| self.next_card()).collect()
    }
}

impl Default for CardGenerator {
    fn default() -> Self {
        Self::starting_at(0)
    }
}
