use crate::game::{GameState, Outcome};
use crate::level::Pickup;

pub const PELLET_SCORE: u32 = 1;
pub const POWER_SCORE: u32 = 10;

/// Eats whatever lies under the player. Both item kinds count toward the
/// win; the power item is only worth more.
pub fn collect_item(state: &mut GameState) -> Pickup {
    let pickup = state.grid.consume_item(state.player.pos);
    let gained = match pickup {
        Pickup::Pellet => PELLET_SCORE,
        Pickup::Power => POWER_SCORE,
        Pickup::None => return pickup,
    };
    state.player.score += gained;
    state.player.items_left = state.player.items_left.saturating_sub(1);
    pickup
}

/// Charges a life for every ghost sharing the player's cell and returns how
/// many there were.
pub fn resolve_contacts(state: &mut GameState) -> usize {
    let hits = state
        .ghosts
        .iter()
        .filter(|ghost| **ghost == state.player.pos)
        .count();
    for _ in 0..hits {
        if state.player.lives > 0 {
            state.player.lives -= 1;
        }
    }
    hits
}

/// A finished game, if the counters say so. Losing takes precedence.
pub fn outcome(state: &GameState) -> Option<Outcome> {
    if state.player.lives == 0 {
        Some(Outcome::Lost)
    } else if state.player.items_left == 0 {
        Some(Outcome::Won)
    } else {
        None
    }
}
