//! Turn assignment.

use crate::game::{Player, PlayerId};
use tracing::instrument;

/// Id of the player fixed as the joining participant.
pub const SECOND_PLAYER_ID: PlayerId = 2;

/// Builds the joining player: id 2 with the mark player1 did not pick.
#[instrument]
pub fn second_player(first: &Player) -> Player {
    Player::new(first.mark().opponent(), SECOND_PLAYER_ID)
}

/// Returns the id that moves after `current`.
#[instrument]
pub fn next_turn(current: PlayerId, player1: &Player, player2: &Player) -> PlayerId {
    if current == player1.id() {
        player2.id()
    } else {
        player1.id()
    }
}
