use serde::Serialize;

use super::detect::Achievement;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerHighs {
    pub player: String,
    pub achievements: Vec<Achievement>,
}

/// One group per player, ordered by first appearance.
pub fn group_by_player(achievements: Vec<Achievement>) -> Vec<PlayerHighs> {
    let mut groups: Vec<PlayerHighs> = Vec::new();
    for a in achievements {
        match groups.iter_mut().find(|g| g.player == a.player) {
            Some(g) => g.achievements.push(a),
            None => groups.push(PlayerHighs { player: a.player.clone(), achievements: vec![a] }),
        }
    }
    groups
}
