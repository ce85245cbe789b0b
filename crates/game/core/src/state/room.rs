//! Shelter rooms targeted by repair and reinforce effects.

use crate::ids::RoomId;

/// A room with structural condition and defense ratings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Room {
    pub id: RoomId,

    /// Structural condition, `0..=Room::MAX_RATING`.
    pub condition: u32,

    /// Defensive rating, `0..=Room::MAX_RATING`.
    #[serde(default)]
    pub defense: u32,
}

impl Room {
    pub const MAX_RATING: u32 = 100;

    pub fn new(id: impl Into<RoomId>, condition: u32) -> Self {
        Self {
            id: id.into(),
            condition: condition.min(Self::MAX_RATING),
            defense: 0,
        }
    }

    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense.min(Self::MAX_RATING);
        self
    }

    /// Raises condition, clamped at the maximum. Returns the amount applied.
    pub fn repair(&mut self, amount: u32) -> u32 {
        let next = (self.condition + amount).min(Self::MAX_RATING);
        let applied = next - self.condition;
        self.condition = next;
        applied
    }

    /// Raises defense, clamped at the maximum. Returns the amount applied.
    pub fn reinforce(&mut self, amount: u32) -> u32 {
        let next = (self.defense + amount).min(Self::MAX_RATING);
        let applied = next - self.defense;
        self.defense = next;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_clamp_at_maximum() {
        let mut room = Room::new("infirmary", 90).with_defense(98);
        assert_eq!(room.repair(25), 10);
        assert_eq!(room.condition, 100);
        assert_eq!(room.reinforce(5), 2);
        assert_eq!(room.defense, 100);
    }
}
