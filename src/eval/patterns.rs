//! Line shapes and their scoring weights
//!
//! Classification (`Shape`) is kept apart from valuation (`ShapeWeights`) so
//! difficulty tuning can change weights without touching the classifier.

use serde::{Deserialize, Serialize};

/// Shape of a contiguous run through a cell along one axis.
///
/// Variants are declared weakest first, so `Ord` ranks threats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// One stone, or a run blocked at both ends
    Dead,
    /// XOO_ : two with one open end
    Two,
    /// _OO_
    OpenTwo,
    /// XOOO_ : one open end
    Three,
    /// _OOO_ : becomes an open four if not answered
    OpenThree,
    /// XOOOO_ : one way to complete five, forces a response
    Four,
    /// _OOOO_ : unstoppable
    OpenFour,
    /// Five or more
    Five,
}

impl Shape {
    /// Classify a run by stone count and number of open ends (0..=2).
    #[must_use]
    pub fn classify(count: u32, open_ends: u32) -> Shape {
        match (count, open_ends) {
            (5.., _) => Shape::Five,
            (_, 0) => Shape::Dead,
            (4, 2) => Shape::OpenFour,
            (4, _) => Shape::Four,
            (3, 2) => Shape::OpenThree,
            (3, _) => Shape::Three,
            (2, 2) => Shape::OpenTwo,
            (2, _) => Shape::Two,
            _ => Shape::Dead,
        }
    }
}

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: i32 = 100_000;
    /// Open four: _OOOO_
    pub const OPEN_FOUR: i32 = 10_000;
    /// Closed four: XOOOO_ or _OOOOX
    pub const FOUR: i32 = 1_000;
    /// Open three: _OOO_
    pub const OPEN_THREE: i32 = 1_000;
    /// Closed three: XOOO_ or _OOOX
    pub const THREE: i32 = 100;
    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 100;
    /// Closed two: XOO_ or _OOX
    pub const TWO: i32 = 10;
    pub const DEAD: i32 = 0;
}

/// Numeric value of each shape. Loaded from configuration; defaults come
/// from [`PatternScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeWeights {
    pub five: i32,
    pub open_four: i32,
    pub four: i32,
    pub open_three: i32,
    pub three: i32,
    pub open_two: i32,
    pub two: i32,
    pub dead: i32,
}

impl Default for ShapeWeights {
    fn default() -> Self {
        Self {
            five: PatternScore::FIVE,
            open_four: PatternScore::OPEN_FOUR,
            four: PatternScore::FOUR,
            open_three: PatternScore::OPEN_THREE,
            three: PatternScore::THREE,
            open_two: PatternScore::OPEN_TWO,
            two: PatternScore::TWO,
            dead: PatternScore::DEAD,
        }
    }
}

impl ShapeWeights {
    #[inline]
    #[must_use]
    pub fn weight(&self, shape: Shape) -> i32 {
        match shape {
            Shape::Five => self.five,
            Shape::OpenFour => self.open_four,
            Shape::Four => self.four,
            Shape::OpenThree => self.open_three,
            Shape::Three => self.three,
            Shape::OpenTwo => self.open_two,
            Shape::Two => self.two,
            Shape::Dead => self.dead,
        }
    }

    /// Weights listed strongest shape first
    pub(crate) fn descending(&self) -> [(&'static str, i32); 8] {
        [
            ("five", self.five),
            ("open_four", self.open_four),
            ("four", self.four),
            ("open_three", self.open_three),
            ("three", self.three),
            ("open_two", self.open_two),
            ("two", self.two),
            ("dead", self.dead),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::FOUR);
        assert!(PatternScore::FOUR >= PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::THREE);
        assert!(PatternScore::THREE >= PatternScore::OPEN_TWO);
        assert!(PatternScore::OPEN_TWO > PatternScore::TWO);
        assert!(PatternScore::TWO > PatternScore::DEAD);
    }

    #[test]
    fn test_shape_ordering() {
        assert!(Shape::Five > Shape::OpenFour);
        assert!(Shape::OpenFour > Shape::Four);
        assert!(Shape::Four > Shape::OpenThree);
        assert!(Shape::OpenThree > Shape::Three);
        assert!(Shape::Three > Shape::OpenTwo);
        assert!(Shape::OpenTwo > Shape::Two);
        assert!(Shape::Two > Shape::Dead);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Shape::classify(5, 0), Shape::Five);
        assert_eq!(Shape::classify(6, 1), Shape::Five);
        assert_eq!(Shape::classify(4, 2), Shape::OpenFour);
        assert_eq!(Shape::classify(4, 1), Shape::Four);
        assert_eq!(Shape::classify(4, 0), Shape::Dead);
        assert_eq!(Shape::classify(3, 2), Shape::OpenThree);
        assert_eq!(Shape::classify(3, 1), Shape::Three);
        assert_eq!(Shape::classify(2, 2), Shape::OpenTwo);
        assert_eq!(Shape::classify(2, 1), Shape::Two);
        assert_eq!(Shape::classify(1, 2), Shape::Dead);
    }

    #[test]
    fn test_weights_follow_shapes() {
        let weights = ShapeWeights::default();
        assert_eq!(weights.weight(Shape::Five), PatternScore::FIVE);
        assert_eq!(weights.weight(Shape::Dead), 0);
        let values: Vec<i32> = weights.descending().iter().map(|&(_, w)| w).collect();
        assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
