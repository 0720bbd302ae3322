//! Classical renju opening names
//!
//! The first three stones (Black, White, Black) are read relative to the
//! first one. White next to it orthogonally is a *direct* opening, diagonally
//! an *indirect* one. Both families are stored in one canonical orientation
//! (white straight above, or above and to the right); the position is
//! rotated and mirrored through the eight board symmetries until it matches.

use crate::board::{Move, Stone};

/// Canonical white offset for direct openings
const DIRECT_WHITE: (i32, i32) = (-1, 0);
/// Canonical white offset for indirect openings
const INDIRECT_WHITE: (i32, i32) = (-1, 1);

/// Third-stone offsets from the first stone, white at `DIRECT_WHITE`
const DIRECT_OPENINGS: [((i32, i32), &str); 13] = [
    ((-2, 0), "Kansei"),
    ((-2, 1), "Keigetsu"),
    ((-2, 2), "Sosei"),
    ((-1, 1), "Kagetsu"),
    ((-1, 2), "Zangetsu"),
    ((0, 1), "Ugetsu"),
    ((0, 2), "Kinsei"),
    ((1, 1), "Shogetsu"),
    ((1, 2), "Kyugetsu"),
    ((2, 1), "Shingetsu"),
    ((1, 0), "Zuisei"),
    ((2, 2), "Sangetsu"),
    ((2, 0), "Yusei"),
];

/// Third-stone offsets from the first stone, white at `INDIRECT_WHITE`
const INDIRECT_OPENINGS: [((i32, i32), &str); 13] = [
    ((-2, 2), "Chosei"),
    ((-1, 2), "Kyogetsu"),
    ((0, 2), "Kosei"),
    ((1, 2), "Suigetsu"),
    ((2, 2), "Ryusei"),
    ((0, 1), "Ungetsu"),
    ((1, 1), "Hogetsu"),
    ((2, 1), "Rangetsu"),
    ((1, 0), "Gingetsu"),
    ((2, 0), "Myojo"),
    ((1, -1), "Shagetsu"),
    ((2, -1), "Meigetsu"),
    ((2, -2), "Suisei"),
];

/// The eight symmetries of the square, applied to a `(row, col)` offset
const SYMMETRIES: [fn((i32, i32)) -> (i32, i32); 8] = [
    |(r, c)| (r, c),
    |(r, c)| (c, -r),
    |(r, c)| (-r, -c),
    |(r, c)| (-c, r),
    |(r, c)| (r, -c),
    |(r, c)| (-r, c),
    |(r, c)| (c, r),
    |(r, c)| (-c, -r),
];

/// Name the opening formed by the first three moves, if it is a classical one.
///
/// Returns `None` for fewer than three moves, for an order other than
/// Black, White, Black, or for a shape outside the catalog.
#[must_use]
pub fn detect_opening(moves: &[Move]) -> Option<&'static str> {
    let [first, second, third, ..] = moves else {
        return None;
    };
    if first.player != Stone::Black
        || second.player != Stone::White
        || third.player != Stone::Black
    {
        return None;
    }

    let offset = |m: &Move| {
        (
            i32::from(m.row) - i32::from(first.row),
            i32::from(m.col) - i32::from(first.col),
        )
    };
    let white = offset(second);
    let black = offset(third);

    SYMMETRIES.iter().find_map(|transform| {
        let catalog: &[((i32, i32), &'static str)] = match transform(white) {
            DIRECT_WHITE => &DIRECT_OPENINGS,
            INDIRECT_WHITE => &INDIRECT_OPENINGS,
            _ => return None,
        };
        let target = transform(black);
        catalog
            .iter()
            .find(|(cell, _)| *cell == target)
            .map(|&(_, name)| name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn opening(cells: [(u8, u8); 3]) -> Option<&'static str> {
        let players = [Stone::Black, Stone::White, Stone::Black];
        let moves: Vec<Move> = cells
            .iter()
            .zip(players)
            .map(|(&(r, c), p)| Move::new(Pos::new(r, c), p))
            .collect();
        detect_opening(&moves)
    }

    #[test]
    fn test_canonical_direct_openings() {
        assert_eq!(opening([(7, 7), (6, 7), (5, 7)]), Some("Kansei"));
        assert_eq!(opening([(7, 7), (6, 7), (6, 8)]), Some("Kagetsu"));
        assert_eq!(opening([(7, 7), (6, 7), (8, 8)]), Some("Shogetsu"));
        assert_eq!(opening([(7, 7), (6, 7), (9, 7)]), Some("Yusei"));
    }

    #[test]
    fn test_canonical_indirect_openings() {
        assert_eq!(opening([(7, 7), (6, 8), (5, 9)]), Some("Chosei"));
        assert_eq!(opening([(7, 7), (6, 8), (8, 8)]), Some("Hogetsu"));
        assert_eq!(opening([(7, 7), (6, 8), (9, 5)]), Some("Suisei"));
        assert_eq!(opening([(7, 7), (6, 8), (8, 7)]), Some("Gingetsu"));
    }

    #[test]
    fn test_rotations_and_mirrors() {
        // Kagetsu with white to the right, below and to the left
        assert_eq!(opening([(7, 7), (7, 8), (8, 8)]), Some("Kagetsu"));
        assert_eq!(opening([(7, 7), (8, 7), (8, 6)]), Some("Kagetsu"));
        assert_eq!(opening([(7, 7), (6, 7), (6, 6)]), Some("Kagetsu"));
        // Hogetsu with white below-left
        assert_eq!(opening([(7, 7), (8, 6), (6, 6)]), Some("Hogetsu"));
    }

    #[test]
    fn test_indirect_mirror_pairs_share_a_name() {
        // Reflection through white's diagonal maps (1, 2) onto (-2, -1)
        assert_eq!(opening([(7, 7), (6, 8), (8, 9)]), Some("Suigetsu"));
        assert_eq!(opening([(7, 7), (6, 8), (5, 6)]), Some("Suigetsu"));
    }

    #[test]
    fn test_every_catalog_name_is_reachable() {
        let mut names = Vec::new();
        for dr in -2..=2 {
            for dc in -2..=2_i32 {
                if (dr, dc) == (0, 0) {
                    continue;
                }
                for white in [(6_u8, 7_u8), (6, 8)] {
                    if (7 + dr, 7 + dc) == (i32::from(white.0), i32::from(white.1)) {
                        continue;
                    }
                    let third = ((7 + dr) as u8, (7 + dc) as u8);
                    if let Some(name) = opening([(7, 7), white, third]) {
                        names.push(name);
                    }
                }
            }
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 26);
    }

    #[test]
    fn test_not_an_opening() {
        // White not adjacent
        assert_eq!(opening([(7, 7), (5, 7), (6, 7)]), None);
        // Third stone outside the 5x5 area
        assert_eq!(opening([(7, 7), (6, 7), (7, 10)]), None);
        // Too few moves
        assert_eq!(detect_opening(&[]), None);
        assert_eq!(
            detect_opening(&[
                Move::new(Pos::new(7, 7), Stone::Black),
                Move::new(Pos::new(6, 7), Stone::White),
            ]),
            None
        );
    }

    #[test]
    fn test_wrong_player_order() {
        let moves = [
            Move::new(Pos::new(7, 7), Stone::White),
            Move::new(Pos::new(6, 7), Stone::Black),
            Move::new(Pos::new(6, 8), Stone::White),
        ];
        assert_eq!(detect_opening(&moves), None);
    }

    #[test]
    fn test_only_first_three_moves_matter() {
        let moves = [
            Move::new(Pos::new(7, 7), Stone::Black),
            Move::new(Pos::new(6, 7), Stone::White),
            Move::new(Pos::new(6, 8), Stone::Black),
            Move::new(Pos::new(0, 0), Stone::White),
        ];
        assert_eq!(detect_opening(&moves), Some("Kagetsu"));
    }
}
