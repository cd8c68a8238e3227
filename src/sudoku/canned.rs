//! Puzzles for testing and amusement, each as nine rows

#![allow(missing_docs)]

/// Built around a hidden unique rectangle
pub const HIDDEN_UNIQUE_RECT: [&str; 9] = [
    "9....2...",
    ".5.869714",
    "6...3...5",
    ".24......",
    ".96.8.1..",
    "...7.6.4.",
    "....183..",
    "...3....2",
    "..9....71",
];

/// Gets to a unique rectangle after a few eliminations
pub const UNIQUE_RECT: [&str; 9] = [
    "..6324815",
    "85.691.7.",
    "..1785...",
    "..4.3768.",
    "38..62147",
    ".6741835.",
    "...173..8",
    "...846.21",
    "..82597..",
];

/// Swordfish with a fin
pub const SWORDFISH_WITH_FIN: [&str; 9] = [
    "..83.9...",
    "39..57..1",
    "..71843.9",
    "23..18.76",
    "875436192",
    ".6..7..38",
    "9....3...",
    "7.684.9.3",
    "..379.6..",
];

/// Swordfish on the minimum of six cells
pub const SWORDFISH: [&str; 9] = [
    "926...1..",
    "537.1.42.",
    "841...6.3",
    "259734816",
    "714.6..3.",
    "36812..4.",
    "1.2....84",
    "485.7136.",
    "6.3.....1",
];

/// A series of Y-Wings
pub const Y_WINGS: [&str; 9] = [
    "9..24....",
    ".5.69.231",
    ".2..5..9.",
    ".9.7..32.",
    "..29356.7",
    ".7...29..",
    ".69.2..73",
    "51..79.62",
    "2.7.86..9",
];

/// Vidar's monster #3, out of reach for logic
pub const VIDAR_MONSTER: [&str; 9] = [
    "5..8..4..",
    ".8..9..5.",
    "..7..6..2",
    "..4..3..6",
    ".3.......",
    "9..1.....",
    "...7..8..",
    ".4..5..1.",
    "..2..1..4",
];

/// A generalized Y-Wing
pub const GEN_Y_WING: [&str; 9] = [
    "2...41..6",
    "4..6.2.1.",
    ".16.9...4",
    "3..12964.",
    "142.6.59.",
    ".695.4..1",
    "584216379",
    "92.4.8165",
    "6.19..482",
];

/// Just an ordinary puzzle
pub const TEST: [&str; 9] = [
    ".72...68.",
    "...7.....",
    "5...16...",
    "....281..",
    "2..371..6",
    "..456....",
    "...13...4",
    ".....7...",
    ".15...89.",
];

/// X-Wings
pub const X_WINGS: [&str; 9] = [
    ".......94",
    "76.91..5.",
    ".9...2.81",
    ".7..5..1.",
    "...7.9...",
    ".8..31.67",
    "24.1...7.",
    ".1..9..45",
    "9.....1..",
];

/// An XYZ-Wing
pub const XYZ_WING: [&str; 9] = [
    ".9578264.",
    "..2631589",
    "6.85497.2",
    "2.9...36.",
    "..62..9..",
    ".5.96.128",
    "9.3.264..",
    ".2..9.8.6",
    ".6...729.",
];

/// Names accepted by [`by_name`]
pub const NAMES: &[&str] = &[
    "hidden_unique_rect",
    "unique_rect",
    "swordfish_with_fin",
    "swordfish",
    "y_wings",
    "vidar_monster",
    "gen_y_wing",
    "test",
    "x_wings",
    "xyz_wing",
];

/// Looks up a canned puzzle
pub fn by_name(name: &str) -> Option<[&'static str; 9]> {
    let rows = match name {
        "hidden_unique_rect" => HIDDEN_UNIQUE_RECT,
        "unique_rect" => UNIQUE_RECT,
        "swordfish_with_fin" => SWORDFISH_WITH_FIN,
        "swordfish" => SWORDFISH,
        "y_wings" => Y_WINGS,
        "vidar_monster" => VIDAR_MONSTER,
        "gen_y_wing" => GEN_Y_WING,
        "test" => TEST,
        "x_wings" => X_WINGS,
        "xyz_wing" => XYZ_WING,
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in NAMES {
            let rows = by_name(name).unwrap();
            assert!(rows.iter().all(|row| row.len() == 9), "{}", name);
        }
        assert_eq!(by_name("nope"), None);
    }
}
