//! Built-in level plans
//!
//! Legend: `.` empty, `#` wall, `+` lava, `@` player, `o` coin,
//! `=` horizontal lava, `|` vertical lava, `v` dripping lava.

use crate::sim::{Legend, Level, LevelError};

pub const LEVEL_PLANS: &[&str] = &[
    "
..........................
..#....................#..
..#....................#..
..#..@.....o.....o...o.#..
..######################..
",
    "
..............................
..#........................#..
..#.......o.........o......#..
..#..........|.............#..
..#..@.....................#..
..#######.......############..
........#+++++++#.............
........#########.............
",
    "
................................
..#..........v.........v.....#..
..#..........................#..
..#.....o.........o......o...#..
..#..........=...............#..
..#..@.......................#..
..######++++######++++########..
",
];

/// Parse every built-in plan with the default legend
pub fn builtin(seed: u64) -> Result<Vec<Level>, LevelError> {
    let legend = Legend::default();
    LEVEL_PLANS
        .iter()
        .map(|plan| Level::parse(plan, &legend, seed))
        .collect()
}
