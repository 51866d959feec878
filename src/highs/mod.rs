//! Season-high extraction and announcement text. Everything here is pure
//! except `table::SeasonHighTable`, which wraps an external table fetch.

pub mod classify;
pub mod date;
pub mod detect;
pub mod group;
pub mod table;
pub mod tweet;

pub use detect::{achievements_for, Achievement};
pub use group::{group_by_player, PlayerHighs};
pub use table::{SeasonHighRow, SeasonHighTable, StatTable, TableError, TableSource};
pub use tweet::render;
