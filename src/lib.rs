#[macro_use]
mod macros;

pub mod algo;
pub mod hand;
pub mod tile;

pub use algo::listen::{ListenState, check_listen, show_listen_tile};
pub use algo::pairs::find_pairs;
pub use algo::win::{WinError, is_win};
pub use hand::{CountError, Hand, TileCount, hand, tiles_to_string};
pub use tile::{ALL_TILES, InvalidTile, LISTEN_TILES, Tile};
