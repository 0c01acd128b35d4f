/// Tile ID literal.
///
/// Suited tiles are `1m`..`9m`, `1p`..`9p` and `1s`..`9s`; winds are `E`,
/// `S`, `W` and `N`; dragons are `C` (red), `F` (green) and `P` (white);
/// flowers are `1f`..`8f`.
#[macro_export]
macro_rules! tid {
    (1m) => { 1_u8 };
    (2m) => { 2_u8 };
    (3m) => { 3_u8 };
    (4m) => { 4_u8 };
    (5m) => { 5_u8 };
    (6m) => { 6_u8 };
    (7m) => { 7_u8 };
    (8m) => { 8_u8 };
    (9m) => { 9_u8 };

    (1p) => { 11_u8 };
    (2p) => { 12_u8 };
    (3p) => { 13_u8 };
    (4p) => { 14_u8 };
    (5p) => { 15_u8 };
    (6p) => { 16_u8 };
    (7p) => { 17_u8 };
    (8p) => { 18_u8 };
    (9p) => { 19_u8 };

    (1s) => { 21_u8 };
    (2s) => { 22_u8 };
    (3s) => { 23_u8 };
    (4s) => { 24_u8 };
    (5s) => { 25_u8 };
    (6s) => { 26_u8 };
    (7s) => { 27_u8 };
    (8s) => { 28_u8 };
    (9s) => { 29_u8 };

    (E) => { 31_u8 };
    (S) => { 33_u8 };
    (W) => { 35_u8 };
    (N) => { 37_u8 };

    (C) => { 41_u8 };
    (F) => { 43_u8 };
    (P) => { 45_u8 };

    (1f) => { 51_u8 };
    (2f) => { 52_u8 };
    (3f) => { 53_u8 };
    (4f) => { 54_u8 };
    (5f) => { 55_u8 };
    (6f) => { 56_u8 };
    (7f) => { 57_u8 };
    (8f) => { 58_u8 };
}

/// [`Tile`](crate::tile::Tile) literal, usable in const context.
#[macro_export]
macro_rules! t {
    ($t:tt) => {
        $crate::tile::Tile::new_unchecked($crate::tid!($t))
    };
}
