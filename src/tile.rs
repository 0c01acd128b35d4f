use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MAN_STRINGS: [&str; 9] = ["1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m"];
const PIN_STRINGS: [&str; 9] = ["1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p"];
const SOU_STRINGS: [&str; 9] = ["1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s"];
const FLOWER_STRINGS: [&str; 8] = ["1f", "2f", "3f", "4f", "5f", "6f", "7f", "8f"];

/// Every tile kind of the catalog, ascending by ID. This table is the single
/// source of "all tile kinds"; nothing iterates an enum at runtime.
pub const ALL_TILES: [Tile; 42] = [
    t!(1m), t!(2m), t!(3m), t!(4m), t!(5m), t!(6m), t!(7m), t!(8m), t!(9m),
    t!(1p), t!(2p), t!(3p), t!(4p), t!(5p), t!(6p), t!(7p), t!(8p), t!(9p),
    t!(1s), t!(2s), t!(3s), t!(4s), t!(5s), t!(6s), t!(7s), t!(8s), t!(9s),
    t!(E), t!(S), t!(W), t!(N),
    t!(C), t!(F), t!(P),
    t!(1f), t!(2f), t!(3f), t!(4f), t!(5f), t!(6f), t!(7f), t!(8f),
];

/// The kinds a hand can wait on: everything except flowers.
pub const LISTEN_TILES: [Tile; 34] = [
    t!(1m), t!(2m), t!(3m), t!(4m), t!(5m), t!(6m), t!(7m), t!(8m), t!(9m),
    t!(1p), t!(2p), t!(3p), t!(4p), t!(5p), t!(6p), t!(7p), t!(8p), t!(9p),
    t!(1s), t!(2s), t!(3s), t!(4s), t!(5s), t!(6s), t!(7s), t!(8s), t!(9s),
    t!(E), t!(S), t!(W), t!(N),
    t!(C), t!(F), t!(P),
];

static TILE_STRINGS_MAP: LazyLock<AHashMap<&'static str, Tile>> =
    LazyLock::new(|| ALL_TILES.iter().map(|&t| (t.as_str(), t)).collect());

/// A tile kind, identified by a `u8` from the fixed catalog.
///
/// IDs are partitioned with a gap between suits (man 1-9, pin 11-19, sou
/// 21-29) so that "same suit, next rank" is exactly `id + 1` and no run can
/// cross a suit boundary. Winds (31, 33, 35, 37) and dragons (41, 43, 45)
/// are spaced two apart and therefore never satisfy the run test either.
/// Flowers occupy 51-58 and are capped at a single copy.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

#[derive(Debug)]
pub enum InvalidTile {
    Number(u8),
    String(String),
}

impl Tile {
    /// The caller must pass an ID from the catalog; use [`Tile::try_from`]
    /// for untrusted input.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(id: u8) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_suited(self) -> bool {
        matches!(self.0, 1..=9 | 11..=19 | 21..=29)
    }

    #[inline]
    #[must_use]
    pub const fn is_wind(self) -> bool {
        matches!(self.0, 31 | 33 | 35 | 37)
    }

    #[inline]
    #[must_use]
    pub const fn is_dragon(self) -> bool {
        matches!(self.0, 41 | 43 | 45)
    }

    #[inline]
    #[must_use]
    pub const fn is_honor(self) -> bool {
        self.is_wind() || self.is_dragon()
    }

    #[inline]
    #[must_use]
    pub const fn is_flower(self) -> bool {
        matches!(self.0, 51..=58)
    }

    /// How many physical copies of this kind exist.
    #[inline]
    #[must_use]
    pub const fn max_copies(self) -> u8 {
        if self.is_flower() { 1 } else { 4 }
    }

    /// Rank within the suit, 1-9. Only meaningful for suited tiles.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 % 10
    }

    /// 0 for characters, 1 for dots, 2 for bamboos, `None` otherwise.
    #[inline]
    #[must_use]
    pub const fn suit_index(self) -> Option<usize> {
        match self.0 {
            1..=9 => Some(0),
            11..=19 => Some(1),
            21..=29 => Some(2),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.0 {
            1..=9 => MAN_STRINGS[(self.0 - 1) as usize],
            11..=19 => PIN_STRINGS[(self.0 - 11) as usize],
            21..=29 => SOU_STRINGS[(self.0 - 21) as usize],
            31 => "E",
            33 => "S",
            35 => "W",
            37 => "N",
            41 => "C",
            43 => "F",
            45 => "P",
            51..=58 => FLOWER_STRINGS[(self.0 - 51) as usize],
            _ => unreachable!(),
        }
    }
}

impl TryFrom<u8> for Tile {
    type Error = InvalidTile;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1..=9 | 11..=19 | 21..=29 | 31 | 33 | 35 | 37 | 41 | 43 | 45 | 51..=58 => Ok(Self(v)),
            _ => Err(InvalidTile::Number(v)),
        }
    }
}

impl FromStr for Tile {
    type Err = InvalidTile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TILE_STRINGS_MAP
            .get(s)
            .copied()
            .ok_or_else(|| InvalidTile::String(s.to_owned()))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tile = String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)?;
        Ok(tile)
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl fmt::Display for InvalidTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "not a valid tile id: {n}"),
            Self::String(s) => write!(f, "not a valid tile: {s:?}"),
        }
    }
}

impl Error for InvalidTile {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn convert() {
        "E".parse::<Tile>().unwrap();
        "5m".parse::<Tile>().unwrap();
        "8f".parse::<Tile>().unwrap();
        Tile::try_from(1_u8).unwrap();
        Tile::try_from(29_u8).unwrap();
        Tile::try_from(45_u8).unwrap();

        "".parse::<Tile>().unwrap_err();
        "0s".parse::<Tile>().unwrap_err();
        "9f".parse::<Tile>().unwrap_err();
        "!".parse::<Tile>().unwrap_err();
        Tile::try_from(0_u8).unwrap_err();
        Tile::try_from(10_u8).unwrap_err();
        Tile::try_from(30_u8).unwrap_err();
        Tile::try_from(32_u8).unwrap_err();
        Tile::try_from(u8::MAX).unwrap_err();
    }

    #[test]
    fn catalog() {
        assert_eq!(ALL_TILES.len(), 42);
        for w in ALL_TILES.windows(2) {
            assert!(w[0].as_u8() < w[1].as_u8());
        }
        for &tile in &ALL_TILES {
            assert_eq!(Tile::try_from(tile.as_u8()).unwrap(), tile);
            assert_eq!(tile.as_str().parse::<Tile>().unwrap(), tile);
        }
        assert!(LISTEN_TILES.iter().all(|t| !t.is_flower()));
        assert_eq!(LISTEN_TILES.len(), 34);
    }

    #[test]
    fn suit_gaps() {
        // Within a suit, adjacent ranks differ by exactly 1; across the
        // boundary the gap breaks the sequence.
        assert_eq!(t!(2m).as_u8(), t!(1m).as_u8() + 1);
        assert_eq!(t!(9p).as_u8(), t!(1p).as_u8() + 8);
        assert!(t!(1p).as_u8() > t!(9m).as_u8() + 1);
        assert!(t!(1s).as_u8() > t!(9p).as_u8() + 1);
        // Honors are spaced two apart, so no three of them are consecutive.
        assert_eq!(t!(S).as_u8(), t!(E).as_u8() + 2);
        assert_eq!(t!(F).as_u8(), t!(C).as_u8() + 2);
    }

    #[test]
    fn classify() {
        assert!(t!(5m).is_suited());
        assert_eq!(t!(5m).suit_index(), Some(0));
        assert_eq!(t!(7s).suit_index(), Some(2));
        assert_eq!(t!(7s).rank(), 7);
        assert!(t!(N).is_wind() && t!(N).is_honor());
        assert!(t!(C).is_dragon() && !t!(C).is_suited());
        assert!(t!(3f).is_flower());
        assert_eq!(t!(3f).max_copies(), 1);
        assert_eq!(t!(3s).max_copies(), 4);
    }

    #[test]
    fn serde_round_trip() {
        for &tile in &ALL_TILES {
            let json = serde_json::to_string(&tile).unwrap();
            let back: Tile = serde_json::from_str(&json).unwrap();
            assert_eq!(back, tile);
        }
        serde_json::from_str::<Tile>("\"0m\"").unwrap_err();
    }
}
