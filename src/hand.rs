use std::error::Error;
use std::fmt;

use crate::tile::Tile;
use anyhow::{Result, bail, ensure};

/// Violation of the physical tile-count bounds. Either variant is a caller
/// or internal bug, never an expected outcome of normal play; it is
/// propagated as-is instead of being clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountError {
    Capacity { tile: Tile, count: u8, add: u8, max: u8 },
    Underflow { tile: Tile, count: u8, take: u8 },
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity { tile, count, add, max } => {
                write!(f, "{tile}: {count} + {add} exceeds the limit of {max}")
            }
            Self::Underflow { tile, count, take } => {
                write!(f, "{tile}: cannot take {take} out of {count}")
            }
        }
    }
}

impl Error for CountError {}

/// Count of one tile kind within a hand, bounded by the physical maximum
/// (one copy for flowers, four for everything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCount {
    tile: Tile,
    count: u8,
}

impl TileCount {
    #[must_use]
    pub fn new(tile: Tile) -> Self {
        Self { tile, count: 1 }
    }

    #[inline]
    #[must_use]
    pub const fn tile(self) -> Tile {
        self.tile
    }

    #[inline]
    #[must_use]
    pub const fn count(self) -> u8 {
        self.count
    }

    #[inline]
    #[must_use]
    pub const fn max(self) -> u8 {
        self.tile.max_copies()
    }

    /// Whether this kind is exhausted; an exhausted kind can neither be
    /// drawn nor waited on.
    #[inline]
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.count == self.max()
    }

    pub fn add(&mut self, n: u8) -> Result<u8, CountError> {
        let new = self.count.checked_add(n).filter(|&c| c <= self.max());
        match new {
            Some(c) => {
                self.count = c;
                Ok(c)
            }
            None => Err(CountError::Capacity {
                tile: self.tile,
                count: self.count,
                add: n,
                max: self.max(),
            }),
        }
    }

    pub fn remove(&mut self, n: u8) -> Result<u8, CountError> {
        if n > self.count {
            return Err(CountError::Underflow {
                tile: self.tile,
                count: self.count,
                take: n,
            });
        }
        self.count -= n;
        Ok(self.count)
    }
}

/// A multiset of tiles: one `TileCount` per held kind, sorted ascending by
/// tile ID, entries dropped when their count reaches zero.
///
/// Cloning yields a fully independent copy; the decomposition algorithms
/// rely on this by cloning before every destructive attempt so that failed
/// branches never perturb their siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    counts: Vec<TileCount>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a raw tile sequence into a multiset. The input is sorted first
    /// so the result is independent of occurrence order.
    pub fn from_tiles(tiles: &[Tile]) -> Result<Self, CountError> {
        let mut sorted = tiles.to_vec();
        sorted.sort_unstable();
        let mut ret = Self::new();
        for &tile in &sorted {
            ret.add(tile, 1)?;
        }
        Ok(ret)
    }

    pub fn add(&mut self, tile: Tile, n: u8) -> Result<(), CountError> {
        match self.counts.binary_search_by_key(&tile, |c| c.tile) {
            Ok(i) => {
                self.counts[i].add(n)?;
            }
            Err(i) => {
                if n > tile.max_copies() {
                    return Err(CountError::Capacity {
                        tile,
                        count: 0,
                        add: n,
                        max: tile.max_copies(),
                    });
                }
                if n > 0 {
                    self.counts.insert(i, TileCount { tile, count: n });
                }
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, tile: Tile, n: u8) -> Result<(), CountError> {
        match self.counts.binary_search_by_key(&tile, |c| c.tile) {
            Ok(i) => {
                if self.counts[i].remove(n)? == 0 {
                    self.counts.remove(i);
                }
                Ok(())
            }
            Err(_) if n == 0 => Ok(()),
            Err(_) => Err(CountError::Underflow { tile, count: 0, take: n }),
        }
    }

    #[must_use]
    pub fn count(&self, tile: Tile) -> u8 {
        self.counts
            .binary_search_by_key(&tile, |c| c.tile)
            .map_or(0, |i| self.counts[i].count)
    }

    #[must_use]
    pub fn is_max(&self, tile: Tile) -> bool {
        self.count(tile) == tile.max_copies()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.counts.iter().map(|c| c.count as usize).sum()
    }

    /// Number of distinct kinds held.
    #[must_use]
    pub fn kinds(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entry at the given position in ascending ID order.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<TileCount> {
        self.counts.get(idx).copied()
    }

    /// Held kinds in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = TileCount> + '_ {
        self.counts.iter().copied()
    }

    /// Expand back into one tile per physical copy, ascending.
    #[must_use]
    pub fn to_tiles(&self) -> Vec<Tile> {
        self.counts
            .iter()
            .flat_map(|c| std::iter::repeat_n(c.tile, c.count as usize))
            .collect()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tiles_to_string(self))
    }
}

fn tile_from_group(rank: u8, group: u8) -> Result<Tile> {
    let id = match (group, rank) {
        (b'm', 1..=9) => rank,
        (b'p', 1..=9) => 10 + rank,
        (b's', 1..=9) => 20 + rank,
        // 1z-4z are the winds E S W N, 5z-7z the dragons P F C.
        (b'z', 1..=7) => [31, 33, 35, 37, 45, 43, 41][(rank - 1) as usize],
        (b'f', 1..=8) => 50 + rank,
        _ => bail!("rank {rank} out of range for group '{}'", group as char),
    };
    Ok(Tile::new_unchecked(id))
}

/// Parse hand notation like `"1112233445678999s 7z"` into a multiset.
///
/// Groups are digit runs followed by `m`, `p`, `s`, `z` or `f`; whitespace
/// between groups is ignored.
pub fn hand(s: &str) -> Result<Hand> {
    ensure!(s.is_ascii(), "hand {s:?} contains non-ascii content");
    let mut ret = Hand::new();
    let mut ranks = vec![];
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => ranks.push(b - b'0'),
            b'm' | b'p' | b's' | b'z' | b'f' => {
                ensure!(!ranks.is_empty(), "group '{}' with no preceding ranks", b as char);
                for rank in ranks.drain(..) {
                    ret.add(tile_from_group(rank, b)?, 1)?;
                }
            }
            b if b.is_ascii_whitespace() => (),
            _ => bail!("unexpected byte '{}' in hand {s:?}", b as char),
        }
    }
    ensure!(ranks.is_empty(), "trailing ranks with no group in hand {s:?}");
    Ok(ret)
}

/// Inverse of [`hand`].
#[must_use]
pub fn tiles_to_string(hand: &Hand) -> String {
    // (group letter, digits), in the order the parser's notation writes them
    let mut groups: [(u8, Vec<u8>); 5] = [
        (b'm', vec![]),
        (b'p', vec![]),
        (b's', vec![]),
        (b'z', vec![]),
        (b'f', vec![]),
    ];
    for c in hand.iter() {
        let tile = c.tile();
        let (slot, digit) = match tile.as_u8() {
            id @ 1..=9 => (0, id),
            id @ 11..=19 => (1, id - 10),
            id @ 21..=29 => (2, id - 20),
            31 => (3, 1),
            33 => (3, 2),
            35 => (3, 3),
            37 => (3, 4),
            45 => (3, 5),
            43 => (3, 6),
            41 => (3, 7),
            id => (4, id - 50),
        };
        groups[slot].1.extend(std::iter::repeat_n(digit, c.count() as usize));
    }
    groups
        .iter_mut()
        .filter(|(_, digits)| !digits.is_empty())
        .map(|(letter, digits)| {
            digits.sort_unstable();
            let mut part: String = digits.iter().map(|d| (b'0' + d) as char).collect();
            part.push(*letter as char);
            part
        })
        .collect::<Vec<_>>()
        .join(" ")
}
