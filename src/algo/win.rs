use std::error::Error;
use std::fmt;

use log::trace;

use crate::algo::pairs::find_pairs;
use crate::hand::{CountError, Hand};
use crate::tile::Tile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinError {
    /// The pair locator named an eye the hand does not actually hold twice.
    /// A locator defect, never a property of the input.
    MissingPair { tile: Tile, hand: String },
    Count(CountError),
}

impl fmt::Display for WinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPair { tile, hand } => {
                write!(f, "located eye {tile} is not a pair in {hand}")
            }
            Self::Count(err) => err.fmt(f),
        }
    }
}

impl Error for WinError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Count(err) => Some(err),
            Self::MissingPair { .. } => None,
        }
    }
}

impl From<CountError> for WinError {
    fn from(err: CountError) -> Self {
        Self::Count(err)
    }
}

/// Whether the hand decomposes into melds plus exactly one pair.
///
/// Flowers and exposed melds are outside the multiset; the caller passes
/// only the concealed-equivalent tiles to test.
pub fn is_win(hand: &Hand) -> Result<bool, WinError> {
    let eyes = find_pairs(hand);
    if eyes.is_empty() {
        return Ok(false);
    }
    trace!("testing eyes {eyes:?} for {hand}");
    for eye in eyes {
        let mut rest = hand.clone();
        if rest.count(eye) < 2 {
            return Err(WinError::MissingPair { tile: eye, hand: hand.to_string() });
        }
        rest.remove(eye, 2)?;
        if strip_melds(rest)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Greedily strip triplets and runs until nothing is left.
///
/// The smallest remaining kind can only ever head a triplet or a run, so a
/// single deterministic pass decides the whole remainder. The ID gaps
/// between suits and the stride-2 honor IDs make a false run across a
/// boundary impossible.
fn strip_melds(mut rest: Hand) -> Result<bool, CountError> {
    while let Some(first) = rest.get(0) {
        let x = first.tile();
        if first.count() == 3 {
            rest.remove(x, 3)?;
            continue;
        }
        match (rest.get(1), rest.get(2)) {
            (Some(second), Some(third))
                if second.tile().as_u8() == x.as_u8() + 1
                    && third.tile().as_u8() == x.as_u8() + 2 =>
            {
                rest.remove(x, 1)?;
                rest.remove(second.tile(), 1)?;
                rest.remove(third.tile(), 1)?;
            }
            _ => return Ok(false),
        }
    }
    Ok(true)
}
