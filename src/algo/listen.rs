use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algo::win::{WinError, is_win};
use crate::hand::Hand;
use crate::tile::{LISTEN_TILES, Tile};

/// One tenpai option: either the hand as given already wins, or discarding
/// `discard` leaves it waiting on every kind in `waits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenState {
    pub win: bool,
    pub discard: Option<Tile>,
    pub waits: Vec<Tile>,
}

impl ListenState {
    #[must_use]
    pub fn won() -> Self {
        Self { win: true, discard: None, waits: vec![] }
    }

    #[must_use]
    pub fn waiting(discard: Tile, mut waits: Vec<Tile>) -> Self {
        waits.sort_unstable();
        Self { win: false, discard: Some(discard), waits }
    }
}

/// The normalized `win-discard-waits` form; `0` stands for no discard and
/// waits are sorted, so two states render equal exactly when they describe
/// the same situation.
impl fmt::Display for ListenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.win, self.discard.map_or(0, Tile::as_u8))?;
        let mut waits: Vec<u8> = self.waits.iter().map(|t| t.as_u8()).collect();
        waits.sort_unstable();
        for id in waits {
            write!(f, "-{id}")?;
        }
        Ok(())
    }
}

impl PartialEq for ListenState {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ListenState {}

impl PartialOrd for ListenState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ListenState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl Hash for ListenState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// Which candidate kinds complete the hand when one copy is drawn.
///
/// `candidates` defaults to every non-flower kind; kinds the hand already
/// holds at their physical maximum are skipped. Output order follows the
/// candidate table.
pub fn show_listen_tile(
    hand: &Hand,
    candidates: Option<&[Tile]>,
) -> Result<Vec<Tile>, WinError> {
    let mut waits = vec![];
    for &tile in candidates.unwrap_or(&LISTEN_TILES) {
        if hand.is_max(tile) {
            continue;
        }
        let mut check = hand.clone();
        check.add(tile, 1)?;
        if is_win(&check)? {
            waits.push(tile);
        }
    }
    Ok(waits)
}

/// For a full hand, every discard that leaves the rest waiting, with the
/// waited-on kinds. A hand that already wins yields the single `won` state.
///
/// `grounded` holds the tiles of exposed melds. They never join the
/// structural check, which runs on the concealed tiles alone; they only
/// count toward exhaustion, removing from the wait universe every kind
/// whose grounded plus concealed copies already reach the physical maximum.
pub fn check_listen(grounded: &[Tile], hand: &[Tile]) -> Result<Vec<ListenState>, WinError> {
    let grounded = Hand::from_tiles(grounded)?;
    let hand = Hand::from_tiles(hand)?;

    if is_win(&hand)? {
        return Ok(vec![ListenState::won()]);
    }

    let candidates: Vec<Tile> = LISTEN_TILES
        .iter()
        .copied()
        .filter(|&tile| grounded.count(tile) + hand.count(tile) < tile.max_copies())
        .collect();

    let mut states = vec![];
    for c in hand.iter() {
        let mut rest = hand.clone();
        rest.remove(c.tile(), 1)?;
        let waits = show_listen_tile(&rest, Some(&candidates))?;
        if !waits.is_empty() {
            states.push(ListenState::waiting(c.tile(), waits));
        }
    }
    debug!("{} of {} discards keep {hand} tenpai", states.len(), hand.kinds());
    Ok(states)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hand::hand;

    fn waits_of(s: &str) -> Vec<Tile> {
        hand(s).unwrap().to_tiles()
    }

    #[test]
    fn sixteen_tile_waits() {
        let test_one = |s: &str, expect: &str| {
            let waits = show_listen_tile(&hand(s).unwrap(), None).unwrap();
            assert_eq!(waits, waits_of(expect), "waits mismatch for {s}");
        };
        test_one("1112233445678999s", "123456789s");
        test_one("1112334455678999s", "123456789s");
        test_one("1112344556678999s", "123456789s");
        test_one("1112345566778999s", "123456789s");
        test_one("1112345667788999s", "123456789s");
        test_one("1122233345678999s", "123456789s");
        test_one("1112345677788899s", "123456789s");
        test_one("2223456777888999s", "123456789s");
        test_one("2223334445678999s", "123456789s");
        test_one("1112345666777888s", "123456789s");
        test_one("1112223334567888s", "123456789s");
        test_one("1113334455667788s", "23456789s");
        test_one("2223334455667788s", "13456789s");
        test_one("2233445566777888s", "12345679s");
        test_one("2233445566777999s", "12345678s");
    }

    #[test]
    fn exhausted_kind_skipped() {
        // all four copies in hand, so the kind is not a wait candidate
        let h = hand("1111m").unwrap();
        assert!(!show_listen_tile(&h, Some(&[t!(1m)])).unwrap().contains(&t!(1m)));
    }

    #[test]
    fn already_won() {
        let states = check_listen(&[], &waits_of("11112233445678999s")).unwrap();
        assert_eq!(states, vec![ListenState::won()]);
    }

    #[test]
    fn nine_gates_with_floating_honor() {
        let states = check_listen(&[], &waits_of("1112233445678999s 7z")).unwrap();
        let expect = vec![
            ListenState::waiting(t!(2s), waits_of("7z")),
            ListenState::waiting(t!(5s), waits_of("7z")),
            ListenState::waiting(t!(8s), waits_of("7z")),
            ListenState::waiting(t!(C), waits_of("123456789s")),
        ];
        assert_eq!(states, expect);
    }

    #[test]
    fn grounded_feeds_exhaustion_only() {
        // a fourth 9s among the exposed melds removes 9s from the waits,
        // even though the concealed hand holds only three
        let states = check_listen(&waits_of("9s"), &waits_of("1112233445678999s 7z")).unwrap();
        let expect = vec![
            ListenState::waiting(t!(2s), waits_of("7z")),
            ListenState::waiting(t!(5s), waits_of("7z")),
            ListenState::waiting(t!(8s), waits_of("7z")),
            ListenState::waiting(t!(C), waits_of("12345678s")),
        ];
        assert_eq!(states, expect);
    }

    #[test]
    fn short_hand_with_melds_exposed() {
        let states = check_listen(&waits_of("122334m"), &waits_of("12233445566s")).unwrap();
        let expect = vec![
            ListenState::waiting(t!(1s), waits_of("2356s")),
            ListenState::waiting(t!(2s), waits_of("36s")),
            ListenState::waiting(t!(3s), waits_of("2s")),
            ListenState::waiting(t!(4s), waits_of("56s")),
            ListenState::waiting(t!(5s), waits_of("36s")),
            ListenState::waiting(t!(6s), waits_of("25s")),
        ];
        assert_eq!(states, expect);
    }

    #[test]
    fn no_tenpai() {
        let states = check_listen(&[], &waits_of("3m 11123445678999s 67z")).unwrap();
        assert!(states.is_empty());
    }

    #[test]
    fn multiple_suits() {
        let states = check_listen(&[], &waits_of("9m 3444456789p 888999s")).unwrap();
        let expect = vec![
            ListenState::waiting(t!(9m), waits_of("23569p")),
            ListenState::waiting(t!(3p), waits_of("9m")),
            ListenState::waiting(t!(6p), waits_of("9m")),
            ListenState::waiting(t!(9p), waits_of("9m")),
        ];
        assert_eq!(states, expect);
    }

    #[test]
    fn state_identity_ignores_wait_order() {
        let a = ListenState::waiting(t!(2s), vec![t!(5m), t!(1m)]);
        let b = ListenState::waiting(t!(2s), vec![t!(1m), t!(5m)]);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.to_string(), "false-22-1-5");
        assert_eq!(ListenState::won().to_string(), "true-0");
    }

    #[test]
    fn serde_round_trip() {
        let state = ListenState::waiting(t!(9m), waits_of("23569p"));
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"win":false,"discard":"9m","waits":["2p","3p","5p","6p","9p"]}"#);
        let back: ListenState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
