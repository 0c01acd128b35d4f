use log::trace;

use crate::hand::Hand;
use crate::tile::Tile;

const SUIT_BASES: [u8; 3] = [0, 10, 20];

const fn is_uniform(r: [u8; 3]) -> bool {
    r[0] == r[1] && r[1] == r[2]
}

/// Which kinds of a full hand could serve as its eye (the lone pair of a
/// winning decomposition). An empty result means the hand cannot complete
/// as it stands.
///
/// The locator never decomposes the hand. Runs consume one tile from each
/// of the rank families {1,4,7}, {2,5,8} and {3,6,9} while triplets consume
/// three from a single family, so within a suit the family count sums mod 3
/// are invariant under melding. Only removing the eye shifts its family's
/// sum, by 2 mod 3. The eye's location therefore shows up as the one
/// family whose residue disagrees with its suit's other two.
#[must_use]
pub fn find_pairs(hand: &Hand) -> Vec<Tile> {
    // Winds and dragons cannot form runs, so outside the suits an eye can
    // only be a kind held exactly twice. Flowers land here too and their
    // single copy fails the triplet test below, so no flower hand wins.
    let mut honor_pair = None;
    let mut pair_count = 0;
    for c in hand.iter().filter(|c| !c.tile().is_suited()) {
        if c.count() == 2 {
            honor_pair = Some(c.tile());
            pair_count += 1;
        }
    }
    if pair_count > 1 {
        return vec![];
    }
    let leftover_triplets = hand
        .iter()
        .filter(|c| !c.tile().is_suited() && Some(c.tile()) != honor_pair)
        .all(|c| c.count() % 3 == 0);
    if !leftover_triplets {
        return vec![];
    }

    let mut residues = [[0_u8; 3]; 3];
    for c in hand.iter() {
        if let Some(suit) = c.tile().suit_index() {
            let family = ((c.tile().rank() - 1) % 3) as usize;
            residues[suit][family] = (residues[suit][family] + c.count()) % 3;
        }
    }

    if let Some(eye) = honor_pair {
        // Uniform residues imply each suit's total is divisible by 3.
        return if residues.into_iter().all(is_uniform) {
            trace!("honor eye {eye} for {hand}");
            vec![eye]
        } else {
            vec![]
        };
    }

    // The eye is suited, so exactly one suit may disagree with itself.
    let mut odd_suits = residues.into_iter().enumerate().filter(|&(_, r)| !is_uniform(r));
    let Some((suit, r)) = odd_suits.next() else {
        return vec![];
    };
    if odd_suits.next().is_some() {
        return vec![];
    }

    // The disagreeing family is the one the eye was taken from; all three
    // residues distinct means no single family explains the shift.
    let family = if r[0] == r[1] {
        2
    } else if r[1] == r[2] {
        0
    } else if r[0] == r[2] {
        1
    } else {
        return vec![];
    };

    let mut eyes = vec![];
    for shift in 0..3_u8 {
        let rank = family as u8 + 1 + shift * 3;
        let tile = Tile::new_unchecked(SUIT_BASES[suit] + rank);
        if hand.count(tile) >= 2 {
            eyes.push(tile);
        }
    }
    trace!("suited eye candidates {eyes:?} for {hand}");
    eyes
}
