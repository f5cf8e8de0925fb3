// Copyright  (C) 2022, Hove and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Hove (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use crate::graph::BitfieldIdx;
use crate::time::{MAX_DAYS, SCHEDULE_OFFSET_DAYS};
use serde::{Deserialize, Serialize};

/// Width of a traffic-day bitmap : the padded day horizon.
pub const BIT_COUNT: usize = 512;

const BLOCK_COUNT: usize = BIT_COUNT / 64;

static_assertions::const_assert!(
    MAX_DAYS as usize + SCHEDULE_OFFSET_DAYS as usize == BIT_COUNT
);

/// A fixed-width bitmap over the padded day horizon.
/// Bit `d` is set iff the service operates on day `d`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bitfield {
    blocks: [u64; BLOCK_COUNT],
}

impl Bitfield {
    pub fn empty() -> Self {
        Self {
            blocks: [0; BLOCK_COUNT],
        }
    }

    /// Decode a feed bitmap : character `d` of `serialized` is `'1'` iff the
    /// service operates on day `d`.
    pub fn from_serialized(serialized: &str) -> Self {
        let mut result = Self::empty();
        for (day, byte) in serialized.bytes().enumerate().take(BIT_COUNT) {
            if byte == b'1' {
                result.set(day);
            }
        }
        result
    }

    pub fn set(&mut self, day: usize) {
        debug_assert!(day < BIT_COUNT);
        self.blocks[day / 64] |= 1u64 << (day % 64);
    }

    pub fn test(&self, day: usize) -> bool {
        debug_assert!(day < BIT_COUNT);
        self.blocks[day / 64] & (1u64 << (day % 64)) != 0
    }

    pub fn any(&self) -> bool {
        self.blocks.iter().any(|block| *block != 0)
    }

    pub fn count(&self) -> u32 {
        self.blocks.iter().map(|block| block.count_ones()).sum()
    }

    /// Every set bit `d` becomes `d + shift`; bits shifted beyond the
    /// horizon are lost.
    pub fn shifted_left(&self, shift: usize) -> Self {
        if shift >= BIT_COUNT {
            return Self::empty();
        }
        let (block_shift, bit_shift) = (shift / 64, shift % 64);
        let mut blocks = [0u64; BLOCK_COUNT];
        for i in (block_shift..BLOCK_COUNT).rev() {
            let mut block = self.blocks[i - block_shift] << bit_shift;
            if bit_shift > 0 && i > block_shift {
                block |= self.blocks[i - block_shift - 1] >> (64 - bit_shift);
            }
            blocks[i] = block;
        }
        Self { blocks }
    }

    /// Every set bit `d` becomes `d - shift`; bits shifted below zero are
    /// lost.
    pub fn shifted_right(&self, shift: usize) -> Self {
        if shift >= BIT_COUNT {
            return Self::empty();
        }
        let (block_shift, bit_shift) = (shift / 64, shift % 64);
        let mut blocks = [0u64; BLOCK_COUNT];
        for i in 0..BLOCK_COUNT - block_shift {
            let mut block = self.blocks[i + block_shift] >> bit_shift;
            if bit_shift > 0 && i + block_shift + 1 < BLOCK_COUNT {
                block |= self.blocks[i + block_shift + 1] << (64 - bit_shift);
            }
            blocks[i] = block;
        }
        Self { blocks }
    }
}

impl std::fmt::Debug for Bitfield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bitfield {{ days: [")?;
        let mut first = true;
        for day in 0..BIT_COUNT {
            if self.test(day) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}", day)?;
                first = false;
            }
        }
        write!(f, "] }}")
    }
}

/// Append-only storage for traffic-day bitmaps. Indices handed out by
/// `store` remain valid until the final deduplication pass, which compacts
/// the storage and returns the rewrite map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BitfieldStore {
    bitfields: Vec<Bitfield>,
}

impl BitfieldStore {
    pub fn new() -> Self {
        Self {
            bitfields: Vec::new(),
        }
    }

    pub fn store(&mut self, bitfield: Bitfield) -> BitfieldIdx {
        self.bitfields.push(bitfield);
        BitfieldIdx::new(self.bitfields.len() - 1)
    }

    pub fn get(&self, idx: BitfieldIdx) -> &Bitfield {
        &self.bitfields[idx.get()]
    }

    pub fn len(&self) -> usize {
        self.bitfields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitfields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bitfield> {
        self.bitfields.iter()
    }

    /// Remove duplicate bitmaps. Returns the rewrite map : entry `old`
    /// gives the index of the canonical copy in the compacted storage.
    /// Every stored index in the graph must be rewritten afterwards.
    pub fn dedup(&mut self) -> Vec<u32> {
        let mut order: Vec<usize> = (0..self.bitfields.len()).collect();
        order.sort_by(|lhs, rhs| self.bitfields[*lhs].cmp(&self.bitfields[*rhs]));

        let mut map = vec![0u32; self.bitfields.len()];
        let mut uniques: Vec<Bitfield> = Vec::with_capacity(self.bitfields.len());
        for old_idx in order {
            if uniques.last() != Some(&self.bitfields[old_idx]) {
                uniques.push(self.bitfields[old_idx]);
            }
            map[old_idx] = (uniques.len() - 1) as u32;
        }
        self.bitfields = uniques;
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_roundtrip() {
        let bitfield = Bitfield::from_serialized("0101");
        assert!(!bitfield.test(0));
        assert!(bitfield.test(1));
        assert!(!bitfield.test(2));
        assert!(bitfield.test(3));
        assert_eq!(bitfield.count(), 2);
    }

    #[test]
    fn shifts_move_days() {
        let mut bitfield = Bitfield::empty();
        bitfield.set(3);
        bitfield.set(70);

        let left = bitfield.shifted_left(2);
        assert!(left.test(5));
        assert!(left.test(72));
        assert_eq!(left.count(), 2);

        let right = bitfield.shifted_right(4);
        assert!(right.test(66));
        assert_eq!(right.count(), 1); // day 3 fell off the horizon
    }

    #[test]
    fn shift_across_block_boundary() {
        let mut bitfield = Bitfield::empty();
        bitfield.set(63);
        let shifted = bitfield.shifted_left(1);
        assert!(shifted.test(64));
        assert_eq!(shifted.count(), 1);
    }

    #[test]
    fn dedup_compacts_and_maps() {
        let mut store = BitfieldStore::new();
        let mut a = Bitfield::empty();
        a.set(1);
        let mut b = Bitfield::empty();
        b.set(2);

        let idx_a1 = store.store(a);
        let idx_b = store.store(b);
        let idx_a2 = store.store(a);

        let map = store.dedup();
        assert_eq!(store.len(), 2);
        assert_eq!(map[idx_a1.get()], map[idx_a2.get()]);
        assert_ne!(map[idx_a1.get()], map[idx_b.get()]);
        assert_eq!(store.get(BitfieldIdx::new(map[idx_a1.get()] as usize)), &a);
    }
}
