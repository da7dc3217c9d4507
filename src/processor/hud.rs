//! HUD arithmetic: turning counters into digit slots and laying out the
//! item strip. Everything here is pure; `Scene::update` applies the result.

use serde::Serialize;

use crate::config::{CounterLayout, DigitOrder, HudLayout};
use crate::model::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Counter {
    Coin,
    Time,
    Score,
    Life,
}

impl Counter {
    pub const ALL: [Counter; 4] = [Counter::Coin, Counter::Time, Counter::Score, Counter::Life];

    /// Number rows pick their counter with the setting column.
    pub fn from_setting(setting: i32) -> Option<Self> {
        match setting {
            0 => Some(Self::Coin),
            1 => Some(Self::Time),
            2 => Some(Self::Score),
            3 => Some(Self::Life),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn layout(self, hud: &HudLayout) -> CounterLayout {
        match self {
            Self::Coin => hud.coin,
            Self::Time => hud.time,
            Self::Score => hud.score,
            Self::Life => hud.life,
        }
    }
}

/// Number objects grouped per counter, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterBuckets {
    buckets: [Vec<ObjectId>; 4],
}

impl CounterBuckets {
    pub fn push(&mut self, counter: Counter, id: ObjectId) {
        self.buckets[counter.index()].push(id);
    }

    pub fn get(&self, counter: Counter) -> &[ObjectId] {
        &self.buckets[counter.index()]
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// Decimal digits, least significant first. `0` is `[0]`.
pub fn decompose(mut value: u32) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push((value % 10) as u8);
        value /= 10;
    }
    digits
}

/// One digit slot of a counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitSlot {
    /// Index into the counter's bucket.
    pub bucket_index: usize,
    pub x: f32,
    pub y: f32,
    pub digit: u8,
}

/// Lay out `value` over a bucket of `slots` number objects.
///
/// Slot `j` sits `j` digit widths left of the anchor and shows digit `j`
/// (0 once the digits run out). Negative values show as 0.
pub fn layout_counter(slots: usize, anchor: CounterLayout, width: f32, value: i32) -> Vec<DigitSlot> {
    let digits = decompose(u32::try_from(value).unwrap_or(0));

    (0..slots)
        .map(|j| {
            let bucket_index = match anchor.order {
                DigitOrder::Forward => j,
                DigitOrder::Reverse => slots - 1 - j,
            };
            DigitSlot {
                bucket_index,
                x: anchor.x - j as f32 * width,
                y: anchor.y,
                digit: digits.get(j).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Item icon placement along the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSlot {
    pub x: f32,
    pub y: f32,
    pub state: i32,
}

/// Item `i` shows `states[i]`; a short state list leaves the rest empty (0).
pub fn layout_items(count: usize, board_y: f32, hud: &HudLayout, states: &[i32]) -> Vec<ItemSlot> {
    (0..count)
        .map(|i| ItemSlot {
            x: hud.item_x + i as f32 * hud.item_step,
            y: board_y + hud.item_board_offset,
            state: states.get(i).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recompose(digits: &[u8]) -> u32 {
        digits.iter().rev().fold(0, |acc, d| acc * 10 + *d as u32)
    }

    #[test]
    fn test_decompose() {
        assert_eq!(decompose(0), vec![0]);
        assert_eq!(decompose(7), vec![7]);
        assert_eq!(decompose(205), vec![5, 0, 2]);
        assert_eq!(decompose(1000), vec![0, 0, 0, 1]);

        for n in [1, 9, 10, 99, 100, 12345, 4_000_000_000] {
            let digits = decompose(n);
            assert_eq!(recompose(&digits), n);
            assert_ne!(*digits.last().unwrap(), 0, "no leading zeros for {n}");
        }
    }

    #[test]
    fn test_coin_205_reads_left_to_right() {
        let anchor = HudLayout::default().coin;
        let slots = layout_counter(3, anchor, 8.0, 205);

        assert_eq!(
            slots,
            vec![
                DigitSlot { bucket_index: 0, x: 180.0, y: 219.0, digit: 5 },
                DigitSlot { bucket_index: 1, x: 172.0, y: 219.0, digit: 0 },
                DigitSlot { bucket_index: 2, x: 164.0, y: 219.0, digit: 2 },
            ]
        );

        let mut by_x = slots.clone();
        by_x.sort_by(|a, b| a.x.total_cmp(&b.x));
        let text: String = by_x.iter().map(|s| char::from(b'0' + s.digit)).collect();
        assert_eq!(text, "205");
    }

    #[test]
    fn test_reverse_counter_walks_bucket_backwards() {
        let anchor = HudLayout::default().time;
        let slots = layout_counter(3, anchor, 8.0, 42);

        let indices: Vec<_> = slots.iter().map(|s| s.bucket_index).collect();
        assert_eq!(indices, vec![2, 1, 0]);

        let digits: Vec<_> = slots.iter().map(|s| s.digit).collect();
        assert_eq!(digits, vec![2, 4, 0], "missing high digits pad with 0");
        assert_eq!(slots[0].x, 180.0);
        assert_eq!(slots[2].x, 164.0);
    }

    #[test]
    fn test_counter_edge_cases() {
        let anchor = HudLayout::default().score;
        assert!(layout_counter(0, anchor, 8.0, 999).is_empty());

        // digits past the bucket are not shown
        let slots = layout_counter(2, anchor, 8.0, 12345);
        assert_eq!(slots.iter().map(|s| s.digit).collect::<Vec<_>>(), vec![5, 4]);

        let slots = layout_counter(2, anchor, 8.0, -15);
        assert!(slots.iter().all(|s| s.digit == 0));
    }

    #[test]
    fn test_item_strip() {
        let hud = HudLayout::default();
        let slots = layout_items(3, 100.0, &hud, &[4, 2]);

        assert_eq!(
            slots,
            vec![
                ItemSlot { x: 207.0, y: 116.0, state: 4 },
                ItemSlot { x: 231.0, y: 116.0, state: 2 },
                ItemSlot { x: 255.0, y: 116.0, state: 0 },
            ]
        );
    }

    #[test]
    fn test_buckets() {
        let mut buckets = CounterBuckets::default();
        assert!(buckets.is_empty());
        buckets.push(Counter::Life, ObjectId(4));
        buckets.push(Counter::Life, ObjectId(2));
        assert_eq!(buckets.get(Counter::Life), &[ObjectId(4), ObjectId(2)]);
        assert!(buckets.get(Counter::Coin).is_empty());

        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(Counter::from_setting(3), Some(Counter::Life));
        assert_eq!(Counter::from_setting(4), None);
    }
}
