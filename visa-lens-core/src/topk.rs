use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedValue {
    pub value: String,
    pub count: u64,
}

// Heap slot ordered so that the weakest-ranked entry (lowest count, then
// lexicographically greatest value) is the heap maximum and gets evicted
// first. `into_sorted_vec` then yields strongest-first directly.
#[derive(Debug, PartialEq, Eq)]
struct Slot {
    count: u64,
    value: String,
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `k` highest-count entries of a frequency map, count descending,
/// ties broken by ascending byte-wise value. Bounded selection: the heap
/// never holds more than `k` slots, so domains much larger than `k` are
/// never fully sorted. Fewer than `k` distinct values returns all of
/// them; `k` = 0 returns nothing.
pub fn top_k(counts: &HashMap<String, u64>, k: usize) -> Vec<RankedValue> {
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Slot> = BinaryHeap::with_capacity(k);
    for (value, &count) in counts {
        if heap.len() < k {
            heap.push(Slot { count, value: value.clone() });
            continue;
        }
        // replace the current weakest only on a strict win, so the
        // result cannot depend on map iteration order
        let wins = match heap.peek() {
            Some(weakest) => {
                count > weakest.count
                    || (count == weakest.count && value.as_str() < weakest.value.as_str())
            }
            None => true,
        };
        if wins {
            heap.pop();
            heap.push(Slot { count, value: value.clone() });
        }
    }
    heap.into_sorted_vec()
        .into_iter()
        .map(|slot| RankedValue {
            value: slot.value,
            count: slot.count,
        })
        .collect()
}

#[cfg(test)]
mod tests_topk {
    use super::*;

    fn counts(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries.iter().map(|(v, c)| (v.to_string(), *c)).collect()
    }

    fn ranked(entries: &[(&str, u64)]) -> Vec<RankedValue> {
        entries
            .iter()
            .map(|(v, c)| RankedValue { value: v.to_string(), count: *c })
            .collect()
    }

    #[test]
    fn orders_by_count_descending() {
        let m = counts(&[("CA", 2), ("NY", 1), ("TX", 5)]);
        assert_eq!(top_k(&m, 3), ranked(&[("TX", 5), ("CA", 2), ("NY", 1)]));
    }

    #[test]
    fn ties_break_lexicographically() {
        let m = counts(&[("A", 5), ("B", 5), ("C", 5)]);
        assert_eq!(top_k(&m, 2), ranked(&[("A", 5), ("B", 5)]));
    }

    #[test]
    fn tie_on_the_cut_keeps_the_earlier_value() {
        let m = counts(&[("Z", 9), ("M", 4), ("A", 4)]);
        assert_eq!(top_k(&m, 2), ranked(&[("Z", 9), ("A", 4)]));
    }

    #[test]
    fn fewer_entries_than_k_returns_all() {
        let m = counts(&[("CA", 2), ("NY", 1)]);
        assert_eq!(top_k(&m, 10), ranked(&[("CA", 2), ("NY", 1)]));
    }

    #[test]
    fn k_zero_is_empty() {
        let m = counts(&[("CA", 2)]);
        assert!(top_k(&m, 0).is_empty());
    }

    #[test]
    fn empty_map_is_empty() {
        assert!(top_k(&HashMap::new(), 5).is_empty());
    }

    #[test]
    fn large_domain_small_k() {
        let mut m = HashMap::new();
        for i in 0..10_000u64 {
            m.insert(format!("value_{i:05}"), i % 97);
        }
        m.insert("winner".to_string(), 1_000);
        m.insert("runner_up".to_string(), 999);
        let top = top_k(&m, 2);
        assert_eq!(top[0].value, "winner");
        assert_eq!(top[1].value, "runner_up");
    }

    #[test]
    fn result_is_stable_across_runs() {
        let m = counts(&[("B", 3), ("A", 3), ("D", 3), ("C", 3), ("E", 1)]);
        let first = top_k(&m, 3);
        for _ in 0..50 {
            assert_eq!(top_k(&m, 3), first);
        }
        assert_eq!(first, ranked(&[("A", 3), ("B", 3), ("C", 3)]));
    }
}
