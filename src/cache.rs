//! Bounded query-result cache with first-in-first-out eviction.

use std::collections::{HashMap, VecDeque};

use crate::search::types::ScoredResult;

/// Maps a query string to its previously computed ranked results.
///
/// Entries have no TTL and a lookup does not refresh an entry's position:
/// when the cache is full, the oldest *inserted* query is evicted, however
/// recently it was read.
pub struct ResultCache {
    capacity: usize,
    map: HashMap<String, Vec<ScoredResult>>,
    order: VecDeque<String>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, query: &str) -> Option<Vec<ScoredResult>> {
        self.map.get(query).cloned()
    }

    pub fn insert(&mut self, query: String, results: Vec<ScoredResult>) {
        if self.map.insert(query.clone(), results).is_some() {
            // Value replaced in place; insertion order keeps the original slot.
            return;
        }
        self.order.push_back(query);
        while self.map.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.map.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str) -> Vec<ScoredResult> {
        vec![ScoredResult {
            title: title.to_string(),
            percent: 50.0,
            help: "label".to_string(),
            summary: "summary".to_string(),
            url: format!("https://en.wikipedia.org/wiki/{title}"),
            lang: "EN".to_string(),
        }]
    }

    #[test]
    fn stores_and_returns_entries() {
        let mut cache = ResultCache::new(4);
        assert!(cache.is_empty());
        cache.insert("q".into(), result("A"));
        assert_eq!(cache.get("q"), Some(result("A")));
        assert_eq!(cache.get("other"), None);
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut cache = ResultCache::new(3);
        for i in 0..10 {
            cache.insert(format!("q{i}"), result("A"));
            assert!(cache.len() <= 3);
        }
    }

    #[test]
    fn overflow_evicts_exactly_the_oldest_entry() {
        let mut cache = ResultCache::new(2);
        cache.insert("first".into(), result("A"));
        cache.insert("second".into(), result("B"));
        cache.insert("third".into(), result("C"));

        assert_eq!(cache.get("first"), None);
        assert!(cache.get("second").is_some());
        assert!(cache.get("third").is_some());
    }

    #[test]
    fn reads_do_not_refresh_eviction_order() {
        let mut cache = ResultCache::new(2);
        cache.insert("first".into(), result("A"));
        cache.insert("second".into(), result("B"));

        // A read of "first" must not save it from being the eviction victim.
        assert!(cache.get("first").is_some());
        cache.insert("third".into(), result("C"));
        assert_eq!(cache.get("first"), None);
        assert!(cache.get("second").is_some());
    }

    #[test]
    fn reinserting_a_key_does_not_duplicate_its_slot() {
        let mut cache = ResultCache::new(2);
        cache.insert("first".into(), result("A"));
        cache.insert("first".into(), result("B"));
        cache.insert("second".into(), result("C"));
        cache.insert("third".into(), result("D"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("first"), None);
        assert!(cache.get("second").is_some());
        assert!(cache.get("third").is_some());
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut cache = ResultCache::new(0);
        cache.insert("q".into(), result("A"));
        assert_eq!(cache.len(), 1);
    }
}
