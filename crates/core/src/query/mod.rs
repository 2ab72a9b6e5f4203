//! Query engine over cached snapshots.
//!
//! Pure functions: no I/O and no mutation of the snapshot they are handed.
//!
//! - Search path: case-insensitive substring filter, newest-first sort, 1-based pages
//! - Listing path: `skip`/`limit` over the snapshot in arrival order

pub mod params;
pub mod timestamp;

pub use params::{ListParams, SearchParams};
pub use timestamp::{parse_timestamp, sort_newest_first};

use crate::Message;
use serde::{Deserialize, Serialize};

/// One window of the raw snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePage {
    /// Full snapshot length.
    pub total: usize,
    pub items: Vec<Message>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Number of matches before pagination.
    pub total: usize,
    pub items: Vec<Message>,
}

/// Whether `message` matches the free-text query `q`.
///
/// Blank queries match everything. Otherwise the trimmed, lower-cased query is
/// looked up as a substring of `"{user_name} {user_id} {message}"`, lower-cased.
pub fn matches(message: &Message, q: &str) -> bool {
    let needle = q.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystack(message).contains(&needle)
}

fn haystack(message: &Message) -> String {
    format!("{} {} {}", message.user_name, message.user_id, message.message).to_lowercase()
}

/// Filter, sort newest first, and slice one page.
///
/// Expects `params` to have passed [`SearchParams::validate`]. Pages past the
/// end yield no items.
pub fn search(messages: &[Message], params: &SearchParams) -> SearchPage {
    let needle = params.q.trim().to_lowercase();
    let mut hits: Vec<&Message> = if needle.is_empty() {
        messages.iter().collect()
    } else {
        messages.iter().filter(|m| haystack(m).contains(&needle)).collect()
    };

    sort_newest_first(&mut hits);

    let total = hits.len();
    let (start, end) = params.range();
    let items = slice_window(&hits, start, end).iter().map(|m| (*m).clone()).collect();

    SearchPage { total, items }
}

/// Slice the snapshot in arrival order, without filtering or sorting.
///
/// Expects `params` to have passed [`ListParams::validate`].
pub fn list(messages: &[Message], params: &ListParams) -> MessagePage {
    let (start, end) = params.range();
    MessagePage { total: messages.len(), items: slice_window(messages, start, end).to_vec() }
}

fn slice_window<T>(items: &[T], start: usize, end: usize) -> &[T] {
    let end = end.min(items.len());
    items.get(start..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, user_name: &str, timestamp: &str, text: &str) -> Message {
        Message {
            id: id.to_string(),
            user_id: format!("uid-{id}"),
            user_name: user_name.to_string(),
            timestamp: timestamp.to_string(),
            message: text.to_string(),
        }
    }

    fn paris_lunch() -> Vec<Message> {
        vec![
            msg("1", "Armand Dupont", "2024-01-01T00:00:00Z", "Dinner in Paris"),
            msg("2", "Vikram Desai", "2024-02-01T00:00:00Z", "Lunch"),
        ]
    }

    fn sample() -> Vec<Message> {
        vec![
            msg("1", "Sophia Al-Farsi", "2024-03-01T10:00:00Z", "Book a table for two in Paris"),
            msg("2", "Fatima El-Tahir", "2024-05-01T10:00:00Z", "Need a car at the airport"),
            msg("3", "Armand Dupont", "garbage", "Paris hotel upgrade please"),
            msg("4", "Lorenzo Cavalli", "2024-04-01T10:00:00+00:00", "Tickets for the opera"),
            msg("5", "Sophia Al-Farsi", "2024-01-15T08:00:00Z", "Confirm my PARIS flight"),
            msg("6", "Hans Muller", "2024-05-01T10:00:00Z", "Change my dinner reservation"),
        ]
    }

    fn ids(items: &[Message]) -> Vec<&str> {
        items.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_matches_blank_query() {
        let m = msg("1", "Anyone", "t", "text");
        assert!(matches(&m, ""));
        assert!(matches(&m, "   \t"));
    }

    #[test]
    fn test_matches_each_field_case_insensitive() {
        let m = msg("42", "Layla Kawaguchi", "t", "Reserve the Spa");
        assert!(matches(&m, "layla"));
        assert!(matches(&m, "UID-42"));
        assert!(matches(&m, "  spa  "));
        assert!(!matches(&m, "paris"));
    }

    #[test]
    fn test_matches_across_field_boundary() {
        let m = msg("7", "Ann", "t", "hello");
        // fields are joined with single spaces, so this spans user_id and message
        assert!(matches(&m, "uid-7 hello"));
    }

    #[test]
    fn test_scenario_paris() {
        let page = search(&paris_lunch(), &SearchParams { q: "paris".into(), page: 1, page_size: 10 });
        assert_eq!(page.total, 1);
        assert_eq!(ids(&page.items), vec!["1"]);
    }

    #[test]
    fn test_scenario_empty_query_newest_first() {
        let page = search(&paris_lunch(), &SearchParams { q: String::new(), page: 1, page_size: 1 });
        assert_eq!(page.total, 2);
        assert_eq!(ids(&page.items), vec!["2"]);
    }

    #[test]
    fn test_every_hit_contains_query() {
        let data = sample();
        for q in ["paris", "SOPHIA", "uid-4", "dinner", "a"] {
            let page = search(&data, &SearchParams { q: q.into(), page: 1, page_size: 100 });
            let needle = q.to_lowercase();
            for item in &page.items {
                let hay = format!("{} {} {}", item.user_name, item.user_id, item.message).to_lowercase();
                assert!(hay.contains(&needle), "{} should contain {}", item.id, q);
            }
        }
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let data = sample();
        let page = search(&data, &SearchParams { q: "  ".into(), page: 1, page_size: 100 });
        assert_eq!(page.total, data.len());
        assert_eq!(page.items.len(), data.len());
    }

    #[test]
    fn test_results_sorted_newest_first_with_invalid_last() {
        let page = search(&sample(), &SearchParams { q: String::new(), page: 1, page_size: 100 });
        // 2 and 6 share a timestamp and keep snapshot order
        assert_eq!(ids(&page.items), vec!["2", "6", "4", "1", "5", "3"]);
    }

    #[test]
    fn test_paris_matches_sorted() {
        let page = search(&sample(), &SearchParams { q: "Paris".into(), page: 1, page_size: 10 });
        assert_eq!(page.total, 3);
        assert_eq!(ids(&page.items), vec!["1", "5", "3"]);
    }

    #[test]
    fn test_pages_partition_the_matches() {
        let data = sample();
        let full = search(&data, &SearchParams { q: "a".into(), page: 1, page_size: 100 });

        let mut collected = Vec::new();
        for page in 1..=10 {
            let p = search(&data, &SearchParams { q: "a".into(), page, page_size: 2 });
            assert_eq!(p.total, full.total);
            collected.extend(p.items);
        }
        assert_eq!(collected, full.items);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = search(&sample(), &SearchParams { q: String::new(), page: 50, page_size: 100 });
        assert_eq!(page.total, 6);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_search_does_not_touch_snapshot() {
        let data = sample();
        let before = data.clone();
        let _ = search(&data, &SearchParams::default());
        assert_eq!(data, before);
    }

    #[test]
    fn test_list_window_in_arrival_order() {
        let data = sample();
        let page = list(&data, &ListParams { skip: 1, limit: 3 });
        assert_eq!(page.total, 6);
        assert_eq!(ids(&page.items), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_list_out_of_range() {
        let data = sample();
        let page = list(&data, &ListParams { skip: 10, limit: 5 });
        assert_eq!(page.total, 6);
        assert!(page.items.is_empty());

        let tail = list(&data, &ListParams { skip: 4, limit: 500 });
        assert_eq!(ids(&tail.items), vec!["5", "6"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let page = search(&[], &SearchParams::default());
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());

        let listing = list(&[], &ListParams::default());
        assert_eq!(listing.total, 0);
    }
}
