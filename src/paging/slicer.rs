//! Page slicing
//!
//! Pure functions, no state: given a collection, a page size and a 1-based
//! page index, produce the items on that page and the page count.

use std::num::NonZeroUsize;

/// One page of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    /// Items on this page (the last page may be shorter)
    pub items: &'a [T],
    /// The page actually sliced, after clamping
    pub page: usize,
    /// Total number of pages, never less than 1
    pub total_pages: usize,
}

/// Number of pages needed for `len` items: `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Clamp any page request into `[1, total_pages]`
///
/// Takes a signed value so stale or malformed requests (0, negative,
/// past the end) clamp instead of failing.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let total = total_pages.max(1);
    if page < 1 {
        1
    } else {
        usize::try_from(page).map_or(total, |p| p.min(total))
    }
}

/// Slice out page `page` (1-based) of `items`
pub fn slice<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> PageSlice<'_, T> {
    let total = total_pages(items.len(), page_size);
    let page = page.clamp(1, total);
    let size = page_size.get();
    let start = ((page - 1) * size).min(items.len());
    let end = (start + size).min(items.len());

    PageSlice {
        items: &items[start..end],
        page,
        total_pages: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, size(5)), 1);
        assert_eq!(total_pages(1, size(5)), 1);
        assert_eq!(total_pages(5, size(5)), 1);
        assert_eq!(total_pages(6, size(5)), 2);
        assert_eq!(total_pages(12, size(5)), 3);
        assert_eq!(total_pages(7, size(1)), 7);
    }

    #[test]
    fn test_twelve_items_page_lengths() {
        let items: Vec<u32> = (0..12).collect();
        let lengths: Vec<usize> = (1..=3)
            .map(|p| slice(&items, size(5), p).items.len())
            .collect();
        assert_eq!(lengths, vec![5, 5, 2]);
    }

    #[test]
    fn test_pages_concatenate_to_original() {
        for len in 0..40usize {
            for page_size in 1..9usize {
                let items: Vec<usize> = (0..len).collect();
                let total = total_pages(len, size(page_size));
                assert_eq!(total, len.div_ceil(page_size).max(1));

                let mut joined = Vec::new();
                for p in 1..=total {
                    let page = slice(&items, size(page_size), p);
                    if p < total {
                        assert_eq!(page.items.len(), page_size);
                    } else {
                        assert_eq!(page.items.len(), len - (total - 1) * page_size);
                    }
                    joined.extend_from_slice(page.items);
                }
                assert_eq!(joined, items, "len={} page_size={}", len, page_size);
            }
        }
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<u8> = Vec::new();
        let page = slice(&items, size(5), 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_out_of_range_page_clamps() {
        let items: Vec<u32> = (0..12).collect();

        let past_end = slice(&items, size(5), 9);
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.items, &[10, 11]);

        let zero = slice(&items, size(5), 0);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_clamp_page_signed_input() {
        assert_eq!(clamp_page(-4, 3), 1);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(99, 3), 3);
        assert_eq!(clamp_page(i64::MAX, 3), 3);
        assert_eq!(clamp_page(5, 0), 1);
    }
}
