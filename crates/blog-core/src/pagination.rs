//! Page-number pagination that never fails on bad input.

use serde::Serialize;

/// Splits a result set of `count` items into fixed-size pages.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

/// A resolved page within a [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: u64,
    pub num_pages: u64,
    pub per_page: u64,
    pub count: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    /// Total pages; an empty result still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve a raw page parameter.
    ///
    /// Missing or non-numeric input gives the first page, numbers below one
    /// are raised to the first page and numbers past the end give the last.
    pub fn page(&self, raw: Option<&str>) -> Page {
        let num_pages = self.num_pages();
        let number = match raw.map(str::trim) {
            None => 1,
            Some(s) => match s.parse::<i64>() {
                Ok(n) if n < 1 => 1,
                Ok(n) => (n as u64).min(num_pages),
                // Too large for i64 but still a number
                Err(_) if is_unsigned_integer(s) => num_pages,
                Err(_) => 1,
            },
        };

        Page {
            number,
            num_pages,
            per_page: self.per_page,
            count: self.count,
        }
    }
}

fn is_unsigned_integer(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl Page {
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_page_falls_back_to_first() {
        let paginator = Paginator::new(4, 2);
        assert_eq!(paginator.page(Some("abc")).number, 1);
        assert_eq!(paginator.page(Some("1.5")).number, 1);
        assert_eq!(paginator.page(None).number, 1);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let paginator = Paginator::new(4, 2);
        assert_eq!(paginator.page(Some("9999")).number, 2);
        assert_eq!(paginator.page(Some("0")).number, 1);
        assert_eq!(paginator.page(Some("-3")).number, 1);
    }

    #[test]
    fn page_number_beyond_i64_gives_last_page() {
        let paginator = Paginator::new(4, 2);
        assert_eq!(paginator.page(Some("99999999999999999999")).number, 2);
        assert_eq!(paginator.page(Some("-99999999999999999999")).number, 1);
    }

    #[test]
    fn empty_result_has_a_single_page() {
        let paginator = Paginator::new(0, 2);
        let page = paginator.page(Some("5"));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.offset(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn neighbours_and_offset() {
        let page = Paginator::new(5, 2).page(Some("2"));
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.offset(), 2);
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.next_page_number(), Some(3));
    }
}
