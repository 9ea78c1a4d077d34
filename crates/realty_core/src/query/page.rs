use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Matches before paging.
    pub total_count: u64,
    /// 1-based page number.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    /// Cuts page `page_number` of `page_size` out of an ordered result set.
    ///
    /// Page 0 is read as page 1; size 0 and pages past the end are empty.
    #[must_use]
    pub fn paginate(all: Vec<T>, page_number: u32, page_size: u32) -> Self {
        let page_number = page_number.max(1);
        let total_count = all.len() as u64;
        let skip = u64::from(page_number - 1) * u64::from(page_size);
        let items = if page_size == 0 || skip >= total_count {
            Vec::new()
        } else {
            all.into_iter()
                .skip(skip as usize)
                .take(page_size as usize)
                .collect()
        };
        Self {
            items,
            total_count,
            page_number,
            page_size,
        }
    }

    /// Number of pages, 0 for an empty result or size 0.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(u64::from(self.page_size))
        }
    }

    /// Whether a later page has items.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page_number) < self.total_pages()
    }

    /// Whether this is not the first page.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    /// Maps the items, keeping the paging metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

impl<T: Serialize> Serialize for PagedResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PagedResult", 7)?;
        s.serialize_field("items", &self.items)?;
        s.serialize_field("totalCount", &self.total_count)?;
        s.serialize_field("pageNumber", &self.page_number)?;
        s.serialize_field("pageSize", &self.page_size)?;
        s.serialize_field("totalPages", &self.total_pages())?;
        s.serialize_field("hasNextPage", &self.has_next_page())?;
        s.serialize_field("hasPreviousPage", &self.has_previous_page())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page() {
        let page = PagedResult::paginate((1..=25).collect(), 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next_page());
        assert!(page.has_previous_page());
    }

    #[test]
    fn last_partial_page() {
        let page = PagedResult::paginate((1..=25).collect(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(!page.has_next_page());
    }

    #[test]
    fn page_past_end_is_empty() {
        let page = PagedResult::paginate((1..=5).collect::<Vec<i32>>(), 9, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn page_zero_reads_as_first() {
        let page = PagedResult::paginate((1..=5).collect::<Vec<i32>>(), 0, 2);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items, vec![1, 2]);
        assert!(!page.has_previous_page());
    }

    #[test]
    fn size_zero_is_empty() {
        let page = PagedResult::paginate((1..=5).collect::<Vec<i32>>(), 1, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn serializes_helpers() {
        let page = PagedResult::paginate(vec![1, 2, 3], 1, 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPreviousPage"], false);
    }
}
