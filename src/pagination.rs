use crate::error::AppError;

pub const POSTS_PER_PAGE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Page is not 'last', nor can it be converted to an int")]
    NotAnInteger,

    #[error("That page number is less than 1")]
    LessThanOne,

    #[error("That page contains no results")]
    NoResults,
}

impl From<PageError> for AppError {
    fn from(e: PageError) -> Self {
        tracing::debug!("Invalid page: {}", e);
        AppError::NotFound
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: usize,
    per_page: usize,
}

impl Paginator {
    pub fn new(count: usize, per_page: usize) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    /// Total pages; an empty listing still has one (empty) page.
    pub fn num_pages(&self) -> usize {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Resolve the raw `page` query value to a page number in range.
    pub fn validate_number(&self, raw: Option<&str>) -> Result<usize, PageError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(1),
            Some("last") => return Ok(self.num_pages()),
            Some(raw) => raw,
        };

        let number: i64 = raw.parse().map_err(|_| PageError::NotAnInteger)?;
        if number < 1 {
            return Err(PageError::LessThanOne);
        }
        let number = number as usize;
        if number > self.num_pages() {
            return Err(PageError::NoResults);
        }
        Ok(number)
    }

    /// Row offset of the first item on `number`.
    pub fn offset(&self, number: usize) -> usize {
        (number.saturating_sub(1)) * self.per_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page<T>(&self, number: usize, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_page_number(&self) -> usize {
        self.number.saturating_sub(1).max(1)
    }

    pub fn next_page_number(&self) -> usize {
        (self.number + 1).min(self.num_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_pages_rounds_up() {
        assert_eq!(Paginator::new(7, 3).num_pages(), 3);
        assert_eq!(Paginator::new(6, 3).num_pages(), 2);
        assert_eq!(Paginator::new(1, 3).num_pages(), 1);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let paginator = Paginator::new(0, 3);
        assert_eq!(paginator.num_pages(), 1);
        assert_eq!(paginator.validate_number(Some("1")), Ok(1));
        assert_eq!(paginator.validate_number(Some("2")), Err(PageError::NoResults));
    }

    #[test]
    fn missing_page_defaults_to_first() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.validate_number(None), Ok(1));
        assert_eq!(paginator.validate_number(Some("")), Ok(1));
    }

    #[test]
    fn last_resolves_to_final_page() {
        assert_eq!(Paginator::new(7, 3).validate_number(Some("last")), Ok(3));
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.validate_number(Some("3")), Ok(3));
        assert_eq!(paginator.validate_number(Some("4")), Err(PageError::NoResults));
        assert_eq!(paginator.validate_number(Some("0")), Err(PageError::LessThanOne));
        assert_eq!(paginator.validate_number(Some("-2")), Err(PageError::LessThanOne));
        assert_eq!(
            paginator.validate_number(Some("two")),
            Err(PageError::NotAnInteger)
        );
    }

    #[test]
    fn offsets_follow_page_size() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.offset(1), 0);
        assert_eq!(paginator.offset(3), 6);
    }

    #[test]
    fn page_navigation() {
        let paginator = Paginator::new(7, 3);
        let first = paginator.page(1, vec!['a', 'b', 'c']);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.next_page_number(), 2);

        let last = paginator.page(3, vec!['g']);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.previous_page_number(), 2);
    }

    #[test]
    fn page_errors_map_to_not_found() {
        assert!(matches!(
            AppError::from(PageError::NoResults),
            AppError::NotFound
        ));
    }
}
