use tally_domain::{date::InvalidDateError, DateRange, DateRangeQuery};
use tally_infra::{Config, Pagination, TallyContext};

/// The page a client asked for, with defaults filled in and the limit capped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    /// 1 based
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: Option<usize>, limit: Option<usize>, config: &Config) -> Self {
        let limit = match limit {
            Some(0) | None => config.default_page_size,
            Some(limit) => limit.min(config.max_page_size),
        };
        Self {
            page: page.unwrap_or(1).max(1),
            limit,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::page(self.page, self.limit)
    }
}

/// Resolves a date filter against the current time and the configured timezone
pub fn resolve_date_filter(
    query: &DateRangeQuery,
    ctx: &TallyContext,
) -> Result<Option<DateRange>, InvalidDateError> {
    query.resolve(ctx.now(), &ctx.config.timezone)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fills_in_defaults_and_caps_the_limit() {
        let mut config = Config::default();
        config.default_page_size = 20;
        config.max_page_size = 100;

        assert_eq!(
            PageRequest::new(None, None, &config),
            PageRequest { page: 1, limit: 20 }
        );
        assert_eq!(
            PageRequest::new(Some(0), Some(0), &config),
            PageRequest { page: 1, limit: 20 }
        );
        let req = PageRequest::new(Some(3), Some(500), &config);
        assert_eq!(req, PageRequest { page: 3, limit: 100 });
        assert_eq!(req.pagination(), Pagination { skip: 200, limit: 100 });
    }

    #[test]
    fn extreme_pages_do_not_overflow() {
        let config = Config::default();
        let req = PageRequest::new(Some(usize::MAX), Some(config.max_page_size), &config);
        assert_eq!(req.page, usize::MAX);
        assert_eq!(req.pagination().skip, usize::MAX);
    }
}
