//! Shared query infrastructure: the [`Query`] and [`Paginated`] traits and [`QueryCommon`] fields.

use url::Url;

/// Trait implemented by all query builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Builder methods for queries that page through a list endpoint.
pub trait Paginated: Query {
    /// Returns a mutable reference to the common paging fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (0-indexed).
    fn with_page_number(mut self, page_number: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_number = page_number;
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = page_size;
        self
    }
}

/// Paging fields shared by list queries.
#[derive(Clone, Copy, Debug)]
pub struct QueryCommon {
    /// Page number (0-indexed). Defaults to 0.
    pub page_number: i64,
    /// Results per page.
    pub page_size: i64,
}

impl QueryCommon {
    pub fn with_default_size(page_size: i64) -> QueryCommon {
        QueryCommon {
            page_number: 0,
            page_size,
        }
    }

    /// Appends `page_number` and `page_size` to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page_number", &self.page_number.to_string())
            .append_pair("page_size", &self.page_size.to_string());
        url
    }
}

/// A query with no parameters, for endpoints addressed purely by path.
impl Query for () {
    fn add_to_url(&self, url: &Url) -> Url {
        url.clone()
    }
}
