//! [`PageSource`] implementations over the paged list endpoints, ready to be
//! wrapped in a [`Paginator`](shelf::Paginator).

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shelf::{Book, BorrowRecord, Page, PageParam, PageSource, User, ViolationRecord};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{BookFilters, BorrowFilters, ListQuery, UserFilters, ViolationFilters};
use crate::services;

/// One `{ ...filters, pageParam }` list endpoint.
pub struct ListEndpoint<T, F> {
    client: ApiClient,
    path: &'static str,
    _marker: PhantomData<fn(&F) -> T>,
}

impl<T, F> ListEndpoint<T, F> {
    pub fn new(client: ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<T, F> Clone for ListEndpoint<T, F> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone(), self.path)
    }
}

impl<T, F> PageSource for ListEndpoint<T, F>
where
    T: DeserializeOwned,
    F: Serialize + Clone,
{
    type Item = T;
    type Filters = F;
    type Error = ApiError;

    async fn fetch_page(&self, filters: &F, page: PageParam) -> Result<Page<T>, ApiError> {
        tracing::debug!(path = self.path, page = page.current, "fetching page");
        let body = ListQuery {
            filters,
            page_param: page,
        };
        self.client.post_json(self.path, &body).await
    }
}

pub type BookPages = ListEndpoint<Book, BookFilters>;
pub type BorrowPages = ListEndpoint<BorrowRecord, BorrowFilters>;
pub type ViolationPages = ListEndpoint<ViolationRecord, ViolationFilters>;
pub type UserPages = ListEndpoint<User, UserFilters>;

pub fn book_pages(client: ApiClient) -> BookPages {
    ListEndpoint::new(client, services::BOOK_LIST)
}

pub fn my_borrow_pages(client: ApiClient) -> BorrowPages {
    ListEndpoint::new(client, services::MY_BORROW_LIST)
}

pub fn borrow_pages(client: ApiClient) -> BorrowPages {
    ListEndpoint::new(client, services::ADMIN_BORROW_LIST)
}

pub fn my_violation_pages(client: ApiClient) -> ViolationPages {
    ListEndpoint::new(client, services::MY_VIOLATION_LIST)
}

pub fn violation_pages(client: ApiClient) -> ViolationPages {
    ListEndpoint::new(client, services::ADMIN_VIOLATION_LIST)
}

pub fn user_pages(client: ApiClient) -> UserPages {
    ListEndpoint::new(client, services::USER_LIST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf::config::ApiConfig;

    #[test]
    fn test_endpoints_point_at_their_lists() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(book_pages(client.clone()).path(), "/api/user/bookList");
        assert_eq!(borrow_pages(client.clone()).path(), "/api/admin/borrowList");
        assert_eq!(
            my_borrow_pages(client.clone()).path(),
            "/api/user/borrowListByUser"
        );
        assert_eq!(user_pages(client).path(), "/api/admin/userList");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        };
        let source = book_pages(ApiClient::new(&config).unwrap());
        let err = source
            .fetch_page(&BookFilters::default(), PageParam::first(8))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
