use shelf::{Book, Page, PageParam};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{Behavior, BehaviorEvent, FlatPage, ListQuery};

pub const RECOMMENDATIONS: &str = "/api/user/recommendations";
pub const HOT_BOOKS: &str = "/api/user/hotBookList";
pub const RECORD_BEHAVIOR: &str = "/api/user/recordBehavior";

#[derive(serde::Serialize)]
struct NoFilters {}

impl ApiClient {
    /// Personalised picks for the signed-in reader.
    pub async fn recommendations(&self, page: PageParam) -> Result<Page<Book>, ApiError> {
        self.post_json(RECOMMENDATIONS, &FlatPage::from(page)).await
    }

    /// Most borrowed and viewed books, with their heat score.
    pub async fn hot_books(&self, page: PageParam) -> Result<Page<Book>, ApiError> {
        let body = ListQuery {
            filters: &NoFilters {},
            page_param: page,
        };
        self.post_json(HOT_BOOKS, &body).await
    }

    /// Feed one interaction to the recommender.
    pub async fn record_behavior(&self, book_id: &str, behavior: Behavior) -> Result<(), ApiError> {
        self.ack_json(
            RECORD_BEHAVIOR,
            &BehaviorEvent {
                book_id,
                behavior_type: behavior,
            },
        )
        .await?;
        Ok(())
    }

    /// Best-effort variant for call sites that must not fail on analytics.
    pub async fn record_behavior_quietly(&self, book_id: &str, behavior: Behavior) {
        if let Err(e) = self.record_behavior(book_id, behavior).await {
            tracing::debug!("Behavior {behavior:?} for book {book_id} not recorded: {e}");
        }
    }
}
