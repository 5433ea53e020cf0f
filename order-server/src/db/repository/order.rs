//! Order Repository

use super::BaseRepository;
use crate::db::store::{OrderFilter, OrderStore, StoreResult, Versioned, sort_newest_first};
use async_trait::async_trait;
use serde::Deserialize;
use shared::models::Order;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

// `order` is a SurrealQL keyword
const TABLE: &str = "orders";

#[derive(Deserialize)]
struct OrderRow {
    doc: Order,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn load_order(&self, id: &str) -> StoreResult<Option<Versioned<Order>>> {
        self.base.load(TABLE, id).await
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<u64> {
        self.base.insert(TABLE, &order.id, order).await
    }

    async fn replace_order(&self, order: &Order, expected: u64) -> StoreResult<u64> {
        self.base.replace(TABLE, &order.id, order, expected).await
    }

    async fn delete_order(&self, id: &str) -> StoreResult<bool> {
        self.base.delete(TABLE, id).await
    }

    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        // ORDER BY 字段必须出现在 SELECT 中
        let (sql, param) = match filter {
            OrderFilter::All => (
                "SELECT doc, doc.created_at AS created_at FROM type::table($tb) \
                 ORDER BY created_at DESC",
                None,
            ),
            OrderFilter::Customer(user_id) => (
                "SELECT doc, doc.created_at AS created_at FROM type::table($tb) \
                 WHERE doc.user_id = $param ORDER BY created_at DESC",
                Some(user_id.clone()),
            ),
            OrderFilter::Restaurant(restaurant_id) => (
                "SELECT doc, doc.created_at AS created_at FROM type::table($tb) \
                 WHERE doc.restaurant_ids CONTAINS $param ORDER BY created_at DESC",
                Some(restaurant_id.clone()),
            ),
        };

        let mut query = self.base.db().query(sql).bind(("tb", TABLE));
        if let Some(param) = param {
            query = query.bind(("param", param));
        }
        let rows: Vec<serde_json::Value> = query.await?.take(0)?;

        let mut orders = rows
            .into_iter()
            .map(|row| serde_json::from_value::<OrderRow>(row).map(|r| r.doc))
            .collect::<Result<Vec<_>, _>>()?;

        // filter again in Rust: item-level restaurant matches and id tie-break
        orders.retain(|o| filter.matches(o));
        sort_newest_first(&mut orders);
        Ok(orders)
    }
}
