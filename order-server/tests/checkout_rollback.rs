//! 结算回滚：订单已写入但购物车清空失败

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::*;
use order_server::db::{CartStore, MemoryStore, OrderStore, StoreError, StoreResult, Versioned};
use order_server::pricing::CardPolicy;
use order_server::{OrderError, OrderService};
use shared::models::{Actor, Cart};
use shared::request::{AddCartItemRequest, CheckoutRequest, ContactInput};

/// Cart store whose next `failures` replaces fail without writing
struct FailingCarts {
    inner: Arc<MemoryStore>,
    failures: AtomicUsize,
    error: fn() -> StoreError,
}

#[async_trait]
impl CartStore for FailingCarts {
    async fn load_cart(&self, user_id: &str) -> StoreResult<Option<Versioned<Cart>>> {
        self.inner.load_cart(user_id).await
    }

    async fn insert_cart(&self, cart: &Cart) -> StoreResult<u64> {
        self.inner.insert_cart(cart).await
    }

    async fn replace_cart(&self, cart: &Cart, expected: u64) -> StoreResult<u64> {
        let failed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err((self.error)());
        }
        self.inner.replace_cart(cart, expected).await
    }
}

fn disk_gone() -> StoreError {
    StoreError::Database("disk gone".to_string())
}

fn stale() -> StoreError {
    StoreError::VersionConflict("cart alice".to_string())
}

/// Alice has one tiramisu in her cart; the order service clears carts through `FailingCarts`
async fn setup(failures: usize, error: fn() -> StoreError) -> (OrderService, Arc<MemoryStore>) {
    let (state, store) = test_state().await;
    state
        .cart_service
        .add_item(
            &Actor::customer("alice"),
            AddCartItemRequest {
                user_id: None,
                menu_item_id: "m-tiramisu".to_string(),
                quantity: 1,
                size: None,
                add_ons: vec![],
            },
        )
        .await
        .unwrap();

    let carts = Arc::new(FailingCarts {
        inner: store.clone(),
        failures: AtomicUsize::new(failures),
        error,
    });
    let service = OrderService::new(
        store.clone(),
        store.clone(),
        carts,
        store.clone(),
        CardPolicy::default(),
    );
    (service, store)
}

fn checkout() -> CheckoutRequest {
    CheckoutRequest {
        user_id: None,
        contact: ContactInput {
            name: Some("Alice".to_string()),
            phone: Some("555-0100".to_string()),
            address: None,
        },
        delivery_type: "takeaway".to_string(),
        payment_method: Some("paypal".to_string()),
        payment_details: None,
    }
}

async fn cart_lines(store: &MemoryStore) -> usize {
    store.load_cart("alice").await.unwrap().unwrap().doc.items.len()
}

#[tokio::test]
async fn test_cart_write_failure_removes_order() {
    let (service, store) = setup(1, disk_gone).await;

    let result = service.checkout(&Actor::customer("alice"), checkout()).await;
    match result {
        Err(OrderError::Storage(StoreError::Database(msg))) => assert_eq!(msg, "disk gone"),
        other => panic!("expected database error, got {:?}", other),
    }

    assert_eq!(store.order_count(), 0);
    assert_eq!(cart_lines(&store).await, 1);
}

#[tokio::test]
async fn test_cart_conflict_retries_checkout() {
    let (service, store) = setup(1, stale).await;

    let order = service
        .checkout(&Actor::customer("alice"), checkout())
        .await
        .unwrap();
    assert_eq!(order.total, cents(500));

    // 第一次写入的订单已撤销，只剩重试成功的那一个
    assert_eq!(store.order_count(), 1);
    assert!(store.load_order(&order.id).await.unwrap().is_some());
    assert_eq!(cart_lines(&store).await, 0);
}

#[tokio::test]
async fn test_persistent_cart_conflict_gives_up() {
    let (service, store) = setup(5, stale).await;

    assert!(matches!(
        service.checkout(&Actor::customer("alice"), checkout()).await,
        Err(OrderError::ConcurrentModification(_))
    ));

    assert_eq!(store.order_count(), 0);
    assert_eq!(cart_lines(&store).await, 1);
}
