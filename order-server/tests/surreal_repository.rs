//! SurrealDB (RocksDB) 仓库：版本控制写入、列表过滤与排序

mod common;

use common::*;
use order_server::core::ServerState;
use order_server::db::repository::{
    CartRepository, DirectoryRepository, MenuItemRepository, OrderRepository,
};
use order_server::db::{
    CartStore, CatalogLookup, DbService, Directory, OrderFilter, OrderStore, SeedStore, StoreError,
    Stores,
};
use order_server::Config;
use shared::models::{
    Actor, Cart, ContactInfo, DeliveryType, Order, OrderAction, OrderItem, OrderStatus,
    PaymentMethod, PaymentStatus, Role,
};
use shared::request::AddCartItemRequest;
use tempfile::TempDir;

async fn open() -> (TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("db")).await.unwrap();
    (tmp, db)
}

fn order(id: &str, user_id: &str, restaurant_id: &str, created_at: i64) -> Order {
    Order {
        id: id.to_string(),
        user_id: Some(user_id.to_string()),
        restaurant_ids: vec![restaurant_id.to_string()],
        contact: ContactInfo {
            name: user_id.to_string(),
            phone: "555-0100".to_string(),
            address: None,
        },
        items: vec![OrderItem {
            id: format!("{}-1", id),
            menu_item_id: "m-tiramisu".to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: "Tiramisu".to_string(),
            size: None,
            unit_price: cents(500),
            add_ons: vec![],
            quantity: 1,
            line_total: cents(500),
            status: OrderStatus::Pending,
        }],
        total: cents(500),
        delivery_type: DeliveryType::Takeaway,
        payment_method: PaymentMethod::Paypal,
        payment_details: None,
        payment_status: PaymentStatus::Pending,
        status: OrderStatus::Pending,
        actions: vec![OrderAction {
            status: OrderStatus::Pending,
            updated_by: user_id.to_string(),
            role: Role::Customer,
            timestamp: created_at,
        }],
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn test_cart_versioned_writes() {
    let (_tmp, db) = open().await;
    let carts = CartRepository::new(db.db.clone());

    assert!(carts.load_cart("alice").await.unwrap().is_none());

    let mut cart = Cart::new("alice");
    assert_eq!(carts.insert_cart(&cart).await.unwrap(), 1);
    assert!(matches!(
        carts.insert_cart(&cart).await,
        Err(StoreError::Duplicate(_))
    ));

    cart.payment_method = Some(PaymentMethod::Googlepay);
    assert_eq!(carts.replace_cart(&cart, 1).await.unwrap(), 2);

    // 过期版本写入失败，且不改变文档
    cart.payment_method = Some(PaymentMethod::Paypal);
    assert!(matches!(
        carts.replace_cart(&cart, 1).await,
        Err(StoreError::VersionConflict(_))
    ));

    let stored = carts.load_cart("alice").await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.doc.payment_method, Some(PaymentMethod::Googlepay));

    assert!(matches!(
        carts.replace_cart(&Cart::new("ghost"), 1).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_order_listing_filters_and_sorts() {
    let (_tmp, db) = open().await;
    let orders = OrderRepository::new(db.db.clone());

    orders.insert_order(&order("o-1", "alice", LUIGI, 1_000)).await.unwrap();
    orders.insert_order(&order("o-2", "bob", SUSHI, 3_000)).await.unwrap();
    orders.insert_order(&order("o-3", "alice", SUSHI, 2_000)).await.unwrap();

    let ids = |list: Vec<Order>| list.into_iter().map(|o| o.id).collect::<Vec<_>>();

    assert_eq!(
        ids(orders.list_orders(&OrderFilter::All).await.unwrap()),
        vec!["o-2", "o-3", "o-1"]
    );
    assert_eq!(
        ids(orders
            .list_orders(&OrderFilter::Customer("alice".into()))
            .await
            .unwrap()),
        vec!["o-3", "o-1"]
    );
    assert_eq!(
        ids(orders
            .list_orders(&OrderFilter::Restaurant(SUSHI.into()))
            .await
            .unwrap()),
        vec!["o-2", "o-3"]
    );
    assert!(
        orders
            .list_orders(&OrderFilter::Customer("nobody".into()))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_order_roundtrip_replace_and_delete() {
    let (_tmp, db) = open().await;
    let orders = OrderRepository::new(db.db.clone());
    let mut o = order("o-1", "alice", LUIGI, 1_000);

    orders.insert_order(&o).await.unwrap();
    assert!(matches!(
        orders.insert_order(&o).await,
        Err(StoreError::Duplicate(_))
    ));

    let stored = orders.load_order("o-1").await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.doc, o);

    o.status = OrderStatus::Confirmed;
    assert_eq!(orders.replace_order(&o, 1).await.unwrap(), 2);
    assert!(matches!(
        orders.replace_order(&o, 1).await,
        Err(StoreError::VersionConflict(_))
    ));
    assert_eq!(
        orders.load_order("o-1").await.unwrap().unwrap().doc.status,
        OrderStatus::Confirmed
    );

    assert!(orders.delete_order("o-1").await.unwrap());
    assert!(!orders.delete_order("o-1").await.unwrap());
    assert!(orders.load_order("o-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_catalog_and_directory_upserts() {
    let (_tmp, db) = open().await;
    let catalog = MenuItemRepository::new(db.db.clone());
    let directory = DirectoryRepository::new(db.db.clone());

    let mut pizza = margherita();
    catalog.upsert(&pizza).await.unwrap();
    pizza.base_price = Some(cents(950));
    catalog.upsert(&pizza).await.unwrap();

    let loaded = catalog.menu_item("m-margherita").await.unwrap().unwrap();
    assert_eq!(loaded, pizza);
    assert!(catalog.menu_item("m-nothing").await.unwrap().is_none());

    assert!(catalog.delete("m-margherita").await.unwrap());
    assert!(catalog.menu_item("m-margherita").await.unwrap().is_none());

    let seeded = seeded_store().await;
    let alice = seeded.user("alice").await.unwrap().unwrap();
    directory.upsert_user(&alice).await.unwrap();
    assert_eq!(directory.user("alice").await.unwrap(), Some(alice));

    let luigi = seeded.restaurant(LUIGI).await.unwrap().unwrap();
    directory.upsert_restaurant(&luigi).await.unwrap();
    assert_eq!(directory.restaurant(LUIGI).await.unwrap(), Some(luigi));
    assert!(directory.restaurant("r-none").await.unwrap().is_none());
}

#[tokio::test]
async fn test_services_over_surreal_backend() {
    let (_tmp, db) = open().await;
    let stores = Stores::surreal(db.db.clone());
    for item in menu() {
        stores.seed.upsert_menu_item(&item).await.unwrap();
    }

    let state = ServerState::with_stores(Config::for_tests(JWT_SECRET), stores.clone());
    let alice = Actor::customer("alice");
    for _ in 0..2 {
        state
            .cart_service
            .add_item(
                &alice,
                AddCartItemRequest {
                    user_id: None,
                    menu_item_id: "m-maki".to_string(),
                    quantity: 1,
                    size: None,
                    add_ons: strings(&["wasabi"]),
                },
            )
            .await
            .unwrap();
    }

    let stored = stores.carts.load_cart("alice").await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.doc.items.len(), 1);
    assert_eq!(stored.doc.items[0].quantity, 2);
    assert_eq!(stored.doc.total, cents(1300));
}
