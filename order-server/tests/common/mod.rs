//! 测试夹具：内存存储 + 两家餐厅的菜单
#![allow(dead_code)]

use std::sync::Arc;

use order_server::db::{MemoryStore, SeedStore, Stores};
use order_server::{Config, ServerState};
use shared::Money;
use shared::models::{
    AddOnOption, MenuItem, MenuItemStatus, Restaurant, Role, SizeOption, User,
};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub const LUIGI: &str = "r-luigi";
pub const SUSHI: &str = "r-sushi";

pub fn cents(c: i64) -> Money {
    Money::from_cents(c)
}

pub fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn add_on(id: &str, name: &str, price: i64) -> AddOnOption {
    AddOnOption {
        id: id.to_string(),
        name: name.to_string(),
        price: cents(price),
    }
}

fn menu_item(id: &str, restaurant_id: &str, name: &str, base: Option<i64>) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: name.to_string(),
        category: String::new(),
        base_price: base.map(cents),
        sizes: vec![],
        add_ons: vec![],
        status: MenuItemStatus::Available,
    }
}

pub fn margherita() -> MenuItem {
    MenuItem {
        category: "pizza".to_string(),
        sizes: vec![
            SizeOption {
                label: "Small".to_string(),
                price: cents(700),
            },
            SizeOption {
                label: "Medium".to_string(),
                price: cents(900),
            },
        ],
        add_ons: vec![
            add_on("extra-cheese", "Extra Cheese", 200),
            add_on("olives", "Olives", 100),
        ],
        ..menu_item("m-margherita", LUIGI, "Margherita", Some(850))
    }
}

pub fn menu() -> Vec<MenuItem> {
    let mut seasonal = menu_item("m-seasonal", LUIGI, "Seasonal Special", Some(400));
    seasonal.status = MenuItemStatus::Unavailable;

    let mut maki = menu_item("m-maki", SUSHI, "Salmon Maki", Some(600));
    maki.add_ons = vec![add_on("wasabi", "Wasabi", 50)];

    vec![
        margherita(),
        menu_item("m-tiramisu", LUIGI, "Tiramisu", Some(500)),
        maki,
        seasonal,
    ]
}

fn user(id: &str, name: &str, role: Role, restaurant_id: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        phone: Some("555-0100".to_string()),
        address: Some("1 Main St".to_string()),
        role,
        restaurant_id: restaurant_id.map(str::to_string),
    }
}

pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());

    for u in [
        user("alice", "Alice", Role::Customer, None),
        user("bob", "Bob", Role::Customer, None),
        user("own-luigi", "Luigi", Role::RestaurantOwner, Some(LUIGI)),
        user("own-sushi", "Sato", Role::RestaurantOwner, Some(SUSHI)),
        user("root", "Admin", Role::Admin, None),
    ] {
        store.upsert_user(&u).await.unwrap();
    }
    for (id, owner, name) in [
        (LUIGI, "own-luigi", "Luigi's"),
        (SUSHI, "own-sushi", "Sushi Bar"),
    ] {
        store
            .upsert_restaurant(&Restaurant {
                id: id.to_string(),
                owner_id: owner.to_string(),
                name: name.to_string(),
                is_open: true,
                delivery_available: true,
            })
            .await
            .unwrap();
    }
    for item in menu() {
        store.upsert_menu_item(&item).await.unwrap();
    }

    store
}

/// Server state over a seeded in-memory store
pub async fn test_state() -> (ServerState, Arc<MemoryStore>) {
    let store = seeded_store().await;
    let state = ServerState::with_stores(
        Config::for_tests(JWT_SECRET),
        Stores::memory(store.clone()),
    );
    (state, store)
}
