use bazaar::config::BazaarConfig;
use bazaar::item_actor::ItemError;
use bazaar::lifecycle::MarketSystem;
use bazaar::model::{Caller, Item, ItemDraft, TagCount, UserCreate};
use bazaar::query::{ItemFilter, ItemQuery, QueryParams};
use bazaar_actor::query::Record;

struct Market {
    system: MarketSystem,
    alice: Caller,
    bob: Caller,
}

async fn signed_in(system: &MarketSystem, username: &str) -> Caller {
    system
        .user_client
        .register(UserCreate {
            username: username.to_string(),
            password: format!("{username}-pw"),
        })
        .await
        .expect("Failed to register");
    let token = system
        .session_client
        .login(username, &format!("{username}-pw"))
        .await
        .expect("Failed to log in");
    system
        .session_client
        .authenticate(&token)
        .await
        .expect("Failed to authenticate")
}

async fn market() -> Market {
    let system = MarketSystem::new(&BazaarConfig::default());
    let alice = signed_in(&system, "alice").await;
    let bob = signed_in(&system, "bob").await;
    Market { system, alice, bob }
}

impl Market {
    async fn list(&self, caller: &Caller, description: &str, price: Option<f64>, tags: &[&str]) -> Item {
        self.system
            .item_client
            .create_item(
                caller,
                ItemDraft {
                    price,
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                    description: description.to_string(),
                },
            )
            .await
            .expect("Failed to create item")
    }

    async fn query(&self, pairs: &[(&str, &str)]) -> Vec<Record> {
        let params: QueryParams = pairs.iter().copied().collect();
        self.system
            .item_client
            .list_items(&self.alice, &params)
            .await
            .expect("Query failed")
    }

    async fn count(&self, pairs: &[(&str, &str)]) -> usize {
        let params: QueryParams = pairs.iter().copied().collect();
        self.system
            .item_client
            .count_items(&self.alice, &params)
            .await
            .expect("Count failed")
    }

    async fn all_items(&self) -> Vec<Item> {
        self.system
            .item_client
            .find_items(&ItemQuery::default())
            .await
            .unwrap()
    }
}

fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["id"].as_str().expect("id is a string").to_string())
        .collect()
}

fn descriptions(records: &[Record]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r["description"].as_str().unwrap())
        .collect()
}

/// Mirrors the listing scenario: two users, one item each.
async fn two_listings() -> (Market, Item, Item) {
    let market = market().await;
    let first = market
        .list(&market.bob, "test1's item description", Some(1.0), &["tag1", "tag2"])
        .await;
    let second = market
        .list(&market.alice, "test2's item description", Some(2.0), &["tag2", "tag3"])
        .await;
    (market, first, second)
}

#[tokio::test]
async fn test_filters_by_owner_price_tags_and_text() {
    let (market, first, second) = two_listings().await;
    let first_id = first.id.to_string();
    let second_id = second.id.to_string();
    let owner = first.owner.to_string();

    assert_eq!(ids(&market.query(&[("owner", &owner)]).await), vec![first_id.clone()]);
    assert_eq!(ids(&market.query(&[("price", "1")]).await), vec![first_id.clone()]);
    assert_eq!(ids(&market.query(&[("priceMin", "2")]).await), vec![second_id.clone()]);
    assert_eq!(ids(&market.query(&[("priceMax", "1")]).await), vec![first_id.clone()]);

    assert_eq!(ids(&market.query(&[("tags", "tag1")]).await), vec![first_id.clone()]);
    assert_eq!(market.query(&[("tags", "tag2")]).await.len(), 2);
    assert_eq!(market.query(&[("tags", "tag1,tag3")]).await.len(), 2);

    assert_eq!(ids(&market.query(&[("text", "TEST1'S")]).await), vec![first_id.clone()]);
    assert_eq!(market.query(&[("text", "item")]).await.len(), 2);

    // AND across parameters, OR within tags
    assert_eq!(
        ids(&market.query(&[("tags", "tag1,tag3"), ("priceMin", "1.5")]).await),
        vec![second_id]
    );
    assert!(market.query(&[("tags", "tag1"), ("text", "test2")]).await.is_empty());
}

#[tokio::test]
async fn test_selection_matches_every_predicate() {
    let market = market().await;
    let fixtures: [(&str, Option<f64>, &[&str]); 6] = [
        ("oak desk", Some(120.0), &["furniture", "wood"]),
        ("desk lamp", Some(15.0), &["lighting"]),
        ("pine shelf", None, &["furniture", "wood"]),
        ("floor lamp", Some(40.0), &["lighting", "furniture"]),
        ("walnut desk", Some(300.0), &["wood"]),
        ("lamp shade", Some(15.0), &[]),
    ];
    for (i, (description, price, tags)) in fixtures.iter().enumerate() {
        let owner = if i % 2 == 0 { &market.alice } else { &market.bob };
        market.list(owner, description, *price, tags).await;
    }
    let items = market.all_items().await;
    let alice = market.alice.user_id.to_string();

    let cases: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![("owner", alice.as_str())],
        vec![("priceMin", "15"), ("priceMax", "120")],
        vec![("tags", "wood,lighting"), ("text", "DESK")],
        vec![("owner", alice.as_str()), ("tags", "furniture")],
        vec![("price", "15"), ("text", "lamp")],
        vec![("priceMax", "1000"), ("tags", "wood")],
    ];

    for pairs in cases {
        let params: QueryParams = pairs.iter().copied().collect();
        let filter = ItemFilter::parse(&params).unwrap().to_filter();
        let expected: Vec<String> = items
            .iter()
            .filter(|item| filter.matches(*item))
            .map(|item| item.id.to_string())
            .collect();

        let found = market.query(&pairs).await;
        assert_eq!(ids(&found), expected, "{pairs:?}");
        assert_eq!(market.count(&pairs).await, expected.len(), "{pairs:?}");

        // idempotent
        assert_eq!(market.query(&pairs).await, found);
    }
}

#[tokio::test]
async fn test_sort_is_stable_in_both_directions() {
    let market = market().await;
    market.list(&market.alice, "a", Some(2.0), &[]).await;
    market.list(&market.alice, "b", Some(1.0), &[]).await;
    market.list(&market.alice, "c", Some(2.0), &[]).await;
    market.list(&market.alice, "d", None, &[]).await;

    let asc = market.query(&[("orderBy", "price"), ("order", "asc")]).await;
    assert_eq!(descriptions(&asc), vec!["d", "b", "a", "c"]);

    let desc = market.query(&[("orderBy", "price"), ("order", "desc")]).await;
    assert_eq!(descriptions(&desc), vec!["a", "c", "b", "d"]);

    // order defaults to asc; without orderBy the natural order is kept
    let default_order = market.query(&[("orderBy", "price")]).await;
    assert_eq!(descriptions(&default_order), vec!["d", "b", "a", "c"]);
    let natural = market.query(&[("order", "desc")]).await;
    assert_eq!(descriptions(&natural), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_pagination_composes_with_sort_and_projection() {
    let (market, _first, second) = two_listings().await;

    let page = market
        .query(&[
            ("orderBy", "price"),
            ("order", "asc"),
            ("offset", "1"),
            ("limit", "1"),
            ("fields", "description,price"),
        ])
        .await;
    assert_eq!(ids(&page), vec![second.id.to_string()]);
    let mut keys: Vec<_> = page[0].keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["description", "id", "price"]);

    // projection never changes the selection
    let projected = market.query(&[("tags", "tag2"), ("fields", "owner")]).await;
    let full = market.query(&[("tags", "tag2")]).await;
    assert_eq!(ids(&projected), ids(&full));
    assert_eq!(full[0].len(), 5);

    // past the end is empty, not an error
    assert!(market.query(&[("offset", "10")]).await.is_empty());
    assert_eq!(market.query(&[("limit", "0")]).await.len(), 2);
}

#[tokio::test]
async fn test_items_without_price_never_match_numeric_filters() {
    let market = market().await;
    market.list(&market.alice, "free to a good home", None, &["free"]).await;
    market.list(&market.alice, "bargain", Some(0.0), &[]).await;

    assert_eq!(market.count(&[("priceMax", "100")]).await, 1);
    assert_eq!(market.count(&[("priceMin", "-100")]).await, 1);
    assert_eq!(market.count(&[("price", "0")]).await, 1);
    assert_eq!(market.count(&[]).await, 2);
}

#[tokio::test]
async fn test_invalid_parameters_fail_listing_but_count_ignores_paging() {
    let (market, _, _) = two_listings().await;
    let params = QueryParams::new().with("limit", "lots").with("tags", "tag2");

    match market.system.item_client.list_items(&market.alice, &params).await {
        Err(ItemError::InvalidParameter(err)) => assert_eq!(err.name, "limit"),
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
    assert_eq!(
        market
            .system
            .item_client
            .count_items(&market.alice, &params)
            .await,
        Ok(2)
    );

    let bad_filter = QueryParams::new().with("priceMin", "two");
    assert!(matches!(
        market.system.item_client.count_items(&market.alice, &bad_filter).await,
        Err(ItemError::InvalidParameter(_))
    ));
}

#[tokio::test]
async fn test_tag_frequency_orders_by_count_then_name() {
    let market = market().await;
    market.list(&market.alice, "test1", None, &["tag1", "tag3"]).await;
    market.list(&market.alice, "test2", None, &["tag2", "tag3"]).await;
    market.list(&market.bob, "test3", None, &["tag2", "tag3", "tag3"]).await;
    market.list(&market.bob, "test4", None, &["tag0"]).await;

    let tags = market
        .system
        .item_client
        .tag_frequency(&market.alice)
        .await
        .unwrap();
    let expected = [("tag3", 3), ("tag2", 2), ("tag0", 1), ("tag1", 1)];
    assert_eq!(
        tags,
        expected
            .iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count: *count
            })
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_deleting_keeps_natural_order_and_own_items() {
    let market = market().await;
    let a = market.list(&market.alice, "a", None, &[]).await;
    let b = market.list(&market.bob, "b", None, &[]).await;
    let c = market.list(&market.alice, "c", None, &[]).await;
    market.list(&market.bob, "d", None, &[]).await;

    market
        .system
        .item_client
        .delete_item(&market.bob, b.id)
        .await
        .unwrap();
    market.list(&market.alice, "e", None, &[]).await;

    assert_eq!(descriptions(&market.query(&[]).await), vec!["a", "c", "d", "e"]);

    let own = market
        .system
        .item_client
        .list_own_items(&market.alice, &QueryParams::new().with("owner", &b.owner.to_string()))
        .await
        .unwrap();
    assert_eq!(
        ids(&own),
        vec![a.id.to_string(), c.id.to_string(), "item_5".to_string()]
    );
}

#[tokio::test]
async fn test_concurrent_queries_do_not_interfere() {
    let market = market().await;
    for i in 0..20 {
        let tag = if i % 3 == 0 { "three" } else { "other" };
        market
            .list(&market.alice, &format!("item {i}"), Some(f64::from(i)), &[tag])
            .await;
    }

    let mut handles = vec![];
    for _ in 0..8 {
        let items = market.system.item_client.clone();
        let caller = market.alice;
        handles.push(tokio::spawn(async move {
            let params = QueryParams::new()
                .with("tags", "three")
                .with("orderBy", "price")
                .with("order", "desc");
            items.list_items(&caller, &params).await.unwrap()
        }));
    }

    let first = handles.remove(0).await.unwrap();
    assert_eq!(first.len(), 7);
    assert_eq!(first[0]["price"], 18.0);
    for handle in handles {
        assert_eq!(handle.await.unwrap(), first);
    }

    market.system.shutdown().await.unwrap();
}
