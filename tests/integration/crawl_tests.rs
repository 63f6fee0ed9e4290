//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the hymnal site and run the
//! full crawl cycle end-to-end, down to the JSON file on disk.

use hymnal_crawler::config::{Config, CrawlerConfig, OutputConfig};
use hymnal_crawler::crawler::Coordinator;
use hymnal_crawler::output::load_hymns_json;
use hymnal_crawler::HymnRecord;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `categories` × pages 1..=`last_page`
fn create_test_config(
    server: &MockServer,
    categories: &[&str],
    last_page: u32,
    output_path: &Path,
) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}/Hymnal/category/", server.uri()),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            first_page: 1,
            last_page,
            max_concurrent_extractions: 0,
        },
        output: OutputConfig {
            hymns_path: output_path.to_string_lossy().into_owned(),
        },
    }
}

/// Listing page linking to the given hymn slugs on the mock server
fn listing_page(server: &MockServer, slugs: &[&str]) -> String {
    let posts: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<article><h2>{slug}</h2><div class="readMore"><a href="{}/Hymnal/{slug}/">Read More</a></div></article>"#,
                server.uri()
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", posts)
}

/// Detail page with the given paragraphs and category label
fn detail_page(paragraphs: &[&str], category: &str) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect();
    format!(
        r#"<html><body>
        <div class="main-container"><h1>Hymn</h1><table><tbody><tr><td>{}</td></tr></tbody></table></div>
        <div class="post-categories"><table><tr><td><a href="/category/x/">{}</a></td></tr></table></div>
        </body></html>"#,
        body, category
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts one listing page with two well-formed hymns
async fn mount_two_hymn_site(server: &MockServer) {
    mount_page(
        server,
        "/Hymnal/category/001-100/",
        listing_page(server, &["1-praise-to-the-lord", "2-all-creatures-of-our-god"]),
    )
    .await;
    mount_page(
        server,
        "/Hymnal/1-praise-to-the-lord/",
        detail_page(
            &[
                "1\nPraise to the Lord, the Almighty",
                "2\nPraise to the Lord, who o'er all things",
            ],
            "Worship",
        ),
    )
    .await;
    mount_page(
        server,
        "/Hymnal/2-all-creatures-of-our-god/",
        detail_page(
            &[
                "1\nAll creatures of our God and King",
                "Refrain\nO praise Him! Alleluia!",
            ],
            "Worship",
        ),
    )
    .await;
}

fn sorted_by_number(mut records: Vec<HymnRecord>) -> Vec<HymnRecord> {
    records.sort_by(|a, b| a.number.cmp(&b.number));
    records
}

#[tokio::test]
async fn test_full_crawl_single_category() {
    let server = MockServer::start().await;
    mount_two_hymn_site(&server).await;

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("hymns.json");
    let config = create_test_config(&server, &["001-100"], 1, &output_path);

    let coordinator = Coordinator::new(config, CancellationToken::new()).unwrap();
    let outcome = coordinator.run().await.expect("Crawl failed");

    assert!(!outcome.stats.cancelled);
    assert_eq!(outcome.stats.pages_visited, 1);
    assert_eq!(outcome.stats.links_discovered, 2);
    assert_eq!(outcome.stats.hymns_extracted, 2);

    // Every object carries all five keys
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    let objects = raw.as_array().expect("output is a JSON array");
    assert_eq!(objects.len(), 2);
    for object in objects {
        for key in ["refrain", "verses", "category", "number", "title"] {
            assert!(object.get(key).is_some(), "missing key {}", key);
        }
    }

    let hymns = sorted_by_number(load_hymns_json(&output_path).unwrap());
    assert_eq!(hymns[0].number, "1");
    assert_eq!(hymns[0].title, "praise to the lord");
    assert_eq!(hymns[0].refrain, "");
    assert_eq!(
        hymns[0].verses,
        vec![
            "Praise to the Lord, the Almighty",
            "Praise to the Lord, who o'er all things"
        ]
    );
    assert_eq!(hymns[1].number, "2");
    assert_eq!(hymns[1].title, "all creatures of our god");
    assert_eq!(hymns[1].refrain, "O praise Him! Alleluia!");
    assert_eq!(hymns[1].verses, vec!["All creatures of our God and King"]);
    assert_eq!(hymns[1].category, "Worship");
}

#[tokio::test]
async fn test_repeated_runs_produce_same_records() {
    let server = MockServer::start().await;
    mount_two_hymn_site(&server).await;

    let dir = TempDir::new().unwrap();
    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    for output_path in [&first_path, &second_path] {
        let config = create_test_config(&server, &["001-100"], 1, output_path);
        let coordinator = Coordinator::new(config, CancellationToken::new()).unwrap();
        coordinator.run().await.expect("Crawl failed");
    }

    let first = sorted_by_number(load_hymns_json(&first_path).unwrap());
    let second = sorted_by_number(load_hymns_json(&second_path).unwrap());
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failed_hymns_do_not_stop_the_crawl() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/Hymnal/category/101-200/",
        listing_page(
            &server,
            &["101-good-hymn", "102-missing-hymn", "103-broken-hymn"],
        ),
    )
    .await;
    mount_page(
        &server,
        "/Hymnal/101-good-hymn/",
        detail_page(&["Only verse"], "Praise"),
    )
    .await;
    mount_page(
        &server,
        "/Hymnal/103-broken-hymn/",
        "<html><body><p>Under maintenance</p></body></html>".to_string(),
    )
    .await;
    // 102 is not mounted, so the mock server answers 404

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("hymns.json");
    let config = create_test_config(&server, &["101-200"], 1, &output_path);

    let coordinator = Coordinator::new(config, CancellationToken::new()).unwrap();
    let outcome = coordinator.run().await.expect("Crawl failed");

    assert_eq!(outcome.stats.hymns_extracted, 1);
    assert_eq!(outcome.stats.hymns_skipped, 1);
    assert_eq!(outcome.stats.hymns_failed, 1);

    let hymns = load_hymns_json(&output_path).unwrap();
    assert_eq!(hymns.len(), 1);
    assert_eq!(hymns[0].number, "101");
}

#[tokio::test]
async fn test_crawl_walks_categories_and_pages() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/Hymnal/category/001-100/",
        listing_page(&server, &["5-first-page"]),
    )
    .await;
    mount_page(
        &server,
        "/Hymnal/category/001-100/page/2/",
        listing_page(&server, &["15-second-page"]),
    )
    .await;
    mount_page(
        &server,
        "/Hymnal/category/101-200/",
        listing_page(&server, &["105-other-category"]),
    )
    .await;
    for slug in ["5-first-page", "15-second-page", "105-other-category"] {
        mount_page(
            &server,
            &format!("/Hymnal/{}/", slug),
            detail_page(&["Verse"], "Label From Page"),
        )
        .await;
    }

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("hymns.json");
    let config = create_test_config(&server, &["001-100", "101-200"], 2, &output_path);

    let coordinator = Coordinator::new(config, CancellationToken::new()).unwrap();
    let outcome = coordinator.run().await.expect("Crawl failed");

    // 101-200 page 2 does not exist
    assert_eq!(outcome.stats.pages_visited, 4);
    assert_eq!(outcome.stats.pages_failed, 1);

    let hymns = load_hymns_json(&output_path).unwrap();
    let mut numbers: Vec<_> = hymns.iter().map(|h| h.number.as_str()).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, vec!["105", "15", "5"]);
    assert!(hymns.iter().all(|h| h.category == "Label From Page"));
}

#[tokio::test]
async fn test_cancellation_saves_partial_results() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/Hymnal/category/001-100/",
        listing_page(&server, &["1-quick-hymn", "2-quick-hymn", "3-slow-hymn"]),
    )
    .await;
    for slug in ["1-quick-hymn", "2-quick-hymn"] {
        mount_page(
            &server,
            &format!("/Hymnal/{}/", slug),
            detail_page(&["Verse"], "Quick"),
        )
        .await;
    }
    Mock::given(method("GET"))
        .and(path("/Hymnal/3-slow-hymn/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_page(&["Verse"], "Slow"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("hymns.json");
    let config = create_test_config(&server, &["001-100"], 1, &output_path);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let coordinator = Coordinator::new(config, cancel).unwrap();
    let outcome = coordinator
        .run()
        .await
        .expect("Cancelled crawl should still succeed");

    assert!(outcome.stats.cancelled);
    assert!(started.elapsed() < Duration::from_secs(20));

    let hymns = load_hymns_json(&output_path).unwrap();
    assert!(hymns.len() >= 2 && hymns.len() <= 3, "got {} hymns", hymns.len());
    assert!(hymns.iter().any(|h| h.number == "1"));
    assert!(hymns.iter().any(|h| h.number == "2"));
}

#[tokio::test]
async fn test_cancelled_run_still_writes_file() {
    let server = MockServer::start().await;
    mount_two_hymn_site(&server).await;

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("hymns.json");
    std::fs::write(&output_path, "previous run").unwrap();
    let config = create_test_config(&server, &["001-100"], 1, &output_path);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let coordinator = Coordinator::new(config, cancel).unwrap();
    let outcome = coordinator.run().await.expect("Crawl failed");

    assert!(outcome.stats.cancelled);
    assert!(outcome.records.is_empty());
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "[]");
}
