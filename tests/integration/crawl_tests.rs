//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end.

use contacts_parser::config::CrawlConfig;
use contacts_parser::crawler::{run_crawl, Crawler};
use contacts_parser::{ContactsError, CrawlError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Creates a test configuration with short timings
fn create_test_config(max_workers: usize, max_pages: usize) -> CrawlConfig {
    CrawlConfig {
        timeout: Duration::from_secs(5),
        max_retries: 2,
        backoff: Duration::from_millis(10),
        min_delay: Duration::ZERO,
        user_agent: "contacts-parser-test/1.0".to_string(),
        max_workers,
        max_pages,
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>Test</title></head>\n<body>\n{}\n</body></html>",
            body
        ),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_contacts_collected_across_same_origin_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/start",
        &format!(
            r#"<a href="{}/about">About</a>
            <a href="https://other.com/">Elsewhere</a>
            <a href="mailto:info@example.com">Write to us</a>
            <p>Звоните: 8 999 123 45 67</p>"#,
            base_url
        ),
    )
    .await;
    mount_page(&mock_server, "/about", "<p>About us</p>").await;

    let crawler = Crawler::new(create_test_config(4, 100)).unwrap();
    let result = crawler
        .run(&format!("{}/start", base_url))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 2);
    assert_eq!(result.pages_skipped(), 0);
    assert_eq!(result.base_url(), format!("{}/", base_url));
    assert_eq!(result.emails(), ["info@example.com"]);
    assert_eq!(
        result.phones(),
        ["+79991234567", "79991234567", "89991234567"]
    );
    assert!(result.finished_at() >= result.started_at());
}

#[tokio::test]
async fn test_page_budget_is_exact() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=9)
        .map(|i| format!(r#"<a href="/page{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", &links).await;
    for i in 1..=9 {
        mount_page(&mock_server, &format!("/page{}", i), "<p>Leaf</p>").await;
    }

    let crawler = Crawler::new(create_test_config(4, 3)).unwrap();
    let report = crawler
        .crawl(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.result().pages_parsed(), 3);
    assert_eq!(report.pages().len(), 3);
}

#[tokio::test]
async fn test_zero_page_budget_fetches_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("<p>Never fetched</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(2, 0)).unwrap();
    let result = crawler
        .run(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 0);
}

#[tokio::test]
async fn test_permanent_failure_aborts_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(2, 10)).unwrap();
    let result = crawler.run(&format!("{}/", mock_server.uri())).await;

    match result {
        Err(CrawlError::Permanent { url, reason }) => {
            assert_eq!(url, format!("{}/", mock_server.uri()));
            assert!(reason.contains("401"));
        }
        other => panic!("expected Permanent, got {:?}", other),
    }
}

#[tokio::test]
async fn test_permanent_failure_on_linked_page_aborts_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/gone">Gone</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(1, 10)).unwrap();
    let result = crawler.run(&format!("{}/", mock_server.uri())).await;

    assert!(matches!(result, Err(CrawlError::Permanent { .. })));
}

#[tokio::test]
async fn test_no_content_pages_are_skipped_without_retry() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/forbidden">Forbidden</a><a href="/ok">Ok</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "<p>info@example.com</p>").await;

    let crawler = Crawler::new(create_test_config(2, 10)).unwrap();
    let result = crawler
        .run(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 2);
    assert_eq!(result.pages_skipped(), 2);
    assert_eq!(result.emails(), ["info@example.com"]);
}

#[tokio::test]
async fn test_transient_failures_retried_then_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/flaky">Flaky</a>"#).await;

    // max_retries = 2, so three attempts in total
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(2, 10)).unwrap();
    let result = crawler
        .run(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 1);
    assert_eq!(result.pages_skipped(), 1);
}

#[tokio::test]
async fn test_transient_failure_recovers_on_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="tel:+7 (999) 765-43-21">Call</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(1, 10)).unwrap();
    let result = crawler
        .run(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 1);
    assert_eq!(result.pages_skipped(), 0);
    assert!(result.phones().contains(&"89997654321".to_string()));
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Every page links to every other page in several spellings
    let links = format!(
        r#"<a href="/">Home</a>
        <a href="{base}">Home again</a>
        <a href="/a">A</a>
        <a href="/a#section">A section</a>
        <a href="{base}/b">B</a>
        <a href="b">B relative</a>
        <a href="/c">C</a>"#,
        base = base_url
    );

    for page_path in ["/", "/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(html_page(&links))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let crawler = Crawler::new(create_test_config(4, 100)).unwrap();
    let result = crawler
        .run(&format!("{}/", base_url))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 4);
}

#[tokio::test]
async fn test_crawl_stays_within_origin() {
    let mock_server = MockServer::start().await;
    let foreign_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("<p>Foreign</p>"))
        .expect(0)
        .mount(&foreign_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="{}/elsewhere">Foreign</a>
            <a href="/local">Local</a>
            <img src="/static/logo.png">"#,
            foreign_server.uri()
        ),
    )
    .await;
    mount_page(&mock_server, "/local", "<p>Local page</p>").await;
    Mock::given(method("GET"))
        .and(path("/static/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(2, 100)).unwrap();
    let report = crawler
        .crawl(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    let origin = report.result().base_url().to_string();
    assert_eq!(report.pages().len(), 2);
    assert!(report.pages().keys().all(|url| url.starts_with(&origin)));
}

#[tokio::test]
async fn test_relative_links_followed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs/index",
        r#"<a href="team">Team</a><a href="../contacts?lang=ru">Contacts</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs/team", "<p>team@example.com</p>").await;
    mount_page(&mock_server, "/contacts", "<p>+7 812 555-12-34</p>").await;

    let crawler = Crawler::new(create_test_config(2, 100)).unwrap();
    let report = crawler
        .crawl(&format!("{}/docs/index", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    let base = mock_server.uri();
    assert_eq!(report.result().pages_parsed(), 3);
    assert!(report.pages().contains_key(&format!("{}/docs/team", base)));
    assert!(report
        .pages()
        .contains_key(&format!("{}/contacts?lang=ru", base)));
    assert_eq!(report.result().emails(), ["team@example.com"]);
    assert!(report
        .result()
        .phones()
        .contains(&"+78125551234".to_string()));
}

#[tokio::test]
async fn test_stored_pages_carry_their_contacts() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/sales">Sales</a>
        <p>office@example.com</p>"#,
    )
    .await;
    mount_page(&mock_server, "/sales", "<p>sales@example.com</p>").await;

    let crawler = Crawler::new(create_test_config(2, 100)).unwrap();
    let report = crawler
        .crawl(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    let sales = &report.pages()[&format!("{}/sales", mock_server.uri())];
    assert!(sales.contacts.emails.contains("sales@example.com"));
    assert!(!sales.contacts.emails.contains("office@example.com"));
    assert_eq!(sales.page.title.as_deref(), Some("Test"));
    assert_eq!(
        report.result().emails(),
        ["office@example.com", "sales@example.com"]
    );
}

#[tokio::test]
async fn test_run_crawl_rejects_invalid_seed() {
    let result = run_crawl(create_test_config(2, 10), "not a url").await;
    assert!(matches!(
        result,
        Err(ContactsError::Crawl(CrawlError::InvalidUrl(_)))
    ));
}

#[tokio::test]
async fn test_crawler_is_reusable() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>hello@example.com</p>").await;

    let crawler = Crawler::new(create_test_config(2, 10)).unwrap();
    let seed = format!("{}/", mock_server.uri());

    let first = crawler.run(&seed).await.unwrap();
    let second = crawler.run(&seed).await.unwrap();

    assert_eq!(first.pages_parsed(), 1);
    assert_eq!(second.pages_parsed(), 1);
    assert_eq!(first.emails(), second.emails());
}

#[tokio::test]
async fn test_relative_links_resolve_against_requested_url() {
    let mock_server = MockServer::start().await;
    let mirror = MockServer::start().await;
    let location = format!("{}/start", mirror.uri());

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", location.as_str()))
        .mount(&mock_server)
        .await;
    mount_page(&mirror, "/start", r#"<a href="/about">About</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("<p>Not this one</p>"))
        .expect(0)
        .mount(&mirror)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("<p>about@example.com</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(2, 100)).unwrap();
    let report = crawler
        .crawl(&format!("{}/start", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(report.result().pages_parsed(), 2);
    assert!(report
        .pages()
        .contains_key(&format!("{}/about", mock_server.uri())));
    assert_eq!(report.result().emails(), ["about@example.com"]);
}

const SLOW_PAGE_DELAY: Duration = Duration::from_millis(300);

/// Serves the same slow page everywhere and records when each request arrived
struct SlowPages {
    arrivals: Arc<Mutex<Vec<Instant>>>,
}

impl Respond for SlowPages {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());

        let links: String = (1..=6)
            .map(|i| format!("<a href=\"/p{}\">Page {}</a>\n", i, i))
            .collect();
        html_page(&links).set_delay(SLOW_PAGE_DELAY)
    }
}

/// Largest number of requests whose delayed responses were pending at once
fn peak_in_flight(arrivals: &[Instant], busy_for: Duration) -> usize {
    arrivals
        .iter()
        .map(|&at| {
            arrivals
                .iter()
                .filter(|&&other| other <= at && at < other + busy_for)
                .count()
        })
        .max()
        .unwrap_or(0)
}

#[tokio::test]
async fn test_worker_pool_bounds_concurrent_fetches() {
    let mock_server = MockServer::start().await;
    let arrivals = Arc::new(Mutex::new(Vec::new()));

    Mock::given(method("GET"))
        .respond_with(SlowPages {
            arrivals: arrivals.clone(),
        })
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(2, 100)).unwrap();
    let result = crawler
        .run(&format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");

    assert_eq!(result.pages_parsed(), 7);

    let arrivals = arrivals.lock().unwrap().clone();
    assert_eq!(arrivals.len(), 7);

    // A request holds its worker for the whole delay; allow for timer slack
    let busy_for = SLOW_PAGE_DELAY - Duration::from_millis(50);
    assert_eq!(peak_in_flight(&arrivals, busy_for), 2);
}
