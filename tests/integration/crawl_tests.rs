//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use page_sift::config::Config;
use page_sift::crawler::{crawl, Coordinator, HttpFetcher, SearchCriterion};
use page_sift::url::{CrawlScope, ScopeMode};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><head><title>t</title></head><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

fn fetcher() -> HttpFetcher {
    let config = Config::default();
    HttpFetcher::new(&config.http, &config.user_agent).expect("Failed to build HTTP client")
}

fn scope_for(server: &MockServer, route: &str) -> CrawlScope {
    CrawlScope::new(&format!("{}{}", server.uri(), route), ScopeMode::HostPrefix)
        .expect("Failed to build scope")
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<div class="highlight">Home</div>
               <a href="{}/page1">Page 1</a>
               <a href="/page2">Page 2</a>
               <a href="https://elsewhere.invalid/x">Elsewhere</a>"#,
            base_url
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<p>Content 1</p><a href="/">Home</a><a href="page2">Again</a>"#,
    )
    .await;
    mount_page(&mock_server, "/page2", r#"<p class="highlight">Content 2</p>"#).await;

    let result = Coordinator::new(
        scope_for(&mock_server, "/"),
        SearchCriterion::ByClass("highlight".to_string()),
        fetcher(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(
        result.matched,
        vec![format!("{}/", base_url), format!("{}/page2", base_url)]
    );
    assert_eq!(result.unmatched, vec![format!("{}/page1", base_url)]);
    assert_eq!(result.failed, 0);
    assert_eq!(result.total_visited, 3);
}

#[tokio::test]
async fn test_http_errors_are_counted_not_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/boom">Boom</a><a href="/ok">OK</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "<p>Contact us</p>").await;

    let result = Coordinator::new(
        scope_for(&mock_server, "/"),
        SearchCriterion::ByString("Contact us".to_string()),
        fetcher(),
    )
    .run()
    .await
    .expect("Crawl failed");

    let base_url = mock_server.uri();
    assert_eq!(result.matched, vec![format!("{}/ok", base_url)]);
    assert_eq!(result.unmatched, vec![format!("{}/", base_url)]);
    assert_eq!(result.failed, 2);
    assert_eq!(result.failures[0].error, "HTTP status 404");
    assert_eq!(result.failures[1].error, "HTTP status 500");
    assert_eq!(result.total_visited, 4);
}

#[tokio::test]
async fn test_other_host_never_fetched() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("<p>outside</p>"))
        .expect(0)
        .mount(&other_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        &format!(r#"<a href="{}/x">Other</a>"#, other_server.uri()),
    )
    .await;

    let result = Coordinator::new(
        scope_for(&mock_server, "/"),
        SearchCriterion::ByClass("x".to_string()),
        fetcher(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(result.total_visited, 1);
}

#[tokio::test]
async fn test_subdirectory_scope() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs/",
        r#"<a href="intro">Intro</a><a href="/blog/post">Blog</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs/intro", r#"<a href="../">Up</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/blog/post"))
        .respond_with(html("<p>blog</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = Coordinator::new(
        scope_for(&mock_server, "/docs/"),
        SearchCriterion::ByClass("x".to_string()),
        fetcher(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert_eq!(result.total_visited, 2);
}

#[tokio::test]
async fn test_concurrent_crawl_visits_each_page_once() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="/p{}">P{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", &links).await;
    for i in 1..=6 {
        let body = if i % 2 == 0 {
            format!(r#"<span class="even">{}</span><a href="/">Home</a>"#, i)
        } else {
            format!(r#"<span>{}</span><a href="/p{}">Next</a>"#, i, i + 1)
        };
        mount_page(&mock_server, &format!("/p{}", i), &body).await;
    }

    let result = Coordinator::new(
        scope_for(&mock_server, "/"),
        SearchCriterion::ByClass("even".to_string()),
        fetcher(),
    )
    .with_concurrency(4)
    .run()
    .await
    .expect("Crawl failed");

    let base_url = mock_server.uri();
    assert_eq!(result.total_visited, 7);
    assert_eq!(
        result.matched,
        vec![
            format!("{}/p2", base_url),
            format!("{}/p4", base_url),
            format!("{}/p6", base_url),
        ]
    );
}

#[tokio::test]
async fn test_crawl_entry_point_uses_config() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<p>Contact us today</p><a href="/a">A</a>"#).await;
    mount_page(&mock_server, "/a", "<p>Nothing here</p>").await;

    let mut config = Config::default();
    config.crawler.concurrency = 2;

    let result = crawl(
        &config,
        scope_for(&mock_server, "/"),
        SearchCriterion::ByString("Contact us".to_string()),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.unmatched.len(), 1);
}

#[tokio::test]
async fn test_redirect_to_other_host_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(r#"<p class="highlight">outside</p>"#))
        .expect(0)
        .mount(&other_server)
        .await;

    mount_page(&mock_server, "/", r#"<a href="/go">Go</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/go"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/landing", other_server.uri()).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = Coordinator::new(
        scope_for(&mock_server, "/"),
        SearchCriterion::ByClass("highlight".to_string()),
        fetcher(),
    )
    .run()
    .await
    .expect("Crawl failed");

    assert!(result.matched.is_empty());
    assert_eq!(result.failed, 1);
    assert_eq!(result.failures[0].url, format!("{}/go", mock_server.uri()));
    assert!(result.failures[0].error.starts_with("redirect left scope"));
}

#[tokio::test]
async fn test_in_scope_redirect_followed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/old">Old</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/docs/"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/docs/",
        r#"<p class="highlight">moved</p><a href="intro">Intro</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs/intro", "<p>intro</p>").await;

    let result = Coordinator::new(
        scope_for(&mock_server, "/"),
        SearchCriterion::ByClass("highlight".to_string()),
        fetcher(),
    )
    .run()
    .await
    .expect("Crawl failed");

    let base_url = mock_server.uri();
    assert_eq!(result.matched, vec![format!("{}/old", base_url)]);
    assert_eq!(
        result.unmatched,
        vec![format!("{}/", base_url), format!("{}/docs/intro", base_url)]
    );
}
