//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the listing front-end and test
//! the full fetch, extract and match cycle end-to-end.

use listing_grep::config::{Config, HttpConfig, ListingConfig, SearchRequest};
use listing_grep::crawl;
use listing_grep::output::{CollectingSink, ConsoleSink};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, root: &str, pattern: &str) -> Config {
    Config {
        listing: ListingConfig {
            base_url: base_url.to_string(),
        },
        search: SearchRequest::new(root, "serial-1.log", pattern),
        http: HttpConfig::default(),
    }
}

/// Renders a listing page the way the storage front-end does
fn listing_page(links: &[&str]) -> String {
    let rows: Vec<String> = links
        .iter()
        .map(|link| format!(r#"<tr><td><a href="{}">{}</a></td></tr>"#, link, link))
        .collect();
    format!(
        r#"<html><head><title>listing</title></head><body>
        <a href="/gcs/">gcs</a> / <a href="/gcs/logs/?sort=size">sort by size</a>
        <table>{}</table>
        </body></html>"#,
        rows.join("\n")
    )
}

async fn mount_listing(server: &MockServer, at: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(links))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, at: &str, text: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(text)
                .insert_header("content-type", "text/plain"),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a small job-log tree with matches at two depths
async fn mount_log_tree(server: &MockServer) {
    mount_listing(
        server,
        "/gcs/logs/",
        &[
            "/gcs/logs/job-a/",
            "/gcs/logs/serial-1.log?generation=2",
            "/gcs/logs/job-b/",
        ],
    )
    .await;

    mount_listing(
        server,
        "/gcs/logs/job-a/",
        &[
            "/gcs/logs/job-a/101/",
            "/gcs/logs/job-a/102/",
            "/gcs/logs/job-a/build-log.txt",
        ],
    )
    .await;
    mount_listing(
        server,
        "/gcs/logs/job-a/101/",
        &["/gcs/logs/job-a/101/serial-1.log", "/gcs/logs/job-a/101/serial-2.log"],
    )
    .await;
    mount_file(
        server,
        "/gcs/logs/job-a/101/serial-1.log",
        "[    0.000000] Linux version 5.4\n[  131.2] watchdog: BUG: soft lockup - CPU#1 stuck for 23s!\n",
    )
    .await;
    // Other files in a listing pass the sub-directory heuristic and get
    // fetched as listings
    mount_file(server, "/gcs/logs/job-a/101/serial-2.log", "second console\n").await;
    mount_file(server, "/gcs/logs/job-a/build-log.txt", "PASS\n").await;
    mount_listing(
        server,
        "/gcs/logs/job-a/102/",
        &["/gcs/logs/job-a/102/serial-1.log"],
    )
    .await;
    mount_file(
        server,
        "/gcs/logs/job-a/102/serial-1.log",
        "[    0.000000] Linux version 5.4\nclean shutdown\n",
    )
    .await;

    mount_listing(
        server,
        "/gcs/logs/job-b/",
        &["/gcs/logs/job-b/serial-1.log", "/gcs/logs/job-b/7/"],
    )
    .await;
    mount_file(
        server,
        "/gcs/logs/job-b/serial-1.log",
        "watchdog: BUG: soft lockup - CPU#0 stuck for 22s!\n",
    )
    .await;
    mount_listing(server, "/gcs/logs/job-b/7/", &[]).await;
}

#[tokio::test]
async fn test_full_crawl_finds_matches_in_order() {
    let mock_server = MockServer::start().await;
    mount_log_tree(&mock_server).await;

    let config = create_test_config(
        &mock_server.uri(),
        "/gcs/logs/",
        "watchdog: BUG: soft lockup - CPU#",
    );
    let mut sink = CollectingSink::new();

    let report = crawl(&config, &mut sink).await.expect("Crawl failed");

    assert_eq!(
        sink.locations(),
        vec!["/gcs/logs/job-a/101/serial-1.log", "/gcs/logs/job-b/serial-1.log"]
    );
    assert!(sink.errors.is_empty(), "unexpected errors: {:?}", sink.errors);
    assert_eq!(report.directories_visited, 8);
    assert_eq!(report.files_inspected, 3);
    assert_eq!(report.matches, 2);
    assert_eq!(
        sink.matches[1].url.as_str(),
        format!("{}/gcs/logs/job-b/serial-1.log", mock_server.uri())
    );
}

#[tokio::test]
async fn test_console_output_is_one_line_per_match() {
    let mock_server = MockServer::start().await;
    mount_log_tree(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), "/gcs/logs/", "soft lockup");
    let mut sink = ConsoleSink::new(Vec::new());

    crawl(&config, &mut sink).await.expect("Crawl failed");

    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        output,
        "/gcs/logs/job-a/101/serial-1.log\n/gcs/logs/job-b/serial-1.log\n"
    );
}

#[tokio::test]
async fn test_failed_listing_is_reported_and_siblings_continue() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        "/gcs/logs/",
        &["/gcs/logs/broken/", "/gcs/logs/ok/"],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gcs/logs/broken/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server, "/gcs/logs/ok/", &["/gcs/logs/ok/serial-1.log"]).await;
    mount_file(&mock_server, "/gcs/logs/ok/serial-1.log", "BUG").await;

    let config = create_test_config(&mock_server.uri(), "/gcs/logs/", "BUG");
    let mut sink = CollectingSink::new();

    let report = crawl(&config, &mut sink).await.expect("Crawl failed");

    assert_eq!(sink.locations(), vec!["/gcs/logs/ok/serial-1.log"]);
    assert_eq!(sink.errors.len(), 1);
    assert_eq!(sink.errors[0].location, "/gcs/logs/broken/");
    assert!(sink.errors[0].message.contains("500"));
    assert_eq!(report.fetch_errors, 1);
}

#[tokio::test]
async fn test_missing_file_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        "/gcs/logs/",
        &["/gcs/logs/gone/serial-1.log", "/gcs/logs/here/serial-1.log"],
    )
    .await;
    mount_file(&mock_server, "/gcs/logs/here/serial-1.log", "BUG").await;

    let config = create_test_config(&mock_server.uri(), "/gcs/logs/", "BUG");
    let mut sink = CollectingSink::new();

    crawl(&config, &mut sink).await.expect("Crawl failed");

    assert_eq!(sink.locations(), vec!["/gcs/logs/here/serial-1.log"]);
    assert_eq!(sink.errors.len(), 1);
    assert_eq!(sink.errors[0].location, "/gcs/logs/gone/serial-1.log");
    assert!(sink.errors[0].message.contains("404"));
}

#[tokio::test]
async fn test_listing_with_invalid_utf8_still_yields_links() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        "/gcs/logs/",
        &["/gcs/logs/run/", "/gcs/logs/artifacts.gz"],
    )
    .await;

    // A Latin-1 object name ahead of the table
    let page = listing_page(&["/gcs/logs/run/serial-1.log"]);
    let (head, rows) = page.split_at(page.find("<table>").unwrap());
    let mut run_page = head.as_bytes().to_vec();
    run_page.extend_from_slice(b"caf\xE9.txt ");
    run_page.extend_from_slice(rows.as_bytes());
    Mock::given(method("GET"))
        .and(path("/gcs/logs/run/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(run_page, "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_file(&mock_server, "/gcs/logs/run/serial-1.log", "BUG").await;

    // Binary siblings pass the sub-directory heuristic and get fetched as
    // listings
    Mock::given(method("GET"))
        .and(path("/gcs/logs/artifacts.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            vec![0x1f, 0x8b, 0x08, 0x00, 0xff, 0xfe, 0x3c],
            "application/octet-stream",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "/gcs/logs/", "BUG");
    let mut sink = CollectingSink::new();

    let report = crawl(&config, &mut sink).await.expect("Crawl failed");

    assert_eq!(sink.locations(), vec!["/gcs/logs/run/serial-1.log"]);
    assert!(sink.errors.is_empty(), "unexpected errors: {:?}", sink.errors);
    assert_eq!(report.directories_visited, 3);
}

#[tokio::test]
async fn test_unreachable_server_is_not_fatal() {
    // Nothing listens on the discard port
    let config = create_test_config("http://127.0.0.1:9/", "/gcs/logs/", "BUG");
    let mut sink = CollectingSink::new();

    let report = crawl(&config, &mut sink).await.expect("Crawl failed");

    assert!(sink.matches.is_empty());
    assert_eq!(sink.errors.len(), 1);
    assert!(sink.errors[0].message.contains("request failed"));
    assert_eq!(report.fetch_errors, 1);
}

#[tokio::test]
async fn test_absolute_links_are_followed() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_listing(&mock_server, "/gcs/logs/", &[&format!("{}/gcs/logs/run/", base)]).await;
    let run_location = format!("{}/gcs/logs/run/", base);
    let file_location = format!("{}/gcs/logs/run/serial-1.log", base);
    mount_listing(&mock_server, "/gcs/logs/run/", &[&file_location]).await;
    mount_file(&mock_server, "/gcs/logs/run/serial-1.log", "kernel BUG at mm/slab.c").await;

    let config = create_test_config(&base, "/gcs/logs/", "BUG");
    let mut sink = CollectingSink::new();

    crawl(&config, &mut sink).await.expect("Crawl failed");

    assert_eq!(sink.locations(), vec![file_location.as_str()]);
    assert!(sink.errors.is_empty(), "unexpected errors for {}: {:?}", run_location, sink.errors);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gcs/logs/"))
        .and(header("user-agent", "listing-grep-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), "/gcs/logs/", "BUG");
    config.http.user_agent = Some("listing-grep-test/1.0".to_string());
    let mut sink = CollectingSink::new();

    crawl(&config, &mut sink).await.expect("Crawl failed");

    assert!(sink.errors.is_empty());
}

#[tokio::test]
async fn test_repeated_crawls_give_identical_output() {
    let mock_server = MockServer::start().await;
    let files = ["/gcs/logs/a/serial-1.log", "/gcs/logs/b/serial-1.log"];

    // Every request is made once per crawl
    Mock::given(method("GET"))
        .and(path("/gcs/logs/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&files)))
        .expect(2)
        .mount(&mock_server)
        .await;
    for file in files {
        Mock::given(method("GET"))
            .and(path(file))
            .respond_with(ResponseTemplate::new(200).set_body_string("BUG"))
            .expect(2)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&mock_server.uri(), "/gcs/logs/", "BUG");

    let mut first = CollectingSink::new();
    let mut second = CollectingSink::new();
    crawl(&config, &mut first).await.expect("Crawl failed");
    crawl(&config, &mut second).await.expect("Crawl failed");

    assert_eq!(first.locations(), files.to_vec());
    assert_eq!(first.matches, second.matches);
}
