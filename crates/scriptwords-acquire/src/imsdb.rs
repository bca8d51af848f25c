use crate::error::AcquireError;
use reqwest::{Client, StatusCode, Url};
use scraper::{Html, Selector};

/// The only site scripts are fetched from.
pub const BASE_URL: &str = "https://imsdb.com";

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Path marker every IMSDb script page URL carries.
const SCRIPT_MARKER: &str = "scripts";

pub fn build_client() -> Result<Client, AcquireError> {
    let client = Client::builder()
        .user_agent("scriptwords/0.1 (screenplay word analysis tool)")
        .build()?;
    Ok(client)
}

/// Fetch a page with a single GET. Anything but `200 OK` is an error.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, AcquireError> {
    tracing::info!(url = %url, "Fetching page");
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(AcquireError::BadResponse {
            status,
            url: url.to_string(),
        });
    }

    let html = response.text().await?;
    tracing::info!(bytes = html.len(), "Received HTML");
    Ok(html)
}

/// Resolve a free-text query to an IMSDb script URL.
///
/// Runs `site:imsdb.com <query>` against a web search and takes the top hit
/// only. The hit must look like a script page; there is no fallback to later
/// results.
pub async fn search_script(client: &Client, query: &str) -> Result<String, AcquireError> {
    search_script_at(client, SEARCH_URL, query).await
}

/// [`search_script`] against an arbitrary HTML search endpoint.
pub async fn search_script_at(
    client: &Client,
    endpoint: &str,
    query: &str,
) -> Result<String, AcquireError> {
    let site_query = site_query(query);
    tracing::info!(query = %site_query, endpoint = %endpoint, "Searching for script");

    let response = client
        .get(endpoint)
        .query(&[("q", site_query.as_str())])
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(AcquireError::BadResponse {
            status,
            url: endpoint.to_string(),
        });
    }

    let html = response.text().await?;
    let url = first_hit(&html, endpoint)
        .ok_or_else(|| AcquireError::NoSearchResults(query.to_string()))?;
    tracing::debug!(url = %url, "Top search hit");

    check_script_url(query, url)
}

fn site_query(query: &str) -> String {
    let host = BASE_URL.trim_start_matches("https://");
    format!("site:{host} {query}")
}

/// Pull the destination of the first result link out of a search results page.
fn first_hit(html: &str, endpoint: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let link_sel = Selector::parse("a.result__a").expect("valid selector");

    let href = document
        .select(&link_sel)
        .find_map(|a| a.value().attr("href"))?;
    resolve_result_link(href, endpoint)
}

/// Result links are usually redirects (`//duckduckgo.com/l/?uddg=<target>`);
/// unwrap them to the target URL.
fn resolve_result_link(href: &str, endpoint: &str) -> Option<String> {
    let base = Url::parse(endpoint).ok()?;
    let link = base.join(href).ok()?;

    let target = link
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned());

    Some(target.unwrap_or_else(|| link.to_string()))
}

fn check_script_url(query: &str, url: String) -> Result<String, AcquireError> {
    if url.contains(SCRIPT_MARKER) {
        Ok(url)
    } else {
        Err(AcquireError::NotAScriptPage {
            query: query.to_string(),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_query() {
        assert_eq!(site_query("the matrix"), "site:imsdb.com the matrix");
    }

    #[test]
    fn test_first_hit_unwraps_redirect() {
        let html = r#"
        <div class="results">
          <div class="result">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fimsdb.com%2Fscripts%2FMatrix%2C-The.html&amp;rut=abc">The Matrix Script at IMSDb.</a>
          </div>
          <div class="result">
            <a class="result__a" href="https://imsdb.com/Movie%20Scripts/Matrix.html">Other</a>
          </div>
        </div>
        "#;
        assert_eq!(
            first_hit(html, SEARCH_URL).as_deref(),
            Some("https://imsdb.com/scripts/Matrix,-The.html")
        );
    }

    #[test]
    fn test_first_hit_direct_link() {
        let html = r#"<a class="result__a" href="https://imsdb.com/scripts/Alien.html">Alien</a>"#;
        assert_eq!(
            first_hit(html, SEARCH_URL).as_deref(),
            Some("https://imsdb.com/scripts/Alien.html")
        );
    }

    #[test]
    fn test_first_hit_none() {
        let html = r#"<div class="no-results">No results.</div>"#;
        assert_eq!(first_hit(html, SEARCH_URL), None);
    }

    #[test]
    fn test_check_script_url() {
        let ok = check_script_url("alien", "https://imsdb.com/scripts/Alien.html".into());
        assert_eq!(ok.unwrap(), "https://imsdb.com/scripts/Alien.html");

        let err = check_script_url("alien", "https://imsdb.com/Movie Scripts/Alien.html".into());
        assert!(matches!(err, Err(AcquireError::NotAScriptPage { .. })));
    }

    fn results_page(href: &str) -> String {
        format!(
            r#"<div class="results"><div class="result"><a class="result__a" href="{href}">Hit</a></div></div>"#
        )
    }

    async fn mount_search(server: &wiremock::MockServer, query: &str, body: String) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/html/"))
            .and(wiremock::matchers::query_param("q", query))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/scripts/Alien.html"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<pre>ALIEN</pre>"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let url = format!("{}/scripts/Alien.html", server.uri());
        let html = fetch_page(&client, &url).await.unwrap();
        assert_eq!(html, "<pre>ALIEN</pre>");
    }

    #[tokio::test]
    async fn test_fetch_page_not_found_is_bad_response() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let url = format!("{}/scripts/Missing.html", server.uri());
        let err = fetch_page(&client, &url).await.unwrap_err();
        match err {
            AcquireError::BadResponse { status, url: failed } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(failed, url);
            }
            other => panic!("expected BadResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_200_success() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let err = fetch_page(&client, &server.uri()).await.unwrap_err();
        assert!(matches!(
            err,
            AcquireError::BadResponse { status, .. } if status == StatusCode::NO_CONTENT
        ));
    }

    #[tokio::test]
    async fn test_search_returns_script_url() {
        let server = wiremock::MockServer::start().await;
        mount_search(
            &server,
            "site:imsdb.com alien",
            results_page("https://imsdb.com/scripts/Alien.html"),
        )
        .await;

        let client = build_client().unwrap();
        let endpoint = format!("{}/html/", server.uri());
        let url = search_script_at(&client, &endpoint, "alien").await.unwrap();
        assert_eq!(url, "https://imsdb.com/scripts/Alien.html");
    }

    #[tokio::test]
    async fn test_search_without_hits() {
        let server = wiremock::MockServer::start().await;
        mount_search(
            &server,
            "site:imsdb.com zzzz",
            r#"<div class="no-results">No results.</div>"#.to_string(),
        )
        .await;

        let client = build_client().unwrap();
        let endpoint = format!("{}/html/", server.uri());
        let err = search_script_at(&client, &endpoint, "zzzz").await.unwrap_err();
        assert!(matches!(err, AcquireError::NoSearchResults(ref q) if q == "zzzz"));
    }

    #[tokio::test]
    async fn test_search_top_hit_not_a_script() {
        let server = wiremock::MockServer::start().await;
        mount_search(
            &server,
            "site:imsdb.com alien",
            results_page("https://imsdb.com/Movie%20Scripts/Alien%20Script.html"),
        )
        .await;

        let client = build_client().unwrap();
        let endpoint = format!("{}/html/", server.uri());
        let err = search_script_at(&client, &endpoint, "alien").await.unwrap_err();
        assert!(matches!(err, AcquireError::NotAScriptPage { ref query, .. } if query == "alien"));
    }

    #[tokio::test]
    async fn test_search_endpoint_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let endpoint = format!("{}/html/", server.uri());
        let err = search_script_at(&client, &endpoint, "alien").await.unwrap_err();
        assert!(matches!(err, AcquireError::BadResponse { .. }));
    }
}
