//! Search URL construction.

use crate::error::{Result, ScrapeError};
use jobsift_core::CityQuery;
use url::Url;

/// Build the results-page URL for a query at a result offset:
/// `base?q=<term>&l=<city>&start=<offset>`.
pub fn search_url(base: &str, term: &str, query: &CityQuery, offset: u32) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| ScrapeError::InvalidBaseUrl(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("q", term)
        .append_pair("l", query.as_str())
        .append_pair("start", &offset.to_string());
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(city: &str) -> CityQuery {
        CityQuery::new(city).expect("valid city")
    }

    #[test]
    fn test_search_url_shape() {
        let url = search_url("https://ca.indeed.com/jobs", "", &query("Toronto"), 0)
            .expect("build url");
        assert_eq!(url, "https://ca.indeed.com/jobs?q=&l=Toronto&start=0");
    }

    #[test]
    fn test_search_url_offset() {
        let url = search_url("https://ca.indeed.com/jobs", "", &query("Toronto"), 1510)
            .expect("build url");
        assert!(url.ends_with("&start=1510"));
    }

    #[test]
    fn test_search_url_encodes_city() {
        let url = search_url("https://ca.indeed.com/jobs", "", &query("Quebec City"), 0)
            .expect("build url");
        assert!(url.contains("l=Quebec+City"));
    }

    #[test]
    fn test_search_url_invalid_base() {
        assert!(matches!(
            search_url("not a url", "", &query("Toronto"), 0),
            Err(ScrapeError::InvalidBaseUrl(_))
        ));
    }
}
