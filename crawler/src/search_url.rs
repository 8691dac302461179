use common::SearchParameters;

/// Builds the search-results URL for one request.
///
/// Parameter values are concatenated as given; escaping is up to the
/// caller. Offset 0 is the first page and carries no `start` fragment.
pub fn build_search_url(base_url: &str, params: &SearchParameters) -> String {
    let mut url = format!(
        "{base_url}{}&l={}&radius={}&jt={}&fromage=last",
        params.job_position, params.city, params.radius, params.job_type
    );
    if params.page_offset > 0 {
        url.push_str(&format!("&start={}", params.page_offset));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.indeed.co.in/jobs?q=";

    fn params(page_offset: u32) -> SearchParameters {
        SearchParameters {
            job_position: "Data+Scientist".to_string(),
            city: "Bengaluru%2C+Karnataka".to_string(),
            radius: 100,
            job_type: "fulltime".to_string(),
            page_offset,
        }
    }

    #[test]
    fn test_first_page_has_no_start_fragment() {
        let url = build_search_url(BASE, &params(0));
        assert!(!url.contains("start="));
        assert_eq!(
            url,
            "https://www.indeed.co.in/jobs?q=Data+Scientist&l=Bengaluru%2C+Karnataka&radius=100&jt=fulltime&fromage=last"
        );
    }

    #[test]
    fn test_later_page_concatenates_every_parameter() {
        let url = build_search_url(BASE, &params(10));
        assert_eq!(
            url,
            "https://www.indeed.co.in/jobs?q=Data+Scientist&l=Bengaluru%2C+Karnataka&radius=100&jt=fulltime&fromage=last&start=10"
        );
    }

    #[test]
    fn test_start_fragment_appears_once() {
        for offset in [10, 20, 190] {
            let url = build_search_url(BASE, &params(offset));
            assert_eq!(url.matches("start=").count(), 1);
            assert!(url.ends_with(&format!("&start={offset}")));
        }
    }

    #[test]
    fn test_values_are_not_escaped() {
        let mut p = params(0);
        p.job_position = "C++ dev&x=1".to_string();
        let url = build_search_url(BASE, &p);
        assert!(url.starts_with("https://www.indeed.co.in/jobs?q=C++ dev&x=1&l="));
    }
}
