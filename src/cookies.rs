use axum_extra::extract::cookie::CookieJar;

/// Cookies whose name contains this marker are private to a signed-in visitor.
pub const PRIVATE_MARKER: &str = "pvt-";

pub fn is_private(name: &str) -> bool {
    name.contains(PRIVATE_MARKER)
}

pub fn private_names(jar: &CookieJar) -> Vec<String> {
    jar.iter()
        .map(|cookie| cookie.name())
        .filter(|name| is_private(name))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::*;

    #[test]
    fn marker_matches_anywhere_in_name() {
        assert!(is_private("pvt-session"));
        assert!(is_private("app-pvt-token"));
        assert!(!is_private("PVT-session"));
        assert!(!is_private("pvtsession"));
        assert!(!is_private("other"));
    }

    #[test]
    fn private_names_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("pvt-session=abc; other=xyz; x-pvt-user=1"),
        );

        let jar = CookieJar::from_headers(&headers);
        let mut names = private_names(&jar);
        names.sort();
        assert_eq!(names, ["pvt-session", "x-pvt-user"]);
    }

    #[test]
    fn absent_header_has_no_cookies() {
        let jar = CookieJar::from_headers(&HeaderMap::new());
        assert!(private_names(&jar).is_empty());
    }
}
