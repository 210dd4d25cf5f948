//! Path patterns for the route table.
//!
//! Route tables may use `:name` captures and a bare `*` wildcard segment;
//! these are rewritten to the `{name}` / `{*wildcard}` form the router
//! understands. Matching stays case-sensitive and trailing slashes stay
//! significant, so `/about` and `/about/` are different routes.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern `{0}` must start with `/`")]
    Relative(String),
    #[error("pattern `{pattern}` has an invalid segment `{segment}`")]
    Segment { pattern: String, segment: String },
    #[error("pattern `{0}` has a wildcard before its last segment")]
    WildcardNotLast(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Static(&'a str),
    Param(&'a str),
    CatchAll(&'a str),
}

pub fn normalize(pattern: &str) -> Result<String, PatternError> {
    let Some(rest) = pattern.strip_prefix('/') else {
        return Err(PatternError::Relative(pattern.to_owned()));
    };

    let raw: Vec<&str> = rest.split('/').collect();
    let mut out = String::with_capacity(pattern.len() + 8);

    for (i, segment) in raw.iter().enumerate() {
        let last = i + 1 == raw.len();
        let invalid = || PatternError::Segment {
            pattern: pattern.to_owned(),
            segment: (*segment).to_owned(),
        };

        out.push('/');
        let normalized = if *segment == "*" {
            Segment::CatchAll("wildcard")
        } else if let Some(name) = segment.strip_prefix(':') {
            Segment::Param(name)
        } else if let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            match inner.strip_prefix('*') {
                Some(name) => Segment::CatchAll(name),
                None => Segment::Param(inner),
            }
        } else if segment.contains(['{', '}', '*', ':']) {
            return Err(invalid());
        } else {
            Segment::Static(segment)
        };

        match normalized {
            Segment::Static(s) => out.push_str(s),
            Segment::Param(name) => {
                if !valid_name(name) {
                    return Err(invalid());
                }
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
            Segment::CatchAll(name) => {
                if !valid_name(name) {
                    return Err(invalid());
                }
                if !last {
                    return Err(PatternError::WildcardNotLast(pattern.to_owned()));
                }
                out.push_str("{*");
                out.push_str(name);
                out.push('}');
            }
        }
    }

    Ok(out)
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn segments(normalized: &str) -> impl Iterator<Item = Segment<'_>> {
    normalized
        .strip_prefix('/')
        .unwrap_or(normalized)
        .split('/')
        .map(|segment| {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(inner) => match inner.strip_prefix('*') {
                    Some(name) => Segment::CatchAll(name),
                    None => Segment::Param(inner),
                },
                None => Segment::Static(segment),
            }
        })
}

/// Whether two normalized patterns cannot both be registered.
///
/// Identical patterns conflict, as do captures at the same position under
/// different names.
pub fn conflicts(a: &str, b: &str) -> bool {
    let mut a = segments(a);
    let mut b = segments(b);

    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (None, Some(_)) | (Some(_), None) => return false,
            (Some(x), Some(y)) => match (x, y) {
                (Segment::Static(p), Segment::Static(q)) if p == q => continue,
                (Segment::Param(p), Segment::Param(q)) if p == q => continue,
                (Segment::Static(_), _) | (_, Segment::Static(_)) => return false,
                _ => return true,
            },
        }
    }
}

/// Whether every path `later` matches is already matched by `earlier`.
///
/// A capture matches any non-empty segment and a wildcard matches whatever
/// remains, so `/{page}` covers `/about` and `/docs/{*rest}` covers
/// `/docs/a/b`. The router would prefer the static route, which would take
/// the path away from the entry listed first.
pub fn covers(earlier: &str, later: &str) -> bool {
    let mut earlier = segments(earlier);
    let mut later = segments(later);

    loop {
        match (earlier.next(), later.next()) {
            (None, None) => return true,
            (Some(Segment::CatchAll(_)), Some(_)) => return true,
            (None, Some(_)) | (Some(_), None) => return false,
            (Some(Segment::Static(p)), Some(Segment::Static(q))) if p == q => continue,
            (Some(Segment::Param(_)), Some(Segment::Static(q))) if !q.is_empty() => continue,
            (Some(Segment::Param(_)), Some(Segment::Param(_))) => continue,
            _ => return false,
        }
    }
}

/// Whether some path is matched by both patterns.
pub fn overlaps(a: &str, b: &str) -> bool {
    let mut a = segments(a);
    let mut b = segments(b);

    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(Segment::CatchAll(_)), Some(_)) | (Some(_), Some(Segment::CatchAll(_))) => {
                return true;
            }
            (None, Some(_)) | (Some(_), None) => return false,
            (Some(Segment::Static(p)), Some(Segment::Static(q))) if p == q => continue,
            (Some(Segment::Param(_)), Some(Segment::Static(s)))
            | (Some(Segment::Static(s)), Some(Segment::Param(_)))
                if !s.is_empty() =>
            {
                continue;
            }
            (Some(Segment::Param(_)), Some(Segment::Param(_))) => continue,
            _ => return false,
        }
    }
}
