//! Postfix canonicalization and ordering

use std::cmp::Ordering;

/// Stability markers that carry no information beyond "this is a release".
const RELEASE_MARKERS: &[&str] = &["RELEASE", "FINAL", "GA"];

/// Canonical form of the text following a version's numeric core.
///
/// Leading and trailing separators are trimmed, purely numeric
/// identifiers lose their leading zeros and release markers vanish.
/// Returns `None` when nothing meaningful is left.
pub fn canonicalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c| c == '.' || c == '-');
    if trimmed.is_empty() {
        return None;
    }
    if RELEASE_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return None;
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut ident = String::new();
    for c in trimmed.chars() {
        if c == '.' || c == '-' {
            out.push_str(strip_numeric_zeros(&ident));
            out.push(c);
            ident.clear();
        } else {
            ident.push(c);
        }
    }
    out.push_str(strip_numeric_zeros(&ident));
    Some(out)
}

fn strip_numeric_zeros(ident: &str) -> &str {
    if !ident.is_empty() && ident.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = ident.trim_start_matches('0');
        if stripped.is_empty() {
            "0"
        } else {
            stripped
        }
    } else {
        ident
    }
}

fn identifiers(postfix: &str) -> impl Iterator<Item = &str> {
    postfix.split(|c| c == '.' || c == '-').filter(|s| !s.is_empty())
}

fn is_numeric(ident: &str) -> bool {
    ident.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit runs without parsing, so arbitrarily long runs work.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural ordering: digit runs compare numerically, other runs lexically.
fn compare_natural(a: &str, b: &str) -> Ordering {
    let mut a_runs = runs(a);
    let mut b_runs = runs(b);
    loop {
        match (a_runs.next(), b_runs.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_numeric(x), is_numeric(y)) {
                    (true, true) => compare_digits(x, y),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn runs(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}

/// Order two postfixes attached to otherwise identical versions.
///
/// Identifiers are compared pairwise: numeric ones numerically and before
/// alphanumeric ones, alphanumeric ones naturally. A shorter identifier
/// list wins a tie, and the raw text settles whatever is left so the order
/// agrees with string equality.
pub fn compare(a: &str, b: &str) -> Ordering {
    let mut a_ids = identifiers(a);
    let mut b_ids = identifiers(b);
    loop {
        match (a_ids.next(), b_ids.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_numeric(x), is_numeric(y)) {
                    (true, true) => compare_digits(x, y),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => compare_natural(x, y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Alphabetic skeleton of a postfix: one entry per identifier, digits removed.
fn pattern(postfix: &str) -> Vec<String> {
    identifiers(postfix)
        .map(|ident| ident.chars().filter(|c| !c.is_ascii_digit()).collect())
        .collect()
}

/// Two postfixes follow the same pattern when they have the same number
/// of identifiers and the same alphabetic segments, e.g. `lts1` and `lts2`.
pub fn has_pattern_match(a: &str, b: &str) -> bool {
    pattern(a) == pattern(b)
}
