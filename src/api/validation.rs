use std::collections::BTreeMap;
use url::{Host, Url};

use crate::models::cafe::NewCafe;

pub const NAME_MAX_LEN: usize = 250;
pub const URL_MAX_LEN: usize = 500;
pub const TEXT_MAX_LEN: usize = 250;

const REQUIRED: &str = "This field is required.";
const INVALID_URL: &str = "Please enter a valid URL.";

/// Per-field validation messages, keyed by column name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// One-line rendering for JSON error bodies.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checkbox contract: absent or empty means false, anything else means true.
#[must_use]
pub fn parse_checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Accepts absolute `http`, `https` or `ftp` URLs whose host is an IP address
/// or a domain ending in a real top-level label.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Ok(url) = Url::parse(value) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https" | "ftp") {
        return false;
    }

    match url.host() {
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => has_top_level_domain(domain),
        None => false,
    }
}

fn has_top_level_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        || (tld.starts_with("xn--") && tld.len() > 4)
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, max_len: usize) -> bool {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        return false;
    }
    if value.chars().count() > max_len {
        errors.add(
            field,
            format!("Field cannot be longer than {} characters.", max_len),
        );
        return false;
    }
    true
}

/// Validates a cafe before it is persisted. Applies to both the HTML form and
/// `POST /api/add`.
pub fn validate_new_cafe(cafe: &NewCafe) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "name", &cafe.name, NAME_MAX_LEN);

    for (field, value) in [("map_url", &cafe.map_url), ("img_url", &cafe.img_url)] {
        if require(&mut errors, field, value, URL_MAX_LEN) && !is_valid_url(value) {
            errors.add(field, INVALID_URL);
        }
    }

    require(&mut errors, "location", &cafe.location, TEXT_MAX_LEN);
    require(&mut errors, "seats", &cafe.seats, TEXT_MAX_LEN);

    check_coffee_price(&mut errors, cafe.coffee_price.as_deref());

    errors.into_result()
}

fn check_coffee_price(errors: &mut FieldErrors, price: Option<&str>) {
    if let Some(price) = price
        && price.chars().count() > TEXT_MAX_LEN
    {
        errors.add(
            "coffee_price",
            format!("Field cannot be longer than {} characters.", TEXT_MAX_LEN),
        );
    }
}

/// Validates a replacement price for `PATCH /api/update-price`. `None` clears
/// the price and is always accepted.
pub fn validate_coffee_price(price: Option<&str>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_coffee_price(&mut errors, price);
    errors.into_result()
}
