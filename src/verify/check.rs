use std::fmt::{self, Display};

use reqwest::Url;

use crate::model::FieldValue;

/// Where a field lives inside a decoded shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// A top-level key: echo fields, auth fields, pagination.
    Top(String),
    /// `data.<name>` of a single-resource envelope.
    Data(String),
    /// `support.<name>` of a single-resource envelope.
    Support(String),
    /// `data[<index>].<name>` of a list.
    Item(usize, String),
}

impl FieldPath {
    pub fn top(name: impl Into<String>) -> Self {
        FieldPath::Top(name.into())
    }

    pub fn data(name: impl Into<String>) -> Self {
        FieldPath::Data(name.into())
    }

    pub fn support(name: impl Into<String>) -> Self {
        FieldPath::Support(name.into())
    }

    pub fn item(index: usize, name: impl Into<String>) -> Self {
        FieldPath::Item(index, name.into())
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Top(name) => write!(f, "{name}"),
            FieldPath::Data(name) => write!(f, "data.{name}"),
            FieldPath::Support(name) => write!(f, "support.{name}"),
            FieldPath::Item(index, name) => write!(f, "data[{index}].{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Text(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Text(value) => write!(f, "{value:?}"),
        }
    }
}

/// How an actual field value is judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Equals(Literal),
    Prefix(String),
    /// `#RRGGBB`.
    HexColor,
    /// `NN-NNNN`.
    PantoneCode,
    /// Absolute `http`/`https` URL with a host.
    WellFormedUrl,
    Present,
}

impl Check {
    pub fn int(value: i64) -> Self {
        Check::Equals(Literal::Int(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Check::Equals(Literal::Text(value.into()))
    }

    pub fn prefix(value: impl Into<String>) -> Self {
        Check::Prefix(value.into())
    }

    pub fn holds(&self, actual: Option<FieldValue<'_>>) -> bool {
        let Some(actual) = actual else {
            return false;
        };

        match (self, actual) {
            (Check::Present, _) => true,
            (Check::Equals(Literal::Int(expected)), FieldValue::Int(value)) => *expected == value,
            (Check::Equals(Literal::Text(expected)), FieldValue::Text(value)) => expected == value,
            (Check::Prefix(prefix), FieldValue::Text(value)) => value.starts_with(prefix.as_str()),
            (Check::HexColor, FieldValue::Text(value)) => is_hex_color(value),
            (Check::PantoneCode, FieldValue::Text(value)) => is_pantone_code(value),
            (Check::WellFormedUrl, FieldValue::Text(value)) => is_well_formed_url(value),
            _ => false,
        }
    }
}

impl Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Equals(literal) => write!(f, "{literal}"),
            Check::Prefix(prefix) => write!(f, "starts with {prefix:?}"),
            Check::HexColor => write!(f, "#RRGGBB hex color"),
            Check::PantoneCode => write!(f, "NN-NNNN pantone code"),
            Check::WellFormedUrl => write!(f, "well-formed http(s) URL"),
            Check::Present => write!(f, "present"),
        }
    }
}

/// One field assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExpectation {
    pub path: FieldPath,
    pub check: Check,
}

impl FieldExpectation {
    pub fn new(path: FieldPath, check: Check) -> Self {
        Self { path, check }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn is_pantone_code(value: &str) -> bool {
    match value.split_once('-') {
        Some((family, index)) => {
            family.len() == 2
                && index.len() == 4
                && family.chars().chain(index.chars()).all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn is_well_formed_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
