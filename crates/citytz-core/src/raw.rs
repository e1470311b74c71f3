// crates/citytz-core/src/raw.rs

//! Raw input shapes as they appear in the source JSON document.
//!
//! The source is loosely typed: `pop`, `iso2` and `iso3` show up as either
//! numbers or strings depending on the row. They are decoded into
//! [`FlexValue`] and then coerced by total functions, so the rest of the
//! crate only ever sees a typed [`Record`].

use crate::model::Record;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::io::Read;

/// A field that may be a JSON number, a JSON string, or something else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexValue {
    Number(Number),
    Text(String),
    Other(Value),
}

impl FlexValue {
    /// Numbers widen to `f64`; strings are parsed, falling back to `0.0`.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Number(n) => n.as_f64().unwrap_or(0.0),
            Self::Text(s) => s.parse().unwrap_or(0.0),
            Self::Other(_) => 0.0,
        }
    }

    /// Strings pass through; numbers use their shortest decimal form
    /// (`49.0` becomes `"49"`); anything else is rendered as JSON text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(n),
            Self::Other(v) => v.to_string(),
        }
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64's Display is the shortest round-trip form without an exponent.
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

/// Raw city row from `cityMap.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RecordRaw {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub pop: Option<FlexValue>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub iso2: Option<FlexValue>,
    #[serde(default)]
    pub iso3: Option<FlexValue>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(rename = "exactCity", default)]
    pub exact_city: Option<String>,
    #[serde(default)]
    pub city_ascii: Option<String>,
    #[serde(default)]
    pub state_ansi: Option<String>,
    #[serde(rename = "exactProvince", default)]
    pub exact_province: Option<String>,
}

impl RecordRaw {
    pub fn into_record(self) -> Record {
        let city = self.city.unwrap_or_default();
        // Rows without an ASCII name get one transliterated from the city.
        let city_ascii = match self.city_ascii {
            Some(s) if !s.is_empty() => s,
            _ => deunicode::deunicode(&city),
        };

        Record {
            lat: self.lat.unwrap_or_default(),
            lng: self.lng.unwrap_or_default(),
            pop: self.pop.as_ref().map(FlexValue::to_f64).unwrap_or(0.0),
            iso2: self.iso2.as_ref().map(FlexValue::to_text).unwrap_or_default(),
            iso3: self.iso3.as_ref().map(FlexValue::to_text).unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            timezone: self.timezone.unwrap_or_default(),
            province: self.province.unwrap_or_default(),
            exact_city: self.exact_city.unwrap_or_default(),
            state_ansi: self.state_ansi.unwrap_or_default(),
            exact_province: self.exact_province.unwrap_or_default(),
            city_ascii,
            city,
        }
    }
}

/// Parse a complete JSON array of city rows.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    let raw: Vec<RecordRaw> = serde_json::from_slice(bytes)?;
    Ok(raw.into_iter().map(RecordRaw::into_record).collect())
}

/// Streaming variant of [`parse_records`].
pub fn parse_records_from_reader<R: Read>(reader: R) -> Result<Vec<Record>, serde_json::Error> {
    let raw: Vec<RecordRaw> = serde_json::from_reader(reader)?;
    Ok(raw.into_iter().map(RecordRaw::into_record).collect())
}
