// crates/citytz-core/src/model.rs
use serde::{Deserialize, Serialize};

/// One city entry of the dataset.
///
/// Serialized with the same field names the source `cityMap.json` uses, so
/// JSON output can be fed back into the loader.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub lat: f64,
    pub lng: f64,
    pub pop: f64,
    pub city: String,
    pub iso2: String,
    pub iso3: String,
    pub country: String,
    pub timezone: String,
    pub province: String,
    #[serde(rename = "exactCity")]
    pub exact_city: String,
    pub city_ascii: String,
    pub state_ansi: String,
    #[serde(rename = "exactProvince")]
    pub exact_province: String,
}

impl Record {
    /// City display name.
    pub fn name(&self) -> &str {
        &self.city
    }

    pub fn iso2(&self) -> &str {
        &self.iso2
    }

    pub fn iso3(&self) -> &str {
        &self.iso3
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    /// IANA-style zone name (`Region/City`). Not checked against a tz database.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn population(&self) -> f64 {
        self.pop
    }

    /// `(lat, lng)`
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Lowercased "city state province country" text used by partial search.
    pub fn partial_haystack(&self) -> String {
        [
            self.city.as_str(),
            self.state_ansi.as_str(),
            self.province.as_str(),
            self.country.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Fields inspected by the configurable matcher, in scan order.
    pub fn match_fields(&self) -> [&str; 7] {
        [
            &self.city,
            &self.city_ascii,
            &self.state_ansi,
            &self.province,
            &self.country,
            &self.iso2,
            &self.iso3,
        ]
    }
}

/// Toggles for [`crate::search::SearchEngine::search`].
///
/// The default folds case and matches substrings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub exact_match: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    pub fn exact_match(mut self, enabled: bool) -> Self {
        self.exact_match = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn springfield() -> Record {
        Record {
            city: "Springfield".into(),
            city_ascii: "Springfield".into(),
            state_ansi: "MO".into(),
            province: "Missouri".into(),
            country: "United States of America".into(),
            iso2: "US".into(),
            iso3: "USA".into(),
            ..Default::default()
        }
    }

    #[test]
    fn partial_haystack_joins_and_lowercases() {
        assert_eq!(
            springfield().partial_haystack(),
            "springfield mo missouri united states of america"
        );
    }

    #[test]
    fn match_fields_follow_scan_order() {
        let r = springfield();
        assert_eq!(
            r.match_fields(),
            [
                "Springfield",
                "Springfield",
                "MO",
                "Missouri",
                "United States of America",
                "US",
                "USA"
            ]
        );
    }

    #[test]
    fn json_uses_source_field_names() {
        let mut r = springfield();
        r.exact_city = "springfield".into();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["exactCity"], "springfield");
        assert_eq!(json["city_ascii"], "Springfield");
        assert!(json.get("exact_city").is_none());
    }

    #[test]
    fn options_builder_sets_flags() {
        let opts = SearchOptions::new().case_sensitive(true).exact_match(true);
        assert!(opts.case_sensitive && opts.exact_match);
        assert_eq!(SearchOptions::default(), SearchOptions::new());
    }
}
