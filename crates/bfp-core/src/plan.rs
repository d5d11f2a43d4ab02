//! Flight-plan documents (`.bfp`), briefings (`.pofp`) and ATC strips.
//!
//! Every field of a flight-plan document is free text as entered by the pilot.
//! Missing fields deserialize as empty strings so partial files still import.

use crate::route::RouteDescription;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A `.bfp` flight-plan file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightPlanDocument {
    #[serde(deserialize_with = "lenient_text")]
    pub airline: String,
    #[serde(deserialize_with = "lenient_text")]
    pub flight_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub aircraft_type: String,
    #[serde(deserialize_with = "lenient_text")]
    pub variant: String,
    #[serde(deserialize_with = "lenient_text")]
    pub registration: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fuel_amount: String,
    #[serde(deserialize_with = "lenient_text")]
    pub empty_weight: String,
    #[serde(deserialize_with = "lenient_text")]
    pub full_weight: String,
    #[serde(deserialize_with = "lenient_text")]
    pub pax: String,
    #[serde(deserialize_with = "lenient_text")]
    pub cargo_weight: String,
    #[serde(deserialize_with = "lenient_text")]
    pub hazardous: String,
    #[serde(deserialize_with = "lenient_text")]
    pub pin_time: String,
    #[serde(deserialize_with = "lenient_text")]
    pub total_time: String,
    #[serde(deserialize_with = "lenient_text")]
    pub departure: String,
    #[serde(deserialize_with = "lenient_text")]
    pub arrival: String,
    #[serde(deserialize_with = "lenient_text")]
    pub route: String,
}

impl FlightPlanDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Copy the routing results into the document.
    pub fn apply_route(&mut self, route: &RouteDescription) {
        self.departure = route.departure.clone();
        self.arrival = route.arrival.clone();
        self.route = route.route.clone();
        self.pin_time = route.pin_time.clone();
        self.total_time = route.eta.total_time();
    }

    /// Recompute `full_weight` from the cargo, fuel and passenger fields.
    pub fn update_full_weight(&mut self) {
        self.full_weight = self.load_sheet().full_weight_text();
    }

    pub fn load_sheet(&self) -> LoadSheet {
        LoadSheet::parse(&self.cargo_weight, &self.fuel_amount, &self.pax)
    }

    pub fn callsign(&self) -> String {
        format!("{}{}", self.airline, self.flight_number)
    }

    /// Plain-text `.pofp` briefing.
    pub fn briefing(&self) -> String {
        format!(
            "BRICK RIGS FLIGHT PLAN BRIEFING\n\
             \n\
             AIRLINE: {}\n\
             FLIGHT NUMBER: {}\n\
             CALLSIGN: {}\n\
             TYPE OF AIRCRAFT: {}\n\
             VARIANT: {}\n\
             REGISTRATION: {}\n\
             \n\
             FUEL: {}\n\
             EMPTY WEIGHT: {}\n\
             FULL WEIGHT: {}\n\
             PASSENGERS: {}\n\
             CARGO WEIGHT: {}\n\
             HAZARDOUS MATERIALS: {}\n\
             PIN TIME: {}\n\
             TOTAL TIME: {}\n\
             \n\
             ROUTE: {}\n\
             FROM {} TO {}\n",
            self.airline,
            self.flight_number,
            self.callsign(),
            self.aircraft_type,
            self.variant,
            self.registration,
            self.fuel_amount,
            self.empty_weight,
            self.full_weight,
            self.pax,
            self.cargo_weight,
            self.hazardous,
            self.pin_time,
            self.total_time,
            self.route,
            self.departure,
            self.arrival,
        )
    }

    pub fn atc_strip(&self) -> AtcStrip {
        AtcStrip {
            pin_time: self.pin_time.clone(),
            hold_ocean: false,
            route: format!("{} → {}", self.departure, self.arrival),
            waypoints: self.route.clone(),
            aircraft_type: self.aircraft_type.clone(),
            callsign: self.callsign(),
            registration: self.registration.clone(),
        }
    }
}

/// Accept any JSON scalar as text. Null, `false`, `0` and `""` read as empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Weight inputs for the full-weight figure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadSheet {
    pub cargo: f64,
    pub fuel: f64,
    pub pax: i64,
}

impl LoadSheet {
    /// Parse free-text fields; anything unparseable counts as zero.
    pub fn parse(cargo: &str, fuel: &str, pax: &str) -> Self {
        Self {
            cargo: parse_number(cargo),
            fuel: parse_number(fuel),
            pax: parse_count(pax),
        }
    }

    /// Cargo + fuel + passenger count. Empty weight is not included.
    pub fn full_weight(&self) -> f64 {
        self.cargo + self.fuel + self.pax as f64
    }

    pub fn full_weight_text(&self) -> String {
        format!("{:.1}", self.full_weight())
    }
}

/// Longest leading decimal literal, e.g. `"12kg"` is 12 and `"-1.5e2 L"`
/// is -150. No number at the start reads as zero.
fn parse_number(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Leading integer with optional sign; `"7.9 pax"` is 7.
fn parse_count(text: &str) -> i64 {
    let text = text.trim_start();
    let sign = usize::from(text.starts_with(['+', '-']));
    let end = text[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |idx| idx + sign);
    text[..end].parse().unwrap_or(0)
}

/// Controller's view of a filed flight plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcStrip {
    pub pin_time: String,
    pub hold_ocean: bool,
    pub route: String,
    pub waypoints: String,
    pub aircraft_type: String,
    pub callsign: String,
    pub registration: String,
}

impl fmt::Display for AtcStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CALLSIGN:   {}", self.callsign)?;
        writeln!(f, "REG:        {}", self.registration)?;
        writeln!(f, "TYPE:       {}", self.aircraft_type)?;
        writeln!(f, "PIN TIME:   {}", self.pin_time)?;
        writeln!(
            f,
            "HOLD OCEAN: {}",
            if self.hold_ocean { "Yes" } else { "No" }
        )?;
        writeln!(f, "ROUTE:      {}", self.route)?;
        write!(f, "WAYPOINTS:  {}", self.waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlightPlanDocument {
        FlightPlanDocument {
            airline: "BRK".to_string(),
            flight_number: "123".to_string(),
            aircraft_type: "B738".to_string(),
            registration: "BR-ICK".to_string(),
            fuel_amount: "1200.5".to_string(),
            cargo_weight: "300".to_string(),
            pax: "42".to_string(),
            departure: "BRUY".to_string(),
            arrival: "BVIA".to_string(),
            route: "DCT BRUY DCT TREA DCT BVIA".to_string(),
            pin_time: "09:05".to_string(),
            total_time: "101 min".to_string(),
            ..FlightPlanDocument::default()
        }
    }

    #[test]
    fn uses_camel_case_keys() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"flightNumber\": \"123\""));
        assert!(json.contains("\"cargoWeight\": \"300\""));
        assert!(json.contains("\"pinTime\": \"09:05\""));
    }

    #[test]
    fn partial_document_imports_with_empty_fields() {
        let doc = FlightPlanDocument::from_json(r#"{ "airline": "BRK", "route": "DCT BRUY" }"#)
            .unwrap();
        assert_eq!(doc.airline, "BRK");
        assert_eq!(doc.route, "DCT BRUY");
        assert_eq!(doc.flight_number, "");
        assert_eq!(doc.total_time, "");
    }

    #[test]
    fn scalar_and_null_fields_import_as_text() {
        let doc = FlightPlanDocument::from_json(
            r#"{ "airline": null, "pax": 42, "fuelAmount": 1200.5, "hazardous": false, "route": "DCT BRUY" }"#,
        )
        .unwrap();
        assert_eq!(doc.airline, "");
        assert_eq!(doc.pax, "42");
        assert_eq!(doc.fuel_amount, "1200.5");
        assert_eq!(doc.hazardous, "");
        assert_eq!(doc.route, "DCT BRUY");
        assert_eq!(doc.load_sheet().full_weight_text(), "1242.5");
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(FlightPlanDocument::from_json("not json").is_err());
    }

    #[test]
    fn full_weight_adds_cargo_fuel_and_pax() {
        let mut doc = sample();
        doc.empty_weight = "5000".to_string();
        doc.update_full_weight();
        assert_eq!(doc.full_weight, "1542.5");

        let sheet = LoadSheet::parse("abc", "", "7.9 pax");
        assert_eq!(sheet, LoadSheet { cargo: 0.0, fuel: 0.0, pax: 7 });
        assert_eq!(sheet.full_weight_text(), "7.0");
    }

    #[test]
    fn weights_read_leading_numbers() {
        let sheet = LoadSheet::parse("12kg", "100 L", "-3");
        assert_eq!(sheet, LoadSheet { cargo: 12.0, fuel: 100.0, pax: -3 });
        assert_eq!(sheet.full_weight_text(), "109.0");

        assert_eq!(parse_number("  -1.5e2 L"), -150.0);
        assert_eq!(parse_number(".5t"), 0.5);
        assert_eq!(parse_number("3e"), 3.0);
        assert_eq!(parse_number("-.kg"), 0.0);
        assert_eq!(parse_number("kg 12"), 0.0);
        assert_eq!(parse_count("+12 people"), 12);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("x3"), 0);
    }

    #[test]
    fn briefing_lists_route_and_endpoints() {
        let text = sample().briefing();
        assert!(text.starts_with("BRICK RIGS FLIGHT PLAN BRIEFING\n"));
        assert!(text.contains("FLIGHT NUMBER: 123\n"));
        assert!(text.contains("CALLSIGN: BRK123\n"));
        assert!(text.contains("TOTAL TIME: 101 min\n"));
        assert!(text.contains("ROUTE: DCT BRUY DCT TREA DCT BVIA\n"));
        assert!(text.contains("FROM BRUY TO BVIA\n"));
    }

    #[test]
    fn atc_strip_combines_callsign() {
        let strip = sample().atc_strip();
        assert_eq!(strip.callsign, "BRK123");
        assert_eq!(strip.route, "BRUY → BVIA");
        assert!(!strip.hold_ocean);
        let text = strip.to_string();
        assert!(text.contains("HOLD OCEAN: No"));
        assert!(text.contains("CALLSIGN:   BRK123"));
    }
}
