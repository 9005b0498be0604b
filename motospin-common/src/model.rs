//! Motorcycle data model
//!
//! `MotorcycleRecord` is the normalized shape every provider response is
//! coerced into: all 37 fields present, missing values defaulted. A record
//! promoted to a favorite gains store metadata (`FavoriteRecord`).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder for any string field the provider did not supply.
pub const PLACEHOLDER: &str = "N/A";

/// Current calendar year, the default for a missing or invalid `year`.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// A fully-populated motorcycle specification record.
///
/// Invariant: after [`MotorcycleRecord::from_provider`], every string field
/// is non-empty (real value or [`PLACEHOLDER`]) and `year` is a real year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorcycleRecord {
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub displacement: String,
    pub engine: String,
    pub power: String,
    pub torque: String,
    pub compression: String,
    pub bore_stroke: String,
    pub valves_per_cylinder: String,
    pub fuel_system: String,
    pub fuel_control: String,
    pub ignition: String,
    pub lubrication: String,
    pub cooling: String,
    pub gearbox: String,
    pub transmission: String,
    pub clutch: String,
    pub frame: String,
    pub front_suspension: String,
    pub front_wheel_travel: String,
    pub rear_suspension: String,
    pub rear_wheel_travel: String,
    pub front_tire: String,
    pub rear_tire: String,
    pub front_brakes: String,
    pub rear_brakes: String,
    pub total_weight: String,
    pub seat_height: String,
    pub total_height: String,
    pub total_length: String,
    pub total_width: String,
    pub ground_clearance: String,
    pub wheelbase: String,
    pub fuel_capacity: String,
    pub starter: String,
}

/// Copy a string field from a raw provider object, defaulting when the value
/// is absent, null, or empty. Numeric values are kept as their decimal form.
fn string_field(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Extract the model year, accepting either a JSON number or a numeric
/// string (the provider uses both), defaulting to the current year.
fn year_field(raw: &Value) -> i32 {
    match raw.get("year") {
        Some(Value::Number(n)) => n
            .as_i64()
            .filter(|y| *y > 0)
            .map(|y| y as i32)
            .unwrap_or_else(current_year),
        Some(Value::String(s)) => s
            .parse::<i32>()
            .ok()
            .filter(|y| *y > 0)
            .unwrap_or_else(current_year),
        _ => current_year(),
    }
}

impl MotorcycleRecord {
    /// Normalize one raw provider object into a fully-populated record.
    ///
    /// Idempotent: normalizing the JSON serialization of an already
    /// normalized record yields the same record.
    pub fn from_provider(raw: &Value) -> Self {
        Self {
            make: string_field(raw, "make"),
            model: string_field(raw, "model"),
            year: year_field(raw),
            kind: string_field(raw, "type"),
            displacement: string_field(raw, "displacement"),
            engine: string_field(raw, "engine"),
            power: string_field(raw, "power"),
            torque: string_field(raw, "torque"),
            compression: string_field(raw, "compression"),
            bore_stroke: string_field(raw, "bore_stroke"),
            valves_per_cylinder: string_field(raw, "valves_per_cylinder"),
            fuel_system: string_field(raw, "fuel_system"),
            fuel_control: string_field(raw, "fuel_control"),
            ignition: string_field(raw, "ignition"),
            lubrication: string_field(raw, "lubrication"),
            cooling: string_field(raw, "cooling"),
            gearbox: string_field(raw, "gearbox"),
            transmission: string_field(raw, "transmission"),
            clutch: string_field(raw, "clutch"),
            frame: string_field(raw, "frame"),
            front_suspension: string_field(raw, "front_suspension"),
            front_wheel_travel: string_field(raw, "front_wheel_travel"),
            rear_suspension: string_field(raw, "rear_suspension"),
            rear_wheel_travel: string_field(raw, "rear_wheel_travel"),
            front_tire: string_field(raw, "front_tire"),
            rear_tire: string_field(raw, "rear_tire"),
            front_brakes: string_field(raw, "front_brakes"),
            rear_brakes: string_field(raw, "rear_brakes"),
            total_weight: string_field(raw, "total_weight"),
            seat_height: string_field(raw, "seat_height"),
            total_height: string_field(raw, "total_height"),
            total_length: string_field(raw, "total_length"),
            total_width: string_field(raw, "total_width"),
            ground_clearance: string_field(raw, "ground_clearance"),
            wheelbase: string_field(raw, "wheelbase"),
            fuel_capacity: string_field(raw, "fuel_capacity"),
            starter: string_field(raw, "starter"),
        }
    }

    /// Whether two records denote the same bike for favorites purposes.
    ///
    /// Identity is the case-sensitive (make, model) pair; year and every
    /// other spec field are ignored.
    pub fn same_bike(&self, other: &MotorcycleRecord) -> bool {
        self.make == other.make && self.model == other.model
    }
}

/// A motorcycle saved to the favorites store, with store metadata attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Store-assigned identifier
    pub id: String,
    /// Identity subject (uid) of the owning user
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: MotorcycleRecord,
}
