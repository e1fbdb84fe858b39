//! Shallow merge of caller-supplied overrides over the defaults.
//!
//! Only top-level keys are merged. `businessHours` and `theme` are replaced
//! as whole objects, so `{"businessHours": {"monday": ...}}` leaves the other
//! six days unscheduled.

use {
    serde_json::{Map, Value},
    tracing::{debug, warn},
};

use crate::schema::{BusinessHours, HoursWindow, Position, Theme, Weekday, WidgetConfig};

impl WidgetConfig {
    /// Build a configuration from an arbitrary JSON value.
    ///
    /// Never fails. A non-object value means "no overrides"; a field with the
    /// wrong type is logged and keeps its default.
    pub fn merged(overrides: &Value) -> Self {
        let mut config = Self::default();
        let map = match overrides {
            Value::Object(map) => map,
            Value::Null => return config,
            other => {
                warn!(kind = json_kind(other), "widget config is not an object, using defaults");
                return config;
            },
        };

        for (key, value) in map {
            match key.as_str() {
                "phoneNumber" => {
                    if let Some(phone) = phone_number(value) {
                        config.phone_number = phone;
                    }
                },
                "greeting" => {
                    if let Some(greeting) = string_field(key, value) {
                        config.greeting = greeting;
                    }
                },
                "companyName" => {
                    if let Some(name) = string_field(key, value) {
                        config.company_name = name;
                    }
                },
                "agentName" => {
                    if let Some(name) = string_field(key, value) {
                        config.agent_name = name;
                    }
                },
                "position" => {
                    if let Some(position) = position(value) {
                        config.position = position;
                    }
                },
                "avatarUrl" => {
                    if let Some(url) = avatar(key, value) {
                        config.avatar_url = url;
                    }
                },
                // Legacy key; `avatarUrl` wins when both are present.
                "avatar" if !map.contains_key("avatarUrl") => {
                    if let Some(url) = avatar(key, value) {
                        config.avatar_url = url;
                    }
                },
                "businessHours" => {
                    if let Some(hours) = business_hours(value) {
                        config.business_hours = hours;
                    }
                },
                "theme" => {
                    if let Some(theme) = theme(value) {
                        config.theme = theme;
                    }
                },
                other => debug!(key = other, "ignoring unknown widget config key"),
            }
        }

        config
    }
}

impl From<Value> for WidgetConfig {
    fn from(value: Value) -> Self {
        Self::merged(&value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn malformed(key: &str, value: &Value) {
    warn!(key, kind = json_kind(value), "ignoring malformed widget config field");
}

fn string_field(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            malformed(key, other);
            None
        },
    }
}

fn phone_number(value: &Value) -> Option<String> {
    match value {
        // JS numbers arrive as floats; print whole ones without the `.0`.
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e16 => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        other => string_field("phoneNumber", other),
    }
}

fn position(value: &Value) -> Option<Position> {
    let name = string_field("position", value)?;
    let parsed = Position::parse(&name);
    if parsed.is_none() {
        warn!(position = %name, "unknown widget position, using bottom-right");
    }
    parsed
}

fn avatar(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        other => string_field(key, other),
    }
}

fn business_hours(value: &Value) -> Option<BusinessHours> {
    match value {
        Value::Null => Some(BusinessHours::empty()),
        Value::Object(days) => Some(parse_schedule(days)),
        other => {
            malformed("businessHours", other);
            None
        },
    }
}

fn parse_schedule(days: &Map<String, Value>) -> BusinessHours {
    let mut hours = BusinessHours::empty();
    for (name, entry) in days {
        let Some(day) = Weekday::from_name(name) else {
            debug!(key = %name, "ignoring unknown weekday in businessHours");
            continue;
        };
        match entry {
            Value::Null => {},
            Value::Object(bounds) => {
                hours.set(day, HoursWindow::new(bound(bounds, "start"), bound(bounds, "end")))
            },
            other => warn!(
                day = day.name(),
                kind = json_kind(other),
                "ignoring malformed businessHours entry"
            ),
        }
    }
    hours
}

fn bound(bounds: &Map<String, Value>, key: &str) -> String {
    bounds
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn theme(value: &Value) -> Option<Theme> {
    match value {
        Value::Null => Some(Theme::unset()),
        Value::Object(theme) => Some(Theme {
            primary_color: theme
                .get("primaryColor")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        other => {
            malformed("theme", other);
            None
        },
    }
}
