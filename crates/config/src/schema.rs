//! Widget configuration schema and built-in defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_GREETING: &str = "Hello! 👋";
pub const DEFAULT_COMPANY_NAME: &str = "Company Name";
pub const DEFAULT_AGENT_NAME: &str = "Support Team";
pub const DEFAULT_PRIMARY_COLOR: &str = "#25D366";
pub const DEFAULT_OPENS_AT: &str = "09:00";
pub const DEFAULT_CLOSES_AT: &str = "17:00";

/// Viewport corner the widget is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    /// Parse the wire name (`bottom-right` / `bottom-left`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bottom-right" => Some(Self::BottomRight),
            "bottom-left" => Some(Self::BottomLeft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week, ordered Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Lowercase English name, as used for `businessHours` keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }

    /// Look up a weekday by its exact lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }

    /// Map `0 = Sunday .. 6 = Saturday`.
    pub fn from_days_from_sunday(n: u32) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }
}

/// Opening window for one weekday, as raw `HH:MM` strings.
///
/// The strings are kept verbatim; parsing happens when availability is
/// evaluated so that a malformed bound degrades to "unavailable" instead of
/// rejecting the whole configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    pub start: String,
    pub end: String,
}

impl HoursWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for HoursWindow {
    fn default() -> Self {
        Self::new(DEFAULT_OPENS_AT, DEFAULT_CLOSES_AT)
    }
}

/// Weekly schedule. A weekday without an entry is never available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours(BTreeMap<Weekday, HoursWindow>);

impl BusinessHours {
    /// A schedule with no open days.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// The same window on all seven days.
    pub fn every_day(window: HoursWindow) -> Self {
        Self(
            Weekday::ALL
                .into_iter()
                .map(|day| (day, window.clone()))
                .collect(),
        )
    }

    pub fn with(mut self, day: Weekday, window: HoursWindow) -> Self {
        self.set(day, window);
        self
    }

    pub fn set(&mut self, day: Weekday, window: HoursWindow) {
        self.0.insert(day, window);
    }

    pub fn get(&self, day: Weekday) -> Option<&HoursWindow> {
        self.0.get(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &HoursWindow)> {
        self.0.iter().map(|(day, window)| (*day, window))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self::every_day(HoursWindow::default())
    }
}

/// Colour theme. Replaced wholesale when supplied, so a caller theme without
/// `primaryColor` leaves the colour unset and the stylesheet fallback applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

impl Theme {
    pub fn unset() -> Self {
        Self {
            primary_color: None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: Some(DEFAULT_PRIMARY_COLOR.to_string()),
        }
    }
}

/// Fully populated widget configuration.
///
/// Deserializing goes through [`WidgetConfig::merged`], so any JSON value is
/// accepted and missing or malformed fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "serde_json::Value")]
pub struct WidgetConfig {
    /// Destination number. Non-digits are stripped when the deep link is built.
    pub phone_number: String,
    /// Shown in the popup and pre-filled as the chat message.
    pub greeting: String,
    pub position: Position,
    pub company_name: String,
    pub agent_name: String,
    /// Empty means "no avatar", rendered as a placeholder.
    pub avatar_url: String,
    pub business_hours: BusinessHours,
    pub theme: Theme,
}

impl WidgetConfig {
    /// Parse JSON text and merge it over the defaults.
    ///
    /// Only syntactically invalid JSON is an error; field-level problems fall
    /// back to defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::merged(&value))
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn avatar(&self) -> Option<&str> {
        if self.avatar_url.is_empty() {
            None
        } else {
            Some(&self.avatar_url)
        }
    }

    pub fn primary_color(&self) -> Option<&str> {
        self.theme.primary_color.as_deref()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            greeting: DEFAULT_GREETING.to_string(),
            position: Position::default(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            avatar_url: String::new(),
            business_hours: BusinessHours::default(),
            theme: Theme::default(),
        }
    }
}
