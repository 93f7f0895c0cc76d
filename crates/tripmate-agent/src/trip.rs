//! Trip preferences as collected by the planner form.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of choices whose serialized form is the label
/// shown in the form's select box.
macro_rules! labeled_choice {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, what = $what:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn labels() -> impl Iterator<Item = &'static str> {
                Self::ALL.iter().map(|choice| choice.label())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = AgentError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| AgentError::invalid_input(format!("unknown {} '{}'", $what, s)))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labeled_choice! {
    /// Kind of trip, as offered in the "Trip Type" select box.
    TripCategory, default = Adventure, what = "trip type" {
        Adventure => "Adventure",
        Relaxation => "Relaxation",
        Culture => "Culture",
        Food => "Food",
        NatureWildlife => "Nature & Wildlife",
        BeachIslands => "Beach & Islands",
        HistoryHeritage => "History & Heritage",
        Honeymoon => "Honeymoon",
        FamilyFriendly => "Family Friendly",
        Luxury => "Luxury",
        Backpacking => "Backpacking",
        ReligiousSpiritual => "Religious / Spiritual",
        SoloTravel => "Solo Travel",
        Shopping => "Shopping",
        FestivalsEvents => "Festivals & Events",
    }
}

labeled_choice! {
    /// Travel month. Only the summer season is offered.
    Month, default = June, what = "month" {
        June => "June",
        July => "July",
        August => "August",
        September => "September",
    }
}

labeled_choice! {
    Budget, default = Low, what = "budget" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

/// Trip length in days, bounded like the duration slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TripDuration(u32);

impl TripDuration {
    pub const MIN: u32 = 3;
    pub const MAX: u32 = 30;
    pub const DEFAULT: u32 = 7;

    pub fn new(days: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(AgentError::invalid_input(format!(
                "trip duration must be between {} and {} days, got {}",
                Self::MIN,
                Self::MAX,
                days
            )))
        }
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl Default for TripDuration {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated preferences for one submission. Lives only long enough to be
/// turned into a prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripRequest {
    pub category: TripCategory,
    pub days: TripDuration,
    pub month: Month,
    pub budget: Budget,
    pub hint: Option<String>,
    pub description: String,
}

impl TripRequest {
    pub fn new(
        category: TripCategory,
        days: TripDuration,
        month: Month,
        budget: Budget,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            days,
            month,
            budget,
            hint: None,
            description: description.into(),
        }
    }

    /// An empty hint means no hint. Anything else, whitespace included, is
    /// kept as typed.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        self.hint = if hint.is_empty() { None } else { Some(hint) };
        self
    }
}

/// Raw form submission, accepted both as `application/x-www-form-urlencoded`
/// and as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub trip_type: TripCategory,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub month: Month,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub dark_mode: bool,
}

fn default_days() -> u32 {
    TripDuration::DEFAULT
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            trip_type: TripCategory::default(),
            days: default_days(),
            month: Month::default(),
            budget: Budget::default(),
            hint: String::new(),
            query: String::new(),
            dark_mode: false,
        }
    }
}

impl TripForm {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn to_request(&self) -> Result<TripRequest> {
        let days = TripDuration::new(self.days)?;
        Ok(TripRequest::new(self.trip_type, days, self.month, self.budget, &self.query)
            .with_hint(&self.hint))
    }
}

/// HTML checkboxes submit `on` when ticked and nothing otherwise.
fn deserialize_checkbox<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Checkbox {
        Bool(bool),
        Text(String),
    }

    Ok(match Checkbox::deserialize(deserializer)? {
        Checkbox::Bool(value) => value,
        Checkbox::Text(text) => matches!(text.to_ascii_lowercase().as_str(), "on" | "true" | "1" | "yes"),
    })
}
