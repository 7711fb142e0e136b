//! Body measurement store
//!
//! Named centimeter values with documented fallback keys, plus standard
//! medium-size tables used when no bespoke measurements are supplied.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Keys consulted when the requested key is missing, in order.
const FALLBACK_KEYS: &[(&str, &str)] = &[("chest", "bust"), ("bust", "chest")];

/// Sizing table selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Mens,
    Womens,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mens => write!(f, "mens"),
            Self::Womens => write!(f, "womens"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mens" | "men" | "m" => Ok(Self::Mens),
            "womens" | "women" | "w" => Ok(Self::Womens),
            _ => Err(format!("Unknown gender: {}. Use 'mens' or 'womens'", s)),
        }
    }
}

/// Men's medium (chest 96.5-101.5 cm)
const MENS_MEDIUM: &[(&str, f64)] = &[
    ("chest", 99.0),
    ("waist", 84.0),
    ("hip", 99.0),
    ("shoulder_width", 46.0),
    ("across_back", 40.0),
    ("neck", 39.0),
    ("sleeve_length", 64.0),
    ("arm_length", 84.0),
    ("bicep", 33.0),
    ("wrist", 17.0),
    ("inseam", 81.0),
    ("outseam", 108.0),
    ("thigh", 61.0),
    ("knee", 40.0),
    ("ankle", 23.0),
    ("rise", 27.0),
    ("height", 178.0),
    ("nape_to_waist", 48.0),
    ("waist_to_hip", 20.0),
];

/// Women's medium (UK 12-14 / US 8-10)
const WOMENS_MEDIUM: &[(&str, f64)] = &[
    ("bust", 96.5),
    ("underbust", 79.0),
    ("waist", 76.0),
    ("hip", 101.5),
    ("shoulder_width", 39.0),
    ("across_back", 36.0),
    ("neck", 35.0),
    ("sleeve_length", 60.0),
    ("arm_length", 78.0),
    ("bicep", 28.0),
    ("wrist", 15.0),
    ("inseam", 79.0),
    ("outseam", 104.0),
    ("thigh", 58.0),
    ("knee", 38.0),
    ("ankle", 22.0),
    ("rise", 26.0),
    ("height", 168.0),
    ("nape_to_waist", 42.0),
    ("waist_to_hip", 20.0),
];

/// Named body measurements in centimeters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measurements {
    values: HashMap<String, f64>,
}

impl Measurements {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    /// Standard medium-size table for the given sizing chart.
    pub fn default_for(gender: Gender) -> Self {
        let table = match gender {
            Gender::Mens => MENS_MEDIUM,
            Gender::Womens => WOMENS_MEDIUM,
        };
        Self {
            values: table
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect(),
        }
    }

    /// Look up a value, consulting the fallback key when the key itself is absent.
    pub fn get(&self, key: &str) -> Option<f64> {
        if let Some(value) = self.values.get(key) {
            return Some(*value);
        }
        FALLBACK_KEYS
            .iter()
            .filter(|(primary, _)| *primary == key)
            .find_map(|(_, fallback)| self.values.get(*fallback).copied())
    }

    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
