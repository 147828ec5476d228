use serde::{Deserialize, Serialize};
use std::fmt;

/// Connector category used to filter the station search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingType {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "DCFast")]
    DcFast,
    #[serde(rename = "Level2")]
    Level2,
    #[serde(rename = "Level1")]
    Level1,
}

impl ChargingType {
    /// Selector order
    pub const ALL_TYPES: [ChargingType; 4] = [
        ChargingType::All,
        ChargingType::DcFast,
        ChargingType::Level2,
        ChargingType::Level1,
    ];

    /// Wire value sent to the station service
    pub fn as_str(&self) -> &str {
        match self {
            ChargingType::All => "ALL",
            ChargingType::DcFast => "DCFast",
            ChargingType::Level2 => "Level2",
            ChargingType::Level1 => "Level1",
        }
    }

    /// Human-readable label shown in the selector
    pub fn label(&self) -> &str {
        match self {
            ChargingType::All => "All Types",
            ChargingType::DcFast => "DC Fast Charging",
            ChargingType::Level2 => "Level 2 Charging",
            ChargingType::Level1 => "Level 1 Charging",
        }
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL_TYPES[(idx + 1) % Self::ALL_TYPES.len()]
    }

    pub fn previous(self) -> Self {
        let idx = self.index();
        let len = Self::ALL_TYPES.len();
        Self::ALL_TYPES[(idx + len - 1) % len]
    }

    fn index(self) -> usize {
        Self::ALL_TYPES
            .iter()
            .position(|t| *t == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for ChargingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request body for the nearest-stations endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub charging_type: ChargingType,
}

/// Port count as reported by the station service.
///
/// The service is loose about the type: counts arrive as integers, floats,
/// numeric strings or empty strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PortCount {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PortCount {
    /// True when the value carries no count (empty string)
    pub fn is_blank(&self) -> bool {
        matches!(self, PortCount::Text(s) if s.is_empty())
    }
}

impl fmt::Display for PortCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortCount::Integer(n) => write!(f, "{}", n),
            PortCount::Float(n) => write!(f, "{}", n),
            PortCount::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub ev_dc_fast: Option<PortCount>,
    #[serde(default)]
    pub ev_level2: Option<PortCount>,
    #[serde(default)]
    pub ev_level1: Option<PortCount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub station: Station,
    pub distance_meters: f64,
}

/// Stations in the order the service returned them
pub type SearchResultSet = Vec<StationResult>;
