// ==========================================
// Breather Advisor - Domain Type Definitions
// ==========================================
// Closed categorical types used across the rule engine.
// All selection-relevant categories are enums, never free text:
// free text is normalized exactly once at extraction time.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Criticality Class
// ==========================================
// Policy: A/B1/B2 require a breather, C does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criticality {
    A,
    B1,
    B2,
    C,
}

impl Criticality {
    /// Whether the criticality policy requires a breather at all.
    pub fn breather_required(self) -> bool {
        !matches!(self, Criticality::C)
    }

    /// Parse a criticality class from report text. Unrecognized text
    /// yields `None`; the caller falls back to the configured default.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_uppercase().as_str() {
            "A" => Some(Criticality::A),
            "B1" => Some(Criticality::B1),
            "B2" => Some(Criticality::B2),
            "C" => Some(Criticality::C),
            _ => None,
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criticality::A => write!(f, "A"),
            Criticality::B1 => write!(f, "B1"),
            Criticality::B2 => write!(f, "B2"),
            Criticality::C => write!(f, "C"),
        }
    }
}

// ==========================================
// System Type
// ==========================================
// Routes an asset to the splash or circulating processing path and
// selects the matching catalog sump-capacity column and ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    Splash,
    Circulating,
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemType::Splash => write!(f, "splash"),
            SystemType::Circulating => write!(f, "circulating"),
        }
    }
}

// ==========================================
// Result Status
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    NoBreatherRequired,
    Optimal,
    Suboptimal,
    RemoteInstallation,
    NoSolutionFound,
    Error,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::NoBreatherRequired => write!(f, "NO_BREATHER_REQUIRED"),
            ResultStatus::Optimal => write!(f, "OPTIMAL"),
            ResultStatus::Suboptimal => write!(f, "SUBOPTIMAL"),
            ResultStatus::RemoteInstallation => write!(f, "REMOTE_INSTALLATION"),
            ResultStatus::NoSolutionFound => write!(f, "NO_SOLUTION_FOUND"),
            ResultStatus::Error => write!(f, "ERROR"),
        }
    }
}

// ==========================================
// Contamination Index (CI)
// ==========================================
// Derived from contamination-likelihood text via a fixed matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContaminationIndex {
    Low,
    Medium,
    High,
}

impl fmt::Display for ContaminationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContaminationIndex::Low => write!(f, "Low"),
            ContaminationIndex::Medium => write!(f, "Medium"),
            ContaminationIndex::High => write!(f, "High"),
        }
    }
}

// ==========================================
// Water Contact Class (WCCI)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WaterContactClass {
    VeryLow,
    Low,
    Medium,
    High,
}

impl fmt::Display for WaterContactClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaterContactClass::VeryLow => write!(f, "Very Low"),
            WaterContactClass::Low => write!(f, "Low"),
            WaterContactClass::Medium => write!(f, "Medium"),
            WaterContactClass::High => write!(f, "High"),
        }
    }
}

// ==========================================
// Service Level (ESI)
// ==========================================
// Whether an extended-service breather variant is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    Basic,
    Extended,
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceLevel::Basic => write!(f, "basic"),
            ServiceLevel::Extended => write!(f, "Extended service"),
        }
    }
}

// ==========================================
// Humidity Level
// ==========================================
// High when the parsed average relative humidity is >= 75%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumidityLevel {
    Normal,
    High,
}

impl fmt::Display for HumidityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HumidityLevel::Normal => write!(f, "Normal"),
            HumidityLevel::High => write!(f, "High"),
        }
    }
}

// ==========================================
// Vibration Duty
// ==========================================
// Unparseable vibration text falls back to Standard (Low/Medium
// assumption), logged as a warning rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VibrationDuty {
    Standard,
    HeavyDuty,
}

impl fmt::Display for VibrationDuty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VibrationDuty::Standard => write!(f, "Low/Medium"),
            VibrationDuty::HeavyDuty => write!(f, "High (>0.4 ips)"),
        }
    }
}

// ==========================================
// Volume Calculation Method
// ==========================================
// Which data source produced the volumetric estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMethod {
    OilCapacity,
    Dimensions,
    InsufficientData,
}

impl fmt::Display for VolumeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeMethod::OilCapacity => write!(f, "oil_capacity"),
            VolumeMethod::Dimensions => write!(f, "dimensions"),
            VolumeMethod::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

// ==========================================
// Product Type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Disposable,
    Rebuildable,
}

impl ProductType {
    /// Parse catalog `Type` text. Matching is substring-based and
    /// case-insensitive, tolerating values like "Rebuildable unit".
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if t.contains("rebuildable") {
            Some(ProductType::Rebuildable)
        } else if t.contains("disposable") {
            Some(ProductType::Disposable)
        } else {
            None
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Disposable => write!(f, "Disposable"),
            ProductType::Rebuildable => write!(f, "Rebuildable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criticality_policy() {
        assert!(Criticality::A.breather_required());
        assert!(Criticality::B1.breather_required());
        assert!(Criticality::B2.breather_required());
        assert!(!Criticality::C.breather_required());
    }

    #[test]
    fn test_criticality_parse() {
        assert_eq!(Criticality::parse(" b1 "), Some(Criticality::B1));
        assert_eq!(Criticality::parse("X"), None);
    }

    #[test]
    fn test_product_type_parse_substring() {
        assert_eq!(
            ProductType::parse("Rebuildable (multi-use)"),
            Some(ProductType::Rebuildable)
        );
        assert_eq!(ProductType::parse("disposable"), Some(ProductType::Disposable));
        assert_eq!(ProductType::parse("unknown"), None);
    }
}
