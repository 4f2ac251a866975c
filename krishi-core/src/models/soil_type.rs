use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    Loamy,
    Clay,
    Silt,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Silt,
    ];
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilType::Sandy => write!(f, "Sandy"),
            SoilType::Loamy => write!(f, "Loamy"),
            SoilType::Clay => write!(f, "Clay"),
            SoilType::Silt => write!(f, "Silt"),
        }
    }
}

impl FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandy" => Ok(SoilType::Sandy),
            "loamy" => Ok(SoilType::Loamy),
            "clay" => Ok(SoilType::Clay),
            "silt" => Ok(SoilType::Silt),
            _ => Err(format!(
                "Invalid soil type '{}'. Valid options: Sandy, Loamy, Clay, Silt",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_type_from_str() {
        assert_eq!(SoilType::from_str("clay").unwrap(), SoilType::Clay);
        assert_eq!(SoilType::from_str("SANDY").unwrap(), SoilType::Sandy);
        assert_eq!(SoilType::from_str(" Loamy ").unwrap(), SoilType::Loamy);
        assert_eq!(SoilType::from_str("silt").unwrap(), SoilType::Silt);
    }

    #[test]
    fn test_soil_type_from_str_invalid() {
        let err = SoilType::from_str("gravel").unwrap_err();
        assert!(err.contains("Valid options"));
        assert!(SoilType::from_str("").is_err());
    }

    #[test]
    fn test_soil_type_json_uses_display_name() {
        let json = serde_json::to_string(&SoilType::Clay).unwrap();
        assert_eq!(json, "\"Clay\"");

        let parsed: SoilType = serde_json::from_str("\"Silt\"").unwrap();
        assert_eq!(parsed, SoilType::Silt);
    }
}
