use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::soil_type::SoilType;
use crate::record_id::RecordId;

/// A farm record as stored and returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub crop_name: String,
    pub planting_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest: Option<NaiveDate>,
    pub area_of_plantation: f64, // hectares
    pub soil_type: SoilType,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Record fields supplied by a submitter, before an id and creation time exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub crop_name: String,
    pub planting_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest: Option<NaiveDate>,
    pub area_of_plantation: f64,
    pub soil_type: SoilType,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewRecord {
    pub fn new(
        crop_name: impl Into<String>,
        planting_date: NaiveDate,
        area_of_plantation: f64,
        soil_type: SoilType,
        location: impl Into<String>,
    ) -> Self {
        Self {
            crop_name: crop_name.into(),
            planting_date,
            expected_harvest: None,
            area_of_plantation,
            soil_type,
            location: location.into(),
            notes: None,
        }
    }

    pub fn with_expected_harvest(mut self, date: NaiveDate) -> Self {
        self.expected_harvest = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attach the identity and creation time assigned by whoever persists it.
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> Record {
        Record {
            id,
            crop_name: self.crop_name,
            planting_date: self.planting_date,
            expected_harvest: self.expected_harvest,
            area_of_plantation: self.area_of_plantation,
            soil_type: self.soil_type,
            location: self.location,
            notes: self.notes,
            created_at,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.crop_name)?;
        writeln!(f, "{}", "=".repeat(self.crop_name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Planted: {}", self.planting_date)?;
        if let Some(harvest) = self.expected_harvest {
            writeln!(f, "Expected harvest: {}", harvest)?;
        }
        writeln!(f, "Area: {} ha", self.area_of_plantation)?;
        writeln!(f, "Soil: {}", self.soil_type)?;
        writeln!(f, "Location: {}", self.location)?;
        if let Some(notes) = &self.notes {
            writeln!(f, "\nNotes:\n  {}", notes)?;
        }
        writeln!(f, "\nAdded: {}", self.created_at.format("%Y-%m-%d %H:%M"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> NewRecord {
        NewRecord::new(
            "Rice",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            2.5,
            SoilType::Clay,
            "Plot A",
        )
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let now = Utc::now();
        let id = RecordId::generate();
        let record = rice().with_notes("first sowing").into_record(id.clone(), now);

        assert_eq!(record.id, id);
        assert_eq!(record.crop_name, "Rice");
        assert_eq!(record.area_of_plantation, 2.5);
        assert_eq!(record.soil_type, SoilType::Clay);
        assert_eq!(record.location, "Plot A");
        assert_eq!(record.notes.as_deref(), Some("first sowing"));
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let record = rice().into_record(RecordId::parse("abc").unwrap(), Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["cropName"], "Rice");
        assert_eq!(json["plantingDate"], "2024-06-01");
        assert_eq!(json["areaOfPlantation"], 2.5);
        assert_eq!(json["soilType"], "Clay");
        assert!(json.get("expectedHarvest").is_none());
        assert!(json.get("notes").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_record_accepts_underscore_id() {
        let json = r#"{
            "_id": "665b1c2f",
            "cropName": "Wheat",
            "plantingDate": "2024-11-10",
            "areaOfPlantation": 1.0,
            "soilType": "Loamy",
            "location": "North field",
            "createdAt": "2024-11-10T08:00:00Z"
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "665b1c2f");
        assert_eq!(record.soil_type, SoilType::Loamy);
        assert!(record.expected_harvest.is_none());
    }

    #[test]
    fn test_record_display() {
        let record = rice()
            .with_expected_harvest(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
            .into_record(RecordId::generate(), Utc::now());

        let output = format!("{}", record);
        assert!(output.contains("Rice"));
        assert!(output.contains("Planted: 2024-06-01"));
        assert!(output.contains("Expected harvest: 2024-10-01"));
        assert!(output.contains("Soil: Clay"));
    }

    #[test]
    fn test_display_underline_matches_non_ascii_name() {
        let mut new_record = rice();
        new_record.crop_name = "धान".to_string();
        let record = new_record.into_record(RecordId::generate(), Utc::now());

        let output = format!("{}", record);
        let underline = output.lines().nth(1).unwrap();
        assert_eq!(underline, "===");
    }
}
