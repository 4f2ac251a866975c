//! Record form validation.
//!
//! A [`RecordForm`] holds raw form state exactly as typed. [`validate`] is the
//! all-or-nothing gate on the required field set; nothing may be submitted
//! while it fails. [`RecordForm::parse`] runs the gate and then converts the
//! strings into a typed [`NewRecord`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{NewRecord, SoilType};

/// Date format used by the form and the wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields that must be filled before a record can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    CropName,
    PlantingDate,
    AreaOfPlantation,
    SoilType,
    Location,
}

impl RequiredField {
    pub const ALL: [RequiredField; 5] = [
        RequiredField::CropName,
        RequiredField::PlantingDate,
        RequiredField::AreaOfPlantation,
        RequiredField::SoilType,
        RequiredField::Location,
    ];

    /// Human-readable label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::CropName => "Crop name",
            RequiredField::PlantingDate => "Planting date",
            RequiredField::AreaOfPlantation => "Area of plantation",
            RequiredField::SoilType => "Soil type",
            RequiredField::Location => "Location",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in required fields: {}", join_labels(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(RequiredField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw record form state.
///
/// Every field is kept as text so half-filled forms can be represented. The
/// area also accepts a JSON number, which is what API clients send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordForm {
    pub crop_name: String,
    pub planting_date: String,
    pub expected_harvest: String,
    #[serde(deserialize_with = "text_or_number")]
    pub area_of_plantation: String,
    pub soil_type: String,
    pub location: String,
    pub notes: String,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(f64),
    }

    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

impl RecordForm {
    fn value(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::CropName => &self.crop_name,
            RequiredField::PlantingDate => &self.planting_date,
            RequiredField::AreaOfPlantation => &self.area_of_plantation,
            RequiredField::SoilType => &self.soil_type,
            RequiredField::Location => &self.location,
        }
    }

    /// Validate and convert into a typed record.
    pub fn parse(&self) -> Result<NewRecord, ValidationError> {
        validate(self)?;

        let planting_date = parse_date("planting date", &self.planting_date)?;
        let expected_harvest = match self.expected_harvest.trim() {
            "" => None,
            s => Some(parse_date("expected harvest", s)?),
        };

        let area = self
            .area_of_plantation
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidField {
                field: "area of plantation",
                reason: format!("'{}' is not a number", self.area_of_plantation.trim()),
            })?;

        let soil_type = self
            .soil_type
            .parse::<SoilType>()
            .map_err(|reason| ValidationError::InvalidField {
                field: "soil type",
                reason,
            })?;

        let mut record = NewRecord::new(
            self.crop_name.trim(),
            planting_date,
            area,
            soil_type,
            self.location.trim(),
        );
        record.expected_harvest = expected_harvest;
        let notes = self.notes.trim();
        if !notes.is_empty() {
            record.notes = Some(notes.to_string());
        }

        record.validate()?;
        Ok(record)
    }
}

impl From<&NewRecord> for RecordForm {
    fn from(record: &NewRecord) -> Self {
        Self {
            crop_name: record.crop_name.clone(),
            planting_date: record.planting_date.format(DATE_FORMAT).to_string(),
            expected_harvest: record
                .expected_harvest
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            area_of_plantation: record.area_of_plantation.to_string(),
            soil_type: record.soil_type.to_string(),
            location: record.location.clone(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidField {
            field,
            reason: format!("'{}' is not a YYYY-MM-DD date", value.trim()),
        }
    })
}

/// Required fields that are blank in the form, in display order.
pub fn missing_fields(form: &RecordForm) -> Vec<RequiredField> {
    RequiredField::ALL
        .into_iter()
        .filter(|field| form.value(*field).trim().is_empty())
        .collect()
}

/// The submission gate: passes only when every required field is filled.
pub fn validate(form: &RecordForm) -> Result<(), ValidationError> {
    let missing = missing_fields(form);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

impl NewRecord {
    /// Check the persistence invariant on an already-typed record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.crop_name.trim().is_empty() {
            missing.push(RequiredField::CropName);
        }
        if self.location.trim().is_empty() {
            missing.push(RequiredField::Location);
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if !self.area_of_plantation.is_finite() || self.area_of_plantation <= 0.0 {
            return Err(ValidationError::InvalidField {
                field: "area of plantation",
                reason: "must be a positive number".to_string(),
            });
        }
        Ok(())
    }
}
