//! Villain entity model and DTOs.

use comicgen_core::sanitize::SanitizedRecord;
use comicgen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A villain row from the `villains` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Villain {
    pub id: DbId,
    pub villain_name: String,
    pub real_name: Option<String>,
    pub age: Option<i64>,
    pub origin: Option<String>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<i64>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub powers: Option<String>,
    pub strength_level: Option<i64>,
    pub speed_level: Option<i64>,
    pub durability_level: Option<i64>,
    pub intelligence_level: Option<i64>,
    pub weaknesses: Option<String>,
    pub strengths: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new villain.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVillain {
    pub villain_name: String,
    pub real_name: Option<String>,
    pub age: Option<i64>,
    pub origin: Option<String>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<i64>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub powers: Option<String>,
    pub strength_level: Option<i64>,
    pub speed_level: Option<i64>,
    pub durability_level: Option<i64>,
    pub intelligence_level: Option<i64>,
    pub weaknesses: Option<String>,
    pub strengths: Option<String>,
    pub description: Option<String>,
}

impl CreateVillain {
    /// Build the insert DTO from a sanitized profile record.
    pub fn from_record(record: &SanitizedRecord) -> Self {
        Self {
            villain_name: record.text("villain_name").unwrap_or_default().to_string(),
            real_name: record.text("real_name").map(str::to_string),
            age: record.integer("age"),
            origin: record.text("origin").map(str::to_string),
            height_cm: record.integer("height_cm"),
            weight_kg: record.integer("weight_kg"),
            eye_color: record.text("eye_color").map(str::to_string),
            hair_color: record.text("hair_color").map(str::to_string),
            powers: record.text("powers").map(str::to_string),
            strength_level: record.integer("strength_level"),
            speed_level: record.integer("speed_level"),
            durability_level: record.integer("durability_level"),
            intelligence_level: record.integer("intelligence_level"),
            weaknesses: record.text("weaknesses").map(str::to_string),
            strengths: record.text("strengths").map(str::to_string),
            description: record.text("description").map(str::to_string),
        }
    }
}
