//! Hero entity model and DTOs.

use comicgen_core::sanitize::SanitizedRecord;
use comicgen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A hero row from the `heroes` table.
///
/// Every profile attribute except the name is nullable; the backend is
/// allowed to leave attributes unknown.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hero {
    pub id: DbId,
    pub hero_name: String,
    pub real_name: Option<String>,
    pub age: Option<i64>,
    pub origin: Option<String>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<i64>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    /// Comma-separated list of powers.
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

/// DTO for inserting a new hero.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHero {
    pub hero_name: String,
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

impl CreateHero {
    /// Build the insert DTO from a sanitized profile record.
    ///
    /// The hero schema guarantees `hero_name` is present; unknown optional
    /// fields stay NULL.
    pub fn from_record(record: &SanitizedRecord) -> Self {
        Self {
            hero_name: record.text("hero_name").unwrap_or_default().to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use comicgen_core::profile::HERO_SCHEMA;
    use comicgen_core::sanitize::sanitize;

    #[test]
    fn from_record_keeps_unknowns_null() {
        let record =
            sanitize(r#"{"hero_name":"Wolverine","age":150,"powers":"Healing, Claws"}"#, HERO_SCHEMA)
                .unwrap();
        let dto = CreateHero::from_record(&record);

        assert_eq!(dto.hero_name, "Wolverine");
        assert_eq!(dto.age, Some(150));
        assert_eq!(dto.powers.as_deref(), Some("Healing, Claws"));
        assert_eq!(dto.real_name, None);
        assert_eq!(dto.strength_level, None);
    }
}
