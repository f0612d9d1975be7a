//! Repository for the `heroes` table.

use comicgen_core::types::DbId;
use sqlx::PgPool;

use crate::models::hero::{CreateHero, Hero};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, hero_name, real_name, age, origin, height_cm, weight_kg, \
    eye_color, hair_color, powers, strength_level, speed_level, \
    durability_level, intelligence_level, weaknesses, strengths, \
    description, created_at, updated_at";

/// Provides CRUD operations for heroes.
pub struct HeroRepo;

impl HeroRepo {
    /// Insert a new hero, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHero) -> Result<Hero, sqlx::Error> {
        let query = format!(
            "INSERT INTO heroes \
                 (hero_name, real_name, age, origin, height_cm, weight_kg, \
                  eye_color, hair_color, powers, strength_level, speed_level, \
                  durability_level, intelligence_level, weaknesses, strengths, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hero>(&query)
            .bind(&input.hero_name)
            .bind(&input.real_name)
            .bind(input.age)
            .bind(&input.origin)
            .bind(input.height_cm)
            .bind(input.weight_kg)
            .bind(&input.eye_color)
            .bind(&input.hair_color)
            .bind(&input.powers)
            .bind(input.strength_level)
            .bind(input.speed_level)
            .bind(input.durability_level)
            .bind(input.intelligence_level)
            .bind(&input.weaknesses)
            .bind(&input.strengths)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Fetch all heroes matching the given ids. The result may be shorter
    /// than `ids` when some ids do not exist; callers detect missing ids
    /// themselves.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Hero>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE id = ANY($1)");
        sqlx::query_as::<_, Hero>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all heroes, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes ORDER BY created_at DESC");
        sqlx::query_as::<_, Hero>(&query).fetch_all(pool).await
    }
}
