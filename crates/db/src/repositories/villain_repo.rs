//! Repository for the `villains` table.

use comicgen_core::types::DbId;
use sqlx::PgPool;

use crate::models::villain::{CreateVillain, Villain};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, villain_name, real_name, age, origin, height_cm, weight_kg, \
    eye_color, hair_color, powers, strength_level, speed_level, \
    durability_level, intelligence_level, weaknesses, strengths, \
    description, created_at, updated_at";

/// Provides CRUD operations for villains.
pub struct VillainRepo;

impl VillainRepo {
    /// Insert a new villain, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateVillain) -> Result<Villain, sqlx::Error> {
        let query = format!(
            "INSERT INTO villains \
                 (villain_name, real_name, age, origin, height_cm, weight_kg, \
                  eye_color, hair_color, powers, strength_level, speed_level, \
                  durability_level, intelligence_level, weaknesses, strengths, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Villain>(&query)
            .bind(&input.villain_name)
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

    /// Fetch all villains matching the given ids. May return fewer rows
    /// than ids; callers detect missing ids themselves.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Villain>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM villains WHERE id = ANY($1)");
        sqlx::query_as::<_, Villain>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all villains, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Villain>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM villains ORDER BY created_at DESC");
        sqlx::query_as::<_, Villain>(&query).fetch_all(pool).await
    }
}
