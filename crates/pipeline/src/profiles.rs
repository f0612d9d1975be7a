//! Synchronous profile generation for entity creation.
//!
//! Unlike comic generation, profile creation runs inside the HTTP request:
//! the caller asked for a single entity and waits for it. The same
//! retry/sanitize machinery applies; failures surface as a [`JobFailure`]
//! the API maps onto an error response.

use comicgen_core::job::JobFailure;
use comicgen_core::profile::{HERO_SCHEMA, VILLAIN_SCHEMA};
use comicgen_db::models::hero::CreateHero;
use comicgen_db::models::villain::CreateVillain;
use comicgen_llm::retry::RetryConfig;
use comicgen_llm::TextGenerator;

use crate::generation::generate_record;
use crate::prompt;

/// Generate a full hero profile for a name.
pub async fn generate_hero_profile(
    backend: &dyn TextGenerator,
    retry: &RetryConfig,
    hero_name: &str,
) -> Result<CreateHero, JobFailure> {
    let prompt = prompt::hero_profile_prompt(hero_name);
    let record = generate_record(backend, retry, &prompt, HERO_SCHEMA).await?;
    Ok(CreateHero::from_record(&record))
}

/// Generate a full villain profile for a name.
pub async fn generate_villain_profile(
    backend: &dyn TextGenerator,
    retry: &RetryConfig,
    villain_name: &str,
) -> Result<CreateVillain, JobFailure> {
    let prompt = prompt::villain_profile_prompt(villain_name);
    let record = generate_record(backend, retry, &prompt, VILLAIN_SCHEMA).await?;
    Ok(CreateVillain::from_record(&record))
}
