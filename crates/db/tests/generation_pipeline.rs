//! Integration tests for the generation job queue and artifact storage.
//!
//! Exercises claim semantics, monotonic terminal transitions, and the
//! keyed artifact upsert against a real database.

use comicgen_core::job::JobErrorKind;
use comicgen_db::models::comic::CreateComic;
use comicgen_db::models::hero::CreateHero;
use comicgen_db::models::job::SubmitGenerationJob;
use comicgen_db::models::status::GenerationJobStatus;
use comicgen_db::repositories::{ComicRepo, HeroRepo, JobRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn submit_input(hero_ids: Vec<i64>, villain_ids: Vec<i64>) -> SubmitGenerationJob {
    SubmitGenerationJob {
        hero_ids,
        villain_ids,
    }
}

fn comic_input(task_id: Uuid, title: &str) -> CreateComic {
    CreateComic {
        task_id,
        hero_ids: vec![1],
        villain_ids: vec![2],
        title: title.to_string(),
        summary: "A long tale of triumph.".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Queue semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_creates_queued_job(pool: PgPool) {
    let task_id = Uuid::new_v4();
    let job = JobRepo::submit(&pool, task_id, &submit_input(vec![1, 2], vec![3]))
        .await
        .unwrap();

    assert_eq!(job.task_id, task_id);
    assert_eq!(job.status_id, GenerationJobStatus::Queued.id());
    assert_eq!(job.hero_ids.0, vec![1, 2]);
    assert_eq!(job.villain_ids.0, vec![3]);
    assert!(job.started_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_input_sequences_are_accepted(pool: PgPool) {
    let job = JobRepo::submit(&pool, Uuid::new_v4(), &submit_input(vec![], vec![]))
        .await
        .unwrap();
    assert!(job.hero_ids.0.is_empty());
    assert!(job.villain_ids.0.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_moves_oldest_queued_job_to_running(pool: PgPool) {
    let first = Uuid::new_v4();
    JobRepo::submit(&pool, first, &submit_input(vec![1], vec![2]))
        .await
        .unwrap();
    JobRepo::submit(&pool, Uuid::new_v4(), &submit_input(vec![3], vec![4]))
        .await
        .unwrap();

    let claimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();
    assert_eq!(claimed.task_id, first);
    assert_eq!(claimed.status_id, GenerationJobStatus::Running.id());
    assert!(claimed.started_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_on_empty_queue_returns_none(pool: PgPool) {
    assert!(JobRepo::claim_next(&pool).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminal_jobs_are_never_reclaimed(pool: PgPool) {
    JobRepo::submit(&pool, Uuid::new_v4(), &submit_input(vec![1], vec![2]))
        .await
        .unwrap();
    let claimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();
    JobRepo::fail(&pool, claimed.id, JobErrorKind::NoJsonFound, "no idea")
        .await
        .unwrap();

    assert!(JobRepo::claim_next(&pool).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Monotonic terminal transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_reports_whether_transition_happened(pool: PgPool) {
    let task_id = Uuid::new_v4();
    JobRepo::submit(&pool, task_id, &submit_input(vec![1], vec![2]))
        .await
        .unwrap();
    let claimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();
    let comic = ComicRepo::create_for_task(&pool, &comic_input(task_id, "First"))
        .await
        .unwrap();

    assert!(JobRepo::complete(&pool, claimed.id, comic.id).await.unwrap());
    // Second delivery: the transition already happened, must report false.
    assert!(!JobRepo::complete(&pool, claimed.id, comic.id).await.unwrap());

    let job = JobRepo::find_by_task_id(&pool, task_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, GenerationJobStatus::Succeeded.id());
    assert_eq!(job.comic_id, Some(comic.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fail_records_kind_and_message_once(pool: PgPool) {
    let task_id = Uuid::new_v4();
    JobRepo::submit(&pool, task_id, &submit_input(vec![99], vec![]))
        .await
        .unwrap();
    let claimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();

    assert!(
        JobRepo::fail(&pool, claimed.id, JobErrorKind::UnknownEntity, "hero 99 not found")
            .await
            .unwrap()
    );
    assert!(
        !JobRepo::fail(&pool, claimed.id, JobErrorKind::BackendUnavailable, "late")
            .await
            .unwrap()
    );

    let job = JobRepo::find_by_task_id(&pool, task_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.status_id, GenerationJobStatus::Failed.id());
    assert_eq!(job.error_kind.as_deref(), Some("unknown_entity"));
    assert_eq!(job.error_message.as_deref(), Some("hero 99 not found"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn requeue_stale_running_resets_unclaimed_work(pool: PgPool) {
    JobRepo::submit(&pool, Uuid::new_v4(), &submit_input(vec![1], vec![2]))
        .await
        .unwrap();
    JobRepo::claim_next(&pool).await.unwrap().unwrap();

    let reset = JobRepo::requeue_stale_running(&pool).await.unwrap();
    assert_eq!(reset, 1);

    // The job is claimable again.
    let reclaimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();
    assert_eq!(reclaimed.status_id, GenerationJobStatus::Running.id());
}

// ---------------------------------------------------------------------------
// Artifact idempotence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn redelivered_task_never_creates_second_comic(pool: PgPool) {
    let task_id = Uuid::new_v4();

    let first = ComicRepo::create_for_task(&pool, &comic_input(task_id, "Original"))
        .await
        .unwrap();
    let second = ComicRepo::create_for_task(&pool, &comic_input(task_id, "Duplicate"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Original");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comics WHERE task_id = $1")
        .bind(task_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

// ---------------------------------------------------------------------------
// Entity storage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn hero_roundtrip_and_partial_lookup(pool: PgPool) {
    let batman = HeroRepo::create(
        &pool,
        &CreateHero {
            hero_name: "Batman".to_string(),
            real_name: Some("Bruce Wayne".to_string()),
            age: Some(38),
            origin: None,
            height_cm: None,
            weight_kg: None,
            eye_color: None,
            hair_color: None,
            powers: Some("Martial Arts, Gadgets".to_string()),
            strength_level: Some(85),
            speed_level: None,
            durability_level: None,
            intelligence_level: None,
            weaknesses: None,
            strengths: None,
            description: None,
        },
    )
    .await
    .unwrap();

    let found = HeroRepo::find_by_ids(&pool, &[batman.id, 9999]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].hero_name, "Batman");
    assert_eq!(found[0].age, Some(38));
}
