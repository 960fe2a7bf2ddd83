use batchpress::application::ports::{JobRepository, JobUpdate, RepositoryError};
use batchpress::domain::{Job, JobId, JobStatus, Row, SerialNumber};
use batchpress::infrastructure::persistence::InMemoryJobRepository;

fn sample_row() -> Row {
    Row::new(
        SerialNumber::Digits("1".to_string()),
        "Widget".to_string(),
        vec!["https://img.test/a.jpg".to_string()],
    )
}

#[tokio::test]
async fn given_new_job_when_created_then_it_can_be_fetched() {
    let repository = InMemoryJobRepository::new();
    let job = Job::new("https://hooks.test/done");

    repository.create(&job).await.expect("create");

    let fetched = repository
        .get_by_id(job.id)
        .await
        .expect("lookup")
        .expect("job exists");
    assert_eq!(fetched, job);
}

#[tokio::test]
async fn given_existing_id_when_created_again_then_constraint_violation_is_returned() {
    let repository = InMemoryJobRepository::new();
    let job = Job::new("https://hooks.test/done");
    repository.create(&job).await.expect("create");

    let result = repository.create(&job).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_unknown_id_when_fetched_then_none_is_returned() {
    let repository = InMemoryJobRepository::new();

    assert!(repository.get_by_id(JobId::new()).await.expect("lookup").is_none());
}

#[tokio::test]
async fn given_unknown_id_when_updated_then_update_is_a_no_op() {
    let repository = InMemoryJobRepository::new();
    let id = JobId::new();

    repository
        .update(id, JobUpdate::failed("nope"))
        .await
        .expect("unknown ids are ignored");

    assert!(repository.get_by_id(id).await.expect("lookup").is_none());
}

#[tokio::test]
async fn given_partial_update_when_applied_then_only_given_fields_change() {
    let repository = InMemoryJobRepository::new();
    let job = Job::new("https://hooks.test/done");
    repository.create(&job).await.expect("create");

    repository
        .update(job.id, JobUpdate::rows(vec![sample_row()]))
        .await
        .expect("update");

    let fetched = repository
        .get_by_id(job.id)
        .await
        .expect("lookup")
        .expect("job exists");
    assert_eq!(fetched.status, JobStatus::Processing);
    assert_eq!(fetched.message, job.message);
    assert_eq!(fetched.rows, vec![sample_row()]);
    assert!(fetched.updated_at >= job.updated_at);
}

#[tokio::test]
async fn given_completed_job_when_moved_back_to_processing_then_transition_is_rejected() {
    let repository = InMemoryJobRepository::new();
    let job = Job::new("https://hooks.test/done");
    repository.create(&job).await.expect("create");
    repository
        .update(
            job.id,
            JobUpdate::completed(vec![sample_row()], "report".to_string(), "done"),
        )
        .await
        .expect("complete");

    let result = repository
        .update(
            job.id,
            JobUpdate {
                status: Some(JobStatus::Processing),
                ..JobUpdate::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RepositoryError::InvalidTransition(_))));
    let fetched = repository
        .get_by_id(job.id)
        .await
        .expect("lookup")
        .expect("job exists");
    assert_eq!(fetched.status, JobStatus::Completed);
    assert_eq!(fetched.report.as_deref(), Some("report"));
}

#[tokio::test]
async fn given_failed_job_when_marked_failed_again_then_transition_is_rejected() {
    let repository = InMemoryJobRepository::new();
    let job = Job::new("https://hooks.test/done");
    repository.create(&job).await.expect("create");
    repository
        .update(job.id, JobUpdate::failed("first"))
        .await
        .expect("fail");

    let result = repository.update(job.id, JobUpdate::failed("second")).await;

    assert!(matches!(result, Err(RepositoryError::InvalidTransition(_))));
}
