use std::sync::Arc;

use batchpress::application::ports::{WebhookNotifier, WebhookStatus};
use batchpress::application::services::{IntakeError, IntakeService};
use batchpress::domain::{JobStatus, SerialNumber};
use batchpress::infrastructure::tabular::CsvRowParser;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{TestPipeline, png_bytes, wait_for_terminal};

const CALLBACK_URL: &str = "https://hooks.test/done";

fn intake(pipeline: &TestPipeline) -> IntakeService {
    IntakeService::new(
        Arc::new(CsvRowParser),
        pipeline.repository(),
        Arc::clone(&pipeline.notifier) as Arc<dyn WebhookNotifier>,
        Arc::clone(&pipeline.batch_processor),
    )
}

#[tokio::test]
async fn given_valid_csv_when_admitted_then_job_is_stored_and_processed_in_background() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(&server)
        .await;

    let pipeline = TestPipeline::new();
    let csv = format!(
        "Serial Number,Product Name,Input Image Urls\n1,Widget,\"{0}/a.png,{0}/b.png\"\n",
        server.uri()
    );

    let job_id = intake(&pipeline)
        .admit(CALLBACK_URL, csv.as_bytes())
        .await
        .expect("batch should be admitted");

    let job = wait_for_terminal(pipeline.repository().as_ref(), job_id).await;
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.callback_url, CALLBACK_URL);
    assert_eq!(job.rows.len(), 1);
    assert_eq!(job.rows[0].serial_number, SerialNumber::Digits("1".to_string()));
    assert!(job.rows[0].output_image_urls.iter().all(Option::is_some));
}

#[tokio::test]
async fn given_invalid_url_when_admitted_then_job_fails_without_any_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = TestPipeline::new();
    let csv = format!(
        "Serial Number,Product Name,Input Image Urls\n1,Widget,{}/a.png\n2,Gadget,bad-url\n",
        server.uri()
    );

    let err = intake(&pipeline)
        .admit(CALLBACK_URL, csv.as_bytes())
        .await
        .expect_err("batch should be rejected");

    let IntakeError::Validation(validation) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(validation.index, 1);

    let calls = pipeline.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, WebhookStatus::Failed);
    assert_eq!(calls[0].callback_url, CALLBACK_URL);

    let job = pipeline
        .repository()
        .get_by_id(calls[0].job_id)
        .await
        .expect("lookup")
        .expect("failed job should still be recorded");
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.message.starts_with("Validation error in row at index 1"));
    assert!(job.rows.is_empty());
}

#[tokio::test]
async fn given_csv_without_required_column_when_admitted_then_parse_error_fails_job() {
    let pipeline = TestPipeline::new();

    let err = intake(&pipeline)
        .admit(CALLBACK_URL, b"Serial Number,Name\n1,Widget\n")
        .await
        .expect_err("batch should be rejected");

    assert!(matches!(err, IntakeError::Parse(_)));
    let calls = pipeline.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert!(
        calls[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Product Name"))
    );
}
