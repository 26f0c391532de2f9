use cloud_pager::errors::Error;
use cloud_pager::jobs::{JobClient, JobReference, JobState, ListJobsOptions};
use cloud_pager::poll::{DeadlinePoller, ManualClock, PollSettings};
use cloud_pager::sim::{InMemoryJobService, SimError};

fn client(total: usize) -> JobClient<InMemoryJobService> {
    JobClient::new(InMemoryJobService::new("proj", total))
}

#[test]
fn test_list_jobs_concatenates_pages() {
    let client = client(23);

    let ids: Vec<String> = client
        .list_jobs("proj", ListJobsOptions::new().with_page_size(10))
        .unwrap()
        .map(|job| job.unwrap().reference.job_id)
        .collect();

    assert_eq!(ids.len(), 23);
    assert_eq!(ids.first().map(String::as_str), Some("job-0001"));
    assert_eq!(ids.last().map(String::as_str), Some("job-0023"));

    let requests = client.service().list_requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.page.page_size == Some(10)));
    assert_eq!(requests[0].page.page_token, None);
    assert_eq!(requests[1].page.page_token.as_deref(), Some("10"));
    assert_eq!(requests[2].page.page_token.as_deref(), Some("20"));
}

#[test]
fn test_list_jobs_is_lazy() {
    let client = client(100);

    let first: Vec<_> = client
        .list_jobs("proj", ListJobsOptions::new().with_page_size(10))
        .unwrap()
        .take(3)
        .collect();

    assert_eq!(first.len(), 3);
    assert_eq!(client.service().list_calls(), 1);
}

#[test]
fn test_list_jobs_without_results_makes_one_call() {
    let client = client(5);

    let jobs: Vec<_> = client
        .list_jobs("proj", ListJobsOptions::new().with_state_filter(JobState::Done))
        .unwrap()
        .collect();

    assert!(jobs.is_empty());
    assert_eq!(client.service().list_calls(), 1);
    assert_eq!(
        client.service().list_requests()[0].state_filter,
        Some(JobState::Done)
    );
}

#[test]
fn test_list_jobs_rejects_missing_project() {
    let client = client(1);

    let result = client.list_jobs("", ListJobsOptions::new());

    assert!(matches!(result, Err(Error::InvalidArgument { name: "project_id", .. })));
    assert_eq!(client.service().list_calls(), 0);
}

#[test]
fn test_list_jobs_rejects_zero_page_size() {
    let client = client(1);

    let result = client.list_jobs("proj", ListJobsOptions::new().with_page_size(0));

    assert!(matches!(result, Err(Error::InvalidArgument { name: "page_size", .. })));
}

#[test]
fn test_pages_view_reports_page_boundaries() {
    let client = client(12);

    let sizes: Vec<usize> = client
        .list_jobs("proj", ListJobsOptions::new().with_page_size(5))
        .unwrap()
        .into_pages()
        .map(|page| page.unwrap().len())
        .collect();

    assert_eq!(sizes, vec![5, 5, 2]);
}

#[test]
fn test_poll_job_returns_after_first_check() {
    let client = client(1);
    let clock = ManualClock::new();
    let poller = DeadlinePoller::new(PollSettings::new()).unwrap().with_clock(&clock);

    let job = client
        .poll_job_with(&JobReference::new("proj", "job-0001"), &poller)
        .unwrap();

    assert!(job.is_done());
    assert_eq!(client.service().get_calls(), 1);
    assert_eq!(clock.sleeps(), 0);
}

#[test]
fn test_poll_job_times_out_by_attempts() {
    let client = JobClient::new(InMemoryJobService::new("proj", 1).with_ready_after(10));
    let clock = ManualClock::new();
    let settings = PollSettings::new().with_max_attempts(3);
    let poller = DeadlinePoller::new(settings).unwrap().with_clock(&clock);

    let err = client
        .poll_job_with(&JobReference::new("proj", "job-0001"), &poller)
        .unwrap_err();

    match err {
        SimError::Client(Error::Timeout { operation, attempts }) => {
            assert_eq!(operation, "Job job-0001");
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(client.service().get_calls(), 3);
    assert_eq!(clock.sleeps(), 2);
}

#[test]
fn test_poll_job_propagates_remote_error() {
    let client = JobClient::new(
        InMemoryJobService::new("proj", 1)
            .with_ready_after(10)
            .with_failure_on_get(2),
    );
    let clock = ManualClock::new();
    let poller = DeadlinePoller::new(PollSettings::new()).unwrap().with_clock(&clock);

    let err = client
        .poll_job_with(&JobReference::new("proj", "job-0001"), &poller)
        .unwrap_err();

    assert!(matches!(err, SimError::Injected(2)));
    assert_eq!(client.service().get_calls(), 2);
}

#[test]
fn test_cancelled_job_polls_done() {
    let client = JobClient::new(InMemoryJobService::new("proj", 2).with_ready_after(50));
    let reference = JobReference::new("proj", "job-0002");

    let cancelled = client.cancel_job(&reference).unwrap();
    assert_eq!(cancelled.state, JobState::Done);

    let job = client
        .poll_job(&reference, PollSettings::new().with_max_attempts(1))
        .unwrap();
    assert!(job.is_done());
}

#[test]
fn test_poll_job_rejects_invalid_reference() {
    let client = client(1);

    let err = client
        .poll_job(&JobReference::new("proj", ""), PollSettings::new())
        .unwrap_err();

    assert!(matches!(
        err,
        SimError::Client(Error::InvalidArgument { name: "job_id", .. })
    ));
    assert_eq!(client.service().get_calls(), 0);
}
