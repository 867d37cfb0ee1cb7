//! Contract tests for the in-memory task repository.

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn sample_task(title: &str) -> Task {
    Task::new(title, "", &DefaultClock)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_on_fresh_store_is_empty(repository: InMemoryTaskRepository) {
    let tasks = repository.find_all().await.expect("find_all should succeed");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_then_find_by_id_round_trips(repository: InMemoryTaskRepository) {
    let task = sample_task("Buy milk");
    repository.save(&task).await.expect("save should succeed");

    let fetched = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_id_returns_none_when_absent(repository: InMemoryTaskRepository) {
    let fetched = repository
        .find_by_id(TaskId::new())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_preserves_insertion_order(repository: InMemoryTaskRepository) {
    let first = sample_task("first");
    let second = sample_task("second");
    let third = sample_task("third");
    for task in [&first, &second, &third] {
        repository.save(task).await.expect("save should succeed");
    }

    let tasks = repository.find_all().await.expect("find_all should succeed");
    let titles: Vec<&str> = tasks.iter().map(Task::title).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_overwrites_existing_without_duplicating(repository: InMemoryTaskRepository) {
    let mut task = sample_task("Buy milk");
    repository.save(&task).await.expect("save should succeed");

    task.apply(
        &TaskPatch {
            title: Some("Buy oat milk".to_owned()),
            ..TaskPatch::default()
        },
        &DefaultClock,
    );
    repository.save(&task).await.expect("second save should succeed");

    let tasks = repository.find_all().await.expect("find_all should succeed");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks.first().map(Task::title), Some("Buy oat milk"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_missing_task_fails_with_not_found(repository: InMemoryTaskRepository) {
    let task = sample_task("ghost");
    let result = repository.update(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_does_not_resurrect_deleted_task(repository: InMemoryTaskRepository) {
    let task = sample_task("Buy milk");
    repository.save(&task).await.expect("save should succeed");
    repository
        .delete_by_id(task.id())
        .await
        .expect("delete should succeed");

    let result = repository.update(&task).await;
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));

    let fetched = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_by_id_is_idempotent(repository: InMemoryTaskRepository) {
    let task = sample_task("Buy milk");
    repository.save(&task).await.expect("save should succeed");

    repository
        .delete_by_id(task.id())
        .await
        .expect("first delete should succeed");
    repository
        .delete_by_id(task.id())
        .await
        .expect("second delete should also succeed");

    let tasks = repository.find_all().await.expect("find_all should succeed");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_writes_on_same_id_never_corrupt_the_store(
    repository: InMemoryTaskRepository,
) {
    let task = sample_task("contended");
    repository.save(&task).await.expect("save should succeed");

    let mut handles = Vec::new();
    for round in 0..16u8 {
        let repo = repository.clone();
        let mut copy = task.clone();
        handles.push(tokio::spawn(async move {
            copy.apply(
                &TaskPatch {
                    title: Some(format!("round {round}")),
                    ..TaskPatch::default()
                },
                &DefaultClock,
            );
            if round % 2 == 0 {
                repo.save(&copy).await
            } else {
                repo.update(&copy).await
            }
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("writer task should not panic")
            .expect("write should succeed");
    }

    // Last writer wins; the map holds exactly one uncorrupted record.
    let tasks = repository.find_all().await.expect("find_all should succeed");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks.first().map(Task::id), Some(task.id()));
}
