use std::time::Duration;

use sea_orm::DatabaseConnection;
use taskman_core::{NewTask, TaskError, TaskFilter, TaskPatch, TaskPriority, TaskSort, TaskStatus};
use taskman_server::task::{TaskService, TaskServiceError};
use testcontainers_modules::{postgres, testcontainers};

mod common;

/// Test context for service tests.
pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let (container, db) = common::start_postgres().await?;
    Ok(TestContext { db, container })
}

fn new_task(title: &str) -> NewTask {
    NewTask::new(title, "", TaskStatus::Pending, TaskPriority::Medium, None).unwrap()
}

/// Inserts tasks in order, pausing between writes so creation timestamps
/// are strictly increasing.
async fn create_all(service: &TaskService<'_>, inputs: Vec<NewTask>) -> Vec<taskman_core::Task> {
    let mut created = Vec::new();
    for input in inputs {
        created.push(service.create_task(input).await.unwrap());
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    created
}

#[tokio::test]
async fn create_applies_defaults_and_assigns_distinct_ids() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let first = service.create_task(new_task("Buy milk")).await.unwrap();
    let second = service.create_task(new_task("Walk the dog")).await.unwrap();

    assert_eq!(first.status, TaskStatus::Pending);
    assert_eq!(first.priority, TaskPriority::Medium);
    assert_eq!(first.description, "");
    assert_eq!(first.due_date, None);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn create_then_list_round_trips_all_fields() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let due = taskman_core::parse_due_date("2026-09-01").unwrap();
    let input = NewTask::new(
        "Quarterly report",
        "Draft and circulate",
        TaskStatus::Pending,
        TaskPriority::High,
        Some(due),
    )
    .unwrap();
    let created = service.create_task(input).await.unwrap();

    let listed = service.list_tasks(TaskFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    let task = &listed[0];
    assert_eq!(task.id, created.id);
    assert_eq!(task.title, "Quarterly report");
    assert_eq!(task.description, "Draft and circulate");
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.due_date, Some(due));
}

#[tokio::test]
async fn list_filters_by_status() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = create_all(
        &service,
        vec![new_task("One"), new_task("Two"), new_task("Three")],
    )
    .await;
    service
        .update_task(
            created[1].id as i32,
            TaskPatch {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let completed = service
        .list_tasks(TaskFilter {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, created[1].id);

    let pending = service
        .list_tasks(TaskFilter {
            status: Some(TaskStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|task| task.status == TaskStatus::Pending));
}

#[tokio::test]
async fn list_matches_search_case_insensitively_in_title_or_description() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let foo = service.create_task(new_task("Foo Bar")).await.unwrap();
    let groceries = service
        .create_task(
            NewTask::new(
                "Shopping",
                "Buy FOOd for the week",
                TaskStatus::Pending,
                TaskPriority::Medium,
                None,
            )
            .unwrap(),
        )
        .await
        .unwrap();
    service.create_task(new_task("Unrelated")).await.unwrap();

    let found = service
        .list_tasks(TaskFilter {
            search: Some("foo".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let ids: Vec<u32> = found.iter().map(|task| task.id).collect();
    assert_eq!(found.len(), 2);
    assert!(ids.contains(&foo.id));
    assert!(ids.contains(&groceries.id));
}

#[tokio::test]
async fn list_treats_like_metacharacters_literally() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let progress = service
        .create_task(new_task("Progress 100%"))
        .await
        .unwrap();
    service.create_task(new_task("Progress 100")).await.unwrap();

    let found = service
        .list_tasks(TaskFilter {
            search: Some("100%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, progress.id);
}

#[tokio::test]
async fn list_sorts_by_creation_time_descending_by_default() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = create_all(
        &service,
        vec![new_task("Oldest"), new_task("Middle"), new_task("Newest")],
    )
    .await;

    let listed = service.list_tasks(TaskFilter::default()).await.unwrap();
    let ids: Vec<u32> = listed.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![created[2].id, created[1].id, created[0].id]);
}

#[tokio::test]
async fn list_sorts_by_due_date_with_missing_dates_last() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let later = taskman_core::parse_due_date("2026-10-01").unwrap();
    let sooner = taskman_core::parse_due_date("2026-09-01").unwrap();
    let created = create_all(
        &service,
        vec![
            NewTask::new("Later", "", TaskStatus::Pending, TaskPriority::Medium, Some(later))
                .unwrap(),
            new_task("Undated"),
            NewTask::new("Sooner", "", TaskStatus::Pending, TaskPriority::Medium, Some(sooner))
                .unwrap(),
        ],
    )
    .await;

    let listed = service
        .list_tasks(TaskFilter {
            sort: TaskSort::DueDate,
            ..Default::default()
        })
        .await
        .unwrap();
    let ids: Vec<u32> = listed.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![created[2].id, created[0].id, created[1].id]);
}

#[tokio::test]
async fn list_sorts_by_priority_low_to_high() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = create_all(
        &service,
        vec![
            NewTask::new("High", "", TaskStatus::Pending, TaskPriority::High, None).unwrap(),
            NewTask::new("Low", "", TaskStatus::Pending, TaskPriority::Low, None).unwrap(),
            NewTask::new("Medium", "", TaskStatus::Pending, TaskPriority::Medium, None).unwrap(),
        ],
    )
    .await;

    let listed = service
        .list_tasks(TaskFilter {
            sort: TaskSort::Priority,
            ..Default::default()
        })
        .await
        .unwrap();
    let ids: Vec<u32> = listed.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![created[1].id, created[2].id, created[0].id]);
}

#[tokio::test]
async fn update_applies_partial_patch_and_refreshes_updated_at() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = service.create_task(new_task("Original")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = service
        .update_task(
            created.id as i32,
            TaskPatch {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Original");
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn update_rejects_empty_title_and_leaves_task_unchanged() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = service.create_task(new_task("Keep me")).await.unwrap();

    let result = service
        .update_task(
            created.id as i32,
            TaskPatch {
                title: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(TaskError::EmptyTitle))
    ));

    let listed = service.list_tasks(TaskFilter::default()).await.unwrap();
    assert_eq!(listed[0].title, "Keep me");
    assert_eq!(listed[0].updated_at, created.updated_at);
}

#[tokio::test]
async fn update_can_clear_the_due_date() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let due = taskman_core::parse_due_date("2026-09-01").unwrap();
    let created = service
        .create_task(
            NewTask::new("Dated", "", TaskStatus::Pending, TaskPriority::Medium, Some(due))
                .unwrap(),
        )
        .await
        .unwrap();

    let updated = service
        .update_task(
            created.id as i32,
            TaskPatch {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.due_date, None);
}

#[tokio::test]
async fn update_unknown_id_fails_with_not_found() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let result = service
        .update_task(
            9999,
            TaskPatch {
                title: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(TaskServiceError::TaskNotFound(9999))));
}

#[tokio::test]
async fn delete_twice_fails_with_not_found_on_second_call() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = service.create_task(new_task("Ephemeral")).await.unwrap();
    let id = created.id as i32;

    let deleted_id = service.delete_task(id).await.unwrap();
    assert_eq!(deleted_id, created.id);

    let result = service.delete_task(id).await;
    assert!(matches!(result, Err(TaskServiceError::TaskNotFound(_))));

    let listed = service.list_tasks(TaskFilter::default()).await.unwrap();
    assert!(listed.is_empty());
}
