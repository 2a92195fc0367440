use sea_orm::{EnumIter, Iterable};
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Status,
    Priority,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
struct TaskStatus;

#[derive(DeriveIden, EnumIter)]
pub enum TaskStatusEnum {
    Pending,
    Completed,
}

#[derive(DeriveIden)]
struct TaskPriority;

// Declaration order doubles as the sort order for priority.
#[derive(DeriveIden, EnumIter)]
pub enum TaskPriorityEnum {
    Low,
    Medium,
    High,
}

const IDX_TASKS_STATUS: &str = "idx-tasks-status";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus)
                    .values(TaskStatusEnum::iter())
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(TaskPriority)
                    .values(TaskPriorityEnum::iter())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(string(Tasks::Title))
                    .col(string(Tasks::Description).default(""))
                    .col(enumeration(
                        Tasks::Status,
                        Alias::new("task_status"),
                        TaskStatusEnum::iter(),
                    ))
                    .col(enumeration(
                        Tasks::Priority,
                        Alias::new("task_priority"),
                        TaskPriorityEnum::iter(),
                    ))
                    .col(timestamp_with_time_zone_null(Tasks::DueDate))
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TASKS_STATUS)
                    .table(Tasks::Table)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TASKS_STATUS)
                    .table(Tasks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("task_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("task_priority")).to_owned())
            .await
    }
}
