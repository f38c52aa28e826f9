use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdoptionApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdoptionApplications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::AnimalId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdoptionApplications::UserId).integer())
                    .col(
                        ColumnDef::new(AdoptionApplications::FullName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::Email)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::Phone)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::Message)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::CompatibilityScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdoptionApplications::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adoption_applications_animal")
                            .from(AdoptionApplications::Table, AdoptionApplications::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adoption_applications_user")
                            .from(AdoptionApplications::Table, AdoptionApplications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adoption_applications_user_id")
                    .table(AdoptionApplications::Table)
                    .col(AdoptionApplications::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adoption_applications_status")
                    .table(AdoptionApplications::Table)
                    .col(AdoptionApplications::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdoptionApplications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdoptionApplications {
    Table,
    Id,
    AnimalId,
    UserId,
    FullName,
    Email,
    Phone,
    Message,
    CompatibilityScore,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
