use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Users Table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create Shelters Table
        manager
            .create_table(
                Table::create()
                    .table(Shelters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shelters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shelters::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Shelters::Address).text().not_null())
                    .col(ColumnDef::new(Shelters::Phone).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Shelters::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Shelters::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // Create Animals Table
        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Animals::ShelterId).integer().not_null())
                    .col(
                        ColumnDef::new(Animals::Name)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Animals::Species).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Animals::Breed)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Animals::Age).integer().not_null())
                    .col(
                        ColumnDef::new(Animals::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Animals::ChildFriendly)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Animals::OtherPetFriendly)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Animals::ActivityLevel)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Animals::SizeCategory)
                            .string_len(10)
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Animals::Photo).string())
                    .col(ColumnDef::new(Animals::ArrivalDate).date().not_null())
                    .col(
                        ColumnDef::new(Animals::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-animal-shelter_id")
                            .from(Animals::Table, Animals::ShelterId)
                            .to(Shelters::Table, Shelters::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_animals_available_species")
                    .table(Animals::Table)
                    .col(Animals::IsAvailable)
                    .col(Animals::Species)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shelters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Shelters {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    Description,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
    ShelterId,
    Name,
    Species,
    Breed,
    Age,
    Description,
    ChildFriendly,
    OtherPetFriendly,
    ActivityLevel,
    SizeCategory,
    Photo,
    ArrivalDate,
    IsAvailable,
}
