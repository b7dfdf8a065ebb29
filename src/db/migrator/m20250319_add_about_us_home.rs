use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(AboutUsHome)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Singleton row, same as about_us.
        let seed = sea_orm_migration::sea_query::Query::insert()
            .into_table(AboutUsHome)
            .columns([
                crate::entities::about_us_home::Column::TextSectionOne,
                crate::entities::about_us_home::Column::TextSectionTwo,
            ])
            .values_panic(["".into(), "".into()])
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AboutUsHome).to_owned())
            .await?;

        Ok(())
    }
}
