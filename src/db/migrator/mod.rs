use sea_orm_migration::prelude::*;

mod m20250312_initial;
mod m20250319_add_about_us_home;
mod m20250402_add_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250312_initial::Migration),
            Box::new(m20250319_add_about_us_home::Migration),
            Box::new(m20250402_add_users::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_apply_and_roll_back() {
        let conn = sea_orm_migration::sea_orm::Database::connect("sqlite::memory:")
            .await
            .unwrap();

        Migrator::up(&conn, None).await.unwrap();
        Migrator::down(&conn, None).await.unwrap();
    }
}
