use sea_orm_migration::prelude::*;

mod create_datasets_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(create_datasets_001::Migration)]
    }

    // Modules share one database but keep separate migration histories.
    fn migration_table_name() -> DynIden {
        Alias::new("datasets_migrations").into_iden()
    }
}
