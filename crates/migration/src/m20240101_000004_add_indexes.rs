use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str, &[&str])] = &[
    ("idx_devices_name", "devices", &["name"]),
    ("idx_scenes_name", "scenes", &["name"]),
    ("idx_scenes_device", "scenes", &["device_id"]),
    ("idx_tests_name", "tests", &["name"]),
    ("idx_tests_scene", "tests", &["scene_id"]),
    ("idx_tests_state", "tests", &["state"]),
    ("idx_tests_scene_state", "tests", &["scene_id", "state"]),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, cols) in INDEXES {
            let mut index = Index::create();
            index.name(*name).table(Alias::new(*table)).if_not_exists();
            for col in cols.iter() {
                index.col(Alias::new(*col));
            }
            manager.create_index(index.to_owned()).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
