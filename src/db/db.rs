use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "kintai.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens `kintai.db` in the data directory and applies pending migrations.
    pub fn new() -> Result<Db> {
        let mut conn = Self::new_without_migrations()?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Ok(Connection::open(db_file_path)?)
    }
}
