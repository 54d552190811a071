use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::run_pending;
    use crate::{connect_with_settings, migrations::MIGRATOR};

    #[tokio::test]
    async fn migrations_create_customer_table() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        let customer_count = sqlx::query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = 'customer'",
        )
        .fetch_one(&pool)
        .await
        .expect("check customer table")
        .get::<i64, _>("count");
        assert_eq!(customer_count, 1);

        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('customer') ORDER BY cid")
                .fetch_all(&pool)
                .await
                .expect("read columns");
        assert_eq!(
            columns,
            vec![
                "id",
                "first_name",
                "last_name",
                "age",
                "address",
                "first_name_folded",
                "last_name_folded"
            ]
        );

        pool.close().await;
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("first run");
        run_pending(&pool).await.expect("second run");

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(&pool)
            .await
            .expect("count applied migrations");
        assert_eq!(applied as usize, MIGRATOR.iter().count());

        pool.close().await;
    }

    #[tokio::test]
    async fn customer_names_are_not_unique_in_the_schema() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        let unique_indexes: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_index_list('customer') WHERE \"unique\" = 1 AND origin = 'c'",
        )
        .fetch_one(&pool)
        .await
        .expect("inspect indexes");
        assert_eq!(unique_indexes, 0, "name uniqueness is a service-level rule only");

        pool.close().await;
    }
}
