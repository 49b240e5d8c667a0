use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create fields table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fields (
            id SERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE DEFAULT gen_random_uuid(),
            code VARCHAR(15) NOT NULL,
            name VARCHAR(100) NOT NULL,
            price_per_hour INTEGER NOT NULL,
            images TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create times table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS times (
            id SERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE DEFAULT gen_random_uuid(),
            start_time TIME WITHOUT TIME ZONE NOT NULL,
            end_time TIME WITHOUT TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create field_schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS field_schedules (
            id SERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE DEFAULT gen_random_uuid(),
            field_id INTEGER NOT NULL REFERENCES fields(id) ON DELETE CASCADE,
            time_id INTEGER NOT NULL REFERENCES times(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            status SMALLINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_field_schedules_field_id ON field_schedules(field_id)",
        "CREATE INDEX IF NOT EXISTS idx_field_schedules_time_id ON field_schedules(time_id)",
        "CREATE INDEX IF NOT EXISTS idx_field_schedules_date ON field_schedules(date)",
        // At most one live schedule per field, time slot and date.
        r#"CREATE UNIQUE INDEX IF NOT EXISTS uq_field_schedules_active_slot
            ON field_schedules(field_id, time_id, date)
            WHERE deleted_at IS NULL"#,
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
