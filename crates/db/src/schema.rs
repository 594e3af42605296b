use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create courts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courts (
            id BIGSERIAL PRIMARY KEY,
            number INTEGER NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create members table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            role VARCHAR(32) NOT NULL DEFAULT 'member'
                CHECK (role IN ('member', 'teamster', 'administrator')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create block_reasons table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS block_reasons (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            is_temporary BOOLEAN NOT NULL DEFAULT FALSE,
            teamster_usable BOOLEAN NOT NULL DEFAULT FALSE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_by_id BIGINT NOT NULL REFERENCES members(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create blocks table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blocks (
            id BIGSERIAL PRIMARY KEY,
            court_id BIGINT NOT NULL REFERENCES courts(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            reason_id BIGINT NOT NULL REFERENCES block_reasons(id),
            details TEXT NULL,
            batch_id UUID NOT NULL,
            created_by_id BIGINT NOT NULL REFERENCES members(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_block_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id BIGSERIAL PRIMARY KEY,
            court_id BIGINT NOT NULL REFERENCES courts(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'active'
                CHECK (status IN ('active', 'cancelled', 'suspended')),
            reason TEXT NULL,
            suspended_by_block_id BIGINT NULL REFERENCES blocks(id) ON DELETE SET NULL,
            booked_by_id BIGINT NOT NULL REFERENCES members(id),
            booked_for_id BIGINT NOT NULL REFERENCES members(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_reservation_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create block_audit_log table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS block_audit_log (
            id BIGSERIAL PRIMARY KEY,
            operation VARCHAR(32) NOT NULL CHECK (operation IN ('create', 'update', 'delete')),
            block_id BIGINT NULL,
            operation_data JSONB NULL,
            admin_id BIGINT NOT NULL REFERENCES members(id),
            timestamp TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservation_audit_log table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservation_audit_log (
            id BIGSERIAL PRIMARY KEY,
            operation VARCHAR(32) NOT NULL CHECK (operation IN ('cancel', 'suspend', 'restore')),
            reservation_id BIGINT NOT NULL REFERENCES reservations(id),
            operation_data JSONB NULL,
            performed_by_id BIGINT NOT NULL REFERENCES members(id),
            timestamp TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_blocks_batch_id ON blocks(batch_id);",
        "CREATE INDEX IF NOT EXISTS idx_blocks_court_date ON blocks(court_id, date);",
        "CREATE INDEX IF NOT EXISTS idx_blocks_reason_id ON blocks(reason_id);",
        "CREATE INDEX IF NOT EXISTS idx_reservations_court_date ON reservations(court_id, date);",
        "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status);",
        "CREATE INDEX IF NOT EXISTS idx_reservations_suspended_by_block ON reservations(suspended_by_block_id);",
        "CREATE INDEX IF NOT EXISTS idx_block_audit_log_admin_id ON block_audit_log(admin_id);",
        "CREATE INDEX IF NOT EXISTS idx_block_audit_log_timestamp ON block_audit_log(timestamp);",
        "CREATE INDEX IF NOT EXISTS idx_reservation_audit_log_reservation_id ON reservation_audit_log(reservation_id);",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
