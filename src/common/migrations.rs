// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
///
/// Tables are created if they do not exist. Set RESET_DB=true to drop and
/// recreate the schema from scratch.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - dropping all tables and recreating schema");
        drop_all_tables(pool).await?;
    }

    create_user_tables(pool).await?;
    create_source_tables(pool).await?;
    create_fact_tables(pool).await?;
    create_feedback_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database migration completed");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in [
        "comments",
        "reactions",
        "links",
        "insights",
        "sources",
        "users",
    ] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn create_user_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // token / token_issued_at hold the most recently issued auth token;
    // patched in a second write after the insert at registration time
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            token TEXT,
            token_issued_at TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_source_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sources (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            baseurl TEXT NOT NULL UNIQUE,
            name TEXT,
            reliability REAL NOT NULL DEFAULT 50.0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_fact_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS insights (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uid TEXT NOT NULL UNIQUE,
            text TEXT NOT NULL,
            url TEXT,
            source_baseurl TEXT,
            user_id INTEGER NOT NULL,
            likes INTEGER NOT NULL DEFAULT 0,
            dislikes INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uid TEXT NOT NULL UNIQUE,
            insight_uid TEXT NOT NULL,
            url TEXT NOT NULL,
            title TEXT,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_feedback_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // one reaction per user per insight; re-reacting switches kind
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            insight_uid TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (insight_uid, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uid TEXT NOT NULL UNIQUE,
            insight_uid TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            username TEXT NOT NULL,
            text TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_insights_created_at ON insights (created_at DESC)",
        "CREATE INDEX IF NOT EXISTS idx_insights_user_id ON insights (user_id)",
        "CREATE INDEX IF NOT EXISTS idx_links_insight_uid ON links (insight_uid)",
        "CREATE INDEX IF NOT EXISTS idx_reactions_insight_uid ON reactions (insight_uid)",
        "CREATE INDEX IF NOT EXISTS idx_comments_insight_uid ON comments (insight_uid)",
    ];

    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
