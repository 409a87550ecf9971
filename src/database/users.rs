// Queries over the `users` table

use sqlx::PgExecutor;

use crate::models::user::User;

pub async fn find_active_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users
        WHERE username = $1 AND deleted = FALSE
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

/// Any active user already holding the username or the email
pub async fn find_active_by_username_or_email<'e, E>(
    executor: E,
    username: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users
        WHERE (username = $1 OR email = $2) AND deleted = FALSE
        LIMIT 1
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(
    executor: E,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, senha)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(executor)
    .await
}
