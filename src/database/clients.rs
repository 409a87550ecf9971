// Queries over the `clients` table

use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::database::{contains_pattern, non_empty};
use crate::models::client::{Client, ClientFilter};

pub async fn list<'e, E>(executor: E, filter: &ClientFilter, limit: i64, offset: i64) -> Result<Vec<Client>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM clients WHERE deleted = FALSE");

    if let Some(name) = non_empty(&filter.name) {
        query.push(" AND nome ILIKE ").push_bind(contains_pattern(name));
    }
    if let Some(email) = non_empty(&filter.email) {
        query.push(" AND email ILIKE ").push_bind(contains_pattern(email));
    }

    query
        .push(" ORDER BY id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    query.build_query_as::<Client>().fetch_all(executor).await
}

pub async fn find_active<'e, E>(executor: E, id: i32) -> Result<Option<Client>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1 AND deleted = FALSE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists_active<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1 AND deleted = FALSE)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn email_taken<'e, E>(executor: E, email: &str, exclude_id: Option<i32>) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM clients
            WHERE email = $1 AND deleted = FALSE AND ($2::INTEGER IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(executor)
    .await
}

pub async fn cpf_taken<'e, E>(executor: E, cpf: &str, exclude_id: Option<i32>) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM clients
            WHERE cpf = $1 AND deleted = FALSE AND ($2::INTEGER IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(cpf)
    .bind(exclude_id)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, email: &str, cpf: &str, name: &str) -> Result<Client, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO clients (email, cpf, nome)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(cpf)
    .bind(name)
    .fetch_one(executor)
    .await
}

/// Applies the provided fields, leaving `None` columns untouched
pub async fn update<'e, E>(
    executor: E,
    id: i32,
    email: Option<&str>,
    cpf: Option<&str>,
    name: Option<&str>,
) -> Result<Option<Client>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Client>(
        r#"
        UPDATE clients
        SET email = COALESCE($2, email),
            cpf = COALESCE($3, cpf),
            nome = COALESCE($4, nome)
        WHERE id = $1 AND deleted = FALSE
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(cpf)
    .bind(name)
    .fetch_optional(executor)
    .await
}

pub async fn soft_delete<'e, E>(executor: E, id: i32) -> Result<Option<Client>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Client>(
        r#"
        UPDATE clients SET deleted = TRUE
        WHERE id = $1 AND deleted = FALSE
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
