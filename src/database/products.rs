// Queries over the `produtos` table

use sqlx::types::Json;
use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::database::{contains_pattern, non_empty};
use crate::models::product::{NewProduct, Product, ProductFilter, UpdateProductRequest};

pub async fn list<'e, E>(executor: E, filter: &ProductFilter, limit: i64, offset: i64) -> Result<Vec<Product>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM produtos WHERE deleted = FALSE");

    if let Some(category) = non_empty(&filter.category) {
        query.push(" AND categoria ILIKE ").push_bind(contains_pattern(category));
    }
    if let Some(price) = filter.price {
        query.push(" AND preco = ").push_bind(price);
    }
    if let Some(available) = filter.available {
        query.push(" AND disponibilidade = ").push_bind(available);
    }

    query
        .push(" ORDER BY id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    query.build_query_as::<Product>().fetch_all(executor).await
}

pub async fn find_active<'e, E>(executor: E, id: i32) -> Result<Option<Product>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Product>("SELECT * FROM produtos WHERE id = $1 AND deleted = FALSE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Same as `find_active`, holding a row lock until the transaction ends
pub async fn find_active_for_update<'e, E>(executor: E, id: i32) -> Result<Option<Product>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Product>("SELECT * FROM produtos WHERE id = $1 AND deleted = FALSE FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn barcode_taken<'e, E>(executor: E, barcode: &str, exclude_id: Option<i32>) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM produtos
            WHERE codigo_barras = $1 AND deleted = FALSE AND ($2::INTEGER IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(barcode)
    .bind(exclude_id)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, product: &NewProduct) -> Result<Product, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO produtos (
            descricao, valor_venda, codigo_barras, secao, estoque,
            data_validade, imagens, preco, categoria, disponibilidade
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&product.description)
    .bind(product.sale_price)
    .bind(&product.barcode)
    .bind(&product.section)
    .bind(product.stock)
    .bind(product.expiration_date)
    .bind(Json(&product.images))
    .bind(product.price)
    .bind(&product.category)
    .bind(product.available)
    .fetch_one(executor)
    .await
}

/// Applies the provided fields, leaving `None` columns untouched
pub async fn update<'e, E>(executor: E, id: i32, changes: &UpdateProductRequest) -> Result<Option<Product>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE produtos
        SET descricao = COALESCE($2, descricao),
            valor_venda = COALESCE($3, valor_venda),
            codigo_barras = COALESCE($4, codigo_barras),
            secao = COALESCE($5, secao),
            estoque = COALESCE($6, estoque),
            data_validade = COALESCE($7, data_validade),
            imagens = COALESCE($8, imagens),
            preco = COALESCE($9, preco),
            categoria = COALESCE($10, categoria),
            disponibilidade = COALESCE($11, disponibilidade)
        WHERE id = $1 AND deleted = FALSE
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(changes.description.as_deref())
    .bind(changes.sale_price)
    .bind(changes.barcode.as_deref())
    .bind(changes.section.as_deref())
    .bind(changes.stock)
    .bind(changes.expiration_date)
    .bind(changes.images.as_ref().map(Json))
    .bind(changes.price)
    .bind(changes.category.as_deref())
    .bind(changes.available)
    .fetch_optional(executor)
    .await
}

pub async fn decrement_stock<'e, E>(executor: E, id: i32, quantity: i32) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("UPDATE produtos SET estoque = estoque - $2 WHERE id = $1")
        .bind(id)
        .bind(quantity)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn soft_delete<'e, E>(executor: E, id: i32) -> Result<Option<Product>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE produtos SET deleted = TRUE
        WHERE id = $1 AND deleted = FALSE
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
