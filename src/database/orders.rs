// Queries over the `pedidos` and `itens_pedido` tables

use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::database::non_empty;
use crate::models::order::{Order, OrderFilter, OrderItem, OrderStatus};

pub async fn list<'e, E>(executor: E, filter: &OrderFilter, limit: i64, offset: i64) -> Result<Vec<Order>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM pedidos WHERE deleted = FALSE");

    if let Some(start) = filter.period_start {
        query.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = filter.period_end {
        query.push(" AND created_at <= ").push_bind(end);
    }
    if let Some(order_id) = filter.order_id {
        query.push(" AND id = ").push_bind(order_id);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(client_id) = filter.client_id {
        query.push(" AND cliente_id = ").push_bind(client_id);
    }
    if let Some(section) = non_empty(&filter.section) {
        // ? Orders with at least one product of the requested category
        query
            .push(
                " AND EXISTS (SELECT 1 FROM itens_pedido i JOIN produtos p ON p.id = i.produto_id \
                 WHERE i.pedido_id = pedidos.id AND p.categoria = ",
            )
            .push_bind(section.to_string())
            .push(")");
    }

    query
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    query.build_query_as::<Order>().fetch_all(executor).await
}

pub async fn find_active<'e, E>(executor: E, id: i32) -> Result<Option<Order>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Order>("SELECT * FROM pedidos WHERE id = $1 AND deleted = FALSE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn items_of<'e, E>(executor: E, order_id: i32) -> Result<Vec<OrderItem>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT id, pedido_id, produto_id, quantidade, preco
        FROM itens_pedido
        WHERE pedido_id = $1
        ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, client_id: i32, status: OrderStatus, total_price: f64) -> Result<Order, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO pedidos (cliente_id, status, preco_total)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(client_id)
    .bind(status.as_str())
    .bind(total_price)
    .fetch_one(executor)
    .await
}

pub async fn insert_item<'e, E>(
    executor: E,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: f64,
) -> Result<OrderItem, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, OrderItem>(
        r#"
        INSERT INTO itens_pedido (pedido_id, produto_id, quantidade, preco)
        VALUES ($1, $2, $3, $4)
        RETURNING id, pedido_id, produto_id, quantidade, preco
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .fetch_one(executor)
    .await
}

/// Applies the provided fields, leaving `None` columns untouched
pub async fn update<'e, E>(
    executor: E,
    id: i32,
    status: Option<OrderStatus>,
    client_id: Option<i32>,
) -> Result<Option<Order>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE pedidos
        SET status = COALESCE($2, status),
            cliente_id = COALESCE($3, cliente_id)
        WHERE id = $1 AND deleted = FALSE
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.map(|s| s.as_str()))
    .bind(client_id)
    .fetch_optional(executor)
    .await
}

pub async fn soft_delete<'e, E>(executor: E, id: i32) -> Result<Option<Order>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Order>(
        r#"
        UPDATE pedidos SET deleted = TRUE
        WHERE id = $1 AND deleted = FALSE
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
