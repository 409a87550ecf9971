use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::models::Pagination;

/// Lifecycle of an order. Stored as upper-case text; parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum OrderStatus {
    Pendente,
    Processando,
    Enviado,
    Entregue,
    Cancelado,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "PENDENTE",
            OrderStatus::Processando => "PROCESSANDO",
            OrderStatus::Enviado => "ENVIADO",
            OrderStatus::Entregue => "ENTREGUE",
            OrderStatus::Cancelado => "CANCELADO",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDENTE" => Ok(OrderStatus::Pendente),
            "PROCESSANDO" => Ok(OrderStatus::Processando),
            "ENVIADO" => Ok(OrderStatus::Enviado),
            "ENTREGUE" => Ok(OrderStatus::Entregue),
            "CANCELADO" => Ok(OrderStatus::Cancelado),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Row of the `pedidos` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i32,
    #[sqlx(rename = "cliente_id")]
    #[serde(rename = "cliente_id")]
    pub client_id: i32,
    pub status: String,
    #[sqlx(rename = "preco_total")]
    #[serde(rename = "preco_total")]
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted: bool,
}

/// Row of the `itens_pedido` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: i32,
    #[sqlx(rename = "pedido_id")]
    #[serde(rename = "pedido_id")]
    pub order_id: i32,
    #[sqlx(rename = "produto_id")]
    #[serde(rename = "produto_id")]
    pub product_id: i32,
    #[sqlx(rename = "quantidade")]
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[sqlx(rename = "preco")]
    #[serde(rename = "preco")]
    pub unit_price: f64,
}

/// An order together with its items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "itens")]
    pub items: Vec<OrderItem>,
}

pub const ORDER_REQUIRED_FIELDS: [&str; 2] = ["cliente_id", "produtos"];
pub const ORDER_ITEM_REQUIRED_FIELDS: [&str; 2] = ["produto_id", "quantidade"];

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "cliente_id")]
    pub client_id: i32,
    #[serde(rename = "produtos")]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderItemRequest {
    #[serde(rename = "produto_id")]
    pub product_id: i32,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    #[serde(rename = "cliente_id")]
    pub client_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    #[serde(rename = "periodo_inicio", default, deserialize_with = "deserialize_period_bound")]
    pub period_start: Option<DateTime<Utc>>,
    #[serde(rename = "periodo_fim", default, deserialize_with = "deserialize_period_bound")]
    pub period_end: Option<DateTime<Utc>>,
    #[serde(rename = "secao")]
    pub section: Option<String>,
    #[serde(rename = "id_pedido")]
    pub order_id: Option<i32>,
    pub status: Option<OrderStatus>,
    #[serde(rename = "cliente")]
    pub client_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl OrderFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) or a plain date
pub fn parse_period_bound(raw: &str) -> Option<DateTime<Utc>> {
    let raw: &str = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_period_bound<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_period_bound(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date/time '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("pendente".parse::<OrderStatus>().unwrap(), OrderStatus::Pendente);
        assert_eq!(OrderStatus::Entregue.to_string(), "ENTREGUE");
        assert!("PAGO".parse::<OrderStatus>().is_err());

        let from_json: OrderStatus = serde_json::from_str("\"CANCELADO\"").unwrap();
        assert_eq!(from_json, OrderStatus::Cancelado);
    }

    #[test]
    fn request_bodies_and_queries_ignore_status_case() {
        let update: UpdateOrderRequest = serde_json::from_str(r#"{"status": " pendente "}"#).unwrap();
        assert_eq!(update.status, Some(OrderStatus::Pendente));

        let uri: axum::http::Uri = "/pedidos?status=enviado&limit=5".parse().unwrap();
        let axum::extract::Query(filter) = axum::extract::Query::<OrderFilter>::try_from_uri(&uri).unwrap();
        assert_eq!(filter.status, Some(OrderStatus::Enviado));
        assert_eq!(filter.limit, Some(5));

        assert!(serde_json::from_str::<OrderStatus>("\"PAGO\"").is_err());
        assert_eq!(serde_json::to_string(&OrderStatus::Processando).unwrap(), "\"PROCESSANDO\"");
    }

    #[test]
    fn period_bounds_accept_common_shapes() {
        let expected = Utc.with_ymd_and_hms(2025, 5, 20, 14, 30, 0).unwrap();

        assert_eq!(parse_period_bound("2025-05-20T14:30:00Z"), Some(expected));
        assert_eq!(parse_period_bound("2025-05-20T11:30:00-03:00"), Some(expected));
        assert_eq!(parse_period_bound("2025-05-20T14:30:00"), Some(expected));
        assert_eq!(parse_period_bound("2025-05-20 14:30:00"), Some(expected));
        assert_eq!(
            parse_period_bound("2025-05-20"),
            Some(Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_period_bound("20/05/2025"), None);
    }

    #[test]
    fn detail_flattens_order_fields() {
        let now = Utc::now();
        let detail = OrderDetail {
            order: Order {
                id: 7,
                client_id: 3,
                status: OrderStatus::Pendente.to_string(),
                total_price: 49.8,
                created_at: now,
                updated_at: now,
                deleted: false,
            },
            items: vec![OrderItem { id: 1, order_id: 7, product_id: 2, quantity: 2, unit_price: 24.9 }],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["cliente_id"], 3);
        assert_eq!(value["itens"][0]["quantidade"], 2);
        assert!(value.get("deleted").is_none());
    }
}
