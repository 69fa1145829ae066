//! PostgreSQL-backed [`ShipmentStore`].

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::future::Future;
use std::pin::Pin;
use storefront_core::catalog::Sku;
use storefront_core::order::OrderId;
use storefront_core::shipment::{ShipmentId, ShipmentRecord, ShippingStatus, ShippingType};
use storefront_core::store::{ShipmentStore, ShipmentStoreError};

/// `PostgreSQL` implementation of the shipment store.
///
/// Rows live in a single `shipments` table keyed by `shipping_id`. Writes
/// are create-or-replace (`INSERT ... ON CONFLICT ... DO UPDATE`), which
/// matches the key-value contract of the trait.
pub struct PostgresShipmentStore {
    pool: PgPool,
}

impl PostgresShipmentStore {
    /// Connect to the database and build a pooled store.
    ///
    /// # Errors
    ///
    /// Returns [`ShipmentStoreError::Backend`] if the connection fails.
    pub async fn new(database_url: &str) -> Result<Self, ShipmentStoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| ShipmentStoreError::Backend(e.to_string()))?;
        tracing::info!("PostgresShipmentStore connected");
        Ok(Self { pool })
    }

    /// Build a store over an existing connection pool.
    #[must_use]
    pub const fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `shipments` table if it does not exist.
    ///
    /// Deployments normally own provisioning; this helper exists for
    /// tests and demos.
    ///
    /// # Errors
    ///
    /// Returns [`ShipmentStoreError::Backend`] if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), ShipmentStoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS shipments (
                shipping_id TEXT PRIMARY KEY,
                shipping_type TEXT NOT NULL,
                order_id TEXT NOT NULL,
                product_ids TEXT NOT NULL,
                shipping_status TEXT NOT NULL,
                created_date TIMESTAMPTZ NOT NULL,
                due_date TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ShipmentStoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn row_to_record(row: &PgRow) -> Result<ShipmentRecord, ShipmentStoreError> {
        let shipping_type: String = row.get("shipping_type");
        let shipping_type = ShippingType::parse(&shipping_type).ok_or_else(|| {
            ShipmentStoreError::Serialization(format!(
                "unknown shipping type in row: '{shipping_type}'"
            ))
        })?;

        let shipping_status: String = row.get("shipping_status");
        let shipping_status = ShippingStatus::parse(&shipping_status).ok_or_else(|| {
            ShipmentStoreError::Serialization(format!(
                "unknown shipping status in row: '{shipping_status}'"
            ))
        })?;

        let product_ids: String = row.get("product_ids");
        let product_ids = product_ids
            .split(',')
            .filter(|part| !part.is_empty())
            .map(Sku::new)
            .collect();

        Ok(ShipmentRecord {
            shipping_id: ShipmentId::new(row.get::<String, _>("shipping_id")),
            shipping_type,
            order_id: OrderId::new(row.get::<String, _>("order_id")),
            product_ids,
            shipping_status,
            created_date: row.get::<DateTime<Utc>, _>("created_date"),
            due_date: row.get::<DateTime<Utc>, _>("due_date"),
        })
    }

    fn join_product_ids(product_ids: &[Sku]) -> String {
        product_ids
            .iter()
            .map(Sku::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl ShipmentStore for PostgresShipmentStore {
    fn put(
        &self,
        record: ShipmentRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShipmentStoreError>> + Send + '_>> {
        Box::pin(async move {
            sqlx::query(
                r"
                INSERT INTO shipments (
                    shipping_id, shipping_type, order_id, product_ids,
                    shipping_status, created_date, due_date
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (shipping_id) DO UPDATE SET
                    shipping_type = EXCLUDED.shipping_type,
                    order_id = EXCLUDED.order_id,
                    product_ids = EXCLUDED.product_ids,
                    shipping_status = EXCLUDED.shipping_status,
                    created_date = EXCLUDED.created_date,
                    due_date = EXCLUDED.due_date
                ",
            )
            .bind(record.shipping_id.as_str())
            .bind(record.shipping_type.as_str())
            .bind(record.order_id.as_str())
            .bind(Self::join_product_ids(&record.product_ids))
            .bind(record.shipping_status.as_str())
            .bind(record.created_date)
            .bind(record.due_date)
            .execute(&self.pool)
            .await
            .map_err(|e| ShipmentStoreError::Backend(e.to_string()))?;

            tracing::debug!(shipment_id = %record.shipping_id, "shipment row written");
            Ok(())
        })
    }

    fn get(
        &self,
        id: &ShipmentId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ShipmentRecord>, ShipmentStoreError>> + Send + '_>>
    {
        let id = id.clone();
        Box::pin(async move {
            let row = sqlx::query(
                r"
                SELECT shipping_id, shipping_type, order_id, product_ids,
                       shipping_status, created_date, due_date
                FROM shipments
                WHERE shipping_id = $1
                ",
            )
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ShipmentStoreError::Backend(e.to_string()))?;

            row.as_ref().map(Self::row_to_record).transpose()
        })
    }

    fn update_status(
        &self,
        id: &ShipmentId,
        status: ShippingStatus,
    ) -> Pin<Box<dyn Future<Output = Result<(), ShipmentStoreError>> + Send + '_>> {
        let id = id.clone();
        Box::pin(async move {
            let result = sqlx::query(
                r"
                UPDATE shipments
                SET shipping_status = $1
                WHERE shipping_id = $2
                ",
            )
            .bind(status.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| ShipmentStoreError::Backend(e.to_string()))?;

            if result.rows_affected() == 0 {
                return Err(ShipmentStoreError::NotFound(id.clone()));
            }

            tracing::debug!(shipment_id = %id, status = %status, "shipment status updated");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_ids_join_shape() {
        assert_eq!(
            PostgresShipmentStore::join_product_ids(&[Sku::new("a"), Sku::new("b")]),
            "a,b"
        );
        assert_eq!(PostgresShipmentStore::join_product_ids(&[]), "");
    }
}
