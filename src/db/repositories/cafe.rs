use crate::db::StoreError;
use crate::entities::{cafes, prelude::*};
use crate::models::cafe::{Cafe, NewCafe};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

/// Repository for cafe records
pub struct CafeRepository {
    conn: DatabaseConnection,
}

impl CafeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: cafes::Model) -> Cafe {
        Cafe {
            id: m.id,
            name: m.name,
            map_url: m.map_url,
            img_url: m.img_url,
            location: m.location,
            seats: m.seats,
            has_toilet: m.has_toilet,
            has_wifi: m.has_wifi,
            has_sockets: m.has_sockets,
            can_take_calls: m.can_take_calls,
            coffee_price: m.coffee_price,
        }
    }

    pub async fn insert(&self, cafe: NewCafe) -> Result<Cafe, StoreError> {
        let name = cafe.name.clone();
        let active_model = cafes::ActiveModel {
            name: Set(cafe.name),
            map_url: Set(cafe.map_url),
            img_url: Set(cafe.img_url),
            location: Set(cafe.location),
            seats: Set(cafe.seats),
            has_toilet: Set(cafe.has_toilet),
            has_wifi: Set(cafe.has_wifi),
            has_sockets: Set(cafe.has_sockets),
            can_take_calls: Set(cafe.can_take_calls),
            coffee_price: Set(cafe.coffee_price),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                StoreError::UniqueViolation(name.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(Self::map_model(model))
    }

    pub async fn list_ordered_by_name(&self) -> Result<Vec<Cafe>> {
        let rows = Cafes::find()
            .order_by_asc(cafes::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Cafe>> {
        let row = Cafes::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn find_by_location(&self, location: &str) -> Result<Vec<Cafe>> {
        let rows = Cafes::find()
            .filter(cafes::Column::Location.eq(location))
            .order_by_asc(cafes::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Cafes::find().count(&self.conn).await?;
        Ok(count)
    }

    pub async fn update_coffee_price(&self, id: i32, coffee_price: Option<String>) -> Result<bool> {
        let result = Cafes::update_many()
            .col_expr(
                cafes::Column::CoffeePrice,
                sea_orm::sea_query::Expr::value(coffee_price),
            )
            .filter(cafes::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Cafes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
