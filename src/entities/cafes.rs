use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cafes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(250))")]
    pub name: String,

    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub map_url: String,

    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub img_url: String,

    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub location: String,

    /// Free text, e.g. "20-30".
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub seats: String,

    pub has_toilet: bool,

    pub has_wifi: bool,

    pub has_sockets: bool,

    pub can_take_calls: bool,

    #[sea_orm(column_type = "String(StringLen::N(250))", nullable)]
    pub coffee_price: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
