use sea_orm::{ActiveValue::Set, entity::prelude::*};

use crate::types::AppliedRevisionRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "revision_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub environment: String,

    pub revision: String,

    pub date: DateTimeUtc,
}

impl Model {
    pub fn into_record(self) -> AppliedRevisionRecord {
        AppliedRevisionRecord {
            environment: self.environment,
            revision: self.revision,
            date: self.date,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Create a new ActiveModel for insertion
    pub fn from_record(record: &AppliedRevisionRecord) -> Self {
        Self {
            environment: Set(record.environment.clone()),
            revision: Set(record.revision.clone()),
            date: Set(record.date),
            ..Default::default()
        }
    }
}
