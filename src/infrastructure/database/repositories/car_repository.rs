//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::vehicle::{Vehicle, VehicleRepository, VehicleStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::car;

pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

// A status string the closed enum does not know is a corrupt row and
// surfaces as a Storage error.
fn model_to_domain(m: car::Model) -> DomainResult<Vehicle> {
    let status = VehicleStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("car {} has unknown status '{}'", m.id, m.status))
    })?;
    Ok(Vehicle {
        id: m.id,
        name: m.name,
        category: m.category,
        color: m.color,
        status,
        base_price: m.base_price,
        base_duration_days: m.base_duration_days,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmCarRepository {
    async fn save(&self, v: Vehicle) -> DomainResult<Vehicle> {
        debug!("Saving car: {}", v.name);

        let now = Utc::now();
        let model = car::ActiveModel {
            id: NotSet,
            name: Set(v.name),
            category: Set(v.category),
            color: Set(v.color),
            status: Set(v.status.as_str().to_string()),
            base_price: Set(v.base_price),
            base_duration_days: Set(v.base_duration_days),
            description: Set(v.description),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let models = car::Entity::find()
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_status(&self, status: VehicleStatus) -> DomainResult<Vec<Vehicle>> {
        let models = car::Entity::find()
            .filter(car::Column::Status.eq(status.as_str()))
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Updating car: {}", v.id);

        let existing = car::Entity::find_by_id(v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: v.id.to_string(),
            })?;

        // The status column belongs to the booking state machine and is
        // deliberately left out of this write.
        let mut active: car::ActiveModel = existing.into();
        active.name = Set(v.name);
        active.category = Set(v.category);
        active.color = Set(v.color);
        active.base_price = Set(v.base_price);
        active.base_duration_days = Set(v.base_duration_days);
        active.description = Set(v.description);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = car::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
