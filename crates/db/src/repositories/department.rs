//! Department repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::departments;

/// Fields an admin may change on a department.
#[derive(Debug, Clone, Default)]
pub struct UpdateDepartmentInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Department repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    db: DatabaseConnection,
}

impl DepartmentRepository {
    /// Creates a new department repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new department.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
    ) -> Result<departments::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let department = departments::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        department.insert(&self.db).await
    }

    /// Finds a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<departments::Model>, DbErr> {
        departments::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a department by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<departments::Model>, DbErr> {
        departments::Entity::find()
            .filter(departments::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Lists all departments ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<departments::Model>, DbErr> {
        departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(&self.db)
            .await
    }

    /// Checks if a department with this name exists.
    ///
    /// When `exclude_id` is set, that department is ignored, allowing
    /// a rename check against every other row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query =
            departments::Entity::find().filter(departments::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(departments::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await?;

        Ok(count > 0)
    }

    /// Updates a department's name and/or description.
    ///
    /// Returns `None` if the department does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateDepartmentInput,
    ) -> Result<Option<departments::Model>, DbErr> {
        let Some(existing) = departments::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut department: departments::ActiveModel = existing.into();
        if let Some(name) = input.name {
            department.name = Set(name);
        }
        if let Some(description) = input.description {
            department.description = Set(description);
        }
        department.updated_at = Set(chrono::Utc::now().into());

        let updated = department.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Deletes a department.
    ///
    /// Returns true if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = departments::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
