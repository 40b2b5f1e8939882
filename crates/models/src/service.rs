use sea_orm::{
    entity::prelude::*, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::patch::Patch;
use crate::types::{now, StringList};
use crate::validation::{self, ValidationErrors, Validator};

/// Shortest accepted service description.
pub const MIN_DESCRIPTION_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Json")]
    pub benefits: StringList,
    #[sea_orm(column_type = "Json")]
    pub process_steps: StringList,
    pub timeline: String,
    pub pricing_info: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Raw payload for creating a service. Absent fields decode as empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInput {
    pub slug: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub process_steps: Vec<String>,
    pub timeline: String,
    pub pricing_info: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewService {
    pub slug: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub process_steps: Vec<String>,
    pub timeline: String,
    pub pricing_info: Option<String>,
}

impl ServiceInput {
    pub fn validate(self) -> Result<NewService, ValidationErrors> {
        let mut v = Validator::new();
        v.check("slug", validation::slug(&self.slug))
            .check("name", validation::required(&self.name))
            .check("title", validation::required(&self.title))
            .check("description", validation::min_length(&self.description, MIN_DESCRIPTION_LEN))
            .check_items("benefits", &self.benefits)
            .check_items("process_steps", &self.process_steps)
            .check("timeline", validation::required(&self.timeline));
        v.finish()?;
        Ok(NewService {
            slug: self.slug,
            name: self.name,
            title: self.title,
            description: self.description,
            benefits: self.benefits,
            process_steps: self.process_steps,
            timeline: self.timeline,
            pricing_info: validation::blank_to_none(self.pricing_info),
        })
    }
}

/// Raw partial update: absent fields stay as they are; only
/// `pricing_info` may be cleared with `null`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceUpdateInput {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub slug: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub benefits: Patch<Vec<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub process_steps: Patch<Vec<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub timeline: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub pricing_info: Patch<String>,
}

/// Validated changes for one service row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub benefits: Option<Vec<String>>,
    pub process_steps: Option<Vec<String>>,
    pub timeline: Option<String>,
    pub pricing_info: Patch<String>,
}

impl ServiceUpdateInput {
    pub fn validate(self) -> Result<(i32, ServicePatch), ValidationErrors> {
        let mut v = Validator::new();
        v.check_not_null("slug", &self.slug)
            .check_not_null("name", &self.name)
            .check_not_null("title", &self.title)
            .check_not_null("description", &self.description)
            .check_not_null("benefits", &self.benefits)
            .check_not_null("process_steps", &self.process_steps)
            .check_not_null("timeline", &self.timeline);
        if let Some(slug) = self.slug.as_value() {
            v.check("slug", validation::slug(slug));
        }
        if let Some(name) = self.name.as_value() {
            v.check("name", validation::required(name));
        }
        if let Some(title) = self.title.as_value() {
            v.check("title", validation::required(title));
        }
        if let Some(description) = self.description.as_value() {
            v.check("description", validation::min_length(description, MIN_DESCRIPTION_LEN));
        }
        if let Some(benefits) = self.benefits.as_value() {
            v.check_items("benefits", benefits);
        }
        if let Some(steps) = self.process_steps.as_value() {
            v.check_items("process_steps", steps);
        }
        if let Some(timeline) = self.timeline.as_value() {
            v.check("timeline", validation::required(timeline));
        }
        v.finish()?;

        let patch = ServicePatch {
            slug: self.slug.into_change().flatten(),
            name: self.name.into_change().flatten(),
            title: self.title.into_change().flatten(),
            description: self.description.into_change().flatten(),
            benefits: self.benefits.into_change().flatten(),
            process_steps: self.process_steps.into_change().flatten(),
            timeline: self.timeline.into_change().flatten(),
            pricing_info: self.pricing_info,
        };
        Ok((self.id, patch))
    }
}

fn slug_taken(slug: &str) -> String {
    format!("service with slug '{slug}' already exists")
}

/// Insert a validated service; a taken slug is reported as `Conflict`.
pub async fn insert(db: &DatabaseConnection, new: NewService) -> Result<Model, ModelError> {
    let ts = now();
    let slug = new.slug.clone();
    let am = ActiveModel {
        slug: Set(new.slug),
        name: Set(new.name),
        title: Set(new.title),
        description: Set(new.description),
        benefits: Set(new.benefits.into()),
        process_steps: Set(new.process_steps.into()),
        timeline: Set(new.timeline),
        pricing_info: Set(new.pricing_info),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };
    am.insert(db)
        .await
        .map_err(|e| ModelError::from_db_with_conflict(e, || slug_taken(&slug)))
}

/// All services in creation order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

/// Exact, case-sensitive slug lookup.
pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Slug.eq(slug)).one(db).await?)
}

/// Apply the fields present in `patch` and refresh `updated_at`.
pub async fn update(db: &DatabaseConnection, id: i32, patch: ServicePatch) -> Result<Model, ModelError> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("service {id} not found")))?;
    let mut am: ActiveModel = existing.into();
    let new_slug = patch.slug.clone();
    if let Some(slug) = patch.slug { am.slug = Set(slug); }
    if let Some(name) = patch.name { am.name = Set(name); }
    if let Some(title) = patch.title { am.title = Set(title); }
    if let Some(description) = patch.description { am.description = Set(description); }
    if let Some(benefits) = patch.benefits { am.benefits = Set(benefits.into()); }
    if let Some(steps) = patch.process_steps { am.process_steps = Set(steps.into()); }
    if let Some(timeline) = patch.timeline { am.timeline = Set(timeline); }
    if let Some(pricing) = patch.pricing_info.into_change() { am.pricing_info = Set(pricing); }
    am.updated_at = Set(now());
    am.update(db).await.map_err(|e| {
        ModelError::from_db_with_conflict(e, || slug_taken(new_slug.as_deref().unwrap_or_default()))
    })
}
