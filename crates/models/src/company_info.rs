use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::patch::Patch;
use crate::types::{now, StringList};
use crate::validation::{self, ValidationErrors, Validator};

pub const MIN_MISSION_LEN: usize = 20;
pub const MIN_TEAM_DESCRIPTION_LEN: usize = 50;

/// Organization profile. The table may hold several rows; the one with the
/// lowest id is the authoritative record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub mission: String,
    #[sea_orm(column_type = "Json")]
    pub values: StringList,
    pub team_description: String,
    pub founded_year: i32,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Complete record, used when seeding the store. Absent fields decode as
/// empty (year 0) and fail their rules.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfoInput {
    pub mission: String,
    pub values: Vec<String>,
    pub team_description: String,
    pub founded_year: i32,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCompanyInfo {
    pub mission: String,
    pub values: Vec<String>,
    pub team_description: String,
    pub founded_year: i32,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

impl CompanyInfoInput {
    pub fn validate(self) -> Result<NewCompanyInfo, ValidationErrors> {
        let mut v = Validator::new();
        v.check("mission", validation::min_length(&self.mission, MIN_MISSION_LEN))
            .check_items("values", &self.values)
            .check(
                "team_description",
                validation::min_length(&self.team_description, MIN_TEAM_DESCRIPTION_LEN),
            )
            .check("founded_year", validation::founded_year(self.founded_year))
            .check("contact_email", validation::email(&self.contact_email));
        v.finish()?;
        Ok(NewCompanyInfo {
            mission: self.mission,
            values: self.values,
            team_description: self.team_description,
            founded_year: self.founded_year,
            contact_email: self.contact_email,
            contact_phone: validation::blank_to_none(self.contact_phone),
            address: validation::blank_to_none(self.address),
        })
    }
}

/// Raw partial update. `contact_phone` and `address` accept `null` to clear;
/// every other field may only be omitted or set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompanyInfoUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub mission: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub values: Patch<Vec<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub team_description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub founded_year: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub contact_email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub contact_phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    pub address: Patch<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyInfoPatch {
    pub mission: Option<String>,
    pub values: Option<Vec<String>>,
    pub team_description: Option<String>,
    pub founded_year: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Patch<String>,
    pub address: Patch<String>,
}

impl CompanyInfoUpdate {
    pub fn validate(self) -> Result<CompanyInfoPatch, ValidationErrors> {
        let mut v = Validator::new();
        v.check_not_null("mission", &self.mission)
            .check_not_null("values", &self.values)
            .check_not_null("team_description", &self.team_description)
            .check_not_null("founded_year", &self.founded_year)
            .check_not_null("contact_email", &self.contact_email);
        if let Some(mission) = self.mission.as_value() {
            v.check("mission", validation::min_length(mission, MIN_MISSION_LEN));
        }
        if let Some(values) = self.values.as_value() {
            v.check_items("values", values);
        }
        if let Some(team) = self.team_description.as_value() {
            v.check("team_description", validation::min_length(team, MIN_TEAM_DESCRIPTION_LEN));
        }
        if let Some(year) = self.founded_year.as_value() {
            v.check("founded_year", validation::founded_year(*year));
        }
        if let Some(email) = self.contact_email.as_value() {
            v.check("contact_email", validation::email(email));
        }
        v.finish()?;

        Ok(CompanyInfoPatch {
            mission: self.mission.into_change().flatten(),
            values: self.values.into_change().flatten(),
            team_description: self.team_description.into_change().flatten(),
            founded_year: self.founded_year.into_change().flatten(),
            contact_email: self.contact_email.into_change().flatten(),
            contact_phone: self.contact_phone,
            address: self.address,
        })
    }
}

impl From<configs::CompanySeed> for CompanyInfoInput {
    fn from(seed: configs::CompanySeed) -> Self {
        Self {
            mission: seed.mission,
            values: seed.values,
            team_description: seed.team_description,
            founded_year: seed.founded_year,
            contact_email: seed.contact_email,
            contact_phone: seed.contact_phone,
            address: seed.address,
        }
    }
}

pub async fn insert(db: &DatabaseConnection, new: NewCompanyInfo) -> Result<Model, ModelError> {
    let ts = now();
    let am = ActiveModel {
        mission: Set(new.mission),
        values: Set(new.values.into()),
        team_description: Set(new.team_description),
        founded_year: Set(new.founded_year),
        contact_email: Set(new.contact_email),
        contact_phone: Set(new.contact_phone),
        address: Set(new.address),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// The authoritative record: lowest id wins when several exist.
pub async fn first(db: &DatabaseConnection) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).one(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

/// Overwrite only the fields present in `patch`; `updated_at` always moves.
pub async fn update(db: &DatabaseConnection, id: i32, patch: CompanyInfoPatch) -> Result<Model, ModelError> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("company info"))?;
    let mut am: ActiveModel = existing.into();
    if let Some(mission) = patch.mission { am.mission = Set(mission); }
    if let Some(values) = patch.values { am.values = Set(values.into()); }
    if let Some(team) = patch.team_description { am.team_description = Set(team); }
    if let Some(year) = patch.founded_year { am.founded_year = Set(year); }
    if let Some(email) = patch.contact_email { am.contact_email = Set(email); }
    if let Some(phone) = patch.contact_phone.into_change() { am.contact_phone = Set(phone); }
    if let Some(address) = patch.address.into_change() { am.address = Set(address); }
    am.updated_at = Set(now());
    Ok(am.update(db).await?)
}
