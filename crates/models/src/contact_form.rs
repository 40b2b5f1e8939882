use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::types::now;
use crate::validation::{self, ValidationErrors, Validator};

/// Shortest accepted message body.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Compliance area a lead is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ServiceType {
    #[sea_orm(string_value = "SOC2")]
    #[serde(rename = "SOC2")]
    Soc2,
    #[sea_orm(string_value = "ISO27001")]
    #[serde(rename = "ISO27001")]
    Iso27001,
    #[sea_orm(string_value = "GDPR")]
    #[serde(rename = "GDPR")]
    Gdpr,
    #[sea_orm(string_value = "General")]
    #[serde(rename = "General")]
    General,
}

impl ServiceType {
    pub const NAMES: [&'static str; 4] = ["SOC2", "ISO27001", "GDPR", "General"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Soc2 => "SOC2",
            ServiceType::Iso27001 => "ISO27001",
            ServiceType::Gdpr => "GDPR",
            ServiceType::General => "General",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SOC2" => Some(ServiceType::Soc2),
            "ISO27001" => Some(ServiceType::Iso27001),
            "GDPR" => Some(ServiceType::Gdpr),
            "General" => Some(ServiceType::General),
            _ => None,
        }
    }
}

/// Triage state of a lead. Every submission starts as `New`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "contacted")]
    Contacted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_form")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: ServiceType,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Raw contact form payload as submitted by the public site. Absent fields
/// decode as empty so the field rules report them by name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
}

/// A submission that passed validation and is ready to persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: ServiceType,
    pub message: String,
}

impl ContactFormInput {
    pub fn validate(self) -> Result<NewContactForm, ValidationErrors> {
        let mut v = Validator::new();
        v.check("name", validation::required(&self.name))
            .check("email", validation::email(&self.email));
        let service = ServiceType::from_name(&self.service);
        v.check("service", validation::one_of(&self.service, &ServiceType::NAMES))
            .check("message", validation::min_length(&self.message, MIN_MESSAGE_LEN));
        v.finish()?;

        let service = service.ok_or_else(|| {
            ValidationErrors::single("service", validation::not_one_of(&ServiceType::NAMES))
        })?;
        Ok(NewContactForm {
            name: self.name,
            email: self.email,
            company: validation::blank_to_none(self.company),
            phone: validation::blank_to_none(self.phone),
            service,
            message: self.message,
        })
    }
}

/// Insert a validated submission with `status = new` and `created_at = now`.
pub async fn insert(db: &DatabaseConnection, new: NewContactForm) -> Result<Model, ModelError> {
    let am = ActiveModel {
        name: Set(new.name),
        email: Set(new.email),
        company: Set(new.company),
        phone: Set(new.phone),
        service: Set(new.service),
        message: Set(new.message),
        status: Set(ContactStatus::New),
        created_at: Set(now()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// All submissions in creation order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
