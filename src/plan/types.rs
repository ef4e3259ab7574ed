//! Core data model for deployment plans.
//!
//! This module defines the `Plan` aggregate and everything it owns. The
//! types map one-to-one to the persisted JSON document, which keeps the
//! field names of the original authoring tool (`projectName`,
//! `estimatedTime`, `serverCount`, `servers`, `deploymentOrder`).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Lowest resource count a plan may declare.
pub const RESOURCE_COUNT_MIN: u32 = 1;

/// Highest resource count a plan may declare.
pub const RESOURCE_COUNT_MAX: u32 = 10;

/// Resource count a fresh plan declares.
pub const DEFAULT_RESOURCE_COUNT: u32 = 3;

/// Estimated duration in minutes a fresh plan declares.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;

/// Date format used in the persisted document.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A complete deployment plan under authoring.
///
/// This is the single mutable aggregate the whole tool operates on. The
/// derived collections (`resources`, `deployment_order`) are repaired by
/// the reconcilers in [`crate::plan`], never implicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Name of the project being deployed.
    pub project_name: String,

    /// Target environment.
    #[serde(default)]
    pub environment: Environment,

    /// Estimated deployment duration in minutes.
    #[serde(rename = "estimatedTime", deserialize_with = "deserialize_u32_or_text")]
    pub estimated_minutes: u32,

    /// Declared number of resources, between [`RESOURCE_COUNT_MIN`] and
    /// [`RESOURCE_COUNT_MAX`].
    #[serde(rename = "serverCount", deserialize_with = "deserialize_u32_or_text")]
    pub resource_count: u32,

    /// Scheduled deployment date.
    #[serde(
        default,
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub deployment_date: Option<NaiveDate>,

    /// Person responsible for the deployment.
    #[serde(default)]
    pub manager: String,

    /// Resources included in the deployment.
    #[serde(rename = "servers", default)]
    pub resources: Vec<Resource>,

    /// Resource ids in deployment order.
    #[serde(default)]
    pub deployment_order: Vec<ResourceRef>,
}

/// Target environment for a deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment.
    #[default]
    Dev,
    /// Staging environment.
    Staging,
    /// Production environment.
    Production,
}

/// A single resource included in the deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// Unique, stable identifier within the plan.
    pub id: u32,
    /// Display name of the resource.
    pub name: String,
    /// Resource type.
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
    /// Operational details attached in the detail-editing step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ResourceDetails>,
}

/// Resource type options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// HTTP API service.
    #[default]
    Api,
    /// Database.
    Db,
    /// Message queue.
    MessageQueue,
    /// Serverless function.
    Function,
    /// Anything else.
    Other,
}

/// Operational details for a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ResourceDetails {
    /// Environment variables to configure on the resource.
    #[serde(default)]
    pub env: Vec<EnvVar>,
    /// SQL scripts to run during the deployment.
    #[serde(default)]
    pub sql: Vec<SqlScript>,
    /// Rollback plan for this resource.
    #[serde(default)]
    pub rollback: RollbackPlan,
}

/// An environment variable entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EnvVar {
    /// Variable name.
    #[serde(default)]
    pub key: String,
    /// Variable value.
    #[serde(default)]
    pub value: String,
}

/// A SQL script to run during the deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SqlScript {
    /// The SQL text, kept verbatim.
    #[serde(default)]
    pub query: String,
    /// What the script is for.
    #[serde(default)]
    pub description: String,
}

/// Rollback point and procedure for a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RollbackPlan {
    /// Version or snapshot to roll back to.
    #[serde(default)]
    pub point: String,
    /// Steps to execute when rolling back.
    #[serde(default)]
    pub procedure: String,
}

/// A reference to a resource by id, as stored in the deployment order.
///
/// Serializes as a bare id. Deserialization also accepts the legacy order
/// format where each entry carried an embedded copy of the resource; only
/// the id survives such an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceRef(u32);

impl Plan {
    /// Creates a plan with the authoring defaults: dev environment, a
    /// thirty-minute estimate, and three declared resources.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            project_name: String::new(),
            environment: Environment::Dev,
            estimated_minutes: DEFAULT_ESTIMATED_MINUTES,
            resource_count: DEFAULT_RESOURCE_COUNT,
            deployment_date: None,
            manager: String::new(),
            resources: Vec::new(),
            deployment_order: Vec::new(),
        }
    }

    /// Looks up a resource by id.
    #[must_use]
    pub fn resource(&self, id: u32) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Looks up a resource by id for mutation.
    pub fn resource_mut(&mut self, id: u32) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.id == id)
    }

    /// Returns the ids of the current resources in declaration order.
    #[must_use]
    pub fn resource_ids(&self) -> Vec<u32> {
        self.resources.iter().map(|r| r.id).collect()
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource {
    /// Creates a resource with the provisioning defaults for the given id.
    #[must_use]
    pub fn provisioned(id: u32) -> Self {
        Self {
            id,
            name: format!("Resource {id}"),
            kind: ResourceKind::default(),
            details: None,
        }
    }
}

impl Environment {
    /// Returns the wire token for this environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Returns the human-readable label used in rendered documents.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dev => "Development",
            Self::Staging => "Staging",
            Self::Production => "Production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "staging" | "stage" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!(
                "Invalid environment: {other}. Expected: dev, staging, or production"
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResourceKind {
    /// Returns the wire token for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Db => "db",
            Self::MessageQueue => "message-queue",
            Self::Function => "function",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label used in rendered documents.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Api => "Azure App Service",
            Self::Db => "database",
            Self::MessageQueue => "Azure Service Bus",
            Self::Function => "Azure Function",
            Self::Other => "etc",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "db" | "database" => Ok(Self::Db),
            "message-queue" | "mq" => Ok(Self::MessageQueue),
            "function" => Ok(Self::Function),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "Invalid resource type: {other}. Expected: api, db, message-queue, function, or other"
            )),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EnvVar {
    /// Creates a new environment variable entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl SqlScript {
    /// Creates a new SQL script entry.
    #[must_use]
    pub fn new(query: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            description: description.into(),
        }
    }
}

impl RollbackPlan {
    /// Returns true when neither a rollback point nor a procedure is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.point.is_empty() && self.procedure.is_empty()
    }
}

impl ResourceDetails {
    /// Returns true when no detail of any kind has been filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.env.is_empty() && self.sql.is_empty() && self.rollback.is_empty()
    }
}

impl ResourceRef {
    /// Creates a reference to the given resource id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the referenced resource id.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for ResourceRef {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ResourceRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RefRepr {
            Id(u32),
            Snapshot { id: u32 },
        }

        match RefRepr::deserialize(deserializer)? {
            RefRepr::Id(id) | RefRepr::Snapshot { id } => Ok(Self(id)),
        }
    }
}

// Wire-format shims for fields the legacy tool stored as strings.

fn deserialize_u32_or_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse::<u32>()
            .map_err(|_| DeError::custom(format!("expected a non-negative integer, got {text:?}"))),
    }
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| DeError::custom(format!("expected a YYYY-MM-DD date, got {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_defaults() {
        let plan = Plan::new();
        assert_eq!(plan.environment, Environment::Dev);
        assert_eq!(plan.estimated_minutes, 30);
        assert_eq!(plan.resource_count, 3);
        assert!(plan.project_name.is_empty());
        assert!(plan.resources.is_empty());
        assert!(plan.deployment_order.is_empty());
        assert!(plan.deployment_date.is_none());
    }

    #[test]
    fn test_provisioned_resource_defaults() {
        let resource = Resource::provisioned(4);
        assert_eq!(resource.id, 4);
        assert_eq!(resource.name, "Resource 4");
        assert_eq!(resource.kind, ResourceKind::Api);
        assert!(resource.details.is_none());
    }

    #[test]
    fn test_resource_kind_wire_tokens() {
        let value = serde_json::to_value(ResourceKind::MessageQueue).unwrap();
        assert_eq!(value, json!("message-queue"));
        let kind: ResourceKind = serde_json::from_value(json!("db")).unwrap();
        assert_eq!(kind, ResourceKind::Db);
    }

    #[test]
    fn test_resource_kind_from_str() {
        assert_eq!("mq".parse::<ResourceKind>().unwrap(), ResourceKind::MessageQueue);
        assert_eq!("API".parse::<ResourceKind>().unwrap(), ResourceKind::Api);
        assert!("blob".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let resource = Resource::provisioned(1);
        let value = serde_json::to_value(&resource).unwrap();
        assert!(value.get("details").is_none());
        assert_eq!(value.get("type"), Some(&json!("api")));
    }

    #[test]
    fn test_order_accepts_legacy_snapshot_objects() {
        let value = json!([2, { "id": 1, "name": "Resource 1", "type": "api" }]);
        let order: Vec<ResourceRef> = serde_json::from_value(value).unwrap();
        assert_eq!(order, vec![ResourceRef::new(2), ResourceRef::new(1)]);
    }

    #[test]
    fn test_numeric_fields_accept_digit_strings() {
        let value = json!({
            "projectName": "legacy",
            "environment": "dev",
            "estimatedTime": "45",
            "serverCount": "2",
            "deploymentDate": "",
            "manager": "",
            "servers": [],
            "deploymentOrder": []
        });
        let plan: Plan = serde_json::from_value(value).unwrap();
        assert_eq!(plan.estimated_minutes, 45);
        assert_eq!(plan.resource_count, 2);
        assert!(plan.deployment_date.is_none());
    }

    #[test]
    fn test_date_round_trip() {
        let mut plan = Plan::new();
        plan.project_name = String::from("dated");
        plan.deployment_date = NaiveDate::from_ymd_opt(2026, 9, 1);

        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value.get("deploymentDate"), Some(&json!("2026-09-01")));

        let back: Plan = serde_json::from_value(value).unwrap();
        assert_eq!(back.deployment_date, plan.deployment_date);
    }

    #[test]
    fn test_resource_lookup_by_id() {
        let mut plan = Plan::new();
        plan.resources = vec![Resource::provisioned(1), Resource::provisioned(2)];

        assert_eq!(plan.resource(2).map(|r| r.id), Some(2));
        assert!(plan.resource(9).is_none());

        if let Some(resource) = plan.resource_mut(1) {
            resource.name = String::from("gateway");
        }
        assert_eq!(plan.resource(1).map(|r| r.name.as_str()), Some("gateway"));
    }
}
