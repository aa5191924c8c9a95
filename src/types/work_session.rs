use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct RWorkSessionCreate {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RWorkSessionFromTemplate {
    pub template_id: Uuid,
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RWorkSessionUpdate {
    pub name: Option<String>,
    #[serde(default)]
    pub ended: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RTabCreate {
    pub title: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RTabUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TabRes {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::tab::Model> for TabRes {
    fn from(t: entity::tab::Model) -> Self {
        Self { id: t.id, title: t.title, url: t.url, created_at: t.created_at, updated_at: t.updated_at }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WorkSessionRes {
    pub id: Uuid,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub tabs: Vec<TabRes>,
}

impl WorkSessionRes {
    pub fn new(ws: entity::work_session::Model, tabs: Vec<entity::tab::Model>) -> Self {
        Self {
            id: ws.id,
            name: ws.name,
            started_at: ws.started_at,
            ended_at: ws.ended_at,
            tabs: tabs.into_iter().map(TabRes::from).collect(),
        }
    }
}
