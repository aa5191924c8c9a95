use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, work_session::RWorkSessionUpdate};
use crate::utils::{token, validation::require_non_empty};
use chrono::{Duration, Utc};
use entity::tab::{ActiveModel as TabActive, Entity as Tab, Model as TabModel};
use entity::work_session::{ActiveModel as WorkSessionActive, Entity as WorkSession, Model as WorkSessionModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

/// Sessions are looked up through their owner, so another user's session
/// is indistinguishable from a missing one.
pub(crate) async fn find_owned_session<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<WorkSessionModel, AppError> {
    Ok(WorkSession::find_by_id(id)
        .filter(entity::work_session::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Work session not found".into()))?)
}

async fn tabs_of<C: ConnectionTrait>(conn: &C, work_session_id: Uuid) -> Result<Vec<TabModel>, AppError> {
    Ok(Tab::find()
        .filter(entity::tab::Column::WorkSessionId.eq(work_session_id))
        .order_by_asc(entity::tab::Column::CreatedAt)
        .all(conn)
        .await?)
}

impl PostgresService {
    pub async fn create_work_session(&self, user_id: Uuid, name: String) -> Result<WorkSessionModel, AppError> {
        require_non_empty("name", &name)?;
        let now = Utc::now();
        Ok(WorkSessionActive {
            id: Set(token::new_id()),
            user_id: Set(user_id),
            name: Set(name.trim().to_string()),
            started_at: Set(now),
            ended_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?)
    }

    /// The session plus its tabs, oldest tab first.
    pub async fn get_work_session(&self, user_id: Uuid, id: Uuid) -> Result<(WorkSessionModel, Vec<TabModel>), AppError> {
        let ws = find_owned_session(&self.database_connection, user_id, id).await?;
        let tabs = tabs_of(&self.database_connection, ws.id).await?;
        Ok((ws, tabs))
    }

    /// Renames and/or ends a session. Ending twice keeps the first end time.
    pub async fn update_work_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: RWorkSessionUpdate,
    ) -> Result<WorkSessionModel, AppError> {
        let current = find_owned_session(&self.database_connection, user_id, id).await?;
        let already_ended = current.ended_at.is_some();
        let mut am: WorkSessionActive = current.into();

        if let Some(name) = patch.name {
            require_non_empty("name", &name)?;
            am.name = Set(name.trim().to_string());
        }
        if patch.ended && !already_ended {
            am.ended_at = Set(Some(Utc::now()));
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.database_connection).await?)
    }

    /// Starts a new session with copies of the template's tabs. All or nothing.
    pub async fn create_work_session_from_template(
        &self,
        user_id: Uuid,
        template_id: Uuid,
        name: Option<String>,
    ) -> Result<(WorkSessionModel, Vec<TabModel>), AppError> {
        let txn = self.database_connection.begin().await?;

        let template = find_owned_session(&txn, user_id, template_id).await?;
        let name = match name {
            Some(n) => {
                require_non_empty("name", &n)?;
                n.trim().to_string()
            }
            None => template.name.clone(),
        };

        let now = Utc::now();
        let ws = WorkSessionActive {
            id: Set(token::new_id()),
            user_id: Set(user_id),
            name: Set(name),
            started_at: Set(now),
            ended_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut tabs = Vec::new();
        // offset each copy so the template's order survives the copy
        for (i, src) in tabs_of(&txn, template.id).await?.into_iter().enumerate() {
            let at = now + Duration::microseconds(i as i64);
            let tab = TabActive {
                id: Set(token::new_id()),
                work_session_id: Set(ws.id),
                title: Set(src.title),
                url: Set(src.url),
                created_at: Set(at),
                updated_at: Set(at),
            }
            .insert(&txn)
            .await?;
            tabs.push(tab);
        }

        txn.commit().await?;
        Ok((ws, tabs))
    }
}
