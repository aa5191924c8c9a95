use crate::db::{postgres_service::PostgresService, work_session::find_owned_session};
use crate::types::{
    error::AppError,
    work_session::{RTabCreate, RTabUpdate},
};
use crate::utils::{token, validation::require_non_empty};
use chrono::Utc;
use entity::tab::{ActiveModel as TabActive, Entity as Tab, Model as TabModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

impl PostgresService {
    async fn get_owned_tab(&self, user_id: Uuid, work_session_id: Uuid, tab_id: Uuid) -> Result<TabModel, AppError> {
        find_owned_session(&self.database_connection, user_id, work_session_id).await?;
        Ok(Tab::find_by_id(tab_id)
            .filter(entity::tab::Column::WorkSessionId.eq(work_session_id))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Tab not found".into()))?)
    }

    pub async fn create_tab(&self, user_id: Uuid, work_session_id: Uuid, tab: RTabCreate) -> Result<TabModel, AppError> {
        require_non_empty("title", &tab.title)?;
        require_non_empty("url", &tab.url)?;
        find_owned_session(&self.database_connection, user_id, work_session_id).await?;

        let now = Utc::now();
        Ok(TabActive {
            id: Set(token::new_id()),
            work_session_id: Set(work_session_id),
            title: Set(tab.title.trim().to_string()),
            url: Set(tab.url.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn update_tab(
        &self,
        user_id: Uuid,
        work_session_id: Uuid,
        tab_id: Uuid,
        patch: RTabUpdate,
    ) -> Result<TabModel, AppError> {
        let current = self.get_owned_tab(user_id, work_session_id, tab_id).await?;
        let mut am: TabActive = current.into();

        if let Some(title) = patch.title {
            require_non_empty("title", &title)?;
            am.title = Set(title.trim().to_string());
        }
        if let Some(url) = patch.url {
            require_non_empty("url", &url)?;
            am.url = Set(url.trim().to_string());
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_tab(&self, user_id: Uuid, work_session_id: Uuid, tab_id: Uuid) -> Result<(), AppError> {
        let tab = self.get_owned_tab(user_id, work_session_id, tab_id).await?;
        tab.delete(&self.database_connection).await?;
        Ok(())
    }
}
