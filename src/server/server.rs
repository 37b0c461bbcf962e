use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use std::sync::Arc;

pub struct Server {
    pub friend_list_service: Arc<dyn FriendListService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let server = match settings.store.backend.as_str() {
            "memory" => {
                warn!("using in-memory store, data is lost on shutdown");
                Self::with_memory_store(Arc::new(MemoryGraphStore::new()))
            }
            "mysql" => {
                let mysql = settings
                    .mysql
                    .as_ref()
                    .ok_or_else(|| anyhow!("store.backend = \"mysql\" requires a [mysql] section"))?;

                let pool = MySqlPoolOptions::new()
                    .max_connections(mysql.max_connections)
                    .connect(&mysql.dsn)
                    .await?;

                if mysql.run_migrations {
                    sqlx::migrate!("./migrations").run(&pool).await?;
                    info!("migrations applied");
                }

                let user_repo: Arc<dyn UserRepo> = Arc::new(MySqlUserRepo::new(pool.clone()));
                let graph_repo: Arc<dyn FriendGraphRepo> =
                    Arc::new(MySqlFriendGraphRepo::new(pool.clone()));
                let link_repo: Arc<dyn LinkRepo> = Arc::new(MySqlLinkRepo::new(pool.clone()));

                let friend_list_service: Arc<dyn FriendListService> = Arc::new(
                    RealFriendListService::new(user_repo, graph_repo, link_repo),
                );

                Self {
                    friend_list_service,
                    pool: Some(pool),
                }
            }
            other => return Err(anyhow!("Unknown store backend: {}", other)),
        };

        info!(backend = %settings.store.backend, "server started");

        Ok(server)
    }

    pub fn with_memory_store(store: Arc<MemoryGraphStore>) -> Self {
        let friend_list_service: Arc<dyn FriendListService> = Arc::new(
            RealFriendListService::new(store.clone(), store.clone(), store),
        );

        Self {
            friend_list_service,
            pool: None,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
