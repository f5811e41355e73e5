use crate::clients::{ItemClient, SessionClient, UserClient};
use crate::config::BazaarConfig;
use crate::{item_actor, session_actor, user_actor};
use tracing::{error, info};

/// The runtime orchestrator for the marketplace.
///
/// `MarketSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping all actors
/// - **Dependency Wiring**: handing the user client to the item and session actors
///
/// # Example
///
/// ```rust
/// use bazaar::config::BazaarConfig;
/// use bazaar::lifecycle::MarketSystem;
/// use bazaar::model::UserCreate;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = MarketSystem::new(&BazaarConfig::default());
///
///     system
///         .user_client
///         .register(UserCreate {
///             username: "alice".into(),
///             password: "pw".into(),
///         })
///         .await?;
///     let token = system.session_client.login("alice", "pw").await?;
///     let caller = system.session_client.authenticate(&token).await?;
///     assert!(system.item_client.tag_frequency(&caller).await?.is_empty());
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct MarketSystem {
    pub user_client: UserClient,
    pub item_client: ItemClient,
    pub session_client: SessionClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Creates every actor and spawns it in its own Tokio task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &BazaarConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors (no dependencies yet)
        let (user_actor, user_client) = user_actor::new(buffer);
        let (item_actor, item_client) = item_actor::new(buffer);
        let (session_actor, session_client) = session_actor::new(buffer, user_client.clone(), config.session_ttl());

        // 2. Start actors with injected context
        let user_handle = tokio::spawn(user_actor.run(()));
        let item_handle = tokio::spawn(item_actor.run(user_client.clone()));
        let session_handle = tokio::spawn(session_actor.run(user_client.clone()));

        info!(buffer, "Market system started");
        Self {
            user_client,
            item_client,
            session_client,
            handles: vec![user_handle, item_handle, session_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Clones of the clients held elsewhere (e.g. by the HTTP router) keep
    /// their actors alive, so drop those first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Closing every sender makes each actor's recv() return None
        drop(self.session_client);
        drop(self.item_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
