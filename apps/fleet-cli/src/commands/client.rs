//! # Client Commands
//!
//! `fleet client register | list`.

use serde::Serialize;
use tracing::info;

use super::Render;
use crate::error::CliResult;
use crate::state::AppState;
use fleet_core::{Client, ClientId};

/// Result of `fleet client register`.
#[derive(Debug, Serialize)]
pub struct ClientRegistered {
    pub id: ClientId,
}

impl Render for ClientRegistered {
    fn text(&self) -> String {
        format!("Client registered with id {}", self.id)
    }
}

/// Result of `fleet client list`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ClientList(pub Vec<Client>);

impl Render for ClientList {
    fn text(&self) -> String {
        if self.0.is_empty() {
            return "No clients registered.".to_string();
        }

        let mut out = format!("{:>4}  {:<30} {}", "ID", "NAME", "EMAIL");
        for client in &self.0 {
            out.push_str(&format!(
                "\n{:>4}  {:<30} {}",
                client.id, client.full_name, client.email
            ));
        }
        out
    }
}

pub async fn register(state: &AppState, full_name: &str, email: &str) -> CliResult<ClientRegistered> {
    let id = state.catalog().register_client(full_name, email).await?;
    info!(client_id = %id, "Client registered");
    Ok(ClientRegistered { id })
}

pub async fn list(state: &AppState) -> CliResult<ClientList> {
    Ok(ClientList(state.catalog().list_clients().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::render;
    use crate::error::ErrorCode;
    use fleet_db::{Database, DbConfig};

    async fn state() -> AppState {
        AppState::from_database(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_register_and_list() {
        let state = state().await;
        let ana = register(&state, "Ana", "ana@x.com").await.unwrap();
        assert_eq!(render(&ana, false).unwrap(), "Client registered with id 1");

        let clients = list(&state).await.unwrap();
        assert_eq!(clients.0.len(), 1);
        assert!(render(&clients, false).unwrap().contains("ana@x.com"));
    }

    #[tokio::test]
    async fn test_duplicate_email_exits_with_duplicate_key() {
        let state = state().await;
        register(&state, "Ana", "ana@x.com").await.unwrap();

        let err = register(&state, "Someone Else", "ana@x.com").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateKey);
        assert!(err.message.contains("ana@x.com"));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let state = state().await;
        let err = register(&state, "   ", "ana@x.com").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }
}
