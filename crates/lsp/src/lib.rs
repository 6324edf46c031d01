pub mod config;
pub mod locate;
pub mod output;
pub mod providers;
pub mod window;

pub use config::LspConfiguration;
pub use output::{drain_complete_lines, LspOutputChannel};
pub use providers::ContentProviderRegistry;
pub use window::{LspStatusBarItem, LspWindow};

use extkit_api::ApiError;
use extkit_core::env::{JavaSettings, ResolvedRuntime, RuntimeLocator};
use extkit_core::ui::OutputManager;
use locate::RuntimeSlot;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// Returns the text of a virtual document; the only argument is its URI.
pub const CONTENT_COMMAND: &str = "extkit.textDocumentContent";
/// Returns the resolved JDK, or `null` while none is known.
pub const RUNTIME_COMMAND: &str = "extkit.runtime";

pub struct ExtkitServer {
    client: Client,
    window: Arc<LspWindow>,
    outputs: Arc<OutputManager>,
    locator: RuntimeLocator,
    settings: JavaSettings,
    scope: RwLock<Option<Url>>,
    runtime: RuntimeSlot,
    cancel_token: CancellationToken,
}

impl ExtkitServer {
    pub fn new(client: Client, locator: RuntimeLocator, settings: JavaSettings) -> Self {
        let window = Arc::new(LspWindow::new(client.clone()));
        Self {
            outputs: Arc::new(OutputManager::new(window.clone())),
            window,
            client,
            locator,
            settings,
            scope: RwLock::new(None),
            runtime: RuntimeSlot::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn window(&self) -> &LspWindow {
        &self.window
    }

    /// The result of the latest finished JDK lookup, if it succeeded.
    pub async fn runtime(&self) -> Option<ResolvedRuntime> {
        self.runtime.get().await
    }

    async fn relocate(&self) {
        let scope = self.scope.read().await.clone();
        let config = LspConfiguration::new(self.client.clone()).with_scope(scope);
        locate::spawn_locate(
            self.client.clone(),
            self.outputs.clone(),
            config,
            self.locator.clone(),
            self.settings.clone(),
            self.runtime.clone(),
            self.runtime.begin(&self.cancel_token),
        );
    }
}

fn content_uri(arguments: &[Value]) -> Result<Url> {
    arguments
        .first()
        .and_then(Value::as_str)
        .and_then(|uri| Url::parse(uri).ok())
        .ok_or_else(|| Error::invalid_params(format!("{CONTENT_COMMAND} expects a document URI")))
}

fn to_rpc_error(e: ApiError) -> Error {
    match e {
        ApiError::NotFound(_) | ApiError::InvalidArgument(_) => {
            Error::invalid_params(e.to_string())
        }
        _ => Error {
            code: ErrorCode::InternalError,
            message: e.to_string().into(),
            data: None,
        },
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for ExtkitServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.scope.write().await = params.root_uri;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "extkit".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![CONTENT_COMMAND.to_string(), RUNTIME_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..ServerCapabilities::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.relocate().await;
    }

    async fn did_change_configuration(&self, _: DidChangeConfigurationParams) {
        self.client
            .log_message(MessageType::LOG, "Configuration changed, locating JDK again")
            .await;
        self.relocate().await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        match params.command.as_str() {
            CONTENT_COMMAND => {
                let uri = content_uri(&params.arguments)?;
                let content = self.window.provide_content(&uri).await.map_err(to_rpc_error)?;
                Ok(Some(Value::String(content)))
            }
            RUNTIME_COMMAND => serde_json::to_value(self.runtime().await)
                .map(Some)
                .map_err(|e| Error {
                    code: ErrorCode::InternalError,
                    message: e.to_string().into(),
                    data: None,
                }),
            other => Err(Error::invalid_params(format!("Unknown command '{other}'"))),
        }
    }

    async fn shutdown(&self) -> Result<()> {
        self.cancel_token.cancel();
        self.outputs.dispose_all().await;
        Ok(())
    }
}

pub async fn run_server(
    locator: RuntimeLocator,
    settings: JavaSettings,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(move |client| {
        ExtkitServer::new(client, locator.clone(), settings.clone())
    });
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
