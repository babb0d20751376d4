

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::assistant::EventAssistant;
use crate::catalog::EventCatalog;
use crate::core::config::YeetupConfig;
use crate::core::error::YeetupError;


pub const CONFIG_PATH_VAR: &str = "YEETUP_CONFIG";

const CONFIG_URI: &str = "config://yeetup";
const CATALOG_URI: &str = "catalog://events";

const TOOL_NAMES: &[&str] = &["ask_events", "find_events", "get_history", "transcribe_audio"];


#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct AskEventsParams {
    #[schemars(description = "What the student is looking for, e.g. 'any hackathons for uni students?'")]
    pub question: String,
    #[schemars(description = "Conversation id from a previous answer; omit to start a new conversation")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct FindEventsParams {
    #[schemars(description = "Free-text question to refine and rank events for")]
    pub question: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct GetHistoryParams {
    #[schemars(description = "Conversation id returned by ask_events")]
    pub session_id: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct TranscribeAudioParams {
    #[schemars(description = "Path to a local audio file (wav, mp3, m4a, webm)")]
    pub path: String,
}


#[derive(Clone)]
pub struct YeetupMcpServer {
    assistant: Arc<EventAssistant>,
    config: Arc<YeetupConfig>,
    tool_router: ToolRouter<Self>,
}

impl YeetupMcpServer {

    pub fn new(assistant: EventAssistant, config: YeetupConfig) -> Self {
        Self {
            assistant: Arc::new(assistant),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }


    fn convert_error(err: YeetupError) -> McpError {
        match err {
            YeetupError::Config(msg) | YeetupError::Transcription(msg) => {
                McpError::invalid_params(msg, None)
            }
            YeetupError::Io(e) => McpError::invalid_params(e.to_string(), None),
            other => McpError::internal_error(other.to_string(), None),
        }
    }


    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

#[tool_router]
impl YeetupMcpServer {

    #[tool(description = "Ask the event assistant a question. Keeps per-session conversation history. Returns: {response, session_id}")]
    async fn ask_events(
        &self,
        Parameters(params): Parameters<AskEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        let reply = self
            .assistant
            .ask(&params.question, params.session_id.as_deref())
            .await
            .map_err(Self::convert_error)?;

        info!("Answered session {}", crate::safe_truncate(reply.session_id.as_str(), 8));

        let json = Self::result_to_json(&reply)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Refine a question into keywords and rank matching events without generating an answer. Returns: {refined, events: [{event, score}]}")]
    async fn find_events(
        &self,
        Parameters(params): Parameters<FindEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Finding events: '{}'", crate::log_preview(&params.question, 50));

        let search = self
            .assistant
            .find_events(&params.question)
            .await
            .map_err(Self::convert_error)?;

        info!("Found {} events", search.events.len());

        let json = Self::result_to_json(&search)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Get the conversation history of a session. Returns: [{role, content}]")]
    async fn get_history(
        &self,
        Parameters(params): Parameters<GetHistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let history = self.assistant.history(&params.session_id);
        let json = Self::result_to_json(&history)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Transcribe a local audio file to text, e.g. to use as an ask_events question")]
    async fn transcribe_audio(
        &self,
        Parameters(params): Parameters<TranscribeAudioParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Transcribing {}", params.path);

        let text = self
            .assistant
            .transcribe_file(Path::new(&params.path))
            .await
            .map_err(Self::convert_error)?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for YeetupMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "yeetup".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Yeetup event assistant for high school and university students. Use ask_events \
                 to chat about events (pass the returned session_id to continue a conversation), \
                 find_events to inspect ranked matches, and transcribe_audio for voice questions."
                    .to_string(),
            ),
        }
    }


    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                RawResource::new(CONFIG_URI, "yeetup-config".to_string()).no_annotation(),
                RawResource::new(CATALOG_URI, "event-catalog".to_string()).no_annotation(),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let body = match uri.as_str() {
            CONFIG_URI => config_summary(&self.config),
            CATALOG_URI => catalog_summary(self.assistant.catalog()),
            _ => {
                return Err(McpError::resource_not_found(
                    format!("Unknown resource: {}", uri),
                    Some(json!({ "uri": uri })),
                ));
            }
        };

        let content = Self::result_to_json(&body)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }
}


/// Public view of the configuration. The API key is reported only as present or absent.
fn config_summary(config: &YeetupConfig) -> Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "llm": {
            "provider": config.llm_provider,
            "model": config.llm_model,
            "base_url": config.llm_base_url,
            "timeout_secs": config.llm_timeout_secs,
            "api_key_configured": config.llm_api_key.is_some(),
        },
        "transcription_model": config.transcription_model,
        "catalog_path": config.catalog_path,
        "tools": TOOL_NAMES,
    })
}


fn catalog_summary(catalog: &EventCatalog) -> Value {
    json!({
        "count": catalog.len(),
        "names": catalog.names(),
    })
}


pub async fn run_server() -> anyhow::Result<()> {
    info!("Initializing Yeetup MCP Server...");

    let config_path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let config = YeetupConfig::load(config_path.as_deref())?;
    let assistant = EventAssistant::from_config(&config)?;

    info!("Yeetup MCP Server ready");
    info!("   LLM: {}/{}", config.llm_provider, config.llm_model);
    info!(
        "   Catalog: {} ({} events)",
        config.catalog_path,
        assistant.catalog().len()
    );

    let server = YeetupMcpServer::new(assistant, config);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_events;

    #[test]
    fn test_config_summary_hides_api_key() {
        let mut config = YeetupConfig::default();
        config.llm_api_key = Some("gsk_secret".to_string());

        let summary = config_summary(&config);
        let text = summary.to_string();

        assert!(!text.contains("gsk_secret"));
        assert_eq!(summary["llm"]["api_key_configured"], json!(true));
        assert_eq!(summary["llm"]["provider"], json!("groq"));
        assert_eq!(summary["catalog_path"], json!(crate::DEFAULT_CATALOG_PATH));
    }

    #[test]
    fn test_catalog_summary_lists_names() {
        let catalog = EventCatalog::from_events(sample_events());
        let summary = catalog_summary(&catalog);

        assert_eq!(summary["count"], json!(4));
        assert_eq!(summary["names"][0], json!("Tech Hackathon"));
    }

    #[test]
    fn test_tool_params_schema() {
        let schema = serde_json::to_value(rmcp::schemars::schema_for!(AskEventsParams)).unwrap();

        assert!(schema["properties"]["question"].is_object());
        assert!(schema["properties"]["session_id"].is_object());
        assert_eq!(schema["required"], json!(["question"]));

        let schema =
            serde_json::to_value(rmcp::schemars::schema_for!(TranscribeAudioParams)).unwrap();
        assert_eq!(schema["required"], json!(["path"]));
    }

    #[test]
    fn test_error_mapping() {
        let err = YeetupMcpServer::convert_error(YeetupError::Transcription("none".into()));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = YeetupMcpServer::convert_error(YeetupError::Io(missing));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = YeetupMcpServer::convert_error(YeetupError::Catalog("bad".into()));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }
}
