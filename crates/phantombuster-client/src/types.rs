//! Request and response types for the PhantomBuster API.
//!
//! Field names follow the wire format of each endpoint, which mixes
//! camelCase and snake_case.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Shared
// ─────────────────────────────────────────────────────────────────────────────

/// Generic success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Optional message from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Query or body selecting a resource by ID.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct IdParam<T> {
    pub id: T,
}

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// An agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Agent name.
    #[serde(default)]
    pub name: Option<String>,
    /// Script the agent runs.
    #[serde(default)]
    pub script_id: Option<i64>,
    /// Owning organization.
    #[serde(default)]
    pub org_id: Option<i64>,
}

/// Response for list agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentListResponse {
    /// List of agents.
    pub agents: Vec<Agent>,
}

/// Request to save (create or update) an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAgentRequest {
    /// Agent to update; a new agent is created when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Agent name.
    pub name: String,
    /// Script the agent runs.
    pub script_id: i64,
}

impl SaveAgentRequest {
    /// Request creating a new agent.
    pub fn new(name: impl Into<String>, script_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            script_id,
        }
    }

    /// Update an existing agent instead.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// An agent group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentGroup {
    /// Group ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Group name.
    #[serde(default)]
    pub name: Option<String>,
    /// Agents in the group.
    #[serde(default)]
    pub agent_ids: Option<Vec<i64>>,
}

/// Response for list agent groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentGroupListResponse {
    /// List of agent groups.
    pub agent_groups: Vec<AgentGroup>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Containers
// ─────────────────────────────────────────────────────────────────────────────

/// A container: one run of an agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Container ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Agent that launched the container.
    #[serde(default)]
    pub agent_id: Option<i64>,
    /// Run status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Response for list containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerListResponse {
    /// List of containers.
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AgentIdQuery<'a> {
    pub agent_id: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scripts
// ─────────────────────────────────────────────────────────────────────────────

/// Script visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptVisibility {
    /// Only visible to the owner.
    Private,
    /// Visible to everyone.
    Public,
}

impl ScriptVisibility {
    /// Wire name of the visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptVisibility::Private => "private",
            ScriptVisibility::Public => "public",
        }
    }

    /// Parse a wire name; `None` for values this client does not know.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "private" => Some(ScriptVisibility::Private),
            "public" => Some(ScriptVisibility::Public),
            _ => None,
        }
    }
}

/// A script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Script ID.
    pub id: String,
    /// Script name.
    pub name: String,
    /// Script version.
    pub version: i64,
    /// Script source code.
    pub script: String,
    /// Script visibility as sent by the server.
    pub visibility: String,
}

impl Script {
    /// Typed visibility, or `None` if the server sent a value outside
    /// `private` and `public`.
    pub fn visibility_kind(&self) -> Option<ScriptVisibility> {
        ScriptVisibility::parse(&self.visibility)
    }
}

/// Response for list scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptListResponse {
    /// List of scripts.
    pub scripts: Vec<Script>,
}

/// Request to save (create or update) a script.
///
/// Either `id` or `name` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScriptRequest {
    /// Script source code.
    pub script: String,
    /// Script to update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name for a new script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SaveScriptRequest {
    /// Request creating a new script.
    pub fn create(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            id: None,
            name: Some(name.into()),
        }
    }

    /// Request updating an existing script.
    pub fn update(id: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            id: Some(id.into()),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateScriptVisibilityRequest<'a> {
    pub id: &'a str,
    pub visibility: ScriptVisibility,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateScriptAccessListRequest<'a> {
    pub id: &'a str,
    pub access_list: &'a [String],
}

// ─────────────────────────────────────────────────────────────────────────────
// Organizations
// ─────────────────────────────────────────────────────────────────────────────

/// Resources and usage of the current organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgResources {
    /// Organization ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Organization name.
    #[serde(default)]
    pub name: Option<String>,
    /// Subscription plan.
    #[serde(default)]
    pub plan: Option<String>,
    /// Execution time used.
    #[serde(default)]
    pub execution_time: Option<i64>,
    /// Agent slots.
    #[serde(default)]
    pub slots: Option<i64>,
    /// Storage used, in megabytes.
    #[serde(default)]
    pub storage_mb: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Branches
// ─────────────────────────────────────────────────────────────────────────────

/// A script branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Branch ID.
    pub id: i64,
    /// Branch name.
    pub name: String,
    /// Script the branch belongs to.
    pub script_id: i64,
}

/// Response for list branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchListResponse {
    /// List of branches.
    pub branches: Vec<Branch>,
}

/// Length difference between the staging and release branches of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDiff {
    /// Script ID.
    pub script_id: i64,
    /// Length difference.
    pub diff: i64,
}

/// Response for branch diffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchDiffResponse {
    /// Per-script differences.
    pub diffs: Vec<BranchDiff>,
}

/// Request to create a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    /// Script to branch from.
    pub script_id: i64,
    /// Name for the new branch.
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BranchIdBody {
    pub branch_id: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Organization storage
// ─────────────────────────────────────────────────────────────────────────────

/// A lead stored in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Lead ID.
    pub id: i64,
    /// Lead fields.
    pub data: HashMap<String, serde_json::Value>,
}

/// Response for list leads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadListResponse {
    /// List of leads.
    pub leads: Vec<Lead>,
}

/// Request to save (create or update) a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLeadRequest {
    /// List the lead belongs to.
    pub list_id: i64,
    /// Lead fields.
    pub data: HashMap<String, serde_json::Value>,
    /// Lead to update; a new lead is created when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteLeadsRequest<'a> {
    pub lead_ids: &'a [i64],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteListRequest {
    pub list_id: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Identities
// ─────────────────────────────────────────────────────────────────────────────

/// An identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Identity ID.
    pub id: i64,
    /// Identity name.
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SaveIdentityRequest<'a> {
    pub name: &'a str,
    pub token: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// AI
// ─────────────────────────────────────────────────────────────────────────────

/// Request for an AI completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCompletionRequest {
    /// Prompt to complete.
    pub prompt: String,
    /// Maximum number of tokens to sample.
    pub max_tokens_to_sample: u32,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Sequences that stop generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl AiCompletionRequest {
    /// Create a request with the required fields.
    pub fn new(prompt: impl Into<String>, max_tokens_to_sample: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens_to_sample,
            temperature: None,
            top_p: None,
            top_k: None,
            stop_sequences: None,
        }
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top_p.
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set top_k.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the stop sequences.
    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }
}

/// AI completion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCompletionResponse {
    /// Generated text.
    pub completion: String,
    /// Why generation stopped.
    pub stop_reason: String,
    /// Stop sequence that was hit, if any.
    #[serde(default)]
    pub stop: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Captcha
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CaptchaRequest<'a> {
    pub sitekey: &'a str,
    pub pageurl: &'a str,
}

/// A solved captcha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptchaSolution {
    /// Solution token.
    pub token: String,
    /// User agent the token was solved with.
    pub useragent: String,
    /// Solver error, if any.
    #[serde(default)]
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Location
// ─────────────────────────────────────────────────────────────────────────────

/// Location of the caller's IP address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// IP address.
    pub ip: String,
    /// Country code.
    pub country: String,
    /// City, when known.
    #[serde(default)]
    pub city: Option<String>,
    /// Region, when known.
    #[serde(default)]
    pub region: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Bright Data
// ─────────────────────────────────────────────────────────────────────────────

/// Search parameters for a Bright Data SERP request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerpQuery {
    /// Search query.
    pub q: String,
    /// Country to search from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,
    /// Interface language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    /// Search type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbm: Option<String>,
    /// Result offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// Number of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    /// Encoded location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uule: Option<String>,
    /// Mobile device to emulate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brd_mobile: Option<String>,
    /// Browser to emulate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brd_browser: Option<String>,
}

impl SerpQuery {
    /// Query with only the search terms set.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// v1
// ─────────────────────────────────────────────────────────────────────────────

/// A PhantomBuster account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Agents owned by the user.
    #[serde(default)]
    pub agents: Vec<Agent>,
}
