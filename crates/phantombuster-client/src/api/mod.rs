//! API endpoint implementations.

mod agents;
mod ai;
mod branches;
mod brightdata;
mod captcha;
mod containers;
mod identities;
mod location;
mod org_storage;
mod orgs;
mod scripts;
mod v1;

pub use agents::AgentsApi;
pub use ai::AiApi;
pub use branches::BranchesApi;
pub use brightdata::BrightDataApi;
pub use captcha::CaptchaApi;
pub use containers::ContainersApi;
pub use identities::IdentitiesApi;
pub use location::LocationApi;
pub use org_storage::OrgStorageApi;
pub use orgs::OrgsApi;
pub use scripts::ScriptsApi;
pub use v1::V1Api;
