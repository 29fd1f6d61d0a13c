mod client;
mod endpoints;
mod normalize;
mod provider;
mod types;

pub use provider::{AzureDevOpsProvider, TriggerRequest};
