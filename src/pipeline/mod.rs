pub mod agent_executor;
pub mod agents;
pub mod context;
pub mod input;
pub mod orchestrator;
pub mod stage_agent;
pub mod verdict;
pub mod workflow;
