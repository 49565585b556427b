//! Agent构建器 - 根据配置组装带/不带搜索工具的Agent

use crate::config::Config;
use crate::llm::tools::web_search::AgentToolWebSearch;

use super::providers::{ProviderAgent, ProviderClient};

/// Agent构建器
pub struct AgentBuilder<'a> {
    client: &'a ProviderClient,
    config: &'a Config,
}

impl<'a> AgentBuilder<'a> {
    pub fn new(client: &'a ProviderClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// 构建带搜索工具的Agent。工具被禁用或搜索凭证缺失时退化为纯对话Agent
    pub fn build_agent_with_tools(&self, system_prompt: &str) -> ProviderAgent {
        if self.config.llm.disable_preset_tools {
            return self.build_agent_without_tools(system_prompt);
        }
        if self.config.search.api_key.trim().is_empty() {
            eprintln!("⚠️ 搜索服务API key未配置（EXA_API_KEY），Agent将在无搜索工具的模式下运行");
            return self.build_agent_without_tools(system_prompt);
        }

        let web_search = AgentToolWebSearch::new(
            self.config.search.clone(),
            self.config.llm.timeout_seconds,
        );
        self.client.create_agent_with_tools(
            &self.config.llm.model,
            system_prompt,
            &self.config.llm,
            &web_search,
        )
    }

    /// 构建纯对话Agent
    pub fn build_agent_without_tools(&self, system_prompt: &str) -> ProviderAgent {
        self.client
            .create_agent(&self.config.llm.model, system_prompt, &self.config.llm)
    }
}
