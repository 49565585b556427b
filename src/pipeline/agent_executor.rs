//! Agent执行器 - LLM调用的统一入口，带prompt级缓存

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheManager;
use crate::llm::client::LLMClient;

/// 单次Agent执行的参数
#[derive(Debug, Clone)]
pub struct AgentExecuteParams {
    pub prompt_sys: String,
    pub prompt_user: String,
    pub cache_scope: String,
    pub log_tag: String,
}

/// Agent执行器接口。流水线只通过该接口触达模型服务，
/// 测试中以脚本化实现替代真实LLM
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// 纯对话执行（不携带工具）
    async fn prompt(&self, params: AgentExecuteParams) -> Result<String>;

    /// 带搜索工具的ReAct执行
    async fn prompt_with_tools(&self, params: AgentExecuteParams) -> Result<String>;

    /// 检查模型连接
    async fn check_connection(&self) -> Result<()> {
        Ok(())
    }
}

/// 基于LLM客户端与本地缓存的执行器实现
pub struct LlmAgentExecutor {
    llm_client: LLMClient,
    cache: Arc<RwLock<CacheManager>>,
    model_name: String,
}

impl LlmAgentExecutor {
    pub fn new(llm_client: LLMClient, cache: Arc<RwLock<CacheManager>>, model_name: String) -> Self {
        Self {
            llm_client,
            cache,
            model_name,
        }
    }

    fn cache_key(params: &AgentExecuteParams) -> String {
        format!("{}\n---\n{}", params.prompt_sys, params.prompt_user)
    }

    async fn get_cached(&self, params: &AgentExecuteParams) -> Option<String> {
        let key = Self::cache_key(params);
        let cache = self.cache.read().await;
        match cache.get::<String>(&params.cache_scope, &key).await {
            Ok(Some(hit)) => {
                println!("   📦 [{}] 命中缓存，跳过模型调用", params.log_tag);
                Some(hit)
            }
            _ => None,
        }
    }

    async fn store_cached(&self, params: &AgentExecuteParams, result: &str) {
        let key = Self::cache_key(params);
        let cache = self.cache.read().await;
        if let Err(e) = cache
            .set(
                &params.cache_scope,
                &key,
                result.to_string(),
                Some(self.model_name.clone()),
            )
            .await
        {
            eprintln!("⚠️ 写入缓存失败: {}", e);
        }
    }
}

#[async_trait]
impl AgentExecutor for LlmAgentExecutor {
    async fn prompt(&self, params: AgentExecuteParams) -> Result<String> {
        if let Some(hit) = self.get_cached(&params).await {
            return Ok(hit);
        }

        let result = self
            .llm_client
            .prompt_without_react(&params.prompt_sys, &params.prompt_user)
            .await?;
        self.store_cached(&params, &result).await;
        Ok(result)
    }

    async fn prompt_with_tools(&self, params: AgentExecuteParams) -> Result<String> {
        if let Some(hit) = self.get_cached(&params).await {
            return Ok(hit);
        }

        let result = self
            .llm_client
            .prompt(&params.prompt_sys, &params.prompt_user)
            .await?;
        self.store_cached(&params, &result).await;
        Ok(result)
    }

    async fn check_connection(&self) -> Result<()> {
        self.llm_client.check_connection().await
    }
}
