use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::cache::CacheManager;
use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::memory::Memory;
use crate::pipeline::agent_executor::{AgentExecutor, LlmAgentExecutor};

/// 阶段结果的Memory作用域
pub struct MemoryScope;

impl MemoryScope {
    pub const STAGES: &'static str = "stages";
}

/// 各阶段结果的键
pub struct StageKeys;

impl StageKeys {
    pub const IDEA_RESEARCH: &'static str = "idea_research";
    pub const VERDICT_DECISION: &'static str = "verdict_decision";
    pub const NEXT_STEPS: &'static str = "next_steps";
}

/// 流水线上下文。所有实体在单次运行中构造，运行之间不保留任何状态
#[derive(Clone)]
pub struct PipelineContext {
    /// 配置
    pub config: Config,
    /// Agent执行器，负责与模型服务通信
    pub executor: Arc<dyn AgentExecutor>,
    /// 阶段结果记忆，用作后续阶段的上下文
    pub memory: Arc<RwLock<Memory>>,
}

impl PipelineContext {
    /// 创建新的流水线上下文（真实LLM执行器）
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let cache = Arc::new(RwLock::new(CacheManager::new(config.cache.clone())));
        let executor = Arc::new(LlmAgentExecutor::new(
            llm_client,
            cache,
            config.llm.model.clone(),
        ));

        Ok(Self::with_executor(config, executor))
    }

    /// 以给定执行器创建上下文（测试中注入脚本化执行器）
    pub fn with_executor(config: Config, executor: Arc<dyn AgentExecutor>) -> Self {
        Self {
            config,
            executor,
            memory: Arc::new(RwLock::new(Memory::new())),
        }
    }

    /// 存储数据到 Memory
    pub async fn store_to_memory<T>(&self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.store(scope, key, data)
    }

    /// 从 Memory 获取数据
    pub async fn get_from_memory<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a> + Send + Sync,
    {
        let memory = self.memory.read().await;
        memory.get(scope, key)
    }

    /// 检查Memory中是否存在指定数据
    pub async fn has_memory_data(&self, scope: &str, key: &str) -> bool {
        let memory = self.memory.read().await;
        memory.has_data(scope, key)
    }
}
