use crate::config::{Config, LLMProvider};
use clap::Parser;
use std::path::PathBuf;

/// ideacheck-rs - 由Rust与AI驱动的商业创意校验流水线
#[derive(Parser, Debug)]
#[command(name = "ideacheck-rs")]
#[command(
    about = "AI-based business idea validation pipeline. It researches whether an idea already exists in the market, decides 'done' or 'not done', and produces an actionable plan for pursuing the idea."
)]
#[command(version)]
pub struct Args {
    /// 创意文本。未提供时将在启动后从控制台读取
    pub idea: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, anthropic, gemini, deepseek, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 模型名称
    #[arg(short, long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 模型调用失败后的重试次数
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// 重试间隔（毫秒）
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// 单次模型调用超时时间（秒）
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// 搜索服务API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 搜索服务API基地址
    #[arg(long)]
    pub search_api_base_url: Option<String>,

    /// 单次搜索返回的结果数量
    #[arg(long)]
    pub num_results: Option<usize>,

    /// 禁用内置搜索工具
    #[arg(long, default_value = "false", action = clap::ArgAction::SetTrue)]
    pub disable_preset_tools: bool,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 强制重新生成（清除缓存）
    #[arg(long)]
    pub force_regenerate: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)
                .unwrap_or_else(|_| panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path))
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("ideacheck.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!("⚠️ 警告: 无法读取默认配置文件 {:?}", default_config_path)
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 创意文本：CLI参数优先级最高
        if let Some(idea) = self.idea {
            config.idea = Some(idea);
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(retry_attempts) = self.retry_attempts {
            config.llm.retry_attempts = retry_attempts;
        }
        if let Some(retry_delay_ms) = self.retry_delay_ms {
            config.llm.retry_delay_ms = retry_delay_ms;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.llm.timeout_seconds = timeout_seconds;
        }
        config.llm.disable_preset_tools = self.disable_preset_tools;

        // 覆盖搜索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(search_api_base_url) = self.search_api_base_url {
            config.search.api_base_url = search_api_base_url;
        }
        if let Some(num_results) = self.num_results {
            config.search.num_results = num_results;
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        config.force_regenerate = self.force_regenerate;
        config.verbose = self.verbose;

        config
    }
}
