//! Web搜索工具（Exa兼容接口）

use anyhow::Result;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;

/// Web搜索工具。研究Agent和规划Agent据此获取实时的市场与竞品信息
#[derive(Debug, Clone)]
pub struct AgentToolWebSearch {
    config: SearchConfig,
    http: reqwest::Client,
}

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct WebSearchArgs {
    pub action: String, // "search", "find_similar", "get_contents"
    pub query: Option<String>,
    pub url: Option<String>,
    pub ids: Option<Vec<String>>,
    pub num_results: Option<usize>,
}

/// 单条搜索结果：带来源出处的文本摘录
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchSnippet {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub score: Option<f64>,
}

/// 搜索结果
#[derive(Debug, Serialize, Default)]
pub struct WebSearchResult {
    pub results: Vec<SearchSnippet>,
    pub total_count: usize,
    pub insights: Vec<String>,
}

/// Exa接口响应
#[derive(Debug, Deserialize)]
struct ExaResponse {
    #[serde(default)]
    results: Vec<ExaResultItem>,
}

#[derive(Debug, Deserialize)]
struct ExaResultItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

impl AgentToolWebSearch {
    pub fn new(config: SearchConfig, timeout_seconds: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    async fn post_json(&self, endpoint: &str, body: serde_json::Value) -> Result<ExaResponse> {
        let url = format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            endpoint
        );
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("搜索服务返回错误状态 {}: {}", status, text);
        }

        Ok(response.json::<ExaResponse>().await?)
    }

    fn collect_snippets(&self, response: ExaResponse) -> Vec<SearchSnippet> {
        response
            .results
            .into_iter()
            .map(|item| SearchSnippet {
                title: item.title.unwrap_or_default(),
                url: item.url.unwrap_or_default(),
                snippet: item.text.unwrap_or_default(),
                score: item.score,
            })
            .collect()
    }

    /// 关键词搜索
    async fn search(&self, args: &WebSearchArgs) -> Result<WebSearchResult> {
        let query = args
            .query
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("search action requires query parameter"))?;
        let num_results = args.num_results.unwrap_or(self.config.num_results);

        let response = self
            .post_json(
                "search",
                serde_json::json!({
                    "query": query,
                    "numResults": num_results,
                    "useAutoprompt": true,
                    "contents": { "text": { "maxCharacters": 1000 } }
                }),
            )
            .await?;

        let results = self.collect_snippets(response);
        let insights = vec![
            format!("搜索词: {}", query),
            format!("找到 {} 条结果", results.len()),
        ];

        Ok(WebSearchResult {
            total_count: results.len(),
            results,
            insights,
        })
    }

    /// 查找与给定网页相似的页面（用于竞品发现）
    async fn find_similar(&self, args: &WebSearchArgs) -> Result<WebSearchResult> {
        let url = args
            .url
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("find_similar action requires url parameter"))?;
        let num_results = args.num_results.unwrap_or(self.config.num_results);

        let response = self
            .post_json(
                "findSimilar",
                serde_json::json!({
                    "url": url,
                    "numResults": num_results,
                    "contents": { "text": { "maxCharacters": 1000 } }
                }),
            )
            .await?;

        let results = self.collect_snippets(response);
        let insights = vec![
            format!("参照页面: {}", url),
            format!("找到 {} 条相似结果", results.len()),
        ];

        Ok(WebSearchResult {
            total_count: results.len(),
            results,
            insights,
        })
    }

    /// 拉取指定结果的正文内容
    async fn get_contents(&self, args: &WebSearchArgs) -> Result<WebSearchResult> {
        let ids = args
            .ids
            .as_ref()
            .filter(|ids| !ids.is_empty())
            .ok_or_else(|| anyhow::anyhow!("get_contents action requires ids parameter"))?;

        let response = self
            .post_json(
                "contents",
                serde_json::json!({
                    "ids": ids,
                    "text": true
                }),
            )
            .await?;

        let results = self.collect_snippets(response);
        let insights = vec![format!("拉取了 {} 篇正文", results.len())];

        Ok(WebSearchResult {
            total_count: results.len(),
            results,
            insights,
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("web search tool error")]
pub struct WebSearchToolError;

impl Tool for AgentToolWebSearch {
    const NAME: &'static str = "web_search";

    type Error = WebSearchToolError;
    type Args = WebSearchArgs;
    type Output = WebSearchResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description:
                "搜索互联网上的公司、产品和市场信息，返回带来源链接的文本摘录。用于调研某个商业创意是否已被实现、竞品情况以及市场趋势。"
                    .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["search", "find_similar", "get_contents"],
                        "description": "要执行的操作类型：search(关键词搜索), find_similar(查找相似页面), get_contents(拉取正文内容)"
                    },
                    "query": {
                        "type": "string",
                        "description": "搜索关键词（用于search操作）"
                    },
                    "url": {
                        "type": "string",
                        "description": "参照页面URL（用于find_similar操作）"
                    },
                    "ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "要拉取正文的结果ID列表（用于get_contents操作）"
                    },
                    "num_results": {
                        "type": "integer",
                        "description": "返回的结果数量（默认取配置值）"
                    }
                },
                "required": ["action"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...web_search@{:?}", args);

        match args.action.as_str() {
            "search" => self.search(&args).await.map_err(|_e| WebSearchToolError),
            "find_similar" => self
                .find_similar(&args)
                .await
                .map_err(|_e| WebSearchToolError),
            "get_contents" => self
                .get_contents(&args)
                .await
                .map_err(|_e| WebSearchToolError),
            _ => Err(WebSearchToolError),
        }
    }
}
