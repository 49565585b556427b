//! ReAct循环驱动 - 驱动Agent的多轮工具调用对话，并在迭代耗尽时收敛为部分结果

use anyhow::Result;
use rig::completion::{AssistantContent, Message, PromptError};

use super::providers::ProviderAgent;
use super::react::{ReActConfig, ReActResponse};

/// 驱动一次ReAct对话。工具调用由rig在多轮对话内部完成，
/// 这里只负责设定迭代上限与中断后的收尾
pub async fn run(
    agent: &ProviderAgent,
    user_prompt: &str,
    config: &ReActConfig,
) -> Result<ReActResponse> {
    if config.verbose {
        println!(
            "   ♻️ ReAct模式已启用，迭代上限: {}",
            config.max_iterations
        );
    }

    match agent.multi_turn(user_prompt, config.max_iterations).await {
        Ok(content) => {
            if config.verbose {
                println!("   ✅ ReAct对话完成");
            }
            Ok(ReActResponse::success(content, config.max_iterations))
        }
        Err(PromptError::MaxDepthError {
            max_depth,
            chat_history,
            ..
        }) => {
            if config.verbose {
                println!("   ⚠️ 迭代次数耗尽 ({}), 中断对话", max_depth);
            }
            if !config.return_partial_on_max_depth {
                anyhow::bail!("ReAct对话在 {} 次迭代内未能收敛", max_depth);
            }

            let (partial, tool_call_count) = salvage_partial(&chat_history);
            Ok(ReActResponse::max_depth_reached(
                format!(
                    "{}\n\n[注意: 对话因迭代次数耗尽({})而被截断]",
                    partial, max_depth
                ),
                max_depth,
                tool_call_count,
            ))
        }
        Err(e) => {
            if config.verbose {
                println!("   ❌ ReAct对话出错: {:?}", e);
            }
            Err(anyhow::anyhow!("ReAct对话执行失败: {}", e))
        }
    }
}

/// 中断后从聊天历史里抢救结果：取最后一条助手文本，并统计工具调用次数
fn salvage_partial(history: &[Message]) -> (String, usize) {
    let mut tool_call_count = 0;
    let mut last_text: Option<String> = None;

    for msg in history {
        let Message::Assistant { content, .. } = msg else {
            continue;
        };
        let mut texts = Vec::new();
        for item in content.iter() {
            match item {
                AssistantContent::Text(text) => texts.push(text.text.as_str()),
                AssistantContent::ToolCall(_) => tool_call_count += 1,
                _ => {}
            }
        }
        if !texts.is_empty() {
            last_text = Some(texts.join("\n"));
        }
    }

    (
        last_text.unwrap_or_else(|| "对话被中断，未获得任何助手文本响应。".to_string()),
        tool_call_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig::OneOrMany;

    fn web_search_call() -> Message {
        Message::Assistant {
            id: None,
            content: OneOrMany::one(AssistantContent::tool_call(
                "call-1",
                "web_search",
                serde_json::json!({"action": "search", "query": "ai pet care"}),
            )),
        }
    }

    #[test]
    fn salvage_keeps_last_assistant_text() {
        let history = vec![
            Message::user("research this idea"),
            Message::assistant("early draft"),
            web_search_call(),
            Message::assistant("final partial report"),
        ];

        let (text, calls) = salvage_partial(&history);
        assert_eq!(text, "final partial report");
        assert_eq!(calls, 1);
    }

    #[test]
    fn salvage_counts_every_tool_call() {
        let history = vec![
            web_search_call(),
            web_search_call(),
            Message::assistant("partial"),
            web_search_call(),
        ];

        let (_, calls) = salvage_partial(&history);
        assert_eq!(calls, 3);
    }

    #[test]
    fn salvage_without_assistant_text_reports_interruption() {
        let history = vec![Message::user("hi"), web_search_call()];

        let (text, calls) = salvage_partial(&history);
        assert!(text.contains("中断"));
        assert_eq!(calls, 1);
    }
}
