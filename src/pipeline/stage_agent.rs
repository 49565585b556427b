use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::pipeline::agent_executor::AgentExecuteParams;
use crate::pipeline::context::{MemoryScope, PipelineContext};

/// 执行器画像 - 角色、目标与背景故事，共同构成Agent的系统提示词
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    /// 是否为该Agent挂载搜索工具
    pub use_search_tools: bool,
}

/// 工作单元 - 由固定叙事模板做字面替换生成的指令与期望输出
#[derive(Debug, Clone)]
pub struct StageTask {
    pub description: String,
    pub expected_output: String,
}

/// 前序阶段的输出，作为后续阶段的上下文
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub stage: String,
    pub content: String,
}

/// 极简阶段Agent trait。每个Agent声明自己的画像、任务模板与上下文来源，
/// 默认实现负责校验上下文、构建prompt、调用执行器并存储结果。
/// 每个工作单元在一次流水线执行中恰好运行一次
#[async_trait]
pub trait StageAgent: Send + Sync {
    /// Agent类型标识，同时作为阶段结果的Memory键
    fn agent_type(&self) -> String;

    /// 执行器画像
    fn profile(&self) -> AgentProfile;

    /// 以创意文本填充任务模板。空创意允许通过，原样代入模板
    fn task(&self, idea: &str) -> StageTask;

    /// 所需的前序阶段结果键。缺少时执行失败
    fn context_sources(&self) -> Vec<&'static str> {
        vec![]
    }

    /// 构建系统提示词
    fn build_system_prompt(&self) -> String {
        let profile = self.profile();
        format!(
            "You are {role}.\n\nYour goal: {goal}\n\nBackstory:\n{backstory}",
            role = profile.role,
            goal = profile.goal,
            backstory = profile.backstory,
        )
    }

    /// 构建用户提示词：任务指令 + 前序上下文 + 期望输出
    fn build_user_prompt(&self, idea: &str, context: &[StageOutput]) -> String {
        let task = self.task(idea);
        let mut prompt = task.description;

        if !context.is_empty() {
            prompt.push_str("\n\n## Context from previous stages\n");
            for output in context {
                prompt.push_str(&format!("### {}\n{}\n", output.stage, output.content));
            }
        }

        prompt.push_str(&format!("\n## Expected output\n{}", task.expected_output));
        prompt
    }

    /// 默认实现的execute方法 - 校验上下文、构建prompt、调用执行器、存储结果
    async fn execute(&self, context: &PipelineContext, idea: &str) -> Result<String> {
        // 1. 收集前序阶段结果（必需，缺失即失败）
        let mut stage_context = Vec::new();
        for key in self.context_sources() {
            match context
                .get_from_memory::<String>(MemoryScope::STAGES, key)
                .await
            {
                Some(content) => stage_context.push(StageOutput {
                    stage: key.to_string(),
                    content,
                }),
                None => {
                    return Err(anyhow!(
                        "必需的上下文 {}:{} 不可用",
                        MemoryScope::STAGES,
                        key
                    ));
                }
            }
        }

        // 2. 构建prompt
        let system_prompt = self.build_system_prompt();
        let user_prompt = self.build_user_prompt(idea, &stage_context);

        let params = AgentExecuteParams {
            prompt_sys: system_prompt,
            prompt_user: user_prompt,
            cache_scope: format!("{}/{}", MemoryScope::STAGES, self.agent_type()),
            log_tag: self.agent_type(),
        };

        // 3. 根据画像选择调用方式
        let result = if self.profile().use_search_tools {
            context.executor.prompt_with_tools(params).await?
        } else {
            context.executor.prompt(params).await?
        };

        // 4. 存储结果，供后续阶段作为上下文取用
        context
            .store_to_memory(MemoryScope::STAGES, &self.agent_type(), &result)
            .await?;

        println!("✅ Stage Agent [{}] 执行完成", self.agent_type());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::agents::idea_researcher::IdeaResearcher;
    use crate::pipeline::agents::next_steps_planner::NextStepsPlanner;
    use crate::pipeline::agents::verdict_decider::VerdictDecider;
    use crate::pipeline::context::StageKeys;

    #[test]
    fn test_research_prompt_contains_idea_verbatim() {
        // 模板替换保真性：任意创意字符串必须原样出现在指令中
        let ideas = [
            "AI Advice Service",
            "带空格 与中文的创意",
            "idea with {braces} and \"quotes\"",
        ];
        for idea in ideas {
            let prompt = IdeaResearcher.build_user_prompt(idea, &[]);
            assert!(prompt.contains(idea), "prompt should contain: {}", idea);
        }
    }

    #[test]
    fn test_empty_idea_is_permitted() {
        // 空创意不校验、不崩溃，原样代入
        let prompt = IdeaResearcher.build_user_prompt("", &[]);
        assert!(prompt.contains("Idea: "));

        let prompt = NextStepsPlanner.build_user_prompt("", &[]);
        assert!(prompt.contains("Idea: "));
    }

    #[test]
    fn test_context_is_rendered_into_prompt() {
        let context = vec![StageOutput {
            stage: StageKeys::IDEA_RESEARCH.to_string(),
            content: "Top 5 companies already do this.".to_string(),
        }];
        let prompt = VerdictDecider.build_user_prompt("any idea", &context);

        assert!(prompt.contains("Context from previous stages"));
        assert!(prompt.contains("Top 5 companies already do this."));
        assert!(prompt.contains(StageKeys::IDEA_RESEARCH));
    }

    #[test]
    fn test_system_prompt_carries_profile() {
        let prompt = IdeaResearcher.build_system_prompt();
        assert!(prompt.contains("Expert Business Analyst"));
        assert!(prompt.contains("market research"));
    }

    #[test]
    fn test_tool_usage_per_agent() {
        assert!(IdeaResearcher.profile().use_search_tools);
        assert!(!VerdictDecider.profile().use_search_tools);
        assert!(NextStepsPlanner.profile().use_search_tools);
    }

    #[test]
    fn test_context_sources() {
        assert!(IdeaResearcher.context_sources().is_empty());
        assert_eq!(
            VerdictDecider.context_sources(),
            vec![StageKeys::IDEA_RESEARCH]
        );
        assert_eq!(
            NextStepsPlanner.context_sources(),
            vec![StageKeys::IDEA_RESEARCH]
        );
    }
}
