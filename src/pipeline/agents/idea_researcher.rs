use crate::pipeline::context::StageKeys;
use crate::pipeline::stage_agent::{AgentProfile, StageAgent, StageTask};

/// 创意调研员 - 借助实时搜索判断创意是否已被其他公司或个人实现
#[derive(Default)]
pub struct IdeaResearcher;

impl StageAgent for IdeaResearcher {
    fn agent_type(&self) -> String {
        StageKeys::IDEA_RESEARCH.to_string()
    }

    fn profile(&self) -> AgentProfile {
        AgentProfile {
            role: "Expert Business Analyst",
            goal: "Find out if any other business or individual has already implemented the given idea",
            backstory: "You are an expert business analyst with a passion for researching new ideas. \
                Your expertise lies in finding out if any other business or individual has already \
                implemented a given idea. You are skilled in market research, competitor analysis, \
                and identifying market trends.",
            use_search_tools: true,
        }
    }

    fn task(&self, idea: &str) -> StageTask {
        StageTask {
            description: format!(
                "Your task is to find out if any other business or individual \
                has already implemented the given idea. Be slightly more general \
                with the idea to get better results as the EXACT idea may not have \
                been done but something similar may constitute the same idea. (Example: \
                \"AI Advice Service\" pretty much the same as AI consulting and strategy \
                development)\n\n\
                Idea: {}",
                idea
            ),
            expected_output: "If the exact idea has been done before, provide the name/s \
                of the companies or individuals that have implemented it. (If there \
                are more than 5 companies, provide the top 5 companies using the idea) \
                If the idea has not been done before then provide a summary of the \
                market fit and viability of the idea."
                .to_string(),
        }
    }
}
