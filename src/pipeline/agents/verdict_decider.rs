use crate::pipeline::context::StageKeys;
use crate::pipeline::stage_agent::{AgentProfile, StageAgent, StageTask};

/// 决策员 - 基于调研报告判定创意是否已被实现。
/// 约定词表输出：'done' 或 'not done'。不挂载搜索工具
#[derive(Default)]
pub struct VerdictDecider;

impl StageAgent for VerdictDecider {
    fn agent_type(&self) -> String {
        StageKeys::VERDICT_DECISION.to_string()
    }

    fn profile(&self) -> AgentProfile {
        AgentProfile {
            role: "Next Step Decider",
            goal: "Decide if there is another company that has the same idea as the user",
            backstory: "You are a decision maker with a keen eye for detail. Your expertise lies in \
                analyzing information and making informed decisions. You are skilled in \
                identifying patterns, trends, and opportunities.",
            use_search_tools: false,
        }
    }

    fn task(&self, _idea: &str) -> StageTask {
        StageTask {
            description: "Based on the output of the previous agent, you will decide on whether \
                the idea has been done or not. You can generally tell if the idea has \
                been done before if the agent provides the names of companies that are \
                already using the idea."
                .to_string(),
            expected_output: "If the idea has been done before, then you will \
                respond with 'done'. If the idea has not been done before, then you will \
                respond with 'not done'. Respond with the single verdict word only, \
                in lowercase, with no punctuation or extra text."
                .to_string(),
        }
    }

    fn context_sources(&self) -> Vec<&'static str> {
        vec![StageKeys::IDEA_RESEARCH]
    }
}
