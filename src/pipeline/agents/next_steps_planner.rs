use crate::pipeline::context::StageKeys;
use crate::pipeline::stage_agent::{AgentProfile, StageAgent, StageTask};

/// 行动规划员 - 为（可能已改进的）创意产出落地计划：找谁、怎么做、钱从哪来
#[derive(Default)]
pub struct NextStepsPlanner;

impl StageAgent for NextStepsPlanner {
    fn agent_type(&self) -> String {
        StageKeys::NEXT_STEPS.to_string()
    }

    fn profile(&self) -> AgentProfile {
        AgentProfile {
            role: "Market Research Expert",
            goal: "Provide the next steps that the user should take to implement the idea",
            backstory: "You are a market research expert with a knack for identifying opportunities. \
                Your expertise lies in analyzing market trends, identifying potential customers, \
                and developing strategies to reach them. You are skilled in market research, \
                competitor analysis, and strategic planning. You are passionate about helping \
                businesses succeed and grow.",
            use_search_tools: true,
        }
    }

    fn task(&self, idea: &str) -> StageTask {
        StageTask {
            description: format!(
                "Using the idea provided by the user, come up with the next steps that they \
                should take to implement the idea. This could be a list of tasks or a full \
                plan of action.\n\n\
                Idea: {}",
                idea
            ),
            expected_output: "A set of next steps that the user should take to implement the idea. This \
                should include: who to talk to, how to make the product and how to get funding."
                .to_string(),
        }
    }

    fn context_sources(&self) -> Vec<&'static str> {
        vec![StageKeys::IDEA_RESEARCH]
    }
}
