use anyhow::Result;

use crate::pipeline::agents::idea_researcher::IdeaResearcher;
use crate::pipeline::agents::next_steps_planner::NextStepsPlanner;
use crate::pipeline::agents::verdict_decider::VerdictDecider;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::input::UserInput;
use crate::pipeline::stage_agent::StageAgent;
use crate::pipeline::verdict::Verdict;

/// 一次完整流水线执行的结果
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// 最终（可能已追加改进的）创意
    pub idea: String,
    /// 调研阶段报告
    pub research_report: String,
    /// 决策阶段的模型原文
    pub verdict_raw: String,
    /// 解析后的判定
    pub verdict: Verdict,
    /// 行动计划
    pub action_plan: String,
}

/// 创意校验流水线编排器。三个阶段严格顺序执行：
/// 调研 → 决策 →（条件追问）→ 规划
#[derive(Default)]
pub struct IdeaPipeline;

impl IdeaPipeline {
    /// 执行流水线。状态流转：Init → Researched → Decided → (Refined) → Planned → Done
    pub async fn run(
        &self,
        context: &PipelineContext,
        input: &mut dyn UserInput,
    ) -> Result<PipelineReport> {
        let mut idea = match &context.config.idea {
            Some(idea) => idea.clone(),
            None => input.read_idea()?,
        };

        println!("🚀 开始执行创意校验流程...");

        // 第一阶段：创意调研
        println!("🤖 执行 IdeaResearcher 调研分析...");
        let research_report = IdeaResearcher.execute(context, &idea).await?;
        println!("\n📋 调研报告:\n{}\n", research_report);

        // 第二阶段：判定（上下文 = [调研报告]）
        println!("🤖 执行 VerdictDecider 判定分析...");
        let verdict_raw = VerdictDecider.execute(context, &idea).await?;
        let verdict = Verdict::parse(&verdict_raw);

        if let Verdict::Unrecognized(raw) = &verdict {
            eprintln!(
                "⚠️ 判定阶段输出不在约定词表内: {:?}，按 'not done' 继续执行",
                raw
            );
        }

        if verdict.requires_improvement() {
            // 已被实现：向用户追问改进点，追加到创意之后
            let improvement = input.read_improvement()?;
            idea.push_str(&improvement);
        }

        // 第三阶段：行动规划（无论分支走向，上下文始终含调研报告）
        println!("🤖 执行 NextStepsPlanner 规划分析...");
        let action_plan = NextStepsPlanner.execute(context, &idea).await?;
        println!("\n📋 行动计划:\n{}\n", action_plan);

        println!("✓ 创意校验流程执行完毕");

        Ok(PipelineReport {
            idea,
            research_report,
            verdict_raw,
            verdict,
            action_plan,
        })
    }
}
