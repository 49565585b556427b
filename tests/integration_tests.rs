use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use ideacheck_rs::config::Config;
use ideacheck_rs::pipeline::agent_executor::{AgentExecuteParams, AgentExecutor};
use ideacheck_rs::pipeline::context::{PipelineContext, StageKeys};
use ideacheck_rs::pipeline::input::UserInput;
use ideacheck_rs::pipeline::orchestrator::IdeaPipeline;
use ideacheck_rs::pipeline::verdict::Verdict;

/// 脚本化执行器：按阶段返回预置应答，并记录收到的全部参数
struct ScriptedExecutor {
    verdict_reply: String,
    calls: Mutex<Vec<AgentExecuteParams>>,
}

impl ScriptedExecutor {
    fn new(verdict_reply: &str) -> Self {
        Self {
            verdict_reply: verdict_reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn reply_for(&self, params: &AgentExecuteParams) -> String {
        match params.log_tag.as_str() {
            tag if tag == StageKeys::IDEA_RESEARCH => {
                "Research report: several companies were found.".to_string()
            }
            tag if tag == StageKeys::VERDICT_DECISION => self.verdict_reply.clone(),
            tag if tag == StageKeys::NEXT_STEPS => {
                "1. Talk to investors. 2. Build an MVP. 3. Apply for funding.".to_string()
            }
            other => panic!("unexpected stage: {}", other),
        }
    }

    fn recorded_calls(&self) -> Vec<AgentExecuteParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentExecutor for ScriptedExecutor {
    async fn prompt(&self, params: AgentExecuteParams) -> Result<String> {
        let reply = self.reply_for(&params);
        self.calls.lock().unwrap().push(params);
        Ok(reply)
    }

    async fn prompt_with_tools(&self, params: AgentExecuteParams) -> Result<String> {
        let reply = self.reply_for(&params);
        self.calls.lock().unwrap().push(params);
        Ok(reply)
    }
}

/// 脚本化输入
struct ScriptedInput {
    idea: Option<String>,
    improvement: Option<String>,
    improvement_requested: bool,
}

impl ScriptedInput {
    fn new(idea: Option<&str>, improvement: Option<&str>) -> Self {
        Self {
            idea: idea.map(str::to_string),
            improvement: improvement.map(str::to_string),
            improvement_requested: false,
        }
    }
}

impl UserInput for ScriptedInput {
    fn read_idea(&mut self) -> Result<String> {
        self.idea
            .take()
            .ok_or_else(|| anyhow::anyhow!("no scripted idea"))
    }

    fn read_improvement(&mut self) -> Result<String> {
        self.improvement_requested = true;
        self.improvement
            .take()
            .ok_or_else(|| anyhow::anyhow!("no scripted improvement"))
    }
}

fn test_context(executor: Arc<ScriptedExecutor>) -> PipelineContext {
    let mut config = Config::default();
    config.llm.api_key = "test-key".to_string();
    config.cache.enabled = false;
    PipelineContext::with_executor(config, executor)
}

fn params_for<'a>(calls: &'a [AgentExecuteParams], stage: &str) -> &'a AgentExecuteParams {
    calls
        .iter()
        .find(|p| p.log_tag == stage)
        .unwrap_or_else(|| panic!("stage {} was not executed", stage))
}

/// 场景A：判定为"not done"，不追问，创意原样进入规划阶段
#[tokio::test]
async fn test_scenario_not_done() {
    let executor = Arc::new(ScriptedExecutor::new("not done"));
    let context = test_context(executor.clone());
    let mut input = ScriptedInput::new(Some("AI Advice Service"), None);

    let report = IdeaPipeline.run(&context, &mut input).await.unwrap();

    assert!(!input.improvement_requested);
    assert_eq!(report.idea, "AI Advice Service");
    assert_eq!(report.verdict, Verdict::NotImplemented);

    let calls = executor.recorded_calls();
    assert_eq!(calls.len(), 3, "每个工作单元恰好执行一次");
    let planner = params_for(&calls, StageKeys::NEXT_STEPS);
    assert!(planner.prompt_user.contains("AI Advice Service"));
}

/// 场景B：判定为"done"，追问改进并追加到创意尾部
#[tokio::test]
async fn test_scenario_done_appends_improvement() {
    let executor = Arc::new(ScriptedExecutor::new("done"));
    let context = test_context(executor.clone());
    let mut input = ScriptedInput::new(
        Some("AI Advice Service"),
        Some(" with focus on legal advice"),
    );

    let report = IdeaPipeline.run(&context, &mut input).await.unwrap();

    assert!(input.improvement_requested);
    assert_eq!(report.idea, "AI Advice Service with focus on legal advice");
    assert_eq!(report.verdict, Verdict::AlreadyImplemented);

    // 规划阶段收到的是拼接后的创意（原创意在前，改进在后）
    let calls = executor.recorded_calls();
    let planner = params_for(&calls, StageKeys::NEXT_STEPS);
    assert!(
        planner
            .prompt_user
            .contains("AI Advice Service with focus on legal advice")
    );
    // 调研阶段收到的仍是原始创意
    let researcher = params_for(&calls, StageKeys::IDEA_RESEARCH);
    assert!(researcher.prompt_user.contains("Idea: AI Advice Service"));
    assert!(!researcher.prompt_user.contains("legal advice"));
}

/// 场景C：判定为"Done"（首字母大写），按精确匹配策略不触发追问
#[tokio::test]
async fn test_scenario_capitalized_done_does_not_reprompt() {
    let executor = Arc::new(ScriptedExecutor::new("Done"));
    let context = test_context(executor.clone());
    let mut input = ScriptedInput::new(Some("AI Advice Service"), None);

    let report = IdeaPipeline.run(&context, &mut input).await.unwrap();

    assert!(!input.improvement_requested);
    assert_eq!(report.idea, "AI Advice Service");
    assert!(matches!(report.verdict, Verdict::Unrecognized(_)));
}

/// 规划阶段无论分支走向都必须收到调研报告作为上下文
#[tokio::test]
async fn test_planner_always_receives_research_context() {
    for verdict_reply in ["done", "not done", "something unexpected"] {
        let executor = Arc::new(ScriptedExecutor::new(verdict_reply));
        let context = test_context(executor.clone());
        let mut input = ScriptedInput::new(Some("idea"), Some("x"));

        IdeaPipeline.run(&context, &mut input).await.unwrap();

        let calls = executor.recorded_calls();
        let planner = params_for(&calls, StageKeys::NEXT_STEPS);
        assert!(
            planner
                .prompt_user
                .contains("Research report: several companies were found."),
            "verdict={:?} 时规划阶段缺少调研上下文",
            verdict_reply
        );

        let decider = params_for(&calls, StageKeys::VERDICT_DECISION);
        assert!(
            decider
                .prompt_user
                .contains("Research report: several companies were found.")
        );
    }
}

/// 空创意被接受并原样传递
#[tokio::test]
async fn test_empty_idea_passes_through() {
    let executor = Arc::new(ScriptedExecutor::new("not done"));
    let context = test_context(executor.clone());
    let mut input = ScriptedInput::new(Some(""), None);

    let report = IdeaPipeline.run(&context, &mut input).await.unwrap();
    assert_eq!(report.idea, "");

    let calls = executor.recorded_calls();
    assert_eq!(calls.len(), 3);
}

/// 配置中预置创意时不再从输入源读取
#[tokio::test]
async fn test_preset_idea_skips_console_read() {
    let executor = Arc::new(ScriptedExecutor::new("not done"));
    let mut config = Config::default();
    config.llm.api_key = "test-key".to_string();
    config.cache.enabled = false;
    config.idea = Some("Space tourism booking platform".to_string());
    let context = PipelineContext::with_executor(config, executor.clone());

    // read_idea无脚本应答：若被调用将报错
    let mut input = ScriptedInput::new(None, None);
    let report = IdeaPipeline.run(&context, &mut input).await.unwrap();

    assert_eq!(report.idea, "Space tourism booking platform");
}

/// 阶段结果被存入Memory，供外部检视
#[tokio::test]
async fn test_stage_results_are_stored_in_memory() {
    let executor = Arc::new(ScriptedExecutor::new("not done"));
    let context = test_context(executor.clone());
    let mut input = ScriptedInput::new(Some("idea"), None);

    IdeaPipeline.run(&context, &mut input).await.unwrap();

    assert!(context.has_memory_data("stages", StageKeys::IDEA_RESEARCH).await);
    assert!(
        context
            .has_memory_data("stages", StageKeys::VERDICT_DECISION)
            .await
    );
    assert!(context.has_memory_data("stages", StageKeys::NEXT_STEPS).await);
}
