use anyhow::Result;

use crate::cache::CacheManager;
use crate::config::Config;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::input::ConsoleInput;
use crate::pipeline::orchestrator::IdeaPipeline;

/// 启动创意校验工作流
pub async fn launch(config: &Config) -> Result<()> {
    // 凭证缺失等配置错误在第一阶段前中止
    config.validate()?;

    if config.force_regenerate {
        CacheManager::new(config.cache.clone()).clear().await?;
        println!("🧹 已清除缓存");
    }

    let context = PipelineContext::new(config.clone())?;

    // 启动时检查模型连接
    context.executor.check_connection().await?;

    let mut input = ConsoleInput;
    IdeaPipeline.run(&context, &mut input).await?;

    Ok(())
}

// Include tests
#[cfg(test)]
mod tests;
