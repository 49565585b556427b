//! 用户输入 - 两次阻塞式控制台读取（初始创意 / 条件触发的改进）

use anyhow::{Context, Result};
use std::io::Write;

/// 用户输入接口。测试中以脚本化实现替代控制台
pub trait UserInput: Send {
    /// 读取初始创意
    fn read_idea(&mut self) -> Result<String>;

    /// 决策为"done"时读取创意的改进/变化
    fn read_improvement(&mut self) -> Result<String>;
}

/// 控制台输入
pub struct ConsoleInput;

impl ConsoleInput {
    fn read_line(&self, prompt: &str) -> Result<String> {
        println!("{}", prompt);
        std::io::stdout().flush().ok();

        let mut buffer = String::new();
        std::io::stdin()
            .read_line(&mut buffer)
            .context("读取控制台输入失败")?;

        // 只剥离行尾换行符，保留用户输入中的前导/尾随空格
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        Ok(buffer)
    }
}

impl UserInput for ConsoleInput {
    fn read_idea(&mut self) -> Result<String> {
        self.read_line("Enter in your idea")
    }

    fn read_improvement(&mut self) -> Result<String> {
        self.read_line(
            "Since another organization has already implemented the idea, please enter a change/improvement to the idea:",
        )
    }
}
