//! ReAct模式的配置与响应类型

/// ReAct执行配置
#[derive(Debug, Clone)]
pub struct ReActConfig {
    /// 最大迭代次数（每次工具调用占一轮）
    pub max_iterations: usize,
    /// 是否输出详细日志
    pub verbose: bool,
    /// 达到最大迭代次数时是否返回部分结果而非报错
    pub return_partial_on_max_depth: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            verbose: false,
            return_partial_on_max_depth: true,
        }
    }
}

/// ReAct执行响应
#[derive(Debug, Clone)]
pub struct ReActResponse {
    /// 最终（或部分）的文本结果
    pub content: String,
    /// 实际使用的迭代次数
    pub iterations_used: usize,
    /// 是否因达到最大迭代次数而中断
    pub stopped_by_max_depth: bool,
    /// 对话中发出的工具调用次数（仅在中断收尾时统计）
    pub tool_call_count: usize,
}

impl ReActResponse {
    pub fn success(content: String, iterations_used: usize) -> Self {
        Self {
            content,
            iterations_used,
            stopped_by_max_depth: false,
            tool_call_count: 0,
        }
    }

    pub fn max_depth_reached(
        content: String,
        iterations_used: usize,
        tool_call_count: usize,
    ) -> Self {
        Self {
            content,
            iterations_used,
            stopped_by_max_depth: true,
            tool_call_count,
        }
    }
}
