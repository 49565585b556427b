//! 决策阶段输出的判定类型

/// 决策阶段的判定结果。用枚举替代对模型原文的裸字符串分支，
/// 无法识别的输出被显式归类而不是悄悄落入"not done"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 创意已被其他组织实现（模型回答恰好为"done"）
    AlreadyImplemented,
    /// 创意尚未被实现（模型回答恰好为"not done"）
    NotImplemented,
    /// 模型输出不在约定词表内，携带原文以便记录
    Unrecognized(String),
}

impl Verdict {
    /// 解析决策Agent的原始输出。
    /// 按约定词表做精确匹配（区分大小写，不截断空白）：
    /// 任何非精确"done"的输出都不会触发创意改进的再询问
    pub fn parse(raw: &str) -> Self {
        match raw {
            "done" => Verdict::AlreadyImplemented,
            "not done" => Verdict::NotImplemented,
            other => Verdict::Unrecognized(other.to_string()),
        }
    }

    /// 是否需要向用户再询问创意改进
    pub fn requires_improvement(&self) -> bool {
        matches!(self, Verdict::AlreadyImplemented)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::AlreadyImplemented => write!(f, "done"),
            Verdict::NotImplemented => write!(f, "not done"),
            Verdict::Unrecognized(raw) => write!(f, "unrecognized({})", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_done() {
        assert_eq!(Verdict::parse("done"), Verdict::AlreadyImplemented);
        assert!(Verdict::parse("done").requires_improvement());
    }

    #[test]
    fn test_exact_not_done() {
        assert_eq!(Verdict::parse("not done"), Verdict::NotImplemented);
        assert!(!Verdict::parse("not done").requires_improvement());
    }

    #[test]
    fn test_capitalized_done_is_not_a_match() {
        // 记录既有的脆弱行为："Done"不触发再询问
        let verdict = Verdict::parse("Done");
        assert_eq!(verdict, Verdict::Unrecognized("Done".to_string()));
        assert!(!verdict.requires_improvement());
    }

    #[test]
    fn test_whitespace_variants_are_not_matches() {
        assert!(!Verdict::parse(" done").requires_improvement());
        assert!(!Verdict::parse("done ").requires_improvement());
        assert!(!Verdict::parse("done\n").requires_improvement());
    }

    #[test]
    fn test_substring_done_is_not_a_match() {
        // 包含"done"子串的自由文本不算精确匹配
        let verdict = Verdict::parse("I believe this idea is not done yet");
        assert!(matches!(verdict, Verdict::Unrecognized(_)));
        assert!(!verdict.requires_improvement());
    }

    #[test]
    fn test_empty_output_is_unrecognized() {
        assert!(matches!(Verdict::parse(""), Verdict::Unrecognized(_)));
    }
}
