//! rustc JSON 诊断的解析与聚合
//!
//! `rustc --error-format=json` 把每条诊断作为一行 JSON 写到 stderr。
//! 这里只反序列化我们关心的字段，全部诊断聚合进一个错误，不产出
//! 部分工件。

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// rustc 的单条 JSON 诊断（只取关心的字段）
#[derive(Debug, Deserialize)]
pub(crate) struct RustcDiagnostic {
    pub message: String,
    pub level: String,
    #[serde(default)]
    pub spans: Vec<RustcSpan>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RustcSpan {
    pub file_name: String,
    pub line_start: usize,
    pub column_start: usize,
    #[serde(default)]
    pub is_primary: bool,
}

/// 面向调用方的诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub level: String,
    pub file_name: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file_name, self.line, self.column) {
            (Some(file), Some(line), Some(column)) => {
                write!(f, "{}:{}:{}: {}: {}", file, line, column, self.level, self.message)
            }
            _ => write!(f, "{}: {}", self.level, self.message),
        }
    }
}

/// 从 stderr 的 JSON 行解析错误级诊断
///
/// 非 JSON 行（ICE 输出、链接器信息）跳过；`error` 之外的级别不计入
/// 失败。汇总行（"aborting due to N previous errors"）原样保留，调用
/// 方可读性更好。
pub(crate) fn parse_diagnostics(stderr: &str) -> Vec<Diagnostic> {
    stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<RustcDiagnostic>(line).ok())
        .filter(|diagnostic| diagnostic.level == "error")
        .map(|diagnostic| {
            let primary = diagnostic
                .spans
                .iter()
                .find(|span| span.is_primary)
                .or_else(|| diagnostic.spans.first());
            Diagnostic {
                message: diagnostic.message,
                level: diagnostic.level,
                file_name: primary.map(|span| span.file_name.clone()),
                line: primary.map(|span| span.line_start),
                column: primary.map(|span| span.column_start),
            }
        })
        .collect()
}

/// 编译坞的统一错误类型
#[derive(Debug, Error)]
pub enum CompileError {
    /// 编译失败，携带聚合后的全部诊断
    #[error("Compilation failed with {} diagnostic(s):\n{}", .diagnostics.len(), format_diagnostics(.diagnostics))]
    Compilation { diagnostics: Vec<Diagnostic> },

    /// 编译出的程序以非零状态退出
    #[error("Compiled program exited with status {status}:\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    ExecutionFailed {
        status: i32,
        stdout: String,
        stderr: String,
    },

    /// 临时目录、写源文件、起子进程等 IO 失败
    #[error("I/O failure in compilation harness: {0}")]
    Io(#[from] std::io::Error),

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| format!("  {}", diagnostic))
        .collect::<Vec<_>>()
        .join("\n")
}
