// wyvern-compile: 生成代码的编译验证坞
//
// 把生成的源文件写进临时目录，调用 rustc 编译为可执行程序并运行，
// 供测试对"生成 -> 编译 -> 执行 -> 断言"的往返闭环使用。每次编译
// 一个编译单元、一个临时目录，工件随值一起删除，不留任何产物。

mod diagnostics;

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub use diagnostics::{CompileError, CompileResult, Diagnostic};

use diagnostics::parse_diagnostics;

/// 运行期通过环境变量暴露给被测程序的资源目录
pub const RESOURCE_DIR_ENV: &str = "WYVERN_RESOURCE_DIR";

/// 一次性的编译任务
///
/// 第一个加入的源文件是编译单元的根。依赖 crate 以 `--extern` 显式
/// 接线，搜索路径从当前测试可执行文件旁的 `deps` 目录推断。
#[derive(Debug, Default)]
pub struct TestCompiler {
    sources: Vec<(String, String)>,
    resources: Vec<(String, String)>,
    externs: Vec<(String, PathBuf)>,
}

impl TestCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.sources.push((name.into(), content.into()));
        self
    }

    pub fn with_resource(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.resources.push((name.into(), content.into()));
        self
    }

    /// 接线一个已编译的依赖 crate
    pub fn with_extern(mut self, crate_name: impl Into<String>, rlib: impl Into<PathBuf>) -> Self {
        self.externs.push((crate_name.into(), rlib.into()));
        self
    }

    /// 编译为可执行程序
    ///
    /// 所有 `error` 级诊断聚合为一个 `CompileError::Compilation`；
    /// 编译失败不产出部分工件。
    pub fn compile(self) -> CompileResult<CompiledProgram> {
        let root = self
            .sources
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| anyhow::anyhow!("TestCompiler needs at least one source file"))?;

        let scratch = TempDir::new()?;
        for (name, content) in &self.sources {
            let path = scratch.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        let resource_dir = scratch.path().join("resources");
        std::fs::create_dir_all(&resource_dir)?;
        for (name, content) in &self.resources {
            let path = resource_dir.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }

        let binary = scratch.path().join("main");
        let mut command = Command::new("rustc");
        command
            .arg(scratch.path().join(&root))
            .arg("--edition")
            .arg("2021")
            .arg("--crate-type")
            .arg("bin")
            .arg("--crate-name")
            .arg("main")
            .arg("--error-format")
            .arg("json")
            .arg("-o")
            .arg(&binary);
        match dependency_search_path() {
            Some(deps) => {
                command.arg("-L").arg(format!("dependency={}", deps.display()));
            }
            None => {
                tracing::warn!(
                    "Could not locate the dependency search path; relying on explicit --extern paths only"
                );
            }
        }
        for (crate_name, rlib) in &self.externs {
            command
                .arg("--extern")
                .arg(format!("{}={}", crate_name, rlib.display()));
        }

        tracing::debug!("Compiling {} generated source file(s)", self.sources.len());
        let output = command.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut diagnostics = parse_diagnostics(&stderr);
            if diagnostics.is_empty() {
                diagnostics.push(Diagnostic {
                    message: stderr.trim().to_string(),
                    level: "error".to_string(),
                    file_name: None,
                    line: None,
                    column: None,
                });
            }
            return Err(CompileError::Compilation { diagnostics });
        }

        Ok(CompiledProgram {
            _scratch: scratch,
            binary,
            resource_dir,
        })
    }
}

/// 编译成功的程序；临时目录随值一起删除
#[derive(Debug)]
pub struct CompiledProgram {
    _scratch: TempDir,
    binary: PathBuf,
    resource_dir: PathBuf,
}

/// 被测程序的捕获输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CompiledProgram {
    /// 运行程序并捕获输出，非零退出视为失败
    pub fn run(&self) -> CompileResult<ProgramOutput> {
        let output = Command::new(&self.binary)
            .env(RESOURCE_DIR_ENV, &self.resource_dir)
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(CompileError::ExecutionFailed {
                status: output.status.code().unwrap_or(-1),
                stdout,
                stderr,
            });
        }
        Ok(ProgramOutput { stdout, stderr })
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }
}

/// 当前测试可执行文件旁的 `deps` 目录
///
/// cargo 把测试二进制和它的依赖 rlib 放在同一个 `target/…/deps`
/// 下，从 `current_exe` 反推即可，不需要理解 cargo 的布局细节。
pub fn dependency_search_path() -> Option<PathBuf> {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(error) => {
            tracing::warn!("current_exe() failed: {}", error);
            return None;
        }
    };
    let dir = exe.parent()?;
    if dir.file_name().is_some_and(|name| name == "deps") {
        return Some(dir.to_path_buf());
    }
    let deps = dir.join("deps");
    deps.is_dir().then_some(deps)
}

/// 在依赖目录里定位某个 crate 的 rlib，同名多版本取最新修改的那个
pub fn locate_rlib(crate_name: &str) -> Option<PathBuf> {
    let deps = dependency_search_path()?;
    let prefix = format!("lib{}-", crate_name);
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(&deps)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "rlib")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect();
    candidates.sort_by_key(|path| {
        std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
    });
    candidates.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_program_compiles_and_runs() {
        let program = TestCompiler::new()
            .with_source("main.rs", "fn main() { println!(\"hello\"); }")
            .compile()
            .unwrap();
        let output = program.run().unwrap();
        assert_eq!(output.stdout, "hello\n");
    }

    #[test]
    fn test_compilation_errors_are_aggregated() {
        let error = TestCompiler::new()
            .with_source("main.rs", "fn main() { missing(); another_missing(); }")
            .compile()
            .unwrap_err();
        match error {
            CompileError::Compilation { diagnostics } => {
                assert!(diagnostics.len() >= 2, "got: {:?}", diagnostics);
                assert!(diagnostics
                    .iter()
                    .any(|diagnostic| diagnostic.message.contains("missing")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_resources_are_exposed_through_the_environment() {
        let program = TestCompiler::new()
            .with_source(
                "main.rs",
                r#"
fn main() {
    let dir = std::env::var("WYVERN_RESOURCE_DIR").unwrap();
    let text = std::fs::read_to_string(std::path::Path::new(&dir).join("greeting.txt")).unwrap();
    print!("{}", text);
}
"#,
            )
            .with_resource("greeting.txt", "hi from resources")
            .compile()
            .unwrap();
        let output = program.run().unwrap();
        assert_eq!(output.stdout, "hi from resources");
    }

    #[test]
    fn test_failing_program_reports_captured_output() {
        let program = TestCompiler::new()
            .with_source(
                "main.rs",
                "fn main() { eprintln!(\"boom\"); std::process::exit(3); }",
            )
            .compile()
            .unwrap();
        match program.run().unwrap_err() {
            CompileError::ExecutionFailed { status, stderr, .. } => {
                assert_eq!(status, 3);
                assert_eq!(stderr, "boom\n");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_source_is_rejected() {
        assert!(TestCompiler::new().compile().is_err());
    }
}
