//! 生成代码的语句累积
//!
//! 发射器产出表达式字符串，注册生成器把语句逐行累积到 `CodeBlock`，
//! 最后一次性渲染。输出必须逐字节稳定，所以这里只做固定 4 空格缩进，
//! 不做任何重排版。

/// 缩进单位
pub const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq)]
enum CodeItem {
    Line(String),
    Block(CodeBlock),
}

/// 有序语句块，嵌套块渲染时加一级缩进
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    items: Vec<CodeItem>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行（可以包含已经拼好的多行表达式）
    pub fn line(&mut self, line: impl Into<String>) {
        self.items.push(CodeItem::Line(line.into()));
    }

    /// 追加一个嵌套块
    pub fn block(&mut self, block: CodeBlock) {
        self.items.push(CodeItem::Block(block));
    }

    /// 在同一缩进级别追加另一个块的所有语句
    pub fn extend(&mut self, other: CodeBlock) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        for item in &self.items {
            match item {
                CodeItem::Line(line) => {
                    for _ in 0..depth {
                        out.push_str(INDENT);
                    }
                    out.push_str(line);
                    out.push('\n');
                }
                CodeItem::Block(block) => block.render_into(out, depth + 1),
            }
        }
    }
}
