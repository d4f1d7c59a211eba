//! # 美化输出工具
//!
//! 提供统一的终端输出样式。诊断日志走 `log`，这里只负责面向用户的输出。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::models::DIRECTIVE_PREFIX;

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印脚本内容，指令行高亮
pub fn print_script(content: &str) {
    for line in content.lines() {
        match line.strip_prefix(DIRECTIVE_PREFIX) {
            Some(rest) => println!("{}{}", DIRECTIVE_PREFIX.cyan(), rest),
            None if line.starts_with("#!") => println!("{}", line.dimmed()),
            None => println!("{}", line),
        }
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
