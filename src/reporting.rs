//! # Reporting Module / 报告模块
//!
//! This module renders consolidated results: the Markdown summary and detail
//! artifacts, a standalone HTML page, and a colorful console summary.
//!
//! 此模块渲染合并后的结果：Markdown 摘要与详情、
//! 独立的 HTML 页面，以及彩色的控制台摘要。

pub mod console;
pub mod html;
pub mod markdown;

// Re-export common reporting functions
pub use console::print_summary;
pub use html::generate_html_report;
pub use markdown::{render_detail, render_summary};
