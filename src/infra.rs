//! # Infrastructure Module / 基础设施模块
//!
//! This module provides the boundary services around the consolidation core:
//! reading bundles and coverage documents from disk, and file system helpers
//! for the command-line front end.
//!
//! 此模块提供合并核心之外的边界服务：
//! 从磁盘读取结果包和覆盖率文档，以及命令行前端使用的文件系统辅助功能。

pub mod bundle;
pub mod coverage;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
