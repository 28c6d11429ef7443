//! # Core Module / 核心模块
//!
//! This module contains the consolidation engine: the data models, the attempt
//! grouper, the status consolidator, the aggregator and the `format()` pipeline
//! that ties them to the bundle reader and the report renderer.
//!
//! 此模块包含结果合并引擎：数据模型、尝试分组器、状态合并器、
//! 聚合器，以及将它们与结果包读取器和报告渲染器连接起来的 `format()` 流水线。

pub mod aggregation;
pub mod config;
pub mod consolidation;
pub mod error;
pub mod formatter;
pub mod grouping;
pub mod models;

// Re-exports
pub use aggregation::aggregate;
pub use consolidation::consolidate;
pub use error::FormatError;
pub use grouping::group_attempts;
pub use models::{AggregateCounts, ConsolidatedTestRecord, TestOutcome, TestStatus};
