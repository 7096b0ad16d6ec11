// ==========================================
// 表格清单 - 领域模型层
// ==========================================
// 职责: 定义单元格类型与清单实体
// 红线: 不含解析逻辑，不含组装逻辑
// ==========================================

pub mod inventory;
pub mod scalar;

// 重导出核心类型
pub use inventory::{
    ConnectionOptions, ConnectionOptionsMap, DataMap, Defaults, Group, Host, Inventory,
    ParentGroups,
};
pub use scalar::{RawRow, Scalar};
