// ==========================================
// 表格清单 - 配置层
// ==========================================
// 职责: 读取清单来源配置（插件类型 + 表格文件路径）
// ==========================================

pub mod inventory_config;

// 重导出核心配置类型
pub use inventory_config::{InventoryConfig, InventoryPlugin, TableSourceOptions};
