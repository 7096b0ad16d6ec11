// ==========================================
// 表格清单 - 核心库
// ==========================================
// 职责: 将 CSV/Excel 中的 hosts / groups / defaults 表格
//       转换为网络自动化引擎使用的清单
// 技术栈: csv + calamine + serde
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格与清单实体
pub mod domain;

// 导入层 - 表格解析与清单组装
pub mod importer;

// 配置层 - 清单来源配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    ConnectionOptions, Defaults, Group, Host, Inventory, ParentGroups, RawRow, Scalar,
};

pub use importer::{FlatDataInventory, ImportError, ImportResult, TableInventory};

pub use config::{InventoryConfig, InventoryPlugin, TableSourceOptions};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 名称
pub const APP_NAME: &str = "table-inventory";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
