// ==========================================
// 表格清单 - 导入层
// ==========================================
// 职责: 表格原始行 → 类型化的 Defaults / Group / Host → 清单
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod connection_options;
pub mod data_cleaner;
pub mod error;
pub mod field_classifier;
pub mod file_parser;
pub mod file_parser_trait;
pub mod flat_inventory;
pub mod record_builder;
pub mod table_inventory;

// 重导出核心类型
pub use connection_options::{ConnectionOptionBuilder, ExtraRule, VendorProfile, NETMIKO};
pub use data_cleaner::DataCleaner;
pub use error::{EntityKind, ImportError, ImportResult};
pub use field_classifier::FieldClassifier;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use flat_inventory::FlatDataInventory;
pub use record_builder::{InventoryElement, RecordBuilder};
pub use table_inventory::TableInventory;

// 重导出 Trait 接口
pub use file_parser_trait::FileParser;
