// ==========================================
// 表格清单 - 字段分类器
// ==========================================
// 职责: 将原始行字段划分为 身份字段 / 厂商连接字段 / 自由数据
// 输出: 自由数据（空值保留为 Null，不丢弃）
// ==========================================

use crate::domain::inventory::DataMap;
use crate::domain::scalar::RawRow;
use crate::importer::connection_options::{VendorProfile, NETMIKO};
use crate::importer::data_cleaner::DataCleaner;

/// 身份字段（不进入自由数据）
pub const IDENTITY_FIELDS: [&str; 6] = ["name", "hostname", "port", "username", "password", "platform"];

/// 组成员字段
pub const GROUPS_FIELD: &str = "groups";

pub struct FieldClassifier {
    profile: VendorProfile,
    cleaner: DataCleaner,
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new(NETMIKO)
    }
}

impl FieldClassifier {
    pub fn new(profile: VendorProfile) -> Self {
        Self {
            profile,
            cleaner: DataCleaner,
        }
    }

    /// 是否为身份字段（defaults 行额外排除 groups）
    pub fn is_identity(&self, field: &str, is_defaults: bool) -> bool {
        IDENTITY_FIELDS.contains(&field) || (is_defaults && field == GROUPS_FIELD)
    }

    /// 提取自由数据字段
    pub fn data_fields(&self, row: &RawRow, is_defaults: bool) -> DataMap {
        row.iter()
            .filter(|(field, _)| !self.is_identity(field, is_defaults) && !self.profile.owns(field))
            .map(|(field, value)| (field.clone(), self.cleaner.normalize_null(value)))
            .collect()
    }
}
