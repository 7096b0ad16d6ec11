// ==========================================
// 表格清单 - 记录构建器
// ==========================================
// 职责: 原始行 → Defaults / 未解析的 Host、Group 记录
// 流程: 身份字段转换 → 组列表拆分 → 自由数据 → 连接选项
// 说明: 组引用此时仍为组名字符串，由组装器统一解析
// ==========================================

use crate::domain::inventory::{ConnectionOptionsMap, DataMap, Defaults};
use crate::domain::scalar::{RawRow, Scalar};
use crate::importer::connection_options::{ConnectionOptionBuilder, VendorProfile, NETMIKO};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_classifier::{FieldClassifier, GROUPS_FIELD};
use crate::importer::error::ImportResult;

/// 行中完全缺失 port 列时使用的端口
pub const DEFAULT_PORT: u16 = 22;

// ==========================================
// InventoryElement - 未解析的主机/组记录
// ==========================================
// 生命周期: 仅在组装流程内
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryElement {
    pub name: String,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub platform: Option<String>,
    pub groups: Vec<String>, // 组名（未解析）
    pub data: DataMap,
    pub connection_options: ConnectionOptionsMap,
}

// 身份字段（已转换）
struct IdentityFields {
    hostname: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    platform: Option<String>,
}

pub struct RecordBuilder {
    cleaner: DataCleaner,
    classifier: FieldClassifier,
    connection_builder: ConnectionOptionBuilder,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(NETMIKO)
    }
}

impl RecordBuilder {
    pub fn new(profile: VendorProfile) -> Self {
        Self {
            cleaner: DataCleaner,
            classifier: FieldClassifier::new(profile),
            connection_builder: ConnectionOptionBuilder::new(profile),
        }
    }

    /// 构建主机/组记录
    ///
    /// port 列完全缺失时取 22；列存在但为空时保持未设置
    pub fn build_element(&self, row: &RawRow) -> ImportResult<InventoryElement> {
        let identity = self.identity_fields(row, Some(DEFAULT_PORT))?;

        Ok(InventoryElement {
            name: self.cleaner.to_text(row.get("name")).unwrap_or_default(),
            hostname: identity.hostname,
            port: identity.port,
            username: identity.username,
            password: identity.password,
            platform: identity.platform,
            groups: self.parse_groups(row.get(GROUPS_FIELD)),
            data: self.classifier.data_fields(row, false),
            connection_options: self.connection_builder.build(row)?,
        })
    }

    /// 构建 Defaults（不注入默认端口）
    pub fn build_defaults(&self, row: &RawRow) -> ImportResult<Defaults> {
        let identity = self.identity_fields(row, None)?;

        Ok(Defaults {
            hostname: identity.hostname,
            port: identity.port,
            username: identity.username,
            password: identity.password,
            platform: identity.platform,
            data: self.classifier.data_fields(row, true),
            connection_options: self.connection_builder.build(row)?,
        })
    }

    /// 拆分组成员字段（按逗号，不去空白、不去重）
    pub fn parse_groups(&self, value: Option<&Scalar>) -> Vec<String> {
        match self.cleaner.to_text(value) {
            Some(text) => text.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

    fn identity_fields(
        &self,
        row: &RawRow,
        default_port: Option<u16>,
    ) -> ImportResult<IdentityFields> {
        let port = match (row.get("port"), default_port) {
            (None, Some(port)) => Some(port),
            (value, _) => self.cleaner.to_port("port", value)?,
        };

        Ok(IdentityFields {
            hostname: self.cleaner.to_text(row.get("hostname")),
            port,
            username: self.cleaner.to_text(row.get("username")),
            password: self.cleaner.to_text(row.get("password")),
            platform: self.cleaner.to_text(row.get("platform")),
        })
    }
}
