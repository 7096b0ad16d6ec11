// ==========================================
// 表格清单 - 连接选项构建器
// ==========================================
// 职责: 提取厂商前缀字段 → 去前缀 → 按规则表转换 → 连接选项
// 规则: 整数 / 标志位 / 原样透传（空值 → Null）
// ==========================================

use crate::domain::inventory::{ConnectionOptions, ConnectionOptionsMap, DataMap};
use crate::domain::scalar::{RawRow, Scalar};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportResult;
use tracing::debug;

// ==========================================
// 附加参数转换规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraRule {
    Integer,     // 整数（超时类参数）
    Flag,        // 标志位
    Passthrough, // 原样透传
}

// ==========================================
// VendorProfile - 厂商连接配置
// ==========================================
// prefix: 行字段前缀; connection: 连接选项表中的协议名
#[derive(Debug, Clone, Copy)]
pub struct VendorProfile {
    pub prefix: &'static str,
    pub connection: &'static str,
    pub extra_rules: &'static [(&'static str, ExtraRule)],
}

impl VendorProfile {
    /// 查找去前缀后的字段对应规则，未登记的为透传
    pub fn rule_for(&self, key: &str) -> ExtraRule {
        self.extra_rules
            .iter()
            .find(|(name, _)| *name == key)
            .map_or(ExtraRule::Passthrough, |(_, rule)| *rule)
    }

    /// 是否为本厂商字段
    pub fn owns(&self, field: &str) -> bool {
        field.starts_with(self.prefix)
    }
}

/// netmiko 连接参数
pub const NETMIKO: VendorProfile = VendorProfile {
    prefix: "netmiko_",
    connection: "netmiko",
    extra_rules: &[
        ("timeout", ExtraRule::Integer),
        ("conn_timeout", ExtraRule::Integer),
        ("auth_timeout", ExtraRule::Integer),
        ("banner_timeout", ExtraRule::Integer),
        ("blocking_timeout", ExtraRule::Integer),
        ("session_timeout", ExtraRule::Integer),
        ("fast_cli", ExtraRule::Flag),
    ],
};

// ==========================================
// ConnectionOptionBuilder
// ==========================================
pub struct ConnectionOptionBuilder {
    profile: VendorProfile,
    cleaner: DataCleaner,
}

impl Default for ConnectionOptionBuilder {
    fn default() -> Self {
        Self::new(NETMIKO)
    }
}

impl ConnectionOptionBuilder {
    pub fn new(profile: VendorProfile) -> Self {
        Self {
            profile,
            cleaner: DataCleaner,
        }
    }

    /// 从原始行构建连接选项
    ///
    /// # 返回
    /// - 空表: 行中无厂商字段（不创建连接选项条目）
    /// - 单条目: extras 为转换后的参数，其余覆写项保持未设置
    /// - Err: 整数参数无法转换
    pub fn build(&self, row: &RawRow) -> ImportResult<ConnectionOptionsMap> {
        let mut extras = DataMap::new();

        for (field, value) in row {
            let Some(key) = field.strip_prefix(self.profile.prefix) else {
                continue;
            };

            let converted = match self.profile.rule_for(key) {
                ExtraRule::Integer => Scalar::Integer(self.cleaner.to_int(field, value)?),
                ExtraRule::Flag => Scalar::Bool(self.cleaner.to_flag(value)),
                ExtraRule::Passthrough => self.cleaner.normalize_null(value),
            };
            extras.insert(key.to_string(), converted);
        }

        let mut options = ConnectionOptionsMap::new();
        if extras.is_empty() {
            return Ok(options);
        }

        debug!(
            connection = self.profile.connection,
            extras = extras.len(),
            "构建连接选项"
        );
        options.insert(
            self.profile.connection.to_string(),
            ConnectionOptions {
                extras: Some(extras),
                ..ConnectionOptions::default()
            },
        );
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;

    fn row(fields: &[(&str, Scalar)]) -> RawRow {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn extras(options: &ConnectionOptionsMap) -> &DataMap {
        options["netmiko"].extras.as_ref().unwrap()
    }

    #[test]
    fn test_no_vendor_fields() {
        let builder = ConnectionOptionBuilder::default();
        let options = builder
            .build(&row(&[
                ("name", Scalar::text("r1")),
                ("site", Scalar::text("dc1")),
            ]))
            .unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn test_integer_extra() {
        let builder = ConnectionOptionBuilder::default();
        let options = builder
            .build(&row(&[("netmiko_timeout", Scalar::text("30"))]))
            .unwrap();

        assert_eq!(extras(&options).get("timeout"), Some(&Scalar::Integer(30)));
        let entry = &options["netmiko"];
        assert_eq!(entry.hostname, None);
        assert_eq!(entry.port, None);
        assert_eq!(entry.platform, None);
    }

    #[test]
    fn test_flag_extra() {
        let builder = ConnectionOptionBuilder::default();
        for (raw, expected) in [
            ("False", false),
            ("FALSE", false),
            ("0", false),
            ("none", false),
            ("yes", true),
            ("1", true),
        ] {
            let options = builder
                .build(&row(&[("netmiko_fast_cli", Scalar::text(raw))]))
                .unwrap();
            assert_eq!(
                extras(&options).get("fast_cli"),
                Some(&Scalar::Bool(expected)),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_passthrough_extra() {
        let builder = ConnectionOptionBuilder::default();
        let options = builder
            .build(&row(&[
                ("netmiko_secret", Scalar::text("enable")),
                ("netmiko_global_delay_factor", Scalar::text("")),
                ("netmiko_keepalive", Scalar::Float(f64::NAN)),
            ]))
            .unwrap();

        let extras = extras(&options);
        assert_eq!(extras.get("secret"), Some(&Scalar::text("enable")));
        assert_eq!(extras.get("global_delay_factor"), Some(&Scalar::Null));
        assert_eq!(extras.get("keepalive"), Some(&Scalar::Null));
    }

    #[test]
    fn test_invalid_integer_extra() {
        let builder = ConnectionOptionBuilder::default();
        let err = builder
            .build(&row(&[("netmiko_conn_timeout", Scalar::text("soon"))]))
            .unwrap_err();
        match err {
            ImportError::TypeConversionError { field, .. } => {
                assert_eq!(field, "netmiko_conn_timeout")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_prefix_must_lead() {
        let builder = ConnectionOptionBuilder::default();
        let options = builder
            .build(&row(&[("my_netmiko_timeout", Scalar::text("x"))]))
            .unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn test_custom_profile() {
        const SCRAPLI: VendorProfile = VendorProfile {
            prefix: "scrapli_",
            connection: "scrapli",
            extra_rules: &[("timeout_socket", ExtraRule::Integer)],
        };
        let builder = ConnectionOptionBuilder::new(SCRAPLI);
        let options = builder
            .build(&row(&[
                ("scrapli_timeout_socket", Scalar::text("15")),
                ("netmiko_timeout", Scalar::text("30")),
            ]))
            .unwrap();

        assert_eq!(options.len(), 1);
        let extras = options["scrapli"].extras.as_ref().unwrap();
        assert_eq!(extras.get("timeout_socket"), Some(&Scalar::Integer(15)));
        assert!(extras.get("timeout").is_none());
    }
}
