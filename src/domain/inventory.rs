// ==========================================
// 表格清单 - 清单领域模型
// ==========================================
// 职责: 定义 Defaults / Group / Host / Inventory 结构
// 用途: 导入层写入，自动化引擎只读
// 红线: 清单返回后不再修改任何实体
// ==========================================

use crate::domain::scalar::Scalar;
use indexmap::IndexMap;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::sync::Arc;

/// 自由数据字段（列名 → 值，空值为 Null）
pub type DataMap = IndexMap<String, Scalar>;

/// 连接选项表（连接协议名 → 选项）
pub type ConnectionOptionsMap = IndexMap<String, ConnectionOptions>;

// ==========================================
// ConnectionOptions - 单个连接协议的覆写项
// ==========================================
// 未设置的字段由使用方回退到 host/group/defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionOptions {
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub platform: Option<String>,
    pub extras: Option<DataMap>, // 协议专有参数（已类型转换）
}

// ==========================================
// Defaults - 全局默认值
// ==========================================
// 每个清单至多一个，最先构建
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Defaults {
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub platform: Option<String>,
    pub data: DataMap,
    pub connection_options: ConnectionOptionsMap,
}

// ==========================================
// ParentGroups - 已解析的组引用列表
// ==========================================
// 顺序与源数据中逗号分隔的顺序一致
// 序列化: 仅输出组名
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentGroups(Vec<Arc<Group>>);

impl ParentGroups {
    pub fn new(groups: Vec<Arc<Group>>) -> Self {
        Self(groups)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Group>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 组名列表（按引用顺序）
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|g| g.name == name)
    }
}

impl Serialize for ParentGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for group in &self.0 {
            seq.serialize_element(&group.name)?;
        }
        seq.end()
    }
}

// ==========================================
// Group - 组
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub platform: Option<String>,
    pub groups: ParentGroups, // 父组（已解析）
    pub data: DataMap,
    pub connection_options: ConnectionOptionsMap,
    #[serde(skip)]
    pub defaults: Arc<Defaults>,
}

// ==========================================
// Host - 主机
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Host {
    pub name: String,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub platform: Option<String>,
    pub groups: ParentGroups, // 所属组（已解析）
    pub data: DataMap,
    pub connection_options: ConnectionOptionsMap,
    #[serde(skip)]
    pub defaults: Arc<Defaults>,
}

// ==========================================
// Inventory - 清单聚合
// ==========================================
// 不变量: hosts/groups 中引用的每个组名都存在于 groups
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inventory {
    pub hosts: IndexMap<String, Host>,
    pub groups: IndexMap<String, Arc<Group>>,
    pub defaults: Arc<Defaults>,
}

impl Inventory {
    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&Arc<Group>> {
        self.groups.get(name)
    }

    /// 属于指定组（直接成员）的主机
    pub fn hosts_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Host> + 'a {
        self.hosts.values().filter(move |h| h.groups.contains(group))
    }
}
