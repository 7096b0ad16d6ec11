// ==========================================
// 表格清单 - 清单来源配置
// ==========================================
// 格式: YAML，与自动化引擎配置文件的 inventory 段一致
//   inventory:
//     plugin: CSVInventory | ExcelInventory
//     options: { host_file, group_file, defaults_file }
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ==========================================
// InventoryPlugin - 表格来源类型
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryPlugin {
    #[default]
    #[serde(rename = "CSVInventory", alias = "csv")]
    Csv,
    #[serde(rename = "ExcelInventory", alias = "excel")]
    Excel,
}

impl InventoryPlugin {
    /// 默认文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            InventoryPlugin::Csv => "csv",
            InventoryPlugin::Excel => "xlsx",
        }
    }
}

// ==========================================
// TableSourceOptions - 三个表格文件路径
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSourceOptions {
    pub plugin: InventoryPlugin,
    pub host_file: PathBuf,     // 必需
    pub group_file: PathBuf,    // 不存在时跳过
    pub defaults_file: PathBuf, // 不存在时跳过，仅取首行
}

impl TableSourceOptions {
    /// 插件默认文件名（hosts/groups/defaults + 扩展名）
    pub fn for_plugin(plugin: InventoryPlugin) -> Self {
        let ext = plugin.extension();
        Self {
            plugin,
            host_file: PathBuf::from(format!("hosts.{}", ext)),
            group_file: PathBuf::from(format!("groups.{}", ext)),
            defaults_file: PathBuf::from(format!("defaults.{}", ext)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawOptions {
    host_file: Option<PathBuf>,
    group_file: Option<PathBuf>,
    defaults_file: Option<PathBuf>,
}

// ==========================================
// InventoryConfig - inventory 配置段
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub plugin: InventoryPlugin,
    #[serde(default)]
    options: RawOptions,
}

// 配置文件顶层（其余段忽略）
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    inventory: InventoryConfig,
}

impl InventoryConfig {
    /// 从 YAML 文本读取
    pub fn from_yaml_str(text: &str) -> ImportResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = serde_yaml::from_str(text)?;
        Ok(file.inventory)
    }

    /// 从 YAML 文件读取
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&text)
    }

    /// 合并插件默认值后的文件路径
    pub fn source_options(&self) -> TableSourceOptions {
        let defaults = TableSourceOptions::for_plugin(self.plugin);
        TableSourceOptions {
            plugin: self.plugin,
            host_file: self.options.host_file.clone().unwrap_or(defaults.host_file),
            group_file: self.options.group_file.clone().unwrap_or(defaults.group_file),
            defaults_file: self
                .options
                .defaults_file
                .clone()
                .unwrap_or(defaults.defaults_file),
        }
    }
}
