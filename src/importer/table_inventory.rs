// ==========================================
// 表格清单 - 表格文件清单加载器
// ==========================================
// 职责: 读取 hosts / groups / defaults 表格 → 扁平清单组装
// 规则: hosts 必需; groups、defaults 不存在时跳过; defaults 仅取首行
// ==========================================

use crate::config::{InventoryConfig, InventoryPlugin, TableSourceOptions};
use crate::domain::inventory::Inventory;
use crate::domain::scalar::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, ExcelParser};
use crate::importer::file_parser_trait::FileParser;
use crate::importer::flat_inventory::FlatDataInventory;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub struct TableInventory {
    options: TableSourceOptions,
    parser: Box<dyn FileParser>,
}

impl TableInventory {
    /// 按插件类型选择解析器
    pub fn new(options: TableSourceOptions) -> Self {
        let parser: Box<dyn FileParser> = match options.plugin {
            InventoryPlugin::Csv => Box::new(CsvParser),
            InventoryPlugin::Excel => Box::new(ExcelParser),
        };
        Self { options, parser }
    }

    /// 指定解析器（如按扩展名自动选择的 UniversalFileParser）
    pub fn with_parser(options: TableSourceOptions, parser: Box<dyn FileParser>) -> Self {
        Self { options, parser }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.source_options())
    }

    /// 读取三组原始行（尚未组装）
    pub fn read_rows(&self) -> ImportResult<FlatDataInventory> {
        let host_file = expand_home(&self.options.host_file);
        let group_file = expand_home(&self.options.group_file);
        let defaults_file = expand_home(&self.options.defaults_file);

        let defaults_data = self.read_optional(&defaults_file)?.into_iter().next();
        let groups_data = self.read_optional(&group_file)?;

        if !host_file.exists() {
            return Err(ImportError::FileNotFound(host_file.display().to_string()));
        }
        let hosts_data = self.parser.parse_to_raw_rows(&host_file)?;

        Ok(FlatDataInventory::new(hosts_data, groups_data, defaults_data))
    }

    /// 读取并组装清单
    #[instrument(skip(self), fields(plugin = ?self.options.plugin))]
    pub fn load(&self) -> ImportResult<Inventory> {
        info!(host_file = %self.options.host_file.display(), "开始加载表格清单");
        self.read_rows()?.load()
    }

    fn read_optional(&self, path: &Path) -> ImportResult<Vec<RawRow>> {
        if !path.exists() {
            debug!(file = %path.display(), "文件不存在，跳过");
            return Ok(Vec::new());
        }
        self.parser.parse_to_raw_rows(path)
    }
}

/// 展开路径开头的 ~
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
