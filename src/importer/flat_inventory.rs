// ==========================================
// 表格清单 - 扁平清单组装器
// ==========================================
// 职责: defaults → groups → hosts 顺序构建，解析组引用
// 流程: 构建 Defaults → 构建组 → 解析父组 → 构建主机 → 解析主机组
// 红线: 任一步失败即终止，不返回部分清单
// ==========================================

use crate::domain::inventory::{Defaults, Group, Host, Inventory, ParentGroups};
use crate::domain::scalar::RawRow;
use crate::importer::connection_options::{VendorProfile, NETMIKO};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{EntityKind, ImportError, ImportResult};
use crate::importer::record_builder::{InventoryElement, RecordBuilder};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// FlatDataInventory - 三组原始行 → 清单
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FlatDataInventory {
    hosts_data: Vec<RawRow>,
    groups_data: Vec<RawRow>,
    defaults_data: Option<RawRow>,
    profile: Option<VendorProfile>,
}

impl FlatDataInventory {
    /// # 参数
    /// - hosts_data: 主机行
    /// - groups_data: 组行
    /// - defaults_data: 默认值行（空行等同于缺失）
    pub fn new(
        hosts_data: Vec<RawRow>,
        groups_data: Vec<RawRow>,
        defaults_data: Option<RawRow>,
    ) -> Self {
        Self {
            hosts_data,
            groups_data,
            defaults_data,
            profile: None,
        }
    }

    /// 指定厂商连接配置（默认 netmiko）
    pub fn with_profile(mut self, profile: VendorProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// 组装清单
    ///
    /// # 返回
    /// - Ok(Inventory): 引用全部解析完成的清单
    /// - Err: 名称为空 / 类型转换失败 / 组引用不存在 / 组引用成环
    #[instrument(skip(self), fields(
        hosts = self.hosts_data.len(),
        groups = self.groups_data.len()
    ))]
    pub fn load(&self) -> ImportResult<Inventory> {
        let builder = RecordBuilder::new(self.profile.unwrap_or(NETMIKO));

        // === 步骤 1: Defaults ===
        let defaults = match &self.defaults_data {
            Some(row) if !row.is_empty() => builder.build_defaults(row)?,
            _ => Defaults::default(),
        };
        let defaults = Arc::new(defaults);

        // === 步骤 2: 构建组 ===
        let pending = collect_elements(&builder, &self.groups_data, EntityKind::Group)?;

        // === 步骤 3: 解析父组 ===
        let groups = GroupResolver::new(&pending, &defaults).resolve_all()?;
        debug!(groups = groups.len(), "组解析完成");

        // === 步骤 4: 构建主机 ===
        let pending_hosts = collect_elements(&builder, &self.hosts_data, EntityKind::Host)?;

        // === 步骤 5: 解析主机组 ===
        let mut hosts = IndexMap::with_capacity(pending_hosts.len());
        for (name, element) in pending_hosts {
            let parents = lookup_groups(&name, &element.groups, &groups)?;
            hosts.insert(name, into_host(element, parents, &defaults));
        }

        info!(hosts = hosts.len(), groups = groups.len(), "清单组装完成");
        Ok(Inventory {
            hosts,
            groups,
            defaults,
        })
    }
}

// 按输入顺序构建记录；同名后者覆盖前者（保留首次插入位置）
fn collect_elements(
    builder: &RecordBuilder,
    rows: &[RawRow],
    kind: EntityKind,
) -> ImportResult<IndexMap<String, InventoryElement>> {
    let cleaner = DataCleaner;
    let mut elements = IndexMap::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        if cleaner.is_empty(row.get("name")) {
            error!(kind = %kind, row = row_number, data = ?row, "{} name is empty", kind);
            return Err(ImportError::MissingName {
                kind,
                row: row_number,
            });
        }

        let element = builder.build_element(row)?;
        let name = element.name.clone();
        debug!(kind = %kind, name = %name, "构建记录");
        if elements.insert(name.clone(), element).is_some() {
            warn!(kind = %kind, row = row_number, name = %name, "名称重复，覆盖先前记录");
        }
    }

    Ok(elements)
}

fn lookup_groups(
    owner: &str,
    names: &[String],
    groups: &IndexMap<String, Arc<Group>>,
) -> ImportResult<ParentGroups> {
    names
        .iter()
        .map(|name| {
            groups
                .get(name)
                .map(Arc::clone)
                .ok_or_else(|| ImportError::UnresolvedGroup {
                    owner: owner.to_string(),
                    group: name.clone(),
                })
        })
        .collect::<ImportResult<Vec<_>>>()
        .map(ParentGroups::new)
}

fn into_host(element: InventoryElement, groups: ParentGroups, defaults: &Arc<Defaults>) -> Host {
    Host {
        name: element.name,
        hostname: element.hostname,
        port: element.port,
        username: element.username,
        password: element.password,
        platform: element.platform,
        groups,
        data: element.data,
        connection_options: element.connection_options,
        defaults: Arc::clone(defaults),
    }
}

fn into_group(element: &InventoryElement, groups: ParentGroups, defaults: &Arc<Defaults>) -> Group {
    Group {
        name: element.name.clone(),
        hostname: element.hostname.clone(),
        port: element.port,
        username: element.username.clone(),
        password: element.password.clone(),
        platform: element.platform.clone(),
        groups,
        data: element.data.clone(),
        connection_options: element.connection_options.clone(),
        defaults: Arc::clone(defaults),
    }
}

// ==========================================
// GroupResolver - 父组深度优先解析（显式栈，不递归）
// ==========================================
// 父组先于子组解析完成，Arc<Group> 始终指向已解析的组
// stack: 当前解析路径，用于检测环
struct GroupResolver<'a> {
    pending: &'a IndexMap<String, InventoryElement>,
    defaults: &'a Arc<Defaults>,
    resolved: HashMap<String, Arc<Group>>,
}

// 解析路径上的一帧: 组 + 下一个待处理的父组下标 + 已就绪的父组
struct Frame<'a> {
    name: &'a str,
    element: &'a InventoryElement,
    next: usize,
    parents: Vec<Arc<Group>>,
}

impl<'a> Frame<'a> {
    fn new(name: &'a str, element: &'a InventoryElement) -> Self {
        Self {
            name,
            element,
            next: 0,
            parents: Vec::with_capacity(element.groups.len()),
        }
    }
}

impl<'a> GroupResolver<'a> {
    fn new(pending: &'a IndexMap<String, InventoryElement>, defaults: &'a Arc<Defaults>) -> Self {
        Self {
            pending,
            defaults,
            resolved: HashMap::with_capacity(pending.len()),
        }
    }

    /// 解析全部组，输出顺序与插入顺序一致
    fn resolve_all(mut self) -> ImportResult<IndexMap<String, Arc<Group>>> {
        let pending = self.pending;
        for (name, element) in pending {
            self.resolve_from(name, element)?;
        }

        let mut resolved = self.resolved;
        Ok(pending
            .keys()
            .filter_map(|name| resolved.remove(name).map(|group| (name.clone(), group)))
            .collect())
    }

    fn resolve_from(&mut self, name: &'a str, element: &'a InventoryElement) -> ImportResult<()> {
        if self.resolved.contains_key(name) {
            return Ok(());
        }

        let pending = self.pending;
        let mut stack = vec![Frame::new(name, element)];
        let mut on_path: HashSet<&'a str> = HashSet::from([name]);

        while let Some(frame) = stack.last_mut() {
            let owner = frame.name;
            let current: &'a InventoryElement = frame.element;

            let Some(parent) = current.groups.get(frame.next) else {
                // 父组全部就绪 → 构建当前组，交回路径上的子组
                let parents = ParentGroups::new(std::mem::take(&mut frame.parents));
                let group = Arc::new(into_group(current, parents, self.defaults));
                self.resolved.insert(owner.to_string(), Arc::clone(&group));
                stack.pop();
                on_path.remove(owner);
                if let Some(child) = stack.last_mut() {
                    child.parents.push(group);
                }
                continue;
            };
            frame.next += 1;

            if let Some(group) = self.resolved.get(parent) {
                frame.parents.push(Arc::clone(group));
                continue;
            }

            if on_path.contains(parent.as_str()) {
                let start = stack
                    .iter()
                    .position(|f| f.name == parent.as_str())
                    .unwrap_or(0);
                let mut chain: Vec<&str> = stack[start..].iter().map(|f| f.name).collect();
                chain.push(parent);
                return Err(ImportError::CyclicGroupReference {
                    chain: chain.join(" -> "),
                });
            }

            let parent_element =
                pending
                    .get(parent)
                    .ok_or_else(|| ImportError::UnresolvedGroup {
                        owner: owner.to_string(),
                        group: parent.clone(),
                    })?;
            on_path.insert(parent);
            stack.push(Frame::new(parent, parent_element));
        }

        Ok(())
    }
}
