//! 任务注册表

use std::collections::BTreeMap;
use std::sync::Arc;

use executor_core::errors::Result;
use executor_domain::{TaskHandler, TaskOptions};
use tracing::info;

struct RegisteredTask {
    handler: Arc<dyn TaskHandler>,
    options: TaskOptions,
}

/// 任务注册表
///
/// 键为 `应用名/处理器名.handle`，调度中心持久化该键作为调度目标，
/// 因此键的推导必须在重启后保持稳定。同一键重复注册时后者覆盖前者。
pub struct TaskRegistry {
    app_name: String,
    tasks: BTreeMap<String, RegisteredTask>,
}

impl TaskRegistry {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            tasks: BTreeMap::new(),
        }
    }

    /// 注册任务处理器
    ///
    /// 任务名称或CRON表达式为空时返回错误，调用方应视为启动失败；
    /// 数值配置为零的字段回填默认值后存储。返回推导出的任务键。
    pub fn register(
        &mut self,
        handler: Arc<dyn TaskHandler>,
        mut options: TaskOptions,
    ) -> Result<String> {
        options.validate()?;
        options.apply_defaults();

        let key = format!("{}/{}.handle", self.app_name, handler.name());
        info!(
            "注册任务: method={}, name={}, cron={}",
            key, options.name, options.cron
        );
        self.tasks.insert(key.clone(), RegisteredTask { handler, options });
        Ok(key)
    }

    /// 按方法标识查找处理器
    pub fn get(&self, method: &str) -> Option<Arc<dyn TaskHandler>> {
        self.tasks.get(method).map(|task| task.handler.clone())
    }

    /// 导出全部任务的键与配置，供注册协议组装参数
    pub fn snapshot(&self) -> Vec<(String, TaskOptions)> {
        self.tasks
            .iter()
            .map(|(key, task)| (key.clone(), task.options.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
