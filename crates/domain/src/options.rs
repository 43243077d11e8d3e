//! 执行器与任务配置

use executor_core::errors::{ExecutorError, Result};
use serde::{Deserialize, Serialize};

/// 默认执行器标签
pub const DEFAULT_TAG: &str = "common";

/// 默认过期时间：3分钟
pub const DEFAULT_EXPIRE_TIME_MS: i64 = 180_000;
/// 默认失败最大重试次数
pub const DEFAULT_MAX_RETRY_COUNT: i32 = 5;
/// 默认失败重试间隔：5秒
pub const DEFAULT_FAILURE_RETRY_INTERVAL_MS: i64 = 5_000;
/// 默认任务超时：10秒
pub const DEFAULT_TIMEOUT_MS: i64 = 10_000;

/// 路由策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum RouterStrategy {
    /// 随机策略，适合绝大多数场景
    #[default]
    Random = 1,
    /// 分片策略，适合大任务拆分执行的场景
    Sharding = 2,
}

impl From<RouterStrategy> for i32 {
    fn from(strategy: RouterStrategy) -> Self {
        strategy as i32
    }
}

impl TryFrom<i32> for RouterStrategy {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Random),
            2 => Ok(Self::Sharding),
            other => Err(format!("未知的路由策略: {}", other)),
        }
    }
}

/// 过期策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ExpiredStrategy {
    /// 过期任务直接丢弃，适合调度密集的场景
    Discard = 1,
    /// 过期任务依然调度，适合调度松散的场景
    #[default]
    Execute = 2,
}

impl From<ExpiredStrategy> for i32 {
    fn from(strategy: ExpiredStrategy) -> Self {
        strategy as i32
    }
}

impl TryFrom<i32> for ExpiredStrategy {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Discard),
            2 => Ok(Self::Execute),
            other => Err(format!("未知的过期策略: {}", other)),
        }
    }
}

/// 失败策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum FailureStrategy {
    /// 失败重试
    #[default]
    Retry = 1,
    /// 失败丢弃
    Discard = 2,
}

impl From<FailureStrategy> for i32 {
    fn from(strategy: FailureStrategy) -> Self {
        strategy as i32
    }
}

impl TryFrom<i32> for FailureStrategy {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Retry),
            2 => Ok(Self::Discard),
            other => Err(format!("未知的失败策略: {}", other)),
        }
    }
}

/// 任务配置
///
/// 数值字段为零时在注册阶段回填默认值，过期时间建议不超过5分钟，
/// 超时时间建议不超过10秒。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskOptions {
    /// 任务名称
    pub name: String,
    /// CRON表达式
    pub cron: String,
    /// 路由策略，默认随机
    pub router_strategy: RouterStrategy,
    /// 过期策略，默认过期依然调度
    pub expired_strategy: ExpiredStrategy,
    /// 过期时间，毫秒，任务超过该时间仍未被调度时按过期策略处理
    pub expire_time: i64,
    /// 失败策略，默认失败重试
    pub failure_strategy: FailureStrategy,
    /// 失败最大重试次数
    pub max_retry_count: i32,
    /// 失败重试间隔，毫秒
    pub failure_retry_interval: i64,
    /// 任务超时时间，毫秒，超时未回传结果时由调度中心按失败策略重试
    pub timeout: i64,
    /// 任务备注，描述任务用途，方便后期维护
    pub remark: String,
}

impl TaskOptions {
    /// 创建指定名称与CRON表达式的任务配置，其余字段取默认值
    pub fn new(name: impl Into<String>, cron: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cron: cron.into(),
            ..Default::default()
        }
    }

    /// 校验必填项，名称与CRON表达式缺一不可
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ExecutorError::InvalidTaskParams(
                "任务名称不能为空".to_string(),
            ));
        }
        if self.cron.is_empty() {
            return Err(ExecutorError::InvalidTaskParams(
                "CRON表达式不能为空".to_string(),
            ));
        }
        Ok(())
    }

    /// 将为零的数值字段回填为默认值
    pub fn apply_defaults(&mut self) {
        if self.expire_time == 0 {
            self.expire_time = DEFAULT_EXPIRE_TIME_MS;
        }
        if self.max_retry_count == 0 {
            self.max_retry_count = DEFAULT_MAX_RETRY_COUNT;
        }
        if self.failure_retry_interval == 0 {
            self.failure_retry_interval = DEFAULT_FAILURE_RETRY_INTERVAL_MS;
        }
        if self.timeout == 0 {
            self.timeout = DEFAULT_TIMEOUT_MS;
        }
    }
}

/// 执行器全局配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutorOptions {
    /// 调度平台地址，例如 `http://127.0.0.1:9527`
    pub server_address: String,
    /// 租户编码
    pub tenant: String,
    /// 应用名，一般为英文代号
    pub app_name: String,
    /// 应用描述，应用中文名称或对应用的说明
    pub app_desc: String,
    /// 执行器标签，不填时归入common组
    pub tag: String,
    /// 签名密钥
    pub sign_key: String,
}

impl ExecutorOptions {
    /// 校验配置并回填默认标签
    pub fn validate(&mut self) -> Result<()> {
        if self.server_address.is_empty() {
            return Err(ExecutorError::Configuration(
                "调度平台地址不能为空".to_string(),
            ));
        }
        if self.tenant.is_empty() {
            return Err(ExecutorError::Configuration("租户编码不能为空".to_string()));
        }
        if self.app_name.is_empty() {
            return Err(ExecutorError::Configuration("应用名不能为空".to_string()));
        }
        if self.app_desc.is_empty() {
            return Err(ExecutorError::Configuration("应用描述不能为空".to_string()));
        }
        if self.sign_key.is_empty() {
            return Err(ExecutorError::Configuration("签名密钥不能为空".to_string()));
        }
        if self.tag.is_empty() {
            self.tag = DEFAULT_TAG.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_options_apply_defaults() {
        let mut options = TaskOptions::new("示例任务", "0 0/5 * * * ?");
        options.apply_defaults();
        assert_eq!(options.expire_time, DEFAULT_EXPIRE_TIME_MS);
        assert_eq!(options.max_retry_count, DEFAULT_MAX_RETRY_COUNT);
        assert_eq!(options.failure_retry_interval, DEFAULT_FAILURE_RETRY_INTERVAL_MS);
        assert_eq!(options.timeout, DEFAULT_TIMEOUT_MS);
        assert_eq!(options.router_strategy, RouterStrategy::Random);
        assert_eq!(options.expired_strategy, ExpiredStrategy::Execute);
        assert_eq!(options.failure_strategy, FailureStrategy::Retry);
    }

    #[test]
    fn test_task_options_keep_explicit_values() {
        let mut options = TaskOptions::new("示例任务", "0 0/5 * * * ?");
        options.expire_time = 60_000;
        options.max_retry_count = 2;
        options.apply_defaults();
        assert_eq!(options.expire_time, 60_000);
        assert_eq!(options.max_retry_count, 2);
        assert_eq!(options.failure_retry_interval, DEFAULT_FAILURE_RETRY_INTERVAL_MS);
    }

    #[test]
    fn test_task_options_validate_rejects_empty_cron() {
        let options = TaskOptions::new("示例任务", "");
        assert!(options.validate().is_err());

        let options = TaskOptions::new("", "0 0/5 * * * ?");
        assert!(options.validate().is_err());

        let options = TaskOptions::new("示例任务", "0 0/5 * * * ?");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_executor_options_validate() {
        let mut options = ExecutorOptions {
            server_address: "http://127.0.0.1:9527".to_string(),
            tenant: "default".to_string(),
            app_name: "demo".to_string(),
            app_desc: "示例应用".to_string(),
            tag: String::new(),
            sign_key: "secret".to_string(),
        };
        options.validate().unwrap();
        // 空标签回填为默认分组
        assert_eq!(options.tag, DEFAULT_TAG);

        let mut missing_key = options.clone();
        missing_key.sign_key = String::new();
        assert!(missing_key.validate().is_err());
    }

    #[test]
    fn test_strategy_int_round_trip() {
        assert_eq!(i32::from(RouterStrategy::Random), 1);
        assert_eq!(i32::from(RouterStrategy::Sharding), 2);
        assert_eq!(i32::from(ExpiredStrategy::Discard), 1);
        assert_eq!(i32::from(ExpiredStrategy::Execute), 2);
        assert_eq!(i32::from(FailureStrategy::Retry), 1);
        assert_eq!(i32::from(FailureStrategy::Discard), 2);
        assert!(RouterStrategy::try_from(3).is_err());
    }
}
