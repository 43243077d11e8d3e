//! 注册与心跳协议参数

use serde::{Deserialize, Serialize};

use crate::options::{ExpiredStrategy, FailureStrategy, RouterStrategy};

/// 执行器注册参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorRegisterParams {
    /// 租户编码
    pub tenant: String,
    /// 应用名
    pub app_name: String,
    /// 应用描述
    pub app_desc: String,
    /// 主机名
    pub host_name: String,
    /// 执行器标签
    pub tag: String,
    /// 执行器SDK版本
    pub version: String,
    /// 执行器地址，host:port
    pub address: String,
}

/// 任务注册参数，注册表中每个任务一条
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRegisterParams {
    pub app_desc: String,
    pub app_name: String,
    pub cron: String,
    pub expired_strategy: ExpiredStrategy,
    /// 过期时间，毫秒，注册协议中的字段名为expiredTime
    pub expired_time: i64,
    pub failure_retry_interval: i64,
    pub failure_strategy: FailureStrategy,
    pub max_retry_count: i32,
    /// 任务方法标识，调度中心以此作为调度目标
    pub method: String,
    pub name: String,
    pub remark: String,
    pub router_strategy: RouterStrategy,
    pub tag: String,
    pub tenant: String,
    /// 任务超时时间，毫秒
    pub timeout: i64,
}

/// 注销与心跳共用的地址参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressParams {
    /// 执行器地址，host:port
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_register_params_wire_names() {
        let params = TaskRegisterParams {
            app_desc: "示例应用".to_string(),
            app_name: "demo".to_string(),
            cron: "0 0/5 * * * ?".to_string(),
            expired_strategy: ExpiredStrategy::Execute,
            expired_time: 180_000,
            failure_retry_interval: 5_000,
            failure_strategy: FailureStrategy::Retry,
            max_retry_count: 5,
            method: "demo/demoTask.handle".to_string(),
            name: "示例任务".to_string(),
            remark: String::new(),
            router_strategy: RouterStrategy::Random,
            tag: "common".to_string(),
            tenant: "default".to_string(),
            timeout: 10_000,
        };
        let json: serde_json::Value = serde_json::to_value(&params).unwrap();
        assert_eq!(json["expiredTime"], 180_000);
        assert_eq!(json["expiredStrategy"], 2);
        assert_eq!(json["failureStrategy"], 1);
        assert_eq!(json["routerStrategy"], 1);
        assert_eq!(json["maxRetryCount"], 5);
        assert_eq!(json["method"], "demo/demoTask.handle");
        assert_eq!(json["failureRetryInterval"], 5_000);
    }

    #[test]
    fn test_executor_register_params_wire_names() {
        let params = ExecutorRegisterParams {
            tenant: "default".to_string(),
            app_name: "demo".to_string(),
            app_desc: "示例应用".to_string(),
            host_name: "worker-1".to_string(),
            tag: "common".to_string(),
            version: "Rust-1.0.0".to_string(),
            address: "192.168.1.10:8527".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&params).unwrap();
        assert_eq!(json["appName"], "demo");
        assert_eq!(json["appDesc"], "示例应用");
        assert_eq!(json["hostName"], "worker-1");
        assert_eq!(json["version"], "Rust-1.0.0");
    }

    #[test]
    fn test_address_params_shape() {
        let body = serde_json::to_string(&AddressParams {
            address: "10.0.0.2:8528".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"address":"10.0.0.2:8528"}"#);
    }
}
