//! 心跳循环

use std::sync::Arc;
use std::time::Duration;

use executor_core::AgentContext;
use executor_domain::AddressParams;
use tokio::time::interval;
use tracing::info;

use crate::openapi::OpenApiClient;

/// 心跳周期，首个周期立即触发
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(3);
/// 尚未注册成功时的等待时间
const UNREGISTERED_PAUSE: Duration = Duration::from_secs(1);

/// 心跳服务
///
/// 只在执行器注册成功后发送，发送失败不在本周期内重试，
/// 下一个周期自然重发。
pub struct HeartbeatService {
    ctx: Arc<AgentContext>,
    client: Arc<dyn OpenApiClient>,
    address_params: AddressParams,
}

impl HeartbeatService {
    pub fn new(ctx: Arc<AgentContext>, client: Arc<dyn OpenApiClient>, address: String) -> Self {
        Self {
            ctx,
            client,
            address_params: AddressParams { address },
        }
    }

    /// 心跳主循环
    pub async fn run(self: Arc<Self>) {
        let mut heartbeat_interval = interval(HEARTBEAT_INTERVAL);
        loop {
            heartbeat_interval.tick().await;
            if self.ctx.is_shutdown() {
                break;
            }
            if !self.ctx.is_registered() {
                // 等注册循环先完成注册
                tokio::time::sleep(UNREGISTERED_PAUSE).await;
                continue;
            }
            // 失败详情由客户端记录，等待下个周期重发
            let _ = self.client.heartbeat(&self.address_params).await;
        }
        info!("心跳循环退出");
    }
}
