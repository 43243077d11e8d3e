//! 入站HTTP监听与服务

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 8527;

/// 绑定监听端口
///
/// 端口被占用时递增端口号重试，直到绑定成功。实际绑定的端口从
/// 返回的listener读取，用于拼装对外公布的执行器地址。
pub async fn bind_listener(port: u16) -> TcpListener {
    let mut port = port;
    loop {
        match TcpListener::bind(("0.0.0.0", port)).await {
            Ok(listener) => {
                if let Ok(addr) = listener.local_addr() {
                    info!("执行器HTTP服务已绑定, 端口: {}", addr.port());
                }
                return listener;
            }
            Err(e) => {
                warn!("绑定端口失败, 端口: {}, err: {}", port, e);
                if e.kind() == std::io::ErrorKind::AddrInUse {
                    port += 1;
                } else {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }
}

/// 启动HTTP服务，正常情况下不会返回
pub async fn serve(listener: TcpListener, app: Router) {
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("执行器HTTP服务异常退出, err: {}", e);
    }
}
