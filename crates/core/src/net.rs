use std::net::UdpSocket;

use crate::errors::{ExecutorError, Result};

/// 探测本机对外IP
///
/// 通过UDP connect到公网地址读取本地出口地址，过程中不产生真实流量。
/// 调用方在失败时应回退到回环地址。
pub fn local_ip() -> Result<String> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .map_err(|e| ExecutorError::Network(format!("创建UDP套接字失败: {}", e)))?;
    socket
        .connect("8.8.8.8:80")
        .map_err(|e| ExecutorError::Network(format!("探测本机IP失败: {}", e)))?;
    let addr = socket
        .local_addr()
        .map_err(|e| ExecutorError::Network(format!("读取本地地址失败: {}", e)))?;
    Ok(addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ip_is_well_formed() {
        // 无外网环境下允许失败，成功时必须是合法IP
        if let Ok(ip) = local_ip() {
            assert!(ip.parse::<std::net::IpAddr>().is_ok());
        }
    }
}
