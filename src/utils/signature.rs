// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 签名请求头
pub const SIGNATURE_HEADER: &str = "X-Ispdesk-Signature";
/// 时间戳请求头
pub const TIMESTAMP_HEADER: &str = "X-Ispdesk-Timestamp";

/// 为负载生成签名
///
/// 签名内容为 `"{timestamp}.{payload}"`，结果为十六进制编码的 HMAC-SHA256
pub fn sign(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// 校验签名
///
/// 使用常量时间比较，签名格式错误时直接返回 false
pub fn verify(secret: &str, timestamp: i64, payload: &[u8], signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

/// 判断时间戳是否在允许的偏差内
///
/// 时间戳来自请求头，任意 `i64` 都不会溢出
pub fn within_skew(now: i64, timestamp: i64, max_skew_secs: u64) -> bool {
    now.abs_diff(timestamp) <= max_skew_secs
}
