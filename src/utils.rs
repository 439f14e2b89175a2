//! 工具函数模块
//!
//! 提供 SDK 中使用的各种辅助函数和工具类。

/// 标识符生成工具
pub mod id {
    use crate::error::{Result, XuiError};
    use rand::{thread_rng, Rng};

    /// 生成版本 4 的 UUID 字符串
    ///
    /// 使用 16 字节随机数据，或通过 `seed` 注入确定性的 16 字节种子。
    /// 种子长度不是 16 字节时返回错误。
    ///
    /// # Examples
    ///
    /// ```
    /// use xui_rs::utils::id::guid4;
    ///
    /// let uuid = guid4(None).unwrap();
    /// assert_eq!(uuid.len(), 36);
    ///
    /// let seeded = guid4(Some(&[0u8; 16])).unwrap();
    /// assert_eq!(seeded, "00000000-0000-4000-8000-000000000000");
    /// ```
    pub fn guid4(seed: Option<&[u8]>) -> Result<String> {
        let mut data = [0u8; 16];

        match seed {
            Some(bytes) => {
                if bytes.len() != 16 {
                    return Err(XuiError::invalid_parameter(format!(
                        "UUID seed must be exactly 16 bytes, got {}",
                        bytes.len()
                    )));
                }
                data.copy_from_slice(bytes);
            }
            None => thread_rng().fill(&mut data[..]),
        }

        Ok(format_uuid(data))
    }

    /// 使用指定的随机数生成器生成版本 4 的 UUID 字符串
    pub fn guid4_from_rng<R: Rng>(rng: &mut R) -> String {
        let mut data = [0u8; 16];
        rng.fill(&mut data[..]);
        format_uuid(data)
    }

    fn format_uuid(mut data: [u8; 16]) -> String {
        // 版本位设为 0100，变体位设为 10
        data[6] = (data[6] & 0x0f) | 0x40;
        data[8] = (data[8] & 0x3f) | 0x80;

        let hex: String = data.iter().map(|b| format!("{:02x}", b)).collect();

        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

/// 配额与到期时间换算工具
pub mod quantity {
    use chrono::Utc;

    /// 一个二进制 GB 的字节数
    pub const ONE_GIGABYTE: u64 = 1_073_741_824;

    /// 流量与大小单位
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    /// 将天数换算为毫秒到期时间戳
    ///
    /// `days` 为 0 时表示永不过期，返回 0。
    ///
    /// # Examples
    ///
    /// ```
    /// use xui_rs::utils::quantity::expiry_from_days;
    ///
    /// assert_eq!(expiry_from_days(0), 0);
    /// assert!(expiry_from_days(30) > 0);
    /// ```
    pub fn expiry_from_days(days: i64) -> i64 {
        if days == 0 {
            return 0;
        }

        Utc::now().timestamp_millis() + 864_000 * days * 100
    }

    /// 将 GB 数换算为字节数
    ///
    /// `gigabytes` 为 0 时表示不限量，返回 0。
    pub fn bytes_from_gb(gigabytes: u64) -> u64 {
        if gigabytes == 0 {
            return 0;
        }

        gigabytes * ONE_GIGABYTE
    }

    /// 将字节数换算为 GB 数
    pub fn gb_from_bytes(bytes: u64) -> f64 {
        if bytes == 0 {
            return 0.0;
        }

        bytes as f64 / ONE_GIGABYTE as f64
    }

    /// 将字节数格式化为可读的大小字符串
    ///
    /// 保留最多两位小数，数值与单位之间没有空格。
    ///
    /// # Examples
    ///
    /// ```
    /// use xui_rs::utils::quantity::format_size;
    ///
    /// assert_eq!(format_size(0), "0B");
    /// assert_eq!(format_size(1536), "1.5KB");
    /// assert_eq!(format_size(1073741824), "1GB");
    /// ```
    pub fn format_size(bytes: u64) -> String {
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        let rounded = (size * 100.0).round() / 100.0;
        let mut value = format!("{:.2}", rounded);

        // 去掉无意义的尾随零，与面板显示保持一致
        while value.ends_with('0') {
            value.pop();
        }
        if value.ends_with('.') {
            value.pop();
        }

        format!("{}{}", value, UNITS[unit_index])
    }
}

/// 主机地址处理工具
pub mod domain {
    use crate::error::{Result, XuiError};
    use regex::Regex;
    use url::Url;

    /// 去掉地址中的协议前缀和尾部斜杠
    ///
    /// # Examples
    ///
    /// ```
    /// use xui_rs::utils::domain::clean_domain;
    ///
    /// assert_eq!(clean_domain("https://example.com/").unwrap(), "example.com");
    /// assert_eq!(clean_domain("example.com").unwrap(), "example.com");
    /// ```
    pub fn clean_domain(address: &str) -> Result<String> {
        let scheme = Regex::new(r"^https?://")
            .map_err(|e| XuiError::internal(format!("Regex error: {}", e)))?;

        Ok(scheme
            .replace(address, "")
            .trim_end_matches('/')
            .to_string())
    }

    /// 从地址中提取纯主机名
    ///
    /// 去掉协议前缀、路径和 `:端口` 后缀，只保留主机部分。
    pub fn host_only(address: &str) -> Result<String> {
        let scheme = Regex::new(r"^https?://")
            .map_err(|e| XuiError::internal(format!("Regex error: {}", e)))?;

        if scheme.is_match(address) {
            if let Ok(parsed) = Url::parse(address) {
                if let Some(host) = parsed.host_str() {
                    return Ok(host.to_string());
                }
            }
        }

        let cleaned = clean_domain(address)?;
        let host = cleaned
            .split('/')
            .next()
            .unwrap_or("")
            .split(':')
            .next()
            .unwrap_or("");

        Ok(host.to_string())
    }

    /// 为域名补全 URL 协议前缀
    ///
    /// 已带协议的地址保持不变；`is_https` 为 true 时将 `http` 升级为 `https`。
    pub fn generate_url(domain: &str, is_https: bool) -> Result<String> {
        let scheme = Regex::new(r"^https?://")
            .map_err(|e| XuiError::internal(format!("Regex error: {}", e)))?;

        if scheme.is_match(domain) {
            if is_https {
                let upgrade = Regex::new(r"^https?")
                    .map_err(|e| XuiError::internal(format!("Regex error: {}", e)))?;
                return Ok(upgrade.replace(domain, "https").to_string());
            }

            return Ok(domain.to_string());
        }

        Ok(format!(
            "http{}://{}",
            if is_https { "s" } else { "" },
            domain
        ))
    }
}
