//! # Core API 設定
//!
//! 環境変数から Core API サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト |
//! |--------|------|-----------|
//! | `CLINIC_API_HOST` | No | `0.0.0.0` |
//! | `CLINIC_API_PORT` | No | `9966` |
//! | `DATABASE_URL` | **Yes** | - |
//! | `RUN_MIGRATIONS` | No | `true` |

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9966;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} は有効なポート番号である必要があります: {value}")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} は true / false のいずれかである必要があります: {value}")]
    InvalidBool { name: &'static str, value: String },
}

/// Core API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreApiConfig {
    /// バインドアドレス
    pub host:           String,
    /// ポート番号
    pub port:           u16,
    /// PostgreSQL 接続 URL
    pub database_url:   String,
    /// 起動時にマイグレーションを適用するか
    pub run_migrations: bool,
}

impl CoreApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("CLINIC_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("CLINIC_API_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: "CLINIC_API_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(ConfigError::InvalidBool {
                    name:  "RUN_MIGRATIONS",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            host,
            port,
            database_url,
            run_migrations,
        })
    }
}
